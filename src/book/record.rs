//! Book records and the packed move format
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::convert::TryFrom;
use std::fmt;
use crate::chess::{File, Promotion, Rank, Square};
use super::PolyglotKey;

/// The size of a book record in bytes
pub const RECORD_SIZE: usize = 16;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A move as stored in a book, packed into 16 bits.
///
/// From the least significant bit: destination file (3 bits), destination rank (3), origin
/// file (3), origin rank (3), promotion piece (3). The top bit is unused.
///
/// Castling is stored as the king moving onto its own rook, so `e1h1` rather than `e1g1`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PackedMove(u16);

impl PackedMove {
    /// Packs a move.
    pub fn new(orig: Square, dest: Square, promotion: Option<Promotion>) -> PackedMove {
        PackedMove(
            ((promotion.map_or(0, |p| p as u16)) << 12)
            + ((orig.rank() as u16) << 9)
            + ((orig.file() as u16) << 6)
            + ((dest.rank() as u16) << 3)
            + dest.file() as u16
        )
    }

    /// Returns the square the move starts on.
    pub fn origin(self) -> Square {
        square(self.0 >> 6)
    }

    /// Returns the square the move ends on.
    pub fn destination(self) -> Square {
        square(self.0)
    }

    /// Returns the promotion piece, if any.
    ///
    /// # Panics
    /// Panics on a promotion code of 5 through 7, which no valid book contains.
    pub fn promotion(self) -> Option<Promotion> {
        match (self.0 >> 12) & 0o7 {
            0 => None,
            1 => Some(Promotion::ToKnight),
            2 => Some(Promotion::ToBishop),
            3 => Some(Promotion::ToRook),
            4 => Some(Promotion::ToQueen),
            code => panic!("invalid promotion code {} in book move {:#06x}", code, self.0),
        }
    }
}

/// Decodes the low six bits as rank and file.
fn square(bits: u16) -> Square {
    let file = File::try_from((bits & 0o7) as usize).expect("INFALLIBLE");
    let rank = Rank::try_from(((bits >> 3) & 0o7) as usize).expect("INFALLIBLE");
    Square::from_coord(file, rank)
}

impl From<u16> for PackedMove {
    fn from(bits: u16) -> Self {
        PackedMove(bits)
    }
}

impl From<PackedMove> for u16 {
    fn from(mv: PackedMove) -> Self {
        mv.0
    }
}

impl fmt::Display for PackedMove {
    /// Writes the move as stored, in coordinate notation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.origin(), self.destination())?;
        if let Some(prom) = self.promotion() {
            write!(f, "{}", prom)?;
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A single book entry.
///
/// On disk a record is 16 big-endian bytes: the key (8 bytes), the packed move (2), the weight
/// (2) and a learning value (4). The learning value is skipped.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BookRecord {
    key: PolyglotKey,
    mv: PackedMove,
    weight: u16,
}

impl BookRecord {
    /// Decodes a record.
    pub fn from_bytes(bytes: &[u8; RECORD_SIZE]) -> BookRecord {
        let mut key = [0; 8];
        key.copy_from_slice(&bytes[0..8]);

        BookRecord {
            key: u64::from_be_bytes(key).into(),
            mv: u16::from_be_bytes([bytes[8], bytes[9]]).into(),
            weight: u16::from_be_bytes([bytes[10], bytes[11]]),
        }
    }

    /// Returns the key of the position this record applies to.
    pub fn key(&self) -> PolyglotKey {
        self.key
    }

    /// Returns the move, as stored.
    pub fn packed_move(&self) -> PackedMove {
        self.mv
    }

    /// Returns the weight of the move relative to the other moves for the same position.
    pub fn weight(&self) -> u16 {
        self.weight
    }
}
