//! Turns book records into moves for a given position
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use std::hash::{Hash, Hasher};
use log::trace;
use crate::chess::{CastlingSide, File, Promotion, Square};
use super::{BookPosition, BookRecord};

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A move suggested by the book, expressed in the position's own conventions.
///
/// Two candidates are equal when they describe the same move; the weight is not compared.
#[derive(Debug, Copy, Clone)]
pub struct CandidateMove {
    origin: Square,
    destination: Square,
    promotion: Option<Promotion>,
    castling: Option<CastlingSide>,
    weight: u16,
}

impl CandidateMove {
    /// Returns the square the moving piece starts on.
    pub fn origin(&self) -> Square {
        self.origin
    }

    /// Returns the square the moving piece ends on.
    pub fn destination(&self) -> Square {
        self.destination
    }

    /// Returns the piece being promoted to, if any.
    pub fn promotion(&self) -> Option<Promotion> {
        self.promotion
    }

    /// Returns the side castled toward if this is a castling move.
    pub fn castling(&self) -> Option<CastlingSide> {
        self.castling
    }

    /// Returns `true` if this is a castling move.
    pub fn is_castling(&self) -> bool {
        self.castling.is_some()
    }

    /// Returns the book weight of the move.
    pub fn weight(&self) -> u16 {
        self.weight
    }
}

impl PartialEq for CandidateMove {
    fn eq(&self, other: &Self) -> bool {
        self.origin == other.origin
            && self.destination == other.destination
            && self.promotion == other.promotion
            && self.castling == other.castling
    }
}

impl Eq for CandidateMove { }

impl Hash for CandidateMove {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.origin.hash(state);
        self.destination.hash(state);
        self.promotion.hash(state);
        self.castling.hash(state);
    }
}

impl fmt::Display for CandidateMove {
    /// Writes the move in coordinate notation, such as `e2e4` or `e7e8q`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.origin, self.destination)?;
        if let Some(prom) = self.promotion {
            write!(f, "{}", prom)?;
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Decodes the move in `record` against `pos`.
///
/// Books write castling as the king capturing its own rook (`e1h1`, `e1a1`, `e8h8`, `e8a8`). When a
/// record has that shape and the side to move has its king on its home square, the move is
/// returned as castling, using the squares given by
/// [`BookPosition::castling_move`](trait.BookPosition.html#tymethod.castling_move). Castling
/// rights are not consulted.
///
/// # Panics
/// Panics if the record's promotion code is 5 through 7, whatever the shape of the move.
pub fn decode<P: BookPosition + ?Sized>(pos: &P, record: &BookRecord) -> CandidateMove {
    let packed = record.packed_move();
    let orig = packed.origin();
    let dest = packed.destination();
    let promotion = packed.promotion();
    let weight = record.weight();

    if let Some(side) = castling_side(pos, orig, dest) {
        let (origin, destination) = pos.castling_move(side);
        trace!("{} decoded as castling {}{} (weight {})", packed, origin, destination, weight);
        return CandidateMove { origin, destination, promotion: None, castling: Some(side), weight };
    }

    let mv = CandidateMove {
        origin: orig,
        destination: dest,
        promotion,
        castling: None,
        weight,
    };
    trace!("{} decoded as {} (weight {})", packed, mv, weight);
    mv
}

/// Returns the castling side if `orig`-`dest` is the book's king-takes-rook notation for the side
/// to move.
fn castling_side<P: BookPosition + ?Sized>(pos: &P, orig: Square, dest: Square)
    -> Option<CastlingSide>
{
    let turn = pos.turn();
    let home = Square::from_coord(File::E, turn.back_rank());

    if orig != home || pos.king_location(turn) != orig || orig.rank() != dest.rank() {
        return None;
    }

    match dest.file() {
        File::H => Some(CastlingSide::KingSide),
        File::A => Some(CastlingSide::QueenSide),
        _ => None,
    }
}
