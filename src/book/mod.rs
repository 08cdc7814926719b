//! The `book` module reads Polyglot opening books.
//!
//! A Polyglot book is a headerless file of 16-byte records sorted by the 64-bit key of the
//! position they apply to. Looking up a position is a matter of hashing it, finding the run of
//! records carrying that key, and decoding each record's move against the position.
//!
//! ```rust,no_run
//! use polybook::book::{self, RecordStore};
//! use polybook::chess::Position;
//!
//! if let Some(store) = RecordStore::open("book.bin")? {
//!     let pos = Position::new();
//!     for mv in book::plies(&store, &pos) {
//!         println!("{} {}", mv, mv.weight());
//!     }
//!     if let Some(mv) = book::choose(&store, &pos, 1.0) {
//!         println!("playing {}", mv);
//!     }
//! }
//! # Ok::<(), polybook::book::Error>(())
//! ```
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use crate::chess::{CastlingSide, Color, Piece, Position, Square};

////////////////////////////////////////////////////////////////////////////////////////////////////
/// What a book lookup needs to know about a position.
///
/// The book never modifies a position. Anything that can answer these questions can be looked
/// up, so engines with their own board representation only need to implement this trait.
pub trait BookPosition {
    /// Returns the color and type of piece, if any, at the given square.
    fn piece_at(&self, sq: Square) -> Option<(Color, Piece)>;

    /// Returns the color whose turn it is.
    fn turn(&self) -> Color;

    /// Returns `true` if `color` still has the right to castle toward `side`.
    fn can_castle(&self, color: Color, side: CastlingSide) -> bool;

    /// Returns the square of the king of the given color.
    fn king_location(&self, color: Color) -> Square;

    /// Returns the origin and destination the engine uses to express castling toward `side` for
    /// the side to move.
    ///
    /// Books write castling as the king capturing its own rook; this is where that gets
    /// translated into the engine's convention.
    fn castling_move(&self, side: CastlingSide) -> (Square, Square);
}

impl BookPosition for Position {
    fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        Position::piece_at(self, sq)
    }

    fn turn(&self) -> Color {
        Position::turn(self)
    }

    fn can_castle(&self, color: Color, side: CastlingSide) -> bool {
        self.has_castling_rights(color, side)
    }

    fn king_location(&self, color: Color) -> Square {
        Position::king_location(self, color)
    }

    fn castling_move(&self, side: CastlingSide) -> (Square, Square) {
        self.castling_squares(side)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
pub mod zobrist;
pub mod record;
pub mod store;
pub mod codec;
pub mod select;
pub mod error;

pub use zobrist::PolyglotKey;
pub use record::{BookRecord, PackedMove, RECORD_SIZE};
pub use store::{RecordStore, Run};
pub use codec::{decode, CandidateMove};
pub use select::{plies, choose, choose_with};
pub use error::{Error, Result};
