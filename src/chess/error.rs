//! Defines the error types needed by the chess module
//
//  Copyright 2019 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Error type used by methods in the `chess` module
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    /// Not the name of a color, piece, file, rank or square
    ParseError,
    /// Failed to convert an integer to an another type
    TryFromIntError,
    /// A field of a FEN string is missing or malformed
    InvalidFen(FenField),
    /// Missing king or multiple kings of the same color
    InvalidKingCount,
    /// Pawn on first or last rank
    InvalidPawnRank,
    /// Castling flags aren't valid for this position
    InvalidCastlingFlags,
    /// En-passant square without capturable pawn
    MissingEnPassantPawn,
    /// En-passant square is occupied
    EnPassantSquareOccupied,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Error::*;

        match self {
            ParseError => "unrecognized name".fmt(f),
            TryFromIntError => "integer out of range".fmt(f),
            InvalidFen(field) => write!(f, "invalid FEN: bad {}", field),
            InvalidKingCount => "missing king or multiple kings of the same color".fmt(f),
            InvalidPawnRank => "pawn on first or last rank".fmt(f),
            InvalidCastlingFlags => "castling flags aren't valid for this position".fmt(f),
            MissingEnPassantPawn => "en-passant square without capturable pawn".fmt(f),
            EnPassantSquareOccupied => "en-passant square is occupied".fmt(f),
        }
    }
}

impl std::error::Error for Error { }

/// The fields of a FEN string, in order
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum FenField {
    Board,
    Turn,
    Castling,
    EnPassant,
    HalfMoveClock,
    MoveNumber,
    /// Anything after the move number
    Trailing,
}

impl fmt::Display for FenField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenField::Board => "piece placement",
            FenField::Turn => "side to move",
            FenField::Castling => "castling availability",
            FenField::EnPassant => "en-passant square",
            FenField::HalfMoveClock => "half-move clock",
            FenField::MoveNumber => "move number",
            FenField::Trailing => "trailing text",
        }.fmt(f)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Result type used by methods in the `chess` module
pub type Result<T> = std::result::Result<T, Error>;
