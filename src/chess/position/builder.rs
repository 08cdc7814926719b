//! Contains a builder for `Position`
//
//  Copyright 2019 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use super::*;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A builder for `Position`
///
/// ```rust
/// use polybook::chess::{PositionBuilder, Color, Piece, Square};
///
/// let mut builder = PositionBuilder::new();
/// builder.piece(Color::White, Piece::King, Square::E1);
/// builder.piece(Color::White, Piece::Rook, Square::H1);
/// builder.piece(Color::Black, Piece::King, Square::E8);
/// builder.can_castle_king_side(Color::White, true);
/// let pos = builder.validate()?;
/// assert_eq!(pos.to_fen_str(), "4k3/8/8/8/8/8/8/4K2R w K - 0 1");
/// # Ok::<(), polybook::chess::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct PositionBuilder {
    board: [ Option<(Color, Piece)>; Square::COUNT ],
    turn: Color,
    castle_king_side: [ bool; Color::COUNT ],
    castle_queen_side: [ bool; Color::COUNT ],
    ep_square: Option<Square>,
    draw_plies: usize,
    move_num: usize,
}

impl PositionBuilder {
    /// Creates a new, empty `PositionBuilder`
    pub fn new() -> Self {
        PositionBuilder {
            board: [ None; Square::COUNT ],
            turn: White,
            castle_king_side: [ false; Color::COUNT ],
            castle_queen_side: [ false; Color::COUNT ],
            ep_square: None,
            draw_plies: 0,
            move_num: 1,
        }
    }

    /// Sets the piece at `square`
    pub fn piece(&mut self, color: Color, piece: Piece, square: Square) -> &mut Self {
        self.board[square as usize] = Some((color, piece));
        self
    }

    /// Clears the piece at `square`
    pub fn clear(&mut self, square: Square) -> &mut Self {
        self.board[square as usize] = None;
        self
    }

    /// Sets the turn to `color`
    pub fn turn(&mut self, color: Color) -> &mut Self {
        self.turn = color;
        self
    }

    /// Sets king side castling rights for `color`
    pub fn can_castle_king_side(&mut self, color: Color, available: bool) -> &mut Self {
        self.castle_king_side[color as usize] = available;
        self
    }

    /// Sets queen side castling rights for `color`
    pub fn can_castle_queen_side(&mut self, color: Color, available: bool) -> &mut Self {
        self.castle_queen_side[color as usize] = available;
        self
    }

    /// Sets or clears the en-passant square
    pub fn en_passant_square(&mut self, square: Option<Square>) -> &mut Self {
        self.ep_square = square;
        self
    }

    /// Sets the number of plies that count toward the 50-move rule.
    pub fn draw_plies(&mut self, plies: usize) -> &mut Self {
        self.draw_plies = plies;
        self
    }

    /// Sets the move number
    pub fn move_number(&mut self, move_num: usize) -> &mut Self {
        self.move_num = move_num;
        self
    }

    /// Validates the position and returns it.
    ///
    /// Checks are structural only; whether the side not to move is in check is not examined.
    pub fn validate(&self) -> Result<Position> {
        use Error::*;

        let mut pos = Position::empty_board();
        pos.board = self.board;
        pos.turn = self.turn;
        for c in 0..Color::COUNT {
            if self.castle_king_side[c] {
                pos.castling_rights[c] |= CASTLE_KING_SIDE;
            }
            if self.castle_queen_side[c] {
                pos.castling_rights[c] |= CASTLE_QUEEN_SIDE;
            }
        }
        pos.ep_square = self.ep_square;
        pos.draw_plies = self.draw_plies;
        pos.move_num = self.move_num;

        for c in &[White, Black] {
            // Step 1: verify exactly one king per side
            let kings = self.board.iter().filter(|sq| **sq == Some((*c, King))).count();
            if kings != 1 {
                return Err(InvalidKingCount);
            }
            // Step 2: no pawns on ranks 1 and 8
            let misplaced_pawn = Square::all()
                .filter(|sq| sq.rank() == Rank::R1 || sq.rank() == Rank::R8)
                .any(|sq| pos.piece_at(sq) == Some((*c, Pawn)));
            if misplaced_pawn {
                return Err(InvalidPawnRank);
            }
        }
        // Step 3: if there is an EP square, it must be empty and there must be a pawn to capture
        if let Some(ep_square) = pos.ep_square {
            if pos.piece_at(ep_square).is_some() {
                return Err(EnPassantSquareOccupied);
            }
            let (ep_rank, pawn_rank) = match pos.turn {
                White => (Rank::R6, Rank::R5),
                Black => (Rank::R3, Rank::R4),
            };
            let pawn_square = Square::from_coord(ep_square.file(), pawn_rank);
            if ep_square.rank() != ep_rank || pos.piece_at(pawn_square) != Some((!pos.turn, Pawn)) {
                return Err(MissingEnPassantPawn);
            }
        }
        // Step 4: if castling rights exist, king and rook must be in the correct squares
        for c in &[White, Black] {
            let r = c.back_rank();
            let home = |file, piece| pos.piece_at(Square::from_coord(file, r)) == Some((*c, piece));

            if pos.castling_rights[*c as usize] != 0 && !home(File::E, King) {
                return Err(InvalidCastlingFlags);
            }
            if pos.has_queen_side_castling_rights(*c) && !home(File::A, Rook) {
                return Err(InvalidCastlingFlags);
            }
            if pos.has_king_side_castling_rights(*c) && !home(File::H, Rook) {
                return Err(InvalidCastlingFlags);
            }
        }

        Ok(pos)
    }
}

impl Default for PositionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
