//! Contains structures related to the `Position`.
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
use super::*;

use builder::PositionBuilder;
use Color::*;
use Piece::*;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A representation of the arrangement of pieces on the board at a given point in the game, as well
/// as castling availability and the en-passant square.
///
/// # Instantiation
///  -  The [`new`](#method.new) method creates a `Position` containing the standard starting
///     position.
///  -  The [`from_fen_str`](#method.from_fen_str) method (along with its synonyms `from_str` and
///     `str::parse`) creates a new `Position` from a string containing [Forsyth-Edwards
///     Notation (FEN)](https://en.wikipedia.org/wiki/Forsyth%E2%80%93Edwards_Notation).
///  -  Using a [`PositionBuilder`](struct.PositionBuilder.html).
///
/// ```rust
/// use polybook::chess::{Position, Square, Color, Piece};
///
/// let pos: Position = "4k3/8/8/8/8/8/8/4K2R w K - 0 1".parse()?;
/// assert_eq!(pos.piece_at(Square::H1), Some((Color::White, Piece::Rook)));
/// # Ok::<(), polybook::chess::Error>(())
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Position {
    board: [Option<(Color, Piece)>; Square::COUNT],
    turn: Color,
    ep_square: Option<Square>,
    castling_rights: [u8; Color::COUNT],

    draw_plies: usize,
    move_num: usize,
}

const CASTLE_KING_SIDE: u8 = 0x1;
const CASTLE_QUEEN_SIDE: u8 = 0x2;
const CASTLE_BOTH_SIDES: u8 = CASTLE_KING_SIDE | CASTLE_QUEEN_SIDE;

/// FEN of the standard starting position
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Position {

    /// Returns the standard starting Position.
    pub fn new() -> Position {
        Position::from_fen_str(STARTING_FEN).expect("INFALLIBLE")
    }

    /// Returns a position with an empty board.
    fn empty_board() -> Position {
        Position {
            board: [None; Square::COUNT],
            turn: White,
            ep_square: None,
            castling_rights: [0, 0],
            draw_plies: 0,
            move_num: 1,
        }
    }

    /// Parse a position from a string containing [Forsyth-Edwards
    /// Notation (FEN)](https://en.wikipedia.org/wiki/Forsyth%E2%80%93Edwards_Notation).
    ///
    /// The half move clock and move number may be omitted, as they are in EPD strings.
    pub fn from_fen_str(s: &str) -> Result<Position> {
        use FenField::*;

        let mut pos = PositionBuilder::new();
        let mut fields = s.split_whitespace();
        let bad = Error::InvalidFen;

        // parse the board
        let board = fields.next().ok_or(bad(Board))?;
        let mut r = Rank::COUNT - 1;
        let mut f = 0;
        for c in board.chars() {
            match c {
                '1' ..= '8' => {
                    f += c.to_digit(10).expect("INFALLIBLE") as usize;
                    if f > File::COUNT {
                        return Err(bad(Board));
                    }
                }
                '/' => {
                    if f == File::COUNT && r > 0 {
                        r -= 1;
                        f = 0;
                    } else {
                        return Err(bad(Board));
                    }
                }
                _ => {
                    let sq = match (File::try_from(f), Rank::try_from(r)) {
                        (Ok(f), Ok(r)) => Square::from_coord(f, r),
                        _ => return Err(bad(Board)),
                    };
                    let color = if c.is_uppercase() { White } else { Black };
                    let piece: Piece = c.to_string().parse().map_err(|_| bad(Board))?;

                    pos.piece(color, piece, sq);

                    f += 1;
                }
            }
        }
        if r > 0 || f < File::COUNT {
            return Err(bad(Board));
        }

        // parse the turn
        let turn = fields.next().ok_or(bad(Turn))?;
        pos.turn(turn.parse().map_err(|_| bad(Turn))?);

        // parse the castling flags
        match fields.next().ok_or(bad(Castling))? {
            "-" => {},
            castling_flags => {
                for c in castling_flags.chars() {
                    match c {
                        'K' => { pos.can_castle_king_side(White, true); },
                        'Q' => { pos.can_castle_queen_side(White, true); },
                        'k' => { pos.can_castle_king_side(Black, true); },
                        'q' => { pos.can_castle_queen_side(Black, true); },
                        _ => return Err(bad(Castling)),
                    }
                }
            },
        }

        // parse en passant square
        match fields.next().ok_or(bad(EnPassant))? {
            "-" => {},
            ep_square => {
                pos.en_passant_square(Some(ep_square.parse().map_err(|_| bad(EnPassant))?));
            },
        }

        // parse half move clock, if present
        if let Some(plies) = fields.next() {
            pos.draw_plies(plies.parse().map_err(|_| bad(HalfMoveClock))?);
        }

        // parse move number, if present
        if let Some(move_num) = fields.next() {
            pos.move_number(move_num.parse().map_err(|_| bad(MoveNumber))?);
        }

        if fields.next().is_some() {
            return Err(bad(Trailing));
        }

        pos.validate()
    }

    /// Converts the position to a FEN string.
    pub fn to_fen_str(&self) -> String {
        // the board
        let mut board = String::new();
        for r in (0..Rank::COUNT).rev() {
            let rank = Rank::try_from(r).expect("INFALLIBLE");
            let mut count = 0;
            for f in 0..File::COUNT {
                let sq = Square::from_coord(File::try_from(f).expect("INFALLIBLE"), rank);
                if let Some((c, p)) = self.piece_at(sq) {
                    if count > 0 {
                        board += &count.to_string();
                        count = 0;
                    }

                    if c == White {
                        board += &p.to_string();
                    } else {
                        board += &p.to_string().to_lowercase();
                    }
                } else {
                    count += 1;
                }
            }
            if count > 0 {
                board += &count.to_string();
            }
            if r > 0 {
                board += "/";
            }
        }

        // castling rights
        let mut castling = String::new();
        castling += match self.castling_rights[White as usize] {
            CASTLE_KING_SIDE => "K",
            CASTLE_QUEEN_SIDE => "Q",
            CASTLE_BOTH_SIDES => "KQ",
            _ => "",
        };
        castling += match self.castling_rights[Black as usize] {
            CASTLE_KING_SIDE => "k",
            CASTLE_QUEEN_SIDE => "q",
            CASTLE_BOTH_SIDES => "kq",
            _ => "",
        };
        if castling.is_empty() {
            castling += "-";
        }

        let ep_square = match self.ep_square {
            Some(sq) => sq.to_string(),
            None => "-".to_string(),
        };

        format!("{} {} {} {} {} {}", board, self.turn, castling, ep_square,
                                     self.draw_plies, self.move_num)
    }

    /// Returns the color whose turn it is.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Returns the en-passant square, if any.
    pub fn en_passant_square(&self) -> Option<Square> {
        self.ep_square
    }

    /// Returns `true` if king-side castling rights are available for `c`.
    pub fn has_king_side_castling_rights(&self, c: Color) -> bool {
        self.castling_rights[c as usize] & CASTLE_KING_SIDE != 0
    }

    /// Returns `true` if queen-side castling rights are available for `c`.
    pub fn has_queen_side_castling_rights(&self, c: Color) -> bool {
        self.castling_rights[c as usize] & CASTLE_QUEEN_SIDE != 0
    }

    /// Returns `true` if castling rights toward `side` are available for `c`.
    pub fn has_castling_rights(&self, c: Color, side: CastlingSide) -> bool {
        match side {
            CastlingSide::KingSide => self.has_king_side_castling_rights(c),
            CastlingSide::QueenSide => self.has_queen_side_castling_rights(c),
        }
    }

    /// Returns the number of plies which count toward the fifty move rule.
    pub fn draw_plies(&self) -> usize {
        self.draw_plies
    }

    /// Returns the move number.
    pub fn move_number(&self) -> usize {
        self.move_num
    }

    /// Returns the square where the king of the given color is located.
    pub fn king_location(&self, c: Color) -> Square {
        Square::all()
            .find(|sq| self.piece_at(*sq) == Some((c, King)))
            .expect("INFALLIBLE")
    }

    /// Returns the color and type of piece, if any, at the given location.
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        self.board[sq as usize]
    }

    /// Returns the king's origin and destination when the side to move castles toward `side`.
    ///
    /// Castling rights are not checked.
    pub fn castling_squares(&self, side: CastlingSide) -> (Square, Square) {
        let rank = self.turn.back_rank();
        let dest = match side {
            CastlingSide::KingSide => File::G,
            CastlingSide::QueenSide => File::C,
        };
        (Square::from_coord(File::E, rank), Square::from_coord(dest, rank))
    }
}

impl Default for Position {
    /// Returns the standard starting Position.
    fn default() -> Self {
        Position::new()
    }
}

impl fmt::Display for Position {
    /// Writes out the position using FEN.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_fen_str().fmt(f)
    }
}

impl fmt::Debug for Position {
    /// Writes out the position using FEN.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_fen_str().fmt(f)
    }
}

impl FromStr for Position {
    type Err = Error;

    /// Parse a position from a FEN string.
    fn from_str(s: &str) -> Result<Self> {
        Position::from_fen_str(s)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
pub mod builder;
