//! Tests book lookups against book files on disk
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use polybook::book::{self, BookPosition, PackedMove, PolyglotKey, RecordStore};
use polybook::chess::{CastlingSide, Color, Piece, Position, Promotion, Square};

const START_KEY: u64 = 0x463b_9618_1691_fc9c;
const AFTER_E4_KEY: u64 = 0x823c_9b50_fd11_4196;
const AFTER_E4_D5_KEY: u64 = 0x0756_b944_61c5_0fb0;

/// Writes the records to a file in the temp directory, sorted by key, and returns its path.
fn write_book(name: &str, mut records: Vec<(u64, PackedMove, u16)>) -> PathBuf {
    records.sort_by_key(|(key, _, _)| *key);
    let mut bytes = Vec::new();
    for (key, mv, weight) in records {
        bytes.extend_from_slice(&key.to_be_bytes());
        bytes.extend_from_slice(&u16::from(mv).to_be_bytes());
        bytes.extend_from_slice(&weight.to_be_bytes());
        bytes.extend_from_slice(&0u32.to_be_bytes());
    }
    let path = std::env::temp_dir().join(format!("polybook-{}-{}.bin", name, std::process::id()));
    fs::write(&path, bytes).unwrap();
    path
}

fn open(path: &Path) -> RecordStore {
    let store = RecordStore::open(path).unwrap().unwrap();
    fs::remove_file(path).unwrap();
    store
}

fn mv(orig: Square, dest: Square) -> PackedMove {
    PackedMove::new(orig, dest, None)
}

mod store {
    use super::*;

    #[test]
    fn missing_book_opens_as_none() {
        let path = std::env::temp_dir().join("polybook-no-such-book.bin");
        assert!(RecordStore::open(&path).unwrap().is_none());
    }

    #[test]
    fn truncated_book_is_an_error() {
        let path = std::env::temp_dir()
            .join(format!("polybook-truncated-{}.bin", std::process::id()));
        fs::write(&path, vec![0u8; 16 * 3 + 5]).unwrap();
        let result = RecordStore::open(&path);
        fs::remove_file(&path).unwrap();

        match result {
            Err(book::Error::MalformedBook(53)) => {},
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn directory_is_an_io_error() {
        match RecordStore::open(std::env::temp_dir()) {
            Err(book::Error::Io(_)) => {},
            other => panic!("unexpected {:?}", other.map(|s| s.map(|s| s.record_count()))),
        }
    }

    #[test]
    fn empty_book_opens() {
        let path = write_book("empty", Vec::new());
        let store = open(&path);
        assert_eq!(store.record_count(), 0);
        assert!(book::plies(&store, &Position::new()).is_empty());
        store.close();
    }
}

mod scenarios {
    use super::*;

    #[test]
    fn start_position_plays_e2e4() {
        let path = write_book("e2e4", vec![(START_KEY, mv(Square::E2, Square::E4), 100)]);
        let store = open(&path);
        let pos = Position::new();

        let moves = book::plies(&store, &pos);
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].origin(), Square::E2);
        assert_eq!(moves[0].destination(), Square::E4);
        assert_eq!(moves[0].promotion(), None);
        assert_eq!(moves[0].weight(), 100);

        for strength in &[0.0, 0.5, 1.0, 2.0, 3.99] {
            for _ in 0..10 {
                assert_eq!(book::choose(&store, &pos, *strength), Some(moves[0]));
            }
        }
    }

    #[test]
    fn positions_not_in_book_have_no_moves() {
        let path = write_book("absent", vec![(START_KEY, mv(Square::E2, Square::E4), 100)]);
        let store = open(&path);
        let pos: Position = "8/8/8/4k3/8/8/8/4K3 w - - 0 1".parse().unwrap();

        assert!(book::plies(&store, &pos).is_empty());
        assert_eq!(book::choose(&store, &pos, 1.0), None);
    }

    #[test]
    fn each_position_gets_only_its_own_moves() {
        let path = write_book("line", vec![
            (AFTER_E4_D5_KEY, mv(Square::E4, Square::D5), 30),
            (START_KEY, mv(Square::E2, Square::E4), 50),
            (AFTER_E4_KEY, mv(Square::E7, Square::E5), 40),
            (START_KEY, mv(Square::D2, Square::D4), 35),
            (AFTER_E4_KEY, mv(Square::C7, Square::C5), 45),
            (START_KEY, mv(Square::C2, Square::C4), 15),
        ]);
        let store = open(&path);

        let names = |fen: &str| -> Vec<String> {
            let pos: Position = fen.parse().unwrap();
            book::plies(&store, &pos).iter().map(|m| m.to_string()).collect()
        };

        // a stable sort keeps records for one key in the order given
        assert_eq!(names(polybook::chess::STARTING_FEN), vec!["e2e4", "d2d4", "c2c4"]);
        assert_eq!(names("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"),
                   vec!["e7e5", "c7c5"]);
        assert_eq!(names("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2"),
                   vec!["e4d5"]);
    }

    #[test]
    fn castling_and_promotion_come_back_decoded() {
        let castles: Position = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1".parse().unwrap();
        let promotes: Position = "4k3/P7/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        let path = write_book("special", vec![
            (PolyglotKey::from_position(&castles).into(), mv(Square::E1, Square::H1), 10),
            (PolyglotKey::from_position(&castles).into(), mv(Square::E1, Square::A1), 10),
            (PolyglotKey::from_position(&promotes).into(),
             PackedMove::new(Square::A7, Square::A8, Some(Promotion::ToQueen)), 10),
        ]);
        let store = open(&path);

        let moves = book::plies(&store, &castles);
        let names: Vec<_> = moves.iter().map(|m| m.to_string()).collect();
        assert_eq!(names, vec!["e1g1", "e1c1"]);
        assert_eq!(moves[0].castling(), Some(CastlingSide::KingSide));
        assert_eq!(moves[1].castling(), Some(CastlingSide::QueenSide));

        let moves = book::plies(&store, &promotes);
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].to_string(), "a7a8q");
        assert_eq!(moves[0].promotion(), Some(Promotion::ToQueen));
    }
}

mod other_boards {
    use super::*;

    /// A board kept as a map of occupied squares, as some engines do.
    struct SparseBoard {
        pieces: HashMap<Square, (Color, Piece)>,
        turn: Color,
        castling: Vec<(Color, CastlingSide)>,
    }

    impl SparseBoard {
        fn from_position(pos: &Position) -> SparseBoard {
            let pieces = Square::all()
                .filter_map(|sq| pos.piece_at(sq).map(|p| (sq, p)))
                .collect();
            let mut castling = Vec::new();
            for c in &[Color::White, Color::Black] {
                for side in &[CastlingSide::KingSide, CastlingSide::QueenSide] {
                    if pos.has_castling_rights(*c, *side) {
                        castling.push((*c, *side));
                    }
                }
            }
            SparseBoard { pieces, turn: pos.turn(), castling }
        }
    }

    impl BookPosition for SparseBoard {
        fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
            self.pieces.get(&sq).copied()
        }

        fn turn(&self) -> Color {
            self.turn
        }

        fn can_castle(&self, color: Color, side: CastlingSide) -> bool {
            self.castling.contains(&(color, side))
        }

        fn king_location(&self, color: Color) -> Square {
            *self.pieces.iter().find(|(_, p)| **p == (color, Piece::King)).unwrap().0
        }

        fn castling_move(&self, side: CastlingSide) -> (Square, Square) {
            let (e, g, c) = match self.turn {
                Color::White => (Square::E1, Square::G1, Square::C1),
                Color::Black => (Square::E8, Square::G8, Square::C8),
            };
            match side {
                CastlingSide::KingSide => (e, g),
                CastlingSide::QueenSide => (e, c),
            }
        }
    }

    #[test]
    fn keys_do_not_depend_on_the_board_type() {
        for fen in &[
            polybook::chess::STARTING_FEN,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 b - - 0 1",
        ] {
            let pos: Position = fen.parse().unwrap();
            let sparse = SparseBoard::from_position(&pos);
            assert_eq!(PolyglotKey::from_position(&sparse), PolyglotKey::from_position(&pos));
        }
        let sparse = SparseBoard::from_position(&Position::new());
        assert_eq!(u64::from(PolyglotKey::from_position(&sparse)), START_KEY);
    }

    #[test]
    fn lookups_work_through_the_trait() {
        let path = write_book("sparse", vec![
            (START_KEY, mv(Square::G1, Square::F3), 1),
            (START_KEY, mv(Square::B1, Square::C3), 0),
        ]);
        let store = open(&path);
        let board = SparseBoard::from_position(&Position::new());

        let moves = book::plies(&store, &board);
        assert_eq!(moves.len(), 2);
        // the zero-weight move can never be picked at strength 1
        for _ in 0..20 {
            assert_eq!(book::choose(&store, &board, 1.0).unwrap().to_string(), "g1f3");
        }
    }
}
