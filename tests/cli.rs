//! Tests the command line program
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use polybook::book::PackedMove;
use polybook::chess::Square;

const START_KEY: u64 = 0x463b_9618_1691_fc9c;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("polybook-cli-{}-{}", name, std::process::id()))
}

/// Writes the records, which must already be sorted by key, and returns the book's path.
fn write_book(name: &str, records: &[(u64, PackedMove, u16)]) -> PathBuf {
    let mut bytes = Vec::new();
    for (key, mv, weight) in records {
        bytes.extend_from_slice(&key.to_be_bytes());
        bytes.extend_from_slice(&u16::from(*mv).to_be_bytes());
        bytes.extend_from_slice(&weight.to_be_bytes());
        bytes.extend_from_slice(&0u32.to_be_bytes());
    }
    let path = temp_path(name);
    fs::write(&path, bytes).unwrap();
    path
}

/// Runs the program with a config file that does not exist, so the defaults apply.
fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_polybook"))
        .arg("--config")
        .arg(temp_path("no-config.yaml"))
        .args(args)
        .output()
        .unwrap()
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

mod key {
    use super::*;

    #[test]
    fn prints_the_starting_key() {
        let out = run(&["key"]);
        assert!(out.status.success(), "{}", stderr(&out));
        assert!(stdout(&out).starts_with("463b96181691fc9c"), "{}", stdout(&out));
    }

    #[test]
    fn bad_fen_fails() {
        let out = run(&["key", "not a fen"]);
        assert!(!out.status.success());
        assert!(stderr(&out).contains("invalid FEN"), "{}", stderr(&out));
    }
}

mod books {
    use super::*;

    #[test]
    fn missing_book_fails() {
        let book = temp_path("missing.bin");
        let out = run(&["moves", "--book", book.to_str().unwrap()]);
        assert!(!out.status.success());
        assert_eq!(out.status.code(), Some(1));
        assert!(stderr(&out).contains("no book"), "{}", stderr(&out));
        assert!(stdout(&out).is_empty());
    }

    #[test]
    fn no_configured_book_fails() {
        let out = run(&["info"]);
        assert!(!out.status.success());
        assert!(stderr(&out).contains("no book given"), "{}", stderr(&out));
    }

    #[test]
    fn info_counts_records_and_positions() {
        let e2e4 = PackedMove::new(Square::E2, Square::E4, None);
        let d2d4 = PackedMove::new(Square::D2, Square::D4, None);
        let book = write_book("info.bin", &[
            (5, e2e4, 1),
            (START_KEY, e2e4, 3),
            (START_KEY, d2d4, 2),
        ]);
        let out = run(&["info", "--book", book.to_str().unwrap()]);
        fs::remove_file(&book).unwrap();

        assert!(out.status.success(), "{}", stderr(&out));
        let text = stdout(&out);
        assert!(text.contains("records:   3\n"), "{}", text);
        assert!(text.contains("positions: 2\n"), "{}", text);
        assert!(text.contains("first key: 0000000000000005\n"), "{}", text);
        assert!(text.contains("last key:  463b96181691fc9c\n"), "{}", text);
    }

    #[test]
    fn moves_lists_book_moves_in_order() {
        let book = write_book("moves.bin", &[
            (START_KEY, PackedMove::new(Square::E2, Square::E4, None), 3),
            (START_KEY, PackedMove::new(Square::G1, Square::F3, None), 1),
        ]);
        let out = run(&["moves", "--book", book.to_str().unwrap()]);
        fs::remove_file(&book).unwrap();

        assert!(out.status.success(), "{}", stderr(&out));
        let text = stdout(&out);
        let e4 = text.find("e2e4").unwrap();
        let nf3 = text.find("g1f3").unwrap();
        assert!(e4 < nf3, "{}", text);
        assert!(text.contains("75.00%"), "{}", text);
    }

    #[test]
    fn pick_rejects_strength_out_of_range() {
        let book = write_book("strength.bin", &[
            (START_KEY, PackedMove::new(Square::E2, Square::E4, None), 3),
        ]);
        let out = run(&["pick", "--book", book.to_str().unwrap(), "--strength", "4"]);
        fs::remove_file(&book).unwrap();

        assert!(!out.status.success());
        assert!(stderr(&out).contains("strength"), "{}", stderr(&out));
    }
}
