//! Command line access to Polyglot opening books.
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
#![warn(missing_docs, missing_debug_implementations, unused_extern_crates)]
#![warn(clippy::unimplemented, clippy::todo)]
#![warn(clippy::option_unwrap_used, clippy::result_unwrap_used)]

use std::fs::File;
use std::path::PathBuf;
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand, crate_version};
use log::info;
use simplelog::{WriteLogger, LevelFilter, Config};
use polybook::book::{self, PolyglotKey, RecordStore};
use polybook::chess::{Position, STARTING_FEN};
use polybook::config::{self, Settings};

fn main() -> Result<(), Error> {
    let fen_arg = || Arg::with_name("fen")
        .value_name("FEN_STRING")
        .default_value(STARTING_FEN)
        .hide_default_value(true)
        .multiple(true)
        .help("Position in Forsyth-Edwards Notation (FEN). Defaults to the standard starting \
               position.");
    let book_arg = || Arg::with_name("book")
        .long("book")
        .short("b")
        .value_name("BOOK")
        .takes_value(true)
        .help("Polyglot book to read. Defaults to the book named in the config file.");

    let matches =
        App::new("Polybook")
            .version(crate_version!())
            .author("Mike Leany")
            .about("Looks up positions in Polyglot opening books")
            .setting(AppSettings::SubcommandRequiredElseHelp)
            .arg(Arg::with_name("config")
                .long("config")
                .short("c")
                .global(true)
                .value_name("CONFIG_FILE")
                .takes_value(true)
                .help("Sets the config file. Defaults to ~/.polybook/config.yaml"))
            .arg(Arg::with_name("log")
                .long("log")
                .short("l")
                .global(true)
                .help("Turns on logging"))
            .arg(Arg::with_name("log-file")
                .long("log-file")
                .global(true)
                .value_name("LOG_FILE")
                .takes_value(true)
                .help("Sets the log file if logging is turned on"))
            .arg(Arg::with_name("log-level")
                .long("log-level")
                .global(true)
                .value_name("LEVEL")
                .takes_value(true)
                .possible_values(&["off", "error", "warn", "info", "debug", "trace"])
                .help("Sets the log level if logging is turned on"))
            .subcommand(SubCommand::with_name("key")
                .about("Prints the Polyglot key of each position")
                .arg(fen_arg()))
            .subcommand(SubCommand::with_name("moves")
                .about("Lists the book moves for each position")
                .arg(book_arg())
                .arg(fen_arg()))
            .subcommand(SubCommand::with_name("pick")
                .about("Picks a book move for each position at random")
                .arg(book_arg())
                .arg(Arg::with_name("strength")
                    .long("strength")
                    .short("s")
                    .value_name("STRENGTH")
                    .takes_value(true)
                    .help("How strongly to favor popular moves, at least 0 and less than 4. \
                           Defaults to 1."))
                .arg(fen_arg()))
            .subcommand(SubCommand::with_name("info")
                .about("Summarizes a book")
                .arg(book_arg()))
            .get_matches();

    let config_file = matches.value_of_os("config")
        .map(PathBuf::from)
        .unwrap_or_else(config::default_path);
    let settings = Settings::load(&config_file)?;

    let log_file = matches.value_of_os("log-file")
        .map(PathBuf::from)
        .unwrap_or_else(|| settings.log.file.clone());
    let log_level = match matches.value_of("log-level") {
        Some(level) => config::parse_level(level)
            .ok_or_else(|| Error(format!("{}: invalid log level", level)))?,
        None => config::parse_level(&settings.log.level).unwrap_or(LevelFilter::Info),
    };

    let _logger = if matches.is_present("log") || settings.log.enabled {
        WriteLogger::init(
            log_level,
            Config::default(),
            File::create(&log_file).map_err(|err| {
                Error(format!("{}: {}", log_file.display(), err))
            })?)
    } else {
        WriteLogger::init(LevelFilter::Off, Config::default(), std::io::sink())
    };
    info!("using config file {}", config_file.display());

    match matches.subcommand() {
        ("key", Some(matches)) => {
            for pos in positions(matches)? {
                println!("{}  {}", PolyglotKey::from_position(&pos), pos);
            }
        },
        ("moves", Some(matches)) => {
            let store = open_book(matches, &settings)?;
            for pos in positions(matches)? {
                println!("{}", pos);
                let moves = book::plies(&store, &pos);
                let total: u64 = moves.iter().map(|mv| u64::from(mv.weight())).sum();
                if moves.is_empty() {
                    println!("    (not in book)");
                }
                for mv in moves {
                    let share = if total > 0 {
                        100.0 * f64::from(mv.weight()) / total as f64
                    } else {
                        0.0
                    };
                    println!("    {:<6} {:>6} {:>6.2}%", mv.to_string(), mv.weight(), share);
                }
            }
            store.close();
        },
        ("pick", Some(matches)) => {
            let store = open_book(matches, &settings)?;
            let strength = match matches.value_of("strength") {
                Some(s) => s.parse::<f64>()
                    .map_err(|_| Error("strength must be numeric".to_owned()))?,
                None => settings.strength,
            };
            if !(strength >= 0.0 && strength < book::select::MAX_STRENGTH) {
                return Err(Error("strength must be at least 0 and less than 4".to_owned()));
            }
            for pos in positions(matches)? {
                match book::choose(&store, &pos, strength) {
                    Some(mv) => println!("{}  {}", mv, pos),
                    None => println!("-  {}", pos),
                }
            }
            store.close();
        },
        ("info", Some(matches)) => {
            let store = open_book(matches, &settings)?;
            let count = store.record_count();
            println!("records:   {}", count);
            println!("positions: {}", store.position_count());
            if count > 0 {
                println!("first key: {}", store.read_key(0));
                println!("last key:  {}", store.read_key(count - 1));
            }
            store.close();
        },
        _ => unreachable!(),
    }

    Ok(())
}

/// Parses the FEN arguments.
fn positions(matches: &ArgMatches<'_>) -> Result<Vec<Position>, Error> {
    matches.values_of("fen")
        .expect("INFALLIBLE")
        .map(|fen| fen.parse().map_err(|err| Error(format!("{}: {}", fen, err))))
        .collect()
}

/// Opens the book given on the command line, or else the one in the config file.
fn open_book(matches: &ArgMatches<'_>, settings: &Settings) -> Result<RecordStore, Error> {
    let path = matches.value_of_os("book")
        .map(PathBuf::from)
        .or_else(|| settings.book.clone())
        .ok_or_else(|| Error("no book given; use --book or set `book` in the config file"
                             .to_owned()))?;

    match RecordStore::open(&path) {
        Ok(Some(store)) => Ok(store),
        Ok(None) => Err(Error(format!("{}: no book", path.display()))),
        Err(err) => Err(Error(format!("{}: {}", path.display(), err))),
    }
}

struct Error(String);

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        self.0.fmt(f)
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for Error { }

impl From<config::Error> for Error {
    fn from(err: config::Error) -> Self {
        Error(err.to_string())
    }
}
