//! Defines the error types needed by the book module
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use std::io;
use super::RECORD_SIZE;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Error type used when opening a book
#[derive(Debug)]
pub enum Error {
    /// The book could not be read
    Io(io::Error),
    /// The book's length in bytes is not a whole number of records
    MalformedBook(u64),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => err.fmt(f),
            Error::MalformedBook(len) => {
                write!(f, "book length {} is not a multiple of {}", len, RECORD_SIZE)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::MalformedBook(_) => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Result type used by methods in the `book` module
pub type Result<T> = std::result::Result<T, Error>;
