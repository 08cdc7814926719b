//! An opened book
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::convert::TryInto;
use std::fs;
use std::io;
use std::iter::FusedIterator;
use std::path::Path;
use log::{debug, info};
use super::{BookRecord, Error, PolyglotKey, Result, RECORD_SIZE};

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The records of a book, held in memory.
///
/// The store never changes once it has been created, so it can be shared freely between threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordStore {
    bytes: Vec<u8>,
}

impl RecordStore {
    /// Reads the book at `path` into memory.
    ///
    /// Returns `Ok(None)` if there is no file at `path`, so callers can carry on without a book.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Option<RecordStore>> {
        let path = path.as_ref();

        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("no book at {}", path.display());
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };

        let store = RecordStore::from_bytes(bytes)?;
        info!("opened book {} ({} records)", path.display(), store.record_count());

        Ok(Some(store))
    }

    /// Creates a store from the raw contents of a book.
    ///
    /// The records must already be sorted by key. Fails if `bytes` is not a whole number of
    /// records.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<RecordStore> {
        if bytes.len() % RECORD_SIZE != 0 {
            return Err(Error::MalformedBook(bytes.len() as u64));
        }

        Ok(RecordStore { bytes })
    }

    /// Releases the book's memory.
    pub fn close(self) {
        debug!("closing book ({} records)", self.record_count());
    }

    /// Returns the number of records in the book.
    pub fn record_count(&self) -> usize {
        self.bytes.len() / RECORD_SIZE
    }

    /// Returns `true` if the book has no records.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the number of distinct positions in the book.
    pub fn position_count(&self) -> usize {
        (0..self.record_count())
            .filter(|&i| i == 0 || self.read_key(i) != self.read_key(i - 1))
            .count()
    }

    /// Returns the key of the record at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn read_key(&self, index: usize) -> PolyglotKey {
        let start = index * RECORD_SIZE;
        let key: [u8; 8] = self.bytes[start..start + 8].try_into().expect("INFALLIBLE");
        u64::from_be_bytes(key).into()
    }

    /// Returns the record at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn read_record_at(&self, index: usize) -> BookRecord {
        let start = index * RECORD_SIZE;
        let bytes: &[u8; RECORD_SIZE] = self.bytes[start..start + RECORD_SIZE]
            .try_into()
            .expect("INFALLIBLE");
        BookRecord::from_bytes(bytes)
    }

    /// Returns the index of the first record whose key is not less than `key`, or the record
    /// count if there is none.
    pub fn lower_bound(&self, key: PolyglotKey) -> usize {
        let mut left = 0;
        let mut right = self.record_count();

        // the answer always lies in left..=right
        while left < right {
            let mid = left + (right - left) / 2;
            if self.read_key(mid) < key {
                left = mid + 1;
            } else {
                right = mid;
            }
        }

        left
    }

    /// Returns the records for `key`, in the order they appear in the book.
    pub fn find_run(&self, key: PolyglotKey) -> Run<'_> {
        Run {
            store: self,
            key,
            index: self.lower_bound(key),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// An iterator over the consecutive records sharing one key.
///
/// Created by [`RecordStore::find_run`](struct.RecordStore.html#method.find_run).
#[derive(Debug, Clone)]
pub struct Run<'a> {
    store: &'a RecordStore,
    key: PolyglotKey,
    index: usize,
}

impl<'a> Iterator for Run<'a> {
    type Item = BookRecord;

    fn next(&mut self) -> Option<BookRecord> {
        if self.index < self.store.record_count() && self.store.read_key(self.index) == self.key {
            let record = self.store.read_record_at(self.index);
            self.index += 1;
            Some(record)
        } else {
            self.index = self.store.record_count();
            None
        }
    }
}

impl FusedIterator for Run<'_> { }
