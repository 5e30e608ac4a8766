// Copyright (c) the raster_pipeline Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! The bounded, line-indexed store that decouples the pipeline's producer
//! side from an external fetch consumer when running in
//! [`crate::page::ProcessMode::Fetching`]. Grounded on `fetch-pool.c`'s
//! `fetchpool_add_data`/`fetchpool_fetch_data`/`fetchpool_get_status`.

use crate::error::{Error, Result};
use crate::scanline::Scanline;

/// One slot's worth of fetch data: the scanline plus the duplicate flag it
/// was produced with. In C, `duplicate` decided whether the pool made a
/// defensive copy or merely recorded a pointer; in Rust every `Scanline` is
/// already an owned `Vec<u8>`; moving it into the pool is always safe
/// regardless of `duplicate`. The flag is kept anyway so callers (and tests)
/// can observe which discipline produced a given entry.
#[derive(Debug, Clone)]
pub struct FetchData {
    scanline: Scanline,
    duplicate: bool,
}

impl FetchData {
    pub fn new(scanline: Scanline, duplicate: bool) -> FetchData {
        FetchData {
            scanline,
            duplicate,
        }
    }

    pub fn scanline(&self) -> &Scanline {
        &self.scanline
    }

    pub fn into_scanline(self) -> Scanline {
        self.scanline
    }

    pub fn is_duplicate(&self) -> bool {
        self.duplicate
    }
}

/// Snapshot of the pool's cursors, returned by [`FetchPool::status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchStatus {
    pub remaining_writable: usize,
    pub remaining_readable: usize,
    pub page_complete: bool,
}

/// A vector of up to `dst_height` [`FetchData`] slots with a monotonic write
/// cursor and a read cursor that never runs ahead of it.
#[derive(Debug)]
pub struct FetchPool {
    slots: Vec<Option<FetchData>>,
    capacity: usize,
    write_cursor: usize,
    read_cursor: usize,
}

impl FetchPool {
    pub fn new(capacity: usize) -> FetchPool {
        FetchPool {
            slots: (0..capacity).map(|_| None).collect(),
            capacity,
            write_cursor: 0,
            read_cursor: 0,
        }
    }

    pub fn add(&mut self, data: FetchData) -> Result<()> {
        if self.write_cursor >= self.capacity {
            return Err(Error::FetchPoolFull(self.capacity));
        }
        self.slots[self.write_cursor] = Some(data);
        self.write_cursor += 1;
        Ok(())
    }

    /// Returns the slot at the read cursor and advances it, or `None` if
    /// nothing new has been written yet.
    pub fn fetch(&mut self) -> Option<FetchData> {
        if self.read_cursor >= self.write_cursor {
            return None;
        }
        let data = self.slots[self.read_cursor].take();
        self.read_cursor += 1;
        data
    }

    pub fn status(&self) -> FetchStatus {
        FetchStatus {
            remaining_writable: self.capacity - self.write_cursor,
            remaining_readable: self.write_cursor - self.read_cursor,
            page_complete: self.write_cursor == self.capacity,
        }
    }
}
