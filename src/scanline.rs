// Copyright (c) the raster_pipeline Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! One row of raster data flowing through the pipeline: a tuple of bytes,
//! byte count, and pixel count, whose bytes may be borrowed, stage-owned, or
//! nil (flush). The nil case is modeled by wrapping `Scanline` in `Option` at
//! every stage boundary rather than folding it into this type; a `Scanline`
//! itself is always a concrete row. Buffers always own their bytes here — the
//! C source's "borrowed vs. owned" distinction exists only because a raw
//! pointer's validity window is the caller's problem in C, which does not
//! apply once every row is a `Vec<u8>` moved (not copied) down the chain.

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scanline {
    bytes: Vec<u8>,
    pixel_count: usize,
}

impl Scanline {
    pub fn new(bytes: Vec<u8>, pixel_count: usize) -> Scanline {
        Scanline { bytes, pixel_count }
    }

    /// A scanline of `byte_count` bytes of padding (0xFF), used for rows that
    /// were never written but still need to be treated as blank output (e.g.
    /// a `reverse` buffer slot never filled because scale under-produced rows
    /// for the page). Fallible: `byte_count` is caller-controlled (a page's
    /// declared dst dimensions), so this reserves rather than asserting the
    /// allocation succeeds.
    pub fn try_blank(byte_count: usize, pixel_count: usize) -> Result<Scanline> {
        let mut bytes = Vec::new();
        bytes.try_reserve_exact(byte_count)?;
        bytes.resize(byte_count, 0xFF);
        Ok(Scanline { bytes, pixel_count })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn byte_count(&self) -> usize {
        self.bytes.len()
    }

    pub fn pixel_count(&self) -> usize {
        self.pixel_count
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
