// Copyright (c) the raster_pipeline Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! The watermark image decoder is an external collaborator: the core never
//! reads `watermark.filepath` itself. It only consumes whatever the embedding
//! layer decoded and pre-scaled to the blend stage's bounding rectangle.

/// Supplies the blend stage with a watermark raster already scaled to the
/// target rectangle's size. Each row is a one-byte-per-pixel coverage mask:
/// `0` means "no ink here", `255` means "full strength", anything between
/// blends proportionally — a direct generalisation of the all-or-nothing
/// RGB flags `raster-helper.c`'s `EpsColor` used for its fixed seven-colour
/// table (see DESIGN.md).
pub trait WatermarkSource {
    /// Width, in pixels, of every row this source returns.
    fn width(&self) -> usize;

    /// Height, in pixels/rows, of the source.
    fn height(&self) -> usize;

    /// Coverage bytes for row `y` (`0 <= y < height()`), `width()` entries
    /// long.
    fn row(&self, y: usize) -> &[u8];
}

/// An in-memory watermark raster, useful for tests and for embedders that
/// decode the watermark file up front.
#[derive(Debug, Clone)]
pub struct MemoryWatermark {
    width: usize,
    rows: Vec<Vec<u8>>,
}

impl MemoryWatermark {
    pub fn new(width: usize, rows: Vec<Vec<u8>>) -> MemoryWatermark {
        MemoryWatermark { width, rows }
    }

    /// A fully opaque rectangle, useful for tests that only care about
    /// where the mark lands, not its internal texture.
    pub fn solid(width: usize, height: usize) -> MemoryWatermark {
        MemoryWatermark {
            width,
            rows: vec![vec![0xFF; width]; height],
        }
    }
}

impl WatermarkSource for MemoryWatermark {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.rows.len()
    }

    fn row(&self, y: usize) -> &[u8] {
        &self.rows[y]
    }
}
