// Copyright (c) the raster_pipeline Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Whole-page reversal, grounded on `raster-helper.c`'s
//! `pipeline_append_reverse`: skip `top_margin` input rows, buffer the next
//! `num_raster` rows, and emit them bottom-to-top on flush.
//!
//! `raster-helper.c` sets `duplecate = 0` the moment a reverse stage is
//! appended, since reverse already owns every row it buffers; the
//! [`crate::pipeline::Pipeline`] assembler mirrors that by clearing its own
//! `duplicate` flag when this stage is present.

use crate::error::Result;
use crate::pipeline::stage::Stage;
use crate::scanline::Scanline;

#[derive(Debug)]
pub struct ReverseStage {
    top_margin: usize,
    num_raster: usize,
    /// Pre-filled with blank rows up front: if scale under-produces rows for
    /// the page, the unfilled slots are emitted as blank output rather than
    /// treated as an error.
    buffer: Vec<Scanline>,
    skipped: usize,
    stored: usize,
    flushed: bool,
}

impl ReverseStage {
    /// Allocates the full-page buffer up front. `num_raster` and
    /// `bytes_per_raster` come from the page's declared dst dimensions, so
    /// this reserves rather than assuming the allocation succeeds.
    pub fn try_new(
        top_margin: usize,
        num_raster: usize,
        bytes_per_raster: usize,
        dst_width: usize,
    ) -> Result<ReverseStage> {
        let mut buffer = Vec::new();
        buffer.try_reserve_exact(num_raster)?;
        for _ in 0..num_raster {
            buffer.push(Scanline::try_blank(bytes_per_raster, dst_width)?);
        }
        Ok(ReverseStage {
            top_margin,
            num_raster,
            buffer,
            skipped: 0,
            stored: 0,
            flushed: false,
        })
    }
}

impl Stage for ReverseStage {
    fn name(&self) -> &'static str {
        "reverse"
    }

    fn process(&mut self, input: Option<Scanline>, out: &mut Vec<Option<Scanline>>) -> Result<()> {
        let Some(line) = input else {
            if !self.flushed {
                self.flushed = true;
                let buffered = std::mem::take(&mut self.buffer);
                for row in buffered.into_iter().rev() {
                    out.push(Some(row));
                }
            }
            out.push(None);
            return Ok(());
        };

        if self.skipped < self.top_margin {
            self.skipped += 1;
            return Ok(());
        }

        if self.stored < self.num_raster {
            self.buffer[self.stored] = line;
            self.stored += 1;
        }
        // Input rows beyond num_raster are silently dropped, matching the
        // C source's fixed-size buffer.
        Ok(())
    }
}
