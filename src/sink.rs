// Copyright (c) the raster_pipeline Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Where a finished scanline goes once it falls off the end of the stage
//! chain. Grounded on `raster.c`'s `output_to_printer` and
//! `output_to_fetchpool`, the two sink functions `eps_raster_print`/
//! `eps_raster_fetch` wire into the shared pipeline.

use crate::error::{Error, Result};
use crate::fetch_pool::{FetchData, FetchPool};
use crate::page::PageDescriptor;
use crate::pipeline::Pipeline;
use crate::scanline::Scanline;

/// The vendor raster-encoding library the printing core hands finished rows
/// to. The core never implements a codec itself — that is an externally-owned
/// concern, same as the watermark decoder in [`crate::watermark`]. Mirrors
/// spec §6's `scanline_out(bytes, byte_count, pixel_count) -> int`: a plain
/// success/failure signal, not this crate's own `Result`. The core — not the
/// collaborator — is responsible for turning a failure into `Error::Encoder`.
pub trait RasterEncoder {
    fn scanline_out(&mut self, bytes: &[u8], byte_count: usize, pixel_count: usize) -> bool;
}

/// Where a driver hands off scanlines once they've passed through every
/// stage of the chain.
pub trait Sink {
    fn emit(&mut self, line: Scanline) -> Result<()>;
}

/// Printing-mode sink: forwards to the vendor encoder, silently dropping
/// anything past `dst_height` rows, mirroring `raster.c`'s `output_to_printer`
/// which stops calling the encoder once the page's declared row count is
/// reached rather than treating overrun as an error.
pub struct EncoderSink<E> {
    encoder: E,
    dst_height: usize,
    /// `dst_width * bytes_per_pixel`. A row shorter than this (which should
    /// not happen given a well-formed chain, but the chain is not the only
    /// thing that can hand a sink a row) is padded with `0xFF` before being
    /// forwarded, mirroring `raster.c`'s `output_to_printer`.
    dst_row_bytes: usize,
    dst_width: usize,
    row_index: usize,
}

impl<E: RasterEncoder> EncoderSink<E> {
    pub(crate) fn new(encoder: E, dst_height: usize, dst_row_bytes: usize, dst_width: usize) -> EncoderSink<E> {
        EncoderSink {
            encoder,
            dst_height,
            dst_row_bytes,
            dst_width,
            row_index: 0,
        }
    }

    /// Derives `dst_height`/`dst_row_bytes`/`dst_width` from `page` itself,
    /// the way `eps_raster_init` derives the sink's parameters from the same
    /// page struct it just built a pipeline from, rather than trusting a
    /// caller to pass matching values by hand.
    pub fn for_page(encoder: E, page: &PageDescriptor) -> Result<EncoderSink<E>> {
        let dst_row_bytes = page.bytes_per_pixel.row_bytes(page.dst_width)?;
        Ok(EncoderSink::new(encoder, page.dst_height, dst_row_bytes, page.dst_width))
    }

    pub fn into_encoder(self) -> E {
        self.encoder
    }
}

impl<E: RasterEncoder> Sink for EncoderSink<E> {
    fn emit(&mut self, line: Scanline) -> Result<()> {
        if self.row_index >= self.dst_height {
            tracing::warn!(row_index = self.row_index, "dropping scanline past page height");
            return Ok(());
        }
        self.row_index += 1;
        // Per spec §4.7, `scanline_out` always reports the fixed declared
        // `(dst_width * bpp, dst_width)`, regardless of whether this row was
        // padded or forwarded as-is.
        let ok = if line.byte_count() < self.dst_row_bytes {
            let mut padded = vec![0xFFu8; self.dst_row_bytes];
            padded[..line.byte_count()].copy_from_slice(line.bytes());
            self.encoder.scanline_out(&padded, self.dst_row_bytes, self.dst_width)
        } else {
            self.encoder
                .scanline_out(line.bytes(), self.dst_row_bytes, self.dst_width)
        };
        if ok {
            Ok(())
        } else {
            tracing::warn!("vendor encoder returned a fatal error");
            Err(Error::Encoder)
        }
    }
}

/// Fetching-mode sink: stores rows in a [`FetchPool`] for a separate fetch
/// consumer instead of handing them to the encoder directly.
pub struct FetchSink {
    pool: FetchPool,
    duplicate: bool,
}

impl FetchSink {
    pub(crate) fn new(capacity: usize, duplicate: bool) -> FetchSink {
        FetchSink {
            pool: FetchPool::new(capacity),
            duplicate,
        }
    }

    /// Derives the pool's capacity (`page.dst_height`) and the `duplicate`
    /// flag from `pipeline` itself, so a reversed page can't accidentally be
    /// wired to a pool that disagrees with `pipeline.duplicate` (testable
    /// property 7).
    pub fn for_pipeline(pipeline: &Pipeline) -> FetchSink {
        FetchSink::new(pipeline.page.dst_height, pipeline.duplicate)
    }

    pub fn pool(&self) -> &FetchPool {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut FetchPool {
        &mut self.pool
    }
}

impl Sink for FetchSink {
    fn emit(&mut self, line: Scanline) -> Result<()> {
        self.pool.add(FetchData::new(line, self.duplicate))
    }
}
