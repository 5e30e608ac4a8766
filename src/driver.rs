// Copyright (c) the raster_pipeline Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Ties a [`Pipeline`] to a [`Sink`] and exposes the two calls an embedder
//! makes per page: `feed` for each input scanline, `finish` to flush.
//! Grounded on `raster.c`'s `eps_raster_print`/`eps_raster_fetch`: pad short
//! input rows to the page's declared `src_width` with `0xFF`, truncate long
//! ones to that same length, and stop accepting rows once the declared
//! source height has already been fed.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{Error, Result};
use crate::fetch_pool::FetchData;
use crate::pipeline::Pipeline;
use crate::sink::{FetchSink, Sink};

pub struct Driver<S> {
    pipeline: Pipeline,
    sink: S,
    rows_fed: usize,
    /// Set by [`Driver::cancel`], checked between input scanlines per spec
    /// §5 ("Cancellation is checked by the caller between scanlines"). An
    /// `AtomicBool` rather than a plain `bool` so the embedding application
    /// can request cancellation from outside the `feed` call stack (e.g. a
    /// signal handler) without needing `&mut Driver`.
    cancelled: AtomicBool,
}

impl<S: Sink> Driver<S> {
    pub fn new(pipeline: Pipeline, sink: S) -> Driver<S> {
        Driver {
            pipeline,
            sink,
            rows_fed: 0,
            cancelled: AtomicBool::new(false),
        }
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Requests a clean abort of the current page. Takes effect on the next
    /// `feed` call, which returns `Err(Error::Cancelled)` instead of
    /// processing the row; already-emitted output is left exactly as it was
    /// (spec §4.8/§5: cancellation aborts cleanly between scanlines, not
    /// mid-scanline).
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Feeds one input scanline and drains whatever the chain emits in
    /// response into the sink. Returns the number of rows handed to the
    /// sink. Rows fed after the page's declared source height has already
    /// been reached are accepted but ignored — a safety net against
    /// overrunning a well-formed chain, not a literal port of
    /// `eps_raster_print`'s `input_raster_index` guard (see SPEC_FULL.md).
    pub fn feed(&mut self, bytes: &[u8]) -> Result<usize> {
        if self.cancelled.load(Ordering::Relaxed) {
            return Err(Error::Cancelled);
        }

        if self.rows_fed >= self.pipeline.page.src_height {
            tracing::warn!(rows_fed = self.rows_fed, "ignoring scanline past declared source height");
            return Ok(0);
        }
        self.rows_fed += 1;

        let want = self.pipeline.page.bytes_per_pixel.row_bytes(self.pipeline.page.src_width)?;
        let padded = if bytes.len() >= want {
            bytes[..want].to_vec()
        } else {
            let mut buf = vec![0xFFu8; want];
            buf[..bytes.len()].copy_from_slice(bytes);
            buf
        };

        let line = crate::scanline::Scanline::new(padded, self.pipeline.page.src_width);
        self.drain(self.pipeline.run(Some(line))?)
    }

    /// Signals end of page. Must be called exactly once per page, after all
    /// input rows have been fed, to drain any stage's buffered state (scale's
    /// none, reverse's whole-page buffer). Always runs even if the page was
    /// cancelled, so buffered stage state is flushed and the chain torn down
    /// cleanly rather than left half-drained.
    pub fn finish(&mut self) -> Result<usize> {
        let emitted = self.pipeline.run(None)?;
        self.drain(emitted)
    }

    fn drain(&mut self, emitted: Vec<Option<crate::scanline::Scanline>>) -> Result<usize> {
        let mut n = 0;
        for item in emitted {
            if let Some(row) = item {
                self.sink.emit(row)?;
                n += 1;
            }
        }
        Ok(n)
    }
}

impl Driver<FetchSink> {
    /// FETCHING-mode-only: pulls the next ready row out of the fetch pool,
    /// or `None` if nothing new has been written yet (`eps_raster_fetch`
    /// called with a non-null `fetch_p`).
    pub fn fetch(&mut self) -> Option<FetchData> {
        self.sink.pool_mut().fetch()
    }

    /// Mirrors `eps_raster_fetch` called with a null `fetch_p`: just reports
    /// the pool's cursors without consuming anything.
    pub fn fetch_status(&self) -> crate::fetch_pool::FetchStatus {
        self.sink.pool().status()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::page::{BytesPerPixel, PageDescriptor, ProcessMode};
    use crate::sink::{EncoderSink, RasterEncoder};

    struct RecordingEncoder {
        rows: Vec<Vec<u8>>,
    }

    impl RasterEncoder for RecordingEncoder {
        fn scanline_out(&mut self, bytes: &[u8], _byte_count: usize, _pixel_count: usize) -> bool {
            self.rows.push(bytes.to_vec());
            true
        }
    }

    fn identity_page(w: usize, h: usize) -> PageDescriptor {
        PageDescriptor::new(BytesPerPixel::Grayscale, w, h, w, h, false, false, None)
    }

    // S1: identity page round-trips every row unchanged, in order.
    #[test]
    fn identity_page_round_trips_rows() {
        let pipeline = Pipeline::build(identity_page(4, 2), ProcessMode::Printing, None).unwrap();
        let sink = EncoderSink::for_page(RecordingEncoder { rows: Vec::new() }, &pipeline.page).unwrap();
        let mut driver = Driver::new(pipeline, sink);

        driver.feed(b"ABCD").unwrap();
        driver.feed(b"EFGH").unwrap();
        driver.finish().unwrap();

        assert_eq!(
            driver.into_sink().into_encoder().rows,
            vec![b"ABCD".to_vec(), b"EFGH".to_vec()]
        );
    }

    #[test]
    fn short_row_is_padded_with_0xff() {
        let pipeline = Pipeline::build(identity_page(4, 1), ProcessMode::Printing, None).unwrap();
        let sink = EncoderSink::for_page(RecordingEncoder { rows: Vec::new() }, &pipeline.page).unwrap();
        let mut driver = Driver::new(pipeline, sink);

        driver.feed(b"AB").unwrap();
        driver.finish().unwrap();

        assert_eq!(driver.into_sink().into_encoder().rows, vec![b"AB\xFF\xFF".to_vec()]);
    }

    #[test]
    fn rows_past_declared_height_are_ignored() {
        let pipeline = Pipeline::build(identity_page(2, 1), ProcessMode::Printing, None).unwrap();
        let sink = EncoderSink::for_page(RecordingEncoder { rows: Vec::new() }, &pipeline.page).unwrap();
        let mut driver = Driver::new(pipeline, sink);

        driver.feed(b"AA").unwrap();
        let n = driver.feed(b"BB").unwrap();
        assert_eq!(n, 0);
        driver.finish().unwrap();

        assert_eq!(driver.into_sink().into_encoder().rows, vec![b"AA".to_vec()]);
    }

    #[test]
    fn fetching_mode_exposes_pool() {
        let pipeline = Pipeline::build(identity_page(2, 2), ProcessMode::Fetching, None).unwrap();
        let sink = FetchSink::for_pipeline(&pipeline);
        let mut driver = Driver::new(pipeline, sink);

        driver.feed(b"AA").unwrap();
        driver.feed(b"BB").unwrap();
        driver.finish().unwrap();

        let first = driver.fetch().unwrap();
        assert_eq!(first.scanline().bytes(), b"AA");
        let second = driver.fetch().unwrap();
        assert_eq!(second.scanline().bytes(), b"BB");
        assert!(driver.fetch_status().page_complete);
    }

    #[test]
    fn cancel_aborts_the_next_feed_cleanly() {
        let pipeline = Pipeline::build(identity_page(2, 2), ProcessMode::Printing, None).unwrap();
        let sink = EncoderSink::for_page(RecordingEncoder { rows: Vec::new() }, &pipeline.page).unwrap();
        let mut driver = Driver::new(pipeline, sink);

        driver.feed(b"AA").unwrap();
        driver.cancel();
        let err = driver.feed(b"BB").unwrap_err();
        assert!(matches!(err, Error::Cancelled));
        // already-emitted output is untouched by the cancellation.
        assert_eq!(driver.into_sink().into_encoder().rows, vec![b"AA".to_vec()]);
    }
}
