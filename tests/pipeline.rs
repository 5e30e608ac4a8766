// Copyright (c) the raster_pipeline Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! End-to-end coverage of the public `Driver`/`Pipeline`/`Sink` surface
//! against the concrete byte-level scenarios a page can hit: identity,
//! mirror, reverse, a downscale combined with mirror, and a flush-only page.

use raster_pipeline::driver::Driver;
use raster_pipeline::page::{BytesPerPixel, PageDescriptor, ProcessMode, WatermarkDescriptor};
use raster_pipeline::pipeline::Pipeline;
use raster_pipeline::sink::{EncoderSink, RasterEncoder};
use raster_pipeline::watermark::MemoryWatermark;
use raster_pipeline::Error;

struct RecordingEncoder {
    rows: Vec<Vec<u8>>,
}

impl RasterEncoder for RecordingEncoder {
    fn scanline_out(&mut self, bytes: &[u8], _byte_count: usize, _pixel_count: usize) -> bool {
        self.rows.push(bytes.to_vec());
        true
    }
}

fn recording_driver(page: PageDescriptor) -> Driver<EncoderSink<RecordingEncoder>> {
    let pipeline = Pipeline::build(page, ProcessMode::Printing, None).unwrap();
    let sink = EncoderSink::for_page(RecordingEncoder { rows: Vec::new() }, &pipeline.page).unwrap();
    Driver::new(pipeline, sink)
}

// S1: identity page, no stages at all.
#[test]
fn identity_page_is_a_straight_pass_through() {
    let page = PageDescriptor::new(BytesPerPixel::Rgb, 2, 2, 2, 2, false, false, None);
    let mut driver = recording_driver(page);
    driver.feed(b"\x01\x02\x03\x04\x05\x06").unwrap();
    driver.feed(b"\x07\x08\x09\x0A\x0B\x0C").unwrap();
    driver.finish().unwrap();

    let rows = driver.into_sink().into_encoder().rows;
    assert_eq!(rows, vec![
        b"\x01\x02\x03\x04\x05\x06".to_vec(),
        b"\x07\x08\x09\x0A\x0B\x0C".to_vec(),
    ]);
}

// S3: mirror-only page reverses each row's pixel order but not row order.
#[test]
fn mirror_only_page_reverses_rows_not_order() {
    let page = PageDescriptor::new(BytesPerPixel::Grayscale, 4, 2, 4, 2, true, false, None);
    let mut driver = recording_driver(page);
    driver.feed(b"ABCD").unwrap();
    driver.feed(b"EFGH").unwrap();
    driver.finish().unwrap();

    let rows = driver.into_sink().into_encoder().rows;
    assert_eq!(rows, vec![b"DCBA".to_vec(), b"HGFE".to_vec()]);
}

// S4: reverse-only page buffers the whole page and emits bottom-to-top.
#[test]
fn reverse_only_page_emits_bottom_to_top_on_finish() {
    let page = PageDescriptor::new(BytesPerPixel::Grayscale, 1, 3, 1, 3, false, true, None);
    let mut driver = recording_driver(page);
    driver.feed(b"A").unwrap();
    driver.feed(b"B").unwrap();
    driver.feed(b"C").unwrap();
    // reverse buffers everything; nothing has been emitted yet.
    assert!(driver.finish().unwrap() == 3);

    let rows = driver.into_sink().into_encoder().rows;
    assert_eq!(rows, vec![b"C".to_vec(), b"B".to_vec(), b"A".to_vec()]);
}

// S5: downscale (src = 2*dst on both axes) combined with mirror.
#[test]
fn downscale_then_mirror_combine_in_order() {
    let page = PageDescriptor::new(BytesPerPixel::Grayscale, 4, 2, 2, 1, true, false, None);
    let mut driver = recording_driver(page);
    // rho = min(0.5, 0.5) = 0.5: every other input row survives scaling.
    driver.feed(b"AAAA").unwrap();
    driver.feed(b"BCDE").unwrap();
    driver.finish().unwrap();

    let rows = driver.into_sink().into_encoder().rows;
    // "BCDE" scaled keeps pixels 1 and 3 ('C','E') -> "CE", then mirrored -> "EC".
    assert_eq!(rows, vec![b"EC".to_vec()]);
}

// S6: a page that is flushed with no data rows at all still terminates.
#[test]
fn flush_only_page_emits_nothing_but_succeeds() {
    let page = PageDescriptor::new(BytesPerPixel::Grayscale, 2, 2, 2, 2, false, false, None);
    let mut driver = recording_driver(page);
    let n = driver.finish().unwrap();
    assert_eq!(n, 0);
    assert!(driver.into_sink().into_encoder().rows.is_empty());
}

// A watermark confined to a single interior row composites only that row.
#[test]
fn watermark_blends_only_its_footprint() {
    let watermark = WatermarkDescriptor::new("mark.png", 4, 0, 0.25, 0);
    let page = PageDescriptor::new(BytesPerPixel::Grayscale, 4, 4, 4, 4, false, false, Some(watermark));
    let pipeline = Pipeline::build(page, ProcessMode::Printing, Some(Box::new(MemoryWatermark::solid(1, 1))))
        .unwrap();
    let sink = EncoderSink::for_page(RecordingEncoder { rows: Vec::new() }, &pipeline.page).unwrap();
    let mut driver = Driver::new(pipeline, sink);
    for _ in 0..4 {
        driver.feed(&[0x80, 0x80, 0x80, 0x80]).unwrap();
    }
    driver.finish().unwrap();

    let rows = driver.into_sink().into_encoder().rows;
    // rows 0, 2, 3 are untouched; row 1 (the watermark's footprint at a
    // 0.25 size ratio, centered) has its single covered pixel blended.
    assert_eq!(rows[0], vec![0x80; 4]);
    assert_eq!(rows[2], vec![0x80; 4]);
    assert_ne!(rows[1], vec![0x80; 4]);
}

// A fetch pool at capacity rejects further writes with a typed error.
#[test]
fn fetch_pool_overrun_surfaces_as_error() {
    use raster_pipeline::fetch_pool::{FetchData, FetchPool};

    let mut pool = FetchPool::new(1);
    pool.add(FetchData::new(raster_pipeline::Scanline::new(vec![1], 1), true)).unwrap();
    let err = pool
        .add(FetchData::new(raster_pipeline::Scanline::new(vec![2], 1), true))
        .unwrap_err();
    assert!(matches!(err, Error::FetchPoolFull(1)));
}

// Cancelling a page mid-feed aborts the next `feed` call cleanly without
// touching output already handed to the sink.
#[test]
fn cancelling_a_page_aborts_the_next_feed() {
    let page = PageDescriptor::new(BytesPerPixel::Grayscale, 2, 2, 2, 2, false, false, None);
    let mut driver = recording_driver(page);
    driver.feed(b"AA").unwrap();
    driver.cancel();
    let err = driver.feed(b"BB").unwrap_err();
    assert!(matches!(err, Error::Cancelled));
    assert_eq!(driver.into_sink().into_encoder().rows, vec![b"AA".to_vec()]);
}

// A vendor encoder reporting failure surfaces as a typed, fatal page error.
#[test]
fn encoder_failure_surfaces_as_fatal_error() {
    struct FailingEncoder;
    impl RasterEncoder for FailingEncoder {
        fn scanline_out(&mut self, _bytes: &[u8], _byte_count: usize, _pixel_count: usize) -> bool {
            false
        }
    }

    let page = PageDescriptor::new(BytesPerPixel::Grayscale, 2, 1, 2, 1, false, false, None);
    let pipeline = Pipeline::build(page, ProcessMode::Printing, None).unwrap();
    let sink = EncoderSink::for_page(FailingEncoder, &pipeline.page).unwrap();
    let mut driver = Driver::new(pipeline, sink);

    let err = driver.feed(b"AA").unwrap_err();
    assert!(matches!(err, Error::Encoder));
}
