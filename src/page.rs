// Copyright (c) the raster_pipeline Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! The per-page configuration handed to [`crate::pipeline::Pipeline::build`].
//!
//! Mirrors `EpsPageInfo`/`EpsPageWatermark` in `raster-helper.c`: a flat bag of
//! fields describing one page, clamped at construction time rather than by
//! each stage, so every stage downstream can trust the values it is given.

/// Nine-point placement of the watermark inside the printer-coordinate frame.
///
/// Order matches `EPS_PAGE_WATERMARK_POSITION_*` in the original source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatermarkPosition {
    Center,
    TopLeft,
    Top,
    TopRight,
    Left,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl WatermarkPosition {
    const ALL: [WatermarkPosition; 9] = [
        WatermarkPosition::Center,
        WatermarkPosition::TopLeft,
        WatermarkPosition::Top,
        WatermarkPosition::TopRight,
        WatermarkPosition::Left,
        WatermarkPosition::Right,
        WatermarkPosition::BottomLeft,
        WatermarkPosition::Bottom,
        WatermarkPosition::BottomRight,
    ];

    /// Maps the wire-level `watermark.position ∈ [0,8]` option to a variant,
    /// clamping out-of-range indices to the last entry rather than failing.
    pub fn from_index(index: u32) -> WatermarkPosition {
        let i = (index as usize).min(Self::ALL.len() - 1);
        Self::ALL[i]
    }
}

/// Solid colours a watermark can be painted with, indexed by
/// `watermark.color ∈ [0,6]`. Values mirror the 0/1 RGB flags in
/// `raster-helper.c`'s `watermarkColors` table, scaled to full byte range.
pub const WATERMARK_COLORS: [(u8, u8, u8); 7] = [
    (0, 0, 0),       // black
    (0, 0, 255),     // blue
    (0, 255, 0),     // lime
    (0, 255, 255),   // aqua
    (255, 0, 0),     // red
    (255, 0, 255),   // fuchsia
    (255, 255, 0),   // yellow
];

/// Watermark opacity levels, indexed by `watermark.density ∈ [0,5]`. Values
/// are `raster-helper.c`'s `watermarkDensitys` table verbatim.
pub const WATERMARK_DENSITIES: [f64; 6] = [0.95, 0.9, 0.8, 0.75, 0.3, 0.25];

fn clamp_index(value: u32, len: usize) -> usize {
    (value as usize).min(len - 1)
}

fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Watermark sub-descriptor. Constructed already-clamped: any garbage a
/// caller passes in is neutralised here rather than at blend-stage init time.
#[derive(Debug, Clone)]
pub struct WatermarkDescriptor {
    pub filepath: String,
    color_index: usize,
    density_index: usize,
    size_ratio: f64,
    pub position: WatermarkPosition,
}

impl WatermarkDescriptor {
    pub fn new(
        filepath: impl Into<String>,
        color: u32,
        density: u32,
        size_ratio: f64,
        position_index: u32,
    ) -> WatermarkDescriptor {
        WatermarkDescriptor {
            filepath: filepath.into(),
            color_index: clamp_index(color, WATERMARK_COLORS.len()),
            density_index: clamp_index(density, WATERMARK_DENSITIES.len()),
            size_ratio: clamp_unit(size_ratio),
            position: WatermarkPosition::from_index(position_index),
        }
    }

    pub fn color(&self) -> (u8, u8, u8) {
        WATERMARK_COLORS[self.color_index]
    }

    pub fn alpha(&self) -> f64 {
        1.0 - WATERMARK_DENSITIES[self.density_index]
    }

    pub fn size_ratio(&self) -> f64 {
        self.size_ratio
    }
}

/// Number of bytes used to represent one pixel: 1 for grayscale, 3 for RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BytesPerPixel {
    Grayscale = 1,
    Rgb = 3,
}

impl BytesPerPixel {
    pub fn from_raw(bpp: u32) -> BytesPerPixel {
        if bpp >= 3 {
            BytesPerPixel::Rgb
        } else {
            BytesPerPixel::Grayscale
        }
    }

    pub fn get(self) -> usize {
        self as usize
    }

    /// `width * self`, guarding the multiplication the way `jxl`'s
    /// `Image::new` guards `xsize * ysize`: a page's declared width is
    /// caller-controlled, so this is a checked, not a wrapping, multiply.
    pub fn row_bytes(self, width: usize) -> crate::error::Result<usize> {
        width
            .checked_mul(self.get())
            .ok_or(crate::error::Error::ArithmeticOverflow("row byte count"))
    }
}

/// Immutable per-page configuration. Copied into the `Pipeline` at assembly
/// time and never mutated afterward.
#[derive(Debug, Clone)]
pub struct PageDescriptor {
    pub bytes_per_pixel: BytesPerPixel,
    pub src_width: usize,
    pub src_height: usize,
    pub dst_width: usize,
    pub dst_height: usize,
    pub mirror: bool,
    pub reverse: bool,
    pub scale: bool,
    pub watermark: Option<WatermarkDescriptor>,
}

impl PageDescriptor {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        bytes_per_pixel: BytesPerPixel,
        src_width: usize,
        src_height: usize,
        dst_width: usize,
        dst_height: usize,
        mirror: bool,
        reverse: bool,
        watermark: Option<WatermarkDescriptor>,
    ) -> PageDescriptor {
        let src_width = src_width.max(1);
        let src_height = src_height.max(1);
        let dst_width = dst_width.max(1);
        let dst_height = dst_height.max(1);
        let scale = src_width != dst_width || src_height != dst_height;
        PageDescriptor {
            bytes_per_pixel,
            src_width,
            src_height,
            dst_width,
            dst_height,
            mirror,
            reverse,
            scale,
            watermark,
        }
    }
}

/// Whether a page's output goes straight to the vendor encoder or is held in
/// a [`crate::fetch_pool::FetchPool`] for a separate fetch consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessMode {
    Printing,
    Fetching,
}
