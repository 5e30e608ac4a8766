// Copyright (c) the raster_pipeline Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Watermark compositing, grounded on `raster-helper.c`'s
//! `pipeline_append_watermark` (bounds/colour/alpha setup) and the blend
//! contract it hands off to `eps_init_blend`/`eps_process_blend`. The
//! row-by-row straight-alpha compositing itself is reconstructed from that
//! bounds/colour/alpha setup rather than ported line-for-line.

use crate::page::{BytesPerPixel, PageDescriptor, WatermarkDescriptor, WatermarkPosition};
use crate::pipeline::stage::Stage;
use crate::scanline::Scanline;
use crate::{error::Result, watermark::WatermarkSource};

/// The target rectangle in printer-coordinate space, i.e. a sub-rectangle of
/// the frame `(0, 0, dst_w, dst_h)`.
#[derive(Debug, Clone, Copy)]
struct Bounds {
    x: usize,
    y: usize,
    width: usize,
    height: usize,
}

fn compute_bounds(frame_w: usize, frame_h: usize, ratio: f64, position: WatermarkPosition) -> Bounds {
    let width = ((frame_w as f64) * ratio).round() as usize;
    let height = ((frame_h as f64) * ratio).round() as usize;
    let width = width.min(frame_w);
    let height = height.min(frame_h);
    let free_x = frame_w - width;
    let free_y = frame_h - height;
    use WatermarkPosition::*;
    let (x, y) = match position {
        Center => (free_x / 2, free_y / 2),
        TopLeft => (0, 0),
        Top => (free_x / 2, 0),
        TopRight => (free_x, 0),
        Left => (0, free_y / 2),
        Right => (free_x, free_y / 2),
        BottomLeft => (0, free_y),
        Bottom => (free_x / 2, free_y),
        BottomRight => (free_x, free_y),
    };
    Bounds {
        x,
        y,
        width,
        height,
    }
}

#[derive(Debug)]
pub struct BlendStage {
    bounds: Bounds,
    color: (u8, u8, u8),
    grayscale: bool,
    alpha: f64,
    bytes_per_pixel: usize,
    source: Box<dyn WatermarkSource>,
    row: usize,
}

impl BlendStage {
    pub fn new(
        page: &PageDescriptor,
        watermark: &WatermarkDescriptor,
        source: Box<dyn WatermarkSource>,
    ) -> BlendStage {
        let grayscale = matches!(page.bytes_per_pixel, BytesPerPixel::Grayscale);
        let color = if grayscale {
            (0, 0, 0)
        } else {
            watermark.color()
        };
        BlendStage {
            bounds: compute_bounds(
                page.dst_width,
                page.dst_height,
                watermark.size_ratio(),
                watermark.position,
            ),
            color,
            grayscale,
            alpha: watermark.alpha(),
            bytes_per_pixel: page.bytes_per_pixel.get(),
            source,
            row: 0,
        }
    }

    fn composite_row(&self, bytes: &mut [u8], coverage: &[u8]) {
        let bpp = self.bytes_per_pixel;
        let channels: [u8; 3] = [self.color.0, self.color.1, self.color.2];
        for col in 0..self.bounds.width {
            let Some(mark) = coverage.get(col) else {
                break;
            };
            if *mark == 0 {
                continue;
            }
            let a = self.alpha * (*mark as f64 / 255.0);
            let px = (self.bounds.x + col) * bpp;
            if px + bpp > bytes.len() {
                break;
            }
            let used_channels = if self.grayscale { 1 } else { 3 };
            for c in 0..used_channels {
                let src = bytes[px + c] as f64;
                let mark_value = channels[c] as f64;
                bytes[px + c] = (src * (1.0 - a) + mark_value * a).round().clamp(0.0, 255.0) as u8;
            }
        }
    }
}

impl Stage for BlendStage {
    fn name(&self) -> &'static str {
        "blend"
    }

    fn process(&mut self, input: Option<Scanline>, out: &mut Vec<Option<Scanline>>) -> Result<()> {
        let Some(line) = input else {
            out.push(None);
            return Ok(());
        };

        let y = self.row;
        self.row += 1;
        if y < self.bounds.y || y >= self.bounds.y + self.bounds.height {
            out.push(Some(line));
            return Ok(());
        }

        let source_row = y - self.bounds.y;
        if source_row >= self.source.height() {
            out.push(Some(line));
            return Ok(());
        }

        let mut bytes = line.bytes().to_vec();
        let coverage = self.source.row(source_row);
        self.composite_row(&mut bytes, coverage);
        out.push(Some(Scanline::new(bytes, line.pixel_count())));
        Ok(())
    }
}
