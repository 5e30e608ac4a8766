// Copyright (c) the raster_pipeline Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Nearest-neighbour integer-replication scaling, grounded on `scale.c`'s
//! `scale_rasterout_nearest` / `MethodNearest`.

use crate::error::Result;
use crate::page::PageDescriptor;
use crate::pipeline::stage::Stage;
use crate::scanline::Scanline;

/// A single replication ratio applied uniformly to both axes
/// (`min(x_scale, y_scale)`), which letterboxes non-uniform src/dst aspect
/// ratios rather than stretching them. This matches `scale.c` exactly; whether
/// that is intentional for every page size is unclear from the available
/// material, so it is kept as-is rather than changed to per-axis scaling.
#[derive(Debug)]
pub struct ScaleStage {
    bytes_per_pixel: usize,
    dst_width: usize,
    rho: f64,
    floor_rho: f64,
    /// Vertical DDA accumulator ("print_one_more" in `scale.c`), carried
    /// across scanlines of the page.
    line_carry: f64,
    /// Reused output buffer, preallocated at init and refilled each call.
    scratch: Vec<u8>,
}

impl ScaleStage {
    /// `page.dst_width` is caller-controlled (a page's declared printer
    /// width), so the scratch row is reserved rather than assumed to
    /// allocate successfully.
    pub fn try_new(page: &PageDescriptor) -> Result<ScaleStage> {
        let x_scale = page.dst_width as f64 / page.src_width as f64;
        let y_scale = page.dst_height as f64 / page.src_height as f64;
        let rho = x_scale.min(y_scale);
        let bytes_per_pixel = page.bytes_per_pixel.get();
        let row_bytes = page.bytes_per_pixel.row_bytes(page.dst_width)?;
        let mut scratch = Vec::new();
        scratch.try_reserve_exact(row_bytes)?;
        scratch.resize(row_bytes, 0xFF);
        Ok(ScaleStage {
            bytes_per_pixel,
            dst_width: page.dst_width,
            rho,
            floor_rho: rho.floor(),
            line_carry: 0.0,
            scratch,
        })
    }
}

impl Stage for ScaleStage {
    fn name(&self) -> &'static str {
        "scale"
    }

    fn process(&mut self, input: Option<Scanline>, out: &mut Vec<Option<Scanline>>) -> Result<()> {
        let Some(line) = input else {
            // Nearest has no buffered state to flush; just forward the signal.
            out.push(None);
            return Ok(());
        };

        let mut printable_lines = self.floor_rho as i64;
        self.line_carry += self.rho - self.floor_rho;
        if self.line_carry >= 1.0 {
            printable_lines += 1;
            self.line_carry -= 1.0;
        }
        if printable_lines <= 0 {
            return Ok(());
        }

        self.scratch.fill(0xFF);
        let bpp = self.bytes_per_pixel;
        let src = line.bytes();
        let mut pixel_carry = 0.0f64;
        let mut dst_pixel = 0usize;
        'pixels: for i in 0..line.pixel_count() {
            let mut copies = self.floor_rho as i64;
            pixel_carry += self.rho - self.floor_rho;
            if pixel_carry >= 1.0 {
                copies += 1;
                pixel_carry -= 1.0;
            }
            let s = i * bpp;
            if s + bpp > src.len() {
                break;
            }
            for _ in 0..copies {
                if dst_pixel >= self.dst_width {
                    break 'pixels;
                }
                let d = dst_pixel * bpp;
                self.scratch[d..d + bpp].copy_from_slice(&src[s..s + bpp]);
                dst_pixel += 1;
            }
        }

        let scaled = Scanline::new(self.scratch.clone(), self.dst_width);
        for _ in 0..printable_lines {
            out.push(Some(scaled.clone()));
        }
        Ok(())
    }
}
