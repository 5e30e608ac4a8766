// Copyright (c) the raster_pipeline Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Horizontal per-scanline mirroring, grounded on `raster-helper.c`'s mirror
//! pipe: reverses pixel order within a row, leaving row order and row count
//! untouched.

use crate::error::Result;
use crate::pipeline::stage::Stage;
use crate::scanline::Scanline;

#[derive(Debug)]
pub struct MirrorStage {
    bytes_per_pixel: usize,
}

impl MirrorStage {
    pub fn new(bytes_per_pixel: usize) -> MirrorStage {
        MirrorStage { bytes_per_pixel }
    }
}

impl Stage for MirrorStage {
    fn name(&self) -> &'static str {
        "mirror"
    }

    fn process(&mut self, input: Option<Scanline>, out: &mut Vec<Option<Scanline>>) -> Result<()> {
        let Some(line) = input else {
            out.push(None);
            return Ok(());
        };

        let bpp = self.bytes_per_pixel;
        let n = line.pixel_count();
        let src = line.bytes();
        let mut mirrored = vec![0u8; src.len()];
        for i in 0..n {
            let s = i * bpp;
            let d = (n - 1 - i) * bpp;
            if s + bpp > src.len() || d + bpp > mirrored.len() {
                break;
            }
            mirrored[d..d + bpp].copy_from_slice(&src[s..s + bpp]);
        }

        out.push(Some(Scanline::new(mirrored, n)));
        Ok(())
    }
}
