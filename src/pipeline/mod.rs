// Copyright (c) the raster_pipeline Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! The assembler, grounded on `raster-helper.c`'s
//! `raster_helper_create_pipeline`: appends stages in the fixed canonical
//! order scale → blend → mirror → reverse, each one optional, and clears
//! `duplicate` the moment reverse is appended since reverse already owns
//! every row it buffers.

pub mod stage;
pub mod stages;

use crate::error::Result;
use crate::page::{PageDescriptor, ProcessMode};
use crate::scanline::Scanline;
use crate::watermark::WatermarkSource;
use stage::Stage;
use stages::{BlendStage, MirrorStage, ReverseStage, ScaleStage};

/// The assembled, fixed-order stage chain for one page.
pub struct Pipeline {
    pub(crate) stages: Vec<Box<dyn Stage>>,
    pub page: PageDescriptor,
    pub process_mode: ProcessMode,
    /// Whether rows handed to the sink should be defensively copied before
    /// being retained past the call. Cleared once a reverse stage is present,
    /// since its internal buffer already owns every row.
    pub duplicate: bool,
}

impl Pipeline {
    /// Assembles the stage chain for `page`. `watermark_source` is consumed
    /// only if `page.watermark` is `Some`; if the caller configured a
    /// watermark but supplied no source, the blend stage is skipped rather
    /// than failing the whole page — there is nothing for it to composite.
    pub fn build(
        page: PageDescriptor,
        process_mode: ProcessMode,
        watermark_source: Option<Box<dyn WatermarkSource>>,
    ) -> Result<Pipeline> {
        let mut stages: Vec<Box<dyn Stage>> = Vec::new();
        let mut duplicate = true;

        if page.scale {
            tracing::debug!("appending scale stage");
            stages.push(Box::new(ScaleStage::try_new(&page)?));
        }

        if let Some(watermark) = &page.watermark {
            match watermark_source {
                Some(source) => {
                    tracing::debug!(position = ?watermark.position, "appending blend stage");
                    stages.push(Box::new(BlendStage::new(&page, watermark, source)));
                }
                None => {
                    tracing::warn!(
                        "page requested a watermark but no watermark source was supplied; skipping blend"
                    );
                }
            }
        }

        if page.mirror {
            tracing::debug!("appending mirror stage");
            stages.push(Box::new(MirrorStage::new(page.bytes_per_pixel.get())));
        }

        if page.reverse {
            let top_margin = page.src_height.saturating_sub(page.dst_height);
            let num_raster = page.dst_height;
            let bytes_per_raster = page.bytes_per_pixel.row_bytes(page.dst_width)?;
            tracing::debug!(top_margin, num_raster, "appending reverse stage");
            stages.push(Box::new(ReverseStage::try_new(
                top_margin,
                num_raster,
                bytes_per_raster,
                page.dst_width,
            )?));
            duplicate = false;
        }

        Ok(Pipeline {
            stages,
            page,
            process_mode,
            duplicate,
        })
    }

    /// Runs `input` through every stage in order, returning whatever the
    /// final stage emitted. `input` of `None` means "flush this page".
    pub(crate) fn run(&mut self, input: Option<Scanline>) -> Result<Vec<Option<Scanline>>> {
        let mut current = vec![input];
        for stage in &mut self.stages {
            let mut next = Vec::with_capacity(current.len());
            for item in current {
                stage.process(item, &mut next)?;
            }
            current = next;
        }
        Ok(current)
    }
}
