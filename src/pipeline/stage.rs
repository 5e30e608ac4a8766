// Copyright (c) the raster_pipeline Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! The per-stage contract: one trait per stage, driven by something that owns
//! the chain rather than a stage holding a pointer to its own successor.
//!
//! Unlike the C source (`EpsRasterPipe` holds a function pointer plus an
//! opaque handle to the *next* pipe, so each stage calls its own successor)
//! the [`crate::pipeline::Pipeline`]'s driver owns the `Vec<Box<dyn Stage>>`
//! and walks it by index, feeding each stage's output into the next stage's
//! input itself. This removes the back-reference every C pipe carries and the
//! `self` field it needs to thread through a plain function pointer.

use crate::error::Result;
use crate::scanline::Scanline;

/// One element of the fixed canonical chain (scale → blend → mirror →
/// reverse). `None` on input means "flush": the caller has reached the end
/// of the page.
///
/// A stage may push any number of `Some(line)` scanlines to `out` — zero
/// (scale under a downscale ratio, reverse while still buffering), one
/// (the common case), or many (scale under an upscale ratio) — and MUST push
/// exactly one `None` in response to a `None` input, once its own buffered
/// state (if any) has been flushed ahead of it. This lets the driver treat
/// flush identically to data: both are "things that travel down the chain".
pub trait Stage {
    /// Name used in tracing output; never seen by the embedding application.
    fn name(&self) -> &'static str;

    fn process(&mut self, input: Option<Scanline>, out: &mut Vec<Option<Scanline>>) -> Result<()>;
}
