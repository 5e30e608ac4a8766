// Copyright (c) the raster_pipeline Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::collections::TryReserveError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Out of memory: {0}")]
    OutOfMemory(#[from] TryReserveError),
    #[error("Arithmetic overflow computing {0}")]
    ArithmeticOverflow(&'static str),
    #[error("Vendor encoder returned a fatal error for this page")]
    Encoder,
    #[error("Caller requested cancellation")]
    Cancelled,
    #[error("Fetch pool is full: write cursor already at capacity {0}")]
    FetchPoolFull(usize),
    #[error("Fetch pool has no data ready to read")]
    FetchPoolEmpty,
    #[error("Pipeline is not running in FETCHING process mode")]
    NotFetching,
}

pub type Result<T> = std::result::Result<T, Error>;
