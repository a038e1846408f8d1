//! Filter that accepts everything
//!
//! Stands in for the bounding-box filter when no box is configured, so the
//! pipeline shape (and the tally's reason list) stays the same either way.

use crate::{sample::GpsSample, traits::LockFilter};

/// Always accepts
#[derive(Debug, Clone, Copy, Default)]
pub struct NullFilter;

impl LockFilter for NullFilter {
    fn evaluate(&mut self, _sample: &GpsSample) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "NullFilter"
    }
}
