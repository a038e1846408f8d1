//! Core trait for lock filters
//!
//! Every filter answers one question about one sample: can this fix be
//! trusted? Composite filters ([`WorstOfFilter`](crate::WorstOfFilter),
//! [`ReportingFilter`](crate::ReportingFilter)) implement the same trait, so
//! a pipeline is a tree of filters behind a single `evaluate` call.

use crate::sample::GpsSample;

/// Accept/reject decision for a single GPS sample
///
/// `evaluate` takes `&mut self` because some filters (the heuristic
/// tracker) learn from every sample they see. Such filters must receive the
/// stream in arrival order, exactly once.
///
/// Filters never modify the sample; the
/// [`TrackAssembler`](crate::TrackAssembler) applies the verdict.
pub trait LockFilter {
    /// `true` to accept the fix, `false` to downgrade it to not locked
    fn evaluate(&mut self, sample: &GpsSample) -> bool;

    /// Short name for diagnostics
    fn name(&self) -> &'static str;
}

impl<F: LockFilter + ?Sized> LockFilter for Box<F> {
    fn evaluate(&mut self, sample: &GpsSample) -> bool {
        (**self).evaluate(sample)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<F: LockFilter + ?Sized> LockFilter for &mut F {
    fn evaluate(&mut self, sample: &GpsSample) -> bool {
        (**self).evaluate(sample)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Boxed filter as stored by composite filters
pub type BoxedFilter = Box<dyn LockFilter + Send>;
