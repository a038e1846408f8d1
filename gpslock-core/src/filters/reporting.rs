//! Reporting decorator
//!
//! Wraps a filter and calls back whenever it rejects. The callback is
//! normally a [`RejectionTally`](crate::RejectionTally) increment, which is
//! how the tally learns *why* fixes were downgraded without the leaf
//! filters knowing anything about reporting.

use crate::{sample::GpsSample, traits::LockFilter};

/// Invokes `on_reject` once per rejection of the wrapped filter
///
/// The verdict is passed through unchanged. Acceptance has no side effect.
pub struct ReportingFilter<L, F> {
    inner: L,
    on_reject: F,
}

impl<L, F> ReportingFilter<L, F>
where
    L: LockFilter,
    F: FnMut(),
{
    /// Decorate `inner` with a rejection callback
    pub fn new(inner: L, on_reject: F) -> Self {
        Self { inner, on_reject }
    }

    /// The wrapped filter
    pub fn inner(&self) -> &L {
        &self.inner
    }
}

impl<L, F> LockFilter for ReportingFilter<L, F>
where
    L: LockFilter,
    F: FnMut(),
{
    fn evaluate(&mut self, sample: &GpsSample) -> bool {
        let accepted = self.inner.evaluate(sample);
        if !accepted {
            (self.on_reject)();
        }
        accepted
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}
