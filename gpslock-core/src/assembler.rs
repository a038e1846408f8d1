//! Track assembly
//!
//! Applies the combined filter verdict to every sample of the stream. This
//! is the only place a sample's `resolved_lock` changes: rejected samples
//! are downgraded, accepted ones keep the receiver's own classification.
//! Acceptance never upgrades a fix the receiver reported as not locked.
//!
//! Assembly is lazy and single-pass. Callers that stop iterating early
//! simply leave the rest of the stream unread.
//!
//! Timestamps must be non-decreasing. That is a precondition of the caller
//! and is not checked here.

use crate::{sample::GpsSample, traits::LockFilter};

/// Pairs a sample stream with the filter that judges it
pub struct TrackAssembler<F> {
    filter: F,
}

impl<F: LockFilter> TrackAssembler<F> {
    /// Assembler driven by `filter`, normally a [`WorstOfFilter`](crate::WorstOfFilter)
    pub fn new(filter: F) -> Self {
        Self { filter }
    }

    /// Amend `samples` in arrival order
    pub fn assemble<I>(self, samples: I) -> AmendedTimeline<I::IntoIter, F>
    where
        I: IntoIterator<Item = GpsSample>,
    {
        AmendedTimeline {
            samples: samples.into_iter(),
            filter: self.filter,
            downgraded: 0,
        }
    }
}

/// Iterator over samples with their resolved lock applied
pub struct AmendedTimeline<I, F> {
    samples: I,
    filter: F,
    downgraded: usize,
}

impl<I, F> AmendedTimeline<I, F> {
    /// Samples downgraded so far
    pub fn downgraded(&self) -> usize {
        self.downgraded
    }

    /// Give back the filter, e.g. to inspect tracker state after the run
    pub fn into_filter(self) -> F {
        self.filter
    }
}

impl<I, F> Iterator for AmendedTimeline<I, F>
where
    I: Iterator<Item = GpsSample>,
    F: LockFilter,
{
    type Item = GpsSample;

    fn next(&mut self) -> Option<GpsSample> {
        let mut sample = self.samples.next()?;

        if !self.filter.evaluate(&sample) {
            if sample.is_locked() {
                log_debug!(
                    "downgraded {} fix at {:.1} ms ({:.6}, {:.6}) dop={} speed={} m/s",
                    sample.fix,
                    crate::time::as_millis_f64(sample.timestamp),
                    sample.latitude,
                    sample.longitude,
                    sample.dop,
                    sample.ground_speed
                );
                self.downgraded += 1;
            }
            sample.downgrade();
        }

        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.samples.size_hint()
    }
}
