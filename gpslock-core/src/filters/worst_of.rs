//! Worst-of combinator
//!
//! Accepts a fix only if every child accepts it, like a logical AND, but
//! without short-circuiting: every child evaluates every sample. That keeps
//! the rejection tally exhaustive (a fix that is both imprecise and too fast
//! is counted under both reasons) and keeps stateful children such as the
//! heuristic tracker fed with the complete stream.
//!
//! Children run in insertion order. Order does not change the verdict, but
//! it is the order reasons were registered in, and therefore the order the
//! diagnostic summary is printed in.

use crate::{
    sample::GpsSample,
    traits::{BoxedFilter, LockFilter},
};

/// Ordered list of filters that must all accept
#[derive(Default)]
pub struct WorstOfFilter {
    filters: Vec<BoxedFilter>,
}

impl WorstOfFilter {
    /// Empty combinator; accepts everything until children are added
    pub fn new() -> Self {
        Self { filters: Vec::new() }
    }

    /// Append a child, builder style
    pub fn with<F: LockFilter + Send + 'static>(mut self, filter: F) -> Self {
        self.push(filter);
        self
    }

    /// Append a child
    pub fn push<F: LockFilter + Send + 'static>(&mut self, filter: F) {
        self.filters.push(Box::new(filter));
    }

    /// Number of children
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// True without children
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Child names in evaluation order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.filters.iter().map(|f| f.name())
    }
}

impl LockFilter for WorstOfFilter {
    fn evaluate(&mut self, sample: &GpsSample) -> bool {
        let mut accepted = true;
        for filter in self.filters.iter_mut() {
            // Evaluate first: `accepted && ..` would skip the rest
            let verdict = filter.evaluate(sample);
            accepted &= verdict;
        }
        accepted
    }

    fn name(&self) -> &'static str {
        "WorstOfFilter"
    }
}

impl FromIterator<BoxedFilter> for WorstOfFilter {
    fn from_iter<I: IntoIterator<Item = BoxedFilter>>(iter: I) -> Self {
        Self { filters: iter.into_iter().collect() }
    }
}
