//! Classifiers turning a [`Bundle`] into reported differences.

use crate::bundle::Bundle;
use crate::Report;

mod basic;
mod decision;
mod historical;

pub use basic::BasicClassifier;
pub use decision::{decide, Outcome};
pub use historical::HistoricalClassifier;

/// Produces diffs for the base files of a bundle.
pub trait Classifier {
    /// Classify `bundle`, returning outcomes in a deterministic order.
    fn classify(&self, bundle: &Bundle) -> Report;
}
