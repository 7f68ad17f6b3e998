use serde::{Deserialize, Serialize};

use crate::{Diff, LanguageFile};

/// A file pair that could not be classified because its content was unavailable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedPair {
    /// File in the base language.
    pub base: LanguageFile,
    /// Translation involved in the comparison, if any.
    #[serde(default)]
    pub translation: Option<LanguageFile>,
    /// Human-readable cause.
    pub reason: String,
}

impl SkippedPair {
    /// Construct a skipped pair.
    pub fn new(
        base: LanguageFile,
        translation: Option<LanguageFile>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            base,
            translation,
            reason: reason.into(),
        }
    }

    /// Language of the pair, falling back to the base language.
    pub fn lang(&self) -> &str {
        self.translation
            .as_ref()
            .map_or(self.base.lang.as_str(), |file| file.lang.as_str())
    }
}

/// Everything an audit produced: the ordered outcomes and the pairs it had to skip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Report {
    /// Outcomes in classifier order.
    #[serde(default)]
    pub diffs: Vec<Diff>,
    /// Pairs whose content could not be read.
    #[serde(default)]
    pub skipped: Vec<SkippedPair>,
}

impl Report {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append another report, keeping the order of both.
    pub fn extend(&mut self, other: Self) {
        self.diffs.extend(other.diffs);
        self.skipped.extend(other.skipped);
    }

    /// Returns `true` when nothing was reported or skipped.
    pub fn is_clean(&self) -> bool {
        self.diffs.is_empty() && self.skipped.is_empty()
    }
}

impl From<Vec<Diff>> for Report {
    fn from(diffs: Vec<Diff>) -> Self {
        Self {
            diffs,
            skipped: Vec::new(),
        }
    }
}
