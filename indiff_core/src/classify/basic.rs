use tracing::debug;

use super::Classifier;
use crate::bundle::Bundle;
use crate::{Diff, Report};

/// Reports base files that have no translation in a requested language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicClassifier {
    langs: Vec<String>,
}

impl BasicClassifier {
    /// Check translations into every language of `langs`; the base language is skipped.
    pub fn new<I, S>(langs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            langs: langs.into_iter().map(Into::into).collect(),
        }
    }
}

impl Classifier for BasicClassifier {
    fn classify(&self, bundle: &Bundle) -> Report {
        let mut diffs = Vec::new();
        for lang in self.langs.iter().filter(|lang| *lang != bundle.base_lang()) {
            for base in bundle.base_files() {
                if bundle.translation(&base.path, lang).is_none() {
                    diffs.push(Diff::missing(base.clone(), lang.as_str()));
                }
            }
        }
        debug!(missing = diffs.len(), "structural check finished");
        Report::from(diffs)
    }
}
