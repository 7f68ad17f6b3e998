use tracing::{debug, warn};

use super::{decide, Classifier, Outcome};
use crate::bundle::Bundle;
use crate::changes::{Change, ChangeSet};
use crate::revision::ContentSource;
use crate::{Diff, LanguageFile, Modification, Report, SkippedPair};

/// Reports translations left behind by changes to their base file.
pub struct HistoricalClassifier<'a> {
    changes: &'a ChangeSet,
    content: &'a dyn ContentSource,
    include_patches: bool,
}

impl<'a> HistoricalClassifier<'a> {
    /// Classify against `changes`, reading content from `content` when patches are requested.
    pub fn new(changes: &'a ChangeSet, content: &'a dyn ContentSource) -> Self {
        Self {
            changes,
            content,
            include_patches: false,
        }
    }

    /// Attach patches to every reported modification.
    #[must_use]
    pub fn with_patches(mut self, include_patches: bool) -> Self {
        self.include_patches = include_patches;
        self
    }

    fn modification(&self, file: &LanguageFile, change: &Change) -> Result<Modification, String> {
        if !self.include_patches {
            return Ok(Modification::new(file.clone(), None));
        }
        change
            .patch(self.content)
            .map(|patch| Modification::new(file.clone(), Some(patch.clone())))
            .map_err(ToString::to_string)
    }

    fn classify_pair(
        &self,
        base: &LanguageFile,
        base_change: &Change,
        translation: &LanguageFile,
    ) -> Result<Option<Diff>, String> {
        let translation_change = self.changes.find(&translation.path);
        let outcome = decide(
            Some(base_change.action()),
            translation_change.map(Change::action),
        );

        match (outcome, translation_change) {
            (Some(Outcome::ModifiedBase), _) => Ok(Some(Diff::modified_base(
                self.modification(base, base_change)?,
                translation.clone(),
            ))),
            (Some(Outcome::ModifiedBoth), Some(translation_change)) => {
                Ok(Some(Diff::modified_both(
                    self.modification(base, base_change)?,
                    self.modification(translation, translation_change)?,
                )))
            }
            _ => Ok(None),
        }
    }
}

impl std::fmt::Debug for HistoricalClassifier<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoricalClassifier")
            .field("changes", &self.changes.len())
            .field("include_patches", &self.include_patches)
            .finish_non_exhaustive()
    }
}

impl Classifier for HistoricalClassifier<'_> {
    fn classify(&self, bundle: &Bundle) -> Report {
        let mut report = Report::new();

        for (base_path, base_change) in self.changes.created_or_modified() {
            if !bundle.is_base_path(&base_path) {
                continue;
            }
            let base = LanguageFile::new(base_path.as_str(), bundle.base_lang());

            for translation in bundle.translations_of(&base_path) {
                match self.classify_pair(&base, base_change, translation) {
                    Ok(Some(diff)) => report.diffs.push(diff),
                    Ok(None) => {}
                    Err(reason) => {
                        warn!(
                            base = %base.path,
                            translation = %translation.path,
                            %reason,
                            "unable to compare pair"
                        );
                        report.skipped.push(SkippedPair::new(
                            base.clone(),
                            Some(translation.clone()),
                            reason,
                        ));
                    }
                }
            }
        }

        debug!(
            diffs = report.diffs.len(),
            skipped = report.skipped.len(),
            "history check finished"
        );
        report
    }
}
