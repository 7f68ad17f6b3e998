use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{LanguageFile, Patch};

/// A file together with the changes made to it inside the audited range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modification {
    /// The modified file.
    pub file: LanguageFile,
    /// Changes made to the file, when they were requested.
    #[serde(default)]
    pub patch: Option<Patch>,
}

impl Modification {
    /// Wrap a file and its optional patch.
    pub fn new(file: LanguageFile, patch: Option<Patch>) -> Self {
        Self { file, patch }
    }
}

/// One discrepancy between a base file and its translation.
///
/// Consumers must keep a fallback arm: new kinds may be added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum Diff {
    /// No translation of the base file exists in `lang`.
    Missing {
        /// File in the base language.
        base: LanguageFile,
        /// Language lacking the translation.
        lang: String,
    },
    /// The base file changed but its translation did not.
    ModifiedBase {
        /// Changed base file.
        base: Modification,
        /// Untouched translation.
        translation: LanguageFile,
    },
    /// Both the base file and its translation changed.
    ModifiedBoth {
        /// Changed base file.
        base: Modification,
        /// Changed translation.
        translation: Modification,
    },
}

/// Discriminant of a [`Diff`], handy for counting and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum DiffKind {
    /// See [`Diff::Missing`].
    Missing,
    /// See [`Diff::ModifiedBase`].
    ModifiedBase,
    /// See [`Diff::ModifiedBoth`].
    ModifiedBoth,
}

impl Diff {
    /// Create a missing-translation outcome.
    pub fn missing(base: LanguageFile, lang: impl Into<String>) -> Self {
        Self::Missing {
            base,
            lang: lang.into(),
        }
    }

    /// Create an outcome for a base change without a translation change.
    pub fn modified_base(base: Modification, translation: LanguageFile) -> Self {
        Self::ModifiedBase { base, translation }
    }

    /// Create an outcome for a base change matched by a translation change.
    pub fn modified_both(base: Modification, translation: Modification) -> Self {
        Self::ModifiedBoth { base, translation }
    }

    /// The file in the base language.
    pub fn base(&self) -> &LanguageFile {
        match self {
            Self::Missing { base, .. } => base,
            Self::ModifiedBase { base, .. } | Self::ModifiedBoth { base, .. } => &base.file,
        }
    }

    /// The translation file; `None` only for [`Diff::Missing`].
    pub fn translation(&self) -> Option<&LanguageFile> {
        match self {
            Self::Missing { .. } => None,
            Self::ModifiedBase { translation, .. } => Some(translation),
            Self::ModifiedBoth { translation, .. } => Some(&translation.file),
        }
    }

    /// Language in which the discrepancy occurs.
    pub fn lang(&self) -> &str {
        match self {
            Self::Missing { lang, .. } => lang,
            Self::ModifiedBase { translation, .. } => &translation.lang,
            Self::ModifiedBoth { translation, .. } => &translation.file.lang,
        }
    }

    /// Changes made to the base file, if computed.
    pub fn base_patch(&self) -> Option<&Patch> {
        match self {
            Self::Missing { .. } => None,
            Self::ModifiedBase { base, .. } | Self::ModifiedBoth { base, .. } => {
                base.patch.as_ref()
            }
        }
    }

    /// Changes made to the translation file, if both sides changed and the patch was computed.
    pub fn translation_patch(&self) -> Option<&Patch> {
        match self {
            Self::ModifiedBoth { translation, .. } => translation.patch.as_ref(),
            Self::Missing { .. } | Self::ModifiedBase { .. } => None,
        }
    }

    /// Discriminant of this outcome.
    pub const fn kind(&self) -> DiffKind {
        match self {
            Self::Missing { .. } => DiffKind::Missing,
            Self::ModifiedBase { .. } => DiffKind::ModifiedBase,
            Self::ModifiedBoth { .. } => DiffKind::ModifiedBoth,
        }
    }
}

impl fmt::Display for Diff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { base, lang } => write!(f, "Missing{{ base: {base}, lang: {lang} }}"),
            Self::ModifiedBase { base, translation } => write!(
                f,
                "ModifiedBase{{ base: {}, translation: {translation} }}",
                base.file
            ),
            Self::ModifiedBoth { base, translation } => write!(
                f,
                "ModifiedBoth{{ base: {}, translation: {} }}",
                base.file, translation.file
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PatchHunk, PatchLine, PatchLineKind, PatchRange};

    fn base() -> LanguageFile {
        LanguageFile::new("en/first.md", "en")
    }

    fn translation() -> LanguageFile {
        LanguageFile::new("de/first.md", "de")
    }

    fn patch() -> Patch {
        Patch::new(vec![PatchHunk {
            header: PatchRange {
                old_start: 1,
                old_lines: 0,
                new_start: 1,
                new_lines: 1,
            },
            lines: vec![PatchLine::new(PatchLineKind::Addition, "hello")],
        }])
    }

    #[test]
    fn missing_has_no_translation() {
        let diff = Diff::missing(base(), "de");
        assert_eq!(diff.base(), &base());
        assert!(diff.translation().is_none());
        assert_eq!(diff.lang(), "de");
        assert!(diff.base_patch().is_none());
        assert_eq!(diff.kind(), DiffKind::Missing);
    }

    #[test]
    fn modified_base_takes_lang_from_translation() {
        let diff = Diff::modified_base(Modification::new(base(), Some(patch())), translation());
        assert_eq!(diff.lang(), "de");
        assert_eq!(diff.translation(), Some(&translation()));
        assert_eq!(diff.base_patch(), Some(&patch()));
        assert!(diff.translation_patch().is_none());
    }

    #[test]
    fn modified_both_exposes_both_patches() {
        let diff = Diff::modified_both(
            Modification::new(base(), None),
            Modification::new(translation(), Some(patch())),
        );
        assert_eq!(diff.kind(), DiffKind::ModifiedBoth);
        assert!(diff.base_patch().is_none());
        assert_eq!(diff.translation_patch(), Some(&patch()));
        assert_eq!(
            diff.to_string(),
            "ModifiedBoth{ base: File{ path: en/first.md, lang: en }, translation: File{ path: de/first.md, lang: de } }"
        );
    }

    #[test]
    fn serialized_outcomes_are_tagged_by_kind() {
        let json = serde_json::to_value(Diff::missing(base(), "de")).expect("serialize diff");
        assert_eq!(json["kind"], "missing");
        assert_eq!(json["base"]["path"], "en/first.md");
        assert_eq!(json["lang"], "de");

        let json = serde_json::to_value(Diff::modified_base(
            Modification::new(base(), None),
            translation(),
        ))
        .expect("serialize diff");
        assert_eq!(json["kind"], "modified_base");
        assert!(json["base"]["patch"].is_null());
    }
}
