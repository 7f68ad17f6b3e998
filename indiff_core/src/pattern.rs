//! Glob patterns locating language files below the audited root.

use std::fmt;

use globset::{GlobBuilder, GlobMatcher};

use crate::{Error, Result};

/// Placeholder replaced by a language code.
pub const LANG_PLACEHOLDER: &str = "%l";
/// Placeholder replaced by the extension alternatives.
pub const EXT_PLACEHOLDER: &str = "%e";

/// Named pattern shipped with indiff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredefinedPattern {
    /// Name accepted in place of a raw pattern.
    pub name: &'static str,
    /// Raw pattern with placeholders.
    pub pattern: &'static str,
    /// One-line description.
    pub description: &'static str,
}

const PREDEFINED: [PredefinedPattern; 2] = [
    PredefinedPattern {
        name: "SUB",
        pattern: "%l/**/*.%e",
        description: "each language in separate subdirectory",
    },
    PredefinedPattern {
        name: "EXT",
        pattern: "**/*.%l.%e",
        description: "language code as part of file extension",
    },
];

/// Validated pattern with extensions applied and `%l` left in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern(String);

impl Pattern {
    /// Parse `raw`, which is either a predefined name or a glob containing `%l`.
    ///
    /// `%e` is replaced by `{ext1,ext2}`, or by `*` when `extensions` is empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingLanguagePlaceholder`] when the pattern has no `%l`.
    pub fn parse<S: AsRef<str>>(raw: &str, extensions: &[S]) -> Result<Self> {
        let pattern = Self::predefined()
            .iter()
            .find(|predefined| predefined.name == raw)
            .map_or(raw, |predefined| predefined.pattern);

        if !pattern.contains(LANG_PLACEHOLDER) {
            return Err(Error::MissingLanguagePlaceholder {
                pattern: pattern.to_owned(),
            });
        }

        let alternatives = match extensions {
            [] => "*".to_owned(),
            extensions => {
                let joined: Vec<&str> = extensions.iter().map(AsRef::as_ref).collect();
                format!("{{{}}}", joined.join(","))
            }
        };

        Ok(Self(pattern.replacen(EXT_PLACEHOLDER, &alternatives, 1)))
    }

    /// Patterns that can be referenced by name.
    #[must_use]
    pub const fn predefined() -> &'static [PredefinedPattern] {
        &PREDEFINED
    }

    /// Pattern text, still containing `%l`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Glob matching files of `lang`, relative to the audited root.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] when the substituted glob does not compile.
    pub fn compile(&self, lang: &str) -> Result<GlobMatcher> {
        let glob = self.0.replacen(LANG_PLACEHOLDER, lang, 1);
        GlobBuilder::new(&glob)
            .literal_separator(true)
            .build()
            .map(|compiled| compiled.compile_matcher())
            .map_err(|source| Error::InvalidPattern {
                pattern: glob,
                source,
            })
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
