use std::fmt;

use serde::{Deserialize, Serialize};

/// A single file holding content in one language.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LanguageFile {
    /// Path of the file as produced by discovery (usually absolute).
    pub path: String,
    /// Language code of the content stored in the file.
    pub lang: String,
}

impl LanguageFile {
    /// Create a new file reference for the given path and language.
    pub fn new(path: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            lang: lang.into(),
        }
    }
}

impl fmt::Display for LanguageFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "File{{ path: {}, lang: {} }}", self.path, self.lang)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_structural() {
        let a = LanguageFile::new("en/first.md", "en");
        let b = LanguageFile::new(String::from("en/first.md"), String::from("en"));
        assert_eq!(a, b);
        assert_ne!(a, LanguageFile::new("en/first.md", "de"));
    }

    #[test]
    fn display_names_path_and_lang() {
        let file = LanguageFile::new("de/first.md", "de");
        assert_eq!(file.to_string(), "File{ path: de/first.md, lang: de }");
    }
}
