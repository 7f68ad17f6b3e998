//! Locates language files below the audited root.

use camino::{Utf8Path, Utf8PathBuf};
use ignore::WalkBuilder;
use tracing::{debug, warn};

use crate::pattern::Pattern;
use crate::{LanguageFile, Result};

/// Walks a directory tree and matches its files against a [`Pattern`].
#[derive(Debug, Clone)]
pub struct Discovery {
    root: Utf8PathBuf,
    pattern: Pattern,
}

impl Discovery {
    /// Discover below `root` using `pattern`.
    pub fn new(root: impl Into<Utf8PathBuf>, pattern: Pattern) -> Self {
        Self {
            root: root.into(),
            pattern,
        }
    }

    /// Directory being searched.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Files of every language in `langs`, grouped by language in the given
    /// order and sorted by path within each language.
    ///
    /// Hidden entries and files excluded by `.gitignore` are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error when the pattern does not compile for a language.
    pub fn collect<S: AsRef<str>>(&self, langs: &[S]) -> Result<Vec<LanguageFile>> {
        let matchers = langs
            .iter()
            .map(|lang| {
                let lang = lang.as_ref();
                self.pattern.compile(lang).map(|matcher| (lang, matcher))
            })
            .collect::<Result<Vec<_>>>()?;

        let relative = self.walk();
        let mut files = Vec::new();
        for (lang, matcher) in &matchers {
            files.extend(
                relative
                    .iter()
                    .filter(|path| matcher.is_match(path.as_str()))
                    .map(|path| LanguageFile::new(self.root.join(path).into_string(), *lang)),
            );
        }

        debug!(root = %self.root, files = files.len(), "discovered language files");
        Ok(files)
    }

    fn walk(&self) -> Vec<Utf8PathBuf> {
        let mut paths = Vec::new();
        let walker = WalkBuilder::new(&self.root)
            .git_ignore(true)
            .hidden(true)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        for result in walker {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(error = %err, "discovery walk error");
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|kind| kind.is_file()) {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            match Utf8Path::from_path(relative) {
                Some(path) => paths.push(path.to_owned()),
                None => warn!(path = %relative.display(), "skipping non UTF-8 path"),
            }
        }

        paths.sort();
        paths
    }
}
