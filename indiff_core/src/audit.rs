//! End-to-end audit: discovery, association, structural and history checks.

use std::path::Path;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{info, warn};

use crate::bundle::Bundle;
use crate::classify::{BasicClassifier, Classifier, HistoricalClassifier};
use crate::discovery::Discovery;
use crate::pattern::Pattern;
use crate::repository::{display_path, Repository};
use crate::revision::{RevisionRange, RevisionSpec};
use crate::{Error, Report, Result};

/// Everything an audit needs to know.
#[derive(Debug, Clone)]
pub struct AuditOptions {
    /// Directory containing the documentation.
    pub root: Utf8PathBuf,
    /// Requested language codes, base language included.
    pub languages: Vec<String>,
    /// Base language; the first requested language when absent.
    pub base_lang: Option<String>,
    /// Pattern locating language files below `root`.
    pub pattern: Pattern,
    /// Whether to consult git history at all.
    pub use_git: bool,
    /// Revisions compared by the history check.
    pub revisions: RevisionSpec,
    /// Whether to attach patches to modifications.
    pub include_patches: bool,
}

impl AuditOptions {
    /// Audit `languages` below `root` with git enabled and uncommitted changes compared.
    pub fn new<I, S>(root: impl Into<Utf8PathBuf>, languages: I, pattern: Pattern) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            root: root.into(),
            languages: languages.into_iter().map(Into::into).collect(),
            base_lang: None,
            pattern,
            use_git: true,
            revisions: RevisionSpec::default(),
            include_patches: false,
        }
    }

    /// Validated base language.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooFewLanguages`] for fewer than two languages and
    /// [`Error::UnknownBaseLanguage`] when the base language was not requested.
    pub fn resolved_base_lang(&self) -> Result<&str> {
        if self.languages.len() < 2 {
            return Err(Error::TooFewLanguages {
                count: self.languages.len(),
            });
        }
        match self.base_lang.as_deref() {
            None => Ok(self.languages[0].as_str()),
            Some(lang) if self.languages.iter().any(|candidate| candidate == lang) => Ok(lang),
            Some(lang) => Err(Error::UnknownBaseLanguage {
                lang: lang.to_owned(),
            }),
        }
    }
}

/// Canonical, UTF-8 form of `path`.
///
/// # Errors
///
/// Returns [`Error::Io`] when the path does not exist or is not valid UTF-8.
pub fn canonical_root(path: impl AsRef<Path>) -> Result<Utf8PathBuf> {
    let path = path.as_ref();
    let canonical = std::fs::canonicalize(path).map_err(|source| Error::Io {
        path: display_path(path),
        source,
    })?;
    Utf8PathBuf::try_from(canonical).map_err(|err| Error::Io {
        path: display_path(path),
        source: err.into_io_error(),
    })
}

/// Run a complete audit.
///
/// Structural diffs come first, followed by history diffs. A root outside any
/// git repository downgrades the run to the structural check with a warning.
///
/// # Errors
///
/// Returns an error for invalid options, an unreadable root, an unusable
/// repository, or revisions that do not resolve.
pub fn run(options: &AuditOptions) -> Result<Report> {
    let base_lang = options.resolved_base_lang()?;
    let root = canonical_root(&options.root)?;

    let files = Discovery::new(root.clone(), options.pattern.clone()).collect(&options.languages)?;
    let bundle = Bundle::new(base_lang, files);

    let mut report = BasicClassifier::new(options.languages.iter().cloned()).classify(&bundle);

    if options.use_git {
        match history(&root, options, &bundle) {
            Ok(history) => report.extend(history),
            Err(Error::NotARepository { path }) => warn!(
                %path,
                "git repository was not found; check the path or disable git to hide this warning"
            ),
            Err(err) => return Err(err),
        }
    }

    info!(
        diffs = report.diffs.len(),
        skipped = report.skipped.len(),
        "audit finished"
    );
    Ok(report)
}

fn history(root: &Utf8Path, options: &AuditOptions, bundle: &Bundle) -> Result<Report> {
    let repository = Repository::open(root)?;
    let range = RevisionRange::resolve(&repository, &options.revisions)?;
    let changes = range.changes()?;
    Ok(HistoricalClassifier::new(&changes, &range)
        .with_patches(options.include_patches)
        .classify(bundle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(languages: &[&str]) -> AuditOptions {
        let pattern = Pattern::parse("SUB", &["md"]).expect("pattern");
        AuditOptions::new("/docs", languages.iter().copied(), pattern)
    }

    #[test]
    fn base_language_defaults_to_first() {
        assert_eq!(options(&["de", "en"]).resolved_base_lang().expect("base"), "de");
    }

    #[test]
    fn explicit_base_language_must_be_requested() {
        let mut opts = options(&["en", "de"]);
        opts.base_lang = Some("de".into());
        assert_eq!(opts.resolved_base_lang().expect("base"), "de");

        opts.base_lang = Some("fr".into());
        assert!(matches!(
            opts.resolved_base_lang(),
            Err(Error::UnknownBaseLanguage { lang }) if lang == "fr"
        ));
    }

    #[test]
    fn needs_two_languages() {
        assert!(matches!(
            options(&["en"]).resolved_base_lang(),
            Err(Error::TooFewLanguages { count: 1 })
        ));
    }

    #[test]
    fn missing_root_is_io_error() {
        let temp = tempfile::TempDir::new().expect("tempdir");
        let mut opts = options(&["en", "de"]);
        opts.root = Utf8PathBuf::try_from(temp.path().join("absent")).expect("utf8");
        assert!(matches!(run(&opts), Err(Error::Io { .. })));
    }
}
