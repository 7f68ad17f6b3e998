//! Core library for indiff's translation audit.
//!
//! The crate is layered around three primary responsibilities:
//! - associating base files with their translations purely from path structure
//! - computing the changes between two revisions of a git repository
//! - classifying missing and out-of-sync translations from both

#![warn(
    clippy::all,
    clippy::cargo,
    clippy::nursery,
    clippy::pedantic,
    missing_docs
)]
#![cfg_attr(
    not(test),
    deny(
        clippy::dbg_macro,
        clippy::expect_used,
        clippy::panic,
        clippy::print_stderr,
        clippy::print_stdout,
        clippy::todo,
        clippy::unwrap_used
    )
)]

/// End-to-end audit pipeline.
pub mod audit;
/// Base/translation association index.
pub mod bundle;
/// Change sets between two revision trees.
pub mod changes;
/// Classifiers turning bundles and change sets into diffs.
pub mod classify;
/// Filesystem discovery of language files.
pub mod discovery;
/// Path based translation matching.
pub mod matcher;
/// Text patches computed from raw content.
pub mod patch;
/// Glob patterns locating language files.
pub mod pattern;
/// Git repository access.
pub mod repository;
/// Revision range resolution and content access.
pub mod revision;

pub use indiff_api::{
    Diff, DiffKind, LanguageFile, Modification, Patch, PatchHunk, PatchLine, PatchLineKind,
    PatchRange, PatchStats, Report, SkippedPair,
};

/// Common result type for the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort an audit before any classification happens.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Underlying git operation failed.
    #[error("git error: {source}")]
    Git {
        /// Original libgit2 error bubbled up by the core library.
        #[from]
        source: git2::Error,
    },
    /// Provided path does not correspond to a git repository.
    #[error("repository not found: {path}")]
    NotARepository {
        /// Path that failed to resolve to a repository.
        path: String,
    },
    /// Bare repositories have no working copy to compare against.
    #[error("repository at {path} is bare and unsupported")]
    BareRepository {
        /// Path of the repository lacking a working tree.
        path: String,
    },
    /// A revision name could not be resolved to a tree.
    #[error("invalid revision '{name}': {source}")]
    InvalidRevision {
        /// Name as given by the caller.
        name: String,
        /// Resolution failure reported by libgit2.
        #[source]
        source: git2::Error,
    },
    /// Filesystem interaction failed.
    #[error("failed to access {path}: {source}")]
    Io {
        /// Filesystem path involved in the failed operation.
        path: String,
        /// Source I/O error returned by the standard library.
        #[source]
        source: std::io::Error,
    },
    /// Pattern lacks the `%l` placeholder.
    #[error("pattern must contain placeholder for language code '%l': {pattern}")]
    MissingLanguagePlaceholder {
        /// Offending pattern.
        pattern: String,
    },
    /// Pattern did not compile into a glob.
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// Glob after placeholder substitution.
        pattern: String,
        /// Compilation failure.
        #[source]
        source: globset::Error,
    },
    /// Fewer than two languages were requested.
    #[error("provide at least two language codes, got {count}")]
    TooFewLanguages {
        /// Number of languages received.
        count: usize,
    },
    /// Base language is not among the requested languages.
    #[error("base language '{lang}' not found among requested languages")]
    UnknownBaseLanguage {
        /// Requested base language.
        lang: String,
    },
}
