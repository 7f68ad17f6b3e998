//! Revision ranges and access to file content on either side of them.

use std::io::ErrorKind;
use std::path::Path;

use git2::{ErrorCode, Tree};
use tracing::debug;

use crate::changes::{diff_snapshots, ChangeSet, TreeSnapshot};
use crate::repository::Repository;
use crate::{Error, Result};

/// Revision used for the older side when none is given.
pub const DEFAULT_OLDER: &str = "HEAD";

const WORKING_COPY: &str = "working copy";

/// Side of a revision range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The revision changes are measured from.
    Older,
    /// The revision changes are measured to.
    Newer,
}

/// Failure reading a file's content on one side of a range.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// The path does not exist in the revision.
    #[error("{path} does not exist in {revision}")]
    NotFound {
        /// Repository-relative path.
        path: String,
        /// Revision name, or `working copy`.
        revision: String,
    },
    /// Reading the working-copy file failed.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Repository-relative path.
        path: String,
        /// Source I/O error.
        #[source]
        source: std::io::Error,
    },
    /// libgit2 failed while looking up or diffing the content.
    #[error("git error for {path}: {source}")]
    Git {
        /// Repository-relative path.
        path: String,
        /// Source libgit2 error.
        #[source]
        source: git2::Error,
    },
}

/// Reads file content on either side of a revision range.
pub trait ContentSource {
    /// Content of the repository-relative `path` on `side`.
    ///
    /// # Errors
    ///
    /// Returns an error when the path is absent on that side or unreadable.
    fn content(&self, side: Side, path: &str) -> std::result::Result<String, ContentError>;
}

/// Revision names as requested by the caller.
///
/// The default compares `HEAD` against the working copy, i.e. uncommitted changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevisionSpec {
    /// Older revision; `HEAD` when absent.
    pub older: Option<String>,
    /// Newer revision; the working copy when absent.
    pub newer: Option<String>,
}

impl RevisionSpec {
    /// Compare `older` against `newer`, either of which may be omitted.
    #[must_use]
    pub const fn new(older: Option<String>, newer: Option<String>) -> Self {
        Self { older, newer }
    }
}

/// One side of a resolved range.
pub enum RevisionTree<'repo> {
    /// A committed tree.
    Committed {
        /// Name the tree was resolved from.
        name: String,
        /// Resolved tree.
        tree: Tree<'repo>,
    },
    /// The working copy, including untracked files.
    WorkingCopy,
}

impl RevisionTree<'_> {
    /// Human readable name of the side.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Committed { name, .. } => name,
            Self::WorkingCopy => WORKING_COPY,
        }
    }
}

impl std::fmt::Debug for RevisionTree<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Committed { name, tree } => f
                .debug_struct("Committed")
                .field("name", name)
                .field("tree", &tree.id())
                .finish(),
            Self::WorkingCopy => f.write_str("WorkingCopy"),
        }
    }
}

/// Pair of resolved trees within one repository.
#[derive(Debug)]
pub struct RevisionRange<'repo> {
    repository: &'repo Repository,
    older: RevisionTree<'repo>,
    newer: RevisionTree<'repo>,
}

impl<'repo> RevisionRange<'repo> {
    /// Resolve the revisions named by `revisions`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRevision`] when a name does not resolve to a tree.
    pub fn resolve(repository: &'repo Repository, revisions: &RevisionSpec) -> Result<Self> {
        let older = resolve_tree(
            repository,
            revisions.older.as_deref().unwrap_or(DEFAULT_OLDER),
        )?;
        let newer = match revisions.newer.as_deref() {
            Some(name) => resolve_tree(repository, name)?,
            None => RevisionTree::WorkingCopy,
        };

        debug!(older = older.name(), newer = newer.name(), "resolved revision range");
        Ok(Self {
            repository,
            older,
            newer,
        })
    }

    /// Tree on the given side.
    #[must_use]
    pub const fn tree(&self, side: Side) -> &RevisionTree<'repo> {
        match side {
            Side::Older => &self.older,
            Side::Newer => &self.newer,
        }
    }

    /// Flattened file listing of one side.
    ///
    /// # Errors
    ///
    /// Propagates libgit2 failures while walking the tree or reading status.
    pub fn snapshot(&self, side: Side) -> Result<TreeSnapshot> {
        match self.tree(side) {
            RevisionTree::Committed { tree, .. } => self.repository.tree_snapshot(tree),
            RevisionTree::WorkingCopy => self.repository.working_snapshot(),
        }
    }

    /// Per-path changes from the older to the newer side.
    ///
    /// # Errors
    ///
    /// Propagates failures taking either snapshot.
    pub fn changes(&self) -> Result<ChangeSet> {
        let older = self.snapshot(Side::Older)?;
        let newer = self.snapshot(Side::Newer)?;
        let changes = diff_snapshots(&older, &newer);
        debug!(
            older = self.older.name(),
            newer = self.newer.name(),
            changed = changes.len(),
            "computed changes"
        );
        Ok(ChangeSet::new(self.repository.root(), changes))
    }
}

impl ContentSource for RevisionRange<'_> {
    fn content(&self, side: Side, path: &str) -> std::result::Result<String, ContentError> {
        match self.tree(side) {
            RevisionTree::Committed { name, tree } => {
                let entry = tree.get_path(Path::new(path)).map_err(|source| {
                    if source.code() == ErrorCode::NotFound {
                        ContentError::NotFound {
                            path: path.to_owned(),
                            revision: name.clone(),
                        }
                    } else {
                        ContentError::Git {
                            path: path.to_owned(),
                            source,
                        }
                    }
                })?;
                let blob = entry
                    .to_object(self.repository.git_repo())
                    .and_then(|object| object.peel_to_blob())
                    .map_err(|source| ContentError::Git {
                        path: path.to_owned(),
                        source,
                    })?;
                Ok(String::from_utf8_lossy(blob.content()).into_owned())
            }
            RevisionTree::WorkingCopy => {
                match std::fs::read(self.repository.root().join(path)) {
                    Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
                    Err(err) if err.kind() == ErrorKind::NotFound => Err(ContentError::NotFound {
                        path: path.to_owned(),
                        revision: WORKING_COPY.to_owned(),
                    }),
                    Err(source) => Err(ContentError::Read {
                        path: path.to_owned(),
                        source,
                    }),
                }
            }
        }
    }
}

fn resolve_tree<'repo>(repository: &'repo Repository, name: &str) -> Result<RevisionTree<'repo>> {
    let tree = repository
        .git_repo()
        .revparse_single(name)
        .and_then(|object| object.peel_to_tree())
        .map_err(|source| Error::InvalidRevision {
            name: name.to_owned(),
            source,
        })?;
    Ok(RevisionTree::Committed {
        name: name.to_owned(),
        tree,
    })
}
