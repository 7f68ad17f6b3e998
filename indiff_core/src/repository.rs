//! Repository access and tree snapshots built on top of libgit2.

use std::fmt;
use std::path::Path;

use camino::{Utf8Path, Utf8PathBuf};
use git2::{
    ErrorClass, ErrorCode, ObjectType, Repository as GitRepository, Status, StatusOptions, Tree,
    TreeWalkMode, TreeWalkResult,
};
use tracing::{debug, warn};

use crate::changes::TreeSnapshot;
use crate::{Error, Result};

const SUBMODULE_MODE: u32 = 0o160_000;
const UNKNOWN_CONTENT: Status = Status::WT_NEW
    .union(Status::WT_MODIFIED)
    .union(Status::WT_TYPECHANGE)
    .union(Status::WT_RENAMED)
    .union(Status::CONFLICTED);

/// Handle to the git repository enclosing the audited directory.
pub struct Repository {
    inner: GitRepository,
    root: Utf8PathBuf,
}

impl Repository {
    /// Open the repository containing `path`, searching parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be canonicalized, is not inside a
    /// git repository, or resolves to a bare repository.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let original = path.as_ref();
        let canonical = std::fs::canonicalize(original).map_err(|source| Error::Io {
            path: display_path(original),
            source,
        })?;

        let repo = match GitRepository::discover(&canonical) {
            Ok(repo) => repo,
            Err(err)
                if err.class() == ErrorClass::Repository && err.code() == ErrorCode::NotFound =>
            {
                return Err(Error::NotARepository {
                    path: display_path(&canonical),
                })
            }
            Err(err) => return Err(Error::from(err)),
        };

        let workdir = repo.workdir().ok_or_else(|| Error::BareRepository {
            path: display_path(&canonical),
        })?;
        let root = Utf8PathBuf::try_from(workdir.to_path_buf()).map_err(|err| Error::Io {
            path: display_path(workdir),
            source: err.into_io_error(),
        })?;

        debug!(root = %root, "opened repository");
        Ok(Self { inner: repo, root })
    }

    /// Absolute path of the working directory.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(crate) const fn git_repo(&self) -> &GitRepository {
        &self.inner
    }

    /// Flatten a committed tree into its file paths and blob ids.
    ///
    /// # Errors
    ///
    /// Propagates libgit2 tree walk failures.
    pub fn tree_snapshot(&self, tree: &Tree<'_>) -> Result<TreeSnapshot> {
        let mut snapshot = TreeSnapshot::new();
        tree.walk(TreeWalkMode::PreOrder, |dir, entry| {
            if entry.kind() == Some(ObjectType::Blob) {
                match entry.name() {
                    Some(name) => snapshot.insert(format!("{dir}{name}"), entry.id()),
                    None => warn!(dir, "skipping tree entry with non UTF-8 name"),
                }
            }
            TreeWalkResult::Ok
        })?;
        Ok(snapshot)
    }

    /// Snapshot of the working copy.
    ///
    /// Starts from the index and overlays the working-tree status: deleted
    /// files disappear, while new or modified files are recorded without a
    /// content id so they never compare equal to a committed blob.
    ///
    /// # Errors
    ///
    /// Propagates libgit2 index and status failures.
    pub fn working_snapshot(&self) -> Result<TreeSnapshot> {
        let mut snapshot = TreeSnapshot::new();

        let index = self.inner.index()?;
        for entry in index.iter() {
            if entry.mode == SUBMODULE_MODE || index_stage(entry.flags) != 0 {
                continue;
            }
            match std::str::from_utf8(&entry.path) {
                Ok(path) => snapshot.insert(path, entry.id),
                Err(_) => warn!(
                    path = %String::from_utf8_lossy(&entry.path),
                    "skipping index entry with non UTF-8 path"
                ),
            }
        }

        let mut options = StatusOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);
        let statuses = self.inner.statuses(Some(&mut options))?;
        for entry in statuses.iter() {
            let Some(path) = entry.path() else {
                continue;
            };
            let status = entry.status();
            if status.contains(Status::WT_DELETED) {
                snapshot.remove(path);
            } else if status.intersects(UNKNOWN_CONTENT) {
                snapshot.insert_unknown(path);
            }
        }

        Ok(snapshot)
    }
}

const fn index_stage(flags: u16) -> u16 {
    (flags >> 12) & 0x3
}

pub(crate) fn display_path(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

impl fmt::Debug for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}
