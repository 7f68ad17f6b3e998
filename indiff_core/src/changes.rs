//! Per-path changes between an older and a newer revision tree.

use std::cell::OnceCell;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};
use git2::Oid;

use crate::patch;
use crate::revision::{ContentError, ContentSource, Side};
use crate::Patch;

/// What happened to a path between the two trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeAction {
    /// Path exists only in the newer tree.
    Inserted,
    /// Path exists in both trees with different content.
    Modified,
    /// Path exists only in the older tree.
    Deleted,
}

impl ChangeAction {
    /// Inserted or modified, i.e. the content still exists in the newer tree.
    #[must_use]
    pub const fn is_created_or_modified(self) -> bool {
        matches!(self, Self::Inserted | Self::Modified)
    }
}

impl fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Inserted => "insert",
            Self::Modified => "modify",
            Self::Deleted => "delete",
        })
    }
}

/// A single changed path with lazily computed content and patch.
#[derive(Debug)]
pub struct Change {
    from_path: Option<String>,
    to_path: Option<String>,
    action: ChangeAction,
    patch: OnceCell<Result<Patch, ContentError>>,
}

impl Change {
    /// Construct a change from explicit sides.
    #[must_use]
    pub const fn new(
        from_path: Option<String>,
        to_path: Option<String>,
        action: ChangeAction,
    ) -> Self {
        Self {
            from_path,
            to_path,
            action,
            patch: OnceCell::new(),
        }
    }

    /// A path that only exists in the newer tree.
    pub fn inserted(path: impl Into<String>) -> Self {
        Self::new(None, Some(path.into()), ChangeAction::Inserted)
    }

    /// A path whose content differs between the trees.
    pub fn modified(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(Some(path.clone()), Some(path), ChangeAction::Modified)
    }

    /// A path that only exists in the older tree.
    pub fn deleted(path: impl Into<String>) -> Self {
        Self::new(Some(path.into()), None, ChangeAction::Deleted)
    }

    /// Path in the older tree, if the change has one.
    #[must_use]
    pub fn from_path(&self) -> Option<&str> {
        self.from_path.as_deref()
    }

    /// Path in the newer tree, if the change has one.
    #[must_use]
    pub fn to_path(&self) -> Option<&str> {
        self.to_path.as_deref()
    }

    /// The newer path, or the older one for deletions.
    #[must_use]
    pub fn path(&self) -> &str {
        self.to_path
            .as_deref()
            .or(self.from_path.as_deref())
            .unwrap_or_default()
    }

    /// What happened to the path.
    #[must_use]
    pub const fn action(&self) -> ChangeAction {
        self.action
    }

    /// Content before the change; empty for insertions.
    ///
    /// # Errors
    ///
    /// Returns the error reported by `source` when the content cannot be read.
    pub fn content_before(&self, source: &dyn ContentSource) -> Result<String, ContentError> {
        self.from_path
            .as_deref()
            .map_or_else(|| Ok(String::new()), |path| source.content(Side::Older, path))
    }

    /// Content after the change; empty for deletions.
    ///
    /// # Errors
    ///
    /// Returns the error reported by `source` when the content cannot be read.
    pub fn content_after(&self, source: &dyn ContentSource) -> Result<String, ContentError> {
        self.to_path
            .as_deref()
            .map_or_else(|| Ok(String::new()), |path| source.content(Side::Newer, path))
    }

    /// Patch of the change, computed on first access and memoized afterwards.
    ///
    /// # Errors
    ///
    /// Returns the content-access failure hit on first access; later calls
    /// return the same error without retrying.
    pub fn patch(&self, source: &dyn ContentSource) -> Result<&Patch, &ContentError> {
        self.patch
            .get_or_init(|| self.compute_patch(source))
            .as_ref()
    }

    fn compute_patch(&self, source: &dyn ContentSource) -> Result<Patch, ContentError> {
        let before = self.content_before(source)?;
        let after = self.content_after(source)?;
        patch::compute(&before, &after).map_err(|source| ContentError::Git {
            path: self.path().to_owned(),
            source,
        })
    }
}

/// Ordered changes between two trees, rooted at the repository working directory.
#[derive(Debug)]
pub struct ChangeSet {
    root: Utf8PathBuf,
    changes: Vec<Change>,
    by_path: HashMap<String, usize>,
}

impl ChangeSet {
    /// Build a change set whose repository-relative paths resolve against `root`.
    pub fn new(root: impl Into<Utf8PathBuf>, changes: Vec<Change>) -> Self {
        let root = root.into();
        let by_path = changes
            .iter()
            .enumerate()
            .map(|(index, change)| (resolve(&root, change.path()), index))
            .collect();
        Self {
            root,
            changes,
            by_path,
        }
    }

    /// Repository working directory the change paths are relative to.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Turn a repository-relative path into the form discovery produces.
    #[must_use]
    pub fn absolute(&self, path: &str) -> String {
        resolve(&self.root, path)
    }

    /// Iterate over the changes in order.
    pub fn iter(&self) -> impl Iterator<Item = &Change> {
        self.changes.iter()
    }

    /// Number of changed paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Returns `true` when nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Change recorded for an absolute path, if any.
    #[must_use]
    pub fn find(&self, absolute_path: &str) -> Option<&Change> {
        self.by_path
            .get(absolute_path)
            .map(|index| &self.changes[*index])
    }

    /// Action recorded for an absolute path, if any.
    #[must_use]
    pub fn action_of(&self, absolute_path: &str) -> Option<ChangeAction> {
        self.find(absolute_path).map(Change::action)
    }

    /// Inserted or modified changes paired with their absolute path.
    pub fn created_or_modified(&self) -> impl Iterator<Item = (String, &Change)> {
        self.changes
            .iter()
            .filter(|change| change.action().is_created_or_modified())
            .map(|change| (self.absolute(change.path()), change))
    }
}

fn resolve(root: &Utf8Path, path: &str) -> String {
    root.join(path).into_string()
}

/// Flattened tree: every file path mapped to its content id.
///
/// The zero id marks entries without a stable hash (working-copy files that
/// differ from the index); such entries never compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeSnapshot {
    entries: BTreeMap<String, Oid>,
}

impl TreeSnapshot {
    /// Create an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `path` with content id `id`.
    pub fn insert(&mut self, path: impl Into<String>, id: Oid) {
        self.entries.insert(path.into(), id);
    }

    /// Record `path` with the unknown-content sentinel.
    pub fn insert_unknown(&mut self, path: impl Into<String>) {
        self.insert(path, Oid::zero());
    }

    /// Forget `path`.
    pub fn remove(&mut self, path: &str) {
        self.entries.remove(path);
    }

    /// Content id recorded for `path`.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<Oid> {
        self.entries.get(path).copied()
    }

    /// Number of recorded files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no file is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn same_content(older: Oid, newer: Oid) -> bool {
    !older.is_zero() && !newer.is_zero() && older == newer
}

/// Compare two snapshots path by path, in path order.
#[must_use]
pub fn diff_snapshots(older: &TreeSnapshot, newer: &TreeSnapshot) -> Vec<Change> {
    let mut changes = Vec::new();
    let mut old_entries = older.entries.iter().peekable();
    let mut new_entries = newer.entries.iter().peekable();

    loop {
        let change = match (old_entries.peek().copied(), new_entries.peek().copied()) {
            (None, None) => break,
            (Some((path, _)), None) => {
                old_entries.next();
                Change::deleted(path.as_str())
            }
            (None, Some((path, _))) => {
                new_entries.next();
                Change::inserted(path.as_str())
            }
            (Some((old_path, old_id)), Some((new_path, new_id))) => {
                match old_path.cmp(new_path) {
                    Ordering::Less => {
                        old_entries.next();
                        Change::deleted(old_path.as_str())
                    }
                    Ordering::Greater => {
                        new_entries.next();
                        Change::inserted(new_path.as_str())
                    }
                    Ordering::Equal => {
                        old_entries.next();
                        new_entries.next();
                        if same_content(*old_id, *new_id) {
                            continue;
                        }
                        Change::modified(new_path.as_str())
                    }
                }
            }
        };
        changes.push(change);
    }

    changes
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn oid(byte: u8) -> Oid {
        Oid::from_bytes(&[byte; 20]).expect("oid")
    }

    fn snapshot(entries: &[(&str, Oid)]) -> TreeSnapshot {
        let mut snapshot = TreeSnapshot::new();
        for (path, id) in entries {
            snapshot.insert(*path, *id);
        }
        snapshot
    }

    fn summary(changes: &[Change]) -> Vec<(String, ChangeAction)> {
        changes
            .iter()
            .map(|change| (change.path().to_owned(), change.action()))
            .collect()
    }

    #[test]
    fn classifies_paths_in_order() {
        let older = snapshot(&[("a.md", oid(1)), ("b.md", oid(2)), ("c.md", oid(3))]);
        let newer = snapshot(&[("a.md", oid(1)), ("b.md", oid(9)), ("d.md", oid(4))]);

        let changes = diff_snapshots(&older, &newer);
        assert_eq!(
            summary(&changes),
            [
                ("b.md".to_owned(), ChangeAction::Modified),
                ("c.md".to_owned(), ChangeAction::Deleted),
                ("d.md".to_owned(), ChangeAction::Inserted),
            ]
        );
        assert_eq!(changes[0].from_path(), Some("b.md"));
        assert_eq!(changes[1].to_path(), None);
        assert_eq!(changes[2].from_path(), None);
    }

    #[test]
    fn sentinel_ids_are_never_equal() {
        let mut older = snapshot(&[("a.md", oid(1))]);
        older.insert_unknown("z.md");
        let mut newer = snapshot(&[("z.md", oid(7))]);
        newer.insert_unknown("a.md");

        let changes = diff_snapshots(&older, &newer);
        assert_eq!(
            summary(&changes),
            [
                ("a.md".to_owned(), ChangeAction::Modified),
                ("z.md".to_owned(), ChangeAction::Modified),
            ]
        );

        let mut both_unknown = TreeSnapshot::new();
        both_unknown.insert_unknown("a.md");
        assert_eq!(diff_snapshots(&both_unknown, &both_unknown).len(), 1);
    }

    #[test]
    fn identical_snapshots_have_no_changes() {
        let tree = snapshot(&[("a.md", oid(1)), ("dir/b.md", oid(2))]);
        assert!(diff_snapshots(&tree, &tree).is_empty());
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.get("dir/b.md"), Some(oid(2)));
    }

    #[test]
    fn change_set_resolves_absolute_paths() {
        let set = ChangeSet::new(
            "/repo",
            vec![Change::inserted("en/a.md"), Change::deleted("de/a.md")],
        );
        assert_eq!(set.absolute("en/a.md"), "/repo/en/a.md");
        assert_eq!(set.action_of("/repo/en/a.md"), Some(ChangeAction::Inserted));
        assert_eq!(set.action_of("/repo/de/a.md"), Some(ChangeAction::Deleted));
        assert_eq!(set.action_of("/repo/fr/a.md"), None);

        let created: Vec<_> = set.created_or_modified().map(|(path, _)| path).collect();
        assert_eq!(created, ["/repo/en/a.md"]);
    }

    struct CountingSource {
        reads: Cell<usize>,
    }

    impl ContentSource for CountingSource {
        fn content(&self, side: Side, path: &str) -> Result<String, ContentError> {
            self.reads.set(self.reads.get() + 1);
            match side {
                Side::Older => Ok(format!("{path}\nold\n")),
                Side::Newer => Ok(format!("{path}\nnew\n")),
            }
        }
    }

    #[test]
    fn patch_is_computed_once() {
        let source = CountingSource {
            reads: Cell::new(0),
        };
        let change = Change::modified("a.md");

        let first = change.patch(&source).expect("patch").clone();
        let second = change.patch(&source).expect("patch");
        assert_eq!(&first, second);
        assert_eq!(source.reads.get(), 2);
        assert_eq!(first.stats.additions, 1);
        assert_eq!(first.stats.deletions, 1);
    }

    #[test]
    fn inserted_change_reads_only_newer_side() {
        let source = CountingSource {
            reads: Cell::new(0),
        };
        let change = Change::inserted("a.md");
        assert_eq!(change.content_before(&source).expect("before"), "");
        assert_eq!(source.reads.get(), 0);
        assert_eq!(change.content_after(&source).expect("after"), "a.md\nnew\n");
    }

    struct FailingSource;

    impl ContentSource for FailingSource {
        fn content(&self, _side: Side, path: &str) -> Result<String, ContentError> {
            Err(ContentError::NotFound {
                path: path.to_owned(),
                revision: "HEAD".into(),
            })
        }
    }

    #[test]
    fn patch_failure_is_memoized() {
        let change = Change::modified("gone.md");
        let err = change.patch(&FailingSource).expect_err("missing content");
        assert!(matches!(err, ContentError::NotFound { path, .. } if path == "gone.md"));
        assert!(change.patch(&FailingSource).is_err());
    }
}
