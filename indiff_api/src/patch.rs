use std::fmt;

use serde::{Deserialize, Serialize};

/// Line-level changes made to one file between two points of a revision range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Patch {
    /// Contiguous groups of changes with their surrounding context.
    #[serde(default)]
    pub hunks: Vec<PatchHunk>,
    /// Totals of added and removed lines.
    #[serde(default)]
    pub stats: PatchStats,
}

impl Patch {
    /// Build a patch from hunks, deriving the stats from their lines.
    pub fn new(hunks: Vec<PatchHunk>) -> Self {
        let stats = hunks
            .iter()
            .flat_map(|hunk| hunk.lines.iter())
            .fold(PatchStats::ZERO, |stats, line| match line.kind {
                PatchLineKind::Addition => stats.add(PatchStats::new(1, 0)),
                PatchLineKind::Deletion => stats.add(PatchStats::new(0, 1)),
                PatchLineKind::Context | PatchLineKind::NoNewlineAtEof => stats,
            });
        Self { hunks, stats }
    }

    /// Returns `true` when the patch carries no hunks.
    pub fn is_empty(&self) -> bool {
        self.hunks.is_empty()
    }
}

/// Renders the unified diff body without file headers.
impl fmt::Display for Patch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for hunk in &self.hunks {
            if !first {
                writeln!(f)?;
            }
            first = false;
            write!(f, "{}", hunk.header)?;
            for line in &hunk.lines {
                write!(f, "\n{line}")?;
            }
        }
        Ok(())
    }
}

/// Summary of the changes within a patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PatchStats {
    /// Number of added lines.
    pub additions: u32,
    /// Number of removed lines.
    pub deletions: u32,
}

impl PatchStats {
    /// A stats instance with zero additions and deletions.
    pub const ZERO: Self = Self {
        additions: 0,
        deletions: 0,
    };

    /// Convenience constructor for explicit values.
    pub const fn new(additions: u32, deletions: u32) -> Self {
        Self {
            additions,
            deletions,
        }
    }

    /// Combine two stats structs.
    pub const fn add(self, other: Self) -> Self {
        Self {
            additions: self.additions + other.additions,
            deletions: self.deletions + other.deletions,
        }
    }
}

/// A contiguous set of changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchHunk {
    /// Line ranges covered by the hunk on both sides.
    pub header: PatchRange,
    /// Line-level changes inside the hunk.
    #[serde(default)]
    pub lines: Vec<PatchLine>,
}

/// The line number ranges referenced by a hunk header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchRange {
    /// Starting line number on the older side.
    pub old_start: u32,
    /// Number of lines covered on the older side.
    pub old_lines: u32,
    /// Starting line number on the newer side.
    pub new_start: u32,
    /// Number of lines covered on the newer side.
    pub new_lines: u32,
}

impl fmt::Display for PatchRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "@@ -{} +{} @@",
            Span(self.old_start, self.old_lines),
            Span(self.new_start, self.new_lines)
        )
    }
}

struct Span(u32, u32);

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.1 {
            1 => write!(f, "{}", self.0),
            lines => write!(f, "{},{lines}", self.0),
        }
    }
}

/// A single line within a patch hunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchLine {
    /// The role the line plays in the hunk.
    pub kind: PatchLineKind,
    /// Raw text of the line without its line terminator.
    pub text: String,
}

impl PatchLine {
    /// Convenience constructor.
    pub fn new(kind: PatchLineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

impl fmt::Display for PatchLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            PatchLineKind::NoNewlineAtEof => f.write_str(NO_NEWLINE_AT_EOF),
            kind => write!(f, "{}{}", kind.prefix(), self.text),
        }
    }
}

const NO_NEWLINE_AT_EOF: &str = "\\ No newline at end of file";

/// Type of a line contained in a patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatchLineKind {
    /// Unchanged context line.
    Context,
    /// A newly added line.
    Addition,
    /// A deleted line.
    Deletion,
    /// The preceding line has no terminating newline.
    NoNewlineAtEof,
}

impl PatchLineKind {
    /// Unified diff prefix character for the line kind.
    pub const fn prefix(self) -> char {
        match self {
            Self::Context => ' ',
            Self::Addition => '+',
            Self::Deletion => '-',
            Self::NoNewlineAtEof => '\\',
        }
    }
}
