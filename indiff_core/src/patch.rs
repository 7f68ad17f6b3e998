//! Line-level patches computed from raw before/after content.
//!
//! Content comes from in-memory buffers rather than from the repository's
//! own diff machinery, so committed revisions and the working copy go
//! through the same path.

use git2::{DiffOptions, Patch as GitPatch};

use crate::{Patch, PatchHunk, PatchLine, PatchLineKind, PatchRange};

const CONTEXT_LINES: u32 = 3;

/// Compute the patch turning `before` into `after`.
///
/// # Errors
///
/// Returns the libgit2 error raised while diffing the buffers.
pub fn compute(before: &str, after: &str) -> Result<Patch, git2::Error> {
    let mut options = DiffOptions::new();
    options.context_lines(CONTEXT_LINES).force_text(true);

    let patch = GitPatch::from_buffers(
        before.as_bytes(),
        None,
        after.as_bytes(),
        None,
        Some(&mut options),
    )?;

    let mut hunks = Vec::with_capacity(patch.num_hunks());
    for hunk_index in 0..patch.num_hunks() {
        let (hunk, line_count) = patch.hunk(hunk_index)?;
        let header = PatchRange {
            old_start: hunk.old_start(),
            old_lines: hunk.old_lines(),
            new_start: hunk.new_start(),
            new_lines: hunk.new_lines(),
        };

        let mut lines = Vec::with_capacity(line_count);
        for line_index in 0..line_count {
            let line = patch.line_in_hunk(hunk_index, line_index)?;
            let kind = match line.origin() {
                ' ' => PatchLineKind::Context,
                '+' => PatchLineKind::Addition,
                '-' => PatchLineKind::Deletion,
                '=' | '>' | '<' => {
                    lines.push(PatchLine::new(PatchLineKind::NoNewlineAtEof, ""));
                    continue;
                }
                _ => continue,
            };
            let text = String::from_utf8_lossy(line.content());
            lines.push(PatchLine::new(
                kind,
                text.trim_end_matches(['\n', '\r']).to_owned(),
            ));
        }

        hunks.push(PatchHunk { header, lines });
    }

    Ok(Patch::new(hunks))
}
