use std::io::Write;

use indiff_api::{Diff, LanguageFile, Patch, Report, SkippedPair};
use indiff_render_api::{RenderOptions, RenderResult, Renderer};

const NO_CONTENT: &str = "<no content>";

/// One line per difference, optionally followed by patches.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainRenderer;

impl Renderer for PlainRenderer {
    fn id(&self) -> &'static str {
        "plain"
    }

    fn label(&self) -> &'static str {
        "Plain text, one line per difference"
    }

    fn render(
        &self,
        report: &Report,
        options: &RenderOptions,
        out: &mut dyn Write,
    ) -> RenderResult<()> {
        for diff in &report.diffs {
            render_diff(diff, options, out)?;
        }
        for skipped in &report.skipped {
            render_skipped(skipped, options, out)?;
        }
        Ok(())
    }
}

fn render_diff(diff: &Diff, options: &RenderOptions, out: &mut dyn Write) -> RenderResult<()> {
    let path = |file: &LanguageFile| options.display_path(&file.path);

    match diff {
        Diff::Missing { base, lang } => {
            writeln!(out, "{lang}: missing translation of: {}", path(base))?;
        }
        Diff::ModifiedBase { base, translation } => {
            writeln!(
                out,
                "{}: modified only base: {}: {}",
                diff.lang(),
                path(&base.file),
                path(translation)
            )?;
            render_patch(&base.file, base.patch.as_ref(), options, out)?;
        }
        Diff::ModifiedBoth { base, translation } => {
            writeln!(
                out,
                "{}: modified base and translation: {}: {}",
                diff.lang(),
                path(&base.file),
                path(&translation.file)
            )?;
            render_patch(&base.file, base.patch.as_ref(), options, out)?;
            render_patch(&translation.file, translation.patch.as_ref(), options, out)?;
        }
        _ => {
            let translation = diff.translation().map(path).unwrap_or_default();
            writeln!(
                out,
                "{}: unknown difference: {}: {translation}",
                diff.lang(),
                path(diff.base())
            )?;
        }
    }
    Ok(())
}

fn render_patch(
    file: &LanguageFile,
    patch: Option<&Patch>,
    options: &RenderOptions,
    out: &mut dyn Write,
) -> RenderResult<()> {
    if !options.show_patches {
        return Ok(());
    }
    let body = patch
        .filter(|patch| !patch.is_empty())
        .map_or_else(|| NO_CONTENT.to_owned(), ToString::to_string);
    writeln!(out, "diff {}\n{body}", options.display_path(&file.path))?;
    Ok(())
}

fn render_skipped(
    skipped: &SkippedPair,
    options: &RenderOptions,
    out: &mut dyn Write,
) -> RenderResult<()> {
    let translation = skipped
        .translation
        .as_ref()
        .map(|file| options.display_path(&file.path))
        .unwrap_or_default();
    writeln!(
        out,
        "{}: unable to compare: {}: {translation}: {}",
        skipped.lang(),
        options.display_path(&skipped.base.path),
        skipped.reason
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use indiff_api::{Modification, PatchHunk, PatchLine, PatchLineKind, PatchRange};

    use super::*;

    fn file(path: &str, lang: &str) -> LanguageFile {
        LanguageFile::new(path, lang)
    }

    fn patch() -> Patch {
        Patch::new(vec![PatchHunk {
            header: PatchRange {
                old_start: 1,
                old_lines: 1,
                new_start: 1,
                new_lines: 1,
            },
            lines: vec![
                PatchLine::new(PatchLineKind::Deletion, "old"),
                PatchLine::new(PatchLineKind::Addition, "new"),
            ],
        }])
    }

    fn report() -> Report {
        Report::from(vec![
            Diff::missing(file("/docs/en/second.md", "en"), "de"),
            Diff::modified_base(
                Modification::new(file("/docs/en/first.md", "en"), Some(patch())),
                file("/docs/de/first.md", "de"),
            ),
            Diff::modified_both(
                Modification::new(file("/docs/en/third.md", "en"), Some(patch())),
                Modification::new(file("/docs/fr/third.md", "fr"), None),
            ),
        ])
    }

    fn render(report: &Report, options: &RenderOptions) -> String {
        let mut out = Vec::new();
        PlainRenderer
            .render(report, options, &mut out)
            .expect("render");
        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn prints_one_line_per_diff() {
        let output = render(&report(), &RenderOptions::new("/docs"));
        assert_eq!(
            output,
            "de: missing translation of: en/second.md\n\
             de: modified only base: en/first.md: de/first.md\n\
             fr: modified base and translation: en/third.md: fr/third.md\n"
        );
    }

    #[test]
    fn prints_absolute_paths_on_request() {
        let options = RenderOptions {
            relative_paths: false,
            ..RenderOptions::new("/docs")
        };
        let output = render(&report(), &options);
        assert!(output.starts_with("de: missing translation of: /docs/en/second.md\n"));
    }

    #[test]
    fn prints_patches_on_request() {
        let options = RenderOptions {
            show_patches: true,
            ..RenderOptions::new("/docs")
        };
        let output = render(&report(), &options);
        assert_eq!(
            output,
            "de: missing translation of: en/second.md\n\
             de: modified only base: en/first.md: de/first.md\n\
             diff en/first.md\n\
             @@ -1 +1 @@\n\
             -old\n\
             +new\n\
             fr: modified base and translation: en/third.md: fr/third.md\n\
             diff en/third.md\n\
             @@ -1 +1 @@\n\
             -old\n\
             +new\n\
             diff fr/third.md\n\
             <no content>\n"
        );
    }

    #[test]
    fn prints_skipped_pairs_last() {
        let mut report = Report::new();
        report.skipped.push(SkippedPair::new(
            file("/docs/en/a.md", "en"),
            Some(file("/docs/de/a.md", "de")),
            "de/a.md does not exist in HEAD",
        ));
        let output = render(&report, &RenderOptions::new("/docs"));
        assert_eq!(
            output,
            "de: unable to compare: en/a.md: de/a.md: de/a.md does not exist in HEAD\n"
        );
    }

    #[test]
    fn empty_report_prints_nothing() {
        assert!(render(&Report::new(), &RenderOptions::new("/docs")).is_empty());
    }
}
