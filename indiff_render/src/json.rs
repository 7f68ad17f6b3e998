use std::io::Write;

use indiff_api::{Diff, LanguageFile, Report};
use indiff_render_api::{RenderError, RenderOptions, RenderResult, Renderer};

/// The whole report as pretty-printed JSON.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn id(&self) -> &'static str {
        "json"
    }

    fn label(&self) -> &'static str {
        "JSON document"
    }

    fn render(
        &self,
        report: &Report,
        options: &RenderOptions,
        out: &mut dyn Write,
    ) -> RenderResult<()> {
        let report = displayed(report, options);
        serde_json::to_writer_pretty(&mut *out, &report)
            .map_err(|err| RenderError::message(format!("failed to encode report: {err}")))?;
        writeln!(out)?;
        Ok(())
    }
}

/// Copy of `report` with paths rewritten for display; patches are dropped
/// unless requested.
fn displayed(report: &Report, options: &RenderOptions) -> Report {
    let mut report = report.clone();
    let rewrite = |file: &mut LanguageFile| file.path = options.display_path(&file.path);

    for diff in &mut report.diffs {
        match diff {
            Diff::Missing { base, .. } => rewrite(base),
            Diff::ModifiedBase { base, translation } => {
                rewrite(&mut base.file);
                rewrite(translation);
                if !options.show_patches {
                    base.patch = None;
                }
            }
            Diff::ModifiedBoth { base, translation } => {
                rewrite(&mut base.file);
                rewrite(&mut translation.file);
                if !options.show_patches {
                    base.patch = None;
                    translation.patch = None;
                }
            }
            _ => {}
        }
    }
    for skipped in &mut report.skipped {
        rewrite(&mut skipped.base);
        if let Some(translation) = skipped.translation.as_mut() {
            rewrite(translation);
        }
    }
    report
}
