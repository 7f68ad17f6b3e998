use indiff_api::{Diff, LanguageFile, Modification, Report, SkippedPair};
use indiff_render::default_registry;
use indiff_render_api::RenderOptions;

fn report() -> Report {
    let mut report = Report::from(vec![
        Diff::missing(LanguageFile::new("/site/docs/en/b.md", "en"), "sk"),
        Diff::modified_both(
            Modification::new(LanguageFile::new("/site/docs/en/a.md", "en"), None),
            Modification::new(LanguageFile::new("/site/docs/sk/a.md", "sk"), None),
        ),
    ]);
    report.skipped.push(SkippedPair::new(
        LanguageFile::new("/site/docs/en/c.md", "en"),
        None,
        "unreadable",
    ));
    report
}

fn render(id: &str, options: &RenderOptions) -> String {
    let registry = default_registry();
    let renderer = registry.get(id).expect("registered renderer");
    let mut out = Vec::new();
    renderer
        .render(&report(), options, &mut out)
        .expect("render");
    String::from_utf8(out).expect("utf8")
}

#[test]
fn plain_output_through_registry() {
    let output = render("plain", &RenderOptions::new("/site/docs"));
    assert_eq!(
        output,
        "sk: missing translation of: en/b.md\n\
         sk: modified base and translation: en/a.md: sk/a.md\n\
         en: unable to compare: en/c.md: : unreadable\n"
    );
}

#[test]
fn patches_without_content_are_marked() {
    let options = RenderOptions {
        show_patches: true,
        ..RenderOptions::new("/site/docs")
    };
    let output = render("plain", &options);
    assert!(output.contains("diff en/a.md\n<no content>\ndiff sk/a.md\n<no content>\n"));
}

#[test]
fn paths_outside_root_stay_absolute() {
    let output = render("plain", &RenderOptions::new("/other"));
    assert!(output.starts_with("sk: missing translation of: /site/docs/en/b.md\n"));
}

#[test]
fn json_output_round_trips() {
    let output = render("json", &RenderOptions::new("/site/docs"));
    let decoded: Report = serde_json::from_str(&output).expect("valid report json");
    assert_eq!(decoded.diffs.len(), 2);
    assert_eq!(decoded.diffs[0].base().path, "en/b.md");
    assert_eq!(decoded.skipped[0].reason, "unreadable");
}
