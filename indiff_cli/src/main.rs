mod cli;
mod config;
mod logging;

use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use clap::Parser;
use indiff_core::audit::{self, AuditOptions};
use indiff_core::pattern::Pattern;
use indiff_core::revision::RevisionSpec;
use indiff_render_api::RenderOptions;
use tracing::debug;

use crate::cli::Cli;
use crate::config::{EnvOverrides, FileConfig, Settings};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if cli.list_patterns {
        return list_patterns();
    }

    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let file = FileConfig::load(&cwd)?;
    let settings = Settings::resolve(cli, file, EnvOverrides::from_env());
    debug!(?settings, "resolved settings");
    run(settings)
}

fn run(settings: Settings) -> Result<()> {
    if settings.languages.is_empty() {
        bail!("missing required argument: LANGUAGES");
    }

    let registry = indiff_render::default_registry();
    let renderer = registry.get(&settings.format).with_context(|| {
        format!(
            "invalid argument: format: '{}' is not one of {}",
            settings.format,
            registry.ids().join(", ")
        )
    })?;

    let root = audit::canonical_root(&settings.directory).context("invalid argument: directory")?;
    let pattern =
        Pattern::parse(&settings.glob, &settings.extensions).context("invalid argument: glob")?;

    let mut options = AuditOptions::new(root.clone(), settings.languages, pattern);
    options.base_lang = settings.baselang;
    options.use_git = !settings.no_git;
    options.revisions = RevisionSpec::new(settings.from_revision, settings.to_revision);
    options.include_patches = settings.show_diff;

    let report = audit::run(&options)?;

    let render_options = RenderOptions {
        root: root.into_string(),
        relative_paths: !settings.absolute_paths,
        show_patches: settings.show_diff,
    };
    let mut out = io::stdout().lock();
    renderer.render(&report, &render_options, &mut out)?;
    out.flush()?;
    Ok(())
}

fn list_patterns() -> Result<()> {
    let mut out = io::stdout().lock();
    for predefined in Pattern::predefined() {
        writeln!(
            out,
            "{}: {} ({})",
            predefined.name, predefined.description, predefined.pattern
        )?;
    }
    Ok(())
}
