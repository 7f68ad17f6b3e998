//! Optional `indiff.toml` defaults merged with command line values.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

/// File name looked up in the current directory.
pub const CONFIG_FILE: &str = "indiff.toml";
/// Environment variable overriding the configured output format.
pub const FORMAT_ENV: &str = "INDIFF_FORMAT";

const DEFAULT_GLOB: &str = "SUB";
const DEFAULT_FORMAT: &str = "plain";

/// Settings read from `indiff.toml`; every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub baselang: Option<String>,
    #[serde(default)]
    pub glob: Option<String>,
    #[serde(default)]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub no_git: bool,
    #[serde(default)]
    pub from_revision: Option<String>,
    #[serde(default)]
    pub to_revision: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
}

impl FileConfig {
    /// Load `indiff.toml` from `dir`, or defaults when the file does not exist.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_toml(&data)
            .with_context(|| format!("invalid config file: {}", path.display()))
    }

    fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse TOML config")
    }
}

/// Environment overrides for the configuration file.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    format: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            format: env::var(FORMAT_ENV).ok().filter(|value| !value.is_empty()),
        }
    }
}

/// Effective settings of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub languages: Vec<String>,
    pub baselang: Option<String>,
    pub glob: String,
    pub directory: PathBuf,
    pub extensions: Vec<String>,
    pub no_git: bool,
    pub from_revision: Option<String>,
    pub to_revision: Option<String>,
    pub absolute_paths: bool,
    pub show_diff: bool,
    pub format: String,
}

impl Settings {
    /// Command line first, then environment (format only), then file, then defaults.
    pub fn resolve(cli: Cli, file: FileConfig, env: EnvOverrides) -> Self {
        Self {
            languages: non_empty_or(cli.languages, file.languages),
            baselang: cli.baselang.or(file.baselang),
            glob: cli
                .glob
                .or(file.glob)
                .unwrap_or_else(|| DEFAULT_GLOB.to_owned()),
            directory: cli.directory.unwrap_or_else(|| PathBuf::from(".")),
            extensions: non_empty_or(cli.extensions, file.extensions),
            no_git: cli.no_git || file.no_git,
            from_revision: cli.from_revision.or(file.from_revision),
            to_revision: cli.to_revision.or(file.to_revision),
            absolute_paths: cli.absolute_paths,
            show_diff: cli.show_diff,
            format: cli
                .format
                .or(env.format)
                .or(file.format)
                .unwrap_or_else(|| DEFAULT_FORMAT.to_owned()),
        }
    }
}

fn non_empty_or(primary: Vec<String>, fallback: Vec<String>) -> Vec<String> {
    if primary.is_empty() {
        fallback
    } else {
        primary
    }
}
