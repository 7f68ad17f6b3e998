use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Looks for missing and outdated translations.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "indiff",
    version,
    about = "Looks for missing and outdated translations",
    long_about = "Compares documentation files written in a base language with their \
    translations. Reports base files without a translation and, using git history, \
    translations left behind by changes to their base file."
)]
pub struct Cli {
    /// Comma separated language codes, e.g. `en,de,fr`
    #[arg(value_name = "LANGUAGES", value_delimiter = ',')]
    pub languages: Vec<String>,

    /// Base language against which the other languages are compared [default: first language]
    #[arg(short = 'b', long = "baselang", value_name = "CODE")]
    pub baselang: Option<String>,

    /// Glob identifying language files; `%l` is the language code (required), `%e` the
    /// extensions. Predefined: SUB, EXT [default: SUB]
    #[arg(short = 'g', long, value_name = "PATTERN")]
    pub glob: Option<String>,

    /// Working directory [default: current directory]
    #[arg(short = 'd', long, value_name = "PATH")]
    pub directory: Option<PathBuf>,

    /// File extensions substituted for `%e` [default: any]
    #[arg(short = 'e', long, value_name = "EXT", value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// Do not use git
    #[arg(long)]
    pub no_git: bool,

    /// Revision changes are calculated from [default: HEAD]
    #[arg(short = 'f', long, value_name = "REV")]
    pub from_revision: Option<String>,

    /// Revision changes are calculated to [default: changes in worktree]
    #[arg(short = 't', long, value_name = "REV")]
    pub to_revision: Option<String>,

    /// Print absolute paths
    #[arg(short = 'a', long)]
    pub absolute_paths: bool,

    /// Print the diff of each modified file
    #[arg(short = 'i', long)]
    pub show_diff: bool,

    /// Output format: plain or json [default: plain]
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// List predefined glob patterns and exit
    #[arg(long)]
    pub list_patterns: bool,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
