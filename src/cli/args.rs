//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

/// Course scaffolding generator: materializes phase/module/lesson trees from an outline
#[derive(Parser, Debug)]
#[command(name = "coursegen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d, -dd, -ddd)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    /// Project directory (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    /// Without a subcommand, `generate` runs with its defaults
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Materialize the course tree (default)
    Generate(GenerateArgs),

    /// Show the outline as a tree
    Plan {
        #[command(flatten)]
        source: OutlineArgs,
    },

    /// Compare a generated tree with its outline
    Check {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Outline selection
#[derive(Args, Debug, Default, Clone)]
pub struct OutlineArgs {
    /// Outline file (TOML) instead of the built-in course
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub outline: Option<PathBuf>,
}

/// Output root plus outline selection
#[derive(Args, Debug, Default, Clone)]
pub struct TargetArgs {
    /// Root directory of the generated tree
    #[arg(short, long, value_hint = ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub source: OutlineArgs,
}

#[derive(Args, Debug, Default, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Print the planned operations without touching the filesystem
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Print config template
    Init,

    /// Show config paths
    Path,
}
