//! CLI argument definitions using clap derive

use crate::config::DictionaryKind;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// dictcache - Cache-backed dictionary loader
///
/// Loads word lists and character tables from bundled resources or from
/// files inside the working directory or $DICTCACHE_HOME.
#[derive(Parser, Debug)]
#[command(name = "dictcache")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "DICTCACHE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Home root for dictionary files (overrides $DICTCACHE_HOME)
    #[arg(long, global = true)]
    pub home: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a dictionary, or every configured dictionary
    Load(LoadArgs),

    /// Check whether a path is inside an authorized root
    Check(CheckArgs),

    /// List bundled dictionaries
    Resources,

    /// Show or edit configuration
    Config(ConfigArgs),
}

/// Arguments for the load command
#[derive(Parser, Debug)]
pub struct LoadArgs {
    /// Logical path of a bundled dictionary
    #[arg(short, long, conflicts_with = "file")]
    pub resource: Option<String>,

    /// Dictionary file to load
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// How lines are accumulated
    #[arg(short, long, default_value = "word-set")]
    pub kind: DictionaryKind,

    /// Name used in log messages (defaults to the path)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Output format
    #[arg(long, default_value = "summary")]
    pub format: OutputFormat,
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Path to check
    pub path: PathBuf,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., sandbox.home)
        key: String,
        /// Value to set
        value: String,
    },
}

/// Output format options
#[derive(ValueEnum, Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Name, kind and entry count
    #[default]
    Summary,
    /// JSON output
    Json,
    /// Entries, one per line
    Plain,
}
