//! Command line definition and the runtime configuration resolved from it.
//! Everything is resolved once in `main` and handed down explicitly.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::db::{data_dir, default_db_path};

/// Log file name inside the application data directory.
const LOG_FILE_NAME: &str = "feihua.log";

#[derive(Debug, Parser)]
#[command(
    name = "feihua",
    version,
    about = "Keep, search and browse a personal collection of poems"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// SQLite database file (default: ~/.feihua/poems.sqlite).
    #[arg(long, value_name = "PATH", env = "FEIHUA_DB", global = true)]
    pub db: Option<PathBuf>,

    /// Write logs to this file. The terminal UI always logs to a file
    /// (default: ~/.feihua/feihua.log); other commands log to stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open the interactive terminal browser (the default).
    Tui,
    /// Print poems matching a search rule.
    List(ListArgs),
    /// Print one poem in full.
    Show(ShowArgs),
    /// Replace the collection with a JSON dataset.
    Import {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Write the collection to a JSON dataset.
    Export {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Search rule, e.g. `t静夜 a李白 明月`.
    #[arg(value_name = "RULE")]
    pub rule: Vec<String>,

    /// Only show favorites.
    #[arg(long, short)]
    pub favorites: bool,

    /// Print highlighted previews under each match.
    #[arg(long, short)]
    pub preview: bool,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    #[arg(value_name = "ID")]
    pub id: i64,

    /// Keywords to highlight.
    #[arg(value_name = "RULE")]
    pub rule: Vec<String>,
}

/// Where log output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// Settings resolved at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub log_target: LogTarget,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let db_path = match &cli.db {
            Some(path) => path.clone(),
            None => default_db_path()?,
        };

        let interactive = matches!(cli.command, None | Some(Command::Tui));
        let log_target = match &cli.log_file {
            Some(path) => LogTarget::File(path.clone()),
            None if interactive => LogTarget::File(data_dir()?.join(LOG_FILE_NAME)),
            None => LogTarget::Stderr,
        };

        Ok(Self {
            db_path,
            log_target,
        })
    }
}
