//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - --debug is a shorthand for --log-level debug and wins over it.
//! - copy flags override the environment and go through the same validation.

use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use crate::config::types::{CopyConfig, LogLevel, StabilityBounds};
use crate::csv_rows::is_reserved_delimiter;
use crate::fs_ops::DurabilityMode;

/// CLI wrapper for the fileutils library.
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "List, copy (once stable), move files and decode CSV"
)]
pub struct Args {
    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        global = true,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, global = true, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Emit logs in structured JSON.
    #[arg(long, global = true, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Also append logs to this file.
    #[arg(long, global = true, value_hint = ValueHint::FilePath, help = "Append logs to this file")]
    pub log_file: Option<PathBuf>,

    /// Print the effective stability bounds and the environment variables consulted, then exit.
    #[arg(long, help = "Print effective copy stability settings and exit")]
    pub print_config: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List entries whose name starts with PREFIX and ends with SUFFIX.
    List {
        #[arg(value_name = "DIR", value_hint = ValueHint::DirPath)]
        dir: PathBuf,
        #[arg(long, default_value = "")]
        prefix: String,
        #[arg(long, default_value = "")]
        suffix: String,
        /// Walk the whole tree and print full paths.
        #[arg(short = 'r', long)]
        recursive: bool,
    },
    /// Copy SRC to DST once SRC stops growing.
    Copy {
        #[arg(value_name = "SRC", value_hint = ValueHint::FilePath)]
        src: PathBuf,
        #[arg(value_name = "DST", value_hint = ValueHint::FilePath)]
        dst: PathBuf,
        /// Number of size samples (3-20; otherwise the default).
        #[arg(long, allow_negative_numbers = true)]
        attempts: Option<i64>,
        /// Milliseconds between samples (100-1000; otherwise the default).
        #[arg(long, allow_negative_numbers = true)]
        settle_ms: Option<i64>,
        /// Skip the final sync to stable storage.
        #[arg(long)]
        no_sync: bool,
    },
    /// Rename SRC to DST (same filesystem only).
    Move {
        #[arg(value_name = "SRC", value_hint = ValueHint::AnyPath)]
        src: PathBuf,
        #[arg(value_name = "DST", value_hint = ValueHint::AnyPath)]
        dst: PathBuf,
    },
    /// Decode a CSV file with a header row and print one JSON object per row.
    Csv {
        #[arg(value_name = "FILE", value_hint = ValueHint::FilePath)]
        file: PathBuf,
        #[arg(long, default_value_t = ',', value_parser = parse_delimiter)]
        delimiter: char,
    },
}

fn parse_delimiter(s: &str) -> Result<char, String> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() && is_reserved_delimiter(c as u8) => {
            Err(format!("delimiter cannot be a quote or line break: {c:?}"))
        }
        (Some(c), None) if c.is_ascii() => Ok(c),
        (Some(_), None) => Err(format!("delimiter must be a single ASCII character: '{s}'")),
        _ => Err(format!("delimiter must be exactly one character: '{s}'")),
    }
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > default.
    pub fn effective_log_level(&self) -> LogLevel {
        if self.debug {
            return LogLevel::Debug;
        }
        self.log_level
            .as_deref()
            .and_then(LogLevel::parse)
            .unwrap_or_default()
    }
}

impl Command {
    /// Copy settings: environment first, then any flags given on the command line.
    /// Returns None for non-copy commands.
    pub fn copy_config(&self) -> Option<CopyConfig> {
        let Command::Copy {
            attempts,
            settle_ms,
            no_sync,
            ..
        } = self
        else {
            return None;
        };
        let mut bounds = StabilityBounds::from_env();
        if let Some(n) = attempts {
            bounds = bounds.with_attempts(*n);
        }
        if let Some(ms) = settle_ms {
            bounds = bounds.with_settle_ms(*ms);
        }
        let mut cfg = CopyConfig::new(bounds);
        if *no_sync {
            cfg.durability = DurabilityMode::Data;
        }
        Some(cfg)
    }
}

pub fn parse() -> Args {
    Args::parse()
}
