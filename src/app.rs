//! Application orchestrator.
//! Handles --print-config, initializes logging, runs the selected subcommand
//! and logs typed failures with their code.

use anyhow::{Result, bail};
use tracing::{debug, error, info};

use fileutils::cli::{Args, Command};
use fileutils::config::{ATTEMPTS_ENV, SETTLE_MS_ENV, StabilityBounds};
use fileutils::output as out;
use fileutils::{FileUtilsError, csv_to_rows, guarded_copy, list_files, list_files_recursive, move_path};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle --print-config before logging init
    if args.print_config {
        print_config();
        return Ok(());
    }

    let Some(command) = args.command.clone() else {
        bail!("no command given; run with --help to see the available commands");
    };

    let level = args.effective_log_level();
    let guard = init_tracing(&level, args.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {}", e));
        e
    })?;

    debug!("Starting fileutils: {:?}", args);
    let result = run_command(&command);
    if let Err(e) = &result {
        log_failure(e);
    }

    // Flush the file appender before exit
    drop(guard);
    result.map_err(Into::into)
}

fn run_command(command: &Command) -> fileutils::Result<()> {
    match command {
        Command::List {
            dir,
            prefix,
            suffix,
            recursive,
        } => {
            if *recursive {
                for p in list_files_recursive(dir, prefix, suffix)? {
                    out::print_user(&p.display().to_string());
                }
            } else {
                for name in list_files(dir, prefix, suffix)? {
                    out::print_user(&name);
                }
            }
        }
        Command::Copy { src, dst, .. } => {
            let cfg = command.copy_config().unwrap_or_default();
            debug!(?cfg, "copy settings");
            let res = guarded_copy(src, dst, &cfg)?;
            out::print_success(&format!(
                "Copied '{}' -> '{}' ({} bytes)",
                src.display(),
                dst.display(),
                res.bytes
            ));
        }
        Command::Move { src, dst } => {
            move_path(src, dst)?;
            out::print_success(&format!("Moved '{}' -> '{}'", src.display(), dst.display()));
        }
        Command::Csv { file, delimiter } => {
            // The CLI parser only admits ASCII delimiters.
            let rows = csv_to_rows(file, *delimiter as u8)?;
            for row in &rows {
                match serde_json::to_string(row) {
                    Ok(line) => out::print_user(&line),
                    Err(e) => error!(error = %e, "failed to encode row as JSON"),
                }
            }
            info!(file = %file.display(), rows = rows.len(), "CSV decoded");
        }
    }
    Ok(())
}

fn log_failure(e: &FileUtilsError) {
    let code = e.code();
    match e {
        FileUtilsError::Io { op, path, .. } => {
            error!(code, kind = "io", op = *op, path = %path.display(), error = %e, "Operation failed")
        }
        FileUtilsError::NotStable { path } => {
            error!(code, kind = "not_stable", path = %path.display(), "Source kept changing; copy skipped")
        }
        FileUtilsError::Csv { path, source } => {
            error!(code, kind = "csv", path = %path.display(), error = %source, "CSV decode failed")
        }
        FileUtilsError::DurabilityNotGuaranteed { path, source } => {
            error!(code, kind = "durability", path = %path.display(), error = %source, "Sync to stable storage failed")
        }
    }
}

fn print_config() {
    let bounds = StabilityBounds::from_env();
    out::print_info(&format!(
        "Copy stability: {} attempts, {} ms settle (worst case {} ms)",
        bounds.attempts,
        bounds.settle.as_millis(),
        bounds.worst_case().as_millis()
    ));
    for key in [ATTEMPTS_ENV, SETTLE_MS_ENV] {
        match std::env::var(key) {
            Ok(v) => out::print_info(&format!("  {key}={v}")),
            Err(_) => out::print_info(&format!("  {key} (unset)")),
        }
    }
}
