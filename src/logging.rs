use std::{
    io::{Result as IoResult, Write},
    path::Path,
};

use eyre::{Context as _, Result};
use flexi_logger::{
    Age, Cleanup, Criterion, DeferredNow, Duplicate, FileSpec, Logger, LoggerHandle, Naming,
};
use log::Record;
use once_cell::sync::OnceCell;
use time::{format_description::FormatItem, macros::format_description};

/// Used when `RUST_LOG` is not set
const DEFAULT_LOG_SPEC: &str = "kart_leaderboard=debug";
const LOG_BASENAME: &str = "kart-leaderboard";

const LOG_DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

static LOGGER: OnceCell<LoggerHandle> = OnceCell::new();

/// Log into daily rotated files inside `dir` and mirror info and above to stdout.
pub fn initialize(dir: &Path) -> Result<()> {
    let logger_handle = Logger::try_with_env_or_str(DEFAULT_LOG_SPEC)
        .context("invalid log specification")?
        .log_to_file(file_spec(dir))
        .format(log_format)
        .format_for_files(log_format_files)
        .rotate(
            Criterion::Age(Age::Day),
            Naming::Timestamps,
            Cleanup::KeepLogAndCompressedFiles(5, 20),
        )
        .duplicate_to_stdout(Duplicate::Info)
        .start()
        .with_context(|| format!("failed to start logging into {dir:?}"))?;

    let _ = LOGGER.set(logger_handle);

    Ok(())
}

fn file_spec(dir: &Path) -> FileSpec {
    FileSpec::default()
        .directory(dir)
        .basename(LOG_BASENAME)
        .suppress_timestamp()
}

fn log_format(w: &mut dyn Write, now: &mut DeferredNow, record: &Record<'_>) -> IoResult<()> {
    write!(
        w,
        "[{}] {} {}",
        now.format(LOG_DATE_FORMAT),
        record.level(),
        &record.args()
    )
}

fn log_format_files(w: &mut dyn Write, now: &mut DeferredNow, record: &Record<'_>) -> IoResult<()> {
    write!(
        w,
        "[{}] {:^5} [{}:{}] {}",
        now.format(LOG_DATE_FORMAT),
        record.level(),
        record.module_path().unwrap_or_else(|| record.target()),
        record.line().unwrap_or(0),
        &record.args()
    )
}
