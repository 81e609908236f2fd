//! Logger initialization (console + file)

use anyhow::Result;
use simplelog::*;
use std::fs::OpenOptions;
use std::path::Path;
use std::str::FromStr;

/// Parses a level name such as `info` or `debug`, falling back to `Info`.
pub fn parse_level(level: &str) -> LevelFilter {
    LevelFilter::from_str(level.trim()).unwrap_or(LevelFilter::Info)
}

/// Initialize logger for both console and file output
///
/// # Arguments
/// * `log_file_path` - Path to the log file (appended to, created if missing)
/// * `level` - Level name, see [`parse_level`]
///
/// # Returns
/// * `Ok(())` - Logger initialized successfully
/// * `Err(anyhow::Error)` - Failed to open the file or a logger is already installed
pub fn init_logger(log_file_path: &Path, level: &str) -> Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)
        .map_err(|e| anyhow::anyhow!("Failed to open log file {}: {}", log_file_path.display(), e))?;

    let level = parse_level(level);

    CombinedLogger::init(vec![
        TermLogger::new(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto),
        WriteLogger::new(level, Config::default(), log_file),
    ])
    .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}
