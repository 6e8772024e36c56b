use std::fs;
use std::fs::OpenOptions;

use anyhow::Context;
use anyhow::Result;
use bookmark_term::Config;
use bookmark_term::ConfigKey;
use log::LevelFilter;

pub const LOG_LEVELS: [&str; 7] = ["silent", "off", "error", "warn", "info", "debug", "trace"];

pub fn level_filter(level: &str) -> LevelFilter {
    match level {
        "silent" | "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Warn,
    }
}

/// Installs the logger. While the browser owns the terminal, records go to the
/// configured log file instead of stderr.
pub fn init(to_file: bool) -> Result<()> {
    let level = level_filter(&Config::get(ConfigKey::LogLevel));
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);

    if to_file && level != LevelFilter::Off {
        let path = Config::log_file_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;

        builder.target(env_logger::Target::Pipe(Box::new(log_file)));
    }

    builder.try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_maps_log_levels() {
        assert_eq!(level_filter("silent"), LevelFilter::Off);
        assert_eq!(level_filter("off"), LevelFilter::Off);
        assert_eq!(level_filter("debug"), LevelFilter::Debug);
        assert_eq!(level_filter("warn"), LevelFilter::Warn);
        assert_eq!(level_filter(""), LevelFilter::Warn);
    }
}
