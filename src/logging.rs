//! Logging setup for the editor core.
//!
//! The core only emits through the `log` facade. Hosts that do not install
//! their own logger can call [`init_logging`] to get an `env_logger` backend
//! with timestamped lines in the same shape the desktop app writes:
//! `[2024-01-01 12:00:00.000] [INFO] [studio_editor::editor::session] message`.

use std::io::Write;

use chrono::Local;
use log::LevelFilter;

use crate::error::{EditorError, EditorResult};

/// Install the global logger.
///
/// `default_level` applies when `RUST_LOG` is not set. Fails if a logger was
/// already installed for this process.
pub fn init_logging(default_level: LevelFilter) -> EditorResult<()> {
    let env = env_logger::Env::default().default_filter_or(default_level.as_str());

    env_logger::Builder::from_env(env)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}] [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init()
        .map_err(|e| EditorError::Logging(format!("Failed to install logger: {}", e)))?;

    log::info!("[LOGGING] Logging system initialized ({})", default_level);
    Ok(())
}

/// Map a frontend level name onto a `log` level. Unknown names map to Info.
pub fn parse_level(level: &str) -> log::Level {
    match level.to_lowercase().as_str() {
        "trace" => log::Level::Trace,
        "debug" => log::Level::Debug,
        "warn" | "warning" => log::Level::Warn,
        "error" => log::Level::Error,
        _ => log::Level::Info,
    }
}

/// Forward a log line produced by the web UI into the same log stream.
pub fn write_log(level: &str, source: &str, message: &str) {
    log::log!(target: "frontend", parse_level(level), "[{}] {}", source, message);
}
