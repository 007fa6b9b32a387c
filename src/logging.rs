use anyhow::Context;
use flexi_logger::{FileSpec, Logger, LoggerHandle};
use std::path::Path;

#[cfg(debug_assertions)]
const DEFAULT_LOG_LEVEL: &str = "debug";

#[cfg(not(debug_assertions))]
const DEFAULT_LOG_LEVEL: &str = "info";

/// Start logging to `log_file`, appending to any earlier runs' messages.
///
/// The terminal belongs to the calendar while it runs, so nothing is logged
/// to it.  `RUST_LOG` overrides the default level.  The returned handle must
/// be kept alive until the program exits.
pub(crate) fn init_logging(log_file: &Path) -> anyhow::Result<LoggerHandle> {
    if let Some(parent) = log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let handle = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)
        .context("invalid log level")?
        .log_to_file(
            FileSpec::try_from(log_file)
                .with_context(|| format!("invalid log file path {}", log_file.display()))?,
        )
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .context("failed to start logger")?;
    Ok(handle)
}
