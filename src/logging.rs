use flexi_logger::{Logger, LoggerHandle};

/// Installs the stderr diagnostic logger. Verbosity follows `RUST_LOG`,
/// defaulting to warnings. Returns the handle that keeps the logger
/// alive; initialization failure is ignored — diagnostics must never take
/// the tool down.
pub fn init() -> Option<LoggerHandle> {
    Logger::try_with_env_or_str("warn")
        .map(|logger| logger.log_to_stderr())
        .and_then(|logger| logger.start())
        .ok()
}
