//! tracing bootstrap for code running inside the shell process.
//!
//! Events go to stderr so they never mix with a builtin's stdout. The
//! subscriber is installed at most once per process; later calls, e.g. from
//! a second `enable -f` after `enable -d`, are no-ops.

use anyhow::Result;
use once_cell::sync::OnceCell;
use tracing::debug;

use crate::config::LogConfig;

static LOGGER_CONFIG: OnceCell<LogConfig> = OnceCell::new();

pub fn init(config: &LogConfig) -> Result<()> {
    if LOGGER_CONFIG.get().is_some() {
        return Ok(());
    }

    let filter = config.env_filter()?;
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(config.ansi)
        .with_target(false)
        .try_init();

    // The host may already run its own subscriber; keep using it.
    if let Err(err) = installed {
        debug!("global tracing subscriber already set: {err}");
    }

    let _ = LOGGER_CONFIG.set(config.clone());
    Ok(())
}
