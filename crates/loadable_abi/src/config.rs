//! Environment driven settings.
//!
//! A builtin named `example` reads `EXAMPLE_LOG` (an `EnvFilter` directive,
//! default `warn`) and `EXAMPLE_LOG_ANSI` (colour output, default off).

use anyhow::{anyhow, bail, Context, Result};
use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub filter: String,
    pub ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
            ansi: false,
        }
    }
}

impl LogConfig {
    pub fn from_env(builtin_name: &str) -> Result<Self> {
        Self::from_lookup(builtin_name, |key| std::env::var(key).ok())
    }

    /// Same as [`LogConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(builtin_name: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let prefix = env_prefix(builtin_name);
        let mut config = Self::default();

        let filter_var = format!("{prefix}_LOG");
        if let Some(filter) = lookup(&filter_var) {
            let filter = filter.trim();
            if !filter.is_empty() {
                config.filter = filter.to_string();
            }
        }

        let ansi_var = format!("{prefix}_LOG_ANSI");
        if let Some(raw) = lookup(&ansi_var) {
            config.ansi = parse_flag(&raw).with_context(|| format!("invalid value in {ansi_var}"))?;
        }

        config
            .env_filter()
            .with_context(|| format!("invalid value in {filter_var}"))?;
        Ok(config)
    }

    /// The parse error already carries its source in `Display`, so it is
    /// flattened here instead of chained.
    pub fn env_filter(&self) -> Result<EnvFilter> {
        EnvFilter::try_new(&self.filter)
            .map_err(|err| anyhow!("invalid log filter '{}': {err}", self.filter))
    }
}

/// Variable prefix for a builtin: upper-cased, `-` mapped to `_`.
pub fn env_prefix(builtin_name: &str) -> String {
    builtin_name
        .chars()
        .map(|c| if c == '-' { '_' } else { c.to_ascii_uppercase() })
        .collect()
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("expected a boolean, got '{other}'"),
    }
}
