//! Process-wide logging configured from a workflow's `logger` section.
//!
//! ```yaml
//! logger:
//!   level: debug          # default directive when `filter` is absent
//!   filter: "ioflow=trace,warn"
//!   format: json          # compact | pretty | json | full
//!   ansi: false
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use crate::error::IoflowError;

/// Output format of log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
    Full,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Level used when no filter is given
    pub level: String,
    /// `EnvFilter` directives, e.g. `info,ioflow=debug`
    pub filter: Option<String>,
    pub format: LogFormat,
    pub ansi: bool,
    /// Include the event target (module path) in each line
    pub with_target: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            filter: None,
            format: LogFormat::default(),
            ansi: false,
            with_target: true,
        }
    }
}

impl LoggerConfig {
    pub fn from_section(section: &Value) -> Result<Self, IoflowError> {
        Self::deserialize(section).map_err(IoflowError::config)
    }

    pub fn env_filter(&self) -> Result<EnvFilter, IoflowError> {
        let directives = self.filter.as_deref().unwrap_or(&self.level);
        EnvFilter::try_new(directives)
            .map_err(|e| IoflowError::Logging(format!("invalid filter '{directives}': {e}")))
    }

    /// Install a global subscriber writing to stderr.
    ///
    /// Returns `false` when a global subscriber was already installed; the
    /// existing one stays in place.
    pub fn apply(&self) -> Result<bool, IoflowError> {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(self.env_filter()?)
            .with_ansi(self.ansi)
            .with_target(self.with_target)
            .with_writer(std::io::stderr);

        let installed = match self.format {
            LogFormat::Compact => builder.compact().try_init(),
            LogFormat::Pretty => builder.pretty().try_init(),
            LogFormat::Json => builder.json().try_init(),
            LogFormat::Full => builder.try_init(),
        };

        match installed {
            Ok(()) => Ok(true),
            Err(e) => {
                tracing::debug!(error = %e, "global subscriber already installed");
                Ok(false)
            }
        }
    }
}
