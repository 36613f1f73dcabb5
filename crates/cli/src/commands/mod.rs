//! Command implementations.

pub mod config;
pub mod read;
pub mod search;

use std::time::Duration;

use rdr_client::ResponseFormat;
use rdr_core::Settings;

use crate::output::OutputFormat;

/// Global flag values; flags win over the resolved settings.
#[derive(Debug, Default)]
pub struct Globals {
    pub api_base: Option<String>,
    pub api_key: Option<String>,
    pub output: Option<String>,
}

impl Globals {
    /// Output format: flag, then configured default.
    pub fn output_format(&self, settings: &Settings) -> OutputFormat {
        let name = self
            .output
            .as_deref()
            .filter(|v| !v.is_empty())
            .unwrap_or(&settings.default_output_format);
        OutputFormat::from_name(name)
    }
}

/// Timeout: flag (when positive), then configured default.
pub fn resolve_timeout(flag: Option<u64>, settings: &Settings) -> Duration {
    match flag {
        Some(secs) if secs > 0 => Duration::from_secs(secs),
        _ => settings.timeout(),
    }
}

/// Response format: flag (strict), then configured default (lenient).
///
/// A bad flag value is the caller's mistake and fails; a bad configured
/// default is only warned about, so a stale config file cannot brick every
/// command.
pub fn resolve_response_format(
    flag: Option<&str>, settings: &Settings,
) -> Result<Option<ResponseFormat>, rdr_client::ClientError> {
    match flag.filter(|v| !v.is_empty()) {
        Some(name) => name.parse().map(Some),
        None => match settings.default_response_format.parse() {
            Ok(format) => Ok(Some(format)),
            Err(_) => {
                tracing::warn!(
                    "ignoring unknown default_response_format: {}",
                    settings.default_response_format
                );
                Ok(None)
            }
        },
    }
}
