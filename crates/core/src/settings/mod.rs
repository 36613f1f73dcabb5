//! Application settings with layered loading.
//!
//! Loading precedence (highest wins):
//! 1. Environment variables (RDR_*)
//! 2. `key=value` config file (`~/.rdr/config`)
//! 3. Built-in defaults
//!
//! The file and the environment never mutate each other: `set` rewrites only
//! the file layer, and an environment override is applied on every load
//! without ever being persisted.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default base URL for the read API.
pub const DEFAULT_READ_API_URL: &str = "https://r.jina.ai/";

/// Default base URL for the search API.
pub const DEFAULT_SEARCH_API_URL: &str = "https://s.jina.ai/";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable prefix for overrides.
const ENV_PREFIX: &str = "RDR_";

/// Config directory under the user's home.
const CONFIG_DIR: &str = ".rdr";

/// Config file name inside [`CONFIG_DIR`].
const CONFIG_FILE: &str = "config";

/// Recognized keys, in display order.
const KEYS: [&str; 9] = [
    "api_base_url",
    "search_api_url",
    "default_response_format",
    "default_output_format",
    "timeout",
    "with_generated_alt",
    "proxy_url",
    "cache_tolerance",
    "api_key",
];

/// Resolved application settings.
///
/// Constructed fresh on every invocation; value object, no ambient state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Base URL of the read API.
    pub read_api_url: String,
    /// Base URL of the search API.
    pub search_api_url: String,
    /// Default response representation (markdown, html, text, screenshot).
    pub default_response_format: String,
    /// Default output rendering (json, markdown).
    pub default_output_format: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Whether image captioning is requested by default.
    pub with_generated_alt: bool,
    /// Proxy server URL forwarded to the API.
    pub proxy_url: Option<String>,
    /// Cache tolerance in seconds, stored for the API's benefit.
    pub cache_tolerance: Option<String>,
    /// API key, sent as a bearer token when present.
    pub api_key: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            read_api_url: DEFAULT_READ_API_URL.to_string(),
            search_api_url: DEFAULT_SEARCH_API_URL.to_string(),
            default_response_format: "markdown".to_string(),
            default_output_format: "json".to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            with_generated_alt: false,
            proxy_url: None,
            cache_tolerance: None,
            api_key: None,
        }
    }
}

impl Settings {
    /// Timeout as Duration for use with the HTTP client.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Set a single key, strictly.
    ///
    /// Keys may be written with `-` or `_`. Unknown keys and unparseable
    /// numeric values are errors and leave `self` untouched.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let normalized = key.replace('-', "_");
        match normalized.as_str() {
            "api_base_url" => self.read_api_url = value.to_string(),
            "search_api_url" => self.search_api_url = value.to_string(),
            "default_response_format" => self.default_response_format = value.to_string(),
            "default_output_format" => self.default_output_format = value.to_string(),
            "timeout" => {
                self.timeout_secs = value.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "timeout".to_string(),
                    value: value.to_string(),
                })?;
            }
            "with_generated_alt" => self.with_generated_alt = parse_bool(value),
            "proxy_url" => self.proxy_url = non_empty(value),
            "cache_tolerance" => self.cache_tolerance = non_empty(value),
            "api_key" => self.api_key = non_empty(value),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// Get a single key as its display string.
    ///
    /// The API key is always returned masked, never raw.
    pub fn get_value(&self, key: &str) -> Result<String, ConfigError> {
        let normalized = key.replace('-', "_");
        let value = match normalized.as_str() {
            "api_base_url" => self.read_api_url.clone(),
            "search_api_url" => self.search_api_url.clone(),
            "default_response_format" => self.default_response_format.clone(),
            "default_output_format" => self.default_output_format.clone(),
            "timeout" => self.timeout_secs.to_string(),
            "with_generated_alt" => self.with_generated_alt.to_string(),
            "proxy_url" => self.proxy_url.clone().unwrap_or_default(),
            "cache_tolerance" => self.cache_tolerance.clone().unwrap_or_default(),
            "api_key" => self.api_key.as_deref().map(mask_secret).unwrap_or_default(),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        };
        Ok(value)
    }

    /// All recognized keys with their display values, in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        KEYS.iter()
            .map(|key| (*key, self.get_value(key).unwrap_or_default()))
            .collect()
    }

    /// Apply one line from the config file, leniently.
    ///
    /// Unknown keys and unparseable values are logged and skipped so a stale
    /// or hand-edited file never prevents startup.
    fn apply_file_line(&mut self, key: &str, value: &str) {
        if let Err(err) = self.set_value(key, value) {
            tracing::warn!("ignoring config line: {err}");
        }
    }

    /// Overlay environment variables on top of the current values.
    ///
    /// `lookup` is the variable source (tests substitute a map). Unset or
    /// empty variables do not override.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |suffix: &str| lookup(&format!("{ENV_PREFIX}{suffix}")).filter(|v| !v.is_empty());

        if let Some(v) = env("API_BASE_URL") {
            self.read_api_url = v;
        }
        if let Some(v) = env("SEARCH_API_URL") {
            self.search_api_url = v;
        }
        if let Some(v) = env("RESPONSE_FORMAT") {
            self.default_response_format = v;
        }
        if let Some(v) = env("OUTPUT_FORMAT") {
            self.default_output_format = v;
        }
        if let Some(v) = env("TIMEOUT") {
            match v.parse() {
                Ok(secs) => self.timeout_secs = secs,
                Err(_) => tracing::warn!("ignoring non-numeric {ENV_PREFIX}TIMEOUT: {v}"),
            }
        }
        if let Some(v) = env("WITH_GENERATED_ALT") {
            self.with_generated_alt = parse_bool(&v);
        }
        if let Some(v) = env("PROXY_URL") {
            self.proxy_url = Some(v);
        }
        if let Some(v) = env("CACHE_TOLERANCE") {
            self.cache_tolerance = Some(v);
        }
        if let Some(v) = env("API_KEY") {
            self.api_key = Some(v);
        }
    }
}

fn parse_bool(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() { None } else { Some(value.to_string()) }
}

/// Mask a secret for display: keep the first and last 4 characters.
///
/// Secrets of 8 characters or fewer collapse to a fixed placeholder so that
/// nothing about their content leaks.
pub fn mask_secret(secret: &str) -> String {
    if secret.chars().count() <= 8 {
        return "***".to_string();
    }
    let head: String = secret.chars().take(4).collect();
    let tail: String = secret.chars().skip(secret.chars().count() - 4).collect();
    format!("{head}***{tail}")
}

/// On-disk settings store.
///
/// Exclusively owns the config file; all reads and writes go through it.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Store at the fixed per-user location (`~/.rdr/config`).
    pub fn default_location() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(Self { path: home.join(CONFIG_DIR).join(CONFIG_FILE) })
    }

    /// Store at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the config file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolved settings: defaults, then file, then environment.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let mut settings = self.load_file()?;
        settings.apply_env_overrides(|name| std::env::var(name).ok());
        Ok(settings)
    }

    /// Defaults plus the file layer only, without environment overrides.
    ///
    /// This is what `set` starts from, so environment values are never
    /// written back to disk.
    fn load_file(&self) -> Result<Settings, ConfigError> {
        let mut settings = Settings::default();
        let data = match std::fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(settings),
            Err(err) => return Err(ConfigError::Io { path: self.path.clone(), source: err }),
        };
        for line in data.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                tracing::warn!("ignoring malformed config line: {line}");
                continue;
            };
            settings.apply_file_line(key.trim(), value.trim());
        }
        Ok(settings)
    }

    /// Set a single key and persist the file layer.
    pub fn set(&self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut settings = self.load_file()?;
        settings.set_value(key, value)?;
        self.save(&settings)
    }

    /// Get the resolved display value for a single key.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        self.load()?.get_value(key)
    }

    /// All resolved keys and display values, in display order.
    pub fn list(&self) -> Result<Vec<(&'static str, String)>, ConfigError> {
        Ok(self.load()?.entries())
    }

    /// Persist settings to the file, writing only non-default values.
    pub fn save(&self, settings: &Settings) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io { path: self.path.clone(), source };

        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(io_err)?;
        }

        let defaults = Settings::default();
        let mut content = String::from(
            "# rdr configuration\n\
             # Values here can be overridden by RDR_* environment variables.\n\
             #\n\
             #   api_base_url             - read API base URL\n\
             #   search_api_url           - search API URL\n\
             #   default_response_format  - markdown, html, text, screenshot\n\
             #   default_output_format    - json, markdown\n\
             #   timeout                  - request timeout in seconds\n\
             #   with_generated_alt       - enable image captioning\n\
             #   proxy_url                - proxy server URL\n\
             #   cache_tolerance          - cache tolerance in seconds\n\
             #   api_key                  - API key, sent as a bearer token\n\
             \n",
        );

        if settings.read_api_url != defaults.read_api_url {
            content.push_str(&format!("api_base_url={}\n", settings.read_api_url));
        }
        if settings.search_api_url != defaults.search_api_url {
            content.push_str(&format!("search_api_url={}\n", settings.search_api_url));
        }
        if settings.default_response_format != defaults.default_response_format {
            content.push_str(&format!("default_response_format={}\n", settings.default_response_format));
        }
        if settings.default_output_format != defaults.default_output_format {
            content.push_str(&format!("default_output_format={}\n", settings.default_output_format));
        }
        if settings.timeout_secs != defaults.timeout_secs {
            content.push_str(&format!("timeout={}\n", settings.timeout_secs));
        }
        if settings.with_generated_alt {
            content.push_str(&format!("with_generated_alt={}\n", settings.with_generated_alt));
        }
        if let Some(proxy_url) = &settings.proxy_url {
            content.push_str(&format!("proxy_url={proxy_url}\n"));
        }
        if let Some(cache_tolerance) = &settings.cache_tolerance {
            content.push_str(&format!("cache_tolerance={cache_tolerance}\n"));
        }
        if let Some(api_key) = &settings.api_key {
            content.push_str(&format!("api_key={api_key}\n"));
        }

        std::fs::write(&self.path, content).map_err(io_err)?;

        // The file may hold an API key; keep it owner-readable only.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
                .map_err(io_err)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn store_in(dir: &tempfile::TempDir) -> SettingsStore {
        SettingsStore::at(dir.path().join("config"))
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.read_api_url, "https://r.jina.ai/");
        assert_eq!(settings.search_api_url, "https://s.jina.ai/");
        assert_eq!(settings.default_response_format, "markdown");
        assert_eq!(settings.default_output_format, "json");
        assert_eq!(settings.timeout_secs, 30);
        assert!(!settings.with_generated_alt);
        assert!(settings.proxy_url.is_none());
        assert!(settings.cache_tolerance.is_none());
        assert!(settings.api_key.is_none());
    }

    #[test]
    fn test_timeout_duration() {
        let settings = Settings::default();
        assert_eq!(settings.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("abcd1234efgh"), "abcd***efgh");
        assert_eq!(mask_secret("12345678"), "***");
        assert_eq!(mask_secret("short"), "***");
        assert_eq!(mask_secret(""), "***");
        assert_eq!(mask_secret("abcdefghi"), "abcd***fghi");
    }

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = store_in(&dir).load().unwrap();
        assert_eq!(settings.read_api_url, DEFAULT_READ_API_URL);
    }

    #[test]
    fn test_load_parses_file_and_skips_noise() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config");
        std::fs::write(
            &path,
            "# comment\n\
             \n\
             timeout = 60\n\
             api_base_url=https://reader.internal/\n\
             bogus_key=1\n\
             timeout_is_not=a=problem\n\
             with_generated_alt=TRUE\n",
        )
        .unwrap();

        let settings = SettingsStore::at(path).load().unwrap();
        assert_eq!(settings.timeout_secs, 60);
        assert_eq!(settings.read_api_url, "https://reader.internal/");
        assert!(settings.with_generated_alt);
    }

    #[test]
    fn test_set_get_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.set("timeout", "45").unwrap();
        assert_eq!(store.get("timeout").unwrap(), "45");

        store.set("proxy_url", "http://proxy:8080").unwrap();
        assert_eq!(store.get("proxy_url").unwrap(), "http://proxy:8080");

        store.set("default_output_format", "markdown").unwrap();
        assert_eq!(store.get("default_output_format").unwrap(), "markdown");
    }

    #[test]
    fn test_set_accepts_hyphenated_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.set("api-base-url", "https://reader.internal/").unwrap();
        assert_eq!(store.get("api_base_url").unwrap(), "https://reader.internal/");
    }

    #[test]
    fn test_api_key_is_masked_on_get_and_list() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.set("api_key", "abcd1234efgh").unwrap();

        assert_eq!(store.get("api_key").unwrap(), "abcd***efgh");
        let listed = store.list().unwrap();
        let api_key = listed.iter().find(|(k, _)| *k == "api_key").unwrap();
        assert_eq!(api_key.1, "abcd***efgh");

        // The raw key stays available to the resolved settings.
        assert_eq!(store.load().unwrap().api_key.as_deref(), Some("abcd1234efgh"));
    }

    #[test]
    fn test_unknown_key_fails_set_and_get() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(matches!(store.set("colour", "red"), Err(ConfigError::UnknownKey(_))));
        assert!(matches!(store.get("colour"), Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn test_invalid_timeout_does_not_mutate() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.set("timeout", "60").unwrap();

        let err = store.set("timeout", "abc").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        assert_eq!(store.get("timeout").unwrap(), "60");
    }

    #[test]
    fn test_save_writes_only_non_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save(&Settings::default()).unwrap();

        let content = std::fs::read_to_string(store.path()).unwrap();
        assert!(!content.lines().any(|l| !l.trim().is_empty() && !l.starts_with('#')));

        store.set("timeout", "99").unwrap();
        let content = std::fs::read_to_string(store.path()).unwrap();
        assert!(content.contains("timeout=99"));
        assert!(!content.contains("api_base_url="));
    }

    #[test]
    fn test_env_overrides_apply_and_empty_is_ignored() {
        let mut env = HashMap::new();
        env.insert("RDR_API_KEY".to_string(), "env-key-123456".to_string());
        env.insert("RDR_TIMEOUT".to_string(), "5".to_string());
        env.insert("RDR_PROXY_URL".to_string(), String::new());

        let mut settings = Settings::default();
        settings.proxy_url = Some("http://from-file:1".to_string());
        settings.apply_env_overrides(|name| env.get(name).cloned());

        assert_eq!(settings.api_key.as_deref(), Some("env-key-123456"));
        assert_eq!(settings.timeout_secs, 5);
        // Empty env var does not clobber the file value.
        assert_eq!(settings.proxy_url.as_deref(), Some("http://from-file:1"));
    }

    #[test]
    fn test_env_override_wins_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config");
        std::fs::write(&path, "timeout=60\n").unwrap();

        let mut settings = SettingsStore::at(path).load().unwrap();
        assert_eq!(settings.timeout_secs, 60);
        settings.apply_env_overrides(|name| {
            (name == "RDR_TIMEOUT").then(|| "7".to_string())
        });
        assert_eq!(settings.timeout_secs, 7);
    }

    #[test]
    fn test_entries_order_and_coverage() {
        let entries = Settings::default().entries();
        let keys: Vec<&str> = entries.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, KEYS.to_vec());
    }
}
