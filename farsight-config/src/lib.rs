//! Loader for workspace configuration with YAML + environment overlays.
//!
//! A `farsight.yaml` file is optional: every field has a default, and any
//! field can be overridden with `FARSIGHT_`-prefixed environment variables
//! (`FARSIGHT_SEARCH__API_KEY`, `FARSIGHT_RESEARCH__DEFAULT_DEPTH`, ...).
//! `${VAR}` placeholders inside string values are expanded after merging.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

/// Environment variable consulted when no API key is configured.
pub const API_KEY_ENV: &str = "SERPER_API_KEY";

#[derive(Debug, Deserialize)]
pub struct FarsightConfig {
    pub version: Option<String>,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub research: ResearchConfig,
}

/// Search provider settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub endpoint: String,
    /// Provider API key. Left empty when neither the file, the environment
    /// overlay, nor `SERPER_API_KEY` supplies one; searches then fail at
    /// request time rather than at startup.
    pub api_key: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://google.serper.dev".into(),
            api_key: String::new(),
        }
    }
}

/// Page fetcher settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Sent as the `User-Agent` header. Some servers reject the default
    /// client identifier outright, so this defaults to a browser string.
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
                .into(),
            timeout_secs: 30,
        }
    }
}

/// Deep-research defaults.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ResearchConfig {
    pub default_depth: usize,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self { default_depth: 2 }
    }
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hiding the `config` crate wiring (YAML + env overrides).
pub struct FarsightConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for FarsightConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl FarsightConfigLoader {
    /// Start with sensible defaults: `FARSIGHT_` env overrides only.
    ///
    /// ```
    /// use farsight_config::FarsightConfigLoader;
    ///
    /// let config = FarsightConfigLoader::new().load().expect("valid config");
    /// assert_eq!(config.research.default_depth, 2);
    /// assert_eq!(config.fetch.timeout_secs, 30);
    /// ```
    pub fn new() -> Self {
        let builder = Config::builder().add_source(
            Environment::with_prefix("FARSIGHT")
                .separator("__")
                .try_parsing(true),
        );
        Self { builder }
    }

    /// Attach a config file; the `config` crate infers format by suffix.
    /// Missing files are tolerated so deployments can rely purely on
    /// environment variables.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    ///
    /// ```
    /// use farsight_config::FarsightConfigLoader;
    ///
    /// let cfg = FarsightConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// version: "test"
    /// search:
    ///   endpoint: "https://serper.example"
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.version.as_deref(), Some("test"));
    /// assert_eq!(cfg.search.endpoint, "https://serper.example");
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources into strongly
    /// typed config.
    ///
    /// `${VAR}` placeholders are expanded after all sources merge, and an
    /// empty `search.api_key` falls back to the `SERPER_API_KEY` environment
    /// variable.
    pub fn load(self) -> Result<FarsightConfig, ConfigError> {
        let cfg = self.builder.build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let mut typed: FarsightConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;

        if typed.search.api_key.is_empty() {
            typed.search.api_key = std::env::var(API_KEY_ENV).unwrap_or_default();
        }

        Ok(typed)
    }
}
