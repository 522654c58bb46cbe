//! TOML-based application configuration.
//!
//! Stores user preferences:
//! - Session timer length
//! - Lookup provider settings
//!
//! Configuration is stored at `~/.config/readtimer/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::lookup::DEFAULT_ENDPOINT;
use crate::store::data_dir;

/// Timer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_session_minutes")]
    pub session_minutes: u32,
}

/// Lookup provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: u32,
    #[serde(default = "default_min_query_len")]
    pub min_query_len: u32,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/readtimer/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub lookup: LookupConfig,
}

// Default functions
fn default_session_minutes() -> u32 {
    25
}
fn default_max_suggestions() -> u32 {
    5
}
fn default_min_query_len() -> u32 {
    2
}
fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            session_minutes: default_session_minutes(),
        }
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            max_suggestions: default_max_suggestions(),
            min_query_len: default_min_query_len(),
            endpoint: default_endpoint(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timer: TimerConfig::default(),
            lookup: LookupConfig::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if key.is_empty() {
            return Err("config key is empty".into());
        }
        let (parent_path, leaf) = match key.rsplit_once('.') {
            Some((parent, leaf)) => (Some(parent), leaf),
            None => (None, key),
        };

        let parent = match parent_path {
            Some(path) => {
                let mut current = &mut *root;
                for part in path.split('.') {
                    current = current
                        .get_mut(part)
                        .ok_or_else(|| format!("unknown config key: {key}"))?;
                }
                current
            }
            None => root,
        };

        let obj = parent
            .as_object_mut()
            .ok_or_else(|| format!("unknown config key: {key}"))?;
        let existing = obj
            .get(leaf)
            .ok_or_else(|| format!("unknown config key: {key}"))?;

        let new_value = match existing {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(value.parse::<bool>()?),
            serde_json::Value::Number(_) => {
                let n = value
                    .parse::<u64>()
                    .map_err(|_| format!("cannot parse '{value}' as number"))?;
                serde_json::Value::Number(n.into())
            }
            _ => serde_json::Value::String(value.into()),
        };

        obj.insert(leaf.to_string(), new_value);
        Ok(())
    }

    fn path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(Self::path()?, content)?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key. Returns error if key is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json)?;
        self.save()?;
        Ok(())
    }

    /// Configured session length in seconds.
    pub fn session_secs(&self) -> u64 {
        u64::from(self.timer.session_minutes) * 60
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.timer.session_minutes, 25);
        assert_eq!(parsed.lookup.max_suggestions, 5);
    }

    #[test]
    fn session_secs_converts_minutes() {
        let cfg = Config::default();
        assert_eq!(cfg.session_secs(), 1500);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("timer.session_minutes").as_deref(), Some("25"));
        assert_eq!(cfg.get("lookup.min_query_len").as_deref(), Some("2"));
        assert!(cfg.get("lookup.missing_key").is_none());
    }

    #[test]
    fn set_json_value_by_path_updates_nested_number() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        Config::set_json_value_by_path(&mut json, "timer.session_minutes", "45").unwrap();
        assert_eq!(
            Config::get_json_value_by_path(&json, "timer.session_minutes").unwrap(),
            &serde_json::Value::Number(45.into())
        );
    }

    #[test]
    fn set_json_value_by_path_updates_nested_string() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        Config::set_json_value_by_path(&mut json, "lookup.endpoint", "http://localhost:9000")
            .unwrap();
        assert_eq!(
            Config::get_json_value_by_path(&json, "lookup.endpoint").unwrap(),
            &serde_json::Value::String("http://localhost:9000".to_string())
        );
    }

    #[test]
    fn set_json_value_by_path_rejects_unknown_key() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        assert!(Config::set_json_value_by_path(&mut json, "timer.nonexistent", "1").is_err());
        assert!(Config::set_json_value_by_path(&mut json, "", "1").is_err());
    }

    #[test]
    fn set_json_value_by_path_rejects_invalid_number() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        let result =
            Config::set_json_value_by_path(&mut json, "timer.session_minutes", "not_a_number");
        assert!(result.is_err());
    }
}
