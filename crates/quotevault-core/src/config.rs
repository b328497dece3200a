//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Theme and appearance settings
//! - Daily notification time
//! - Daily reading goal target
//! - Widget deep-link scheme
//! - Hosted backend endpoint
//!
//! Configuration is stored at `~/.config/quotevault/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::error::{ConfigError, Result};
use crate::storage::data_dir;

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Hour of the daily quote alert (local time).
    #[serde(default = "default_hour")]
    pub hour: u32,
    #[serde(default)]
    pub minute: u32,
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub dark_mode: bool,
    #[serde(default = "default_accent_color")]
    pub accent_color: String,
    #[serde(default = "default_font_scale")]
    pub font_scale: f64,
}

/// Daily reading goal configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalConfig {
    #[serde(default = "default_goal_target")]
    pub daily_target: u32,
}

/// Home-screen widget configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetConfig {
    #[serde(default = "default_scheme")]
    pub deep_link_scheme: String,
}

/// Hosted backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the quote backend. Empty means "not configured";
    /// the CLI falls back to the bundled fixture catalog.
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/quotevault/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub goal: GoalConfig,
    #[serde(default)]
    pub widget: WidgetConfig,
    #[serde(default)]
    pub backend: BackendConfig,
}

// Default functions
fn default_true() -> bool {
    true
}
fn default_hour() -> u32 {
    9
}
fn default_accent_color() -> String {
    "#6366f1".into()
}
fn default_font_scale() -> f64 {
    1.0
}
fn default_goal_target() -> u32 {
    15
}
fn default_scheme() -> String {
    "quotevault".into()
}
fn default_page_size() -> u32 {
    10
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            hour: default_hour(),
            minute: 0,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            dark_mode: false,
            accent_color: default_accent_color(),
            font_scale: default_font_scale(),
        }
    }
}

impl Default for GoalConfig {
    fn default() -> Self {
        Self {
            daily_target: default_goal_target(),
        }
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            deep_link_scheme: default_scheme(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            page_size: default_page_size(),
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
    ) -> Result<(), ConfigError> {
        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| ConfigError::InvalidValue {
                            key: key.to_string(),
                            message: e.to_string(),
                        })?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| ConfigError::InvalidValue {
                                    key: key.to_string(),
                                    message: format!("cannot parse '{value}' as number"),
                                })?
                        } else {
                            return Err(ConfigError::InvalidValue {
                                key: key.to_string(),
                                message: format!("cannot parse '{value}' as number"),
                            });
                        }
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }

    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or write and return the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path,
                    message: e.to_string(),
                })?;
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
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        // Temp-then-rename so a concurrent load never sees a torn file.
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, content).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::rename(&tmp, &path).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(())
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

    /// Set a config value by key and persist. Returns an error if the key
    /// is unknown or the value cannot be parsed.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json)?;
        self.save()?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}

type Subscriber = Box<dyn Fn(&Config) + Send + Sync>;

/// Process-wide settings store with change notification.
///
/// Consumers receive the configuration by injection instead of reading
/// ambient global state; screens that care about live theme or goal
/// changes subscribe for updates.
#[derive(Clone)]
pub struct SettingsStore {
    inner: Arc<Mutex<SettingsInner>>,
}

struct SettingsInner {
    config: Config,
    subscribers: Vec<Subscriber>,
}

impl SettingsStore {
    pub fn new(config: Config) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SettingsInner {
                config,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Snapshot of the current configuration.
    pub fn current(&self) -> Config {
        self.inner.lock().expect("settings lock poisoned").config.clone()
    }

    /// Register a callback invoked after every successful update.
    pub fn subscribe<F>(&self, f: F)
    where
        F: Fn(&Config) + Send + Sync + 'static,
    {
        let mut inner = self.inner.lock().expect("settings lock poisoned");
        inner.subscribers.push(Box::new(f));
    }

    /// Apply a mutation, persist it, and notify subscribers.
    pub fn update<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Config),
    {
        let mut inner = self.inner.lock().expect("settings lock poisoned");
        f(&mut inner.config);
        inner.config.save()?;
        let snapshot = inner.config.clone();
        for sub in &inner.subscribers {
            sub(&snapshot);
        }
        Ok(())
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
        assert_eq!(parsed.notifications.hour, 9);
        assert_eq!(parsed.notifications.minute, 0);
        assert_eq!(parsed.goal.daily_target, 15);
        assert_eq!(parsed.widget.deep_link_scheme, "quotevault");
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("notifications.hour").as_deref(), Some("9"));
        assert_eq!(cfg.get("goal.daily_target").as_deref(), Some("15"));
        assert_eq!(cfg.get("ui.accent_color").as_deref(), Some("#6366f1"));
        assert!(cfg.get("ui.missing_key").is_none());
    }

    #[test]
    fn set_json_value_by_path_updates_nested_bool() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        Config::set_json_value_by_path(&mut json, "ui.dark_mode", "true").unwrap();
        assert_eq!(
            Config::get_json_value_by_path(&json, "ui.dark_mode").unwrap(),
            &serde_json::Value::Bool(true)
        );
    }

    #[test]
    fn set_json_value_by_path_updates_nested_number() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        Config::set_json_value_by_path(&mut json, "notifications.hour", "21").unwrap();
        assert_eq!(
            Config::get_json_value_by_path(&json, "notifications.hour").unwrap(),
            &serde_json::Value::Number(21.into())
        );
    }

    #[test]
    fn set_json_value_by_path_rejects_unknown_key() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        let result = Config::set_json_value_by_path(&mut json, "ui.nonexistent_key", "value");
        assert!(result.is_err());
    }

    #[test]
    fn set_json_value_by_path_rejects_invalid_type() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        let result = Config::set_json_value_by_path(&mut json, "ui.dark_mode", "not_a_bool");
        assert!(result.is_err());
    }

    #[test]
    fn settings_store_notifies_subscribers() {
        use std::sync::atomic::{AtomicU32, Ordering};

        let store = SettingsStore::new(Config::default());
        let hits = Arc::new(AtomicU32::new(0));
        let hits_clone = hits.clone();
        store.subscribe(move |cfg| {
            assert!(cfg.ui.dark_mode);
            hits_clone.fetch_add(1, Ordering::SeqCst);
        });

        store.update(|cfg| cfg.ui.dark_mode = true).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(store.current().ui.dark_mode);
    }
}
