//! # MusoBridge Configuration Module
//!
//! Configuration management for MusoBridge:
//! - Loading configuration from a YAML file
//! - Merging with the embedded default configuration
//! - Environment variable overrides
//! - Typed getters/setters for the values the bridge needs
//! - Thread-safe singleton access pattern
//!
//! ## Usage
//!
//! ```no_run
//! use musoconfig::get_config;
//!
//! let config = get_config();
//! let port = config.get_http_port();
//! let context = config.get_url_context_path();
//! ```

use anyhow::{Result, anyhow};
use dirs::home_dir;
use lazy_static::lazy_static;
use serde_yaml::{Mapping, Number, Value};
use std::{
    env, fs,
    path::Path,
    sync::{Arc, Mutex},
};
use tracing::info;
use uuid::Uuid;

// Embedded default configuration
const DEFAULT_CONFIG: &str = include_str!("musobridge.yaml");

lazy_static! {
    static ref CONFIG: Arc<Config> =
        Arc::new(Config::load_config("").expect("Failed to load MusoBridge configuration"));
}

const ENV_CONFIG_DIR: &str = "MUSOBRIDGE_CONFIG";
const ENV_PREFIX: &str = "MUSOBRIDGE_CONFIG__";

const DEFAULT_HTTP_PORT: u16 = 4040;
const DEFAULT_SERVER_NAME: &str = "MusoBridge";
const DEFAULT_COVER_ART_SIZE: u32 = 500;

/// Returns the global configuration singleton.
pub fn get_config() -> Arc<Config> {
    CONFIG.clone()
}

/// Macro to generate a getter for string values with a default
macro_rules! impl_string_getter {
    ($getter:ident, $path:expr, $default:expr) => {
        pub fn $getter(&self) -> String {
            match self.get_value($path) {
                Ok(Value::String(s)) => s,
                _ => $default.to_string(),
            }
        }
    };
}

/// Configuration manager for MusoBridge
///
/// Holds the merged YAML tree (defaults + external file + environment
/// overrides) behind a mutex, and persists writes back to `config.yaml`
/// when the configuration was loaded from disk.
#[derive(Debug)]
pub struct Config {
    path: String,
    data: Mutex<Value>,
}

impl Clone for Config {
    fn clone(&self) -> Self {
        let data = self.data.lock().unwrap().clone();
        Self {
            path: self.path.clone(),
            data: Mutex::new(data),
        }
    }
}

impl Config {
    /// Finds a config directory by trying different locations in order
    fn find_config_dir(directory: &str) -> String {
        // 1. Provided directory
        if !directory.is_empty() {
            return directory.to_string();
        }

        // 2. Environment variable
        if let Ok(env_path) = env::var(ENV_CONFIG_DIR) {
            info!(env_var = ENV_CONFIG_DIR, path = %env_path, "Trying to load config from env");
            return env_path;
        }

        // 3. Current directory
        if Path::new(".musobridge").exists() {
            return ".musobridge".to_string();
        }

        // 4. Home directory
        if let Some(home) = home_dir() {
            let home_config = home.join(".musobridge");
            if home_config.exists() {
                return home_config.to_string_lossy().to_string();
            }
        }

        ".musobridge".to_string()
    }

    /// Creates the config directory if needed and checks permissions
    fn validate_config_dir(path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        if !path.is_dir() {
            return Err(anyhow!("Config path is not a directory"));
        }

        let test_file = path.join(".write_test");
        fs::write(&test_file, b"test")?;
        fs::remove_file(&test_file)?;
        fs::read_dir(path)?;

        Ok(())
    }

    /// Loads the configuration from the specified directory
    ///
    /// The directory is searched in the following order:
    /// 1. The provided `directory` parameter if not empty
    /// 2. The `MUSOBRIDGE_CONFIG` environment variable
    /// 3. `.musobridge` in the current directory
    /// 4. `.musobridge` in the user's home directory
    ///
    /// The embedded defaults are merged with the external `config.yaml` if
    /// present, environment overrides are applied, and the merged result is
    /// written back.
    pub fn load_config(directory: &str) -> Result<Self> {
        let config_dir = Self::find_config_dir(directory);
        let dir_path = Path::new(&config_dir);
        Self::validate_config_dir(dir_path)?;
        info!(config_dir = %config_dir, "Using config directory");

        let config_file_path = dir_path.join("config.yaml");
        let path = config_file_path.to_string_lossy().to_string();

        let mut merged: Value = serde_yaml::from_str(DEFAULT_CONFIG)?;

        let yaml_data = if let Ok(data) = fs::read(&path) {
            info!(config_file = %path, "Loaded config file");
            data
        } else {
            info!(config_file = %path, "Config file not found, using default embedded config");
            DEFAULT_CONFIG.as_bytes().to_vec()
        };

        let external: Value = serde_yaml::from_slice(&yaml_data)?;
        merge_yaml(&mut merged, &external);
        let mut config_value = Self::lower_keys_value(merged);

        Self::apply_env_overrides(&mut config_value);

        let config = Config {
            path,
            data: Mutex::new(config_value),
        };

        config.save()?;
        Ok(config)
    }

    /// Builds an in-memory configuration from a YAML string, merged over the
    /// embedded defaults. Never touches the filesystem; writes are kept in
    /// memory only. Mostly useful for tests.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let mut merged: Value = serde_yaml::from_str(DEFAULT_CONFIG)?;
        let external: Value = serde_yaml::from_str(yaml)?;
        merge_yaml(&mut merged, &external);

        Ok(Config {
            path: String::new(),
            data: Mutex::new(Self::lower_keys_value(merged)),
        })
    }

    /// Saves the current configuration to its config.yaml file
    ///
    /// In-memory configurations (no backing path) are left untouched.
    pub fn save(&self) -> Result<()> {
        if self.path.is_empty() {
            return Ok(());
        }
        let data = self.data.lock().unwrap();
        let yaml = serde_yaml::to_string(&*data)?;
        fs::write(&self.path, yaml)?;
        Ok(())
    }

    /// Sets a configuration value at the specified path and saves it
    pub fn set_value(&self, path: &[&str], value: Value) -> Result<()> {
        let mut data = self.data.lock().unwrap();
        Self::set_value_internal(&mut data, path, value)?;
        drop(data);
        self.save()?;
        Ok(())
    }

    fn set_value_internal(data: &mut Value, path: &[&str], value: Value) -> Result<()> {
        if path.is_empty() {
            *data = value;
            return Ok(());
        }
        if let Value::Mapping(map) = data {
            let key_value = Value::String(path[0].to_lowercase());
            if path.len() == 1 {
                map.insert(key_value, value);
            } else {
                let entry = map
                    .entry(key_value)
                    .or_insert(Value::Mapping(Mapping::new()));
                Self::set_value_internal(entry, &path[1..], value)?;
            }
            Ok(())
        } else {
            Err(anyhow!("Current node is not a map"))
        }
    }

    /// Gets a configuration value at the specified path
    ///
    /// # Arguments
    ///
    /// * `path` - Array of keys representing the path (e.g., `&["server", "http_port"]`)
    pub fn get_value(&self, path: &[&str]) -> Result<Value> {
        let data = self.data.lock().unwrap();
        Self::get_value_internal(&data, path)
    }

    fn get_value_internal(data: &Value, path: &[&str]) -> Result<Value> {
        let mut current = data;
        for (i, key) in path.iter().enumerate() {
            if let Value::Mapping(map) = current {
                let key = key.to_lowercase();
                if let Some(next) = map.get(&Value::String(key)) {
                    current = next;
                } else {
                    return Err(anyhow!("Path {} does not exist", path[..=i].join(".")));
                }
            } else {
                return Err(anyhow!("Path {} is not a mapping", path[..i].join(".")));
            }
        }
        Ok(current.clone())
    }

    fn apply_env_overrides(config: &mut Value) {
        for (key, value) in env::vars() {
            if let Some(stripped) = key.strip_prefix(ENV_PREFIX) {
                let key_path = stripped.split("__").collect::<Vec<_>>();
                let yaml_value = Self::convert_env_value(&value);
                let _ = Self::set_value_internal(config, &key_path, yaml_value);
            }
        }
    }

    fn convert_env_value(value: &str) -> Value {
        if let Ok(parsed) = serde_yaml::from_str::<Value>(value) {
            return parsed;
        }
        Value::String(value.to_string())
    }

    fn lower_keys_value(value: Value) -> Value {
        match value {
            Value::Mapping(map) => {
                let mut new_map = Mapping::new();
                for (k, v) in map {
                    if let Value::String(s) = k {
                        new_map.insert(Value::String(s.to_lowercase()), Self::lower_keys_value(v));
                    } else {
                        new_map.insert(k, Self::lower_keys_value(v));
                    }
                }
                Value::Mapping(new_map)
            }
            Value::Sequence(seq) => {
                Value::Sequence(seq.into_iter().map(Self::lower_keys_value).collect())
            }
            _ => value,
        }
    }

    // ============= Typed getters =============

    impl_string_getter!(get_server_name, &["server", "name"], DEFAULT_SERVER_NAME);
    impl_string_getter!(get_url_context_path, &["server", "context_path"], "");

    /// Gets the HTTP port of the streaming server
    ///
    /// Returns the configured port, or the default (4040) when missing or
    /// invalid.
    pub fn get_http_port(&self) -> u16 {
        match self.get_value(&["server", "http_port"]) {
            Ok(Value::Number(n)) => match n.as_u64().and_then(|p| u16::try_from(p).ok()) {
                Some(port) => port,
                None => {
                    tracing::warn!("Invalid HTTP port '{}', using default {}", n, DEFAULT_HTTP_PORT);
                    DEFAULT_HTTP_PORT
                }
            },
            Ok(Value::String(s)) => s.parse::<u16>().unwrap_or_else(|_| {
                tracing::warn!("Invalid HTTP port '{}', using default {}", s, DEFAULT_HTTP_PORT);
                DEFAULT_HTTP_PORT
            }),
            _ => DEFAULT_HTTP_PORT,
        }
    }

    /// Sets the HTTP port
    pub fn set_http_port(&self, port: u16) -> Result<()> {
        self.set_value(&["server", "http_port"], Value::Number(Number::from(port)))
    }

    /// Gets the registered license e-mail, if any
    ///
    /// An empty string in the configuration counts as "no license".
    pub fn get_license_email(&self) -> Option<String> {
        match self.get_value(&["license", "email"]) {
            Ok(Value::String(s)) if !s.trim().is_empty() => Some(s),
            _ => None,
        }
    }

    /// Gets the pixel size used when building cover-art URLs
    pub fn get_cover_art_size(&self) -> u32 {
        match self.get_value(&["covers", "size"]) {
            Ok(Value::Number(n)) if n.is_u64() => n.as_u64().unwrap() as u32,
            _ => DEFAULT_COVER_ART_SIZE,
        }
    }

    /// Gets the persisted device UDN, generating and storing one on first use
    pub fn get_udn(&self) -> Result<String> {
        match self.get_value(&["server", "udn"]) {
            Ok(Value::String(udn)) if !udn.trim().is_empty() => {
                let udn = udn.trim();
                Ok(udn.strip_prefix("uuid:").unwrap_or(udn).to_string())
            }
            _ => {
                let new_udn = Uuid::new_v4().to_string();
                self.set_value(&["server", "udn"], Value::String(new_udn.clone()))?;
                Ok(new_udn)
            }
        }
    }
}

/// Recursively merges `other` into `base`
///
/// Mappings are merged key by key; any other value in `other` replaces the
/// value in `base`. A `Null` in `other` is a no-op: an empty YAML document
/// parses to `Null` and must not wipe the defaults.
fn merge_yaml(base: &mut Value, other: &Value) {
    match (base, other) {
        (_, Value::Null) => {}
        (Value::Mapping(base_map), Value::Mapping(other_map)) => {
            for (k, v) in other_map {
                match base_map.get_mut(k) {
                    Some(existing) => merge_yaml(existing, v),
                    None => {
                        base_map.insert(k.clone(), v.clone());
                    }
                }
            }
        }
        (base, other) => {
            *base = other.clone();
        }
    }
}
