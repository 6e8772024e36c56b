#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;

pub const APP_DIR_NAME: &str = "bookmark-manager";

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    ConfigFile,
    Database,
    LogFile,
    LogLevel,
}

pub struct Config {}

fn app_dir() -> path::PathBuf {
    return dirs::config_dir()
        .unwrap_or_else(|| path::PathBuf::from("."))
        .join(APP_DIR_NAME);
}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        let dir = app_dir();

        let res = match key {
            ConfigKey::Database => dir.join("bookmarks.db"),
            ConfigKey::LogFile => dir.join("bookmark-manager.log"),
            ConfigKey::LogLevel => return "warn".to_string(),

            // Special
            ConfigKey::ConfigFile => dir.join("config.toml"),
        };

        return res.to_string_lossy().to_string();
    }

    pub fn database_path() -> path::PathBuf {
        return path::PathBuf::from(Config::get(ConfigKey::Database));
    }

    pub fn log_file_path() -> path::PathBuf {
        return path::PathBuf::from(Config::get(ConfigKey::LogFile));
    }

    /// Resolves every key: defaults, then `config.toml`, then the command line
    /// (which includes values clap read from the environment).
    pub async fn load(cmd: &Command, clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key));
        }

        let config_file = arg_value(&clap_arg_matches, ConfigKey::ConfigFile)
            .unwrap_or_else(|| return Config::default(ConfigKey::ConfigFile));
        Config::set(ConfigKey::ConfigFile, &config_file);

        let config_path = path::PathBuf::from(config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(&config_path).await?;
            apply_config_file(cmd, &toml_str)?;
        }

        for key in ConfigKey::iter() {
            if let Some(val) = arg_value(&clap_arg_matches, key) {
                Config::set(key, &val);
            }
        }

        return Ok(());
    }

    pub fn serialize_default(cmd: &Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile {
                    return None;
                }

                let arg = cmd
                    .get_arguments()
                    .find(|e| return e.get_id().as_str() == key.to_string())?;

                let mut description = arg
                    .get_help()
                    .map(|help| return help.to_string())
                    .unwrap_or_default();

                description = description
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                let possible_values = possible_values(cmd, key);
                if !possible_values.is_empty() {
                    description = format!(
                        "{description} [possible values: {}]",
                        possible_values.join(", ")
                    );
                }

                let val = Config::default(key);
                let val = if val.is_empty() {
                    format!("# {key} = \"\"")
                } else {
                    format!("{key} = {}", toml_edit::Value::from(val))
                };

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}

/// Last non-empty value given for `key` across the matches.
fn arg_value(clap_arg_matches: &[&ArgMatches], key: ConfigKey) -> Option<String> {
    return clap_arg_matches
        .iter()
        .filter_map(|matches| {
            return matches
                .try_get_one::<String>(&key.to_string())
                .ok()
                .flatten()
                .filter(|val| return !val.is_empty())
                .cloned();
        })
        .last();
}

fn apply_config_file(cmd: &Command, toml_str: &str) -> Result<()> {
    let doc = toml_str.parse::<toml_edit::Document>()?;

    for key in ConfigKey::iter().filter(|key| return *key != ConfigKey::ConfigFile) {
        let Some(item) = doc.get(&key.to_string()) else {
            continue;
        };
        let Some(val) = item.as_str() else {
            bail!("config.toml has an invalid value for key '{key}': expected a string");
        };
        if val.is_empty() {
            continue;
        }

        let allowed = possible_values(cmd, key);
        if !allowed.is_empty() && !allowed.iter().any(|e| return e == val) {
            bail!(
                "config.toml has an invalid value for key '{key}': {val}\nPossible values are: {}",
                allowed.join(", ")
            );
        }

        Config::set(key, val);
    }

    return Ok(());
}

fn possible_values(cmd: &Command, key: ConfigKey) -> Vec<String> {
    return cmd
        .get_arguments()
        .find(|e| return e.get_id().as_str() == key.to_string())
        .map(|arg| {
            return arg
                .get_possible_values()
                .iter()
                .map(|e| return e.get_name().to_string())
                .collect::<Vec<String>>();
        })
        .unwrap_or_default();
}
