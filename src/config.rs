use crate::errors::NfError;

use log::info;
use serde::Deserialize;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};

pub const NAMEFIX: &str = "namefix";
const CONFIG_FILE: &str = "config.yaml";
pub const DEFAULT_REGEX: &str = "^[a-z0-9_]+$";

#[allow(dead_code)]
const CONFIG_EXAMPLE: &str = r###"
# (Optional)
# Regex that `nfx check` validates names against.
# Files are checked without their extension.
# default: "^[a-z0-9_]+$"
# regex: "^[a-z0-9_-]+$"

# (Optional)
# Ignore file (gitignore syntax). A relative name is looked up in the
# current directory, then next to this config file, then in the target.
# default: .ignore
# ignore_file: .ignore

# (Optional)
# Where `nfx check` writes its report.
# If not set, will default to the Downloads directory.
# output_dir: /home/user/reports

# (Optional)
# Whether the filesystem treats `Foo` and `foo` as the same name.
# If not set, true on macOS and Windows, false elsewhere.
# case_insensitive: false

# (Optional)
# Names starting with one of these are ignored unless an ignore rule
# un-ignores them with `!`.
# default: ["."]
# hidden_markers: [".", "~$"]
"###;

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub regex: Option<String>,
    pub ignore_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub case_insensitive: Option<bool>,
    pub hidden_markers: Option<Vec<String>>,
}

impl Config {
    pub fn regex(&self) -> &str {
        self.regex.as_deref().unwrap_or(DEFAULT_REGEX)
    }

    pub fn case_insensitive(&self) -> bool {
        self.case_insensitive
            .unwrap_or(cfg!(any(target_os = "macos", target_os = "windows")))
    }

    pub fn hidden_markers(&self) -> Vec<String> {
        self.hidden_markers
            .clone()
            .unwrap_or_else(|| vec![crate::ignore::DEFAULT_HIDDEN_MARKER.to_owned()])
    }
}

fn read_config(p: &Path) -> Result<Config, NfError> {
    let s = read_to_string(p)?;
    read_config_from_str(&s)
}

fn read_config_from_str(s: &str) -> Result<Config, NfError> {
    // An empty or all-comment file deserializes to null.
    if s.lines().all(|l| l.trim().is_empty() || l.trim_start().starts_with('#')) {
        return Ok(Config::default());
    }
    let deserialized: Config = serde_yaml::from_str(s)?;
    Ok(deserialized)
}

pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(NAMEFIX);
        path
    })
}

pub fn read_config_or_default() -> Result<Config, NfError> {
    let config_file = config_dir()
        .ok_or_else(|| NfError::Dirs("Cannot read the config directory.".to_string()))?
        .join(CONFIG_FILE);

    if config_file.exists() {
        info!("CONFIG: {:?}", config_file);
        read_config(&config_file)
    } else {
        info!("Config file not found: launches with default configuration.");
        Ok(Config::default())
    }
}

/// Default report directory of `nfx check`.
pub fn default_output_dir() -> Result<PathBuf, NfError> {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .ok_or_else(|| NfError::Dirs("Cannot read the home directory.".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_example_config() {
        let config = read_config_from_str(CONFIG_EXAMPLE).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.regex(), DEFAULT_REGEX);
        assert_eq!(config.hidden_markers(), vec![".".to_string()]);
    }

    #[test]
    fn test_read_config() {
        let config = read_config_from_str(
            "regex: \"^[a-z]+$\"\ncase_insensitive: true\nhidden_markers: [\".\", \"~$\"]\n",
        )
        .unwrap();
        assert_eq!(config.regex(), "^[a-z]+$");
        assert!(config.case_insensitive());
        assert_eq!(config.hidden_markers().len(), 2);
        assert_eq!(config.output_dir, None);
    }

    #[test]
    fn test_read_invalid_config() {
        assert!(matches!(
            read_config_from_str("case_insensitive: [1, 2]\n"),
            Err(NfError::Yaml(_))
        ));
    }
}
