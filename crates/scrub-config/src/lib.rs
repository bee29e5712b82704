use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// User configuration for scrub
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Match terms case-insensitively unless told otherwise
    #[serde(default)]
    pub case_insensitive: bool,

    /// Command printed at the start of every rewrite directive
    #[serde(default = "default_rewrite_tool")]
    pub rewrite_tool: String,

    #[serde(default)]
    pub git: GitConfig,

    #[serde(default)]
    pub ignore: IgnoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitConfig {
    #[serde(default = "default_git_binary")]
    pub binary: String,

    /// Arguments producing the history export
    #[serde(default = "default_git_args")]
    pub args: Vec<String>,
}

/// Paths never reported as file matches
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IgnoreConfig {
    #[serde(default)]
    pub patterns: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            case_insensitive: false,
            rewrite_tool: default_rewrite_tool(),
            git: GitConfig::default(),
            ignore: IgnoreConfig::default(),
        }
    }
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            binary: default_git_binary(),
            args: default_git_args(),
        }
    }
}

fn default_rewrite_tool() -> String {
    "git-filter-repo".to_string()
}

fn default_git_binary() -> String {
    "git".to_string()
}

fn default_git_args() -> Vec<String> {
    vec![
        "log".to_string(),
        "--all".to_string(),
        "--full-history".to_string(),
        "-p".to_string(),
        "-U0".to_string(),
        "--no-color".to_string(),
    ]
}

impl Config {
    /// Load config from a specific file, falling back to defaults if absent
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Write the default config to `path`, refusing to overwrite
    pub fn write_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            anyhow::bail!("{} already exists", path.display());
        }

        let config = Config::default();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(&config)?;
        std::fs::write(path, content)?;
        Ok(config)
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "scrub", "scrub") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.scrub/config.toml")
        }
    }
}
