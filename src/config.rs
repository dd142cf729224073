use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration loaded from .pr-diff-deck.toml.
/// All fields are optional — the tool works with zero config.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// GitHub-specific settings
    #[serde(default)]
    pub github: GitHubConfig,

    /// Limits and layout of the diff viewer
    #[serde(default)]
    pub viewer: ViewerConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitHubConfig {
    /// GitHub API token. If None, falls back to GITHUB_TOKEN env var.
    pub token: Option<String>,
    /// API root, for GitHub Enterprise installs
    pub api_base: Option<String>,
}

impl GitHubConfig {
    pub fn api_base(&self) -> &str {
        self.api_base.as_deref().unwrap_or(DEFAULT_API_BASE)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Files kept from the API response
    pub max_files: usize,
    /// Patches longer than this are cut and marked as truncated
    pub max_patch_bytes: usize,
    /// File count from which the "showing first files" banner appears
    pub large_pr_threshold: usize,
    /// Characters per side in the split view
    pub column_width: usize,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            max_files: 10,
            max_patch_bytes: 1000,
            large_pr_threshold: 20,
            column_width: 60,
        }
    }
}

impl Config {
    /// Load configuration from .pr-diff-deck.toml in the current directory.
    /// Returns default config if the file doesn't exist. The GITHUB_TOKEN
    /// fallback is applied by `github_token()`.
    pub fn load() -> Result<Config, ConfigError> {
        let path = Path::new(".pr-diff-deck.toml");
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load from a specific path (useful for testing).
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Resolve the GitHub token: config file value takes precedence,
    /// falls back to GITHUB_TOKEN env var.
    pub fn github_token(&self) -> Option<String> {
        self.github
            .token
            .clone()
            .or_else(|| std::env::var("GITHUB_TOKEN").ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.github.token.is_none());
        assert_eq!(config.github.api_base(), DEFAULT_API_BASE);
        assert_eq!(config.viewer.max_files, 10);
        assert_eq!(config.viewer.max_patch_bytes, 1000);
        assert_eq!(config.viewer.large_pr_threshold, 20);
    }

    #[test]
    fn test_parse_config_toml() {
        let toml_str = r#"
[github]
api_base = "https://ghe.example.com/api/v3"

[viewer]
max_files = 25
column_width = 80
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.github.api_base(), "https://ghe.example.com/api/v3");
        assert_eq!(config.viewer.max_files, 25);
        assert_eq!(config.viewer.column_width, 80);
        // Unset viewer fields keep their defaults.
        assert_eq!(config.viewer.max_patch_bytes, 1000);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join("pr_diff_deck_config_test.toml");
        std::fs::write(&path, "[github]\ntoken = \"abc\"\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.github_token().as_deref(), Some("abc"));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_from_leaves_token_to_env_fallback() {
        let path = std::env::temp_dir().join("pr_diff_deck_config_no_token.toml");
        std::fs::write(&path, "[viewer]\nmax_files = 5\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert!(config.github.token.is_none());
        assert_eq!(config.github_token(), std::env::var("GITHUB_TOKEN").ok());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_from_invalid_toml() {
        let path = std::env::temp_dir().join("pr_diff_deck_config_bad.toml");
        std::fs::write(&path, "[viewer\nmax_files = ").unwrap();
        assert!(matches!(Config::load_from(&path), Err(ConfigError::Parse(_))));
        std::fs::remove_file(&path).ok();
    }
}
