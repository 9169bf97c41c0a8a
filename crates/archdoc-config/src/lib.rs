//! Configuration management for archdoc.
//!
//! Parses `archdoc.toml` with serde and discovers it in the current
//! directory or its parents. CLI flags override file values through
//! [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String values support `${VAR}` (error if unset) and `${VAR:-default}`.
//!
//! Expanded fields:
//! - `confluence.base_url`
//! - `confluence.username`
//! - `confluence.api_token`
//! - `confluence.space_key`
//! - `diagrams.workspace_id`
//!
//! ## Example
//!
//! ```toml
//! [confluence]
//! base_url = "https://acme.atlassian.net"
//! username = "bot@acme.com"
//! api_token = "${CONFLUENCE_API_TOKEN}"
//! space_key = "ARCH"
//!
//! [diagrams]
//! dir = "build/diagrams"
//! workspace_id = "12345"
//!
//! [export]
//! strip_title_heading = true
//! parent_page_id = "98765"
//! ```

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// Only `Some` values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override diagrams directory.
    pub diagrams_dir: Option<PathBuf>,
    /// Override workspace id filter.
    pub workspace_id: Option<String>,
    /// Override target space key.
    pub space_key: Option<String>,
    /// Override parent page id.
    pub parent_page_id: Option<String>,
    /// Override title heading removal.
    pub strip_title_heading: Option<bool>,
}

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "archdoc.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Diagram directory settings (paths are relative strings from TOML).
    diagrams: DiagramsConfigRaw,
    /// Export behavior.
    pub export: ExportConfig,
    /// Confluence connection.
    pub confluence: Option<ConfluenceConfig>,

    /// Resolved diagrams configuration (set after loading).
    #[serde(skip)]
    pub diagrams_resolved: DiagramsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DiagramsConfigRaw {
    dir: Option<String>,
    workspace_id: Option<String>,
}

/// Resolved diagrams configuration with absolute paths.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DiagramsConfig {
    /// Directory holding exported view images.
    pub dir: PathBuf,
    /// Only use `structurizr-<id>-*` files of this workspace.
    pub workspace_id: Option<String>,
}

/// Export behavior.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Remove the title heading from the page body.
    pub strip_title_heading: bool,
    /// Parent of newly created pages.
    pub parent_page_id: Option<String>,
}

/// Confluence Cloud connection.
#[derive(Debug, Deserialize)]
pub struct ConfluenceConfig {
    /// Site URL, e.g. `https://acme.atlassian.net`.
    pub base_url: String,
    /// Account email used for Basic auth.
    pub username: String,
    /// API token of the account.
    pub api_token: String,
    /// Key of the space pages are published to.
    pub space_key: String,
}

impl ConfluenceConfig {
    /// Validate that all required fields are properly set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any field is empty or has invalid format.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.base_url, "confluence.base_url")?;
        require_http_url(&self.base_url, "confluence.base_url")?;
        require_non_empty(&self.username, "confluence.username")?;
        require_non_empty(&self.api_token, "confluence.api_token")?;
        require_non_empty(&self.space_key, "confluence.space_key")?;
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`confluence.api_token`").
        field: String,
        /// Error message (e.g., "${`CONFLUENCE_API_TOKEN`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `archdoc.toml` in the current directory and parents, falling back
    /// to defaults relative to the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails
    /// or a value is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(dir) = &settings.diagrams_dir {
            self.diagrams_resolved.dir.clone_from(dir);
        }
        if let Some(workspace_id) = &settings.workspace_id {
            self.diagrams_resolved.workspace_id = Some(workspace_id.clone());
        }
        if let Some(parent) = &settings.parent_page_id {
            self.export.parent_page_id = Some(parent.clone());
        }
        if let Some(strip) = settings.strip_title_heading {
            self.export.strip_title_heading = strip;
        }
        if let (Some(space_key), Some(confluence)) = (&settings.space_key, &mut self.confluence) {
            confluence.space_key.clone_from(space_key);
        }
    }

    /// Get validated Confluence configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the section is missing or invalid.
    pub fn require_confluence(&self) -> Result<&ConfluenceConfig, ConfigError> {
        let conf = self.confluence.as_ref().ok_or_else(|| {
            ConfigError::Validation("[confluence] section required in config".into())
        })?;
        conf.validate()?;
        Ok(conf)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let start = std::env::current_dir().ok()?;
        Self::discover_from(&start)
    }

    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn default_with_base(base: &Path) -> Self {
        Self {
            diagrams: DiagramsConfigRaw::default(),
            export: ExportConfig::default(),
            confluence: None,
            diagrams_resolved: DiagramsConfig {
                dir: base.join("diagrams"),
                workspace_id: None,
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// The `[confluence]` section is checked by [`Self::require_confluence`]
    /// since only publishing commands need it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(parent) = &self.export.parent_page_id {
            require_non_empty(parent, "export.parent_page_id")?;
        }
        if let Some(workspace_id) = &self.diagrams_resolved.workspace_id {
            require_non_empty(workspace_id, "diagrams.workspace_id")?;
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref workspace_id) = self.diagrams.workspace_id {
            self.diagrams.workspace_id =
                Some(expand::expand_env(workspace_id, "diagrams.workspace_id")?);
        }

        if let Some(ref mut confluence) = self.confluence {
            confluence.base_url = expand::expand_env(&confluence.base_url, "confluence.base_url")?;
            confluence.username = expand::expand_env(&confluence.username, "confluence.username")?;
            confluence.api_token =
                expand::expand_env(&confluence.api_token, "confluence.api_token")?;
            confluence.space_key =
                expand::expand_env(&confluence.space_key, "confluence.space_key")?;
        }

        Ok(())
    }

    /// Resolve relative paths against the config file directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.diagrams_resolved = DiagramsConfig {
            dir: config_dir.join(self.diagrams.dir.as_deref().unwrap_or("diagrams")),
            workspace_id: self.diagrams.workspace_id.clone(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FULL: &str = r#"
[confluence]
base_url = "https://acme.atlassian.net"
username = "bot@acme.com"
api_token = "token123"
space_key = "ARCH"

[diagrams]
dir = "build/diagrams"
workspace_id = "42"

[export]
strip_title_heading = true
parent_page_id = "1000"
"#;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.diagrams_resolved.dir, PathBuf::from("/test/diagrams"));
        assert_eq!(config.diagrams_resolved.workspace_id, None);
        assert!(!config.export.strip_title_heading);
        assert!(config.confluence.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.confluence.is_none());
        assert!(config.export.parent_page_id.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let mut config: Config = toml::from_str(FULL).unwrap();
        config.resolve_paths(Path::new("/project"));

        let confluence = config.require_confluence().unwrap();
        assert_eq!(confluence.base_url, "https://acme.atlassian.net");
        assert_eq!(confluence.username, "bot@acme.com");
        assert_eq!(confluence.api_token, "token123");
        assert_eq!(confluence.space_key, "ARCH");
        assert_eq!(
            config.diagrams_resolved,
            DiagramsConfig {
                dir: PathBuf::from("/project/build/diagrams"),
                workspace_id: Some("42".to_owned()),
            }
        );
        assert!(config.export.strip_title_heading);
        assert_eq!(config.export.parent_page_id.as_deref(), Some("1000"));
    }

    #[test]
    fn test_require_confluence_missing_section() {
        let config = Config::default_with_base(Path::new("/test"));
        let err = config.require_confluence().unwrap_err();
        assert!(err.to_string().contains("[confluence] section required"));
    }

    #[test]
    fn test_confluence_validation() {
        let toml = r#"
[confluence]
base_url = "acme.atlassian.net"
username = "bot"
api_token = "t"
space_key = "ARCH"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let err = config.require_confluence().unwrap_err();
        assert!(err.to_string().contains("must start with http"), "{err}");

        let toml = r#"
[confluence]
base_url = "https://acme.atlassian.net"
username = "bot"
api_token = ""
space_key = "ARCH"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let err = config.require_confluence().unwrap_err();
        assert!(err.to_string().contains("confluence.api_token cannot be empty"), "{err}");
    }

    #[test]
    fn test_confluence_section_requires_all_fields() {
        let toml = r#"
[confluence]
base_url = "https://acme.atlassian.net"
"#;
        assert!(toml::from_str::<Config>(toml).is_err());
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config: Config = toml::from_str(FULL).unwrap();
        config.resolve_paths(Path::new("/project"));
        let overrides = CliSettings {
            diagrams_dir: Some(PathBuf::from("/tmp/out")),
            space_key: Some("DOCS".to_owned()),
            strip_title_heading: Some(false),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.diagrams_resolved.dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.diagrams_resolved.workspace_id.as_deref(), Some("42"));
        assert_eq!(config.confluence.unwrap().space_key, "DOCS");
        assert!(!config.export.strip_title_heading);
        assert_eq!(config.export.parent_page_id.as_deref(), Some("1000"));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, FULL).unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
        assert_eq!(
            config.diagrams_resolved.dir,
            dir.path().join("build/diagrams")
        );
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/archdoc.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_rejects_empty_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[export]\nparent_page_id = \"\"\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_discover_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();
        let nested = dir.path().join("docs/architecture");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(
            Config::discover_from(&nested),
            Some(dir.path().join(CONFIG_FILENAME))
        );
    }
}
