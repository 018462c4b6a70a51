use menuboard_core::{DocumentSource, FileStateStore, Settings};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Public menu document: a URL or a file path
    pub menu: ConfigValue<String>,
    /// Local copy used by the editor when the proxy is unreachable
    pub fallback: ConfigValue<Option<String>>,
    /// Storage proxy endpoint
    pub proxy_url: ConfigValue<Option<String>>,
    /// File remembering the chosen language
    pub state_path: ConfigValue<PathBuf>,
    /// Branding, theme and languages
    pub settings: Settings,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    menu: Option<String>,
    fallback: Option<String>,
    state_path: Option<PathBuf>,
    #[serde(flatten)]
    settings: Settings,
}

const DEFAULT_MENU: &str = "menu.json";

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut menu = ConfigValue::new(DEFAULT_MENU.to_string(), ConfigSource::Default);
        let mut fallback = ConfigValue::new(None, ConfigSource::Default);
        let mut proxy_url = ConfigValue::new(None, ConfigSource::Default);
        let mut state_path =
            ConfigValue::new(FileStateStore::default_path(), ConfigSource::Default);
        let mut settings = Settings::default();
        let mut config_file = None;

        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(location) = file_config.menu {
                menu = ConfigValue::new(resolve_location(&path, location), ConfigSource::File);
            }
            if let Some(location) = file_config.fallback {
                fallback = ConfigValue::new(
                    Some(resolve_location(&path, location)),
                    ConfigSource::File,
                );
            }
            if let Some(state) = file_config.state_path {
                state_path = ConfigValue::new(resolve_path(&path, state), ConfigSource::File);
            }
            if let Some(url) = &file_config.settings.proxy_url {
                proxy_url = ConfigValue::new(Some(url.clone()), ConfigSource::File);
            }
            settings = file_config.settings;
        }

        // Apply environment variable overrides
        if let Ok(location) = std::env::var("MENUBOARD_MENU_PATH") {
            menu = ConfigValue::new(location, ConfigSource::Environment);
        }
        if let Ok(url) = std::env::var("MENUBOARD_MENU_URL") {
            menu = ConfigValue::new(url, ConfigSource::Environment);
        }
        if let Ok(location) = std::env::var("MENUBOARD_FALLBACK_PATH") {
            fallback = ConfigValue::new(Some(location), ConfigSource::Environment);
        }
        if let Ok(url) = std::env::var("MENUBOARD_PROXY_URL") {
            proxy_url = ConfigValue::new(Some(url), ConfigSource::Environment);
        }
        if let Ok(state) = std::env::var("MENUBOARD_STATE_PATH") {
            state_path = ConfigValue::new(PathBuf::from(state), ConfigSource::Environment);
        }

        settings.proxy_url = proxy_url.value.clone();

        Ok(Self {
            menu,
            fallback,
            proxy_url,
            state_path,
            settings,
            config_file,
        })
    }

    /// Where the public page fetches the menu from.
    pub fn menu_source(&self) -> DocumentSource {
        DocumentSource::parse(&self.menu.value)
    }

    /// Local copy for the editor; the public menu unless set explicitly.
    pub fn fallback_source(&self) -> DocumentSource {
        match &self.fallback.value {
            Some(location) => DocumentSource::parse(location),
            None => self.menu_source(),
        }
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/menuboard/
    /// - macOS: ~/Library/Application Support/menuboard/
    /// - Windows: %APPDATA%/menuboard/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("menuboard")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

/// Resolves relative paths against the config file's directory
fn resolve_path(config_path: &Path, path: PathBuf) -> PathBuf {
    if path.is_relative() {
        config_path.parent().map(|p| p.join(&path)).unwrap_or(path)
    } else {
        path
    }
}

fn resolve_location(config_path: &Path, location: String) -> String {
    match DocumentSource::parse(&location) {
        DocumentSource::Url(_) => location,
        DocumentSource::Path(path) => resolve_path(config_path, path)
            .to_string_lossy()
            .into_owned(),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
