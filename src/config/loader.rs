//! Configuration loading from disk.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::RelayConfig;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be opened or read.
    #[error("can't open config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file was read but its content is not a valid configuration.
    #[error("can't parse config file [{}]: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    /// The defaults could not be serialized.
    #[error("can't render default config: {0}")]
    Render(#[source] ParseError),

    /// The rendered template could not be written out.
    #[error("can't write default config: {0}")]
    Write(#[source] io::Error),
}

impl ConfigError {
    pub fn is_read(&self) -> bool {
        matches!(self, ConfigError::Read { .. })
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, ConfigError::Parse { .. })
    }
}

/// Underlying format error.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),
}

/// Document format of a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigFormat {
    #[default]
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// `.toml` files are TOML, everything else is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Yaml,
        }
    }

    /// Parse `content` and overlay every present key onto the defaults.
    pub fn parse(self, content: &str) -> Result<RelayConfig, ParseError> {
        if is_blank(content) {
            return Ok(default_config());
        }
        match self {
            ConfigFormat::Yaml => Ok(serde_yaml::from_str(content)?),
            ConfigFormat::Toml => Ok(toml::from_str(content)?),
        }
    }

    pub fn render(self, config: &RelayConfig) -> Result<String, ParseError> {
        match self {
            ConfigFormat::Yaml => Ok(serde_yaml::to_string(config)?),
            ConfigFormat::Toml => Ok(toml::to_string(config)?),
        }
    }
}

// Empty or comment-only documents mean "use the defaults".
fn is_blank(content: &str) -> bool {
    content.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    })
}

/// The built-in baseline configuration.
pub fn default_config() -> RelayConfig {
    RelayConfig::default()
}

/// Load configuration from a YAML or TOML file, overlaid on the defaults.
///
/// Only syntactic and type errors are rejected. Values are not range-checked.
pub fn load_config(path: &Path) -> Result<RelayConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    ConfigFormat::from_path(path)
        .parse(&content)
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Serialize the defaults in the same form `load_config` accepts.
pub fn render_default_config(format: ConfigFormat) -> Result<String, ConfigError> {
    format.render(&default_config()).map_err(ConfigError::Render)
}

/// Write the default configuration template to stdout.
pub fn print_default_config(format: ConfigFormat) -> Result<(), ConfigError> {
    let rendered = render_default_config(format)?;
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(rendered.as_bytes())
        .and_then(|_| stdout.flush())
        .map_err(ConfigError::Write)
}
