//! ph-config: simulator configuration file format and validation.
//!
//! All values are stored in the display units used on the diagram (psia, °F,
//! BTU/lb) and converted to SI core types by the accessors in [`convert`].

pub mod convert;
pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::{ValidationError, validate_config};

use tracing::info;

/// Highest configuration file version this build understands.
pub const LATEST_VERSION: u32 = 1;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Diagram geometry error: {0}")]
    Diagram(#[from] ph_diagram::DiagramError),
}

pub fn load_yaml(path: &std::path::Path) -> ConfigResult<SimulatorConfig> {
    let content = std::fs::read_to_string(path)?;
    let config = from_yaml_str(&content)?;
    info!(path = %path.display(), "loaded simulator configuration");
    Ok(config)
}

pub fn save_yaml(path: &std::path::Path, config: &SimulatorConfig) -> ConfigResult<()> {
    validate_config(config)?;
    std::fs::write(path, to_yaml_string(config)?)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> ConfigResult<SimulatorConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: SimulatorConfig = serde_json::from_str(&content)?;
    validate_config(&config)?;
    Ok(config)
}

pub fn save_json(path: &std::path::Path, config: &SimulatorConfig) -> ConfigResult<()> {
    validate_config(config)?;
    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Parse and validate a YAML document. Missing fields take their defaults.
pub fn from_yaml_str(content: &str) -> ConfigResult<SimulatorConfig> {
    let config: SimulatorConfig = serde_yaml::from_str(content)?;
    validate_config(&config)?;
    Ok(config)
}

pub fn to_yaml_string(config: &SimulatorConfig) -> ConfigResult<String> {
    Ok(serde_yaml::to_string(config)?)
}

/// Load `path` when given, otherwise the built-in defaults.
pub fn load_or_default(path: Option<&std::path::Path>) -> ConfigResult<SimulatorConfig> {
    match path {
        Some(path) => load_yaml(path),
        None => Ok(SimulatorConfig::default()),
    }
}
