use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ph_config::ConfigError),

    #[error("Cycle error: {0}")]
    Cycle(#[from] ph_cycle::CycleError),

    #[error("Property error: {0}")]
    Fluid(#[from] ph_fluids::FluidError),

    #[error("Diagram error: {0}")]
    Diagram(#[from] ph_diagram::DiagramError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type CliResult<T> = Result<T, CliError>;
