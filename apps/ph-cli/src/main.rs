mod error;
mod report;

use clap::{Parser, Subcommand, ValueEnum};
use error::{CliError, CliResult};
use ph_config::{ProviderKind, SimulatorConfig, validate_config};
use ph_core::units::Pressure;
use ph_cycle::{CycleParameters, Fault, ParameterLimits, compute_cycle};
use ph_diagram::{CoordinateMapper, RangePolicy, Viewport};
use report::{CycleReport, DomeRow};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ph-cli")]
#[command(about = "P-h diagram refrigeration cycle calculator", long_about = None)]
struct Cli {
    /// Simulator configuration YAML (defaults are built in)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the property backend from the configuration
    #[arg(long, global = true, value_enum)]
    provider: Option<ProviderArg>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ProviderArg {
    Coolprop,
    Surrogate,
}

impl From<ProviderArg> for ProviderKind {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Coolprop => ProviderKind::CoolProp,
            ProviderArg::Surrogate => ProviderKind::Surrogate,
        }
    }
}

#[derive(Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute one cycle and print its state points and performance
    Compute {
        /// Evaporating pressure [psia]
        #[arg(long)]
        evap: Option<f64>,
        /// Condensing pressure [psia]
        #[arg(long)]
        cond: Option<f64>,
        /// Superheat [°F]
        #[arg(long)]
        superheat: Option<f64>,
        /// Subcooling [°F]
        #[arg(long)]
        subcooling: Option<f64>,
        /// Compressor isentropic efficiency (0, 1]
        #[arg(long)]
        efficiency: Option<f64>,
        /// Active fault: none, low_charge, high_charge, dirty_condenser, dirty_evaporator
        #[arg(long, default_value = "none")]
        fault: String,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Sample the saturation dome over the configured pressure axis
    Dome {
        /// Number of log-spaced samples (defaults to the configured count)
        #[arg(long)]
        samples: Option<usize>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// List the fault heuristics in effect
    Faults,
    /// Configuration file helpers
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the effective configuration as YAML
    Show,
    /// Validate a configuration file
    Validate {
        /// Path to the configuration YAML file
        path: PathBuf,
    },
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = ph_config::load_or_default(cli.config.as_deref())?;
    if let Some(provider) = cli.provider {
        config.provider = provider.into();
    }

    match cli.command {
        Commands::Compute {
            evap,
            cond,
            superheat,
            subcooling,
            efficiency,
            fault,
            format,
        } => {
            let overrides = Overrides {
                evap,
                cond,
                superheat,
                subcooling,
                efficiency,
            };
            cmd_compute(&config, &overrides, &fault, format)
        }
        Commands::Dome { samples, format } => cmd_dome(&config, samples, format),
        Commands::Faults => {
            print!("{}", report::fault_table(&config.faults.to_table()));
            Ok(())
        }
        Commands::Config(ConfigCommands::Show) => cmd_config_show(&config),
        Commands::Config(ConfigCommands::Validate { path }) => cmd_config_validate(&path),
    }
}

struct Overrides {
    evap: Option<f64>,
    cond: Option<f64>,
    superheat: Option<f64>,
    subcooling: Option<f64>,
    efficiency: Option<f64>,
}

fn cmd_compute(
    config: &SimulatorConfig,
    overrides: &Overrides,
    fault: &str,
    format: OutputFormat,
) -> CliResult<()> {
    let fault: Fault = fault.parse().map_err(CliError::InvalidInput)?;
    let mut defaults = config.defaults.clone();
    if let Some(v) = overrides.evap {
        defaults.evaporating_psia = v;
    }
    if let Some(v) = overrides.cond {
        defaults.condensing_psia = v;
    }
    if let Some(v) = overrides.superheat {
        defaults.superheat_f = v;
    }
    if let Some(v) = overrides.subcooling {
        defaults.subcooling_f = v;
    }
    if let Some(v) = overrides.efficiency {
        defaults.efficiency = v;
    }

    let provider = config.provider.build();
    let refrigerant = config.refrigerant()?;
    let limits = config.parameter_limits();
    let requested = defaults.to_parameters();
    let params = clamp_to_limits(&requested, &limits, provider.critical_pressure(refrigerant)?);
    if params != requested {
        warn!(
            evap_psia = defaults.evaporating_psia,
            cond_psia = defaults.condensing_psia,
            "parameters clamped to the allowed envelope"
        );
    }

    info!(provider = provider.name(), %refrigerant, %fault, "computing cycle");
    let result = compute_cycle(
        provider.as_ref(),
        refrigerant,
        &params,
        fault,
        &config.faults.to_table(),
        &limits,
    )?;

    let report = CycleReport::new(&result, provider.name());
    match format {
        OutputFormat::Table => print!("{}", report.to_table()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

/// Pull user-supplied parameters inside the limits instead of rejecting them.
fn clamp_to_limits(
    params: &CycleParameters,
    limits: &ParameterLimits,
    critical_pressure: Pressure,
) -> CycleParameters {
    let contained = limits.envelope(critical_pressure).contain(params);
    CycleParameters {
        superheat: limits.clamp_superheat(params.superheat),
        subcooling: limits.clamp_subcooling(params.subcooling),
        efficiency: limits.clamp_efficiency(params.efficiency),
        ..contained
    }
}

fn cmd_dome(
    config: &SimulatorConfig,
    samples: Option<usize>,
    format: OutputFormat,
) -> CliResult<()> {
    let provider = config.provider.build();
    let axis = config.axes.to_axis_range()?;
    // Geometry is irrelevant here; only the axis bounds drive sampling
    let viewport = Viewport::new(0.0, 1.0, 0.0, 1.0)?;
    let mapper = CoordinateMapper::new(axis, viewport, RangePolicy::Reject);
    let count = samples.unwrap_or(config.axes.dome_samples);
    let rows: Vec<DomeRow> = mapper
        .dome_curve(provider.as_ref(), config.refrigerant()?, count)?
        .map(|sample| DomeRow::from(&sample))
        .collect();

    match format {
        OutputFormat::Table => print!("{}", report::dome_table(&rows)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
    }
    Ok(())
}

fn cmd_config_show(config: &SimulatorConfig) -> CliResult<()> {
    validate_config(config).map_err(ph_config::ConfigError::from)?;
    print!("{}", ph_config::to_yaml_string(config)?);
    Ok(())
}

fn cmd_config_validate(path: &Path) -> CliResult<()> {
    println!("Validating configuration: {}", path.display());
    ph_config::load_yaml(path)?;
    println!("✓ Configuration is valid");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ph_core::units::display::{psia, to_psia};

    fn p_crit() -> Pressure {
        psia(588.7)
    }

    #[test]
    fn inverted_pressures_are_clamped_not_rejected() {
        let limits = ParameterLimits::default();
        let requested = CycleParameters::imperial(150.0, 50.0, 10.0, 5.0, 0.75);
        let params = clamp_to_limits(&requested, &limits, p_crit());
        assert!((to_psia(params.condensing_pressure) - 50.0).abs() < 1e-9);
        assert!((to_psia(params.evaporating_pressure) - 45.0).abs() < 1e-9);
        assert!(params.validate(p_crit()).is_ok());
    }

    #[test]
    fn out_of_range_overrides_land_on_the_limits() {
        let limits = ParameterLimits::default();
        let requested = CycleParameters::imperial(8.0, 450.0, -5.0, 2.0, 1.4);
        let params = clamp_to_limits(&requested, &limits, p_crit());
        assert!((to_psia(params.evaporating_pressure) - 10.0).abs() < 1e-9);
        assert!((to_psia(params.condensing_pressure) - 400.0).abs() < 1e-9);
        assert_eq!(params.superheat, limits.min_superheat);
        assert_eq!(params.subcooling, requested.subcooling);
        assert_eq!(params.efficiency, 1.0);
    }

    #[test]
    fn parameters_inside_limits_pass_through() {
        let requested = CycleParameters::default();
        let params = clamp_to_limits(&requested, &ParameterLimits::default(), p_crit());
        assert_eq!(params, requested);
    }
}
