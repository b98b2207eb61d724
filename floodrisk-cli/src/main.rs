//! Flood risk CLI - boundary layer around the calibration engine

#![deny(warnings)]

// Global invariants enforced:
// - The engine is built once, before any reading is assessed
// - Deterministic output ordering

mod logging;

use anyhow::Context;
use clap::{Parser, Subcommand};
use floodrisk_core::config::{self, ResolvedConfig};
use floodrisk_core::report::{render_catalogue_json, render_catalogue_text};
use floodrisk_core::{build_engine, classify_scenario, render_json, render_text, Reading};
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "floodrisk")]
#[command(about = "Per-location flood risk classification from live rainfall and river readings")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess flood risk for every catalogued location
    Assess {
        #[command(flatten)]
        reading: ReadingArgs,

        /// Read the reading from a JSON file ("-" for stdin)
        #[arg(long, conflicts_with_all = ["rainfall_mm", "water_level_m"])]
        input: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Predictive model coefficients file (overrides config file)
        #[arg(long)]
        model: Option<PathBuf>,

        /// Upper bound of the Low band (overrides config file)
        #[arg(long)]
        medium_threshold: Option<f64>,

        /// Upper bound of the Medium band (overrides config file)
        #[arg(long)]
        high_threshold: Option<f64>,

        /// Assess locations one at a time on the current thread
        #[arg(long)]
        sequential: bool,
    },
    /// Print the scenario tier for a reading
    Tier {
        #[command(flatten)]
        reading: ReadingArgs,
    },
    /// List the location catalogue
    Locations {
        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Validate a configuration file
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Args)]
struct ReadingArgs {
    /// Accumulated rainfall in millimetres
    #[arg(long, allow_negative_numbers = true)]
    rainfall_mm: Option<f64>,

    /// River water level in metres
    #[arg(long, allow_negative_numbers = true)]
    water_level_m: Option<f64>,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate a config file without running an assessment
    Validate {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Show the resolved configuration (merged defaults + config file)
    Show {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Assess {
            reading,
            input,
            format,
            config: config_path,
            model,
            medium_threshold,
            high_threshold,
            sequential,
        } => {
            let reading = match input {
                Some(path) => read_reading(&path)?,
                None => reading.into_reading()?,
            };
            reading.validate().context("invalid reading")?;

            let mut resolved = load_config(config_path.as_deref())?;

            // CLI flags override config file values
            if let Some(model) = model {
                resolved.model_path = Some(model);
            }
            if let Some(medium) = medium_threshold {
                resolved.thresholds.medium = medium;
            }
            if let Some(high) = high_threshold {
                resolved.thresholds.high = high;
            }
            if sequential {
                resolved.parallel = false;
            }
            config::validate_thresholds(&resolved.thresholds)
                .context("invalid threshold flags")?;

            let engine = build_engine(&resolved);
            let assessment = engine.assess(&reading);
            match format {
                OutputFormat::Text => print!("{}", render_text(&assessment)),
                OutputFormat::Json => println!("{}", render_json(&assessment.results)),
            }
        }
        Commands::Tier { reading } => {
            let reading = reading.into_reading()?;
            reading.validate().context("invalid reading")?;
            println!("{}", classify_scenario(&reading));
        }
        Commands::Locations {
            format,
            config: config_path,
        } => {
            let resolved = load_config(config_path.as_deref())?;
            match format {
                OutputFormat::Text => print!("{}", render_catalogue_text(&resolved.catalogue)),
                OutputFormat::Json => println!("{}", render_catalogue_json(&resolved.catalogue)),
            }
        }
        Commands::Config { action } => handle_config(action)?,
    }

    Ok(())
}

impl ReadingArgs {
    fn into_reading(self) -> anyhow::Result<Reading> {
        match (self.rainfall_mm, self.water_level_m) {
            (Some(rainfall_mm), Some(water_level_m)) => {
                Ok(Reading::new(rainfall_mm, water_level_m))
            }
            _ => anyhow::bail!("both --rainfall-mm and --water-level-m are required"),
        }
    }
}

/// Parse a JSON reading from a file or stdin
fn read_reading(path: &Path) -> anyhow::Result<Reading> {
    let content = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read reading from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read reading file: {}", path.display()))?
    };

    serde_json::from_str(&content).context("failed to parse reading")
}

/// Load configuration from an explicit path or the current directory
fn load_config(config_path: Option<&Path>) -> anyhow::Result<ResolvedConfig> {
    let cwd = std::env::current_dir()?;
    let resolved =
        config::load_and_resolve(&cwd, config_path).context("failed to load configuration")?;
    if let Some(path) = &resolved.config_path {
        eprintln!("Using config: {}", path.display());
    }
    Ok(resolved)
}

fn handle_config(action: ConfigAction) -> anyhow::Result<()> {
    match action {
        ConfigAction::Validate { path } => {
            let cwd = std::env::current_dir()?;
            match path {
                Some(p) => {
                    config::load_config_file(&p)?;
                    println!("Config valid: {}", p.display());
                }
                None => match config::discover_config(&cwd)? {
                    Some((_, p)) => println!("Config valid: {}", p.display()),
                    None => println!("No config file found, using defaults"),
                },
            }
        }
        ConfigAction::Show { path } => {
            let resolved = load_config(path.as_deref())?;
            let source = resolved
                .config_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "defaults".to_string());
            let model = resolved
                .model_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "none (degraded mode)".to_string());

            println!("Config source: {}", source);
            println!("Thresholds:");
            println!("  Low:    risk <= {}", resolved.thresholds.medium);
            println!(
                "  Medium: {} < risk <= {}",
                resolved.thresholds.medium, resolved.thresholds.high
            );
            println!("  High:   risk > {}", resolved.thresholds.high);
            println!("Model: {}", model);
            println!("Locations: {}", resolved.catalogue.len());
            println!("Parallel: {}", resolved.parallel);
        }
    }
    Ok(())
}
