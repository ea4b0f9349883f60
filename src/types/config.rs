//! Configuration structures for the dispatch simulator
//!
//! This module contains the run configuration and validation logic used to
//! control which scenario is simulated and how its results are reported.

use super::{DispatchPolicy, OutputFormat};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Largest passenger count accepted for generated scenarios
pub const MAX_GENERATED_PASSENGERS: usize = 100_000;

/// Command line arguments for the dispatch simulator
#[derive(Parser, Debug, Clone)]
#[command(
    name = "elevator-dispatch-simulator",
    version,
    about = "Discrete-event simulator for elevator dispatch in a multi-floor building",
    long_about = "Simulates passengers calling elevators in a building and prints a \
    time-ordered log of arrivals, boardings, idling and overloads.

    The scenario comes from a JSON file (--scenario), a random generator
    (--random), or the built-in demonstration scenario.

    Configuration precedence (highest to lowest):
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Supported configuration file formats: JSON (.json)

    Use --print-config to generate a template configuration file and
    --print-scenario to generate a template scenario."
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Scenario file describing the building, fleet and passengers
    #[arg(
        short,
        long,
        help = "Scenario file path (JSON format)",
        long_help = "Path to a JSON scenario with the building layout, elevator fleet and passengers. Default: built-in demonstration scenario"
    )]
    pub scenario: Option<String>,

    /// Generate a random scenario instead of loading one
    #[arg(long, help = "Generate a random scenario")]
    pub random: bool,

    /// Random seed for reproducible results
    #[arg(long, help = "Random seed for reproducible results")]
    pub seed: Option<u64>,

    /// Number of passengers in a generated scenario
    #[arg(
        long,
        help = "Number of passengers in a generated scenario",
        long_help = "Number of passengers created by --random. Must be greater than 0. Default: 10"
    )]
    pub passenger_count: Option<usize>,

    /// Dispatch policy
    #[arg(
        long,
        help = "Dispatch policy (fcfs)",
        long_help = "Dispatch policy used to serve passengers. Only fcfs is implemented; sstf and look are rejected at run time. Default: fcfs"
    )]
    pub policy: Option<String>,

    /// Output format for the event log
    #[arg(
        long,
        help = "Output format (text, json or jsonl)",
        long_help = "Output format for the event log. Supported formats: text, json, jsonl. Default: text"
    )]
    pub output_format: Option<String>,

    /// Output file for the event log
    #[arg(short, long, help = "Write the event log to this file instead of stdout")]
    pub output: Option<String>,

    /// Print fleet statistics after the run
    #[arg(long, help = "Print fleet statistics to stderr")]
    pub stats: bool,

    /// Replay the event log and check its invariants
    #[arg(long, help = "Verify the event log after the run")]
    pub verify: bool,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Dry run mode - validate configuration without running simulation
    #[arg(long, help = "Validate configuration and scenario without running simulation")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,

    /// Print the scenario that would be simulated and exit
    #[arg(long, help = "Print the resolved scenario in JSON format and exit")]
    pub print_scenario: bool,
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Scenario file path
    pub scenario: Option<String>,

    /// Generate a random scenario
    pub random: Option<bool>,

    /// Random seed for reproducible results
    pub seed: Option<u64>,

    /// Number of passengers in a generated scenario
    pub passenger_count: Option<usize>,

    /// Dispatch policy
    pub policy: Option<String>,

    /// Output format for the event log
    pub output_format: Option<String>,

    /// Output file for the event log
    pub output: Option<String>,

    /// Print fleet statistics after the run
    pub stats: Option<bool>,

    /// Verify the event log after the run
    pub verify: Option<bool>,
}

/// Configuration for a simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Scenario file path (`None` uses the demonstration scenario)
    pub scenario: Option<String>,

    /// Generate a random scenario
    pub random: bool,

    /// Random seed for reproducible results
    pub seed: Option<u64>,

    /// Number of passengers in a generated scenario
    pub passenger_count: usize,

    /// Dispatch policy
    pub policy: String,

    /// Output format for the event log
    pub output_format: String,

    /// Output file for the event log (`None` writes to stdout)
    pub output: Option<String>,

    /// Print fleet statistics after the run
    pub stats: bool,

    /// Verify the event log after the run
    pub verify: bool,
}

/// Configuration loading and validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),
}

/// Validation errors for simulation configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    /// Passenger count is invalid
    #[error("Passenger count must be between 1 and {max}, got {count}")]
    InvalidPassengerCount {
        /// The rejected count
        count: usize,
        /// Largest accepted count
        max: usize,
    },

    /// Dispatch policy is unknown
    #[error("Invalid dispatch policy: {0}")]
    InvalidPolicy(String),

    /// Output format is unknown
    #[error("Invalid output format: {0}")]
    InvalidOutputFormat(String),

    /// Both a scenario file and random generation were requested
    #[error("Cannot combine scenario file {0} with random scenario generation")]
    ConflictingScenarioSource(String),
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            scenario: None,
            random: false,
            seed: None,
            passenger_count: 10,
            policy: "fcfs".to_string(),
            output_format: "text".to_string(),
            output: None,
            stats: false,
            verify: false,
        }
    }
}

impl SimulationConfig {
    /// Create a new configuration from command line arguments and optional config file
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::from_cli_args(args)
    }

    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        // Start with default configuration
        let mut config = Self::default();

        // Load from config file if specified
        if let Some(config_path) = &args.config {
            config = Self::from_file(config_path)?;
        }

        // Override with command line arguments (CLI takes precedence)
        Self::apply_cli_overrides(&mut config, args);

        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Ok(Self::from_config_file(config_file))
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Create configuration from a config file, merging with defaults
    fn from_config_file(config_file: ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            scenario: config_file.scenario.or(defaults.scenario),
            random: config_file.random.unwrap_or(defaults.random),
            seed: config_file.seed.or(defaults.seed),
            passenger_count: config_file.passenger_count.unwrap_or(defaults.passenger_count),
            policy: config_file.policy.unwrap_or(defaults.policy),
            output_format: config_file.output_format.unwrap_or(defaults.output_format),
            output: config_file.output.or(defaults.output),
            stats: config_file.stats.unwrap_or(defaults.stats),
            verify: config_file.verify.unwrap_or(defaults.verify),
        }
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: CliArgs) {
        if let Some(value) = args.scenario {
            config.scenario = Some(value);
        }
        if let Some(value) = args.seed {
            config.seed = Some(value);
        }
        if let Some(value) = args.passenger_count {
            config.passenger_count = value;
        }
        if let Some(value) = args.policy {
            config.policy = value;
        }
        if let Some(value) = args.output_format {
            config.output_format = value;
        }
        if let Some(value) = args.output {
            config.output = Some(value);
        }

        // Switches can only turn a feature on
        config.random |= args.random;
        config.stats |= args.stats;
        config.verify |= args.verify;
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.random {
            if self.passenger_count == 0 || self.passenger_count > MAX_GENERATED_PASSENGERS {
                return Err(ConfigValidationError::InvalidPassengerCount {
                    count: self.passenger_count,
                    max: MAX_GENERATED_PASSENGERS,
                });
            }
            if let Some(path) = &self.scenario {
                return Err(ConfigValidationError::ConflictingScenarioSource(path.clone()));
            }
        }

        self.get_policy().map_err(ConfigValidationError::InvalidPolicy)?;
        self.get_output_format()
            .map_err(ConfigValidationError::InvalidOutputFormat)?;

        Ok(())
    }

    /// Get the dispatch policy as an enum value
    pub fn get_policy(&self) -> Result<DispatchPolicy, String> {
        self.policy.parse()
    }

    /// Get the output format as an enum value
    pub fn get_output_format(&self) -> Result<OutputFormat, String> {
        self.output_format.parse()
    }
}
