// Elevator Dispatch Simulator - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/elevator-dispatch-simulator
// ```
//
// Or with a scenario file and statistics:
//
// ```console
// $ ./target/release/elevator-dispatch-simulator --scenario tower.json --output-format jsonl --stats --verify
// ```

use anyhow::{Context, Result};
use clap::Parser;
use elevator_dispatch_simulator::events::{ElevatorEvent, EventRenderer};
use elevator_dispatch_simulator::facility::Building;
use elevator_dispatch_simulator::perf_span;
use elevator_dispatch_simulator::simulation::{verify, FleetStatistics, LoggingConfig, ScenarioGenerator};
use elevator_dispatch_simulator::types::config::CliArgs;
use elevator_dispatch_simulator::types::{OutputFormat, ScenarioConfig, SimulationConfig};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process;
use tracing::{error, info};

fn main() {
    // Parse CLI arguments first to check for special flags
    let args = CliArgs::parse();

    // Handle special CLI flags that don't require full initialization
    if args.print_config {
        match SimulationConfig::default().print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    // Initialize logging based on CLI flags
    let logging_result = if args.debug {
        LoggingConfig::init_debug()
    } else if args.verbose {
        LoggingConfig::init_verbose()
    } else {
        LoggingConfig::new().with_level(tracing::Level::WARN).init()
    };

    if let Err(e) = logging_result {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Starting Elevator Dispatch Simulator");

    if let Err(e) = run(args) {
        error!("Simulation failed: {:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }

    info!("Elevator Dispatch Simulator completed successfully");
}

fn run(args: CliArgs) -> Result<()> {
    let print_scenario = args.print_scenario;
    let dry_run = args.dry_run;

    // Load configuration from CLI arguments and optional config file
    let config = SimulationConfig::from_cli_args(args).context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;
    info!("Configuration loaded and validated successfully");

    let scenario = load_scenario(&config)?;
    if print_scenario {
        println!("{}", scenario.print_json()?);
        return Ok(());
    }

    let mut building = Building::from_scenario(&scenario).context("Failed to construct building")?;

    // Handle dry run mode
    if dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - simulation will not be executed.");
        print_configuration_summary(&config, &scenario);
        return Ok(());
    }

    let policy = config.get_policy().map_err(anyhow::Error::msg)?;
    let events = {
        let span = perf_span!("execute", passengers = scenario.passengers.len());
        let _entered = span.enter();
        building.execute(policy).context("Dispatch failed")?
    };

    let format = config.get_output_format().map_err(anyhow::Error::msg)?;
    write_events(&events, &building, format, config.output.as_deref())?;

    if config.stats {
        eprintln!("{}", FleetStatistics::from_run(&events, &building));
    }

    if config.verify {
        let report = verify(&events, &building).context("Replay verification failed")?;
        eprintln!(
            "Replay verified: {} events, {} passengers",
            report.events_checked, report.passengers_checked
        );
        for (elevator, load) in &report.peak_load {
            eprintln!("  - {} peak load: {} kg", elevator, load);
        }
    }

    Ok(())
}

/// Resolve the scenario from a file, the generator or the built-in demo
fn load_scenario(config: &SimulationConfig) -> Result<ScenarioConfig> {
    if let Some(path) = &config.scenario {
        info!("Loading scenario from {}", path);
        return ScenarioConfig::from_file(path)
            .with_context(|| format!("Failed to load scenario from {}", path));
    }

    if config.random {
        let mut generator = match config.seed {
            Some(seed) => ScenarioGenerator::with_seed(seed),
            None => ScenarioGenerator::new(),
        };
        return generator
            .generate(config.passenger_count)
            .context("Failed to generate random scenario");
    }

    info!("No scenario given, running the demonstration scenario");
    Ok(ScenarioConfig::default())
}

/// Write the event log to stdout or to `output`
fn write_events(
    events: &[ElevatorEvent],
    building: &Building,
    format: OutputFormat,
    output: Option<&str>,
) -> Result<()> {
    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create output file '{}'", path))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    match format {
        OutputFormat::Text => EventRenderer::new(building).write_all(events, &mut writer)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, events)?;
            writeln!(writer)?;
        }
        OutputFormat::Jsonl => {
            for event in events {
                serde_json::to_writer(&mut writer, event)?;
                writeln!(writer)?;
            }
        }
    }

    writer.flush().context("Failed to flush event output")?;
    if let Some(path) = output {
        info!("Wrote {} events to {}", events.len(), path);
    }
    Ok(())
}

/// Print configuration summary
fn print_configuration_summary(config: &SimulationConfig, scenario: &ScenarioConfig) {
    eprintln!("Configuration:");
    eprintln!("  Policy: {}", config.policy);
    eprintln!("  Output Format: {}", config.output_format);
    if let Some(seed) = config.seed {
        eprintln!("  Random Seed: {}", seed);
    }
    eprintln!("\nScenario:");
    eprintln!(
        "  Building: {} ({}), floors {} to {}",
        scenario.building.name,
        scenario.building.id,
        scenario.building.lowest_floor,
        scenario.building.highest_floor
    );
    eprintln!("  Start: {}", scenario.building.start_time);
    eprintln!("  Elevators: {}", scenario.elevators.len());
    eprintln!("  Passengers: {}", scenario.passengers.len());
    eprintln!();
}
