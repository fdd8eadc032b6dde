use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{WrapErr, bail};

use propplan::report::{RunReport, render_comparison, render_text};
use propplan::scenario_file::{example_scenario, load_scenario, save_scenario};
use propplan::init_logging;
use propplan_core::config::Scenario;
use propplan_core::simulation::compare_scenarios;

#[derive(Parser, Debug)]
#[command(name = "propplan")]
#[command(about = "Plan when a queue of property purchases becomes affordable")]
struct Args {
    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate one scenario file
    Run {
        scenario: PathBuf,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
        /// Include the period-by-period table
        #[arg(long)]
        periods: bool,
    },
    /// Simulate several scenario files side by side
    Compare {
        #[arg(required = true)]
        scenarios: Vec<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Write a starter scenario file
    Init {
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn run(path: PathBuf, json: bool, periods: bool) -> color_eyre::Result<()> {
    let scenario = load_scenario(&path)?;
    let output = scenario
        .simulate()
        .wrap_err_with(|| format!("invalid scenario {}", path.display()))?;
    let report = RunReport::new(&scenario, output);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_text(&report, periods));
    }
    Ok(())
}

fn compare(paths: Vec<PathBuf>, json: bool) -> color_eyre::Result<()> {
    let scenarios = paths
        .iter()
        .map(|path| load_scenario(path))
        .collect::<Result<Vec<Scenario>, _>>()?;

    let mut reports = Vec::with_capacity(scenarios.len());
    for ((scenario, result), path) in scenarios.iter().zip(compare_scenarios(&scenarios)).zip(&paths) {
        let output = result.wrap_err_with(|| format!("invalid scenario {}", path.display()))?;
        reports.push(RunReport::new(scenario, output));
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        print!("{}", render_comparison(&reports));
    }
    Ok(())
}

fn init(path: PathBuf, force: bool) -> color_eyre::Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    save_scenario(&path, &example_scenario())?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let _guard = init_logging(&args.log_level, args.log_file.as_deref())?;

    match args.command {
        Command::Run {
            scenario,
            json,
            periods,
        } => run(scenario, json, periods),
        Command::Compare { scenarios, json } => compare(scenarios, json),
        Command::Init { path, force } => init(path, force),
    }
}
