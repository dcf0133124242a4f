//! Notif Bundler CLI
//!
//! Train per-user activity rates from recorded notification streams and
//! replay streams through the bundling engine.

use clap::{Parser, Subcommand};
use notif_bundler::{
    config::Config,
    core::{RateModel, BUNDLES_PER_DAY},
    ingest::read_events,
    simulate::run_simulation,
    sink::{MemorySink, NullSink, PrintSink},
    VERSION,
};
use statrs::statistics::Statistics;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "notif-bundler")]
#[command(version = VERSION)]
#[command(about = "Rate-aware bundling of friend-activity notifications", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Learn per-user activity rates from a recorded event file
    Train {
        /// Recorded event file (timestamp,user_id,friend_id,friend_name)
        #[arg(long)]
        events: PathBuf,

        /// Where to save the model (defaults to the configured path)
        #[arg(long)]
        model: Option<PathBuf>,
    },

    /// Replay a recorded event file through the bundling engine
    Simulate {
        /// Recorded event file to replay
        #[arg(long)]
        events: PathBuf,

        /// Pre-trained model to load (defaults to the configured path)
        #[arg(long)]
        model: Option<PathBuf>,

        /// Train a fresh model from this file first, save it, then replay
        #[arg(long)]
        train_from: Option<PathBuf>,

        /// Suppress per-bundle output, print only the run summary
        #[arg(long)]
        quiet: bool,

        /// Write all released bundles to this JSON file
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Show a saved model's summary
    Inspect {
        /// Model file to inspect (defaults to the configured path)
        #[arg(long)]
        model: Option<PathBuf>,
    },

    /// Show configuration
    Config,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train { events, model } => {
            cmd_train(&events, model);
        }
        Commands::Simulate {
            events,
            model,
            train_from,
            quiet,
            export,
        } => {
            cmd_simulate(&events, model, train_from, quiet, export);
        }
        Commands::Inspect { model } => {
            cmd_inspect(model);
        }
        Commands::Config => {
            cmd_config();
        }
    }
}

/// Resolve the model path from the CLI argument or the configured default.
fn model_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| Config::load().unwrap_or_default().model_path)
}

fn cmd_train(events_path: &std::path::Path, model: Option<PathBuf>) {
    println!("Notif Bundler v{VERSION}");
    println!();

    let events = match read_events(events_path) {
        Ok(events) => events,
        Err(e) => {
            eprintln!("Error reading events: {e}");
            process::exit(1);
        }
    };
    println!("Read {} events from {:?}", events.len(), events_path);

    let model_file = model_path(model);
    let trained = match RateModel::train(&events) {
        Ok(trained) => trained,
        Err(e) => {
            eprintln!("Error training model: {e}");
            process::exit(1);
        }
    };

    println!("Trained rates for {} users", trained.user_count());
    println!("Fallback rate: {:.2} events/day", trained.fallback());

    if let Err(e) = trained.save(&model_file) {
        eprintln!("Error saving model: {e}");
        process::exit(1);
    }
    println!("Saved model to {model_file:?}");
}

fn cmd_simulate(
    events_path: &std::path::Path,
    model: Option<PathBuf>,
    train_from: Option<PathBuf>,
    quiet: bool,
    export: Option<PathBuf>,
) {
    println!("Notif Bundler v{VERSION}");
    println!();

    let model_file = model_path(model);
    let rate_model = if let Some(train_path) = train_from {
        println!("Training model from {train_path:?} ...");
        let training_events = match read_events(&train_path) {
            Ok(events) => events,
            Err(e) => {
                eprintln!("Error reading training events: {e}");
                process::exit(1);
            }
        };
        let trained = match RateModel::train(&training_events) {
            Ok(trained) => trained,
            Err(e) => {
                eprintln!("Error training model: {e}");
                process::exit(1);
            }
        };
        if let Err(e) = trained.save(&model_file) {
            eprintln!("Warning: Could not save model: {e}");
        }
        trained
    } else {
        println!("Loading model from {model_file:?} ...");
        match RateModel::load(&model_file) {
            Ok(loaded) => loaded,
            Err(e) => {
                eprintln!("Error loading model: {e}");
                eprintln!("Train one first with `notif-bundler train` or pass --train-from.");
                process::exit(1);
            }
        }
    };

    println!(
        "Model covers {} users (fallback {:.2} events/day)",
        rate_model.user_count(),
        rate_model.fallback()
    );
    println!("Target sub-bundles per day: {BUNDLES_PER_DAY}");
    println!();

    let events = match read_events(events_path) {
        Ok(events) => events,
        Err(e) => {
            eprintln!("Error reading events: {e}");
            process::exit(1);
        }
    };
    println!("Replaying {} events ...", events.len());
    println!();

    let summary = if let Some(export_path) = export {
        let mut sink = MemorySink::default();
        let summary = run_simulation(rate_model, events, &mut sink);

        if let Some(parent) = export_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match serde_json::to_string_pretty(&sink.releases) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&export_path, json) {
                    eprintln!("Error writing export: {e}");
                } else {
                    println!("Exported {} bundles to {:?}", sink.releases.len(), export_path);
                }
            }
            Err(e) => {
                eprintln!("Error serializing bundles: {e}");
            }
        }
        summary
    } else if quiet {
        let mut sink = NullSink;
        run_simulation(rate_model, events, &mut sink)
    } else {
        let mut sink = PrintSink;
        run_simulation(rate_model, events, &mut sink)
    };

    println!();
    println!("{}", summary.render());
}

fn cmd_inspect(model: Option<PathBuf>) {
    let model_file = model_path(model);

    let rate_model = match RateModel::load(&model_file) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error loading model: {e}");
            process::exit(1);
        }
    };

    println!("Model {model_file:?}");
    println!("=============");
    println!();
    println!("Users: {}", rate_model.user_count());
    println!("Fallback rate: {:.2} events/day", rate_model.fallback());

    let rates: Vec<f64> = rate_model.rates().values().copied().collect();
    if !rates.is_empty() {
        println!(
            "Rate range: {:.2} - {:.2} events/day",
            Statistics::min(&rates),
            Statistics::max(&rates)
        );
    }
}

fn cmd_config() {
    let config = Config::load().unwrap_or_default();

    println!("Configuration");
    println!("=============");
    println!();
    println!("Config file: {:?}", Config::config_path());
    println!();
    println!(
        "{}",
        serde_json::to_string_pretty(&config).unwrap_or_else(|_| "Error".to_string())
    );
}
