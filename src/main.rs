use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use supplynet_sim::io::{reporting, request};
use supplynet_sim::simulation::config::ServiceConfig;
use supplynet_sim::{api, build_model, run_simulation, ProcessEngine};

#[derive(Parser)]
#[command(name = "supplynet-sim")]
#[command(about = "Supply-chain network simulation service")]
#[command(version)]
struct Cli {
    /// Service configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Engine executable, overrides the configuration file
    #[arg(long)]
    engine_command: Option<String>,

    /// Argument passed to the engine executable (repeatable)
    #[arg(long = "engine-arg")]
    engine_args: Vec<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service
    Serve {
        /// Address to listen on, overrides the configuration file
        #[arg(short, long)]
        listen: Option<String>,
    },

    /// Run one simulation from a network file and print the results
    Run {
        /// Network JSON (a /simulate body or an editor export)
        network: PathBuf,

        /// Override the simulation horizon
        #[arg(short, long)]
        sim_time: Option<u32>,

        /// Write inventory series to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Write the metrics table to this CSV file
        #[arg(long)]
        metrics_csv: Option<PathBuf>,
    },

    /// Print the simulation model built from a network file, without running it
    Model {
        /// Network JSON (a /simulate body or an editor export)
        network: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn load_config(cli: &Cli) -> Result<ServiceConfig> {
    let mut config = match &cli.config {
        Some(path) => ServiceConfig::load(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => ServiceConfig::default(),
    };

    if let Some(command) = &cli.engine_command {
        config.engine.command = command.clone();
    }
    if !cli.engine_args.is_empty() {
        config.engine.args = cli.engine_args.clone();
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let mut config = load_config(&cli)?;

    match cli.command {
        Commands::Serve { listen } => {
            if let Some(addr) = listen {
                config.listen_addr = addr;
            }
            let logging = config.engine.logging;
            let engine = ProcessEngine::new(config.engine);
            api::serve(engine, logging, &config.listen_addr).await?;
        }

        Commands::Run {
            network,
            sim_time,
            csv,
            metrics_csv,
        } => {
            let mut request = request::load_request(&network)
                .with_context(|| format!("reading network {}", network.display()))?;
            if let Some(sim_time) = sim_time {
                request.sim_time = sim_time;
            }

            let logging = config.engine.logging;
            let engine = ProcessEngine::new(config.engine);
            let output = tokio::task::spawn_blocking(move || {
                run_simulation(&engine, &request, logging)
            })
            .await??;

            println!("{}", serde_json::to_string_pretty(&output.metrics)?);

            if let Some(path) = csv {
                reporting::write_inventory_log(&path, &output.inventory_data)?;
            }
            if let Some(path) = metrics_csv {
                reporting::write_metrics_log(&path, &output.metrics)?;
            }
            info!(nodes = output.inventory_data.len(), "inventory series collected");
        }

        Commands::Model { network } => {
            let request = request::load_request(&network)
                .with_context(|| format!("reading network {}", network.display()))?;
            let model = build_model(&request)?;
            println!("{}", serde_json::to_string_pretty(&model)?);
        }
    }

    Ok(())
}
