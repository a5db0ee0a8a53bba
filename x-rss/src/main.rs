use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use x_rss::{run_once, Config, PipelineOutcome, Scheduler, StorageTarget};

#[derive(Parser)]
#[command(name = "x-rss", about = "Publish X keyword search results as an RSS feed")]
struct Cli {
    /// Override X_SEARCH_KEYWORD
    #[arg(long, global = true)]
    keyword: Option<String>,

    /// Override MAX_RESULTS
    #[arg(long, global = true)]
    max_results: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the feed once and exit
    Run {
        #[arg(long, value_enum, default_value = "file")]
        target: StorageTarget,

        /// Override RSS_FILENAME
        #[arg(long)]
        output: Option<String>,
    },
    /// Regenerate the feed on a fixed interval until interrupted
    Schedule {
        #[arg(long, value_enum, default_value = "blob")]
        target: StorageTarget,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run(Cli::parse()).await {
        error!("Error executing X RSS generation: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // dotenvy::var loads .env on first use, then falls back to the process environment.
    let keyword = cli.keyword;
    let mut config = Config::from_lookup(|key| match (key, &keyword) {
        ("X_SEARCH_KEYWORD", Some(k)) => Some(k.clone()),
        _ => dotenvy::var(key).ok(),
    })
    .context("loading configuration")?;
    if let Some(max_results) = cli.max_results {
        config.max_results = max_results;
    }

    match cli.command {
        Command::Run { target, output } => {
            if let Some(output) = output {
                config.storage.output_name = output;
            }
            match run_once(&config, target).await.context("generating RSS feed")? {
                PipelineOutcome::Feed { .. } => info!("X RSS generation completed successfully"),
                PipelineOutcome::NoPosts | PipelineOutcome::FetchFailed(_) => {}
            }
        }
        Command::Schedule { target } => {
            let scheduler = Scheduler::from_config(&config.schedule);
            let shutdown = async {
                if tokio::signal::ctrl_c().await.is_err() {
                    error!("Unable to listen for Ctrl-C, stopping scheduler");
                }
            };
            let config = &config;
            scheduler.run(|| run_once(config, target), shutdown).await;
        }
    }

    Ok(())
}
