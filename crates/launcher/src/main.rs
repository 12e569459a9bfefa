//! mmap-batch - Main Entry Point
//! Drives one mmap-extractor run per catalog map, capped at host parallelism

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mmap_batch_core::application::Dispatcher;
use mmap_batch_core::domain::{WorkQueue, MAP_CATALOG};
use mmap_batch_core::VERSION;
use mmap_batch_infra_system::{HostParallelismProbe, SubprocessExtractor};

#[derive(Parser)]
#[command(name = "mmap-batch")]
#[command(about = "Concurrency-capped launcher for mmap-extractor", long_about = None)]
#[command(version)]
struct Cli {
    /// Open each extraction in its own console window (Windows only,
    /// ignored elsewhere)
    #[arg(
        long,
        env = "MMAP_BATCH_SEPARATE_CONSOLE",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    separate_console: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize logging (pretty for attended runs, JSON when asked)
    let log_format =
        std::env::var("MMAP_BATCH_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| {
            EnvFilter::try_new("mmap_batch_core=info,mmap_batch_infra_system=info,mmap_batch=info")
        })
        .expect("Failed to create env filter");

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .init();
        }
    }

    let cli = Cli::parse();

    info!("mmap-batch v{} starting...", VERSION);

    // 2. Size the worker pool from host parallelism (never below 1)
    let probe = HostParallelismProbe::new();
    let limit = Dispatcher::limit_from_probe(&probe);
    info!(limit, "Using {} concurrent extraction worker(s)", limit);

    // 3. Load the fixed catalog into the work queue
    let queue = WorkQueue::from_catalog(MAP_CATALOG);
    info!(maps = queue.len(), "Work queue loaded");

    // 4. Wire the subprocess extractor and run the batch to completion
    let extractor = Arc::new(SubprocessExtractor::new(cli.separate_console));
    let summary = Dispatcher::new(queue, extractor, limit).run().await?;

    if summary.failed.is_empty() {
        info!(completed = summary.completed, "Extraction batch finished");
    } else {
        warn!(
            completed = summary.completed,
            failed = ?summary.failed,
            "Extraction batch finished with launch failures"
        );
    }

    Ok(())
}
