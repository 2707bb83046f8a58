use std::env;
use std::io;
use std::net::SocketAddr;
use std::process;

use garage_core::Category;
use garage_engine::{ConfigError, GarageConfig, GarageEngine, SharedGarage, SystemClock};
use garage_server::args::{Args, ArgsError, Command, USAGE};
use log::{info, LevelFilter};
use thiserror::Error;
use tokio::net::TcpListener;

fn main() {
    if let Err(err) = run() {
        eprintln!("garage-server failed: {err}");
        if matches!(err, AppError::Usage(_)) {
            eprintln!("{USAGE}");
        }
        process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let args = match Args::parse(env::args().skip(1))? {
        Command::Help => {
            println!("{USAGE}");
            return Ok(());
        }
        Command::Run(args) => args,
    };
    init_logging(args.verbose);

    let config = GarageConfig {
        checkout_offset_ms: args.time_offset_ms(),
        ..GarageConfig::reference()
    };
    let engine = GarageEngine::new(config, Box::new(SystemClock))?;
    let garage = SharedGarage::new(engine);

    let addr = args.addr();
    let runtime = tokio::runtime::Runtime::new().map_err(AppError::Runtime)?;
    runtime.block_on(async {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| AppError::Bind { addr, source })?;
        println!("parking garage listening on {addr}");
        info!("starting server on {addr}");
        garage_server::serve(listener, garage.clone(), async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                log::error!("failed to wait for ctrl-c: {err}");
            }
        })
        .await;
        Ok::<_, AppError>(())
    })?;

    let metrics = garage.metrics();
    info!(
        "shutting down: {} parked ({} handicapped, {} small, {} large), {} rejected, {} released, {} billed",
        metrics.total_assigned(),
        metrics.assigned_to(Category::Handicapped),
        metrics.assigned_to(Category::Small),
        metrics.assigned_to(Category::Large),
        metrics.rejected_assignments,
        metrics.released,
        metrics.billed,
    );
    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Usage(#[from] ArgsError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] io::Error),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
}
