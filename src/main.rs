use crate::{
    cli::Args,
    errors::Result,
    janitor::Janitor,
    logger::{Logger, TracingLogger},
    runtime::{DockerRuntime, Runtime},
    vars::CLEANUP_INTERVAL,
};
use clap::Parser;
use log::{info, warn};

mod cli;
mod errors;
mod interval;
mod janitor;
mod liveness;
mod logger;
mod models;
mod runtime;
mod scheduler;
mod vars;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    // Load environment variables from .env file if it exists
    let dotenv_loaded = dotenvy::dotenv().is_ok();
    // Initialize the logger
    logger::init()?;
    if dotenv_loaded {
        info!("loaded .env file");
    }

    let logger = TracingLogger;
    logger.info("Docker cleanup started");

    let runtime = match DockerRuntime::connect().await {
        Ok(runtime) => runtime,
        Err(e) => {
            logger.error(&format!("Failed to create Docker client: {e}"));
            return Err(e);
        }
    };

    // 命令行参数优先于环境变量
    let interval = args.interval.as_deref().unwrap_or(*CLEANUP_INTERVAL);
    let mode = scheduler::resolve_mode(args.once, Some(interval), &logger);
    info!("Working in {mode} mode");

    let janitor = Janitor::new(&runtime, &logger);
    let result = scheduler::run(mode, &janitor).await;

    // 无论结果如何都要释放连接
    if let Err(e) = runtime.close().await {
        warn!("Failed to close Docker client: {e}");
    }

    result
}
