use std::future::Future;
use tokio::signal;

use crate::{
    errors::Result,
    interval::{format_duration, parse_interval},
    janitor::Janitor,
    logger::Logger,
    models::RunMode,
    runtime::Runtime,
};

/// Picks the run mode once at startup.
///
/// `once` wins over any interval. An absent or empty interval means a single
/// pass; an interval that cannot be parsed is reported and also falls back to
/// a single pass.
pub fn resolve_mode(
    once: bool,
    interval: Option<&str>,
    logger: &(impl Logger + ?Sized),
) -> RunMode {
    if once {
        return RunMode::Once;
    }

    match interval {
        None | Some("") => RunMode::Once,
        Some(value) => match parse_interval(value) {
            Ok(interval) => RunMode::Daemon(interval),
            Err(e) => {
                logger.warn(&format!(
                    "Invalid cleanup interval: {e}. Running once instead."
                ));
                RunMode::Once
            }
        },
    }
}

pub async fn run<R, L>(mode: RunMode, janitor: &Janitor<'_, R, L>) -> Result<()>
where
    R: Runtime + ?Sized,
    L: Logger + ?Sized,
{
    match mode {
        RunMode::Once => run_until(mode, janitor, std::future::pending()).await,
        // 必须在第一轮开始前注册信号，否则轮次中的信号会直接终止进程
        RunMode::Daemon(_) => run_until(mode, janitor, shutdown_signal()?).await,
    }
}

/// Runs passes according to `mode`. In daemon mode the sleep between passes
/// is interrupted by `shutdown`, a pass in progress always completes.
pub async fn run_until<R, L, F>(
    mode: RunMode,
    janitor: &Janitor<'_, R, L>,
    shutdown: F,
) -> Result<()>
where
    R: Runtime + ?Sized,
    L: Logger + ?Sized,
    F: Future<Output = ()>,
{
    let logger = janitor.logger();
    let interval = match mode {
        RunMode::Once => {
            janitor.run_pass().await;
            logger.success("Docker cleanup completed");
            return Ok(());
        }
        RunMode::Daemon(interval) => interval,
    };

    logger.info(&format!(
        "Running in daemon mode with interval: {}",
        format_duration(interval)
    ));
    tokio::pin!(shutdown);
    loop {
        janitor.run_pass().await;
        logger.info(&format!("Sleeping for {}...", format_duration(interval)));

        tokio::select! {
            _ = tokio::time::sleep(interval) => {},
            _ = &mut shutdown => {
                logger.info("Shutdown signal received, stopping");
                return Ok(());
            }
        }
    }
}

/// Registers the Ctrl+C and SIGTERM listeners immediately. The returned future
/// resolves on the first signal received after this call.
fn shutdown_signal() -> Result<impl Future<Output = ()>> {
    #[cfg(unix)]
    let (mut interrupt, mut terminate) = {
        use signal::unix::SignalKind;
        (
            signal::unix::signal(SignalKind::interrupt())?,
            signal::unix::signal(SignalKind::terminate())?,
        )
    };

    #[cfg(not(unix))]
    let mut ctrl_c = signal::windows::ctrl_c()?;

    Ok(async move {
        #[cfg(unix)]
        tokio::select! {
            _ = interrupt.recv() => {},
            _ = terminate.recv() => {},
        }

        #[cfg(not(unix))]
        ctrl_c.recv().await;
    })
}
