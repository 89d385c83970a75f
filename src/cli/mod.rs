use clap::Parser;

/// Removes stopped containers, unused volumes, unused networks and unused
/// images from the local Docker daemon.
#[derive(Parser, Debug)]
#[command(version)]
pub struct Args {
    /// Run a single pass and exit, ignoring CLEANUP_INTERVAL
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub once: bool,
    /// Interval between passes (e.g. 30m, 1h30m), overrides CLEANUP_INTERVAL
    #[arg(long)]
    pub interval: Option<String>,
}
