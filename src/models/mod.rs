use std::time::Duration;

use crate::interval::format_duration;

pub mod container;
pub mod image;
pub mod report;

pub use container::{ContainerRecord, ContainerState};
pub use image::ImageRecord;
pub use report::{NetworkPruneReport, PassReport, VolumePruneReport};

const SHORT_ID_LEN: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Once,
    Daemon(Duration),
}

impl std::fmt::Display for RunMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunMode::Once => write!(f, "single-shot"),
            RunMode::Daemon(interval) => write!(f, "daemon (every {})", format_duration(*interval)),
        }
    }
}

/// 截取 ID 的前 12 位，不足 12 位时原样返回
pub fn short_id(id: &str) -> &str {
    id.get(..SHORT_ID_LEN).unwrap_or(id)
}

pub fn megabytes(bytes: i64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}
