use bollard::models::ContainerSummary;
use std::str::FromStr;

use super::short_id;

/// 容器的运行状态，未识别的状态保留原始字符串
#[derive(Debug, Clone, PartialEq, Eq, strum_macros::EnumString, strum_macros::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum ContainerState {
    Created,
    Running,
    Paused,
    Restarting,
    Removing,
    Exited,
    Dead,
    #[strum(default)]
    Unknown(String),
}

impl std::fmt::Display for ContainerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContainerState::Unknown(raw) => write!(f, "{raw}"),
            known => write!(f, "{}", known.as_ref()),
        }
    }
}

impl From<Option<&str>> for ContainerState {
    fn from(raw: Option<&str>) -> Self {
        match raw {
            // `default` 变体保证解析不会失败
            Some(raw) => ContainerState::from_str(raw)
                .unwrap_or_else(|_| ContainerState::Unknown(raw.to_string())),
            None => ContainerState::Unknown(String::new()),
        }
    }
}

/// A point-in-time snapshot of one container as reported by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerRecord {
    pub id: String,
    pub state: ContainerState,
    /// The image reference recorded at creation time, a tag or a digest.
    pub image_ref: String,
    /// The resolved image digest.
    pub image_id: String,
    pub names: Vec<String>,
}

impl ContainerRecord {
    pub fn is_running(&self) -> bool {
        self.state == ContainerState::Running
    }

    pub fn short_id(&self) -> &str {
        short_id(&self.id)
    }

    /// Names come back prefixed with `/`, strip it for display.
    pub fn display_name(&self) -> &str {
        match self.names.first() {
            Some(name) => name.strip_prefix('/').unwrap_or(name),
            None => self.short_id(),
        }
    }
}

impl From<ContainerSummary> for ContainerRecord {
    fn from(summary: ContainerSummary) -> Self {
        ContainerRecord {
            state: ContainerState::from(summary.state.as_deref()),
            id: summary.id.unwrap_or_default(),
            image_ref: summary.image.unwrap_or_default(),
            image_id: summary.image_id.unwrap_or_default(),
            names: summary.names.unwrap_or_default(),
        }
    }
}
