use bollard::models::{NetworkPruneResponse, VolumePruneResponse};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VolumePruneReport {
    pub deleted_names: Vec<String>,
    pub bytes_reclaimed: i64,
}

impl From<VolumePruneResponse> for VolumePruneReport {
    fn from(response: VolumePruneResponse) -> Self {
        VolumePruneReport {
            deleted_names: response.volumes_deleted.unwrap_or_default(),
            bytes_reclaimed: response.space_reclaimed.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkPruneReport {
    pub deleted_names: Vec<String>,
}

impl From<NetworkPruneResponse> for NetworkPruneReport {
    fn from(response: NetworkPruneResponse) -> Self {
        NetworkPruneReport {
            deleted_names: response.networks_deleted.unwrap_or_default(),
        }
    }
}

/// Outcome of one cleanup pass. A step that failed as a whole counts as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassReport {
    pub containers_removed: usize,
    pub volumes_removed: usize,
    pub volume_bytes_reclaimed: i64,
    pub networks_removed: usize,
    pub images_removed: usize,
    pub image_bytes_reclaimed: i64,
}

impl PassReport {
    pub fn total_removed(&self) -> usize {
        self.containers_removed + self.volumes_removed + self.networks_removed + self.images_removed
    }

    pub fn bytes_reclaimed(&self) -> i64 {
        self.volume_bytes_reclaimed + self.image_bytes_reclaimed
    }
}
