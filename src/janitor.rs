use log::debug;

use crate::{
    liveness::{LivenessIndex, select_stopped, select_unused},
    logger::Logger,
    models::{PassReport, VolumePruneReport, megabytes},
    runtime::Runtime,
};

/// Runs the cleanup procedures against a runtime, reporting through a logger.
///
/// Every procedure is isolated: a failing call is logged and counts as zero
/// processed, the remaining procedures still run.
pub struct Janitor<'a, R: ?Sized, L: ?Sized> {
    runtime: &'a R,
    logger: &'a L,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reclaimed {
    pub removed: usize,
    pub bytes: i64,
}

impl<'a, R, L> Janitor<'a, R, L>
where
    R: Runtime + ?Sized,
    L: Logger + ?Sized,
{
    pub fn new(runtime: &'a R, logger: &'a L) -> Self {
        Janitor { runtime, logger }
    }

    pub fn logger(&self) -> &'a L {
        self.logger
    }

    /// One full pass. Containers go first, images last: image liveness is
    /// computed from the containers that survive.
    pub async fn run_pass(&self) -> PassReport {
        let containers_removed = self.clean_stopped_containers().await;
        let volumes = self.prune_volumes().await;
        let networks_removed = self.prune_networks().await;
        let images = self.clean_unused_images().await;

        let report = PassReport {
            containers_removed,
            volumes_removed: volumes.deleted_names.len(),
            volume_bytes_reclaimed: volumes.bytes_reclaimed,
            networks_removed,
            images_removed: images.removed,
            image_bytes_reclaimed: images.bytes,
        };
        debug!(
            "Cleanup pass finished: {} resource(s) removed, {:.2} MB reclaimed",
            report.total_removed(),
            megabytes(report.bytes_reclaimed())
        );

        report
    }

    pub async fn clean_stopped_containers(&self) -> usize {
        self.logger.info("Starting stopped containers cleanup");

        let containers = match self.runtime.list_containers(true).await {
            Ok(containers) => containers,
            Err(e) => {
                self.logger.error(&format!("Failed to list containers: {e}"));
                return 0;
            }
        };

        let mut removed = 0;
        for container in select_stopped(&containers) {
            self.logger.info(&format!(
                "Removing stopped container: {} (ID: {}, State: {})",
                container.display_name(),
                container.short_id(),
                container.state
            ));

            match self.runtime.remove_container(&container.id).await {
                Ok(()) => removed += 1,
                Err(e) => self.logger.error(&format!(
                    "Failed to remove container {}: {e}",
                    container.short_id()
                )),
            }
        }

        if removed == 0 {
            self.logger.info("No stopped containers found");
        } else {
            self.logger
                .success(&format!("Removed {removed} stopped containers"));
        }

        removed
    }

    pub async fn prune_volumes(&self) -> VolumePruneReport {
        self.logger.info("Starting unused volumes cleanup");

        let report = match self.runtime.prune_volumes().await {
            Ok(report) => report,
            Err(e) => {
                self.logger.error(&format!("Failed to prune volumes: {e}"));
                return VolumePruneReport::default();
            }
        };

        if report.deleted_names.is_empty() {
            self.logger.info("No unused volumes found");
        } else {
            self.logger.success(&format!(
                "Removed {} volumes, reclaimed {:.2} MB",
                report.deleted_names.len(),
                megabytes(report.bytes_reclaimed)
            ));
        }

        report
    }

    pub async fn prune_networks(&self) -> usize {
        self.logger.info("Starting unused networks cleanup");

        let report = match self.runtime.prune_networks().await {
            Ok(report) => report,
            Err(e) => {
                self.logger.error(&format!("Failed to prune networks: {e}"));
                return 0;
            }
        };

        let removed = report.deleted_names.len();
        if removed == 0 {
            self.logger.info("No unused networks found");
        } else {
            self.logger.success(&format!("Removed {removed} networks"));
        }

        removed
    }

    pub async fn clean_unused_images(&self) -> Reclaimed {
        self.logger.info("Starting unused images cleanup");

        // 必须重新获取容器列表（包括已停止的），前面的步骤可能已经改变了它
        let containers = match self.runtime.list_containers(true).await {
            Ok(containers) => containers,
            Err(e) => {
                self.logger.error(&format!("Failed to list containers: {e}"));
                return Reclaimed::default();
            }
        };
        let index = LivenessIndex::build(&containers);
        debug!(
            "{} image identities in use by {} container(s)",
            index.len(),
            containers.len()
        );

        let images = match self.runtime.list_images(true).await {
            Ok(images) => images,
            Err(e) => {
                self.logger.error(&format!("Failed to list images: {e}"));
                return Reclaimed::default();
            }
        };

        let mut reclaimed = Reclaimed::default();
        for image in select_unused(&images, &index) {
            self.logger.info(&format!(
                "Removing unused image: {} (ID: {}, Size: {:.2} MB)",
                image.display_name(),
                image.short_id(),
                image.size_mb()
            ));

            // 不强制删除：仍被使用的镜像交由运行时拒绝
            match self.runtime.remove_image(&image.id, false, true).await {
                Ok(()) => {
                    reclaimed.removed += 1;
                    reclaimed.bytes += image.size_bytes;
                }
                Err(e) => self.logger.error(&format!(
                    "Failed to remove image {}: {e}",
                    image.short_id()
                )),
            }
        }

        if reclaimed.removed == 0 {
            self.logger.info("No unused images found");
        } else {
            self.logger.success(&format!(
                "Removed {} images, reclaimed {:.2} MB",
                reclaimed.removed,
                megabytes(reclaimed.bytes)
            ));
        }

        reclaimed
    }
}
