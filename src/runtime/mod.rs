use async_trait::async_trait;

use crate::{
    errors::Result,
    models::{ContainerRecord, ImageRecord, NetworkPruneReport, VolumePruneReport},
};

mod docker;
#[cfg(test)]
pub mod stub;

pub use docker::DockerRuntime;

/// The operations a cleanup pass needs from the container runtime.
#[async_trait]
pub trait Runtime: Send + Sync {
    /// Lists containers, stopped ones included when `include_all` is set.
    async fn list_containers(&self, include_all: bool) -> Result<Vec<ContainerRecord>>;
    async fn remove_container(&self, id: &str) -> Result<()>;
    async fn prune_volumes(&self) -> Result<VolumePruneReport>;
    async fn prune_networks(&self) -> Result<NetworkPruneReport>;
    /// Lists images, intermediate layers included when `include_all` is set.
    async fn list_images(&self, include_all: bool) -> Result<Vec<ImageRecord>>;
    /// Removes an image. With `prune_children` untagged parents are removed too.
    async fn remove_image(&self, id: &str, force: bool, prune_children: bool) -> Result<()>;
    /// Releases the underlying connection. Later calls fail.
    async fn close(&self) -> Result<()>;
}
