use async_trait::async_trait;
use bollard::{
    Docker,
    container::{ListContainersOptions, RemoveContainerOptions},
    image::{ListImagesOptions, RemoveImageOptions},
    network::PruneNetworksOptions,
    volume::PruneVolumesOptions,
};
use log::debug;
use std::sync::RwLock;

use super::Runtime;
use crate::{
    err,
    errors::Result,
    fail,
    models::{ContainerRecord, ImageRecord, NetworkPruneReport, VolumePruneReport},
};

/// [`Runtime`] backed by the Docker Engine API.
#[derive(Debug)]
pub struct DockerRuntime {
    client: RwLock<Option<Docker>>,
}

impl DockerRuntime {
    /// Connects using the standard Docker environment (`DOCKER_HOST` or the
    /// local socket) and negotiates the API version with the daemon.
    pub async fn connect() -> Result<Self> {
        let docker = Docker::connect_with_defaults()?.negotiate_version().await?;
        debug!(
            "Connected to Docker daemon (API version {})",
            docker.client_version()
        );

        Ok(DockerRuntime {
            client: RwLock::new(Some(docker)),
        })
    }

    // `Docker` 内部共享连接池，克隆开销很小
    fn docker(&self) -> Result<Docker> {
        let guard = self
            .client
            .read()
            .map_err(|_| fail!("Docker client lock poisoned"))?;
        match guard.as_ref() {
            Some(docker) => Ok(docker.clone()),
            None => err!("Docker client is closed"),
        }
    }
}

fn list_containers_options(include_all: bool) -> ListContainersOptions<String> {
    ListContainersOptions {
        all: include_all,
        ..Default::default()
    }
}

fn list_images_options(include_all: bool) -> ListImagesOptions<String> {
    ListImagesOptions {
        all: include_all,
        ..Default::default()
    }
}

// Docker 的参数语义相反：`noprune` 为真时保留未打标签的父镜像
fn remove_image_options(force: bool, prune_children: bool) -> RemoveImageOptions {
    RemoveImageOptions {
        force,
        noprune: !prune_children,
    }
}

#[async_trait]
impl Runtime for DockerRuntime {
    async fn list_containers(&self, include_all: bool) -> Result<Vec<ContainerRecord>> {
        let options = list_containers_options(include_all);
        let summaries = self.docker()?.list_containers(Some(options)).await?;

        Ok(summaries.into_iter().map(ContainerRecord::from).collect())
    }

    async fn remove_container(&self, id: &str) -> Result<()> {
        self.docker()?
            .remove_container(id, None::<RemoveContainerOptions>)
            .await?;

        Ok(())
    }

    async fn prune_volumes(&self) -> Result<VolumePruneReport> {
        let response = self
            .docker()?
            .prune_volumes(None::<PruneVolumesOptions<String>>)
            .await?;

        Ok(response.into())
    }

    async fn prune_networks(&self) -> Result<NetworkPruneReport> {
        let response = self
            .docker()?
            .prune_networks(None::<PruneNetworksOptions<String>>)
            .await?;

        Ok(response.into())
    }

    async fn list_images(&self, include_all: bool) -> Result<Vec<ImageRecord>> {
        let options = list_images_options(include_all);
        let summaries = self.docker()?.list_images(Some(options)).await?;

        Ok(summaries.into_iter().map(ImageRecord::from).collect())
    }

    async fn remove_image(&self, id: &str, force: bool, prune_children: bool) -> Result<()> {
        let options = remove_image_options(force, prune_children);
        let deleted = self
            .docker()?
            .remove_image(id, Some(options), None)
            .await?;
        debug!("Image {id} removal reported {} item(s)", deleted.len());

        Ok(())
    }

    async fn close(&self) -> Result<()> {
        let mut guard = self
            .client
            .write()
            .map_err(|_| fail!("Docker client lock poisoned"))?;
        if guard.take().is_some() {
            debug!("Docker client closed");
        }

        Ok(())
    }
}
