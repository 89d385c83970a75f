//! In-memory [`Runtime`] for tests. Removals mutate the held snapshot, so
//! repeated passes observe the effect of earlier ones.

use async_trait::async_trait;
use std::{collections::HashSet, sync::Mutex};

use super::Runtime;
use crate::{
    errors::Result,
    fail,
    models::{
        ContainerRecord, ContainerState, ImageRecord, NetworkPruneReport, VolumePruneReport,
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListContainers { all: bool },
    RemoveContainer(String),
    PruneVolumes,
    PruneNetworks,
    ListImages { all: bool },
    RemoveImage {
        id: String,
        force: bool,
        prune_children: bool,
    },
    Close,
}

#[derive(Debug, Default)]
pub struct StubRuntime {
    containers: Mutex<Vec<ContainerRecord>>,
    images: Mutex<Vec<ImageRecord>>,
    volumes: Mutex<Vec<(String, i64)>>,
    networks: Mutex<Vec<String>>,
    // 这些 ID 的删除请求会失败
    failing_removals: HashSet<String>,
    failing_calls: HashSet<&'static str>,
    list_containers_hook: Option<fn()>,
    calls: Mutex<Vec<Call>>,
}

pub fn container(id: &str, state: &str, image_ref: &str, image_id: &str) -> ContainerRecord {
    ContainerRecord {
        id: id.to_string(),
        state: ContainerState::from(Some(state)),
        image_ref: image_ref.to_string(),
        image_id: image_id.to_string(),
        names: vec![format!("/{id}-name")],
    }
}

pub fn image(id: &str, tags: &[&str], size_bytes: i64) -> ImageRecord {
    ImageRecord {
        id: id.to_string(),
        repo_tags: tags.iter().map(|t| t.to_string()).collect(),
        size_bytes,
    }
}

impl StubRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_containers(self, containers: Vec<ContainerRecord>) -> Self {
        *self.containers.lock().unwrap() = containers;
        self
    }

    pub fn with_images(self, images: Vec<ImageRecord>) -> Self {
        *self.images.lock().unwrap() = images;
        self
    }

    pub fn with_volumes(self, volumes: &[(&str, i64)]) -> Self {
        *self.volumes.lock().unwrap() = volumes
            .iter()
            .map(|(name, size)| (name.to_string(), *size))
            .collect();
        self
    }

    pub fn with_networks(self, networks: &[&str]) -> Self {
        *self.networks.lock().unwrap() = networks.iter().map(|n| n.to_string()).collect();
        self
    }

    /// Makes removal of the container or image with this id fail.
    pub fn failing_removal(mut self, id: &str) -> Self {
        self.failing_removals.insert(id.to_string());
        self
    }

    /// Makes a whole operation fail, named like the trait method.
    pub fn failing(mut self, operation: &'static str) -> Self {
        self.failing_calls.insert(operation);
        self
    }

    /// Runs `hook` on every `list_containers` call, before it answers.
    pub fn on_list_containers(mut self, hook: fn()) -> Self {
        self.list_containers_hook = Some(hook);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn removed_containers(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::RemoveContainer(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn removed_images(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::RemoveImage { id, .. } => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn container_ids(&self) -> Vec<String> {
        let containers = self.containers.lock().unwrap();
        containers.iter().map(|c| c.id.clone()).collect()
    }

    pub fn image_ids(&self) -> Vec<String> {
        let images = self.images.lock().unwrap();
        images.iter().map(|i| i.id.clone()).collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(&self, operation: &'static str) -> Result<()> {
        if self.failing_calls.contains(operation) {
            return Err(fail!("{operation} failed"));
        }

        Ok(())
    }
}

#[async_trait]
impl Runtime for StubRuntime {
    async fn list_containers(&self, include_all: bool) -> Result<Vec<ContainerRecord>> {
        self.record(Call::ListContainers { all: include_all });
        if let Some(hook) = self.list_containers_hook {
            hook();
        }
        self.check("list_containers")?;
        let containers = self.containers.lock().unwrap();

        Ok(containers
            .iter()
            .filter(|c| include_all || c.is_running())
            .cloned()
            .collect())
    }

    async fn remove_container(&self, id: &str) -> Result<()> {
        self.record(Call::RemoveContainer(id.to_string()));
        if self.failing_removals.contains(id) {
            return Err(fail!("container {id} is locked"));
        }
        let mut containers = self.containers.lock().unwrap();
        match containers.iter().position(|c| c.id == id) {
            Some(i) if containers[i].is_running() => {
                Err(fail!("cannot remove running container {id}"))
            }
            Some(i) => {
                containers.remove(i);
                Ok(())
            }
            None => Err(fail!("no such container: {id}")),
        }
    }

    async fn prune_volumes(&self) -> Result<VolumePruneReport> {
        self.record(Call::PruneVolumes);
        self.check("prune_volumes")?;
        let volumes: Vec<_> = self.volumes.lock().unwrap().drain(..).collect();

        Ok(VolumePruneReport {
            bytes_reclaimed: volumes.iter().map(|(_, size)| size).sum(),
            deleted_names: volumes.into_iter().map(|(name, _)| name).collect(),
        })
    }

    async fn prune_networks(&self) -> Result<NetworkPruneReport> {
        self.record(Call::PruneNetworks);
        self.check("prune_networks")?;

        Ok(NetworkPruneReport {
            deleted_names: self.networks.lock().unwrap().drain(..).collect(),
        })
    }

    async fn list_images(&self, include_all: bool) -> Result<Vec<ImageRecord>> {
        self.record(Call::ListImages { all: include_all });
        self.check("list_images")?;

        Ok(self.images.lock().unwrap().clone())
    }

    async fn remove_image(&self, id: &str, force: bool, prune_children: bool) -> Result<()> {
        self.record(Call::RemoveImage {
            id: id.to_string(),
            force,
            prune_children,
        });
        if self.failing_removals.contains(id) {
            return Err(fail!("image {id} is locked"));
        }
        // 与 Docker 一致：非强制删除时，被容器引用的镜像会冲突
        let referenced = self
            .containers
            .lock()
            .unwrap()
            .iter()
            .any(|c| c.image_id == id);
        if referenced && !force {
            return Err(fail!("conflict: image {id} is being used by a container"));
        }
        let mut images = self.images.lock().unwrap();
        match images.iter().position(|i| i.id == id) {
            Some(i) => {
                images.remove(i);
                Ok(())
            }
            None => Err(fail!("no such image: {id}")),
        }
    }

    async fn close(&self) -> Result<()> {
        self.record(Call::Close);

        Ok(())
    }
}
