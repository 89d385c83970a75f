use std::collections::HashSet;

use crate::models::{ContainerRecord, ImageRecord};

/// Image identities referenced by at least one container, running or not.
///
/// Containers record their image either by tag or by digest depending on how
/// they were created, so both the recorded reference and the resolved id are
/// indexed.
#[derive(Debug, Default)]
pub struct LivenessIndex<'a> {
    identities: HashSet<&'a str>,
}

impl<'a> LivenessIndex<'a> {
    pub fn build(containers: &'a [ContainerRecord]) -> Self {
        let identities = containers
            .iter()
            .flat_map(|c| [c.image_id.as_str(), c.image_ref.as_str()])
            // 缺失的字段不能匹配任何镜像
            .filter(|identity| !identity.is_empty())
            .collect();

        LivenessIndex { identities }
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.identities.contains(identity)
    }

    /// An image is in use when its id or any of its tags is referenced.
    pub fn is_in_use(&self, image: &ImageRecord) -> bool {
        self.contains(&image.id) || image.repo_tags.iter().any(|tag| self.contains(tag))
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }
}

/// Images not referenced by any container, in catalog order.
pub fn select_unused<'i>(
    images: &'i [ImageRecord],
    index: &LivenessIndex<'_>,
) -> Vec<&'i ImageRecord> {
    images.iter().filter(|image| !index.is_in_use(image)).collect()
}

/// Containers in any state other than running, in listing order.
pub fn select_stopped(containers: &[ContainerRecord]) -> Vec<&ContainerRecord> {
    containers.iter().filter(|c| !c.is_running()).collect()
}
