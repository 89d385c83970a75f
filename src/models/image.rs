use bollard::models::ImageSummary;

use super::{megabytes, short_id};

/// Tag reported by the runtime for an image that has no repository tag.
pub const UNTAGGED: &str = "<none>:<none>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub id: String,
    pub repo_tags: Vec<String>,
    pub size_bytes: i64,
}

impl ImageRecord {
    pub fn short_id(&self) -> &str {
        short_id(&self.id)
    }

    pub fn display_name(&self) -> &str {
        match self.repo_tags.first() {
            Some(tag) if tag != UNTAGGED => tag,
            _ => "<none>",
        }
    }

    pub fn size_mb(&self) -> f64 {
        megabytes(self.size_bytes)
    }
}

impl From<ImageSummary> for ImageRecord {
    fn from(summary: ImageSummary) -> Self {
        ImageRecord {
            id: summary.id,
            repo_tags: summary.repo_tags,
            size_bytes: summary.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(tags: &[&str]) -> ImageRecord {
        ImageRecord {
            id: "sha256:0123456789abcdef".to_string(),
            repo_tags: tags.iter().map(|t| t.to_string()).collect(),
            size_bytes: 2 * 1024 * 1024,
        }
    }

    #[test]
    fn test_display_name() {
        assert_eq!(image(&["nginx:latest", "nginx:1.27"]).display_name(), "nginx:latest");
        assert_eq!(image(&[UNTAGGED]).display_name(), "<none>");
        assert_eq!(image(&[]).display_name(), "<none>");
    }

    #[test]
    fn test_short_id_and_size() {
        let image = image(&["nginx:latest"]);
        assert_eq!(image.short_id(), "sha256:01234");
        assert_eq!(format!("{:.2}", image.size_mb()), "2.00");
    }
}
