//! Filesystem image resolver.

use std::path::PathBuf;

use futures::FutureExt;
use futures::future::BoxFuture;
use mdtb_render::{ImageResolver, ImageSource};

/// Resolves image URLs to files relative to the rendered document.
///
/// Remote URLs are not fetched; they stay as placeholders.
pub(crate) struct FsImageResolver {
    base_dir: PathBuf,
}

impl FsImageResolver {
    pub(crate) fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }
}

fn is_remote(url: &str) -> bool {
    url.contains("://") || url.starts_with("data:") || url.starts_with("//")
}

impl ImageResolver for FsImageResolver {
    fn resolve_image(
        &self,
        url: &str,
        _tooltip: Option<&str>,
    ) -> BoxFuture<'static, Option<ImageSource>> {
        if is_remote(url) {
            tracing::info!(url, "Skipping remote image");
            return futures::future::ready(None).boxed();
        }

        // Drop any query or fragment before touching the filesystem.
        let relative = url.split(['?', '#']).next().unwrap_or(url);
        let path = self.base_dir.join(relative);
        async move {
            match tokio::fs::metadata(&path).await {
                Ok(metadata) if metadata.is_file() => {
                    Some(ImageSource::new(path.display().to_string()))
                }
                Ok(_) => {
                    tracing::debug!(path = %path.display(), "Image path is not a file");
                    None
                }
                Err(error) => {
                    tracing::debug!(path = %path.display(), %error, "Image not found");
                    None
                }
            }
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_resolves_relative_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("img")).unwrap();
        let file = dir.path().join("img").join("logo.png");
        std::fs::write(&file, b"png").unwrap();

        let resolver = FsImageResolver::new(dir.path());
        let source = resolver.resolve_image("img/logo.png?raw=1", None).await;
        assert_eq!(source, Some(ImageSource::new(file.display().to_string())));
    }

    #[tokio::test]
    async fn test_missing_file_is_unresolved() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = FsImageResolver::new(dir.path());
        assert_eq!(resolver.resolve_image("nope.png", None).await, None);
    }

    #[tokio::test]
    async fn test_directory_is_unresolved() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("img")).unwrap();
        let resolver = FsImageResolver::new(dir.path());
        assert_eq!(resolver.resolve_image("img", None).await, None);
    }

    #[tokio::test]
    async fn test_remote_url_is_not_fetched() {
        let resolver = FsImageResolver::new(".");
        assert_eq!(
            resolver
                .resolve_image("https://example.com/a.png", None)
                .await,
            None
        );
    }
}
