//! Manifest loading and the shared manifest store.
//!
//! The manifest lives either on disk or behind an HTTP URL. Loading has no
//! retry policy: callers decide whether to try again.

mod store;

pub use store::ManifestStore;

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

use crate::models::Manifest;

/// Errors surfaced by [`load`].
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Manifest not found: {0}")]
    NotFound(String),

    #[error("Manifest is not well-formed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read manifest: {0}")]
    Io(#[from] std::io::Error),

    #[error("Manifest request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Where the manifest is fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestSource {
    File(PathBuf),
    Url(String),
}

impl ManifestSource {
    /// `http://` and `https://` locations are URLs, everything else a path.
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::Url(location.to_string())
        } else {
            Self::File(PathBuf::from(location))
        }
    }
}

impl std::fmt::Display for ManifestSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// Fetch and deserialize the manifest.
pub async fn load(source: &ManifestSource) -> Result<Manifest, ManifestError> {
    let body = match source {
        ManifestSource::File(path) => match tokio::fs::read(path).await {
            Ok(body) => body,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ManifestError::NotFound(path.display().to_string()));
            }
            Err(e) => return Err(e.into()),
        },
        ManifestSource::Url(url) => {
            let response = reqwest::get(url).await?;
            if response.status() == StatusCode::NOT_FOUND {
                return Err(ManifestError::NotFound(url.clone()));
            }
            response.error_for_status()?.bytes().await?.to_vec()
        }
    };

    let manifest = parse_bytes(&body)?;
    tracing::debug!(
        "Loaded manifest {}@{} with {} items from {}",
        manifest.name,
        manifest.version,
        manifest.items.len(),
        source
    );
    Ok(manifest)
}

/// Deserialize a manifest document.
pub fn parse(body: &str) -> Result<Manifest, ManifestError> {
    parse_bytes(body.as_bytes())
}

/// Deserialize raw manifest bytes. Invalid UTF-8 is a parse error like any
/// other malformed content.
pub fn parse_bytes(body: &[u8]) -> Result<Manifest, ManifestError> {
    let manifest: Manifest = serde_json::from_slice(body)?;
    for issue in manifest.validate() {
        tracing::warn!("Manifest issue: {}", issue);
    }
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_parse_distinguishes_urls_from_paths() {
        assert_eq!(
            ManifestSource::parse("https://example.com/registry.json"),
            ManifestSource::Url("https://example.com/registry.json".to_string())
        );
        assert_eq!(
            ManifestSource::parse("public/registry.json"),
            ManifestSource::File(PathBuf::from("public/registry.json"))
        );
    }

    #[test]
    fn parse_rejects_wrong_shape() {
        let err = parse(r#"{"name": "r"}"#).unwrap_err();
        assert!(matches!(err, ManifestError::Parse(_)));
    }

    #[test]
    fn parse_keeps_items_with_quality_issues() {
        let manifest = parse(
            r#"{"name": "r", "version": "1.0.0", "items": [
                {"name": "a", "type": "registry:ui", "files": []},
                {"name": "a", "type": "registry:ui", "files": ["a.tsx"]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(manifest.items.len(), 2);
    }

    #[tokio::test]
    async fn load_reports_missing_file_as_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let source = ManifestSource::File(dir.path().join("registry.json"));

        let err = load(&source).await.unwrap_err();
        assert!(matches!(err, ManifestError::NotFound(_)));
    }
}
