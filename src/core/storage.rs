//! Storage for uploaded product images.
//!
//! The form only ever holds a reference string returned by [`ImageStore::store`]; the
//! listing turns it into a public URL with [`ImageStore::url`].

use crate::{config::settings::StorageSettings, errors::Result};
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Accepts uploaded images and hands out stable references to them.
pub trait ImageStore {
    /// Stores one upload and returns its reference.
    async fn store(&self, original_name: &str, bytes: &[u8]) -> Result<String>;

    /// Removes a stored file. Unknown references are not an error.
    async fn delete(&self, reference: &str) -> Result<()>;

    /// Public URL of a stored file.
    fn url(&self, reference: &str) -> String;
}

/// Keeps images as files in one directory.
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    root: PathBuf,
    public_url: String,
}

impl LocalImageStore {
    /// A store writing under `root`, served from `public_url`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, public_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_url: public_url.into(),
        }
    }

    /// A store configured from the `[storage]` settings.
    #[must_use]
    pub fn from_settings(settings: &StorageSettings) -> Self {
        Self::new(settings.upload_dir.clone(), settings.public_url.clone())
    }

    /// Directory files are written to.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, reference: &str) -> io::Result<PathBuf> {
        let valid = !reference.is_empty()
            && reference
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '.')
            && !reference.starts_with('.');

        if valid {
            Ok(self.root.join(reference))
        } else {
            Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid image reference: {reference}"),
            ))
        }
    }
}

/// Lowercased alphanumeric extension of an upload name, if it has one.
fn extension_of(original_name: &str) -> Option<String> {
    Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .filter(|ext| !ext.is_empty() && ext.chars().all(|ch| ch.is_ascii_alphanumeric()))
}

impl ImageStore for LocalImageStore {
    async fn store(&self, original_name: &str, bytes: &[u8]) -> Result<String> {
        tokio::fs::create_dir_all(&self.root).await?;

        let id = uuid::Uuid::new_v4();
        let reference = extension_of(original_name)
            .map_or_else(|| id.to_string(), |ext| format!("{id}.{ext}"));

        tokio::fs::write(self.path_for(&reference)?, bytes).await?;
        debug!(%reference, original_name, size = bytes.len(), "Image stored");
        Ok(reference)
    }

    async fn delete(&self, reference: &str) -> Result<()> {
        match tokio::fs::remove_file(self.path_for(reference)?).await {
            Ok(()) => {
                debug!(%reference, "Image deleted");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn url(&self, reference: &str) -> String {
        format!("{}/{reference}", self.public_url.trim_end_matches('/'))
    }
}
