use std::io::ErrorKind;
use std::path::PathBuf;

use log::error;

use crate::asset::{Asset, AssetError, AssetStore, AssetStoreFactory};

/* -------------------------------------------------------------------------- */
/*                             Asset Implementation                           */
/* -------------------------------------------------------------------------- */

pub struct FilesystemAsset {
    mime: Option<String>,
    body: Vec<u8>,
}

impl Asset for FilesystemAsset {
    fn mime_type(&self) -> Option<&str> {
        self.mime.as_deref()
    }

    fn bytes(&self) -> &[u8] {
        &self.body
    }
}

/* -------------------------------------------------------------------------- */
/*                             Store Implementation                           */
/* -------------------------------------------------------------------------- */

/// Asset store backed by the deployed bundle on disk.
///
/// Request paths map to files under the configured root. Paths containing
/// a `..` segment never reach the filesystem; directory paths resolve to
/// their `index.html`.
#[derive(Clone)]
pub struct FilesystemStore {
    root: PathBuf,
}

impl FilesystemStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn file_for(&self, path: &str) -> Option<PathBuf> {
        if path.split('/').any(|segment| segment == "..") {
            return None;
        }

        let relative = path.trim_start_matches('/');
        let mut file = self.root.join(relative);
        if relative.is_empty() || path.ends_with('/') || file.is_dir() {
            file = file.join("index.html");
        }
        Some(file)
    }
}

impl AssetStore for FilesystemStore {
    async fn asset_at(&self, path: &str) -> Result<impl Asset, AssetError> {
        let file = match self.file_for(path) {
            Some(v) => v,
            None => return Err(AssetError::NotFound),
        };

        let body = match tokio::fs::read(&file).await {
            Ok(v) => v,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(AssetError::NotFound);
            }
            Err(e) => {
                error!("Failed to read asset {:?}: {}", file, e);
                return Err(AssetError::ProviderError);
            }
        };

        let mime = mime_guess::from_path(&file)
            .first()
            .map(|m| m.essence_str().to_string());

        Ok(FilesystemAsset { mime, body })
    }
}

#[derive(Clone)]
pub struct FilesystemStoreFactory {
    root: PathBuf,
}

impl FilesystemStoreFactory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetStoreFactory for FilesystemStoreFactory {
    type Store = FilesystemStore;

    fn build(&self) -> Result<Self::Store, ()> {
        if !self.root.is_dir() {
            error!("Asset root {:?} is not a directory", self.root);
            return Err(());
        }
        Ok(FilesystemStore::new(self.root.clone()))
    }
}

/* -------------------------------------------------------------------------- */
/*                                    Tests                                   */
/* -------------------------------------------------------------------------- */
