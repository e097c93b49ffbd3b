use std::collections::HashMap;

use crate::asset::{Asset, AssetError, AssetStore, AssetStoreFactory};

/* -------------------------------------------------------------------------- */
/*                             Asset Implementation                           */
/* -------------------------------------------------------------------------- */

#[derive(Clone, Debug)]
pub struct MemoryAsset {
    mime: Option<String>,
    body: Vec<u8>,
}

impl MemoryAsset {
    pub fn from_str(body: &str) -> Self {
        Self {
            mime: None,
            body: body.as_bytes().to_vec(),
        }
    }

    pub fn from_bytes(body: Vec<u8>) -> Self {
        Self { mime: None, body }
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }
}

impl Asset for MemoryAsset {
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

/// In-memory asset store keyed by normalized request path.
#[derive(Clone)]
pub struct MemoryStore {
    assets: HashMap<String, MemoryAsset>,
}

impl AssetStore for MemoryStore {
    async fn asset_at(&self, path: &str) -> Result<impl Asset, AssetError> {
        match self.assets.get(path) {
            Some(v) => Ok(v.clone()),
            None => Err(AssetError::NotFound),
        }
    }
}

#[derive(Clone)]
pub struct MemoryStoreFactory {
    store: MemoryStore,
}

impl MemoryStoreFactory {
    pub fn new() -> Self {
        Self {
            store: MemoryStore {
                assets: HashMap::new(),
            },
        }
    }

    pub fn with_asset(mut self, path: &str, asset: MemoryAsset) -> Self {
        self.store.assets.insert(path.to_string(), asset);
        self
    }
}

impl Default for MemoryStoreFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetStoreFactory for MemoryStoreFactory {
    type Store = MemoryStore;

    fn build(&self) -> Result<Self::Store, ()> {
        Ok(self.store.clone())
    }
}

/* -------------------------------------------------------------------------- */
/*                           Reusable Test Utilities                          */
/* -------------------------------------------------------------------------- */

pub mod testing {
    use super::*;

    pub const HASHED_ASSET_PATH: &str = "/build/assets/app-ab12cd.js";
    pub const HASHED_ASSET_BODY: &str = "console.log(\"app\");";

    pub const PLAIN_ASSET_PATH: &str = "/favicon.ico";
    pub const PLAIN_ASSET_BODY: &str = "favicon-bytes";

    /// A store seeded with one hashed-URL asset and one asset outside the
    /// build prefix, matching the manifest used across the web tests.
    pub fn create_example_store_factory() -> MemoryStoreFactory {
        MemoryStoreFactory::new()
            .with_asset(
                HASHED_ASSET_PATH,
                MemoryAsset::from_str(HASHED_ASSET_BODY).with_mime("text/javascript"),
            )
            .with_asset(
                PLAIN_ASSET_PATH,
                MemoryAsset::from_str(PLAIN_ASSET_BODY).with_mime("image/x-icon"),
            )
    }

    /// A store whose every read faults. Used to check that store faults
    /// propagate to the dispatch boundary instead of becoming misses.
    #[derive(Clone)]
    pub struct BrokenStore;

    impl AssetStore for BrokenStore {
        async fn asset_at(&self, _path: &str) -> Result<impl Asset, AssetError> {
            Err::<MemoryAsset, _>(AssetError::ProviderError)
        }
    }

    #[derive(Clone)]
    pub struct BrokenStoreFactory;

    impl AssetStoreFactory for BrokenStoreFactory {
        type Store = BrokenStore;

        fn build(&self) -> Result<Self::Store, ()> {
            Ok(BrokenStore)
        }
    }
}

/* -------------------------------------------------------------------------- */
/*                                    Tests                                   */
/* -------------------------------------------------------------------------- */
