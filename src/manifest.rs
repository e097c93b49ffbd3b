use crate::conf::ServerConfigBuild;

/// Static description of the deployed build.
///
/// Loaded once at process start and read-only afterwards; its contents are
/// consistent for the lifetime of one deployed version, so concurrent
/// requests may read it without synchronization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildManifest {
    asset_url: String,
    version: Option<String>,
}

impl BuildManifest {
    pub fn new(asset_url: impl Into<String>) -> Self {
        Self {
            asset_url: asset_url.into(),
            version: None,
        }
    }

    pub fn from_config(build: &ServerConfigBuild) -> Self {
        Self {
            asset_url: build.asset_url.clone(),
            version: build.version.clone(),
        }
    }

    /// URL under which the build published its hashed assets.
    pub fn asset_url(&self) -> &str {
        &self.asset_url
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}

/* -------------------------------------------------------------------------- */
/*                                    Tests                                   */
/* -------------------------------------------------------------------------- */
