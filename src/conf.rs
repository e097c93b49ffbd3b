use serde::{Deserialize, Serialize};

fn default_port() -> u16 {
    8080
}

fn default_name() -> String {
    "Edgeward".to_string()
}

fn default_asset_url() -> String {
    "/build/assets/entry.client.js".to_string()
}

fn default_asset_root() -> String {
    "public".to_string()
}

fn default_storefront_url() -> String {
    "https://api.storefront.example".to_string()
}

fn default_general() -> ServerConfigGeneral {
    ServerConfigGeneral {
        name: default_name(),
        port: default_port(),
        mode: Mode::default(),
    }
}

fn default_build() -> ServerConfigBuild {
    ServerConfigBuild {
        asset_url: default_asset_url(),
        version: None,
    }
}

fn default_assets() -> ServerConfigAssets {
    ServerConfigAssets {
        root: default_asset_root(),
    }
}

fn default_storefront() -> ServerConfigStorefront {
    ServerConfigStorefront {
        url: default_storefront_url(),
        token: None,
    }
}

/// Which behavior profile the server runs under.
/// Development disables asset caching entirely and exposes fault messages
/// in 500 bodies; production does neither.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[serde(rename = "development")]
    Development,
    #[serde(rename = "production")]
    #[default]
    Production,
}

impl Mode {
    pub fn is_development(&self) -> bool {
        *self == Self::Development
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ServerConfigGeneral {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub mode: Mode,
}

/// Static facts about the deployed build. Loaded once at startup and never
/// touched again while requests are in flight.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ServerConfigBuild {
    /// URL under which the build publishes its hashed assets,
    /// e.g. `/build/assets/entry.client-ab12cd.js`.
    #[serde(default = "default_asset_url")]
    pub asset_url: String,
    pub version: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ServerConfigAssets {
    /// Directory holding the deployable asset bundle.
    #[serde(default = "default_asset_root")]
    pub root: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ServerConfigStorefront {
    #[serde(default = "default_storefront_url")]
    pub url: String,
    pub token: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_general")]
    pub general: ServerConfigGeneral,
    #[serde(default = "default_build")]
    pub build: ServerConfigBuild,
    #[serde(default = "default_assets")]
    pub assets: ServerConfigAssets,
    #[serde(default = "default_storefront")]
    pub storefront: ServerConfigStorefront,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            general: default_general(),
            build: default_build(),
            assets: default_assets(),
            storefront: default_storefront(),
        }
    }
}

/* -------------------------------------------------------------------------- */
/*                                    Tests                                   */
/* -------------------------------------------------------------------------- */
