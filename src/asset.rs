use std::fmt::Display;

/* -------------------------------- Utilities ------------------------------- */

#[derive(Debug, PartialEq, Eq)]
pub enum AssetError {
    /// No asset lives at the requested key. Interpreted as a miss, not a
    /// fault: the dispatcher falls through to the application handler.
    NotFound,
    /// The request's method cannot retrieve a static asset. Also a miss.
    MethodNotAllowed,
    /// Something went wrong inside the store itself. Fatal for the
    /// resolution attempt; never silently treated as a miss.
    ProviderError,
}

impl AssetError {
    /// Whether this error means "try the other path" rather than "give up".
    pub fn is_miss(&self) -> bool {
        matches!(self, Self::NotFound | Self::MethodNotAllowed)
    }
}

/// Allows displaying asset errors in a human readable format
impl Display for AssetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => f.write_str("Not found"),
            Self::MethodNotAllowed => f.write_str("Method not allowed"),
            Self::ProviderError => f.write_str("Provider error"),
        }
    }
}

/* -------------------------------------------------------------------------- */
/*                               Asset Accessing                              */
/* -------------------------------------------------------------------------- */

/// Represents one stored file of the deployed bundle.
pub trait Asset {
    fn mime_type(&self) -> Option<&str> {
        None
    }
    fn bytes(&self) -> &[u8];
}

/// A content-addressed key-value store holding the deployed bundle.
///
/// Keys are normalized request paths (`/favicon.ico`,
/// `/build/assets/entry-ab12cd.js`). Implementations answer reads only;
/// nothing in the dispatch layer ever writes.
pub trait AssetStore {
    /// Tries to get the asset stored under the given path.
    fn asset_at(&self, path: &str) -> impl Future<Output = Result<impl Asset, AssetError>>;
}

/* -------------------------------------------------------------------------- */
/*                             Asset Store Factory                            */
/* -------------------------------------------------------------------------- */

/// Offers an impl-agnostic way of creating Asset Stores.
pub trait AssetStoreFactory: Clone {
    type Store: AssetStore;

    fn build(&self) -> Result<Self::Store, ()>;
}
