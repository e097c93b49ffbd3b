use std::fmt::Display;

use actix_web::web::Bytes;
use log::debug;
use url::Url;

#[derive(Debug, PartialEq, Eq)]
pub enum StorefrontError {
    /// The configured base URL or a query path did not form a valid URL.
    BadUrl,
    /// The request never produced a usable response.
    Request(String),
    /// The storefront answered with a non-success status.
    Status(u16),
}

impl Display for StorefrontError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadUrl => f.write_str("Bad storefront URL"),
            Self::Request(e) => write!(f, "Storefront request failed: {}", e),
            Self::Status(code) => write!(f, "Storefront answered {}", code),
        }
    }
}

/// Per-request client for the vendor storefront API.
///
/// Construction is pure: the underlying `awc` client connects lazily, so
/// building one per request costs nothing until the handler actually
/// queries it. Carries the request's correlation id so storefront-side
/// logs can be grouped per inbound request.
#[derive(Clone)]
pub struct StorefrontClient {
    base: Url,
    token: String,
    group_id: Option<String>,
    http: awc::Client,
}

impl StorefrontClient {
    pub fn new(
        base_url: &str,
        token: impl Into<String>,
        group_id: Option<String>,
    ) -> Result<Self, StorefrontError> {
        let base = Url::parse(base_url).map_err(|_| StorefrontError::BadUrl)?;
        Ok(Self {
            base,
            token: token.into(),
            group_id,
            http: awc::Client::default(),
        })
    }

    pub fn group_id(&self) -> Option<&str> {
        self.group_id.as_deref()
    }

    /// Performs a GET against the storefront API and returns the raw body.
    pub async fn query(&self, path: &str) -> Result<Bytes, StorefrontError> {
        let url = self.base.join(path).map_err(|_| StorefrontError::BadUrl)?;
        debug!("Querying storefront at {}...", url);

        let mut request = self
            .http
            .get(url.as_str())
            .insert_header(("Authorization", format!("Bearer {}", self.token)));
        if let Some(group) = &self.group_id {
            request = request.insert_header(("X-Request-Group", group.as_str()));
        }

        let mut response = request
            .send()
            .await
            .map_err(|e| StorefrontError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StorefrontError::Status(response.status().as_u16()));
        }

        response
            .body()
            .await
            .map_err(|e| StorefrontError::Request(e.to_string()))
    }
}

/* -------------------------------------------------------------------------- */
/*                                    Tests                                   */
/* -------------------------------------------------------------------------- */
