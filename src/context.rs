use std::fmt::Display;

use actix_web::HttpRequest;
use log::debug;

use crate::conf::ServerConfig;
use crate::storefront::StorefrontClient;
use crate::work::DeferredWork;

/// Header carrying the inbound correlation id for a request group.
pub const REQUEST_GROUP_HEADER: &str = "X-Request-Group";

#[derive(Debug, PartialEq, Eq)]
pub enum ContextError {
    /// No storefront token is configured. The handler cannot run without
    /// one, so this is fatal rather than silently defaulted.
    MissingToken,
    /// The configured storefront URL does not parse.
    BadStorefrontUrl,
}

/// Allows displaying context errors in a human readable format
impl Display for ContextError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingToken => f.write_str("Missing storefront token"),
            Self::BadStorefrontUrl => f.write_str("Bad storefront URL"),
        }
    }
}

/// Per-request capability bundle handed to the application handler.
///
/// Built fresh for every dispatched request, never shared across requests,
/// and dropped when the request completes. Construction performs no I/O.
pub struct RequestContext {
    /// Correlation id taken from the inbound request, if any.
    pub group_id: Option<String>,
    /// Storefront API client bound to this request.
    pub storefront: StorefrontClient,
    /// Registration hook for work that outlives the response.
    pub work: DeferredWork,
}

/// Builds the context the application handler runs with.
pub fn build_context(
    req: &HttpRequest,
    config: &ServerConfig,
    work: DeferredWork,
) -> Result<RequestContext, ContextError> {
    let group_id = req
        .headers()
        .get(REQUEST_GROUP_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());

    let token = match &config.storefront.token {
        Some(v) => v.clone(),
        None => return Err(ContextError::MissingToken),
    };

    let storefront = StorefrontClient::new(&config.storefront.url, token, group_id.clone())
        .map_err(|_| ContextError::BadStorefrontUrl)?;

    match &group_id {
        Some(v) => debug!("Built context for request group \"{}\"", v),
        None => debug!("Built context with no request group"),
    }

    Ok(RequestContext {
        group_id,
        storefront,
        work,
    })
}

/* -------------------------------------------------------------------------- */
/*                                    Tests                                   */
/* -------------------------------------------------------------------------- */
