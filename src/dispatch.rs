/// The event dispatcher: one inbound request, exactly one response.
///
/// Every request first attempts the asset store; a miss falls through to
/// the application handler. Whatever faults escape either attempt are
/// caught at the single boundary here, so the hosting runtime always gets
/// its response.
use std::fmt::Display;

use actix_web::http::Method;
use actix_web::{HttpRequest, HttpResponse};
use log::{debug, error, info};

use crate::asset::{Asset, AssetError, AssetStore};
use crate::cache::CachePolicy;
use crate::conf::{Mode, ServerConfig};
use crate::context::{ContextError, build_context};
use crate::handler::{AppHandler, HandlerError};
use crate::manifest::BuildManifest;
use crate::work::DeferredWork;

/// What production mode answers when a fault reaches the boundary.
/// Never carries details of what went wrong.
pub const OPAQUE_FAILURE_BODY: &str = "Internal Error";

#[derive(Debug, PartialEq, Eq)]
pub enum DispatchError {
    /// The asset store faulted (anything other than a miss).
    Store(AssetError),
    /// The request context could not be built.
    Context(ContextError),
    /// The application handler failed without a response of its own.
    Handler(HandlerError),
}

/// Allows displaying dispatch errors in a human readable format
impl Display for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(e) => write!(f, "Asset store fault: {}", e),
            Self::Context(e) => write!(f, "Context fault: {}", e),
            Self::Handler(e) => write!(f, "Handler fault: {}", e),
        }
    }
}

impl From<ContextError> for DispatchError {
    fn from(e: ContextError) -> Self {
        Self::Context(e)
    }
}

impl From<HandlerError> for DispatchError {
    fn from(e: HandlerError) -> Self {
        Self::Handler(e)
    }
}

/* -------------------------------------------------------------------------- */
/*                                Asset Attempt                               */
/* -------------------------------------------------------------------------- */

/// Looks the request up in the asset store, respecting that only GET and
/// HEAD can retrieve static assets.
async fn lookup_asset<S: AssetStore>(
    store: &S,
    req: &HttpRequest,
) -> Result<impl Asset, AssetError> {
    if *req.method() == Method::GET || *req.method() == Method::HEAD {
        store.asset_at(req.path()).await
    } else {
        Err(AssetError::MethodNotAllowed)
    }
}

/// First attempt in the chain. `Ok(None)` is a miss: the request is not a
/// stored asset and the application should have it. Store faults are not
/// misses and propagate.
pub async fn attempt_asset<S: AssetStore>(
    store: &S,
    manifest: &BuildManifest,
    mode: Mode,
    req: &HttpRequest,
) -> Result<Option<HttpResponse>, DispatchError> {
    let asset = match lookup_asset(store, req).await {
        Ok(v) => v,
        Err(e) if e.is_miss() => {
            debug!("Asset miss for {} {} ({})", req.method(), req.path(), e);
            return Ok(None);
        }
        Err(e) => {
            error!("Asset store fault for {}: {}", req.path(), e);
            return Err(DispatchError::Store(e));
        }
    };

    let policy = match mode.is_development() {
        // Developers see live content; nothing may cache it.
        true => CachePolicy::bypass(),
        false => CachePolicy::select(req.path(), manifest.asset_url()),
    };

    info!("Serving asset {} (cache: {})", req.path(), policy.cache_control_header());
    Ok(Some(asset_response(&asset, &policy)))
}

fn asset_response(asset: &impl Asset, policy: &CachePolicy) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(asset.mime_type().unwrap_or("application/octet-stream"))
        .insert_header(("Cache-Control", policy.cache_control_header()))
        .body(asset.bytes().to_vec())
}

/* -------------------------------------------------------------------------- */
/*                             Application Attempt                            */
/* -------------------------------------------------------------------------- */

/// Second attempt in the chain: build the per-request context and hand the
/// request to the application. The handler's response, success or error
/// page, passes through untouched.
pub async fn attempt_app<A: AppHandler>(
    app: &A,
    config: &ServerConfig,
    work: &DeferredWork,
    req: &HttpRequest,
) -> Result<HttpResponse, DispatchError> {
    let ctx = build_context(req, config, work.clone())?;
    let resp = app.handle(req, &ctx).await?;
    Ok(resp)
}

/* -------------------------------------------------------------------------- */
/*                              Failure Boundary                              */
/* -------------------------------------------------------------------------- */

/// Maps a fault that reached the boundary onto the one 500 the event gets.
/// Development exposes the fault's message; production never does.
pub fn respond_failure(error: &DispatchError, mode: Mode) -> HttpResponse {
    error!("Dispatch failed: {}", error);
    match mode.is_development() {
        true => HttpResponse::InternalServerError().body(error.to_string()),
        false => HttpResponse::InternalServerError().body(OPAQUE_FAILURE_BODY),
    }
}

async fn run_attempts<S: AssetStore, A: AppHandler>(
    store: &S,
    app: &A,
    config: &ServerConfig,
    manifest: &BuildManifest,
    work: &DeferredWork,
    req: &HttpRequest,
) -> Result<HttpResponse, DispatchError> {
    if let Some(resp) = attempt_asset(store, manifest, config.general.mode, req).await? {
        return Ok(resp);
    }

    attempt_app(app, config, work, req).await
}

/// Dispatches one inbound event. Infallible by construction: attempts run
/// in order, first response wins, and any fault becomes the boundary's
/// mode-dependent 500.
pub async fn dispatch_event<S: AssetStore, A: AppHandler>(
    store: &S,
    app: &A,
    config: &ServerConfig,
    manifest: &BuildManifest,
    work: &DeferredWork,
    req: &HttpRequest,
) -> HttpResponse {
    match run_attempts(store, app, config, manifest, work, req).await {
        Ok(resp) => resp,
        Err(e) => respond_failure(&e, config.general.mode),
    }
}

/* -------------------------------------------------------------------------- */
/*                                    Tests                                   */
/* -------------------------------------------------------------------------- */
