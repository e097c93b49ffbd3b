use std::fmt::Display;

use actix_web::{HttpRequest, HttpResponse};

use crate::context::RequestContext;

#[derive(Debug, PartialEq, Eq)]
pub enum HandlerError {
    /// The handler gave up without producing an HTTP response of its own.
    Failed(String),
}

/// Allows displaying handler errors in a human readable format
impl Display for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Failed(msg) => f.write_str(msg),
        }
    }
}

/// The application request handler the dispatcher falls through to.
///
/// Treated as an external collaborator: whatever response it produces is
/// passed through untouched, including its own `Cache-Control`. A handler
/// that wants to report an error as a page returns `Ok` with that page;
/// returning `Err` hands the fault to the dispatch boundary instead.
pub trait AppHandler {
    fn handle(
        &self,
        req: &HttpRequest,
        ctx: &RequestContext,
    ) -> impl Future<Output = Result<HttpResponse, HandlerError>>;
}

/* -------------------------------------------------------------------------- */
/*                               Default Handler                              */
/* -------------------------------------------------------------------------- */

/// Minimal built-in application used by the binary when no real app is
/// wired in. Answers every path with a plain landing page.
#[derive(Clone)]
pub struct DefaultApp {
    name: String,
}

impl DefaultApp {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl AppHandler for DefaultApp {
    async fn handle(
        &self,
        req: &HttpRequest,
        ctx: &RequestContext,
    ) -> Result<HttpResponse, HandlerError> {
        let group = ctx.group_id.as_deref().unwrap_or("-");
        Ok(HttpResponse::Ok().content_type("text/html").body(format!(
            "<!DOCTYPE html><html><body><h1>{}</h1><p>No app handler is \
             configured. Requested: {} (group {})</p></body></html>",
            self.name,
            req.path(),
            group
        )))
    }
}

/* -------------------------------------------------------------------------- */
/*                                    Tests                                   */
/* -------------------------------------------------------------------------- */
