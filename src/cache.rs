/// Decides how an asset response may be cached, and by whom.
///
/// Hashed assets are safe to cache anywhere: their URL changes whenever
/// their content does. Assets reachable under a non-hashed URL are only
/// safe to cache at the edge, where the stored object itself is
/// content-addressed, never in the browser.
use std::time::Duration;

/// One year, the TTL used for content-addressed responses.
pub const YEAR_TTL: Duration = Duration::from_secs(31_536_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// Skip every cache. Forced in development so live content is visible.
    pub bypass: bool,
    /// How long shared (edge) caches may hold the response.
    pub edge_ttl: Option<Duration>,
    /// How long the browser may hold the response.
    pub browser_ttl: Option<Duration>,
}

impl CachePolicy {
    /// A policy that disables caching entirely.
    pub fn bypass() -> Self {
        Self {
            bypass: true,
            edge_ttl: None,
            browser_ttl: None,
        }
    }

    /// Selects the cache policy for an asset hit.
    ///
    /// Both paths get their final segment stripped; if the request then
    /// falls under the build's published asset prefix, its URL is itself
    /// content-hashed and the browser may cache it too. Otherwise only the
    /// edge may. Pure string comparison, by spec of the build layout.
    pub fn select(request_path: &str, manifest_asset_url: &str) -> Self {
        let asset_prefix = strip_last_segment(manifest_asset_url);
        let request_prefix = strip_last_segment(request_path);

        if request_prefix.starts_with(asset_prefix) {
            Self {
                bypass: false,
                edge_ttl: Some(YEAR_TTL),
                browser_ttl: Some(YEAR_TTL),
            }
        } else {
            Self {
                bypass: false,
                edge_ttl: Some(YEAR_TTL),
                browser_ttl: None,
            }
        }
    }

    /// Renders the policy as a `Cache-Control` header value.
    /// Browser TTL maps to `max-age`, edge TTL to `s-maxage`.
    pub fn cache_control_header(&self) -> String {
        if self.bypass {
            return "no-store".to_string();
        }

        let mut parts = vec!["public".to_string()];

        if let Some(browser) = self.browser_ttl {
            parts.push(format!("max-age={}", browser.as_secs()));
        }

        if let Some(edge) = self.edge_ttl {
            parts.push(format!("s-maxage={}", edge.as_secs()));
        }

        parts.join(", ")
    }
}

/// Drops the final `/`-separated segment of a path.
/// `/build/assets/app.js` becomes `/build/assets`, `/favicon.ico` becomes
/// the empty string.
fn strip_last_segment(path: &str) -> &str {
    match path.rsplit_once('/') {
        Some((head, _)) => head,
        None => "",
    }
}

/* -------------------------------------------------------------------------- */
/*                                    Tests                                   */
/* -------------------------------------------------------------------------- */
