//! Request routing dispatch module
//!
//! Entry point for HTTP request processing. Routes are registered as
//! explicit (method, path) pairs; requests no route claims fall through to
//! the table's fallback entry.

use crate::config::{AppState, StaticFilesConfig};
use crate::handler::{console_log, static_files};
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

/// Handlers a route can be registered against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// Log event ingest endpoint.
    ConsoleLogIngest,
}

/// Where unmatched GET/HEAD requests end up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fallback {
    /// Serve files from a directory (the companion page lives here).
    StaticFiles {
        root: String,
        index_files: Vec<String>,
    },
    /// Static serving disabled: unmatched requests are 404.
    NotFound,
}

struct Route {
    method: Method,
    path: String,
    kind: RouteKind,
}

/// Explicit route table: (method, path) pairs mapped to handlers, plus a
/// default fallback entry.
pub struct RouteTable {
    routes: Vec<Route>,
    fallback: Fallback,
}

impl RouteTable {
    /// The table this server runs: the ingest endpoint and the configured
    /// static fallback.
    pub fn standard(static_files: &StaticFilesConfig) -> Self {
        let fallback = if static_files.enabled {
            Fallback::StaticFiles {
                root: static_files.root.clone(),
                index_files: static_files.index_files.clone(),
            }
        } else {
            Fallback::NotFound
        };

        let mut table = Self::empty(fallback);
        table.register(Method::POST, "/api/console-log", RouteKind::ConsoleLogIngest);
        table
    }

    pub const fn empty(fallback: Fallback) -> Self {
        Self {
            routes: Vec::new(),
            fallback,
        }
    }

    /// Register a handler for an exact (method, path) pair.
    pub fn register(&mut self, method: Method, path: &str, kind: RouteKind) {
        self.routes.push(Route {
            method,
            path: path.to_string(),
            kind,
        });
    }

    /// Look up the registered handler for a request line.
    pub fn lookup(&self, method: &Method, path: &str) -> Option<RouteKind> {
        self.routes
            .iter()
            .find(|route| route.method == *method && route.path == path)
            .map(|route| route.kind)
    }

    pub const fn fallback(&self) -> &Fallback {
        &self.fallback
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    if state.config.logging.access_log {
        logger::log_request(&method, req.uri(), req.version());
    }

    if state.config.logging.show_headers {
        logger::log_headers_count(req.headers().len());
    }

    // Preflight is answered before routing: browsers probe arbitrary paths
    if method == Method::OPTIONS {
        return Ok(http::build_options_response());
    }

    let response = match state.routes.lookup(&method, &path) {
        Some(RouteKind::ConsoleLogIngest) => {
            console_log::handle_ingest(req, &state.config.http).await
        }
        None => dispatch_fallback(&method, &path, state.routes.fallback()).await,
    };

    Ok(response)
}

/// Handle a request no registered route claimed.
///
/// Only GET/HEAD fall through to static serving; any other verb on an
/// unregistered path is 405.
async fn dispatch_fallback(
    method: &Method,
    path: &str,
    fallback: &Fallback,
) -> Response<Full<Bytes>> {
    if *method != Method::GET && *method != Method::HEAD {
        logger::log_warning(&format!("Method not allowed: {method} {path}"));
        return http::build_405_response();
    }

    match fallback {
        Fallback::StaticFiles { root, index_files } => {
            static_files::serve(root, path, index_files, *method == Method::HEAD).await
        }
        Fallback::NotFound => http::build_404_response(),
    }
}
