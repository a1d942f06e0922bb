//! Request entry point.
//!
//! Gates the HTTP method, dispatches to static file serving, finalizes the
//! response headers, and records the access log entry. Every response,
//! whatever its status, passes through the same finalization step.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::header::{HeaderName, REFERER, USER_AGENT};
use hyper::{Method, Request, Response, Version};

use crate::config::AppState;
use crate::handler::static_files;
use crate::http::{self, headers};
use crate::logger::{self, AccessLogEntry};

/// Per-request information threaded through the handlers.
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
}

/// Handle one HTTP request.
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    remote_addr: std::net::SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method();
    let uri = req.uri();
    let is_head = *method == Method::HEAD;

    let ctx = RequestContext {
        path: uri.path(),
        is_head,
    };

    let mut response = match method {
        &Method::GET | &Method::HEAD => static_files::serve(&ctx, &state).await,
        &Method::OPTIONS => http::build_options_response(),
        other => {
            logger::log_warning(&format!("Method not allowed: {other}"));
            http::build_405_response(is_head)
        }
    };

    headers::finalize(&mut response, &state.server_name, &state.extra_headers);

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(
            remote_addr.ip().to_string(),
            method.to_string(),
            uri.path().to_string(),
        );
        entry.query = uri.query().map(ToString::to_string);
        entry.http_version = version_label(req.version()).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = body_bytes(&response);
        entry.referer = header_string(&req, REFERER);
        entry.user_agent = header_string(&req, USER_AGENT);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        _ => "1.1",
    }
}

fn body_bytes(response: &Response<Full<Bytes>>) -> usize {
    usize::try_from(response.body().size_hint().exact().unwrap_or(0)).unwrap_or(usize::MAX)
}

fn header_string(req: &Request<hyper::body::Incoming>, name: HeaderName) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}
