//! HTTP response builders.
//!
//! One constructor per response shape the server produces. Builders only set
//! the headers that describe their own body; `Server`, `Date`, and the
//! configured extra headers are stamped on afterwards by
//! [`crate::http::headers::finalize`].

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use crate::logger;

/// Methods this server answers.
pub const ALLOWED_METHODS: &str = "GET, HEAD, OPTIONS";

/// Build a 200 response carrying file bytes.
///
/// `HEAD` requests get the same headers, including the full `Content-Length`,
/// with an empty body.
pub fn build_file_response(
    data: Vec<u8>,
    content_type: &'static str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(data)
    };

    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build a 200 response for generated HTML (directory listings).
pub fn build_html_response(content: String, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = content.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(content)
    };

    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "text/html; charset=utf-8")
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("HTML", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build a 301 redirect, used for directory paths missing their trailing slash.
pub fn build_redirect_response(location: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::MOVED_PERMANENTLY)
        .header("Location", location)
        .header("Content-Length", 0)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("301", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build a 204 response for OPTIONS.
pub fn build_options_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Allow", ALLOWED_METHODS)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("204", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build a 404 Not Found response.
pub fn build_404_response(is_head: bool) -> Response<Full<Bytes>> {
    build_error_response(
        StatusCode::NOT_FOUND,
        "Nothing matches the given URI.",
        is_head,
    )
}

/// Build a 405 Method Not Allowed response.
pub fn build_405_response(is_head: bool) -> Response<Full<Bytes>> {
    let mut response = build_error_response(
        StatusCode::METHOD_NOT_ALLOWED,
        "The method is not supported by this server.",
        is_head,
    );
    if let Ok(allow) = ALLOWED_METHODS.parse() {
        response.headers_mut().insert(hyper::header::ALLOW, allow);
    }
    response
}

/// Build a 500 Internal Server Error response.
pub fn build_500_response(is_head: bool) -> Response<Full<Bytes>> {
    build_error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "The server failed to read the requested file.",
        is_head,
    )
}

/// Build an error response with a short HTML body.
fn build_error_response(
    status: StatusCode,
    explanation: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let page = error_page(status, explanation);
    let content_length = page.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(page)
    };

    Response::builder()
        .status(status)
        .header("Content-Type", "text/html; charset=utf-8")
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::new()))
        })
}

fn error_page(status: StatusCode, explanation: &str) -> String {
    let reason = status.canonical_reason().unwrap_or("Error");
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head><meta charset=\"utf-8\"><title>{code} {reason}</title></head>\n\
         <body>\n\
         <h1>{code} {reason}</h1>\n\
         <p>{explanation}</p>\n\
         </body>\n\
         </html>\n",
        code = status.as_u16(),
    )
}

/// Log a response build error.
fn log_build_error(status: &str, error: &hyper::http::Error) {
    logger::log_error(&format!("Failed to build {status} response: {error}"));
}
