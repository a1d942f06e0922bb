//! Response finalization.
//!
//! Every response leaves the server through [`finalize`], which fills in the
//! standard `Server` and `Date` fields and merges the configured extra
//! headers. The merge is additive: an extra header is only inserted when the
//! handler did not already set a header with that name, so configuration can
//! never clobber protocol-relevant fields like `Content-Type`.

use chrono::{DateTime, Utc};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderName, HeaderValue, DATE, SERVER};
use hyper::Response;

/// Stamp standard and extra headers onto a finished response.
pub fn finalize(
    response: &mut Response<Full<Bytes>>,
    server_name: &HeaderValue,
    extra_headers: &[(HeaderName, HeaderValue)],
) {
    let headers = response.headers_mut();

    if !headers.contains_key(SERVER) {
        headers.insert(SERVER, server_name.clone());
    }
    if !headers.contains_key(DATE) {
        if let Ok(value) = HeaderValue::from_str(&http_date(Utc::now())) {
            headers.insert(DATE, value);
        }
    }

    for (name, value) in extra_headers {
        if !headers.contains_key(name) {
            headers.insert(name.clone(), value.clone());
        }
    }
}

/// Format a timestamp as an RFC 7231 HTTP-date (always GMT).
pub fn http_date(time: DateTime<Utc>) -> String {
    time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn extra() -> Vec<(HeaderName, HeaderValue)> {
        vec![(
            HeaderName::from_static("service-worker-allowed"),
            HeaderValue::from_static("/"),
        )]
    }

    fn server_name() -> HeaderValue {
        HeaderValue::from_static("swserve/0.1")
    }

    #[test]
    fn test_extra_header_added_exactly_once() {
        let mut response = Response::new(Full::new(Bytes::from("ok")));
        finalize(&mut response, &server_name(), &extra());

        let values: Vec<_> = response
            .headers()
            .get_all("service-worker-allowed")
            .iter()
            .collect();
        assert_eq!(values, vec!["/"]);
    }

    #[test]
    fn test_extra_header_does_not_override_base() {
        let mut response = Response::builder()
            .header("service-worker-allowed", "/scope/")
            .body(Full::new(Bytes::new()))
            .unwrap();
        finalize(&mut response, &server_name(), &extra());

        assert_eq!(
            response.headers().get("service-worker-allowed").unwrap(),
            "/scope/"
        );
        assert_eq!(
            response
                .headers()
                .get_all("service-worker-allowed")
                .iter()
                .count(),
            1
        );
    }

    #[test]
    fn test_server_and_date_are_set() {
        let mut response = Response::new(Full::new(Bytes::new()));
        finalize(&mut response, &server_name(), &extra());

        assert_eq!(response.headers().get(SERVER).unwrap(), "swserve/0.1");
        let date = response.headers().get(DATE).unwrap().to_str().unwrap();
        assert!(date.ends_with(" GMT"));
    }

    #[test]
    fn test_handler_supplied_server_header_wins() {
        let mut response = Response::builder()
            .header(SERVER, "other/2.0")
            .body(Full::new(Bytes::new()))
            .unwrap();
        finalize(&mut response, &server_name(), &extra());

        assert_eq!(response.headers().get(SERVER).unwrap(), "other/2.0");
    }

    #[test]
    fn test_http_date_format() {
        let time = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(http_date(time), "Mon, 15 Jan 2024 10:30:00 GMT");
    }
}
