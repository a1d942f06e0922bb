//! HTTP protocol layer.
//!
//! Protocol-level building blocks shared by the request handlers: MIME
//! inference, URL percent-coding, response constructors, and the header
//! finalization step applied to every outgoing response.

pub mod headers;
pub mod mime;
pub mod response;
pub mod url;

pub use response::{
    build_404_response, build_405_response, build_500_response, build_file_response,
    build_html_response, build_options_response, build_redirect_response,
};
