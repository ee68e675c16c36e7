//! Image hosting client library.
//!
//! Publishes encoded images to an external host and returns the public URL
//! the host assigns. [`ImageHost`] is the seam composers depend on;
//! [`HttpImageHost`] is the multipart-upload implementation.

pub mod http;
pub mod response;

use std::future::Future;

pub use http::HttpImageHost;
pub use response::parse_upload_response;

/// Unified error type for the image-host crate.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image host error (status {status}): {body}")]
    Status { status: u16, body: String },

    #[error("Image host response did not contain a URL")]
    MissingUrl,

    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error("Unsupported endpoint scheme: {0}")]
    UnsupportedScheme(String),
}

/// Accepts JPEG bytes and returns a publicly reachable URL.
pub trait ImageHost {
    fn upload(
        &self,
        image: Vec<u8>,
        file_name: &str,
    ) -> impl Future<Output = Result<String, UploadError>> + Send;
}
