use reqwest::multipart::{Form, Part};
use url::Url;

use crate::response::parse_upload_response;
use crate::{ImageHost, UploadError};

/// Multipart field name carrying the image.
pub const IMAGE_FIELD: &str = "image";

/// Uploads images as `multipart/form-data` to a fixed endpoint.
#[derive(Debug, Clone)]
pub struct HttpImageHost {
    http: reqwest::Client,
    endpoint: Url,
}

impl HttpImageHost {
    pub fn new(endpoint: &str) -> Result<Self, UploadError> {
        let endpoint = Url::parse(endpoint)?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(UploadError::UnsupportedScheme(endpoint.scheme().to_string()));
        }
        Ok(Self {
            http: reqwest::Client::new(),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl ImageHost for HttpImageHost {
    async fn upload(&self, image: Vec<u8>, file_name: &str) -> Result<String, UploadError> {
        let len = image.len();
        let part = Part::bytes(image)
            .file_name(file_name.to_string())
            .mime_str("image/jpeg")?;
        let form = Form::new().part(IMAGE_FIELD, part);

        tracing::debug!(endpoint = %self.endpoint, file_name, len, "Uploading image");
        let resp = self
            .http
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Image host rejected upload");
            return Err(UploadError::Status {
                status: status.as_u16(),
                body,
            });
        }

        parse_upload_response(&body)
    }
}
