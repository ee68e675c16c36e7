//! Upload response models.

use serde::Deserialize;

use crate::UploadError;

/// Hosts answer either `{"url": "..."}` or the nested
/// `{"data": {"link": "..."}}` form.
#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub data: Option<UploadData>,
}

#[derive(Debug, Deserialize)]
pub struct UploadData {
    #[serde(default)]
    pub link: Option<String>,
}

impl UploadResponse {
    pub fn into_url(self) -> Option<String> {
        self.url
            .or_else(|| self.data.and_then(|d| d.link))
            .filter(|u| !u.trim().is_empty())
    }
}

/// Extract the public URL from an upload response body.
pub fn parse_upload_response(body: &str) -> Result<String, UploadError> {
    let parsed: UploadResponse = serde_json::from_str(body)?;
    parsed.into_url().ok_or(UploadError::MissingUrl)
}
