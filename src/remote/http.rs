//! HTTP implementation of the processing contract using `reqwest`.

use std::time::Duration;
use reqwest::multipart::{Form, Part};
use tracing::debug;
use crate::core::ImageAsset;
use crate::remote::types::{
    AssetResponse, ExportRequest, ExportResponse, OperationRequest, UploadPayload,
};
use crate::remote::ProcessingApi;
use crate::utils::{EditorError, EditorResult};

/// Bound on every request. The original client would leave the busy state
/// hanging forever on a stalled connection; expiry surfaces as a transport
/// error and releases the session like any other failure.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for a running retouching service.
#[derive(Debug, Clone)]
pub struct HttpProcessingApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpProcessingApi {
    /// Creates a client for the service at `base_url`
    /// (e.g. `http://127.0.0.1:5000`).
    pub fn new(base_url: impl Into<String>) -> EditorResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(EditorError::from)?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Retrieves the bytes behind a server-provided resource locator.
    ///
    /// Download URLs come back relative to the service root; absolute URLs
    /// are passed through. This is the headless analog of the browser
    /// following the download link.
    pub async fn fetch(&self, download_url: &str) -> EditorResult<Vec<u8>> {
        let url = if download_url.starts_with("http://") || download_url.starts_with("https://") {
            download_url.to_string()
        } else {
            self.endpoint(download_url)
        };
        debug!("Fetching export from {}", url);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(EditorError::transport(format!(
                "Export fetch failed with status {}",
                response.status()
            )));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

impl ProcessingApi for HttpProcessingApi {
    async fn upload(&self, payload: UploadPayload) -> EditorResult<ImageAsset> {
        debug!(
            "Uploading {} ({} bytes, {})",
            payload.file_name,
            payload.bytes.len(),
            payload.media_type
        );
        let part = Part::bytes(payload.bytes)
            .file_name(payload.file_name)
            .mime_str(&payload.media_type)
            .map_err(EditorError::from)?;
        let form = Form::new().part("file", part);

        let response: AssetResponse = self
            .client
            .post(self.endpoint("/upload"))
            .multipart(form)
            .send()
            .await?
            .json()
            .await?;
        response.into_asset()
    }

    async fn process(&self, request: OperationRequest) -> EditorResult<ImageAsset> {
        debug!("Requesting operation '{}'", request.operation);
        let response: AssetResponse = self
            .client
            .post(self.endpoint("/process"))
            .json(&request)
            .send()
            .await?
            .json()
            .await?;
        response.into_asset()
    }

    async fn export(&self, request: ExportRequest) -> EditorResult<String> {
        debug!("Requesting export");
        let response: ExportResponse = self
            .client
            .post(self.endpoint("/download"))
            .json(&request)
            .send()
            .await?
            .json()
            .await?;
        response.into_download_url()
    }
}
