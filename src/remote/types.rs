//! Wire types for the retouching service protocol.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::core::{ImageAsset, Operation};
use crate::utils::{EditorError, EditorResult};

/// One file handed to the upload endpoint as a multipart request.
#[derive(Debug, Clone)]
pub struct UploadPayload {
    /// Original file name, forwarded as the multipart file name
    pub file_name: String,
    /// Raw file bytes
    pub bytes: Vec<u8>,
    /// Declared content type (`image/...`), already validated by ingress
    pub media_type: String,
}

/// JSON body of a `/process` request.
///
/// Built from the session's *current* asset so that operations compose on
/// the editing head, never on the original upload. Ephemeral: constructed
/// per user action and dropped after the request resolves.
#[derive(Debug, Clone, Serialize)]
pub struct OperationRequest {
    /// Encoded image the operation is applied to
    pub image: String,
    /// Wire name of the operation
    pub operation: String,
    /// Operation-specific parameters, possibly empty
    pub params: Value,
}

impl OperationRequest {
    pub fn new(base: &ImageAsset, operation: &Operation) -> Self {
        Self {
            image: base.handle.clone(),
            operation: operation.name().to_string(),
            params: operation.params(),
        }
    }
}

/// JSON body of a `/download` request.
#[derive(Debug, Clone, Serialize)]
pub struct ExportRequest {
    pub image: String,
}

/// Response shared by the upload and process endpoints.
///
/// Error responses from the service omit the `success` field entirely and
/// carry only `error`, so every field is defaulted.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub error: Option<String>,
}

impl AssetResponse {
    /// Interprets the response: a successful one yields the new asset, a
    /// failed one yields the server-supplied message as a remote error.
    pub fn into_asset(self) -> EditorResult<ImageAsset> {
        if !self.success {
            return Err(EditorError::remote(
                self.error.unwrap_or_else(|| "Unknown server error".to_string()),
            ));
        }
        match (self.image, self.width, self.height) {
            (Some(handle), Some(width), Some(height)) => {
                Ok(ImageAsset::new(handle, width, height))
            }
            _ => Err(EditorError::transport(
                "Server response is missing image data",
            )),
        }
    }
}

/// Response of the export endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ExportResponse {
    /// Interprets the response, yielding the server-provided resource
    /// locator for the exported image.
    pub fn into_download_url(self) -> EditorResult<String> {
        if !self.success {
            return Err(EditorError::remote(
                self.error.unwrap_or_else(|| "Unknown server error".to_string()),
            ));
        }
        self.download_url
            .ok_or_else(|| EditorError::transport("Server response is missing download_url"))
    }
}
