//! Boundary client for the remote retouching service.
//!
//! The controller consumes the service exclusively through the
//! [`ProcessingApi`] trait; [`HttpProcessingApi`] is the production
//! implementation. Tests substitute an in-memory fake.

mod http;
mod types;

pub use http::HttpProcessingApi;
pub use types::{
    AssetResponse, ExportRequest, ExportResponse, OperationRequest, UploadPayload,
};

use crate::core::ImageAsset;
use crate::utils::EditorResult;

/// Request/response contract of the processing service.
///
/// All pixel-level work lives behind these three calls; the client only
/// ever sees opaque encoded assets and their dimensions.
#[allow(async_fn_in_trait)]
pub trait ProcessingApi {
    /// Uploads raw file bytes, returning the decoded source asset.
    async fn upload(&self, payload: UploadPayload) -> EditorResult<ImageAsset>;

    /// Applies one named operation to the carried image.
    async fn process(&self, request: OperationRequest) -> EditorResult<ImageAsset>;

    /// Prepares the carried image for download, returning its resource locator.
    async fn export(&self, request: ExportRequest) -> EditorResult<String>;
}
