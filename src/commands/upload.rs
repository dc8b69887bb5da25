//! Upload entry point.
//!
//! All three ingress triggers (file picker, drag-and-drop, keyboard open)
//! funnel into [`Editor::begin_upload`]; there is exactly one place where
//! upload semantics and error handling live.

use tracing::info;
use crate::commands::Editor;
use crate::remote::{ProcessingApi, UploadPayload};
use crate::utils::{is_image_media_type, EditorResult, ValidationError};
use crate::view::ViewSink;

impl<A: ProcessingApi, V: ViewSink> Editor<A, V> {
    /// Uploads a source image, making it both the original and the editing
    /// head of the session.
    ///
    /// A non-image declared content type fails locally with no network call
    /// and no state change. While the upload is in flight the session is
    /// guarded; a failed upload leaves it exactly as it was (including the
    /// first-ever upload, after which it is still empty).
    pub async fn begin_upload(&mut self, payload: UploadPayload) -> EditorResult<()> {
        if !is_image_media_type(&payload.media_type) {
            return self.fail(ValidationError::NotAnImage(payload.media_type.clone()).into());
        }

        if let Err(err) = self.session.begin_request("Uploading image...") {
            return self.fail(err);
        }
        self.sync_view();

        let result = self.api.upload(payload).await;
        self.session.finish_request();

        match result {
            Ok(asset) => {
                info!("Upload complete: {}", asset.caption());
                self.session.set_original(asset)?;
                self.sync_view();
                Ok(())
            }
            Err(err) => {
                self.sync_view();
                self.fail(err)
            }
        }
    }
}
