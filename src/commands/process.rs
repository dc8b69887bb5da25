//! Operation dispatch.

use tracing::info;
use crate::commands::Editor;
use crate::core::Operation;
use crate::remote::{OperationRequest, ProcessingApi};
use crate::utils::{EditorResult, ValidationError};
use crate::view::ViewSink;

impl<A: ProcessingApi, V: ViewSink> Editor<A, V> {
    /// Applies one transform operation to the editing head.
    ///
    /// The request is built from the session's *current* asset, never the
    /// original: successive operations compose left-to-right on the latest
    /// result. The in-flight guard rejects a second operation before the
    /// first resolves, which is what keeps that composition sound — a
    /// request issued mid-flight would be built from a stale head.
    ///
    /// On failure the head is left byte-identical to its pre-call value and
    /// the guard is cleared; nothing ever partially applies.
    pub async fn apply_operation(&mut self, operation: &Operation) -> EditorResult<()> {
        if self.session.is_empty() {
            return self.fail(ValidationError::UploadRequired.into());
        }
        let request = match self.session.current() {
            Some(base) => OperationRequest::new(base, operation),
            None => return self.fail(ValidationError::UploadRequired.into()),
        };

        if let Err(err) = self.session.begin_request(operation.progress_message()) {
            return self.fail(err);
        }
        self.sync_view();

        let result = self.api.process(request).await;
        self.session.finish_request();

        match result {
            Ok(asset) => {
                info!("Operation '{}' complete: {}", operation, asset.caption());
                self.session.set_current(asset)?;
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
