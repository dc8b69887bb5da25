//! Download and reset entry points.

use tracing::info;
use crate::commands::Editor;
use crate::remote::{ExportRequest, ProcessingApi};
use crate::utils::{EditorResult, ValidationError};
use crate::view::ViewSink;

impl<A: ProcessingApi, V: ViewSink> Editor<A, V> {
    /// Exports the editing head, returning the server-provided resource
    /// locator for the shell to save from. Does not mutate the session.
    pub async fn download(&mut self) -> EditorResult<String> {
        let request = match self.session.current() {
            Some(current) => ExportRequest {
                image: current.handle.clone(),
            },
            None => return self.fail(ValidationError::NothingToDownload.into()),
        };

        if let Err(err) = self.session.begin_request("Preparing download...") {
            return self.fail(err);
        }
        self.sync_view();

        let result = self.api.export(request).await;
        self.session.finish_request();
        self.sync_view();

        match result {
            Ok(url) => {
                info!("Export ready at {}", url);
                Ok(url)
            }
            Err(err) => self.fail(err),
        }
    }

    /// Discards all edits, restoring the original as the editing head.
    ///
    /// Reported as a user error when no upload has occurred yet, and
    /// rejected while a request is in flight.
    pub fn reset(&mut self) -> EditorResult<()> {
        if let Err(err) = self.session.reset_to_original() {
            return self.fail(err);
        }
        info!("Session reset to original");
        self.sync_view();
        Ok(())
    }
}
