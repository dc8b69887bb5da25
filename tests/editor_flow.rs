//! End-to-end controller tests against an in-memory processing service.
//!
//! The fake records every call it receives, so the tests can assert not
//! just on the resulting session state but on which requests were (and
//! were not) issued.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use image_retoucher::remote::{ExportRequest, OperationRequest, ProcessingApi, UploadPayload};
use image_retoucher::{
    EditorError, EditorResult, Editor, ImageAsset, InputEvent, InputOutcome, Operation,
    Shortcut, ValidationError, ViewModel, ViewSink,
};

/// One request observed by the fake service.
#[derive(Debug, Clone, PartialEq)]
enum Call {
    Upload { file_name: String, media_type: String },
    Process { image: String, operation: String, params: Value },
    Export { image: String },
}

#[derive(Clone, Default)]
struct FakeApi {
    inner: Arc<FakeApiInner>,
}

#[derive(Default)]
struct FakeApiInner {
    asset_responses: Mutex<VecDeque<EditorResult<ImageAsset>>>,
    export_responses: Mutex<VecDeque<EditorResult<String>>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeApi {
    fn new() -> Self {
        Self::default()
    }

    fn respond_with(&self, response: EditorResult<ImageAsset>) {
        self.inner.asset_responses.lock().unwrap().push_back(response);
    }

    fn respond_to_export_with(&self, response: EditorResult<String>) {
        self.inner.export_responses.lock().unwrap().push_back(response);
    }

    fn calls(&self) -> Vec<Call> {
        self.inner.calls.lock().unwrap().clone()
    }

    fn next_asset_response(&self) -> EditorResult<ImageAsset> {
        self.inner
            .asset_responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("fake has no queued asset response")
    }
}

impl ProcessingApi for FakeApi {
    async fn upload(&self, payload: UploadPayload) -> EditorResult<ImageAsset> {
        self.inner.calls.lock().unwrap().push(Call::Upload {
            file_name: payload.file_name,
            media_type: payload.media_type,
        });
        self.next_asset_response()
    }

    async fn process(&self, request: OperationRequest) -> EditorResult<ImageAsset> {
        self.inner.calls.lock().unwrap().push(Call::Process {
            image: request.image,
            operation: request.operation,
            params: request.params,
        });
        self.next_asset_response()
    }

    async fn export(&self, request: ExportRequest) -> EditorResult<String> {
        self.inner.calls.lock().unwrap().push(Call::Export {
            image: request.image,
        });
        self.inner
            .export_responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("fake has no queued export response")
    }
}

/// View sink that records every projection and error it is handed.
#[derive(Debug, Default)]
struct RecordingView {
    rendered: Vec<ViewModel>,
    errors: Vec<String>,
}

impl ViewSink for RecordingView {
    fn render(&mut self, view: &ViewModel) {
        self.rendered.push(view.clone());
    }

    fn show_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}

fn asset(handle: &str, w: u32, h: u32) -> ImageAsset {
    ImageAsset::new(handle, w, h)
}

fn payload(name: &str, media_type: &str) -> UploadPayload {
    UploadPayload {
        file_name: name.to_string(),
        bytes: vec![0xFF, 0xD8, 0xFF],
        media_type: media_type.to_string(),
    }
}

/// Uploads asset A (100x100) and returns the editor ready for operations.
async fn editor_with_upload(api: &FakeApi) -> Editor<FakeApi, RecordingView> {
    let mut editor = Editor::new(api.clone(), RecordingView::default());
    api.respond_with(Ok(asset("data:A", 100, 100)));
    editor
        .begin_upload(payload("photo.jpg", "image/jpeg"))
        .await
        .unwrap();
    editor
}

#[tokio::test]
async fn operations_compose_on_the_editing_head() {
    let api = FakeApi::new();
    let mut editor = editor_with_upload(&api).await;

    api.respond_with(Ok(asset("data:B", 100, 100)));
    editor.apply_operation(&Operation::Grayscale).await.unwrap();
    assert_eq!(editor.session().current(), Some(&asset("data:B", 100, 100)));

    api.respond_with(Ok(asset("data:C", 200, 200)));
    editor
        .apply_operation(&Operation::Upscale { scale: 2.0 })
        .await
        .unwrap();
    assert_eq!(editor.session().current(), Some(&asset("data:C", 200, 200)));

    // The second request must carry the first operation's result, not the
    // original upload.
    let calls = api.calls();
    assert_eq!(
        calls[1],
        Call::Process {
            image: "data:A".to_string(),
            operation: "grayscale".to_string(),
            params: serde_json::json!({}),
        }
    );
    assert_eq!(
        calls[2],
        Call::Process {
            image: "data:B".to_string(),
            operation: "upscale".to_string(),
            params: serde_json::json!({ "scale": 2.0 }),
        }
    );

    // The original is untouched throughout.
    assert_eq!(editor.session().original(), Some(&asset("data:A", 100, 100)));
}

#[tokio::test]
async fn reset_restores_the_original_and_is_idempotent() {
    let api = FakeApi::new();
    let mut editor = editor_with_upload(&api).await;

    api.respond_with(Ok(asset("data:C", 200, 200)));
    editor
        .apply_operation(&Operation::Upscale { scale: 2.0 })
        .await
        .unwrap();

    editor.reset().unwrap();
    assert_eq!(editor.session().current(), Some(&asset("data:A", 100, 100)));

    editor.reset().unwrap();
    assert_eq!(editor.session().current(), Some(&asset("data:A", 100, 100)));
}

#[tokio::test]
async fn operation_without_upload_never_reaches_the_network() {
    let api = FakeApi::new();
    let mut editor = Editor::new(api.clone(), RecordingView::default());

    let err = editor
        .apply_operation(&Operation::Grayscale)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EditorError::Validation(ValidationError::UploadRequired)
    );
    assert!(api.calls().is_empty());
    assert!(editor.session().is_empty());
    assert_eq!(editor.view().errors.len(), 1);
}

#[tokio::test]
async fn download_without_upload_never_reaches_the_network() {
    let api = FakeApi::new();
    let mut editor = Editor::new(api.clone(), RecordingView::default());

    let err = editor.download().await.unwrap_err();
    assert_eq!(
        err,
        EditorError::Validation(ValidationError::NothingToDownload)
    );
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn failed_operation_leaves_head_intact_and_guard_cleared() {
    let api = FakeApi::new();
    let mut editor = editor_with_upload(&api).await;

    api.respond_with(Err(EditorError::remote("out of memory")));
    let err = editor.apply_operation(&Operation::Sepia).await.unwrap_err();
    assert_eq!(err, EditorError::remote("out of memory"));

    // Head byte-identical to its pre-call value.
    assert_eq!(editor.session().current(), Some(&asset("data:A", 100, 100)));
    assert!(editor.session().busy_message().is_none());

    // A subsequent operation proceeds.
    api.respond_with(Ok(asset("data:D", 100, 100)));
    editor.apply_operation(&Operation::Vintage).await.unwrap();
    assert_eq!(editor.session().current(), Some(&asset("data:D", 100, 100)));
}

#[tokio::test]
async fn failed_upload_leaves_the_session_empty() {
    let api = FakeApi::new();
    let mut editor = Editor::new(api.clone(), RecordingView::default());

    api.respond_with(Err(EditorError::remote("unsupported format")));
    let err = editor
        .begin_upload(payload("photo.png", "image/png"))
        .await
        .unwrap_err();
    assert_eq!(err, EditorError::remote("unsupported format"));
    assert!(editor.session().is_empty());
    assert!(editor.session().busy_message().is_none());

    // The next operation attempt fails locally, not remotely.
    let err = editor
        .apply_operation(&Operation::Grayscale)
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(api.calls().len(), 1, "only the upload reached the network");
}

#[tokio::test]
async fn non_image_upload_is_rejected_locally() {
    let api = FakeApi::new();
    let mut editor = Editor::new(api.clone(), RecordingView::default());

    let err = editor
        .begin_upload(payload("notes.txt", "text/plain"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EditorError::Validation(ValidationError::NotAnImage("text/plain".to_string()))
    );
    assert!(api.calls().is_empty());
    assert!(editor.session().is_empty());
}

#[tokio::test]
async fn full_scenario_grayscale_upscale_reset_download() {
    let api = FakeApi::new();
    let mut editor = editor_with_upload(&api).await;
    assert_eq!(editor.session().current(), Some(&asset("data:A", 100, 100)));

    api.respond_with(Ok(asset("data:B", 100, 100)));
    editor.apply_operation(&Operation::Grayscale).await.unwrap();

    api.respond_with(Ok(asset("data:C", 200, 200)));
    editor
        .apply_operation(&Operation::Upscale { scale: 2.0 })
        .await
        .unwrap();
    assert_eq!(editor.session().current(), Some(&asset("data:C", 200, 200)));

    editor.reset().unwrap();
    assert_eq!(editor.session().current(), Some(&asset("data:A", 100, 100)));

    api.respond_to_export_with(Ok("/download/processed_1.png".to_string()));
    let url = editor.download().await.unwrap();
    assert_eq!(url, "/download/processed_1.png");
    assert_eq!(
        api.calls().last().unwrap(),
        &Call::Export {
            image: "data:A".to_string()
        }
    );
    // Download does not mutate the session.
    assert_eq!(editor.session().current(), Some(&asset("data:A", 100, 100)));
}

#[tokio::test]
async fn dropped_non_image_is_rejected_by_declared_type() {
    let api = FakeApi::new();
    let mut editor = Editor::new(api.clone(), RecordingView::default());

    let err = editor
        .handle_input(InputEvent::FileDropped {
            path: "document.pdf".into(),
            media_type: Some("application/pdf".to_string()),
        })
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn picker_route_uploads_through_the_single_entry_point() {
    let dir = std::env::temp_dir().join("image-retoucher-test-picker");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("photo.png");
    std::fs::write(&path, [0x89, 0x50, 0x4E, 0x47]).unwrap();

    let api = FakeApi::new();
    let mut editor = Editor::new(api.clone(), RecordingView::default());
    api.respond_with(Ok(asset("data:A", 64, 64)));

    let outcome = editor
        .handle_input(InputEvent::FileSelected { path: path.clone() })
        .await
        .unwrap();
    assert_eq!(outcome, InputOutcome::Handled);
    assert_eq!(
        api.calls(),
        vec![Call::Upload {
            file_name: "photo.png".to_string(),
            media_type: "image/png".to_string(),
        }]
    );
    assert_eq!(editor.session().original(), Some(&asset("data:A", 64, 64)));

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn shortcuts_share_button_preconditions() {
    let api = FakeApi::new();
    let mut editor = Editor::new(api.clone(), RecordingView::default());

    // Open requests a file chooser from the shell.
    let outcome = editor
        .handle_input(InputEvent::Shortcut(Shortcut::Open))
        .await
        .unwrap();
    assert_eq!(outcome, InputOutcome::FileChooserRequested);

    // Save and Reset on an empty session fail the same local checks as the
    // buttons, with no network call.
    let err = editor
        .handle_input(InputEvent::Shortcut(Shortcut::Save))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EditorError::Validation(ValidationError::NothingToDownload)
    );
    let err = editor
        .handle_input(InputEvent::Shortcut(Shortcut::Reset))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EditorError::Validation(ValidationError::NothingToReset)
    );
    assert!(api.calls().is_empty());

    // After an upload, Save goes through the export endpoint.
    api.respond_with(Ok(asset("data:A", 100, 100)));
    editor
        .begin_upload(payload("photo.jpg", "image/jpeg"))
        .await
        .unwrap();
    api.respond_to_export_with(Ok("/download/processed_2.png".to_string()));
    let outcome = editor
        .handle_input(InputEvent::Shortcut(Shortcut::Save))
        .await
        .unwrap();
    assert_eq!(
        outcome,
        InputOutcome::ExportReady("/download/processed_2.png".to_string())
    );
}

#[tokio::test]
async fn view_tracks_busy_transitions_and_errors() {
    let api = FakeApi::new();
    let mut editor = editor_with_upload(&api).await;

    // Upload rendered: once busy, once ready.
    {
        let rendered = &editor.view().rendered;
        assert_eq!(rendered.len(), 2);
        assert_eq!(rendered[0].busy.as_deref(), Some("Uploading image..."));
        assert!(rendered[1].busy.is_none());
        assert!(rendered[1].can_edit && rendered[1].can_download);
    }

    api.respond_with(Err(EditorError::remote("boom")));
    let _ = editor.apply_operation(&Operation::Blur { radius: 2.0 }).await;

    let rendered = &editor.view().rendered;
    assert_eq!(rendered.len(), 4);
    assert_eq!(rendered[2].busy.as_deref(), Some("Applying blur..."));
    // Busy indicator cleared on the failure path; controls re-enabled.
    assert!(rendered[3].busy.is_none());
    assert!(rendered[3].can_edit);
    assert_eq!(editor.view().errors, vec!["Server error: boom".to_string()]);
}
