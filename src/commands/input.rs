//! Ingress normalization.
//!
//! The three ways a user can start an action (picking a file, dropping one
//! onto the view, or a keyboard shortcut) are normalized into [`InputEvent`]
//! and dispatched by [`Editor::handle_input`]. Each route goes through the
//! same entry point as the corresponding button, precondition checks
//! included, so no path has divergent semantics.

use std::path::PathBuf;
use crate::commands::Editor;
use crate::remote::{ProcessingApi, UploadPayload};
use crate::utils::{format_from_path, is_image_media_type, EditorResult, ValidationError};
use crate::view::ViewSink;

/// Keyboard shortcuts, mirroring the open/save/reset controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// Ctrl+O: open the file chooser
    Open,
    /// Ctrl+S: download the current image
    Save,
    /// Ctrl+Z: reset to the original
    Reset,
}

/// One normalized user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A file chosen through the picker; content type derived from the name
    FileSelected { path: PathBuf },
    /// A file dropped onto the view, with the content type the drop source
    /// declared (if any)
    FileDropped {
        path: PathBuf,
        media_type: Option<String>,
    },
    /// A keyboard shortcut
    Shortcut(Shortcut),
}

/// What the shell should do after an input was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    /// Nothing further; the session and view are up to date
    Handled,
    /// The open shortcut fired: the shell should present its file chooser
    /// and feed the choice back as [`InputEvent::FileSelected`]
    FileChooserRequested,
    /// The save shortcut completed an export; the shell should save from
    /// this resource locator
    ExportReady(String),
}

impl<A: ProcessingApi, V: ViewSink> Editor<A, V> {
    /// Dispatches one normalized input event.
    pub async fn handle_input(&mut self, event: InputEvent) -> EditorResult<InputOutcome> {
        match event {
            InputEvent::FileSelected { path } => {
                let media_type = match format_from_path(&path) {
                    Ok(format) => format.media_type().to_string(),
                    Err(err) => return self.fail(err),
                };
                self.upload_from_path(path, media_type).await?;
                Ok(InputOutcome::Handled)
            }
            InputEvent::FileDropped { path, media_type } => {
                let media_type = match media_type {
                    Some(declared) if is_image_media_type(&declared) => declared,
                    Some(declared) => {
                        return self.fail(ValidationError::NotAnImage(declared).into())
                    }
                    // Drop sources without a declared type fall back to the
                    // extension, same as the picker route.
                    None => match format_from_path(&path) {
                        Ok(format) => format.media_type().to_string(),
                        Err(err) => return self.fail(err),
                    },
                };
                self.upload_from_path(path, media_type).await?;
                Ok(InputOutcome::Handled)
            }
            InputEvent::Shortcut(Shortcut::Open) => Ok(InputOutcome::FileChooserRequested),
            InputEvent::Shortcut(Shortcut::Save) => {
                self.download().await.map(InputOutcome::ExportReady)
            }
            InputEvent::Shortcut(Shortcut::Reset) => {
                self.reset()?;
                Ok(InputOutcome::Handled)
            }
        }
    }

    /// Reads the file and funnels it into [`Editor::begin_upload`].
    async fn upload_from_path(&mut self, path: PathBuf, media_type: String) -> EditorResult<()> {
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) => return self.fail(err.into()),
        };
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        self.begin_upload(UploadPayload {
            file_name,
            bytes,
            media_type,
        })
        .await
    }
}
