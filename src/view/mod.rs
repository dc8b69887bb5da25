//! Presentation sync: projecting the session onto display state.
//!
//! [`ViewModel::project`] is a pure function of the session; the command
//! layer re-runs it after every session mutation and busy transition and
//! hands the result to a [`ViewSink`]. Nothing here touches the network.

use serde::Serialize;
use crate::core::Session;

/// Display state of one preview pane.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PaneView {
    /// Encoded image handle, usable directly as an image source
    pub image: String,
    /// Dimension caption, e.g. `800x600 px`
    pub caption: String,
}

/// Everything a renderer needs to draw the editing view.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ViewModel {
    /// Untouched upload pane; absent while the session is empty
    pub original: Option<PaneView>,
    /// Editing-head pane; absent while the session is empty
    pub current: Option<PaneView>,
    /// Busy indicator text while a request is in flight
    pub busy: Option<String>,
    /// Operation buttons enabled
    pub can_edit: bool,
    /// Download button enabled
    pub can_download: bool,
    /// Reset button enabled
    pub can_reset: bool,
}

impl ViewModel {
    /// Projects the session onto display state. Idempotent: equal sessions
    /// project to equal view models.
    pub fn project(session: &Session) -> Self {
        let pane = |asset: &crate::core::ImageAsset| PaneView {
            image: asset.handle.clone(),
            caption: asset.caption(),
        };
        let busy = session.busy_message().map(str::to_string);
        let idle = busy.is_none();
        Self {
            original: session.original().map(pane),
            current: session.current().map(pane),
            can_edit: idle && session.original().is_some(),
            can_download: idle && session.current().is_some(),
            can_reset: idle && session.original().is_some(),
            busy,
        }
    }
}

/// Render target for view projections and user-visible errors.
///
/// The CLI renders to the terminal; tests record what they are handed.
pub trait ViewSink {
    /// Displays a fresh projection of the session.
    fn render(&mut self, view: &ViewModel);

    /// Surfaces a user-visible error message.
    fn show_error(&mut self, message: &str);
}

/// Terminal renderer used by the CLI binary.
#[derive(Debug, Default)]
pub struct TerminalView;

impl ViewSink for TerminalView {
    fn render(&mut self, view: &ViewModel) {
        if let Some(busy) = &view.busy {
            println!("  [{busy}]");
            return;
        }
        match (&view.original, &view.current) {
            (Some(original), Some(current)) => {
                println!("  original: {}", original.caption);
                println!("  current:  {}", current.caption);
            }
            _ => println!("  (no image loaded)"),
        }
    }

    fn show_error(&mut self, message: &str) {
        eprintln!("error: {message}");
    }
}
