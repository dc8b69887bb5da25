//! Controller entry points for the editing session.
//!
//! [`Editor`] owns the session, the remote client and the view sink, and
//! exposes one entry point per user action:
//! - [`Editor::begin_upload`] / [`Editor::handle_input`]: ingress
//! - [`Editor::apply_operation`]: transform dispatch
//! - [`Editor::download`] / [`Editor::reset`]: export and reset

mod export;
mod input;
mod process;
mod upload;

pub use input::{InputEvent, InputOutcome, Shortcut};

use crate::core::Session;
use crate::remote::ProcessingApi;
use crate::utils::{EditorError, EditorResult};
use crate::view::{ViewModel, ViewSink};

/// The editing-session controller.
///
/// The session is an explicit value owned here and mutated only by these
/// entry points in response to user actions and completed requests; there
/// is no ambient shared state. Every mutation is followed by a fresh view
/// projection.
pub struct Editor<A, V> {
    session: Session,
    api: A,
    view: V,
}

impl<A: ProcessingApi, V: ViewSink> Editor<A, V> {
    /// Creates a controller over an empty session.
    pub fn new(api: A, view: V) -> Self {
        Self {
            session: Session::new(),
            api,
            view,
        }
    }

    /// Read access to the session, for shells and tests.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Read access to the view sink, for tests inspecting what was rendered.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Re-projects the session into the view sink.
    pub(crate) fn sync_view(&mut self) {
        let view = ViewModel::project(&self.session);
        self.view.render(&view);
    }

    /// Surfaces an error to the user and propagates it to the caller.
    pub(crate) fn fail<T>(&mut self, err: EditorError) -> EditorResult<T> {
        self.view.show_error(&err.to_string());
        Err(err)
    }
}
