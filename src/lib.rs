// Module declarations in dependency order
pub mod commands;
pub mod core;
pub mod remote;
pub mod utils;
pub mod view;

// Public exports for external consumers
pub use crate::commands::{Editor, InputEvent, InputOutcome, Shortcut};
pub use crate::core::{ImageAsset, Operation, Session};
pub use crate::remote::{HttpProcessingApi, ProcessingApi, UploadPayload};
pub use crate::utils::{EditorError, EditorResult, ValidationError};
pub use crate::view::{TerminalView, ViewModel, ViewSink};
