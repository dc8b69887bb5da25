//! Core session types and state.
//!
//! This module contains the fundamental types used throughout the crate:
//! - [`Session`]: the per-view record of original and current image assets
//! - [`ImageAsset`]: one encoded image plus its pixel dimensions
//! - [`Operation`]: a named, parameterized transform request

mod session;
mod types;

pub use session::Session;
pub use types::{progress_message_for, ImageAsset, Operation};
