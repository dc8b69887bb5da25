//! Session state for one editing view.
//!
//! The session owns the two image slots and the in-flight guard. It is a
//! plain value with no I/O: the command layer mutates it in response to
//! completed requests and re-projects the view afterwards.

use tracing::debug;
use crate::core::ImageAsset;
use crate::utils::{EditorResult, ValidationError};

/// The per-view mutable record tracking original and current image assets.
///
/// Invariants:
/// - `current` is never set unless `original` is set.
/// - `original` is set once per upload and only replaced by a new upload.
/// - At most one request is outstanding; `in_flight` holds its busy message
///   and gates every other request until it resolves.
#[derive(Debug, Default, Clone)]
pub struct Session {
    original: Option<ImageAsset>,
    current: Option<ImageAsset>,
    in_flight: Option<String>,
}

impl Session {
    /// Creates an empty session, as at view initialization.
    pub fn new() -> Self {
        Self::default()
    }

    /// The untouched upload, if any.
    pub fn original(&self) -> Option<&ImageAsset> {
        self.original.as_ref()
    }

    /// The editing head: the result of the last successful operation, or the
    /// original before any operation has been applied.
    pub fn current(&self) -> Option<&ImageAsset> {
        self.current.as_ref()
    }

    /// True before the first successful upload.
    pub fn is_empty(&self) -> bool {
        self.original.is_none()
    }

    /// Busy message of the outstanding request, if one is in flight.
    pub fn busy_message(&self) -> Option<&str> {
        self.in_flight.as_deref()
    }

    /// Marks a request as outstanding.
    ///
    /// Rejects when another request has not resolved yet; this is the
    /// explicit guard that serializes uploads, operations and exports.
    pub fn begin_request(&mut self, message: impl Into<String>) -> EditorResult<()> {
        if let Some(pending) = &self.in_flight {
            return Err(ValidationError::Busy(pending.clone()).into());
        }
        let message = message.into();
        debug!("Request started: {}", message);
        self.in_flight = Some(message);
        Ok(())
    }

    /// Clears the in-flight guard.
    ///
    /// Called on every response path, success or failure, before the
    /// response is interpreted, so an error can never leave the guard set.
    pub fn finish_request(&mut self) {
        self.in_flight = None;
    }

    /// Installs a freshly uploaded asset in both slots.
    ///
    /// Requires that no request is in flight (the upload's own guard must be
    /// released first).
    pub fn set_original(&mut self, asset: ImageAsset) -> EditorResult<()> {
        if let Some(pending) = &self.in_flight {
            return Err(ValidationError::Busy(pending.clone()).into());
        }
        debug!("New original: {}", asset.caption());
        self.current = Some(asset.clone());
        self.original = Some(asset);
        Ok(())
    }

    /// Replaces the editing head after a successful operation.
    ///
    /// Requires a prior upload; the original slot is left untouched.
    pub fn set_current(&mut self, asset: ImageAsset) -> EditorResult<()> {
        if self.original.is_none() {
            return Err(ValidationError::UploadRequired.into());
        }
        debug!("New current: {}", asset.caption());
        self.current = Some(asset);
        Ok(())
    }

    /// Discards all edits, restoring the original as the editing head.
    pub fn reset_to_original(&mut self) -> EditorResult<()> {
        if let Some(pending) = &self.in_flight {
            return Err(ValidationError::Busy(pending.clone()).into());
        }
        let original = self
            .original
            .clone()
            .ok_or(ValidationError::NothingToReset)?;
        debug!("Reset to original: {}", original.caption());
        self.current = Some(original);
        Ok(())
    }
}
