//! Core types for the editing session: assets and transform operations.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;
use crate::utils::{EditorError, ValidationError};

/// One image payload as exchanged with the retouching service.
///
/// The handle is an opaque encoded image (a base64 data URI as the service
/// produces it); the controller never looks inside it. Assets are immutable
/// once received: each response supersedes the previous asset wholesale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageAsset {
    /// Opaque encoded-image handle
    pub handle: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl ImageAsset {
    pub fn new(handle: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            handle: handle.into(),
            width,
            height,
        }
    }

    /// Dimension caption shown under a preview pane.
    pub fn caption(&self) -> String {
        format!("{}x{} px", self.width, self.height)
    }
}

/// A named, parameterized transform requested against the current asset.
///
/// The known variants mirror the service's operation set with its default
/// parameters; [`Operation::Other`] passes unrecognized names through
/// unchanged so new server-side operations work without a client release.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Upscale { scale: f64 },
    Blur { radius: f64 },
    Sharpen { strength: f64 },
    Brightness { factor: f64 },
    Contrast { factor: f64 },
    Saturation { factor: f64 },
    Grayscale,
    Sepia,
    Vintage,
    Enhance,
    Other { name: String, params: Value },
}

impl Operation {
    /// The wire name of this operation.
    pub fn name(&self) -> &str {
        match self {
            Self::Upscale { .. } => "upscale",
            Self::Blur { .. } => "blur",
            Self::Sharpen { .. } => "sharpen",
            Self::Brightness { .. } => "brightness",
            Self::Contrast { .. } => "contrast",
            Self::Saturation { .. } => "saturation",
            Self::Grayscale => "grayscale",
            Self::Sepia => "sepia",
            Self::Vintage => "vintage",
            Self::Enhance => "enhance",
            Self::Other { name, .. } => name,
        }
    }

    /// Operation-specific parameters, serialized as the `params` object.
    pub fn params(&self) -> Value {
        match self {
            Self::Upscale { scale } => json!({ "scale": scale }),
            Self::Blur { radius } => json!({ "radius": radius }),
            Self::Sharpen { strength } => json!({ "strength": strength }),
            Self::Brightness { factor }
            | Self::Contrast { factor }
            | Self::Saturation { factor } => json!({ "factor": factor }),
            Self::Grayscale | Self::Sepia | Self::Vintage | Self::Enhance => json!({}),
            Self::Other { params, .. } => params.clone(),
        }
    }

    /// Busy message shown while this operation is in flight.
    pub fn progress_message(&self) -> &'static str {
        progress_message_for(self.name())
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed lookup from operation name to busy message.
///
/// Unrecognized names fall back to the generic message rather than failing,
/// matching the pass-through behavior of [`Operation::Other`].
pub fn progress_message_for(operation: &str) -> &'static str {
    match operation {
        "upscale" => "Upscaling image...",
        "blur" => "Applying blur...",
        "sharpen" => "Sharpening...",
        "brightness" => "Adjusting brightness...",
        "contrast" => "Adjusting contrast...",
        "saturation" => "Adjusting saturation...",
        "grayscale" => "Applying grayscale filter...",
        "sepia" => "Applying sepia filter...",
        "vintage" => "Applying vintage filter...",
        "enhance" => "Auto-enhancing...",
        _ => "Processing image...",
    }
}

impl FromStr for Operation {
    type Err = EditorError;

    /// Parses `name` or `name:key=value[,key=value...]` as used by the CLI,
    /// e.g. `upscale:scale=2` or `blur:radius=3`.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let (name, args) = match input.split_once(':') {
            Some((name, args)) => (name.trim(), Some(args)),
            None => (input.trim(), None),
        };
        if name.is_empty() {
            return Err(ValidationError::InvalidOperation(input.to_string()).into());
        }

        let mut params = serde_json::Map::new();
        if let Some(args) = args {
            for pair in args.split(',').filter(|p| !p.trim().is_empty()) {
                let (key, value) = pair.split_once('=').ok_or_else(|| {
                    ValidationError::InvalidOperation(format!("expected key=value, got {pair}"))
                })?;
                let value: f64 = value.trim().parse().map_err(|_| {
                    ValidationError::InvalidOperation(format!("non-numeric value in {pair}"))
                })?;
                params.insert(key.trim().to_string(), json!(value));
            }
        }

        fn get(params: &serde_json::Map<String, Value>, key: &str, default: f64) -> f64 {
            params.get(key).and_then(Value::as_f64).unwrap_or(default)
        }

        // Defaults match the service-side defaults for each operation.
        Ok(match name {
            "upscale" => Self::Upscale { scale: get(&params, "scale", 1.5) },
            "blur" => Self::Blur { radius: get(&params, "radius", 2.0) },
            "sharpen" => Self::Sharpen { strength: get(&params, "strength", 1.5) },
            "brightness" => Self::Brightness { factor: get(&params, "factor", 1.2) },
            "contrast" => Self::Contrast { factor: get(&params, "factor", 1.2) },
            "saturation" => Self::Saturation { factor: get(&params, "factor", 1.2) },
            "grayscale" => Self::Grayscale,
            "sepia" => Self::Sepia,
            "vintage" => Self::Vintage,
            "enhance" => Self::Enhance,
            other => Self::Other {
                name: other.to_string(),
                params: Value::Object(params),
            },
        })
    }
}
