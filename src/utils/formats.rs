use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use crate::utils::{EditorError, ValidationError};

/// Image formats accepted by the retouching service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    JPEG,
    PNG,
    GIF,
    BMP,
    WebP,
}

impl ImageFormat {
    /// The declared content type for this format, as a browser would report it.
    pub fn media_type(&self) -> &'static str {
        match self {
            Self::JPEG => "image/jpeg",
            Self::PNG => "image/png",
            Self::GIF => "image/gif",
            Self::BMP => "image/bmp",
            Self::WebP => "image/webp",
        }
    }
}

impl FromStr for ImageFormat {
    type Err = EditorError;

    fn from_str(ext: &str) -> Result<Self, Self::Err> {
        let ext = ext.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Ok(Self::JPEG),
            "png" => Ok(Self::PNG),
            "gif" => Ok(Self::GIF),
            "bmp" => Ok(Self::BMP),
            "webp" => Ok(Self::WebP),
            _ => Err(ValidationError::NotAnImage(ext).into()),
        }
    }
}

/// Get format from a file path's extension
pub fn format_from_path(path: &Path) -> Result<ImageFormat, EditorError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| ValidationError::NotAnImage(path.display().to_string()))?;

    ImageFormat::from_str(ext)
}

/// The predicate the drop handler applies to a declared content type.
pub fn is_image_media_type(media_type: &str) -> bool {
    media_type.starts_with("image/")
}
