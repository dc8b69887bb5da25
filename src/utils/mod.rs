pub mod error;
pub mod formats;

pub use error::{EditorError, EditorResult, ValidationError};
pub use formats::{format_from_path, is_image_media_type, ImageFormat};
