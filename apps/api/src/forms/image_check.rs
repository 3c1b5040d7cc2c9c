use bytes::Bytes;
use serde::Serialize;

pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];

/// Hint shown next to the picker before a file is chosen.
pub const DEFAULT_HINT: &str = "JPG, PNG or WEBP only.";

/// A file part taken from a profile or logo upload form.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ImageCheck {
    Accepted { file_name: String },
    InvalidFormat { subtype: String },
    TooLarge { max_bytes: usize },
    Missing,
}

impl ImageCheck {
    pub fn accepted(&self) -> bool {
        matches!(self, ImageCheck::Accepted { .. })
    }

    pub fn message(&self) -> String {
        match self {
            ImageCheck::Accepted { file_name } => format!("Selected: {file_name}"),
            ImageCheck::InvalidFormat { subtype } => format!("Invalid format: {subtype}"),
            ImageCheck::TooLarge { max_bytes } => {
                format!("File too heavy! Max {}MB.", max_bytes / (1024 * 1024))
            }
            ImageCheck::Missing => DEFAULT_HINT.to_string(),
        }
    }
}

/// Checks the declared type first, then the size.
pub fn check_image(upload: Option<&ImageUpload>, max_bytes: usize) -> ImageCheck {
    let Some(upload) = upload else {
        return ImageCheck::Missing;
    };

    let content_type = upload.content_type.to_ascii_lowercase();
    if !ALLOWED_IMAGE_TYPES.contains(&content_type.as_str()) {
        let subtype = content_type
            .split_once('/')
            .map(|(_, sub)| sub)
            .unwrap_or(content_type.as_str())
            .to_ascii_uppercase();
        return ImageCheck::InvalidFormat { subtype };
    }

    if upload.data.len() > max_bytes {
        return ImageCheck::TooLarge { max_bytes };
    }

    ImageCheck::Accepted {
        file_name: upload.file_name.clone(),
    }
}
