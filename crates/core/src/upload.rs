//! Object-storage upload rules: buckets, size/type limits, key generation.

use rand::Rng;

use crate::error::CoreError;
use crate::project::DocumentKind;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Bucket holding project thumbnails.
pub const THUMBNAIL_BUCKET: &str = "project-thumbnails";

/// Bucket holding project documents.
pub const DOCUMENT_BUCKET: &str = "project-documents";

/// Maximum thumbnail size (5 MiB).
pub const MAX_THUMBNAIL_BYTES: usize = 5 * 1024 * 1024;

/// Maximum document size (10 MiB).
pub const MAX_DOCUMENT_BYTES: usize = 10 * 1024 * 1024;

/// `Cache-Control` max-age applied to uploaded objects, in seconds.
pub const CACHE_CONTROL_SECS: u32 = 3600;

/// Length of the random suffix in generated object keys.
const KEY_SUFFIX_LEN: usize = 10;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

const PDF_CONTENT_TYPE: &str = "application/pdf";

// ---------------------------------------------------------------------------
// Upload target
// ---------------------------------------------------------------------------

/// What an upload is for; decides bucket and limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadTarget {
    Thumbnail,
    Document,
}

impl UploadTarget {
    pub fn bucket(self) -> &'static str {
        match self {
            Self::Thumbnail => THUMBNAIL_BUCKET,
            Self::Document => DOCUMENT_BUCKET,
        }
    }

    pub fn max_bytes(self) -> usize {
        match self {
            Self::Thumbnail => MAX_THUMBNAIL_BYTES,
            Self::Document => MAX_DOCUMENT_BYTES,
        }
    }

    /// Check content type and size before anything is sent to storage.
    pub fn validate(self, content_type: &str, size: usize) -> Result<(), CoreError> {
        match self {
            Self::Thumbnail if !is_image(content_type) => {
                return Err(CoreError::Validation(
                    "Please select an image file".to_string(),
                ));
            }
            Self::Document if document_kind_for(content_type).is_none() => {
                return Err(CoreError::Validation(
                    "Please select a PDF or image file".to_string(),
                ));
            }
            _ => {}
        }

        if size == 0 {
            return Err(CoreError::Validation("Uploaded file is empty".to_string()));
        }
        if size > self.max_bytes() {
            let noun = match self {
                Self::Thumbnail => "Image",
                Self::Document => "File",
            };
            return Err(CoreError::Validation(format!(
                "{noun} must be less than {}MB",
                self.max_bytes() / (1024 * 1024)
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn is_image(content_type: &str) -> bool {
    content_type.starts_with("image/")
}

/// Document kind for a content type, or `None` if it is neither PDF nor image.
pub fn document_kind_for(content_type: &str) -> Option<DocumentKind> {
    if content_type == PDF_CONTENT_TYPE {
        Some(DocumentKind::Pdf)
    } else if is_image(content_type) {
        Some(DocumentKind::Image)
    } else {
        None
    }
}

/// File name without its final extension, used to auto-fill document names.
pub fn display_name_from_file(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => file_name.to_string(),
    }
}

fn extension_of(file_name: &str) -> Option<String> {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
}

/// Build an object key from its parts: `{millis}-{suffix}.{ext}`.
pub fn object_key_at(file_name: &str, unix_millis: i64, suffix: &str) -> String {
    match extension_of(file_name) {
        Some(ext) => format!("{unix_millis}-{suffix}.{ext}"),
        None => format!("{unix_millis}-{suffix}"),
    }
}

/// Generate a fresh object key for `file_name`.
///
/// Collisions are avoided by the millisecond timestamp plus a random
/// base-36 suffix; the original file name is not kept beyond its extension.
pub fn generate_object_key(file_name: &str) -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..KEY_SUFFIX_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect();
    object_key_at(file_name, chrono::Utc::now().timestamp_millis(), &suffix)
}
