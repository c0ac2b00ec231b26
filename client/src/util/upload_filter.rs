//! Local validation for the upload control.
//!
//! SYSTEM CONTEXT
//! ==============
//! Runs before anything reaches the store: a rejected selection renders an
//! inline message under the drop zone and never touches the network.

#[cfg(test)]
#[path = "upload_filter_test.rs"]
mod upload_filter_test;

/// Largest accepted image, in bytes.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

pub const ACCEPTED_EXTENSIONS: [&str; 6] = ["jpeg", "jpg", "png", "webp", "tiff", "tif"];
pub const ACCEPTED_MIME_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/webp", "image/tiff"];

/// `accept` attribute for the hidden file input.
pub const ACCEPT_ATTRIBUTE: &str = "image/jpeg,image/png,image/webp,image/tiff,.jpeg,.jpg,.png,.webp,.tiff,.tif";

/// What the filter needs to know about a picked or dropped file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileMeta {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum UploadRejection {
    /// Nothing was selected or dropped.
    #[error("Please select an image to upload")]
    NoFile,

    /// More than one file in one interaction.
    #[error("Please upload one image at a time")]
    TooManyFiles,

    /// Neither the extension nor the MIME type is an accepted image type.
    #[error("Please upload a valid image file (JPEG, PNG, WebP, TIFF)")]
    UnsupportedType,

    /// Over `MAX_UPLOAD_BYTES`.
    #[error("Image is too large (maximum size is 10 MB)")]
    TooLarge,

    /// The browser could not hand over the file contents.
    #[error("Could not read the selected file")]
    Unreadable,
}

/// Inline message after the store reported a failed analysis.
pub const UPLOAD_RETRY_MESSAGE: &str = "Failed to upload and analyze the image. Please try again.";

fn extension(name: &str) -> Option<String> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() && ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// True when the extension or the MIME type names an accepted image type.
pub fn is_accepted_image(meta: &FileMeta) -> bool {
    let by_extension = extension(&meta.name).is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()));
    let mime = meta.mime_type.to_ascii_lowercase();
    by_extension || ACCEPTED_MIME_TYPES.contains(&mime.as_str())
}

/// Validate one interaction's worth of files and return the single accepted file.
///
/// # Errors
///
/// Returns the first rule the selection breaks.
pub fn validate_selection(files: &[FileMeta]) -> Result<&FileMeta, UploadRejection> {
    let file = match files {
        [] => return Err(UploadRejection::NoFile),
        [file] => file,
        _ => return Err(UploadRejection::TooManyFiles),
    };
    if !is_accepted_image(file) {
        return Err(UploadRejection::UnsupportedType);
    }
    if file.size > MAX_UPLOAD_BYTES {
        return Err(UploadRejection::TooLarge);
    }
    Ok(file)
}

/// Size readout for the preview card, e.g. `2.35 MB`.
#[allow(clippy::cast_precision_loss)]
pub fn format_size_mb(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
}
