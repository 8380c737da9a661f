// SPDX-License-Identifier: MPL-2.0
//! Drag-and-drop upload validation and thumbnails.

use std::fmt;
use std::io::Cursor;

use image_rs::codecs::jpeg::JpegEncoder;
use image_rs::{imageops::FilterType, DynamicImage, GenericImageView};

use crate::compare::{fit_scale, Dimensions};
use crate::config::{DEFAULT_THUMBNAIL_EDGE, MAX_UPLOAD_BYTES, THUMBNAIL_JPEG_QUALITY};
use crate::error::Result;

/// Reasons a dropped or picked file is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    /// The MIME type is not `image/*`.
    NotAnImage,
    /// The file exceeds the size limit.
    TooLarge { size: u64, limit: u64 },
    /// The file has no name.
    InvalidName,
}

impl UploadError {
    /// Localization key for user-facing notifications.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            UploadError::NotAnImage => "upload-error-not-an-image",
            UploadError::TooLarge { .. } => "upload-error-too-large",
            UploadError::InvalidName => "upload-error-invalid-name",
        }
    }
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadError::NotAnImage => write!(f, "file is not an image"),
            UploadError::TooLarge { size, limit } => {
                write!(f, "file is {} bytes, limit is {} bytes", size, limit)
            }
            UploadError::InvalidName => write!(f, "file has no name"),
        }
    }
}

impl std::error::Error for UploadError {}

/// Checks a candidate upload before it is decoded.
///
/// # Errors
///
/// Returns the first failed check: MIME type, then size, then name.
pub fn validate_upload(name: &str, mime: &str, size: u64) -> std::result::Result<(), UploadError> {
    if !mime.starts_with("image/") {
        return Err(UploadError::NotAnImage);
    }
    if size > MAX_UPLOAD_BYTES {
        return Err(UploadError::TooLarge {
            size,
            limit: MAX_UPLOAD_BYTES,
        });
    }
    if name.is_empty() {
        return Err(UploadError::InvalidName);
    }
    Ok(())
}

/// Bounding box for thumbnails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbnailBounds {
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for ThumbnailBounds {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_THUMBNAIL_EDGE,
            max_height: DEFAULT_THUMBNAIL_EDGE,
        }
    }
}

/// Scales `image` to fit `bounds`, preserving aspect ratio.
///
/// Images with a zero dimension are returned unchanged.
#[must_use]
#[allow(clippy::cast_precision_loss)]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn thumbnail(image: &DynamicImage, bounds: ThumbnailBounds) -> DynamicImage {
    let (width, height) = image.dimensions();
    let natural = Dimensions::new(width as f32, height as f32);
    let limit = Dimensions::new(bounds.max_width as f32, bounds.max_height as f32);

    let Some(scale) = fit_scale(natural, limit) else {
        return image.clone();
    };

    let target_width = ((width as f32 * scale).round() as u32).max(1);
    let target_height = ((height as f32 * scale).round() as u32).max(1);
    image.resize_exact(target_width, target_height, FilterType::Triangle)
}

/// Builds a thumbnail and encodes it as JPEG.
///
/// # Errors
///
/// Returns an error if JPEG encoding fails.
pub fn thumbnail_jpeg(image: &DynamicImage, bounds: ThumbnailBounds) -> Result<Vec<u8>> {
    let thumb = thumbnail(image, bounds).to_rgb8();
    let mut bytes = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut bytes, THUMBNAIL_JPEG_QUALITY).encode_image(&thumb)?;
    Ok(bytes.into_inner())
}
