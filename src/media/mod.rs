// SPDX-License-Identifier: MPL-2.0
//! Media loading for the comparison view.
//!
//! Natural image dimensions feed [`SliderStateMachine::content_loaded`];
//! dropped or picked files go through [`validate_upload`] first.
//!
//! [`SliderStateMachine::content_loaded`]: crate::compare::SliderStateMachine::content_loaded

pub mod upload;

use std::io::Cursor;
use std::path::Path;

use image_rs::{DynamicImage, ImageReader};

use crate::compare::Dimensions;
use crate::error::Result;

pub use upload::{thumbnail, thumbnail_jpeg, validate_upload, ThumbnailBounds, UploadError};

/// Reads the natural size of an image file without decoding its pixels.
///
/// # Errors
///
/// Returns an error if the file cannot be read or its format is unknown.
pub fn probe_dimensions<P: AsRef<Path>>(path: P) -> Result<Dimensions> {
    let (width, height) = image_rs::image_dimensions(path)?;
    Ok(to_dimensions(width, height))
}

/// Reads the natural size of an encoded image held in memory.
///
/// # Errors
///
/// Returns an error if the format cannot be guessed or the header is invalid.
pub fn probe_dimensions_from_bytes(bytes: &[u8]) -> Result<Dimensions> {
    let (width, height) = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .into_dimensions()?;
    Ok(to_dimensions(width, height))
}

/// Decodes an in-memory image.
///
/// # Errors
///
/// Returns an error if the data is not a supported image.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage> {
    Ok(image_rs::load_from_memory(bytes)?)
}

#[allow(clippy::cast_precision_loss)]
fn to_dimensions(width: u32, height: u32) -> Dimensions {
    Dimensions::new(width as f32, height as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use image_rs::{ImageFormat, RgbImage};
    use tempfile::tempdir;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = DynamicImage::ImageRgb8(RgbImage::new(width, height));
        let mut bytes = Cursor::new(Vec::new());
        image
            .write_to(&mut bytes, ImageFormat::Png)
            .expect("png encoding should succeed");
        bytes.into_inner()
    }

    #[test]
    fn probes_dimensions_from_bytes() {
        let dims = probe_dimensions_from_bytes(&png_bytes(64, 48)).expect("probe should succeed");
        assert_eq!(dims, Dimensions::new(64.0, 48.0));
    }

    #[test]
    fn probes_dimensions_from_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("after.png");
        std::fs::write(&path, png_bytes(30, 90)).expect("failed to write png");

        let dims = probe_dimensions(&path).expect("probe should succeed");
        assert_eq!(dims, Dimensions::new(30.0, 90.0));
    }

    #[test]
    fn garbage_bytes_are_an_error() {
        let result = probe_dimensions_from_bytes(b"definitely not an image");
        assert!(matches!(result, Err(Error::Image(_) | Error::Io(_))));
    }

    #[test]
    fn missing_file_is_an_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        assert!(probe_dimensions(temp_dir.path().join("missing.png")).is_err());
    }

    #[test]
    fn decode_round_trips_size() {
        let image = decode(&png_bytes(5, 7)).expect("decode should succeed");
        assert_eq!((image.width(), image.height()), (5, 7));
    }
}
