// SPDX-License-Identifier: MPL-2.0
//! Captured frame encoding.
//!
//! Rear-camera frames get a slight contrast and brightness boost before
//! being written as high-quality JPEG.

use std::io::Cursor;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use image_rs::codecs::jpeg::JpegEncoder;
use image_rs::{ImageBuffer, Rgba, RgbaImage};

use super::FacingMode;
use crate::config::CAPTURE_JPEG_QUALITY;
use crate::error::{Error, Result};

const REAR_CONTRAST: f32 = 1.1;
const REAR_BRIGHTNESS: f32 = 1.05;

/// One RGBA frame grabbed from the camera stream.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedFrame {
    /// RGBA pixel data, shared to avoid copies while the frame is passed around.
    pub rgba_data: Arc<Vec<u8>>,
    pub width: u32,
    pub height: u32,
}

impl CapturedFrame {
    #[must_use]
    pub fn new(rgba_data: Arc<Vec<u8>>, width: u32, height: u32) -> Self {
        Self {
            rgba_data,
            width,
            height,
        }
    }

    /// Copies the pixels into an image buffer, `None` if the data length
    /// does not match the dimensions.
    #[must_use]
    pub fn to_image(&self) -> Option<RgbaImage> {
        ImageBuffer::<Rgba<u8>, _>::from_raw(self.width, self.height, (*self.rgba_data).clone())
    }
}

/// A captured photo ready to hand over as an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPhoto {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub facing: FacingMode,
    pub taken_at: DateTime<Utc>,
}

impl EncodedPhoto {
    #[must_use]
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// File name for a photo, e.g. `photo-environment-1700000000000.jpg`.
#[must_use]
pub fn photo_file_name(facing: FacingMode, taken_at: DateTime<Utc>) -> String {
    format!("photo-{}-{}.jpg", facing.as_str(), taken_at.timestamp_millis())
}

/// Encodes a captured frame as JPEG.
///
/// # Errors
///
/// Returns an error if the pixel data does not match the frame size or
/// JPEG encoding fails.
pub fn encode_capture(
    frame: &CapturedFrame,
    facing: FacingMode,
    taken_at: DateTime<Utc>,
) -> Result<EncodedPhoto> {
    let mut image = frame.to_image().ok_or_else(|| {
        Error::Image(format!(
            "frame data does not match {}x{}",
            frame.width, frame.height
        ))
    })?;

    if facing.is_rear() {
        enhance(&mut image);
    }

    let rgb = image_rs::DynamicImage::ImageRgba8(image).to_rgb8();
    let mut bytes = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut bytes, CAPTURE_JPEG_QUALITY).encode_image(&rgb)?;

    Ok(EncodedPhoto {
        file_name: photo_file_name(facing, taken_at),
        mime: "image/jpeg",
        bytes: bytes.into_inner(),
        width: frame.width,
        height: frame.height,
        facing,
        taken_at,
    })
}

/// Applies contrast then brightness to the color channels, alpha untouched.
fn enhance(image: &mut RgbaImage) {
    for pixel in image.pixels_mut() {
        for channel in &mut pixel.0[..3] {
            *channel = adjust_channel(*channel);
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn adjust_channel(value: u8) -> u8 {
    let normalized = f32::from(value) / 255.0;
    let contrasted = (normalized - 0.5) * REAR_CONTRAST + 0.5;
    let brightened = contrasted * REAR_BRIGHTNESS;
    (brightened.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn solid_frame(width: u32, height: u32, value: u8) -> CapturedFrame {
        let data = [value, value, value, 255].repeat((width * height) as usize);
        CapturedFrame::new(Arc::new(data), width, height)
    }

    fn taken_at() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_123)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn file_name_includes_facing_and_millis() {
        assert_eq!(
            photo_file_name(FacingMode::User, taken_at()),
            "photo-user-1700000000123.jpg"
        );
    }

    #[test]
    fn encodes_jpeg_with_metadata() {
        let photo = encode_capture(&solid_frame(16, 9, 100), FacingMode::Environment, taken_at())
            .expect("encoding should succeed");

        assert_eq!(photo.mime, "image/jpeg");
        assert_eq!((photo.width, photo.height), (16, 9));
        assert_eq!(&photo.bytes[..2], &[0xFF, 0xD8]);
        assert_eq!(photo.file_name, "photo-environment-1700000000123.jpg");
        assert_eq!(photo.size(), photo.bytes.len() as u64);
    }

    #[test]
    fn mismatched_frame_is_rejected() {
        let frame = CapturedFrame::new(Arc::new(vec![0; 10]), 4, 4);
        assert!(matches!(
            encode_capture(&frame, FacingMode::User, taken_at()),
            Err(Error::Image(_))
        ));
    }

    #[test]
    fn enhancement_spreads_midtones() {
        assert!(adjust_channel(200) > 200);
        assert!(adjust_channel(40) < 40);
        assert_eq!(adjust_channel(255), 255);
        assert_eq!(adjust_channel(0), 0);
    }

    #[test]
    fn enhancement_keeps_alpha() {
        let mut image = RgbaImage::from_pixel(2, 2, Rgba([128, 128, 128, 77]));
        enhance(&mut image);
        assert!(image.pixels().all(|pixel| pixel.0[3] == 77));
    }
}
