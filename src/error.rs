// SPDX-License-Identifier: MPL-2.0
use std::fmt;

use crate::capture::CameraError;
use crate::media::UploadError;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Image(String),
    Camera(CameraError),
    Upload(UploadError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Image(e) => write!(f, "Image Error: {}", e),
            Error::Camera(e) => write!(f, "Camera Error: {}", e),
            Error::Upload(e) => write!(f, "Upload Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<CameraError> for Error {
    fn from(err: CameraError) -> Self {
        Error::Camera(err)
    }
}

impl From<UploadError> for Error {
    fn from(err: UploadError) -> Self {
        Error::Upload(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Image(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
