//! Error type shared by every pipeline stage.
//!
//! Only a missing or unusable EXIF orientation is recovered from (see
//! [`crate::normalizer::try_get_orientation`]); everything here is fatal and
//! aborts the whole batch.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetError {
    /// The source file could not be opened or decoded as an image.
    #[error("cannot decode image '{}': {source}", path.display())]
    UnreadableImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The thumbnail could not be encoded as JPEG.
    #[error("cannot encode thumbnail '{}': {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("PDF rendering failed: {0}")]
    Pdf(String),
}

impl SheetError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SheetError>;
