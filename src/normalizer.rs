//! Thumbnail normalization – decode, fix EXIF orientation, resize to a fixed
//! portrait raster and write it next to the other thumbnails.

use std::fs::{self, File};
use std::io::{BufReader, Cursor};
use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};

use crate::error::{Result, SheetError};
use crate::scanner::ImageRecord;

/// Stored thumbnail width in pixels.
pub const THUMBNAIL_WIDTH_PX: u32 = 300;
/// Stored thumbnail height in pixels.
pub const THUMBNAIL_HEIGHT_PX: u32 = 400;

/// The EXIF orientations that are corrected. Angles are counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationCode {
    /// Orientation 3.
    Rotate180,
    /// Orientation 6 (camera turned clockwise).
    Rotate270,
    /// Orientation 8 (camera turned counter-clockwise).
    Rotate90,
}

impl RotationCode {
    /// Map a raw EXIF orientation value. Mirrored orientations and the
    /// identity (1) are not corrected.
    pub fn from_exif(value: u32) -> Option<Self> {
        match value {
            3 => Some(Self::Rotate180),
            6 => Some(Self::Rotate270),
            8 => Some(Self::Rotate90),
            _ => None,
        }
    }

    /// Rotate `img`; the canvas grows to fit, so quarter turns swap width and
    /// height.
    pub fn apply(self, img: DynamicImage) -> DynamicImage {
        // `image` rotates clockwise.
        match self {
            Self::Rotate180 => img.rotate180(),
            Self::Rotate270 => img.rotate90(),
            Self::Rotate90 => img.rotate270(),
        }
    }
}

/// Read the EXIF orientation of the file at `path`.
///
/// No EXIF block, an unparseable container, a missing tag or an uncorrected
/// value all give `None`.
pub fn try_get_orientation(path: &Path) -> Option<RotationCode> {
    let file = File::open(path).ok()?;
    let mut reader = BufReader::new(file);
    let exif = match exif::Reader::new().read_from_container(&mut reader) {
        Ok(exif) => exif,
        Err(e) => {
            log::debug!("No EXIF in '{}': {e}", path.display());
            return None;
        }
    };
    let value = exif
        .get_field(exif::Tag::Orientation, exif::In::PRIMARY)?
        .value
        .get_uint(0)?;
    RotationCode::from_exif(value)
}

/// A thumbnail that has been written to disk.
#[derive(Debug, Clone)]
pub struct NormalizedThumbnail {
    pub output_path: PathBuf,
    pub width: u32,
    pub height: u32,
    /// The JPEG bytes that were written to `output_path`.
    pub jpeg: Vec<u8>,
}

/// Produces `{name}_thumbnail.jpg` files inside one output directory.
#[derive(Debug, Clone)]
pub struct ImageNormalizer {
    output_dir: PathBuf,
}

impl ImageNormalizer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Path the thumbnail for `display_name` is written to.
    pub fn output_path(&self, display_name: &str) -> PathBuf {
        self.output_dir.join(format!("{display_name}_thumbnail.jpg"))
    }

    /// Decode, orient, resize and write one record. Overwrites any existing
    /// thumbnail of the same name.
    pub fn normalize(&self, record: &ImageRecord) -> Result<NormalizedThumbnail> {
        let source = &record.source_path;
        let img = image::open(source).map_err(|e| SheetError::UnreadableImage {
            path: source.clone(),
            source: e,
        })?;

        let rotation = try_get_orientation(source);
        let thumb = resize_to_thumbnail(img, rotation);

        let output_path = self.output_path(&record.display_name);
        let mut jpeg = Vec::new();
        DynamicImage::ImageRgb8(thumb.to_rgb8())
            .write_to(&mut Cursor::new(&mut jpeg), ImageFormat::Jpeg)
            .map_err(|e| SheetError::Encode {
                path: output_path.clone(),
                source: e,
            })?;
        fs::write(&output_path, &jpeg).map_err(|e| SheetError::io(&output_path, e))?;

        log::debug!(
            "Thumbnail '{}' -> '{}' (rotation: {:?})",
            source.display(),
            output_path.display(),
            rotation
        );

        Ok(NormalizedThumbnail {
            output_path,
            width: thumb.width(),
            height: thumb.height(),
            jpeg,
        })
    }
}

/// Apply the optional rotation, then stretch to exactly 300×400.
pub fn resize_to_thumbnail(img: DynamicImage, rotation: Option<RotationCode>) -> DynamicImage {
    let oriented = match rotation {
        Some(code) => code.apply(img),
        None => img,
    };
    oriented.resize_exact(THUMBNAIL_WIDTH_PX, THUMBNAIL_HEIGHT_PX, FilterType::CatmullRom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgb, RgbImage};

    #[test]
    fn only_three_codes_rotate() {
        assert_eq!(RotationCode::from_exif(3), Some(RotationCode::Rotate180));
        assert_eq!(RotationCode::from_exif(6), Some(RotationCode::Rotate270));
        assert_eq!(RotationCode::from_exif(8), Some(RotationCode::Rotate90));
        for other in [0, 1, 2, 4, 5, 7, 9] {
            assert_eq!(RotationCode::from_exif(other), None, "code {other}");
        }
    }

    #[test]
    fn quarter_turns_swap_dimensions() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(4, 2));
        assert_eq!(RotationCode::Rotate90.apply(img.clone()).dimensions(), (2, 4));
        assert_eq!(RotationCode::Rotate270.apply(img.clone()).dimensions(), (2, 4));
        assert_eq!(RotationCode::Rotate180.apply(img).dimensions(), (4, 2));
    }

    #[test]
    fn rotate90_is_counter_clockwise() {
        // Marker in the top-right corner ends up top-left after a
        // counter-clockwise quarter turn.
        let mut raw = RgbImage::new(2, 2);
        raw.put_pixel(1, 0, Rgb([255, 0, 0]));
        let out = RotationCode::Rotate90.apply(DynamicImage::ImageRgb8(raw)).to_rgb8();
        assert_eq!(out.get_pixel(0, 0), &Rgb([255, 0, 0]));
    }

    #[test]
    fn resize_is_exact_for_any_input() {
        for (w, h) in [(1, 1), (1000, 10), (33, 777), (300, 400)] {
            let img = DynamicImage::ImageRgb8(RgbImage::new(w, h));
            let out = resize_to_thumbnail(img, None);
            assert_eq!(out.dimensions(), (THUMBNAIL_WIDTH_PX, THUMBNAIL_HEIGHT_PX));
        }
    }

    #[test]
    fn missing_file_has_no_orientation() {
        assert_eq!(try_get_orientation(Path::new("no/such/file.jpg")), None);
    }

    #[test]
    fn output_path_uses_display_name() {
        let n = ImageNormalizer::new("out");
        assert_eq!(n.output_path("IMG_01"), Path::new("out").join("IMG_01_thumbnail.jpg"));
    }
}
