use std::io::Cursor;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::{EncodedThumbnail, Thumbnail};
use crate::error::ThumbnailerError;

/// Default JPEG quality for thumbnails
pub const DEFAULT_QUALITY: u8 = 70;

/// JPEG quality factor, validated to 0-100
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JpegQuality(u8);

impl JpegQuality {
    pub fn new(value: u32) -> Result<Self, ThumbnailerError> {
        u8::try_from(value)
            .ok()
            .filter(|q| *q <= 100)
            .map(JpegQuality)
            .ok_or(ThumbnailerError::InvalidQuality(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for JpegQuality {
    fn default() -> Self {
        JpegQuality(DEFAULT_QUALITY)
    }
}

/// Encode a thumbnail as baseline JPEG.
pub fn encode(
    thumbnail: Thumbnail,
    quality: JpegQuality,
) -> Result<EncodedThumbnail, ThumbnailerError> {
    let origin = thumbnail.origin().clone();
    let image = thumbnail.into_image();
    let (width, height) = image.dimensions();

    let mut buf = Cursor::new(Vec::new());
    // Quantisation tables are undefined below 1; treat 0 like libjpeg does
    JpegEncoder::new_with_quality(&mut buf, quality.value().max(1))
        .write_image(image.as_raw(), width, height, ExtendedColorType::Rgb8)
        .map_err(|e| ThumbnailerError::ImageEncode {
            id: origin.id.clone(),
            source: e,
        })?;

    Ok(EncodedThumbnail {
        file_name: thumbnail_filename(&origin.file_name),
        id: origin.id,
        bytes: buf.into_inner(),
        quality: quality.value(),
    })
}

/// Replace the extension of a source file name with `.jpg`.
///
/// # Examples
/// ```
/// # use thumbnailer::thumbnail::thumbnail_filename;
/// assert_eq!(thumbnail_filename("nature12345.png"), "nature12345.jpg");
/// assert_eq!(thumbnail_filename("s41586.2020.1.tiff"), "s41586.2020.1.jpg");
/// ```
pub fn thumbnail_filename(source_name: &str) -> String {
    let stem = Path::new(source_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("thumbnail");
    format!("{}.jpg", stem)
}
