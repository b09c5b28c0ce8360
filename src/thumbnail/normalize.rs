use image::DynamicImage;
use log::debug;

use super::{NormalizedImage, SourceImage};

/// Bring a decoded image into 8-bit interleaved RGB.
///
/// Images already decoded as 8-bit RGB pass through untouched, whatever
/// their source format. Every other pixel layout is converted: alpha is
/// dropped without compositing, grayscale is expanded to three channels and
/// deeper samples are reduced to 8 bits.
pub fn normalize(source: SourceImage) -> NormalizedImage {
    let SourceImage {
        origin,
        image,
        format,
    } = source;

    let image = match image {
        DynamicImage::ImageRgb8(rgb) => rgb,
        other => {
            debug!("Converting '{}' from {:?} to RGB", origin.id, other.color());
            other.into_rgb8()
        }
    };

    NormalizedImage {
        origin,
        image,
        format,
    }
}
