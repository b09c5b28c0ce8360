use log::debug;

use super::{ImageOrigin, SourceImage};
use crate::error::ThumbnailerError;

/// Decode raw image bytes, recording the format the bytes declare.
///
/// The format comes from the data's magic bytes, not the file name, so a
/// mislabeled download still decodes as what it really is.
pub fn load_image(origin: ImageOrigin, bytes: &[u8]) -> Result<SourceImage, ThumbnailerError> {
    let format = image::guess_format(bytes).map_err(|e| ThumbnailerError::ImageDecode {
        id: origin.id.clone(),
        source: e,
    })?;

    let image = image::load_from_memory_with_format(bytes, format).map_err(|e| {
        ThumbnailerError::ImageDecode {
            id: origin.id.clone(),
            source: e,
        }
    })?;

    debug!(
        "Decoded '{}' as {:?} {}x{} ({:?})",
        origin.id,
        format,
        image.width(),
        image.height(),
        image.color()
    );

    Ok(SourceImage {
        origin,
        image,
        format,
    })
}
