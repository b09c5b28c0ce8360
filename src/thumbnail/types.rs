use image::{DynamicImage, ImageFormat, RgbImage};

/// Where an image came from: the article identifier plus the file name the
/// bytes were staged under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageOrigin {
    /// Article identifier (DOI suffix)
    pub id: String,
    /// Source file name, used to derive the thumbnail file name
    pub file_name: String,
}

impl ImageOrigin {
    pub fn new(id: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            file_name: file_name.into(),
        }
    }
}

/// A decoded image together with the format its bytes declared.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub origin: ImageOrigin,
    pub image: DynamicImage,
    pub format: ImageFormat,
}

impl SourceImage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// An image in 8-bit interleaved RGB, ready for thumbnail generation.
#[derive(Debug, Clone)]
pub struct NormalizedImage {
    pub origin: ImageOrigin,
    pub image: RgbImage,
    /// Format declared by the original bytes
    pub format: ImageFormat,
}

/// A square RGB image whose edge equals the policy's target edge.
///
/// Only the generator constructs these, so the square invariant holds for
/// every value of this type.
#[derive(Debug, Clone)]
pub struct Thumbnail {
    origin: ImageOrigin,
    image: RgbImage,
}

impl Thumbnail {
    pub(super) fn new(origin: ImageOrigin, image: RgbImage) -> Self {
        debug_assert_eq!(image.width(), image.height());
        Self { origin, image }
    }

    pub fn origin(&self) -> &ImageOrigin {
        &self.origin
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Edge length in pixels
    pub fn edge(&self) -> u32 {
        self.image.width()
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }
}

/// JPEG bytes for one thumbnail, ready to be staged and uploaded.
#[derive(Debug, Clone)]
pub struct EncodedThumbnail {
    /// Article identifier of the source image
    pub id: String,
    /// Encoded JPEG data
    pub bytes: Vec<u8>,
    /// Source file name with its extension replaced by `.jpg`
    pub file_name: String,
    /// Quality the data was encoded at
    pub quality: u8,
}
