mod encoder;
mod generator;
mod geometry;
mod loader;
mod normalize;
mod policy;
mod types;

pub use encoder::{DEFAULT_QUALITY, JpegQuality, encode, thumbnail_filename};
pub use generator::generate;
pub use geometry::{center_square, pad_canvas_size, pad_offset};
pub use loader::load_image;
pub use normalize::normalize;
pub use policy::{DEFAULT_FILL_COLOR, DEFAULT_TARGET_EDGE, ThumbnailMode, ThumbnailPolicy};
pub use types::{EncodedThumbnail, ImageOrigin, NormalizedImage, SourceImage, Thumbnail};
