mod local;
mod s3;
mod sigv4;

pub use local::LocalObjectStore;
pub use s3::S3ObjectStore;
pub use sigv4::{Credentials, SignedHeaders, sign, uri_encode_segment};

use crate::error::ThumbnailerError;

/// Content type of every uploaded thumbnail
pub const JPEG_CONTENT_TYPE: &str = "image/jpeg";

/// A bucket that thumbnails are written into.
pub trait ObjectStore {
    fn bucket(&self) -> &str;

    fn bucket_exists(&self) -> Result<bool, ThumbnailerError>;

    fn put_object(
        &self,
        key: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<(), ThumbnailerError>;
}

/// Object key for an article thumbnail:
/// `<locale>/<journal>/img/articles/<file_name>`.
pub fn object_key(locale: &str, journal: &str, file_name: &str) -> String {
    format!("{}/{}/img/articles/{}", locale, journal, file_name)
}
