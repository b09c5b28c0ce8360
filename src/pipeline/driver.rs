use log::{debug, info, warn};

use super::SourceItem;
use crate::error::ThumbnailerError;
use crate::thumbnail::{
    EncodedThumbnail, JpegQuality, ThumbnailPolicy, encode, generate, load_image, normalize,
};

/// Runs decode, normalize, generate and encode over a batch of sources.
#[derive(Debug, Clone, Copy)]
pub struct PipelineDriver {
    policy: ThumbnailPolicy,
    quality: JpegQuality,
}

impl PipelineDriver {
    /// Create a driver, rejecting an invalid policy up front.
    pub fn new(policy: ThumbnailPolicy, quality: JpegQuality) -> Result<Self, ThumbnailerError> {
        policy.validate()?;
        Ok(Self { policy, quality })
    }

    pub fn policy(&self) -> &ThumbnailPolicy {
        &self.policy
    }

    pub fn quality(&self) -> JpegQuality {
        self.quality
    }

    /// Process every source in input order.
    ///
    /// A source that fails to read, decode or encode is logged and left out of
    /// the result. Configuration errors abort the batch.
    pub fn run(&self, sources: &[SourceItem]) -> Result<Vec<EncodedThumbnail>, ThumbnailerError> {
        let mut thumbnails = Vec::with_capacity(sources.len());

        for source in sources {
            match self.process(source) {
                Ok(thumbnail) => {
                    info!("Thumbnail for '{}' is generated", thumbnail.file_name);
                    thumbnails.push(thumbnail);
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => warn!("Skipping '{}': {}", source.id(), e),
            }
        }

        debug!(
            "Generated {} of {} thumbnails",
            thumbnails.len(),
            sources.len()
        );

        Ok(thumbnails)
    }

    /// Turn a single source into an encoded thumbnail.
    pub fn process(&self, source: &SourceItem) -> Result<EncodedThumbnail, ThumbnailerError> {
        let bytes = source.read()?;
        let image = load_image(source.origin.clone(), &bytes)?;
        let thumbnail = generate(normalize(image), &self.policy)?;
        encode(thumbnail, self.quality)
    }
}

/// Validate the quality and run one batch.
pub fn run(
    sources: &[SourceItem],
    policy: ThumbnailPolicy,
    quality: u32,
) -> Result<Vec<EncodedThumbnail>, ThumbnailerError> {
    PipelineDriver::new(policy, JpegQuality::new(quality)?)?.run(sources)
}
