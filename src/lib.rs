pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod job;
pub mod lock;
pub mod pipeline;
pub mod scrape;
pub mod storage;
pub mod thumbnail;
pub mod workspace;

pub use cli::CliArgs;
pub use error::ThumbnailerError;
pub use job::{JobServices, JobSummary, ThumbnailJob};
pub use thumbnail::{EncodedThumbnail, JpegQuality, ThumbnailMode, ThumbnailPolicy};
