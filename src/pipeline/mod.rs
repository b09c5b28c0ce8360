mod driver;
mod source;

pub use driver::{PipelineDriver, run};
pub use source::{SourceItem, SourceLocation};
