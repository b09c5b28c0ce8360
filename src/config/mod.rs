mod load;
mod settings;
mod types;

pub use load::LoadedConfig;
pub use settings::{
    ENV_STORE_ACCESS_KEY, ENV_STORE_HOST, ENV_STORE_SECRET_KEY, Settings, StoreSettings,
};
pub use types::{ContentApiConfig, ObjectStoreConfig, ThumbnailConfig, ThumbnailerConfig};
