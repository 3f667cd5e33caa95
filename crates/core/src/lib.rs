pub mod config;
pub mod error;
pub mod locale;
pub mod text;
pub mod types;

pub use config::{CmsConfig, SiteConfig, SiteSettings, TwitterSettings, load_config};
pub use error::{Error, Result};
pub use locale::Locale;
pub use types::*;
