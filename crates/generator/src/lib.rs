// Localized metadata, sitemap and static-params generation

pub mod head;
pub mod metadata;
pub mod pages;
pub mod params;
pub mod post;
pub mod robots;
pub mod route;
pub mod sitemap;

pub use metadata::{ContentType, LocalizedMetadata, PageMeta, base_metadata, build_localized_metadata};
pub use pages::StaticPage;
pub use params::{StaticParam, generate_static_params};
pub use route::{Route, route_metadata};
pub use sitemap::{ChangeFrequency, SitemapEntry, generate_sitemap, static_entries};
