//! Maps a locale-relative path to the page that serves it

use crate::metadata::{LocalizedMetadata, PageMeta, build_localized_metadata};
use crate::pages::StaticPage;
use crate::post::post_metadata;
use folio_content::{ContentClient, IdType};
use folio_core::config::normalize_path;
use folio_core::{Locale, SiteConfig};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Page(StaticPage),
    /// `/blog/{id}`
    Post(String),
    /// Anything else; gets the site defaults
    Other(String),
}

impl Route {
    pub fn parse(path: &str) -> Route {
        if let Some(page) = StaticPage::from_path(path) {
            return Route::Page(page);
        }

        let normalized = normalize_path(path);
        match normalized.strip_prefix("/blog/") {
            Some(id) if !id.is_empty() && !id.contains('/') => Route::Post(id.to_string()),
            _ => Route::Other(normalized),
        }
    }
}

/// Metadata for any page path, fetching the post for blog routes
pub async fn route_metadata(
    site: &SiteConfig,
    client: &ContentClient,
    locale: Locale,
    path: &str,
) -> LocalizedMetadata {
    match Route::parse(path) {
        Route::Page(page) => {
            build_localized_metadata(site, locale, page.path(), &page.page_meta(locale))
        }
        Route::Post(id) => {
            let post = client.get_post(&id, IdType::DatabaseId).await;
            post_metadata(site, locale, &id, post.as_ref())
        }
        Route::Other(path) => build_localized_metadata(site, locale, &path, &PageMeta::default()),
    }
}
