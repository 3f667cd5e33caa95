//! Sitemap generation
//!
//! Static pages are listed for every locale. Blog posts are added from the
//! CMS when every lookup succeeds; a single failure drops the whole dynamic
//! portion and the static entries are served alone.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"
//!         xmlns:xhtml="http://www.w3.org/1999/xhtml">
//!   <url>
//!     <loc>https://haeun.dev/ko</loc>
//!     <lastmod>2025-01-01T00:00:00+00:00</lastmod>
//!     <changefreq>weekly</changefreq>
//!     <priority>1.0</priority>
//!     <xhtml:link rel="alternate" hreflang="en" href="https://haeun.dev/en"/>
//!   </url>
//! </urlset>
//! ```

use crate::pages::static_paths;
use crate::post::post_path;
use chrono::{DateTime, SecondsFormat, Utc};
use folio_content::{ContentClient, ContentError, IdType};
use folio_core::{Locale, SiteConfig};
use futures::future::try_join_all;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

pub const HOME_PRIORITY: f32 = 1.0;
pub const PAGE_PRIORITY: f32 = 0.8;
pub const POST_PRIORITY: f32 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Weekly,
    Daily,
}

impl ChangeFrequency {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Daily => "daily",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: DateTime<Utc>,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
    /// Same page in every locale
    pub alternates: BTreeMap<Locale, String>,
}

/// Entries for the static pages, one per locale and path
pub fn static_entries(site: &SiteConfig, now: DateTime<Utc>) -> Vec<SitemapEntry> {
    Locale::ALL
        .into_iter()
        .flat_map(|locale| {
            static_paths().map(move |path| SitemapEntry {
                url: site.site.canonical_url(locale, path),
                last_modified: now,
                change_frequency: ChangeFrequency::Weekly,
                priority: if path.is_empty() {
                    HOME_PRIORITY
                } else {
                    PAGE_PRIORITY
                },
                alternates: site.site.language_alternates(path),
            })
        })
        .collect()
}

async fn post_entry(
    site: &SiteConfig,
    client: &ContentClient,
    locale: Locale,
    id: i64,
    now: DateTime<Utc>,
) -> Result<SitemapEntry, ContentError> {
    let id = id.to_string();
    let post = client.try_post(&id, IdType::DatabaseId).await?;
    let path = post_path(&id);

    Ok(SitemapEntry {
        url: site.site.canonical_url(locale, &path),
        last_modified: post.modified_at().unwrap_or(now),
        change_frequency: ChangeFrequency::Daily,
        priority: POST_PRIORITY,
        alternates: site.site.language_alternates(&path),
    })
}

async fn post_entries(
    site: &SiteConfig,
    client: &ContentClient,
    now: DateTime<Utc>,
) -> Result<Vec<SitemapEntry>, ContentError> {
    let ids = client.try_all_post_ids().await?;
    let lookups = Locale::ALL
        .into_iter()
        .flat_map(|locale| ids.iter().map(move |&id| (locale, id)))
        .map(|(locale, id)| post_entry(site, client, locale, id, now));

    try_join_all(lookups).await
}

/// Full sitemap: static pages followed by every blog post in every locale
pub async fn generate_sitemap(
    site: &SiteConfig,
    client: &ContentClient,
    now: DateTime<Utc>,
) -> Vec<SitemapEntry> {
    let mut entries = static_entries(site, now);

    match post_entries(site, client, now).await {
        Ok(posts) => {
            debug!(count = posts.len(), "Sitemap post entries generated");
            entries.extend(posts);
        }
        Err(err) => {
            warn!(error = %err, "Sitemap post entries unavailable, listing static pages only");
        }
    }

    entries
}

/// Render entries as a sitemaps.org document with hreflang alternates
pub fn render_xml(entries: &[SitemapEntry]) -> String {
    let mut xml = String::with_capacity(4096);

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(&format!(
        r#"<urlset xmlns="{SITEMAP_NS}" xmlns:xhtml="{XHTML_NS}">"#
    ));
    xml.push('\n');

    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.url)));
        xml.push_str(&format!(
            "    <lastmod>{}</lastmod>\n",
            entry.last_modified.to_rfc3339_opts(SecondsFormat::Secs, false)
        ));
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            entry.change_frequency.as_str()
        ));
        xml.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority));
        for (locale, href) in &entry.alternates {
            xml.push_str(&format!(
                r#"    <xhtml:link rel="alternate" hreflang="{}" href="{}"/>"#,
                locale.code(),
                escape_xml(href)
            ));
            xml.push('\n');
        }
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
