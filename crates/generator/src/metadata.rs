use folio_core::{Locale, SiteConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Open Graph width and height used for page share images
pub const OG_IMAGE_WIDTH: u32 = 1200;
pub const OG_IMAGE_HEIGHT: u32 = 630;

/// Open Graph `og:type`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Website,
    Profile,
    Article,
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Website => "website",
            ContentType::Profile => "profile",
            ContentType::Article => "article",
        }
    }
}

/// Page-specific metadata input
///
/// Empty strings count as absent, so callers can pass CMS fields through
/// unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageMeta {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Absolute share image URL
    pub image: Option<String>,
    pub kind: Option<ContentType>,
    pub open_graph: Option<OpenGraphOverrides>,
    pub published_time: Option<String>,
    pub modified_time: Option<String>,
    pub author: Option<String>,
    pub tags: Vec<String>,
}

/// Values that differ between the page and its Open Graph card
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpenGraphOverrides {
    pub title: Option<String>,
    pub description: Option<String>,
    pub kind: Option<ContentType>,
}

/// Everything the page framework needs to write `<head>`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedMetadata {
    pub title: String,
    /// Pattern the framework applies to child page titles (`%s` = title)
    pub title_template: String,
    pub description: String,
    pub canonical: String,
    pub image: String,
    pub content_type: ContentType,
    pub open_graph: OpenGraph,
    pub twitter: Twitter,
    pub alternates: Alternates,
    /// Additional `<meta name=...>` tags
    pub other: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenGraph {
    #[serde(rename = "type")]
    pub kind: ContentType,
    pub locale: String,
    pub url: String,
    pub site_name: String,
    pub title: String,
    pub description: String,
    pub images: Vec<OgImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article: Option<ArticleMeta>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OgImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Twitter {
    pub card: String,
    pub site: String,
    pub creator: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alternates {
    pub canonical: String,
    pub languages: BTreeMap<Locale, String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Build the metadata record for `path` in `locale`
///
/// Pure: the same inputs always give the same record.
pub fn build_localized_metadata(
    site: &SiteConfig,
    locale: Locale,
    path: &str,
    meta: &PageMeta,
) -> LocalizedMetadata {
    let canonical = site.site.canonical_url(locale, path);
    let title = non_empty(&meta.title).unwrap_or(&site.site.name).to_string();
    let description = non_empty(&meta.description)
        .unwrap_or(&site.site.description)
        .to_string();

    let overrides = meta.open_graph.clone().unwrap_or_default();
    let kind = meta.kind.or(overrides.kind).unwrap_or_default();

    let image = match non_empty(&meta.image) {
        Some(url) => OgImage {
            url: url.to_string(),
            width: OG_IMAGE_WIDTH,
            height: OG_IMAGE_HEIGHT,
            alt: title.clone(),
        },
        None => default_image(site),
    };

    let article = (kind == ContentType::Article).then(|| ArticleMeta {
        published_time: non_empty(&meta.published_time).map(String::from),
        modified_time: non_empty(&meta.modified_time).map(String::from),
        author: non_empty(&meta.author).map(String::from),
        tags: meta.tags.clone(),
    });

    let open_graph = OpenGraph {
        kind,
        locale: locale.og_locale().to_string(),
        url: canonical.clone(),
        site_name: site.site.name.clone(),
        title: non_empty(&overrides.title).unwrap_or(&title).to_string(),
        description: non_empty(&overrides.description)
            .unwrap_or(&description)
            .to_string(),
        images: vec![image.clone()],
        article,
    };

    LocalizedMetadata {
        title,
        title_template: title_template(site),
        description,
        canonical: canonical.clone(),
        image: image.url,
        content_type: kind,
        open_graph,
        twitter: twitter(site),
        alternates: Alternates {
            canonical,
            languages: site.site.language_alternates(path),
        },
        other: additional_meta_tags(site),
    }
}

/// Site-wide defaults used by the root layout
pub fn base_metadata(site: &SiteConfig) -> LocalizedMetadata {
    let image = default_image(site);
    let root = site.site.url.clone();

    LocalizedMetadata {
        title: site.site.name.clone(),
        title_template: title_template(site),
        description: site.site.description.clone(),
        canonical: root.clone(),
        image: image.url.clone(),
        content_type: ContentType::Website,
        open_graph: OpenGraph {
            kind: ContentType::Website,
            locale: Locale::DEFAULT.og_locale().to_string(),
            url: root.clone(),
            site_name: site.site.name.clone(),
            title: site.site.name.clone(),
            description: site.site.description.clone(),
            images: vec![image],
            article: None,
        },
        twitter: twitter(site),
        alternates: Alternates {
            canonical: root,
            languages: site.site.language_alternates(""),
        },
        other: additional_meta_tags(site),
    }
}

impl LocalizedMetadata {
    /// `<title>` text with the site template applied
    pub fn document_title(&self) -> String {
        if self.title == self.open_graph.site_name {
            self.title.clone()
        } else {
            self.title_template.replace("%s", &self.title)
        }
    }
}

fn title_template(site: &SiteConfig) -> String {
    format!("%s | {}", site.site.name)
}

fn default_image(site: &SiteConfig) -> OgImage {
    OgImage {
        url: site.site.default_image_url(),
        width: OG_IMAGE_WIDTH,
        height: OG_IMAGE_HEIGHT,
        alt: site.site.name.clone(),
    }
}

fn twitter(site: &SiteConfig) -> Twitter {
    Twitter {
        card: site.twitter.card.clone(),
        site: site.twitter.site.clone(),
        creator: site.twitter.handle.clone(),
    }
}

fn additional_meta_tags(site: &SiteConfig) -> BTreeMap<String, String> {
    let mut tags = BTreeMap::new();
    if !site.site.keywords.is_empty() {
        tags.insert("keywords".to_string(), site.site.keywords.join(", "));
    }
    tags.insert("author".to_string(), site.site.author.clone());
    tags.insert("robots".to_string(), "index, follow".to_string());
    tags.insert("googlebot".to_string(), "index, follow".to_string());
    tags
}
