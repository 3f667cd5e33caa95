use crate::metadata::{ContentType, LocalizedMetadata, PageMeta, build_localized_metadata};
use crate::pages::blog_description;
use folio_core::text::{strip_html, strip_html_opt, truncate_chars};
use folio_core::{Locale, Post, SiteConfig};
use serde_json::{Map, Value, json};

pub const NOT_FOUND_TITLE: &str = "Post Not Found";
pub const FALLBACK_TITLE: &str = "Blog Post";
/// Longest meta description taken from a post
pub const DESCRIPTION_MAX_CHARS: usize = 160;

/// Route of a post below the locale prefix
pub fn post_path(id: &str) -> String {
    format!("/blog/{}", id)
}

/// Metadata for the blog post page
///
/// A missing post yields a minimal "not found" record; the page itself is
/// expected to answer with a not-found response.
pub fn post_metadata(
    site: &SiteConfig,
    locale: Locale,
    id: &str,
    post: Option<&Post>,
) -> LocalizedMetadata {
    let path = post_path(id);
    let Some(post) = post else {
        let meta = PageMeta {
            title: Some(NOT_FOUND_TITLE.to_string()),
            ..PageMeta::default()
        };
        return build_localized_metadata(site, locale, &path, &meta);
    };

    let stripped_title = strip_html(&post.title);
    let title = post
        .seo_title()
        .map(String::from)
        .unwrap_or_else(|| {
            if stripped_title.is_empty() {
                FALLBACK_TITLE.to_string()
            } else {
                stripped_title
            }
        });

    let summary = strip_html_opt(post.seo_description().or(post.excerpt.as_deref()));
    let description = if summary.is_empty() {
        blog_description(locale)
    } else {
        truncate_chars(&summary, DESCRIPTION_MAX_CHARS)
    };

    let meta = PageMeta {
        title: Some(title),
        description: Some(description),
        image: post.share_image().map(String::from),
        kind: Some(ContentType::Article),
        open_graph: None,
        published_time: Some(post.date.clone()),
        modified_time: Some(post.modified.clone()),
        author: post.author_name().map(String::from),
        tags: post.tag_names(),
    };

    build_localized_metadata(site, locale, &path, &meta)
}

/// schema.org `BlogPosting` structured data for a post page
pub fn blog_posting_json_ld(site: &SiteConfig, locale: Locale, id: &str, post: &Post) -> Value {
    let mut ld = Map::new();
    ld.insert("@context".into(), json!("https://schema.org"));
    ld.insert("@type".into(), json!("BlogPosting"));
    ld.insert("headline".into(), json!(strip_html(&post.title)));
    ld.insert(
        "description".into(),
        json!(strip_html_opt(
            post.seo_description().or(post.excerpt.as_deref())
        )),
    );

    if let Some(image) = post.featured_image() {
        let details = image.media_details.as_ref();
        ld.insert(
            "image".into(),
            json!({
                "@type": "ImageObject",
                "url": image.source_url,
                "width": details.and_then(|d| d.width),
                "height": details.and_then(|d| d.height),
            }),
        );
    }

    ld.insert("datePublished".into(), json!(post.date));
    ld.insert("dateModified".into(), json!(post.modified));

    if let Some(name) = post.author_name() {
        ld.insert("author".into(), json!({ "@type": "Person", "name": name }));
    }

    ld.insert(
        "publisher".into(),
        json!({
            "@type": "Organization",
            "name": site.site.name,
            "url": site.site.url,
        }),
    );
    ld.insert(
        "mainEntityOfPage".into(),
        json!({
            "@type": "WebPage",
            "@id": site.site.canonical_url(locale, &post_path(id)),
        }),
    );
    ld.insert("articleSection".into(), json!(post.category_names()));
    ld.insert("keywords".into(), json!(post.tag_names().join(", ")));

    Value::Object(ld)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(json: Value) -> Post {
        serde_json::from_value(json).unwrap()
    }

    fn full_post() -> Post {
        post(json!({
            "id": "cG9zdDo0Mg==",
            "databaseId": 42,
            "title": "<strong>Design &amp; Code</strong>",
            "excerpt": "<p>An excerpt</p>",
            "content": "<p>Body</p>",
            "date": "2025-02-01T10:00:00",
            "modified": "2025-02-03T12:00:00",
            "slug": "design-code",
            "uri": "/design-code/",
            "featuredImage": { "node": { "sourceUrl": "https://cms.example/wp-content/f.jpg", "mediaDetails": { "width": 640, "height": 480 } } },
            "author": { "node": { "name": "Haeun" } },
            "categories": { "nodes": [ { "id": "c", "name": "Notes", "slug": "notes" } ] },
            "tags": { "nodes": [ { "id": "t", "name": "css", "slug": "css" } ] }
        }))
    }

    #[test]
    fn test_missing_post_metadata() {
        let record = post_metadata(&SiteConfig::default(), Locale::Ko, "999", None);
        assert_eq!(record.title, NOT_FOUND_TITLE);
        assert_eq!(record.canonical, "https://haeun.dev/ko/blog/999");
    }

    #[test]
    fn test_post_metadata_from_cms_fields() {
        let record = post_metadata(&SiteConfig::default(), Locale::En, "42", Some(&full_post()));
        assert_eq!(record.title, "Design   Code");
        assert_eq!(record.description, "An excerpt");
        assert_eq!(record.image, "https://cms.example/wp-content/f.jpg");
        assert_eq!(record.content_type, ContentType::Article);
        let article = record.open_graph.article.unwrap();
        assert_eq!(article.published_time.as_deref(), Some("2025-02-01T10:00:00"));
        assert_eq!(article.modified_time.as_deref(), Some("2025-02-03T12:00:00"));
        assert_eq!(article.author.as_deref(), Some("Haeun"));
        assert_eq!(article.tags, vec!["css"]);
        assert_eq!(record.alternates.languages[&Locale::Ko], "https://haeun.dev/ko/blog/42");
    }

    #[test]
    fn test_seo_overrides_win() {
        let mut p = full_post();
        p.seo = Some(folio_core::Seo {
            title: Some("SEO Title".to_string()),
            meta_desc: Some("<p>SEO description</p>".to_string()),
            ..Default::default()
        });
        let record = post_metadata(&SiteConfig::default(), Locale::Ko, "42", Some(&p));
        assert_eq!(record.title, "SEO Title");
        assert_eq!(record.description, "SEO description");
    }

    #[test]
    fn test_description_is_truncated() {
        let mut p = full_post();
        p.excerpt = Some(format!("<p>{}</p>", "가".repeat(300)));
        let record = post_metadata(&SiteConfig::default(), Locale::Ko, "42", Some(&p));
        assert_eq!(record.description.chars().count(), DESCRIPTION_MAX_CHARS);
    }

    #[test]
    fn test_fallbacks_for_empty_post() {
        let p = post(json!({ "id": "x", "databaseId": 1, "title": "<p></p>" }));
        let record = post_metadata(&SiteConfig::default(), Locale::En, "1", Some(&p));
        assert_eq!(record.title, FALLBACK_TITLE);
        assert_eq!(record.description, blog_description(Locale::En));
        assert_eq!(record.image, "https://haeun.dev/og-image.jpg");
    }

    #[test]
    fn test_json_ld() {
        let ld = blog_posting_json_ld(&SiteConfig::default(), Locale::Ko, "42", &full_post());
        assert_eq!(ld["@type"], "BlogPosting");
        assert_eq!(ld["headline"], "Design   Code");
        assert_eq!(ld["image"]["width"], 640);
        assert_eq!(ld["author"]["name"], "Haeun");
        assert_eq!(ld["mainEntityOfPage"]["@id"], "https://haeun.dev/ko/blog/42");
        assert_eq!(ld["articleSection"], json!(["Notes"]));
        assert_eq!(ld["keywords"], "css");
    }

    #[test]
    fn test_json_ld_without_optional_parts() {
        let p = post(json!({ "id": "x", "databaseId": 1 }));
        let ld = blog_posting_json_ld(&SiteConfig::default(), Locale::En, "1", &p);
        assert!(ld.get("image").is_none());
        assert!(ld.get("author").is_none());
    }
}
