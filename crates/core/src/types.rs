use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Blog post as returned by the CMS
///
/// Field names follow the WPGraphQL schema. `content` is only present on the
/// single-post query; the list query leaves it out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub database_id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Publish timestamp as sent by the CMS
    #[serde(default, deserialize_with = "null_as_empty")]
    pub date: String,
    /// Last-modified timestamp as sent by the CMS
    #[serde(default, deserialize_with = "null_as_empty")]
    pub modified: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub slug: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<Edge<MediaItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Edge<Author>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Connection<Category>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Connection<Tag>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo: Option<Seo>,
}

/// WPGraphQL sends `null` for unset string fields
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Single related node (`{ node { ... } }`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge<T> {
    pub node: Option<T>,
}

/// List of related nodes (`{ nodes [ ... ] }`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    #[serde(default)]
    pub id: String,
    pub source_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_details: Option<MediaDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaDetails {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Avatar>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub slug: String,
}

/// SEO overrides provided by the CMS's SEO plugin
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seo {
    pub title: Option<String>,
    pub meta_desc: Option<String>,
    pub opengraph_title: Option<String>,
    pub opengraph_description: Option<String>,
    pub opengraph_image: Option<SeoImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoImage {
    pub source_url: Option<String>,
}

/// Cursor information returned with a page of posts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

impl Post {
    pub fn featured_image(&self) -> Option<&MediaItem> {
        self.featured_image.as_ref().and_then(|e| e.node.as_ref())
    }

    pub fn author_name(&self) -> Option<&str> {
        self.author
            .as_ref()
            .and_then(|e| e.node.as_ref())
            .map(|a| a.name.as_str())
            .filter(|name| !name.is_empty())
    }

    pub fn tag_names(&self) -> Vec<String> {
        self.tags
            .as_ref()
            .map(|c| c.nodes.iter().map(|t| t.name.clone()).collect())
            .unwrap_or_default()
    }

    pub fn category_names(&self) -> Vec<String> {
        self.categories
            .as_ref()
            .map(|c| c.nodes.iter().map(|t| t.name.clone()).collect())
            .unwrap_or_default()
    }

    /// Non-empty SEO meta description, if the CMS set one
    pub fn seo_description(&self) -> Option<&str> {
        self.seo
            .as_ref()
            .and_then(|s| s.meta_desc.as_deref())
            .filter(|s| !s.is_empty())
    }

    pub fn seo_title(&self) -> Option<&str> {
        self.seo
            .as_ref()
            .and_then(|s| s.title.as_deref())
            .filter(|s| !s.is_empty())
    }

    /// Social share image: SEO override first, then the featured image
    pub fn share_image(&self) -> Option<&str> {
        self.seo
            .as_ref()
            .and_then(|s| s.opengraph_image.as_ref())
            .and_then(|i| i.source_url.as_deref())
            .filter(|s| !s.is_empty())
            .or_else(|| self.featured_image().map(|m| m.source_url.as_str()))
    }

    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        parse_cms_timestamp(&self.date)
    }

    pub fn modified_at(&self) -> Option<DateTime<Utc>> {
        parse_cms_timestamp(&self.modified)
    }
}

/// Parse a CMS timestamp
///
/// WordPress sends site-local times without an offset
/// (`2025-03-07T09:30:00`); those are read as UTC. RFC 3339 values are
/// accepted as well.
pub fn parse_cms_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S"))
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    const POST_JSON: &str = r#"{
        "id": "cG9zdDox",
        "databaseId": 1,
        "title": "<em>Hello</em>",
        "excerpt": "<p>Summary</p>",
        "slug": "hello",
        "uri": "/2025/03/hello/",
        "date": "2025-03-07T09:30:00",
        "modified": "2025-03-08T10:00:00",
        "featuredImage": { "node": { "id": "m1", "sourceUrl": "https://cms.example.com/wp-content/a.jpg", "altText": "", "mediaDetails": { "width": 800, "height": 600 } } },
        "author": { "node": { "id": "u1", "name": "Haeun", "slug": "haeun", "avatar": { "url": null } } },
        "categories": { "nodes": [ { "id": "c1", "name": "Notes", "slug": "notes" } ] },
        "tags": { "nodes": [ { "id": "t1", "name": "rust", "slug": "rust" }, { "id": "t2", "name": "seo", "slug": "seo" } ] },
        "seo": { "title": "", "metaDesc": "Custom description", "opengraphTitle": null, "opengraphDescription": null, "opengraphImage": null }
    }"#;

    #[test]
    fn test_deserialize_post() {
        let post: Post = serde_json::from_str(POST_JSON).unwrap();
        assert_eq!(post.database_id, 1);
        assert_eq!(post.content, None);
        assert_eq!(post.author_name(), Some("Haeun"));
        assert_eq!(post.tag_names(), vec!["rust", "seo"]);
        assert_eq!(post.category_names(), vec!["Notes"]);
        assert_eq!(post.seo_description(), Some("Custom description"));
        assert_eq!(post.seo_title(), None);
        assert_eq!(
            post.featured_image().and_then(|m| m.media_details.as_ref()).and_then(|d| d.width),
            Some(800)
        );
    }

    #[test]
    fn test_share_image_falls_back_to_featured() {
        let post: Post = serde_json::from_str(POST_JSON).unwrap();
        assert_eq!(
            post.share_image(),
            Some("https://cms.example.com/wp-content/a.jpg")
        );

        let mut with_override = post.clone();
        with_override.seo = Some(Seo {
            opengraph_image: Some(SeoImage {
                source_url: Some("https://cms.example.com/og.png".to_string()),
            }),
            ..Seo::default()
        });
        assert_eq!(with_override.share_image(), Some("https://cms.example.com/og.png"));
    }

    #[test]
    fn test_minimal_post_has_no_relations() {
        let post: Post = serde_json::from_str(r#"{"id": "x", "databaseId": 9}"#).unwrap();
        assert!(post.tag_names().is_empty());
        assert!(post.author_name().is_none());
        assert!(post.share_image().is_none());
        assert!(post.modified_at().is_none());
    }

    #[test]
    fn test_parse_cms_timestamp() {
        let local = parse_cms_timestamp("2025-03-07T09:30:00").unwrap();
        assert_eq!((local.year(), local.month(), local.day()), (2025, 3, 7));
        assert_eq!(local.hour(), 9);

        let offset = parse_cms_timestamp("2025-03-07T09:30:00+09:00").unwrap();
        assert_eq!(offset.hour(), 0);

        assert!(parse_cms_timestamp("").is_none());
        assert!(parse_cms_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_null_strings_read_as_empty() {
        let post: Post = serde_json::from_str(
            r#"{"id": "x", "databaseId": 2, "title": null, "date": null, "modified": null,
                "slug": null, "uri": null, "author": { "node": { "name": null } }}"#,
        )
        .unwrap();
        assert_eq!(post.title, "");
        assert_eq!(post.date, "");
        assert!(post.modified_at().is_none());
        assert_eq!(post.author_name(), None);
    }

    #[test]
    fn test_taxonomy_connections_deserialize() {
        let post: Post = serde_json::from_str(
            r#"{"id": "x", "databaseId": 3, "tags": {}, "categories": { "nodes": [ { "id": "c", "name": "Notes", "slug": "notes" } ] }}"#,
        )
        .unwrap();
        assert!(post.tag_names().is_empty());
        assert_eq!(post.category_names(), vec!["Notes"]);
    }

    #[test]
    fn test_connection_default_is_empty() {
        let c: Connection<Tag> = serde_json::from_str("{}").unwrap();
        assert!(c.nodes.is_empty());
    }
}
