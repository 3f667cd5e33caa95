use crate::error::ContentError;
use crate::graphql::{HttpTransport, Transport, fetch_graphql};
use crate::queries::{ALL_POST_IDS_QUERY, POST_QUERY, POSTS_QUERY};
use folio_core::{CmsConfig, PageInfo, Post};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, warn};

/// Default page size for [`ContentClient::get_posts`]
pub const DEFAULT_POST_LIMIT: u32 = 10;

/// How [`ContentClient::get_post`] interprets its id
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IdType {
    #[default]
    DatabaseId,
    Slug,
    Uri,
}

impl IdType {
    /// WPGraphQL `PostIdType` enum value
    pub fn as_str(self) -> &'static str {
        match self {
            IdType::DatabaseId => "DATABASE_ID",
            IdType::Slug => "SLUG",
            IdType::Uri => "URI",
        }
    }
}

impl fmt::Display for IdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace('-', "_").as_str() {
            "DATABASE_ID" | "ID" => Ok(IdType::DatabaseId),
            "SLUG" => Ok(IdType::Slug),
            "URI" => Ok(IdType::Uri),
            _ => Err(format!(
                "Unknown id type '{}', expected DATABASE_ID, SLUG or URI",
                s
            )),
        }
    }
}

/// One page of the post list
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PostsPage {
    pub posts: Vec<Post>,
    pub page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
struct PostsData {
    posts: Option<PostsConnection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostsConnection {
    nodes: Option<Vec<Post>>,
    #[serde(default)]
    page_info: Option<PageInfo>,
}

#[derive(Debug, Deserialize)]
struct PostData {
    post: Option<Post>,
}

#[derive(Debug, Deserialize)]
struct PostIdsData {
    posts: Option<PostIdsConnection>,
}

#[derive(Debug, Deserialize)]
struct PostIdsConnection {
    nodes: Option<Vec<PostIdNode>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostIdNode {
    database_id: i64,
}

/// Typed access to blog content
///
/// The `get_*` accessors never fail: errors are logged and collapse to an
/// empty list or `None`, so rendering code only checks for emptiness. The
/// `try_*` variants keep the error for callers that must know.
#[derive(Clone)]
pub struct ContentClient {
    transport: Arc<dyn Transport>,
}

impl ContentClient {
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Client talking HTTP to the configured endpoint
    pub fn from_config(config: &CmsConfig) -> Result<Self, ContentError> {
        Ok(Self::new(HttpTransport::new(config)?))
    }

    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// Up to `limit` posts, newest first, starting after `cursor`
    pub async fn get_posts(&self, limit: u32, cursor: Option<&str>) -> Vec<Post> {
        self.get_posts_page(limit, cursor).await.posts
    }

    /// Like [`ContentClient::get_posts`], keeping the pagination cursors
    pub async fn get_posts_page(&self, limit: u32, cursor: Option<&str>) -> PostsPage {
        match self.try_posts_page(limit, cursor).await {
            Ok(page) => page,
            Err(err) => {
                warn!(error = %err, "Post list unavailable, using an empty list");
                PostsPage::default()
            }
        }
    }

    pub async fn try_posts_page(
        &self,
        limit: u32,
        cursor: Option<&str>,
    ) -> Result<PostsPage, ContentError> {
        let mut variables = Map::new();
        variables.insert("first".to_string(), json!(limit));
        if let Some(cursor) = cursor {
            variables.insert("after".to_string(), json!(cursor));
        }

        let data: PostsData =
            fetch_graphql(self.transport(), POSTS_QUERY, Some(Value::Object(variables)))
                .await
                .into_result()?;

        let connection = data.posts.ok_or(ContentError::MissingData("posts"))?;
        let posts = connection.nodes.ok_or(ContentError::MissingData("posts.nodes"))?;

        Ok(PostsPage {
            posts,
            page_info: connection.page_info.unwrap_or_default(),
        })
    }

    /// The post with `id`, body included, or `None` if missing or unavailable
    pub async fn get_post(&self, id: &str, id_type: IdType) -> Option<Post> {
        match self.try_post(id, id_type).await {
            Ok(post) => Some(post),
            Err(err @ ContentError::NotFound { .. }) => {
                debug!(error = %err, "Post not found");
                None
            }
            Err(err) => {
                warn!(error = %err, id, %id_type, "Post unavailable");
                None
            }
        }
    }

    /// Single post; a missing post is [`ContentError::NotFound`]
    pub async fn try_post(&self, id: &str, id_type: IdType) -> Result<Post, ContentError> {
        let variables = json!({ "id": id, "idType": id_type });

        let data: PostData = fetch_graphql(self.transport(), POST_QUERY, Some(variables))
            .await
            .into_result()?;

        data.post.ok_or_else(|| ContentError::NotFound {
            id: id.to_string(),
            id_type,
        })
    }

    /// Database ids of the newest posts (at most 100), in CMS order
    pub async fn get_all_post_ids(&self) -> Vec<i64> {
        match self.try_all_post_ids().await {
            Ok(ids) => ids,
            Err(err) => {
                warn!(error = %err, "Post ids unavailable, using an empty list");
                Vec::new()
            }
        }
    }

    pub async fn try_all_post_ids(&self) -> Result<Vec<i64>, ContentError> {
        let data: PostIdsData = fetch_graphql(self.transport(), ALL_POST_IDS_QUERY, None)
            .await
            .into_result()?;

        let nodes = data
            .posts
            .and_then(|c| c.nodes)
            .ok_or(ContentError::MissingData("posts.nodes"))?;

        Ok(nodes.into_iter().map(|n| n.database_id).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{Fault, FixtureTransport, sample_post};
    use crate::graphql::{Envelope, GraphQlRequest};
    use crate::queries::Query;
    use async_trait::async_trait;

    fn client_with(posts: Vec<Post>) -> ContentClient {
        ContentClient::new(FixtureTransport::new(posts))
    }

    #[tokio::test]
    async fn test_get_all_post_ids_in_cms_order() {
        let client = client_with(vec![sample_post(1), sample_post(2), sample_post(3)]);
        assert_eq!(client.get_all_post_ids().await, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_get_posts_respects_limit_and_cursor() {
        let client = client_with((1..=5).map(sample_post).collect());

        let page = client.get_posts_page(2, None).await;
        assert_eq!(page.posts.iter().map(|p| p.database_id).collect::<Vec<_>>(), vec![1, 2]);
        assert!(page.page_info.has_next_page);

        let cursor = page.page_info.end_cursor.clone().unwrap();
        let next = client.get_posts(2, Some(&cursor)).await;
        assert_eq!(next.iter().map(|p| p.database_id).collect::<Vec<_>>(), vec![3, 4]);
    }

    #[tokio::test]
    async fn test_list_omits_post_body() {
        let client = client_with(vec![sample_post(1)]);
        let posts = client.get_posts(DEFAULT_POST_LIMIT, None).await;
        assert_eq!(posts.len(), 1);
        assert!(posts[0].content.is_none());
    }

    #[tokio::test]
    async fn test_get_post_by_each_id_type() {
        let client = client_with(vec![sample_post(7)]);

        let by_id = client.get_post("7", IdType::DatabaseId).await.unwrap();
        assert!(by_id.content.is_some());
        assert_eq!(by_id.database_id, 7);

        let by_slug = client.get_post("post-7", IdType::Slug).await.unwrap();
        assert_eq!(by_slug.database_id, 7);

        let by_uri = client.get_post("/post-7/", IdType::Uri).await.unwrap();
        assert_eq!(by_uri.database_id, 7);
    }

    #[tokio::test]
    async fn test_get_missing_post_is_none() {
        let client = client_with(vec![sample_post(1), sample_post(2), sample_post(3)]);
        assert!(client.get_post("999", IdType::DatabaseId).await.is_none());
        assert!(matches!(
            client.try_post("999", IdType::DatabaseId).await,
            Err(ContentError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_upstream_errors_discard_partial_data() {
        let posts = vec![sample_post(1), sample_post(2)];
        let client = ContentClient::new(
            FixtureTransport::new(posts)
                .with_fault(Query::Posts, Fault::Upstream)
                .with_fault(Query::Post, Fault::Upstream)
                .with_fault(Query::AllPostIds, Fault::Upstream),
        );

        assert!(client.get_posts(10, None).await.is_empty());
        assert!(client.get_post("1", IdType::DatabaseId).await.is_none());
        assert!(client.get_all_post_ids().await.is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_collapses_to_defaults() {
        let client = ContentClient::new(
            FixtureTransport::new(vec![sample_post(1)])
                .with_fault(Query::Posts, Fault::Transport)
                .with_fault(Query::Post, Fault::Transport)
                .with_fault(Query::AllPostIds, Fault::Transport),
        );

        assert!(client.get_posts(10, None).await.is_empty());
        assert!(client.get_post("1", IdType::DatabaseId).await.is_none());
        assert!(client.get_all_post_ids().await.is_empty());
        assert!(matches!(
            client.try_all_post_ids().await,
            Err(ContentError::Upstream(_))
        ));
    }

    struct CannedTransport(Value);

    #[async_trait]
    impl Transport for CannedTransport {
        async fn execute(&self, _request: &GraphQlRequest) -> Envelope<Value> {
            Envelope::success(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_missing_nodes_is_empty_list() {
        let client = ContentClient::new(CannedTransport(json!({ "posts": null })));
        assert!(client.get_posts(10, None).await.is_empty());
        assert!(client.get_all_post_ids().await.is_empty());

        let client = ContentClient::new(CannedTransport(json!({ "posts": { "nodes": null } })));
        assert!(client.get_posts(10, None).await.is_empty());
    }

    #[tokio::test]
    async fn test_null_title_keeps_whole_list() {
        let client = ContentClient::new(CannedTransport(json!({
            "posts": { "nodes": [
                { "id": "a", "databaseId": 1, "title": "ok" },
                { "id": "b", "databaseId": 2, "title": null }
            ] }
        })));

        let posts = client.get_posts(10, None).await;
        assert_eq!(posts.iter().map(|p| p.database_id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(posts[1].title, "");
    }

    #[tokio::test]
    async fn test_null_fields_on_single_post() {
        let client = ContentClient::new(CannedTransport(json!({
            "post": { "id": "b", "databaseId": 2, "title": null, "modified": null, "uri": null }
        })));

        let post = client.try_post("2", IdType::DatabaseId).await.unwrap();
        assert_eq!(post.database_id, 2);
        assert!(post.modified_at().is_none());
    }

    #[tokio::test]
    async fn test_request_variables() {
        let fixture = Arc::new(FixtureTransport::new(vec![sample_post(1)]));
        let client = ContentClient {
            transport: fixture.clone(),
        };

        client.get_posts(5, None).await;
        client.get_posts(5, Some("1")).await;
        client.get_post("abc", IdType::Slug).await;

        let log = fixture.requests();
        assert_eq!(log[0].variables, Some(json!({ "first": 5 })));
        assert_eq!(log[1].variables, Some(json!({ "first": 5, "after": "1" })));
        assert_eq!(log[2].variables, Some(json!({ "id": "abc", "idType": "SLUG" })));
    }

    #[test]
    fn test_id_type_parsing() {
        assert_eq!("database_id".parse::<IdType>().unwrap(), IdType::DatabaseId);
        assert_eq!("slug".parse::<IdType>().unwrap(), IdType::Slug);
        assert_eq!("URI".parse::<IdType>().unwrap(), IdType::Uri);
        assert!("title".parse::<IdType>().is_err());
        assert_eq!(IdType::default(), IdType::DatabaseId);
    }
}
