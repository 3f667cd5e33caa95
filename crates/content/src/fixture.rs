//! In-memory CMS
//!
//! Answers the catalog queries from a list of posts, the way WPGraphQL
//! would. Used for offline builds (`--fixture posts.json`) and in tests.

use crate::error::ContentError;
use crate::graphql::{Envelope, GraphQlError, GraphQlRequest, Transport};
use crate::posts::{DEFAULT_POST_LIMIT, IdType};
use crate::queries::{MAX_POST_IDS, Query};
use async_trait::async_trait;
use folio_core::{PageInfo, Post};
use serde_json::{Value, json};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

/// Injected failure for one catalog query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// No response: `data = None` and one error, as the HTTP transport reports
    Transport,
    /// Normal data plus an error entry
    Upstream,
}

/// Posts are kept in CMS order (newest first)
pub struct FixtureTransport {
    posts: Vec<Post>,
    faults: HashMap<&'static str, Fault>,
    failing_posts: HashSet<i64>,
    revalidate: Duration,
    requests: Mutex<Vec<GraphQlRequest>>,
}

impl FixtureTransport {
    pub fn new(posts: Vec<Post>) -> Self {
        Self {
            posts,
            faults: HashMap::new(),
            failing_posts: HashSet::new(),
            revalidate: Duration::from_secs(folio_core::config::DEFAULT_REVALIDATE_SECS),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Read a JSON array of posts
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let posts: Vec<Post> = serde_json::from_str(json)
            .map_err(|e| ContentError::Fixture(format!("Invalid fixture JSON: {}", e)))?;
        Ok(Self::new(posts))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ContentError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            ContentError::Fixture(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    pub fn with_fault(mut self, query: Query, fault: Fault) -> Self {
        self.faults.insert(query.operation_name(), fault);
        self
    }

    /// Make single-post lookups of `database_id` fail at the transport level
    pub fn with_failing_post(mut self, database_id: i64) -> Self {
        self.failing_posts.insert(database_id);
        self
    }

    /// Requests received so far, oldest first
    pub fn requests(&self) -> Vec<GraphQlRequest> {
        self.requests
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }

    fn posts_data(&self, variables: &Value) -> Value {
        let first = variables
            .get("first")
            .and_then(Value::as_u64)
            .unwrap_or(u64::from(DEFAULT_POST_LIMIT)) as usize;
        let start = variables
            .get("after")
            .and_then(Value::as_str)
            .and_then(|cursor| cursor.parse::<i64>().ok())
            .and_then(|after| self.posts.iter().position(|p| p.database_id == after))
            .map(|idx| idx + 1)
            .unwrap_or(0);

        let page: Vec<Post> = self
            .posts
            .iter()
            .skip(start)
            .take(first)
            .cloned()
            .map(|mut post| {
                post.content = None;
                post.tags = None;
                post
            })
            .collect();

        let page_info = PageInfo {
            has_next_page: start + page.len() < self.posts.len(),
            has_previous_page: start > 0,
            start_cursor: page.first().map(|p| p.database_id.to_string()),
            end_cursor: page.last().map(|p| p.database_id.to_string()),
        };

        json!({ "posts": { "nodes": page, "pageInfo": page_info } })
    }

    fn find_post(&self, variables: &Value) -> Option<&Post> {
        let id = variables.get("id").and_then(Value::as_str)?;
        let id_type: IdType = variables
            .get("idType")
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default();

        self.posts.iter().find(|post| match id_type {
            IdType::DatabaseId => id.parse::<i64>().is_ok_and(|n| n == post.database_id),
            IdType::Slug => post.slug == id,
            IdType::Uri => post.uri.trim_matches('/') == id.trim_matches('/'),
        })
    }

    fn answer(&self, query: Query, variables: &Value) -> Envelope<Value> {
        match query {
            Query::Posts => Envelope::success(self.posts_data(variables)),
            Query::Post => match self.find_post(variables) {
                Some(post) if self.failing_posts.contains(&post.database_id) => {
                    Envelope::failure(format!("Fixture failure for post {}", post.database_id))
                }
                post => Envelope::success(json!({ "post": post })),
            },
            Query::AllPostIds => {
                let nodes: Vec<Value> = self
                    .posts
                    .iter()
                    .take(MAX_POST_IDS)
                    .map(|p| json!({ "databaseId": p.database_id }))
                    .collect();
                Envelope::success(json!({ "posts": { "nodes": nodes } }))
            }
        }
    }
}

#[async_trait]
impl Transport for FixtureTransport {
    async fn execute(&self, request: &GraphQlRequest) -> Envelope<Value> {
        if let Ok(mut log) = self.requests.lock() {
            log.push(request.clone());
        }

        let Some(query) = Query::ALL.into_iter().find(|q| q.text() == request.query) else {
            return Envelope::failure("Unknown query").with_revalidate(self.revalidate);
        };

        let variables = request.variables.clone().unwrap_or(Value::Null);
        let envelope = match self.faults.get(query.operation_name()) {
            Some(Fault::Transport) => Envelope::failure("Fixture transport failure"),
            Some(Fault::Upstream) => {
                let mut envelope = self.answer(query, &variables);
                envelope
                    .errors
                    .push(GraphQlError::new("Fixture upstream error"));
                envelope
            }
            None => self.answer(query, &variables),
        };

        envelope.with_revalidate(self.revalidate)
    }
}

/// Post shaped like a single-post query result
#[cfg(test)]
pub(crate) fn sample_post(database_id: i64) -> Post {
    serde_json::from_value(json!({
        "id": format!("post:{}", database_id),
        "databaseId": database_id,
        "title": format!("<b>Post {}</b>", database_id),
        "excerpt": "<p>Excerpt</p>",
        "content": "<p>Body</p>",
        "slug": format!("post-{}", database_id),
        "uri": format!("/post-{}/", database_id),
        "date": "2025-01-01T00:00:00",
        "modified": "2025-01-02T00:00:00",
        "tags": { "nodes": [ { "id": "t1", "name": "rust", "slug": "rust" } ] }
    }))
    .expect("valid sample post")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::{ALL_POST_IDS_QUERY, POST_QUERY};

    #[tokio::test]
    async fn test_unknown_query_fails() {
        let fixture = FixtureTransport::new(Vec::new());
        let envelope = fixture
            .execute(&GraphQlRequest::new("{ viewer { id } }", None))
            .await;
        assert!(envelope.data.is_none());
        assert_eq!(envelope.errors.len(), 1);
    }

    #[tokio::test]
    async fn test_failing_post_only_affects_that_post() {
        let fixture = FixtureTransport::new(vec![sample_post(1), sample_post(2)])
            .with_failing_post(2);

        let ok = fixture
            .execute(&GraphQlRequest::new(
                POST_QUERY,
                Some(json!({ "id": "1", "idType": "DATABASE_ID" })),
            ))
            .await;
        assert!(ok.errors.is_empty());

        let failed = fixture
            .execute(&GraphQlRequest::new(
                POST_QUERY,
                Some(json!({ "id": "2", "idType": "DATABASE_ID" })),
            ))
            .await;
        assert!(failed.data.is_none());
    }

    #[tokio::test]
    async fn test_upstream_fault_keeps_data() {
        let fixture = FixtureTransport::new(vec![sample_post(1)])
            .with_fault(Query::AllPostIds, Fault::Upstream);
        let envelope = fixture
            .execute(&GraphQlRequest::new(ALL_POST_IDS_QUERY, None))
            .await;
        assert!(envelope.data.is_some());
        assert_eq!(envelope.errors.len(), 1);
    }

    #[test]
    fn test_from_json() {
        let fixture = FixtureTransport::from_json(r#"[{"id": "a", "databaseId": 4}]"#).unwrap();
        assert_eq!(fixture.posts.len(), 1);
        assert!(FixtureTransport::from_json("{").is_err());
    }
}
