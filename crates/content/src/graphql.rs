use crate::error::ContentError;
use async_trait::async_trait;
use folio_core::CmsConfig;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error};

/// Body of a GraphQL POST
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphQlRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Value>,
}

impl GraphQlRequest {
    pub fn new(query: impl Into<String>, variables: Option<Value>) -> Self {
        Self {
            query: query.into(),
            variables,
        }
    }
}

/// GraphQL response envelope
///
/// The CMS may send partial `data` together with `errors`. The envelope keeps
/// both; [`Envelope::into_result`] is where a non-empty error list wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphQlError>,
    /// How long this result may be reused before fetching again
    #[serde(skip)]
    pub revalidate: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<ErrorLocation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<PathSegment>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorLocation {
    pub line: u32,
    pub column: u32,
}

/// Response path element: field name or list index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Field(String),
    Index(i64),
}

impl GraphQlError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: None,
            path: None,
        }
    }
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            errors: Vec::new(),
            revalidate: None,
        }
    }

    /// Envelope for a request that never produced a usable response
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            data: None,
            errors: vec![GraphQlError::new(message)],
            revalidate: None,
        }
    }

    pub fn with_revalidate(mut self, revalidate: Duration) -> Self {
        self.revalidate = Some(revalidate);
        self
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Collapse the two channels into one outcome
    ///
    /// Any error, even alongside data, is a failure.
    pub fn into_result(self) -> Result<T, ContentError> {
        if !self.errors.is_empty() {
            return Err(ContentError::Upstream(
                self.errors.into_iter().map(|e| e.message).collect(),
            ));
        }
        self.data.ok_or(ContentError::MissingData("data"))
    }
}

impl Envelope<Value> {
    /// Read `data` into the declared shape
    ///
    /// A payload that does not match becomes a failure envelope.
    pub fn decode<T: DeserializeOwned>(self) -> Envelope<T> {
        let Envelope {
            data,
            mut errors,
            revalidate,
        } = self;

        let data = match data {
            None | Some(Value::Null) => None,
            Some(value) => match serde_json::from_value::<T>(value) {
                Ok(decoded) => Some(decoded),
                Err(err) => {
                    error!(error = %err, "GraphQL data did not match the expected shape");
                    errors.push(GraphQlError::new(format!(
                        "Unexpected GraphQL data shape: {}",
                        err
                    )));
                    None
                }
            },
        };

        Envelope {
            data,
            errors,
            revalidate,
        }
    }
}

/// Sends GraphQL requests to the CMS
///
/// Implementations never fail outward: network and protocol problems are
/// reported as an envelope with `data = None` and one synthetic error.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: &GraphQlRequest) -> Envelope<Value>;
}

/// Run `query` and read the result into `T`
pub async fn fetch_graphql<T: DeserializeOwned>(
    transport: &dyn Transport,
    query: &str,
    variables: Option<Value>,
) -> Envelope<T> {
    let request = GraphQlRequest::new(query, variables);
    transport.execute(&request).await.decode()
}

/// reqwest-backed transport for a single endpoint
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
    revalidate: Duration,
}

#[derive(Debug, thiserror::Error)]
enum TransportFailure {
    #[error("GraphQL request failed: {}", .0.as_u16())]
    Status(StatusCode),
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid GraphQL response: {0}")]
    Json(#[from] serde_json::Error),
}

impl HttpTransport {
    pub fn new(config: &CmsConfig) -> Result<Self, ContentError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: reqwest::Client, config: &CmsConfig) -> Self {
        Self {
            client,
            endpoint: config.graphql_url.clone(),
            revalidate: config.revalidate,
        }
    }

    async fn send(&self, request: &GraphQlRequest) -> Result<Envelope<Value>, TransportFailure> {
        let response = self.client.post(&self.endpoint).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportFailure::Status(status));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: &GraphQlRequest) -> Envelope<Value> {
        debug!(endpoint = %self.endpoint, "POST GraphQL query");

        let envelope = match self.send(request).await {
            Ok(envelope) => {
                if envelope.has_errors() {
                    error!(errors = ?envelope.errors, "GraphQL errors");
                }
                envelope
            }
            Err(failure) => {
                error!(endpoint = %self.endpoint, error = %failure, "Error fetching GraphQL data");
                Envelope::failure(failure.to_string())
            }
        };

        envelope.with_revalidate(self.revalidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transport_for(url: String) -> HttpTransport {
        HttpTransport::new(&CmsConfig::new(url)).unwrap()
    }

    #[tokio::test]
    async fn test_posts_query_and_variables_as_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({ "query": "{ posts }", "variables": { "first": 2 } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "ok": true } })))
            .expect(1)
            .mount(&server)
            .await;

        let transport = transport_for(format!("{}/graphql", server.uri()));
        let envelope = transport
            .execute(&GraphQlRequest::new("{ posts }", Some(json!({ "first": 2 }))))
            .await;

        assert_eq!(envelope.data, Some(json!({ "ok": true })));
        assert!(envelope.errors.is_empty());
        assert_eq!(envelope.revalidate, Some(Duration::from_secs(60)));
    }

    #[tokio::test]
    async fn test_variables_omitted_when_absent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_json(json!({ "query": "{ ids }" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
            .expect(1)
            .mount(&server)
            .await;

        let envelope = transport_for(server.uri())
            .execute(&GraphQlRequest::new("{ ids }", None))
            .await;
        assert!(envelope.errors.is_empty());
    }

    #[tokio::test]
    async fn test_upstream_errors_returned_with_partial_data() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "post": null },
                "errors": [{
                    "message": "Internal server error",
                    "locations": [{ "line": 2, "column": 3 }],
                    "path": ["post", 0]
                }]
            })))
            .mount(&server)
            .await;

        let envelope = transport_for(server.uri())
            .execute(&GraphQlRequest::new("{ post }", None))
            .await;

        assert_eq!(envelope.data, Some(json!({ "post": null })));
        assert_eq!(envelope.errors.len(), 1);
        let err = &envelope.errors[0];
        assert_eq!(err.message, "Internal server error");
        assert_eq!(err.locations, Some(vec![ErrorLocation { line: 2, column: 3 }]));
        assert_eq!(
            err.path,
            Some(vec![PathSegment::Field("post".to_string()), PathSegment::Index(0)])
        );
    }

    #[tokio::test]
    async fn test_non_success_status_becomes_single_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let envelope = transport_for(server.uri())
            .execute(&GraphQlRequest::new("{ posts }", None))
            .await;

        assert_eq!(envelope.data, None);
        assert_eq!(envelope.errors.len(), 1);
        assert_eq!(envelope.errors[0].message, "GraphQL request failed: 502");
    }

    #[tokio::test]
    async fn test_invalid_json_becomes_single_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let envelope = transport_for(server.uri())
            .execute(&GraphQlRequest::new("{ posts }", None))
            .await;

        assert_eq!(envelope.data, None);
        assert_eq!(envelope.errors.len(), 1);
        assert!(envelope.errors[0].message.starts_with("Invalid GraphQL response"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_becomes_single_error() {
        // Port 9 (discard) on loopback is not expected to accept connections
        let envelope = transport_for("http://127.0.0.1:9/graphql".to_string())
            .execute(&GraphQlRequest::new("{ posts }", None))
            .await;

        assert_eq!(envelope.data, None);
        assert_eq!(envelope.errors.len(), 1);
        assert!(!envelope.errors[0].message.is_empty());
    }

    #[test]
    fn test_into_result_prefers_errors_over_data() {
        let envelope = Envelope {
            data: Some(1),
            errors: vec![GraphQlError::new("boom")],
            revalidate: None,
        };
        match envelope.into_result() {
            Err(ContentError::Upstream(messages)) => assert_eq!(messages, vec!["boom"]),
            other => panic!("expected upstream error, got {:?}", other),
        }
    }

    #[test]
    fn test_into_result_without_data() {
        let envelope: Envelope<i32> = Envelope {
            data: None,
            errors: Vec::new(),
            revalidate: None,
        };
        assert!(matches!(envelope.into_result(), Err(ContentError::MissingData(_))));
        assert_eq!(Envelope::success(3).into_result().unwrap(), 3);
    }

    #[test]
    fn test_decode_shape_mismatch() {
        #[derive(Debug, Deserialize)]
        struct Shape {
            #[allow(dead_code)]
            count: u32,
        }

        let envelope = Envelope::success(json!({ "count": "many" })).decode::<Shape>();
        assert!(envelope.data.is_none());
        assert_eq!(envelope.errors.len(), 1);
        assert!(envelope.errors[0].message.contains("Unexpected GraphQL data shape"));
    }

    #[test]
    fn test_decode_null_data() {
        let envelope = Envelope::success(Value::Null).decode::<Value>();
        assert!(envelope.data.is_none());
        assert!(envelope.errors.is_empty());
    }
}
