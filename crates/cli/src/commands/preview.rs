use super::Sources;
use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::Utc;
use folio_content::IdType;
use folio_core::Locale;
use folio_generator::head::{html_escape, render_head, render_json_ld};
use folio_generator::post::{blog_posting_json_ld, post_metadata};
use folio_generator::robots::render_robots;
use folio_generator::sitemap::render_xml;
use folio_generator::{generate_sitemap, generate_static_params, route_metadata};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

#[derive(Clone)]
struct AppState {
    sources: Arc<Sources>,
}

#[derive(Debug, Deserialize)]
struct MetaQuery {
    #[serde(default)]
    path: String,
}

/// Start the preview server
///
/// Artifacts are generated per request, so CMS edits show up on reload.
/// Responses carry the revalidation window as a `Cache-Control` header.
pub async fn run(sources: Sources, port: u16) -> Result<()> {
    println!("🌐 Starting preview server...");
    println!("   Site: {}", sources.site.site.url);
    println!("   CMS: {}", sources.origin);

    let app = router(sources);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    println!("\n🚀 Preview ready at: http://localhost:{}", port);
    println!("   /sitemap.xml  /robots.txt  /static-params.json");
    println!("   /ko/meta?path=/resume  /en/blog/<id>");
    println!("   Press Ctrl+C to stop\n");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to port")?;
    info!(%addr, "Preview server listening");

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn router(sources: Sources) -> Router {
    let state = AppState {
        sources: Arc::new(sources),
    };

    Router::new()
        .route("/sitemap.xml", get(sitemap_handler))
        .route("/robots.txt", get(robots_handler))
        .route("/static-params.json", get(params_handler))
        .route("/{locale}/meta", get(meta_handler))
        .route("/{locale}/blog/{id}", get(post_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

impl AppState {
    fn cache_control(&self) -> String {
        format!(
            "public, s-maxage={}, stale-while-revalidate",
            self.sources.site.cms.revalidate.as_secs()
        )
    }

    fn respond(&self, content_type: &'static str, body: impl IntoResponse) -> Response {
        (
            [
                (header::CONTENT_TYPE, content_type.to_string()),
                (header::CACHE_CONTROL, self.cache_control()),
            ],
            body,
        )
            .into_response()
    }
}

fn parse_locale(code: &str) -> Result<Locale, Response> {
    Locale::from_code(code).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            format!("Unsupported locale '{}'", code),
        )
            .into_response()
    })
}

async fn sitemap_handler(State(state): State<AppState>) -> Response {
    let sources = &state.sources;
    let entries = generate_sitemap(&sources.site, &sources.client, Utc::now()).await;
    state.respond("application/xml; charset=utf-8", render_xml(&entries))
}

async fn robots_handler(State(state): State<AppState>) -> Response {
    state.respond(
        "text/plain; charset=utf-8",
        render_robots(&state.sources.site),
    )
}

async fn params_handler(State(state): State<AppState>) -> Response {
    let params = generate_static_params(&state.sources.client).await;
    state.respond("application/json", Json(params))
}

async fn meta_handler(
    State(state): State<AppState>,
    Path(locale): Path<String>,
    Query(query): Query<MetaQuery>,
) -> Response {
    let locale = match parse_locale(&locale) {
        Ok(locale) => locale,
        Err(response) => return response,
    };
    let sources = &state.sources;
    let record = route_metadata(&sources.site, &sources.client, locale, &query.path).await;
    state.respond("application/json", Json(record))
}

async fn post_handler(
    State(state): State<AppState>,
    Path((locale, id)): Path<(String, String)>,
) -> Response {
    let locale = match parse_locale(&locale) {
        Ok(locale) => locale,
        Err(response) => return response,
    };
    let sources = &state.sources;
    let post = sources.client.get_post(&id, IdType::DatabaseId).await;
    let record = post_metadata(&sources.site, locale, &id, post.as_ref());

    let Some(post) = post else {
        let page = page_html(locale, &render_head(&record), "<h1>Post Not Found</h1>");
        return (StatusCode::NOT_FOUND, Html(page)).into_response();
    };

    let head = format!(
        "{}{}\n",
        render_head(&record),
        render_json_ld(&blog_posting_json_ld(&sources.site, locale, &id, &post))
    );
    let body = format!(
        "<h1>{}</h1>\n<p>{}</p>",
        html_escape(&record.title),
        html_escape(&record.description)
    );
    state.respond("text/html; charset=utf-8", page_html(locale, &head, &body))
}

fn page_html(locale: Locale, head: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="{}">
<head>
<meta charset="utf-8">
{}</head>
<body>
{}
</body>
</html>
"#,
        locale.code(),
        head,
        body
    )
}
