//! Print generated artifacts and CMS data to stdout

use super::Sources;
use anyhow::{Context, Result};
use chrono::Utc;
use folio_content::IdType;
use folio_core::text::{excerpt, strip_html};
use folio_core::{Locale, Post};
use folio_generator::head::{render_head, render_json_ld};
use folio_generator::post::{blog_posting_json_ld, post_path};
use folio_generator::sitemap::render_xml;
use folio_generator::{generate_sitemap, generate_static_params, route_metadata};

const LIST_EXCERPT_CHARS: usize = 120;

pub async fn sitemap(sources: &Sources) -> Result<()> {
    let entries = generate_sitemap(&sources.site, &sources.client, Utc::now()).await;
    print!("{}", render_xml(&entries));
    Ok(())
}

pub async fn params(sources: &Sources) -> Result<()> {
    let params = generate_static_params(&sources.client).await;
    println!(
        "{}",
        serde_json::to_string_pretty(&params).context("Failed to serialize params")?
    );
    Ok(())
}

pub async fn meta(sources: &Sources, locale: Locale, path: &str, html: bool) -> Result<()> {
    let record = route_metadata(&sources.site, &sources.client, locale, path).await;
    if html {
        print!("{}", render_head(&record));
    } else {
        println!(
            "{}",
            serde_json::to_string_pretty(&record).context("Failed to serialize metadata")?
        );
    }
    Ok(())
}

/// Date of a post in the reader's locale, or the raw CMS value
fn display_date(post: &Post, locale: Locale) -> String {
    post.published_at()
        .map(|at| locale.format_date(at.date_naive()))
        .unwrap_or_else(|| post.date.clone())
}

pub async fn post(sources: &Sources, id: &str, locale: Locale, id_type: IdType) -> Result<()> {
    let Some(post) = sources.client.get_post(id, id_type).await else {
        anyhow::bail!("Post not found: {} ({})", id, id_type);
    };

    println!("{}", strip_html(&post.title));
    println!("  Published: {}", display_date(&post, locale));
    if let Some(author) = post.author_name() {
        println!("  Author: {}", author);
    }
    let tags = post.tag_names();
    if !tags.is_empty() {
        println!("  Tags: {}", tags.join(", "));
    }
    let id = post.database_id.to_string();
    println!(
        "  URL: {}",
        sources.site.site.canonical_url(locale, &post_path(&id))
    );
    println!();
    println!("{}", excerpt(post.content.as_deref(), LIST_EXCERPT_CHARS * 2));
    println!();

    let ld = blog_posting_json_ld(&sources.site, locale, &id, &post);
    println!("{}", render_json_ld(&ld));
    Ok(())
}

pub async fn posts(
    sources: &Sources,
    limit: u32,
    after: Option<&str>,
    locale: Locale,
) -> Result<()> {
    let page = sources.client.get_posts_page(limit, after).await;

    if page.posts.is_empty() {
        println!("No posts");
        return Ok(());
    }

    for post in &page.posts {
        println!(
            "{:>6}  {}  {}",
            post.database_id,
            display_date(post, locale),
            strip_html(&post.title)
        );
        let summary = excerpt(post.excerpt.as_deref(), LIST_EXCERPT_CHARS);
        if !summary.is_empty() {
            println!("        {}", summary);
        }
    }

    let info = &page.page_info;
    if let (true, Some(cursor)) = (info.has_next_page, &info.end_cursor) {
        println!("\nMore posts: folio posts --after {}", cursor);
    }
    Ok(())
}
