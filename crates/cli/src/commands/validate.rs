use super::Sources;
use folio_content::images::{image_allowlist, is_allowed_image};
use folio_content::posts::DEFAULT_POST_LIMIT;
use folio_core::{CmsConfig, Post};

/// Remote images of `posts` that the allowlist would refuse
///
/// Site-relative images are served locally and always pass.
pub fn disallowed_images(cms: &CmsConfig, posts: &[Post]) -> Vec<(i64, String)> {
    posts
        .iter()
        .flat_map(|post| {
            let featured = post.featured_image().map(|m| m.source_url.as_str());
            let share = post.share_image();
            featured
                .into_iter()
                .chain(share.filter(|s| Some(*s) != featured))
                .map(move |url| (post.database_id, url.to_string()))
        })
        .filter(|(_, url)| is_remote(url) && !is_allowed_image(cms, url))
        .collect()
}

fn is_remote(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

pub async fn run(sources: &Sources) -> anyhow::Result<()> {
    let site = &sources.site;
    println!("Validating folio configuration");
    println!("✓ Configuration valid");
    println!("  Site: {} ({})", site.site.name, site.site.url);
    println!("  CMS: {}", sources.origin);
    println!("  Revalidate: {}s", site.cms.revalidate.as_secs());

    println!("\nAllowed remote images:");
    for pattern in image_allowlist(&site.cms) {
        let port = pattern.port.map(|p| format!(":{}", p)).unwrap_or_default();
        println!(
            "  {}://{}{}{}",
            pattern.protocol, pattern.hostname, port, pattern.pathname
        );
    }

    let page = sources
        .client
        .try_posts_page(DEFAULT_POST_LIMIT, None)
        .await
        .map_err(|e| anyhow::anyhow!("CMS unavailable at {}: {}", sources.origin, e))?;
    println!("\n✓ CMS reachable, {} recent post(s)", page.posts.len());

    let problems = disallowed_images(&site.cms, &page.posts);
    if problems.is_empty() {
        println!("✓ All post images are allowed");
        return Ok(());
    }

    for (id, url) in &problems {
        println!("⚠ Post {}: image host not allowed: {}", id, url);
    }
    anyhow::bail!(
        "{} image(s) outside the allowlist\nHint: set WP_IMAGE_DOMAIN or [cms] image_domain",
        problems.len()
    )
}
