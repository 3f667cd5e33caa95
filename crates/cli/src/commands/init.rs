use anyhow::{Context, Result};
use folio_core::config::{
    CONFIG_FILE, DEFAULT_AUTHOR, DEFAULT_DESCRIPTION, DEFAULT_GRAPHQL_URL, DEFAULT_IMAGE,
    DEFAULT_REVALIDATE_SECS, DEFAULT_SITE_NAME, DEFAULT_SITE_URL, parse_config_str,
};
use std::fs;
use std::path::Path;

/// Escape a string for a TOML basic string
///
/// The template keeps its comments, so it is formatted by hand rather than
/// serialized with the toml crate.
fn toml_escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\x08', "\\b")
        .replace('\x0C', "\\f")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

fn config_template(url: &str, name: &str) -> String {
    format!(
        r#"# folio configuration. Every key is optional.

[site]
url = "{url}"
name = "{name}"
description = "{description}"
author = "{author}"
# keywords = ["frontend", "portfolio"]
default_image = "{image}"

[twitter]
# site = "@haeun"
# handle = "@haeun"
card = "summary_large_image"

[cms]
# WP_GRAPHQL_URL overrides this
graphql_url = "{graphql_url}"
# WP_IMAGE_DOMAIN overrides this
# image_domain = "cms.example.com"
revalidate_secs = {revalidate}
"#,
        url = toml_escape_string(url),
        name = toml_escape_string(name),
        description = toml_escape_string(DEFAULT_DESCRIPTION),
        author = toml_escape_string(DEFAULT_AUTHOR),
        image = DEFAULT_IMAGE,
        graphql_url = DEFAULT_GRAPHQL_URL,
        revalidate = DEFAULT_REVALIDATE_SECS,
    )
}

/// Write a starter `folio.toml` into `path`
pub fn run(path: &Path, url: Option<&str>, name: Option<&str>) -> Result<()> {
    println!("Initializing folio config in: {}", path.display());

    if !path.is_dir() {
        anyhow::bail!(
            "Directory '{}' does not exist. Create it first: mkdir {}",
            path.display(),
            path.display()
        );
    }

    let config_path = path.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!(
            "{} already exists at {}\nHint: Delete it first or use a different directory",
            CONFIG_FILE,
            config_path.display()
        );
    }

    let content = config_template(
        url.unwrap_or(DEFAULT_SITE_URL),
        name.unwrap_or(DEFAULT_SITE_NAME),
    );
    parse_config_str(&content).context("Invalid site settings")?;
    fs::write(&config_path, content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("✓ Created {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Point [cms] graphql_url (or WP_GRAPHQL_URL) at your WordPress GraphQL endpoint");
    println!("  2. Run: folio validate");
    println!("  3. Run: folio build --output dist");

    Ok(())
}
