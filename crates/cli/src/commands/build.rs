use super::Sources;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use folio_core::Locale;
use folio_core::config::normalize_path;
use folio_generator::pages::static_paths;
use folio_generator::post::post_path;
use folio_generator::robots::render_robots;
use folio_generator::sitemap::render_xml;
use folio_generator::{
    LocalizedMetadata, base_metadata, generate_sitemap, generate_static_params, route_metadata,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// What a build wrote
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub sitemap_entries: usize,
    pub static_params: usize,
    pub metadata_files: usize,
}

/// `metadata/{locale}/{path}.json`, with the home page as `index.json`
fn metadata_file(output: &Path, locale: Locale, path: &str) -> PathBuf {
    let normalized = normalize_path(path);
    let relative = normalized.trim_start_matches('/');
    let stem = if relative.is_empty() { "index" } else { relative };
    output
        .join("metadata")
        .join(locale.code())
        .join(format!("{}.json", stem))
}

fn write_json<T: Serialize>(file: &Path, value: &T) -> Result<()> {
    if let Some(parent) = file.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;
    fs::write(file, json).with_context(|| format!("Failed to write {}", file.display()))
}

fn write_metadata(output: &Path, locale: Locale, path: &str, record: &LocalizedMetadata) -> Result<()> {
    write_json(&metadata_file(output, locale, path), record)
}

/// Generate every artifact into `output`
pub async fn build_site(sources: &Sources, output: &Path, now: DateTime<Utc>) -> Result<BuildReport> {
    let site = &sources.site;
    let client = &sources.client;
    let mut report = BuildReport::default();

    fs::create_dir_all(output).context("Failed to create output directory")?;

    println!("🗺  Generating sitemap...");
    let entries = generate_sitemap(site, client, now).await;
    fs::write(output.join("sitemap.xml"), render_xml(&entries))
        .context("Failed to write sitemap.xml")?;
    report.sitemap_entries = entries.len();
    println!("   ✓ sitemap.xml ({} URLs)", entries.len());

    fs::write(output.join("robots.txt"), render_robots(site))
        .context("Failed to write robots.txt")?;
    println!("   ✓ robots.txt");

    println!("📝 Collecting blog post routes...");
    let params = generate_static_params(client).await;
    write_json(&output.join("static-params.json"), &params)?;
    report.static_params = params.len();
    println!("   ✓ static-params.json ({} routes)", params.len());

    println!("🏷  Writing page metadata...");
    write_json(&output.join("metadata").join("site.json"), &base_metadata(site))?;
    report.metadata_files += 1;

    for locale in Locale::ALL {
        for path in static_paths() {
            let record = route_metadata(site, client, locale, path).await;
            write_metadata(output, locale, path, &record)?;
            report.metadata_files += 1;
        }
    }
    for param in &params {
        let path = post_path(&param.id);
        let record = route_metadata(site, client, param.locale, &path).await;
        write_metadata(output, param.locale, &path, &record)?;
        report.metadata_files += 1;
    }
    println!("   ✓ {} metadata files", report.metadata_files);

    Ok(report)
}

pub async fn run(sources: &Sources, output: &Path) -> Result<()> {
    println!("🔨 Building site artifacts...");
    println!("   Site: {}", sources.site.site.url);
    println!("   CMS: {}", sources.origin);
    println!("   Output: {}", output.display());
    println!();

    let report = build_site(sources, output, Utc::now()).await?;

    println!();
    println!(
        "✅ Build complete: {} sitemap URLs, {} post routes, {} metadata files",
        report.sitemap_entries, report.static_params, report.metadata_files
    );
    println!("   {}", output.display());
    Ok(())
}
