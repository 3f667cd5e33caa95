use folio_core::SiteConfig;

/// `robots.txt` allowing every crawler and pointing at the sitemap
pub fn render_robots(site: &SiteConfig) -> String {
    format!(
        "User-agent: *\nAllow: /\n\nSitemap: {}\n",
        site.site.absolute_url("/sitemap.xml")
    )
}
