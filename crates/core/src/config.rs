use crate::error::{Error, Result};
use crate::locale::Locale;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// File looked up in the working directory when no config path is given
pub const CONFIG_FILE: &str = "folio.toml";

pub const DEFAULT_SITE_URL: &str = "https://haeun.dev";
pub const DEFAULT_SITE_NAME: &str = "Haeun Portfolio";
pub const DEFAULT_DESCRIPTION: &str =
    "Frontend developer Haeun Park's portfolio across resume, projects, contact, and blog.";
pub const DEFAULT_AUTHOR: &str = "Haeun Park";
pub const DEFAULT_IMAGE: &str = "/og-image.jpg";
pub const DEFAULT_GRAPHQL_URL: &str = "http://localhost:8000/graphql";
pub const DEFAULT_REVALIDATE_SECS: u64 = 60;

/// Environment variable overriding `cms.graphql_url`
pub const ENV_GRAPHQL_URL: &str = "WP_GRAPHQL_URL";
/// Environment variable overriding `cms.image_domain`
pub const ENV_IMAGE_DOMAIN: &str = "WP_IMAGE_DOMAIN";

/// Complete site configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SiteConfig {
    pub site: SiteSettings,
    pub twitter: TwitterSettings,
    pub cms: CmsConfig,
}

/// Public identity of the site, used for canonical URLs and metadata defaults
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteSettings {
    /// Origin without a trailing slash, e.g. `https://haeun.dev`
    pub url: String,
    pub name: String,
    pub description: String,
    pub author: String,
    pub keywords: Vec<String>,
    /// Default share image; relative paths are resolved against `url`
    pub default_image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TwitterSettings {
    pub site: String,
    pub handle: String,
    pub card: String,
}

/// Where and how content is fetched
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CmsConfig {
    pub graphql_url: String,
    /// Extra host allowed to serve remote images
    pub image_domain: Option<String>,
    /// How long a fetched result may be served before re-fetching
    pub revalidate: Duration,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_SITE_URL.to_string(),
            name: DEFAULT_SITE_NAME.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            author: DEFAULT_AUTHOR.to_string(),
            keywords: ["portfolio", "frontend", "resume", "projects", "blog", "contact"]
                .into_iter()
                .map(String::from)
                .collect(),
            default_image: DEFAULT_IMAGE.to_string(),
        }
    }
}

impl Default for TwitterSettings {
    fn default() -> Self {
        Self {
            site: "@haeun".to_string(),
            handle: "@haeun".to_string(),
            card: "summary_large_image".to_string(),
        }
    }
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self::new(DEFAULT_GRAPHQL_URL)
    }
}

impl CmsConfig {
    pub fn new(graphql_url: impl Into<String>) -> Self {
        Self {
            graphql_url: graphql_url.into(),
            image_domain: None,
            revalidate: Duration::from_secs(DEFAULT_REVALIDATE_SECS),
        }
    }
}

impl SiteSettings {
    /// `{url}/{locale}{path}`
    pub fn canonical_url(&self, locale: Locale, path: &str) -> String {
        format!("{}/{}{}", self.url, locale.code(), normalize_path(path))
    }

    /// The same logical path under every supported locale
    ///
    /// Depends only on `path` and the locale set, not on whether content
    /// exists in a given locale.
    pub fn language_alternates(&self, path: &str) -> BTreeMap<Locale, String> {
        Locale::ALL
            .into_iter()
            .map(|locale| (locale, self.canonical_url(locale, path)))
            .collect()
    }

    /// Resolve a site-relative path (or pass through an absolute URL)
    pub fn absolute_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.url, normalize_path(path))
        }
    }

    pub fn default_image_url(&self) -> String {
        self.absolute_url(&self.default_image)
    }
}

/// Ensure a non-empty route path starts with a single `/` and has no trailing one
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

/// Raw TOML configuration structure
/// Every key is optional; missing keys take the built-in defaults
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    site: RawSite,
    twitter: RawTwitter,
    cms: RawCms,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawSite {
    url: Option<String>,
    name: Option<String>,
    description: Option<String>,
    author: Option<String>,
    keywords: Option<Vec<String>>,
    default_image: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawTwitter {
    site: Option<String>,
    handle: Option<String>,
    card: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawCms {
    graphql_url: Option<String>,
    image_domain: Option<String>,
    revalidate_secs: Option<u64>,
}

/// Load configuration and apply environment overrides
///
/// With `path == None`, `folio.toml` in the working directory is used when it
/// exists and built-in defaults otherwise. An explicit path must exist.
pub fn load_config(path: Option<&Path>) -> Result<SiteConfig> {
    let mut config = match path {
        Some(path) => parse_config_file(path)?,
        None if Path::new(CONFIG_FILE).exists() => parse_config_file(Path::new(CONFIG_FILE))?,
        None => SiteConfig::default(),
    };
    config.apply_env_overrides(|key| std::env::var(key).ok())?;
    Ok(config)
}

/// Parse a config file without looking at the environment
pub fn parse_config_file<P: AsRef<Path>>(path: P) -> Result<SiteConfig> {
    let content = fs::read_to_string(path)?;
    parse_config_str(&content)
}

/// Parse config from a string (useful for testing)
pub fn parse_config_str(content: &str) -> Result<SiteConfig> {
    let raw: RawConfig = toml::from_str(content)?;
    let defaults = SiteConfig::default();

    let site = SiteSettings {
        url: match raw.site.url {
            Some(url) => validate_url(&url, "site.url")?,
            None => defaults.site.url,
        },
        name: raw.site.name.unwrap_or(defaults.site.name),
        description: raw.site.description.unwrap_or(defaults.site.description),
        author: raw.site.author.unwrap_or(defaults.site.author),
        keywords: raw.site.keywords.unwrap_or(defaults.site.keywords),
        default_image: raw.site.default_image.unwrap_or(defaults.site.default_image),
    };

    let twitter = TwitterSettings {
        site: raw.twitter.site.unwrap_or(defaults.twitter.site),
        handle: raw.twitter.handle.unwrap_or(defaults.twitter.handle),
        card: raw.twitter.card.unwrap_or(defaults.twitter.card),
    };

    let revalidate_secs = raw.cms.revalidate_secs.unwrap_or(DEFAULT_REVALIDATE_SECS);
    if revalidate_secs == 0 {
        return Err(Error::ConfigParse(
            "cms.revalidate_secs must be greater than zero".to_string(),
        ));
    }

    let cms = CmsConfig {
        graphql_url: match raw.cms.graphql_url {
            Some(url) => validate_url(&url, "cms.graphql_url")?,
            None => defaults.cms.graphql_url,
        },
        image_domain: raw.cms.image_domain.filter(|d| !d.trim().is_empty()),
        revalidate: Duration::from_secs(revalidate_secs),
    };

    Ok(SiteConfig { site, twitter, cms })
}

impl SiteConfig {
    /// Apply `WP_GRAPHQL_URL` / `WP_IMAGE_DOMAIN`; empty values are ignored
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_GRAPHQL_URL).filter(|v| !v.trim().is_empty()) {
            self.cms.graphql_url = validate_url(&url, ENV_GRAPHQL_URL)?;
        }
        if let Some(domain) = lookup(ENV_IMAGE_DOMAIN).filter(|v| !v.trim().is_empty()) {
            self.cms.image_domain = Some(domain.trim().to_string());
        }
        Ok(())
    }
}

/// Require an http(s) URL and drop any trailing slash
fn validate_url(value: &str, field_name: &str) -> Result<String> {
    let value = value.trim();
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(Error::ConfigParse(format!(
            "'{}' must be an http:// or https:// URL, got '{}'",
            field_name, value
        )));
    }
    Ok(value.trim_end_matches('/').to_string())
}
