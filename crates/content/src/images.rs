use folio_core::CmsConfig;
use reqwest::Url;

/// Remote image source the page framework is allowed to optimize
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePattern {
    pub protocol: &'static str,
    /// Exact host, or `**.` followed by a suffix to allow any subdomain
    pub hostname: String,
    pub port: Option<u16>,
    /// Path prefix; a trailing `/**` allows everything below it
    pub pathname: &'static str,
}

impl RemotePattern {
    pub fn matches(&self, url: &Url) -> bool {
        if url.scheme() != self.protocol || url.port() != self.port {
            return false;
        }

        let Some(host) = url.host_str() else {
            return false;
        };
        let host_ok = match self.hostname.strip_prefix("**.") {
            Some(suffix) => host.len() > suffix.len() && host.ends_with(&format!(".{}", suffix)),
            None => host.eq_ignore_ascii_case(&self.hostname),
        };

        let prefix = self.pathname.trim_end_matches("**");
        host_ok && url.path().starts_with(prefix)
    }
}

/// Allowed image sources: the local CMS, wordpress.com, and the configured
/// image domain
pub fn image_allowlist(config: &CmsConfig) -> Vec<RemotePattern> {
    let mut patterns = vec![
        RemotePattern {
            protocol: "http",
            hostname: "localhost".to_string(),
            port: Some(8000),
            pathname: "/wp-content/**",
        },
        RemotePattern {
            protocol: "https",
            hostname: "**.wordpress.com".to_string(),
            port: None,
            pathname: "/wp-content/**",
        },
    ];
    if let Some(domain) = &config.image_domain {
        patterns.push(RemotePattern {
            protocol: "https",
            hostname: domain.clone(),
            port: None,
            pathname: "/wp-content/**",
        });
    }
    patterns
}

/// Whether an absolute image URL is covered by the allowlist
pub fn is_allowed_image(config: &CmsConfig, url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => image_allowlist(config).iter().any(|p| p.matches(&parsed)),
        Err(_) => false,
    }
}
