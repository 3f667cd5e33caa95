pub mod build;
pub mod init;
pub mod inspect;
pub mod preview;
pub mod validate;

use anyhow::{Context, Result};
use folio_content::{ContentClient, FixtureTransport};
use folio_core::{SiteConfig, load_config};
use std::path::Path;

/// Configuration plus the content client every command works from
#[derive(Clone)]
pub struct Sources {
    pub site: SiteConfig,
    pub client: ContentClient,
    /// Where posts come from, for progress output
    pub origin: String,
}

impl Sources {
    pub fn load(config: Option<&Path>, fixture: Option<&Path>) -> Result<Self> {
        let site = load_config(config).context("Failed to load configuration")?;

        match fixture {
            Some(path) => {
                let transport = FixtureTransport::load(path)
                    .with_context(|| format!("Failed to load fixture {}", path.display()))?;
                Ok(Self::with_client(
                    site,
                    ContentClient::new(transport),
                    format!("fixture {}", path.display()),
                ))
            }
            None => {
                let client = ContentClient::from_config(&site.cms)
                    .context("Failed to create GraphQL client")?;
                let origin = site.cms.graphql_url.clone();
                Ok(Self::with_client(site, client, origin))
            }
        }
    }

    pub fn with_client(site: SiteConfig, client: ContentClient, origin: String) -> Self {
        Self {
            site,
            client,
            origin,
        }
    }
}
