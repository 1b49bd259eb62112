//! Spaceship registrar nameserver management

pub mod client;
pub mod error;
pub mod types;

pub use client::SpaceshipClient;

use async_trait::async_trait;
use tracing::info;

use crate::config::SpaceshipConfig;
use crate::core::provider::NameserverRegistrar;
use crate::error::{Error, require};
use error::map_error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameserverAction {
    AlreadyConfigured,
    Updated,
}

#[async_trait]
impl NameserverRegistrar for SpaceshipClient {
    fn name(&self) -> &str {
        "spaceship"
    }

    async fn nameservers(&self, domain: &str) -> Result<Vec<String>, Error> {
        let info = self.domain_info(domain).await.map_err(map_error)?;
        Ok(info.nameservers.into_hosts())
    }

    async fn set_nameservers(&self, domain: &str, nameservers: &[String]) -> Result<(), Error> {
        self.update_nameservers(domain, nameservers)
            .await
            .map_err(map_error)
    }
}

fn normalize(host: &str) -> String {
    host.trim().trim_end_matches('.').to_ascii_lowercase()
}

/// Set equality, ignoring order, case and a trailing root dot.
pub fn same_nameservers(current: &[String], target: &[String]) -> bool {
    let mut a: Vec<String> = current.iter().map(|h| normalize(h)).collect();
    let mut b: Vec<String> = target.iter().map(|h| normalize(h)).collect();
    a.sort();
    a.dedup();
    b.sort();
    b.dedup();
    a == b
}

pub async fn reconcile_nameservers(
    registrar: &dyn NameserverRegistrar,
    domain: &str,
    target: &[String],
) -> Result<NameserverAction, Error> {
    if target.is_empty() {
        return Err(Error::InvalidInput(
            "No target nameservers configured".to_string(),
        ));
    }

    let current = registrar.nameservers(domain).await?;
    info!("Current nameservers for {domain}: {}", current.join(", "));

    if same_nameservers(&current, target) {
        info!("✅ Nameservers already configured");
        return Ok(NameserverAction::AlreadyConfigured);
    }

    info!("Updating nameservers to: {}", target.join(", "));
    registrar.set_nameservers(domain, target).await?;
    info!("✅ Nameservers updated via {}", registrar.name());
    Ok(NameserverAction::Updated)
}

pub async fn sync_nameservers(config: &SpaceshipConfig) -> Result<NameserverAction, Error> {
    info!("🚀 Spaceship Nameserver Management");
    let api_key = require(&config.api_key, "SPACESHIP_API_KEY")?;
    let api_secret = require(&config.api_secret, "SPACESHIP_API_SECRET")?;
    let client = SpaceshipClient::new(&config.api_url, api_key, api_secret).map_err(map_error)?;
    reconcile_nameservers(&client, &config.domain, &config.nameservers).await
}
