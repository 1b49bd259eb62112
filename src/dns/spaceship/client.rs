use hmac::{Hmac, Mac};
use reqwest::{Client, Method, RequestBuilder, Response};
use sha2::Sha256;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::dns::spaceship::error::SpaceshipError;
use crate::dns::spaceship::types::*;

/// `hex(HMAC-SHA256(secret, key ‖ timestamp))`
pub fn signature(api_key: &str, api_secret: &str, timestamp: u64) -> Result<String, SpaceshipError> {
    let mut mac = Hmac::<Sha256>::new_from_slice(api_secret.as_bytes())
        .map_err(|e| SpaceshipError::Signing(e.to_string()))?;
    mac.update(format!("{api_key}{timestamp}").as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

pub struct SpaceshipClient {
    client: Client,
    api_url: String,
    api_key: String,
    api_secret: String,
}

impl SpaceshipClient {
    pub fn new(api_url: &str, api_key: &str, api_secret: &str) -> Result<Self, SpaceshipError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            api_secret: api_secret.to_string(),
        })
    }

    fn signed(&self, method: Method, path: &str) -> Result<RequestBuilder, SpaceshipError> {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        let signature = signature(&self.api_key, &self.api_secret, timestamp)?;
        Ok(self
            .client
            .request(method, format!("{}{}", self.api_url, path))
            .header("X-Api-Key", &self.api_key)
            .header("X-Timestamp", timestamp.to_string())
            .header("X-Signature", signature))
    }

    async fn check(response: Response) -> Result<Response, SpaceshipError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        Err(SpaceshipError::Api {
            status: status.as_u16(),
            body: response.text().await.unwrap_or_default(),
        })
    }

    pub async fn domain_info(&self, domain: &str) -> Result<DomainInfo, SpaceshipError> {
        let response = self
            .signed(Method::GET, &format!("/domains/{domain}"))?
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn update_nameservers(
        &self,
        domain: &str,
        nameservers: &[String],
    ) -> Result<(), SpaceshipError> {
        let response = self
            .signed(Method::PUT, &format!("/domains/{domain}/nameservers"))?
            .json(&NameserverUpdate { nameservers })
            .send()
            .await?;
        Self::check(response).await.map(|_| ())
    }
}
