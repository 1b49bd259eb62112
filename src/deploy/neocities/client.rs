use reqwest::Client;
use reqwest::multipart::{Form, Part};
use std::path::Path;
use std::time::Duration;

use crate::deploy::neocities::error::NeocitiesError;
use crate::deploy::neocities::types::NeocitiesResponse;

pub struct NeocitiesClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl NeocitiesClient {
    /// `timeout` bounds each upload request.
    pub fn new(api_url: &str, api_key: &str, timeout: Duration) -> Result<Self, NeocitiesError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Uploads one file; the multipart field name is its path on the site.
    pub async fn upload_file(&self, local: &Path, remote: &str) -> Result<(), NeocitiesError> {
        let bytes = tokio::fs::read(local).await?;
        let part = Part::bytes(bytes).file_name(remote.to_string());
        let form = Form::new().part(remote.to_string(), part);

        let response = self
            .client
            .post(format!("{}/upload", self.api_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let parsed = serde_json::from_str::<NeocitiesResponse>(&body).ok();

        if !status.is_success() {
            return Err(NeocitiesError::Rejected {
                status: status.as_u16(),
                message: parsed.map_or(body, |r| r.describe()),
            });
        }
        match parsed {
            Some(r) if !r.is_success() => Err(NeocitiesError::Rejected {
                status: status.as_u16(),
                message: r.describe(),
            }),
            _ => Ok(()),
        }
    }
}
