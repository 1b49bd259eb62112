use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::dns::cloudflare::error::CloudflareError;
use crate::dns::cloudflare::types::*;

pub struct CloudflareClient {
    client: Client,
    api_url: String,
    email: String,
    api_key: String,
}

impl CloudflareClient {
    pub fn new(api_url: &str, email: &str, api_key: &str) -> Result<Self, CloudflareError> {
        if email.is_empty() || api_key.is_empty() {
            return Err(CloudflareError::Credential(
                "CLOUDFLARE_EMAIL and CLOUDFLARE_GLOBAL_API_KEY are required".to_string(),
            ));
        }
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            email: email.to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.api_url, path))
            .header("X-Auth-Email", &self.email)
            .header("X-Auth-Key", &self.api_key)
    }

    async fn handle_request<T>(&self, request: RequestBuilder) -> Result<T, CloudflareError>
    where
        T: DeserializeOwned,
    {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        let envelope: ApiResponse<T> = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(CloudflareError::Api {
                    status: status.as_u16(),
                    errors: Vec::new(),
                });
            }
            Err(e) => return Err(CloudflareError::Malformed(e.to_string())),
        };

        if !status.is_success() || !envelope.success {
            return Err(CloudflareError::Api {
                status: status.as_u16(),
                errors: envelope.errors,
            });
        }
        envelope
            .result
            .ok_or_else(|| CloudflareError::Malformed("response has no result".to_string()))
    }

    pub async fn list_zones(&self, name: &str) -> Result<Vec<Zone>, CloudflareError> {
        self.handle_request(self.request(Method::GET, "/zones").query(&[("name", name)]))
            .await
    }

    pub async fn list_dns_records(
        &self,
        zone_id: &str,
        record_type: &str,
        name: &str,
    ) -> Result<Vec<CloudflareRecord>, CloudflareError> {
        let path = format!("/zones/{zone_id}/dns_records");
        self.handle_request(
            self.request(Method::GET, &path)
                .query(&[("type", record_type), ("name", name)]),
        )
        .await
    }

    pub async fn create_dns_record(
        &self,
        zone_id: &str,
        req: &RecordRequest,
    ) -> Result<CloudflareRecord, CloudflareError> {
        let path = format!("/zones/{zone_id}/dns_records");
        self.handle_request(self.request(Method::POST, &path).json(req))
            .await
    }

    pub async fn update_dns_record(
        &self,
        zone_id: &str,
        record_id: &str,
        req: &RecordRequest,
    ) -> Result<CloudflareRecord, CloudflareError> {
        let path = format!("/zones/{zone_id}/dns_records/{record_id}");
        self.handle_request(self.request(Method::PUT, &path).json(req))
            .await
    }
}
