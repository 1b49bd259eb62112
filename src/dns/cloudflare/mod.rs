//! Cloudflare DNS provider

pub mod client;
pub mod error;
pub mod types;

pub use client::CloudflareClient;

use async_trait::async_trait;
use tracing::info;

use crate::config::CloudflareConfig;
use crate::core::provider::{DNSProvider, ExistingRecord};
use crate::core::record::{DNSRecord, DNSRecordType, ZoneRecords};
use crate::dns::reconcile::{ReconcileReport, reconcile_zones};
use crate::error::{Error, require};
use error::map_error;
use types::{to_existing_record, to_record_request};

#[async_trait]
impl DNSProvider for CloudflareClient {
    fn name(&self) -> &str {
        "cloudflare"
    }

    async fn zone_id(&self, zone_name: &str) -> Result<Option<String>, Error> {
        let zones = self.list_zones(zone_name).await.map_err(map_error)?;
        let wanted = zone_name.trim_end_matches('.');
        Ok(zones
            .into_iter()
            .find(|z| z.name.eq_ignore_ascii_case(wanted))
            .map(|z| z.id))
    }

    async fn find_record(
        &self,
        zone_id: &str,
        record_type: DNSRecordType,
        fqdn: &str,
    ) -> Result<Option<ExistingRecord>, Error> {
        let records = self
            .list_dns_records(zone_id, record_type.as_str(), fqdn)
            .await
            .map_err(map_error)?;
        Ok(records.iter().find_map(to_existing_record))
    }

    async fn create_record(&self, zone_id: &str, record: &DNSRecord) -> Result<(), Error> {
        self.create_dns_record(zone_id, &to_record_request(record))
            .await
            .map(|_| ())
            .map_err(map_error)
    }

    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        record: &DNSRecord,
    ) -> Result<(), Error> {
        self.update_dns_record(zone_id, record_id, &to_record_request(record))
            .await
            .map(|_| ())
            .map_err(map_error)
    }
}

/// Creates or updates every declared record, in order.
pub async fn sync_records(
    config: &CloudflareConfig,
    zones: &[ZoneRecords],
) -> Result<ReconcileReport, Error> {
    info!("🔷 Cloudflare DNS Management");
    let api_key = require(&config.api_key, "CLOUDFLARE_GLOBAL_API_KEY")?;
    let email = require(&config.email, "CLOUDFLARE_EMAIL")?;
    let client = CloudflareClient::new(&config.api_url, email, api_key).map_err(map_error)?;

    let report = reconcile_zones(&client, zones).await;
    info!(
        "DNS Records: {}/{} successful",
        report.succeeded(),
        report.total()
    );
    Ok(report)
}
