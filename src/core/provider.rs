use crate::core::record::{DNSRecord, DNSRecordType};
use crate::error::Error;
use async_trait::async_trait;

/// A record as reported by the provider, identified by the provider's own id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingRecord {
    pub id: String,
    pub record_type: DNSRecordType,
    pub name: String,
    pub content: String,
    pub proxied: Option<bool>,
    pub ttl: Option<u32>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DNSProvider: Send + Sync {
    fn name(&self) -> &str;
    async fn zone_id(&self, zone_name: &str) -> Result<Option<String>, Error>;
    async fn find_record(
        &self,
        zone_id: &str,
        record_type: DNSRecordType,
        fqdn: &str,
    ) -> Result<Option<ExistingRecord>, Error>;
    async fn create_record(&self, zone_id: &str, record: &DNSRecord) -> Result<(), Error>;
    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        record: &DNSRecord,
    ) -> Result<(), Error>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NameserverRegistrar: Send + Sync {
    fn name(&self) -> &str;
    async fn nameservers(&self, domain: &str) -> Result<Vec<String>, Error>;
    async fn set_nameservers(&self, domain: &str, nameservers: &[String]) -> Result<(), Error>;
}
