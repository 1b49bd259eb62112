use std::collections::HashSet;
use tracing::{debug, error, info, warn};

use crate::core::provider::DNSProvider;
use crate::core::record::{DNSRecord, ZoneRecords};
use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordAction {
    Created,
    Updated,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReconcileReport {
    pub created: usize,
    pub updated: usize,
    /// Fully qualified names of the records that could not be applied.
    pub failed: Vec<String>,
    pub missing_zones: Vec<String>,
}

impl ReconcileReport {
    pub fn succeeded(&self) -> usize {
        self.created + self.updated
    }

    pub fn total(&self) -> usize {
        self.succeeded() + self.failed.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty() && self.missing_zones.is_empty()
    }
}

/// Updates the record with the same type and name when one exists, creates it
/// otherwise. Existing content, ttl and proxied flag are overwritten as-is.
pub async fn reconcile_record(
    provider: &dyn DNSProvider,
    zone_id: &str,
    record: &DNSRecord,
) -> Result<RecordAction, Error> {
    let fqdn = record.fqdn();
    match provider
        .find_record(zone_id, record.record_type, &fqdn)
        .await?
    {
        Some(existing) => {
            debug!(
                "Existing {} {} -> {} (id {}, proxied {:?}, ttl {:?})",
                existing.record_type,
                existing.name,
                existing.content,
                existing.id,
                existing.proxied,
                existing.ttl
            );
            provider.update_record(zone_id, &existing.id, record).await?;
            Ok(RecordAction::Updated)
        }
        None => {
            provider.create_record(zone_id, record).await?;
            Ok(RecordAction::Created)
        }
    }
}

pub async fn reconcile_zones(provider: &dyn DNSProvider, zones: &[ZoneRecords]) -> ReconcileReport {
    let mut report = ReconcileReport::default();
    let mut seen = HashSet::new();
    debug!("Reconciling {} zone(s) with {}", zones.len(), provider.name());

    for zone in zones {
        info!("📍 Zone: {}", zone.zone_name);
        let records = zone.records();

        let zone_id = match provider.zone_id(&zone.zone_name).await {
            Ok(Some(id)) => id,
            Ok(None) => {
                error!("  ❌ Zone not found: {}", zone.zone_name);
                report.missing_zones.push(zone.zone_name.clone());
                report.failed.extend(records.iter().map(DNSRecord::fqdn));
                continue;
            }
            Err(e) => {
                error!("  ❌ Zone lookup failed for {}: {e}", zone.zone_name);
                report.missing_zones.push(zone.zone_name.clone());
                report.failed.extend(records.iter().map(DNSRecord::fqdn));
                continue;
            }
        };

        for record in &records {
            if !seen.insert(record.key()) {
                warn!(
                    "  ⚠️ Duplicate declaration skipped: {} {}",
                    record.record_type,
                    record.fqdn()
                );
                continue;
            }
            match reconcile_record(provider, &zone_id, record).await {
                Ok(action) => {
                    match action {
                        RecordAction::Created => report.created += 1,
                        RecordAction::Updated => report.updated += 1,
                    }
                    info!(
                        "  ✅ {:?}: {} {} -> {}",
                        action,
                        record.record_type,
                        record.fqdn(),
                        record.content
                    );
                }
                Err(e) => {
                    error!("  ❌ Failed: {} {}: {e}", record.record_type, record.fqdn());
                    report.failed.push(record.fqdn());
                }
            }
        }
    }
    report
}
