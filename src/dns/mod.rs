pub mod cloudflare;
pub mod reconcile;
pub mod spaceship;

use std::fs;

use tracing::debug;

use crate::config::CloudflareConfig;
use crate::core::record::{ZoneRecords, default_zones};
use crate::error::Error;

/// Reads the declared zones from `CLOUDFLARE_DNS_RECORDS`, or the built-in set.
pub fn load_zones(config: &CloudflareConfig) -> Result<Vec<ZoneRecords>, Error> {
    let Some(path) = &config.dns_records_file else {
        return Ok(default_zones());
    };
    debug!("Loading DNS records from {}", path.display());
    let raw = fs::read_to_string(path).map_err(|e| {
        Error::InvalidInput(format!("Cannot read records file {}: {e}", path.display()))
    })?;
    let zones: Vec<ZoneRecords> = serde_json::from_str(&raw).map_err(|e| {
        Error::InvalidInput(format!("Malformed records file {}: {e}", path.display()))
    })?;
    validate(&zones)?;
    Ok(zones)
}

// Use "@" for the zone apex; an empty name would become ".zone"
fn validate(zones: &[ZoneRecords]) -> Result<(), Error> {
    for zone in zones {
        if zone.zone_name.trim().is_empty() {
            return Err(Error::InvalidInput("Zone with an empty zone_name".to_string()));
        }
        if let Some(spec) = zone.records.iter().find(|r| r.name.trim().is_empty()) {
            return Err(Error::InvalidInput(format!(
                "{} record in {} has an empty name",
                spec.record_type, zone.zone_name
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::mock::config_with;
    use crate::core::record::DNSRecordType;
    use assert_matches::assert_matches;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let config = config_with(&[]);
        assert_eq!(load_zones(&config.cloudflare).unwrap(), default_zones());
    }

    #[test]
    fn test_reads_records_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"zone_name": "example.com", "records": [
                {{"type": "A", "name": "@", "content": "192.0.2.10", "ttl": 300}},
                {{"type": "TXT", "name": "_verify", "content": "token"}}
            ]}}]"#
        )
        .unwrap();
        let path = file.path().to_string_lossy().to_string();
        let config = config_with(&[("CLOUDFLARE_DNS_RECORDS", path.as_str())]);

        let zones = load_zones(&config.cloudflare).unwrap();
        assert_eq!(zones.len(), 1);
        let records = zones[0].records();
        assert_eq!(records[0].record_type, DNSRecordType::A);
        assert_eq!(records[0].fqdn(), "example.com");
        assert_eq!(records[0].ttl, 300);
        assert_eq!(records[1].ttl, 1);
        assert!(!records[1].proxied);
    }

    #[test]
    fn test_bad_file_is_invalid_input() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let path = file.path().to_string_lossy().to_string();
        let config = config_with(&[("CLOUDFLARE_DNS_RECORDS", path.as_str())]);
        assert_matches!(load_zones(&config.cloudflare), Err(Error::InvalidInput(_)));

        let config = config_with(&[("CLOUDFLARE_DNS_RECORDS", "/nonexistent/records.json")]);
        assert_matches!(load_zones(&config.cloudflare), Err(Error::InvalidInput(_)));
    }

    #[test]
    fn test_empty_names_are_rejected() {
        for body in [
            r#"[{"zone_name": "oriz.in", "records": [{"type": "CNAME", "name": "", "content": "pixel-os.pages.dev"}]}]"#,
            r#"[{"zone_name": "oriz.in", "records": [{"type": "A", "name": "  ", "content": "192.0.2.1"}]}]"#,
            r#"[{"zone_name": "", "records": []}]"#,
        ] {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            write!(file, "{body}").unwrap();
            let path = file.path().to_string_lossy().to_string();
            let config = config_with(&[("CLOUDFLARE_DNS_RECORDS", path.as_str())]);
            assert_matches!(
                load_zones(&config.cloudflare),
                Err(Error::InvalidInput(msg)) if msg.contains("empty"),
                "{body}"
            );
        }
    }
}
