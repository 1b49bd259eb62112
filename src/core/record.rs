use serde::{Deserialize, Serialize};

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DNSRecordType {
    A,
    AAAA,
    CNAME,
    TXT,
}

impl DNSRecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DNSRecordType::A => "A",
            DNSRecordType::AAAA => "AAAA",
            DNSRecordType::CNAME => "CNAME",
            DNSRecordType::TXT => "TXT",
        }
    }
}

impl std::fmt::Display for DNSRecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DNSRecord {
    pub zone_name: String,
    pub record_type: DNSRecordType,
    pub name: String,
    pub content: String,
    pub proxied: bool,
    pub ttl: u32,
}

impl DNSRecord {
    /// Fully qualified record name. `@` is the zone apex.
    pub fn fqdn(&self) -> String {
        let name = self.name.trim_end_matches('.');
        let zone = self.zone_name.trim_end_matches('.');
        if name == "@" || name.eq_ignore_ascii_case(zone) {
            zone.to_string()
        } else if name
            .to_ascii_lowercase()
            .ends_with(&format!(".{}", zone.to_ascii_lowercase()))
        {
            name.to_string()
        } else {
            format!("{name}.{zone}")
        }
    }

    /// (zone, type, fqdn) decides create vs update.
    pub fn key(&self) -> (String, DNSRecordType, String) {
        (
            self.zone_name.to_ascii_lowercase(),
            self.record_type,
            self.fqdn().to_ascii_lowercase(),
        )
    }
}

/// A record as declared in configuration, before it is bound to a zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSpec {
    #[serde(rename = "type")]
    pub record_type: DNSRecordType,
    pub name: String,
    pub content: String,
    #[serde(default)]
    pub proxied: bool,
    #[serde(default = "auto_ttl")]
    pub ttl: u32,
}

// Cloudflare treats a TTL of 1 as "automatic"
fn auto_ttl() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRecords {
    pub zone_name: String,
    pub records: Vec<RecordSpec>,
}

impl ZoneRecords {
    pub fn records(&self) -> Vec<DNSRecord> {
        self.records
            .iter()
            .map(|spec| DNSRecord {
                zone_name: self.zone_name.clone(),
                record_type: spec.record_type,
                name: spec.name.clone(),
                content: spec.content.clone(),
                proxied: spec.proxied,
                ttl: spec.ttl,
            })
            .collect()
    }
}

/// Records managed when no records file is configured.
pub fn default_zones() -> Vec<ZoneRecords> {
    vec![ZoneRecords {
        zone_name: "oriz.in".to_string(),
        records: vec![RecordSpec {
            record_type: DNSRecordType::CNAME,
            name: "img".to_string(),
            content: "pixel-os.pages.dev".to_string(),
            proxied: true,
            ttl: auto_ttl(),
        }],
    }]
}
