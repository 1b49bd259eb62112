use serde::{Deserialize, Serialize};

/// Cloudflare v4 response envelope.
#[derive(Deserialize, Debug)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<ApiMessage>,
    pub result: Option<T>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ApiMessage {
    pub code: i64,
    pub message: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Zone {
    pub id: String,
    pub name: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CloudflareRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub content: String,
    pub proxied: Option<bool>,
    pub ttl: Option<u32>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RecordRequest {
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub content: String,
    pub proxied: bool,
    pub ttl: u32,
}

use crate::core::provider::ExistingRecord;
use crate::core::record::{DNSRecord, DNSRecordType};

pub fn to_record_request(rec: &DNSRecord) -> RecordRequest {
    RecordRequest {
        record_type: rec.record_type.as_str().to_string(),
        name: rec.fqdn(),
        content: rec.content.clone(),
        proxied: rec.proxied,
        ttl: rec.ttl,
    }
}

pub fn to_existing_record(cr: &CloudflareRecord) -> Option<ExistingRecord> {
    let record_type = match cr.record_type.as_str() {
        "A" => DNSRecordType::A,
        "AAAA" => DNSRecordType::AAAA,
        "CNAME" => DNSRecordType::CNAME,
        "TXT" => DNSRecordType::TXT,
        _ => return None,
    };
    Some(ExistingRecord {
        id: cr.id.clone(),
        record_type,
        name: cr.name.clone(),
        content: cr.content.clone(),
        proxied: cr.proxied,
        ttl: cr.ttl,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_request_uses_fqdn() {
        let record = DNSRecord {
            zone_name: "oriz.in".into(),
            record_type: DNSRecordType::CNAME,
            name: "img".into(),
            content: "pixel-os.pages.dev".into(),
            proxied: true,
            ttl: 1,
        };
        let body = serde_json::to_value(to_record_request(&record)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "type": "CNAME",
                "name": "img.oriz.in",
                "content": "pixel-os.pages.dev",
                "proxied": true,
                "ttl": 1
            })
        );
    }

    #[test]
    fn test_existing_record_keeps_proxied_and_ttl() {
        let cr: CloudflareRecord = serde_json::from_value(serde_json::json!({
            "id": "rec-9", "type": "CNAME", "name": "img.oriz.in",
            "content": "pixel-os.pages.dev", "proxied": true, "ttl": 1
        }))
        .unwrap();
        let existing = to_existing_record(&cr).unwrap();
        assert_eq!(existing.id, "rec-9");
        assert_eq!(existing.record_type, DNSRecordType::CNAME);
        assert_eq!(existing.proxied, Some(true));
        assert_eq!(existing.ttl, Some(1));
    }

    #[test]
    fn test_unknown_record_type_is_skipped() {
        let cr = CloudflareRecord {
            id: "r1".into(),
            record_type: "MX".into(),
            name: "oriz.in".into(),
            content: "mail.oriz.in".into(),
            proxied: None,
            ttl: Some(300),
        };
        assert!(to_existing_record(&cr).is_none());
    }
}
