use serde::{Deserialize, Serialize};

/// Spaceship reports nameservers either as a bare list or as
/// `{"provider": "custom", "hosts": [...]}`.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum Nameservers {
    List(Vec<String>),
    Detailed {
        #[serde(default)]
        hosts: Vec<String>,
    },
}

impl Default for Nameservers {
    fn default() -> Self {
        Nameservers::List(Vec::new())
    }
}

impl Nameservers {
    pub fn into_hosts(self) -> Vec<String> {
        match self {
            Nameservers::List(hosts) | Nameservers::Detailed { hosts } => hosts,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct DomainInfo {
    #[serde(default)]
    pub nameservers: Nameservers,
}

#[derive(Serialize, Debug)]
pub struct NameserverUpdate<'a> {
    pub nameservers: &'a [String],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_info_shapes() {
        let info: DomainInfo =
            serde_json::from_str(r#"{"name": "oriz.in", "nameservers": ["a.ns", "b.ns"]}"#).unwrap();
        assert_eq!(info.nameservers.into_hosts(), vec!["a.ns", "b.ns"]);

        let info: DomainInfo = serde_json::from_str(
            r#"{"name": "oriz.in", "nameservers": {"provider": "custom", "hosts": ["a.ns"]}}"#,
        )
        .unwrap();
        assert_eq!(info.nameservers.into_hosts(), vec!["a.ns"]);

        let info: DomainInfo = serde_json::from_str(r#"{"name": "oriz.in"}"#).unwrap();
        assert!(info.nameservers.into_hosts().is_empty());
    }
}
