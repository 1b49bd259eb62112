use crate::dns::cloudflare::types::ApiMessage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CloudflareError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Credential error: {0}")]
    Credential(String),

    #[error("Cloudflare API error ({status}): {}", describe(.errors))]
    Api { status: u16, errors: Vec<ApiMessage> },

    #[error("Malformed response: {0}")]
    Malformed(String),
}

fn describe(errors: &[ApiMessage]) -> String {
    if errors.is_empty() {
        return "no error details".to_string();
    }
    errors
        .iter()
        .map(|e| format!("[{}] {}", e.code, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

// 9103 and 10000 are Cloudflare's authentication error codes
fn is_auth_failure(status: u16, errors: &[ApiMessage]) -> bool {
    status == 401 || status == 403 || errors.iter().any(|e| e.code == 9103 || e.code == 10000)
}

use crate::error::Error;

pub fn map_error(e: CloudflareError) -> Error {
    use CloudflareError::*;
    match e {
        Http(err) => Error::ProviderError(err.to_string()),
        Credential(msg) => Error::CredentialError(msg),
        Api { status, errors } if is_auth_failure(status, &errors) => {
            Error::CredentialError(describe(&errors))
        }
        err @ Api { .. } => Error::ProviderError(err.to_string()),
        Malformed(msg) => Error::ProviderError(msg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_error_variants() {
        let err = map_error(CloudflareError::Credential("missing".into()));
        assert!(matches!(err, Error::CredentialError(_)));

        let err = map_error(CloudflareError::Api {
            status: 403,
            errors: vec![ApiMessage {
                code: 9103,
                message: "Unknown X-Auth-Key or X-Auth-Email".into(),
            }],
        });
        assert!(matches!(err, Error::CredentialError(msg) if msg.contains("9103")));

        let err = map_error(CloudflareError::Api {
            status: 400,
            errors: vec![ApiMessage {
                code: 81057,
                message: "Record already exists.".into(),
            }],
        });
        assert!(matches!(err, Error::ProviderError(msg) if msg.contains("81057")));

        let err = map_error(CloudflareError::Malformed("no result".into()));
        assert!(matches!(err, Error::ProviderError(_)));
    }
}
