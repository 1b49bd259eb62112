use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpaceshipError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid signing key: {0}")]
    Signing(String),

    #[error("Spaceship API error ({status}): {body}")]
    Api { status: u16, body: String },
}

use crate::error::Error;

pub fn map_error(e: SpaceshipError) -> Error {
    use SpaceshipError::*;
    match e {
        Http(err) => Error::ProviderError(err.to_string()),
        Signing(msg) => Error::CredentialError(msg),
        Api { status, body } if status == 401 || status == 403 => {
            Error::CredentialError(format!("Spaceship rejected the API key ({status}): {body}"))
        }
        err @ Api { .. } => Error::ProviderError(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_error_variants() {
        let err = map_error(SpaceshipError::Api {
            status: 401,
            body: "unauthorized".into(),
        });
        assert!(matches!(err, Error::CredentialError(_)));
        let err = map_error(SpaceshipError::Api {
            status: 422,
            body: "invalid nameserver".into(),
        });
        assert!(matches!(err, Error::ProviderError(msg) if msg.contains("422")));
        let err = map_error(SpaceshipError::Signing("bad".into()));
        assert!(matches!(err, Error::CredentialError(_)));
    }
}
