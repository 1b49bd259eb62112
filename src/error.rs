use std::time::Duration;
use thiserror::Error;

#[allow(clippy::enum_variant_names)]
#[derive(Error, Debug)]
pub enum Error {
    #[error("Credential error: {0}")]
    CredentialError(String),

    #[error("Build failed: {0}")]
    BuildFailed(String),

    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Command timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Returns the credential value, or a `CredentialError` naming the variable.
pub fn require<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, Error> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::CredentialError(format!("Missing {name}"))),
    }
}
