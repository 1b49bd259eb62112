use thiserror::Error;

#[derive(Error, Debug)]
pub enum NeocitiesError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Upload rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
}

use crate::error::Error;

pub fn map_error(e: NeocitiesError) -> Error {
    use NeocitiesError::*;
    match e {
        Http(err) => Error::ProviderError(err.to_string()),
        Io(err) => Error::Io(err),
        Rejected { status, message } => {
            Error::ProviderError(format!("Neocities answered {status}: {message}"))
        }
    }
}
