use thiserror::Error;

/// Failures talking to the Pocket v3 API.
#[derive(Debug, Error)]
pub enum PocketError {
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),
    #[error("request to {endpoint} failed")]
    Http {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} returned HTTP {status}: {message}")]
    Api {
        endpoint: String,
        status: u16,
        message: String,
    },
    #[error("failed to decode {endpoint} response")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("pocket rejected {rejected} of {total} committed actions")]
    ActionsRejected { rejected: usize, total: usize },
}
