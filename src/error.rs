/// Failures at the listings store boundary.
///
/// The search pipeline never surfaces these to its caller; they are logged
/// and the affected request yields no results.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("store rejected query with status {status}: {body}")]
    Query { status: u16, body: String },

    #[error("malformed store response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}
