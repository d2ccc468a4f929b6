use thiserror::Error;

/// Failed refresh cycle. The previously published snapshot stays intact.
#[derive(Debug, Error)]
pub enum RefreshError {
    /// Transport failure, timeout, or non-successful HTTP status.
    #[error("failed to fetch the prices")]
    Fetch(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// `timeSeries` or one of its entry fields is missing or malformed.
    #[error("failed to parse the prices")]
    Parse(#[from] serde_json::Error),
}

impl From<reqwest::Error> for RefreshError {
    fn from(error: reqwest::Error) -> Self {
        Self::Fetch(Box::new(error))
    }
}
