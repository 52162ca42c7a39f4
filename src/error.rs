use thiserror::Error;

/// Failures raised by a data store backend.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum RankingError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u64 },

    #[error("Configuration unavailable: {0}")]
    ConfigurationUnavailable(#[source] StoreError),

    #[error("Invalid scoring configuration: {}", .0.join("; "))]
    InvalidConfiguration(Vec<String>),

    #[error("Lookup failed: {0}")]
    Lookup(#[source] StoreError),

    #[error("Failed to persist ranking results: {0}")]
    PersistenceFailure(#[source] StoreError),
}

impl RankingError {
    pub fn team_not_found(id: u64) -> Self {
        RankingError::NotFound { entity: "Team", id }
    }

    pub fn region_not_found(id: u64) -> Self {
        RankingError::NotFound { entity: "Region", id }
    }
}

pub type RankingResult<T> = Result<T, RankingError>;
