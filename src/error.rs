#[derive(Debug, thiserror::Error)]
pub enum StellarError {
    #[error("DuckDB error: {0}")]
    DuckDb(#[from] duckdb::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown pack: {0}")]
    UnknownPack(String),

    #[error("Insufficient packs: '{pack_id}' has {available} available")]
    InsufficientPacks { pack_id: String, available: u32 },

    #[error("Persist failure: {0}")]
    PersistFailure(String),

    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    #[error("Catalog conflict: {0}")]
    CatalogConflict(String),

    #[error("No identity is signed in")]
    NotSignedIn,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, StellarError>;
