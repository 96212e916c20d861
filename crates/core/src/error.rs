#[derive(Debug, thiserror::Error)]
pub enum CdmError {
    #[error("not found")]
    NotFound,
    #[error("data source unavailable: {0}")]
    DataSource(#[from] sqlx::Error),
    #[error("missing required configuration: {0}")]
    Configuration(&'static str),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type CdmResult<T> = std::result::Result<T, CdmError>;
