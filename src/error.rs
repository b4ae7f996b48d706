use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid data source: {0}")]
    InvalidSource(String),

    #[error("column `{0}` is not a spatial axis column (expected x, y or z)")]
    InvalidColumn(String),

    #[error("unknown chart style `{0}`")]
    InvalidStyle(String),

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
