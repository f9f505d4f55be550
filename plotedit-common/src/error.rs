#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CommonError {
    #[error("Invalid color: `{0}`")]
    InvalidColor(String),

    #[error("Date number out of range: {0}")]
    DateOutOfRange(f64),
}
