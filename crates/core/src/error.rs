use hms_types::TextError;

/// Errors raised by `hms-core` outside of vitals validation.
///
/// Out-of-range or missing vitals are never errors; they are reported through
/// [`crate::vitals::ValidationReport`].
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("unknown vitals field: {0}")]
    UnknownField(String),
    #[error("unknown risk flag: {0}")]
    UnknownRiskFlag(String),
    #[error("unknown role: {0}")]
    UnknownRole(String),
    #[error("invalid text: {0}")]
    Text(#[from] TextError),
    #[error("data directory does not exist: {0}")]
    MissingDataDir(std::path::PathBuf),
    #[error("failed to create record directory: {0}")]
    RecordDirCreation(std::io::Error),
    #[error("failed to write vitals record: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to read vitals record: {0}")]
    FileRead(std::io::Error),
    #[error("failed to serialize vitals record: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize vitals record: {0}")]
    Deserialization(serde_json::Error),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
