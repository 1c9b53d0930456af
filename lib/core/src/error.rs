use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Duplicate {kind} identifier: {id}")]
    DuplicateId { kind: &'static str, id: String },

    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("Invalid record {id}: {reason}")]
    InvalidRecord { id: String, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
