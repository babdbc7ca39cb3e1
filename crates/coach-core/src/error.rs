use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoachError {
    #[error("Missing context: {0}")]
    MissingContext(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type CoachResult<T> = Result<T, CoachError>;
