use std::process::ExitCode as StdExitCode;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    NothingDecoded = 10,
    RoundLimit = 11,
    IoError = 12,
}

impl From<ExitCode> for StdExitCode {
    fn from(code: ExitCode) -> Self {
        StdExitCode::from(code as u8)
    }
}

#[derive(Debug, Error)]
pub enum MdecodeError {
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    #[error("failed to decode")]
    NothingDecoded,

    #[error("still decoding after {rounds} rounds; raise --max-rounds to continue")]
    RoundLimit { rounds: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MdecodeError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            MdecodeError::InvalidInput { .. } => ExitCode::GeneralError,
            MdecodeError::NothingDecoded => ExitCode::NothingDecoded,
            MdecodeError::RoundLimit { .. } => ExitCode::RoundLimit,
            MdecodeError::Io(_) => ExitCode::IoError,
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn round_limit(rounds: usize) -> Self {
        Self::RoundLimit { rounds }
    }
}

pub type Result<T> = std::result::Result<T, MdecodeError>;
