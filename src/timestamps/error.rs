use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimestampError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("Invalid timecode format: {0:?}, expected MM:SS or HH:MM:SS")]
    InvalidTimecodeFormat(String),

    #[error("Malformed timestamp on line {line_number}: {content:?} ({reason})")]
    MalformedTimestampLine {
        line_number: usize,
        content: String,
        reason: String,
    },
}

pub type TimestampResult<T> = Result<T, TimestampError>;
