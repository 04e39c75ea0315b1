use crate::cue::error::CueError;
use crate::split::error::SplitError;
use crate::timestamps::error::TimestampError;
use std::path::PathBuf;
use std::result;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackSplitError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    TimestampError(#[from] TimestampError),

    #[error(transparent)]
    CueError(#[from] CueError),

    #[error(transparent)]
    SplitError(#[from] SplitError),

    #[error("Output path exists but is not a directory: {0}")]
    OutputNotADirectory(PathBuf),
}

pub type TrackSplitResult<T> = result::Result<T, TrackSplitError>;
