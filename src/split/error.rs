use crate::cue::error::CueError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SplitError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    CueError(#[from] CueError),

    #[error(transparent)]
    TemplateError(#[from] indicatif::style::TemplateError),

    #[error(
        "Could not run {program:?} ({reason}). Install FFmpeg (https://ffmpeg.org/download.html) and make sure it is on your PATH, or point --ffmpeg / TRACKSPLIT_FFMPEG at the executable"
    )]
    MissingCollaborator { program: PathBuf, reason: String },

    #[error("{program:?} failed while extracting track {track:02}: {status}")]
    ExternalToolFailure {
        program: PathBuf,
        track: u32,
        status: String,
    },

    #[error("No files are referenced in the CUE sheet")]
    NoFileReferencedInCueSheet,

    #[error("Track {0:02} has no INDEX 01 entry")]
    MissingTrackStart(u32),
}

pub type SplitResult<T> = Result<T, SplitError>;
