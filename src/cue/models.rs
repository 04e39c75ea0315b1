use crate::cue::error::{CueError, CueResult};
use std::fmt::{Display, Formatter};
use std::path::Path;

pub const FRAMES_PER_SECOND: u32 = 75;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CueSheet {
    pub performer: Option<String>,
    pub title: Option<String>,
    pub files: Vec<CueFile>,
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CueFile {
    pub filename: String,
    pub file_type: FileType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub number: u32,
    pub title: Option<String>,
    pub performer: Option<String>,
    pub indices: Vec<Index>,
}

impl Track {
    /// Start of the track, the position of `INDEX 01`.
    pub fn start(&self) -> Option<MSF> {
        self.indices
            .iter()
            .find(|index| index.number == 1)
            .map(|index| index.position)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Index {
    pub number: u8,
    pub position: MSF,
}

/// Minutes, seconds and frames (1/75 s) into a file.
///
/// Minutes are not capped at 99, timestamps of long recordings fold hours into
/// this field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MSF {
    pub minutes: u32,
    pub seconds: u32,
    pub frames: u8,
}

impl MSF {
    pub fn to_seconds(&self) -> f64 {
        self.minutes as f64 * 60.0
            + self.seconds as f64
            + self.frames as f64 / FRAMES_PER_SECOND as f64
    }
}

impl Display for MSF {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{:02}:{:02}", self.minutes, self.seconds, self.frames)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackType {
    Audio,
}

impl Display for TrackType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackType::Audio => write!(f, "AUDIO"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Flac,
    Mp3,
    Ogg,
    Opus,
    Ape,
    Wave,
    Aac,
}

impl FileType {
    pub fn from_extension(extension: &str) -> CueResult<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "flac" => Ok(FileType::Flac),
            "mp3" => Ok(FileType::Mp3),
            "ogg" => Ok(FileType::Ogg),
            "opus" => Ok(FileType::Opus),
            "ape" => Ok(FileType::Ape),
            "wav" => Ok(FileType::Wave),
            "m4a" => Ok(FileType::Aac),
            _ => Err(CueError::UnknownAudioCodec(extension.to_string())),
        }
    }

    pub fn from_audio_path(path: impl AsRef<Path>) -> CueResult<Self> {
        let extension = path
            .as_ref()
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        Self::from_extension(extension)
    }

    pub fn tag(&self) -> &'static str {
        match self {
            FileType::Flac => "FLAC",
            FileType::Mp3 => "MP3",
            FileType::Ogg => "OGG",
            FileType::Opus => "OPUS",
            FileType::Ape => "APE",
            FileType::Wave => "WAVE",
            FileType::Aac => "AAC",
        }
    }

    pub fn from_tag(tag: &str) -> CueResult<Self> {
        match tag {
            "FLAC" => Ok(FileType::Flac),
            "MP3" => Ok(FileType::Mp3),
            "OGG" => Ok(FileType::Ogg),
            "OPUS" => Ok(FileType::Opus),
            "APE" => Ok(FileType::Ape),
            "WAVE" => Ok(FileType::Wave),
            "AAC" => Ok(FileType::Aac),
            _ => Err(CueError::InvalidFileType(tag.to_string())),
        }
    }
}

impl Display for FileType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

// Quoted values are written verbatim, embedded quotes are not escaped.
impl Display for CueSheet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(performer) = &self.performer {
            writeln!(f, "PERFORMER \"{performer}\"")?;
        }
        if let Some(title) = &self.title {
            writeln!(f, "TITLE \"{title}\"")?;
        }
        for file in &self.files {
            writeln!(f, "FILE \"{}\" {}", file.filename, file.file_type)?;
        }
        for track in &self.tracks {
            writeln!(f, "\tTRACK {:02} {}", track.number, TrackType::Audio)?;
            if let Some(title) = &track.title {
                writeln!(f, "\t\tTITLE \"{title}\"")?;
            }
            if let Some(performer) = &track.performer {
                writeln!(f, "\t\tPERFORMER \"{performer}\"")?;
            }
            for index in &track.indices {
                writeln!(f, "\t\tINDEX {:02} {}", index.number, index.position)?;
            }
        }

        Ok(())
    }
}
