use crate::cue::error::{CueError, CueResult};
use crate::cue::models::{CueFile, CueSheet, FileType, Index, MSF, Track, TrackType};
use crate::timestamps::models::Timestamp;
use std::path::{Path, PathBuf};

pub mod error;
pub mod models;

impl CueSheet {
    /// Builds a single-file cue sheet, numbering tracks from 1 in the given order.
    pub fn from_timestamps(
        timestamps: &[Timestamp],
        audio_filename: &str,
        performer: &str,
        album: &str,
    ) -> CueResult<Self> {
        let file_type = FileType::from_audio_path(audio_filename)?;

        let tracks = timestamps
            .iter()
            .zip(1..)
            .map(|(timestamp, number)| Track {
                number,
                title: Some(timestamp.title.clone()),
                performer: None,
                indices: vec![Index {
                    number: 1,
                    position: timestamp.position,
                }],
            })
            .collect();

        Ok(Self {
            performer: Some(performer.to_string()),
            title: Some(album.to_string()),
            files: vec![CueFile {
                filename: audio_filename.to_string(),
                file_type,
            }],
            tracks,
        })
    }
}

/// Renders the cue sheet for `audio_filename` as text. Performs no I/O.
pub fn render(
    timestamps: &[Timestamp],
    audio_filename: &str,
    performer: &str,
    album: &str,
) -> CueResult<String> {
    let cue_sheet = CueSheet::from_timestamps(timestamps, audio_filename, performer, album)?;
    Ok(cue_sheet.to_string())
}

/// `<audio stem>.cue`, the name the cue sheet for `audio_path` is written under.
pub fn cue_file_name(audio_path: impl AsRef<Path>) -> PathBuf {
    let mut name = audio_path
        .as_ref()
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_default();

    name.push(".cue");
    PathBuf::from(name)
}

pub struct CueParser {
    cue_path: PathBuf,
}

impl CueParser {
    pub fn new(cue_path: impl AsRef<Path>) -> Self {
        Self {
            cue_path: cue_path.as_ref().to_path_buf(),
        }
    }

    pub async fn parse(&self) -> CueResult<CueSheet> {
        let data = tokio::fs::read_to_string(&self.cue_path).await?;
        Self::parse_str(&data)
    }

    pub fn parse_str(data: &str) -> CueResult<CueSheet> {
        let mut cue_sheet = CueSheet {
            performer: None,
            title: None,
            files: Vec::new(),
            tracks: Vec::new(),
        };

        let mut current_track: Option<Track> = None;

        for line in data.lines() {
            let line = line.trim();

            if line.is_empty() || line.starts_with("REM") {
                continue;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            let field = |i: usize| {
                parts
                    .get(i)
                    .copied()
                    .ok_or_else(|| CueError::MissingField(line.to_string()))
            };

            match parts[0] {
                "PERFORMER" => {
                    let performer = Self::extract_quoted_string(line)?;
                    match &mut current_track {
                        Some(track) => track.performer = Some(performer),
                        None => cue_sheet.performer = Some(performer),
                    }
                }
                "TITLE" => {
                    let title = Self::extract_quoted_string(line)?;
                    match &mut current_track {
                        Some(track) => track.title = Some(title),
                        None => cue_sheet.title = Some(title),
                    }
                }
                "FILE" => {
                    if let Some(track) = current_track.take() {
                        cue_sheet.tracks.push(track);
                    }

                    let filename = Self::extract_quoted_string(line)?;
                    let file_type = FileType::from_tag(field(parts.len() - 1)?)?;

                    cue_sheet.files.push(CueFile {
                        filename,
                        file_type,
                    });
                }
                "TRACK" => {
                    if let Some(track) = current_track.take() {
                        cue_sheet.tracks.push(track);
                    }

                    let number = field(1)?.parse::<u32>()?;
                    Self::parse_track_type(field(2)?)?;

                    current_track = Some(Track {
                        number,
                        title: None,
                        performer: None,
                        indices: Vec::new(),
                    });
                }
                "INDEX" => {
                    if let Some(track) = &mut current_track {
                        let number = field(1)?.parse::<u8>()?;
                        let position = Self::parse_msf(field(2)?)?;

                        track.indices.push(Index { number, position });
                    }
                }
                _ => {}
            }
        }

        if let Some(track) = current_track {
            cue_sheet.tracks.push(track);
        }

        Ok(cue_sheet)
    }

    fn extract_quoted_string(line: &str) -> CueResult<String> {
        let start = line.find('"').ok_or(CueError::MissingQuoteError(
            "Missing opening quote".to_string(),
        ))?;
        let end = line.rfind('"').ok_or(CueError::MissingQuoteError(
            "Missing closing quote".to_string(),
        ))?;
        if start >= end {
            return Err(CueError::InvalidQuotedString(line.to_string()));
        }

        Ok(line[start + 1..end].to_string())
    }

    fn parse_track_type(type_str: &str) -> CueResult<TrackType> {
        match type_str {
            "AUDIO" => Ok(TrackType::Audio),
            _ => Err(CueError::InvalidTrackType(type_str.to_string())),
        }
    }

    fn parse_msf(msf_str: &str) -> CueResult<MSF> {
        let parts: Vec<&str> = msf_str.split(':').collect();
        if parts.len() != 3 {
            return Err(CueError::InvalidMSFFormat(msf_str.to_string()));
        }

        Ok(MSF {
            minutes: parts[0].parse()?,
            seconds: parts[1].parse()?,
            frames: parts[2].parse()?,
        })
    }
}
