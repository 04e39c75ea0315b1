use std::fmt::{Display, Formatter};
use std::path::Path;

/// Codec the split tracks are written with, picked from the source extension.
///
/// Sources without a matching encoder are stream copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Flac,
    Mp3,
    Ogg,
    Opus,
    Wav,
    Copy,
}

impl OutputFormat {
    pub fn from_audio_path(path: impl AsRef<Path>) -> Self {
        let extension = path
            .as_ref()
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match extension.as_str() {
            "flac" => OutputFormat::Flac,
            "mp3" => OutputFormat::Mp3,
            "ogg" => OutputFormat::Ogg,
            "opus" => OutputFormat::Opus,
            "wav" => OutputFormat::Wav,
            _ => OutputFormat::Copy,
        }
    }

    pub fn codec_args(&self) -> &'static [&'static str] {
        match self {
            OutputFormat::Flac => &["-c:a", "flac"],
            OutputFormat::Mp3 => &["-c:a", "libmp3lame"],
            OutputFormat::Ogg => &["-c:a", "libvorbis"],
            OutputFormat::Opus => &["-c:a", "libopus"],
            OutputFormat::Wav => &["-c:a", "pcm_s16le"],
            OutputFormat::Copy => &["-c", "copy"],
        }
    }

    /// Extension of the split files. Stream copies keep the source extension.
    pub fn extension(&self, source_extension: &str) -> String {
        match self {
            OutputFormat::Copy => source_extension.to_ascii_lowercase(),
            other => other.to_string(),
        }
    }
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OutputFormat::Flac => "flac",
            OutputFormat::Mp3 => "mp3",
            OutputFormat::Ogg => "ogg",
            OutputFormat::Opus => "opus",
            OutputFormat::Wav => "wav",
            OutputFormat::Copy => "copy",
        };
        f.write_str(name)
    }
}
