use crate::split::OverwritePolicy;
use clap::Parser;
use std::path::PathBuf;

/// Splits an audio file into tracks using "YouTube-style" timestamps.
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "Splits an audio file into tracks using \"YouTube-style\" timestamps, one timecode and title per line:\n\n00:55:45 Pink Elephants on Parade\n01:20:54 Circle of Life\n02:54:01 Colours of the Wind\n\nA CUE sheet is written first, the split itself is done by FFmpeg."
)]
pub struct Cli {
    /// File containing the timestamps
    #[arg(value_name = "TIMESTAMPS")]
    pub timestamps: PathBuf,

    /// Source audio file
    #[arg(value_name = "AUDIO")]
    pub audio: PathBuf,

    /// Artist name, written as the CUE sheet PERFORMER
    #[arg(long, short = 'a', value_name = "ARTIST")]
    pub artist: String,

    /// Album name, written as the CUE sheet TITLE
    #[arg(long, short = 'b', value_name = "ALBUM")]
    pub album: String,

    /// Only write the CUE sheet, do not split the audio file
    #[arg(long, default_value_t = false)]
    pub only_cue: bool,

    /// Output directory, defaults to <ARTIST>_<ALBUM>_tracksplit in the working directory
    #[arg(long, short = 'o', value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Print the FFmpeg commands instead of running them
    #[arg(long, short = 'n', default_value_t = false)]
    pub dry_run: bool,

    /// What to do when split tracks already exist in the output directory
    #[arg(long, value_enum, value_name = "POLICY", default_value = "ask")]
    pub overwrite: OverwritePolicy,

    /// FFmpeg executable used for splitting
    #[arg(long, value_name = "PATH", env = "TRACKSPLIT_FFMPEG", default_value = "ffmpeg")]
    pub ffmpeg: PathBuf,

    /// Log level passed to FFmpeg
    #[arg(
        long,
        value_name = "LEVEL",
        env = "TRACKSPLIT_FFMPEG_LOGLEVEL",
        default_value = "info"
    )]
    pub ffmpeg_loglevel: String,
}
