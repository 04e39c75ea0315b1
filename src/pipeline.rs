use crate::cue::{cue_file_name, render};
use crate::error::{TrackSplitError, TrackSplitResult};
use crate::split::ffmpeg::Ffmpeg;
use crate::split::format::OutputFormat;
use crate::split::{CueSplitter, OverwritePolicy, SplitOptions, SplitOutcome, sanitize_file_name};
use crate::timestamps::read_timestamps;
use indicatif::MultiProgress;
use log::{debug, info};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub timestamps: PathBuf,
    pub audio: PathBuf,
    pub artist: String,
    pub album: String,
    pub output_dir: PathBuf,
    pub only_cue: bool,
    pub dry_run: bool,
    pub overwrite: OverwritePolicy,
    pub ffmpeg: Ffmpeg,
}

#[derive(Debug)]
pub struct RunReport {
    pub cue_path: PathBuf,
    pub split: Option<SplitOutcome>,
}

/// `<artist>_<album>_tracksplit` below `base`.
pub fn default_output_dir(base: &Path, artist: &str, album: &str) -> PathBuf {
    base.join(format!(
        "{}_{}_tracksplit",
        sanitize_file_name(artist),
        sanitize_file_name(album)
    ))
}

/// Parses the timestamps, writes the cue sheet and, unless only the cue sheet
/// was requested, splits the audio file with it.
///
/// The cue sheet is rendered completely before anything touches the disk, so a
/// bad timestamp or codec leaves no file behind.
pub async fn run(pb: &MultiProgress, options: RunOptions) -> TrackSplitResult<RunReport> {
    if !options.only_cue && !options.dry_run {
        options.ffmpeg.probe().await?;
        debug!("Found {:?}", options.ffmpeg.program());
    }

    let timestamps = read_timestamps(&options.timestamps).await?;
    let audio_filename = options.audio.to_string_lossy();
    let cue = render(&timestamps, &audio_filename, &options.artist, &options.album)?;

    prepare_output_dir(&options.output_dir).await?;

    let cue_path = options.output_dir.join(cue_file_name(&options.audio));
    tokio::fs::write(&cue_path, cue).await?;
    info!(
        "Wrote CUE sheet with {} track(s) to {:?}",
        timestamps.len(),
        cue_path
    );

    if options.only_cue {
        return Ok(RunReport {
            cue_path,
            split: None,
        });
    }

    let splitter = CueSplitter::new(
        &cue_path,
        options.ffmpeg,
        SplitOptions {
            output_dir: options.output_dir,
            output_format: OutputFormat::from_audio_path(&options.audio),
            overwrite: options.overwrite,
            dry_run: options.dry_run,
        },
    );
    let outcome = splitter.split(pb).await?;

    Ok(RunReport {
        cue_path,
        split: Some(outcome),
    })
}

async fn prepare_output_dir(output_dir: &Path) -> TrackSplitResult<()> {
    match tokio::fs::metadata(output_dir).await {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(TrackSplitError::OutputNotADirectory(
            output_dir.to_path_buf(),
        )),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("Creating output directory {output_dir:?}");
            tokio::fs::create_dir_all(output_dir).await?;
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
