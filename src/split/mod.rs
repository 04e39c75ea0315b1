use crate::cue::CueParser;
use crate::cue::models::CueSheet;
use crate::split::error::{SplitError, SplitResult};
use crate::split::ffmpeg::{Ffmpeg, TrackJob};
use crate::split::format::OutputFormat;
use clap::ValueEnum;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

pub mod error;
pub mod ffmpeg;
pub mod format;

/// What to do when split tracks would replace files that already exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OverwritePolicy {
    Ask,
    Never,
    Always,
}

#[derive(Debug, Clone)]
pub struct SplitOptions {
    pub output_dir: PathBuf,
    pub output_format: OutputFormat,
    pub overwrite: OverwritePolicy,
    pub dry_run: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub enum SplitOutcome {
    /// Nothing was written, these files would have been.
    DryRun(Vec<PathBuf>),
    /// Existing files were kept and the split did not run.
    Skipped,
    Completed(Vec<PathBuf>),
}

pub struct CueSplitter {
    cue_path: PathBuf,
    ffmpeg: Ffmpeg,
    options: SplitOptions,
}

impl CueSplitter {
    pub fn new(cue_path: impl AsRef<Path>, ffmpeg: Ffmpeg, options: SplitOptions) -> Self {
        Self {
            cue_path: cue_path.as_ref().to_path_buf(),
            ffmpeg,
            options,
        }
    }

    pub async fn split(&self, pb: &MultiProgress) -> SplitResult<SplitOutcome> {
        debug!("Parsing CUE file: {:?}", self.cue_path);
        let cue_sheet = CueParser::new(&self.cue_path).parse().await?;

        let file = cue_sheet
            .files
            .first()
            .ok_or(SplitError::NoFileReferencedInCueSheet)?;
        if cue_sheet.files.len() > 1 {
            warn!(
                "CUE sheet references {} files, only {:?} is split",
                cue_sheet.files.len(),
                file.filename
            );
        }

        let audio_path = resolve_audio_path(&self.cue_path, &file.filename).await;
        let source_extension = audio_path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        let format = self.options.output_format;
        let jobs = plan_tracks(&cue_sheet, &format.extension(source_extension))?;

        let targets: Vec<PathBuf> = jobs
            .iter()
            .map(|job| self.options.output_dir.join(&job.file_name))
            .collect();

        if self.options.dry_run {
            for job in &jobs {
                let output = self.options.output_dir.join(&job.file_name);
                let args = self.ffmpeg.track_args(&audio_path, job, format, &output);
                info!("[dry run] {}", self.ffmpeg.display_command(&args));
            }
            return Ok(SplitOutcome::DryRun(targets));
        }

        let mut existing = Vec::new();
        for target in &targets {
            if tokio::fs::try_exists(target).await? {
                existing.push(target.as_path());
            }
        }

        if !existing.is_empty() {
            let proceed = match self.options.overwrite {
                OverwritePolicy::Always => true,
                OverwritePolicy::Never => false,
                OverwritePolicy::Ask => confirm_overwrite(pb, &existing).await?,
            };

            if !proceed {
                warn!(
                    "Skipping split, {} output file(s) already exist in {:?}",
                    existing.len(),
                    self.options.output_dir
                );
                return Ok(SplitOutcome::Skipped);
            }

            info!("Overwriting {} existing file(s)", existing.len());
        }

        let staging = tempfile::Builder::new()
            .prefix(".tracksplit-")
            .tempdir_in(&self.options.output_dir)?;
        debug!("Splitting into staging directory {:?}", staging.path());

        let bar = pb.add(ProgressBar::new(jobs.len() as u64));
        bar.set_style(
            ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} {wide_msg}")?
                .progress_chars("=> "),
        );

        for job in &jobs {
            bar.set_message(format!("{:02} {}", job.number, job.title));
            let output = staging.path().join(&job.file_name);
            if let Err(e) = self
                .ffmpeg
                .extract_track(&audio_path, job, format, &output)
                .await
            {
                bar.abandon();
                return Err(e);
            }
            bar.inc(1);
        }

        bar.finish_and_clear();

        for (job, target) in jobs.iter().zip(&targets) {
            tokio::fs::rename(staging.path().join(&job.file_name), target).await?;
        }
        staging.close()?;

        info!(
            "Split {} track(s) into {:?}",
            targets.len(),
            self.options.output_dir
        );

        Ok(SplitOutcome::Completed(targets))
    }
}

/// Relative `FILE` entries are looked up next to the cue sheet first, then
/// relative to the working directory.
async fn resolve_audio_path(cue_path: &Path, filename: &str) -> PathBuf {
    let path = PathBuf::from(filename);
    if path.is_absolute() {
        return path;
    }

    let cue_dir = cue_path.parent().unwrap_or(Path::new("."));
    let beside_cue = cue_dir.join(&path);
    if tokio::fs::try_exists(&beside_cue).await.unwrap_or(false) {
        debug!("Resolved audio file {filename:?} next to the CUE sheet: {beside_cue:?}");
        return beside_cue;
    }

    debug!("Resolved audio file {filename:?} relative to the working directory");
    path
}

/// Cuts the sheet into one job per track. Each track ends where the next one
/// starts, the last one at the end of the source.
pub fn plan_tracks(cue_sheet: &CueSheet, extension: &str) -> SplitResult<Vec<TrackJob>> {
    let starts = cue_sheet
        .tracks
        .iter()
        .map(|track| {
            track
                .start()
                .map(|msf| msf.to_seconds())
                .ok_or(SplitError::MissingTrackStart(track.number))
        })
        .collect::<SplitResult<Vec<f64>>>()?;

    let total = cue_sheet.tracks.len();
    let mut jobs = Vec::with_capacity(total);

    for (i, track) in cue_sheet.tracks.iter().enumerate() {
        let start = starts[i];
        let duration = match starts.get(i + 1) {
            Some(next) if *next > start => Some(next - start),
            Some(_) => {
                warn!(
                    "Track {:02} starts at or after the next track, it will run to the end of the file",
                    track.number
                );
                None
            }
            None => None,
        };

        let title = track
            .title
            .clone()
            .unwrap_or_else(|| format!("Track {:02}", track.number));

        let mut metadata = vec![
            ("title", title.clone()),
            ("track", format!("{}/{}", track.number, total)),
        ];
        if let Some(artist) = track.performer.as_ref().or(cue_sheet.performer.as_ref()) {
            metadata.push(("artist", artist.clone()));
        }
        if let Some(album) = &cue_sheet.title {
            metadata.push(("album", album.clone()));
        }

        jobs.push(TrackJob {
            number: track.number,
            file_name: format!(
                "{:02} - {}.{}",
                track.number,
                sanitize_file_name(&title),
                extension
            ),
            title,
            start,
            duration,
            metadata,
        });
    }

    Ok(jobs)
}

pub fn sanitize_file_name(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    let sanitized = sanitized.trim_end_matches(['.', ' ']).trim_start();
    if sanitized.is_empty() {
        "_".to_string()
    } else {
        sanitized.to_string()
    }
}

async fn confirm_overwrite(pb: &MultiProgress, existing: &[&Path]) -> SplitResult<bool> {
    pb.suspend(|| {
        for path in existing {
            eprintln!("File already exists: {}", path.display());
        }
    });

    let mut stderr = tokio::io::stderr();
    stderr.write_all(b"Overwrite existing files? [y/N] ").await?;
    stderr.flush().await?;

    let mut answer = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut answer)
        .await?;

    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
