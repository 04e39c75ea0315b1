use crate::split::error::{SplitError, SplitResult};
use crate::split::format::OutputFormat;
use log::debug;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// Restricts processing to the audio stream so embedded cover art does not abort the split.
pub const AUDIO_ONLY_ARGS: [&str; 2] = ["-map", "0:a"];

/// One track to cut out of the source audio.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackJob {
    pub number: u32,
    pub title: String,
    pub file_name: String,
    /// Start offset in seconds.
    pub start: f64,
    /// Length in seconds, `None` runs to the end of the source.
    pub duration: Option<f64>,
    pub metadata: Vec<(&'static str, String)>,
}

#[derive(Debug, Clone)]
pub struct Ffmpeg {
    program: PathBuf,
    loglevel: String,
}

impl Ffmpeg {
    pub fn new(program: impl Into<PathBuf>, loglevel: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            loglevel: loglevel.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Checks that the executable can be started before any work is committed.
    pub async fn probe(&self) -> SplitResult<()> {
        debug!("Probing for {:?}", self.program);

        let status = Command::new(&self.program)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| SplitError::MissingCollaborator {
                program: self.program.clone(),
                reason: e.to_string(),
            })?;

        if !status.success() {
            return Err(SplitError::MissingCollaborator {
                program: self.program.clone(),
                reason: format!("`-version` exited with {status}"),
            });
        }

        Ok(())
    }

    pub fn track_args(
        &self,
        audio_path: &Path,
        job: &TrackJob,
        format: OutputFormat,
        output: &Path,
    ) -> Vec<OsString> {
        let mut args: Vec<OsString> = ["-hide_banner", "-nostdin", "-loglevel"]
            .into_iter()
            .map(OsString::from)
            .collect();
        args.push(self.loglevel.clone().into());
        args.push("-y".into());
        args.push("-ss".into());
        args.push(format!("{:.3}", job.start).into());
        args.push("-i".into());
        args.push(audio_path.into());

        if let Some(duration) = job.duration {
            args.push("-t".into());
            args.push(format!("{duration:.3}").into());
        }

        args.extend(AUDIO_ONLY_ARGS.iter().map(OsString::from));
        args.extend(format.codec_args().iter().map(OsString::from));

        for (key, value) in &job.metadata {
            args.push("-metadata".into());
            args.push(format!("{key}={value}").into());
        }

        args.push(output.into());
        args
    }

    /// Human readable form of an invocation, for logs and dry runs.
    pub fn display_command(&self, args: &[OsString]) -> String {
        let mut line = self.program.display().to_string();
        for arg in args {
            let arg = arg.to_string_lossy();
            if arg.contains(char::is_whitespace) {
                line.push_str(&format!(" \"{arg}\""));
            } else {
                line.push(' ');
                line.push_str(&arg);
            }
        }
        line
    }

    pub async fn extract_track(
        &self,
        audio_path: &Path,
        job: &TrackJob,
        format: OutputFormat,
        output: &Path,
    ) -> SplitResult<()> {
        let args = self.track_args(audio_path, job, format, output);
        debug!("Running: {}", self.display_command(&args));

        let status = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .status()
            .await
            .map_err(|e| SplitError::ExternalToolFailure {
                program: self.program.clone(),
                track: job.number,
                status: e.to_string(),
            })?;

        if !status.success() {
            return Err(SplitError::ExternalToolFailure {
                program: self.program.clone(),
                track: job.number,
                status: status.to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(duration: Option<f64>) -> TrackJob {
        TrackJob {
            number: 2,
            title: "Circle of Life".to_string(),
            file_name: "02 - Circle of Life.flac".to_string(),
            start: 4854.0,
            duration,
            metadata: vec![("title", "Circle of Life".to_string())],
        }
    }

    fn args_of(ffmpeg: &Ffmpeg, job: &TrackJob) -> Vec<String> {
        ffmpeg
            .track_args(
                Path::new("concert.flac"),
                job,
                OutputFormat::Flac,
                Path::new("out/02 - Circle of Life.flac"),
            )
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn track_args_seek_limit_and_map_audio_only() {
        let ffmpeg = Ffmpeg::new("ffmpeg", "info");
        let args = args_of(&ffmpeg, &job(Some(6547.0)));

        assert_eq!(
            args,
            [
                "-hide_banner",
                "-nostdin",
                "-loglevel",
                "info",
                "-y",
                "-ss",
                "4854.000",
                "-i",
                "concert.flac",
                "-t",
                "6547.000",
                "-map",
                "0:a",
                "-c:a",
                "flac",
                "-metadata",
                "title=Circle of Life",
                "out/02 - Circle of Life.flac",
            ]
        );
    }

    #[test]
    fn last_track_runs_to_end() {
        let ffmpeg = Ffmpeg::new("ffmpeg", "error");
        let args = args_of(&ffmpeg, &job(None));
        assert!(!args.iter().any(|a| a == "-t"));
        assert!(args.contains(&"error".to_string()));
    }

    #[test]
    fn display_command_quotes_whitespace() {
        let ffmpeg = Ffmpeg::new("ffmpeg", "info");
        let line = ffmpeg.display_command(&["-i".into(), "my song.flac".into()]);
        assert_eq!(line, "ffmpeg -i \"my song.flac\"");
    }

    #[tokio::test]
    async fn probe_reports_missing_program() {
        let ffmpeg = Ffmpeg::new("/nonexistent/tracksplit-test/ffmpeg", "info");
        let result = ffmpeg.probe().await;
        assert!(matches!(
            result,
            Err(SplitError::MissingCollaborator { .. })
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn probe_reports_program_that_exits_non_zero() {
        let ffmpeg = Ffmpeg::new("false", "info");
        match ffmpeg.probe().await {
            Err(SplitError::MissingCollaborator { program, reason }) => {
                assert_eq!(program, PathBuf::from("false"));
                assert!(reason.contains("-version"), "{reason}");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
