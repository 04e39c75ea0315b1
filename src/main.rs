use crate::commands::Cli;
use crate::pipeline::{RunOptions, default_output_dir, run};
use crate::split::SplitOutcome;
use crate::split::ffmpeg::Ffmpeg;
use anyhow::Result;
use clap::Parser;
use indicatif::MultiProgress;
use indicatif_log_bridge::LogWrapper;
use log::{debug, info};

mod commands;
mod cue;
mod error;
mod pipeline;
mod split;
mod timestamps;

pub mod built_info {
    // The file has been placed there by the build script.
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let logger = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .build();

    let level = logger.filter();
    let pb = MultiProgress::new();

    LogWrapper::new(pb.clone(), logger).try_init()?;
    log::set_max_level(level);

    debug!(
        "{} {} ({})",
        built_info::PKG_NAME,
        built_info::PKG_VERSION,
        built_info::TARGET
    );

    let cli = Cli::parse();

    let output_dir = match cli.output_dir {
        Some(dir) => dir,
        None => default_output_dir(&std::env::current_dir()?, &cli.artist, &cli.album),
    };

    let report = run(
        &pb,
        RunOptions {
            timestamps: cli.timestamps,
            audio: cli.audio,
            artist: cli.artist,
            album: cli.album,
            output_dir,
            only_cue: cli.only_cue,
            dry_run: cli.dry_run,
            overwrite: cli.overwrite,
            ffmpeg: Ffmpeg::new(cli.ffmpeg, cli.ffmpeg_loglevel),
        },
    )
    .await?;

    match report.split {
        None => info!("CUE sheet ready: {:?}", report.cue_path),
        Some(SplitOutcome::DryRun(targets)) => {
            info!("Dry run finished, {} track(s) planned", targets.len())
        }
        Some(SplitOutcome::Skipped) => info!("Split skipped, existing files were kept"),
        Some(SplitOutcome::Completed(_)) => info!("Done"),
    }

    Ok(())
}
