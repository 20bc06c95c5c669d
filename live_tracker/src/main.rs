use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use chroma_trail::{PipelineConfig, TrackerPipeline, snapshot};
use clap::Parser;
use opencv::{
    highgui,
    prelude::*,
    videoio::{self, VideoCapture},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const WINDOW_NAME: &str = "Frame";
const QUIT_KEY: i32 = 'e' as i32;
// Let a live sensor settle before the first read.
const CAMERA_WARMUP: Duration = Duration::from_secs(3);

#[derive(Parser, Debug)]
#[command(
    name = "live_tracker",
    about = "Tracks a colored object and draws a fading motion trail"
)]
struct Args {
    /// Maximum number of trail points kept on screen
    #[arg(short, long, default_value_t = 128)]
    buffer: usize,

    /// Track a video file instead of the live camera
    #[arg(long, value_name = "PATH")]
    video: Option<PathBuf>,

    /// Camera index used when no video file is given
    #[arg(long, default_value_t = 0)]
    camera: i32,

    /// Save the first segmentation mask as a PNG, for tuning the color range
    #[arg(long, value_name = "PATH")]
    dump_mask: Option<PathBuf>,
}

fn open_source(args: &Args) -> Result<VideoCapture> {
    let cap = match &args.video {
        Some(path) => {
            let path = path.to_str().context("video path is not valid UTF-8")?;
            VideoCapture::from_file(path, videoio::CAP_ANY)
                .with_context(|| format!("failed to open video file {path}"))?
        }
        None => VideoCapture::new(args.camera, videoio::CAP_ANY)
            .with_context(|| format!("failed to open camera {}", args.camera))?,
    };
    if !cap.is_opened()? {
        bail!("video source could not be opened");
    }
    Ok(cap)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut cap = open_source(&args)?;
    if args.video.is_none() {
        thread::sleep(CAMERA_WARMUP);
    }

    let config = PipelineConfig {
        trail_capacity: args.buffer,
        ..PipelineConfig::default()
    };
    let mut pipeline = TrackerPipeline::new(config)?;
    match &args.video {
        Some(path) => info!(video = %path.display(), "tracking started"),
        None => info!(camera = args.camera, "tracking started"),
    }

    let mut frame = Mat::default();
    let mut pending_mask_dump = args.dump_mask.clone();
    loop {
        // A file source signals end-of-stream with a failed read or an
        // empty frame; either way the loop is done.
        if !cap.read(&mut frame)? || frame.empty() {
            break;
        }

        let output = pipeline.process(&frame)?;

        if let Some(path) = pending_mask_dump.take() {
            snapshot::save_mask(&path, &output.mask)
                .with_context(|| format!("failed to write mask snapshot to {}", path.display()))?;
            info!(path = %path.display(), "mask snapshot saved");
        }

        highgui::imshow(WINDOW_NAME, &output.frame)?;
        if highgui::wait_key(1)? == QUIT_KEY {
            break;
        }
    }

    info!("tracking stopped");
    Ok(())
}
