use std::path::{Path, PathBuf};

use crate::{
    assets::{discover::discover_images, media::probe_audio_duration, normalize::normalize_image},
    encode::ffmpeg::{EncodeConfig, FfmpegEncoder},
    error::{StillreelError, StillreelResult},
    timeline::{FrameSize, TimingConfig, sequence::build_sequence},
};

/// Inputs for one slideshow render.
#[derive(Clone, Debug)]
pub struct SlideshowOpts {
    pub images_short_dir: PathBuf,
    pub images_long_dir: PathBuf,
    pub audio_path: PathBuf,
    pub output_path: PathBuf,
    pub timing: TimingConfig,
    pub frame_size: FrameSize,
    pub fps: u32,
    pub overwrite: bool,
}

impl SlideshowOpts {
    pub fn new(
        images_short_dir: impl Into<PathBuf>,
        images_long_dir: impl Into<PathBuf>,
        audio_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            images_short_dir: images_short_dir.into(),
            images_long_dir: images_long_dir.into(),
            audio_path: audio_path.into(),
            output_path: output_path.into(),
            timing: TimingConfig::default(),
            frame_size: FrameSize::default(),
            fps: 30,
            overwrite: true,
        }
    }
}

/// Summary of a finished render.
#[derive(Clone, Copy, Debug)]
pub struct SlideshowStats {
    pub entries: usize,
    pub frames_written: u64,
    pub sequence_sec: f64,
    pub audio_sec: f64,
}

/// Assemble and encode the slideshow described by `opts`.
///
/// Inputs are validated eagerly: both image directories and the audio file
/// must exist, and the timing config must be valid, before any sequence or
/// pixel work starts. A failure on any image is fatal — a dropped frame
/// would silently break the duration-sum invariant, so there is no partial
/// output.
#[tracing::instrument(skip(opts), fields(out = %opts.output_path.display()))]
pub fn render_slideshow(opts: &SlideshowOpts) -> StillreelResult<SlideshowStats> {
    ensure_dir_exists(&opts.images_short_dir, "short image directory")?;
    ensure_dir_exists(&opts.images_long_dir, "long image directory")?;
    opts.timing.validate()?;

    let audio_sec = probe_audio_duration(&opts.audio_path)?;
    tracing::info!(audio_sec, "probed audio duration");

    let short_pool = discover_images(&opts.images_short_dir)?;
    let long_pool = discover_images(&opts.images_long_dir)?;
    tracing::info!(
        short = short_pool.len(),
        long = long_pool.len(),
        "discovered image pools"
    );

    let sequence = build_sequence(&short_pool, &long_pool, audio_sec, &opts.timing)?;
    let sequence_sec = sequence.total_duration();
    tracing::info!(entries = sequence.len(), sequence_sec, "built display plan");

    let cfg = EncodeConfig {
        size: opts.frame_size,
        fps: opts.fps,
        out_path: opts.output_path.clone(),
        overwrite: opts.overwrite,
        audio: Some(opts.audio_path.clone()),
    };
    let mut encoder = FfmpegEncoder::new(cfg)?;

    for (idx, entry) in sequence.entries.iter().enumerate() {
        let frame = normalize_image(&entry.image, opts.frame_size)?;
        tracing::debug!(
            idx,
            image = %entry.image.display(),
            duration = entry.duration,
            "encoded entry"
        );
        encoder.push_frame(&frame, entry.duration)?;
    }

    let frames_written = encoder.finish()?;
    tracing::info!(frames_written, "finished encode");

    Ok(SlideshowStats {
        entries: sequence.len(),
        frames_written,
        sequence_sec,
        audio_sec,
    })
}

fn ensure_dir_exists(dir: &Path, what: &str) -> StillreelResult<()> {
    if !dir.is_dir() {
        return Err(StillreelError::not_found(format!(
            "{what} '{}' does not exist",
            dir.display()
        )));
    }
    Ok(())
}
