use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use stillreel::{
    FrameSize, SlideshowOpts, TimingConfig, build_sequence, discover_images,
    probe_audio_duration, render_slideshow,
};

#[derive(Parser, Debug)]
#[command(name = "stillreel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the slideshow MP4 (requires `ffmpeg` and `ffprobe` on PATH).
    Render(RenderArgs),
    /// Print the computed (image, duration) plan as JSON without rendering.
    Plan(PlanArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Directory of fast-cycling images.
    #[arg(long)]
    images_short_dir: PathBuf,

    /// Directory of anchor images held at the fixed long duration.
    #[arg(long)]
    images_long_dir: PathBuf,

    /// Audio track; its duration is the slideshow target length.
    #[arg(long)]
    audio: PathBuf,

    /// Seconds each long-pool image is held.
    #[arg(long, default_value_t = 3.0)]
    long_duration: f64,

    /// Short-image duration at the start of the timeline.
    #[arg(long, default_value_t = 0.5)]
    short_start_duration: f64,

    /// Short-image duration at the end of the timeline.
    #[arg(long, default_value_t = 0.1)]
    short_end_duration: f64,

    /// Power-law exponent warping the short-duration ramp (1.0 = linear).
    #[arg(long, default_value_t = 1.0)]
    short_acceleration: f64,
}

impl InputArgs {
    fn timing(&self) -> TimingConfig {
        TimingConfig {
            long_duration: self.long_duration,
            short_start_duration: self.short_start_duration,
            short_end_duration: self.short_end_duration,
            short_acceleration: self.short_acceleration,
        }
    }
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Output frame width in pixels.
    #[arg(long, default_value_t = 1920)]
    width: u32,

    /// Output frame height in pixels.
    #[arg(long, default_value_t = 1080)]
    height: u32,

    /// Output frame rate.
    #[arg(long, default_value_t = 30)]
    fps: u32,
}

#[derive(Args, Debug)]
struct PlanArgs {
    #[command(flatten)]
    input: InputArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Plan(args) => cmd_plan(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut opts = SlideshowOpts::new(
        &args.input.images_short_dir,
        &args.input.images_long_dir,
        &args.input.audio,
        &args.out,
    );
    opts.timing = args.input.timing();
    opts.frame_size = FrameSize::new(args.width, args.height);
    opts.fps = args.fps;

    let stats = render_slideshow(&opts)?;
    eprintln!(
        "wrote {} ({} entries, {:.2}s, {} frames)",
        args.out.display(),
        stats.entries,
        stats.sequence_sec,
        stats.frames_written
    );
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let timing = args.input.timing();
    timing.validate()?;

    let audio_sec = probe_audio_duration(&args.input.audio)?;
    let short_pool = discover_images(&args.input.images_short_dir)?;
    let long_pool = discover_images(&args.input.images_long_dir)?;
    let sequence = build_sequence(&short_pool, &long_pool, audio_sec, &timing)?;

    serde_json::to_writer_pretty(std::io::stdout().lock(), &sequence)?;
    println!();
    eprintln!(
        "{} entries totaling {:.2}s against {:.2}s of audio",
        sequence.len(),
        sequence.total_duration(),
        audio_sec
    );
    Ok(())
}
