//! End-to-end demo: synthesizes a handful of images plus a sine-wave audio
//! track, then renders `assets/demo_slideshow.mp4`.
//!
//! Requires `ffmpeg` and `ffprobe` on PATH. Run with:
//! `cargo run --example render_slideshow_mp4`

use std::{path::Path, process::Command};

use anyhow::Context as _;

use stillreel::{SlideshowOpts, TimingConfig, render_slideshow};

fn ffmpeg_tools_available() -> bool {
    let ffmpeg_ok = Command::new("ffmpeg")
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false);
    let ffprobe_ok = Command::new("ffprobe")
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false);
    ffmpeg_ok && ffprobe_ok
}

fn write_gradient_png(path: &Path, width: u32, height: u32, tint: [u8; 3]) -> anyhow::Result<()> {
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        let fx = x as f32 / width as f32;
        let fy = y as f32 / height as f32;
        image::Rgb([
            (tint[0] as f32 * fx) as u8,
            (tint[1] as f32 * fy) as u8,
            (tint[2] as f32 * (1.0 - fx)) as u8,
        ])
    });
    img.save(path)
        .with_context(|| format!("write '{}'", path.display()))?;
    Ok(())
}

fn synth_audio(path: &Path, seconds: u32) -> anyhow::Result<()> {
    let status = Command::new("ffmpeg")
        .args([
            "-v",
            "error",
            "-y",
            "-f",
            "lavfi",
            "-i",
            &format!("sine=frequency=220:sample_rate=44100:duration={seconds}"),
            "-c:a",
            "libmp3lame",
        ])
        .arg(path)
        .status()?;
    anyhow::ensure!(status.success(), "ffmpeg failed creating demo audio");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    if !ffmpeg_tools_available() {
        anyhow::bail!("ffmpeg + ffprobe are required and must be on PATH");
    }

    let root = Path::new("assets").join("demo_slideshow");
    let shorts = root.join("images_short");
    let longs = root.join("images_long");
    std::fs::create_dir_all(&shorts)?;
    std::fs::create_dir_all(&longs)?;

    for i in 0..6u32 {
        let tint = [250 - (i * 30) as u8, 40 + (i * 35) as u8, 90];
        write_gradient_png(&shorts.join(format!("short_{i:02}.png")), 640, 360, tint)?;
    }
    // One wide and one tall anchor so letterboxing is visible in the output.
    write_gradient_png(&longs.join("long_wide.png"), 1200, 300, [240, 200, 60])?;
    write_gradient_png(&longs.join("long_tall.png"), 300, 1200, [60, 200, 240])?;

    let audio = root.join("tone.mp3");
    synth_audio(&audio, 12)?;

    let mut opts = SlideshowOpts::new(&shorts, &longs, &audio, root.join("demo_slideshow.mp4"));
    opts.timing = TimingConfig {
        long_duration: 2.0,
        short_start_duration: 0.8,
        short_end_duration: 0.15,
        short_acceleration: 1.6,
    };

    let stats = render_slideshow(&opts)?;
    eprintln!(
        "wrote {} ({} entries, {:.2}s video over {:.2}s audio)",
        root.join("demo_slideshow.mp4").display(),
        stats.entries,
        stats.sequence_sec,
        stats.audio_sec
    );
    Ok(())
}
