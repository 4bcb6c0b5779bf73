use std::{
    io::Read,
    path::{Path, PathBuf},
    process::{Child, ChildStdin, Command, Stdio},
};

use crate::{
    assets::normalize::NormalizedFrame,
    error::{StillreelError, StillreelResult},
    timeline::FrameSize,
};

/// Options for streaming frames into an MP4 via the system `ffmpeg`.
#[derive(Clone, Debug)]
pub struct EncodeConfig {
    pub size: FrameSize,
    pub fps: u32,
    pub out_path: PathBuf,
    pub overwrite: bool,
    /// Audio file muxed into the output (aac, trimmed with `-shortest`).
    pub audio: Option<PathBuf>,
}

impl EncodeConfig {
    pub fn new(out_path: impl Into<PathBuf>, size: FrameSize, fps: u32) -> Self {
        Self {
            size,
            fps,
            out_path: out_path.into(),
            overwrite: true,
            audio: None,
        }
    }

    pub fn with_audio(mut self, audio: impl Into<PathBuf>) -> Self {
        self.audio = Some(audio.into());
        self
    }

    pub fn validate(&self) -> StillreelResult<()> {
        if self.size.width == 0 || self.size.height == 0 {
            return Err(StillreelError::invalid_config(
                "encode width/height must be non-zero",
            ));
        }
        if self.fps == 0 {
            return Err(StillreelError::invalid_config("encode fps must be non-zero"));
        }
        if !self.size.width.is_multiple_of(2) || !self.size.height.is_multiple_of(2) {
            // We target yuv420p output for maximum compatibility.
            return Err(StillreelError::invalid_config(
                "encode width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        Ok(())
    }
}

/// Streams raw RGB8 frames to the system `ffmpeg` binary.
///
/// The pipe runs at a fixed fps; a frame's display duration is realized by
/// writing it repeatedly. Repeat counts come from rounding the accumulated
/// schedule rather than each entry, so rounding error never drifts past half
/// a frame over the whole sequence.
pub struct FfmpegEncoder {
    cfg: EncodeConfig,
    child: Child,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,
    scheduled_sec: f64,
    frames_written: u64,
}

impl FfmpegEncoder {
    pub fn new(cfg: EncodeConfig) -> StillreelResult<Self> {
        cfg.validate()?;
        ensure_parent_dir(&cfg.out_path)?;

        if !cfg.overwrite && cfg.out_path.exists() {
            return Err(StillreelError::invalid_config(format!(
                "output file '{}' already exists",
                cfg.out_path.display()
            )));
        }
        if let Some(audio) = cfg.audio.as_ref()
            && !audio.is_file()
        {
            return Err(StillreelError::not_found(format!(
                "audio file '{}' does not exist",
                audio.display()
            )));
        }
        if !is_ffmpeg_on_path() {
            return Err(StillreelError::encode(
                "ffmpeg is required for MP4 encoding, but was not found on PATH",
            ));
        }

        // System `ffmpeg` binary rather than native bindings: no FFmpeg dev
        // header/lib requirements at build time.
        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        if cfg.overwrite {
            cmd.arg("-y");
        } else {
            cmd.arg("-n");
        }

        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgb24",
            "-s",
            &format!("{}x{}", cfg.size.width, cfg.size.height),
            "-r",
            &cfg.fps.to_string(),
            "-i",
            "pipe:0",
        ]);

        if let Some(audio) = cfg.audio.as_ref() {
            cmd.arg("-i").arg(audio).args([
                "-c:v",
                "libx264",
                "-pix_fmt",
                "yuv420p",
                "-c:a",
                "aac",
                "-shortest",
                "-movflags",
                "+faststart",
            ]);
        } else {
            cmd.args([
                "-an",
                "-c:v",
                "libx264",
                "-pix_fmt",
                "yuv420p",
                "-movflags",
                "+faststart",
            ]);
        }
        cmd.arg(&cfg.out_path);

        let mut child = cmd.spawn().map_err(|e| {
            StillreelError::encode(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| StillreelError::encode("failed to open ffmpeg stdin (unexpected)"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| StillreelError::encode("failed to open ffmpeg stderr (unexpected)"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok(stderr_bytes)
        });

        Ok(Self {
            cfg,
            child,
            stdin: Some(stdin),
            stderr_drain: Some(stderr_drain),
            scheduled_sec: 0.0,
            frames_written: 0,
        })
    }

    /// Write `frame` repeated for `duration_sec` of display time.
    pub fn push_frame(&mut self, frame: &NormalizedFrame, duration_sec: f64) -> StillreelResult<()> {
        if duration_sec <= 0.0 {
            return Err(StillreelError::encode(format!(
                "frame display duration must be > 0 seconds, got {duration_sec}"
            )));
        }
        if frame.width != self.cfg.size.width || frame.height != self.cfg.size.height {
            return Err(StillreelError::encode(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, self.cfg.size.width, self.cfg.size.height
            )));
        }
        let expected_len = frame.width as usize * frame.height as usize * 3;
        if frame.data.len() != expected_len {
            return Err(StillreelError::encode(
                "frame.data size mismatch with width*height*3",
            ));
        }

        self.scheduled_sec += duration_sec;
        let repeats = scheduled_frame_count(self.scheduled_sec, self.cfg.fps, self.frames_written);

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(StillreelError::encode("ffmpeg encoder is already finalized"));
        };
        use std::io::Write as _;
        for _ in 0..repeats {
            stdin.write_all(&frame.data).map_err(|e| {
                StillreelError::encode(format!("failed to write frame to ffmpeg stdin: {e}"))
            })?;
        }
        self.frames_written += repeats;
        Ok(())
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Close the pipe, wait for ffmpeg, and surface its stderr on failure.
    /// Returns the number of raw frames written.
    pub fn finish(mut self) -> StillreelResult<u64> {
        drop(self.stdin.take());

        let status = self.child.wait().map_err(|e| {
            StillreelError::encode(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;
        let stderr_bytes = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| StillreelError::encode("ffmpeg stderr drain thread panicked"))?
                .map_err(|e| StillreelError::encode(format!("ffmpeg stderr read failed: {e}")))?,
            None => Vec::new(),
        };

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(StillreelError::encode(format!(
                "ffmpeg exited with status {}: {}",
                status,
                stderr.trim()
            )));
        }

        Ok(self.frames_written)
    }
}

/// Frames still owed once `scheduled_sec` of display time has been planned
/// and `frames_written` frames are already on the pipe. At least one, so no
/// image disappears from the output entirely.
fn scheduled_frame_count(scheduled_sec: f64, fps: u32, frames_written: u64) -> u64 {
    let scheduled_total = (scheduled_sec * f64::from(fps)).round() as u64;
    scheduled_total.saturating_sub(frames_written).max(1)
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> StillreelResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    std::process::Command::new("ffmpeg")
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_validation_catches_bad_values() {
        let ok = EncodeConfig::new("out/reel.mp4", FrameSize::new(1920, 1080), 30);
        assert!(ok.validate().is_ok());

        assert!(
            EncodeConfig::new("out/reel.mp4", FrameSize::new(0, 1080), 30)
                .validate()
                .is_err()
        );
        assert!(
            EncodeConfig::new("out/reel.mp4", FrameSize::new(1919, 1080), 30)
                .validate()
                .is_err()
        );
        assert!(
            EncodeConfig::new("out/reel.mp4", FrameSize::new(1920, 1080), 0)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn schedule_rounds_the_accumulated_total() {
        // Three entries of 0.05s at 30fps are 1.5 frames each; per-entry
        // rounding would emit 2+2+2, the accumulated schedule emits 2+1+2.
        let mut written = 0u64;
        let mut scheduled = 0.0f64;
        let mut counts = Vec::new();
        for _ in 0..3 {
            scheduled += 0.05;
            let n = scheduled_frame_count(scheduled, 30, written);
            written += n;
            counts.push(n);
        }
        assert_eq!(counts, vec![2, 1, 2]);
        assert_eq!(written, 5);
    }

    #[test]
    fn schedule_never_starves_an_entry() {
        // A duration far below one frame still emits a single frame.
        let n = scheduled_frame_count(0.001, 30, 0);
        assert_eq!(n, 1);
    }

    #[test]
    fn schedule_total_tracks_seconds_times_fps() {
        let durations = [3.0, 0.48, 0.37, 2.0, 0.21, 0.13, 3.0, 0.1];
        let mut written = 0u64;
        let mut scheduled = 0.0f64;
        for d in durations {
            scheduled += d;
            written += scheduled_frame_count(scheduled, 30, written);
        }
        let expected = (durations.iter().sum::<f64>() * 30.0).round() as u64;
        assert!(written.abs_diff(expected) <= 1);
    }
}
