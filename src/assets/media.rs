use std::path::Path;

use crate::error::{StillreelError, StillreelResult};

/// Duration of the audio file at `path`, in seconds.
///
/// Shells out to the system `ffprobe` binary; the container-level format
/// duration is authoritative for the slideshow target length.
pub fn probe_audio_duration(path: &Path) -> StillreelResult<f64> {
    #[derive(serde::Deserialize)]
    struct ProbeFormat {
        duration: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeOut {
        format: Option<ProbeFormat>,
    }

    if !path.is_file() {
        return Err(StillreelError::not_found(format!(
            "audio file '{}' does not exist",
            path.display()
        )));
    }

    let out = std::process::Command::new("ffprobe")
        .args(["-v", "error", "-print_format", "json", "-show_format"])
        .arg(path)
        .output()
        .map_err(|e| StillreelError::decode(format!("failed to run ffprobe: {e}")))?;
    if !out.status.success() {
        return Err(StillreelError::decode(format!(
            "ffprobe failed for '{}': {}",
            path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let parsed: ProbeOut = serde_json::from_slice(&out.stdout)
        .map_err(|e| StillreelError::decode(format!("ffprobe json parse failed: {e}")))?;
    let duration = parsed
        .format
        .and_then(|f| f.duration)
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(0.0);

    if duration <= 0.0 {
        return Err(StillreelError::decode(format!(
            "audio file '{}' reports no positive duration",
            path.display()
        )));
    }
    Ok(duration)
}

/// Return `true` when `ffprobe` can be invoked from `PATH`.
pub fn is_ffprobe_on_path() -> bool {
    std::process::Command::new("ffprobe")
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}
