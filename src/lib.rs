//! Stillreel assembles an audio-synced slideshow MP4 from two pools of
//! still images.
//!
//! A "long" pool provides anchor images held for a fixed duration; a
//! "short" pool cycles between them with a display duration that ramps
//! across the timeline (a power-law progression, so pacing can accelerate
//! or decelerate). The planned durations always sum to the audio length.
//!
//! # Pipeline overview
//!
//! 1. **Probe**: read the audio duration via the system `ffprobe`
//! 2. **Discover**: list each pool's images, ordered by modification time
//! 3. **Plan**: interleave the pools into a [`Sequence`] of
//!    (image, duration) entries hitting the audio length exactly
//! 4. **Normalize**: aspect-fit each image into a letterboxed RGB frame
//! 5. **Encode**: stream frames to the system `ffmpeg` binary, muxing the
//!    audio track
//!
//! Planning and normalization are pure and deterministic; all IO lives in
//! the probe/discover/encode collaborators.
#![forbid(unsafe_code)]

mod assets;
mod encode;
mod foundation;
mod pipeline;
mod timeline;

pub use assets::discover::{IMAGE_EXTENSIONS, discover_images};
pub use assets::media::{is_ffprobe_on_path, probe_audio_duration};
pub use assets::normalize::{NormalizedFrame, fit_dimensions, normalize_image};
pub use encode::ffmpeg::{
    EncodeConfig, FfmpegEncoder, ensure_parent_dir, is_ffmpeg_on_path,
};
pub use foundation::error::{StillreelError, StillreelResult};
pub use pipeline::{SlideshowOpts, SlideshowStats, render_slideshow};
pub use timeline::progression::progressive_duration;
pub use timeline::sequence::{MIN_ENTRY_SEC, Sequence, SequenceEntry, build_sequence};
pub use timeline::{FrameSize, TimingConfig};

pub(crate) use foundation::error;
