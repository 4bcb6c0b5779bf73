use std::path::PathBuf;

use crate::{
    error::{StillreelError, StillreelResult},
    timeline::TimingConfig,
};

/// Smallest remaining gap worth filling with another entry, in seconds.
///
/// Once the accumulated total is within this distance of the target the
/// builder stops instead of emitting a dust-sized entry.
pub const MIN_ENTRY_SEC: f64 = 1e-6;

/// One planned slide: which image to show and for how long, in seconds.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SequenceEntry {
    pub image: PathBuf,
    pub duration: f64,
}

/// Ordered display plan whose durations sum to the target total.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Sequence {
    pub entries: Vec<SequenceEntry>,
}

impl Sequence {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_duration(&self) -> f64 {
        self.entries.iter().map(|e| e.duration).sum()
    }
}

/// Build the display plan for one slideshow.
///
/// Long-pool and short-pool images alternate, opening on a long (anchor)
/// image when both pools are populated. Each pool is cyclic: indices wrap
/// when a pool runs out before the target duration is reached, and pool
/// order is preserved as given. Long images hold for the fixed
/// `long_duration`; each short image's duration comes from the progressive
/// ramp evaluated at the fraction of the target already accumulated.
///
/// The entry that would overshoot the target is trimmed so the total lands
/// on `target_duration` exactly; entries are never dropped once started and
/// every emitted duration is strictly positive.
pub fn build_sequence(
    short_pool: &[PathBuf],
    long_pool: &[PathBuf],
    target_duration: f64,
    timing: &TimingConfig,
) -> StillreelResult<Sequence> {
    timing.validate()?;
    if short_pool.is_empty() && long_pool.is_empty() {
        return Err(StillreelError::empty_input("both image pools are empty"));
    }
    if target_duration <= 0.0 {
        return Err(StillreelError::empty_input(format!(
            "target duration must be > 0 seconds, got {target_duration}"
        )));
    }

    let mut entries = Vec::new();
    let mut accumulated = 0.0f64;
    let mut short_idx = 0usize;
    let mut long_idx = 0usize;
    let mut take_long = !long_pool.is_empty();

    while target_duration - accumulated > MIN_ENTRY_SEC {
        let (image, raw_duration) = if take_long {
            let image = long_pool[long_idx % long_pool.len()].clone();
            long_idx += 1;
            (image, timing.long_duration)
        } else {
            let progress = (accumulated / target_duration).clamp(0.0, 1.0);
            let image = short_pool[short_idx % short_pool.len()].clone();
            short_idx += 1;
            (image, timing.short_duration_at(progress))
        };

        let duration = raw_duration.min(target_duration - accumulated);
        accumulated += duration;
        entries.push(SequenceEntry { image, duration });

        take_long = if short_pool.is_empty() {
            true
        } else if long_pool.is_empty() {
            false
        } else {
            !take_long
        };
    }

    Ok(Sequence { entries })
}
