/// Display duration at `progress` through the timeline, interpolated between
/// `start_duration` and `end_duration`.
///
/// The ramp is warped by `acceleration` as `t = progress^acceleration`:
/// values above 1.0 push the ramp toward `end_duration` early, values below
/// 1.0 hold `start_duration` longer, and 1.0 is a straight lerp. Endpoints
/// are exact: progress 0.0 yields `start_duration` and 1.0 yields
/// `end_duration` for any valid acceleration.
///
/// `progress` must already be in [0, 1]; out-of-range values are a caller bug
/// and are clamped after the debug assertion.
pub fn progressive_duration(
    progress: f64,
    start_duration: f64,
    end_duration: f64,
    acceleration: f64,
) -> f64 {
    debug_assert!(
        (0.0..=1.0).contains(&progress),
        "progress {progress} out of [0, 1]"
    );
    let t = progress.clamp(0.0, 1.0).powf(acceleration);
    start_duration + (end_duration - start_duration) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        for accel in [0.5, 1.0, 2.0, 4.0] {
            assert_eq!(progressive_duration(0.0, 1.0, 0.2, accel), 1.0);
            assert_eq!(progressive_duration(1.0, 1.0, 0.2, accel), 0.2);
        }
    }

    #[test]
    fn linear_midpoint() {
        let mid = progressive_duration(0.5, 1.0, 0.2, 1.0);
        assert!((mid - 0.6).abs() < 1e-12);
    }

    #[test]
    fn acceleration_compresses_toward_end() {
        let linear = progressive_duration(0.5, 1.0, 0.2, 1.0);
        let accel = progressive_duration(0.5, 1.0, 0.2, 2.0);
        let faster = progressive_duration(0.5, 1.0, 0.2, 4.0);
        assert!(accel < linear);
        assert!(faster < accel);
    }

    #[test]
    fn deceleration_holds_start_longer() {
        let linear = progressive_duration(0.5, 1.0, 0.2, 1.0);
        let decel = progressive_duration(0.5, 1.0, 0.2, 0.5);
        assert!(decel > linear);
    }

    #[test]
    fn equal_bounds_are_constant() {
        for progress in [0.0, 0.25, 0.5, 0.75, 1.0] {
            assert_eq!(progressive_duration(progress, 0.5, 0.5, 2.0), 0.5);
        }
    }

    #[test]
    fn monotonic_spot_check() {
        for accel in [0.5, 1.0, 2.0] {
            let a = progressive_duration(0.25, 1.0, 0.2, accel);
            let b = progressive_duration(0.5, 1.0, 0.2, accel);
            let c = progressive_duration(0.75, 1.0, 0.2, accel);
            assert!(a > b);
            assert!(b > c);
        }
    }
}
