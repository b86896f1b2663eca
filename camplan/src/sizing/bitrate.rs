//! Per-camera stream bitrate estimation.

use camplan_types::StreamSpec;

use super::policy::BitratePolicy;

/// Unrounded model estimate in kbps, ignoring any datasheet bitrate.
///
/// ```text
/// megapixels * kbps_per_megapixel * codec_factor * (fps / baseline_fps) * complexity_factor
/// ```
pub fn estimate_bitrate_kbps(spec: &StreamSpec, policy: &BitratePolicy) -> f64 {
    let base = spec.resolution_megapixels * policy.kbps_per_megapixel;
    let fps_factor = spec.fps / policy.baseline_fps;
    base * policy.codec_factor(spec.codec)
        * fps_factor
        * policy.complexity_factor(spec.scene_complexity)
}

/// Estimated stream bitrate in kbps.
///
/// A datasheet bitrate on the stream is returned unchanged. Otherwise the
/// [`estimate_bitrate_kbps`] value is rounded to the nearest kbps, so the
/// H.265 result is half the H.264 one to within 1 kbps.
pub fn compute_bitrate(spec: &StreamSpec, policy: &BitratePolicy) -> u32 {
    if let Some(pinned) = spec.bitrate_kbps {
        return pinned;
    }

    // Saturating cast: negative or NaN inputs collapse to zero
    estimate_bitrate_kbps(spec, policy).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use camplan_types::{Codec, SceneComplexity};

    fn policy() -> BitratePolicy {
        BitratePolicy::default()
    }

    #[test]
    fn test_override_short_circuits() {
        let spec = StreamSpec::new(12.0, 60.0, Codec::H264, SceneComplexity::High)
            .with_bitrate_kbps(4000);
        assert_eq!(compute_bitrate(&spec, &policy()), 4000);

        let spec = StreamSpec::new(0.0, 0.0, Codec::H265, SceneComplexity::Low)
            .with_bitrate_kbps(4000);
        assert_eq!(compute_bitrate(&spec, &policy()), 4000);
    }

    #[test]
    fn test_baseline_stream() {
        let spec = StreamSpec::new(2.0, 30.0, Codec::H264, SceneComplexity::Medium);
        assert_eq!(compute_bitrate(&spec, &policy()), 2048);
    }

    #[test]
    fn test_h265_halves_h264() {
        // 2 MP @ 25 fps rounds to an odd H.264 rate: 1707 vs 853
        for (megapixels, fps) in [(2.0, 30.0), (2.0, 25.0), (4.0, 15.0), (8.0, 20.0)] {
            for complexity in [
                SceneComplexity::Low,
                SceneComplexity::Medium,
                SceneComplexity::High,
            ] {
                let h264 = StreamSpec::new(megapixels, fps, Codec::H264, complexity);
                let h265 = StreamSpec::new(megapixels, fps, Codec::H265, complexity);

                assert_eq!(
                    estimate_bitrate_kbps(&h265, &policy()),
                    estimate_bitrate_kbps(&h264, &policy()) / 2.0,
                    "{megapixels} MP @ {fps} fps {complexity:?}"
                );

                let h264 = compute_bitrate(&h264, &policy()) as i64;
                let h265 = compute_bitrate(&h265, &policy()) as i64;
                assert!(
                    (h265 * 2 - h264).abs() <= 1,
                    "{megapixels} MP @ {fps} fps {complexity:?}: {h264} vs {h265}"
                );
            }
        }

        let odd = StreamSpec::new(2.0, 25.0, Codec::H264, SceneComplexity::Medium);
        assert_eq!(compute_bitrate(&odd, &policy()), 1707);
        let odd = StreamSpec::new(2.0, 25.0, Codec::H265, SceneComplexity::Medium);
        assert_eq!(compute_bitrate(&odd, &policy()), 853);
    }

    #[test]
    fn test_fps_and_complexity_scale() {
        // 4 MP * 1024 * (15 / 30) * 0.7
        let spec = StreamSpec::new(4.0, 15.0, Codec::H264, SceneComplexity::Low);
        assert_eq!(compute_bitrate(&spec, &policy()), 1434);

        // 4 MP * 1024 * 0.5 * (25 / 30) * 1.3
        let spec = StreamSpec::new(4.0, 25.0, Codec::H265, SceneComplexity::High);
        assert_eq!(compute_bitrate(&spec, &policy()), 2219);
    }

    #[test]
    fn test_negative_input_saturates() {
        let spec = StreamSpec::new(-2.0, 30.0, Codec::H264, SceneComplexity::Medium);
        assert_eq!(compute_bitrate(&spec, &policy()), 0);
    }
}
