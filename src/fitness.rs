//! Sum of squared per-channel differences over R, G, B.
//!
//! Alpha of the candidate buffer is ignored: scoring happens on straight
//! (un-premultiplied) RGBA where coverage is already folded into the color
//! channels by the renderer. The score is an absolute magnitude, only
//! comparable against other scores from the same target.

use rayon::prelude::*;

/// rayon work unit, in pixels. coarse chunks keep per-task overhead low
/// on the small working-resolution buffers
const MIN_CHUNK: usize = 16 * 1024;

/// Squared-error dissimilarity between two same-sized RGBA buffers.
///
/// Lower is better; zero means a pixel-perfect RGB match. Pure and linear in
/// pixel count.
///
/// # Panics
///
/// Panics if the buffers differ in length or are not a whole number of
/// 4-byte RGBA pixels — that is a collaborator contract violation, not a
/// recoverable condition.
pub fn sse_rgb(a: &[u8], b: &[u8]) -> f64 {
    profiling::scope!("sse_rgb");
    assert_eq!(a.len(), b.len(), "fitness buffers must have identical dimensions");
    assert_eq!(a.len() % 4, 0, "fitness buffers must be RGBA (4 bytes per pixel)");

    let total: u64 = a
        .par_chunks_exact(4)
        .zip(b.par_chunks_exact(4))
        .with_min_len(MIN_CHUNK)
        .map(|(pa, pb)| {
            let dr = pa[0] as i64 - pb[0] as i64;
            let dg = pa[1] as i64 - pb[1] as i64;
            let db = pa[2] as i64 - pb[2] as i64;
            (dr * dr + dg * dg + db * db) as u64
        })
        .sum();

    total as f64
}

/// Target vs. rendered channel values at one pixel, with that pixel's
/// squared-error contribution. Backs the external inspection panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelProbe {
    pub x: u32,
    pub y: u32,
    pub target: [u8; 3],
    pub current: [u8; 3],
    pub error: u32,
}

/// Read one pixel out of both buffers and compute its score contribution.
/// `width` is the buffer stride in pixels; `x` and `y` must be in bounds.
pub fn probe_pixel(target: &[u8], current: &[u8], x: u32, y: u32, width: u32) -> PixelProbe {
    let i = ((y * width + x) * 4) as usize;
    let t = [target[i], target[i + 1], target[i + 2]];
    let c = [current[i], current[i + 1], current[i + 2]];
    let error = (0..3)
        .map(|k| {
            let d = t[k] as i32 - c[k] as i32;
            (d * d) as u32
        })
        .sum();
    PixelProbe { x, y, target: t, current: c, error }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_2x2_buffers_score_zero() {
        let buf: Vec<u8> = (0..2 * 2 * 4).map(|i| (i * 13 % 256) as u8).collect();
        assert_eq!(sse_rgb(&buf, &buf), 0.0);
    }

    #[test]
    fn score_is_symmetric() {
        let a = vec![10u8, 20, 30, 255, 0, 0, 0, 255];
        let b = vec![15u8, 18, 99, 255, 1, 2, 3, 0];
        assert_eq!(sse_rgb(&a, &b), sse_rgb(&b, &a));
    }

    #[test]
    fn score_grows_with_single_channel_difference() {
        let target = vec![0u8, 0, 0, 255];
        let mut prev = -1.0;
        for r in [1u8, 5, 50, 200, 255] {
            let cand = vec![r, 0, 0, 255];
            let score = sse_rgb(&cand, &target);
            assert!(score > prev);
            prev = score;
        }
    }

    #[test]
    fn alpha_differences_are_ignored() {
        let a = vec![10u8, 20, 30, 0];
        let b = vec![10u8, 20, 30, 255];
        assert_eq!(sse_rgb(&a, &b), 0.0);
    }

    #[test]
    fn known_difference_scores_exactly() {
        // (3-1)^2 + (5-1)^2 + (9-1)^2 = 4 + 16 + 64
        let a = vec![3u8, 5, 9, 255];
        let b = vec![1u8, 1, 1, 255];
        assert_eq!(sse_rgb(&a, &b), 84.0);
    }

    #[test]
    #[should_panic(expected = "identical dimensions")]
    fn mismatched_buffers_panic() {
        let a = vec![0u8; 8];
        let b = vec![0u8; 16];
        sse_rgb(&a, &b);
    }

    #[test]
    fn probe_reports_channels_and_error() {
        // 2x1 buffer, probe pixel (1, 0)
        let target = vec![0u8, 0, 0, 255, 255, 0, 0, 255];
        let current = vec![0u8, 0, 0, 255, 250, 3, 0, 255];
        let probe = probe_pixel(&target, &current, 1, 0, 2);
        assert_eq!(probe.target, [255, 0, 0]);
        assert_eq!(probe.current, [250, 3, 0]);
        assert_eq!(probe.error, 25 + 9);
    }
}
