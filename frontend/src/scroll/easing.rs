//! Easing curves for programmatic scrolls.

/// Quadratic ease-in-out ("power2.inOut"): f(t) = 2t² for t < 0.5,
/// 1 - (-2t + 2)² / 2 otherwise.
#[inline]
pub fn power2_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        let inv = -2.0 * t + 2.0;
        1.0 - inv * inv / 2.0
    }
}

/// Linear interpolation between two scroll offsets.
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_and_midpoint() {
        assert!((power2_in_out(0.0) - 0.0).abs() < 1e-9);
        assert!((power2_in_out(0.5) - 0.5).abs() < 1e-9);
        assert!((power2_in_out(1.0) - 1.0).abs() < 1e-9);
        assert_eq!(power2_in_out(-3.0), 0.0);
        assert_eq!(power2_in_out(7.0), 1.0);
    }

    #[test]
    fn test_monotonic() {
        let mut prev = 0.0;
        for i in 0..=20 {
            let v = power2_in_out(i as f64 / 20.0);
            assert!(v >= prev, "not monotonic at step {}", i);
            prev = v;
        }
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(100.0, 300.0, 0.25), 150.0);
        assert_eq!(lerp(300.0, 100.0, 1.0), 100.0);
    }
}
