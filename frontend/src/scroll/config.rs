/// Timing and observer settings for section scrolling.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollConfig {
    /// Length of a programmatic scroll animation.
    pub animation_ms: f64,
    /// Quiet period after an animation before observer reports count again.
    pub settle_ms: f64,
    /// Debounce window for observer reports.
    pub debounce_ms: f64,
    /// Delay before the observer is attached, so the sections have laid out.
    pub observer_delay_ms: u32,
    pub root_margin: &'static str,
    pub thresholds: &'static [f64],
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            animation_ms: 1200.0,
            settle_ms: 200.0,
            debounce_ms: 100.0,
            observer_delay_ms: 100,
            root_margin: "-20% 0px -20% 0px",
            thresholds: &[0.3, 0.7],
        }
    }
}

impl ScrollConfig {
    /// Earliest time after `start` at which a scroll can be fully settled.
    pub fn scroll_lock_ms(&self) -> f64 {
        self.animation_ms + self.settle_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_page_timings() {
        let config = ScrollConfig::default();
        assert_eq!(config.scroll_lock_ms(), 1400.0);
        assert_eq!(config.thresholds, &[0.3, 0.7]);
    }
}
