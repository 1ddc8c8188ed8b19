use log::debug;

use super::config::ScrollConfig;
use super::easing::{lerp, power2_in_out};
use super::visibility::{most_visible, Debounced, VisibilitySample};
use crate::sections::SectionRegistry;

/// The scrollable page, as far as the coordinator needs to see it.
pub trait Viewport {
    /// Current vertical scroll offset.
    fn scroll_y(&self) -> f64;
    /// Document offset of the top of a section, if its element exists.
    fn section_top(&self, index: usize) -> Option<f64>;
    fn scroll_to(&mut self, y: f64);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavKey {
    Down,
    Up,
}

impl NavKey {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowDown" => Some(NavKey::Down),
            "ArrowUp" => Some(NavKey::Up),
            _ => None,
        }
    }
}

/// What happened to an in-page link click.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkOutcome {
    /// Not a link to a known section; the browser handles it.
    NotSection,
    /// A scroll to the section started.
    Scrolling,
    /// A known section, but no scroll was started (one is already running).
    Dropped,
}

impl LinkOutcome {
    pub fn prevents_default(self) -> bool {
        !matches!(self, LinkOutcome::NotSection)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Idle,
    Continue,
    Finished,
}

#[derive(Clone, Debug, PartialEq)]
struct ScrollAnimation {
    target: usize,
    from: f64,
    to: f64,
    start_ms: f64,
    duration_ms: f64,
}

impl ScrollAnimation {
    fn end_ms(&self) -> f64 {
        self.start_ms + self.duration_ms
    }

    fn progress(&self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0)
    }

    fn position_at(&self, now_ms: f64) -> f64 {
        lerp(self.from, self.to, power2_in_out(self.progress(now_ms)))
    }
}

#[derive(Clone, Debug, PartialEq)]
enum ScrollPhase {
    Idle,
    Animating(ScrollAnimation),
    /// Animation done; observer reports stay suppressed until `until_ms`.
    Settling { until_ms: f64 },
}

/// Owns the current section and is the only thing that starts animated
/// scrolls.
///
/// Time is passed in by the caller. After every call the caller should wake
/// the coordinator through [`ScrollCoordinator::poll`] at
/// [`ScrollCoordinator::next_deadline`], and feed animation frames while
/// [`ScrollCoordinator::is_animating`] holds.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollCoordinator {
    config: ScrollConfig,
    section_count: usize,
    current_index: usize,
    phase: ScrollPhase,
    consumed_initial_hash: bool,
    pending_report: Debounced<usize>,
}

impl ScrollCoordinator {
    pub fn new(section_count: usize, config: ScrollConfig) -> Self {
        Self {
            config,
            section_count,
            current_index: 0,
            phase: ScrollPhase::Idle,
            consumed_initial_hash: false,
            pending_report: Debounced::default(),
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn section_count(&self) -> usize {
        self.section_count
    }

    pub fn is_programmatic_scroll_in_flight(&self) -> bool {
        !matches!(self.phase, ScrollPhase::Idle)
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.phase, ScrollPhase::Animating(_))
    }

    pub fn has_consumed_initial_hash(&self) -> bool {
        self.consumed_initial_hash
    }

    /// Deep-link handling, effective once per page load. Returns the index to
    /// reveal when the fragment names a known section; the caller scrolls it
    /// into view on the next frame.
    pub fn handle_initial_hash(
        &mut self,
        fragment: &str,
        registry: &SectionRegistry,
    ) -> Option<usize> {
        if self.consumed_initial_hash {
            return None;
        }
        self.consumed_initial_hash = true;

        let index = registry
            .index_of_fragment(fragment)
            .filter(|&i| i < self.section_count)?;
        debug!("initial fragment {} selects section index {}", fragment, index);
        self.current_index = index;
        Some(index)
    }

    /// Starts an animated scroll to `index`. Returns false when nothing was
    /// started: index out of range, a scroll already running, or no element
    /// to scroll to.
    pub fn scroll_to_section(
        &mut self,
        index: usize,
        now_ms: f64,
        viewport: &impl Viewport,
    ) -> bool {
        if index >= self.section_count {
            debug!("scroll to index {} ignored, {} sections", index, self.section_count);
            return false;
        }
        if self.is_programmatic_scroll_in_flight() {
            debug!("scroll to index {} dropped, scroll in flight", index);
            return false;
        }
        let Some(to) = viewport.section_top(index) else {
            debug!("no element for section index {}", index);
            return false;
        };

        self.pending_report.cancel();
        self.phase = ScrollPhase::Animating(ScrollAnimation {
            target: index,
            from: viewport.scroll_y(),
            to,
            start_ms: now_ms,
            duration_ms: self.config.animation_ms,
        });
        true
    }

    /// Moves the viewport along the running animation.
    pub fn on_animation_frame(&mut self, now_ms: f64, viewport: &mut impl Viewport) -> FrameOutcome {
        let (position, end_ms) = match &self.phase {
            ScrollPhase::Animating(animation) => (animation.position_at(now_ms), animation.end_ms()),
            _ => return FrameOutcome::Idle,
        };
        viewport.scroll_to(position);
        if now_ms < end_ms {
            return FrameOutcome::Continue;
        }
        self.finish_animation(now_ms);
        FrameOutcome::Finished
    }

    fn finish_animation(&mut self, now_ms: f64) {
        let target = match &self.phase {
            ScrollPhase::Animating(animation) => animation.target,
            _ => return,
        };
        self.current_index = target;
        self.phase = ScrollPhase::Settling {
            until_ms: now_ms + self.config.settle_ms,
        };
    }

    /// A batch of intersection readings. Returns true when a report was
    /// queued behind the debounce.
    pub fn on_visibility_batch(&mut self, samples: &[VisibilitySample], now_ms: f64) -> bool {
        if self.is_programmatic_scroll_in_flight() {
            return false;
        }
        let in_range: Vec<VisibilitySample> = samples
            .iter()
            .copied()
            .filter(|s| s.index < self.section_count)
            .collect();
        match most_visible(&in_range) {
            Some(index) => {
                self.pending_report.arm(index, now_ms + self.config.debounce_ms);
                true
            }
            None => false,
        }
    }

    /// A debounced observer report. Returns true when the current section
    /// changed.
    pub fn on_observer_report(&mut self, index: usize) -> bool {
        if self.is_programmatic_scroll_in_flight() || index >= self.section_count {
            return false;
        }
        if self.current_index == index {
            return false;
        }
        self.current_index = index;
        true
    }

    /// Fires whatever deadlines have passed. Returns the new current index if
    /// it changed.
    pub fn poll(&mut self, now_ms: f64, viewport: &mut impl Viewport) -> Option<usize> {
        let before = self.current_index;

        let overdue = match &self.phase {
            ScrollPhase::Animating(animation) if now_ms >= animation.end_ms() => Some(animation.to),
            _ => None,
        };
        if let Some(to) = overdue {
            viewport.scroll_to(to);
            self.finish_animation(now_ms);
        }
        if let Some(index) = self.pending_report.take_due(now_ms) {
            self.on_observer_report(index);
        }
        if let ScrollPhase::Settling { until_ms } = self.phase {
            if now_ms >= until_ms {
                self.phase = ScrollPhase::Idle;
            }
        }

        (self.current_index != before).then_some(self.current_index)
    }

    pub fn next_deadline(&self) -> Option<f64> {
        let phase_deadline = match &self.phase {
            ScrollPhase::Idle => None,
            ScrollPhase::Animating(animation) => Some(animation.end_ms()),
            ScrollPhase::Settling { until_ms } => Some(*until_ms),
        };
        match (phase_deadline, self.pending_report.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn on_hash_link_click(
        &mut self,
        href: &str,
        registry: &SectionRegistry,
        now_ms: f64,
        viewport: &impl Viewport,
    ) -> LinkOutcome {
        let Some(index) = registry.index_of_fragment(href) else {
            return LinkOutcome::NotSection;
        };
        if self.scroll_to_section(index, now_ms, viewport) {
            LinkOutcome::Scrolling
        } else {
            LinkOutcome::Dropped
        }
    }

    /// Arrow key navigation. Returns true when the key was handled and the
    /// page should not scroll by itself.
    pub fn on_key_down(&mut self, key: NavKey, now_ms: f64, viewport: &impl Viewport) -> bool {
        if self.is_programmatic_scroll_in_flight() {
            return false;
        }
        let target = match key {
            NavKey::Down if self.current_index + 1 < self.section_count => self.current_index + 1,
            NavKey::Up if self.current_index > 0 => self.current_index - 1,
            _ => return false,
        };
        self.scroll_to_section(target, now_ms, viewport);
        true
    }

    pub fn teardown(&mut self) {
        self.pending_report.cancel();
        self.phase = ScrollPhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME_MS: f64 = 16.0;

    struct FakeViewport {
        y: f64,
        tops: Vec<f64>,
        scrolls: usize,
    }

    impl FakeViewport {
        fn with_sections(count: usize) -> Self {
            Self {
                y: 0.0,
                tops: (0..count).map(|i| i as f64 * 1000.0).collect(),
                scrolls: 0,
            }
        }
    }

    impl Viewport for FakeViewport {
        fn scroll_y(&self) -> f64 {
            self.y
        }

        fn section_top(&self, index: usize) -> Option<f64> {
            self.tops.get(index).copied()
        }

        fn scroll_to(&mut self, y: f64) {
            self.y = y;
            self.scrolls += 1;
        }
    }

    fn setup() -> (ScrollCoordinator, FakeViewport, SectionRegistry) {
        let registry = SectionRegistry::facility();
        let coordinator = ScrollCoordinator::new(registry.len(), ScrollConfig::default());
        (coordinator, FakeViewport::with_sections(registry.len()), registry)
    }

    fn run_frames(c: &mut ScrollCoordinator, v: &mut FakeViewport, from: f64, until: f64) -> f64 {
        let mut now = from;
        while c.is_animating() && now < until {
            now += FRAME_MS;
            c.on_animation_frame(now, v);
        }
        now
    }

    fn sample(index: usize, ratio: f64) -> VisibilitySample {
        VisibilitySample { index, ratio, is_intersecting: true }
    }

    #[test]
    fn scroll_holds_flag_for_animation_plus_settle() {
        let (mut c, mut v, _) = setup();
        assert!(c.scroll_to_section(3, 0.0, &v));
        assert!(c.is_programmatic_scroll_in_flight());

        let finished_at = run_frames(&mut c, &mut v, 0.0, 5000.0);
        assert!(finished_at >= 1200.0);
        assert_eq!(v.y, 3000.0);
        assert_eq!(c.current_index(), 3);

        assert_eq!(c.next_deadline(), Some(finished_at + 200.0));
        c.poll(finished_at + 199.0, &mut v);
        assert!(c.is_programmatic_scroll_in_flight());
        c.poll(finished_at + 200.0, &mut v);
        assert!(!c.is_programmatic_scroll_in_flight());
        assert!(finished_at + 200.0 >= 1400.0);
    }

    #[test]
    fn animation_follows_ease_in_out() {
        let (mut c, mut v, _) = setup();
        c.scroll_to_section(2, 0.0, &v);
        c.on_animation_frame(600.0, &mut v);
        assert!((v.y - 1000.0).abs() < 1e-6);
        c.on_animation_frame(300.0, &mut v);
        assert!(v.y < 500.0);
    }

    #[test]
    fn poll_completes_an_animation_without_frames() {
        let (mut c, mut v, _) = setup();
        c.scroll_to_section(5, 0.0, &v);
        assert_eq!(c.next_deadline(), Some(1200.0));
        assert_eq!(c.poll(1200.0, &mut v), Some(5));
        assert_eq!(v.y, 5000.0);
        assert!(c.is_programmatic_scroll_in_flight());
        c.poll(1400.0, &mut v);
        assert!(!c.is_programmatic_scroll_in_flight());
    }

    #[test]
    fn out_of_range_scroll_changes_nothing() {
        let (mut c, v, _) = setup();
        let before = c.clone();
        assert!(!c.scroll_to_section(15, 0.0, &v));
        assert!(!c.scroll_to_section(usize::MAX, 0.0, &v));
        assert_eq!(c, before);
    }

    #[test]
    fn missing_element_means_no_scroll() {
        let (mut c, mut v, _) = setup();
        v.tops.truncate(4);
        assert!(!c.scroll_to_section(9, 0.0, &v));
        assert!(!c.is_programmatic_scroll_in_flight());
    }

    #[test]
    fn second_scroll_is_dropped_while_first_runs() {
        let (mut c, mut v, _) = setup();
        assert!(c.scroll_to_section(2, 0.0, &v));
        c.on_animation_frame(400.0, &mut v);
        assert!(!c.scroll_to_section(9, 500.0, &v));
        c.on_animation_frame(800.0, &mut v);
        assert_eq!(c.current_index(), 0);

        c.on_animation_frame(1200.0, &mut v);
        assert_eq!(c.current_index(), 2);
        assert_eq!(v.y, 2000.0);
    }

    #[test]
    fn initial_hash_is_consumed_once() {
        let (mut c, _, registry) = setup();
        assert_eq!(c.handle_initial_hash("#section-7", &registry), Some(6));
        assert_eq!(c.current_index(), 6);

        c.on_observer_report(2);
        assert_eq!(c.handle_initial_hash("#section-7", &registry), None);
        assert_eq!(c.current_index(), 2);
        assert!(c.has_consumed_initial_hash());
    }

    #[test]
    fn unknown_or_missing_hash_does_nothing() {
        let (mut c, _, registry) = setup();
        assert_eq!(c.handle_initial_hash("#contact", &registry), None);
        assert_eq!(c.current_index(), 0);
        assert!(c.has_consumed_initial_hash());

        let (mut c, _, registry) = setup();
        assert_eq!(c.handle_initial_hash("", &registry), None);
        assert!(c.has_consumed_initial_hash());
    }

    #[test]
    fn arrow_keys_stop_at_the_ends() {
        let (mut c, mut v, _) = setup();
        assert!(!c.on_key_down(NavKey::Up, 0.0, &v));
        assert!(!c.is_programmatic_scroll_in_flight());

        c.on_observer_report(14);
        assert!(!c.on_key_down(NavKey::Down, 0.0, &v));
        assert!(!c.is_programmatic_scroll_in_flight());

        assert!(c.on_key_down(NavKey::Up, 0.0, &v));
        run_frames(&mut c, &mut v, 0.0, 5000.0);
        assert_eq!(c.current_index(), 13);
    }

    #[test]
    fn arrow_keys_are_ignored_during_a_scroll() {
        let (mut c, v, _) = setup();
        assert!(c.on_key_down(NavKey::Down, 0.0, &v));
        assert!(!c.on_key_down(NavKey::Down, 100.0, &v));
        assert_eq!(NavKey::from_key("ArrowDown"), Some(NavKey::Down));
        assert_eq!(NavKey::from_key("PageDown"), None);
    }

    #[test]
    fn observer_reports_ignored_while_in_flight() {
        let (mut c, mut v, _) = setup();
        c.scroll_to_section(4, 0.0, &v);
        assert!(!c.on_observer_report(9));
        assert!(!c.on_visibility_batch(&[sample(9, 0.9)], 100.0));
        assert_eq!(c.current_index(), 0);

        c.on_animation_frame(1200.0, &mut v);
        assert!(!c.on_observer_report(9));
        assert_eq!(c.current_index(), 4);
    }

    #[test]
    fn pending_report_does_not_outlive_a_scroll_start() {
        let (mut c, mut v, _) = setup();
        assert!(c.on_visibility_batch(&[sample(8, 0.7)], 0.0));
        c.scroll_to_section(2, 50.0, &v);
        c.poll(150.0, &mut v);
        run_frames(&mut c, &mut v, 150.0, 5000.0);
        c.poll(10_000.0, &mut v);
        assert_eq!(c.current_index(), 2);
    }

    #[test]
    fn reports_within_debounce_window_collapse() {
        let (mut c, mut v, _) = setup();
        assert!(c.on_visibility_batch(&[sample(2, 0.3), sample(3, 0.2)], 0.0));
        assert!(c.on_visibility_batch(&[sample(3, 0.7)], 50.0));
        assert_eq!(c.next_deadline(), Some(150.0));

        assert_eq!(c.poll(120.0, &mut v), None);
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.poll(150.0, &mut v), Some(3));
        assert_eq!(c.poll(400.0, &mut v), None);
    }

    #[test]
    fn unknown_link_target_leaves_state_alone() {
        let (mut c, v, registry) = setup();
        let before = c.clone();
        let outcome = c.on_hash_link_click("#section-99", &registry, 0.0, &v);
        assert_eq!(outcome, LinkOutcome::NotSection);
        assert!(!outcome.prevents_default());
        assert_eq!(c, before);
        assert_eq!(v.scrolls, 0);
    }

    #[test]
    fn section_link_starts_scroll() {
        let (mut c, v, registry) = setup();
        let outcome = c.on_hash_link_click("#section-5", &registry, 0.0, &v);
        assert_eq!(outcome, LinkOutcome::Scrolling);
        assert!(outcome.prevents_default());

        let outcome = c.on_hash_link_click("#section-6", &registry, 10.0, &v);
        assert_eq!(outcome, LinkOutcome::Dropped);
        assert!(outcome.prevents_default());
    }

    #[test]
    fn teardown_clears_pending_work() {
        let (mut c, v, _) = setup();
        c.on_visibility_batch(&[sample(1, 0.5)], 0.0);
        c.scroll_to_section(3, 0.0, &v);
        c.teardown();
        assert_eq!(c.next_deadline(), None);
        assert!(!c.is_programmatic_scroll_in_flight());
    }
}
