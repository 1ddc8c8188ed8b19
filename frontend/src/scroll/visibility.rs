/// One intersection reading for a section, as delivered by the browser.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilitySample {
    pub index: usize,
    pub ratio: f64,
    pub is_intersecting: bool,
}

/// Picks the most visible intersecting section of a batch. Equal ratios go to
/// the sample that came last in the batch.
pub fn most_visible(samples: &[VisibilitySample]) -> Option<usize> {
    samples
        .iter()
        .filter(|s| s.is_intersecting && s.ratio > 0.0)
        .max_by(|a, b| a.ratio.total_cmp(&b.ratio))
        .map(|s| s.index)
}

/// Single-slot debounce keyed on caller supplied timestamps. Arming replaces
/// whatever was pending.
#[derive(Clone, Debug, PartialEq)]
pub struct Debounced<T> {
    pending: Option<(T, f64)>,
}

impl<T> Default for Debounced<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> Debounced<T> {
    pub fn arm(&mut self, value: T, due_ms: f64) {
        self.pending = Some((value, due_ms));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn deadline(&self) -> Option<f64> {
        self.pending.as_ref().map(|(_, due)| *due)
    }

    /// Takes the pending value once its deadline has passed.
    pub fn take_due(&mut self, now_ms: f64) -> Option<T> {
        match self.pending {
            Some((_, due)) if now_ms >= due => self.pending.take().map(|(v, _)| v),
            _ => None,
        }
    }
}
