//! One-shot "has this entered the viewport yet" gate.
//!
//! A [`RevealObserver`] owns at most one viewport watch. The first
//! intersection at or above the threshold flips it to revealed and
//! disconnects the watch; unmounting or dropping before that also
//! disconnects. Once revealed it never goes back.

use tracing::{trace, warn};

pub const DEFAULT_THRESHOLD: f64 = 0.1;

/// Browsers can report a threshold crossing slightly under the threshold.
const RATIO_TOLERANCE: f64 = 1e-3;

/// Host-side registration of an element with the viewport, e.g. a browser
/// `IntersectionObserver` or a terminal scroll tracker.
pub trait ViewportWatch {
    /// Starts delivering intersection ratios for the watched element.
    fn observe(&mut self, threshold: f64);

    /// Stops delivery. Called at most once per watch.
    fn disconnect(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    /// Not mounted yet.
    Idle,
    /// Mounted without an element; stays hidden for good.
    Detached,
    /// Watch registered, waiting for enough visibility.
    Watching,
    Revealed,
    /// Unmounted before ever becoming visible.
    Released,
}

#[derive(Debug)]
pub struct RevealObserver<W: ViewportWatch> {
    threshold: f64,
    phase: RevealPhase,
    watch: Option<W>,
}

impl<W: ViewportWatch> Default for RevealObserver<W> {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl<W: ViewportWatch> RevealObserver<W> {
    /// `threshold` is the fraction of the element that must be on screen.
    pub fn new(threshold: f64) -> Self {
        let threshold = if threshold.is_finite() {
            threshold.clamp(0.0, 1.0)
        } else {
            DEFAULT_THRESHOLD
        };
        Self {
            threshold,
            phase: RevealPhase::Idle,
            watch: None,
        }
    }

    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    pub const fn phase(&self) -> RevealPhase {
        self.phase
    }

    pub const fn is_revealed(&self) -> bool {
        matches!(self.phase, RevealPhase::Revealed)
    }

    /// The live watch, if one is registered.
    pub const fn watch(&self) -> Option<&W> {
        self.watch.as_ref()
    }

    /// Registers `target` with the viewport. A missing target is accepted
    /// and leaves the observer hidden forever. Mounting twice is ignored.
    pub fn mount(&mut self, target: Option<W>) {
        if self.phase != RevealPhase::Idle {
            warn!(phase = ?self.phase, "reveal observer mounted twice, ignoring");
            return;
        }
        match target {
            None => {
                trace!("reveal target missing, staying hidden");
                self.phase = RevealPhase::Detached;
            }
            Some(mut watch) => {
                watch.observe(self.threshold);
                self.watch = Some(watch);
                self.phase = RevealPhase::Watching;
            }
        }
    }

    /// Feeds one intersection ratio. Returns `true` only on the call that
    /// reveals the element; ratios arriving in any other phase are ignored.
    ///
    /// Some part of the element must be on screen, so a threshold of zero
    /// still waits for a positive ratio. Ratios a hair under the threshold
    /// count as reaching it.
    pub fn on_intersection(&mut self, ratio: f64) -> bool {
        if self.phase != RevealPhase::Watching {
            return false;
        }
        if ratio > 0.0 && ratio >= self.threshold - RATIO_TOLERANCE {
            trace!(ratio, threshold = self.threshold, "element revealed");
            self.phase = RevealPhase::Revealed;
            self.release();
            return true;
        }
        false
    }

    pub fn unmount(&mut self) {
        self.release();
        if matches!(self.phase, RevealPhase::Watching | RevealPhase::Detached) {
            self.phase = RevealPhase::Released;
        }
    }

    fn release(&mut self) {
        if let Some(mut watch) = self.watch.take() {
            watch.disconnect();
        }
    }
}

impl<W: ViewportWatch> Drop for RevealObserver<W> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Fraction of an element's extent inside the viewport along one axis.
pub fn visible_ratio(element_start: f64, element_len: f64, view_start: f64, view_len: f64) -> f64 {
    if element_len <= 0.0 {
        return 0.0;
    }
    let overlap = (element_start + element_len).min(view_start + view_len)
        - element_start.max(view_start);
    (overlap / element_len).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct CountingWatch {
        observed: u32,
        disconnected: u32,
    }

    impl ViewportWatch for CountingWatch {
        fn observe(&mut self, _threshold: f64) {
            self.observed += 1;
        }

        fn disconnect(&mut self) {
            self.disconnected += 1;
        }
    }

    #[test]
    fn reveals_once_at_threshold() {
        let mut observer = RevealObserver::new(0.25);
        observer.mount(Some(CountingWatch::default()));
        assert_eq!(observer.watch().map(|watch| watch.observed), Some(1));

        assert!(!observer.on_intersection(0.1));
        assert!(!observer.is_revealed());
        assert!(observer.on_intersection(0.25));
        assert!(observer.is_revealed());
        assert!(observer.watch().is_none());

        assert!(!observer.on_intersection(0.0));
        assert!(!observer.on_intersection(1.0));
        assert!(observer.is_revealed());
    }

    #[test]
    fn missing_target_stays_hidden() {
        let mut observer: RevealObserver<CountingWatch> = RevealObserver::default();
        observer.mount(None);
        assert_eq!(observer.phase(), RevealPhase::Detached);
        assert!(!observer.on_intersection(1.0));
        assert!(!observer.is_revealed());
    }

    #[test]
    fn unmount_before_reveal_releases() {
        let mut observer = RevealObserver::new(0.5);
        observer.mount(Some(CountingWatch::default()));
        observer.unmount();
        assert_eq!(observer.phase(), RevealPhase::Released);
        assert!(observer.watch().is_none());
        assert!(!observer.on_intersection(1.0));
    }

    #[test]
    fn second_mount_is_ignored() {
        let mut observer = RevealObserver::new(0.5);
        observer.mount(Some(CountingWatch::default()));
        observer.mount(Some(CountingWatch {
            observed: 40,
            disconnected: 0,
        }));
        assert_eq!(observer.watch().map(|watch| watch.observed), Some(1));
    }

    #[test]
    fn crossing_reported_just_under_threshold_reveals() {
        let mut observer = RevealObserver::new(0.1);
        observer.mount(Some(CountingWatch::default()));
        assert!(!observer.on_intersection(0.05));
        assert!(observer.on_intersection(0.0999));
        assert!(observer.is_revealed());
    }

    #[test]
    fn threshold_is_sanitised() {
        assert_eq!(RevealObserver::<CountingWatch>::new(3.0).threshold(), 1.0);
        assert_eq!(RevealObserver::<CountingWatch>::new(-1.0).threshold(), 0.0);
        assert_eq!(
            RevealObserver::<CountingWatch>::new(f64::NAN).threshold(),
            DEFAULT_THRESHOLD
        );
    }

    #[test]
    fn zero_threshold_needs_some_visibility() {
        let mut observer = RevealObserver::new(0.0);
        observer.mount(Some(CountingWatch::default()));
        assert!(!observer.on_intersection(0.0));
        assert!(observer.on_intersection(0.01));
    }

    #[test]
    fn visible_ratio_measures_overlap() {
        assert_eq!(visible_ratio(0.0, 10.0, 0.0, 100.0), 1.0);
        assert_eq!(visible_ratio(95.0, 10.0, 0.0, 100.0), 0.5);
        assert_eq!(visible_ratio(150.0, 10.0, 0.0, 100.0), 0.0);
        assert_eq!(visible_ratio(-5.0, 10.0, 0.0, 100.0), 0.5);
        assert_eq!(visible_ratio(0.0, 0.0, 0.0, 100.0), 0.0);
    }
}
