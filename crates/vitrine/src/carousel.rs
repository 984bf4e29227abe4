use std::time::{Duration, Instant};

use thiserror::Error;

/// Default auto-rotation period.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(5000);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavError {
    #[error("slide index {index} out of range (gallery has {count} slides)")]
    OutOfRange { index: usize, count: usize },
}

/// Slide-index state machine for the showcase carousel.
///
/// Owns the active index and the auto-rotation deadline. All transitions are
/// synchronous; the caller drives time by passing `Instant`s into
/// [`Carousel::tick`], so the controller never reads the clock itself.
///
/// A carousel built over zero slides is inert: every operation is a no-op.
#[derive(Debug)]
pub struct Carousel {
    current: usize,
    count: usize,
    interval: Duration,
    /// When the next automatic advance fires. `None` while rotation is
    /// stopped or suspended. At most one deadline exists at a time; arming
    /// replaces any previous one.
    deadline: Option<Instant>,
    /// Master switch. Hover suspends rotation without flipping this, so
    /// pointer-leave knows whether to re-arm.
    enabled: bool,
}

impl Carousel {
    pub fn new(count: usize, interval: Duration) -> Self {
        Self {
            current: 0,
            count,
            interval,
            deadline: None,
            enabled: false,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// The active-marker contract: exactly one index is active, and it is
    /// always the current one.
    pub fn is_active(&self, index: usize) -> bool {
        self.count > 0 && index == self.current
    }

    pub fn is_rotating(&self) -> bool {
        self.deadline.is_some()
    }

    /// Whether rotation is switched on at all, hover-suspended or not.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Deadline of the next automatic advance, for repaint scheduling.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Advance to the following slide, wrapping from last to first.
    pub fn next(&mut self) {
        if self.count == 0 {
            return;
        }
        self.current = (self.current + 1) % self.count;
    }

    /// Step back to the preceding slide, wrapping from first to last.
    /// Adds the modulus before taking the remainder so the index never
    /// goes negative.
    pub fn previous(&mut self) {
        if self.count == 0 {
            return;
        }
        self.current = (self.current + self.count - 1) % self.count;
    }

    /// Jump directly to `index`. Out-of-range input is rejected and leaves
    /// the state untouched.
    pub fn go_to(&mut self, index: usize) -> Result<(), NavError> {
        if index >= self.count {
            return Err(NavError::OutOfRange {
                index,
                count: self.count,
            });
        }
        self.current = index;
        Ok(())
    }

    /// Start (or restart) auto-rotation. Any existing deadline is replaced,
    /// so there is never more than one pending advance.
    pub fn start_auto(&mut self, now: Instant) {
        if self.count == 0 {
            return;
        }
        self.enabled = true;
        self.deadline = Some(now + self.interval);
    }

    /// Stop auto-rotation. Safe to call when already stopped.
    pub fn stop_auto(&mut self) {
        self.enabled = false;
        self.deadline = None;
    }

    /// Suspend rotation while the pointer is over the carousel. The master
    /// switch stays on, so [`Carousel::resume`] re-arms.
    pub fn pause(&mut self) {
        self.deadline = None;
    }

    /// Re-arm rotation after a hover pause, if rotation is enabled at all.
    pub fn resume(&mut self, now: Instant) {
        if self.enabled && self.count > 0 {
            self.deadline = Some(now + self.interval);
        }
    }

    /// Advance once if the deadline has passed, re-arming relative to `now`
    /// (a stalled frame loop yields one advance, not a burst). Returns
    /// whether an advance happened.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.next();
                self.deadline = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carousel(count: usize) -> Carousel {
        Carousel::new(count, DEFAULT_INTERVAL)
    }

    #[test]
    fn test_next_wraps() {
        let mut c = carousel(3);
        c.next();
        c.next();
        assert_eq!(c.current(), 2);
        c.next();
        assert_eq!(c.current(), 0, "next from last slide wraps to first");
    }

    #[test]
    fn test_previous_wraps() {
        let mut c = carousel(3);
        c.previous();
        assert_eq!(c.current(), 2, "previous from first slide wraps to last");
    }

    #[test]
    fn test_cyclic_invariant() {
        let mut c = carousel(5);
        for _ in 0..5 {
            c.next();
        }
        assert_eq!(c.current(), 0);

        // Arbitrary interleaving never escapes the valid range
        for i in 0..137 {
            if i % 3 == 0 {
                c.previous();
            } else {
                c.next();
            }
            assert!(c.current() < c.count());
        }
    }

    #[test]
    fn test_go_to_rejects_out_of_range() {
        let mut c = carousel(3);
        c.next();
        let err = c.go_to(3).unwrap_err();
        assert_eq!(err, NavError::OutOfRange { index: 3, count: 3 });
        assert_eq!(c.current(), 1, "failed go_to must not move the index");

        c.go_to(2).unwrap();
        assert_eq!(c.current(), 2);
    }

    #[test]
    fn test_empty_carousel_is_inert() {
        let mut c = carousel(0);
        c.next();
        c.previous();
        assert_eq!(c.current(), 0);
        assert!(c.go_to(0).is_err());

        let now = Instant::now();
        c.start_auto(now);
        assert!(!c.is_rotating());
        assert!(!c.tick(now + DEFAULT_INTERVAL));
    }

    #[test]
    fn test_exactly_one_active_marker() {
        let mut c = carousel(4);
        c.next();
        let active: Vec<usize> = (0..c.count()).filter(|&i| c.is_active(i)).collect();
        assert_eq!(active, vec![1]);
    }

    #[test]
    fn test_tick_advances_once_per_interval() {
        let t0 = Instant::now();
        let mut c = carousel(3);
        c.start_auto(t0);

        assert!(!c.tick(t0 + Duration::from_millis(4999)));
        assert_eq!(c.current(), 0);

        assert!(c.tick(t0 + Duration::from_millis(5000)));
        assert_eq!(c.current(), 1);

        // Re-armed: the very next tick does nothing
        assert!(!c.tick(t0 + Duration::from_millis(5001)));
        assert_eq!(c.current(), 1);
    }

    #[test]
    fn test_restart_replaces_deadline() {
        let t0 = Instant::now();
        let mut c = carousel(3);
        c.start_auto(t0);
        // Restarting 3s in pushes the deadline out; the original 5s mark
        // must not fire.
        c.start_auto(t0 + Duration::from_secs(3));
        assert!(!c.tick(t0 + Duration::from_millis(5500)));
        assert!(c.tick(t0 + Duration::from_secs(8)));
    }

    #[test]
    fn test_hover_suppresses_rotation() {
        let t0 = Instant::now();
        let mut c = carousel(3);
        c.start_auto(t0);

        c.pause();
        assert!(!c.is_rotating());
        assert!(!c.tick(t0 + Duration::from_secs(60)));
        assert_eq!(c.current(), 0, "no advance while hovered");

        let t1 = t0 + Duration::from_secs(61);
        c.resume(t1);
        assert!(c.is_rotating());
        assert!(!c.tick(t1 + Duration::from_millis(100)));
        assert!(c.tick(t1 + DEFAULT_INTERVAL));
        assert_eq!(c.current(), 1);
    }

    #[test]
    fn test_resume_without_enable_stays_stopped() {
        let mut c = carousel(3);
        c.resume(Instant::now());
        assert!(!c.is_rotating(), "resume must not start a stopped carousel");
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut c = carousel(3);
        c.stop_auto();
        c.stop_auto();
        assert!(!c.is_rotating());
    }
}
