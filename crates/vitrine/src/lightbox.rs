use std::time::{Duration, Instant};

use eframe::egui::{Rect, Vec2};

use crate::gallery::Slide;
use crate::render::transition::{ease_in_out, lerp, lerp_rect};

/// Corner radius of the fully expanded view, in points.
const OPEN_RADIUS: f32 = 10.0;

/// Animation timing for the lightbox. Every constant the animation uses is
/// named here so callers can override them (config, tests).
#[derive(Debug, Clone, Copy)]
pub struct Timings {
    /// Length of the expand/collapse transform.
    pub expand: Duration,
    /// How far into the expansion the text content starts fading in; also
    /// the fade-out length when closing.
    pub content_delay: Duration,
    /// Delay between the close trigger and the start of the collapse.
    pub close_stagger: Duration,
    /// Cover-scale inflation factor.
    pub inflate: f32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            expand: Duration::from_millis(500),
            content_delay: Duration::from_millis(300),
            close_stagger: Duration::from_millis(50),
            inflate: 1.2,
        }
    }
}

/// Lifecycle of the expanded view. Each animated stretch carries its own
/// start instant; transitions out of the animated phases happen in
/// [`Lightbox::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Closed,
    Opening { since: Instant },
    Open,
    Closing { since: Instant },
}

/// Click-to-expand image view with a geometry-matched open/close animation.
///
/// On open it captures the clicked image's painted rect; the expansion
/// interpolates from that rect to a centered rect scaled to cover the
/// viewport, and the close animation runs the same path backwards while
/// morphing toward a circular silhouette.
///
/// Re-entrant triggers are no-ops: `open` only fires from `Closed`, `close`
/// only from `Open`. A close request during the opening animation is
/// deliberately ignored rather than queued, so rapid toggling cannot
/// interleave the two animations.
#[derive(Debug)]
pub struct Lightbox {
    phase: Phase,
    origin: Option<Rect>,
    content: Option<Slide>,
    timings: Timings,
}

impl Lightbox {
    pub fn new(timings: Timings) -> Self {
        Self {
            phase: Phase::Closed,
            origin: None,
            content: None,
            timings,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn timings(&self) -> &Timings {
        &self.timings
    }

    /// Visible in any phase except `Closed`; while visible the page behind
    /// is inert (no scrolling, no carousel input).
    pub fn is_visible(&self) -> bool {
        self.phase != Phase::Closed
    }

    pub fn is_open(&self) -> bool {
        self.phase == Phase::Open
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.phase, Phase::Opening { .. } | Phase::Closing { .. })
    }

    pub fn content(&self) -> Option<&Slide> {
        self.content.as_ref()
    }

    pub fn origin(&self) -> Option<Rect> {
        self.origin
    }

    /// Begin expanding from `origin`. No-op unless currently closed, so the
    /// first click wins until the view has fully closed again. Returns
    /// whether the open was accepted.
    pub fn open(&mut self, origin: Rect, slide: Slide, now: Instant) -> bool {
        if self.phase != Phase::Closed {
            return false;
        }
        self.origin = Some(origin);
        self.content = Some(slide);
        self.phase = Phase::Opening { since: now };
        true
    }

    /// Begin collapsing back to the origin rect. Only accepted while fully
    /// open; requests during the opening animation are dropped. Returns
    /// whether the close was accepted.
    pub fn close(&mut self, now: Instant) -> bool {
        if self.phase != Phase::Open {
            return false;
        }
        self.phase = Phase::Closing { since: now };
        true
    }

    /// Settle animated phases whose time is up.
    pub fn tick(&mut self, now: Instant) {
        match self.phase {
            Phase::Opening { since } if now >= since + self.timings.expand => {
                self.phase = Phase::Open;
            }
            Phase::Closing { since }
                if now >= since + self.timings.close_stagger + self.timings.expand =>
            {
                self.phase = Phase::Closed;
                self.origin = None;
                self.content = None;
            }
            _ => {}
        }
    }

    /// Expansion amount in 0..=1: 0 at the origin rect, 1 fully expanded.
    pub fn progress(&self, now: Instant) -> f32 {
        let expand = self.timings.expand.as_secs_f32();
        match self.phase {
            Phase::Closed => 0.0,
            Phase::Open => 1.0,
            Phase::Opening { since } => {
                let elapsed = now.duration_since(since).as_secs_f32();
                ease_in_out((elapsed / expand).clamp(0.0, 1.0))
            }
            Phase::Closing { since } => {
                let elapsed = now.duration_since(since).as_secs_f32();
                let stagger = self.timings.close_stagger.as_secs_f32();
                if elapsed < stagger {
                    1.0
                } else {
                    1.0 - ease_in_out(((elapsed - stagger) / expand).clamp(0.0, 1.0))
                }
            }
        }
    }

    /// Uniform scale that makes `origin` cover `viewport`, inflated by the
    /// configured margin factor.
    pub fn cover_scale(&self, origin: Vec2, viewport: Vec2) -> f32 {
        if origin.x <= 0.0 || origin.y <= 0.0 {
            return self.timings.inflate;
        }
        (viewport.x / origin.x).max(viewport.y / origin.y) * self.timings.inflate
    }

    /// Fully expanded rect: the origin scaled to cover the viewport, its
    /// center moved onto the viewport center.
    pub fn end_rect(&self, origin: Rect, viewport: Rect) -> Rect {
        let scale = self.cover_scale(origin.size(), viewport.size());
        Rect::from_center_size(viewport.center(), origin.size() * scale)
    }

    /// Where the expanding image sits right now, or `None` while closed.
    pub fn animated_rect(&self, now: Instant, viewport: Rect) -> Option<Rect> {
        let origin = self.origin?;
        let end = self.end_rect(origin, viewport);
        Some(lerp_rect(origin, end, self.progress(now)))
    }

    /// Corner radius of the animated rect. Opening eases toward the rounded
    /// open state; closing morphs toward a circular silhouette.
    pub fn corner_radius(&self, now: Instant, viewport: Rect) -> f32 {
        match self.phase {
            Phase::Closed => 0.0,
            Phase::Opening { .. } | Phase::Open => lerp(0.0, OPEN_RADIUS, self.progress(now)),
            Phase::Closing { since } => {
                let elapsed = now.duration_since(since).as_secs_f32();
                let stagger = self.timings.close_stagger.as_secs_f32();
                if elapsed < stagger {
                    return OPEN_RADIUS;
                }
                let t = ease_in_out(
                    ((elapsed - stagger) / self.timings.expand.as_secs_f32()).clamp(0.0, 1.0),
                );
                let circular = self
                    .animated_rect(now, viewport)
                    .map(|r| r.width().min(r.height()) / 2.0)
                    .unwrap_or(0.0);
                lerp(OPEN_RADIUS, circular, t)
            }
        }
    }

    /// Opacity of the title/description block. Fades in after the content
    /// delay while opening; fades out over the same length while closing.
    pub fn content_alpha(&self, now: Instant) -> f32 {
        let delay = self.timings.content_delay.as_secs_f32();
        match self.phase {
            Phase::Closed => 0.0,
            Phase::Open => 1.0,
            Phase::Opening { since } => {
                let elapsed = now.duration_since(since).as_secs_f32();
                let fade = (self.timings.expand.as_secs_f32() - delay).max(0.01);
                ((elapsed - delay) / fade).clamp(0.0, 1.0)
            }
            Phase::Closing { since } => {
                let elapsed = now.duration_since(since).as_secs_f32();
                (1.0 - elapsed / delay.max(0.01)).clamp(0.0, 1.0)
            }
        }
    }

    /// Backdrop opacity follows the expansion.
    pub fn backdrop_alpha(&self, now: Instant) -> f32 {
        self.progress(now)
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::{pos2, vec2};

    use super::*;

    fn slide(title: &str) -> Slide {
        Slide {
            image: "photo.jpg".into(),
            alt: "a photo".into(),
            title: title.into(),
            description: "details".into(),
        }
    }

    fn lightbox() -> Lightbox {
        Lightbox::new(Timings::default())
    }

    fn origin_rect() -> Rect {
        Rect::from_min_size(pos2(10.0, 20.0), vec2(100.0, 50.0))
    }

    fn viewport() -> Rect {
        Rect::from_min_size(pos2(0.0, 0.0), vec2(1000.0, 800.0))
    }

    #[test]
    fn test_open_from_closed() {
        let t0 = Instant::now();
        let mut lb = lightbox();
        assert!(lb.open(origin_rect(), slide("first"), t0));
        assert!(lb.is_visible());
        assert!(!lb.is_open());
        assert_eq!(lb.content().unwrap().title, "first");
    }

    #[test]
    fn test_reentrant_open_is_ignored() {
        let t0 = Instant::now();
        let mut lb = lightbox();
        lb.open(origin_rect(), slide("first"), t0);
        lb.tick(t0 + Duration::from_secs(1));
        assert!(lb.is_open());

        let other = Rect::from_min_size(pos2(500.0, 500.0), vec2(10.0, 10.0));
        assert!(!lb.open(other, slide("second"), t0 + Duration::from_secs(2)));
        assert_eq!(lb.content().unwrap().title, "first", "first click wins");
        assert_eq!(lb.origin(), Some(origin_rect()));
    }

    #[test]
    fn test_close_while_closed_is_noop() {
        let mut lb = lightbox();
        assert!(!lb.close(Instant::now()));
        assert_eq!(lb.phase(), Phase::Closed);
    }

    #[test]
    fn test_close_during_opening_is_dropped() {
        let t0 = Instant::now();
        let mut lb = lightbox();
        lb.open(origin_rect(), slide("x"), t0);
        assert!(!lb.close(t0 + Duration::from_millis(100)));
        assert!(matches!(lb.phase(), Phase::Opening { .. }));
    }

    #[test]
    fn test_full_lifecycle() {
        let t0 = Instant::now();
        let mut lb = lightbox();
        lb.open(origin_rect(), slide("x"), t0);

        // Not yet open at 499 ms
        lb.tick(t0 + Duration::from_millis(499));
        assert!(!lb.is_open());

        lb.tick(t0 + Duration::from_millis(500));
        assert!(lb.is_open());

        let t1 = t0 + Duration::from_secs(3);
        assert!(lb.close(t1));
        assert!(lb.is_visible(), "still visible while collapsing");

        // Collapse completes at stagger + expand
        lb.tick(t1 + Duration::from_millis(549));
        assert!(lb.is_visible());
        lb.tick(t1 + Duration::from_millis(550));
        assert_eq!(lb.phase(), Phase::Closed);
        assert!(lb.content().is_none());
        assert!(lb.origin().is_none());
        assert!(!lb.is_visible(), "scroll lock released");
    }

    #[test]
    fn test_cover_scale_matches_viewport_geometry() {
        let lb = lightbox();
        // max(1000/100, 800/50) * 1.2 = 16 * 1.2
        let scale = lb.cover_scale(vec2(100.0, 50.0), vec2(1000.0, 800.0));
        assert!((scale - 19.2).abs() < 1e-4);
    }

    #[test]
    fn test_end_rect_is_centered() {
        let lb = lightbox();
        let end = lb.end_rect(origin_rect(), viewport());
        assert!((end.center().x - 500.0).abs() < 1e-2);
        assert!((end.center().y - 400.0).abs() < 1e-2);
        assert!((end.width() - 100.0 * 19.2).abs() < 1e-2);
        assert!((end.height() - 50.0 * 19.2).abs() < 1e-2);
    }

    fn rects_close(a: Rect, b: Rect) -> bool {
        (a.min.x - b.min.x).abs() < 1e-2
            && (a.min.y - b.min.y).abs() < 1e-2
            && (a.max.x - b.max.x).abs() < 1e-2
            && (a.max.y - b.max.y).abs() < 1e-2
    }

    #[test]
    fn test_animated_rect_endpoints() {
        let t0 = Instant::now();
        let mut lb = lightbox();
        lb.open(origin_rect(), slide("x"), t0);

        let at_start = lb.animated_rect(t0, viewport()).unwrap();
        assert_eq!(at_start, origin_rect());

        lb.tick(t0 + Duration::from_secs(1));
        let at_end = lb.animated_rect(t0 + Duration::from_secs(1), viewport()).unwrap();
        assert!(rects_close(at_end, lb.end_rect(origin_rect(), viewport())));
    }

    #[test]
    fn test_content_alpha_staging() {
        let t0 = Instant::now();
        let mut lb = lightbox();
        lb.open(origin_rect(), slide("x"), t0);

        assert_eq!(lb.content_alpha(t0 + Duration::from_millis(200)), 0.0);
        let mid = lb.content_alpha(t0 + Duration::from_millis(400));
        assert!(mid > 0.0 && mid < 1.0);
        lb.tick(t0 + Duration::from_secs(1));
        assert_eq!(lb.content_alpha(t0 + Duration::from_secs(1)), 1.0);
    }

    #[test]
    fn test_closing_holds_during_stagger() {
        let t0 = Instant::now();
        let mut lb = lightbox();
        lb.open(origin_rect(), slide("x"), t0);
        lb.tick(t0 + Duration::from_secs(1));
        let t1 = t0 + Duration::from_secs(2);
        lb.close(t1);

        // During the stagger the rect holds fully expanded while the
        // content fades.
        assert_eq!(lb.progress(t1 + Duration::from_millis(25)), 1.0);
        assert!(lb.content_alpha(t1 + Duration::from_millis(25)) < 1.0);

        // After it, the rect collapses toward the origin.
        let late = lb.progress(t1 + Duration::from_millis(400));
        assert!(late < 1.0);
    }

    #[test]
    fn test_corner_radius_morphs_toward_circle_on_close() {
        let t0 = Instant::now();
        let mut lb = lightbox();
        lb.open(origin_rect(), slide("x"), t0);
        lb.tick(t0 + Duration::from_secs(1));
        assert_eq!(lb.corner_radius(t0 + Duration::from_secs(1), viewport()), OPEN_RADIUS);

        let t1 = t0 + Duration::from_secs(2);
        lb.close(t1);
        let r = lb.corner_radius(t1 + Duration::from_millis(300), viewport());
        assert!(r > OPEN_RADIUS, "closing inflates the radius toward circular");
    }

    #[test]
    fn test_degenerate_origin_does_not_divide_by_zero() {
        let lb = lightbox();
        let scale = lb.cover_scale(vec2(0.0, 0.0), vec2(1000.0, 800.0));
        assert!(scale.is_finite());
    }
}
