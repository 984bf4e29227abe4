use std::time::Instant;

use eframe::egui;

/// Cross-fade length when the carousel switches slides, seconds.
pub const FADE_DURATION: f32 = 0.3;

pub fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

pub fn lerp_rect(a: egui::Rect, b: egui::Rect, t: f32) -> egui::Rect {
    egui::Rect::from_min_max(
        egui::pos2(
            a.min.x + (b.min.x - a.min.x) * t,
            a.min.y + (b.min.y - a.min.y) * t,
        ),
        egui::pos2(
            a.max.x + (b.max.x - a.max.x) * t,
            a.max.y + (b.max.y - a.max.y) * t,
        ),
    )
}

/// A short cross-fade between two slide indices. Purely presentational: the
/// carousel index has already moved when one of these is constructed.
#[derive(Debug, Clone, Copy)]
pub struct SlideFade {
    pub from: usize,
    pub to: usize,
    start: Instant,
}

impl SlideFade {
    pub fn new(from: usize, to: usize, now: Instant) -> Self {
        Self { from, to, start: now }
    }

    pub fn progress(&self, now: Instant) -> f32 {
        let elapsed = now.duration_since(self.start).as_secs_f32();
        ease_in_out((elapsed / FADE_DURATION).clamp(0.0, 1.0))
    }

    pub fn is_complete(&self, now: Instant) -> bool {
        now.duration_since(self.start).as_secs_f32() >= FADE_DURATION
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_ease_endpoints() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert!((ease_in_out(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_ease_is_monotonic() {
        let mut prev = 0.0;
        for i in 0..=100 {
            let v = ease_in_out(i as f32 / 100.0);
            assert!(v >= prev);
            prev = v;
        }
    }

    #[test]
    fn test_lerp_rect_endpoints() {
        let a = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(10.0, 10.0));
        let b = egui::Rect::from_min_size(egui::pos2(100.0, 50.0), egui::vec2(40.0, 20.0));
        assert_eq!(lerp_rect(a, b, 0.0), a);
        assert_eq!(lerp_rect(a, b, 1.0), b);
        let mid = lerp_rect(a, b, 0.5);
        assert_eq!(mid.min, egui::pos2(50.0, 25.0));
    }

    #[test]
    fn test_fade_completion() {
        let t0 = Instant::now();
        let fade = SlideFade::new(0, 1, t0);
        assert_eq!(fade.progress(t0), 0.0);
        assert!(!fade.is_complete(t0 + Duration::from_millis(100)));
        assert!(fade.is_complete(t0 + Duration::from_millis(300)));
        assert_eq!(fade.progress(t0 + Duration::from_secs(1)), 1.0);
    }
}
