use eframe::egui;
use std::time::{Duration, Instant};

const SLIDE_COUNT: usize = 3;
const ROTATE_INTERVAL: Duration = Duration::from_millis(5000);
const FADE_DURATION: f32 = 0.3;

struct Slide {
    heading: &'static str,
    body: &'static str,
    tone: egui::Color32,
}

const SLIDES: [Slide; SLIDE_COUNT] = [
    Slide {
        heading: "Harbour at Dawn",
        body: "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Sed do eiusmod \
               tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, \
               quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat.",
        tone: egui::Color32::from_rgb(0x2B, 0x3A, 0x55),
    },
    Slide {
        heading: "Market Day",
        body: "Pellentesque habitant morbi tristique senectus et netus et malesuada fames ac \
               turpis egestas. Vestibulum tortor quam, feugiat vitae, ultricies eget, tempor \
               sit amet, ante. Donec eu libero sit amet quam egestas semper.",
        tone: egui::Color32::from_rgb(0x4A, 0x33, 0x28),
    },
    Slide {
        heading: "Evening Light",
        body: "Praesent dapibus, neque id cursus faucibus, tortor neque egestas augue, eu \
               vulputate magna eros eu erat. Aliquam erat volutpat. Nam dui mi, tincidunt \
               quis, accumsan porttitor, facilisis luctus, metus.",
        tone: egui::Color32::from_rgb(0x3A, 0x2B, 0x45),
    },
];

struct Fade {
    from: usize,
    start: Instant,
}

struct ShowcaseDemo {
    current_slide: usize,
    /// Next automatic advance; `None` while the pointer hovers the carousel.
    deadline: Option<Instant>,
    hovered: bool,
    fade: Option<Fade>,
    frame_count: u32,
    fps: f32,
    fps_update: Instant,
}

impl ShowcaseDemo {
    fn new() -> Self {
        let now = Instant::now();
        Self {
            current_slide: 0,
            deadline: Some(now + ROTATE_INTERVAL),
            hovered: false,
            fade: None,
            frame_count: 0,
            fps: 0.0,
            fps_update: now,
        }
    }

    fn go_to(&mut self, index: usize) {
        if index >= SLIDE_COUNT || index == self.current_slide {
            return;
        }
        self.fade = Some(Fade {
            from: self.current_slide,
            start: Instant::now(),
        });
        self.current_slide = index;
    }

    fn next(&mut self) {
        self.go_to((self.current_slide + 1) % SLIDE_COUNT);
    }

    fn previous(&mut self) {
        self.go_to((self.current_slide + SLIDE_COUNT - 1) % SLIDE_COUNT);
    }

    fn set_hovered(&mut self, hovered: bool) {
        if hovered == self.hovered {
            return;
        }
        self.hovered = hovered;
        self.deadline = if hovered {
            None
        } else {
            Some(Instant::now() + ROTATE_INTERVAL)
        };
    }

    fn tick(&mut self, now: Instant) {
        if let Some(deadline) = self.deadline {
            if now >= deadline {
                self.next();
                self.deadline = Some(now + ROTATE_INTERVAL);
            }
        }
    }

    fn update_fps(&mut self) {
        self.frame_count += 1;
        let elapsed = self.fps_update.elapsed().as_secs_f32();
        if elapsed >= 0.5 {
            self.fps = self.frame_count as f32 / elapsed;
            self.frame_count = 0;
            self.fps_update = Instant::now();
        }
    }
}

fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

fn draw_slide(ui: &mut egui::Ui, index: usize, rect: egui::Rect, opacity: f32) {
    let slide = &SLIDES[index];
    let alpha = (opacity * 255.0) as u8;

    let panel = rect.shrink(60.0);
    let tone = egui::Color32::from_rgba_unmultiplied(
        slide.tone.r(),
        slide.tone.g(),
        slide.tone.b(),
        alpha,
    );
    ui.painter().rect_filled(panel, 12.0, tone);

    let heading_color =
        egui::Color32::from_rgba_unmultiplied(255, 255, 255, alpha);
    let body_color = egui::Color32::from_rgba_unmultiplied(210, 210, 210, alpha);

    let content = panel.shrink(40.0);
    let heading_galley = ui.painter().layout(
        slide.heading.to_string(),
        egui::FontId::proportional(44.0),
        heading_color,
        content.width(),
    );
    let heading_height = heading_galley.rect.height();
    ui.painter()
        .galley(content.left_top(), heading_galley, heading_color);

    let body_galley = ui.painter().layout(
        slide.body.to_string(),
        egui::FontId::proportional(20.0),
        body_color,
        content.width(),
    );
    let body_pos = egui::pos2(content.left(), content.top() + heading_height + 24.0);
    ui.painter().galley(body_pos, body_galley, body_color);
}

impl eframe::App for ShowcaseDemo {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_fps();
        let now = Instant::now();

        ctx.input(|i| {
            if i.key_pressed(egui::Key::ArrowRight) {
                self.next();
            }
            if i.key_pressed(egui::Key::ArrowLeft) {
                self.previous();
            }
        });

        self.tick(now);

        let bg = egui::Color32::from_rgb(24, 24, 24);

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                ui.painter().rect_filled(rect, 0.0, bg);

                let carousel_rect = rect.shrink2(egui::vec2(0.0, 30.0));
                let hover_pos = ctx.input(|i| i.pointer.hover_pos());
                self.set_hovered(hover_pos.is_some_and(|p| carousel_rect.contains(p)));

                // Cross-fade between the outgoing and incoming slide
                let mut finished = false;
                if let Some(ref fade) = self.fade {
                    let raw_t =
                        (fade.start.elapsed().as_secs_f32() / FADE_DURATION).clamp(0.0, 1.0);
                    let progress = ease_in_out(raw_t);
                    draw_slide(ui, fade.from, carousel_rect, 1.0 - progress);
                    draw_slide(ui, self.current_slide, carousel_rect, progress);
                    finished = raw_t >= 1.0;
                    ctx.request_repaint();
                } else {
                    draw_slide(ui, self.current_slide, carousel_rect, 1.0);
                }
                if finished {
                    self.fade = None;
                }

                // Indicator dots; clicking one jumps to its slide
                let clicked =
                    ctx.input(|i| i.pointer.button_pressed(egui::PointerButton::Primary));
                let dot_gap = 26.0;
                let dots_width = SLIDE_COUNT as f32 * dot_gap;
                for i in 0..SLIDE_COUNT {
                    let center = egui::pos2(
                        rect.center().x - dots_width / 2.0 + dot_gap * (i as f32 + 0.5),
                        rect.bottom() - 36.0,
                    );
                    let color = if i == self.current_slide {
                        egui::Color32::from_rgb(0x52, 0x94, 0xE2)
                    } else {
                        egui::Color32::from_gray(90)
                    };
                    ui.painter().circle_filled(center, 6.0, color);

                    if clicked
                        && hover_pos.is_some_and(|p| p.distance(center) <= 10.0)
                    {
                        self.go_to(i);
                    }
                }

                // Paused marker while hovered
                if self.hovered {
                    let galley = ui.painter().layout_no_wrap(
                        "paused".to_string(),
                        egui::FontId::monospace(14.0),
                        egui::Color32::from_gray(140),
                    );
                    ui.painter().galley(
                        egui::pos2(rect.left() + 12.0, rect.bottom() - 28.0),
                        galley,
                        egui::Color32::from_gray(140),
                    );
                }

                // FPS overlay
                let fps_text = format!("{:.0} fps", self.fps);
                let fps_galley = ui.painter().layout_no_wrap(
                    fps_text,
                    egui::FontId::monospace(14.0),
                    egui::Color32::from_rgba_unmultiplied(180, 180, 180, 160),
                );
                let fps_pos = egui::pos2(
                    rect.right() - fps_galley.rect.width() - 12.0,
                    rect.top() + 10.0,
                );
                ui.painter().galley(
                    fps_pos,
                    fps_galley,
                    egui::Color32::from_rgba_unmultiplied(180, 180, 180, 160),
                );
            });

        // Wake up exactly when the next rotation is due
        if let Some(deadline) = self.deadline {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }
    }
}

fn main() -> eframe::Result {
    // Support --version for packaging (Homebrew, cargo-binstall)
    if std::env::args().any(|a| a == "--version") {
        println!("vitrine-demo {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title("Vitrine Demo"),
        ..Default::default()
    };

    eframe::run_native(
        "Vitrine Demo",
        options,
        Box::new(|_cc| Ok(Box::new(ShowcaseDemo::new()))),
    )
}
