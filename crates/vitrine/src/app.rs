use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::time::{Duration, Instant};

use eframe::egui;
use notify_debouncer_mini::notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{new_debouncer, DebounceEventResult, Debouncer};

use crate::carousel::{Carousel, DEFAULT_INTERVAL};
use crate::config::Config;
use crate::gallery::{self, Gallery};
use crate::lightbox::{Lightbox, Timings};
use crate::render;
use crate::render::image_cache::ImageCache;
use crate::render::transition::SlideFade;
use crate::theme::Theme;

const HEADER_HEIGHT: f32 = 56.0;
/// Page scroll depth past which the header shadow strengthens.
const HEADER_ELEVATE_AT: f32 = 50.0;
/// Anchor links land this far below the viewport top.
const ANCHOR_OFFSET: f32 = 80.0;

/// The pinned top bar. Owns its elevation state so the scroll reaction is a
/// method on explicitly constructed state instead of an ambient lookup.
struct HeaderBar {
    elevated: bool,
}

impl HeaderBar {
    fn new() -> Self {
        Self { elevated: false }
    }

    fn observe_scroll(&mut self, offset: f32) {
        self.elevated = offset > HEADER_ELEVATE_AT;
    }

    fn shadow_alpha(&self) -> f32 {
        if self.elevated { 0.15 } else { 0.10 }
    }

    fn shadow_height(&self) -> f32 {
        if self.elevated { 12.0 } else { 8.0 }
    }
}

struct Toast {
    message: String,
    start: Instant,
}

impl Toast {
    fn new(message: String) -> Self {
        Self {
            message,
            start: Instant::now(),
        }
    }

    fn opacity(&self) -> f32 {
        let elapsed = self.start.elapsed().as_secs_f32();
        let duration = 1.5;
        let fade_start = 1.0;
        if elapsed < fade_start {
            1.0
        } else if elapsed < duration {
            1.0 - (elapsed - fade_start) / (duration - fade_start)
        } else {
            0.0
        }
    }

    fn is_expired(&self) -> bool {
        self.start.elapsed().as_secs_f32() >= 1.5
    }
}

/// Per-frame geometry of the page, computed before input handling so hit
/// tests and painting agree.
struct PageLayout {
    viewport: egui::Rect,
    header: egui::Rect,
    nav_gallery: egui::Rect,
    nav_about: egui::Rect,
    hero: egui::Rect,
    gallery_heading_pos: egui::Pos2,
    /// The carousel card, caption included. Hovering it pauses rotation.
    carousel: egui::Rect,
    prev_btn: egui::Rect,
    next_btn: egui::Rect,
    dots: Vec<egui::Rect>,
    about_heading_pos: egui::Pos2,
    about_text_pos: egui::Pos2,
    /// Anchor targets in content space.
    gallery_anchor: f32,
    about_anchor: f32,
    content_height: f32,
}

struct ShowcaseApp {
    gallery: Gallery,
    manifest_path: PathBuf,
    carousel: Carousel,
    lightbox: Lightbox,
    theme: Theme,
    image_cache: ImageCache,
    header: HeaderBar,
    fade: Option<SlideFade>,
    toast: Option<Toast>,
    page_offset: f32,
    page_target: f32,
    hovering_carousel: bool,
    show_hud: bool,
    /// Image rect painted last frame; the lightbox open animation starts
    /// from it, like a clicked element's bounding box.
    last_image_rect: Option<egui::Rect>,
    /// Rotation period used when the manifest does not set one.
    fallback_interval: Duration,
    frame_count: u32,
    fps: f32,
    fps_update: Instant,
    watcher: Option<(Debouncer<RecommendedWatcher>, Receiver<DebounceEventResult>)>,
}

impl ShowcaseApp {
    fn new(
        manifest_path: PathBuf,
        gallery: Gallery,
        fallback_interval: Duration,
        start_paused: bool,
        start_slide: usize,
    ) -> Self {
        let theme_name = gallery.meta.theme.as_deref().unwrap_or("light");
        let theme = Theme::from_name(theme_name);
        let image_cache = ImageCache::new(gallery.base_path.clone());

        let interval = gallery
            .meta
            .interval
            .map(Duration::from_millis)
            .unwrap_or(fallback_interval);
        let mut carousel = Carousel::new(gallery.slide_count(), interval);
        carousel.go_to(start_slide).ok();
        if !start_paused {
            carousel.start_auto(Instant::now());
        }

        let watcher = spawn_watcher(&manifest_path);

        let now = Instant::now();
        Self {
            gallery,
            manifest_path,
            carousel,
            lightbox: Lightbox::new(Timings::default()),
            theme,
            image_cache,
            header: HeaderBar::new(),
            fade: None,
            toast: None,
            page_offset: 0.0,
            page_target: 0.0,
            hovering_carousel: false,
            show_hud: false,
            last_image_rect: None,
            fallback_interval,
            frame_count: 0,
            fps: 0.0,
            fps_update: now,
            watcher,
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

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.toast = Some(Toast::new(format!("Theme: {}", self.theme.name)));
    }

    fn toggle_rotation(&mut self, now: Instant) {
        if self.carousel.is_enabled() {
            self.carousel.stop_auto();
            self.toast = Some(Toast::new("Auto-rotate: off".to_string()));
        } else {
            self.carousel.start_auto(now);
            self.toast = Some(Toast::new("Auto-rotate: on".to_string()));
        }
    }

    /// Manual navigation always re-renders synchronously; the cross-fade is
    /// cosmetic and keyed off the index change.
    fn advance(&mut self, forward: bool, now: Instant) {
        let from = self.carousel.current();
        if forward {
            self.carousel.next();
        } else {
            self.carousel.previous();
        }
        let to = self.carousel.current();
        if from != to {
            self.fade = Some(SlideFade::new(from, to, now));
        }
    }

    fn jump_to(&mut self, index: usize, now: Instant) {
        let from = self.carousel.current();
        match self.carousel.go_to(index) {
            Ok(()) => {
                if from != index {
                    self.fade = Some(SlideFade::new(from, index, now));
                }
            }
            Err(e) => log::warn!("ignoring indicator click: {e}"),
        }
    }

    fn open_lightbox(&mut self, now: Instant) {
        let Some(origin) = self.last_image_rect else {
            return;
        };
        let slide = self.gallery.slides[self.carousel.current()].clone();
        if self.lightbox.open(origin, slide, now) {
            // Background is inert while the lightbox is up; rotation would
            // silently swap the slide underneath it.
            self.carousel.pause();
        }
    }

    fn close_lightbox(&mut self, now: Instant) {
        if self.lightbox.close(now) && !self.hovering_carousel {
            self.carousel.resume(now + self.lightbox.timings().expand);
        }
    }

    fn poll_reload(&mut self, now: Instant) {
        let Some((_, rx)) = &self.watcher else { return };

        let mut changed = false;
        while let Ok(result) = rx.try_recv() {
            match result {
                Ok(events) => {
                    let name = self.manifest_path.file_name();
                    if events.iter().any(|e| e.path.file_name() == name) {
                        changed = true;
                    }
                }
                Err(e) => log::warn!("watch error: {e}"),
            }
        }
        if !changed {
            return;
        }

        match gallery::load(&self.manifest_path) {
            Ok(gallery) => {
                let was_enabled = self.carousel.is_enabled();
                let interval = gallery
                    .meta
                    .interval
                    .map(Duration::from_millis)
                    .unwrap_or(self.fallback_interval);
                let index = self
                    .carousel
                    .current()
                    .min(gallery.slide_count().saturating_sub(1));

                let mut carousel = Carousel::new(gallery.slide_count(), interval);
                carousel.go_to(index).ok();
                if was_enabled {
                    carousel.start_auto(now);
                }

                self.theme =
                    Theme::from_name(gallery.meta.theme.as_deref().unwrap_or("light"));
                self.carousel = carousel;
                self.gallery = gallery;
                self.image_cache.clear();
                self.fade = None;
                self.last_image_rect = None;
                self.toast = Some(Toast::new("Gallery reloaded".to_string()));
                log::debug!("manifest reloaded from {}", self.manifest_path.display());
            }
            Err(e) => {
                // Keep presenting the last good gallery.
                log::warn!("manifest reload failed: {e:#}");
                self.toast = Some(Toast::new(format!("Reload failed: {e}")));
            }
        }
    }

    fn compute_layout(&self, ui: &egui::Ui, rect: egui::Rect, scale: f32) -> PageLayout {
        let header = egui::Rect::from_min_size(
            rect.left_top(),
            egui::vec2(rect.width(), HEADER_HEIGHT * scale),
        );

        let link_w = 90.0 * scale;
        let nav_about = egui::Rect::from_min_size(
            egui::pos2(header.right() - link_w - 16.0 * scale, header.top()),
            egui::vec2(link_w, header.height()),
        );
        let nav_gallery = nav_about.translate(egui::vec2(-link_w, 0.0));

        // Content space: y = 0 at the top of the scrollable page.
        let content_width = rect.width();
        let pad = 48.0 * scale;

        let hero_h = 220.0 * scale;
        let mut y = 0.0;
        let hero = egui::Rect::from_min_size(
            egui::pos2(rect.left(), y),
            egui::vec2(content_width, hero_h),
        );
        y += hero_h;

        let gallery_anchor = y;
        y += pad;
        let gallery_heading_pos = egui::pos2(rect.center().x, y);
        y += self.theme.section_title_size * scale + 24.0 * scale;

        let card_w = (content_width - pad * 2.0).min(960.0 * scale);
        let card_h = card_w * 9.0 / 16.0 + 110.0 * scale;
        let carousel = egui::Rect::from_min_size(
            egui::pos2(rect.center().x - card_w / 2.0, y),
            egui::vec2(card_w, card_h),
        );
        y += card_h + 20.0 * scale;

        let btn_r = 22.0 * scale;
        let prev_btn = egui::Rect::from_center_size(
            egui::pos2(carousel.left() - btn_r - 10.0 * scale, carousel.center().y),
            egui::vec2(btn_r * 2.0, btn_r * 2.0),
        );
        let next_btn = egui::Rect::from_center_size(
            egui::pos2(carousel.right() + btn_r + 10.0 * scale, carousel.center().y),
            egui::vec2(btn_r * 2.0, btn_r * 2.0),
        );

        // One indicator per slide, 1:1 by position index
        let dot_r = 7.0 * scale;
        let dot_gap = 22.0 * scale;
        let count = self.carousel.count();
        let dots_width = count as f32 * dot_gap;
        let dots: Vec<egui::Rect> = (0..count)
            .map(|i| {
                egui::Rect::from_center_size(
                    egui::pos2(
                        rect.center().x - dots_width / 2.0 + dot_gap * (i as f32 + 0.5),
                        y + dot_r,
                    ),
                    egui::vec2(dot_r * 2.0, dot_r * 2.0),
                )
            })
            .collect();
        y += dot_r * 2.0 + pad;

        let about_anchor = y;
        y += pad;
        let about_heading_pos = egui::pos2(rect.center().x, y);
        y += self.theme.section_title_size * scale + 24.0 * scale;
        let about_text_pos = egui::pos2(rect.center().x, y);

        let about_text = self.gallery.meta.about.clone().unwrap_or_default();
        let about_galley = ui.painter().layout(
            about_text,
            egui::FontId::proportional(self.theme.body_size * scale),
            self.theme.foreground,
            (content_width * 0.6).max(200.0),
        );
        y += about_galley.rect.height() + pad;

        // Footer line
        y += 40.0 * scale;

        PageLayout {
            viewport: rect,
            header,
            nav_gallery,
            nav_about,
            hero,
            gallery_heading_pos,
            carousel,
            prev_btn,
            next_btn,
            dots,
            about_heading_pos,
            about_text_pos,
            gallery_anchor,
            about_anchor,
            content_height: y,
        }
    }

    /// Translate a content-space rect into screen space for the current
    /// scroll offset.
    fn to_screen(&self, layout: &PageLayout, r: egui::Rect) -> egui::Rect {
        r.translate(egui::vec2(
            0.0,
            layout.header.bottom() - self.page_offset,
        ))
    }

    fn to_screen_pos(&self, layout: &PageLayout, p: egui::Pos2) -> egui::Pos2 {
        egui::pos2(p.x, p.y + layout.header.bottom() - self.page_offset)
    }

    fn handle_pointer(
        &mut self,
        ctx: &egui::Context,
        layout: &PageLayout,
        scale: f32,
        now: Instant,
    ) {
        let (hover_pos, clicked) = ctx.input(|i| {
            (
                i.pointer.hover_pos(),
                i.pointer.button_pressed(egui::PointerButton::Primary),
            )
        });

        // While the lightbox is up, it owns the pointer.
        if self.lightbox.is_visible() {
            if self.hovering_carousel {
                self.hovering_carousel = false;
            }
            if clicked && self.lightbox.is_open() {
                let viewport = layout.viewport;
                let close_rect = close_button_rect(viewport, scale);
                let content_rect = self
                    .lightbox
                    .animated_rect(now, viewport)
                    .unwrap_or(egui::Rect::NOTHING);
                if let Some(pos) = hover_pos {
                    if close_rect.contains(pos) || !content_rect.contains(pos) {
                        self.close_lightbox(now);
                    }
                }
            }
            return;
        }

        // Hover pause/resume over the carousel region (card plus arrows)
        let hover_region = self
            .to_screen(layout, layout.carousel)
            .union(self.to_screen(layout, layout.prev_btn))
            .union(self.to_screen(layout, layout.next_btn));
        let hovering = hover_pos.is_some_and(|p| hover_region.contains(p));
        if hovering != self.hovering_carousel {
            self.hovering_carousel = hovering;
            if hovering {
                self.carousel.pause();
            } else {
                self.carousel.resume(now);
            }
        }

        let Some(pos) = hover_pos else { return };
        if !clicked {
            return;
        }

        if layout.nav_gallery.contains(pos) {
            self.page_target = (layout.gallery_anchor - ANCHOR_OFFSET * scale).max(0.0);
            return;
        }
        if layout.nav_about.contains(pos) {
            self.page_target = (layout.about_anchor - ANCHOR_OFFSET * scale).max(0.0);
            return;
        }
        if self.to_screen(layout, layout.prev_btn).contains(pos) {
            self.advance(false, now);
            return;
        }
        if self.to_screen(layout, layout.next_btn).contains(pos) {
            self.advance(true, now);
            return;
        }
        for (i, dot) in layout.dots.iter().enumerate() {
            if self.to_screen(layout, *dot).expand(4.0 * scale).contains(pos) {
                self.jump_to(i, now);
                return;
            }
        }
        if let Some(image_rect) = self.last_image_rect {
            if image_rect.contains(pos) {
                self.open_lightbox(now);
            }
        }
    }

    fn draw_page(
        &mut self,
        ui: &egui::Ui,
        layout: &PageLayout,
        scale: f32,
        now: Instant,
    ) {
        let theme = self.theme.clone();

        // Hero
        let hero = self.to_screen(layout, layout.hero);
        let title_galley = ui.painter().layout_no_wrap(
            self.gallery.display_title(),
            egui::FontId::proportional(theme.hero_title_size * scale),
            theme.heading_color,
        );
        ui.painter().galley(
            egui::pos2(
                hero.center().x - title_galley.rect.width() / 2.0,
                hero.center().y - title_galley.rect.height() / 2.0,
            ),
            title_galley,
            theme.heading_color,
        );
        if let Some(footer) = &self.gallery.meta.footer {
            let sub_color = Theme::with_opacity(theme.foreground, 0.6);
            let sub = ui.painter().layout_no_wrap(
                footer.clone(),
                egui::FontId::proportional(theme.body_size * scale),
                sub_color,
            );
            ui.painter().galley(
                egui::pos2(
                    hero.center().x - sub.rect.width() / 2.0,
                    hero.bottom() - 48.0 * scale,
                ),
                sub,
                sub_color,
            );
        }

        // Gallery section
        draw_centered_heading(
            ui,
            "Gallery",
            self.to_screen_pos(layout, layout.gallery_heading_pos),
            &theme,
            scale,
        );

        let card = self.to_screen(layout, layout.carousel);
        ui.painter()
            .rect_filled(card, 8.0 * scale, theme.panel_background);

        let slide_rect = card.shrink(6.0 * scale);
        let image_rect = match self.fade {
            Some(fade) => {
                let p = fade.progress(now);
                if let Some(from_slide) = self.gallery.slides.get(fade.from) {
                    render::render_slide(
                        ui,
                        &self.gallery,
                        from_slide,
                        &theme,
                        slide_rect,
                        1.0 - p,
                        &self.image_cache,
                        scale,
                    );
                }
                let to_slide = &self.gallery.slides[self.carousel.current()];
                render::render_slide(
                    ui,
                    &self.gallery,
                    to_slide,
                    &theme,
                    slide_rect,
                    p,
                    &self.image_cache,
                    scale,
                )
            }
            None => {
                let slide = &self.gallery.slides[self.carousel.current()];
                render::render_slide(
                    ui,
                    &self.gallery,
                    slide,
                    &theme,
                    slide_rect,
                    1.0,
                    &self.image_cache,
                    scale,
                )
            }
        };
        self.last_image_rect = Some(image_rect);

        // Arrows
        draw_arrow_button(ui, self.to_screen(layout, layout.prev_btn), false, &theme, scale);
        draw_arrow_button(ui, self.to_screen(layout, layout.next_btn), true, &theme, scale);

        // Indicator dots: exactly one active, always the current index
        for (i, dot) in layout.dots.iter().enumerate() {
            let dot = self.to_screen(layout, *dot);
            let color = if self.carousel.is_active(i) {
                theme.accent
            } else {
                Theme::with_opacity(theme.foreground, 0.25)
            };
            ui.painter().circle_filled(dot.center(), dot.width() / 2.0, color);
        }

        // Slide counter, teacher-style chrome
        let counter = format!(
            "{} / {}",
            self.carousel.current() + 1,
            self.carousel.count()
        );
        let counter_color = Theme::with_opacity(theme.foreground, 0.3);
        let counter_galley = ui.painter().layout_no_wrap(
            counter,
            egui::FontId::monospace(14.0 * scale),
            counter_color,
        );
        ui.painter().galley(
            egui::pos2(
                card.right() - counter_galley.rect.width() - 12.0 * scale,
                card.top() + 10.0 * scale,
            ),
            counter_galley,
            counter_color,
        );

        // About section
        draw_centered_heading(
            ui,
            "About",
            self.to_screen_pos(layout, layout.about_heading_pos),
            &theme,
            scale,
        );
        if let Some(about) = &self.gallery.meta.about {
            let about_galley = ui.painter().layout(
                about.clone(),
                egui::FontId::proportional(theme.body_size * scale),
                theme.foreground,
                (layout.viewport.width() * 0.6).max(200.0),
            );
            let pos = self.to_screen_pos(layout, layout.about_text_pos);
            ui.painter().galley(
                egui::pos2(pos.x - about_galley.rect.width() / 2.0, pos.y),
                about_galley,
                theme.foreground,
            );
        }

        // Footer
        if let Some(footer) = &self.gallery.meta.footer {
            let footer_color = Theme::with_opacity(theme.foreground, 0.4);
            let galley = ui.painter().layout_no_wrap(
                footer.clone(),
                egui::FontId::proportional(14.0 * scale),
                footer_color,
            );
            let y = layout.header.bottom() - self.page_offset + layout.content_height
                - 30.0 * scale;
            ui.painter().galley(
                egui::pos2(layout.viewport.center().x - galley.rect.width() / 2.0, y),
                galley,
                footer_color,
            );
        }
    }

    fn draw_header(&self, ui: &egui::Ui, layout: &PageLayout, scale: f32) {
        let theme = &self.theme;
        let header = layout.header;

        draw_drop_shadow(
            ui,
            header,
            self.header.shadow_height() * scale,
            self.header.shadow_alpha(),
        );
        ui.painter().rect_filled(header, 0.0, theme.chrome_background);

        let title_galley = ui.painter().layout_no_wrap(
            self.gallery.display_title(),
            egui::FontId::proportional(20.0 * scale),
            theme.heading_color,
        );
        ui.painter().galley(
            egui::pos2(
                header.left() + 20.0 * scale,
                header.center().y - title_galley.rect.height() / 2.0,
            ),
            title_galley,
            theme.heading_color,
        );

        for (label, rect) in [("Gallery", layout.nav_gallery), ("About", layout.nav_about)] {
            let galley = ui.painter().layout_no_wrap(
                label.to_string(),
                egui::FontId::proportional(15.0 * scale),
                theme.accent,
            );
            ui.painter().galley(
                egui::pos2(
                    rect.center().x - galley.rect.width() / 2.0,
                    rect.center().y - galley.rect.height() / 2.0,
                ),
                galley,
                theme.accent,
            );
        }
    }

    fn draw_lightbox(&self, ui: &egui::Ui, viewport: egui::Rect, scale: f32, now: Instant) {
        let theme = &self.theme;

        let backdrop =
            Theme::with_opacity(theme.backdrop, self.lightbox.backdrop_alpha(now) * 0.95);
        ui.painter().rect_filled(viewport, 0.0, backdrop);

        let Some(rect) = self.lightbox.animated_rect(now, viewport) else {
            return;
        };
        let Some(slide) = self.lightbox.content() else {
            return;
        };

        let radius = self.lightbox.corner_radius(now, viewport);
        let image_path = self.gallery.resolve_image(slide);
        if let Some(texture) = self.image_cache.get_or_load(ui, &image_path) {
            egui::Image::from_texture(&texture)
                .corner_radius(radius)
                .paint_at(ui, rect);
        } else {
            ui.painter().rect_filled(rect, radius, theme.panel_background);
            render::draw_image_placeholder(ui, &slide.alt, theme, rect, 1.0);
        }

        let alpha = self.lightbox.content_alpha(now);
        if alpha <= 0.0 {
            return;
        }

        // Title and description over the backdrop, near the bottom
        let title_color = Theme::with_opacity(egui::Color32::WHITE, alpha);
        let body_color = Theme::with_opacity(egui::Color32::from_gray(0xD0), alpha * 0.95);
        let title_galley = ui.painter().layout(
            slide.title.clone(),
            egui::FontId::proportional(30.0 * scale),
            title_color,
            viewport.width() * 0.7,
        );
        let desc_galley = ui.painter().layout(
            slide.description.clone(),
            egui::FontId::proportional(17.0 * scale),
            body_color,
            viewport.width() * 0.7,
        );
        let title_h = title_galley.rect.height();
        let block_h = title_h + 8.0 * scale + desc_galley.rect.height();
        let mut y = viewport.bottom() - block_h - 36.0 * scale;
        ui.painter().galley(
            egui::pos2(viewport.center().x - title_galley.rect.width() / 2.0, y),
            title_galley,
            title_color,
        );
        y += title_h + 8.0 * scale;
        ui.painter().galley(
            egui::pos2(viewport.center().x - desc_galley.rect.width() / 2.0, y),
            desc_galley,
            body_color,
        );

        // Close control
        let close = close_button_rect(viewport, scale);
        ui.painter().circle_filled(
            close.center(),
            close.width() / 2.0,
            Theme::with_opacity(egui::Color32::from_gray(0x20), alpha * 0.8),
        );
        let cross = ui.painter().layout_no_wrap(
            "\u{2715}".to_string(),
            egui::FontId::proportional(18.0 * scale),
            title_color,
        );
        ui.painter().galley(
            egui::pos2(
                close.center().x - cross.rect.width() / 2.0,
                close.center().y - cross.rect.height() / 2.0,
            ),
            cross,
            title_color,
        );
    }

    fn draw_toast(&self, ui: &egui::Ui, rect: egui::Rect, scale: f32) {
        let Some(toast) = &self.toast else { return };
        let opacity = toast.opacity();
        if opacity <= 0.0 {
            return;
        }
        let toast_color = Theme::with_opacity(self.theme.foreground, opacity * 0.9);
        let toast_bg = Theme::with_opacity(self.theme.panel_background, opacity * 0.9);
        let galley = ui.painter().layout_no_wrap(
            toast.message.clone(),
            egui::FontId::proportional(18.0 * scale),
            toast_color,
        );
        let padding = 14.0 * scale;
        let toast_rect = egui::Rect::from_min_size(
            egui::pos2(
                rect.center().x - galley.rect.width() / 2.0 - padding,
                rect.bottom() - 80.0 * scale,
            ),
            egui::vec2(
                galley.rect.width() + padding * 2.0,
                galley.rect.height() + padding * 2.0,
            ),
        );
        ui.painter().rect_filled(toast_rect, 8.0 * scale, toast_bg);
        ui.painter().galley(
            egui::pos2(toast_rect.left() + padding, toast_rect.top() + padding),
            galley,
            toast_color,
        );
    }
}

impl eframe::App for ShowcaseApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.update_fps();
        self.poll_reload(now);

        let mut viewport_cmds: Vec<egui::ViewportCommand> = Vec::new();

        ctx.input(|i| {
            if i.key_pressed(egui::Key::Q) {
                viewport_cmds.push(egui::ViewportCommand::Close);
                return;
            }
            if i.key_pressed(egui::Key::F) {
                viewport_cmds.push(egui::ViewportCommand::Fullscreen(
                    !i.viewport().fullscreen.unwrap_or(false),
                ));
                return;
            }
            if i.key_pressed(egui::Key::D) {
                self.toggle_theme();
                return;
            }
            if i.key_pressed(egui::Key::H) {
                self.show_hud = !self.show_hud;
                return;
            }

            if i.key_pressed(egui::Key::Escape) {
                if self.lightbox.is_visible() {
                    self.close_lightbox(now);
                }
                return;
            }

            // Carousel keys only reach the page when the lightbox is down
            if self.lightbox.is_visible() {
                return;
            }
            if i.key_pressed(egui::Key::ArrowRight) {
                self.advance(true, now);
            }
            if i.key_pressed(egui::Key::ArrowLeft) {
                self.advance(false, now);
            }
            if i.key_pressed(egui::Key::Space) {
                self.toggle_rotation(now);
            }
            if i.key_pressed(egui::Key::Home) {
                self.jump_to(0, now);
            }
            if i.key_pressed(egui::Key::End) {
                self.jump_to(self.carousel.count().saturating_sub(1), now);
            }
        });

        for cmd in viewport_cmds {
            ctx.send_viewport_cmd(cmd);
        }

        self.lightbox.tick(now);
        if self.carousel.tick(now) {
            let to = self.carousel.current();
            let from = (to + self.carousel.count() - 1) % self.carousel.count();
            self.fade = Some(SlideFade::new(from, to, now));
        }
        if self.fade.is_some_and(|f| f.is_complete(now)) {
            self.fade = None;
        }
        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }

        let bg = self.theme.background;
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                ui.painter().rect_filled(rect, 0.0, bg);

                let scale = (rect.width() / 1280.0).min(rect.height() / 720.0).max(0.4);
                let layout = self.compute_layout(ui, rect, scale);

                // Page scrolling: wheel moves the target, the offset eases
                // toward it. The lightbox locks scrolling entirely.
                if !self.lightbox.is_visible() {
                    let scroll_delta = ctx.input(|i| i.smooth_scroll_delta.y);
                    if scroll_delta != 0.0 {
                        self.page_target -= scroll_delta;
                    }
                }
                let viewport_h = rect.height() - layout.header.height();
                let overflow = (layout.content_height - viewport_h).max(0.0);
                self.page_target = self.page_target.clamp(0.0, overflow);
                let diff = self.page_target - self.page_offset;
                if diff.abs() < 0.5 {
                    self.page_offset = self.page_target;
                } else {
                    self.page_offset += diff * 0.15;
                    ctx.request_repaint();
                }
                self.header.observe_scroll(self.page_offset);

                self.handle_pointer(ctx, &layout, scale, now);

                self.draw_page(ui, &layout, scale, now);
                self.draw_header(ui, &layout, scale);
                self.draw_toast(ui, rect, scale);

                if self.lightbox.is_visible() {
                    self.draw_lightbox(ui, rect, scale, now);
                }

                if self.show_hud {
                    draw_hud(ui, &self.theme, rect, scale);
                }

                // FPS overlay
                let fps_text = format!("{:.0} fps", self.fps);
                let fps_color = Theme::with_opacity(self.theme.foreground, 0.3);
                let fps_galley = ui.painter().layout_no_wrap(
                    fps_text,
                    egui::FontId::monospace(14.0 * scale),
                    fps_color,
                );
                ui.painter().galley(
                    egui::pos2(
                        rect.right() - fps_galley.rect.width() - 12.0 * scale,
                        rect.bottom() - 24.0 * scale,
                    ),
                    fps_galley,
                    fps_color,
                );
            });

        // Repaint scheduling: animations draw every frame, the rotation
        // timer wakes us exactly at its deadline.
        if self.lightbox.is_animating() || self.fade.is_some() || self.toast.is_some() {
            ctx.request_repaint();
        } else if let Some(deadline) = self.carousel.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }
    }
}

fn close_button_rect(viewport: egui::Rect, scale: f32) -> egui::Rect {
    let r = 20.0 * scale;
    egui::Rect::from_center_size(
        egui::pos2(viewport.right() - 40.0 * scale, viewport.top() + 40.0 * scale),
        egui::vec2(r * 2.0, r * 2.0),
    )
}

fn draw_centered_heading(ui: &egui::Ui, text: &str, pos: egui::Pos2, theme: &Theme, scale: f32) {
    let galley = ui.painter().layout_no_wrap(
        text.to_string(),
        egui::FontId::proportional(theme.section_title_size * scale),
        theme.heading_color,
    );
    ui.painter().galley(
        egui::pos2(pos.x - galley.rect.width() / 2.0, pos.y),
        galley,
        theme.heading_color,
    );
}

fn draw_arrow_button(ui: &egui::Ui, rect: egui::Rect, forward: bool, theme: &Theme, scale: f32) {
    ui.painter().circle_filled(
        rect.center(),
        rect.width() / 2.0,
        Theme::with_opacity(theme.panel_background, 0.9),
    );
    let glyph = if forward { "\u{276F}" } else { "\u{276E}" };
    let galley = ui.painter().layout_no_wrap(
        glyph.to_string(),
        egui::FontId::proportional(18.0 * scale),
        theme.accent,
    );
    ui.painter().galley(
        egui::pos2(
            rect.center().x - galley.rect.width() / 2.0,
            rect.center().y - galley.rect.height() / 2.0,
        ),
        galley,
        theme.accent,
    );
}

/// Vertical gradient under the header, the page's only drop shadow.
fn draw_drop_shadow(ui: &egui::Ui, above: egui::Rect, height: f32, alpha: f32) {
    let shadow = egui::Color32::from_black_alpha((alpha * 255.0) as u8);
    let transparent = egui::Color32::from_black_alpha(0);

    let rect = egui::Rect::from_min_max(
        egui::pos2(above.left(), above.bottom()),
        egui::pos2(above.right(), above.bottom() + height),
    );

    let mut mesh = egui::Mesh::default();
    mesh.colored_vertex(rect.left_top(), shadow);
    mesh.colored_vertex(rect.right_top(), shadow);
    mesh.colored_vertex(rect.left_bottom(), transparent);
    mesh.colored_vertex(rect.right_bottom(), transparent);
    mesh.add_triangle(0, 2, 1);
    mesh.add_triangle(1, 2, 3);

    ui.painter().add(egui::Shape::mesh(mesh));
}

fn draw_hud(ui: &egui::Ui, theme: &Theme, rect: egui::Rect, scale: f32) {
    let shortcuts = [
        ("\u{2190} / \u{2192}", "Previous / next slide"),
        ("Space", "Toggle auto-rotation"),
        ("Click image", "Expand into lightbox"),
        ("Esc", "Close lightbox"),
        ("Home / End", "First / last slide"),
        ("D", "Toggle theme"),
        ("F", "Toggle fullscreen"),
        ("H", "Toggle this HUD"),
        ("Q", "Quit"),
    ];

    let bg = Theme::with_opacity(theme.panel_background, 0.92);
    let text_color = Theme::with_opacity(theme.foreground, 0.9);
    let key_color = Theme::with_opacity(theme.accent, 0.9);

    let padding = 24.0 * scale;
    let line_height = 30.0 * scale;
    let hud_height = shortcuts.len() as f32 * line_height + padding * 2.0 + 40.0 * scale;
    let hud_width = 340.0 * scale;

    let hud_rect = egui::Rect::from_center_size(rect.center(), egui::vec2(hud_width, hud_height));
    ui.painter().rect_filled(hud_rect, 12.0 * scale, bg);

    let title_galley = ui.painter().layout_no_wrap(
        "Keyboard Shortcuts".to_string(),
        egui::FontId::proportional(20.0 * scale),
        Theme::with_opacity(theme.heading_color, 0.9),
    );
    ui.painter().galley(
        egui::pos2(hud_rect.left() + padding, hud_rect.top() + padding),
        title_galley,
        text_color,
    );

    let mut y = hud_rect.top() + padding + 40.0 * scale;
    for (key, desc) in &shortcuts {
        let key_galley = ui.painter().layout_no_wrap(
            key.to_string(),
            egui::FontId::monospace(14.0 * scale),
            key_color,
        );
        ui.painter()
            .galley(egui::pos2(hud_rect.left() + padding, y), key_galley, key_color);

        let desc_galley = ui.painter().layout_no_wrap(
            desc.to_string(),
            egui::FontId::proportional(14.0 * scale),
            text_color,
        );
        ui.painter().galley(
            egui::pos2(hud_rect.left() + padding + 140.0 * scale, y),
            desc_galley,
            text_color,
        );
        y += line_height;
    }
}

fn spawn_watcher(
    path: &Path,
) -> Option<(Debouncer<RecommendedWatcher>, Receiver<DebounceEventResult>)> {
    let (tx, rx) = channel();
    let mut debouncer = match new_debouncer(Duration::from_millis(300), tx) {
        Ok(d) => d,
        Err(e) => {
            log::warn!("hot reload disabled: {e}");
            return None;
        }
    };
    // Watch the parent dir: editors often replace the file on save, which
    // would drop a watch on the file itself.
    let dir = path.parent().unwrap_or(Path::new("."));
    if let Err(e) = debouncer.watcher().watch(dir, RecursiveMode::NonRecursive) {
        log::warn!("hot reload disabled: {e}");
        return None;
    }
    Some((debouncer, rx))
}

pub fn run(
    file: PathBuf,
    windowed: bool,
    start_slide: Option<usize>,
    paused: bool,
) -> anyhow::Result<()> {
    let gallery = gallery::load(&file)?;

    let config = Config::load_or_default();
    let defaults = config.defaults.unwrap_or_default();

    let fallback_interval = defaults
        .interval
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_INTERVAL);
    let start_paused = paused || defaults.start_mode.as_deref() == Some("paused");

    let initial_slide = start_slide
        .map(|s| s.saturating_sub(1))
        .unwrap_or(0)
        .min(gallery.slide_count().saturating_sub(1));

    let title = gallery.display_title();

    let viewport = if windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(&title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(&title)
    };

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| {
            Ok(Box::new(ShowcaseApp::new(
                file,
                gallery,
                fallback_interval,
                start_paused,
                initial_slide,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
