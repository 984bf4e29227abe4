pub mod image_cache;
pub mod transition;

use eframe::egui::{self, FontId, Pos2, Stroke};

use crate::gallery::{Gallery, Slide};
use crate::theme::Theme;

use image_cache::ImageCache;

/// Render one showcase slide into the carousel viewport: the image
/// letterboxed into the frame with its caption block beneath. Returns the
/// image's painted rect, which the lightbox uses as its animation origin.
pub fn render_slide(
    ui: &egui::Ui,
    gallery: &Gallery,
    slide: &Slide,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    image_cache: &ImageCache,
    scale: f32,
) -> egui::Rect {
    let padding = 24.0 * scale;
    let content_width = rect.width() - padding * 2.0;

    let title_color = Theme::with_opacity(theme.heading_color, opacity);
    let body_color = Theme::with_opacity(theme.foreground, opacity * 0.85);

    let title_galley = ui.painter().layout(
        slide.title.clone(),
        FontId::proportional(theme.caption_title_size * scale),
        title_color,
        content_width,
    );
    let desc_galley = ui.painter().layout(
        slide.description.clone(),
        FontId::proportional(theme.caption_body_size * scale),
        body_color,
        content_width,
    );

    let gap = 8.0 * scale;
    let caption_height = title_galley.rect.height() + gap + desc_galley.rect.height();

    let image_area = egui::Rect::from_min_max(
        rect.left_top() + egui::vec2(padding, padding),
        egui::pos2(
            rect.right() - padding,
            rect.bottom() - padding - caption_height - gap,
        ),
    );

    let image_path = gallery.resolve_image(slide);
    let image_rect = draw_image_in_area(
        ui,
        &image_path,
        &slide.alt,
        theme,
        image_area,
        opacity,
        image_cache,
    );

    // Caption block, centered under the image area
    let mut y = image_area.bottom() + gap;
    let title_pos = Pos2::new(
        rect.center().x - title_galley.rect.width() / 2.0,
        y,
    );
    y += title_galley.rect.height() + gap;
    ui.painter().galley(title_pos, title_galley, title_color);

    let desc_pos = Pos2::new(rect.center().x - desc_galley.rect.width() / 2.0, y);
    ui.painter().galley(desc_pos, desc_galley, body_color);

    image_rect
}

/// Draw an image letterboxed into `available`, loading through the cache.
/// Falls back to a labeled placeholder for missing or broken files.
/// Returns the actual drawn rect.
pub fn draw_image_in_area(
    ui: &egui::Ui,
    path: &std::path::Path,
    alt: &str,
    theme: &Theme,
    available: egui::Rect,
    opacity: f32,
    image_cache: &ImageCache,
) -> egui::Rect {
    if let Some(texture) = image_cache.get_or_load(ui, path) {
        let draw_rect = fit_contain(texture.size_vec2(), available);
        let alpha = (opacity * 255.0) as u8;
        let tint = egui::Color32::from_rgba_unmultiplied(255, 255, 255, alpha);
        let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
        ui.painter().image(texture.id(), draw_rect, uv, tint);
        draw_rect
    } else {
        draw_image_placeholder(ui, alt, theme, available, opacity);
        available
    }
}

/// Fit `tex_size` inside `available`, preserving aspect ratio and centering.
/// Small images are not upscaled.
pub fn fit_contain(tex_size: egui::Vec2, available: egui::Rect) -> egui::Rect {
    if tex_size.x <= 0.0 || tex_size.y <= 0.0 {
        return available;
    }
    let scale = (available.width() / tex_size.x)
        .min(available.height() / tex_size.y)
        .min(1.0);
    let size = tex_size * scale;
    egui::Rect::from_center_size(available.center(), size)
}

pub fn draw_image_placeholder(
    ui: &egui::Ui,
    alt: &str,
    theme: &Theme,
    available: egui::Rect,
    opacity: f32,
) {
    let bg = Theme::with_opacity(theme.panel_background, opacity);
    let color = Theme::with_opacity(theme.foreground, opacity * 0.6);

    ui.painter().rect_filled(available, 8.0, bg);
    ui.painter().rect_stroke(
        available,
        8.0,
        Stroke::new(1.0, color),
        egui::StrokeKind::Outside,
    );

    let label = if alt.is_empty() {
        "[Image]".to_string()
    } else {
        format!("[Image: {alt}]")
    };
    let galley = ui.painter().layout(
        label,
        FontId::proportional(theme.caption_body_size),
        color,
        available.width(),
    );
    let text_pos = Pos2::new(
        available.center().x - galley.rect.width() / 2.0,
        available.center().y - galley.rect.height() / 2.0,
    );
    ui.painter().galley(text_pos, galley, color);
}

#[cfg(test)]
mod tests {
    use eframe::egui::{pos2, vec2, Rect};

    use super::*;

    #[test]
    fn test_fit_contain_preserves_aspect() {
        let area = Rect::from_min_size(pos2(0.0, 0.0), vec2(400.0, 400.0));
        let fitted = fit_contain(vec2(2000.0, 1000.0), area);
        assert!((fitted.width() / fitted.height() - 2.0).abs() < 1e-4);
        assert!(fitted.width() <= area.width() + 0.01);
        assert!(fitted.height() <= area.height() + 0.01);
        assert_eq!(fitted.center(), area.center());
    }

    #[test]
    fn test_fit_contain_does_not_upscale() {
        let area = Rect::from_min_size(pos2(0.0, 0.0), vec2(800.0, 600.0));
        let fitted = fit_contain(vec2(100.0, 50.0), area);
        assert_eq!(fitted.size(), vec2(100.0, 50.0));
    }

    #[test]
    fn test_fit_contain_degenerate_texture() {
        let area = Rect::from_min_size(pos2(0.0, 0.0), vec2(800.0, 600.0));
        assert_eq!(fit_contain(vec2(0.0, 0.0), area), area);
    }
}
