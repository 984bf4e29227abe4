use std::path::{Path, PathBuf};

use eframe::egui;

use crate::gallery::{self, Gallery};
use crate::render;
use crate::render::image_cache::ImageCache;
use crate::theme::Theme;

struct ExportApp {
    gallery: Gallery,
    theme: Theme,
    image_cache: ImageCache,
    output_dir: PathBuf,
    current_slide: usize,
    screenshot_requested: bool,
    done: bool,
}

impl ExportApp {
    fn new(gallery: Gallery, output_dir: PathBuf) -> Self {
        let theme_name = gallery.meta.theme.as_deref().unwrap_or("light");
        let theme = Theme::from_name(theme_name);
        let image_cache = ImageCache::new(gallery.base_path.clone());

        Self {
            gallery,
            theme,
            image_cache,
            output_dir,
            current_slide: 0,
            screenshot_requested: false,
            done: false,
        }
    }
}

impl eframe::App for ExportApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.done {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        // Check for screenshot result from previous frame
        let mut got_screenshot = false;
        ctx.input(|i| {
            for event in &i.events {
                if let egui::Event::Screenshot { image, .. } = event {
                    let filename = format!("slide-{:02}.png", self.current_slide + 1);
                    let path = self.output_dir.join(&filename);
                    save_color_image(image, &path);
                    eprintln!("  Saved {filename}");
                    got_screenshot = true;
                }
            }
        });

        if got_screenshot {
            self.screenshot_requested = false;
            self.current_slide += 1;
            if self.current_slide >= self.gallery.slide_count() {
                self.done = true;
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                return;
            }
        }

        let bg = self.theme.background;

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                ui.painter().rect_filled(rect, 0.0, bg);

                let scale = (rect.width() / 1280.0).min(rect.height() / 720.0);

                if let Some(slide) = self.gallery.slides.get(self.current_slide) {
                    render::render_slide(
                        ui,
                        &self.gallery,
                        slide,
                        &self.theme,
                        rect,
                        1.0,
                        &self.image_cache,
                        scale,
                    );
                }
            });

        // Request screenshot after rendering (will arrive next frame)
        if !self.screenshot_requested {
            ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
            self.screenshot_requested = true;
        }

        ctx.request_repaint();
    }
}

fn save_color_image(image: &egui::ColorImage, path: &Path) {
    let width = image.width() as u32;
    let height = image.height() as u32;
    let pixels: Vec<u8> = image
        .pixels
        .iter()
        .flat_map(|c| [c.r(), c.g(), c.b(), c.a()])
        .collect();

    image::save_buffer(path, &pixels, width, height, image::ColorType::Rgba8)
        .unwrap_or_else(|e| eprintln!("Failed to save {}: {e}", path.display()));
}

pub fn run(file: PathBuf, output_dir: PathBuf, width: u32, height: u32) -> anyhow::Result<()> {
    let gallery = gallery::load(&file)?;

    std::fs::create_dir_all(&output_dir)?;

    eprintln!(
        "Exporting {} slides to {} ({}x{})",
        gallery.slide_count(),
        output_dir.display(),
        width,
        height,
    );

    let title = gallery.display_title();

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([width as f32, height as f32])
        .with_title(&title)
        .with_decorations(false);

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let output_dir_clone = output_dir.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(ExportApp::new(gallery, output_dir_clone)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))?;

    eprintln!("Export complete.");
    Ok(())
}
