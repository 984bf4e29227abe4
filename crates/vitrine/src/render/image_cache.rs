use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use eframe::egui;

enum CacheEntry {
    Loaded(egui::TextureHandle),
    /// Decode failed; remembered so a broken file is reported once, not
    /// once per frame.
    Failed,
}

/// Lazy path-to-texture cache. Textures live for the lifetime of the cache;
/// single-threaded interior mutability because loading happens mid-paint.
pub struct ImageCache {
    base_path: PathBuf,
    entries: RefCell<HashMap<PathBuf, CacheEntry>>,
}

impl ImageCache {
    pub fn new(base_path: PathBuf) -> Self {
        Self {
            base_path,
            entries: RefCell::new(HashMap::new()),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_path.join(path)
        }
    }

    /// Fetch a texture, decoding the file on first use. Returns `None` for
    /// missing or undecodable files; callers paint a placeholder instead.
    pub fn get_or_load(&self, ui: &egui::Ui, path: &Path) -> Option<egui::TextureHandle> {
        let resolved = self.resolve(path);
        let mut entries = self.entries.borrow_mut();
        let entry = entries
            .entry(resolved.clone())
            .or_insert_with(|| load_entry(ui.ctx(), &resolved));
        match entry {
            CacheEntry::Loaded(handle) => Some(handle.clone()),
            CacheEntry::Failed => None,
        }
    }

    /// Drop every cached texture so the next paint reloads from disk.
    /// Used after a manifest hot reload.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

fn load_entry(ctx: &egui::Context, path: &Path) -> CacheEntry {
    match image::open(path) {
        Ok(img) => {
            let rgba = img.into_rgba8();
            let size = [rgba.width() as usize, rgba.height() as usize];
            let color_image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
            let handle = ctx.load_texture(
                path.display().to_string(),
                color_image,
                egui::TextureOptions::LINEAR,
            );
            CacheEntry::Loaded(handle)
        }
        Err(e) => {
            log::warn!("failed to load image {}: {e}", path.display());
            CacheEntry::Failed
        }
    }
}
