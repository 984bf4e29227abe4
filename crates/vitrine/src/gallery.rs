use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// A loaded gallery: manifest metadata plus the slide list, with image paths
/// resolved against the manifest's parent directory.
#[derive(Debug, Clone)]
pub struct Gallery {
    pub meta: GalleryMeta,
    pub slides: Vec<Slide>,
    pub base_path: PathBuf,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GalleryMeta {
    #[serde(default)]
    pub title: Option<String>,

    /// "light" or "dark". Anything else falls back to light.
    #[serde(default)]
    pub theme: Option<String>,

    /// Auto-rotation period in milliseconds.
    #[serde(default)]
    pub interval: Option<u64>,

    #[serde(default)]
    pub footer: Option<String>,

    /// Free text shown in the page's About section.
    #[serde(default)]
    pub about: Option<String>,
}

/// One showcase entry: an image plus the text presented with it, both in the
/// carousel caption and in the expanded lightbox.
#[derive(Debug, Clone, Deserialize)]
pub struct Slide {
    pub image: PathBuf,

    #[serde(default)]
    pub alt: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
struct RawManifest {
    #[serde(flatten)]
    meta: GalleryMeta,

    #[serde(default)]
    slides: Vec<Slide>,
}

pub fn parse(content: &str, base_path: &Path) -> Result<Gallery> {
    let raw: RawManifest =
        serde_yaml::from_str(content).context("invalid gallery manifest")?;
    if raw.slides.is_empty() {
        anyhow::bail!("No slides found in manifest");
    }
    Ok(Gallery {
        meta: raw.meta,
        slides: raw.slides,
        base_path: base_path.to_path_buf(),
    })
}

pub fn load(path: &Path) -> Result<Gallery> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    let base_path = path.parent().unwrap_or(Path::new("."));
    parse(&content, base_path)
}

impl Gallery {
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Image path for a slide, absolute or joined onto the manifest dir.
    pub fn resolve_image(&self, slide: &Slide) -> PathBuf {
        if slide.image.is_absolute() {
            slide.image.clone()
        } else {
            self.base_path.join(&slide.image)
        }
    }

    pub fn display_title(&self) -> String {
        self.meta
            .title
            .clone()
            .unwrap_or_else(|| "Gallery".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
title: Port of Marseille
theme: dark
interval: 4000
footer: vitrine sample gallery
slides:
  - image: photos/old-port.jpg
    alt: Fishing boats at the old port
    title: The Old Port
    description: Morning light over the quay.
  - image: photos/calanques.jpg
    title: Calanques
";

    #[test]
    fn test_sample_manifest_parses() {
        let gallery = parse(SAMPLE, Path::new("/galleries/marseille")).unwrap();
        assert_eq!(gallery.meta.title.as_deref(), Some("Port of Marseille"));
        assert_eq!(gallery.meta.theme.as_deref(), Some("dark"));
        assert_eq!(gallery.meta.interval, Some(4000));
        assert_eq!(gallery.slide_count(), 2);
        assert_eq!(gallery.slides[0].title, "The Old Port");
    }

    #[test]
    fn test_missing_text_fields_default_empty() {
        let gallery = parse(SAMPLE, Path::new(".")).unwrap();
        assert_eq!(gallery.slides[1].alt, "");
        assert_eq!(gallery.slides[1].description, "");
    }

    #[test]
    fn test_empty_slides_is_an_error() {
        let err = parse("title: Empty\nslides: []\n", Path::new(".")).unwrap_err();
        assert!(err.to_string().contains("No slides"));
    }

    #[test]
    fn test_missing_slides_key_is_an_error() {
        assert!(parse("title: Bare\n", Path::new(".")).is_err());
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        assert!(parse("slides: [unclosed", Path::new(".")).is_err());
    }

    #[test]
    fn test_image_path_resolution() {
        let gallery = parse(SAMPLE, Path::new("/galleries/marseille")).unwrap();
        assert_eq!(
            gallery.resolve_image(&gallery.slides[0]),
            PathBuf::from("/galleries/marseille/photos/old-port.jpg")
        );

        let absolute = Slide {
            image: PathBuf::from("/srv/photos/pic.png"),
            alt: String::new(),
            title: String::new(),
            description: String::new(),
        };
        assert_eq!(
            gallery.resolve_image(&absolute),
            PathBuf::from("/srv/photos/pic.png")
        );
    }

    #[test]
    fn test_display_title_fallback() {
        let gallery = parse("slides:\n  - image: a.png\n", Path::new(".")).unwrap();
        assert_eq!(gallery.display_title(), "Gallery");
    }
}
