use eframe::egui::Color32;

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub background: Color32,
    pub foreground: Color32,
    pub heading_color: Color32,
    pub accent: Color32,
    /// Cards, image placeholders, the lightbox caption plate.
    pub panel_background: Color32,
    /// The pinned header bar.
    pub chrome_background: Color32,
    /// Lightbox backdrop at full opacity.
    pub backdrop: Color32,
    pub hero_title_size: f32,
    pub section_title_size: f32,
    pub caption_title_size: f32,
    pub caption_body_size: f32,
    pub body_size: f32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Color32::from_rgb(0x1E, 0x1E, 0x1E),
            foreground: Color32::from_rgb(0xC8, 0xC8, 0xC8),
            heading_color: Color32::WHITE,
            accent: Color32::from_rgb(0x52, 0x94, 0xE2),
            panel_background: Color32::from_rgb(0x2D, 0x2D, 0x2D),
            chrome_background: Color32::from_rgb(0x25, 0x25, 0x25),
            backdrop: Color32::from_rgb(0x0A, 0x0A, 0x0A),
            hero_title_size: 72.0,
            section_title_size: 40.0,
            caption_title_size: 28.0,
            caption_body_size: 18.0,
            body_size: 20.0,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color32::WHITE,
            foreground: Color32::from_rgb(0x1A, 0x1A, 0x2E),
            heading_color: Color32::from_rgb(0x16, 0x21, 0x3E),
            accent: Color32::from_rgb(0x0F, 0x34, 0x60),
            panel_background: Color32::from_rgb(0xF5, 0xF5, 0xF5),
            chrome_background: Color32::from_rgb(0xFC, 0xFC, 0xFC),
            backdrop: Color32::from_rgb(0x10, 0x10, 0x14),
            hero_title_size: 72.0,
            section_title_size: 40.0,
            caption_title_size: 28.0,
            caption_body_size: 18.0,
            body_size: 20.0,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "dark" => Self::dark(),
            _ => Self::light(),
        }
    }

    pub fn toggled(&self) -> Self {
        if self.name == "dark" {
            Self::light()
        } else {
            Self::dark()
        }
    }

    /// Apply opacity to a color
    pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), (opacity * 255.0) as u8)
    }
}
