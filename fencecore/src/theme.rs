//! Fences theme
//!
//! Translucent dark fences over the wallpaper, light text, blue snap guides.

use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};

pub struct FenceColors;

impl FenceColors {
    pub const FENCE_FILL: Color32 = Color32::from_rgba_premultiplied(16, 16, 20, 140);
    pub const TITLE_FILL: Color32 = Color32::from_rgba_premultiplied(8, 8, 10, 190);
    pub const BORDER: Color32 = Color32::from_rgba_premultiplied(60, 60, 60, 60);
    pub const TEXT: Color32 = Color32::from_rgb(240, 240, 240);
    pub const SELECTION: Color32 = Color32::from_rgba_premultiplied(40, 80, 130, 130);
    pub const DROP_TARGET: Color32 = Color32::from_rgba_premultiplied(0, 60, 100, 100);
    pub const DESKTOP: Color32 = Color32::from_rgb(24, 40, 56);

    /// rgba(0, 153, 255, 0.7)
    pub fn guide() -> Color32 {
        Color32::from_rgba_unmultiplied(0, 153, 255, 179)
    }
}

/// Theme configuration for the fences shell
pub struct FenceTheme {
    pub font_size_body: f32,
    pub font_size_title: f32,
    pub font_size_small: f32,
    pub rounding: f32,
    pub item_spacing: f32,
    pub guide_width: f32,
}

impl Default for FenceTheme {
    fn default() -> Self {
        Self {
            font_size_body: 13.0,
            font_size_title: 14.0,
            font_size_small: 11.0,
            rounding: 6.0,
            item_spacing: 4.0,
            guide_width: 2.0,
        }
    }
}

impl FenceTheme {
    /// Apply the theme to an egui context
    pub fn apply(&self, ctx: &egui::Context) {
        let mut style = Style::default();

        style.text_styles = [
            (TextStyle::Small, FontId::new(self.font_size_small, FontFamily::Proportional)),
            (TextStyle::Body, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Button, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Heading, FontId::new(self.font_size_title, FontFamily::Proportional)),
            (TextStyle::Monospace, FontId::new(self.font_size_body, FontFamily::Monospace)),
        ]
        .into();

        let mut visuals = Visuals::dark();
        visuals.panel_fill = FenceColors::DESKTOP;
        visuals.window_rounding = Rounding::same(self.rounding);
        visuals.menu_rounding = Rounding::same(self.rounding);
        visuals.override_text_color = Some(FenceColors::TEXT);
        visuals.selection.bg_fill = FenceColors::SELECTION;
        visuals.selection.stroke = Stroke::new(1.0, FenceColors::TEXT);

        style.visuals = visuals;
        style.spacing.item_spacing = egui::vec2(self.item_spacing, self.item_spacing);
        style.spacing.button_padding = egui::vec2(8.0, 4.0);

        ctx.set_style(style);
    }

    pub fn fence_rounding(&self) -> Rounding {
        Rounding::same(self.rounding)
    }

    pub fn title_rounding(&self) -> Rounding {
        Rounding {
            nw: self.rounding,
            ne: self.rounding,
            sw: 0.0,
            se: 0.0,
        }
    }

    pub fn guide_stroke(&self) -> Stroke {
        Stroke::new(self.guide_width, FenceColors::guide())
    }
}
