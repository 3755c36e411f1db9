use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Lighten, Srgb};

use crate::data::model::{Category, StarSize, Status};

// ---------------------------------------------------------------------------
// Fixed palettes
// ---------------------------------------------------------------------------

const NEUTRAL: Color32 = Color32::from_rgb(0xb3, 0xb3, 0xb3);
const WARNING: Color32 = Color32::from_rgb(0xff, 0x1a, 0x1a);
const FAVORABLE: Color32 = Color32::from_rgb(0x00, 0xff, 0x00);

/// A category with a colour that never depends on which values are present.
pub trait Palette: Category {
    fn color(self) -> Color32;
}

impl Palette for Status {
    fn color(self) -> Color32 {
        match self {
            Status::MarginallyAdmissible => NEUTRAL,
            Status::Extreme => WARNING,
            Status::Suitable => FAVORABLE,
        }
    }
}

impl Palette for StarSize {
    fn color(self) -> Color32 {
        match self {
            StarSize::SmallerThanSun => FAVORABLE,
            StarSize::SunLike => NEUTRAL,
            StarSize::LargerThanSun => WARNING,
        }
    }
}

/// Legend entries (label → colour) in the category's fixed order.
pub fn legend_entries<T: Palette>() -> Vec<(&'static str, Color32)> {
    T::ALL.iter().map(|c| (c.label(), c.color())).collect()
}

// ---------------------------------------------------------------------------
// Derived shades
// ---------------------------------------------------------------------------

/// Lighter, translucent version of `color` for overlaid histogram bars.
pub fn overlay_fill(color: Color32, alpha: u8) -> Color32 {
    let rgb = Srgb::new(color.r(), color.g(), color.b()).into_format::<f32>();
    let hsl: Hsl = rgb.into_color();
    let light: Srgb = hsl.lighten(0.15).into_color();
    let light = light.into_format::<u8>();
    Color32::from_rgba_unmultiplied(light.red, light.green, light.blue, alpha)
}
