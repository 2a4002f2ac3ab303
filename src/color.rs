use palette::{Hsl, IntoColor, Srgb};

/// Series colours of the bundled plants, kept stable across selections.
pub const PLANT_COLORS: [(&str, &str); 3] = [
    ("plant-1", "#10b981"),
    ("plant-2", "#3b82f6"),
    ("plant-3", "#f59e0b"),
];

/// Hue of the first generated colour; purple sits clear of the fixed set.
const HUE_START: f32 = 280.0;

pub fn fixed_color(plant_id: &str) -> Option<&'static str> {
    PLANT_COLORS
        .iter()
        .find(|(id, _)| *id == plant_id)
        .map(|(_, color)| *color)
}

/// `n` hex colours with evenly spaced hues.
pub fn hue_palette(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            let hue = HUE_START + 360.0 * i as f32 / n as f32;
            let rgb: Srgb = Hsl::new(hue, 0.7, 0.5).into_color();
            to_hex(rgb)
        })
        .collect()
}

fn to_hex(rgb: Srgb) -> String {
    let rgb: Srgb<u8> = rgb.into_format();
    format!("#{:02x}{:02x}{:02x}", rgb.red, rgb.green, rgb.blue)
}

/// One colour per plant, in order.
///
/// Plants with a fixed colour keep it; the others share a generated palette
/// sized to how many of them there are.
pub fn series_colors<S: AsRef<str>>(plant_ids: &[S]) -> Vec<String> {
    let unfixed = plant_ids
        .iter()
        .filter(|id| fixed_color(id.as_ref()).is_none())
        .count();
    let mut generated = hue_palette(unfixed).into_iter();

    plant_ids
        .iter()
        .map(|id| match fixed_color(id.as_ref()) {
            Some(color) => color.to_string(),
            None => generated.next().unwrap_or_default(),
        })
        .collect()
}
