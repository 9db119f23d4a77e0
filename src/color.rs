use palette::{Hsl, IntoColor, Srgb};

/// 8-bit sRGB triple, ready for any charting backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const DARK_BLUE: Rgb = Rgb(0, 0, 139);
    pub const ORANGE: Rgb = Rgb(255, 165, 0);

    /// `#rrggbb` form.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Rgb> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Series colours for player charts
// ---------------------------------------------------------------------------

/// Colours for `n` chart series: dark blue for the first player, orange for
/// the second, generated hues after that.
pub fn series_colors(n: usize) -> Vec<Rgb> {
    let fixed = [Rgb::DARK_BLUE, Rgb::ORANGE];
    let mut colors: Vec<Rgb> = fixed.iter().copied().take(n).collect();
    if n > fixed.len() {
        colors.extend(generate_palette(n - fixed.len()));
    }
    colors
}
