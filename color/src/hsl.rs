use {
    crate::color::Color,
    palette::{convert::IntoColorUnclamped, Srgb},
};

/// Hue, saturation and luminance of a color.
///
/// All components lie in `[0, 1]`, the hue is a fraction of the full turn
/// in `[0, 1)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    pub hue: f32,
    pub saturation: f32,
    pub luminance: f32,
}

impl Hsl {
    const DEGREES: f32 = 360.;

    /// Converts the color to HSL. The alpha channel is ignored.
    #[must_use]
    pub fn from_color(Color([r, g, b, _]): Color) -> Self {
        let hsl: palette::Hsl = Srgb::new(r, g, b).into_format::<f32>().into_color_unclamped();
        let hue = hsl.hue.into_positive_degrees() / Self::DEGREES;
        Self {
            hue: if hue < 1. { hue } else { 0. },
            saturation: hsl.saturation,
            luminance: hsl.lightness,
        }
    }

    /// Converts back to an opaque color.
    #[must_use]
    pub fn to_color(self) -> Color {
        let hsl = palette::Hsl::new(self.hue * Self::DEGREES, self.saturation, self.luminance);
        let rgb: Srgb = hsl.into_color_unclamped();
        let [r, g, b]: [u8; 3] = rgb.into_format::<u8>().into();
        Color::rgb(r, g, b)
    }
}

impl From<Color> for Hsl {
    fn from(col: Color) -> Self {
        Self::from_color(col)
    }
}
