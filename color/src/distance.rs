use crate::hsl::Hsl;

/// Channel weights of the perceptual distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Weights {
    pub hue: f32,
    pub saturation: f32,
    pub luminance: f32,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            hue: 0.475,
            saturation: 0.2875,
            luminance: 0.2375,
        }
    }
}

/// How the hue difference is measured.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HueDistance {
    /// Plain absolute difference. Hues on both sides of the red wraparound
    /// are far apart.
    #[default]
    Linear,

    /// Shortest way around the hue circle.
    Circular,
}

/// The weighted distance between two colors in HSL space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Metric {
    pub weights: Weights,
    pub hue: HueDistance,
}

impl Metric {
    #[must_use]
    pub fn new(hue: HueDistance) -> Self {
        Self {
            weights: Weights::default(),
            hue,
        }
    }

    #[must_use]
    pub fn distance(&self, a: Hsl, b: Hsl) -> f32 {
        let Weights {
            hue,
            saturation,
            luminance,
        } = self.weights;

        let dh = match self.hue {
            HueDistance::Linear => (a.hue - b.hue).abs(),
            HueDistance::Circular => {
                let d = (a.hue - b.hue).abs();
                d.min(1. - d)
            }
        };

        let ds = (a.saturation - b.saturation).abs();
        let dl = (a.luminance - b.luminance).abs();
        hue * dh + saturation * ds + luminance * dl
    }
}
