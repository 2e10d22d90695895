use {
    crate::{color::Color, palette::Palette},
    palette::{color_difference::Ciede2000, convert::IntoColorUnclamped, Lab, Srgb},
    std::collections::HashMap,
};

/// Snaps colors to the perceptually closest swatch of a palette.
///
/// Unlike [`assign`](crate::assign) this is many-to-one: any number of
/// colors may snap to the same swatch. Results are cached per color.
pub struct Nearest {
    swatches: Vec<Color>,
    labs: Vec<Lab>,
    cache: HashMap<Color, Color>,
}

impl Nearest {
    /// Returns `None` if the palette is empty.
    #[must_use]
    pub fn new(palette: &Palette) -> Option<Self> {
        if palette.is_empty() {
            return None;
        }

        let swatches = palette.colors().to_vec();
        Some(Self {
            labs: swatches.iter().map(|&col| to_lab(col)).collect(),
            swatches,
            cache: HashMap::with_capacity(128),
        })
    }

    /// Returns the closest swatch keeping the alpha of `target`.
    pub fn closest(&mut self, target: Color) -> Color {
        *self.cache.entry(target).or_insert_with(|| {
            let target_lab = to_lab(target);
            let diffs = self.labs.iter().map(|col| col.difference(target_lab));
            let (min_idx, _) =
                (0..)
                    .zip(diffs)
                    .fold((0, f32::INFINITY), |min @ (_, min_diff), (idx, diff)| {
                        if diff < min_diff {
                            (idx, diff)
                        } else {
                            min
                        }
                    });

            let Color([r, g, b, _]) = self.swatches[min_idx];
            Color::rgba(r, g, b, target.alpha())
        })
    }
}

fn to_lab(Color([r, g, b, _]): Color) -> Lab {
    Srgb::new(r, g, b).into_linear().into_color_unclamped()
}
