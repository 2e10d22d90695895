use {
    crate::{color::Color, distance::Metric, hsl::Hsl, palette::Palette, set::ColorSet},
    std::collections::HashMap,
};

/// A one-to-one mapping from source colors to palette colors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColorMap(HashMap<Color, Color>);

impl ColorMap {
    #[must_use]
    pub fn get(&self, source: Color) -> Option<Color> {
        self.0.get(&source).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(source, target)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (Color, Color)> + '_ {
        self.0.iter().map(|(&source, &target)| (source, target))
    }
}

/// Source colors that have not been claimed yet.
struct Candidates(Vec<(Color, Hsl)>);

impl Candidates {
    fn new(sources: ColorSet) -> Self {
        Self(sources.into_iter().map(|col| (col, Hsl::from(col))).collect())
    }

    /// Removes the closest candidate to `target` and returns it.
    /// On equal distances the earliest candidate wins.
    fn claim(&mut self, target: Hsl, metric: &Metric) -> Option<Color> {
        let (idx, _) = self
            .0
            .iter()
            .map(|&(_, hsl)| metric.distance(hsl, target))
            .enumerate()
            .fold(None, |min, (idx, diff)| match min {
                Some((_, min_diff)) if min_diff <= diff => min,
                _ => Some((idx, diff)),
            })?;

        let (col, _) = self.0.remove(idx);
        Some(col)
    }
}

/// Assigns to each palette color, in palette order, the closest source color
/// that is still unclaimed.
///
/// Each source color is claimed at most once. Once the sources run out the
/// remaining palette colors get no mapping.
pub fn assign(sources: ColorSet, palette: &Palette, metric: &Metric) -> ColorMap {
    let mut candidates = Candidates::new(sources);
    let mut map = HashMap::with_capacity(palette.len());
    for &target in palette.colors() {
        let Some(source) = candidates.claim(Hsl::from(target), metric) else {
            tracing::debug!(%target, "no source color left");
            continue;
        };

        tracing::debug!(%source, %target, "claim");
        map.insert(source, target);
    }

    ColorMap(map)
}
