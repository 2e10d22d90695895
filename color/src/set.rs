use {
    crate::color::{Color, Sample},
    image::{ImageBuffer, Pixel},
    std::{collections::BTreeSet, ops::Deref},
};

/// Distinct colors of an image.
///
/// Iteration follows the channel order of colors, so anything derived from
/// a set is reproducible between runs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColorSet(BTreeSet<Color>);

impl ColorSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, col: Color) -> bool {
        self.0.insert(col)
    }

    #[must_use]
    pub fn contains(&self, col: Color) -> bool {
        self.0.contains(&col)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Color> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Color> for ColorSet {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Color>,
    {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ColorSet {
    type Item = Color;
    type IntoIter = std::collections::btree_set::IntoIter<Color>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Collects every distinct color of the image.
pub fn unique<P, C>(im: &ImageBuffer<P, C>) -> ColorSet
where
    P: Pixel + Sample,
    C: Deref<Target = [P::Subpixel]>,
{
    im.pixels().map(Sample::color).collect()
}
