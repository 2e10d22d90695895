use {
    crate::color::Color,
    serde::{Deserialize, Serialize},
};

/// An ordered list of target colors.
///
/// The order is significant: earlier colors pick their match first.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Palette(Vec<Color>);

impl Palette {
    pub fn new<C>(colors: C) -> Self
    where
        C: Into<Vec<Color>>,
    {
        Self(colors.into())
    }

    /// The default brand palette.
    pub fn brand() -> Self {
        Self(vec![
            Color::rgb(255, 255, 0),
            Color::rgb(0, 255, 0),
            Color::rgb(0, 0, 255),
            Color::rgb(255, 0, 0),
            Color::rgb(255, 128, 0),
            Color::rgb(255, 255, 255),
        ])
    }

    /// The 216 web-safe colors.
    pub fn web_safe() -> Self {
        const STEPS: [u8; 6] = [0x00, 0x33, 0x66, 0x99, 0xCC, 0xFF];

        let colors = STEPS
            .into_iter()
            .flat_map(|r| STEPS.into_iter().map(move |g| (r, g)))
            .flat_map(|(r, g)| STEPS.into_iter().map(move |b| Color::rgb(r, g, b)))
            .collect();

        Self(colors)
    }

    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::brand()
    }
}
