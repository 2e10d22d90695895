use {
    color::{Metric, Palette},
    std::fmt,
};

/// Pipeline parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Width the source is resized to, the height keeps the aspect ratio.
    pub width: u32,

    /// Number of colors left after each color reduction.
    pub colors: u8,

    /// Number of pixel blocks on the wider side of the image.
    pub blocks: u32,

    /// Contrast adjustment in percent applied before pixelation.
    pub contrast: f32,

    pub metric: Metric,
    pub palette: Palette,
}

impl Config {
    const MAX_CONTRAST: f32 = 100.;

    /// Checks the parameters.
    ///
    /// # Errors
    /// See [`ConfigError`] for details.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 {
            return Err(ConfigError::ZeroWidth);
        }

        if self.colors == 0 {
            return Err(ConfigError::ZeroColors);
        }

        if self.blocks == 0 {
            return Err(ConfigError::ZeroBlocks);
        }

        if !(-Self::MAX_CONTRAST..=Self::MAX_CONTRAST).contains(&self.contrast) {
            return Err(ConfigError::Contrast(self.contrast));
        }

        Ok(())
    }

    /// The side of a pixel block for an image of the given size.
    #[must_use]
    pub fn block_size(&self, (width, height): (u32, u32)) -> u32 {
        (u32::max(width, height) / self.blocks).max(1)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 400,
            colors: 6,
            blocks: 40,
            contrast: 20.,
            metric: Metric::default(),
            palette: Palette::brand(),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    ZeroWidth,
    ZeroColors,
    ZeroBlocks,
    Contrast(f32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ZeroWidth => write!(f, "the width must be positive"),
            Self::ZeroColors => write!(f, "the number of colors must be positive"),
            Self::ZeroBlocks => write!(f, "the number of blocks must be positive"),
            Self::Contrast(v) => write!(
                f,
                "the contrast {v} is out of range [-{max}, {max}]",
                max = Config::MAX_CONTRAST,
            ),
        }
    }
}
