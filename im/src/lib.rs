use {
    color::{ColorMap, ColorSet},
    image::{
        codecs::png::PngEncoder, ColorType, DynamicImage, ImageBuffer, ImageEncoder, ImageError,
        Rgba, RgbaImage,
    },
    std::fmt,
};

/// An RGBA image with 16-bit channels.
pub type WideImage = ImageBuffer<Rgba<u16>, Vec<u16>>;

/// The channel depth of an image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Depth {
    Eight = 8,
    Sixteen = 16,
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Eight => write!(f, "8-bit"),
            Self::Sixteen => write!(f, "16-bit"),
        }
    }
}

/// A decoded image.
#[must_use]
pub enum Image {
    Rgba(RgbaImage),
    Wide(WideImage),
}

impl Image {
    fn from_dynamic(im: DynamicImage) -> Result<Self, Error> {
        match im {
            DynamicImage::ImageLuma8(_)
            | DynamicImage::ImageLumaA8(_)
            | DynamicImage::ImageRgb8(_) => Ok(Self::Rgba(im.into_rgba8())),
            DynamicImage::ImageRgba8(im) => Ok(Self::Rgba(im)),
            DynamicImage::ImageLuma16(_)
            | DynamicImage::ImageLumaA16(_)
            | DynamicImage::ImageRgb16(_) => Ok(Self::Wide(im.into_rgba16())),
            DynamicImage::ImageRgba16(im) => Ok(Self::Wide(im)),
            _ => Err(Error::UnsupportedFormat),
        }
    }

    #[must_use]
    pub fn depth(&self) -> Depth {
        match self {
            Self::Rgba(_) => Depth::Eight,
            Self::Wide(_) => Depth::Sixteen,
        }
    }

    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Self::Rgba(im) => im.dimensions(),
            Self::Wide(im) => im.dimensions(),
        }
    }

    /// Collects every distinct color of the image.
    #[must_use]
    pub fn unique(&self) -> ColorSet {
        match self {
            Self::Rgba(im) => color::unique(im),
            Self::Wide(im) => color::unique(im),
        }
    }

    /// Repaints the image through the color map.
    #[must_use]
    pub fn recolor(&self, map: &ColorMap) -> RgbaImage {
        match self {
            Self::Rgba(im) => color::recolor(im, map),
            Self::Wide(im) => color::recolor(im, map),
        }
    }

    /// Converts the image to 8-bit channels.
    ///
    /// Wide channels are scaled down the same way colors are collected.
    #[must_use]
    pub fn into_rgba(self) -> RgbaImage {
        match self {
            Self::Rgba(im) => im,
            Self::Wide(im) => color::recolor(&im, &ColorMap::default()),
        }
    }
}

/// Decodes a png or jpeg image from bytes.
///
/// # Errors
/// See [`Error`] for details.
pub fn decode(data: &[u8]) -> Result<Image, Error> {
    let im = image::load_from_memory(data)?;
    Image::from_dynamic(im)
}

/// Encodes the image as png in a bytes buffer.
///
/// # Errors
/// See [`Error`] for details.
pub fn encode_png(im: &RgbaImage) -> Result<Vec<u8>, Error> {
    const DEFAULT_BUFFER_CAP: usize = 256;

    let mut buf = Vec::with_capacity(DEFAULT_BUFFER_CAP);
    let encoder = PngEncoder::new(&mut buf);
    let (width, height) = im.dimensions();
    encoder.write_image(im, width, height, ColorType::Rgba8)?;
    Ok(buf)
}

/// The image error.
#[derive(Debug)]
pub enum Error {
    /// Error while decoding or encoding image data.
    Image(ImageError),

    /// A pixel format is not supported.
    UnsupportedFormat,
}

impl From<ImageError> for Error {
    fn from(v: ImageError) -> Self {
        Self::Image(v)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Image(err) => write!(f, "image error: {err}"),
            Self::UnsupportedFormat => write!(f, "unsupported format"),
        }
    }
}
