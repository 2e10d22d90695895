use {
    crate::{
        color::{Color, Sample},
        matcher::ColorMap,
    },
    image::{ImageBuffer, Pixel, Rgba, RgbaImage},
    std::ops::Deref,
};

/// Repaints the image through the color map.
///
/// Pixels whose color has no mapping keep their color. The source image is
/// left untouched.
pub fn recolor<P, C>(im: &ImageBuffer<P, C>, map: &ColorMap) -> RgbaImage
where
    P: Pixel + Sample,
    C: Deref<Target = [P::Subpixel]>,
{
    let (width, height) = im.dimensions();
    RgbaImage::from_fn(width, height, |x, y| {
        let col = im.get_pixel(x, y).color();
        let Color(new) = map.get(col).unwrap_or(col);
        Rgba(new)
    })
}
