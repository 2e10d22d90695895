use {
    color::{Color, Nearest, Palette},
    image::{
        imageops::{self, FilterType},
        GenericImageView, Rgba, RgbaImage,
    },
    kmeans_colors::get_kmeans,
    palette::{IntoColor, Lab, Srgb},
    std::collections::BTreeSet,
};

fn is_empty(im: &RgbaImage) -> bool {
    let (width, height) = im.dimensions();
    width == 0 || height == 0
}

/// Resizes the image to the given width keeping the aspect ratio.
pub fn resize(im: &RgbaImage, width: u32) -> RgbaImage {
    let (w, h) = im.dimensions();
    if is_empty(im) || w == width {
        return im.clone();
    }

    let height = (u64::from(h) * u64::from(width) + u64::from(w) / 2) / u64::from(w);
    let height = u32::try_from(height).unwrap_or(u32::MAX).max(1);
    imageops::resize(im, width, height, FilterType::Nearest)
}

/// Snaps every pixel to the closest web-safe color.
pub fn web_safe(im: &RgbaImage) -> RgbaImage {
    let Some(mut swatches) = Nearest::new(&Palette::web_safe()) else {
        return im.clone();
    };

    let mut out = im.clone();
    for Rgba(col) in out.pixels_mut() {
        let Color(new) = swatches.closest(Color(*col));
        *col = new;
    }

    out
}

/// Reduces the image to at most `colors` colors.
///
/// Colors are clustered with k-means in Lab space, every pixel takes the
/// color of its cluster center and the mean alpha of its cluster. When the
/// opaque colors already fit, each of them is its own cluster. Images that
/// already fit with their alpha are left as is.
pub fn reduce(im: &RgbaImage, colors: u8) -> RgbaImage {
    let budget = usize::from(colors);
    if color::unique(im).len() <= budget {
        return im.clone();
    }

    let rgb: BTreeSet<[u8; 3]> = im.pixels().map(|&Rgba([r, g, b, _])| [r, g, b]).collect();
    let (centers, indices) = if rgb.len() <= budget {
        let centers: Vec<_> = rgb.into_iter().collect();
        let indices: Vec<usize> = im
            .pixels()
            .map(|&Rgba([r, g, b, _])| centers.binary_search(&[r, g, b]).unwrap_or_default())
            .collect();

        (centers, indices)
    } else {
        cluster(im, budget)
    };

    let mut alpha = vec![(0_u64, 0_u64); centers.len()];
    for (&Rgba([.., a]), &idx) in im.pixels().zip(&indices) {
        let (sum, n) = &mut alpha[idx];
        *sum += u64::from(a);
        *n += 1;
    }

    let alpha: Vec<u8> = alpha
        .into_iter()
        .map(|(sum, n)| match n {
            0 => u8::MAX,
            n => ((sum + n / 2) / n) as u8,
        })
        .collect();

    let mut out = im.clone();
    for (Rgba(col), &idx) in out.pixels_mut().zip(&indices) {
        let [r, g, b] = centers[idx];
        *col = [r, g, b, alpha[idx]];
    }

    out
}

/// Clusters the opaque colors with k-means, returns the centers and
/// the cluster index of every pixel.
fn cluster(im: &RgbaImage, k: usize) -> (Vec<[u8; 3]>, Vec<usize>) {
    const MAX_ITERATIONS: usize = 20;
    const CONVERGE: f32 = 1e-4;
    const SEED: u64 = 0;

    let lab: Vec<Lab> = im
        .pixels()
        .map(|&Rgba([r, g, b, _])| Srgb::new(r, g, b).into_format::<f32>().into_color())
        .collect();

    let kmeans = get_kmeans(k, MAX_ITERATIONS, CONVERGE, false, &lab, SEED);
    let centers = kmeans
        .centroids
        .iter()
        .map(|&lab| {
            let rgb: Srgb = lab.into_color();
            rgb.into_format::<u8>().into()
        })
        .collect();

    let indices = kmeans.indices.iter().map(|&idx| usize::from(idx)).collect();
    (centers, indices)
}

/// Adjusts the contrast by the given percentage.
pub fn contrast(im: &RgbaImage, percent: f32) -> RgbaImage {
    if percent.abs() < f32::EPSILON {
        return im.clone();
    }

    imageops::contrast(im, percent)
}

/// Fills every `block` × `block` square with its average color.
/// Blocks on the right and bottom edges may be smaller.
pub fn pixelate(im: &RgbaImage, block: u32) -> RgbaImage {
    if block <= 1 || is_empty(im) {
        return im.clone();
    }

    let (width, height) = im.dimensions();
    let mut out = RgbaImage::new(width, height);
    for y in (0..height).step_by(block as usize) {
        for x in (0..width).step_by(block as usize) {
            let w = u32::min(block, width - x);
            let h = u32::min(block, height - y);
            let view = imageops::crop_imm(im, x, y, w, h);

            let mut sum = [0_u64; 4];
            for (_, _, Rgba(col)) in view.pixels() {
                for (s, v) in sum.iter_mut().zip(col) {
                    *s += u64::from(v);
                }
            }

            let n = u64::from(w) * u64::from(h);
            let avg = Rgba(sum.map(|s| ((s + n / 2) / n) as u8));
            for py in y..y + h {
                for px in x..x + w {
                    out.put_pixel(px, py, avg);
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 255 / width) as u8, (y * 255 / height) as u8, 90, 255])
        })
    }

    #[test]
    fn resize_keeps_aspect() {
        let out = resize(&gradient(800, 600), 400);
        assert_eq!(out.dimensions(), (400, 300));

        let out = resize(&gradient(30, 90), 10);
        assert_eq!(out.dimensions(), (10, 30));

        let out = resize(&gradient(1000, 1), 10);
        assert_eq!(out.dimensions(), (10, 1));
    }

    #[test]
    fn web_safe_colors_only() {
        let out = web_safe(&gradient(40, 30));
        assert_eq!(out.dimensions(), (40, 30));
        assert!(out
            .pixels()
            .all(|Rgba(col)| col[..3].iter().all(|v| v % 0x33 == 0) && col[3] == 255));
    }

    #[test]
    fn reduce_limits_colors() {
        let im = gradient(32, 32);
        assert!(color::unique(&im).len() > 6);

        let out = reduce(&im, 6);
        assert_eq!(out.dimensions(), im.dimensions());
        assert!(color::unique(&out).len() <= 6);
    }

    #[test]
    fn reduce_is_deterministic() {
        let im = gradient(24, 16);
        assert_eq!(reduce(&im, 4), reduce(&im, 4));
    }

    #[test]
    fn reduce_keeps_small_images() {
        let im = RgbaImage::from_fn(4, 4, |x, _| {
            if x < 2 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            }
        });

        assert_eq!(reduce(&im, 6), im);
    }

    #[test]
    fn reduce_limits_alpha() {
        // One opaque color under seven different alphas
        let im = RgbaImage::from_fn(7, 1, |x, _| Rgba([255, 0, 0, (x * 40) as u8]));
        assert_eq!(color::unique(&im).len(), 7);

        let out = reduce(&im, 6);
        let colors = color::unique(&out);
        assert_eq!(colors.len(), 1);
        assert!(colors.contains(Color::rgba(255, 0, 0, 120)));
    }

    #[test]
    fn reduce_limits_translucent_colors() {
        let mut im = gradient(32, 32);
        for (x, y, Rgba(col)) in im.enumerate_pixels_mut() {
            col[3] = ((x + y) * 4) as u8;
        }

        assert!(color::unique(&im).len() > 6);
        let out = reduce(&im, 6);
        assert!(color::unique(&out).len() <= 6);
    }

    #[test]
    fn reduce_few_colors_many_alphas() {
        let im = RgbaImage::from_fn(4, 4, |x, y| {
            let a = 100 + (y * 10) as u8;
            if x < 2 {
                Rgba([255, 0, 0, a])
            } else {
                Rgba([0, 0, 255, a])
            }
        });

        let out = reduce(&im, 3);
        assert_eq!(
            color::unique(&out).into_iter().collect::<Vec<_>>(),
            [Color::rgba(0, 0, 255, 115), Color::rgba(255, 0, 0, 115)],
        );
    }

    #[test]
    fn pixelate_blocks() {
        let im = RgbaImage::from_fn(5, 3, |x, _| Rgba([(x * 10) as u8, 0, 0, 255]));
        let out = pixelate(&im, 2);

        assert_eq!(out.dimensions(), (5, 3));
        assert_eq!(out.get_pixel(0, 0), &Rgba([5, 0, 0, 255]));
        assert_eq!(out.get_pixel(1, 1), &Rgba([5, 0, 0, 255]));
        assert_eq!(out.get_pixel(3, 2), &Rgba([25, 0, 0, 255]));
        assert_eq!(out.get_pixel(4, 0), &Rgba([40, 0, 0, 255]));
    }

    #[test]
    fn unit_block_is_identity() {
        let im = gradient(7, 5);
        assert_eq!(pixelate(&im, 1), im);
    }

    #[test]
    fn zero_area_passes_through() {
        let im = RgbaImage::new(0, 0);
        assert_eq!(resize(&im, 400).dimensions(), (0, 0));
        assert_eq!(reduce(&im, 6).dimensions(), (0, 0));
        assert_eq!(pixelate(&im, 10).dimensions(), (0, 0));
        assert_eq!(web_safe(&im).dimensions(), (0, 0));
    }

    #[test]
    fn contrast_keeps_dimensions() {
        let im = gradient(9, 4);
        assert_eq!(contrast(&im, 20.).dimensions(), (9, 4));
        assert_eq!(contrast(&im, 0.), im);
    }
}
