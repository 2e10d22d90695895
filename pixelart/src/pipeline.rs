use {
    crate::{config::Config, stages},
    color::{ColorMap, Metric, Palette},
    im::Image,
    image::RgbaImage,
};

/// An intermediate image of the pipeline.
pub struct Stage {
    pub name: &'static str,
    pub image: RgbaImage,
}

/// Pipeline result.
pub struct Output {
    pub image: RgbaImage,
    pub map: ColorMap,
    pub stages: Vec<Stage>,
}

/// Maps the colors of the image to the palette and repaints it.
pub fn remap(im: &Image, palette: &Palette, metric: &Metric) -> (ColorMap, RgbaImage) {
    let colors = im.unique();
    tracing::info!(colors = colors.len(), "unique colors");

    let map = color::assign(colors, palette, metric);
    tracing::info!(mapped = map.len(), palette = palette.len(), "matched colors");
    (map, im.recolor(&map))
}

/// Runs the whole stylization on the source image.
pub fn run(source: &RgbaImage, config: &Config) -> Output {
    let mut history = Vec::new();
    let mut stage = |name, image: &RgbaImage| {
        tracing::debug!(name, "stage");
        history.push(Stage {
            name,
            image: image.clone(),
        });
    };

    let resized = stages::resize(source, config.width);
    let (width, height) = resized.dimensions();
    let block = config.block_size((width, height));
    tracing::info!(width, height, block, "resized");

    let websafe = stages::web_safe(&resized);
    stage("01-websafe", &websafe);

    let reduced = stages::reduce(&websafe, config.colors);
    stage("02-websafe-reduced", &reduced);

    let pixelate = |im: &RgbaImage| stages::pixelate(&stages::contrast(im, config.contrast), block);

    let reduced_pixelated = pixelate(&reduced);
    stage("03-websafe-reduced-pixelated", &reduced_pixelated);

    let source_pixelated = pixelate(&resized);
    stage("04-source-pixelated", &source_pixelated);

    let target = stages::reduce(&source_pixelated, config.colors);
    stage("05-pixelated-reduced", &target);

    let (map, image) = remap(&Image::Rgba(target), &config.palette, &config.metric);
    stage("10-target", &image);

    Output {
        image,
        map,
        stages: history,
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        color::{Color, ColorSet},
        image::Rgba,
    };

    fn photo() -> RgbaImage {
        RgbaImage::from_fn(64, 48, |x, y| {
            let r = (x * 4) as u8;
            let g = (y * 5) as u8;
            let b = ((x + y) * 2) as u8;
            Rgba([r, g, b, 255])
        })
    }

    fn small_config() -> Config {
        Config {
            width: 32,
            blocks: 8,
            ..Config::default()
        }
    }

    #[test]
    fn stages_in_order() {
        let out = run(&photo(), &small_config());
        let names: Vec<_> = out.stages.iter().map(|stage| stage.name).collect();
        assert_eq!(
            names,
            [
                "01-websafe",
                "02-websafe-reduced",
                "03-websafe-reduced-pixelated",
                "04-source-pixelated",
                "05-pixelated-reduced",
                "10-target",
            ],
        );

        assert!(out.stages.iter().all(|stage| stage.image.dimensions() == (32, 24)));
        assert_eq!(out.image.dimensions(), (32, 24));
    }

    #[test]
    fn target_uses_palette_colors() {
        let config = small_config();
        let out = run(&photo(), &config);

        let reduced = &out.stages[4].image;
        let sources = color::unique(reduced);
        assert!(sources.len() <= usize::from(config.colors));

        // The brand palette is as large as the color budget, every color gets a match
        assert_eq!(out.map.len(), sources.len());
        let palette: ColorSet = config.palette.colors().iter().copied().collect();
        assert!(color::unique(&out.image).iter().all(|col| palette.contains(col)));
    }

    #[test]
    fn unmatched_colors_pass_through() {
        let config = Config {
            palette: Palette::new([Color::rgb(255, 0, 0)]),
            ..small_config()
        };

        let out = run(&photo(), &config);
        let reduced = &out.stages[4].image;
        assert_eq!(out.map.len(), 1);
        for (x, y, px) in reduced.enumerate_pixels() {
            let col = Color(px.0);
            if out.map.get(col).is_none() {
                assert_eq!(out.image.get_pixel(x, y), px);
            }
        }
    }

    #[test]
    fn empty_palette_is_identity() {
        let config = Config {
            palette: Palette::new(Vec::new()),
            ..small_config()
        };

        let out = run(&photo(), &config);
        assert!(out.map.is_empty());
        assert_eq!(out.image, out.stages[4].image);
    }

    #[test]
    fn zero_area() {
        let out = run(&RgbaImage::new(0, 0), &Config::default());
        assert_eq!(out.image.dimensions(), (0, 0));
        assert!(out.map.is_empty());
    }

    #[test]
    fn remap_only() {
        let im = Image::Rgba(RgbaImage::from_fn(2, 2, |x, y| match (x, y) {
            (0, 0) => Rgba([255, 0, 0, 255]),
            (1, 0) => Rgba([0, 255, 0, 255]),
            (0, 1) => Rgba([0, 0, 255, 255]),
            _ => Rgba([20, 20, 20, 255]),
        }));

        let palette = Palette::new([Color::rgb(250, 10, 10), Color::rgb(10, 250, 10)]);
        let (map, out) = remap(&im, &palette, &Metric::default());
        assert_eq!(map.len(), 2);
        assert_eq!(out.get_pixel(0, 0), &Rgba([250, 10, 10, 255]));
        assert_eq!(out.get_pixel(1, 0), &Rgba([10, 250, 10, 255]));
        assert_eq!(out.get_pixel(0, 1), &Rgba([0, 0, 255, 255]));
        assert_eq!(out.get_pixel(1, 1), &Rgba([20, 20, 20, 255]));
    }
}
