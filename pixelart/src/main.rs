mod config;
mod pipeline;
mod stages;

use {
    crate::{
        config::{Config, ConfigError},
        pipeline::Stage,
    },
    clap::Parser,
    color::{HueDistance, Metric, Palette},
    im::Error as ImageError,
    serde_json::Error as JsonError,
    std::{
        env, fmt,
        fs::{self, File},
        io::{self, BufWriter, Read, Write},
        path::{Path, PathBuf},
        process::ExitCode,
    },
    tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt},
};

/// Turns an image into pixel art painted with a fixed palette
#[derive(Parser)]
struct Cli {
    /// Image to convert, png or jpeg (stdin by default)
    imagepath: Option<PathBuf>,

    /// Number of colors in the reduced image
    #[arg(short, long, default_value_t = 6, value_parser = clap::value_parser!(u8).range(1..))]
    colors: u8,

    /// Number of pixel blocks on the wider side of the output
    #[arg(short, long, default_value_t = 40)]
    blocks: u32,

    /// Width the image is resized to before processing
    #[arg(short, long, default_value_t = 400)]
    width: u32,

    /// Contrast adjustment in percent
    #[arg(long, default_value_t = 20., allow_negative_numbers = true)]
    contrast: f32,

    /// Target palette as a json list of hex colors (brand palette by default)
    #[arg(short, long)]
    palette: Option<PathBuf>,

    /// Measure hue differences around the hue circle
    #[arg(long)]
    circular_hue: bool,

    /// Only match and repaint the colors, skip the stylization
    #[arg(long)]
    recolor_only: bool,

    /// Also write every intermediate image
    #[arg(long)]
    stages: bool,

    /// Print the target palette as json and exit
    #[arg(long)]
    print_palette: bool,

    /// Output image name ("out" by default)
    #[arg(short, long)]
    name: Option<String>,

    /// Specify output directory (current by default)
    #[arg(short, long)]
    outdir: Option<PathBuf>,
}

impl Cli {
    fn config(&self) -> Result<Config, Error> {
        let palette = match &self.palette {
            Some(path) => {
                let src = read_string(path)?;
                serde_json::from_str(&src)?
            }
            None => Palette::brand(),
        };

        let hue = if self.circular_hue {
            HueDistance::Circular
        } else {
            HueDistance::Linear
        };

        let config = Config {
            width: self.width,
            colors: self.colors,
            blocks: self.blocks,
            contrast: self.contrast,
            metric: Metric::new(hue),
            palette,
        };

        config.validate()?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pixelart=info,color=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time().with_writer(io::stderr))
        .init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(cli: Cli) -> Result<(), Error> {
    let config = cli.config()?;
    if cli.print_palette {
        return print_palette(&config.palette, io::stdout().lock());
    }

    let data = read_data(cli.imagepath.as_deref())?;
    let source = im::decode(&data)?;
    let (width, height) = source.dimensions();
    tracing::info!(width, height, depth = %source.depth(), "decoded image");

    let name = cli.name.as_deref().unwrap_or("out");
    let outdir = make_outdir(cli.outdir)?;
    if cli.recolor_only {
        let (_, image) = pipeline::remap(&source, &config.palette, &config.metric);
        return write_png(&image, name, &outdir);
    }

    let out = pipeline::run(&source.into_rgba(), &config);
    if cli.stages {
        for Stage { name, image } in &out.stages {
            write_png(image, name, &outdir)?;
        }
    }

    write_png(&out.image, name, &outdir)
}

fn print_palette<W>(palette: &Palette, mut out: W) -> Result<(), Error>
where
    W: Write,
{
    serde_json::to_writer(&mut out, palette)
        .map_err(io::Error::from)
        .and_then(|()| writeln!(out))
        .map_err(|_| Error::WriteStdout)
}

fn read_string(path: &Path) -> Result<String, Error> {
    fs::read_to_string(path).map_err(|_| Error::ReadFile(path.to_owned()))
}

fn read_data(path: Option<&Path>) -> Result<Vec<u8>, Error> {
    let stdin_read = || {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .map_err(|_| Error::ReadStdin)?;

        Ok(buf)
    };

    match path {
        Some(path) => fs::read(path).map_err(|_| Error::ReadFile(path.to_owned())),
        None => stdin_read(),
    }
}

fn make_outdir(outdir: Option<PathBuf>) -> Result<PathBuf, Error> {
    let outdir = outdir
        .or_else(|| env::current_dir().ok())
        .ok_or(Error::OutDir)?;

    if !outdir.exists() {
        fs::create_dir_all(&outdir).map_err(|_| Error::OutDir)?;
    }

    Ok(outdir)
}

fn write_png(image: &image::RgbaImage, name: &str, outdir: &Path) -> Result<(), Error> {
    let data = im::encode_png(image)?;
    let mut path = outdir.join(name);
    path.set_extension("png");
    tracing::info!(path = %path.display(), "write image");
    let mut file = {
        let file = File::create(&path).map_err(|_| Error::CreateFile(path.clone()))?;
        BufWriter::new(file)
    };

    file.write_all(&data)
        .and_then(|()| file.flush())
        .map_err(|_| Error::WriteToFile(path))
}

#[derive(Debug)]
enum Error {
    ReadFile(PathBuf),
    ReadStdin,
    WriteStdout,
    OutDir,
    CreateFile(PathBuf),
    WriteToFile(PathBuf),
    Config(ConfigError),
    Image(ImageError),
    Json(JsonError),
}

impl From<ConfigError> for Error {
    fn from(v: ConfigError) -> Self {
        Self::Config(v)
    }
}

impl From<ImageError> for Error {
    fn from(v: ImageError) -> Self {
        Self::Image(v)
    }
}

impl From<JsonError> for Error {
    fn from(v: JsonError) -> Self {
        Self::Json(v)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ReadFile(path) => write!(f, "failed to read file {path:?}"),
            Self::ReadStdin => write!(f, "failed to read stdin"),
            Self::WriteStdout => write!(f, "failed to write stdout"),
            Self::OutDir => write!(f, "failed to get output directory"),
            Self::CreateFile(path) => write!(f, "failed to create the file {path:?}"),
            Self::WriteToFile(path) => write!(f, "failed to write file {path:?}"),
            Self::Config(err) => write!(f, "invalid config: {err}"),
            Self::Image(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "invalid palette: {err}"),
        }
    }
}
