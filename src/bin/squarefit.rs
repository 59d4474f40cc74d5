use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "squarefit", version)]
/// Composite a photo onto a square canvas and write `{name}-1x1.png`.
struct Cli {
    /// Input image (PNG, JPEG, GIF, WebP, ...).
    input: PathBuf,

    /// Background fill for the area the photo does not cover.
    #[arg(long, value_enum)]
    fill: Option<FillChoice>,

    /// Blur radius in pixels (0-50). Non-numeric input falls back to 0.
    #[arg(long, allow_hyphen_values = true)]
    blur: Option<String>,

    /// Foreground scale in percent (10-100). Non-numeric input falls back to 10.
    #[arg(long, allow_hyphen_values = true)]
    scale: Option<String>,

    /// JSON file with default params (`fill_mode`, `blur_radius_px`, `scale_percent`).
    #[arg(long)]
    params: Option<PathBuf>,

    /// Directory the PNG is written to.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FillChoice {
    Blur,
    White,
    Black,
    Transparent,
}

impl From<FillChoice> for squarefit::FillMode {
    fn from(choice: FillChoice) -> Self {
        match choice {
            FillChoice::Blur => squarefit::FillMode::Blur,
            FillChoice::White => squarefit::FillMode::White,
            FillChoice::Black => squarefit::FillMode::Black,
            FillChoice::Transparent => squarefit::FillMode::Transparent,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = squarefit::SessionConfig::from_env();
    if let Some(path) = &cli.params {
        config.defaults = read_params_json(path)?;
    }

    let mut session = squarefit::Session::new(config);
    session
        .load_path(&cli.input)
        .with_context(|| format!("load image '{}'", cli.input.display()))?;

    // Field edits are debounced, so the overrides below cost a single composite.
    let now = Instant::now();
    if let Some(raw) = &cli.blur {
        session.handle(squarefit::ControlEvent::BlurField(raw.clone()), now)?;
    }
    if let Some(raw) = &cli.scale {
        session.handle(squarefit::ControlEvent::ScaleField(raw.clone()), now)?;
    }
    match cli.fill {
        Some(fill) => session.handle(squarefit::ControlEvent::FillMode(fill.into()), now)?,
        None => {
            session.flush()?;
        }
    }

    let exported = session.export().context("export composited image")?;

    std::fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("create output dir '{}'", cli.out_dir.display()))?;
    let out = cli.out_dir.join(&exported.file_name);
    std::fs::write(&out, &exported.png)
        .with_context(|| format!("write png '{}'", out.display()))?;

    let params = session.params();
    tracing::info!(
        fill = %params.fill_mode,
        blur = params.blur_radius_px,
        scale = params.scale_percent,
        "wrote {}",
        out.display()
    );
    Ok(())
}

fn read_params_json(path: &Path) -> anyhow::Result<squarefit::CompositeParams> {
    let f = File::open(path).with_context(|| format!("open params '{}'", path.display()))?;
    let r = BufReader::new(f);
    let params: squarefit::CompositeParams =
        serde_json::from_reader(r).with_context(|| "parse params JSON")?;
    Ok(params.sanitized())
}
