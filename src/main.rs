use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use glyphqr::{Generator, ImageStyle, RenderOptions, Request, ScoreWeights, Scorer};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    None,
    Text,
    Emoji,
    Image,
}

/// Render a QR code with custom glyph modules and report its readability.
#[derive(Debug, Parser)]
#[command(name = "glyphqr", version)]
struct Cli {
    /// Destination URL
    url: String,

    #[arg(short, long, value_enum, default_value = "none")]
    mode: Mode,

    /// Caption for text mode, or the text an emoji is taken from in emoji mode
    #[arg(short, long)]
    text: Option<String>,

    /// Image for image mode
    #[arg(short, long)]
    image: Option<PathBuf>,

    /// Tint solid modules with the image colors instead of tiling it
    #[arg(long)]
    tint: bool,

    /// Outline font for caption glyphs, replacing the bundled DejaVu Sans Bold
    #[arg(long)]
    font: Option<PathBuf>,

    /// Outline font for emoji glyphs, defaults to the caption font
    #[arg(long)]
    emoji_font: Option<PathBuf>,

    #[arg(long, default_value_t = glyphqr::builder::DEFAULT_TARGET_SIZE)]
    size: u32,

    #[arg(long, default_value_t = glyphqr::builder::DEFAULT_MARGIN)]
    margin: u32,

    /// TOML file overriding scoring weights
    #[arg(long)]
    weights: Option<PathBuf>,

    #[arg(short, long, default_value = "qr.png")]
    output: PathBuf,
}

fn mime_for(path: &std::path::Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut options = RenderOptions { target_size: cli.size, margin: cli.margin, ..Default::default() };
    if let Some(path) = &cli.font {
        options = options.with_font(RenderOptions::load_font(path)?);
    }
    if let Some(path) = &cli.emoji_font {
        options = options.with_emoji_font(RenderOptions::load_font(path)?);
    }
    let weights = match &cli.weights {
        Some(path) => ScoreWeights::load(path)?,
        None => ScoreWeights::default(),
    };

    let mut request = Request::new(cli.url);
    let text = cli.text.unwrap_or_default();
    request = match cli.mode {
        Mode::None => request,
        Mode::Text => request.text(text),
        Mode::Emoji => request.emoji(text),
        Mode::Image => {
            let path = cli.image.context("--image is required in image mode")?;
            let bytes = fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
            let style = if cli.tint { ImageStyle::Tint } else { ImageStyle::Tile };
            request.image(bytes, mime_for(&path)).image_style(style)
        }
    };

    let out = Generator::new(options, Scorer::new(weights)).generate(request)?;
    fs::write(&cli.output, out.to_png()?)
        .with_context(|| format!("writing {}", cli.output.display()))?;
    info!("QR code saved to: {}", cli.output.display());

    println!("Score: {}, Readable: {}", out.score, out.is_readable);
    if let Some(warning) = &out.warning {
        println!("Warning: {warning}");
    }
    Ok(())
}
