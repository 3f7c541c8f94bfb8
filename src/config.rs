use crate::color::Color;
use crate::page::{default_swatches, Swatch, DEFAULT_BAG_NAME};
use crate::slider::ITEMS_PER_VIEW;
use clap::builder::TypedValueParser as _;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Command line of the showcase
#[derive(Parser, Debug)]
#[command(name = "bag3d", version)]
#[command(about = "A 3D bag showcase with a product slider, in your terminal", long_about = None)]
pub struct Cli {
    /// Initial bag color as #rrggbb
    #[arg(long, default_value = "#1a1a1a")]
    pub color: Color,

    /// Color button as NAME=#rrggbb; repeat to replace the default palette
    #[arg(long = "swatch")]
    pub swatches: Vec<Swatch>,

    /// Name of the displayed bag
    #[arg(long, default_value = DEFAULT_BAG_NAME)]
    pub bag_name: String,

    /// Frames per second of the render loop
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Start without auto-rotation
    #[arg(long)]
    pub no_auto_rotate: bool,

    /// Drawing buffer pixels per surface pixel
    #[arg(long, default_value_t = 1.0, value_parser = parse_pixel_ratio)]
    pub pixel_ratio: f64,

    /// Width and height of the shadow map in texels
    #[arg(long, default_value_t = 512, value_parser = clap::value_parser!(u16).range(1..=4096).map(usize::from))]
    pub shadow_map_size: usize,

    /// Cards visible in one slider page
    #[arg(long, default_value_t = ITEMS_PER_VIEW, value_parser = clap::value_parser!(u16).range(1..).map(usize::from))]
    pub items_per_view: usize,

    /// Width of a product card in columns
    #[arg(long, default_value_t = 18, value_parser = clap::value_parser!(u16).range(8..).map(usize::from))]
    pub card_width: usize,

    /// Delay before the viewer is initialized
    #[arg(long, default_value_t = 100)]
    pub init_delay_ms: u64,

    /// Delay before the slider is first positioned
    #[arg(long, default_value_t = 50)]
    pub slider_delay_ms: u64,

    /// How long notifications stay on screen
    #[arg(long, default_value_t = 3)]
    pub notification_secs: u64,

    /// Write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Render a still to this PNG file and exit
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Snapshot width in pixels
    #[arg(long, default_value_t = 640, value_parser = clap::value_parser!(u16).range(1..=MAX_SNAPSHOT_SIDE).map(usize::from))]
    pub width: usize,

    /// Snapshot height in pixels
    #[arg(long, default_value_t = 480, value_parser = clap::value_parser!(u16).range(1..=MAX_SNAPSHOT_SIDE).map(usize::from))]
    pub height: usize,

    /// Frames to advance before taking the snapshot
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub frames: u32,
}

/// Largest snapshot side in surface pixels
const MAX_SNAPSHOT_SIDE: i64 = 8192;
/// Largest drawing buffer pixels per surface pixel
const MAX_PIXEL_RATIO: f64 = 4.0;

fn parse_pixel_ratio(arg: &str) -> Result<f64, String> {
    let ratio: f64 = arg
        .parse()
        .map_err(|_| format!("`{arg}` is not a number"))?;
    if ratio.is_finite() && ratio > 0.0 && ratio <= MAX_PIXEL_RATIO {
        Ok(ratio)
    } else {
        Err(format!("pixel ratio must be above 0 and at most {MAX_PIXEL_RATIO}"))
    }
}

/// Settings of an interactive session
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub color: Color,
    pub swatches: Vec<Swatch>,
    pub bag_name: String,
    pub frame_interval: Duration,
    pub auto_rotate: bool,
    pub pixel_ratio: f64,
    pub shadow_map_size: usize,
    pub items_per_view: usize,
    pub card_width: usize,
    pub init_delay: Duration,
    pub slider_delay: Duration,
    pub notification_ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            color: Color(0x1a1a1a),
            swatches: default_swatches(),
            bag_name: DEFAULT_BAG_NAME.to_string(),
            frame_interval: Duration::from_secs(1) / 60,
            auto_rotate: true,
            pixel_ratio: 1.0,
            shadow_map_size: 512,
            items_per_view: ITEMS_PER_VIEW,
            card_width: 18,
            init_delay: Duration::from_millis(100),
            slider_delay: Duration::from_millis(50),
            notification_ttl: Duration::from_secs(3),
        }
    }
}

impl From<&Cli> for Config {
    fn from(cli: &Cli) -> Self {
        Config {
            color: cli.color,
            swatches: if cli.swatches.is_empty() {
                default_swatches()
            } else {
                cli.swatches.clone()
            },
            bag_name: cli.bag_name.clone(),
            frame_interval: Duration::from_secs(1) / cli.fps.max(1),
            auto_rotate: !cli.no_auto_rotate,
            pixel_ratio: cli.pixel_ratio,
            shadow_map_size: cli.shadow_map_size,
            items_per_view: cli.items_per_view,
            card_width: cli.card_width,
            init_delay: Duration::from_millis(cli.init_delay_ms),
            slider_delay: Duration::from_millis(cli.slider_delay_ms),
            notification_ttl: Duration::from_secs(cli.notification_secs),
        }
    }
}
