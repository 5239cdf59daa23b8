use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wallfit::config::{self, Overrides};
use wallfit::imaging::{ImageBackend, ImageSource, ResizeFilter};
use wallfit::{Alignment, AlignmentFlags, ConfigurationError, Monitor, fit, output};

/// Composite written by `fit` when no `-o` is given.
const DEFAULT_OUTPUT: &str = "wallfit.png";

/// Monitor arrangement flags shared by every command.
#[derive(clap::Args, Clone)]
struct LayoutArgs {
    /// Monitor resolution as WIDTHxHEIGHT, left to right (repeat per monitor)
    #[arg(short = 'm', long = "monitor", value_name = "WxH")]
    monitors: Vec<Monitor>,

    /// Gap in pixels between neighbouring monitors (repeat per seam)
    #[arg(short = 'g', long = "gap", value_name = "PX")]
    gaps: Vec<u32>,
}

/// Alignment switches. At most one may be given.
#[derive(clap::Args, Clone)]
struct AlignArgs {
    /// Never crop: fill the uncovered area with black
    #[arg(long)]
    black_bars: bool,
    /// Crop evenly from both sides (default)
    #[arg(long)]
    prefer_center: bool,
    /// Keep the left edge when the image is wider than the monitors
    #[arg(long)]
    prefer_left: bool,
    /// Keep the right edge when the image is wider than the monitors
    #[arg(long)]
    prefer_right: bool,
    /// Keep the top edge when the image is taller than the monitors
    #[arg(long)]
    prefer_top: bool,
    /// Keep the bottom edge when the image is taller than the monitors
    #[arg(long)]
    prefer_bottom: bool,
}

impl AlignArgs {
    fn alignment(&self) -> Result<Option<Alignment>, ConfigurationError> {
        Alignment::from_flags(AlignmentFlags {
            black_bars: self.black_bars,
            prefer_center: self.prefer_center,
            prefer_left: self.prefer_left,
            prefer_right: self.prefer_right,
            prefer_top: self.prefer_top,
            prefer_bottom: self.prefer_bottom,
        })
    }
}

/// Resampling and encoding flags.
#[derive(clap::Args, Clone)]
struct EncodeArgs {
    /// Resize filter: nearest, triangle, catmull-rom, gaussian, lanczos3
    #[arg(long)]
    filter: Option<ResizeFilter>,

    /// JPEG/AVIF quality (1-100)
    #[arg(long)]
    quality: Option<u32>,
}

#[derive(clap::Args, Clone)]
struct FitArgs {
    /// Source image file or http(s) URL
    source: String,
    #[command(flatten)]
    layout: LayoutArgs,
    #[command(flatten)]
    align: AlignArgs,
    #[command(flatten)]
    encode: EncodeArgs,
}

#[derive(Parser)]
#[command(name = "wallfit")]
#[command(version)]
#[command(about = "Fit one wallpaper seamlessly across multiple monitors")]
#[command(long_about = "\
Fit one wallpaper seamlessly across multiple monitors

The image is cropped (or letterboxed) to the combined aspect ratio of the
monitors plus the gaps between them, resized, and the gap strips are cut out
so lines crossing a bezel stay straight.

Examples:

  wallfit fit photo.jpg -m 1920x1080 -m 2560x1440 -g 120
  wallfit slice photo.jpg -m 1920x1080 -m 1920x1080 --prefer-left --out-dir slices
  wallfit plan -m 1920x1080 -m 1920x1080 -m 1920x1080 -g 100 -g 100 --json

Run 'wallfit gen-config' to generate a documented wallfit.toml.")]
struct Cli {
    /// Config file (default: wallfit.toml in the working directory, if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log more detail to stderr (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Produce one composite image spanning all monitors
    Fit {
        #[command(flatten)]
        args: FitArgs,
        /// Output file; format from extension
        #[arg(short = 'o', long = "output", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Produce one image per monitor
    Slice {
        #[command(flatten)]
        args: FitArgs,
        /// Directory for monitor-N files
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        /// Slice file extension
        #[arg(long, default_value = "png")]
        format: String,
    },
    /// Show the resolved layout without touching any image
    Plan {
        #[command(flatten)]
        layout: LayoutArgs,
        /// Print JSON instead of a tree
        #[arg(long)]
        json: bool,
    },
    /// Print a stock wallfit.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Fit { args, out } => {
            let overrides = fit_overrides(&args)?;
            let config = config::load_config(cli.config.as_deref(), &overrides)?;
            let backend = config.backend();
            let layout = config.monitor_layout()?;
            let source = ImageSource::from_arg(&args.source);

            let fitted = fit::fit(&backend, &source, &layout, config.layout.alignment)?;
            let out = out.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
            backend.save(&fitted.image, &out)?;
            output::print_fit_result(&fitted.report, Some(&out));
        }
        Command::Slice {
            args,
            out_dir,
            format,
        } => {
            let overrides = fit_overrides(&args)?;
            let config = config::load_config(cli.config.as_deref(), &overrides)?;
            let backend = config.backend();
            let layout = config.monitor_layout()?;
            let source = ImageSource::from_arg(&args.source);

            let fitted = fit::fit(&backend, &source, &layout, config.layout.alignment)?;
            let paths =
                fit::write_slices(&backend, &fitted.image, &fitted.report.layout, &out_dir, &format)?;
            output::print_fit_result(&fitted.report, None);
            output::print_slices(&fitted.report.layout, &paths);
        }
        Command::Plan { layout, json } => {
            let overrides = layout_overrides(&layout);
            let config = config::load_config(cli.config.as_deref(), &overrides)?;
            let resolved = config.monitor_layout()?.resolve();
            if json {
                println!("{}", output::format_layout_json(&resolved)?);
            } else {
                output::print_layout(&resolved);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Install the stderr subscriber. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn layout_overrides(layout: &LayoutArgs) -> Overrides {
    Overrides {
        monitors: layout.monitors.clone(),
        gaps: (!layout.gaps.is_empty()).then(|| layout.gaps.clone()),
        ..Overrides::default()
    }
}

fn fit_overrides(args: &FitArgs) -> Result<Overrides, ConfigurationError> {
    Ok(Overrides {
        alignment: args.align.alignment()?,
        filter: args.encode.filter,
        quality: args.encode.quality,
        ..layout_overrides(&args.layout)
    })
}
