use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use halftone::models::{BandPreset, PresetConfig, SquarePreset, TilePreset, VasarelyPreset};
use halftone::services::{Job, RenderPipeline, RunPaths};

#[derive(Parser)]
#[command(name = "halftone")]
#[command(about = "Turn grayscale images into vector halftone illustrations")]
struct Cli {
    /// Log every pipeline stage
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parallel bands whose width follows the darkness of the image
    Bands {
        #[command(flatten)]
        common: CommonArgs,

        /// Number of bands
        #[arg(short, long)]
        n_bands: Option<usize>,

        /// "vertical" or "horizontal"
        #[arg(short, long)]
        axis: Option<String>,

        /// Minimum bright gap between bands, in pixels
        #[arg(long)]
        min_thick: Option<f64>,

        /// Minimum band width, in pixels
        #[arg(long)]
        min_space: Option<f64>,

        /// Border around the drawing, in pixels (0 disables the frame)
        #[arg(long)]
        border: Option<f64>,

        /// Points per band edge (default keeps the aspect ratio)
        #[arg(long)]
        resolution: Option<usize>,
    },
    /// Grid of rectangles sized by cell darkness
    Squares {
        #[command(flatten)]
        common: CommonArgs,

        #[command(flatten)]
        cells: CellArgs,

        /// Minimum bright gap between rectangles, in pixels
        #[arg(long)]
        min_thick: Option<f64>,

        /// Smallest rectangle side, in pixels
        #[arg(long)]
        min_square_size: Option<f64>,

        /// Border around the drawing, in pixels (0 disables the frame)
        #[arg(long)]
        border: Option<f64>,
    },
    /// Grid of circles or squares sized by cell darkness
    Tiles {
        #[command(flatten)]
        common: CommonArgs,

        #[command(flatten)]
        cells: CellArgs,

        /// "circles" or "squares"
        #[arg(short, long)]
        tile_type: Option<String>,

        /// Minimum bright gap, as a ratio of one tile
        #[arg(long)]
        min_thick: Option<f64>,

        /// Smallest tile, as a ratio of one tile
        #[arg(long)]
        min_tile_size: Option<f64>,

        /// Border around the drawing, as a ratio of one tile (0 disables the frame)
        #[arg(long)]
        border: Option<f64>,
    },
    /// Black and white threshold band pattern (PNG output)
    Vasarely {
        #[command(flatten)]
        common: CommonArgs,

        /// Number of bands
        #[arg(short, long)]
        n_bands: Option<usize>,

        /// "vertical" or "horizontal"
        #[arg(short, long)]
        axis: Option<String>,

        /// Space floor, in pixels of the resized image
        #[arg(long)]
        min_space: Option<u32>,

        /// Band floor, in pixels of the resized image
        #[arg(long)]
        min_band: Option<u32>,

        /// Keep the partitioned size instead of resizing back to the input
        #[arg(long)]
        keep_size: bool,
    },
    /// Print the built-in defaults as a preset file
    Defaults,
}

#[derive(Args)]
struct CommonArgs {
    /// Input image
    input: PathBuf,

    /// Output file (default derives from the input name)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// YAML preset with per-mode defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Invert bright and dark values
    #[arg(short, long)]
    invert: bool,

    /// Also write a PNG rendering of the SVG
    #[arg(long)]
    preview: Option<PathBuf>,

    /// Pixels per SVG unit in the preview
    #[arg(long, default_value_t = 1.0)]
    preview_scale: f32,
}

#[derive(Args)]
struct CellArgs {
    /// Number of cells horizontally
    #[arg(long)]
    cells_h: Option<usize>,

    /// Number of cells vertically
    #[arg(long)]
    cells_v: Option<usize>,
}

impl CommonArgs {
    fn invert(&self) -> Option<bool> {
        self.invert.then_some(true)
    }

    fn preset(&self) -> anyhow::Result<PresetConfig> {
        match &self.config {
            Some(path) => PresetConfig::load(path)
                .with_context(|| format!("Failed to load preset {}", path.display())),
            None => Ok(PresetConfig::default()),
        }
    }

    fn paths(&self) -> RunPaths {
        RunPaths {
            input: self.input.clone(),
            output: self.output.clone(),
            preview: self.preview.clone(),
            preview_scale: self.preview_scale,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "halftone=debug,halftone_core=debug"
    } else {
        "halftone=info,halftone_core=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let (job, common) = match cli.command {
        Commands::Defaults => {
            print!("{}", PresetConfig::builtin().to_yaml()?);
            return Ok(());
        }
        Commands::Bands {
            common,
            n_bands,
            axis,
            min_thick,
            min_space,
            border,
            resolution,
        } => {
            let cli_layer = BandPreset {
                n_bands,
                axis,
                min_thick,
                min_space,
                border,
                resolution,
                invert: common.invert(),
            };
            let preset = common.preset()?;
            (Job::Bands(cli_layer.or(&preset.bands).resolve()?), common)
        }
        Commands::Squares {
            common,
            cells,
            min_thick,
            min_square_size,
            border,
        } => {
            let cli_layer = SquarePreset {
                cells_h: cells.cells_h,
                cells_v: cells.cells_v,
                min_thick,
                min_square_size,
                border,
                invert: common.invert(),
            };
            let preset = common.preset()?;
            (Job::Squares(cli_layer.or(&preset.squares).resolve()?), common)
        }
        Commands::Tiles {
            common,
            cells,
            tile_type,
            min_thick,
            min_tile_size,
            border,
        } => {
            let cli_layer = TilePreset {
                cells_h: cells.cells_h,
                cells_v: cells.cells_v,
                tile_type,
                min_thick,
                min_tile_size,
                border,
                invert: common.invert(),
            };
            let preset = common.preset()?;
            (Job::Tiles(cli_layer.or(&preset.tiles).resolve()?), common)
        }
        Commands::Vasarely {
            common,
            n_bands,
            axis,
            min_space,
            min_band,
            keep_size,
        } => {
            let cli_layer = VasarelyPreset {
                n_bands,
                axis,
                min_space,
                min_band,
                restore_size: keep_size.then_some(false),
                invert: common.invert(),
            };
            let preset = common.preset()?;
            (Job::Vasarely(cli_layer.or(&preset.vasarely).resolve()?), common)
        }
    };

    let report = RenderPipeline::new()
        .run(&job, &common.paths())
        .with_context(|| format!("Failed to render {}", common.input.display()))?;

    match report.shapes {
        Some(shapes) => println!(
            "Output : {} ({} shapes, {} bytes)",
            report.output.display(),
            shapes,
            report.bytes
        ),
        None => println!("Output : {} ({} bytes)", report.output.display(), report.bytes),
    }
    if let Some(preview) = report.preview {
        println!("Preview: {}", preview.display());
    }

    Ok(())
}
