//! Command-line interface for generating images from samples or tile sets

use crate::algorithm::executor::{CycleReport, GenerationConfig, Generator, RunOutcome};
use crate::algorithm::selection::Heuristic;
use crate::algorithm::wave::Wave;
use crate::catalog::CatalogSource;
use crate::io::configuration::{
    DEFAULT_BAND_WIDTH, DEFAULT_INFERENCE_TOLERANCE, DEFAULT_MAX_ATTEMPTS, DEFAULT_OUTPUT_HEIGHT,
    DEFAULT_OUTPUT_WIDTH, DEFAULT_PATTERN_SIZE, DEFAULT_SEED, GIF_FRAME_DELAY_MS,
    MAX_PATTERN_SIZE, OUTPUT_SUFFIX, VISUALIZATION_CELL_SCALE,
};
use crate::io::error::{Result, invalid_parameter, missing_file};
use crate::io::image::{RenderLayout, SourceImage, export_png};
use crate::io::logging;
use crate::io::progress::GenerationProgress;
use crate::io::rules::load_rule_set;
use crate::io::visualization::VisualizationCapture;
use crate::spatial::grid::GridSpec;
use crate::spatial::tiles::SymmetryMode;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "tilecollapse")]
#[command(
    author,
    version,
    about = "Generate images that locally resemble a sample or obey a tile set"
)]
/// Command-line arguments for the generator
pub struct Cli {
    /// Catalog source to generate from
    #[command(subcommand)]
    pub command: Command,
}

/// Catalog source selection
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Learn patterns from a sample image
    Overlapping(OverlappingArgs),
    /// Use a declared tile set
    Tiled(TiledArgs),
}

/// Options for the overlapping model
#[derive(Args, Debug)]
pub struct OverlappingArgs {
    /// Sample image to learn patterns from
    #[arg(value_name = "IMAGE")]
    pub image: PathBuf,

    /// Side length of the learned patterns
    #[arg(short = 'n', long, default_value_t = DEFAULT_PATTERN_SIZE)]
    pub pattern_size: usize,

    /// Which rotations and reflections of each pattern to learn
    #[arg(long, value_enum, default_value_t = SymmetryArg::All)]
    pub symmetry: SymmetryArg,

    /// Let patterns wrap around the edges of the sample
    #[arg(long)]
    pub periodic_input: bool,

    /// Options shared by every model
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Options for the simple-tiled model
#[derive(Args, Debug)]
pub struct TiledArgs {
    /// Tile-set definition
    #[arg(value_name = "RULES")]
    pub rules: PathBuf,

    /// Directory holding `<name>.png` for each tile (defaults to the rules' directory)
    #[arg(short = 't', long)]
    pub tiles: Option<PathBuf>,

    /// Also apply every neighbor rule mirrored
    #[arg(short = 'r', long)]
    pub reflections: bool,

    /// Ignore neighbor rules and infer adjacency from tile borders
    #[arg(long)]
    pub infer: bool,

    /// Border band width compared when inferring adjacency
    #[arg(long, default_value_t = DEFAULT_BAND_WIDTH)]
    pub band_width: usize,

    /// Largest mean color distance accepted when inferring adjacency
    #[arg(long, default_value_t = DEFAULT_INFERENCE_TOLERANCE)]
    pub tolerance: f64,

    /// Options shared by every model
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Options shared by every model
#[derive(Args, Debug)]
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct CommonArgs {
    /// Output width in cells
    #[arg(short = 'w', long, default_value_t = DEFAULT_OUTPUT_WIDTH)]
    pub width: usize,

    /// Output height in cells
    #[arg(short = 'H', long, default_value_t = DEFAULT_OUTPUT_HEIGHT)]
    pub height: usize,

    /// Wrap the output around its edges
    #[arg(short, long)]
    pub periodic: bool,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Rule for choosing the next cell
    #[arg(long, value_enum, default_value_t = HeuristicArg::Entropy)]
    pub heuristic: HeuristicArg,

    /// Attempts before giving up on contradictions (0 retries forever)
    #[arg(short, long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: usize,

    /// Enable visualization output as animated GIF
    #[arg(long)]
    pub visualize: bool,

    /// Output PNG path (defaults to `<input>_result.png`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Suppress progress output and all logging below errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase logging detail; repeat for more
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Next-cell heuristic as named on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum HeuristicArg {
    /// First uncollapsed cell in row-major order
    Scanline,
    /// Lowest-entropy cell
    Entropy,
}

impl From<HeuristicArg> for Heuristic {
    fn from(arg: HeuristicArg) -> Self {
        match arg {
            HeuristicArg::Scanline => Self::Scanline,
            HeuristicArg::Entropy => Self::MinEntropy,
        }
    }
}

/// Pattern symmetry as named on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SymmetryArg {
    /// Patterns as they appear
    None,
    /// Add horizontal mirrors
    MirrorX,
    /// Add vertical mirrors
    MirrorY,
    /// Add both mirrors and their combination
    MirrorXy,
    /// Add all rotations and reflections
    All,
}

impl From<SymmetryArg> for SymmetryMode {
    fn from(arg: SymmetryArg) -> Self {
        match arg {
            SymmetryArg::None => Self::None,
            SymmetryArg::MirrorX => Self::MirrorX,
            SymmetryArg::MirrorY => Self::MirrorY,
            SymmetryArg::MirrorXy => Self::MirrorXY,
            SymmetryArg::All => Self::All,
        }
    }
}

impl Cli {
    /// Options shared by every model
    pub const fn common(&self) -> &CommonArgs {
        match &self.command {
            Command::Overlapping(args) => &args.common,
            Command::Tiled(args) => &args.common,
        }
    }

    /// Input file the run is based on
    pub fn input_path(&self) -> &Path {
        match &self.command {
            Command::Overlapping(args) => &args.image,
            Command::Tiled(args) => &args.rules,
        }
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.common().quiet
    }
}

impl CommonArgs {
    /// Seed and retry ceiling for the run
    pub const fn generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            seed: self.seed,
            max_attempts: if self.max_attempts == 0 {
                None
            } else {
                Some(self.max_attempts)
            },
        }
    }
}

/// Runs one generation as described by the command line
pub struct GenerationJob {
    cli: Cli,
}

impl GenerationJob {
    /// Create a job from parsed arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Build the catalog, solve, and write the outputs
    ///
    /// # Errors
    ///
    /// Returns an error if inputs cannot be loaded, the catalog is invalid,
    /// the retry ceiling is reached, or outputs cannot be written
    pub fn run(&self) -> Result<RunOutcome> {
        let common = self.cli.common();
        logging::init(logging::level_for(common.verbose, common.quiet));

        let (source, layout) = self.catalog_source()?;
        let catalog = source.build()?;
        let grid = GridSpec::with_footprint(
            common.width,
            common.height,
            common.periodic,
            source.footprint(),
        )?;
        let wave = Wave::new(catalog, grid, common.heuristic.into())?;
        let mut generator = Generator::new(wave, common.generation_config())?;

        let total = generator.wave().legal_cell_count();
        let label = file_label(self.cli.input_path());
        let mut progress = if self.cli.should_show_progress() {
            GenerationProgress::new(total, &label)
        } else {
            GenerationProgress::hidden(total)
        };
        let mut capture = common
            .visualize
            .then(|| VisualizationCapture::new(layout, VISUALIZATION_CELL_SCALE));

        let result = generator.run(&mut |wave: &Wave, report: &CycleReport| {
            progress.update(report);
            if let Some(capture) = capture.as_mut() {
                if report.contradiction.is_some() {
                    capture.clear();
                }
                capture.record(wave);
            }
            ControlFlow::Continue(())
        });
        let outcome = match result {
            Ok(outcome) => outcome,
            Err(error) => {
                progress.clear();
                return Err(error);
            }
        };
        progress.finish(&outcome);

        let output_path = common
            .output
            .clone()
            .unwrap_or_else(|| Self::get_output_path(self.cli.input_path()));
        export_png(&layout.render(generator.wave()), &output_path)?;
        log::info!("Wrote {}", output_path.display());

        if let Some(capture) = &capture {
            let viz_path = Self::get_visualization_path(&output_path);
            capture.export_gif(&viz_path, GIF_FRAME_DELAY_MS)?;
        }

        Ok(outcome)
    }

    fn catalog_source(&self) -> Result<(CatalogSource, RenderLayout)> {
        match &self.cli.command {
            Command::Overlapping(args) => {
                if args.pattern_size == 0 || args.pattern_size > MAX_PATTERN_SIZE {
                    return Err(invalid_parameter(
                        "pattern_size",
                        &args.pattern_size,
                        &format!("must be between 1 and {MAX_PATTERN_SIZE}"),
                    ));
                }
                let sample = SourceImage::open(&args.image)?;
                let blocks = sample.extract_windows(
                    args.pattern_size,
                    args.periodic_input,
                    args.symmetry.into(),
                )?;
                Ok((CatalogSource::Overlapping { blocks }, RenderLayout::Overlapping))
            }
            Command::Tiled(args) => {
                if !args.rules.is_file() {
                    return Err(missing_file(&args.rules, "read tile set"));
                }
                let rules = load_rule_set(&args.rules, args.tiles.as_deref())?;
                let source = if args.infer {
                    CatalogSource::Inferred {
                        rules,
                        band_width: args.band_width,
                        tolerance: args.tolerance,
                    }
                } else {
                    CatalogSource::Declarative {
                        rules,
                        reflections: args.reflections,
                    }
                };
                Ok((source, RenderLayout::Tiled))
            }
        }
    }

    /// Default output path, `<stem>_result.png` next to the input
    pub fn get_output_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let output_name = format!("{}{}.png", stem.to_string_lossy(), OUTPUT_SUFFIX);

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }

    /// GIF path next to an output image
    pub fn get_visualization_path(output_path: &Path) -> PathBuf {
        output_path.with_extension("gif")
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}
