//! Algorithm constants and runtime configuration defaults

// Pattern extraction
/// Side length of overlapping-model patterns
pub const DEFAULT_PATTERN_SIZE: usize = 3;
/// Largest pattern side length accepted from the command line
pub const MAX_PATTERN_SIZE: usize = 8;

// Output grid
/// Default output width in cells
pub const DEFAULT_OUTPUT_WIDTH: usize = 48;
/// Default output height in cells
pub const DEFAULT_OUTPUT_HEIGHT: usize = 48;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

// Solver
/// Upper bound of the uniform noise added to entropy during cell selection
pub const ENTROPY_JITTER: f64 = 1e-6;

/// Consecutive contradictions tolerated by the command line before giving up
pub const DEFAULT_MAX_ATTEMPTS: usize = 100;

// Pixel inference between declared tiles
/// Width in pixels of the border band compared between neighboring tiles
pub const DEFAULT_BAND_WIDTH: usize = 1;
/// Largest mean RGBA distance across the band still counted as a match
pub const DEFAULT_INFERENCE_TOLERANCE: f64 = 40.0;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 50;

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_result";
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 5;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;
/// Pixel scale applied to each grid cell in visualization frames
pub const VISUALIZATION_CELL_SCALE: u32 = 4;
