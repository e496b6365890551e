//! Source image decoding, window extraction and PNG output

use crate::algorithm::wave::Wave;
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::math::color::to_bytes;
use crate::spatial::tiles::{PixelBlock, Rgba, SymmetryMode};
use image::{ImageBuffer, RgbaImage};
use ndarray::Array2;
use std::path::Path;

/// Decoded RGBA image indexed `[row, col]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceImage {
    pixels: Array2<Rgba>,
}

impl SourceImage {
    /// Decode any image format supported by the `image` crate
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or decoded
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let img = image::open(&path_buf).map_err(|e| AlgorithmError::ImageLoad {
            path: path_buf,
            source: e,
        })?;
        Ok(Self::from_rgba_image(&img.to_rgba8()))
    }

    /// Wrap an already decoded RGBA buffer
    pub fn from_rgba_image(img: &RgbaImage) -> Self {
        let (width, height) = (img.width() as usize, img.height() as usize);
        Self {
            pixels: Array2::from_shape_fn((height, width), |(row, col)| {
                img.get_pixel(col as u32, row as u32).0
            }),
        }
    }

    /// Build from row-major samples
    ///
    /// # Errors
    ///
    /// Returns an error if the sample count is not `width * height`
    pub fn from_samples(width: usize, height: usize, samples: Vec<Rgba>) -> Result<Self> {
        let found = samples.len();
        Array2::from_shape_vec((height, width), samples)
            .map(|pixels| Self { pixels })
            .map_err(|error| AlgorithmError::InvalidSourceData {
                reason: format!("{found} samples do not fill a {width}x{height} image: {error}"),
            })
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.pixels.ncols()
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.pixels.nrows()
    }

    /// Pixel at `(x, y)`
    pub fn get(&self, x: usize, y: usize) -> Option<Rgba> {
        self.pixels.get([y, x]).copied()
    }

    /// Every `size`-square window plus its symmetry variants
    ///
    /// With `periodic_input` windows start at every pixel and wrap around
    /// the edges; otherwise only windows lying fully inside the image are cut.
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is zero or a bounded image is smaller
    /// than one window
    pub fn extract_windows(
        &self,
        size: usize,
        periodic_input: bool,
        symmetry: SymmetryMode,
    ) -> Result<Vec<PixelBlock>> {
        let (width, height) = (self.width(), self.height());
        if size == 0 {
            return Err(invalid_parameter(
                "pattern_size",
                &size,
                &"must be at least 1",
            ));
        }
        if width == 0 || height == 0 || (!periodic_input && (size > width || size > height)) {
            return Err(AlgorithmError::InvalidSourceData {
                reason: format!("{width}x{height} image is too small for {size}x{size} patterns"),
            });
        }

        let (x_origins, y_origins) = if periodic_input {
            (width, height)
        } else {
            (width - size + 1, height - size + 1)
        };

        let mut blocks = Vec::with_capacity(x_origins * y_origins * 8);
        for y in 0..y_origins {
            for x in 0..x_origins {
                let window = PixelBlock::from_fn(size, |row, col| {
                    self.get((x + col) % width, (y + row) % height)
                        .unwrap_or_default()
                });
                blocks.extend(window.variants(symmetry));
            }
        }
        Ok(blocks)
    }
}

/// Load one square tile image
///
/// # Errors
///
/// Returns an error if the image cannot be decoded or is not square
pub fn load_tile_image<P: AsRef<Path>>(path: P, name: &str) -> Result<PixelBlock> {
    let source = SourceImage::open(path)?;
    if source.width() != source.height() {
        return Err(AlgorithmError::InconsistentTileSize {
            tile: name.to_string(),
            expected: source.width(),
            found: source.height(),
        });
    }
    PixelBlock::new(source.width(), source.pixels.into_iter().collect())
}

/// How a solved grid maps onto output pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderLayout {
    /// One pixel per cell
    Overlapping,
    /// One whole tile per cell
    Tiled,
}

impl RenderLayout {
    /// Render the wave in this layout
    pub fn render(self, wave: &Wave) -> RgbaImage {
        match self {
            Self::Overlapping => compose_overlapping(wave),
            Self::Tiled => compose_tiled(wave),
        }
    }
}

/// One pixel per grid cell, as in the overlapping model
pub fn compose_overlapping(wave: &Wave) -> RgbaImage {
    let grid = wave.grid();
    let colors = wave.cell_colors();
    ImageBuffer::from_fn(grid.width() as u32, grid.height() as u32, |x, y| {
        let color = colors
            .get(grid.index(x as usize, y as usize))
            .copied()
            .unwrap_or_default();
        image::Rgba(to_bytes(color.map(|channel| f64::from(channel) * 255.0)))
    })
}

/// One whole tile per grid cell, as in the simple-tiled model
pub fn compose_tiled(wave: &Wave) -> RgbaImage {
    let grid = wave.grid();
    let tile_size = wave.catalog().tile_size();
    let buffer = wave.tile_buffer();
    let area = tile_size * tile_size;

    ImageBuffer::from_fn(
        (grid.width() * tile_size) as u32,
        (grid.height() * tile_size) as u32,
        |x, y| {
            let (x, y) = (x as usize, y as usize);
            let cell = grid.index(x / tile_size, y / tile_size);
            let sample = cell * area + (y % tile_size) * tile_size + x % tile_size;
            let mut rgba = [0; 4];
            if let Some(bytes) = buffer.get(sample * 4..sample * 4 + 4) {
                rgba.copy_from_slice(bytes);
            }
            image::Rgba(rgba)
        },
    )
}

/// Save an image as PNG, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_png<P: AsRef<Path>>(img: &RgbaImage, output_path: P) -> Result<()> {
    let output_path = output_path.as_ref();
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| AlgorithmError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
