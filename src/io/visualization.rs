//! Frame capture and GIF generation for algorithm visualization

use crate::algorithm::wave::Wave;
use crate::io::configuration::VIEWER_MIN_FRAME_DELAY_MS;
use crate::io::error::{AlgorithmError, Result};
use crate::io::image::RenderLayout;
use image::imageops::{self, FilterType};
use image::{Delay, Frame, RgbaImage};
use std::path::Path;

/// Captures rendered snapshots of the wave between cycles
///
/// Snapshots are taken from the per-cycle callback, so each frame shows the
/// grid after one complete select, collapse and propagate cycle.
pub struct VisualizationCapture {
    layout: RenderLayout,
    scale: u32,
    snapshots: Vec<RgbaImage>,
}

impl VisualizationCapture {
    /// Capture in `layout`, enlarging every output pixel `scale` times
    pub fn new(layout: RenderLayout, scale: u32) -> Self {
        Self {
            layout,
            scale: scale.max(1),
            snapshots: Vec::new(),
        }
    }

    /// Render and store the current state of `wave`
    pub fn record(&mut self, wave: &Wave) {
        let img = self.layout.render(wave);
        let snapshot = if self.scale > 1 {
            imageops::resize(
                &img,
                img.width() * self.scale,
                img.height() * self.scale,
                FilterType::Nearest,
            )
        } else {
            img
        };
        self.snapshots.push(snapshot);
    }

    /// Discard every snapshot, e.g. after the wave was reset
    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    /// Number of snapshots captured
    pub fn frame_count(&self) -> usize {
        self.snapshots.len()
    }

    /// Export the captured frames as a GIF with automatic frame skipping
    ///
    /// If the requested delay is shorter than viewers reliably display, only
    /// every n-th snapshot is kept so the animation keeps its apparent speed.
    /// The last snapshot is always included and held longer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No frames were captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif<P: AsRef<Path>>(&self, output_path: P, frame_delay_ms: u32) -> Result<()> {
        let output_path = output_path.as_ref();
        let Some(last) = self.snapshots.last() else {
            return Err(AlgorithmError::InvalidSourceData {
                reason: "No frames captured for visualization".to_string(),
            });
        };

        let frame_delay_ms = frame_delay_ms.max(1);
        let effective_delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let skip_factor = if frame_delay_ms < VIEWER_MIN_FRAME_DELAY_MS {
            VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms) as usize
        } else {
            1
        };

        let delay = Delay::from_numer_denom_ms(effective_delay_ms, 1);
        let mut frames: Vec<Frame> = self
            .snapshots
            .iter()
            .step_by(skip_factor)
            .map(|snapshot| Frame::from_parts(snapshot.clone(), 0, 0, delay))
            .collect();

        // Final frame displays longer for better visibility
        frames.push(Frame::from_parts(
            last.clone(),
            0,
            0,
            Delay::from_numer_denom_ms(effective_delay_ms * 25, 1),
        ));

        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| AlgorithmError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| AlgorithmError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        log::info!(
            "Wrote {} snapshots to {}",
            self.snapshots.len(),
            output_path.display()
        );
        Ok(())
    }
}
