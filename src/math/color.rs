//! Color arithmetic for display output and tolerant tile comparison

use crate::spatial::tiles::Rgba;

/// Euclidean distance between two samples over all four channels
pub fn rgba_distance(a: Rgba, b: Rgba) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let delta = f64::from(x) - f64::from(y);
            delta * delta
        })
        .sum::<f64>()
        .sqrt()
}

/// Convert a 0-255 color to floats in `[0, 1]`
pub fn to_unit(color: [f64; 4]) -> [f32; 4] {
    color.map(|channel| (channel / 255.0).clamp(0.0, 1.0) as f32)
}

/// Round a 0-255 float color to bytes
pub fn to_bytes(color: [f64; 4]) -> Rgba {
    color.map(|channel| channel.round().clamp(0.0, 255.0) as u8)
}

/// Widen a sample to `f64` channels
pub fn widen(color: Rgba) -> [f64; 4] {
    color.map(f64::from)
}
