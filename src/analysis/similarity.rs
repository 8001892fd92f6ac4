//! Color distance, region error and region color selection
//!
//! Region error is the sum of Euclidean RGBA distances between a flat color
//! and every covered target pixel, scaled by [`DIFF_SCALE`] and rounded. It
//! is the residual term of the optimizer's objective.

use num_traits::ToPrimitive;
use std::collections::HashMap;

use crate::analysis::target::TargetImage;
use crate::io::configuration::DIFF_SCALE;
use crate::spatial::geometry::Shape;
use crate::spatial::partition::{Block, Color};

/// How a single representative color is chosen for a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorStrategy {
    /// Per-channel arithmetic mean, rounded
    Average,
    /// Most frequent RGBA tuple, earliest first occurrence on ties
    #[default]
    MostFrequent,
}

impl ColorStrategy {
    /// Representative color of the target under `shape`
    pub fn select(self, target: &TargetImage, shape: &Shape) -> Color {
        match self {
            Self::Average => average_color(target.region(shape)),
            Self::MostFrequent => most_frequent_color(target.region(shape)),
        }
    }

    /// Representative color of the region and the error of painting it `current`
    ///
    /// Reads the region once; the error equals
    /// `region_color_diff(target, shape, current)`.
    pub fn select_with_diff(self, target: &TargetImage, shape: &Shape, current: Color) -> (Color, u64) {
        let mut total = 0.0;
        let colors = target
            .region(shape)
            .inspect(|&pixel| total += pixel_diff(current, pixel));
        let color = match self {
            Self::Average => average_color(colors),
            Self::MostFrequent => most_frequent_color(colors),
        };
        (color, scale_diff(total))
    }
}

/// Euclidean distance between two colors over all four channels
pub fn pixel_diff(a: Color, b: Color) -> f64 {
    a.channels()
        .iter()
        .zip(b.channels().iter())
        .map(|(&x, &y)| {
            let d = f64::from(x) - f64::from(y);
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

/// Scaled, rounded error of painting `shape` with `color`
pub fn region_color_diff(target: &TargetImage, shape: &Shape, color: Color) -> u64 {
    let total: f64 = target.region(shape).map(|pixel| pixel_diff(color, pixel)).sum();
    scale_diff(total)
}

/// Scaled, rounded error of a block's flat color against the target
pub fn region_diff(block: &Block, target: &TargetImage) -> u64 {
    region_color_diff(target, &block.shape, block.color)
}

fn scale_diff(total: f64) -> u64 {
    (total * DIFF_SCALE).round().to_u64().unwrap_or(u64::MAX)
}

/// Per-channel mean, rounded to the nearest integer
///
/// An empty region yields transparent black.
pub fn average_color(colors: impl IntoIterator<Item = Color>) -> Color {
    let mut sums = [0i64; 4];
    let mut count = 0i64;
    for color in colors {
        for (sum, channel) in sums.iter_mut().zip(color.channels()) {
            *sum += i64::from(channel);
        }
        count += 1;
    }

    if count == 0 {
        return Color::default();
    }

    Color(sums.map(|sum| {
        (sum as f64 / count as f64)
            .round()
            .to_i32()
            .unwrap_or_default()
    }))
}

/// Modal color; among equally frequent colors the one seen first wins
///
/// An empty region yields transparent black.
pub fn most_frequent_color(colors: impl IntoIterator<Item = Color>) -> Color {
    // color -> (count, first index)
    let mut counts: HashMap<Color, (usize, usize)> = HashMap::new();
    for (index, color) in colors.into_iter().enumerate() {
        counts.entry(color).or_insert((0, index)).0 += 1;
    }

    counts
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(color, _)| color)
        .unwrap_or_default()
}

/// Largest distance between any two of the given colors
pub fn max_pairwise_diff(colors: &[Color]) -> f64 {
    let mut max = 0.0_f64;
    for (i, &a) in colors.iter().enumerate() {
        for &b in colors.iter().skip(i + 1) {
            max = max.max(pixel_diff(a, b));
        }
    }
    max
}

/// Whether the target under `shape` looks flat on a coarse `grid` x `grid` sample
///
/// The region is box-filtered to the grid and every pair of samples must be
/// closer than `threshold`.
pub fn is_uniform(target: &TargetImage, shape: &Shape, grid: u32, threshold: f64) -> bool {
    let samples: Vec<Color> = target.downsample(shape, grid, grid).into_iter().collect();
    max_pairwise_diff(&samples) < threshold
}
