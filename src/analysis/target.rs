//! Target pixel buffer addressed in canvas coordinates
//!
//! The buffer is stored top-left origin, row-major, four channels per pixel,
//! as decoders produce it. Canvas coordinates are bottom-left origin, so every
//! lookup maps `y` to `height - y - 1`.

use ndarray::{Array2, Array3, ArrayView3, s};

use crate::io::error::{Result, invalid_image};
use crate::spatial::geometry::{Shape, Size};
use crate::spatial::partition::Color;

/// Decoded RGBA image the optimizer approximates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetImage {
    /// Pixel channels indexed by (`row`, `col`, `channel`), row 0 at the top
    pixels: Array3<u8>,
}

impl TargetImage {
    /// Wrap a raw RGBA buffer in top-left-origin row-major order
    ///
    /// # Errors
    ///
    /// Returns [`crate::io::error::RasterError::InvalidImage`] if:
    /// - Either dimension is zero
    /// - The buffer does not hold exactly four bytes per pixel
    pub fn from_rgba(width: u32, height: u32, bytes: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(invalid_image(&format!(
                "image has zero area ({width}x{height})"
            )));
        }

        let expected = width as usize * height as usize * 4;
        if bytes.len() != expected {
            return Err(invalid_image(&format!(
                "expected {expected} bytes for {width}x{height} RGBA, got {} (missing alpha channel?)",
                bytes.len()
            )));
        }

        let pixels = Array3::from_shape_vec((height as usize, width as usize, 4), bytes)
            .map_err(|e| invalid_image(&e))?;
        Ok(Self { pixels })
    }

    /// Image filled with a single color
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero
    pub fn uniform(size: Size, color: [u8; 4]) -> Result<Self> {
        let bytes = color
            .iter()
            .copied()
            .cycle()
            .take(size.area() as usize * 4)
            .collect();
        Self::from_rgba(size.width, size.height, bytes)
    }

    /// Image dimensions
    pub fn size(&self) -> Size {
        let (rows, cols, _) = self.pixels.dim();
        Size::new(cols as u32, rows as u32)
    }

    /// Raw buffer view in (`row`, `col`, `channel`) order
    pub const fn pixels(&self) -> &Array3<u8> {
        &self.pixels
    }

    /// Color of the pixel at canvas coordinates `(x, y)`
    ///
    /// Out-of-range coordinates read as transparent black.
    pub fn pixel(&self, x: i32, y: i32) -> Color {
        let (rows, _, _) = self.pixels.dim();
        let Ok(row) = usize::try_from(rows as i64 - i64::from(y) - 1) else {
            return Color::default();
        };
        let Ok(col) = usize::try_from(x) else {
            return Color::default();
        };
        color_at(&self.pixels.view(), row, col)
    }

    /// Buffer slice under `shape`, clipped to the image
    ///
    /// Rows keep buffer order, so row 0 of the view is the top of the region.
    pub fn region_view(&self, shape: &Shape) -> ArrayView3<'_, u8> {
        let (rows, cols, _) = self.pixels.dim();
        let (low, high) = (shape.low(), shape.high());
        let clip_col = |x: i32| usize::try_from(x).unwrap_or(0).min(cols);
        let clip_row = |y: i32| {
            usize::try_from(rows as i64 - i64::from(y))
                .unwrap_or(0)
                .min(rows)
        };

        let (left, right) = (clip_col(low.x), clip_col(high.x));
        let (top, bottom) = (clip_row(high.y), clip_row(low.y));
        self.pixels
            .slice(s![top..bottom.max(top), left..right.max(left), ..])
    }

    /// Colors covered by `shape`, column by column from the low corner
    ///
    /// Iteration order is `x` outer, `y` inner, both increasing; first-seen
    /// tie-breaking in [`crate::analysis::similarity::most_frequent_color`]
    /// depends on it. Pixels outside the image are skipped.
    pub fn region(&self, shape: &Shape) -> impl Iterator<Item = Color> + '_ {
        let view = self.region_view(shape);
        let (rows, cols, _) = view.dim();
        (0..cols).flat_map(move |col| (0..rows).rev().map(move |row| color_at(&view, row, col)))
    }

    /// Box-filter `shape` down to a `cols` x `rows` grid of mean colors
    ///
    /// The result is indexed (`row`, `col`) with row 0 at the bottom of the
    /// region. Grid cells follow [`Shape::grid`], so a grid finer than the
    /// region is clamped to the region's extent.
    pub fn downsample(&self, shape: &Shape, cols: u32, rows: u32) -> Array2<Color> {
        let cols = cols.clamp(1, shape.width());
        let rows = rows.clamp(1, shape.height());
        let cells = shape.grid(cols, rows);

        let mut grid = Array2::from_elem((rows as usize, cols as usize), Color::default());
        for (index, cell) in cells.iter().enumerate() {
            let (row, col) = (index / cols as usize, index % cols as usize);
            if let Some(slot) = grid.get_mut((row, col)) {
                *slot = crate::analysis::similarity::average_color(self.region(cell));
            }
        }
        grid
    }
}

fn color_at(view: &ArrayView3<'_, u8>, row: usize, col: usize) -> Color {
    Color(std::array::from_fn(|c| {
        view.get((row, col, c)).copied().map_or(0, i32::from)
    }))
}
