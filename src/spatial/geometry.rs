//! Integer canvas geometry: points, axis-aligned rectangles and sizes
//!
//! Canvas coordinates have their origin at the bottom-left corner with y
//! increasing upward. A [`Shape`] is half-open: it covers every pixel
//! coordinate `(x, y)` with `low.x <= x < high.x` and `low.y <= y < high.y`.

use std::fmt;

use crate::io::error::MoveError;

/// A canvas coordinate pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    /// Horizontal coordinate
    pub x: i32,
    /// Vertical coordinate (upward)
    pub y: i32,
}

impl Point {
    /// Create a point from its coordinates
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.x, self.y)
    }
}

/// Direction of a line cut
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Cut along the line `x = point.x`
    Vertical,
    /// Cut along the line `y = point.y`
    Horizontal,
}

impl Orientation {
    /// Axis label used by the move log (`x` for vertical cuts, `y` for horizontal)
    pub const fn axis(self) -> char {
        match self {
            Self::Vertical => 'x',
            Self::Horizontal => 'y',
        }
    }

    /// Parse an axis label back into an orientation
    pub fn from_axis(label: &str) -> Option<Self> {
        match label.trim() {
            "x" | "X" | "vertical" => Some(Self::Vertical),
            "y" | "Y" | "horizontal" => Some(Self::Horizontal),
            _ => None,
        }
    }
}

/// Width and height of a canvas or rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
    /// Horizontal extent
    pub width: u32,
    /// Vertical extent
    pub height: u32,
}

impl Size {
    /// Create a size from its extents
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of unit pixels covered
    pub const fn area(self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Rectangle anchored at the origin covering the whole size
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::InvalidGeometry`] for a zero extent or one that
    /// does not fit canvas coordinates
    pub fn bounds(self) -> Result<Shape, MoveError> {
        let width = i32::try_from(self.width).map_err(|e| MoveError::InvalidGeometry {
            reason: format!("width {} exceeds coordinate range: {e}", self.width),
        })?;
        let height = i32::try_from(self.height).map_err(|e| MoveError::InvalidGeometry {
            reason: format!("height {} exceeds coordinate range: {e}", self.height),
        })?;
        Shape::new(Point::new(0, 0), Point::new(width, height))
    }
}

/// Axis-aligned rectangle given by its low and high corners
///
/// Always non-degenerate: construction through [`Shape::new`] rejects zero
/// or negative extents, and every derived rectangle is built the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    low: Point,
    high: Point,
}

impl Shape {
    /// Create a rectangle from its corners
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::InvalidGeometry`] unless `low.x < high.x` and `low.y < high.y`
    pub fn new(low: Point, high: Point) -> Result<Self, MoveError> {
        if low.x < high.x && low.y < high.y {
            Ok(Self { low, high })
        } else {
            Err(MoveError::InvalidGeometry {
                reason: format!("rectangle {low}-{high} has no area"),
            })
        }
    }

    /// Bottom-left corner
    pub const fn low(&self) -> Point {
        self.low
    }

    /// Top-right corner (exclusive)
    pub const fn high(&self) -> Point {
        self.high
    }

    /// Horizontal extent
    pub const fn width(&self) -> u32 {
        self.high.x.abs_diff(self.low.x)
    }

    /// Vertical extent
    pub const fn height(&self) -> u32 {
        self.high.y.abs_diff(self.low.y)
    }

    /// Extents as a [`Size`]
    pub const fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Number of unit pixels covered
    pub const fn area(&self) -> u64 {
        self.size().area()
    }

    /// Whether `point` lies strictly inside, off every edge
    pub const fn contains_strictly(&self, point: Point) -> bool {
        self.low.x < point.x && point.x < self.high.x && self.low.y < point.y && point.y < self.high.y
    }

    /// Whether the pixel at `point` is covered
    pub const fn contains_pixel(&self, point: Point) -> bool {
        self.low.x <= point.x && point.x < self.high.x && self.low.y <= point.y && point.y < self.high.y
    }

    /// Whether the two rectangles share any pixel
    pub const fn intersects(&self, other: &Self) -> bool {
        self.low.x < other.high.x
            && other.low.x < self.high.x
            && self.low.y < other.high.y
            && other.low.y < self.high.y
    }

    /// Integer center, rounded toward the low corner
    pub const fn center(&self) -> Point {
        Point::new(
            self.low.x + (self.high.x - self.low.x) / 2,
            self.low.y + (self.high.y - self.low.y) / 2,
        )
    }

    /// Whether both rectangles have the same width and height
    pub const fn is_congruent(&self, other: &Self) -> bool {
        self.width() == other.width() && self.height() == other.height()
    }

    /// Split into a `cols` x `rows` grid of cells, bottom row first
    ///
    /// Cell boundaries sit at `low + i * extent / n`, so the 2x2 grid splits at
    /// [`Shape::center`]. Cells that would be empty (grid finer than the
    /// rectangle) are skipped.
    pub fn grid(&self, cols: u32, rows: u32) -> Vec<Self> {
        let xs = Self::grid_lines(self.low.x, self.width(), cols);
        let ys = Self::grid_lines(self.low.y, self.height(), rows);

        let mut cells = Vec::with_capacity(xs.len() * ys.len());
        for y_pair in ys.windows(2) {
            for x_pair in xs.windows(2) {
                let ([x0, x1], [y0, y1]) = (x_pair, y_pair) else {
                    continue;
                };
                if let Ok(cell) = Self::new(Point::new(*x0, *y0), Point::new(*x1, *y1)) {
                    cells.push(cell);
                }
            }
        }
        cells
    }

    fn grid_lines(start: i32, extent: u32, divisions: u32) -> Vec<i32> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|i| start + (u64::from(extent) * u64::from(i) / u64::from(divisions)) as i32)
            .collect()
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}
