//! Integer geometry for diagram interchange coordinates.
//!
//! Shapes and waypoints in a BPMN diagram sit on an integer grid, so every
//! type here uses `i32`. `y` grows downward: "up" means a smaller `y`.
//!
//! All arithmetic saturates at the ends of the `i32` range.
//!
//! - [`Point`] - a grid coordinate, also used as an offset
//! - [`Size`] - width and height of a shape
//! - [`Bounds`] - a shape box in `omgdc:Bounds` form (top-left corner plus size)

/// A grid coordinate or an offset between two coordinates.
///
/// # Examples
///
/// ```
/// # use swimlane_core::geometry::Point;
/// let origin = Point::new(100, 50);
/// let offset = Point::new(20, 40);
///
/// let anchor = origin.add_point(offset);
/// assert_eq!(anchor.x(), 120);
/// assert_eq!(anchor.y(), 90);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    x: i32,
    y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> i32 {
        self.x
    }

    pub fn y(self) -> i32 {
        self.y
    }

    /// Same point moved to column `x`.
    pub fn with_x(self, x: i32) -> Self {
        Self { x, ..self }
    }

    /// Same point moved to row `y`.
    pub fn with_y(self, y: i32) -> Self {
        Self { y, ..self }
    }

    pub fn add_point(self, offset: Point) -> Self {
        Self::new(
            self.x.saturating_add(offset.x),
            self.y.saturating_add(offset.y),
        )
    }

    /// Offset that leads from `other` to `self`.
    pub fn sub_point(self, other: Point) -> Self {
        Self::new(
            self.x.saturating_sub(other.x),
            self.y.saturating_sub(other.y),
        )
    }

    /// Box of the given size with `self` as its top-left corner.
    pub fn to_bounds(self, size: Size) -> Bounds {
        Bounds::new(self, size)
    }
}

/// Width and height of a shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Size {
    width: i32,
    height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> i32 {
        self.width
    }

    pub fn height(self) -> i32 {
        self.height
    }
}

/// A shape box, stored the way `omgdc:Bounds` writes it.
///
/// # Examples
///
/// ```
/// # use swimlane_core::geometry::{Bounds, Point, Size};
/// let pool = Bounds::new(Point::new(0, 250), Size::new(700, 400));
///
/// assert_eq!((pool.x(), pool.y()), (0, 250));
/// assert_eq!(pool.bottom(), 650);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Bounds {
    origin: Point,
    size: Size,
}

impl Bounds {
    pub const fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// Left edge.
    pub fn x(self) -> i32 {
        self.origin.x
    }

    /// Top edge.
    pub fn y(self) -> i32 {
        self.origin.y
    }

    pub fn width(self) -> i32 {
        self.size.width
    }

    pub fn height(self) -> i32 {
        self.size.height
    }

    pub fn origin(self) -> Point {
        self.origin
    }

    pub fn size(self) -> Size {
        self.size
    }

    /// Row just below the box; the next stacked box starts here.
    pub fn bottom(self) -> i32 {
        self.origin.y.saturating_add(self.size.height)
    }
}
