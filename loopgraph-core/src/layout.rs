//! Circular vertex layout.

use serde::Serialize;

/// A point on the drawing surface, in pixels, y axis pointing down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a point from its coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns this point shifted by `(dx, dy)`.
    #[must_use]
    pub const fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Places `count` vertices equally spaced on a circle.
///
/// Vertex `i` sits at `i * 360 / count` degrees, measured clockwise on screen
/// from the positive x axis.
///
/// # Examples
/// ```
/// use loopgraph_core::{CircularLayout, Point};
///
/// let layout = CircularLayout::new(Point::new(300.0, 300.0), 150.0);
/// let first = layout.position(0, 4);
/// assert_eq!(first, Point::new(450.0, 300.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircularLayout {
    center: Point,
    radius: f64,
}

impl CircularLayout {
    /// Creates a layout around `center` with the given `radius`.
    #[must_use]
    pub const fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Returns the circle centre.
    #[must_use]
    pub const fn center(&self) -> Point {
        self.center
    }

    /// Returns the circle radius.
    #[must_use]
    pub const fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the position of vertex `index` among `count` vertices.
    ///
    /// The result depends on nothing but the arguments and the layout, so
    /// repeated calls agree exactly. A zero `count` yields the centre.
    #[must_use]
    pub fn position(&self, index: usize, count: usize) -> Point {
        if count == 0 {
            return self.center;
        }
        let angle = (index as f64 * 360.0 / count as f64).to_radians();
        self.center
            .offset(self.radius * angle.cos(), self.radius * angle.sin())
    }

    /// Returns the positions of all `count` vertices in index order.
    #[must_use]
    pub fn positions(&self, count: usize) -> Vec<Point> {
        (0..count).map(|index| self.position(index, count)).collect()
    }
}
