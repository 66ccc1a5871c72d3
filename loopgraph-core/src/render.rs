//! Turns an adjacency map into drawable primitives.
//!
//! The renderer is independent of any drawing backend: it emits a [`Scene`]
//! of node markers, edge segments, arrowheads and loop curves in draw order.
//! [`crate::svg`] serialises a scene; other backends can walk the primitives
//! directly.

use serde::Serialize;
use tracing::{debug, instrument};

use crate::{
    adjacency::{AdjacencyMap, count_loops},
    error::RenderConfigError,
    layout::{CircularLayout, Point},
};

/// How the two adjacency entries of a plain edge are drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MutualEdges {
    /// Draw every traversed entry as its own arrow, so a plain edge shows two
    /// overlapping segments with an arrowhead at each end.
    #[default]
    EachDirection,
    /// Draw each unordered pair once, pointing from the lower index to the
    /// higher one.
    Once,
}

/// Geometry and style parameters for rendering.
///
/// Defaults match a 600x600 canvas with the vertices on a radius-150 circle.
///
/// # Examples
/// ```
/// use loopgraph_core::{MutualEdges, RenderConfig};
///
/// let config = RenderConfig::default()
///     .with_canvas(800.0, 800.0)
///     .with_mutual_edges(MutualEdges::Once);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.center().x, 400.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    width: f64,
    height: f64,
    layout_radius: f64,
    node_radius: f64,
    arrow_length: f64,
    arrow_spread_degrees: f64,
    loop_size: f64,
    label_offset: (f64, f64),
    mutual_edges: MutualEdges,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 600.0,
            layout_radius: 150.0,
            node_radius: 20.0,
            arrow_length: 8.0,
            arrow_spread_degrees: 30.0,
            loop_size: 40.0,
            label_offset: (-7.0, 5.0),
            mutual_edges: MutualEdges::EachDirection,
        }
    }
}

impl RenderConfig {
    /// Sets the canvas size.
    #[must_use]
    pub const fn with_canvas(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the radius of the layout circle.
    #[must_use]
    pub const fn with_layout_radius(mut self, radius: f64) -> Self {
        self.layout_radius = radius;
        self
    }

    /// Sets the radius of each node marker.
    #[must_use]
    pub const fn with_node_radius(mut self, radius: f64) -> Self {
        self.node_radius = radius;
        self
    }

    /// Sets the arrowhead length.
    #[must_use]
    pub const fn with_arrow_length(mut self, length: f64) -> Self {
        self.arrow_length = length;
        self
    }

    /// Sets the loop curve size.
    #[must_use]
    pub const fn with_loop_size(mut self, size: f64) -> Self {
        self.loop_size = size;
        self
    }

    /// Sets the mutual edge policy.
    #[must_use]
    pub const fn with_mutual_edges(mut self, policy: MutualEdges) -> Self {
        self.mutual_edges = policy;
        self
    }

    /// Returns the canvas width.
    #[must_use]
    pub const fn width(&self) -> f64 {
        self.width
    }

    /// Returns the canvas height.
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.height
    }

    /// Returns the layout circle radius.
    #[must_use]
    pub const fn layout_radius(&self) -> f64 {
        self.layout_radius
    }

    /// Returns the mutual edge policy.
    #[must_use]
    pub const fn mutual_edges(&self) -> MutualEdges {
        self.mutual_edges
    }

    /// Returns the canvas centre.
    #[must_use]
    pub const fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Checks that every size is positive and finite and that the layout
    /// circle, node markers included, fits on the canvas.
    ///
    /// # Errors
    /// Returns [`RenderConfigError::NonPositive`] for a bad size and
    /// [`RenderConfigError::LayoutOverflow`] when the layout does not fit.
    pub fn validate(&self) -> Result<(), RenderConfigError> {
        for (parameter, value) in [
            ("width", self.width),
            ("height", self.height),
            ("layout_radius", self.layout_radius),
            ("node_radius", self.node_radius),
            ("arrow_length", self.arrow_length),
            ("loop_size", self.loop_size),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(RenderConfigError::NonPositive { parameter, value });
            }
        }
        let reach = self.layout_radius + self.node_radius;
        if reach * 2.0 > self.width.min(self.height) {
            return Err(RenderConfigError::LayoutOverflow {
                radius: self.layout_radius,
                node_radius: self.node_radius,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// One drawable element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    /// A vertex marker with its index label.
    Node {
        /// Vertex index.
        index: usize,
        /// Marker centre.
        center: Point,
        /// Marker radius.
        radius: f64,
        /// Label text.
        label: String,
        /// Baseline origin of the label.
        label_anchor: Point,
    },
    /// A straight edge between two distinct vertices.
    Segment {
        /// Vertex the segment starts from.
        source: usize,
        /// Vertex the segment points to.
        target: usize,
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
    },
    /// A filled triangle marking the direction of the preceding segment.
    Arrowhead {
        /// Point of the arrow, at the segment's end.
        tip: Point,
        /// First base corner.
        left: Point,
        /// Second base corner.
        right: Point,
    },
    /// A cubic curve leaving a vertex and returning to it.
    Loop {
        /// Vertex carrying the loop.
        vertex: usize,
        /// Start and end point of the curve.
        anchor: Point,
        /// First control point.
        control_a: Point,
        /// Second control point.
        control_b: Point,
    },
}

/// The rendered drawing of one graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    width: f64,
    height: f64,
    primitives: Vec<Primitive>,
    loop_count: usize,
}

impl Scene {
    /// Returns the canvas width.
    #[must_use]
    pub const fn width(&self) -> f64 {
        self.width
    }

    /// Returns the canvas height.
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.height
    }

    /// Returns the primitives in draw order.
    #[must_use]
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Returns the number of self-loops in the source graph.
    #[must_use]
    pub const fn loop_count(&self) -> usize {
        self.loop_count
    }
}

/// Lays out and draws adjacency maps.
///
/// # Examples
/// ```
/// use loopgraph_core::{AdjacencyMap, GraphRenderer, Primitive, RenderConfig};
///
/// let graph = AdjacencyMap::from_lists(vec![vec![0, 1], vec![0]])
///     .expect("neighbours are in range");
/// let scene = GraphRenderer::new(RenderConfig::default()).render(&graph);
/// assert_eq!(scene.loop_count(), 1);
/// let loops = scene
///     .primitives()
///     .iter()
///     .filter(|p| matches!(p, Primitive::Loop { .. }))
///     .count();
/// assert_eq!(loops, 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GraphRenderer {
    config: RenderConfig,
}

impl GraphRenderer {
    /// Creates a renderer. The configuration is used as given; call
    /// [`RenderConfig::validate`] first for user-supplied values.
    #[must_use]
    pub const fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Returns the renderer configuration.
    #[must_use]
    pub const fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Returns the layout used for vertex positions.
    #[must_use]
    pub const fn layout(&self) -> CircularLayout {
        CircularLayout::new(self.config.center(), self.config.layout_radius)
    }

    /// Renders `graph`: node markers first, then edges and loops in
    /// adjacency order.
    #[instrument(
        name = "core.render",
        skip(self, graph),
        fields(nodes = graph.node_count(), mutual_edges = ?self.config.mutual_edges),
    )]
    pub fn render(&self, graph: &AdjacencyMap) -> Scene {
        let positions = self.layout().positions(graph.node_count());
        let mut primitives = Vec::with_capacity(positions.len());

        for (index, &center) in positions.iter().enumerate() {
            primitives.push(self.node(index, center));
        }

        let mut looped = vec![false; positions.len()];
        for (vertex, neighbours) in graph.iter() {
            let Some(&from) = positions.get(vertex) else {
                continue;
            };
            for &neighbour in neighbours {
                if neighbour == vertex {
                    if let Some(drawn) = looped.get_mut(vertex) {
                        if !*drawn {
                            *drawn = true;
                            primitives.push(self.loop_curve(vertex, from));
                        }
                    }
                    continue;
                }
                if self.config.mutual_edges == MutualEdges::Once
                    && vertex > neighbour
                    && graph.contains(neighbour, vertex)
                {
                    continue;
                }
                let Some(&to) = positions.get(neighbour) else {
                    continue;
                };
                primitives.push(Primitive::Segment {
                    source: vertex,
                    target: neighbour,
                    from,
                    to,
                });
                primitives.push(self.arrowhead(from, to));
            }
        }

        let loop_count = count_loops(graph);
        debug!(primitives = primitives.len(), loop_count, "scene rendered");
        Scene {
            width: self.config.width,
            height: self.config.height,
            primitives,
            loop_count,
        }
    }

    fn node(&self, index: usize, center: Point) -> Primitive {
        let (dx, dy) = self.config.label_offset;
        Primitive::Node {
            index,
            center,
            radius: self.config.node_radius,
            label: index.to_string(),
            label_anchor: center.offset(dx, dy),
        }
    }

    fn arrowhead(&self, from: Point, to: Point) -> Primitive {
        let (left, right) = arrow_base(
            from,
            to,
            self.config.arrow_length,
            self.config.arrow_spread_degrees,
        );
        Primitive::Arrowhead {
            tip: to,
            left,
            right,
        }
    }

    const fn loop_curve(&self, vertex: usize, anchor: Point) -> Primitive {
        let size = self.config.loop_size;
        let rise = -size * 1.5;
        Primitive::Loop {
            vertex,
            anchor,
            control_a: anchor.offset(size, rise),
            control_b: anchor.offset(-size, rise),
        }
    }
}

/// Computes the two base corners of an arrowhead at `to` for a segment
/// coming from `from`: each lies `length` back from the tip, rotated by
/// `±spread_degrees` from the segment direction.
///
/// # Examples
/// ```
/// use loopgraph_core::{Point, arrow_base};
///
/// let (left, right) = arrow_base(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 8.0, 30.0);
/// assert!((left.x - right.x).abs() < 1e-9);
/// assert!((left.y + right.y).abs() < 1e-9);
/// assert!(left.x < 10.0);
/// ```
#[must_use]
pub fn arrow_base(from: Point, to: Point, length: f64, spread_degrees: f64) -> (Point, Point) {
    let angle = (to.y - from.y).atan2(to.x - from.x);
    let spread = spread_degrees.to_radians();
    let corner = |theta: f64| to.offset(-length * theta.cos(), -length * theta.sin());
    (corner(angle - spread), corner(angle + spread))
}
