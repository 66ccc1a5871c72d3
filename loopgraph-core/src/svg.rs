//! SVG serialisation of rendered scenes.

use std::io::{self, Write};

use crate::render::{Primitive, Scene};

const NODE_FILL: &str = "lightblue";
const EDGE_STROKE: &str = "black";
const LOOP_STROKE: &str = "darkblue";
const LOOP_STROKE_WIDTH: f64 = 2.0;

/// Writes `scene` as a standalone SVG document.
///
/// # Errors
/// Returns [`io::Error`] if writing to `writer` fails.
///
/// # Examples
/// ```
/// use loopgraph_core::{AdjacencyMap, GraphRenderer, RenderConfig, svg};
///
/// let graph = AdjacencyMap::from_lists(vec![vec![0]]).expect("valid lists");
/// let scene = GraphRenderer::new(RenderConfig::default()).render(&graph);
/// let mut buffer = Vec::new();
/// svg::write_svg(&scene, &mut buffer).expect("writing to a Vec cannot fail");
/// let text = String::from_utf8(buffer).expect("svg is utf-8");
/// assert!(text.starts_with("<svg"));
/// assert!(text.contains("<path"));
/// ```
pub fn write_svg(scene: &Scene, mut writer: impl Write) -> io::Result<()> {
    writeln!(
        writer,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.1} {h:.1}">"#,
        w = scene.width(),
        h = scene.height(),
    )?;
    for primitive in scene.primitives() {
        write_primitive(primitive, &mut writer)?;
    }
    writeln!(writer, "</svg>")
}

/// Renders `scene` to an SVG string.
#[must_use]
pub fn to_svg_string(scene: &Scene) -> String {
    let mut buffer = Vec::new();
    // Writing into a Vec never fails.
    if write_svg(scene, &mut buffer).is_err() {
        return String::new();
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

fn write_primitive(primitive: &Primitive, writer: &mut impl Write) -> io::Result<()> {
    match primitive {
        Primitive::Node {
            center,
            radius,
            label,
            label_anchor,
            ..
        } => {
            writeln!(
                writer,
                r#"  <circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{NODE_FILL}"/>"#,
                center.x, center.y, radius
            )?;
            writeln!(
                writer,
                r#"  <text x="{:.1}" y="{:.1}">{label}</text>"#,
                label_anchor.x, label_anchor.y
            )
        }
        Primitive::Segment { from, to, .. } => writeln!(
            writer,
            r#"  <line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{EDGE_STROKE}"/>"#,
            from.x, from.y, to.x, to.y
        ),
        Primitive::Arrowhead { tip, left, right } => writeln!(
            writer,
            r#"  <polygon points="{:.1},{:.1} {:.1},{:.1} {:.1},{:.1}" fill="{EDGE_STROKE}"/>"#,
            tip.x, tip.y, left.x, left.y, right.x, right.y
        ),
        Primitive::Loop {
            anchor,
            control_a,
            control_b,
            ..
        } => writeln!(
            writer,
            r#"  <path d="M {:.1} {:.1} C {:.1} {:.1}, {:.1} {:.1}, {:.1} {:.1}" stroke="{LOOP_STROKE}" stroke-width="{LOOP_STROKE_WIDTH:.0}" fill="none"/>"#,
            anchor.x,
            anchor.y,
            control_a.x,
            control_a.y,
            control_b.x,
            control_b.y,
            anchor.x,
            anchor.y
        ),
    }
}
