//! Energy-level diagram layout.
//!
//! Energies are used directly as y coordinates in a 420×360 viewBox, so a
//! larger value sits lower on screen. The layout is rebuilt from scratch for
//! every [`EnergyLevels`]; nothing is cached between calls.

use crate::model::EnergyLevels;
use smallvec::SmallVec;
use std::fmt::Write as _;

pub const VIEW_WIDTH: f32 = 420.0;
pub const VIEW_HEIGHT: f32 = 360.0;

const OH_X: f32 = 62.0;
const D4H_X: f32 = 242.0;
const LEVEL_X0: f32 = 20.0;
const LEVEL_X1: f32 = 100.0;
const LABEL_X: f32 = 106.0;
const ELECTRON_XS: [f32; 3] = [40.0, 60.0, 80.0];

const TRANSITION_STYLE: &str = "transition: all 500ms cubic-bezier(0.4, 0, 0.2, 1)";

const AXIS_COLOR: &str = "#94a3b8";
const OH_COLOR: &str = "white";
const TITLE_D4H_COLOR: &str = "#fca5a5";
const LOWERED_COLOR: &str = "#fb923c";
const RAISED_COLOR: &str = "#3b82f6";
const CORRELATION_COLOR: &str = "#64748b";
const LABEL_COLOR: &str = "#facc15";
const ELECTRON_COLOR: &str = "#cbd5e1";
const ELECTRON_ACCENT: &str = "#ef4444";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LineShape {
    pub id: Option<&'static str>,
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub stroke: &'static str,
    pub width: f32,
    pub dashed: bool,
    pub animated: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextShape {
    pub id: Option<&'static str>,
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub fill: &'static str,
    pub size_px: u32,
    pub bold: bool,
    pub anchor: Anchor,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Line(LineShape),
    Text(TextShape),
}

impl Shape {
    pub fn id(&self) -> Option<&'static str> {
        match self {
            Shape::Line(l) => l.id,
            Shape::Text(t) => t.id,
        }
    }

    /// Attributes that change with the energy levels.
    pub fn dynamic_attributes(&self) -> SmallVec<[(&'static str, String); 4]> {
        let mut out = SmallVec::new();
        match self {
            Shape::Line(l) => {
                out.push(("x1", fmt_coord(l.x1)));
                out.push(("y1", fmt_coord(l.y1)));
                out.push(("x2", fmt_coord(l.x2)));
                out.push(("y2", fmt_coord(l.y2)));
            }
            Shape::Text(t) => {
                out.push(("x", fmt_coord(t.x)));
                out.push(("y", fmt_coord(t.y)));
            }
        }
        out
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Shape::Line(_) => None,
            Shape::Text(t) => Some(&t.text),
        }
    }
}

/// One ↑ glyph on an occupied orbital.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Electron {
    pub id: &'static str,
    pub x: f32,
    pub y: f32,
    pub accent: bool,
}

/// 3d4 high-spin occupation for both columns: three t2g electrons and one eg.
///
/// In the distorted column the eg electron sits on whichever eg orbital is
/// drawn lowest (largest y), dz² on a tie.
pub fn electrons(levels: &EnergyLevels) -> (SmallVec<[Electron; 4]>, SmallVec<[Electron; 4]>) {
    let oh = SmallVec::from_buf([
        Electron {
            id: "e-oh-eg",
            x: OH_X + ELECTRON_XS[1],
            y: levels.oh.eg,
            accent: true,
        },
        Electron {
            id: "e-oh-t2g-0",
            x: OH_X + ELECTRON_XS[0],
            y: levels.oh.t2g,
            accent: false,
        },
        Electron {
            id: "e-oh-t2g-1",
            x: OH_X + ELECTRON_XS[1],
            y: levels.oh.t2g,
            accent: false,
        },
        Electron {
            id: "e-oh-t2g-2",
            x: OH_X + ELECTRON_XS[2],
            y: levels.oh.t2g,
            accent: false,
        },
    ]);

    let eg = &levels.d4h.eg;
    let eg_y = if eg.dz2 >= eg.dx2y2 { eg.dz2 } else { eg.dx2y2 };
    let d4h = SmallVec::from_buf([
        Electron {
            id: "e-d4h-eg",
            x: D4H_X + ELECTRON_XS[1],
            y: eg_y,
            accent: true,
        },
        Electron {
            id: "e-d4h-dxy",
            x: D4H_X + ELECTRON_XS[1],
            y: levels.d4h.t2g.dxy,
            accent: false,
        },
        Electron {
            id: "e-d4h-dxz",
            x: D4H_X + ELECTRON_XS[0],
            y: levels.d4h.t2g.dxzdyz,
            accent: false,
        },
        Electron {
            id: "e-d4h-dyz",
            x: D4H_X + ELECTRON_XS[2],
            y: levels.d4h.t2g.dxzdyz,
            accent: false,
        },
    ]);
    (oh, d4h)
}

/// Shapes of one diagram frame, in paint order.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagram {
    pub shapes: Vec<Shape>,
}

impl Diagram {
    pub fn layout(levels: &EnergyLevels) -> Self {
        let mut shapes = Vec::with_capacity(40);

        shapes.push(line(None, 42.0, 320.0, 42.0, 38.0, AXIS_COLOR, 2.0));
        shapes.push(text(
            None,
            14.0,
            30.0,
            "Energy",
            AXIS_COLOR,
            14,
            false,
            Anchor::Start,
        ));

        // Undistorted column
        shapes.push(text(
            None,
            OH_X + 60.0,
            30.0,
            "Oh",
            OH_COLOR,
            14,
            false,
            Anchor::Middle,
        ));
        shapes.push(level(Some("oh-eg"), OH_X, levels.oh.eg, OH_COLOR, 2.0, false));
        shapes.push(level(Some("oh-t2g"), OH_X, levels.oh.t2g, OH_COLOR, 2.0, false));
        shapes.push(level_label(
            Some("oh-eg-label"),
            OH_X,
            levels.oh.eg,
            "e_g",
            OH_COLOR,
            false,
        ));
        shapes.push(level_label(
            Some("oh-t2g-label"),
            OH_X,
            levels.oh.t2g,
            "t_2g",
            OH_COLOR,
            false,
        ));

        // Distorted column
        let eg = levels.d4h.eg;
        let t2g = levels.d4h.t2g;
        shapes.push(text(
            None,
            D4H_X + 60.0,
            30.0,
            "D4h (JT)",
            TITLE_D4H_COLOR,
            14,
            true,
            Anchor::Middle,
        ));
        shapes.push(level(Some("d4h-dx2y2"), D4H_X, eg.dx2y2, LOWERED_COLOR, 2.0, true));
        shapes.push(level(Some("d4h-dz2"), D4H_X, eg.dz2, RAISED_COLOR, 3.0, true));
        shapes.push(level_label(
            Some("d4h-dx2y2-label"),
            D4H_X,
            eg.dx2y2,
            "d_x²-y²",
            LOWERED_COLOR,
            false,
        ));
        shapes.push(level_label(
            Some("d4h-dz2-label"),
            D4H_X,
            eg.dz2,
            "d_z²",
            RAISED_COLOR,
            true,
        ));
        shapes.push(level(Some("d4h-dxy"), D4H_X, t2g.dxy, LOWERED_COLOR, 2.0, true));
        shapes.push(level(Some("d4h-dxzdyz"), D4H_X, t2g.dxzdyz, RAISED_COLOR, 2.0, true));
        shapes.push(level_label(
            Some("d4h-dxy-label"),
            D4H_X,
            t2g.dxy,
            "d_xy",
            LOWERED_COLOR,
            false,
        ));
        shapes.push(level_label(
            Some("d4h-dxzdyz-label"),
            D4H_X,
            t2g.dxzdyz,
            "d_xz, d_yz",
            RAISED_COLOR,
            false,
        ));

        let (oh_electrons, d4h_electrons) = electrons(levels);
        for e in oh_electrons.iter().chain(d4h_electrons.iter()) {
            shapes.push(Shape::Text(TextShape {
                id: Some(e.id),
                x: e.x,
                y: e.y,
                text: "↑".to_string(),
                fill: if e.accent { ELECTRON_ACCENT } else { ELECTRON_COLOR },
                size_px: 22,
                bold: true,
                anchor: Anchor::Middle,
            }));
        }

        // Correlation lines: Oh right end -> D4h left end
        let from_x = OH_X + LEVEL_X1;
        let corr = [
            ("corr-eg-dx2y2", levels.oh.eg, eg.dx2y2),
            ("corr-eg-dz2", levels.oh.eg, eg.dz2),
            ("corr-t2g-dxy", levels.oh.t2g, t2g.dxy),
            ("corr-t2g-dxzdyz", levels.oh.t2g, t2g.dxzdyz),
        ];
        for (id, y_from, y_to) in corr {
            shapes.push(Shape::Line(LineShape {
                id: Some(id),
                x1: from_x,
                y1: y_from,
                x2: D4H_X,
                y2: y_to,
                stroke: CORRELATION_COLOR,
                width: 1.0,
                dashed: true,
                animated: true,
            }));
        }

        shapes.push(text(
            Some("stabilization"),
            284.0,
            336.0,
            &stabilization_caption(levels),
            LABEL_COLOR,
            12,
            false,
            Anchor::Middle,
        ));

        Self { shapes }
    }

    pub fn find(&self, id: &str) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == Some(id))
    }

    pub fn lines(&self) -> impl Iterator<Item = &LineShape> {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Line(l) => Some(l),
            Shape::Text(_) => None,
        })
    }

    /// Serialize as a standalone `<svg>` element.
    pub fn to_svg(&self) -> String {
        let mut out = String::with_capacity(4096);
        _ = write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="100%" height="100%" viewBox="0 0 {} {}" style="background:#1e293b;border-radius:12px">"#,
            VIEW_WIDTH, VIEW_HEIGHT
        );
        for shape in &self.shapes {
            write_shape(&mut out, shape);
        }
        out.push_str("</svg>");
        out
    }
}

pub fn stabilization_caption(levels: &EnergyLevels) -> String {
    format!("ΔE(JT) ≈ -{:.1}", levels.stabilization_energy)
}

/// Coordinates are written with two decimals.
#[inline]
pub fn fmt_coord(v: f32) -> String {
    format!("{:.2}", v)
}

fn line(
    id: Option<&'static str>,
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    stroke: &'static str,
    width: f32,
) -> Shape {
    Shape::Line(LineShape {
        id,
        x1,
        y1,
        x2,
        y2,
        stroke,
        width,
        dashed: false,
        animated: false,
    })
}

fn level(
    id: Option<&'static str>,
    group_x: f32,
    y: f32,
    stroke: &'static str,
    width: f32,
    animated: bool,
) -> Shape {
    Shape::Line(LineShape {
        id,
        x1: group_x + LEVEL_X0,
        y1: y,
        x2: group_x + LEVEL_X1,
        y2: y,
        stroke,
        width,
        dashed: false,
        animated,
    })
}

fn level_label(
    id: Option<&'static str>,
    group_x: f32,
    y: f32,
    label: &str,
    fill: &'static str,
    bold: bool,
) -> Shape {
    text(id, group_x + LABEL_X, y + 4.0, label, fill, 12, bold, Anchor::Start)
}

#[allow(clippy::too_many_arguments)]
fn text(
    id: Option<&'static str>,
    x: f32,
    y: f32,
    content: &str,
    fill: &'static str,
    size_px: u32,
    bold: bool,
    anchor: Anchor,
) -> Shape {
    Shape::Text(TextShape {
        id,
        x,
        y,
        text: content.to_string(),
        fill,
        size_px,
        bold,
        anchor,
    })
}

fn write_shape(out: &mut String, shape: &Shape) {
    match shape {
        Shape::Line(l) => {
            out.push_str("<line");
            if let Some(id) = l.id {
                _ = write!(out, r#" id="{}""#, id);
            }
            for (name, value) in shape.dynamic_attributes() {
                _ = write!(out, r#" {}="{}""#, name, value);
            }
            _ = write!(out, r#" stroke="{}" stroke-width="{}""#, l.stroke, l.width);
            if l.dashed {
                out.push_str(r#" stroke-dasharray="4""#);
            }
            if l.animated {
                _ = write!(out, r#" style="{}""#, TRANSITION_STYLE);
            }
            out.push_str("/>");
        }
        Shape::Text(t) => {
            out.push_str("<text");
            if let Some(id) = t.id {
                _ = write!(out, r#" id="{}""#, id);
            }
            for (name, value) in shape.dynamic_attributes() {
                _ = write!(out, r#" {}="{}""#, name, value);
            }
            _ = write!(out, r#" fill="{}" font-size="{}px""#, t.fill, t.size_px);
            if t.bold {
                out.push_str(r#" font-weight="bold""#);
            }
            if t.anchor == Anchor::Middle {
                out.push_str(r#" text-anchor="middle""#);
            }
            out.push('>');
            escape_into(out, &t.text);
            out.push_str("</text>");
        }
    }
}

fn escape_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_in_text() {
        let mut out = String::new();
        escape_into(&mut out, "a<b & \"c\"");
        assert_eq!(out, "a&lt;b &amp; &quot;c&quot;");
    }
}
