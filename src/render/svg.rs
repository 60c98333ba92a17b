use super::{DrawingSurface, FULL_TURN, Paint, Shadow};
use crate::ast::format_number;
use crate::error::RenderError;
use std::f64::consts::PI;
use std::fmt::Write as _;
use std::path::Path;
use xmltree::{Element, EmitterConfig, Namespace, XMLNode};

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Writes drawing calls as an SVG document.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    defs: Vec<Element>,
    body: Vec<Element>,
    fill: String,
    stroke: String,
    line_width: f64,
    dash: Vec<f64>,
    filter: Option<String>,
    font: String,
    path: String,
    has_point: bool,
}

impl Default for SvgSurface {
    fn default() -> Self {
        Self::new(400.0, 300.0)
    }
}

fn coord(v: f64) -> String {
    format_number((v * 100.0).round() / 100.0)
}

fn element(name: &str, attributes: &[(&str, String)]) -> Element {
    let mut element = Element::new(name);
    for (key, value) in attributes {
        element.attributes.insert(key.to_string(), value.clone());
    }
    element
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            defs: Vec::new(),
            body: Vec::new(),
            fill: "#000000".to_string(),
            stroke: "#000000".to_string(),
            line_width: 1.0,
            dash: Vec::new(),
            filter: None,
            font: "10px sans-serif".to_string(),
            path: String::new(),
            has_point: false,
        }
    }

    fn next_id(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self.defs.len())
    }

    /// Attribute value for `paint`, adding a gradient definition when needed.
    fn paint_value(&mut self, paint: Paint) -> String {
        let (mut gradient, stops) = match paint {
            Paint::Solid(color) => return color,
            Paint::LinearGradient { from, to, stops } => (
                element(
                    "linearGradient",
                    &[
                        ("x1", coord(from.0)),
                        ("y1", coord(from.1)),
                        ("x2", coord(to.0)),
                        ("y2", coord(to.1)),
                    ],
                ),
                stops,
            ),
            Paint::RadialGradient {
                center,
                radius,
                stops,
            } => (
                element(
                    "radialGradient",
                    &[
                        ("cx", coord(center.0)),
                        ("cy", coord(center.1)),
                        ("r", coord(radius)),
                    ],
                ),
                stops,
            ),
        };
        let id = self.next_id("paint");
        gradient.attributes.insert("id".into(), id.clone());
        gradient
            .attributes
            .insert("gradientUnits".into(), "userSpaceOnUse".into());
        for (offset, color) in stops {
            let stop = element("stop", &[("offset", coord(offset)), ("stop-color", color)]);
            gradient.children.push(XMLNode::Element(stop));
        }
        self.defs.push(gradient);
        format!("url(#{})", id)
    }

    fn with_filter(&self, mut element: Element) -> Element {
        if let Some(filter) = &self.filter {
            element.attributes.insert("filter".into(), filter.clone());
        }
        element
    }

    fn stroked(&self, mut element: Element) -> Element {
        element.attributes.insert("fill".into(), "none".into());
        element.attributes.insert("stroke".into(), self.stroke.clone());
        element
            .attributes
            .insert("stroke-width".into(), coord(self.line_width));
        if !self.dash.is_empty() {
            let pattern = self.dash.iter().map(|d| coord(*d)).collect::<Vec<_>>().join(" ");
            element.attributes.insert("stroke-dasharray".into(), pattern);
        }
        self.with_filter(element)
    }

    fn rect(x: f64, y: f64, width: f64, height: f64) -> Element {
        element(
            "rect",
            &[
                ("x", coord(x)),
                ("y", coord(y)),
                ("width", coord(width)),
                ("height", coord(height)),
            ],
        )
    }

    fn point(&mut self, command: char, x: f64, y: f64) {
        let _ = write!(self.path, "{}{} {} ", command, coord(x), coord(y));
        self.has_point = true;
    }

    fn elliptic_arc(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, start: f64, end: f64) {
        let at = |angle: f64| (cx + rx * angle.cos(), cy + ry * angle.sin());
        let (sx, sy) = at(start);
        let command = if self.has_point { 'L' } else { 'M' };
        self.point(command, sx, sy);

        let sweep = end - start;
        if sweep == 0.0 {
            return;
        }
        // SVG cannot draw a full turn in one arc segment.
        let segments: Vec<f64> = if sweep.abs() >= FULL_TURN {
            let half = PI * sweep.signum();
            vec![start + half, start + 2.0 * half]
        } else {
            vec![end]
        };
        let mut from = start;
        for to in segments {
            let (ex, ey) = at(to);
            let large = u8::from((to - from).abs() > PI);
            let clockwise = u8::from(to > from);
            let _ = write!(
                self.path,
                "A{} {} 0 {} {} {} {} ",
                coord(rx),
                coord(ry),
                large,
                clockwise,
                coord(ex),
                coord(ey)
            );
            from = to;
        }
    }

    /// The document as SVG text.
    pub fn to_svg(&self) -> Result<String, RenderError> {
        let mut root = element(
            "svg",
            &[
                ("width", coord(self.width)),
                ("height", coord(self.height)),
                (
                    "viewBox",
                    format!("0 0 {} {}", coord(self.width), coord(self.height)),
                ),
            ],
        );
        let mut namespace = Namespace::empty();
        namespace.force_put("", SVG_NAMESPACE);
        root.namespace = Some(SVG_NAMESPACE.to_string());
        root.namespaces = Some(namespace);
        if !self.defs.is_empty() {
            let mut defs = Element::new("defs");
            defs.children
                .extend(self.defs.iter().cloned().map(XMLNode::Element));
            root.children.push(XMLNode::Element(defs));
        }
        root.children
            .extend(self.body.iter().cloned().map(XMLNode::Element));

        let mut out = Vec::new();
        root.write_with_config(&mut out, EmitterConfig::new().perform_indent(true))?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        std::fs::write(path, self.to_svg()?)?;
        Ok(())
    }
}

impl DrawingSurface for SvgSurface {
    fn clear(&mut self, width: f64, height: f64) {
        *self = SvgSurface::new(width, height);
    }

    fn set_fill(&mut self, paint: Paint) {
        self.fill = self.paint_value(paint);
    }

    fn set_stroke(&mut self, paint: Paint, line_width: f64) {
        self.stroke = self.paint_value(paint);
        self.line_width = line_width;
    }

    fn set_line_dash(&mut self, pattern: &[f64]) {
        self.dash = pattern.to_vec();
    }

    fn set_shadow(&mut self, shadow: Option<Shadow>) {
        let Some(shadow) = shadow else {
            self.filter = None;
            return;
        };
        let id = self.next_id("shadow");
        let mut filter = element("filter", &[("id", id.clone())]);
        let drop = element(
            "feDropShadow",
            &[
                ("dx", coord(shadow.offset.0)),
                ("dy", coord(shadow.offset.1)),
                ("stdDeviation", coord(shadow.blur / 2.0)),
                ("flood-color", shadow.color),
            ],
        );
        filter.children.push(XMLNode::Element(drop));
        self.defs.push(filter);
        self.filter = Some(format!("url(#{})", id));
    }

    fn set_font(&mut self, font: &str) {
        self.font = font.to_string();
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let mut rect = Self::rect(x, y, width, height);
        rect.attributes.insert("fill".into(), self.fill.clone());
        let rect = self.with_filter(rect);
        self.body.push(rect);
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let rect = self.stroked(Self::rect(x, y, width, height));
        self.body.push(rect);
    }

    fn begin_path(&mut self) {
        self.path.clear();
        self.has_point = false;
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.point('M', x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        let command = if self.has_point { 'L' } else { 'M' };
        self.point(command, x, y);
    }

    fn close_path(&mut self) {
        self.path.push_str("Z ");
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64) {
        self.elliptic_arc(cx, cy, radius, radius, start, end);
    }

    fn ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, start: f64, end: f64) {
        self.elliptic_arc(cx, cy, rx, ry, start, end);
    }

    fn fill(&mut self) {
        if self.path.is_empty() {
            return;
        }
        let path = element(
            "path",
            &[("d", self.path.trim_end().to_string()), ("fill", self.fill.clone())],
        );
        let path = self.with_filter(path);
        self.body.push(path);
    }

    fn stroke(&mut self) {
        if self.path.is_empty() {
            return;
        }
        let path = self.stroked(element("path", &[("d", self.path.trim_end().to_string())]));
        self.body.push(path);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        let mut node = element(
            "text",
            &[
                ("x", coord(x)),
                ("y", coord(y)),
                ("fill", self.fill.clone()),
                ("style", format!("font: {}", self.font)),
            ],
        );
        node.children.push(XMLNode::Text(text.to_string()));
        let node = self.with_filter(node);
        self.body.push(node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_circle_is_split_into_two_arcs() {
        let mut svg = SvgSurface::new(100.0, 100.0);
        svg.begin_path();
        svg.arc(50.0, 50.0, 10.0, 0.0, FULL_TURN);
        assert_eq!(svg.path.matches('A').count(), 2);
        assert!(svg.path.starts_with("M60 50"));
    }

    #[test]
    fn gradients_become_definitions() {
        let mut svg = SvgSurface::new(100.0, 100.0);
        svg.set_fill(Paint::linear((0.0, 0.0), (0.0, 100.0), &[(0.0, "#fff"), (1.0, "#000")]));
        svg.fill_rect(0.0, 0.0, 100.0, 100.0);
        let text = svg.to_svg().unwrap();
        assert!(text.contains("<linearGradient"));
        assert!(text.contains("url(#paint0)"));
    }
}
