//! Draws the current [`Visualization`] on a [`DrawingSurface`].
//!
//! Rendering is a pure function of the visualization, the surface size and the surface
//! itself: the surface is cleared first, so drawing the same payload twice leaves the
//! same picture. The renderer only displays the precomputed `calculation` values; it never
//! derives them.

use crate::output::{NamedValues, Visualization};
use log::debug;

mod charts;
mod recording;
mod shapes2d;
mod shapes3d;
mod svg;

pub use recording::{DrawCommand, RecordingSurface};
pub use svg::SvgSurface;

/// A fill or stroke style.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(String),
    LinearGradient {
        from: (f64, f64),
        to: (f64, f64),
        stops: Vec<(f64, String)>,
    },
    RadialGradient {
        center: (f64, f64),
        radius: f64,
        stops: Vec<(f64, String)>,
    },
}

impl Paint {
    pub fn solid(color: &str) -> Self {
        Paint::Solid(color.to_string())
    }

    pub fn linear(from: (f64, f64), to: (f64, f64), stops: &[(f64, &str)]) -> Self {
        Paint::LinearGradient {
            from,
            to,
            stops: owned_stops(stops),
        }
    }

    pub fn radial(center: (f64, f64), radius: f64, stops: &[(f64, &str)]) -> Self {
        Paint::RadialGradient {
            center,
            radius,
            stops: owned_stops(stops),
        }
    }
}

fn owned_stops(stops: &[(f64, &str)]) -> Vec<(f64, String)> {
    stops.iter().map(|(at, color)| (*at, color.to_string())).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shadow {
    pub color: String,
    pub blur: f64,
    pub offset: (f64, f64),
}

/// An immediate-mode 2D drawing context.
///
/// Style setters affect every later draw call. Path methods build one current path that
/// `fill` and `stroke` paint; `begin_path` discards it. Angles are in radians, clockwise
/// from the positive x axis, with y growing downwards. Arcs sweep from `start` to `end`, so
/// a decreasing pair runs counter-clockwise.
pub trait DrawingSurface {
    /// Erases everything and sizes the surface.
    fn clear(&mut self, width: f64, height: f64);

    fn set_fill(&mut self, paint: Paint);
    fn set_stroke(&mut self, paint: Paint, line_width: f64);
    /// An empty pattern draws solid lines.
    fn set_line_dash(&mut self, pattern: &[f64]);
    fn set_shadow(&mut self, shadow: Option<Shadow>);
    fn set_font(&mut self, font: &str);

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn close_path(&mut self);
    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64);
    fn ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, start: f64, end: f64);
    fn fill(&mut self);
    fn stroke(&mut self);

    fn fill_text(&mut self, text: &str, x: f64, y: f64);
}

pub const FULL_TURN: f64 = 2.0 * std::f64::consts::PI;

pub(crate) const TEXT_COLOR: &str = "#374151";
pub(crate) const LABEL_FONT: &str = "bold 16px Arial";
pub(crate) const VALUE_FONT: &str = "14px Arial";

/// Clears `surface` and draws `visualization` on it. Unknown shape tags leave it blank.
pub fn render(
    visualization: &Visualization,
    surface: &mut dyn DrawingSurface,
    width: f64,
    height: f64,
) {
    surface.clear(width, height);
    let frame = Frame { width, height };
    debug!("Rendering '{}' at {}x{}", visualization.tag(), width, height);
    match visualization {
        Visualization::Shape2D(payload) => shapes2d::draw(surface, frame, payload),
        Visualization::Shape3D(payload) => shapes3d::draw(surface, frame, payload),
        Visualization::Graph(payload) => charts::draw_graph(surface, frame, payload),
        Visualization::Chart { data, .. } => charts::draw_bar_chart(surface, frame, data),
        Visualization::Function { expression } => {
            charts::draw_function_graph(surface, frame, expression)
        }
    }
}

/// Size of the area being drawn.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Frame {
    pub width: f64,
    pub height: f64,
}

impl Frame {
    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }

    /// Factor that fits a drawing of the given extent into 70% of the frame; never enlarges.
    pub fn fit(&self, extent_x: f64, extent_y: f64) -> f64 {
        let limit = |available: f64, extent: f64| {
            if extent > 0.0 { available * 0.7 / extent } else { 1.0 }
        };
        limit(self.width, extent_x)
            .min(limit(self.height, extent_y))
            .min(1.0)
    }

    pub fn background(&self, surface: &mut dyn DrawingSurface, top: &str, bottom: &str) {
        surface.set_fill(Paint::linear(
            (0.0, 0.0),
            (0.0, self.height),
            &[(0.0, top), (1.0, bottom)],
        ));
        surface.fill_rect(0.0, 0.0, self.width, self.height);
    }
}

/// Caption shown for a calculation entry.
pub(crate) fn caption(key: &str) -> &str {
    match key {
        "alan" => "Alan",
        "cevre" => "Çevre",
        "hacim" => "Hacim",
        "yan_alan" => "Yanal Alan",
        "toplam_alan" => "Toplam Alan",
        other => other,
    }
}

/// Draws the numeric calculation entries as `Caption = v.vv`, one per line from `y` down.
pub(crate) fn draw_calculation(
    surface: &mut dyn DrawingSurface,
    calculation: &NamedValues,
    x: f64,
    y: f64,
) {
    surface.set_fill(Paint::solid(TEXT_COLOR));
    surface.set_font(VALUE_FONT);
    let entries = calculation
        .iter()
        .filter_map(|(key, _)| calculation.number(key).map(|value| (key, value)));
    for (i, (key, value)) in entries.enumerate() {
        let line = format!("{} = {:.2}", caption(key), value);
        surface.fill_text(&line, x, y + 20.0 * i as f64);
    }
}

/// Draws the payload label above a shape.
pub(crate) fn draw_label(surface: &mut dyn DrawingSurface, label: &str, x: f64, y: f64) {
    if label.is_empty() {
        return;
    }
    surface.set_fill(Paint::solid(TEXT_COLOR));
    surface.set_font(LABEL_FONT);
    surface.fill_text(label, x, y);
}

/// A dimension as written next to the drawing, e.g. `r = 60`.
pub(crate) fn dimension(name: &str, value: f64) -> String {
    format!("{} = {}", name, crate::ast::format_number(value))
}
