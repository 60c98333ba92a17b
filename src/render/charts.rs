use super::{DrawingSurface, FULL_TURN, Frame, Paint, TEXT_COLOR};
use crate::ast::format_number;
use crate::interpreter::RealFunction;
use crate::output::ShapePayload;
use log::debug;

/// The visible x and y range of the coordinate plane is `-EXTENT..=EXTENT`.
const EXTENT: f64 = 5.0;
const SAMPLE_STEP: f64 = 0.1;

/// Maps plane coordinates to surface coordinates.
fn to_surface(frame: Frame, x: f64, y: f64) -> (f64, f64) {
    (
        (x + EXTENT) * frame.width / (2.0 * EXTENT),
        (EXTENT - y) * frame.height / (2.0 * EXTENT),
    )
}

fn line(surface: &mut dyn DrawingSurface, from: (f64, f64), to: (f64, f64)) {
    surface.begin_path();
    surface.move_to(from.0, from.1);
    surface.line_to(to.0, to.1);
    surface.stroke();
}

/// Light grid of ten cells per side with the two main axes on top.
fn coordinate_system(surface: &mut dyn DrawingSurface, frame: Frame) {
    surface.set_stroke(Paint::solid("#e5e7eb"), 1.0);
    for i in 0..=10 {
        let y = frame.height / 10.0 * i as f64;
        line(surface, (0.0, y), (frame.width, y));
    }
    for i in 0..=10 {
        let x = frame.width / 10.0 * i as f64;
        line(surface, (x, 0.0), (x, frame.height));
    }

    let (cx, cy) = frame.center();
    surface.set_stroke(Paint::solid(TEXT_COLOR), 2.0);
    line(surface, (0.0, cy), (frame.width, cy));
    line(surface, (cx, 0.0), (cx, frame.height));
}

/// A labelled point on the coordinate plane, as drawn by `koordinat_ciz`.
pub(super) fn draw_graph(surface: &mut dyn DrawingSurface, frame: Frame, payload: &ShapePayload) {
    if payload.shape != "nokta" {
        return;
    }
    coordinate_system(surface, frame);
    let (Some(x), Some(y)) = (payload.params.number("x"), payload.params.number("y")) else {
        return;
    };
    let (px, py) = to_surface(frame, x, y);
    surface.set_fill(Paint::solid("#3b82f6"));
    surface.begin_path();
    surface.arc(px, py, 4.0, 0.0, FULL_TURN);
    surface.fill();
    if !payload.label.is_empty() {
        surface.set_fill(Paint::solid(TEXT_COLOR));
        surface.set_font("12px Arial");
        surface.fill_text(&payload.label, px + 8.0, py - 8.0);
    }
}

/// Grid, axes and the curve of `expression` over `x ∈ [-5, 5]`. An expression that cannot
/// be read is drawn as `y = x`.
pub(super) fn draw_function_graph(
    surface: &mut dyn DrawingSurface,
    frame: Frame,
    expression: &str,
) {
    coordinate_system(surface, frame);
    let function = RealFunction::parse(expression).unwrap_or_else(|e| {
        debug!("Drawing y = x instead: {}", e);
        RealFunction::identity()
    });

    surface.set_stroke(Paint::solid("#ef4444"), 2.0);
    surface.begin_path();
    let steps = (2.0 * EXTENT / SAMPLE_STEP).round() as usize;
    let mut pen_down = false;
    for i in 0..=steps {
        let x = -EXTENT + i as f64 * SAMPLE_STEP;
        let y = function.eval(x);
        if !y.is_finite() {
            pen_down = false;
            continue;
        }
        let (px, py) = to_surface(frame, x, y);
        if pen_down {
            surface.line_to(px, py);
        } else {
            surface.move_to(px, py);
            pen_down = true;
        }
    }
    surface.stroke();
}

/// One bar per value, heights relative to the largest value, each labelled with its value.
pub(super) fn draw_bar_chart(surface: &mut dyn DrawingSurface, frame: Frame, values: &[f64]) {
    if values.is_empty() {
        return;
    }
    let max = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(f64::NEG_INFINITY, f64::max);
    let bar_width = frame.width / values.len() as f64;

    for (i, value) in values.iter().enumerate() {
        let ratio = if max > 0.0 && value.is_finite() {
            (value / max).max(0.0)
        } else {
            0.0
        };
        let bar_height = ratio * frame.height * 0.8;
        let x = i as f64 * bar_width;
        let y = frame.height - bar_height;

        let hue = i as f64 * 360.0 / values.len() as f64;
        surface.set_fill(Paint::Solid(format!("hsl({}, 70%, 50%)", hue.round())));
        surface.fill_rect(x + 5.0, y, (bar_width - 10.0).max(1.0), bar_height);

        surface.set_fill(Paint::solid(TEXT_COLOR));
        surface.set_font("12px Arial");
        surface.fill_text(&format_number(*value), x + bar_width / 2.0 - 10.0, y - 5.0);
    }
}
