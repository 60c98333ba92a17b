use super::{
    DrawingSurface, FULL_TURN, Frame, Paint, Shadow, dimension, draw_calculation, draw_label,
};
use crate::ast::format_number;
use crate::output::ShapePayload;
use std::f64::consts::PI;

const LIGHT: &str = "#60a5fa";
const MID: &str = "#3b82f6";
const DARK: &str = "#2563eb";
const OUTLINE: &str = "#1e40af";
const GUIDE: &str = "#ef4444";
const GUIDE_TEXT: &str = "#dc2626";
const FONT_MEASURE: &str = "bold 14px Arial";

const SHAPES: [&str; 5] = ["koni", "silindir", "küre", "küp", "dikdörtgen_prizma"];

/// Depth of the flattened ellipses that stand in for circular faces.
const PERSPECTIVE: f64 = 0.3;

pub(super) fn draw(surface: &mut dyn DrawingSurface, frame: Frame, payload: &ShapePayload) {
    let param = |name: &str, default: f64| {
        payload
            .params
            .number(name)
            .filter(|v| *v > 0.0)
            .unwrap_or(default)
    };
    let shape = payload.shape.as_str();
    if !SHAPES.contains(&shape) {
        return;
    }

    frame.background(surface, "#f0f9ff", "#e0f2fe");
    surface.set_shadow(Some(Shadow {
        color: "rgba(0, 0, 0, 0.2)".to_string(),
        blur: 10.0,
        offset: (5.0, 5.0),
    }));
    match shape {
        "koni" => cone(surface, frame, payload, param("radius", 60.0), param("height", 100.0)),
        "silindir" => cylinder(
            surface,
            frame,
            payload,
            param("radius", 60.0),
            param("height", 100.0),
        ),
        "küre" => sphere(surface, frame, payload, param("radius", 80.0)),
        "küp" => {
            let edge = param("edge", 80.0);
            prism(surface, frame, payload, edge, edge)
        }
        _ => prism(surface, frame, payload, param("width", 80.0), param("height", 120.0)),
    }
    surface.set_shadow(None);
}

fn body_gradient(x: f64, y: f64, r: f64, h: f64) -> Paint {
    Paint::linear(
        (x - r, y - h / 2.0),
        (x + r, y + h / 2.0),
        &[(0.0, LIGHT), (0.5, MID), (1.0, DARK)],
    )
}

fn dashed(surface: &mut dyn DrawingSurface, from: (f64, f64), to: (f64, f64)) {
    surface.set_shadow(None);
    surface.set_stroke(Paint::solid(GUIDE), 2.0);
    surface.set_line_dash(&[5.0, 5.0]);
    surface.begin_path();
    surface.move_to(from.0, from.1);
    surface.line_to(to.0, to.1);
    surface.stroke();
    surface.set_line_dash(&[]);
}

/// Height and radius guides shared by the cone and the cylinder.
fn measurements(
    surface: &mut dyn DrawingSurface,
    center: (f64, f64),
    drawn: (f64, f64),
    real: (f64, f64),
) {
    let (x, y) = center;
    let (r, h) = drawn;
    dashed(surface, (x + r + 15.0, y - h / 2.0), (x + r + 15.0, y + h / 2.0));
    dashed(surface, (x, y + h / 2.0), (x + r, y + h / 2.0));
    surface.set_fill(Paint::solid(GUIDE_TEXT));
    surface.set_font(FONT_MEASURE);
    surface.fill_text(&dimension("h", real.1), x + r + 20.0, y);
    surface.fill_text(&dimension("r", real.0), x + r / 2.0 - 10.0, y + h / 2.0 + 20.0);
}

fn cone(surface: &mut dyn DrawingSurface, frame: Frame, payload: &ShapePayload, r: f64, h: f64) {
    let (x, y) = frame.center();
    let scale = frame.fit(2.0 * r, h);
    let (dr, dh) = (r * scale, h * scale);
    let base = y + dh / 2.0;

    surface.set_fill(Paint::solid(MID));
    surface.set_stroke(Paint::solid(OUTLINE), 2.0);
    surface.begin_path();
    surface.ellipse(x, base, dr, dr * PERSPECTIVE, 0.0, FULL_TURN);
    surface.fill();
    surface.stroke();

    surface.set_fill(body_gradient(x, y, dr, dh));
    surface.begin_path();
    surface.move_to(x, y - dh / 2.0);
    surface.line_to(x - dr, base);
    surface.ellipse(x, base, dr, dr * PERSPECTIVE, PI, 0.0);
    surface.line_to(x + dr, base);
    surface.close_path();
    surface.fill();
    surface.stroke();

    measurements(surface, (x, y), (dr, dh), (r, h));
    draw_calculation(surface, &payload.calculation, x - 60.0, base + 50.0);
    draw_label(surface, &payload.label, x - 20.0, y - dh / 2.0 - 20.0);
}

fn cylinder(
    surface: &mut dyn DrawingSurface,
    frame: Frame,
    payload: &ShapePayload,
    r: f64,
    h: f64,
) {
    let (x, y) = frame.center();
    let scale = frame.fit(2.0 * r, h);
    let (dr, dh) = (r * scale, h * scale);
    let (top, bottom) = (y - dh / 2.0, y + dh / 2.0);

    surface.set_fill(Paint::solid(MID));
    surface.set_stroke(Paint::solid(OUTLINE), 2.0);
    surface.begin_path();
    surface.ellipse(x, top, dr, dr * PERSPECTIVE, 0.0, FULL_TURN);
    surface.fill();
    surface.stroke();

    surface.set_fill(body_gradient(x, y, dr, dh));
    surface.fill_rect(x - dr, top, 2.0 * dr, dh);
    surface.stroke_rect(x - dr, top, 2.0 * dr, dh);

    surface.set_fill(Paint::solid(DARK));
    surface.begin_path();
    surface.ellipse(x, bottom, dr, dr * PERSPECTIVE, 0.0, FULL_TURN);
    surface.fill();
    surface.stroke();

    measurements(surface, (x, y), (dr, dh), (r, h));
    draw_calculation(surface, &payload.calculation, x - 60.0, bottom + 50.0);
    draw_label(surface, &payload.label, x - 30.0, top - 20.0);
}

fn sphere(surface: &mut dyn DrawingSurface, frame: Frame, payload: &ShapePayload, r: f64) {
    let (x, y) = frame.center();
    let dr = r * frame.fit(2.0 * r, 2.0 * r);

    surface.set_fill(Paint::radial(
        (x - dr * 0.3, y - dr * 0.3),
        dr,
        &[(0.0, "#93c5fd"), (0.5, MID), (1.0, OUTLINE)],
    ));
    surface.begin_path();
    surface.arc(x, y, dr, 0.0, FULL_TURN);
    surface.fill();
    surface.set_stroke(Paint::solid(OUTLINE), 2.0);
    surface.stroke();

    surface.set_shadow(None);
    surface.set_stroke(Paint::solid("rgba(255, 255, 255, 0.3)"), 1.0);
    surface.begin_path();
    surface.ellipse(x, y, dr, dr * PERSPECTIVE, 0.0, FULL_TURN);
    surface.stroke();
    surface.begin_path();
    surface.ellipse(x, y, dr * PERSPECTIVE, dr, 0.0, FULL_TURN);
    surface.stroke();

    dashed(surface, (x, y), (x + dr, y));
    surface.set_fill(Paint::solid(GUIDE_TEXT));
    surface.set_font(FONT_MEASURE);
    surface.fill_text(&dimension("r", r), x + dr / 2.0 - 10.0, y - 10.0);

    draw_calculation(surface, &payload.calculation, x - 60.0, y + dr + 30.0);
    draw_label(surface, &payload.label, x - 20.0, y - dr - 20.0);
}

/// A box seen slightly from above and to the right. The cube is the `w == h` case.
fn prism(surface: &mut dyn DrawingSurface, frame: Frame, payload: &ShapePayload, w: f64, h: f64) {
    let (x, y) = frame.center();
    let scale = frame.fit(w * 1.3, h * 1.3);
    let (dw, dh) = (w * scale, h * scale);
    let (ox, oy) = (dw * PERSPECTIVE, dh * PERSPECTIVE);
    let (left, top) = (x - dw / 2.0, y - dh / 2.0);

    surface.set_fill(Paint::solid(LIGHT));
    surface.set_stroke(Paint::solid(OUTLINE), 2.0);
    surface.fill_rect(left + ox, top - oy, dw, dh);
    surface.stroke_rect(left + ox, top - oy, dw, dh);

    surface.set_stroke(Paint::solid(MID), 2.0);
    surface.begin_path();
    for (cx, cy) in [(left, top), (left + dw, top), (left, top + dh), (left + dw, top + dh)] {
        surface.move_to(cx, cy);
        surface.line_to(cx + ox, cy - oy);
    }
    surface.stroke();

    surface.set_fill(Paint::linear(
        (left, top),
        (left + dw, top + dh),
        &[(0.0, MID), (1.0, OUTLINE)],
    ));
    surface.fill_rect(left, top, dw, dh);
    surface.set_stroke(Paint::solid(OUTLINE), 2.0);
    surface.stroke_rect(left, top, dw, dh);

    dashed(surface, (left - 15.0, top), (left - 15.0, top + dh));
    surface.set_fill(Paint::solid(GUIDE_TEXT));
    surface.set_font(FONT_MEASURE);
    surface.fill_text(&format_number(h), left - 35.0, y);
    if payload.shape == "dikdörtgen_prizma" {
        let length = payload.params.number("length").unwrap_or(100.0);
        surface.fill_text(&format_number(w), x - 10.0, top + dh + 20.0);
        surface.fill_text(&dimension("u", length), left + dw + ox / 2.0, top - oy / 2.0);
    }

    draw_calculation(surface, &payload.calculation, x - 60.0, top + dh + 45.0);
    draw_label(surface, &payload.label, x - 40.0, top - oy - 20.0);
}
