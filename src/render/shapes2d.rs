use super::{
    DrawingSurface, FULL_TURN, Frame, Paint, Shadow, TEXT_COLOR, VALUE_FONT, dimension,
    draw_calculation, draw_label,
};
use crate::ast::format_number;
use crate::output::ShapePayload;

const FILL_LIGHT: &str = "#60a5fa";
const FILL_DARK: &str = "#2563eb";
const OUTLINE: &str = "#1e40af";
const GUIDE: &str = "#ef4444";

const SHAPES: [&str; 4] = ["daire", "kare", "dikdortgen", "ucgen"];

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

    frame.background(surface, "#f9fafb", "#f3f4f6");
    surface.set_shadow(Some(Shadow {
        color: "rgba(0, 0, 0, 0.15)".to_string(),
        blur: 8.0,
        offset: (3.0, 3.0),
    }));
    match shape {
        "daire" => circle(surface, frame, payload, param("yaricap", 60.0)),
        "kare" => {
            let side = param("kenar", 80.0);
            rectangle(surface, frame, payload, side, side)
        }
        "dikdortgen" => rectangle(
            surface,
            frame,
            payload,
            param("genislik", 100.0),
            param("yukseklik", 70.0),
        ),
        _ => triangle(
            surface,
            frame,
            payload,
            param("taban", 100.0),
            param("yukseklik", 80.0),
        ),
    }
    surface.set_shadow(None);
}

fn outline(surface: &mut dyn DrawingSurface) {
    surface.set_stroke(Paint::solid(OUTLINE), 3.0);
    surface.stroke();
}

fn dashed_guide(surface: &mut dyn DrawingSurface, from: (f64, f64), to: (f64, f64)) {
    surface.set_shadow(None);
    surface.set_stroke(Paint::solid(GUIDE), 2.0);
    surface.set_line_dash(&[5.0, 5.0]);
    surface.begin_path();
    surface.move_to(from.0, from.1);
    surface.line_to(to.0, to.1);
    surface.stroke();
    surface.set_line_dash(&[]);
}

fn circle(surface: &mut dyn DrawingSurface, frame: Frame, payload: &ShapePayload, r: f64) {
    let (x, y) = frame.center();
    let drawn = r * frame.fit(2.0 * r, 2.0 * r);

    surface.set_fill(Paint::radial(
        (x, y),
        drawn,
        &[(0.0, FILL_LIGHT), (1.0, FILL_DARK)],
    ));
    surface.begin_path();
    surface.arc(x, y, drawn, 0.0, FULL_TURN);
    surface.fill();
    outline(surface);

    dashed_guide(surface, (x, y), (x + drawn, y));
    surface.set_fill(Paint::solid(TEXT_COLOR));
    surface.set_font(VALUE_FONT);
    surface.fill_text(&dimension("r", r), x + drawn / 2.0 - 15.0, y - 10.0);

    surface.set_fill(Paint::solid(GUIDE));
    surface.begin_path();
    surface.arc(x, y, 4.0, 0.0, FULL_TURN);
    surface.fill();

    draw_calculation(surface, &payload.calculation, x - 40.0, y + drawn + 40.0);
    draw_label(surface, &payload.label, x - 20.0, y - drawn - 20.0);
}

fn rectangle(
    surface: &mut dyn DrawingSurface,
    frame: Frame,
    payload: &ShapePayload,
    w: f64,
    h: f64,
) {
    let (x, y) = frame.center();
    let scale = frame.fit(w, h);
    let (dw, dh) = (w * scale, h * scale);
    let (left, top) = (x - dw / 2.0, y - dh / 2.0);

    surface.set_fill(Paint::linear(
        (left, top),
        (left + dw, top + dh),
        &[(0.0, FILL_LIGHT), (1.0, FILL_DARK)],
    ));
    surface.fill_rect(left, top, dw, dh);
    surface.set_stroke(Paint::solid(OUTLINE), 3.0);
    surface.stroke_rect(left, top, dw, dh);

    dashed_guide(surface, (left, top + dh + 15.0), (left + dw, top + dh + 15.0));
    dashed_guide(surface, (left - 15.0, top), (left - 15.0, top + dh));
    surface.set_fill(Paint::solid(TEXT_COLOR));
    surface.set_font(VALUE_FONT);
    surface.fill_text(&format_number(w), x - 10.0, top + dh + 30.0);
    surface.fill_text(&format_number(h), left - 35.0, y);

    draw_calculation(surface, &payload.calculation, x - 40.0, top + dh + 60.0);
    draw_label(surface, &payload.label, x - 40.0, top - 20.0);
}

fn triangle(
    surface: &mut dyn DrawingSurface,
    frame: Frame,
    payload: &ShapePayload,
    base: f64,
    height: f64,
) {
    let (x, y) = frame.center();
    let scale = frame.fit(base, height);
    let (db, dh) = (base * scale, height * scale);
    let apex = (x, y - dh / 2.0);
    let bottom = y + dh / 2.0;

    surface.set_fill(Paint::linear(
        (x - db / 2.0, bottom),
        (x + db / 2.0, apex.1),
        &[(0.0, FILL_LIGHT), (1.0, FILL_DARK)],
    ));
    surface.begin_path();
    surface.move_to(apex.0, apex.1);
    surface.line_to(x - db / 2.0, bottom);
    surface.line_to(x + db / 2.0, bottom);
    surface.close_path();
    surface.fill();
    outline(surface);

    dashed_guide(surface, apex, (x, bottom));
    surface.set_fill(Paint::solid(TEXT_COLOR));
    surface.set_font(VALUE_FONT);
    surface.fill_text(&dimension("h", height), x + 10.0, y);
    surface.fill_text(&dimension("taban", base), x - 30.0, bottom + 25.0);

    draw_calculation(surface, &payload.calculation, x - 40.0, bottom + 55.0);
    draw_label(surface, &payload.label, x - 30.0, apex.1 - 20.0);
}
