//! Tests for drawing visualizations onto surfaces.
mod common;
use blokmat::output::NamedValues;
use blokmat::prelude::*;
use blokmat::render::DrawCommand;
use common::*;

fn named(entries: &[(&str, f64)]) -> NamedValues {
    entries
        .iter()
        .map(|(name, value)| (name.to_string(), Value::Number(*value)))
        .collect()
}

fn shape(shape: &str, params: &[(&str, f64)], calculation: &[(&str, f64)]) -> ShapePayload {
    ShapePayload {
        shape: shape.to_string(),
        params: named(params),
        label: String::new(),
        calculation: named(calculation),
    }
}

fn record(visualization: &Visualization) -> RecordingSurface {
    let mut surface = RecordingSurface::new();
    render(visualization, &mut surface, 400.0, 300.0);
    surface
}

#[test]
fn test_circle_from_compiled_program() {
    let workspace = workspace_of(vec![
        Block::new("daire_ciz_hesapla").with_value("YARICAP", Block::number(60.0)),
    ]);
    let (lines, router) = compile_and_run(Level::Ilkokul, &workspace);
    assert_eq!(lines, vec!["Daire: Alan = 11309.73, Çevre = 376.99"]);

    let visualization = router.visualization().expect("a circle should be drawn");
    assert_eq!(visualization.tag(), "2d-shape");

    let surface = record(visualization);
    let texts = surface.texts();
    assert!(texts.contains(&"Alan = 11309.73"));
    assert!(texts.contains(&"Çevre = 376.99"));
    assert!(texts.contains(&"r = 60"));
    assert!(texts.contains(&"Daire (r=60)"));
}

#[test]
fn test_calculation_lines_are_stacked() {
    let payload = shape("kare", &[("kenar", 10.0)], &[("alan", 100.0), ("cevre", 40.0)]);
    let surface = record(&Visualization::Shape2D(payload));

    let positions: Vec<(f64, f64)> = surface
        .commands()
        .iter()
        .filter_map(|command| match command {
            DrawCommand::FillText { text, x, y } if text.contains(" = ") => Some((*x, *y)),
            _ => None,
        })
        .collect();
    assert_eq!(positions.len(), 2);
    assert_eq!(positions[0].0, positions[1].0);
    assert_eq!(positions[1].1 - positions[0].1, 20.0);
}

#[test]
fn test_unknown_shape_draws_nothing() {
    let surface = record(&Visualization::Shape2D(shape("yildiz", &[], &[])));
    assert!(surface.is_blank());

    let surface = record(&Visualization::Shape3D(shape("piramit", &[], &[])));
    assert!(surface.is_blank());
}

#[test]
fn test_rendering_is_repeatable() {
    let visualization = Visualization::Shape3D(shape(
        "silindir",
        &[("radius", 30.0), ("height", 90.0)],
        &[("hacim", 254469.0), ("yan_alan", 16964.6)],
    ));

    let mut surface = RecordingSurface::new();
    render(&visualization, &mut surface, 400.0, 300.0);
    let first = surface.commands().to_vec();
    render(&visualization, &mut surface, 400.0, 300.0);
    assert_eq!(surface.commands(), first.as_slice());
    assert!(surface.texts().contains(&"Yanal Alan = 16964.60"));
}

#[test]
fn test_every_three_dimensional_shape_draws() {
    for name in ["koni", "silindir", "küre", "küp", "dikdörtgen_prizma"] {
        let surface = record(&Visualization::Shape3D(shape(name, &[], &[])));
        assert!(!surface.is_blank(), "'{}' was not drawn", name);
    }
}

#[test]
fn test_bar_chart_labels_each_value() {
    let surface = record(&Visualization::Chart {
        chart_type: "pie".to_string(),
        data: vec![3.0, 5.0, 2.0],
    });

    assert_eq!(surface.texts(), vec!["3", "5", "2"]);
    let bars = surface
        .commands()
        .iter()
        .filter(|command| matches!(command, DrawCommand::FillRect { .. }))
        .count();
    assert_eq!(bars, 3);
}

#[test]
fn test_graph_point_is_labelled() {
    let workspace = workspace_of(vec![
        Block::new("koordinat_ciz")
            .with_value("X", Block::number(2.0))
            .with_value("Y", Block::number(-3.0)),
    ]);
    let (lines, router) = compile_and_run(Level::Ortaokul, &workspace);
    assert_eq!(lines, vec!["Koordinat: (2, -3)"]);

    let surface = record(router.visualization().unwrap());
    assert_eq!(surface.texts(), vec!["(2, -3)"]);
}

#[test]
fn test_unreadable_function_falls_back_to_identity() {
    let plot = |expression: &str| {
        record(&Visualization::Function {
            expression: expression.to_string(),
        })
        .commands()
        .iter()
        .filter(|command| matches!(command, DrawCommand::LineTo(..)))
        .count()
    };
    assert!(plot("x^2") > 0);
    assert_eq!(plot("bu bir fonksiyon değil"), plot("x"));
}

#[test]
fn test_svg_output() {
    let payload = ShapePayload {
        label: "Daire (r=60)".to_string(),
        ..shape("daire", &[("yaricap", 60.0)], &[("alan", 11309.733552923255)])
    };
    let mut surface = SvgSurface::new(400.0, 300.0);
    render(&Visualization::Shape2D(payload), &mut surface, 400.0, 300.0);

    let svg = surface.to_svg().expect("Failed to write SVG");
    assert!(svg.contains("<svg"));
    assert!(svg.contains("radialGradient"));
    assert!(svg.contains("Alan = 11309.73"));
    assert!(svg.contains("Daire (r=60)"));
}

#[test]
fn test_visualization_json_uses_type_tags() {
    let json = Visualization::Shape2D(shape("daire", &[("yaricap", 5.0)], &[("alan", 78.5)]))
        .to_json()
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["type"], "2d-shape");
    assert_eq!(value["shape"], "daire");
    assert_eq!(value["yaricap"], 5.0);
    assert_eq!(value["calculation"]["alan"], 78.5);
}
