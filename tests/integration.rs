//! End-to-end tests of the editor session: workspace, code, output, drawing and config.
mod common;
use blokmat::interpreter::{EMPTY_WORKSPACE_MESSAGE, ERROR_PREFIX, NO_OUTPUT_MESSAGE};
use blokmat::prelude::*;
use common::*;
use tempfile::tempdir;

fn blank_editor(level: Level) -> Editor {
    Editor::new(
        EditorConfig::default()
            .with_level(level)
            .with_starter_blocks(false),
    )
}

#[test]
fn test_empty_workspace_message() {
    let mut editor = blank_editor(Level::Ilkokul);
    assert_eq!(editor.run().unwrap(), [EMPTY_WORKSPACE_MESSAGE]);
    assert!(editor.visualization().is_none());
}

#[test]
fn test_starter_block_runs_silently() {
    let mut editor = Editor::default();
    assert_eq!(editor.level(), Level::Ilkokul);
    assert_eq!(editor.run().unwrap(), [NO_OUTPUT_MESSAGE]);
    assert_eq!(editor.code(), Some("5;\n"));
}

#[test]
fn test_genel_starter_greets() {
    let mut editor = Editor::new(EditorConfig::default().with_level(Level::Genel));
    assert_eq!(editor.run().unwrap(), ["Merhaba Dünya!"]);
}

#[test]
fn test_generate_code_does_not_run() {
    let mut editor = blank_editor(Level::Ortaokul);
    editor
        .workspace_mut()
        .add_block(show(Block::number(3.0)));

    let code = editor.generate_code().unwrap().to_string();
    assert_eq!(code, "console.log(\"📊 Sonuç =\", 3);\n");
    assert!(editor.output().is_empty());
}

#[test]
fn test_last_drawing_wins() {
    let mut editor = blank_editor(Level::Ilkokul);
    editor.workspace_mut().add_block(
        Block::new("kare_ciz_hesapla")
            .with_value("KENAR", Block::number(4.0))
            .then(Block::new("daire_ciz_hesapla").with_value("YARICAP", Block::number(1.0))),
    );

    let lines = editor.run().unwrap().to_vec();
    assert_eq!(lines.len(), 2);
    match editor.visualization() {
        Some(Visualization::Shape2D(payload)) => assert_eq!(payload.shape, "daire"),
        other => panic!("Expected a circle, got {:?}", other),
    }
}

#[test]
fn test_drawing_before_an_error_is_kept() {
    let compiler = Compiler::new(Level::Ilkokul);
    let executor = Executor::new();
    let mut router = OutputRouter::new();

    let square = compiler
        .compile(&workspace_of(vec![Block::new("kare_ciz_hesapla")]))
        .unwrap();
    router.route(&executor, &square);

    // The circle is drawn, then reading an undeclared variable fails.
    let failing = Program {
        variables: Vec::new(),
        ..compiler
            .compile(&workspace_of(vec![
                Block::new("daire_ciz_hesapla")
                    .with_value("YARICAP", Block::number(60.0))
                    .then(show(Block::variable("tanimsiz"))),
            ]))
            .unwrap()
    };
    let lines = router.route(&executor, &failing).to_vec();
    assert_eq!(lines, vec![format!("{}tanimsiz is not defined", ERROR_PREFIX)]);

    match router.visualization() {
        Some(Visualization::Shape2D(payload)) => assert_eq!(payload.shape, "daire"),
        other => panic!("Expected the circle, got {:?}", other),
    }
}

#[test]
fn test_failed_run_without_drawing_keeps_previous_drawing() {
    let mut editor = blank_editor(Level::Ilkokul);
    editor
        .workspace_mut()
        .add_block(Block::new("kare_ciz_hesapla"));
    editor.run().unwrap();

    editor.load_workspace(workspace_of(vec![show(
        Block::new("lists_length").with_value("VALUE", Block::variable("yok")),
    )]));
    assert_eq!(
        editor.run().unwrap(),
        [format!("{}Cannot read properties of null (reading 'length')", ERROR_PREFIX)]
    );
    match editor.visualization() {
        Some(Visualization::Shape2D(payload)) => assert_eq!(payload.shape, "kare"),
        other => panic!("Expected the square to stay, got {:?}", other),
    }
}

#[test]
fn test_runtime_error_replaces_output() {
    let mut editor = blank_editor(Level::Lise);
    editor.workspace_mut().add_block(show(Block::number(1.0)));
    assert_eq!(editor.run().unwrap(), ["📊 Sonuç = 1"]);

    editor.workspace_mut().add_block(
        show(Block::new("lists_getIndex")
            .with_field("MODE", "GET")
            .with_field("WHERE", "FIRST")
            .with_value("VALUE", Block::variable("bos"))),
    );
    let lines = editor.run().unwrap().to_vec();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with(ERROR_PREFIX));
    assert_eq!(editor.output(), lines.as_slice());
}

#[test]
fn test_compile_error_leaves_output_untouched() {
    let mut editor = blank_editor(Level::Genel);
    editor.workspace_mut().add_block(Block::new("hello_world"));
    editor.run().unwrap();

    editor
        .workspace_mut()
        .add_block(Block::new("kure_ciz_hesapla"));
    assert!(matches!(
        editor.run(),
        Err(CompileError::MissingGenerator { .. })
    ));
    assert_eq!(editor.output(), ["Merhaba Dünya!"]);
}

#[test]
fn test_changing_level_resets_the_session() {
    let mut editor = Editor::default();
    editor
        .workspace_mut()
        .add_block(Block::new("daire_ciz_hesapla"));
    editor.run().unwrap();
    assert!(editor.visualization().is_some());

    editor.set_level(Level::Genel);
    assert_eq!(editor.level(), Level::Genel);
    assert!(editor.output().is_empty());
    assert!(editor.code().is_none());
    assert!(editor.visualization().is_none());
    assert_eq!(editor.workspace().top_blocks()[0].block_type, "hello_world");
}

#[test]
fn test_clear_forgets_everything() {
    let mut editor = Editor::default();
    editor.run().unwrap();
    editor.clear();
    assert!(editor.workspace().is_empty());
    assert!(editor.output().is_empty());
    assert!(editor.code().is_none());
}

#[test]
fn test_render_uses_configured_surface() {
    let mut editor = Editor::new(
        EditorConfig::default()
            .with_starter_blocks(false)
            .with_level(Level::Lise)
            .with_surface(640.0, 480.0),
    );
    let mut surface = RecordingSurface::new();
    assert!(!editor.render(&mut surface));
    assert!(editor.render_svg().unwrap().is_none());

    editor
        .workspace_mut()
        .add_block(Block::new("kure_ciz_hesapla").with_value("YARICAP", Block::number(3.0)));
    assert_eq!(
        editor.run().unwrap(),
        ["Küre: Hacim = 113.10, Alan = 113.10"]
    );

    assert!(editor.render(&mut surface));
    assert_eq!(
        surface.commands()[0],
        blokmat::render::DrawCommand::Clear {
            width: 640.0,
            height: 480.0
        }
    );
    assert!(surface.texts().contains(&"Hacim = 113.10"));

    let svg = editor.render_svg().unwrap().expect("a sphere should be drawn");
    assert!(svg.contains("width=\"640\""));
}

#[test]
fn test_chart_from_text_data() {
    let mut editor = blank_editor(Level::Ilkokul);
    editor
        .workspace_mut()
        .add_block(Block::new("sutun_grafik").with_value("DATA", Block::text("[4, 8, 15]")));

    let lines = editor.run().unwrap().to_vec();
    assert_eq!(lines, vec!["Sütun grafik çiziliyor: [4, 8, 15]"]);
    assert_eq!(
        editor.visualization(),
        Some(&Visualization::Chart {
            chart_type: "bar".to_string(),
            data: vec![4.0, 8.0, 15.0],
        })
    );
}

#[test]
fn test_custom_compiler_in_editor() {
    let compiler = Compiler::builder(Level::Ortaokul)
        .with_type_mapping("selamla", "hello_world")
        .build();
    let mut editor = Editor::with_compiler(
        EditorConfig::default().with_starter_blocks(false),
        compiler,
    );
    assert_eq!(editor.level(), Level::Ortaokul);
    assert_eq!(editor.config().level, Level::Ortaokul);

    editor.workspace_mut().add_block(Block::new("selamla"));
    assert_eq!(editor.run().unwrap(), ["Merhaba Dünya!"]);
}

#[test]
fn test_workspace_xml_through_editor() {
    let mut editor = blank_editor(Level::Ilkokul);
    editor
        .workspace_mut()
        .add_block(set_var("n", Block::number(2.0)).then(show(Block::variable("n"))));
    let xml = editor.save_xml().unwrap();

    let mut other = blank_editor(Level::Ilkokul);
    other.load_xml(&xml).unwrap();
    assert_eq!(other.run().unwrap(), ["📊 Sonuç = 2"]);
}

#[test]
fn test_config_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("blokmat.json");

    let config = EditorConfig::default()
        .with_level(Level::Lise)
        .with_surface(800.0, 600.0)
        .with_echo_code(true);
    config.save(&path).unwrap();

    let loaded = EditorConfig::from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_config_defaults() {
    let dir = tempdir().unwrap();
    let missing = EditorConfig::from_file(dir.path().join("yok.json")).unwrap();
    assert_eq!(missing, EditorConfig::default());

    let partial = EditorConfig::from_json(r#"{ "level": "ortaokul" }"#).unwrap();
    assert_eq!(partial.level, Level::Ortaokul);
    assert_eq!(partial.surface_width, 400.0);
    assert!(partial.starter_blocks);
}

#[test]
fn test_invalid_config_is_rejected() {
    assert!(matches!(
        EditorConfig::from_json(r#"{ "surface_width": 0 }"#),
        Err(ConfigError::Invalid(_))
    ));
    assert!(matches!(
        EditorConfig::from_json(r#"{ "level": "universite" }"#),
        Err(ConfigError::Json(_))
    ));
}
