//! Tests for the generator registry and program assembly.
mod common;
use blokmat::compiler::MAX_ITEM_SLOTS;
use blokmat::error::ConnectionError;
use blokmat::prelude::*;
use common::*;

#[test]
fn test_compiler_assembles_chain_in_order() {
    let workspace = workspace_of(vec![
        set_var("x", Block::number(5.0)).then(show(Block::variable("x"))),
    ]);

    let program = Compiler::new(Level::Ilkokul)
        .compile(&workspace)
        .expect("Failed to compile");

    assert_eq!(program.variables, vec!["x".to_string()]);
    assert_eq!(program.statements.len(), 2);

    let code = program.to_string();
    assert!(code.starts_with("var x;"));
    let assign = code.find("x = 5;").expect("assignment missing");
    let log = code.find("console.log(\"📊 Sonuç =\", x);").expect("log missing");
    assert!(assign < log, "statements must keep chain order");
}

#[test]
fn test_top_level_chains_follow_insertion_order() {
    let workspace = workspace_of(vec![
        show(Block::number(1.0)).at(300.0, 10.0),
        show(Block::number(2.0)).at(10.0, 10.0),
    ]);

    let program = Compiler::new(Level::Ortaokul).compile(&workspace).unwrap();
    let code = program.to_string();
    let first = code.find(", 1)").unwrap();
    let second = code.find(", 2)").unwrap();
    assert!(first < second);
}

#[test]
fn test_empty_workspace_compiles_to_empty_program() {
    let program = Compiler::new(Level::Lise).compile(&Workspace::new()).unwrap();
    assert!(program.is_empty());
    assert_eq!(program.to_string(), "");
}

#[test]
fn test_every_catalog_block_has_a_generator() {
    for level in Level::ALL {
        let compiler = Compiler::new(level);
        for definition in compiler.catalog().iter() {
            assert!(
                compiler.has_generator(&definition.block_type),
                "'{}' has no generator at level '{}'",
                definition.block_type,
                level
            );
        }
    }
}

#[test]
fn test_every_block_runs_with_empty_slots() {
    use blokmat::interpreter::ERROR_PREFIX;

    for level in Level::ALL {
        let compiler = Compiler::new(level);
        for definition in compiler.catalog().iter() {
            // A lone break is rejected on purpose.
            if definition.block_type == "controls_flow_statements" {
                continue;
            }
            let workspace = workspace_of(vec![Block::new(&definition.block_type)]);
            let program = compiler.compile(&workspace).unwrap_or_else(|e| {
                panic!("'{}' failed to compile at '{}': {}", definition.block_type, level, e)
            });
            let lines = Executor::new().execute(&program, &mut NoDrawing).into_lines();
            assert!(
                lines.iter().all(|line| !line.starts_with(ERROR_PREFIX)),
                "'{}' failed at '{}': {:?}",
                definition.block_type,
                level,
                lines
            );
        }
    }
}

#[test]
fn test_unset_variable_field_is_declared() {
    for block_type in ["variables_get", "math_change", "text_append"] {
        let workspace = workspace_of(vec![Block::new(block_type)]);
        let program = Compiler::new(Level::Lise).compile(&workspace).unwrap();
        assert_eq!(program.variables, vec!["item".to_string()], "{}", block_type);
    }

    // The list read by a set-index block falls back to the same name.
    let workspace = workspace_of(vec![
        set_var("item", Block::new("lists_create_empty"))
            .then(
                Block::new("lists_setIndex")
                    .with_field("WHERE", "FIRST")
                    .with_value("LIST", Block::new("variables_get"))
                    .with_value("TO", Block::number(9.0)),
            )
            .then(show(Block::new("variables_get"))),
    ]);
    let (lines, _) = compile_and_run(Level::Ortaokul, &workspace);
    assert_eq!(lines, vec!["📊 Sonuç = 9"]);
}

#[test]
fn test_oversized_mutation_is_capped() {
    let workspace = workspace_of(vec![show(
        Block::new("lists_create_with").with_mutation("items", "18446744073709551615"),
    )]);
    let program = Compiler::new(Level::Ilkokul).compile(&workspace).unwrap();
    match &program.statements[0] {
        Statement::Log(args) => match &args[1] {
            Expression::List(items) => assert_eq!(items.len(), MAX_ITEM_SLOTS),
            other => panic!("Expected a list, got {:?}", other),
        },
        other => panic!("Expected a log statement, got {:?}", other),
    }
}

#[test]
fn test_level_blocks_are_not_shared() {
    let genel = Compiler::new(Level::Genel);
    assert!(genel.has_generator("hello_world"));
    assert!(genel.has_generator("controls_if"));
    assert!(!genel.has_generator("daire_ciz_hesapla"));

    let lise = Compiler::new(Level::Lise);
    assert!(lise.has_generator("hesapla_goster"));
    assert!(lise.has_generator("kure_ciz_hesapla"));
    assert!(!lise.has_generator("toplama"));
}

#[test]
fn test_compiler_fails_on_unregistered_type() {
    let workspace = workspace_of(vec![
        Block::new("daire_ciz_hesapla").with_id("circle"),
    ]);

    let result = Compiler::new(Level::Genel).compile(&workspace);

    match result.err().unwrap() {
        CompileError::MissingGenerator {
            block_id,
            block_type,
        } => {
            assert_eq!(block_id, "circle");
            assert_eq!(block_type, "daire_ciz_hesapla");
        }
        other => panic!("Expected MissingGenerator error, got {:?}", other),
    }
}

#[test]
fn test_nested_unregistered_type_is_reported() {
    let workspace = workspace_of(vec![show(Block::new("mystery").with_id("deep"))]);

    let result = Compiler::new(Level::Ilkokul).compile(&workspace);
    assert!(matches!(
        result,
        Err(CompileError::MissingGenerator { block_id, .. }) if block_id == "deep"
    ));
}

#[test]
fn test_compiler_with_type_mapping() {
    let workspace = workspace_of(vec![
        Block::new("benim_dairem").with_value("YARICAP", Block::number(2.0)),
    ]);

    let compiler = Compiler::builder(Level::Genel)
        .with_type_mapping("benim_dairem", "daire_ciz_hesapla")
        .build();

    let program = compiler
        .compile(&workspace)
        .expect("Compilation should succeed with type mapping");
    assert!(program.to_string().contains("drawShape(\"2d-shape\""));
}

#[test]
fn test_mapped_block_uses_target_defaults() {
    // The slot is left empty, so the default radius of the mapped block applies.
    let workspace = workspace_of(vec![Block::new("benim_dairem")]);
    let compiler = Compiler::builder(Level::Ilkokul)
        .with_type_mapping("benim_dairem", "daire_ciz_hesapla")
        .build();

    let program = compiler.compile(&workspace).unwrap();
    let lines = Executor::new().execute(&program, &mut NoDrawing).into_lines();
    assert_eq!(lines, vec!["Daire: Alan = 7853.98, Çevre = 314.16"]);
}

struct Greeting;

impl BlockGenerator for Greeting {
    fn block_type(&self) -> &str {
        "selam"
    }

    fn generate(&self, ctx: &GenContext<'_>) -> std::result::Result<Generated, CompileError> {
        let name = ctx.field("NAME");
        Ok(Statement::Log(vec![Expression::text(format!("Selam {}!", name))]).into())
    }
}

#[test]
fn test_compiler_with_custom_generator() {
    let workspace = workspace_of(vec![Block::new("selam").with_field("NAME", "Ayşe")]);
    let compiler = Compiler::builder(Level::Ortaokul)
        .with_custom_generator(Box::new(Greeting))
        .build();

    assert!(compiler.block_types().contains(&"selam"));
    let program = compiler.compile(&workspace).unwrap();
    let lines = Executor::new().execute(&program, &mut NoDrawing).into_lines();
    assert_eq!(lines, vec!["Selam Ayşe!"]);
}

#[test]
fn test_custom_block_slots_are_checked() {
    use blokmat::catalog::BlockGroup;

    let definition = BlockDefinition::statement("selam", BlockGroup::Genel).field("NAME", "Dünya");
    let compiler = Compiler::builder(Level::Genel)
        .with_custom_block(definition, Box::new(Greeting))
        .build();

    // The catalog default fills the empty field.
    let program = compiler
        .compile(&workspace_of(vec![Block::new("selam")]))
        .unwrap();
    assert!(program.to_string().contains("Selam Dünya!"));

    // A value slot the definition does not declare is rejected.
    let stray = Block::new("selam")
        .with_id("s1")
        .with_value("EXTRA", Block::number(1.0));
    let result = compiler.compile(&workspace_of(vec![stray]));
    assert!(matches!(
        result,
        Err(CompileError::Connection(ConnectionError::UnknownSlot { .. }))
    ));
}

#[test]
fn test_incompatible_connection_is_rejected() {
    let workspace = workspace_of(vec![show(arithmetic(
        "ADD",
        Block::text("iki"),
        Block::number(2.0),
    ))]);

    let result = Compiler::new(Level::Ilkokul).compile(&workspace);
    match result {
        Err(CompileError::Connection(ConnectionError::IncompatibleType {
            slot,
            expected,
            found,
            ..
        })) => {
            assert_eq!(slot, "A");
            assert_eq!(expected, "Number");
            assert_eq!(found, "String");
        }
        other => panic!("Expected IncompatibleType error, got {:?}", other),
    }
}

#[test]
fn test_statement_block_in_value_slot_is_rejected() {
    let workspace = workspace_of(vec![
        Block::new("text_print").with_value("TEXT", Block::new("hello_world")),
    ]);

    let result = Compiler::new(Level::Genel).compile(&workspace);
    assert!(matches!(
        result,
        Err(CompileError::Connection(ConnectionError::NotAnExpression { .. }))
    ));
}

#[test]
fn test_unknown_dropdown_value_is_rejected() {
    let workspace = workspace_of(vec![show(
        arithmetic("XOR", Block::number(1.0), Block::number(2.0)).with_id("op"),
    )]);

    match Compiler::new(Level::Lise).compile(&workspace) {
        Err(CompileError::InvalidField {
            block_id,
            field,
            value,
        }) => {
            assert_eq!(block_id, "op");
            assert_eq!(field, "OP");
            assert_eq!(value, "XOR");
        }
        other => panic!("Expected InvalidField error, got {:?}", other),
    }
}

#[test]
fn test_declared_variables_come_first() {
    let mut workspace = Workspace::new();
    workspace.add_variable("sayac");
    workspace.add_block(set_var("toplam", Block::number(0.0)));

    let program = Compiler::new(Level::Ilkokul).compile(&workspace).unwrap();
    assert_eq!(program.variables, vec!["sayac".to_string(), "toplam".to_string()]);
}
