//! Tests for workspace construction, validation and XML persistence.
mod common;
use blokmat::prelude::*;
use common::*;
use tempfile::tempdir;

const SAVED_WORKSPACE: &str = r#"<xml xmlns="https://developers.google.com/blockly/xml">
  <variables>
    <variable id="v1">toplam</variable>
  </variables>
  <block type="variables_set" id="set" x="20" y="30">
    <field name="VAR" id="v1">toplam</field>
    <value name="VALUE">
      <shadow type="math_number" id="shadow">
        <field name="NUM">1</field>
      </shadow>
      <block type="math_number" id="num">
        <field name="NUM">12</field>
      </block>
    </value>
    <next>
      <block type="sonuc_goster" id="show">
        <value name="VALUE">
          <block type="variables_get" id="get">
            <field name="VAR" id="v1">toplam</field>
          </block>
        </value>
      </block>
    </next>
  </block>
</xml>"#;

#[test]
fn test_reads_blockly_xml() {
    let workspace = Workspace::from_xml(SAVED_WORKSPACE).expect("Failed to parse workspace");

    assert_eq!(workspace.variable_names(), vec!["toplam".to_string()]);
    assert_eq!(workspace.top_blocks().len(), 1);
    assert_eq!(workspace.block_count(), 4);

    let head = &workspace.top_blocks()[0];
    assert_eq!(head.id, "set");
    assert_eq!(head.field("VAR"), Some("toplam"));
    // A real block wins over the shadow in the same slot.
    assert_eq!(head.value("VALUE").unwrap().field("NUM"), Some("12"));
    assert_eq!(head.chain().count(), 2);
}

#[test]
fn test_loaded_workspace_runs() {
    let workspace = Workspace::from_xml(SAVED_WORKSPACE).unwrap();
    let (lines, _) = compile_and_run(Level::Ilkokul, &workspace);
    assert_eq!(lines, vec!["📊 Sonuç = 12"]);
}

#[test]
fn test_xml_round_trip_through_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("workspace.xml");

    let mut workspace = Workspace::new();
    workspace.add_variable("i");
    workspace.add_block(
        Block::new("controls_repeat_ext")
            .with_value("TIMES", Block::number(3.0))
            .with_statement("DO", show(Block::text("merhaba")))
            .at(10.0, 20.0),
    );
    workspace.add_block(
        Block::new("lists_create_with")
            .with_mutation("items", "2")
            .with_value("ADD0", Block::number(1.0))
            .with_value("ADD1", Block::number(2.0)),
    );
    workspace.save(&path).expect("Failed to save workspace");

    let loaded = Workspace::load(&path).expect("Failed to load workspace");
    assert_eq!(loaded.top_blocks(), workspace.top_blocks());
    assert_eq!(loaded.variables(), workspace.variables());
}

#[test]
fn test_load_xml_replaces_contents() {
    let mut workspace = Workspace::starter(Level::Lise);
    assert!(!workspace.is_empty());

    workspace.load_xml("<xml></xml>").unwrap();
    assert!(workspace.is_empty());
    assert!(workspace.variables().is_empty());
}

#[test]
fn test_malformed_xml_is_an_error() {
    assert!(matches!(
        Workspace::from_xml("<xml><block type="),
        Err(WorkspaceError::Xml(_))
    ));
    assert!(matches!(
        Workspace::from_xml("<workspace/>"),
        Err(WorkspaceError::UnexpectedRoot(root)) if root == "workspace"
    ));
    assert!(matches!(
        Workspace::from_xml("<xml><block id=\"a\"/></xml>"),
        Err(WorkspaceError::MissingAttribute { attribute: "type", .. })
    ));
}

#[test]
fn test_starter_blocks() {
    let genel = Workspace::starter(Level::Genel);
    assert_eq!(genel.top_blocks()[0].block_type, "hello_world");

    for level in [Level::Ilkokul, Level::Ortaokul, Level::Lise] {
        let workspace = Workspace::starter(level);
        assert_eq!(workspace.block_count(), 1);
        assert_eq!(workspace.top_blocks()[0].block_type, "math_number");
    }
}

#[test]
fn test_added_blocks_receive_unique_ids() {
    let mut workspace = Workspace::new();
    workspace.add_block(show(Block::number(1.0)).then(show(Block::number(2.0))));
    workspace.add_block(Block::number(3.0).with_id("kept"));

    let mut ids = Vec::new();
    for head in workspace.top_blocks() {
        for block in head.chain() {
            ids.push(block.id.clone());
            ids.extend(block.values.values().map(|child| child.id.clone()));
        }
    }
    assert!(ids.contains(&"kept".to_string()));
    assert!(ids.iter().all(|id| !id.is_empty()));
    let unique: std::collections::HashSet<_> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len());
}

#[test]
fn test_validate_reports_every_problem() {
    let catalog = BlockCatalog::for_level(Level::Ilkokul);
    let workspace = workspace_of(vec![
        show(Block::new("hello_world")),
        arithmetic("ADD", Block::new("logic_boolean"), Block::number(1.0)),
    ]);

    let errors = workspace.validate(&catalog);
    assert!(errors.iter().any(|e| matches!(
        e,
        ConnectionError::UnknownBlockType { block_type, .. } if block_type == "hello_world"
    )));
    assert!(errors.iter().any(|e| matches!(
        e,
        ConnectionError::IncompatibleType { slot, .. } if slot == "A"
    )));
}
