use super::{Block, Position, Variable, Workspace};
use crate::ast::format_number;
use crate::error::WorkspaceError;
use std::io::Cursor;
use xmltree::{Element, EmitterConfig, Namespace, XMLNode};

const BLOCKLY_NAMESPACE: &str = "https://developers.google.com/blockly/xml";

fn elements(parent: &Element) -> impl Iterator<Item = &Element> {
    parent.children.iter().filter_map(|node| match node {
        XMLNode::Element(element) => Some(element),
        _ => None,
    })
}

fn required_attribute<'a>(
    element: &'a Element,
    attribute: &'static str,
) -> Result<&'a String, WorkspaceError> {
    element
        .attributes
        .get(attribute)
        .ok_or_else(|| WorkspaceError::MissingAttribute {
            element: element.name.clone(),
            attribute,
        })
}

fn text_of(element: &Element) -> String {
    element
        .get_text()
        .map(|text| text.into_owned())
        .unwrap_or_default()
}

/// Reads the first `<block>` inside `parent`, falling back to a `<shadow>`.
fn inner_block(parent: &Element) -> Result<Option<Block>, WorkspaceError> {
    let chosen = elements(parent)
        .find(|e| e.name == "block")
        .or_else(|| elements(parent).find(|e| e.name == "shadow"));
    chosen.map(read_block).transpose()
}

fn read_block(element: &Element) -> Result<Block, WorkspaceError> {
    let mut block = Block::new(required_attribute(element, "type")?);
    if let Some(id) = element.attributes.get("id") {
        block.id = id.clone();
    }

    let coordinate = |name: &str| element.attributes.get(name).and_then(|v| v.parse::<f64>().ok());
    if let (Some(x), Some(y)) = (coordinate("x"), coordinate("y")) {
        block.position = Some(Position { x, y });
    }

    for child in elements(element) {
        match child.name.as_str() {
            "field" => {
                let name = required_attribute(child, "name")?;
                block.fields.insert(name.clone(), text_of(child));
            }
            "value" => {
                let name = required_attribute(child, "name")?;
                if let Some(inner) = inner_block(child)? {
                    block.values.insert(name.clone(), inner);
                }
            }
            "statement" => {
                let name = required_attribute(child, "name")?;
                if let Some(inner) = inner_block(child)? {
                    block.statements.insert(name.clone(), inner);
                }
            }
            "next" => {
                block.next = inner_block(child)?.map(Box::new);
            }
            "mutation" => {
                for (key, value) in &child.attributes {
                    block.mutation.insert(key.clone(), value.clone());
                }
            }
            _ => {}
        }
    }
    Ok(block)
}

pub(super) fn read_workspace(source: &str) -> Result<(Vec<Block>, Vec<Variable>), WorkspaceError> {
    let root = Element::parse(Cursor::new(source.as_bytes()))?;
    if root.name != "xml" {
        return Err(WorkspaceError::UnexpectedRoot(root.name));
    }

    let mut blocks = Vec::new();
    let mut variables = Vec::new();
    for child in elements(&root) {
        match child.name.as_str() {
            "variables" => {
                for variable in elements(child).filter(|e| e.name == "variable") {
                    let name = text_of(variable);
                    let id = variable
                        .attributes
                        .get("id")
                        .cloned()
                        .unwrap_or_else(|| name.clone());
                    variables.push(Variable { id, name });
                }
            }
            "block" | "shadow" => blocks.push(read_block(child)?),
            _ => {}
        }
    }
    Ok((blocks, variables))
}

fn element_with(name: &str, attributes: &[(&str, &str)]) -> Element {
    let mut element = Element::new(name);
    for (key, value) in attributes {
        element
            .attributes
            .insert(key.to_string(), value.to_string());
    }
    element
}

fn sorted<'a, V>(map: &'a ahash::AHashMap<String, V>) -> Vec<(&'a String, &'a V)> {
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries
}

fn write_block(block: &Block) -> Element {
    let mut element = element_with("block", &[("type", block.block_type.as_str())]);
    if !block.id.is_empty() {
        element.attributes.insert("id".into(), block.id.clone());
    }
    if let Some(position) = block.position {
        element
            .attributes
            .insert("x".into(), format_number(position.x));
        element
            .attributes
            .insert("y".into(), format_number(position.y));
    }

    if !block.mutation.is_empty() {
        let mut mutation = Element::new("mutation");
        for (key, value) in sorted(&block.mutation) {
            mutation.attributes.insert(key.clone(), value.clone());
        }
        element.children.push(XMLNode::Element(mutation));
    }
    for (name, value) in sorted(&block.fields) {
        let mut field = element_with("field", &[("name", name.as_str())]);
        if !value.is_empty() {
            field.children.push(XMLNode::Text(value.clone()));
        }
        element.children.push(XMLNode::Element(field));
    }
    for (name, child) in sorted(&block.values) {
        let mut value = element_with("value", &[("name", name.as_str())]);
        value.children.push(XMLNode::Element(write_block(child)));
        element.children.push(XMLNode::Element(value));
    }
    for (name, child) in sorted(&block.statements) {
        let mut statement = element_with("statement", &[("name", name.as_str())]);
        statement.children.push(XMLNode::Element(write_block(child)));
        element.children.push(XMLNode::Element(statement));
    }
    if let Some(next) = block.next.as_deref() {
        let mut wrapper = Element::new("next");
        wrapper.children.push(XMLNode::Element(write_block(next)));
        element.children.push(XMLNode::Element(wrapper));
    }
    element
}

pub(super) fn write_workspace(workspace: &Workspace) -> Result<String, WorkspaceError> {
    let mut root = Element::new("xml");
    let mut namespace = Namespace::empty();
    namespace.force_put("", BLOCKLY_NAMESPACE);
    root.namespace = Some(BLOCKLY_NAMESPACE.to_string());
    root.namespaces = Some(namespace);

    if !workspace.variables.is_empty() {
        let mut variables = Element::new("variables");
        for variable in &workspace.variables {
            let mut element = element_with("variable", &[("id", variable.id.as_str())]);
            element.children.push(XMLNode::Text(variable.name.clone()));
            variables.children.push(XMLNode::Element(element));
        }
        root.children.push(XMLNode::Element(variables));
    }
    for block in &workspace.blocks {
        root.children.push(XMLNode::Element(write_block(block)));
    }

    let mut out = Vec::new();
    root.write_with_config(&mut out, EmitterConfig::new().perform_indent(true))?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}
