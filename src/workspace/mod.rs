//! The program graph: blocks placed on the editor surface and the variables they share.

use crate::catalog::{BlockCatalog, BlockShape, Level, SlotKind};
use crate::error::{ConnectionError, WorkspaceError};
use ahash::AHashMap;
use std::fs;
use std::path::Path;

mod xml;

/// Canvas coordinates of a top-level block.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A single block instance. Children are owned, so a block graph can never contain a cycle.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub id: String,
    pub block_type: String,
    pub fields: AHashMap<String, String>,
    pub values: AHashMap<String, Block>,
    pub statements: AHashMap<String, Block>,
    pub next: Option<Box<Block>>,
    pub position: Option<Position>,
    pub mutation: AHashMap<String, String>,
}

impl Block {
    pub fn new(block_type: &str) -> Self {
        Self {
            block_type: block_type.to_string(),
            ..Default::default()
        }
    }

    /// A `math_number` block.
    pub fn number(value: f64) -> Self {
        Self::new("math_number").with_field("NUM", &crate::ast::format_number(value))
    }

    /// A `text` block.
    pub fn text(value: &str) -> Self {
        Self::new("text").with_field("TEXT", value)
    }

    /// A `variables_get` block reading the named variable.
    pub fn variable(name: &str) -> Self {
        Self::new("variables_get").with_field("VAR", name)
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    pub fn with_field(mut self, name: &str, value: &str) -> Self {
        self.fields.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_value(mut self, name: &str, child: Block) -> Self {
        self.values.insert(name.to_string(), child);
        self
    }

    pub fn with_statement(mut self, name: &str, child: Block) -> Self {
        self.statements.insert(name.to_string(), child);
        self
    }

    pub fn with_mutation(mut self, name: &str, value: &str) -> Self {
        self.mutation.insert(name.to_string(), value.to_string());
        self
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Some(Position { x, y });
        self
    }

    /// Appends `block` at the end of this block's `next` chain.
    pub fn then(mut self, block: Block) -> Self {
        match self.next.take() {
            Some(next) => self.next = Some(Box::new(next.then(block))),
            None => self.next = Some(Box::new(block)),
        }
        self
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(|s| s.as_str())
    }

    pub fn value(&self, name: &str) -> Option<&Block> {
        self.values.get(name)
    }

    pub fn statement(&self, name: &str) -> Option<&Block> {
        self.statements.get(name)
    }

    /// Iterates this block and every block chained after it through `next`.
    pub fn chain(&self) -> impl Iterator<Item = &Block> {
        std::iter::successors(Some(self), |block| block.next.as_deref())
    }

    /// Number of blocks in this subtree, nested children and `next` chain included.
    pub fn count(&self) -> usize {
        self.chain()
            .map(|block| {
                1 + block.values.values().map(Block::count).sum::<usize>()
                    + block.statements.values().map(Block::count).sum::<usize>()
            })
            .sum()
    }

    fn assign_ids(&mut self, next_id: &mut u64) {
        if self.id.is_empty() {
            *next_id += 1;
            self.id = format!("b{}", next_id);
        }
        for child in self.values.values_mut() {
            child.assign_ids(next_id);
        }
        for child in self.statements.values_mut() {
            child.assign_ids(next_id);
        }
        if let Some(next) = self.next.as_mut() {
            next.assign_ids(next_id);
        }
    }
}

/// A declared workspace variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub id: String,
    pub name: String,
}

/// Ordered top-level block chains plus declared variables.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Workspace {
    blocks: Vec<Block>,
    variables: Vec<Variable>,
    next_id: u64,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// A workspace holding the starter block the editor shows for `level`.
    pub fn starter(level: Level) -> Self {
        let mut workspace = Self::new();
        let block = match level {
            Level::Genel => Block::new("hello_world"),
            _ => Block::number(5.0),
        };
        workspace.add_block(block.at(50.0, 50.0));
        workspace
    }

    /// Adds a top-level chain. Blocks without an id receive a generated one.
    pub fn add_block(&mut self, mut block: Block) -> &Block {
        block.assign_ids(&mut self.next_id);
        self.blocks.push(block);
        let last = self.blocks.len() - 1;
        &self.blocks[last]
    }

    /// Declares a variable, returning its id. Declaring an existing name is a no-op.
    pub fn add_variable(&mut self, name: &str) -> String {
        if let Some(existing) = self.variables.iter().find(|v| v.name == name) {
            return existing.id.clone();
        }
        self.next_id += 1;
        let id = format!("v{}", self.next_id);
        self.variables.push(Variable {
            id: id.clone(),
            name: name.to_string(),
        });
        id
    }

    pub fn top_blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable_names(&self) -> Vec<String> {
        self.variables.iter().map(|v| v.name.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn block_count(&self) -> usize {
        self.blocks.iter().map(Block::count).sum()
    }

    pub fn clear(&mut self) {
        self.blocks.clear();
        self.variables.clear();
    }

    /// Checks every connection against the catalog's slot declarations.
    pub fn validate(&self, catalog: &BlockCatalog) -> Vec<ConnectionError> {
        let mut errors = Vec::new();
        for head in &self.blocks {
            for block in head.chain() {
                validate_block(block, catalog, &mut errors);
            }
        }
        errors
    }

    /// Serializes the workspace as a Blockly XML document.
    pub fn to_xml(&self) -> Result<String, WorkspaceError> {
        xml::write_workspace(self)
    }

    /// Parses a Blockly XML document into a new workspace.
    pub fn from_xml(source: &str) -> Result<Self, WorkspaceError> {
        let (blocks, variables) = xml::read_workspace(source)?;
        let mut workspace = Self {
            blocks: Vec::new(),
            variables,
            next_id: 0,
        };
        for block in blocks {
            workspace.add_block(block);
        }
        Ok(workspace)
    }

    /// Replaces this workspace with the one described by `source`.
    pub fn load_xml(&mut self, source: &str) -> Result<(), WorkspaceError> {
        *self = Self::from_xml(source)?;
        Ok(())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), WorkspaceError> {
        fs::write(path, self.to_xml()?)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, WorkspaceError> {
        let source = fs::read_to_string(path)?;
        Self::from_xml(&source)
    }
}

fn validate_block(block: &Block, catalog: &BlockCatalog, errors: &mut Vec<ConnectionError>) {
    let Some(definition) = catalog.get(&block.block_type) else {
        errors.push(ConnectionError::UnknownBlockType {
            block_id: block.id.clone(),
            block_type: block.block_type.clone(),
        });
        return;
    };

    for (slot, child) in &block.values {
        match definition.slot(slot).map(|s| &s.kind) {
            Some(SlotKind::Value { check, .. }) => match catalog.get(&child.block_type) {
                Some(child_def) => match child_def.shape {
                    BlockShape::Output(found) | BlockShape::Flexible(found)
                        if !check.accepts(found) =>
                    {
                        errors.push(ConnectionError::IncompatibleType {
                            block_id: block.id.clone(),
                            slot: slot.clone(),
                            expected: check.to_string(),
                            found: found.to_string(),
                        })
                    }
                    BlockShape::Statement => errors.push(ConnectionError::NotAnExpression {
                        block_id: block.id.clone(),
                        slot: slot.clone(),
                        child_id: child.id.clone(),
                    }),
                    _ => {}
                },
                None => {}
            },
            _ => errors.push(ConnectionError::UnknownSlot {
                block_id: block.id.clone(),
                block_type: block.block_type.clone(),
                slot: slot.clone(),
            }),
        }
        validate_block(child, catalog, errors);
    }

    for (slot, child) in &block.statements {
        if !matches!(definition.slot(slot).map(|s| &s.kind), Some(SlotKind::Statement)) {
            errors.push(ConnectionError::UnknownSlot {
                block_id: block.id.clone(),
                block_type: block.block_type.clone(),
                slot: slot.clone(),
            });
        }
        for chained in child.chain() {
            check_statement_shape(block, slot, chained, catalog, errors);
            validate_block(chained, catalog, errors);
        }
    }

    if let Some(next) = block.next.as_deref() {
        check_statement_shape(block, "next", next, catalog, errors);
    }
}

fn check_statement_shape(
    parent: &Block,
    slot: &str,
    child: &Block,
    catalog: &BlockCatalog,
    errors: &mut Vec<ConnectionError>,
) {
    if let Some(BlockShape::Output(_)) = catalog.get(&child.block_type).map(|d| d.shape) {
        errors.push(ConnectionError::NotAStatement {
            block_id: parent.id.clone(),
            slot: slot.to_string(),
            child_id: child.id.clone(),
        });
    }
}
