use super::{Compiler, MAX_ITEM_SLOTS};
use crate::ast::{Expression, Statement};
use crate::catalog::BlockDefinition;
use crate::error::CompileError;
use crate::workspace::Block;

/// Accessors a generator uses to read its block: connected children, fields and
/// statement inputs, with catalog defaults filling anything left empty.
pub struct GenContext<'a> {
    compiler: &'a Compiler,
    block: &'a Block,
    definition: Option<&'a BlockDefinition>,
}

impl<'a> GenContext<'a> {
    pub(super) fn new(
        compiler: &'a Compiler,
        block: &'a Block,
        definition: Option<&'a BlockDefinition>,
    ) -> Self {
        Self {
            compiler,
            block,
            definition,
        }
    }

    pub fn block(&self) -> &Block {
        self.block
    }

    pub fn block_id(&self) -> &str {
        &self.block.id
    }

    pub fn has_value(&self, name: &str) -> bool {
        self.block.values.contains_key(name)
    }

    /// Expression of the block connected to `name`, or the slot's default literal.
    /// Slots the catalog does not know default to `0`.
    pub fn value(&self, name: &str) -> Result<Expression, CompileError> {
        match self.block.value(name) {
            Some(child) => self.compiler.compile_expression(child),
            None => Ok(self
                .definition
                .and_then(|d| d.default_value(name))
                .map(|value| Expression::Literal(value.clone()))
                .unwrap_or_else(|| Expression::num(0.0))),
        }
    }

    /// Expression of the connected block, or `fallback` when the slot is empty.
    pub fn value_or(&self, name: &str, fallback: Expression) -> Result<Expression, CompileError> {
        match self.block.value(name) {
            Some(child) => self.compiler.compile_expression(child),
            None => Ok(fallback),
        }
    }

    /// Field text, falling back to the catalog default and then to an empty string.
    pub fn field(&self, name: &str) -> String {
        self.block
            .field(name)
            .or_else(|| self.definition.and_then(|d| d.default_field(name)))
            .unwrap_or_default()
            .to_string()
    }

    /// Field parsed as a number; unparseable text reads as `0`.
    pub fn field_number(&self, name: &str) -> f64 {
        self.field(name).trim().parse::<f64>().unwrap_or(0.0)
    }

    /// Statements of the chain connected to a statement input; empty when nothing is attached.
    pub fn statements(&self, name: &str) -> Result<Vec<Statement>, CompileError> {
        match self.block.statement(name) {
            Some(head) => self.compiler.compile_chain(head),
            None => Ok(Vec::new()),
        }
    }

    /// Mutation attribute parsed as a count, as used by `controls_if` and list/text joins.
    pub fn mutation_count(&self, name: &str) -> usize {
        self.block
            .mutation
            .get(name)
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(0)
            .min(MAX_ITEM_SLOTS)
    }

    /// Error for a dropdown holding a value its generator does not know.
    pub fn invalid_field(&self, field: &str) -> CompileError {
        CompileError::InvalidField {
            block_id: self.block.id.clone(),
            field: field.to_string(),
            value: self.field(field),
        }
    }
}
