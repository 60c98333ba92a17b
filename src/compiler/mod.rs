use crate::ast::{Expression, Program, ShapeCall, ShapeKind, Statement};
use crate::catalog::{BlockCatalog, BlockDefinition, BlockGroup, Level};
use crate::error::{CompileError, ConnectionError};
use crate::workspace::{Block, Workspace};
use ahash::AHashMap;
use itertools::Itertools;
use log::{debug, info};

/// Generates registration and lookup functions for a list of `"block_type" => generator_fn` pairs.
macro_rules! define_block_generators {
    ( $( $block_type:literal => $generate:path ),* $(,)? ) => {
        // 1. Register every generator of this group
        pub(super) fn register(registry: &mut ahash::AHashMap<String, Box<dyn BlockGenerator>>) {
            $( registry.insert($block_type.to_string(), Box::new(FnGenerator::new($block_type, $generate))); )*
        }

        // 2. Create a generator by its block type
        pub(super) fn create_by_name(name: &str) -> Option<Box<dyn BlockGenerator>> {
            match name {
                $( $block_type => Some(Box::new(FnGenerator::new($block_type, $generate))), )*
                _ => None,
            }
        }
    };
}

mod common;
mod context;
mod genel;
mod ilkokul;
mod lise;
mod ortaokul;
mod standard;

pub use context::GenContext;

/// Upper bound on the numbered slots (`ADD<N>`, `IF<N>`) a single block may carry.
pub const MAX_ITEM_SLOTS: usize = 1024;

/// What a generator produced for one block.
#[derive(Debug, Clone, PartialEq)]
pub enum Generated {
    Statements(Vec<Statement>),
    Expression(Expression),
}

impl Generated {
    pub fn statement(statement: Statement) -> Self {
        Generated::Statements(vec![statement])
    }
}

impl From<Expression> for Generated {
    fn from(expression: Expression) -> Self {
        Generated::Expression(expression)
    }
}

impl From<Statement> for Generated {
    fn from(statement: Statement) -> Self {
        Generated::statement(statement)
    }
}

/// A `drawShape` call followed by one log line that reports the `summary` entries of the
/// calculation to two decimals, e.g. `Daire: Alan = 11309.73, Çevre = 376.99`.
pub(crate) fn draw_and_calculate(
    kind: ShapeKind,
    shape: &str,
    params: Vec<(&str, Expression)>,
    label: Expression,
    calculation: Vec<(&str, Expression)>,
    title: &str,
    summary: &[(&str, &str)],
) -> Generated {
    let mut parts = Vec::new();
    for (i, (caption, key)) in summary.iter().enumerate() {
        let prefix = if i == 0 {
            format!("{}: {} = ", title, caption)
        } else {
            format!(", {} = ", caption)
        };
        parts.push(Expression::text(prefix));
        if let Some((_, value)) = calculation.iter().find(|(k, _)| k == key) {
            parts.push(value.clone().to_fixed(2));
        }
    }

    let owned = |pairs: Vec<(&str, Expression)>| {
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect::<Vec<_>>()
    };
    let call = ShapeCall {
        kind,
        shape: shape.to_string(),
        params: owned(params),
        label,
        calculation: owned(calculation),
    };
    Generated::Statements(vec![
        Statement::DrawShape(call),
        Statement::Log(vec![Expression::concat(parts)]),
    ])
}

/// Defines the contract for turning one block type into program fragments.
pub trait BlockGenerator: Send + Sync {
    fn block_type(&self) -> &str;
    fn generate(&self, ctx: &GenContext<'_>) -> Result<Generated, CompileError>;
}

/// Result type shared by all generator functions.
pub(crate) type GenResult = Result<Generated, CompileError>;

type GenerateFn = fn(&GenContext<'_>) -> GenResult;

/// A generator backed by a plain function.
pub(crate) struct FnGenerator {
    block_type: &'static str,
    generate: GenerateFn,
}

impl FnGenerator {
    pub(crate) fn new(block_type: &'static str, generate: GenerateFn) -> Self {
        Self {
            block_type,
            generate,
        }
    }
}

impl BlockGenerator for FnGenerator {
    fn block_type(&self) -> &str {
        self.block_type
    }

    fn generate(&self, ctx: &GenContext<'_>) -> Result<Generated, CompileError> {
        (self.generate)(ctx)
    }
}

fn register_group(group: BlockGroup, registry: &mut AHashMap<String, Box<dyn BlockGenerator>>) {
    match group {
        BlockGroup::Standard => standard::register(registry),
        BlockGroup::Genel => genel::register(registry),
        BlockGroup::Common => common::register(registry),
        BlockGroup::Ilkokul => ilkokul::register(registry),
        BlockGroup::Ortaokul => ortaokul::register(registry),
        BlockGroup::Lise => lise::register(registry),
    }
}

fn create_generator_by_name(name: &str) -> Option<Box<dyn BlockGenerator>> {
    standard::create_by_name(name)
        .or_else(|| genel::create_by_name(name))
        .or_else(|| common::create_by_name(name))
        .or_else(|| ilkokul::create_by_name(name))
        .or_else(|| ortaokul::create_by_name(name))
        .or_else(|| lise::create_by_name(name))
}

/// Turns workspaces into programs for one editor level. Read-only once built.
pub struct Compiler {
    level: Level,
    catalog: BlockCatalog,
    registry: AHashMap<String, Box<dyn BlockGenerator>>,
}

pub struct CompilerBuilder {
    level: Level,
    catalog: BlockCatalog,
    registry: AHashMap<String, Box<dyn BlockGenerator>>,
}

impl CompilerBuilder {
    pub fn new(level: Level) -> Self {
        let mut registry: AHashMap<String, Box<dyn BlockGenerator>> = AHashMap::new();
        for group in level.groups() {
            register_group(*group, &mut registry);
        }
        Self {
            level,
            catalog: BlockCatalog::for_level(level),
            registry,
        }
    }

    /// Makes `user_type_name` behave like the built-in block `builtin_type_name`,
    /// which may belong to any level.
    pub fn with_type_mapping(mut self, user_type_name: &str, builtin_type_name: &str) -> Self {
        if let Some(generator) = create_generator_by_name(builtin_type_name) {
            self.registry.insert(user_type_name.to_string(), generator);
        }
        self
    }

    pub fn with_custom_generator(mut self, generator: Box<dyn BlockGenerator>) -> Self {
        self.registry
            .insert(generator.block_type().to_string(), generator);
        self
    }

    /// Registers a custom generator together with the block's shape, so its slots get defaults
    /// and its connections are checked.
    pub fn with_custom_block(
        mut self,
        definition: BlockDefinition,
        generator: Box<dyn BlockGenerator>,
    ) -> Self {
        self.catalog.insert(definition);
        self.with_custom_generator(generator)
    }

    pub fn build(self) -> Compiler {
        Compiler {
            level: self.level,
            catalog: self.catalog,
            registry: self.registry,
        }
    }
}

impl Compiler {
    pub fn builder(level: Level) -> CompilerBuilder {
        CompilerBuilder::new(level)
    }

    /// A compiler with the default generators of `level`.
    pub fn new(level: Level) -> Self {
        Self::builder(level).build()
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn catalog(&self) -> &BlockCatalog {
        &self.catalog
    }

    pub fn has_generator(&self, block_type: &str) -> bool {
        self.registry.contains_key(block_type)
    }

    /// Block types with a registered generator, sorted.
    pub fn block_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.registry.keys().map(|k| k.as_str()).collect();
        types.sort_unstable();
        types
    }

    /// Assembles the program for `workspace`: top-level chains in insertion order,
    /// each chain followed through its `next` links.
    pub fn compile(&self, workspace: &Workspace) -> Result<Program, CompileError> {
        for head in workspace.top_blocks() {
            for block in head.chain() {
                self.check_generators(block)?;
            }
        }

        // Blocks with a custom generator but no catalog entry are not checked.
        if let Some(error) = workspace
            .validate(&self.catalog)
            .into_iter()
            .find(|e| !matches!(e, ConnectionError::UnknownBlockType { .. }))
        {
            return Err(error.into());
        }

        let mut statements = Vec::new();
        for head in workspace.top_blocks() {
            statements.extend(self.compile_chain(head)?);
        }

        let mut variables = workspace.variable_names();
        for head in workspace.top_blocks() {
            self.collect_variables(head, &mut variables);
        }

        info!(
            "Compiled {} block(s) into {} top-level statement(s) for level '{}'",
            workspace.block_count(),
            statements.len(),
            self.level
        );
        Ok(Program {
            variables,
            statements,
        })
    }

    fn check_generators(&self, block: &Block) -> Result<(), CompileError> {
        if !self.registry.contains_key(&block.block_type) {
            return Err(CompileError::MissingGenerator {
                block_id: block.id.clone(),
                block_type: block.block_type.clone(),
            });
        }
        for child in block.values.values() {
            self.check_generators(child)?;
        }
        for child in block.statements.values() {
            for chained in child.chain() {
                self.check_generators(chained)?;
            }
        }
        Ok(())
    }

    fn generate(&self, block: &Block) -> Result<Generated, CompileError> {
        let generator =
            self.registry
                .get(&block.block_type)
                .ok_or_else(|| CompileError::MissingGenerator {
                    block_id: block.id.clone(),
                    block_type: block.block_type.clone(),
                })?;
        let definition = self.definition_for(block);
        debug!("Generating block '{}' ({})", block.id, block.block_type);
        generator.generate(&GenContext::new(self, block, definition))
    }

    /// Catalog shape of `block`, falling back to the shape of the block its generator was
    /// registered for when the type is mapped.
    fn definition_for(&self, block: &Block) -> Option<&BlockDefinition> {
        self.catalog.get(&block.block_type).or_else(|| {
            self.registry
                .get(&block.block_type)
                .and_then(|generator| self.catalog.get(generator.block_type()))
        })
    }

    /// Names every `VAR` field refers to, including the catalog default of an unset field.
    fn collect_variables(&self, head: &Block, variables: &mut Vec<String>) {
        for block in head.chain() {
            let name = block.field("VAR").or_else(|| {
                self.definition_for(block)
                    .and_then(|definition| definition.default_field("VAR"))
            });
            if let Some(name) = name {
                if !name.is_empty() && !variables.iter().any(|v| v == name) {
                    variables.push(name.to_string());
                }
            }
            for (_, child) in block.values.iter().sorted_by(|a, b| a.0.cmp(b.0)) {
                self.collect_variables(child, variables);
            }
            for (_, child) in block.statements.iter().sorted_by(|a, b| a.0.cmp(b.0)) {
                self.collect_variables(child, variables);
            }
        }
    }

    /// Statements for `head` and every block chained after it.
    pub(crate) fn compile_chain(&self, head: &Block) -> Result<Vec<Statement>, CompileError> {
        let mut statements = Vec::new();
        for block in head.chain() {
            match self.generate(block)? {
                Generated::Statements(generated) => statements.extend(generated),
                Generated::Expression(expression) => {
                    statements.push(Statement::Expression(expression))
                }
            }
        }
        Ok(statements)
    }

    pub(crate) fn compile_expression(&self, block: &Block) -> Result<Expression, CompileError> {
        match self.generate(block)? {
            Generated::Expression(expression) => Ok(expression),
            Generated::Statements(_) => Err(CompileError::ExpectedExpression {
                block_id: block.id.clone(),
                block_type: block.block_type.clone(),
            }),
        }
    }
}
