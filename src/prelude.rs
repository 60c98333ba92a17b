//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the blokmat crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use blokmat::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let workspace = Workspace::load("path/to/workspace.xml")?;
//!
//! let compiler = Compiler::new(Level::Ortaokul);
//! let program = compiler.compile(&workspace)?;
//!
//! let mut router = OutputRouter::new();
//! for line in router.route(&Executor::new(), &program) {
//!     println!("{}", line);
//! }
//! # Ok(())
//! # }
//! ```

// Editor session
pub use crate::config::EditorConfig;
pub use crate::editor::Editor;

// Blocks and compilation
pub use crate::catalog::{BlockCatalog, BlockDefinition, Level};
pub use crate::compiler::{BlockGenerator, Compiler, GenContext, Generated};
pub use crate::workspace::{Block, Workspace};

// Programs and execution
pub use crate::ast::{Expression, Program, Statement, Value};
pub use crate::interpreter::{Bindings, ExecutionResult, Executor, NoDrawing};

// Output and rendering
pub use crate::output::{OutputRouter, ShapePayload, Visualization};
pub use crate::render::{DrawingSurface, RecordingSurface, SvgSurface, render};

// Error types
pub use crate::error::{
    CompileError, ConfigError, ConnectionError, RenderError, RuntimeError, WorkspaceError,
};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
