use crate::ast::Value;
use thiserror::Error;

/// Errors that can occur while turning a workspace into a program.
#[derive(Error, Debug, Clone)]
pub enum CompileError {
    #[error("Block '{block_id}' has type '{block_type}', which has no generator for this level")]
    MissingGenerator { block_id: String, block_type: String },

    #[error("Block '{block_id}' of type '{block_type}' is a statement block but was used as a value")]
    ExpectedExpression { block_id: String, block_type: String },

    #[error("Block '{block_id}' has an invalid value '{value}' in field '{field}'")]
    InvalidField {
        block_id: String,
        field: String,
        value: String,
    },

    #[error(transparent)]
    Connection(#[from] ConnectionError),
}

/// Connection rule violations found when validating a workspace against a catalog.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConnectionError {
    #[error("Block '{block_id}' has unknown type '{block_type}'")]
    UnknownBlockType { block_id: String, block_type: String },

    #[error(
        "Slot '{slot}' of block '{block_id}' accepts {expected}, but a block producing {found} is connected"
    )]
    IncompatibleType {
        block_id: String,
        slot: String,
        expected: String,
        found: String,
    },

    #[error("Block '{child_id}' has no output and cannot fill value slot '{slot}' of block '{block_id}'")]
    NotAnExpression {
        block_id: String,
        slot: String,
        child_id: String,
    },

    #[error("Block '{child_id}' has an output and cannot be chained into '{slot}' of block '{block_id}'")]
    NotAStatement {
        block_id: String,
        slot: String,
        child_id: String,
    },

    #[error("Block '{block_id}' of type '{block_type}' has no slot named '{slot}'")]
    UnknownSlot {
        block_id: String,
        block_type: String,
        slot: String,
    },
}

/// Errors raised while running a program. The executor turns these into a single output line.
#[derive(Error, Debug, Clone)]
pub enum RuntimeError {
    #[error("{0} is not defined")]
    UndefinedVariable(String),

    #[error(
        "Type mismatch during operation '{operation}': expected {expected}, but found value '{found}'"
    )]
    TypeMismatch {
        operation: String,
        expected: String,
        found: Value,
    },

    #[error("Cannot read properties of {found} (reading '{index}')")]
    InvalidIndex { found: String, index: String },

    #[error("Invalid array length")]
    InvalidArrayLength,

    #[error("Illegal {0} statement")]
    IllegalLoopControl(&'static str),

    #[error("Cannot read '{source_text}' as a function of x: {reason}")]
    InvalidFunction { source_text: String, reason: String },
}

/// Errors from loading or saving a workspace document.
#[derive(Error, Debug)]
pub enum WorkspaceError {
    #[error("Failed to parse workspace XML: {0}")]
    Xml(#[from] xmltree::ParseError),

    #[error("Failed to write workspace XML: {0}")]
    XmlWrite(#[from] xmltree::Error),

    #[error("Element <{element}> is missing the required '{attribute}' attribute")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },

    #[error("Workspace XML root must be <xml>, found <{0}>")]
    UnexpectedRoot(String),

    #[error("Workspace I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from loading an editor configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Errors from writing a rendered visualization.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to write SVG: {0}")]
    Svg(#[from] xmltree::Error),

    #[error("Failed to save SVG file: {0}")]
    Io(#[from] std::io::Error),
}
