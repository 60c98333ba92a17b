use crate::ast::{Program, ShapeKind, Value};
use crate::error::RuntimeError;
use crate::output::ShapePayload;
use log::{debug, info};

mod builtins;
mod engine;
mod function;

pub use function::RealFunction;

/// Shown instead of running an empty program.
pub const EMPTY_WORKSPACE_MESSAGE: &str =
    "⚠️ Workspace boş! Lütfen blokları kullanarak bir program oluşturun.";

/// Shown when a program ran without error but logged nothing.
pub const NO_OUTPUT_MESSAGE: &str = "✅ Kod başarıyla çalıştırıldı! (Çıktı yok)";

pub const ERROR_PREFIX: &str = "❌ Hata: ";
pub const ALERT_PREFIX: &str = "🔔 Uyarı: ";

/// Largest list a program may create or grow to; longer requests fail with
/// [`RuntimeError::InvalidArrayLength`].
pub const MAX_LIST_LENGTH: f64 = 1_000_000.0;

/// Drawing callbacks a running program may invoke. Every method defaults to doing nothing,
/// so a host only implements the surfaces it has.
pub trait Bindings {
    fn draw_shape(&mut self, _kind: ShapeKind, _payload: ShapePayload) {}
    fn draw_chart(&mut self, _kind: &str, _data: &Value) {}
    fn draw_function(&mut self, _expression: &str) {}
}

/// Bindings that ignore every drawing call.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDrawing;

impl Bindings for NoDrawing {}

/// Outcome of one run: the output lines, or the error that stopped the program.
#[derive(Debug, Clone)]
pub enum ExecutionResult {
    Lines(Vec<String>),
    Failed(RuntimeError),
}

impl ExecutionResult {
    pub fn is_error(&self) -> bool {
        matches!(self, ExecutionResult::Failed(_))
    }

    /// Lines to display. A failure becomes a single `❌ Hata:` line.
    pub fn lines(&self) -> Vec<String> {
        match self {
            ExecutionResult::Lines(lines) => lines.clone(),
            ExecutionResult::Failed(error) => vec![format!("{}{}", ERROR_PREFIX, error)],
        }
    }

    pub fn into_lines(self) -> Vec<String> {
        match self {
            ExecutionResult::Lines(lines) => lines,
            failed => failed.lines(),
        }
    }
}

/// Runs generated programs. Holds no state between runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct Executor;

impl Executor {
    pub fn new() -> Self {
        Self
    }

    /// Runs `program` in a fresh scope. Runtime errors are caught and returned, never propagated.
    pub fn execute(&self, program: &Program, bindings: &mut dyn Bindings) -> ExecutionResult {
        if program.is_empty() {
            debug!("Program has no statements, skipping execution");
            return ExecutionResult::Lines(vec![EMPTY_WORKSPACE_MESSAGE.to_string()]);
        }

        let result = engine::Engine::new(bindings).run(program);
        match result {
            Ok(lines) if lines.is_empty() => {
                info!("Program finished without output");
                ExecutionResult::Lines(vec![NO_OUTPUT_MESSAGE.to_string()])
            }
            Ok(lines) => {
                info!("Program finished with {} output line(s)", lines.len());
                ExecutionResult::Lines(lines)
            }
            Err(error) => {
                info!("Program failed: {}", error);
                ExecutionResult::Failed(error)
            }
        }
    }
}
