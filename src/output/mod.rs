//! Routes what a run produced into display state: the output lines and the current drawing.

use crate::ast::{Program, ShapeKind, Value};
use crate::interpreter::{Bindings, ExecutionResult, Executor};
use log::{debug, warn};

mod payload;

pub use payload::{NamedValues, ShapePayload, Visualization};

/// Data shown when a chart call supplies nothing readable.
pub const FALLBACK_CHART_DATA: [f64; 5] = [1.0, 2.0, 3.0, 4.0, 5.0];

/// Holds the displayed output lines and the current visualization between runs.
#[derive(Debug, Default)]
pub struct OutputRouter {
    lines: Vec<String>,
    current: Option<Visualization>,
    pending: Option<Visualization>,
}

impl OutputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes `program` with this router as its drawing bindings and applies the result.
    pub fn route(&mut self, executor: &Executor, program: &Program) -> &[String] {
        self.pending = None;
        let result = executor.execute(program, self);
        self.apply(result);
        &self.lines
    }

    /// Replaces the displayed lines with `result` and makes the last drawing of the run
    /// current. A drawing made before a runtime error still counts.
    pub fn apply(&mut self, result: ExecutionResult) {
        self.lines = result.into_lines();
        if let Some(visualization) = self.pending.take() {
            debug!("Current visualization is now '{}'", visualization.tag());
            self.current = Some(visualization);
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn visualization(&self) -> Option<&Visualization> {
        self.current.as_ref()
    }

    /// Forgets the output lines and the current visualization.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.current = None;
        self.pending = None;
    }
}

impl Bindings for OutputRouter {
    fn draw_shape(&mut self, kind: ShapeKind, payload: ShapePayload) {
        self.pending = Some(Visualization::shape(kind, payload));
    }

    fn draw_chart(&mut self, kind: &str, data: &Value) {
        self.pending = Some(Visualization::Chart {
            chart_type: kind.to_string(),
            data: chart_data(data),
        });
    }

    fn draw_function(&mut self, expression: &str) {
        self.pending = Some(Visualization::Function {
            expression: expression.to_string(),
        });
    }
}

/// Reads chart data as a JSON number array once double quotes are stripped.
pub fn chart_data(data: &Value) -> Vec<f64> {
    if let Value::List(_) = data {
        return data.as_number_list();
    }
    let text = data.to_string().replace('"', "");
    match serde_json::from_str::<Vec<f64>>(&text) {
        Ok(values) => values,
        Err(e) => {
            warn!("Chart data '{}' is not a number array ({}), using sample data", text, e);
            FALLBACK_CHART_DATA.to_vec()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_data_parses_json_arrays() {
        assert_eq!(chart_data(&Value::from("[3, 5, 2]")), vec![3.0, 5.0, 2.0]);
        assert_eq!(chart_data(&Value::from("\"[1,2]\"")), vec![1.0, 2.0]);
        assert_eq!(chart_data(&Value::from(vec![4.0, 8.0])), vec![4.0, 8.0]);
    }

    #[test]
    fn unreadable_chart_data_falls_back() {
        assert_eq!(chart_data(&Value::from("3,5,2")), FALLBACK_CHART_DATA.to_vec());
        assert_eq!(chart_data(&Value::Null), FALLBACK_CHART_DATA.to_vec());
    }
}
