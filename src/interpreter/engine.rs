use super::{ALERT_PREFIX, Bindings, MAX_LIST_LENGTH, builtins};
use crate::ast::{
    BinaryOp, Expression, Program, ShapeCall, Statement, UnaryOp, Value, format_number,
};
use crate::error::RuntimeError;
use crate::output::{NamedValues, ShapePayload};
use ahash::AHashMap;
use itertools::Itertools;
use log::debug;
use std::cmp::Ordering;

// This macro generates a match arm for a binary operation.
macro_rules! eval_op {
    ($self:ident, $l:ident, $r:ident, $op_fn:expr, number) => {
        $self.eval_arithmetic($l, $r, $op_fn)
    };
    ($self:ident, $l:ident, $r:ident, $op_fn:expr, ordering) => {
        $self.eval_comparison($l, $r, $op_fn)
    };
}

/// How a block of statements finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Normal,
    Break,
    Continue,
}

/// Tree-walking interpreter for one run of a program.
pub(super) struct Engine<'a> {
    scope: AHashMap<String, Value>,
    bindings: &'a mut dyn Bindings,
    lines: Vec<String>,
}

impl<'a> Engine<'a> {
    pub(super) fn new(bindings: &'a mut dyn Bindings) -> Self {
        Self {
            scope: AHashMap::new(),
            bindings,
            lines: Vec::new(),
        }
    }

    /// Runs the whole program and returns the collected output lines.
    pub(super) fn run(mut self, program: &Program) -> Result<Vec<String>, RuntimeError> {
        check_loop_control(&program.statements, false)?;
        for name in &program.variables {
            self.scope.insert(name.clone(), Value::Null);
        }
        debug!(
            "Running program with {} statement(s) and {} variable(s)",
            program.statements.len(),
            program.variables.len()
        );
        self.execute_block(&program.statements)?;
        Ok(self.lines)
    }

    fn execute_block(&mut self, statements: &[Statement]) -> Result<Flow, RuntimeError> {
        for statement in statements {
            let flow = self.execute(statement)?;
            if flow != Flow::Normal {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal)
    }

    fn execute(&mut self, statement: &Statement) -> Result<Flow, RuntimeError> {
        match statement {
            Statement::Log(args) => {
                let values = args
                    .iter()
                    .map(|arg| self.evaluate(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                self.lines
                    .push(values.iter().map(Value::to_join_string).join(" "));
            }
            Statement::Alert(message) => {
                let message = self.evaluate(message)?;
                self.lines.push(format!("{}{}", ALERT_PREFIX, message));
            }
            Statement::DrawShape(call) => {
                let payload = self.shape_payload(call)?;
                debug!("drawShape({}, {})", call.kind.tag(), payload.shape);
                self.bindings.draw_shape(call.kind, payload);
            }
            Statement::DrawChart { kind, data } => {
                let data = self.evaluate(data)?;
                self.bindings.draw_chart(kind, &data);
            }
            Statement::DrawFunction(expression) => {
                let expression = self.evaluate(expression)?.to_string();
                self.bindings.draw_function(&expression);
            }
            Statement::Assign { name, value } => {
                let value = self.evaluate(value)?;
                self.scope.insert(name.clone(), value);
            }
            Statement::SetIndex {
                list,
                index,
                value,
                insert,
            } => {
                let index = self.evaluate(index)?.to_number();
                let value = self.evaluate(value)?;
                self.set_index(list, index, value, *insert)?;
            }
            Statement::If {
                branches,
                otherwise,
            } => {
                for (condition, body) in branches {
                    if self.evaluate(condition)?.truthy() {
                        return self.execute_block(body);
                    }
                }
                if let Some(body) = otherwise {
                    return self.execute_block(body);
                }
            }
            Statement::Repeat { times, body } => {
                let times = self.evaluate(times)?.to_number();
                let mut count = 0.0;
                while count < times {
                    if self.execute_block(body)? == Flow::Break {
                        break;
                    }
                    count += 1.0;
                }
            }
            Statement::While {
                condition,
                until,
                body,
            } => {
                while self.evaluate(condition)?.truthy() != *until {
                    if self.execute_block(body)? == Flow::Break {
                        break;
                    }
                }
            }
            Statement::For {
                variable,
                from,
                to,
                step,
                body,
            } => {
                let from = self.evaluate(from)?.to_number();
                let to = self.evaluate(to)?.to_number();
                let mut step = self.evaluate(step)?.to_number().abs();
                if from > to {
                    step = -step;
                }
                self.scope.insert(variable.clone(), Value::Number(from));
                loop {
                    let current = self.variable(variable)?.to_number();
                    let inside = if step >= 0.0 { current <= to } else { current >= to };
                    if !inside {
                        break;
                    }
                    if self.execute_block(body)? == Flow::Break {
                        break;
                    }
                    let current = self.variable(variable)?.to_number();
                    self.scope
                        .insert(variable.clone(), Value::Number(current + step));
                }
            }
            Statement::ForEach {
                variable,
                list,
                body,
            } => {
                let items = match self.evaluate(list)? {
                    Value::List(items) => items,
                    Value::Text(text) => text.chars().map(|c| Value::Text(c.to_string())).collect(),
                    _ => Vec::new(),
                };
                for item in items {
                    self.scope.insert(variable.clone(), item);
                    if self.execute_block(body)? == Flow::Break {
                        break;
                    }
                }
            }
            Statement::Break => return Ok(Flow::Break),
            Statement::Continue => return Ok(Flow::Continue),
            Statement::Expression(expression) => {
                self.evaluate(expression)?;
            }
        }
        Ok(Flow::Normal)
    }

    fn evaluate(&mut self, expr: &Expression) -> Result<Value, RuntimeError> {
        match expr {
            Expression::Literal(value) => Ok(value.clone()),
            Expression::Constant(constant) => Ok(Value::Number(constant.value())),
            Expression::Variable(name) => self.variable(name),
            Expression::List(items) => Ok(Value::List(
                items
                    .iter()
                    .map(|item| self.evaluate(item))
                    .collect::<Result<_, _>>()?,
            )),

            // --- Unary Operations ---
            Expression::Unary(UnaryOp::Negate, operand) => {
                Ok(Value::Number(-self.evaluate(operand)?.to_number()))
            }
            Expression::Unary(UnaryOp::Not, operand) => {
                Ok(Value::Bool(!self.evaluate(operand)?.truthy()))
            }

            // --- Arithmetic Operations ---
            Expression::Binary(BinaryOp::Add, l, r) => self.eval_add(l, r),
            Expression::Binary(BinaryOp::Subtract, l, r) => {
                eval_op!(self, l, r, |a, b| a - b, number)
            }
            Expression::Binary(BinaryOp::Multiply, l, r) => {
                eval_op!(self, l, r, |a, b| a * b, number)
            }
            Expression::Binary(BinaryOp::Divide, l, r) => {
                eval_op!(self, l, r, |a, b| a / b, number)
            }
            Expression::Binary(BinaryOp::Modulo, l, r) => {
                eval_op!(self, l, r, |a, b| a % b, number)
            }

            // --- Comparison Operations ---
            Expression::Binary(BinaryOp::Less, l, r) => {
                eval_op!(self, l, r, |o| o == Ordering::Less, ordering)
            }
            Expression::Binary(BinaryOp::LessEqual, l, r) => {
                eval_op!(self, l, r, |o| o != Ordering::Greater, ordering)
            }
            Expression::Binary(BinaryOp::Greater, l, r) => {
                eval_op!(self, l, r, |o| o == Ordering::Greater, ordering)
            }
            Expression::Binary(BinaryOp::GreaterEqual, l, r) => {
                eval_op!(self, l, r, |o| o != Ordering::Less, ordering)
            }

            // --- Equality ---
            Expression::Binary(BinaryOp::Equal, l, r) => {
                let (left, right) = (self.evaluate(l)?, self.evaluate(r)?);
                Ok(Value::Bool(left.loose_eq(&right)))
            }
            Expression::Binary(BinaryOp::NotEqual, l, r) => {
                let (left, right) = (self.evaluate(l)?, self.evaluate(r)?);
                Ok(Value::Bool(!left.loose_eq(&right)))
            }

            // --- Logical Operations ---
            // Both yield one of their operands, not a coerced boolean.
            Expression::Binary(BinaryOp::And, l, r) => {
                let left = self.evaluate(l)?;
                if !left.truthy() {
                    return Ok(left);
                }
                self.evaluate(r)
            }
            Expression::Binary(BinaryOp::Or, l, r) => {
                let left = self.evaluate(l)?;
                if left.truthy() {
                    return Ok(left);
                }
                self.evaluate(r)
            }

            // --- Other Operations ---
            Expression::Call(builtin, args) => {
                let args = args
                    .iter()
                    .map(|arg| self.evaluate(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                builtins::call(*builtin, &args)
            }
            Expression::Index(target, index) => {
                let target = self.evaluate(target)?;
                let index = self.evaluate(index)?.to_number();
                read_index(&target, index)
            }
            Expression::Take { list, index } => {
                let index = self.evaluate(index)?.to_number();
                self.take(list, index)
            }
            Expression::Conditional(condition, then, otherwise) => {
                if self.evaluate(condition)?.truthy() {
                    self.evaluate(then)
                } else {
                    self.evaluate(otherwise)
                }
            }
        }
    }

    fn variable(&self, name: &str) -> Result<Value, RuntimeError> {
        self.scope
            .get(name)
            .cloned()
            .ok_or_else(|| RuntimeError::UndefinedVariable(name.to_string()))
    }

    /// `+` joins text when either side is text or a list, and adds numbers otherwise.
    fn eval_add(&mut self, l: &Expression, r: &Expression) -> Result<Value, RuntimeError> {
        let left = self.evaluate(l)?;
        let right = self.evaluate(r)?;
        let joins = |v: &Value| matches!(v, Value::Text(_) | Value::List(_));
        if joins(&left) || joins(&right) {
            return Ok(Value::Text(format!("{}{}", left, right)));
        }
        Ok(Value::Number(left.to_number() + right.to_number()))
    }

    fn eval_arithmetic<F>(
        &mut self,
        l: &Expression,
        r: &Expression,
        f: F,
    ) -> Result<Value, RuntimeError>
    where
        F: Fn(f64, f64) -> f64,
    {
        let left = self.evaluate(l)?;
        let right = self.evaluate(r)?;
        Ok(Value::Number(f(left.to_number(), right.to_number())))
    }

    /// Text compares with text lexically; everything else compares as numbers, and any
    /// comparison involving NaN is false.
    fn eval_comparison<F>(
        &mut self,
        l: &Expression,
        r: &Expression,
        f: F,
    ) -> Result<Value, RuntimeError>
    where
        F: Fn(Ordering) -> bool,
    {
        let left = self.evaluate(l)?;
        let right = self.evaluate(r)?;
        let ordering = match (&left, &right) {
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            _ => left.to_number().partial_cmp(&right.to_number()),
        };
        Ok(Value::Bool(ordering.is_some_and(f)))
    }

    fn shape_payload(&mut self, call: &ShapeCall) -> Result<ShapePayload, RuntimeError> {
        let mut params = NamedValues::new();
        for (name, expr) in &call.params {
            let value = self.evaluate(expr)?;
            params.insert(name.clone(), value);
        }
        let label = self.evaluate(&call.label)?.to_string();
        let mut calculation = NamedValues::new();
        for (name, expr) in &call.calculation {
            let value = self.evaluate(expr)?;
            calculation.insert(name.clone(), value);
        }
        Ok(ShapePayload {
            shape: call.shape.clone(),
            params,
            label,
            calculation,
        })
    }

    /// Removes and returns the element at `index`; negative indices count from the end.
    fn take(&mut self, name: &str, index: f64) -> Result<Value, RuntimeError> {
        let items = match self.scope.get_mut(name) {
            Some(Value::List(items)) => items,
            Some(Value::Null) => return Err(null_access("splice")),
            Some(other) => {
                return Err(RuntimeError::TypeMismatch {
                    operation: "splice".to_string(),
                    expected: "Array".to_string(),
                    found: other.clone(),
                });
            }
            None => return Err(RuntimeError::UndefinedVariable(name.to_string())),
        };
        let position = clamp_position(index, items.len());
        if position < items.len() {
            Ok(items.remove(position))
        } else {
            Ok(Value::Null)
        }
    }

    fn set_index(
        &mut self,
        name: &str,
        index: f64,
        value: Value,
        insert: bool,
    ) -> Result<(), RuntimeError> {
        let items = match self.scope.get_mut(name) {
            Some(Value::List(items)) => items,
            Some(Value::Null) => {
                let reading = if insert { "splice".to_string() } else { format_number(index) };
                return Err(null_access(&reading));
            }
            // Writing an element of a non-list has no effect.
            Some(_) if !insert => return Ok(()),
            Some(other) => {
                return Err(RuntimeError::TypeMismatch {
                    operation: "splice".to_string(),
                    expected: "Array".to_string(),
                    found: other.clone(),
                });
            }
            None => return Err(RuntimeError::UndefinedVariable(name.to_string())),
        };

        if insert {
            let position = clamp_position(index, items.len());
            items.insert(position, value);
            return Ok(());
        }
        if index < 0.0 || index.fract() != 0.0 || !index.is_finite() {
            return Ok(());
        }
        if index >= MAX_LIST_LENGTH {
            return Err(RuntimeError::InvalidArrayLength);
        }
        let position = index as usize;
        if position >= items.len() {
            items.resize(position + 1, Value::Null);
        }
        items[position] = value;
        Ok(())
    }
}

fn null_access(reading: &str) -> RuntimeError {
    RuntimeError::InvalidIndex {
        found: "null".to_string(),
        index: reading.to_string(),
    }
}

/// Start position of a splice: negative counts back from `len`, results clamp to `0..=len`.
fn clamp_position(index: f64, len: usize) -> usize {
    let index = if index.is_nan() { 0.0 } else { index.trunc() };
    let len_f = len as f64;
    let position = if index < 0.0 { (len_f + index).max(0.0) } else { index.min(len_f) };
    position as usize
}

fn read_index(target: &Value, index: f64) -> Result<Value, RuntimeError> {
    let position = (index >= 0.0 && index.fract() == 0.0).then_some(index as usize);
    match target {
        Value::List(items) => Ok(position
            .and_then(|p| items.get(p))
            .cloned()
            .unwrap_or(Value::Null)),
        Value::Text(text) => Ok(position
            .and_then(|p| text.chars().nth(p))
            .map(|c| Value::Text(c.to_string()))
            .unwrap_or(Value::Null)),
        Value::Null => Err(null_access(&format_number(index))),
        _ => Ok(Value::Null),
    }
}

/// `break` and `continue` are only legal inside a loop body.
fn check_loop_control(statements: &[Statement], in_loop: bool) -> Result<(), RuntimeError> {
    for statement in statements {
        match statement {
            Statement::Break if !in_loop => return Err(RuntimeError::IllegalLoopControl("break")),
            Statement::Continue if !in_loop => {
                return Err(RuntimeError::IllegalLoopControl("continue"));
            }
            Statement::If {
                branches,
                otherwise,
            } => {
                for (_, body) in branches {
                    check_loop_control(body, in_loop)?;
                }
                if let Some(body) = otherwise {
                    check_loop_control(body, in_loop)?;
                }
            }
            Statement::Repeat { body, .. }
            | Statement::While { body, .. }
            | Statement::For { body, .. }
            | Statement::ForEach { body, .. } => check_loop_control(body, true)?,
            _ => {}
        }
    }
    Ok(())
}
