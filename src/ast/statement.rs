use super::expression::Expression;
use itertools::Itertools;
use serde::Serialize;
use std::fmt;

/// Family of a `drawShape` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ShapeKind {
    #[serde(rename = "2d-shape")]
    TwoD,
    #[serde(rename = "3d-shape")]
    ThreeD,
    #[serde(rename = "graph")]
    Graph,
}

impl ShapeKind {
    pub fn tag(&self) -> &'static str {
        match self {
            ShapeKind::TwoD => "2d-shape",
            ShapeKind::ThreeD => "3d-shape",
            ShapeKind::Graph => "graph",
        }
    }
}

/// A `drawShape` invocation. Parameters and calculation entries keep their block order.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeCall {
    pub kind: ShapeKind,
    pub shape: String,
    pub params: Vec<(String, Expression)>,
    pub label: Expression,
    pub calculation: Vec<(String, Expression)>,
}

/// Statements of a generated program.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Log(Vec<Expression>),
    Alert(Expression),
    DrawShape(ShapeCall),
    DrawChart {
        kind: String,
        data: Expression,
    },
    DrawFunction(Expression),
    Assign {
        name: String,
        value: Expression,
    },
    /// Writes (or inserts before) the element at a zero-based index of a variable's list.
    SetIndex {
        list: String,
        index: Expression,
        value: Expression,
        insert: bool,
    },
    If {
        branches: Vec<(Expression, Vec<Statement>)>,
        otherwise: Option<Vec<Statement>>,
    },
    Repeat {
        times: Expression,
        body: Vec<Statement>,
    },
    While {
        condition: Expression,
        until: bool,
        body: Vec<Statement>,
    },
    For {
        variable: String,
        from: Expression,
        to: Expression,
        step: Expression,
        body: Vec<Statement>,
    },
    ForEach {
        variable: String,
        list: Expression,
        body: Vec<Statement>,
    },
    Break,
    Continue,
    /// A value block placed on its own; evaluated and discarded.
    Expression(Expression),
}

/// A complete program assembled from a workspace.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub variables: Vec<String>,
    pub statements: Vec<Statement>,
}

impl Program {
    /// A program with no statements does nothing, even when it declares variables.
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

const INDENT: &str = "  ";

fn write_block(f: &mut fmt::Formatter<'_>, statements: &[Statement], depth: usize) -> fmt::Result {
    for statement in statements {
        write_statement(f, statement, depth)?;
    }
    Ok(())
}

fn write_pairs(pairs: &[(String, Expression)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{}: {}", key, value))
        .join(", ")
}

fn write_statement(f: &mut fmt::Formatter<'_>, statement: &Statement, depth: usize) -> fmt::Result {
    let pad = INDENT.repeat(depth);
    match statement {
        Statement::Log(args) => {
            writeln!(f, "{}console.log({});", pad, args.iter().join(", "))
        }
        Statement::Alert(message) => writeln!(f, "{}window.alert({});", pad, message),
        Statement::DrawShape(call) => {
            let mut fields = vec![format!("shape: {:?}", call.shape)];
            if !call.params.is_empty() {
                fields.push(write_pairs(&call.params));
            }
            fields.push(format!("label: {}", call.label));
            fields.push(format!("calculation: {{ {} }}", write_pairs(&call.calculation)));
            writeln!(
                f,
                "{}drawShape({:?}, {{ {} }});",
                pad,
                call.kind.tag(),
                fields.join(", ")
            )
        }
        Statement::DrawChart { kind, data } => {
            writeln!(f, "{}drawChart({:?}, {});", pad, kind, data)
        }
        Statement::DrawFunction(function) => writeln!(f, "{}drawFunction({});", pad, function),
        Statement::Assign { name, value } => writeln!(f, "{}{} = {};", pad, name, value),
        Statement::SetIndex {
            list,
            index,
            value,
            insert,
        } => {
            if *insert {
                writeln!(f, "{}{}.splice({}, 0, {});", pad, list, index, value)
            } else {
                writeln!(f, "{}{}[{}] = {};", pad, list, index, value)
            }
        }
        Statement::If {
            branches,
            otherwise,
        } => {
            for (i, (condition, body)) in branches.iter().enumerate() {
                if i == 0 {
                    writeln!(f, "{}if ({}) {{", pad, condition)?;
                } else {
                    writeln!(f, "{}}} else if ({}) {{", pad, condition)?;
                }
                write_block(f, body, depth + 1)?;
            }
            if let Some(body) = otherwise {
                writeln!(f, "{}}} else {{", pad)?;
                write_block(f, body, depth + 1)?;
            }
            writeln!(f, "{}}}", pad)
        }
        Statement::Repeat { times, body } => {
            writeln!(
                f,
                "{}for (var count = 0; count < {}; count++) {{",
                pad,
                times.display_within(6)
            )?;
            write_block(f, body, depth + 1)?;
            writeln!(f, "{}}}", pad)
        }
        Statement::While {
            condition,
            until,
            body,
        } => {
            if *until {
                writeln!(f, "{}while (!{}) {{", pad, condition.display_within(9))?;
            } else {
                writeln!(f, "{}while ({}) {{", pad, condition)?;
            }
            write_block(f, body, depth + 1)?;
            writeln!(f, "{}}}", pad)
        }
        Statement::For {
            variable,
            from,
            to,
            step,
            body,
        } => {
            writeln!(
                f,
                "{pad}for ({v} = {from}; {v} <= {to}; {v} += {step}) {{",
                pad = pad,
                v = variable,
                from = from,
                to = to.display_within(6),
                step = step,
            )?;
            write_block(f, body, depth + 1)?;
            writeln!(f, "{}}}", pad)
        }
        Statement::ForEach {
            variable,
            list,
            body,
        } => {
            writeln!(f, "{}for ({} of {}) {{", pad, variable, list)?;
            write_block(f, body, depth + 1)?;
            writeln!(f, "{}}}", pad)
        }
        Statement::Break => writeln!(f, "{}break;", pad),
        Statement::Continue => writeln!(f, "{}continue;", pad),
        Statement::Expression(expression) => writeln!(f, "{}{};", pad, expression),
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_statement(f, self, 0)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.variables.is_empty() {
            writeln!(f, "var {};", self.variables.join(", "))?;
            writeln!(f)?;
        }
        write_block(f, &self.statements, 0)
    }
}
