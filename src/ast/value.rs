use itertools::Itertools;
use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Runtime value types produced while running a block program.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Bool(bool),
    Text(String),
    List(Vec<Value>),
    Null,
}

// Manual implementation to handle f64
impl Eq for Value {}

// Manual implementation to handle f64 by hashing its bits
impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Value::Number(n) => n.to_bits().hash(state),
            Value::Bool(b) => b.hash(state),
            Value::Text(s) => s.hash(state),
            Value::List(items) => items.hash(state),
            Value::Null => {}
        }
    }
}

/// Formats a number the way the editor console shows it: integral values without a
/// fractional part, non-finite values as words.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{:.0}", n)
    } else {
        format!("{}", n)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Text(s) => write!(f, "{}", s),
            Value::List(items) => {
                let joined = items
                    .iter()
                    .map(|item| match item {
                        Value::List(_) => format!("[{}]", item),
                        Value::Null => String::new(),
                        other => other.to_string(),
                    })
                    .join(",");
                write!(f, "{}", joined)
            }
            Value::Null => write!(f, "null"),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Vec<f64>> for Value {
    fn from(items: Vec<f64>) -> Self {
        Value::List(items.into_iter().map(Value::Number).collect())
    }
}

impl Value {
    /// Short type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "Number",
            Value::Bool(_) => "Boolean",
            Value::Text(_) => "String",
            Value::List(_) => "Array",
            Value::Null => "null",
        }
    }

    /// Numeric coercion: text is parsed after trimming, lists of one element
    /// coerce that element, everything unparseable becomes NaN.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            Value::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Null => 0.0,
            Value::Text(s) => parse_numeric_text(s),
            Value::List(items) => match items.as_slice() {
                [] => 0.0,
                [single] => single.to_number(),
                _ => f64::NAN,
            },
        }
    }

    pub fn truthy(&self) -> bool {
        match self {
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Bool(b) => *b,
            Value::Text(s) => !s.is_empty(),
            Value::List(_) => true,
            Value::Null => false,
        }
    }

    /// String form used when values are joined into a log line. `null` inside
    /// a joined line prints as itself, matching the console.
    pub fn to_join_string(&self) -> String {
        self.to_string()
    }

    /// Loose equality between two values.
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Null, _) | (_, Value::Null) => false,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::List(_), other) | (other, Value::List(_)) => {
                self.to_string() == other.to_string() || self.to_number() == other.to_number()
            }
            _ => self.to_number() == other.to_number(),
        }
    }

    /// Interprets the value as a list of numbers. Text is split on commas and whitespace,
    /// square brackets are ignored, and a single number becomes a one-element list.
    pub fn as_number_list(&self) -> Vec<f64> {
        match self {
            Value::List(items) => items
                .iter()
                .flat_map(|item| match item {
                    Value::List(_) => item.as_number_list(),
                    other => vec![other.to_number()],
                })
                .collect(),
            Value::Text(s) => s
                .split(|c: char| c == ',' || c == ';' || c.is_whitespace() || c == '[' || c == ']')
                .filter(|part| !part.is_empty())
                .map(parse_numeric_text)
                .collect(),
            Value::Number(n) => vec![*n],
            Value::Bool(_) => vec![self.to_number()],
            Value::Null => Vec::new(),
        }
    }

    /// Element count for lists and character count for text.
    pub fn length(&self) -> Option<usize> {
        match self {
            Value::List(items) => Some(items.len()),
            Value::Text(s) => Some(s.chars().count()),
            _ => None,
        }
    }
}

fn parse_numeric_text(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        _ => trimmed.parse::<f64>().unwrap_or(f64::NAN),
    }
}
