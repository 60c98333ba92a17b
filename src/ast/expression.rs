use super::value::{Value, format_number};
use itertools::Itertools;
use std::fmt;

/// Unary operators available to block programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Negate,
    Not,
}

/// Binary operators available to block programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    And,
    Or,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "%",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::Less => "<",
            BinaryOp::LessEqual => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEqual => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }

    /// Binding strength of the operator. Higher binds tighter.
    pub fn precedence(&self) -> u8 {
        match self {
            BinaryOp::Or => 2,
            BinaryOp::And => 3,
            BinaryOp::Equal | BinaryOp::NotEqual => 4,
            BinaryOp::Less | BinaryOp::LessEqual | BinaryOp::Greater | BinaryOp::GreaterEqual => 5,
            BinaryOp::Add | BinaryOp::Subtract => 6,
            BinaryOp::Multiply | BinaryOp::Divide | BinaryOp::Modulo => 7,
        }
    }
}

/// Named mathematical constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MathConstant {
    Pi,
    E,
    GoldenRatio,
    Sqrt2,
    Sqrt1_2,
    Infinity,
}

impl MathConstant {
    pub fn value(&self) -> f64 {
        match self {
            MathConstant::Pi => std::f64::consts::PI,
            MathConstant::E => std::f64::consts::E,
            MathConstant::GoldenRatio => (1.0 + 5f64.sqrt()) / 2.0,
            MathConstant::Sqrt2 => std::f64::consts::SQRT_2,
            MathConstant::Sqrt1_2 => std::f64::consts::FRAC_1_SQRT_2,
            MathConstant::Infinity => f64::INFINITY,
        }
    }

    fn source(&self) -> &'static str {
        match self {
            MathConstant::Pi => "Math.PI",
            MathConstant::E => "Math.E",
            MathConstant::GoldenRatio => "((1 + Math.sqrt(5)) / 2)",
            MathConstant::Sqrt2 => "Math.SQRT2",
            MathConstant::Sqrt1_2 => "Math.SQRT1_2",
            MathConstant::Infinity => "Infinity",
        }
    }
}

/// Library functions injected into the program scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    // Math library
    Sqrt,
    Cbrt,
    Abs,
    Ln,
    Log10,
    Exp,
    Pow,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Round,
    Ceil,
    Floor,
    Min,
    Max,
    RandomInt,
    RandomFloat,
    // Statistics over a list
    Sum,
    Average,
    Median,
    Mode,
    StdDev,
    ListMin,
    ListMax,
    Range,
    RandomItem,
    // Number theory and counting
    Gcd,
    Factorial,
    Fibonacci,
    IsPrime,
    PrimeFactors,
    NumberOrZero,
    // Text and lists
    Length,
    IsEmpty,
    IndexOf,
    LastIndexOf,
    CharAt,
    Concat,
    Repeat,
    ToText,
    ToFixed,
    // Real functions given as text, e.g. "x^2 + 1"
    Limit,
    LimitAtInfinity,
    Integrate,
    // Complex numbers written as "a + bi"
    ComplexAdd,
    ComplexMultiply,
    ComplexConjugate,
    ComplexModulus,
    // Matrices as nested lists
    MatrixAdd,
    MatrixSubtract,
    MatrixMultiply,
    MatrixTranspose,
    MatrixScale,
    Determinant,
}

impl Builtin {
    /// Name under which the function appears in generated source.
    pub fn name(&self) -> &'static str {
        match self {
            Builtin::Sqrt => "Math.sqrt",
            Builtin::Cbrt => "Math.cbrt",
            Builtin::Abs => "Math.abs",
            Builtin::Ln => "Math.log",
            Builtin::Log10 => "Math.log10",
            Builtin::Exp => "Math.exp",
            Builtin::Pow => "Math.pow",
            Builtin::Sin => "Math.sin",
            Builtin::Cos => "Math.cos",
            Builtin::Tan => "Math.tan",
            Builtin::Asin => "Math.asin",
            Builtin::Acos => "Math.acos",
            Builtin::Atan => "Math.atan",
            Builtin::Round => "Math.round",
            Builtin::Ceil => "Math.ceil",
            Builtin::Floor => "Math.floor",
            Builtin::Min => "Math.min",
            Builtin::Max => "Math.max",
            Builtin::RandomInt => "mathRandomInt",
            Builtin::RandomFloat => "Math.random",
            Builtin::Sum => "mathSum",
            Builtin::Average => "mathMean",
            Builtin::Median => "mathMedian",
            Builtin::Mode => "mathMode",
            Builtin::StdDev => "mathStandardDeviation",
            Builtin::ListMin => "mathMin",
            Builtin::ListMax => "mathMax",
            Builtin::Range => "mathRange",
            Builtin::RandomItem => "mathRandomList",
            Builtin::Gcd => "gcd",
            Builtin::Factorial => "factorial",
            Builtin::Fibonacci => "fibonacci",
            Builtin::IsPrime => "mathIsPrime",
            Builtin::PrimeFactors => "primeFactors",
            Builtin::NumberOrZero => "numberOrZero",
            Builtin::Length => "length",
            Builtin::IsEmpty => "isEmpty",
            Builtin::IndexOf => "indexOf",
            Builtin::LastIndexOf => "lastIndexOf",
            Builtin::CharAt => "charAt",
            Builtin::Concat => "concat",
            Builtin::Repeat => "listsRepeat",
            Builtin::ToText => "String",
            Builtin::ToFixed => "toFixed",
            Builtin::Limit => "limit",
            Builtin::LimitAtInfinity => "limitAtInfinity",
            Builtin::Integrate => "integrate",
            Builtin::ComplexAdd => "complexAdd",
            Builtin::ComplexMultiply => "complexMultiply",
            Builtin::ComplexConjugate => "complexConjugate",
            Builtin::ComplexModulus => "complexModulus",
            Builtin::MatrixAdd => "matrixAdd",
            Builtin::MatrixSubtract => "matrixSubtract",
            Builtin::MatrixMultiply => "matrixMultiply",
            Builtin::MatrixTranspose => "matrixTranspose",
            Builtin::MatrixScale => "matrixScale",
            Builtin::Determinant => "determinant",
        }
    }
}

/// The core expression tree of a generated program.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(Value),
    Constant(MathConstant),
    Variable(String),
    List(Vec<Expression>),
    Unary(UnaryOp, Box<Expression>),
    Binary(BinaryOp, Box<Expression>, Box<Expression>),
    Call(Builtin, Vec<Expression>),
    Index(Box<Expression>, Box<Expression>),
    /// Removes the element at a zero-based index from a variable's list and yields it.
    Take {
        list: String,
        index: Box<Expression>,
    },
    Conditional(Box<Expression>, Box<Expression>, Box<Expression>),
}

// --- Constructors ---
impl Expression {
    pub fn num(n: f64) -> Self {
        Expression::Literal(Value::Number(n))
    }

    pub fn text(s: impl Into<String>) -> Self {
        Expression::Literal(Value::Text(s.into()))
    }

    pub fn bool(b: bool) -> Self {
        Expression::Literal(Value::Bool(b))
    }

    pub fn null() -> Self {
        Expression::Literal(Value::Null)
    }

    pub fn var(name: impl Into<String>) -> Self {
        Expression::Variable(name.into())
    }

    pub fn pi() -> Self {
        Expression::Constant(MathConstant::Pi)
    }

    pub fn call(builtin: Builtin, args: Vec<Expression>) -> Self {
        Expression::Call(builtin, args)
    }

    pub fn binary(op: BinaryOp, left: Expression, right: Expression) -> Self {
        Expression::Binary(op, Box::new(left), Box::new(right))
    }

    pub fn index(target: Expression, index: Expression) -> Self {
        Expression::Index(Box::new(target), Box::new(index))
    }

    pub fn conditional(condition: Expression, then: Expression, otherwise: Expression) -> Self {
        Expression::Conditional(Box::new(condition), Box::new(then), Box::new(otherwise))
    }

    pub fn logical_not(self) -> Self {
        Expression::Unary(UnaryOp::Not, Box::new(self))
    }

    pub fn pow(self, exponent: Expression) -> Self {
        Expression::call(Builtin::Pow, vec![self, exponent])
    }

    pub fn sqrt(self) -> Self {
        Expression::call(Builtin::Sqrt, vec![self])
    }

    pub fn abs(self) -> Self {
        Expression::call(Builtin::Abs, vec![self])
    }

    pub fn to_fixed(self, digits: u32) -> Self {
        Expression::call(Builtin::ToFixed, vec![self, Expression::num(digits as f64)])
    }

    pub fn equals(self, other: Expression) -> Self {
        Expression::binary(BinaryOp::Equal, self, other)
    }

    pub fn less_than(self, other: Expression) -> Self {
        Expression::binary(BinaryOp::Less, self, other)
    }

    /// Text concatenation of all parts, as `a + b + c`.
    pub fn concat(parts: Vec<Expression>) -> Self {
        parts
            .into_iter()
            .reduce(|acc, part| Expression::binary(BinaryOp::Add, acc, part))
            .unwrap_or_else(|| Expression::text(""))
    }

    /// Binding strength of the expression's outermost operator.
    pub fn precedence(&self) -> u8 {
        match self {
            Expression::Conditional(..) => 1,
            Expression::Binary(op, ..) => op.precedence(),
            Expression::Unary(..) => 8,
            Expression::Literal(Value::Number(n)) if n.is_sign_negative() && *n != 0.0 => 8,
            _ => 9,
        }
    }
}

macro_rules! impl_binary_operator {
    ($($trait:ident, $method:ident, $op:expr);* $(;)?) => {
        $(
            impl std::ops::$trait for Expression {
                type Output = Expression;
                fn $method(self, rhs: Expression) -> Expression {
                    Expression::binary($op, self, rhs)
                }
            }
        )*
    };
}

impl_binary_operator! {
    Add, add, BinaryOp::Add;
    Sub, sub, BinaryOp::Subtract;
    Mul, mul, BinaryOp::Multiply;
    Div, div, BinaryOp::Divide;
    Rem, rem, BinaryOp::Modulo;
}

impl std::ops::Neg for Expression {
    type Output = Expression;
    fn neg(self) -> Expression {
        Expression::Unary(UnaryOp::Negate, Box::new(self))
    }
}

// --- Source printing ---

fn fmt_literal(value: &Value, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match value {
        Value::Number(n) => write!(f, "{}", format_number(*n)),
        Value::Bool(b) => write!(f, "{}", b),
        Value::Text(s) => {
            let quoted = serde_json::to_string(s).map_err(|_| fmt::Error)?;
            write!(f, "{}", quoted)
        }
        Value::List(items) => {
            write!(f, "[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                fmt_literal(item, f)?;
            }
            write!(f, "]")
        }
        Value::Null => write!(f, "null"),
    }
}

impl Expression {
    /// Display adapter that prints the expression inside a context of the given precedence.
    pub fn display_within(&self, parent: u8) -> impl fmt::Display + '_ {
        Precedence(self, parent)
    }

    /// Writes the expression, adding parentheses only when its precedence is
    /// lower than the surrounding context requires.
    pub fn fmt_with_precedence(&self, f: &mut fmt::Formatter<'_>, parent: u8) -> fmt::Result {
        let current = self.precedence();
        let needs_parens = current < parent;
        if needs_parens {
            write!(f, "(")?;
        }
        match self {
            Expression::Literal(value) => fmt_literal(value, f)?,
            Expression::Constant(constant) => write!(f, "{}", constant.source())?,
            Expression::Variable(name) => write!(f, "{}", name)?,
            Expression::List(items) => {
                write!(f, "[{}]", items.iter().map(|item| item.to_string()).join(", "))?
            }
            Expression::Unary(op, operand) => {
                let symbol = match op {
                    UnaryOp::Negate => "-",
                    UnaryOp::Not => "!",
                };
                let inner = Precedence(operand, current).to_string();
                if inner.starts_with('-') {
                    write!(f, "{}({})", symbol, inner)?;
                } else {
                    write!(f, "{}{}", symbol, inner)?;
                }
            }
            Expression::Binary(op, left, right) => {
                left.fmt_with_precedence(f, current)?;
                write!(f, " {} ", op.symbol())?;
                right.fmt_with_precedence(f, current + 1)?;
            }
            Expression::Call(Builtin::ToFixed, args) if args.len() == 2 => {
                args[0].fmt_with_precedence(f, 10)?;
                write!(f, ".toFixed({})", args[1])?;
            }
            Expression::Call(builtin, args) => {
                write!(
                    f,
                    "{}({})",
                    builtin.name(),
                    args.iter().map(|arg| arg.to_string()).join(", ")
                )?;
            }
            Expression::Index(target, index) => {
                target.fmt_with_precedence(f, 10)?;
                write!(f, "[{}]", index)?;
            }
            Expression::Take { list, index } => {
                write!(f, "{}.splice({}, 1)[0]", list, index)?;
            }
            Expression::Conditional(condition, then, otherwise) => {
                condition.fmt_with_precedence(f, 2)?;
                write!(f, " ? ")?;
                then.fmt_with_precedence(f, 1)?;
                write!(f, " : ")?;
                otherwise.fmt_with_precedence(f, 1)?;
            }
        }
        if needs_parens {
            write!(f, ")")?;
        }
        Ok(())
    }
}

/// Adapter printing an expression within a given parent precedence.
struct Precedence<'a>(&'a Expression, u8);

impl fmt::Display for Precedence<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_with_precedence(f, self.1)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_with_precedence(f, 0)
    }
}
