use crate::error::RuntimeError;
use std::fmt;

/// A real function of one variable parsed from text such as `"x^2 + 1"`, `"2x"` or `"sin(x)/x"`.
///
/// Supports numbers, `x`, the constants `pi` and `e`, `+ - * / ^`, parentheses, implicit
/// multiplication (`2x`, `3(x+1)`) and the functions `sin cos tan sqrt ln log abs exp`.
#[derive(Debug, Clone, PartialEq)]
pub struct RealFunction {
    source: String,
    root: Node,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Function {
    Sin,
    Cos,
    Tan,
    Sqrt,
    Ln,
    Log,
    Abs,
    Exp,
}

impl Function {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "sin" => Function::Sin,
            "cos" => Function::Cos,
            "tan" => Function::Tan,
            "sqrt" => Function::Sqrt,
            "ln" => Function::Ln,
            "log" => Function::Log,
            "abs" => Function::Abs,
            "exp" => Function::Exp,
            _ => return None,
        })
    }

    fn apply(&self, v: f64) -> f64 {
        match self {
            Function::Sin => v.sin(),
            Function::Cos => v.cos(),
            Function::Tan => v.tan(),
            Function::Sqrt => v.sqrt(),
            Function::Ln => v.ln(),
            Function::Log => v.log10(),
            Function::Abs => v.abs(),
            Function::Exp => v.exp(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Number(f64),
    X,
    Negate(Box<Node>),
    Add(Box<Node>, Box<Node>),
    Subtract(Box<Node>, Box<Node>),
    Multiply(Box<Node>, Box<Node>),
    Divide(Box<Node>, Box<Node>),
    Power(Box<Node>, Box<Node>),
    Apply(Function, Box<Node>),
}

impl Node {
    fn eval(&self, x: f64) -> f64 {
        match self {
            Node::Number(n) => *n,
            Node::X => x,
            Node::Negate(v) => -v.eval(x),
            Node::Add(l, r) => l.eval(x) + r.eval(x),
            Node::Subtract(l, r) => l.eval(x) - r.eval(x),
            Node::Multiply(l, r) => l.eval(x) * r.eval(x),
            Node::Divide(l, r) => l.eval(x) / r.eval(x),
            Node::Power(l, r) => l.eval(x).powf(r.eval(x)),
            Node::Apply(f, v) => f.apply(v.eval(x)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Op(char),
    Open,
    Close,
}

fn tokenize(source: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut chars = source.chars().peekable();
    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '0'..='9' | '.' => {
                let mut literal = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        literal.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let n = literal
                    .parse::<f64>()
                    .map_err(|_| format!("bad number '{}'", literal))?;
                tokens.push(Token::Number(n));
            }
            'π' => {
                chars.next();
                tokens.push(Token::Ident("pi".to_string()));
            }
            c if c.is_alphabetic() => {
                let mut name = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_alphabetic() {
                        name.push(d.to_ascii_lowercase());
                        chars.next();
                    } else {
                        break;
                    }
                }
                split_identifier(&name, &mut tokens)?;
            }
            '+' | '-' | '*' | '/' | '^' => {
                chars.next();
                tokens.push(Token::Op(c));
            }
            '×' | '·' => {
                chars.next();
                tokens.push(Token::Op('*'));
            }
            '÷' => {
                chars.next();
                tokens.push(Token::Op('/'));
            }
            '(' => {
                chars.next();
                tokens.push(Token::Open);
            }
            ')' => {
                chars.next();
                tokens.push(Token::Close);
            }
            other => return Err(format!("unexpected character '{}'", other)),
        }
    }
    Ok(tokens)
}

/// Splits runs like `xsin` or `pix` into known names, so `2xsin(x)` reads as `2 * x * sin(x)`.
fn split_identifier(name: &str, tokens: &mut Vec<Token>) -> Result<(), String> {
    const NAMES: [&str; 11] = [
        "sqrt", "sin", "cos", "tan", "abs", "exp", "log", "ln", "pi", "x", "e",
    ];
    let mut rest = name;
    while !rest.is_empty() {
        let known = NAMES
            .iter()
            .find(|known| rest.starts_with(*known))
            .ok_or_else(|| format!("unknown name '{}'", rest))?;
        tokens.push(Token::Ident(known.to_string()));
        rest = &rest[known.len()..];
    }
    Ok(())
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn expression(&mut self) -> Result<Node, String> {
        let mut left = self.term()?;
        while let Some(Token::Op(op @ ('+' | '-'))) = self.peek().cloned() {
            self.pos += 1;
            let right = self.term()?;
            left = if op == '+' {
                Node::Add(Box::new(left), Box::new(right))
            } else {
                Node::Subtract(Box::new(left), Box::new(right))
            };
        }
        Ok(left)
    }

    fn term(&mut self) -> Result<Node, String> {
        let mut left = self.unary()?;
        loop {
            match self.peek() {
                Some(Token::Op('*')) => {
                    self.pos += 1;
                    left = Node::Multiply(Box::new(left), Box::new(self.unary()?));
                }
                Some(Token::Op('/')) => {
                    self.pos += 1;
                    left = Node::Divide(Box::new(left), Box::new(self.unary()?));
                }
                // implicit multiplication
                Some(Token::Number(_) | Token::Ident(_) | Token::Open) => {
                    left = Node::Multiply(Box::new(left), Box::new(self.power()?));
                }
                _ => return Ok(left),
            }
        }
    }

    fn unary(&mut self) -> Result<Node, String> {
        match self.peek() {
            Some(Token::Op('-')) => {
                self.pos += 1;
                Ok(Node::Negate(Box::new(self.unary()?)))
            }
            Some(Token::Op('+')) => {
                self.pos += 1;
                self.unary()
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<Node, String> {
        let base = self.primary()?;
        if let Some(Token::Op('^')) = self.peek() {
            self.pos += 1;
            let exponent = self.unary()?;
            return Ok(Node::Power(Box::new(base), Box::new(exponent)));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Node, String> {
        match self.next() {
            Some(Token::Number(n)) => Ok(Node::Number(n)),
            Some(Token::Ident(name)) => match name.as_str() {
                "x" => Ok(Node::X),
                "pi" => Ok(Node::Number(std::f64::consts::PI)),
                "e" => Ok(Node::Number(std::f64::consts::E)),
                _ => {
                    let function = Function::from_name(&name)
                        .ok_or_else(|| format!("unknown function '{}'", name))?;
                    // `sin x` binds like `sin(x)`
                    let argument = self.power()?;
                    Ok(Node::Apply(function, Box::new(argument)))
                }
            },
            Some(Token::Open) => {
                let inner = self.expression()?;
                match self.next() {
                    Some(Token::Close) => Ok(inner),
                    _ => Err("missing ')'".to_string()),
                }
            }
            Some(Token::Op(op)) => Err(format!("unexpected '{}'", op)),
            Some(Token::Close) => Err("unexpected ')'".to_string()),
            None => Err("unexpected end of input".to_string()),
        }
    }
}

impl RealFunction {
    pub fn parse(source: &str) -> Result<Self, RuntimeError> {
        let invalid = |reason: String| RuntimeError::InvalidFunction {
            source_text: source.to_string(),
            reason,
        };
        let tokens = tokenize(source).map_err(invalid)?;
        if tokens.is_empty() {
            return Err(invalid("empty input".to_string()));
        }
        let mut parser = Parser { tokens, pos: 0 };
        let root = parser.expression().map_err(invalid)?;
        if parser.pos < parser.tokens.len() {
            return Err(invalid("trailing input".to_string()));
        }
        Ok(Self {
            source: source.to_string(),
            root,
        })
    }

    /// The straight line `y = x`.
    pub fn identity() -> Self {
        Self {
            source: "x".to_string(),
            root: Node::X,
        }
    }

    pub fn eval(&self, x: f64) -> f64 {
        self.root.eval(x)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Two-sided limit at `point`, approximated by averaging both neighbours.
    pub fn limit(&self, point: f64) -> f64 {
        const H: f64 = 1e-6;
        round6((self.eval(point - H) + self.eval(point + H)) / 2.0)
    }

    /// Limit as x grows without bound in the direction of `sign`. Values still growing
    /// between the two probes are reported as infinite.
    pub fn limit_at_infinity(&self, sign: f64) -> f64 {
        let sign = if sign < 0.0 { -1.0 } else { 1.0 };
        let near = self.eval(sign * 1e6);
        let far = self.eval(sign * 1e7);
        if far.is_nan() {
            return f64::NAN;
        }
        if far.abs() > 1e6 && far.abs() > near.abs() {
            return f64::INFINITY.copysign(far);
        }
        round6(far)
    }

    /// Definite integral over `[lower, upper]` with Simpson's rule.
    pub fn integrate(&self, lower: f64, upper: f64) -> f64 {
        const STEPS: usize = 1000;
        let h = (upper - lower) / STEPS as f64;
        let mut sum = self.eval(lower) + self.eval(upper);
        for i in 1..STEPS {
            let weight = if i % 2 == 1 { 4.0 } else { 2.0 };
            sum += weight * self.eval(lower + i as f64 * h);
        }
        round6(sum * h / 3.0)
    }
}

impl fmt::Display for RealFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

fn round6(v: f64) -> f64 {
    if v.is_finite() {
        let rounded = (v * 1e6).round() / 1e6;
        if rounded == 0.0 { 0.0 } else { rounded }
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_implicit_multiplication_and_powers() {
        let f = RealFunction::parse("2x^2 + 3x - 1").unwrap();
        assert_eq!(f.eval(2.0), 13.0);
        let g = RealFunction::parse("-x^2").unwrap();
        assert_eq!(g.eval(3.0), -9.0);
    }

    #[test]
    fn parses_functions_and_constants() {
        let f = RealFunction::parse("sin(pi/2) + sqrt(x)").unwrap();
        assert!((f.eval(4.0) - 3.0).abs() < 1e-12);
        let g = RealFunction::parse("2sin(x)").unwrap();
        assert!((g.eval(std::f64::consts::FRAC_PI_2) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_unknown_names() {
        assert!(matches!(
            RealFunction::parse("foo(x)"),
            Err(RuntimeError::InvalidFunction { .. })
        ));
        assert!(RealFunction::parse("(x + 1").is_err());
        assert!(RealFunction::parse("").is_err());
    }

    #[test]
    fn removable_discontinuity_has_a_limit() {
        let f = RealFunction::parse("sin(x)/x").unwrap();
        assert_eq!(f.limit(0.0), 1.0);
    }

    #[test]
    fn limit_at_infinity_detects_growth() {
        assert_eq!(
            RealFunction::parse("x^2").unwrap().limit_at_infinity(1.0),
            f64::INFINITY
        );
        assert_eq!(RealFunction::parse("1/x").unwrap().limit_at_infinity(1.0), 0.0);
        assert_eq!(
            RealFunction::parse("(2x+1)/x").unwrap().limit_at_infinity(-1.0),
            2.0
        );
    }

    #[test]
    fn simpson_integrates_polynomials() {
        let f = RealFunction::parse("x^2").unwrap();
        assert_eq!(f.integrate(0.0, 3.0), 9.0);
    }
}
