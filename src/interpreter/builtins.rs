use super::MAX_LIST_LENGTH;
use super::function::RealFunction;
use crate::ast::{Builtin, Value, format_number};
use crate::error::RuntimeError;
use itertools::Itertools;
use rand::Rng;

type Matrix = Vec<Vec<f64>>;

fn number(args: &[Value], i: usize) -> f64 {
    args.get(i).map(Value::to_number).unwrap_or(f64::NAN)
}

fn arg(args: &[Value], i: usize) -> &Value {
    args.get(i).unwrap_or(&Value::Null)
}

fn mismatch(builtin: Builtin, expected: &str, found: &Value) -> RuntimeError {
    RuntimeError::TypeMismatch {
        operation: builtin.name().to_string(),
        expected: expected.to_string(),
        found: found.clone(),
    }
}

/// Calls a library function with already evaluated arguments.
pub(super) fn call(builtin: Builtin, args: &[Value]) -> Result<Value, RuntimeError> {
    let unary = |f: fn(f64) -> f64| Ok(Value::Number(f(number(args, 0))));
    match builtin {
        // --- Math library ---
        Builtin::Sqrt => unary(f64::sqrt),
        Builtin::Cbrt => unary(f64::cbrt),
        Builtin::Abs => unary(f64::abs),
        Builtin::Ln => unary(f64::ln),
        Builtin::Log10 => unary(f64::log10),
        Builtin::Exp => unary(f64::exp),
        Builtin::Sin => unary(f64::sin),
        Builtin::Cos => unary(f64::cos),
        Builtin::Tan => unary(f64::tan),
        Builtin::Asin => unary(f64::asin),
        Builtin::Acos => unary(f64::acos),
        Builtin::Atan => unary(f64::atan),
        Builtin::Round => unary(|v| (v + 0.5).floor()),
        Builtin::Ceil => unary(f64::ceil),
        Builtin::Floor => unary(f64::floor),
        Builtin::Pow => Ok(Value::Number(number(args, 0).powf(number(args, 1)))),
        Builtin::Min => Ok(Value::Number(
            args.iter().map(Value::to_number).fold(f64::INFINITY, js_min),
        )),
        Builtin::Max => Ok(Value::Number(
            args.iter().map(Value::to_number).fold(f64::NEG_INFINITY, js_max),
        )),
        Builtin::RandomInt => Ok(Value::Number(random_int(number(args, 0), number(args, 1)))),
        Builtin::RandomFloat => Ok(Value::Number(rand::rng().random::<f64>())),

        // --- Statistics ---
        Builtin::Sum => Ok(Value::Number(arg(args, 0).as_number_list().iter().sum())),
        Builtin::Average => {
            let list = arg(args, 0).as_number_list();
            Ok(Value::Number(list.iter().sum::<f64>() / list.len() as f64))
        }
        Builtin::Median => Ok(median(&arg(args, 0).as_number_list())
            .map(Value::Number)
            .unwrap_or(Value::Null)),
        Builtin::Mode => Ok(mode(&arg(args, 0).as_number_list())
            .map(Value::Number)
            .unwrap_or(Value::Null)),
        Builtin::StdDev => Ok(standard_deviation(&arg(args, 0).as_number_list())
            .map(Value::Number)
            .unwrap_or(Value::Null)),
        Builtin::ListMin => Ok(Value::Number(
            arg(args, 0)
                .as_number_list()
                .into_iter()
                .fold(f64::INFINITY, js_min),
        )),
        Builtin::ListMax => Ok(Value::Number(
            arg(args, 0)
                .as_number_list()
                .into_iter()
                .fold(f64::NEG_INFINITY, js_max),
        )),
        Builtin::Range => {
            let list = arg(args, 0).as_number_list();
            let max = list.iter().copied().fold(f64::NEG_INFINITY, js_max);
            let min = list.iter().copied().fold(f64::INFINITY, js_min);
            Ok(Value::Number(max - min))
        }
        Builtin::RandomItem => {
            let items = match arg(args, 0) {
                Value::List(items) => items.clone(),
                other => other.as_number_list().into_iter().map(Value::Number).collect(),
            };
            if items.is_empty() {
                return Ok(Value::Null);
            }
            let i = rand::rng().random_range(0..items.len());
            Ok(items[i].clone())
        }

        // --- Number theory and counting ---
        Builtin::Gcd => Ok(Value::Number(gcd(number(args, 0), number(args, 1)))),
        Builtin::Factorial => Ok(Value::Number(factorial(number(args, 0)))),
        Builtin::Fibonacci => Ok(Value::Number(fibonacci(number(args, 0)))),
        Builtin::IsPrime => Ok(Value::Bool(is_prime(number(args, 0)))),
        Builtin::PrimeFactors => Ok(prime_factors(number(args, 0)).into()),
        Builtin::NumberOrZero => Ok(Value::Number(match arg(args, 0) {
            Value::Number(n) => *n,
            _ => 0.0,
        })),

        // --- Text and lists ---
        Builtin::Length => match arg(args, 0) {
            Value::Null => Err(RuntimeError::InvalidIndex {
                found: "null".to_string(),
                index: "length".to_string(),
            }),
            value => Ok(value
                .length()
                .map(|n| Value::Number(n as f64))
                .unwrap_or(Value::Null)),
        },
        Builtin::IsEmpty => match arg(args, 0) {
            Value::Null => Err(RuntimeError::InvalidIndex {
                found: "null".to_string(),
                index: "length".to_string(),
            }),
            value => Ok(Value::Bool(value.length() == Some(0))),
        },
        Builtin::IndexOf => Ok(Value::Number(index_of(arg(args, 0), arg(args, 1), false))),
        Builtin::LastIndexOf => Ok(Value::Number(index_of(arg(args, 0), arg(args, 1), true))),
        Builtin::CharAt => {
            let text = arg(args, 0).to_string();
            let i = number(args, 1);
            let found = if i >= 0.0 && i.fract() == 0.0 {
                text.chars().nth(i as usize)
            } else {
                None
            };
            Ok(Value::Text(found.map(String::from).unwrap_or_default()))
        }
        Builtin::Concat => Ok(Value::Text(args.iter().map(Value::to_string).join(""))),
        Builtin::Repeat => {
            let count = number(args, 1);
            if count >= MAX_LIST_LENGTH {
                return Err(RuntimeError::InvalidArrayLength);
            }
            let count = if count > 0.0 { count as usize } else { 0 };
            Ok(Value::List(vec![arg(args, 0).clone(); count]))
        }
        Builtin::ToText => Ok(Value::Text(arg(args, 0).to_string())),
        Builtin::ToFixed => match arg(args, 0) {
            Value::Number(n) => Ok(Value::Text(to_fixed(*n, number(args, 1)))),
            other => Err(mismatch(builtin, "Number", other)),
        },

        // --- Functions given as text ---
        Builtin::Limit => {
            let f = RealFunction::parse(&arg(args, 0).to_string())?;
            Ok(Value::Number(f.limit(number(args, 1))))
        }
        Builtin::LimitAtInfinity => {
            let f = RealFunction::parse(&arg(args, 0).to_string())?;
            Ok(Value::Number(f.limit_at_infinity(number(args, 1))))
        }
        Builtin::Integrate => {
            let f = RealFunction::parse(&arg(args, 0).to_string())?;
            Ok(Value::Number(f.integrate(number(args, 1), number(args, 2))))
        }

        // --- Complex numbers ---
        Builtin::ComplexAdd => {
            let (a, b) = (complex(builtin, arg(args, 0))?, complex(builtin, arg(args, 1))?);
            Ok(Value::Text(format_complex(a.0 + b.0, a.1 + b.1)))
        }
        Builtin::ComplexMultiply => {
            let (a, b) = (complex(builtin, arg(args, 0))?, complex(builtin, arg(args, 1))?);
            Ok(Value::Text(format_complex(
                a.0 * b.0 - a.1 * b.1,
                a.0 * b.1 + a.1 * b.0,
            )))
        }
        Builtin::ComplexConjugate => {
            let (re, im) = complex(builtin, arg(args, 0))?;
            Ok(Value::Text(format_complex(re, -im)))
        }
        Builtin::ComplexModulus => {
            let (re, im) = complex(builtin, arg(args, 0))?;
            Ok(Value::Number(re.hypot(im)))
        }

        // --- Matrices ---
        Builtin::MatrixAdd | Builtin::MatrixSubtract => {
            let a = matrix(builtin, arg(args, 0))?;
            let b = matrix(builtin, arg(args, 1))?;
            if !same_shape(&a, &b) {
                return Err(mismatch(builtin, "matrices of the same size", arg(args, 1)));
            }
            let sign = if builtin == Builtin::MatrixAdd { 1.0 } else { -1.0 };
            let sum = a
                .iter()
                .zip(&b)
                .map(|(ra, rb)| ra.iter().zip(rb).map(|(x, y)| x + sign * y).collect())
                .collect();
            Ok(matrix_value(sum))
        }
        Builtin::MatrixMultiply => {
            let a = matrix(builtin, arg(args, 0))?;
            let b = matrix(builtin, arg(args, 1))?;
            if a.first().map(Vec::len) != Some(b.len()) {
                return Err(mismatch(builtin, "a matrix with matching rows", arg(args, 1)));
            }
            let columns = b.first().map(Vec::len).unwrap_or(0);
            let product = a
                .iter()
                .map(|row| {
                    (0..columns)
                        .map(|j| row.iter().zip(&b).map(|(x, rb)| x * rb[j]).sum())
                        .collect()
                })
                .collect();
            Ok(matrix_value(product))
        }
        Builtin::MatrixTranspose => {
            let m = matrix(builtin, arg(args, 0))?;
            let columns = m.first().map(Vec::len).unwrap_or(0);
            let transposed = (0..columns)
                .map(|j| m.iter().map(|row| row[j]).collect())
                .collect();
            Ok(matrix_value(transposed))
        }
        Builtin::MatrixScale => {
            let k = number(args, 0);
            let m = matrix(builtin, arg(args, 1))?;
            Ok(matrix_value(
                m.into_iter()
                    .map(|row| row.into_iter().map(|x| k * x).collect())
                    .collect(),
            ))
        }
        Builtin::Determinant => {
            let m = matrix(builtin, arg(args, 0))?;
            if m.iter().any(|row| row.len() != m.len()) {
                return Err(mismatch(builtin, "a square matrix", arg(args, 0)));
            }
            Ok(Value::Number(determinant(m)))
        }
    }
}

fn js_min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() { f64::NAN } else { a.min(b) }
}

fn js_max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() { f64::NAN } else { a.max(b) }
}

/// Uniform integer in `[a, b]`; the bounds may come in either order.
fn random_int(a: f64, b: f64) -> f64 {
    let (low, high) = if a > b { (b, a) } else { (a, b) };
    let span = (high - low + 1.0).floor();
    if !span.is_finite() || span <= 0.0 {
        return low.floor();
    }
    (rand::rng().random::<f64>() * span).floor() + low
}

fn median(list: &[f64]) -> Option<f64> {
    if list.is_empty() {
        return None;
    }
    let sorted: Vec<f64> = list.iter().copied().sorted_by(|a, b| a.total_cmp(b)).collect();
    let mid = sorted.len() / 2;
    Some(if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    })
}

/// Most frequent value; ties resolve to the smallest.
fn mode(list: &[f64]) -> Option<f64> {
    list.iter()
        .copied()
        .sorted_by(|a, b| a.total_cmp(b))
        .dedup_with_count()
        .max_by(|(ca, a), (cb, b)| ca.cmp(cb).then(b.total_cmp(a)))
        .map(|(_, value)| value)
}

fn standard_deviation(list: &[f64]) -> Option<f64> {
    if list.is_empty() {
        return None;
    }
    let n = list.len() as f64;
    let mean = list.iter().sum::<f64>() / n;
    let variance = list.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    Some(variance.sqrt())
}

fn gcd(a: f64, b: f64) -> f64 {
    if !a.is_finite() || !b.is_finite() {
        return f64::NAN;
    }
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0.0 {
        (a, b) = (b, a % b);
    }
    a
}

fn factorial(n: f64) -> f64 {
    if n.is_nan() || n <= 1.0 {
        return 1.0;
    }
    if n > 170.0 {
        return f64::INFINITY;
    }
    (2..=n.floor() as u32).fold(1.0, |acc, i| acc * i as f64)
}

fn fibonacci(n: f64) -> f64 {
    if n.is_nan() || n <= 0.0 {
        return 0.0;
    }
    if n > 1476.0 {
        return f64::INFINITY;
    }
    let (mut a, mut b) = (0.0, 1.0);
    for _ in 2..=n.floor() as u32 {
        (a, b) = (b, a + b);
    }
    b
}

fn is_prime(n: f64) -> bool {
    if n == 2.0 || n == 3.0 {
        return true;
    }
    if n.is_nan() || n <= 1.0 || n.fract() != 0.0 || n % 2.0 == 0.0 || n % 3.0 == 0.0 {
        return false;
    }
    // Every float above 2^53 is even.
    if n > 9.007_199_254_740_991e15 {
        return false;
    }
    let mut x = 6.0;
    while x - 1.0 <= n.sqrt() {
        if n % (x - 1.0) == 0.0 || n % (x + 1.0) == 0.0 {
            return false;
        }
        x += 6.0;
    }
    true
}

fn prime_factors(n: f64) -> Vec<f64> {
    let mut factors = Vec::new();
    if !n.is_finite() || n < 2.0 || n.fract() != 0.0 || n > 9.007_199_254_740_991e15 {
        return factors;
    }
    let mut rest = n as u64;
    let mut p = 2u64;
    while p * p <= rest {
        while rest % p == 0 {
            factors.push(p as f64);
            rest /= p;
        }
        p += 1;
    }
    if rest > 1 {
        factors.push(rest as f64);
    }
    factors
}

/// Zero-based position of `needle`, or `-1`.
fn index_of(haystack: &Value, needle: &Value, last: bool) -> f64 {
    let position = match haystack {
        Value::List(items) => {
            if last {
                items.iter().rposition(|item| item == needle)
            } else {
                items.iter().position(|item| item == needle)
            }
        }
        Value::Text(text) => {
            let needle = needle.to_string();
            let byte_index = if last {
                text.rfind(&needle)
            } else {
                text.find(&needle)
            };
            byte_index.map(|b| text[..b].chars().count())
        }
        _ => None,
    };
    position.map(|p| p as f64).unwrap_or(-1.0)
}

fn to_fixed(n: f64, digits: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return format_number(n);
    }
    let digits = if digits.is_finite() {
        digits.clamp(0.0, 100.0) as usize
    } else {
        0
    };
    let n = if n == 0.0 { 0.0 } else { n };
    format!("{:.*}", digits, n)
}

/// Reads `a + bi`, `a - bi`, `bi`, `i` or a plain real number.
fn parse_complex(text: &str) -> Option<(f64, f64)> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return None;
    }
    let Some(body) = compact.strip_suffix('i') else {
        return compact.parse().ok().map(|re| (re, 0.0));
    };
    let split = body
        .char_indices()
        .skip(1)
        .filter(|&(i, c)| (c == '+' || c == '-') && !body[..i].ends_with(['e', 'E']))
        .map(|(i, _)| i)
        .last();
    let imaginary = |part: &str| match part {
        "" | "+" => Some(1.0),
        "-" => Some(-1.0),
        other => other.parse::<f64>().ok(),
    };
    match split {
        Some(i) => Some((body[..i].parse().ok()?, imaginary(&body[i..])?)),
        None => Some((0.0, imaginary(body)?)),
    }
}

fn complex(builtin: Builtin, value: &Value) -> Result<(f64, f64), RuntimeError> {
    match value {
        Value::Number(n) => Ok((*n, 0.0)),
        other => parse_complex(&other.to_string())
            .ok_or_else(|| mismatch(builtin, "complex number like 3 + 4i", other)),
    }
}

fn format_complex(re: f64, im: f64) -> String {
    let clean = |v: f64| {
        let rounded = (v * 1e10).round() / 1e10;
        if rounded == 0.0 { 0.0 } else { rounded }
    };
    let (re, im) = (clean(re), clean(im));
    let sign = if im < 0.0 { "-" } else { "+" };
    format!("{} {} {}i", format_number(re), sign, format_number(im.abs()))
}

fn matrix(builtin: Builtin, value: &Value) -> Result<Matrix, RuntimeError> {
    let rows: Option<Matrix> = match value {
        Value::List(rows) if rows.iter().all(|r| matches!(r, Value::List(_))) => {
            Some(rows.iter().map(Value::as_number_list).collect())
        }
        Value::List(row) => Some(vec![value.as_number_list()]).filter(|_| !row.is_empty()),
        Value::Text(text) => serde_json::from_str::<Matrix>(text.trim()).ok(),
        _ => None,
    };
    match rows {
        Some(rows)
            if !rows.is_empty() && rows.iter().all(|r| r.len() == rows[0].len()) =>
        {
            Ok(rows)
        }
        _ => Err(mismatch(builtin, "matrix like [[1,2],[3,4]]", value)),
    }
}

fn same_shape(a: &Matrix, b: &Matrix) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(ra, rb)| ra.len() == rb.len())
}

fn matrix_value(m: Matrix) -> Value {
    Value::List(m.into_iter().map(Value::from).collect())
}

/// Gaussian elimination with partial pivoting.
fn determinant(mut m: Matrix) -> f64 {
    let n = m.len();
    let mut det = 1.0;
    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&a, &b| m[a][col].abs().total_cmp(&m[b][col].abs()))
            .unwrap_or(col);
        if m[pivot][col] == 0.0 {
            return 0.0;
        }
        if pivot != col {
            m.swap(pivot, col);
            det = -det;
        }
        det *= m[col][col];
        for row in col + 1..n {
            let factor = m[row][col] / m[col][col];
            for k in col..n {
                m[row][k] -= factor * m[col][k];
            }
        }
    }
    let rounded = (det * 1e10).round() / 1e10;
    if rounded == 0.0 { 0.0 } else { rounded }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statistics_over_text_lists() {
        let data = Value::from("3, 1, 2, 2");
        assert_eq!(call(Builtin::Median, &[data.clone()]).unwrap(), Value::Number(2.0));
        assert_eq!(call(Builtin::Mode, &[data.clone()]).unwrap(), Value::Number(2.0));
        assert_eq!(call(Builtin::Range, &[data.clone()]).unwrap(), Value::Number(2.0));
        assert_eq!(call(Builtin::Average, &[data]).unwrap(), Value::Number(2.0));
    }

    #[test]
    fn median_of_even_count_averages_the_middle() {
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn mode_prefers_smallest_on_tie() {
        assert_eq!(mode(&[5.0, 1.0, 5.0, 1.0, 3.0]), Some(1.0));
    }

    #[test]
    fn number_theory() {
        assert_eq!(gcd(12.0, 18.0), 6.0);
        assert_eq!(factorial(5.0), 120.0);
        assert_eq!(fibonacci(10.0), 55.0);
        assert!(is_prime(97.0));
        assert!(!is_prime(91.0));
        assert_eq!(prime_factors(60.0), vec![2.0, 2.0, 3.0, 5.0]);
    }

    #[test]
    fn huge_numbers_are_not_prime() {
        assert!(!is_prime(1e40));
        assert!(!is_prime(f64::INFINITY));
        assert!(is_prime(9_007_199_254_740_881.0));
    }

    #[test]
    fn repeat_is_bounded() {
        let repeated = call(Builtin::Repeat, &[Value::from("a"), Value::Number(3.0)]).unwrap();
        assert_eq!(repeated.to_string(), "a,a,a");
        assert!(matches!(
            call(Builtin::Repeat, &[Value::Number(1.0), Value::Number(1e19)]),
            Err(RuntimeError::InvalidArrayLength)
        ));
        assert_eq!(
            call(Builtin::Repeat, &[Value::Number(1.0), Value::Number(f64::NAN)]).unwrap(),
            Value::List(Vec::new())
        );
    }

    #[test]
    fn complex_arithmetic() {
        assert_eq!(parse_complex("3 + 4i"), Some((3.0, 4.0)));
        assert_eq!(parse_complex("-2-i"), Some((-2.0, -1.0)));
        assert_eq!(parse_complex("5i"), Some((0.0, 5.0)));
        assert_eq!(parse_complex("7"), Some((7.0, 0.0)));
        let product = call(
            Builtin::ComplexMultiply,
            &[Value::from("1 + 2i"), Value::from("3 - i")],
        )
        .unwrap();
        assert_eq!(product, Value::from("5 + 5i"));
        let modulus = call(Builtin::ComplexModulus, &[Value::from("3 + 4i")]).unwrap();
        assert_eq!(modulus, Value::Number(5.0));
    }

    #[test]
    fn matrices_from_lists_and_text() {
        let a = Value::List(vec![vec![1.0, 2.0].into(), vec![3.0, 4.0].into()]);
        let b = Value::from("[[5, 6], [7, 8]]");
        let product = call(Builtin::MatrixMultiply, &[a.clone(), b]).unwrap();
        assert_eq!(product.to_string(), "[19,22],[43,50]");
        assert_eq!(
            call(Builtin::Determinant, &[a.clone()]).unwrap(),
            Value::Number(-2.0)
        );
        assert_eq!(
            call(Builtin::MatrixTranspose, &[a]).unwrap().to_string(),
            "[1,3],[2,4]"
        );
    }

    #[test]
    fn to_fixed_matches_console_output() {
        assert_eq!(to_fixed(std::f64::consts::PI, 2.0), "3.14");
        assert_eq!(to_fixed(-0.0, 2.0), "0.00");
        assert_eq!(to_fixed(f64::NAN, 2.0), "NaN");
    }
}
