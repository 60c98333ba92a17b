//! Generators for the stock logic, loop, math, text, list and variable blocks.

use super::{BlockGenerator, FnGenerator, GenContext, GenResult, Generated, MAX_ITEM_SLOTS};
use crate::ast::{BinaryOp, Builtin, Expression, MathConstant, Statement};
use crate::catalog::DEFAULT_VARIABLE;
use crate::error::CompileError;

/// Highest numeric suffix among slots named `prefix<N>`, plus one.
fn numbered_slot_count(ctx: &GenContext<'_>, prefixes: &[&str]) -> usize {
    let block = ctx.block();
    block
        .values
        .keys()
        .chain(block.statements.keys())
        .filter_map(|key| {
            prefixes
                .iter()
                .find_map(|prefix| key.strip_prefix(prefix))
                .and_then(|n| n.parse::<usize>().ok())
        })
        .filter(|&n| n < MAX_ITEM_SLOTS)
        .map(|n| n + 1)
        .max()
        .unwrap_or(0)
}

// --- Logic ---

fn controls_if(ctx: &GenContext<'_>) -> GenResult {
    let count = (ctx.mutation_count("elseif") + 1).max(numbered_slot_count(ctx, &["IF", "DO"]));
    let mut branches = Vec::with_capacity(count);
    for i in 0..count.max(1) {
        branches.push((
            ctx.value(&format!("IF{}", i))?,
            ctx.statements(&format!("DO{}", i))?,
        ));
    }
    let has_else = ctx.mutation_count("else") > 0 || ctx.block().statement("ELSE").is_some();
    let otherwise = if has_else {
        Some(ctx.statements("ELSE")?)
    } else {
        None
    };
    Ok(Statement::If {
        branches,
        otherwise,
    }
    .into())
}

fn controls_ifelse(ctx: &GenContext<'_>) -> GenResult {
    Ok(Statement::If {
        branches: vec![(ctx.value("IF0")?, ctx.statements("DO0")?)],
        otherwise: Some(ctx.statements("ELSE")?),
    }
    .into())
}

fn logic_compare(ctx: &GenContext<'_>) -> GenResult {
    let op = match ctx.field("OP").as_str() {
        "EQ" => BinaryOp::Equal,
        "NEQ" => BinaryOp::NotEqual,
        "LT" => BinaryOp::Less,
        "LTE" => BinaryOp::LessEqual,
        "GT" => BinaryOp::Greater,
        "GTE" => BinaryOp::GreaterEqual,
        _ => return Err(ctx.invalid_field("OP")),
    };
    Ok(Expression::binary(op, ctx.value("A")?, ctx.value("B")?).into())
}

fn logic_operation(ctx: &GenContext<'_>) -> GenResult {
    let op = match ctx.field("OP").as_str() {
        "AND" => BinaryOp::And,
        "OR" => BinaryOp::Or,
        _ => return Err(ctx.invalid_field("OP")),
    };
    Ok(Expression::binary(op, ctx.value("A")?, ctx.value("B")?).into())
}

fn logic_negate(ctx: &GenContext<'_>) -> GenResult {
    Ok(ctx.value("BOOL")?.logical_not().into())
}

fn logic_boolean(ctx: &GenContext<'_>) -> GenResult {
    Ok(Expression::bool(ctx.field("BOOL") == "TRUE").into())
}

fn logic_null(_ctx: &GenContext<'_>) -> GenResult {
    Ok(Expression::null().into())
}

fn logic_ternary(ctx: &GenContext<'_>) -> GenResult {
    Ok(Expression::conditional(ctx.value("IF")?, ctx.value("THEN")?, ctx.value("ELSE")?).into())
}

// --- Loops ---

fn controls_repeat_ext(ctx: &GenContext<'_>) -> GenResult {
    Ok(Statement::Repeat {
        times: ctx.value("TIMES")?,
        body: ctx.statements("DO")?,
    }
    .into())
}

fn controls_while_until(ctx: &GenContext<'_>) -> GenResult {
    Ok(Statement::While {
        condition: ctx.value("BOOL")?,
        until: ctx.field("MODE") == "UNTIL",
        body: ctx.statements("DO")?,
    }
    .into())
}

fn controls_for(ctx: &GenContext<'_>) -> GenResult {
    Ok(Statement::For {
        variable: ctx.field("VAR"),
        from: ctx.value("FROM")?,
        to: ctx.value("TO")?,
        step: ctx.value("BY")?,
        body: ctx.statements("DO")?,
    }
    .into())
}

fn controls_for_each(ctx: &GenContext<'_>) -> GenResult {
    Ok(Statement::ForEach {
        variable: ctx.field("VAR"),
        list: ctx.value("LIST")?,
        body: ctx.statements("DO")?,
    }
    .into())
}

fn controls_flow_statements(ctx: &GenContext<'_>) -> GenResult {
    match ctx.field("FLOW").as_str() {
        "BREAK" => Ok(Statement::Break.into()),
        "CONTINUE" => Ok(Statement::Continue.into()),
        _ => Err(ctx.invalid_field("FLOW")),
    }
}

// --- Math ---

fn math_number(ctx: &GenContext<'_>) -> GenResult {
    Ok(Expression::num(ctx.field_number("NUM")).into())
}

fn math_arithmetic(ctx: &GenContext<'_>) -> GenResult {
    let (a, b) = (ctx.value("A")?, ctx.value("B")?);
    let expression = match ctx.field("OP").as_str() {
        "ADD" => a + b,
        "MINUS" => a - b,
        "MULTIPLY" => a * b,
        "DIVIDE" => a / b,
        "POWER" => a.pow(b),
        _ => return Err(ctx.invalid_field("OP")),
    };
    Ok(expression.into())
}

fn math_single(ctx: &GenContext<'_>) -> GenResult {
    let n = ctx.value("NUM")?;
    let expression = match ctx.field("OP").as_str() {
        "ROOT" => n.sqrt(),
        "ABS" => n.abs(),
        "NEG" => -n,
        "LN" => Expression::call(Builtin::Ln, vec![n]),
        "LOG10" => Expression::call(Builtin::Log10, vec![n]),
        "EXP" => Expression::call(Builtin::Exp, vec![n]),
        "POW10" => Expression::num(10.0).pow(n),
        _ => return Err(ctx.invalid_field("OP")),
    };
    Ok(expression.into())
}

fn math_trig(ctx: &GenContext<'_>) -> GenResult {
    let n = ctx.value("NUM")?;
    let radians = || n.clone() / Expression::num(180.0) * Expression::pi();
    let degrees = |builtin| {
        Expression::call(builtin, vec![n.clone()]) / Expression::pi() * Expression::num(180.0)
    };
    let expression = match ctx.field("OP").as_str() {
        "SIN" => Expression::call(Builtin::Sin, vec![radians()]),
        "COS" => Expression::call(Builtin::Cos, vec![radians()]),
        "TAN" => Expression::call(Builtin::Tan, vec![radians()]),
        "ASIN" => degrees(Builtin::Asin),
        "ACOS" => degrees(Builtin::Acos),
        "ATAN" => degrees(Builtin::Atan),
        _ => return Err(ctx.invalid_field("OP")),
    };
    Ok(expression.into())
}

fn math_constant(ctx: &GenContext<'_>) -> GenResult {
    let constant = match ctx.field("CONSTANT").as_str() {
        "PI" => MathConstant::Pi,
        "E" => MathConstant::E,
        "GOLDEN_RATIO" => MathConstant::GoldenRatio,
        "SQRT2" => MathConstant::Sqrt2,
        "SQRT1_2" => MathConstant::Sqrt1_2,
        "INFINITY" => MathConstant::Infinity,
        _ => return Err(ctx.invalid_field("CONSTANT")),
    };
    Ok(Expression::Constant(constant).into())
}

fn math_round(ctx: &GenContext<'_>) -> GenResult {
    let builtin = match ctx.field("OP").as_str() {
        "ROUND" => Builtin::Round,
        "ROUNDUP" => Builtin::Ceil,
        "ROUNDDOWN" => Builtin::Floor,
        _ => return Err(ctx.invalid_field("OP")),
    };
    Ok(Expression::call(builtin, vec![ctx.value("NUM")?]).into())
}

fn math_modulo(ctx: &GenContext<'_>) -> GenResult {
    Ok((ctx.value("DIVIDEND")? % ctx.value("DIVISOR")?).into())
}

fn math_constrain(ctx: &GenContext<'_>) -> GenResult {
    let lower = Expression::call(Builtin::Max, vec![ctx.value("VALUE")?, ctx.value("LOW")?]);
    Ok(Expression::call(Builtin::Min, vec![lower, ctx.value("HIGH")?]).into())
}

fn math_random_int(ctx: &GenContext<'_>) -> GenResult {
    Ok(Expression::call(Builtin::RandomInt, vec![ctx.value("FROM")?, ctx.value("TO")?]).into())
}

fn math_random_float(_ctx: &GenContext<'_>) -> GenResult {
    Ok(Expression::call(Builtin::RandomFloat, Vec::new()).into())
}

fn math_on_list(ctx: &GenContext<'_>) -> GenResult {
    let builtin = match ctx.field("OP").as_str() {
        "SUM" => Builtin::Sum,
        "MIN" => Builtin::ListMin,
        "MAX" => Builtin::ListMax,
        "AVERAGE" => Builtin::Average,
        "MEDIAN" => Builtin::Median,
        "MODE" => Builtin::Mode,
        "STD_DEV" => Builtin::StdDev,
        "RANDOM" => Builtin::RandomItem,
        _ => return Err(ctx.invalid_field("OP")),
    };
    Ok(Expression::call(builtin, vec![ctx.value("LIST")?]).into())
}

// --- Text ---

fn text(ctx: &GenContext<'_>) -> GenResult {
    Ok(Expression::text(ctx.field("TEXT")).into())
}

fn text_print(ctx: &GenContext<'_>) -> GenResult {
    Ok(Statement::Alert(ctx.value("TEXT")?).into())
}

fn text_join(ctx: &GenContext<'_>) -> GenResult {
    let count = ctx
        .block()
        .mutation
        .get("items")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(2)
        .max(numbered_slot_count(ctx, &["ADD"]))
        .min(MAX_ITEM_SLOTS);
    let parts = (0..count)
        .map(|i| ctx.value(&format!("ADD{}", i)))
        .collect::<Result<Vec<_>, _>>()?;
    let expression = match parts.len() {
        0 => Expression::text(""),
        1 => Expression::call(Builtin::ToText, parts),
        _ => Expression::call(Builtin::Concat, parts),
    };
    Ok(expression.into())
}

fn text_append(ctx: &GenContext<'_>) -> GenResult {
    let name = ctx.field("VAR");
    let appended = Expression::call(
        Builtin::Concat,
        vec![Expression::var(name.clone()), ctx.value("TEXT")?],
    );
    Ok(Statement::Assign {
        name,
        value: appended,
    }
    .into())
}

fn text_length(ctx: &GenContext<'_>) -> GenResult {
    Ok(Expression::call(Builtin::Length, vec![ctx.value("VALUE")?]).into())
}

fn text_is_empty(ctx: &GenContext<'_>) -> GenResult {
    Ok(Expression::call(Builtin::IsEmpty, vec![ctx.value("VALUE")?]).into())
}

/// One-based position of `FIND` inside `VALUE`, `0` when absent.
fn index_of(ctx: &GenContext<'_>) -> GenResult {
    let builtin = match ctx.field("END").as_str() {
        "FIRST" => Builtin::IndexOf,
        "LAST" => Builtin::LastIndexOf,
        _ => return Err(ctx.invalid_field("END")),
    };
    let found = Expression::call(builtin, vec![ctx.value("VALUE")?, ctx.value("FIND")?]);
    Ok((found + Expression::num(1.0)).into())
}

/// Zero-based index selected by a `WHERE` dropdown over `target`.
fn where_index(
    ctx: &GenContext<'_>,
    target: &Expression,
    append: bool,
) -> Result<Expression, CompileError> {
    let length = || Expression::call(Builtin::Length, vec![target.clone()]);
    let index = match ctx.field("WHERE").as_str() {
        "FROM_START" => ctx.value("AT")? - Expression::num(1.0),
        "FROM_END" => length() - ctx.value("AT")?,
        "FIRST" => Expression::num(0.0),
        "LAST" if append => length(),
        "LAST" => length() - Expression::num(1.0),
        "RANDOM" => Expression::call(
            Builtin::RandomInt,
            vec![Expression::num(0.0), length() - Expression::num(1.0)],
        ),
        _ => return Err(ctx.invalid_field("WHERE")),
    };
    Ok(index)
}

fn text_char_at(ctx: &GenContext<'_>) -> GenResult {
    let value = ctx.value("VALUE")?;
    let index = where_index(ctx, &value, false)?;
    Ok(Expression::call(Builtin::CharAt, vec![value, index]).into())
}

// --- Lists ---

fn lists_create_with(ctx: &GenContext<'_>) -> GenResult {
    let count = ctx
        .block()
        .mutation
        .get("items")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(0)
        .max(numbered_slot_count(ctx, &["ADD"]))
        .min(MAX_ITEM_SLOTS);
    let items = (0..count)
        .map(|i| ctx.value(&format!("ADD{}", i)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Expression::List(items).into())
}

fn lists_create_empty(_ctx: &GenContext<'_>) -> GenResult {
    Ok(Expression::List(Vec::new()).into())
}

fn lists_repeat(ctx: &GenContext<'_>) -> GenResult {
    Ok(Expression::call(Builtin::Repeat, vec![ctx.value("ITEM")?, ctx.value("NUM")?]).into())
}

fn lists_length(ctx: &GenContext<'_>) -> GenResult {
    Ok(Expression::call(Builtin::Length, vec![ctx.value("VALUE")?]).into())
}

fn lists_is_empty(ctx: &GenContext<'_>) -> GenResult {
    Ok(Expression::call(Builtin::IsEmpty, vec![ctx.value("VALUE")?]).into())
}

/// Name of the variable plugged into `slot`, if the slot holds a plain variable read.
fn variable_in(ctx: &GenContext<'_>, slot: &str) -> Option<String> {
    ctx.block()
        .value(slot)
        .filter(|child| child.block_type == "variables_get")
        .map(|child| child.field("VAR").unwrap_or(DEFAULT_VARIABLE).to_string())
}

fn lists_get_index(ctx: &GenContext<'_>) -> GenResult {
    let list = ctx.value("VALUE")?;
    let index = where_index(ctx, &list, false)?;
    let expression = match (ctx.field("MODE").as_str(), variable_in(ctx, "VALUE")) {
        ("GET", _) | (_, None) => Expression::index(list, index),
        ("GET_REMOVE" | "REMOVE", Some(name)) => Expression::Take {
            list: name,
            index: Box::new(index),
        },
        _ => return Err(ctx.invalid_field("MODE")),
    };
    Ok(expression.into())
}

fn lists_set_index(ctx: &GenContext<'_>) -> GenResult {
    let insert = match ctx.field("MODE").as_str() {
        "SET" => false,
        "INSERT" => true,
        _ => return Err(ctx.invalid_field("MODE")),
    };
    let value = ctx.value("TO")?;
    let Some(name) = variable_in(ctx, "LIST") else {
        return Ok(Statement::Expression(value).into());
    };
    let index = where_index(ctx, &Expression::var(name.clone()), insert)?;
    Ok(Statement::SetIndex {
        list: name,
        index,
        value,
        insert,
    }
    .into())
}

// --- Variables ---

fn variables_get(ctx: &GenContext<'_>) -> GenResult {
    Ok(Expression::var(ctx.field("VAR")).into())
}

fn variables_set(ctx: &GenContext<'_>) -> GenResult {
    Ok(Statement::Assign {
        name: ctx.field("VAR"),
        value: ctx.value("VALUE")?,
    }
    .into())
}

fn math_change(ctx: &GenContext<'_>) -> GenResult {
    let name = ctx.field("VAR");
    let current = Expression::call(Builtin::NumberOrZero, vec![Expression::var(name.clone())]);
    Ok(Generated::statement(Statement::Assign {
        name,
        value: current + ctx.value("DELTA")?,
    }))
}

define_block_generators! {
    "controls_if" => controls_if,
    "controls_ifelse" => controls_ifelse,
    "logic_compare" => logic_compare,
    "logic_operation" => logic_operation,
    "logic_negate" => logic_negate,
    "logic_boolean" => logic_boolean,
    "logic_null" => logic_null,
    "logic_ternary" => logic_ternary,
    "controls_repeat_ext" => controls_repeat_ext,
    "controls_whileUntil" => controls_while_until,
    "controls_for" => controls_for,
    "controls_forEach" => controls_for_each,
    "controls_flow_statements" => controls_flow_statements,
    "math_number" => math_number,
    "math_arithmetic" => math_arithmetic,
    "math_single" => math_single,
    "math_trig" => math_trig,
    "math_constant" => math_constant,
    "math_round" => math_round,
    "math_modulo" => math_modulo,
    "math_constrain" => math_constrain,
    "math_random_int" => math_random_int,
    "math_random_float" => math_random_float,
    "math_on_list" => math_on_list,
    "text" => text,
    "text_print" => text_print,
    "text_join" => text_join,
    "text_append" => text_append,
    "text_length" => text_length,
    "text_isEmpty" => text_is_empty,
    "text_indexOf" => index_of,
    "text_charAt" => text_char_at,
    "lists_create_with" => lists_create_with,
    "lists_create_empty" => lists_create_empty,
    "lists_repeat" => lists_repeat,
    "lists_length" => lists_length,
    "lists_isEmpty" => lists_is_empty,
    "lists_indexOf" => index_of,
    "lists_getIndex" => lists_get_index,
    "lists_setIndex" => lists_set_index,
    "variables_get" => variables_get,
    "variables_set" => variables_set,
    "math_change" => math_change,
}
