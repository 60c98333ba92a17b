use super::{BlockDefinition, BlockGroup, DEFAULT_VARIABLE, ValueType};
use crate::ast::Value;

const WHERE: &[&str] = &["FROM_START", "FROM_END", "FIRST", "LAST", "RANDOM"];

fn statement(block_type: &str) -> BlockDefinition {
    BlockDefinition::statement(block_type, BlockGroup::Standard)
}

fn output(block_type: &str, output: ValueType) -> BlockDefinition {
    BlockDefinition::output(block_type, BlockGroup::Standard, output)
}

/// Stock logic, loop, math, text, list and variable blocks shared by every level.
pub(super) fn standard_blocks() -> Vec<BlockDefinition> {
    use ValueType::*;
    vec![
        // Logic
        statement("controls_if")
            .value("IF#", Boolean)
            .statement_input("DO#")
            .statement_input("ELSE"),
        statement("controls_ifelse")
            .value("IF0", Boolean)
            .statement_input("DO0")
            .statement_input("ELSE"),
        output("logic_compare", Boolean)
            .dropdown("OP", &["EQ", "NEQ", "LT", "LTE", "GT", "GTE"])
            .value("A", Any)
            .value("B", Any),
        output("logic_operation", Boolean)
            .dropdown("OP", &["AND", "OR"])
            .value("A", Boolean)
            .value("B", Boolean),
        output("logic_negate", Boolean).value_with_default("BOOL", Boolean, true),
        output("logic_boolean", Boolean).dropdown("BOOL", &["TRUE", "FALSE"]),
        output("logic_null", Any),
        output("logic_ternary", Any)
            .value("IF", Boolean)
            .value_with_default("THEN", Any, Value::Null)
            .value_with_default("ELSE", Any, Value::Null),
        // Loops
        statement("controls_repeat_ext")
            .value("TIMES", Number)
            .statement_input("DO"),
        statement("controls_whileUntil")
            .dropdown("MODE", &["WHILE", "UNTIL"])
            .value("BOOL", Boolean)
            .statement_input("DO"),
        statement("controls_for")
            .field("VAR", "i")
            .value("FROM", Number)
            .value("TO", Number)
            .value_with_default("BY", Number, 1.0)
            .statement_input("DO"),
        statement("controls_forEach")
            .field("VAR", "j")
            .value("LIST", Array)
            .statement_input("DO"),
        statement("controls_flow_statements").dropdown("FLOW", &["BREAK", "CONTINUE"]),
        // Math
        output("math_number", Number).field("NUM", "0"),
        output("math_arithmetic", Number)
            .dropdown("OP", &["ADD", "MINUS", "MULTIPLY", "DIVIDE", "POWER"])
            .value("A", Number)
            .value("B", Number),
        output("math_single", Number)
            .dropdown("OP", &["ROOT", "ABS", "NEG", "LN", "LOG10", "EXP", "POW10"])
            .value("NUM", Number),
        output("math_trig", Number)
            .dropdown("OP", &["SIN", "COS", "TAN", "ASIN", "ACOS", "ATAN"])
            .value("NUM", Number),
        output("math_constant", Number).dropdown(
            "CONSTANT",
            &["PI", "E", "GOLDEN_RATIO", "SQRT2", "SQRT1_2", "INFINITY"],
        ),
        output("math_round", Number)
            .dropdown("OP", &["ROUND", "ROUNDUP", "ROUNDDOWN"])
            .value("NUM", Number),
        output("math_modulo", Number)
            .value("DIVIDEND", Number)
            .value("DIVISOR", Number),
        output("math_constrain", Number)
            .value("VALUE", Number)
            .value("LOW", Number)
            .value_with_default("HIGH", Number, f64::INFINITY),
        output("math_random_int", Number)
            .value("FROM", Number)
            .value("TO", Number),
        output("math_random_float", Number),
        output("math_on_list", Number)
            .dropdown(
                "OP",
                &["SUM", "MIN", "MAX", "AVERAGE", "MEDIAN", "MODE", "STD_DEV", "RANDOM"],
            )
            .value("LIST", Array),
        // Text
        output("text", String).field("TEXT", ""),
        statement("text_print").value_with_default("TEXT", Any, ""),
        output("text_join", String).value_with_default("ADD#", Any, ""),
        statement("text_append")
            .field("VAR", DEFAULT_VARIABLE)
            .value_with_default("TEXT", Any, ""),
        output("text_length", Number).value_with_default("VALUE", Any, ""),
        output("text_isEmpty", Boolean).value_with_default("VALUE", Any, ""),
        output("text_indexOf", Number)
            .dropdown("END", &["FIRST", "LAST"])
            .value("VALUE", String)
            .value("FIND", String),
        output("text_charAt", String)
            .dropdown("WHERE", WHERE)
            .value("VALUE", String)
            .value_with_default("AT", Number, 1.0),
        // Lists
        output("lists_create_with", Array).value_with_default("ADD#", Any, Value::Null),
        output("lists_create_empty", Array),
        output("lists_repeat", Array)
            .value_with_default("ITEM", Any, Value::Null)
            .value("NUM", Number),
        output("lists_length", Number).value_with_default("VALUE", Any, Value::List(Vec::new())),
        output("lists_isEmpty", Boolean)
            .value_with_default("VALUE", Any, Value::List(Vec::new())),
        output("lists_indexOf", Number)
            .dropdown("END", &["FIRST", "LAST"])
            .value("VALUE", Array)
            .value_with_default("FIND", Any, Value::Null),
        BlockDefinition::flexible("lists_getIndex", BlockGroup::Standard, Any)
            .dropdown("MODE", &["GET", "GET_REMOVE", "REMOVE"])
            .dropdown("WHERE", WHERE)
            .value("VALUE", Array)
            .value_with_default("AT", Number, 1.0),
        statement("lists_setIndex")
            .dropdown("MODE", &["SET", "INSERT"])
            .dropdown("WHERE", WHERE)
            .value("LIST", Array)
            .value_with_default("AT", Number, 1.0)
            .value_with_default("TO", Any, Value::Null),
        // Variables
        output("variables_get", Any).field("VAR", DEFAULT_VARIABLE),
        statement("variables_set")
            .field("VAR", DEFAULT_VARIABLE)
            .value("VALUE", Any),
        statement("math_change")
            .field("VAR", DEFAULT_VARIABLE)
            .value_with_default("DELTA", Number, 1.0),
    ]
}

/// Custom blocks of the general-purpose editor.
pub(super) fn genel_blocks() -> Vec<BlockDefinition> {
    let genel = |name| BlockDefinition::statement(name, BlockGroup::Genel);
    vec![
        genel("hello_world"),
        genel("alert_message").value("MESSAGE", ValueType::String),
        genel("repeat_times")
            .value("TIMES", ValueType::Number)
            .statement_input("DO"),
    ]
}
