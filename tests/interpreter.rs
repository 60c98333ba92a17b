//! Tests for sandboxed execution: output collection, error capture and value semantics.
mod common;
use blokmat::ast::{BinaryOp, Builtin};
use blokmat::interpreter::{ALERT_PREFIX, EMPTY_WORKSPACE_MESSAGE, ERROR_PREFIX, NO_OUTPUT_MESSAGE};
use blokmat::prelude::*;
use common::*;

fn num(n: f64) -> Expression {
    Expression::num(n)
}

#[test]
fn test_empty_program_reports_empty_workspace() {
    let program = Program {
        variables: vec!["x".to_string()],
        statements: Vec::new(),
    };
    assert_eq!(run_lines(&program), vec![EMPTY_WORKSPACE_MESSAGE]);
}

#[test]
fn test_silent_program_reports_success() {
    let program = program_of(vec![Statement::Assign {
        name: "x".to_string(),
        value: num(1.0),
    }]);
    assert_eq!(run_lines(&program), vec![NO_OUTPUT_MESSAGE]);
}

#[test]
fn test_each_log_call_is_one_line() {
    let program = program_of(vec![
        log(vec![Expression::text("a")]),
        log(vec![Expression::text("b")]),
    ]);
    assert_eq!(run_lines(&program), vec!["a", "b"]);
}

#[test]
fn test_log_arguments_are_joined_with_spaces() {
    let program = program_of(vec![log(vec![
        Expression::text("Toplam:"),
        num(2.0) + num(3.0),
        Expression::bool(true),
        Expression::null(),
    ])]);
    assert_eq!(run_lines(&program), vec!["Toplam: 5 true null"]);
}

#[test]
fn test_alert_is_prefixed() {
    let program = program_of(vec![Statement::Alert(Expression::text("Dikkat"))]);
    assert_eq!(run_lines(&program), vec![format!("{}Dikkat", ALERT_PREFIX)]);
}

#[test]
fn test_undefined_variable_is_a_single_error_line() {
    let program = program_of(vec![
        log(vec![Expression::text("önce")]),
        log(vec![Expression::var("y")]),
    ]);

    let result = Executor::new().execute(&program, &mut NoDrawing);
    assert!(result.is_error());
    assert_eq!(
        result.into_lines(),
        vec![format!("{}y is not defined", ERROR_PREFIX)]
    );
}

#[test]
fn test_declared_variables_start_as_null() {
    let program = Program {
        variables: vec!["x".to_string()],
        statements: vec![log(vec![Expression::var("x")])],
    };
    assert_eq!(run_lines(&program), vec!["null"]);
}

#[test]
fn test_runs_do_not_share_state() {
    let executor = Executor::new();
    let first = program_of(vec![Statement::Assign {
        name: "x".to_string(),
        value: num(7.0),
    }]);
    let second = program_of(vec![log(vec![Expression::var("x")])]);

    executor.execute(&first, &mut NoDrawing);
    assert!(executor.execute(&second, &mut NoDrawing).is_error());
}

#[test]
fn test_division_by_zero_is_not_an_error() {
    let program = program_of(vec![
        log(vec![num(1.0) / num(0.0)]),
        log(vec![num(0.0) / num(0.0)]),
        log(vec![-num(1.0) / num(0.0)]),
    ]);
    assert_eq!(run_lines(&program), vec!["Infinity", "NaN", "-Infinity"]);
}

#[test]
fn test_plus_concatenates_text() {
    let program = program_of(vec![
        log(vec![Expression::text("x=") + num(4.0)]),
        log(vec![num(1.0) + Expression::text("2")]),
        log(vec![num(1.0) + Expression::bool(true)]),
    ]);
    assert_eq!(run_lines(&program), vec!["x=4", "12", "2"]);
}

#[test]
fn test_comparisons() {
    let compare = |op, a: Expression, b: Expression| log(vec![Expression::binary(op, a, b)]);
    let program = program_of(vec![
        compare(BinaryOp::Less, Expression::text("10"), Expression::text("9")),
        compare(BinaryOp::Less, num(9.0), Expression::text("10")),
        compare(BinaryOp::Equal, num(1.0), Expression::text("1")),
        compare(BinaryOp::Greater, num(0.0) / num(0.0), num(1.0)),
    ]);
    assert_eq!(run_lines(&program), vec!["true", "true", "true", "false"]);
}

#[test]
fn test_repeat_and_for_loops() {
    let program = program_of(vec![
        Statement::Repeat {
            times: num(3.0),
            body: vec![log(vec![Expression::text("tekrar")])],
        },
        Statement::For {
            variable: "i".to_string(),
            from: num(10.0),
            to: num(4.0),
            step: num(3.0),
            body: vec![log(vec![Expression::var("i")])],
        },
    ]);
    assert_eq!(
        run_lines(&program),
        vec!["tekrar", "tekrar", "tekrar", "10", "7", "4"]
    );
}

#[test]
fn test_break_and_continue_inside_loops() {
    let program = program_of(vec![Statement::ForEach {
        variable: "n".to_string(),
        list: Expression::List(vec![num(1.0), num(2.0), num(3.0), num(4.0)]),
        body: vec![
            Statement::If {
                branches: vec![(
                    Expression::binary(BinaryOp::Equal, Expression::var("n"), num(2.0)),
                    vec![Statement::Continue],
                )],
                otherwise: None,
            },
            Statement::If {
                branches: vec![(
                    Expression::binary(BinaryOp::Equal, Expression::var("n"), num(4.0)),
                    vec![Statement::Break],
                )],
                otherwise: None,
            },
            log(vec![Expression::var("n")]),
        ],
    }]);
    assert_eq!(run_lines(&program), vec!["1", "3"]);
}

#[test]
fn test_loop_control_outside_a_loop_fails() {
    let program = program_of(vec![log(vec![Expression::text("a")]), Statement::Break]);
    let lines = run_lines(&program);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with(ERROR_PREFIX));
    assert!(lines[0].contains("break"));
}

#[test]
fn test_while_until() {
    let program = program_of(vec![
        Statement::Assign {
            name: "n".to_string(),
            value: num(0.0),
        },
        Statement::While {
            condition: Expression::binary(BinaryOp::GreaterEqual, Expression::var("n"), num(3.0)),
            until: true,
            body: vec![Statement::Assign {
                name: "n".to_string(),
                value: Expression::var("n") + num(1.0),
            }],
        },
        log(vec![Expression::var("n")]),
    ]);
    assert_eq!(run_lines(&program), vec!["3"]);
}

#[test]
fn test_list_indexing_and_removal() {
    let program = Program {
        variables: vec!["liste".to_string()],
        statements: vec![
            Statement::Assign {
                name: "liste".to_string(),
                value: Expression::List(vec![num(5.0), num(6.0), num(7.0)]),
            },
            log(vec![Expression::index(Expression::var("liste"), num(1.0))]),
            log(vec![Expression::index(Expression::var("liste"), num(9.0))]),
            log(vec![Expression::Take {
                list: "liste".to_string(),
                index: Box::new(num(0.0)),
            }]),
            Statement::SetIndex {
                list: "liste".to_string(),
                index: num(0.0),
                value: num(1.0),
                insert: true,
            },
            log(vec![Expression::var("liste")]),
        ],
    };
    assert_eq!(run_lines(&program), vec!["6", "null", "5", "1,6,7"]);
}

#[test]
fn test_indexing_null_fails() {
    let program = Program {
        variables: vec!["liste".to_string()],
        statements: vec![log(vec![Expression::index(Expression::var("liste"), num(0.0))])],
    };
    let lines = run_lines(&program);
    assert_eq!(
        lines,
        vec![format!("{}Cannot read properties of null (reading '0')", ERROR_PREFIX)]
    );
}

#[test]
fn test_setting_far_past_the_end_fails() {
    let program = Program {
        variables: vec!["liste".to_string()],
        statements: vec![
            Statement::Assign {
                name: "liste".to_string(),
                value: Expression::List(vec![num(1.0)]),
            },
            Statement::SetIndex {
                list: "liste".to_string(),
                index: num(3.0),
                value: num(4.0),
                insert: false,
            },
            log(vec![Expression::var("liste")]),
            Statement::SetIndex {
                list: "liste".to_string(),
                index: num(1e18),
                value: num(2.0),
                insert: false,
            },
        ],
    };
    assert_eq!(
        run_lines(&program),
        vec![format!("{}Invalid array length", ERROR_PREFIX)]
    );

    let grown = Program {
        statements: program.statements[..3].to_vec(),
        ..program
    };
    assert_eq!(run_lines(&grown), vec!["1,,,4"]);
}

#[test]
fn test_huge_repeat_count_fails() {
    let program = program_of(vec![log(vec![Expression::call(
        Builtin::Repeat,
        vec![num(1.0), num(1e19)],
    )])]);
    assert_eq!(
        run_lines(&program),
        vec![format!("{}Invalid array length", ERROR_PREFIX)]
    );
}

#[test]
fn test_builtin_calls() {
    let call = |builtin, args| log(vec![Expression::call(builtin, args)]);
    let list = || Expression::List(vec![num(3.0), num(1.0), num(2.0)]);
    let program = program_of(vec![
        call(Builtin::Sum, vec![list()]),
        call(Builtin::Median, vec![list()]),
        call(Builtin::Round, vec![num(2.5)]),
        call(Builtin::ToFixed, vec![num(3.14159), num(2.0)]),
    ]);
    assert_eq!(run_lines(&program), vec!["6", "2", "3", "3.14"]);
}

#[test]
fn test_random_int_stays_in_range() {
    let program = program_of(vec![Statement::Repeat {
        times: num(50.0),
        body: vec![log(vec![Expression::call(
            Builtin::RandomInt,
            vec![num(6.0), num(1.0)],
        )])],
    }]);
    for line in run_lines(&program) {
        let value: f64 = line.parse().unwrap();
        assert!((1.0..=6.0).contains(&value));
        assert_eq!(value.fract(), 0.0);
    }
}

#[test]
fn test_compiled_workspace_runs() {
    let workspace = workspace_of(vec![
        set_var("x", arithmetic("MULTIPLY", Block::number(6.0), Block::number(7.0)))
            .then(show(Block::variable("x"))),
    ]);
    let (lines, router) = compile_and_run(Level::Ortaokul, &workspace);
    assert_eq!(lines, vec!["📊 Sonuç = 42"]);
    assert!(router.visualization().is_none());
}
