//! Common test utilities for building workspaces and programs.
use blokmat::prelude::*;

/// A workspace holding `blocks` as top-level chains, in order.
#[allow(dead_code)]
pub fn workspace_of(blocks: Vec<Block>) -> Workspace {
    let mut workspace = Workspace::new();
    for block in blocks {
        workspace.add_block(block);
    }
    workspace
}

/// `variables_set` writing `value` into `name`.
#[allow(dead_code)]
pub fn set_var(name: &str, value: Block) -> Block {
    Block::new("variables_set")
        .with_field("VAR", name)
        .with_value("VALUE", value)
}

/// `math_arithmetic` with operator `op` (ADD, MINUS, MULTIPLY, DIVIDE, POWER).
#[allow(dead_code)]
pub fn arithmetic(op: &str, a: Block, b: Block) -> Block {
    Block::new("math_arithmetic")
        .with_field("OP", op)
        .with_value("A", a)
        .with_value("B", b)
}

/// `sonuc_goster`, which logs `📊 Sonuç = <value>`.
#[allow(dead_code)]
pub fn show(value: Block) -> Block {
    Block::new("sonuc_goster").with_value("VALUE", value)
}

/// A program of `statements` with no declared variables.
#[allow(dead_code)]
pub fn program_of(statements: Vec<Statement>) -> Program {
    Program {
        variables: Vec::new(),
        statements,
    }
}

#[allow(dead_code)]
pub fn log(args: Vec<Expression>) -> Statement {
    Statement::Log(args)
}

/// Runs `program` without any drawing surface and returns its output lines.
#[allow(dead_code)]
pub fn run_lines(program: &Program) -> Vec<String> {
    Executor::new().execute(program, &mut NoDrawing).into_lines()
}

/// Compiles `workspace` at `level` and runs it through a fresh router.
#[allow(dead_code)]
pub fn compile_and_run(level: Level, workspace: &Workspace) -> (Vec<String>, OutputRouter) {
    let program = Compiler::new(level)
        .compile(workspace)
        .expect("workspace should compile");
    let mut router = OutputRouter::new();
    let lines = router.route(&Executor::new(), &program).to_vec();
    (lines, router)
}
