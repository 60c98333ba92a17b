//! Custom blocks of the general-purpose editor.

use super::{BlockGenerator, FnGenerator, GenContext, GenResult};
use crate::ast::{Expression, Statement};

fn hello_world(_ctx: &GenContext<'_>) -> GenResult {
    Ok(Statement::Log(vec![Expression::text("Merhaba Dünya!")]).into())
}

fn alert_message(ctx: &GenContext<'_>) -> GenResult {
    Ok(Statement::Alert(ctx.value("MESSAGE")?).into())
}

fn repeat_times(ctx: &GenContext<'_>) -> GenResult {
    Ok(Statement::Repeat {
        times: ctx.value("TIMES")?,
        body: ctx.statements("DO")?,
    }
    .into())
}

define_block_generators! {
    "hello_world" => hello_world,
    "alert_message" => alert_message,
    "repeat_times" => repeat_times,
}
