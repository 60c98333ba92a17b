//! Blocks shared by every math level.

use super::{BlockGenerator, FnGenerator, GenContext, GenResult};
use crate::ast::{BinaryOp, Expression, Statement};

fn hesapla_goster(ctx: &GenContext<'_>) -> GenResult {
    let value = Expression::binary(BinaryOp::Or, ctx.value("VALUE")?, Expression::num(0.0));
    Ok(Statement::Log(vec![Expression::text("🧮 Hesaplama Sonucu:"), value]).into())
}

fn sonuc_goster(ctx: &GenContext<'_>) -> GenResult {
    Ok(Statement::Log(vec![Expression::text("📊 Sonuç ="), ctx.value("VALUE")?]).into())
}

define_block_generators! {
    "hesapla_goster" => hesapla_goster,
    "sonuc_goster" => sonuc_goster,
}
