//! Middle school blocks.

use super::{BlockGenerator, FnGenerator, GenContext, GenResult, Generated};
use crate::ast::{Builtin, Expression, ShapeCall, ShapeKind, Statement};
use crate::error::CompileError;

fn log(caption: &str, value: Expression) -> GenResult {
    Ok(Statement::Log(vec![Expression::text(caption), value]).into())
}

fn list_call(ctx: &GenContext<'_>, builtin: Builtin) -> GenResult {
    Ok(Expression::call(builtin, vec![ctx.value("DATA")?]).into())
}

fn num(n: f64) -> Expression {
    Expression::num(n)
}

// --- Number theory and powers ---

fn ebob_hesapla(ctx: &GenContext<'_>) -> GenResult {
    Ok(Expression::call(Builtin::Gcd, vec![ctx.value("A")?, ctx.value("B")?]).into())
}

fn ekok_hesapla(ctx: &GenContext<'_>) -> GenResult {
    let a = ctx.value("A")?;
    let b = ctx.value("B")?;
    let gcd = Expression::call(Builtin::Gcd, vec![a.clone(), b.clone()]);
    Ok(((a * b).abs() / gcd).into())
}

fn uslu_sayi(ctx: &GenContext<'_>) -> GenResult {
    Ok(ctx.value("BASE")?.pow(ctx.value("EXPONENT")?).into())
}

fn karekok(ctx: &GenContext<'_>) -> GenResult {
    Ok(ctx.value("NUMBER")?.sqrt().into())
}

fn kupkok(ctx: &GenContext<'_>) -> GenResult {
    Ok(Expression::call(Builtin::Cbrt, vec![ctx.value("NUMBER")?]).into())
}

fn mutlak_deger(ctx: &GenContext<'_>) -> GenResult {
    Ok(ctx.value("NUMBER")?.abs().into())
}

fn asal_mi(ctx: &GenContext<'_>) -> GenResult {
    Ok(Expression::call(Builtin::IsPrime, vec![ctx.value("NUMBER")?]).into())
}

fn carpanlara_ayir(ctx: &GenContext<'_>) -> GenResult {
    let factors = Expression::call(Builtin::PrimeFactors, vec![ctx.value("NUMBER")?]);
    log("Asal çarpanlar:", factors)
}

// --- Fractions and percentages ---

fn kesir_topla(ctx: &GenContext<'_>) -> GenResult {
    log("Kesir toplama:", ctx.value("A")? + ctx.value("B")?)
}

fn kesir_olustur(ctx: &GenContext<'_>) -> GenResult {
    Ok(Expression::concat(vec![
        ctx.value("PAY")?,
        Expression::text("/"),
        ctx.value("PAYDA")?,
    ])
    .into())
}

fn kesir_sadeles(ctx: &GenContext<'_>) -> GenResult {
    let numerator = ctx.value("PAY")?;
    let denominator = ctx.value("PAYDA")?;
    let gcd = Expression::call(Builtin::Gcd, vec![numerator.clone(), denominator.clone()]);
    Ok(Expression::concat(vec![
        numerator / gcd.clone(),
        Expression::text("/"),
        denominator / gcd,
    ])
    .into())
}

fn ondalik_cevir(ctx: &GenContext<'_>) -> GenResult {
    log("Ondalık:", ctx.value("FRACTION")?)
}

fn yuzde_hesapla(ctx: &GenContext<'_>) -> GenResult {
    log("Yüzde:", ctx.value("NUMBER")? * ctx.value("PERCENT")? / num(100.0))
}

// --- Equations ---

/// `(c - b) / a`, the root of `a·x + b = c`.
fn linear_root(ctx: &GenContext<'_>) -> Result<Expression, CompileError> {
    Ok((ctx.value("C")? - ctx.value("B")?) / ctx.value("A")?)
}

fn denklem_coz(ctx: &GenContext<'_>) -> GenResult {
    log("x =", linear_root(ctx)?)
}

fn denklem_1_bilinmeyen(ctx: &GenContext<'_>) -> GenResult {
    Ok(linear_root(ctx)?.into())
}

fn cebirsel_ifade(ctx: &GenContext<'_>) -> GenResult {
    Ok(Expression::concat(vec![
        ctx.value("COEFFICIENT")?,
        Expression::text("x + "),
        ctx.value("CONSTANT")?,
    ])
    .into())
}

fn cebirsel_topla(ctx: &GenContext<'_>) -> GenResult {
    Ok(Expression::concat(vec![
        ctx.value("EXPR1")?,
        Expression::text(" + "),
        ctx.value("EXPR2")?,
    ])
    .into())
}

/// Cramer's rule for `a1·x + b1·y = c1`, `a2·x + b2·y = c2`.
fn denklem_sistemi(ctx: &GenContext<'_>) -> GenResult {
    let [a1, b1, c1, a2, b2, c2] = ["A1", "B1", "C1", "A2", "B2", "C2"].map(|name| ctx.value(name));
    let (a1, b1, c1, a2, b2, c2) = (a1?, b1?, c1?, a2?, b2?, c2?);
    let det = a1.clone() * b2.clone() - a2.clone() * b1.clone();
    let x = (c1.clone() * b2 - c2.clone() * b1) / det.clone();
    let y = (a1 * c2 - a2 * c1) / det.clone();
    Ok(Expression::conditional(
        det.equals(num(0.0)),
        Expression::text("Çözüm yok veya sonsuz çözüm"),
        Expression::concat(vec![
            Expression::text("x = "),
            x,
            Expression::text(", y = "),
            y,
        ]),
    )
    .into())
}

/// Solves `a·x <op> b`; dividing by a negative `a` flips the comparison.
fn esitsizlik(ctx: &GenContext<'_>) -> GenResult {
    let (symbol, flipped) = match ctx.field("OPERATOR").as_str() {
        "greater" => (">", "<"),
        "less" => ("<", ">"),
        "greater_equal" => ("≥", "≤"),
        "less_equal" => ("≤", "≥"),
        _ => return Err(ctx.invalid_field("OPERATOR")),
    };
    let a = ctx.value("A")?;
    let bound = ctx.value("B")? / a.clone();
    let solution = |op: &str| {
        Expression::concat(vec![Expression::text(format!("x {} ", op)), bound.clone()])
    };
    Ok(Expression::conditional(a.less_than(num(0.0)), solution(flipped), solution(symbol)).into())
}

// --- Coordinates, probability, charts ---

fn koordinat_ciz(ctx: &GenContext<'_>) -> GenResult {
    let x = ctx.value("X")?;
    let y = ctx.value("Y")?;
    let point = Expression::concat(vec![
        Expression::text("("),
        x.clone(),
        Expression::text(", "),
        y.clone(),
        Expression::text(")"),
    ]);
    Ok(Generated::Statements(vec![
        Statement::Log(vec![Expression::concat(vec![
            Expression::text("Koordinat: "),
            point.clone(),
        ])]),
        Statement::DrawShape(ShapeCall {
            kind: ShapeKind::Graph,
            shape: "nokta".to_string(),
            params: vec![("x".to_string(), x), ("y".to_string(), y)],
            label: point,
            calculation: Vec::new(),
        }),
    ]))
}

fn olasilik_hesapla(ctx: &GenContext<'_>) -> GenResult {
    log("Olasılık:", ctx.value("FAVORABLE")? / ctx.value("TOTAL")?)
}

fn grafik_ciz(ctx: &GenContext<'_>) -> GenResult {
    Ok(Statement::DrawChart {
        kind: ctx.field("CHART_TYPE"),
        data: ctx.value("DATA")?,
    }
    .into())
}

// --- Ratio and proportion ---

fn oran_hesapla(ctx: &GenContext<'_>) -> GenResult {
    Ok((ctx.value("A")? / ctx.value("B")?).into())
}

fn dogru_oranti(ctx: &GenContext<'_>) -> GenResult {
    Ok((ctx.value("B")? * ctx.value("C")? / ctx.value("A")?).into())
}

fn ters_oranti(ctx: &GenContext<'_>) -> GenResult {
    Ok((ctx.value("A")? * ctx.value("B")? / ctx.value("C")?).into())
}

fn olcek_hesapla(ctx: &GenContext<'_>) -> GenResult {
    Ok(Expression::concat(vec![
        Expression::text("1 : "),
        ctx.value("ACTUAL")? / ctx.value("MAP")?,
    ])
    .into())
}

fn indirim_hesapla(ctx: &GenContext<'_>) -> GenResult {
    let rate = num(1.0) - ctx.value("PERCENT")? / num(100.0);
    Ok((ctx.value("PRICE")? * rate).into())
}

fn artis_hesapla(ctx: &GenContext<'_>) -> GenResult {
    let rate = num(1.0) + ctx.value("PERCENT")? / num(100.0);
    Ok((ctx.value("VALUE")? * rate).into())
}

// --- Statistics ---

fn ortalama(ctx: &GenContext<'_>) -> GenResult {
    list_call(ctx, Builtin::Average)
}

fn mode(ctx: &GenContext<'_>) -> GenResult {
    list_call(ctx, Builtin::Mode)
}

fn medyan(ctx: &GenContext<'_>) -> GenResult {
    list_call(ctx, Builtin::Median)
}

fn ranj(ctx: &GenContext<'_>) -> GenResult {
    list_call(ctx, Builtin::Range)
}

// --- Angles and triangles ---

fn komsur_aci(ctx: &GenContext<'_>) -> GenResult {
    Ok((num(180.0) - ctx.value("ANGLE")?).into())
}

fn tumler_aci(ctx: &GenContext<'_>) -> GenResult {
    Ok((num(90.0) - ctx.value("ANGLE")?).into())
}

fn butunler_aci(ctx: &GenContext<'_>) -> GenResult {
    Ok((num(180.0) - ctx.value("ANGLE")?).into())
}

fn pisagor(ctx: &GenContext<'_>) -> GenResult {
    let a = ctx.value("A")?;
    let b = ctx.value("B")?;
    Ok((a.clone() * a + b.clone() * b).sqrt().into())
}

fn pisagor_dik_kenar(ctx: &GenContext<'_>) -> GenResult {
    let c = ctx.value("C")?;
    let a = ctx.value("A")?;
    Ok((c.clone() * c - a.clone() * a).sqrt().into())
}

define_block_generators! {
    "ebob_hesapla" => ebob_hesapla,
    "ekok_hesapla" => ekok_hesapla,
    "uslu_sayi" => uslu_sayi,
    "karekok" => karekok,
    "kupkok" => kupkok,
    "mutlak_deger" => mutlak_deger,
    "asal_mi" => asal_mi,
    "carpanlara_ayir" => carpanlara_ayir,
    "kesir_topla" => kesir_topla,
    "kesir_olustur" => kesir_olustur,
    "kesir_sadeles" => kesir_sadeles,
    "ondalik_cevir" => ondalik_cevir,
    "yuzde_hesapla" => yuzde_hesapla,
    "denklem_coz" => denklem_coz,
    "cebirsel_ifade" => cebirsel_ifade,
    "cebirsel_topla" => cebirsel_topla,
    "denklem_1_bilinmeyen" => denklem_1_bilinmeyen,
    "denklem_sistemi" => denklem_sistemi,
    "esitsizlik" => esitsizlik,
    "koordinat_ciz" => koordinat_ciz,
    "olasilik_hesapla" => olasilik_hesapla,
    "grafik_ciz" => grafik_ciz,
    "oran_hesapla" => oran_hesapla,
    "dogru_oranti" => dogru_oranti,
    "ters_oranti" => ters_oranti,
    "olcek_hesapla" => olcek_hesapla,
    "indirim_hesapla" => indirim_hesapla,
    "artis_hesapla" => artis_hesapla,
    "ortalama" => ortalama,
    "mod" => mode,
    "medyan" => medyan,
    "ranj" => ranj,
    "komsur_aci" => komsur_aci,
    "tumler_aci" => tumler_aci,
    "butunler_aci" => butunler_aci,
    "pisagor" => pisagor,
    "pisagor_dik_kenar" => pisagor_dik_kenar,
}
