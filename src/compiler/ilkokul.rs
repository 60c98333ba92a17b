//! Elementary school blocks: place value, the four operations, areas and unit conversions.

use super::{BlockGenerator, FnGenerator, GenContext, GenResult, Generated, draw_and_calculate};
use crate::ast::BinaryOp::{Divide, Multiply};
use crate::ast::{BinaryOp, Builtin, Expression, ShapeKind, Statement, format_number};
use crate::error::CompileError;

/// Scales `VALUE` by the factor listed for the selected `CONVERSION`.
fn convert(
    ctx: &GenContext<'_>,
    input: &str,
    field: &str,
    table: &[(&str, BinaryOp, f64)],
) -> GenResult {
    let value = ctx.value(input)?;
    let selected = ctx.field(field);
    let (_, op, factor) = table
        .iter()
        .find(|(name, ..)| *name == selected)
        .ok_or_else(|| ctx.invalid_field(field))?;
    Ok(Expression::binary(*op, value, Expression::num(*factor)).into())
}

/// `"<caption>: " + a + " <symbol> " + b + " ="` followed by the result.
fn operation(ctx: &GenContext<'_>, caption: &str, symbol: &str, op: BinaryOp) -> GenResult {
    let a = ctx.value("A")?;
    let b = ctx.value("B")?;
    let title = Expression::concat(vec![
        Expression::text(format!("{}: ", caption)),
        a.clone(),
        Expression::text(format!(" {} ", symbol)),
        b.clone(),
        Expression::text(" ="),
    ]);
    Ok(Statement::Log(vec![title, Expression::binary(op, a, b)]).into())
}

// --- Numbers ---

fn sayi_okuma(ctx: &GenContext<'_>) -> GenResult {
    let number = ctx.field("NUMBER");
    Ok(Statement::Log(vec![Expression::text(format!("{} sayısını okuyorum", number))]).into())
}

fn basamak_deger(ctx: &GenContext<'_>) -> GenResult {
    let place = ctx.field_number("PLACE");
    let digit = Expression::call(
        Builtin::Floor,
        vec![ctx.value("NUMBER")?.abs() / Expression::num(place)],
    ) % Expression::num(10.0);
    Ok((digit * Expression::num(place)).into())
}

fn cift_tek(ctx: &GenContext<'_>) -> GenResult {
    let even = (ctx.value("NUMBER")? % Expression::num(2.0)).equals(Expression::num(0.0));
    Ok(Expression::conditional(even, Expression::text("Çift"), Expression::text("Tek")).into())
}

fn buyuk_kucuk(ctx: &GenContext<'_>) -> GenResult {
    let a = ctx.value("A")?;
    let b = ctx.value("B")?;
    Ok(Expression::conditional(
        Expression::binary(BinaryOp::Greater, a.clone(), b.clone()),
        Expression::text("Büyük"),
        Expression::conditional(
            a.less_than(b),
            Expression::text("Küçük"),
            Expression::text("Eşit"),
        ),
    )
    .into())
}

fn carpim_tablosu(ctx: &GenContext<'_>) -> GenResult {
    let n = ctx.field_number("NUMBER");
    let rows = (1..=10)
        .map(|i| {
            let line = format!(
                "{} × {} = {}",
                format_number(n),
                i,
                format_number(n * i as f64)
            );
            Statement::Log(vec![Expression::text(line)])
        })
        .collect();
    Ok(Generated::Statements(rows))
}

// --- Four operations ---

fn toplama(ctx: &GenContext<'_>) -> GenResult {
    operation(ctx, "Toplama", "+", BinaryOp::Add)
}

fn cikarma(ctx: &GenContext<'_>) -> GenResult {
    operation(ctx, "Çıkarma", "-", BinaryOp::Subtract)
}

fn carpma(ctx: &GenContext<'_>) -> GenResult {
    operation(ctx, "Çarpma", "×", BinaryOp::Multiply)
}

fn bolme(ctx: &GenContext<'_>) -> GenResult {
    operation(ctx, "Bölme", "÷", BinaryOp::Divide)
}

// --- Areas ---

fn kare_alan(ctx: &GenContext<'_>) -> GenResult {
    let side = ctx.value("KENAR")?;
    Ok((side.clone() * side).into())
}

fn dikdortgen_alan(ctx: &GenContext<'_>) -> GenResult {
    Ok((ctx.value("GENISLIK")? * ctx.value("YUKSEKLIK")?).into())
}

fn ucgen_alan(ctx: &GenContext<'_>) -> GenResult {
    Ok((ctx.value("TABAN")? * ctx.value("YUKSEKLIK")? / Expression::num(2.0)).into())
}

fn daire_alan(ctx: &GenContext<'_>) -> GenResult {
    let r = ctx.value("YARICAP")?;
    Ok((Expression::pi() * r.clone() * r).into())
}

fn daire_cevre(ctx: &GenContext<'_>) -> GenResult {
    Ok((Expression::num(2.0) * Expression::pi() * ctx.value("YARICAP")?).into())
}

fn cevre_hesapla(ctx: &GenContext<'_>) -> GenResult {
    let first = ctx.value("SIDE1")?;
    match ctx.field("SHAPE").as_str() {
        "kare" => Ok((Expression::num(4.0) * first).into()),
        "dikdortgen" => Ok((Expression::num(2.0) * (first + ctx.value("SIDE2")?)).into()),
        _ => Err(ctx.invalid_field("SHAPE")),
    }
}

// --- Drawing (log only) ---

fn position(ctx: &GenContext<'_>, caption: &str) -> Result<Vec<Expression>, CompileError> {
    Ok(vec![
        Expression::text(caption),
        ctx.value("X")?,
        Expression::text(","),
        ctx.value("Y")?,
        Expression::text(")"),
    ])
}

fn kare_ciz(ctx: &GenContext<'_>) -> GenResult {
    let mut args = vec![Expression::text("🟦 Kare çiziliyor - Kenar:"), ctx.value("KENAR")?];
    args.extend(position(ctx, "Konum: (")?);
    Ok(Statement::Log(args).into())
}

fn dikdortgen_ciz(ctx: &GenContext<'_>) -> GenResult {
    let mut args = vec![
        Expression::text("🟩 Dikdörtgen çiziliyor - Genişlik:"),
        ctx.value("GENISLIK")?,
        Expression::text("Yükseklik:"),
        ctx.value("YUKSEKLIK")?,
    ];
    args.extend(position(ctx, "Konum: (")?);
    Ok(Statement::Log(args).into())
}

fn ucgen_ciz(ctx: &GenContext<'_>) -> GenResult {
    let mut args = vec![
        Expression::text("🔺 Üçgen çiziliyor - Taban:"),
        ctx.value("TABAN")?,
        Expression::text("Yükseklik:"),
        ctx.value("YUKSEKLIK")?,
    ];
    args.extend(position(ctx, "Konum: (")?);
    Ok(Statement::Log(args).into())
}

fn daire_ciz(ctx: &GenContext<'_>) -> GenResult {
    let mut args = vec![Expression::text("🔵 Daire çiziliyor - Yarıçap:"), ctx.value("YARICAP")?];
    args.extend(position(ctx, "Merkez: (")?);
    Ok(Statement::Log(args).into())
}

// --- Draw and calculate ---

fn daire_ciz_hesapla(ctx: &GenContext<'_>) -> GenResult {
    let r = ctx.value("YARICAP")?;
    let label = Expression::concat(vec![
        Expression::text("Daire (r="),
        r.clone(),
        Expression::text(")"),
    ]);
    Ok(draw_and_calculate(
        ShapeKind::TwoD,
        "daire",
        vec![("yaricap", r.clone())],
        label,
        vec![
            ("alan", Expression::pi() * r.clone() * r.clone()),
            ("cevre", Expression::num(2.0) * Expression::pi() * r),
        ],
        "Daire",
        &[("Alan", "alan"), ("Çevre", "cevre")],
    ))
}

fn dikdortgen_ciz_hesapla(ctx: &GenContext<'_>) -> GenResult {
    let w = ctx.value("GENISLIK")?;
    let h = ctx.value("YUKSEKLIK")?;
    let label = Expression::concat(vec![
        Expression::text("Dikdörtgen ("),
        w.clone(),
        Expression::text("x"),
        h.clone(),
        Expression::text(")"),
    ]);
    Ok(draw_and_calculate(
        ShapeKind::TwoD,
        "dikdortgen",
        vec![("genislik", w.clone()), ("yukseklik", h.clone())],
        label,
        vec![
            ("alan", w.clone() * h.clone()),
            ("cevre", Expression::num(2.0) * (w + h)),
        ],
        "Dikdörtgen",
        &[("Alan", "alan"), ("Çevre", "cevre")],
    ))
}

fn kare_ciz_hesapla(ctx: &GenContext<'_>) -> GenResult {
    let a = ctx.value("KENAR")?;
    let label = Expression::concat(vec![
        Expression::text("Kare (a="),
        a.clone(),
        Expression::text(")"),
    ]);
    Ok(draw_and_calculate(
        ShapeKind::TwoD,
        "kare",
        vec![("kenar", a.clone())],
        label,
        vec![
            ("alan", a.clone() * a.clone()),
            ("cevre", Expression::num(4.0) * a),
        ],
        "Kare",
        &[("Alan", "alan"), ("Çevre", "cevre")],
    ))
}

fn ucgen_ciz_hesapla(ctx: &GenContext<'_>) -> GenResult {
    let t = ctx.value("TABAN")?;
    let h = ctx.value("YUKSEKLIK")?;
    let label = Expression::concat(vec![
        Expression::text("Üçgen (t="),
        t.clone(),
        Expression::text(", h="),
        h.clone(),
        Expression::text(")"),
    ]);
    Ok(draw_and_calculate(
        ShapeKind::TwoD,
        "ucgen",
        vec![("taban", t.clone()), ("yukseklik", h.clone())],
        label,
        vec![("alan", t * h / Expression::num(2.0))],
        "Üçgen",
        &[("Alan", "alan")],
    ))
}

// --- Measurement ---

fn uzunluk_donusum(ctx: &GenContext<'_>) -> GenResult {
    convert(
        ctx,
        "VALUE",
        "CONVERSION",
        &[
            ("m_cm", Multiply, 100.0),
            ("cm_m", Divide, 100.0),
            ("km_m", Multiply, 1000.0),
            ("m_km", Divide, 1000.0),
        ],
    )
}

fn zaman_donusum(ctx: &GenContext<'_>) -> GenResult {
    convert(
        ctx,
        "VALUE",
        "CONVERSION",
        &[
            ("h_m", Multiply, 60.0),
            ("m_s", Multiply, 60.0),
            ("h_s", Multiply, 3600.0),
            ("d_h", Multiply, 24.0),
        ],
    )
}

fn sivi_donusum(ctx: &GenContext<'_>) -> GenResult {
    convert(
        ctx,
        "VALUE",
        "CONVERSION",
        &[("l_ml", Multiply, 1000.0), ("ml_l", Divide, 1000.0)],
    )
}

fn agirlik_donusum(ctx: &GenContext<'_>) -> GenResult {
    convert(
        ctx,
        "VALUE",
        "CONVERSION",
        &[
            ("kg_g", Multiply, 1000.0),
            ("g_kg", Divide, 1000.0),
            ("t_kg", Multiply, 1000.0),
            ("ton_kg", Multiply, 1000.0),
            ("kg_t", Divide, 1000.0),
            ("kg_ton", Divide, 1000.0),
        ],
    )
}

fn para_hesap(ctx: &GenContext<'_>) -> GenResult {
    convert(
        ctx,
        "AMOUNT",
        "OPERATION",
        &[
            ("TL", Multiply, 1.0),
            ("Kurus", Multiply, 1.0),
            ("TL_Kurus", Multiply, 100.0),
            ("Kurus_TL", Divide, 100.0),
        ],
    )
}

// --- Geometry and data ---

fn aci_olc(ctx: &GenContext<'_>) -> GenResult {
    Ok(Statement::Log(vec![
        Expression::text("Açı:"),
        Expression::num(ctx.field_number("DEGREE")),
        Expression::text("derece"),
    ])
    .into())
}

fn aci_turu(ctx: &GenContext<'_>) -> GenResult {
    let angle = ctx.value("ANGLE")?;
    let below = |limit: f64| angle.clone().less_than(Expression::num(limit));
    Ok(Expression::conditional(
        below(90.0),
        Expression::text("Dar"),
        Expression::conditional(
            angle.clone().equals(Expression::num(90.0)),
            Expression::text("Dik"),
            Expression::conditional(
                below(180.0),
                Expression::text("Geniş"),
                Expression::text("Tam"),
            ),
        ),
    )
    .into())
}

fn simetri_eksen(ctx: &GenContext<'_>) -> GenResult {
    let axis = match ctx.field("AXIS").as_str() {
        "vertical" => "Dikey",
        "horizontal" => "Yatay",
        "diagonal" => "Çapraz",
        _ => return Err(ctx.invalid_field("AXIS")),
    };
    Ok(Statement::Log(vec![Expression::text(format!("{} simetri ekseni çiziliyor", axis))]).into())
}

fn veri_topla(ctx: &GenContext<'_>) -> GenResult {
    Ok(Statement::Log(vec![Expression::text("Veri:"), ctx.value("DATA")?]).into())
}

fn sutun_grafik(ctx: &GenContext<'_>) -> GenResult {
    let data = ctx.value("DATA")?;
    Ok(Generated::Statements(vec![
        Statement::Log(vec![Expression::text("Sütun grafik çiziliyor:"), data.clone()]),
        Statement::DrawChart {
            kind: "bar".to_string(),
            data,
        },
    ]))
}

define_block_generators! {
    "sayi_okuma" => sayi_okuma,
    "basamak_deger" => basamak_deger,
    "cift_tek" => cift_tek,
    "buyuk_kucuk" => buyuk_kucuk,
    "carpim_tablosu" => carpim_tablosu,
    "toplama" => toplama,
    "cikarma" => cikarma,
    "carpma" => carpma,
    "bolme" => bolme,
    "kare_alan" => kare_alan,
    "dikdortgen_alan" => dikdortgen_alan,
    "ucgen_alan" => ucgen_alan,
    "daire_alan" => daire_alan,
    "daire_cevre" => daire_cevre,
    "cevre_hesapla" => cevre_hesapla,
    "kare_ciz" => kare_ciz,
    "dikdortgen_ciz" => dikdortgen_ciz,
    "ucgen_ciz" => ucgen_ciz,
    "daire_ciz" => daire_ciz,
    "daire_ciz_hesapla" => daire_ciz_hesapla,
    "dikdortgen_ciz_hesapla" => dikdortgen_ciz_hesapla,
    "kare_ciz_hesapla" => kare_ciz_hesapla,
    "ucgen_ciz_hesapla" => ucgen_ciz_hesapla,
    "uzunluk_donusum" => uzunluk_donusum,
    "zaman_donusum" => zaman_donusum,
    "sivi_donusum" => sivi_donusum,
    "agirlik_donusum" => agirlik_donusum,
    "para_hesap" => para_hesap,
    "aci_olc" => aci_olc,
    "aci_turu" => aci_turu,
    "simetri_eksen" => simetri_eksen,
    "veri_topla" => veri_topla,
    "sutun_grafik" => sutun_grafik,
}
