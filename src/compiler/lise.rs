//! High school blocks: calculus, vectors and matrices, sequences, analytic geometry,
//! complex numbers and solids.
//!
//! Symbolic blocks (derivative and integral rules, conic equations) produce text; numeric
//! blocks compute their result at run time through the builtin library.

use super::{BlockGenerator, FnGenerator, GenContext, GenResult, draw_and_calculate};
use crate::ast::{Builtin, Expression, ShapeKind, Statement};
use crate::error::CompileError;

fn num(n: f64) -> Expression {
    Expression::num(n)
}

fn text(s: &str) -> Expression {
    Expression::text(s)
}

fn call(builtin: Builtin, args: Vec<Expression>) -> Expression {
    Expression::call(builtin, args)
}

fn log(caption: &str, value: Expression) -> GenResult {
    Ok(Statement::Log(vec![text(caption), value]).into())
}

fn values<const N: usize>(
    ctx: &GenContext<'_>,
    names: [&str; N],
) -> Result<[Expression; N], CompileError> {
    let mut out = [(); N].map(|_| Expression::null());
    for (slot, name) in out.iter_mut().zip(names) {
        *slot = ctx.value(name)?;
    }
    Ok(out)
}

fn at(list: &Expression, i: usize) -> Expression {
    Expression::index(list.clone(), num(i as f64))
}

// --- Polynomials, logarithms, trigonometry ---

fn polinom_topla(ctx: &GenContext<'_>) -> GenResult {
    let [first, second] = values(ctx, ["POLY1", "POLY2"])?;
    log(
        "Polinom toplama:",
        Expression::concat(vec![first, text(" + "), second]),
    )
}

fn polinom_kokler(ctx: &GenContext<'_>) -> GenResult {
    let [a, b, c] = values(ctx, ["A", "B", "C"])?;
    let discriminant = b.clone() * b.clone() - num(4.0) * a.clone() * c;
    let denominator = num(2.0) * a;
    let root = |sign: f64| {
        let offset = num(sign) * discriminant.clone().sqrt();
        (-b.clone() + offset) / denominator.clone()
    };
    Ok(Expression::conditional(
        discriminant.clone().less_than(num(0.0)),
        text("Gerçek kök yok"),
        Expression::concat(vec![text("x₁ = "), root(1.0), text(", x₂ = "), root(-1.0)]),
    )
    .into())
}

fn logaritma(ctx: &GenContext<'_>) -> GenResult {
    let [number, base] = values(ctx, ["NUMBER", "BASE"])?;
    log(
        "Logaritma:",
        call(Builtin::Ln, vec![number]) / call(Builtin::Ln, vec![base]),
    )
}

fn logaritma_dogal(ctx: &GenContext<'_>) -> GenResult {
    Ok(call(Builtin::Ln, vec![ctx.value("NUMBER")?]).into())
}

fn radians(degrees: Expression) -> Expression {
    degrees * Expression::pi() / num(180.0)
}

fn trigonometri_sin(ctx: &GenContext<'_>) -> GenResult {
    log("Sinüs:", call(Builtin::Sin, vec![radians(ctx.value("ANGLE")?)]))
}

fn trigonometri_cos(ctx: &GenContext<'_>) -> GenResult {
    log("Kosinüs:", call(Builtin::Cos, vec![radians(ctx.value("ANGLE")?)]))
}

// --- Calculus ---

fn turev_hesapla(ctx: &GenContext<'_>) -> GenResult {
    log("Türev hesaplanıyor:", ctx.value("FUNCTION")?)
}

fn integral_hesapla(ctx: &GenContext<'_>) -> GenResult {
    log("İntegral hesaplanıyor:", ctx.value("FUNCTION")?)
}

fn limit_hesapla(ctx: &GenContext<'_>) -> GenResult {
    let [function, point] = values(ctx, ["FUNCTION", "POINT"])?;
    Ok(call(Builtin::Limit, vec![function, point]).into())
}

fn limit_sonsuz(ctx: &GenContext<'_>) -> GenResult {
    let direction = match ctx.field("DIRECTION").as_str() {
        "+" => 1.0,
        "-" => -1.0,
        _ => return Err(ctx.invalid_field("DIRECTION")),
    };
    let function = ctx.value("FUNCTION")?;
    let limit = call(Builtin::LimitAtInfinity, vec![function, num(direction)]);
    Ok(Expression::concat(vec![
        text(&format!("x → {}∞ için limit = ", ctx.field("DIRECTION"))),
        limit,
    ])
    .into())
}

fn turev_polinom(ctx: &GenContext<'_>) -> GenResult {
    let [coefficient, power] = values(ctx, ["COEFFICIENT", "POWER"])?;
    Ok(Expression::concat(vec![
        text("d/dx("),
        coefficient.clone(),
        text("x^"),
        power.clone(),
        text(") = "),
        coefficient * power.clone(),
        text("x^"),
        power - num(1.0),
    ])
    .into())
}

fn turev_trigonometri(ctx: &GenContext<'_>) -> GenResult {
    let function = ctx.field("FUNCTION");
    let derivative = match function.as_str() {
        "sin" => "cos(x)",
        "cos" => "-sin(x)",
        "tan" => "sec²(x)",
        "cot" => "-csc²(x)",
        _ => return Err(ctx.invalid_field("FUNCTION")),
    };
    Ok(text(&format!("d/dx({}(x)) = {}", function, derivative)).into())
}

fn turev_us(ctx: &GenContext<'_>) -> GenResult {
    let base = ctx.value("BASE")?;
    Ok(Expression::concat(vec![
        text("d/dx("),
        base.clone(),
        text("^x) = "),
        base.clone(),
        text("^x · ln("),
        base,
        text(")"),
    ])
    .into())
}

fn turev_logaritma(ctx: &GenContext<'_>) -> GenResult {
    let rule = match ctx.field("TYPE").as_str() {
        "ln" => "d/dx(ln(x)) = 1/x",
        "log" => "d/dx(log(x)) = 1/(x · ln(10))",
        _ => return Err(ctx.invalid_field("TYPE")),
    };
    Ok(text(rule).into())
}

fn integral_polinom(ctx: &GenContext<'_>) -> GenResult {
    let [coefficient, power] = values(ctx, ["COEFFICIENT", "POWER"])?;
    let raised = power.clone() + num(1.0);
    let integrand = vec![
        text("∫"),
        coefficient.clone(),
        text("x^"),
        power.clone(),
        text(" dx = "),
    ];
    let mut general = integrand.clone();
    general.extend([
        coefficient.clone() / raised.clone(),
        text("x^"),
        raised,
        text(" + C"),
    ]);
    let mut logarithmic = integrand;
    logarithmic.extend([coefficient, text("·ln|x| + C")]);
    Ok(Expression::conditional(
        power.equals(num(-1.0)),
        Expression::concat(logarithmic),
        Expression::concat(general),
    )
    .into())
}

fn integral_trigonometri(ctx: &GenContext<'_>) -> GenResult {
    let function = ctx.field("FUNCTION");
    let antiderivative = match function.as_str() {
        "sin" => "-cos(x) + C",
        "cos" => "sin(x) + C",
        "tan" => "-ln|cos(x)| + C",
        _ => return Err(ctx.invalid_field("FUNCTION")),
    };
    Ok(text(&format!("∫{}(x) dx = {}", function, antiderivative)).into())
}

fn integral_belirli(ctx: &GenContext<'_>) -> GenResult {
    let [function, lower, upper] = values(ctx, ["FUNCTION", "LOWER", "UPPER"])?;
    Ok(call(Builtin::Integrate, vec![function, lower, upper]).into())
}

fn fonksiyon_grafik(ctx: &GenContext<'_>) -> GenResult {
    Ok(Statement::DrawFunction(Expression::text(ctx.field("FUNCTION"))).into())
}

// --- Vectors ---

fn vektor_olustur(ctx: &GenContext<'_>) -> GenResult {
    let [x, y] = values(ctx, ["X", "Y"])?;
    Ok(Expression::List(vec![x, y]).into())
}

fn vektor_topla(ctx: &GenContext<'_>) -> GenResult {
    let [u, v] = values(ctx, ["VECTOR1", "VECTOR2"])?;
    Ok(Expression::List(vec![at(&u, 0) + at(&v, 0), at(&u, 1) + at(&v, 1)]).into())
}

fn vektor_skaler_carp(ctx: &GenContext<'_>) -> GenResult {
    let [scalar, v] = values(ctx, ["SCALAR", "VECTOR"])?;
    Ok(Expression::List(vec![scalar.clone() * at(&v, 0), scalar * at(&v, 1)]).into())
}

fn vektor_ic_carpim(ctx: &GenContext<'_>) -> GenResult {
    let [u, v] = values(ctx, ["VECTOR1", "VECTOR2"])?;
    Ok((at(&u, 0) * at(&v, 0) + at(&u, 1) * at(&v, 1)).into())
}

fn vektor_uzunluk(ctx: &GenContext<'_>) -> GenResult {
    let v = ctx.value("VECTOR")?;
    Ok((at(&v, 0) * at(&v, 0) + at(&v, 1) * at(&v, 1)).sqrt().into())
}

// --- Matrices ---

fn matris_carp(ctx: &GenContext<'_>) -> GenResult {
    let [first, second] = values(ctx, ["MATRIX1", "MATRIX2"])?;
    log("Matris çarpımı:", call(Builtin::MatrixMultiply, vec![first, second]))
}

fn matris_olustur_2x2(ctx: &GenContext<'_>) -> GenResult {
    let [a11, a12, a21, a22] = values(ctx, ["A11", "A12", "A21", "A22"])?;
    Ok(Expression::List(vec![
        Expression::List(vec![a11, a12]),
        Expression::List(vec![a21, a22]),
    ])
    .into())
}

fn matrix_pair(ctx: &GenContext<'_>, builtin: Builtin) -> GenResult {
    let [first, second] = values(ctx, ["MATRIX1", "MATRIX2"])?;
    Ok(call(builtin, vec![first, second]).into())
}

fn matris_topla(ctx: &GenContext<'_>) -> GenResult {
    matrix_pair(ctx, Builtin::MatrixAdd)
}

fn matris_cikar(ctx: &GenContext<'_>) -> GenResult {
    matrix_pair(ctx, Builtin::MatrixSubtract)
}

fn matris_carp_complete(ctx: &GenContext<'_>) -> GenResult {
    matrix_pair(ctx, Builtin::MatrixMultiply)
}

fn matris_determinant(ctx: &GenContext<'_>) -> GenResult {
    Ok(call(Builtin::Determinant, vec![ctx.value("MATRIX")?]).into())
}

fn matris_transpose(ctx: &GenContext<'_>) -> GenResult {
    Ok(call(Builtin::MatrixTranspose, vec![ctx.value("MATRIX")?]).into())
}

fn matris_skaler_carp(ctx: &GenContext<'_>) -> GenResult {
    let [scalar, matrix] = values(ctx, ["SCALAR", "MATRIX"])?;
    Ok(call(Builtin::MatrixScale, vec![scalar, matrix]).into())
}

// --- Counting and sequences ---

fn factorial(n: Expression) -> Expression {
    call(Builtin::Factorial, vec![n])
}

fn permutasyon(ctx: &GenContext<'_>) -> GenResult {
    let [n, r] = values(ctx, ["N", "R"])?;
    Ok((factorial(n.clone()) / factorial(n - r)).into())
}

fn kombinasyon(ctx: &GenContext<'_>) -> GenResult {
    let [n, r] = values(ctx, ["N", "R"])?;
    Ok((factorial(n.clone()) / (factorial(r.clone()) * factorial(n - r))).into())
}

fn faktoriyel(ctx: &GenContext<'_>) -> GenResult {
    Ok(factorial(ctx.value("N")?).into())
}

fn aritmetik_dizi(ctx: &GenContext<'_>) -> GenResult {
    let [first, diff, n] = values(ctx, ["FIRST", "DIFF", "N"])?;
    Ok((first + (n - num(1.0)) * diff).into())
}

fn geometrik_dizi(ctx: &GenContext<'_>) -> GenResult {
    let [first, ratio, n] = values(ctx, ["FIRST", "RATIO", "N"])?;
    Ok((first * ratio.pow(n - num(1.0))).into())
}

fn aritmetik_toplam(ctx: &GenContext<'_>) -> GenResult {
    let [first, last, n] = values(ctx, ["FIRST", "LAST", "N"])?;
    Ok((n * (first + last) / num(2.0)).into())
}

/// A ratio of exactly 1 sums `n` equal terms.
fn geometrik_toplam(ctx: &GenContext<'_>) -> GenResult {
    let [first, ratio, n] = values(ctx, ["FIRST", "RATIO", "N"])?;
    let general =
        first.clone() * (num(1.0) - ratio.clone().pow(n.clone())) / (num(1.0) - ratio.clone());
    Ok(Expression::conditional(ratio.equals(num(1.0)), first * n, general).into())
}

fn fibonacci_terim(ctx: &GenContext<'_>) -> GenResult {
    Ok(call(Builtin::Fibonacci, vec![ctx.value("N")?]).into())
}

// --- Analytic geometry ---

fn dogru_denklemi(ctx: &GenContext<'_>) -> GenResult {
    let [m, b] = values(ctx, ["M", "B"])?;
    Ok(Expression::concat(vec![text("y = "), m, text("x + "), b]).into())
}

fn iki_nokta_dogru(ctx: &GenContext<'_>) -> GenResult {
    let [x1, y1, x2, y2] = values(ctx, ["X1", "Y1", "X2", "Y2"])?;
    let slope = (y2 - y1.clone()) / (x2 - x1.clone());
    Ok(Expression::concat(vec![
        text("y - "),
        y1,
        text(" = "),
        slope,
        text("(x - "),
        x1,
        text(")"),
    ])
    .into())
}

fn nokta_arasi_mesafe(ctx: &GenContext<'_>) -> GenResult {
    let [x1, y1, x2, y2] = values(ctx, ["X1", "Y1", "X2", "Y2"])?;
    let dx = (x2 - x1).pow(num(2.0));
    let dy = (y2 - y1).pow(num(2.0));
    Ok((dx + dy).sqrt().into())
}

fn orta_nokta(ctx: &GenContext<'_>) -> GenResult {
    let [x1, y1, x2, y2] = values(ctx, ["X1", "Y1", "X2", "Y2"])?;
    Ok(Expression::List(vec![(x1 + x2) / num(2.0), (y1 + y2) / num(2.0)]).into())
}

fn cember_denklemi(ctx: &GenContext<'_>) -> GenResult {
    let [h, k, r] = values(ctx, ["H", "K", "R"])?;
    Ok(Expression::concat(vec![
        text("(x-"),
        h,
        text(")² + (y-"),
        k,
        text(")² = "),
        r,
        text("²"),
    ])
    .into())
}

fn noktadan_dogruya_mesafe(ctx: &GenContext<'_>) -> GenResult {
    let [x0, y0, a, b, c] = values(ctx, ["X0", "Y0", "A", "B", "C"])?;
    let numerator = (a.clone() * x0 + b.clone() * y0 + c).abs();
    Ok((numerator / (a.clone() * a + b.clone() * b).sqrt()).into())
}

// --- Conics ---

fn parabol_denklemi(ctx: &GenContext<'_>) -> GenResult {
    let [h, k, p] = values(ctx, ["H", "K", "P"])?;
    let direction = ctx.field("DIRECTION");
    let (squared, linear, squared_center, linear_center, sign) = match direction.as_str() {
        "up" => ("x", "y", h, k, 1.0),
        "down" => ("x", "y", h, k, -1.0),
        "right" => ("y", "x", k, h, 1.0),
        "left" => ("y", "x", k, h, -1.0),
        _ => return Err(ctx.invalid_field("DIRECTION")),
    };
    Ok(Expression::concat(vec![
        text(&format!("({} - ", squared)),
        squared_center,
        text(")² = "),
        num(4.0 * sign) * p,
        text(&format!("({} - ", linear)),
        linear_center,
        text(")"),
    ])
    .into())
}

fn elips_denklemi(ctx: &GenContext<'_>) -> GenResult {
    let [h, k, a, b] = values(ctx, ["H", "K", "A", "B"])?;
    Ok(Expression::concat(vec![
        text("(x-"),
        h,
        text(")²/"),
        a,
        text("² + (y-"),
        k,
        text(")²/"),
        b,
        text("² = 1"),
    ])
    .into())
}

fn hiperbol_denklemi(ctx: &GenContext<'_>) -> GenResult {
    let [h, k, a, b] = values(ctx, ["H", "K", "A", "B"])?;
    let (first, first_center, second, second_center) = match ctx.field("ORIENTATION").as_str() {
        "horizontal" => ("x", h, "y", k),
        "vertical" => ("y", k, "x", h),
        _ => return Err(ctx.invalid_field("ORIENTATION")),
    };
    Ok(Expression::concat(vec![
        text(&format!("({}-", first)),
        first_center,
        text(")²/"),
        a,
        text(&format!("² - ({}-", second)),
        second_center,
        text(")²/"),
        b,
        text("² = 1"),
    ])
    .into())
}

// --- Complex numbers ---

fn karmasik_sayi(ctx: &GenContext<'_>) -> GenResult {
    let [real, imaginary] = values(ctx, ["REAL", "IMAG"])?;
    Ok(Expression::concat(vec![real, text(" + "), imaginary, text("i")]).into())
}

fn karmasik_topla(ctx: &GenContext<'_>) -> GenResult {
    let [z1, z2] = values(ctx, ["Z1", "Z2"])?;
    Ok(call(Builtin::ComplexAdd, vec![z1, z2]).into())
}

fn karmasik_carp(ctx: &GenContext<'_>) -> GenResult {
    let [z1, z2] = values(ctx, ["Z1", "Z2"])?;
    Ok(call(Builtin::ComplexMultiply, vec![z1, z2]).into())
}

fn karmasik_eslenigi(ctx: &GenContext<'_>) -> GenResult {
    Ok(call(Builtin::ComplexConjugate, vec![ctx.value("Z")?]).into())
}

fn karmasik_modulus(ctx: &GenContext<'_>) -> GenResult {
    Ok(call(Builtin::ComplexModulus, vec![ctx.value("Z")?]).into())
}

// --- Volumes ---

fn cube(x: Expression) -> Expression {
    x.pow(num(3.0))
}

fn kup_hacim(ctx: &GenContext<'_>) -> GenResult {
    Ok(cube(ctx.value("EDGE")?).into())
}

fn dikdortgen_prizma_hacim(ctx: &GenContext<'_>) -> GenResult {
    let [length, width, height] = values(ctx, ["LENGTH", "WIDTH", "HEIGHT"])?;
    Ok((length * width * height).into())
}

fn silindir_hacim(ctx: &GenContext<'_>) -> GenResult {
    let [r, h] = values(ctx, ["RADIUS", "HEIGHT"])?;
    Ok((Expression::pi() * r.clone() * r * h).into())
}

fn koni_hacim(ctx: &GenContext<'_>) -> GenResult {
    let [r, h] = values(ctx, ["RADIUS", "HEIGHT"])?;
    Ok((num(1.0) / num(3.0) * Expression::pi() * r.clone() * r * h).into())
}

fn kure_hacim(ctx: &GenContext<'_>) -> GenResult {
    let r = ctx.value("RADIUS")?;
    Ok((num(4.0) / num(3.0) * Expression::pi() * cube(r)).into())
}

fn kure_yuzey_alani(ctx: &GenContext<'_>) -> GenResult {
    let r = ctx.value("RADIUS")?;
    Ok((num(4.0) * Expression::pi() * r.clone() * r).into())
}

// --- Solids, drawn and calculated ---

fn slant(r: &Expression, h: &Expression) -> Expression {
    (r.clone() * r.clone() + h.clone() * h.clone()).sqrt()
}

fn koni_ciz_hesapla(ctx: &GenContext<'_>) -> GenResult {
    let [r, h] = values(ctx, ["YARICAP", "YUKSEKLIK"])?;
    let label = Expression::concat(vec![
        text("Koni (r="),
        r.clone(),
        text(", h="),
        h.clone(),
        text(")"),
    ]);
    let calculation = vec![
        (
            "hacim",
            num(1.0) / num(3.0) * Expression::pi() * r.clone() * r.clone() * h.clone(),
        ),
        ("yan_alan", Expression::pi() * r.clone() * slant(&r, &h)),
        (
            "toplam_alan",
            Expression::pi() * r.clone() * (r.clone() + slant(&r, &h)),
        ),
    ];
    Ok(draw_and_calculate(
        ShapeKind::ThreeD,
        "koni",
        vec![("radius", r), ("height", h)],
        label,
        calculation,
        "Koni",
        &[("Hacim", "hacim"), ("Toplam Alan", "toplam_alan")],
    ))
}

fn silindir_ciz_hesapla(ctx: &GenContext<'_>) -> GenResult {
    let [r, h] = values(ctx, ["YARICAP", "YUKSEKLIK"])?;
    let label = Expression::concat(vec![
        text("Silindir (r="),
        r.clone(),
        text(", h="),
        h.clone(),
        text(")"),
    ]);
    let two_pi_r = num(2.0) * Expression::pi() * r.clone();
    let calculation = vec![
        ("hacim", Expression::pi() * r.clone() * r.clone() * h.clone()),
        ("yan_alan", two_pi_r.clone() * h.clone()),
        ("toplam_alan", two_pi_r * (r.clone() + h.clone())),
    ];
    Ok(draw_and_calculate(
        ShapeKind::ThreeD,
        "silindir",
        vec![("radius", r), ("height", h)],
        label,
        calculation,
        "Silindir",
        &[("Hacim", "hacim"), ("Toplam Alan", "toplam_alan")],
    ))
}

fn kure_ciz_hesapla(ctx: &GenContext<'_>) -> GenResult {
    let r = ctx.value("YARICAP")?;
    let label = Expression::concat(vec![text("Küre (r="), r.clone(), text(")")]);
    let calculation = vec![
        (
            "hacim",
            num(4.0) / num(3.0) * Expression::pi() * cube(r.clone()),
        ),
        ("alan", num(4.0) * Expression::pi() * r.clone() * r.clone()),
    ];
    Ok(draw_and_calculate(
        ShapeKind::ThreeD,
        "küre",
        vec![("radius", r)],
        label,
        calculation,
        "Küre",
        &[("Hacim", "hacim"), ("Alan", "alan")],
    ))
}

fn kup_ciz_hesapla(ctx: &GenContext<'_>) -> GenResult {
    let a = ctx.value("KENAR")?;
    let label = Expression::concat(vec![text("Küp (a="), a.clone(), text(")")]);
    let calculation = vec![
        ("hacim", cube(a.clone())),
        ("alan", num(6.0) * a.clone() * a.clone()),
    ];
    Ok(draw_and_calculate(
        ShapeKind::ThreeD,
        "küp",
        vec![("edge", a)],
        label,
        calculation,
        "Küp",
        &[("Hacim", "hacim"), ("Alan", "alan")],
    ))
}

fn dikdortgen_prizma_ciz_hesapla(ctx: &GenContext<'_>) -> GenResult {
    let [w, l, h] = values(ctx, ["GENISLIK", "UZUNLUK", "YUKSEKLIK"])?;
    let label = Expression::concat(vec![
        text("Dikdörtgen Prizma ("),
        w.clone(),
        text("x"),
        l.clone(),
        text("x"),
        h.clone(),
        text(")"),
    ]);
    let faces = w.clone() * l.clone() + w.clone() * h.clone() + l.clone() * h.clone();
    let calculation = vec![
        ("hacim", w.clone() * l.clone() * h.clone()),
        ("alan", num(2.0) * faces),
    ];
    Ok(draw_and_calculate(
        ShapeKind::ThreeD,
        "dikdörtgen_prizma",
        vec![("width", w), ("length", l), ("height", h)],
        label,
        calculation,
        "Dikdörtgen Prizma",
        &[("Hacim", "hacim"), ("Alan", "alan")],
    ))
}

define_block_generators! {
    "polinom_topla" => polinom_topla,
    "polinom_kokler" => polinom_kokler,
    "logaritma" => logaritma,
    "logaritma_dogal" => logaritma_dogal,
    "trigonometri_sin" => trigonometri_sin,
    "trigonometri_cos" => trigonometri_cos,
    "turev_hesapla" => turev_hesapla,
    "integral_hesapla" => integral_hesapla,
    "limit_hesapla" => limit_hesapla,
    "limit_sonsuz" => limit_sonsuz,
    "turev_polinom" => turev_polinom,
    "turev_trigonometri" => turev_trigonometri,
    "turev_us" => turev_us,
    "turev_logaritma" => turev_logaritma,
    "integral_polinom" => integral_polinom,
    "integral_trigonometri" => integral_trigonometri,
    "integral_belirli" => integral_belirli,
    "fonksiyon_grafik" => fonksiyon_grafik,
    "vektor_olustur" => vektor_olustur,
    "vektor_topla" => vektor_topla,
    "vektor_skaler_carp" => vektor_skaler_carp,
    "vektor_ic_carpim" => vektor_ic_carpim,
    "vektor_uzunluk" => vektor_uzunluk,
    "matris_carp" => matris_carp,
    "matris_olustur_2x2" => matris_olustur_2x2,
    "matris_topla" => matris_topla,
    "matris_cikar" => matris_cikar,
    "matris_carp_complete" => matris_carp_complete,
    "matris_determinant" => matris_determinant,
    "matris_transpose" => matris_transpose,
    "matris_skaler_carp" => matris_skaler_carp,
    "permutasyon" => permutasyon,
    "kombinasyon" => kombinasyon,
    "faktoriyel" => faktoriyel,
    "aritmetik_dizi" => aritmetik_dizi,
    "geometrik_dizi" => geometrik_dizi,
    "aritmetik_toplam" => aritmetik_toplam,
    "geometrik_toplam" => geometrik_toplam,
    "fibonacci_terim" => fibonacci_terim,
    "dogru_denklemi" => dogru_denklemi,
    "iki_nokta_dogru" => iki_nokta_dogru,
    "nokta_arasi_mesafe" => nokta_arasi_mesafe,
    "orta_nokta" => orta_nokta,
    "cember_denklemi" => cember_denklemi,
    "noktadan_dogruya_mesafe" => noktadan_dogruya_mesafe,
    "parabol_denklemi" => parabol_denklemi,
    "elips_denklemi" => elips_denklemi,
    "hiperbol_denklemi" => hiperbol_denklemi,
    "karmasik_sayi" => karmasik_sayi,
    "karmasik_topla" => karmasik_topla,
    "karmasik_carp" => karmasik_carp,
    "karmasik_eslenigi" => karmasik_eslenigi,
    "karmasik_modulus" => karmasik_modulus,
    "kup_hacim" => kup_hacim,
    "dikdortgen_prizma_hacim" => dikdortgen_prizma_hacim,
    "silindir_hacim" => silindir_hacim,
    "koni_hacim" => koni_hacim,
    "kure_hacim" => kure_hacim,
    "kure_yuzey_alani" => kure_yuzey_alani,
    "koni_ciz_hesapla" => koni_ciz_hesapla,
    "silindir_ciz_hesapla" => silindir_ciz_hesapla,
    "kure_ciz_hesapla" => kure_ciz_hesapla,
    "kup_ciz_hesapla" => kup_ciz_hesapla,
    "dikdortgen_prizma_ciz_hesapla" => dikdortgen_prizma_ciz_hesapla,
}
