use super::{BlockDefinition, BlockGroup, ValueType};
use crate::ast::Value;

use ValueType::{Any, Array, Boolean, Number};

const TEXT: ValueType = ValueType::String;

fn matrix_2x2() -> Value {
    Value::List(vec![vec![0.0, 0.0].into(), vec![0.0, 0.0].into()])
}

/// Matrix text read by `matris_carp` when a slot is empty.
const IDENTITY_2X2: &str = "[[1,0],[0,1]]";

fn vector_2d() -> Value {
    vec![0.0, 0.0].into()
}

/// Blocks offered at every math level.
pub(super) fn common_blocks() -> Vec<BlockDefinition> {
    let common = |name| BlockDefinition::statement(name, BlockGroup::Common);
    vec![
        common("hesapla_goster").value("VALUE", Any),
        common("sonuc_goster").value("VALUE", Any),
    ]
}

pub(super) fn ilkokul_blocks() -> Vec<BlockDefinition> {
    let statement = |name| BlockDefinition::statement(name, BlockGroup::Ilkokul);
    let output = |name, ty| BlockDefinition::output(name, BlockGroup::Ilkokul, ty);
    vec![
        // Numbers
        statement("sayi_okuma").field("NUMBER", "0"),
        output("basamak_deger", Number)
            .value("NUMBER", Number)
            .dropdown("PLACE", &["1", "10", "100", "1000"]),
        output("cift_tek", TEXT).value("NUMBER", Number),
        output("buyuk_kucuk", TEXT).value("A", Number).value("B", Number),
        statement("carpim_tablosu").field("NUMBER", "2"),
        // Four operations
        statement("toplama").value("A", Number).value("B", Number),
        statement("cikarma").value("A", Number).value("B", Number),
        statement("carpma").value("A", Number).value("B", Number),
        statement("bolme")
            .value("A", Number)
            .value_with_default("B", Number, 1.0),
        // Areas
        output("kare_alan", Number).value("KENAR", Number),
        output("dikdortgen_alan", Number)
            .value("GENISLIK", Number)
            .value("YUKSEKLIK", Number),
        output("ucgen_alan", Number)
            .value("TABAN", Number)
            .value("YUKSEKLIK", Number),
        output("daire_alan", Number).value("YARICAP", Number),
        output("daire_cevre", Number).value("YARICAP", Number),
        output("cevre_hesapla", Number)
            .dropdown("SHAPE", &["kare", "dikdortgen"])
            .value("SIDE1", Number)
            .value("SIDE2", Number),
        // Drawing (log only)
        statement("kare_ciz")
            .value_with_default("KENAR", Number, 10.0)
            .value("X", Number)
            .value("Y", Number),
        statement("dikdortgen_ciz")
            .value_with_default("GENISLIK", Number, 10.0)
            .value_with_default("YUKSEKLIK", Number, 10.0)
            .value("X", Number)
            .value("Y", Number),
        statement("ucgen_ciz")
            .value_with_default("TABAN", Number, 10.0)
            .value_with_default("YUKSEKLIK", Number, 10.0)
            .value("X", Number)
            .value("Y", Number),
        statement("daire_ciz")
            .value_with_default("YARICAP", Number, 5.0)
            .value("X", Number)
            .value("Y", Number),
        // Draw and calculate
        statement("daire_ciz_hesapla").value_with_default("YARICAP", Number, 50.0),
        statement("dikdortgen_ciz_hesapla")
            .value_with_default("GENISLIK", Number, 80.0)
            .value_with_default("YUKSEKLIK", Number, 60.0),
        statement("kare_ciz_hesapla").value_with_default("KENAR", Number, 70.0),
        statement("ucgen_ciz_hesapla")
            .value_with_default("TABAN", Number, 80.0)
            .value_with_default("YUKSEKLIK", Number, 60.0),
        // Measurement
        output("uzunluk_donusum", Number)
            .value("VALUE", Number)
            .dropdown("CONVERSION", &["m_cm", "m_km", "cm_m", "km_m"]),
        output("zaman_donusum", Number)
            .value("VALUE", Number)
            .dropdown("CONVERSION", &["h_m", "m_s", "h_s", "d_h"]),
        output("sivi_donusum", Number)
            .value("VALUE", Number)
            .dropdown("CONVERSION", &["l_ml", "ml_l"]),
        output("agirlik_donusum", Number)
            .value("VALUE", Number)
            .dropdown("CONVERSION", &["kg_g", "g_kg", "t_kg", "kg_t"]),
        output("para_hesap", Number)
            .value("AMOUNT", Number)
            .dropdown("OPERATION", &["TL", "Kurus", "TL_Kurus", "Kurus_TL"]),
        // Geometry
        statement("aci_olc").field("DEGREE", "90"),
        output("aci_turu", TEXT).value("ANGLE", Number),
        statement("simetri_eksen").dropdown("AXIS", &["vertical", "horizontal", "diagonal"]),
        // Data
        statement("veri_topla").value("DATA", TEXT),
        statement("sutun_grafik").value("DATA", TEXT),
    ]
}

pub(super) fn ortaokul_blocks() -> Vec<BlockDefinition> {
    let statement = |name| BlockDefinition::statement(name, BlockGroup::Ortaokul);
    let output = |name, ty| BlockDefinition::output(name, BlockGroup::Ortaokul, ty);
    vec![
        // Number theory and powers
        output("ebob_hesapla", Number).value("A", Number).value("B", Number),
        output("ekok_hesapla", Number).value("A", Number).value("B", Number),
        output("uslu_sayi", Number)
            .value("BASE", Number)
            .value("EXPONENT", Number),
        output("karekok", Number).value("NUMBER", Number),
        output("kupkok", Number).value("NUMBER", Number),
        output("mutlak_deger", Number).value("NUMBER", Number),
        output("asal_mi", Boolean).value("NUMBER", Number),
        statement("carpanlara_ayir").value("NUMBER", Number),
        // Fractions and percentages
        statement("kesir_topla").value("A", Number).value("B", Number),
        output("kesir_olustur", TEXT)
            .value("PAY", Number)
            .value_with_default("PAYDA", Number, 1.0),
        output("kesir_sadeles", TEXT)
            .value("PAY", Number)
            .value_with_default("PAYDA", Number, 1.0),
        statement("ondalik_cevir").value("FRACTION", Number),
        statement("yuzde_hesapla")
            .value("NUMBER", Number)
            .value("PERCENT", Number),
        // Equations
        statement("denklem_coz")
            .value_with_default("A", Number, 1.0)
            .value("B", Number)
            .value("C", Number),
        output("cebirsel_ifade", TEXT)
            .value("COEFFICIENT", Number)
            .value("CONSTANT", Number),
        output("cebirsel_topla", TEXT)
            .value("EXPR1", TEXT)
            .value("EXPR2", TEXT),
        output("denklem_1_bilinmeyen", Number)
            .value_with_default("A", Number, 1.0)
            .value("B", Number)
            .value("C", Number),
        output("denklem_sistemi", TEXT)
            .value_with_default("A1", Number, 1.0)
            .value_with_default("B1", Number, 1.0)
            .value("C1", Number)
            .value_with_default("A2", Number, 1.0)
            .value_with_default("B2", Number, 1.0)
            .value("C2", Number),
        output("esitsizlik", TEXT)
            .value_with_default("A", Number, 1.0)
            .dropdown("OPERATOR", &["greater", "less", "greater_equal", "less_equal"])
            .value("B", Number),
        // Coordinates, probability, charts
        statement("koordinat_ciz").value("X", Number).value("Y", Number),
        statement("olasilik_hesapla")
            .value("FAVORABLE", Number)
            .value_with_default("TOTAL", Number, 1.0),
        statement("grafik_ciz")
            .dropdown("CHART_TYPE", &["bar", "pie", "line"])
            .value("DATA", TEXT),
        // Ratio and proportion
        output("oran_hesapla", Number)
            .value("A", Number)
            .value_with_default("B", Number, 1.0),
        output("dogru_oranti", Number)
            .value_with_default("A", Number, 1.0)
            .value("B", Number)
            .value("C", Number),
        output("ters_oranti", Number)
            .value("A", Number)
            .value("B", Number)
            .value_with_default("C", Number, 1.0),
        output("olcek_hesapla", TEXT)
            .value("ACTUAL", Number)
            .value_with_default("MAP", Number, 1.0),
        output("indirim_hesapla", Number)
            .value("PRICE", Number)
            .value("PERCENT", Number),
        output("artis_hesapla", Number)
            .value("VALUE", Number)
            .value("PERCENT", Number),
        // Statistics
        output("ortalama", Number).value("DATA", TEXT),
        output("mod", Number).value("DATA", TEXT),
        output("medyan", Number).value("DATA", TEXT),
        output("ranj", Number).value("DATA", TEXT),
        // Angles and triangles
        output("komsur_aci", Number).value("ANGLE", Number),
        output("tumler_aci", Number).value("ANGLE", Number),
        output("butunler_aci", Number).value("ANGLE", Number),
        output("pisagor", Number).value("A", Number).value("B", Number),
        output("pisagor_dik_kenar", Number)
            .value("C", Number)
            .value("A", Number),
    ]
}

pub(super) fn lise_blocks() -> Vec<BlockDefinition> {
    let statement = |name| BlockDefinition::statement(name, BlockGroup::Lise);
    let output = |name, ty| BlockDefinition::output(name, BlockGroup::Lise, ty);
    vec![
        // Polynomials, logarithms, trigonometry
        statement("polinom_topla")
            .value("POLY1", TEXT)
            .value("POLY2", TEXT),
        output("polinom_kokler", TEXT)
            .value_with_default("A", Number, 1.0)
            .value("B", Number)
            .value("C", Number),
        statement("logaritma")
            .value_with_default("NUMBER", Number, 1.0)
            .value_with_default("BASE", Number, 10.0),
        output("logaritma_dogal", Number).value_with_default("NUMBER", Number, 1.0),
        statement("trigonometri_sin").value("ANGLE", Number),
        statement("trigonometri_cos").value("ANGLE", Number),
        // Calculus
        statement("turev_hesapla").value("FUNCTION", TEXT),
        statement("integral_hesapla").value("FUNCTION", TEXT),
        output("limit_hesapla", Number)
            .value_with_default("FUNCTION", TEXT, "x")
            .value("POINT", Number),
        output("limit_sonsuz", TEXT)
            .value_with_default("FUNCTION", TEXT, "1/x")
            .dropdown("DIRECTION", &["+", "-"]),
        output("turev_polinom", TEXT)
            .value_with_default("COEFFICIENT", Number, 1.0)
            .value_with_default("POWER", Number, 1.0),
        output("turev_trigonometri", TEXT).dropdown("FUNCTION", &["sin", "cos", "tan", "cot"]),
        output("turev_us", TEXT).value_with_default("BASE", Number, std::f64::consts::E),
        output("turev_logaritma", TEXT).dropdown("TYPE", &["ln", "log"]),
        output("integral_polinom", TEXT)
            .value_with_default("COEFFICIENT", Number, 1.0)
            .value_with_default("POWER", Number, 1.0),
        output("integral_trigonometri", TEXT).dropdown("FUNCTION", &["sin", "cos", "tan"]),
        output("integral_belirli", Number)
            .value_with_default("FUNCTION", TEXT, "x")
            .value("LOWER", Number)
            .value_with_default("UPPER", Number, 1.0),
        statement("fonksiyon_grafik")
            .dropdown("FUNCTION", &["x", "x^2", "x^3", "sin(x)", "cos(x)", "2x"]),
        // Vectors
        output("vektor_olustur", Array).value("X", Number).value("Y", Number),
        output("vektor_topla", Array)
            .value_with_default("VECTOR1", Array, vector_2d())
            .value_with_default("VECTOR2", Array, vector_2d()),
        output("vektor_skaler_carp", Array)
            .value_with_default("SCALAR", Number, 1.0)
            .value_with_default("VECTOR", Array, vector_2d()),
        output("vektor_ic_carpim", Number)
            .value_with_default("VECTOR1", Array, vector_2d())
            .value_with_default("VECTOR2", Array, vector_2d()),
        output("vektor_uzunluk", Number).value_with_default("VECTOR", Array, vector_2d()),
        // Matrices
        statement("matris_carp")
            .value_with_default("MATRIX1", TEXT, IDENTITY_2X2)
            .value_with_default("MATRIX2", TEXT, IDENTITY_2X2),
        output("matris_olustur_2x2", Array)
            .value("A11", Number)
            .value("A12", Number)
            .value("A21", Number)
            .value("A22", Number),
        output("matris_topla", Array)
            .value_with_default("MATRIX1", Array, matrix_2x2())
            .value_with_default("MATRIX2", Array, matrix_2x2()),
        output("matris_cikar", Array)
            .value_with_default("MATRIX1", Array, matrix_2x2())
            .value_with_default("MATRIX2", Array, matrix_2x2()),
        output("matris_carp_complete", Array)
            .value_with_default("MATRIX1", Array, matrix_2x2())
            .value_with_default("MATRIX2", Array, matrix_2x2()),
        output("matris_determinant", Number).value_with_default("MATRIX", Array, matrix_2x2()),
        output("matris_transpose", Array).value_with_default("MATRIX", Array, matrix_2x2()),
        output("matris_skaler_carp", Array)
            .value_with_default("SCALAR", Number, 1.0)
            .value_with_default("MATRIX", Array, matrix_2x2()),
        // Counting and sequences
        output("permutasyon", Number).value("N", Number).value("R", Number),
        output("kombinasyon", Number).value("N", Number).value("R", Number),
        output("faktoriyel", Number).value_with_default("N", Number, 1.0),
        output("aritmetik_dizi", Number)
            .value("FIRST", Number)
            .value_with_default("DIFF", Number, 1.0)
            .value_with_default("N", Number, 1.0),
        output("geometrik_dizi", Number)
            .value_with_default("FIRST", Number, 1.0)
            .value_with_default("RATIO", Number, 1.0)
            .value_with_default("N", Number, 1.0),
        output("aritmetik_toplam", Number)
            .value("FIRST", Number)
            .value("LAST", Number)
            .value("N", Number),
        output("geometrik_toplam", Number)
            .value_with_default("FIRST", Number, 1.0)
            .value_with_default("RATIO", Number, 2.0)
            .value("N", Number),
        output("fibonacci_terim", Number).value("N", Number),
        // Analytic geometry
        output("dogru_denklemi", TEXT).value("M", Number).value("B", Number),
        output("iki_nokta_dogru", TEXT)
            .value("X1", Number)
            .value("Y1", Number)
            .value_with_default("X2", Number, 1.0)
            .value("Y2", Number),
        output("nokta_arasi_mesafe", Number)
            .value("X1", Number)
            .value("Y1", Number)
            .value("X2", Number)
            .value("Y2", Number),
        output("orta_nokta", Array)
            .value("X1", Number)
            .value("Y1", Number)
            .value("X2", Number)
            .value("Y2", Number),
        output("cember_denklemi", TEXT)
            .value("H", Number)
            .value("K", Number)
            .value_with_default("R", Number, 1.0),
        output("noktadan_dogruya_mesafe", Number)
            .value("X0", Number)
            .value("Y0", Number)
            .value_with_default("A", Number, 1.0)
            .value_with_default("B", Number, 1.0)
            .value("C", Number),
        // Conics
        output("parabol_denklemi", TEXT)
            .value("H", Number)
            .value("K", Number)
            .value_with_default("P", Number, 1.0)
            .dropdown("DIRECTION", &["up", "down", "right", "left"]),
        output("elips_denklemi", TEXT)
            .value("H", Number)
            .value("K", Number)
            .value_with_default("A", Number, 1.0)
            .value_with_default("B", Number, 1.0),
        output("hiperbol_denklemi", TEXT)
            .value("H", Number)
            .value("K", Number)
            .value_with_default("A", Number, 1.0)
            .value_with_default("B", Number, 1.0)
            .dropdown("ORIENTATION", &["horizontal", "vertical"]),
        // Complex numbers
        output("karmasik_sayi", TEXT).value("REAL", Number).value("IMAG", Number),
        output("karmasik_topla", TEXT)
            .value_with_default("Z1", TEXT, "0 + 0i")
            .value_with_default("Z2", TEXT, "0 + 0i"),
        output("karmasik_carp", TEXT)
            .value_with_default("Z1", TEXT, "0 + 0i")
            .value_with_default("Z2", TEXT, "0 + 0i"),
        output("karmasik_eslenigi", TEXT).value_with_default("Z", TEXT, "0 + 0i"),
        output("karmasik_modulus", Number).value_with_default("Z", TEXT, "0 + 0i"),
        // Volumes
        output("kup_hacim", Number).value_with_default("EDGE", Number, 1.0),
        output("dikdortgen_prizma_hacim", Number)
            .value_with_default("LENGTH", Number, 1.0)
            .value_with_default("WIDTH", Number, 1.0)
            .value_with_default("HEIGHT", Number, 1.0),
        output("silindir_hacim", Number)
            .value_with_default("RADIUS", Number, 1.0)
            .value_with_default("HEIGHT", Number, 1.0),
        output("koni_hacim", Number)
            .value_with_default("RADIUS", Number, 1.0)
            .value_with_default("HEIGHT", Number, 1.0),
        output("kure_hacim", Number).value_with_default("RADIUS", Number, 1.0),
        output("kure_yuzey_alani", Number).value_with_default("RADIUS", Number, 1.0),
        // Solids, drawn and calculated
        statement("koni_ciz_hesapla")
            .value_with_default("YARICAP", Number, 50.0)
            .value_with_default("YUKSEKLIK", Number, 100.0),
        statement("silindir_ciz_hesapla")
            .value_with_default("YARICAP", Number, 50.0)
            .value_with_default("YUKSEKLIK", Number, 100.0),
        statement("kure_ciz_hesapla").value_with_default("YARICAP", Number, 60.0),
        statement("kup_ciz_hesapla").value_with_default("KENAR", Number, 70.0),
        statement("dikdortgen_prizma_ciz_hesapla")
            .value_with_default("GENISLIK", Number, 60.0)
            .value_with_default("UZUNLUK", Number, 80.0)
            .value_with_default("YUKSEKLIK", Number, 50.0),
    ]
}
