/// Derived column holding the bracket label.
pub const AGE_BRACKET_COLUMN: &str = "faixa_etaria";

pub const UNDER_18: &str = "Menor de 18";
pub const AGE_18_25: &str = "18-25 anos";
pub const AGE_26_35: &str = "26-35 anos";
pub const AGE_36_50: &str = "36-50 anos";
pub const AGE_51_100: &str = "50-100 anos";
pub const NOT_INFORMED: &str = "Não Informado";

/// Bracket label for an age. Upper bounds are inclusive; anything outside
/// 0..=100, NaN, or missing is `Não Informado`.
pub fn age_bracket(age: Option<f64>) -> &'static str {
    match age {
        Some(a) if (0.0..18.0).contains(&a) => UNDER_18,
        Some(a) if (18.0..=25.0).contains(&a) => AGE_18_25,
        Some(a) if a > 25.0 && a <= 35.0 => AGE_26_35,
        Some(a) if a > 35.0 && a <= 50.0 => AGE_36_50,
        Some(a) if a > 50.0 && a <= 100.0 => AGE_51_100,
        _ => NOT_INFORMED,
    }
}
