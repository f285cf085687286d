// ============================================================================
// Formatage monétaire (pt-BR / BRL)
// ============================================================================
// Transforme un montant en chaîne localisée : 1234.5 -> "R$ 1.234,50"
//
// Règles pt-BR :
// - Séparateur de milliers : "."
// - Séparateur décimal : ","
// - Deux décimales, arrondi "half away from zero"
// - Symbole "R$" suivi d'une espace insécable (U+00A0)
// - Signe négatif avant le symbole : "-R$ 10,00"
// ============================================================================

use rust_decimal::RoundingStrategy;

use crate::models::Amount;

/// Symbole de la devise (Real brésilien)
pub const CURRENCY_SYMBOL: &str = "R$";

/// Espace insécable entre le symbole et le nombre
const NBSP: char = '\u{a0}';

/// Affichage d'un montant absent (solde pas encore chargé)
pub const MISSING_VALUE: &str = "R$\u{a0}--";

/// Formate un montant en reais
///
/// # Exemple
/// let text = format_value(Amount::from(1000));
/// assert_eq!(text, "R$\u{a0}1.000,00");
pub fn format_value(amount: Amount) -> String {
    let rounded = amount
        .value()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    // {:.2} garantit exactement deux décimales ("5" -> "5.00")
    let digits = format!("{:.2}", rounded.abs());
    let (int_part, dec_part) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let sign = if Amount::new(rounded).is_negative() { "-" } else { "" };

    format!(
        "{sign}{CURRENCY_SYMBOL}{NBSP}{},{dec_part}",
        group_thousands(int_part)
    )
}

/// Formate un montant optionnel, avec un marqueur si absent
pub fn format_optional(amount: Option<Amount>) -> String {
    amount
        .map(format_value)
        .unwrap_or_else(|| MISSING_VALUE.to_string())
}

/// Regroupe les chiffres par trois : "1234567" -> "1.234.567"
fn group_thousands(int_part: &str) -> String {
    int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(".")
}

// ============================================================================
// Tests unitaires
// ============================================================================
