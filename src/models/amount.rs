// ============================================================================
// Structure : Amount
// ============================================================================
// Montant monétaire en reais, stocké en décimal exact
//
// CONCEPTS RUST :
// 1. Newtype pattern : Amount(Decimal) donne un type dédié aux montants
// 2. Traits de conversion : FromStr, From, TryFrom
// 3. Serde custom : l'API envoie soit un nombre, soit une chaîne numérique
// ============================================================================

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Erreur de conversion d'une valeur en montant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// La chaîne ne représente pas un nombre (ex: "abc")
    #[error("montant non numérique : {0:?}")]
    NotNumeric(String),

    /// Flottant non représentable (NaN, infini)
    #[error("montant non fini : {0}")]
    NotFinite(String),
}

/// Montant monétaire
///
/// CONCEPT RUST : Newtype
/// - Enveloppe Decimal sans coût à l'exécution
/// - Empêche de confondre un montant avec un autre nombre
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    /// Montant nul
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// Crée un montant depuis un Decimal
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Valeur décimale sous-jacente
    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

// ============================================================================
// Conversions
// ============================================================================

/// Parse une chaîne numérique : "1000", " 75.50 ", "1e3"
impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map(Amount)
            .map_err(|_| AmountError::NotNumeric(s.to_string()))
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Self(Decimal::from(value))
    }
}

impl TryFrom<f64> for Amount {
    type Error = AmountError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Decimal::try_from(value)
            .map(Amount)
            .map_err(|_| AmountError::NotFinite(value.to_string()))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Désérialisation : nombre OU chaîne numérique
// ============================================================================
// CONCEPT SERDE : #[serde(untagged)]
// - Serde essaie chaque variant dans l'ordre
// - Number : 1000, 75.5
// - Text : "1000", "75.50"
// ============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(serde_json::Number),
    Text(String),
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = match RawAmount::deserialize(deserializer)? {
            // Display de serde_json::Number garde la représentation JSON
            RawAmount::Number(n) => n.to_string(),
            RawAmount::Text(s) => s,
        };

        text.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
