// ============================================================================
// Structures : Transaction et PresentedTransaction
// ============================================================================
// Une transaction telle que renvoyée par l'API, et sa version prête à afficher
//
// CONCEPTS RUST :
// 1. Enums serde : "income" / "outcome" -> TransactionType
// 2. Emprunt : present() lit la transaction sans jamais la modifier
// 3. Composition : PresentedTransaction contient la transaction brute
// ============================================================================

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

use crate::format::format_value;
use crate::models::Amount;

/// Motif de date affiché dans le tableau (jour/mois/année)
pub const DATE_PATTERN: &str = "%d/%m/%Y";

/// Sens d'une transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Entrée d'argent
    Income,
    /// Sortie d'argent
    Outcome,
}

/// Catégorie d'une transaction (ex: "Alimentação")
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    pub title: String,
}

/// Transaction brute, propriété de l'API distante
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Transaction {
    /// Identifiant unique
    pub id: String,

    /// Libellé libre
    pub title: String,

    /// Montant (toujours positif, le sens est donné par `kind`)
    pub value: Amount,

    /// CONCEPT SERDE : "type" est un mot-clé Rust, on renomme le champ
    #[serde(rename = "type")]
    pub kind: TransactionType,

    pub category: Category,

    /// Date de création, avec le décalage horaire envoyé par l'API
    #[serde(deserialize_with = "deserialize_created_at")]
    pub created_at: DateTime<FixedOffset>,
}

/// Transaction enrichie des champs d'affichage
///
/// Les champs dérivés sont recalculés à chaque chargement, jamais stockés ailleurs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentedTransaction {
    /// Copie de la transaction brute
    pub transaction: Transaction,

    /// Montant formaté, préfixé par "- " pour une sortie
    pub formatted_value: String,

    /// Date au format DD/MM/YYYY
    pub formatted_date: String,
}

impl PresentedTransaction {
    pub fn id(&self) -> &str {
        &self.transaction.id
    }

    pub fn kind(&self) -> TransactionType {
        self.transaction.kind
    }
}

// ============================================================================
// Présentation
// ============================================================================

/// Prépare une transaction pour l'affichage
///
/// CONCEPT RUST : &Transaction
/// - On emprunte la transaction en lecture seule
/// - Le compilateur garantit qu'elle n'est pas modifiée
/// - Même entrée -> même sortie (fonction pure)
pub fn present(transaction: &Transaction) -> PresentedTransaction {
    let formatted_date = transaction.created_at.format(DATE_PATTERN).to_string();

    let mut formatted_value = format_value(transaction.value);
    if transaction.kind == TransactionType::Outcome {
        formatted_value = format!("- {formatted_value}");
    }

    PresentedTransaction {
        transaction: transaction.clone(),
        formatted_value,
        formatted_date,
    }
}

/// Prépare une liste de transactions, en conservant l'ordre de l'API
pub fn present_all(transactions: &[Transaction]) -> Vec<PresentedTransaction> {
    transactions.iter().map(present).collect()
}

// ============================================================================
// Désérialisation de created_at
// ============================================================================
// Formats acceptés, dans l'ordre :
// - RFC 3339 : "2020-05-03T12:00:00.000Z", "2020-05-03T09:00:00-03:00"
// - Date-heure sans fuseau (prise en UTC) : "2020-05-03T12:00:00"
// - Date seule (minuit UTC) : "2020-05-03"
// ============================================================================

fn deserialize_created_at<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("date invalide : {raw:?}")))
}

fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime);
    }

    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;

    Some(naive.and_utc().fixed_offset())
}

// ============================================================================
// Tests unitaires
// ============================================================================
