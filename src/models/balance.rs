// ============================================================================
// Structure : Balance
// ============================================================================
// Totaux renvoyés par l'API : entrées, sorties, solde net
//
// Chaque champ est optionnel :
// - None avant le premier chargement
// - None si l'API omet le champ (pas d'erreur de décodage)
// ============================================================================

use serde::Deserialize;

use crate::models::Amount;

/// Résumé du solde
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct Balance {
    #[serde(default)]
    pub income: Option<Amount>,

    #[serde(default)]
    pub outcome: Option<Amount>,

    #[serde(default)]
    pub total: Option<Amount>,
}

impl Balance {
    /// Crée un solde complet
    pub fn new(income: Amount, outcome: Amount, total: Amount) -> Self {
        Self {
            income: Some(income),
            outcome: Some(outcome),
            total: Some(total),
        }
    }

    /// Vrai si aucun total n'est connu
    pub fn is_empty(&self) -> bool {
        self.income.is_none() && self.outcome.is_none() && self.total.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        assert!(Balance::default().is_empty());
    }

    #[test]
    fn test_deserialize_mixed_numbers_and_strings() {
        let balance: Balance =
            serde_json::from_str(r#"{ "income": 200, "outcome": "75", "total": "125.00" }"#).unwrap();

        assert_eq!(
            balance,
            Balance::new(Amount::from(200), Amount::from(75), Amount::from(125))
        );
    }

    #[test]
    fn test_deserialize_missing_fields() {
        let balance: Balance = serde_json::from_str(r#"{ "income": 10 }"#).unwrap();

        assert_eq!(balance.income, Some(Amount::from(10)));
        assert_eq!(balance.outcome, None);
        assert_eq!(balance.total, None);
    }
}
