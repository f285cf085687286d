// ============================================================================
// Module : models
// ============================================================================
// Structures de données du dashboard : montants, transactions, solde
// ============================================================================

pub mod amount;      // Montant décimal (nombre ou chaîne numérique côté JSON)
pub mod balance;     // Totaux entrées / sorties / net
pub mod transaction; // Transaction brute + présentation

// Re-export des structures principales pour simplifier les imports
pub use amount::{Amount, AmountError};
pub use balance::Balance;
pub use transaction::{
    present, present_all, Category, PresentedTransaction, Transaction, TransactionType,
};
