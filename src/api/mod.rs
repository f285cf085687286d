// ============================================================================
// Module : api
// ============================================================================
// Accès aux données distantes du dashboard
// ============================================================================

pub mod transactions; // Client de l'API GoFinances (GET /transactions)

// Re-export des types principaux
pub use transactions::{ApiClient, FetchError, TransactionSource, TransactionsResponse};
