// ============================================================================
// GoFinances - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod api;    // Client de l'API des transactions
pub mod app;    // État de la vue Dashboard
pub mod config; // Configuration (variables d'environnement)
pub mod format; // Formatage monétaire pt-BR
pub mod models; // Structures de données
pub mod ui;     // Interface utilisateur
pub mod worker; // Worker thread pour les chargements async
