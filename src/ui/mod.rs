// ============================================================================
// Module : ui
// ============================================================================
// Interface utilisateur (Terminal User Interface)
// ============================================================================

pub mod dashboard; // Cartes de solde + tableau des transactions
pub mod events;    // Gestion des événements clavier

// Re-exports pour simplifier les imports
pub use dashboard::{balance_figure_text, render, BalanceFigure};
pub use events::{Event, EventHandler};
