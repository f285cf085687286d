// ============================================================================
// Structure : App
// ============================================================================
// État de la vue Dashboard
//
// Cycle de vie :
// 1. App::new()   : vue vide (aucune transaction, solde inconnu)
// 2. mount()      : renvoie l'unique commande de chargement
// 3. commit()     : applique le résultat du worker, si la vue est encore montée
// 4. unmount()    : la vue disparaît, les résultats tardifs sont ignorés
//
// PATTERN : "Application State"
// - Le rendu lit depuis App
// - Toutes les modifications passent par les méthodes de App
// ============================================================================

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, info, warn};

use crate::models::{present_all, Balance, PresentedTransaction};
use crate::worker::{AppCommand, AppResult, MountId};

/// Compteur global : chaque App reçoit une identité de montage unique
static NEXT_MOUNT_ID: AtomicU64 = AtomicU64::new(1);

/// État du chargement des données
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// Vue créée, fetch pas encore demandé
    Idle,

    /// Fetch envoyé au worker, en attente
    Loading,

    /// Données reçues et présentées
    Loaded,

    /// Échec du fetch : la vue reste vide
    Failed(String),
}

/// État principal de la vue
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Transactions prêtes à afficher, dans l'ordre de l'API
    pub transactions: Vec<PresentedTransaction>,

    /// Solde tel que renvoyé par l'API
    pub balance: Balance,

    pub load_state: LoadState,

    /// Ligne sélectionnée dans le tableau
    pub selected_index: usize,

    mount_id: MountId,
    mounted: bool,
    fetch_requested: bool,
}

impl App {
    /// Crée une vue vide avec une nouvelle identité de montage
    pub fn new() -> Self {
        Self {
            running: true,
            transactions: Vec::new(),
            balance: Balance::default(),
            load_state: LoadState::Idle,
            selected_index: 0,
            mount_id: NEXT_MOUNT_ID.fetch_add(1, Ordering::Relaxed),
            mounted: false,
            fetch_requested: false,
        }
    }

    // ========================================================================
    // Montage et chargement
    // ========================================================================

    /// Monte la vue
    ///
    /// Renvoie la commande de chargement au premier appel seulement :
    /// un seul fetch par montage, jamais de re-fetch.
    pub fn mount(&mut self) -> Option<AppCommand> {
        self.mounted = true;

        if self.fetch_requested {
            debug!(mount_id = self.mount_id, "Already mounted, no new fetch");
            return None;
        }

        self.fetch_requested = true;
        self.load_state = LoadState::Loading;
        info!(mount_id = self.mount_id, "Dashboard mounted, requesting data");

        Some(AppCommand::LoadDashboard {
            mount_id: self.mount_id,
        })
    }

    /// Démonte la vue : tout résultat reçu ensuite est ignoré
    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn mount_id(&self) -> MountId {
        self.mount_id
    }

    /// Applique un résultat du worker
    ///
    /// Retourne true si l'état a été modifié.
    /// Les transactions sont présentées ici puis remplacent la liste entière.
    pub fn commit(&mut self, result: AppResult) -> bool {
        if !self.mounted || result.mount_id() != self.mount_id {
            warn!(
                mount_id = self.mount_id,
                result_mount_id = result.mount_id(),
                mounted = self.mounted,
                "Discarding result for a view that is no longer mounted"
            );
            return false;
        }

        match result {
            AppResult::DashboardLoaded { response, .. } => {
                self.transactions = present_all(&response.transactions);
                self.balance = response.balance;
                self.selected_index = 0;
                self.load_state = LoadState::Loaded;
                info!(transactions = self.transactions.len(), "Dashboard state updated");
            }
            AppResult::LoadError { error, .. } => {
                self.load_state = LoadState::Failed(error);
            }
        }

        true
    }

    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    /// Message d'erreur du dernier chargement, s'il a échoué
    pub fn error_message(&self) -> Option<&str> {
        match &self.load_state {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Quitte l'application (et démonte la vue)
    pub fn quit(&mut self) {
        self.running = false;
        self.unmount();
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Remonte d'une ligne (saturating_sub : pas de panic à 0)
    pub fn navigate_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Descend d'une ligne, sans dépasser la dernière
    pub fn navigate_down(&mut self) {
        let max_index = self.transactions.len().saturating_sub(1);
        self.selected_index = (self.selected_index + 1).min(max_index);
    }

    pub fn selected_transaction(&self) -> Option<&PresentedTransaction> {
        self.transactions.get(self.selected_index)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TransactionsResponse;
    use crate::models::{Amount, Category, Transaction, TransactionType};
    use chrono::DateTime;

    fn raw(id: &str, kind: TransactionType, value: i64) -> Transaction {
        Transaction {
            id: id.to_string(),
            title: format!("T{id}"),
            value: Amount::from(value),
            kind,
            category: Category {
                title: "Geral".to_string(),
            },
            created_at: DateTime::parse_from_rfc3339("2020-05-03T10:00:00Z").unwrap(),
        }
    }

    fn loaded(mount_id: MountId, transactions: Vec<Transaction>) -> AppResult {
        AppResult::DashboardLoaded {
            mount_id,
            response: TransactionsResponse {
                transactions,
                balance: Balance::new(Amount::from(200), Amount::from(75), Amount::from(125)),
            },
        }
    }

    #[test]
    fn test_app_creation() {
        let app = App::new();
        assert!(app.is_running());
        assert!(!app.is_mounted());
        assert!(app.transactions.is_empty());
        assert!(app.balance.is_empty());
        assert_eq!(app.load_state, LoadState::Idle);
    }

    #[test]
    fn test_mount_ids_are_unique() {
        assert_ne!(App::new().mount_id(), App::new().mount_id());
    }

    #[test]
    fn test_mount_requests_fetch_once() {
        let mut app = App::new();

        let first = app.mount();
        assert_eq!(
            first,
            Some(AppCommand::LoadDashboard {
                mount_id: app.mount_id()
            })
        );
        assert!(app.is_loading());

        assert_eq!(app.mount(), None);
    }

    #[test]
    fn test_commit_presents_and_replaces() {
        let mut app = App::new();
        app.mount();

        let id = app.mount_id();
        assert!(app.commit(loaded(id, vec![raw("1", TransactionType::Income, 1)])));
        assert!(app.commit(loaded(
            id,
            vec![
                raw("2", TransactionType::Outcome, 2),
                raw("3", TransactionType::Income, 3),
            ]
        )));

        let ids: Vec<&str> = app.transactions.iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec!["2", "3"]);
        assert!(app.transactions[0].formatted_value.starts_with("- "));
        assert_eq!(app.balance.total, Some(Amount::from(125)));
        assert_eq!(app.load_state, LoadState::Loaded);
    }

    #[test]
    fn test_commit_ignores_other_mount() {
        let mut app = App::new();
        app.mount();

        let stale = loaded(app.mount_id() + 1000, vec![raw("1", TransactionType::Income, 1)]);
        assert!(!app.commit(stale));
        assert!(app.transactions.is_empty());
        assert!(app.is_loading());
    }

    #[test]
    fn test_commit_ignored_after_unmount() {
        let mut app = App::new();
        app.mount();
        app.unmount();

        let result = loaded(app.mount_id(), vec![raw("1", TransactionType::Income, 1)]);
        assert!(!app.commit(result));
        assert!(app.transactions.is_empty());
        assert!(app.balance.is_empty());
    }

    #[test]
    fn test_commit_error_keeps_empty_state() {
        let mut app = App::new();
        app.mount();

        app.commit(AppResult::LoadError {
            mount_id: app.mount_id(),
            error: "connexion refusée".to_string(),
        });

        assert_eq!(app.error_message(), Some("connexion refusée"));
        assert!(app.transactions.is_empty());
        assert!(app.balance.is_empty());
    }

    #[test]
    fn test_quit_unmounts() {
        let mut app = App::new();
        app.mount();
        app.quit();

        assert!(!app.is_running());
        assert!(!app.is_mounted());
    }

    #[test]
    fn test_navigation() {
        let mut app = App::new();
        app.mount();
        app.commit(loaded(
            app.mount_id(),
            vec![
                raw("1", TransactionType::Income, 1),
                raw("2", TransactionType::Income, 2),
            ],
        ));

        app.navigate_up();
        assert_eq!(app.selected_index, 0);

        app.navigate_down();
        app.navigate_down();
        assert_eq!(app.selected_index, 1);
        assert_eq!(app.selected_transaction().unwrap().id(), "2");

        app.navigate_up();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_navigation_on_empty_table() {
        let mut app = App::new();
        app.navigate_down();
        assert_eq!(app.selected_index, 0);
        assert!(app.selected_transaction().is_none());
    }
}
