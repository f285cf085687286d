// ============================================================================
// Background Worker
// ============================================================================
// Thread séparé qui exécute les chargements async
// - Reçoit des AppCommand via un channel
// - Exécute le fetch avec son propre runtime tokio
// - Renvoie des AppResult à la boucle d'événements
//
// CONCEPT RUST : Command pattern avec channels
// - L'UI reste synchrone et ne bloque jamais sur le réseau
// - Chaque commande/résultat porte le mount_id de la vue qui l'a demandé
// ============================================================================

use std::sync::mpsc;
use std::thread::JoinHandle;

use tracing::{debug, error, info};

use crate::api::{TransactionSource, TransactionsResponse};

/// Identité d'une vue montée (voir App::mount)
pub type MountId = u64;

/// Commandes envoyées au worker thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Charger transactions + solde pour la vue `mount_id`
    LoadDashboard { mount_id: MountId },
}

/// Résultats renvoyés par le worker thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppResult {
    /// Réponse de l'API reçue et décodée
    DashboardLoaded {
        mount_id: MountId,
        response: TransactionsResponse,
    },

    /// Erreur réseau, HTTP ou de décodage
    LoadError { mount_id: MountId, error: String },
}

impl AppResult {
    pub fn mount_id(&self) -> MountId {
        match self {
            AppResult::DashboardLoaded { mount_id, .. } | AppResult::LoadError { mount_id, .. } => {
                *mount_id
            }
        }
    }
}

/// Exécute une commande et construit le résultat correspondant
pub async fn execute<S: TransactionSource>(source: &S, command: AppCommand) -> AppResult {
    match command {
        AppCommand::LoadDashboard { mount_id } => match source.fetch().await {
            Ok(response) => {
                info!(
                    mount_id,
                    transactions = response.transactions.len(),
                    "Dashboard data loaded"
                );
                AppResult::DashboardLoaded { mount_id, response }
            }
            Err(e) => {
                error!(mount_id, error = %e, "Failed to load dashboard data");
                AppResult::LoadError {
                    mount_id,
                    error: e.to_string(),
                }
            }
        },
    }
}

/// Lance le worker thread
///
/// Le thread s'arrête quand le sender des commandes est droppé
/// ou quand la vue ne reçoit plus les résultats.
pub fn spawn_background_worker<S>(
    source: S,
    command_rx: mpsc::Receiver<AppCommand>,
    result_tx: mpsc::Sender<AppResult>,
) -> JoinHandle<()>
where
    S: TransactionSource + Send + 'static,
{
    std::thread::spawn(move || {
        // Un seul fetch à la fois : un runtime current_thread suffit
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(e) => {
                error!(error = %e, "Failed to create tokio runtime");
                return;
            }
        };

        while let Ok(command) = command_rx.recv() {
            info!(?command, "Worker received command");

            let result = runtime.block_on(execute(&source, command));

            if result_tx.send(result).is_err() {
                // La vue a été démontée : personne n'attend plus ce résultat
                debug!("Result receiver dropped, discarding result");
                break;
            }
        }

        info!("Worker thread exiting (channel closed)");
    })
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FetchError;
    use crate::models::{Amount, Balance};
    use reqwest::StatusCode;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Source factice : compte les appels et renvoie une réponse fixe
    struct StubSource {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    impl TransactionSource for StubSource {
        async fn fetch(&self) -> Result<TransactionsResponse, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(FetchError::Status(StatusCode::BAD_GATEWAY));
            }
            Ok(TransactionsResponse {
                transactions: Vec::new(),
                balance: Balance::new(Amount::from(1), Amount::from(2), Amount::from(-1)),
            })
        }
    }

    #[tokio::test]
    async fn test_execute_success() {
        let source = StubSource {
            calls: Arc::new(AtomicUsize::new(0)),
            fail: false,
        };

        let result = execute(&source, AppCommand::LoadDashboard { mount_id: 7 }).await;

        assert_eq!(result.mount_id(), 7);
        assert!(matches!(result, AppResult::DashboardLoaded { .. }));
    }

    #[tokio::test]
    async fn test_execute_failure_is_typed_result() {
        let source = StubSource {
            calls: Arc::new(AtomicUsize::new(0)),
            fail: true,
        };

        let result = execute(&source, AppCommand::LoadDashboard { mount_id: 3 }).await;

        match result {
            AppResult::LoadError { mount_id, error } => {
                assert_eq!(mount_id, 3);
                assert!(error.contains("502"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_worker_round_trip_and_shutdown() {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = StubSource {
            calls: calls.clone(),
            fail: false,
        };

        let (command_tx, command_rx) = mpsc::channel();
        let (result_tx, result_rx) = mpsc::channel();
        let handle = spawn_background_worker(source, command_rx, result_tx);

        command_tx.send(AppCommand::LoadDashboard { mount_id: 1 }).unwrap();
        let result = result_rx.recv().unwrap();
        assert_eq!(result.mount_id(), 1);

        // Fermer le channel des commandes arrête le worker
        drop(command_tx);
        handle.join().unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
