// ============================================================================
// API Client : transactions
// ============================================================================
// Récupère la liste des transactions et le solde depuis l'API GoFinances
//
// CONCEPTS RUST :
// 1. Trait comme point d'injection : TransactionSource
// 2. async/await : requête HTTP non-bloquante avec reqwest
// 3. Erreurs typées avec thiserror : FetchError
// ============================================================================

use std::future::Future;

use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error, info, instrument};

use crate::models::{Balance, Transaction};

/// Chemin de la ressource sur l'API
pub const TRANSACTIONS_PATH: &str = "transactions";

/// Corps de la réponse GET /transactions
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TransactionsResponse {
    pub transactions: Vec<Transaction>,
    pub balance: Balance,
}

/// Erreurs possibles lors du chargement
#[derive(Debug, Error)]
pub enum FetchError {
    /// URL de base mal formée
    #[error("URL d'API invalide : {0}")]
    InvalidUrl(String),

    /// Échec réseau (connexion refusée, DNS, coupure...)
    #[error("échec de la requête HTTP : {0}")]
    Transport(#[from] reqwest::Error),

    /// L'API répond, mais pas avec un succès 2xx
    #[error("l'API a retourné une erreur : HTTP {0}")]
    Status(StatusCode),

    /// Corps de réponse qui ne correspond pas au format attendu
    #[error("réponse JSON invalide : {0}")]
    Decode(#[from] serde_json::Error),
}

// ============================================================================
// Trait : TransactionSource
// ============================================================================
// CONCEPT RUST : Injection de dépendance par trait
// - La vue ne connaît pas reqwest, seulement "quelque chose qui fetch"
// - ApiClient en production, un stub dans les tests
// - + Send : la future doit pouvoir tourner dans le worker thread
// ============================================================================

/// Source de données du dashboard
pub trait TransactionSource {
    /// Récupère transactions et solde en une seule requête
    fn fetch(&self) -> impl Future<Output = Result<TransactionsResponse, FetchError>> + Send;
}

/// Client HTTP pour l'API GoFinances
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Crée un client avec la configuration reqwest par défaut
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(concat!("gofinances/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Self::with_client(base_url, client)
    }

    /// Crée un client à partir d'un reqwest::Client déjà configuré
    pub fn with_client(base_url: &str, client: Client) -> Result<Self, FetchError> {
        Url::parse(base_url).map_err(|e| FetchError::InvalidUrl(format!("{base_url}: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL complète de la ressource : {base}/transactions
    pub fn transactions_url(&self) -> String {
        format!("{}/{}", self.base_url, TRANSACTIONS_PATH)
    }

    /// GET /transactions
    ///
    /// Pas de retry ni de timeout : un échec est renvoyé tel quel à l'appelant.
    #[instrument(skip(self), fields(url = %self.transactions_url()))]
    pub async fn fetch_transactions(&self) -> Result<TransactionsResponse, FetchError> {
        debug!("Sending HTTP request");
        let response = self.client.get(self.transactions_url()).send().await.map_err(|e| {
            error!(error = %e, "HTTP request failed");
            FetchError::Transport(e)
        })?;

        let status = response.status();
        debug!(status = %status, "Received HTTP response");

        if !status.is_success() {
            error!(status = %status, "API returned error status");
            return Err(FetchError::Status(status));
        }

        // On lit le corps brut puis on décode avec serde_json :
        // une erreur de format devient FetchError::Decode, pas Transport
        let body = response.bytes().await?;
        let data: TransactionsResponse = serde_json::from_slice(&body).map_err(|e| {
            error!(error = %e, bytes = body.len(), "Failed to decode transactions response");
            FetchError::Decode(e)
        })?;

        info!(
            transactions = data.transactions.len(),
            "Successfully fetched transactions"
        );
        Ok(data)
    }
}

impl TransactionSource for ApiClient {
    async fn fetch(&self) -> Result<TransactionsResponse, FetchError> {
        self.fetch_transactions().await
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
