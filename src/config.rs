// ============================================================================
// Configuration
// ============================================================================
// Lue depuis les variables d'environnement (et un fichier .env optionnel)
//
// - GOFINANCES_API_URL : URL de base de l'API (défaut http://localhost:3333)
// - GOFINANCES_LOG_DIR : répertoire des logs
// - RUST_LOG           : filtre des logs (lu par tracing-subscriber)
// ============================================================================

use std::path::PathBuf;

use anyhow::{Context, Result};
use reqwest::Url;

/// Variable d'environnement de l'URL de l'API
pub const API_URL_VAR: &str = "GOFINANCES_API_URL";

/// Variable d'environnement du répertoire des logs
pub const LOG_DIR_VAR: &str = "GOFINANCES_LOG_DIR";

/// URL par défaut (serveur de développement local)
pub const DEFAULT_API_URL: &str = "http://localhost:3333";

/// Filtre de logs par défaut si RUST_LOG n'est pas défini
pub const DEFAULT_LOG_FILTER: &str = "gofinances=debug,info";

/// Configuration de l'application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub log_dir: PathBuf,
}

impl Config {
    /// Charge la configuration depuis l'environnement
    ///
    /// Un fichier .env absent n'est pas une erreur.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Construit la configuration à partir d'une fonction de lecture
    ///
    /// CONCEPT RUST : closure en paramètre
    /// - from_env() passe std::env::var
    /// - Les tests passent une HashMap, sans toucher à l'environnement du process
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup(API_URL_VAR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Url::parse(&api_url).with_context(|| format!("{API_URL_VAR} invalide : {api_url:?}"))?;

        let log_dir = lookup(LOG_DIR_VAR)
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_log_dir);

        Ok(Self { api_url, log_dir })
    }
}

/// ~/.local/share/gofinances/logs sur Linux, ./logs si introuvable
fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("gofinances").join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"))
}
