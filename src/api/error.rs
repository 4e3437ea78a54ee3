// ============================================================================
// Erreurs de l'API
// ============================================================================
// CONCEPT RUST : thiserror
// - #[derive(Error)] génère l'implémentation de std::error::Error
// - #[error("...")] génère Display
// - #[from] génère From<reqwest::Error>, ce qui permet d'utiliser ?
//
// On distingue explicitement :
// - Network  : la requête n'a pas abouti (connexion, timeout...)
// - Rejected : le serveur a répondu avec un statut non-2xx
// - Decode   : le serveur a répondu 2xx mais le JSON est inattendu
// ============================================================================

use serde_json::Value;
use thiserror::Error;

/// Résultat de tous les appels à l'API
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Échec de transport (pas de réponse HTTP exploitable)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Réponse non-2xx : `message` est ce qu'on affiche à l'utilisateur
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// Réponse 2xx dont le corps ne correspond pas au type attendu
    #[error("unexpected response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// URL de base invalide (erreur de configuration)
    #[error("invalid API base URL `{0}`")]
    InvalidBaseUrl(String),
}

impl ApiError {
    /// true si le serveur a refusé la requête (erreur applicative)
    pub fn is_rejection(&self) -> bool {
        matches!(self, ApiError::Rejected { .. })
    }

    /// Statut HTTP si le serveur a répondu
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Extrait le message d'erreur d'une réponse non-2xx
///
/// Ordre de préférence :
/// 1. champ "message" du corps JSON
/// 2. corps brut de la réponse
/// 3. "HTTP error! status: <code>" si le corps est vide
pub fn rejection_message(status: u16, body: &str) -> String {
    if body.trim().is_empty() {
        return format!("HTTP error! status: {}", status);
    }

    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| {
            json.get("message")
                .and_then(Value::as_str)
                .filter(|message| !message.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}
