// ============================================================================
// API Client : banque REST
// ============================================================================
// Appelle les endpoints de l'API bancaire :
//   GET  /accounts                     GET  /accounts/customer/{id}
//   POST /accounts
//   POST /transactions/deposit         POST /transactions/withdraw
//   POST /transactions/transfer        GET  /transactions/account/{id}
//
// CONCEPTS RUST :
// 1. async/await : appels réseau non-bloquants
// 2. Generics + DeserializeOwned : une seule fonction pour tous les GET
// 3. reqwest::Url : les ids sont encodés proprement dans le chemin
// ============================================================================

use std::time::Duration;

use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

use crate::api::error::{rejection_message, ApiError, ApiResult};
use crate::api::BankingBackend;
use crate::models::{
    Account, AccountCreateRequest, Transaction, TransactionRequest, TransferRequest,
};

/// Timeout par défaut des requêtes HTTP
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client HTTP de l'API bancaire
///
/// CONCEPT RUST : Clone bon marché
/// - reqwest::Client contient un Arc interne : cloner ne recrée pas
///   de pool de connexions
#[derive(Debug, Clone)]
pub struct BankingApi {
    client: reqwest::Client,
    base_url: Url,
}

impl BankingApi {
    /// Crée un client avec le timeout par défaut
    ///
    /// # Arguments
    /// * `base_url` - Racine de l'API (ex: "http://localhost:8080/api")
    pub fn new(base_url: &str) -> ApiResult<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let parsed = Url::parse(base_url).map_err(|_| ApiError::InvalidBaseUrl(base_url.to_string()))?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("lazybank/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        debug!(base_url = %parsed, ?timeout, "Created banking API client");
        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// Construit l'URL d'un endpoint à partir de segments de chemin
    ///
    /// CONCEPT : path_segments_mut
    /// - Chaque segment est percent-encodé ("cust 1" -> "cust%201")
    /// - pop_if_empty() gère une base avec ou sans "/" final
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> ApiResult<T> {
        let url = self.endpoint(segments);
        debug!(url = %url, "GET");
        let request = self.client.get(url.clone());
        self.send(url, request).await
    }

    async fn post<B, T>(&self, segments: &[&str], body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments);
        debug!(url = %url, "POST");
        let request = self.client.post(url.clone()).json(body);
        self.send(url, request).await
    }

    /// Envoie la requête et décode la réponse
    ///
    /// CONCEPT RUST : ? et From
    /// - send().await? convertit reqwest::Error en ApiError::Network
    ///   grâce au #[from] de l'enum
    async fn send<T: DeserializeOwned>(&self, url: Url, request: RequestBuilder) -> ApiResult<T> {
        let response = request.send().await?;

        let status = response.status();
        debug!(status = %status, "Received HTTP response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = rejection_message(status.as_u16(), &body);
            warn!(status = %status, url = %url, message = %message, "Banking API rejected request");
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        serde_json::from_str::<T>(&body).map_err(|source| {
            error!(url = %url, body = %body, "Failed to decode banking API response");
            ApiError::Decode {
                endpoint: url.path().to_string(),
                source,
            }
        })
    }
}

// ============================================================================
// Implémentation du trait BankingBackend
// ============================================================================
// CONCEPT RUST : #[instrument]
// - Ajoute un span tracing avec les paramètres de la fonction
// - skip(self) : le client n'a rien d'intéressant à logger
// ============================================================================

impl BankingBackend for BankingApi {
    #[instrument(skip(self))]
    async fn list_accounts(&self) -> ApiResult<Vec<Account>> {
        let accounts: Vec<Account> = self.get(&["accounts"]).await?;
        info!(count = accounts.len(), "Fetched accounts");
        Ok(accounts)
    }

    #[instrument(skip(self))]
    async fn customer_accounts(&self, customer_id: &str) -> ApiResult<Vec<Account>> {
        let accounts: Vec<Account> = self.get(&["accounts", "customer", customer_id]).await?;
        info!(count = accounts.len(), "Fetched customer accounts");
        Ok(accounts)
    }

    #[instrument(skip(self, request), fields(customer_id = %request.customer_id))]
    async fn create_account(&self, request: &AccountCreateRequest) -> ApiResult<Account> {
        let account: Account = self.post(&["accounts"], request).await?;
        info!(account_id = %account.account_id, "Account created");
        Ok(account)
    }

    #[instrument(skip(self, request), fields(account_id = %request.account_id, amount = %request.amount))]
    async fn deposit(&self, request: &TransactionRequest) -> ApiResult<Transaction> {
        self.post(&["transactions", "deposit"], request).await
    }

    #[instrument(skip(self, request), fields(account_id = %request.account_id, amount = %request.amount))]
    async fn withdraw(&self, request: &TransactionRequest) -> ApiResult<Transaction> {
        self.post(&["transactions", "withdraw"], request).await
    }

    #[instrument(skip(self, request), fields(from = %request.from_account_id, to = %request.to_account_id))]
    async fn transfer(&self, request: &TransferRequest) -> ApiResult<Transaction> {
        self.post(&["transactions", "transfer"], request).await
    }

    #[instrument(skip(self))]
    async fn account_transactions(&self, account_id: &str) -> ApiResult<Vec<Transaction>> {
        let transactions: Vec<Transaction> =
            self.get(&["transactions", "account", account_id]).await?;
        info!(count = transactions.len(), "Fetched account transactions");
        Ok(transactions)
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
// Les appels réseau réels sont testés dans tests/api_client.rs contre un
// serveur axum en mémoire.
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_building() {
        let api = BankingApi::new("http://localhost:8080/api").unwrap();
        assert_eq!(
            api.endpoint(&["accounts"]).as_str(),
            "http://localhost:8080/api/accounts"
        );
        assert_eq!(
            api.endpoint(&["accounts", "customer", "cust 1"]).as_str(),
            "http://localhost:8080/api/accounts/customer/cust%201"
        );
    }

    #[test]
    fn test_endpoint_with_trailing_slash() {
        let api = BankingApi::new("http://localhost:8080/api/").unwrap();
        assert_eq!(
            api.endpoint(&["transactions", "deposit"]).as_str(),
            "http://localhost:8080/api/transactions/deposit"
        );
    }

    #[test]
    fn test_endpoint_escapes_slashes_in_ids() {
        let api = BankingApi::new("http://localhost:8080/api").unwrap();
        let url = api.endpoint(&["transactions", "account", "a/b"]);
        assert_eq!(url.path(), "/api/transactions/account/a%2Fb");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            BankingApi::new("not a url"),
            Err(ApiError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            BankingApi::new("mailto:bank@example.com"),
            Err(ApiError::InvalidBaseUrl(_))
        ));
    }
}
