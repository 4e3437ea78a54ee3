// ============================================================================
// Module : api
// ============================================================================
// Client de l'API bancaire REST et trait d'abstraction du backend
//
// CONCEPT RUST : Trait comme point d'injection
// - Le Controller est générique sur BankingBackend
// - En production : BankingApi (HTTP via reqwest)
// - En test : un faux backend en mémoire qui compte les appels
// ============================================================================

pub mod client; // Client HTTP (reqwest)
pub mod error;  // ApiError, ApiResult

pub use client::{BankingApi, DEFAULT_TIMEOUT};
pub use error::{rejection_message, ApiError, ApiResult};

use crate::models::{
    Account, AccountCreateRequest, Transaction, TransactionRequest, TransferRequest,
};

/// Opérations exposées par l'API bancaire
///
/// CONCEPT RUST : async fn dans un trait
/// - Stable depuis Rust 1.75
/// - Les futures ne sont pas forcément Send : le worker les exécute
///   avec block_on sur son propre runtime, ce n'est pas un problème
#[allow(async_fn_in_trait)]
pub trait BankingBackend {
    /// GET /accounts
    async fn list_accounts(&self) -> ApiResult<Vec<Account>>;

    /// GET /accounts/customer/{customer_id}
    async fn customer_accounts(&self, customer_id: &str) -> ApiResult<Vec<Account>>;

    /// POST /accounts
    async fn create_account(&self, request: &AccountCreateRequest) -> ApiResult<Account>;

    /// POST /transactions/deposit
    async fn deposit(&self, request: &TransactionRequest) -> ApiResult<Transaction>;

    /// POST /transactions/withdraw
    async fn withdraw(&self, request: &TransactionRequest) -> ApiResult<Transaction>;

    /// POST /transactions/transfer
    async fn transfer(&self, request: &TransferRequest) -> ApiResult<Transaction>;

    /// GET /transactions/account/{account_id}
    async fn account_transactions(&self, account_id: &str) -> ApiResult<Vec<Transaction>>;
}
