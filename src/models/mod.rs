// ============================================================================
// Module : models
// ============================================================================
// Ce module contient toutes les structures de données échangées avec
// l'API bancaire (comptes, transactions, corps de requêtes)
// ============================================================================

pub mod account;     // Compte bancaire (account.rs)
pub mod money;       // Formatage des montants par devise
pub mod requests;    // Corps des requêtes POST
pub mod transaction; // Transaction et sens (crédit/débit)

// Re-export des structures principales pour simplifier les imports
// Au lieu de : use lazybank::models::account::Account;
// On peut faire : use lazybank::models::Account;
pub use account::{format_account_id, Account, AccountType};
pub use money::{format_currency, CURRENCIES, DEFAULT_CURRENCY};
pub use requests::{AccountCreateRequest, TransactionRequest, TransferRequest};
pub use transaction::{Counterparty, Direction, Transaction, TransactionType};
