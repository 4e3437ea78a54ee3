// ============================================================================
// Structure : Account
// ============================================================================
// Représente un compte bancaire tel que renvoyé par l'API REST
//
// CONCEPTS RUST :
// 1. #[serde(rename_all = "camelCase")] : l'API parle en camelCase
//    ("accountId"), le code Rust en snake_case (account_id)
// 2. Decimal : montants exacts (1234.50 reste 1234.50, pas 1234.4999...)
// 3. Copy pour les petits enums : pas besoin de .clone()
// ============================================================================

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::money::format_currency;

/// Type de compte bancaire
///
/// CONCEPT RUST : rename_all = "SCREAMING_SNAKE_CASE"
/// - FixedDeposit (Rust) <-> "FIXED_DEPOSIT" (JSON)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    Savings,
    Checking,
    Current,
    FixedDeposit,
}

impl AccountType {
    /// Labels tels qu'envoyés à l'API (ordre d'affichage dans le formulaire)
    pub const LABELS: &'static [&'static str] = &["SAVINGS", "CHECKING", "CURRENT", "FIXED_DEPOSIT"];

    /// Retourne le label API (ex: "FIXED_DEPOSIT")
    pub fn label(&self) -> &'static str {
        match self {
            AccountType::Savings => "SAVINGS",
            AccountType::Checking => "CHECKING",
            AccountType::Current => "CURRENT",
            AccountType::FixedDeposit => "FIXED_DEPOSIT",
        }
    }

    /// Retrouve un type depuis son label (insensible à la casse)
    ///
    /// CONCEPT RUST : Option<Self>
    /// - None si le label est inconnu, pas de panic
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_uppercase().as_str() {
            "SAVINGS" => Some(AccountType::Savings),
            "CHECKING" => Some(AccountType::Checking),
            "CURRENT" => Some(AccountType::Current),
            "FIXED_DEPOSIT" => Some(AccountType::FixedDeposit),
            _ => None,
        }
    }

    /// Retourne tous les types disponibles
    pub fn all() -> Vec<AccountType> {
        vec![
            AccountType::Savings,
            AccountType::Checking,
            AccountType::Current,
            AccountType::FixedDeposit,
        ]
    }
}

/// Compte bancaire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Identifiant opaque du compte (UUID côté serveur)
    pub account_id: String,

    /// Identifiant du client propriétaire
    pub customer_id: String,

    /// Type de compte
    pub account_type: AccountType,

    /// Solde courant
    pub balance: Decimal,

    /// Devise ISO-4217 (ex: "USD", "EUR")
    pub currency: String,

    /// Compte actif ou désactivé
    pub active: bool,
}

impl Account {
    /// Identifiant court pour l'affichage (xxxx-xxxx-xxxx-xxxx)
    pub fn short_id(&self) -> String {
        format_account_id(&self.account_id)
    }

    /// Solde formaté dans la devise du compte (ex: "$1,234.50")
    pub fn formatted_balance(&self) -> String {
        format_currency(self.balance, &self.currency)
    }

    pub fn status_label(&self) -> &'static str {
        if self.active {
            "Active"
        } else {
            "Inactive"
        }
    }

    /// Label utilisé dans les sélecteurs de compte des formulaires
    ///
    /// Format : "3f2b-8c1e-9d4a-4b7e - SAVINGS ($1,234.50)"
    pub fn picker_label(&self) -> String {
        format!(
            "{} - {} ({})",
            self.short_id(),
            self.account_type.label(),
            self.formatted_balance()
        )
    }
}

/// Formate un identifiant de compte en 4 groupes de 4 caractères
///
/// Les tirets de l'identifiant (UUID) sont ignorés pour que les groupes
/// restent réguliers. Un identifiant court donne des groupes tronqués,
/// un identifiant vide donne une chaîne vide.
///
/// CONCEPT RUST : chars() plutôt que des index d'octets
/// - &s[0..4] paniquerait sur un caractère multi-octets
/// - chars().skip().take() découpe toujours sur des caractères entiers
pub fn format_account_id(account_id: &str) -> String {
    if account_id.is_empty() {
        return String::new();
    }

    let chars: Vec<char> = account_id.chars().filter(|c| *c != '-').collect();
    let group = |start: usize| -> String { chars.iter().skip(start).take(4).collect() };

    format!("{}-{}-{}-{}", group(0), group(4), group(8), group(12))
}

// ============================================================================
// Tests unitaires
// ============================================================================
