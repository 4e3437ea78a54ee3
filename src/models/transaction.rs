// ============================================================================
// Structure : Transaction
// ============================================================================
// Enregistrement immuable d'une opération sur un compte
// (dépôt, retrait, virement, intérêts)
//
// Le client ne crée jamais de Transaction lui-même : elles arrivent en
// réponse aux POST /transactions/* ou via l'historique d'un compte.
// ============================================================================

use chrono::{DateTime, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::money::format_currency;

/// Type de transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
    Transfer,
    InterestCredit,
}

impl TransactionType {
    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Deposit => "DEPOSIT",
            TransactionType::Withdrawal => "WITHDRAWAL",
            TransactionType::Transfer => "TRANSFER",
            TransactionType::InterestCredit => "INTEREST_CREDIT",
        }
    }
}

/// Sens d'une transaction vu depuis un compte donné
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Argent entrant (+)
    Credit,
    /// Argent sortant (-)
    Debit,
}

impl Direction {
    pub fn sign(&self) -> char {
        match self {
            Direction::Credit => '+',
            Direction::Debit => '-',
        }
    }
}

/// Contrepartie d'un virement, vue depuis le compte consulté
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Counterparty {
    /// Virement sortant : l'argent part vers ce compte
    To(String),
    /// Virement entrant : l'argent vient de ce compte
    From(String),
}

/// Transaction renvoyée par l'API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub transaction_id: String,

    /// Compte qui a initié l'opération (compte source pour un virement)
    pub account_id: String,

    /// CONCEPT RUST : #[serde(rename = "type")]
    /// - "type" est un mot-clé réservé en Rust
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,

    pub amount: Decimal,

    pub currency: String,

    /// Peut être null côté serveur
    #[serde(default)]
    pub description: Option<String>,

    /// LocalDateTime ISO-8601 (ex: "2024-01-15T10:30:00.123")
    pub timestamp: String,

    /// Compte destinataire d'un virement
    #[serde(default)]
    pub related_account_id: Option<String>,
}

impl Transaction {
    /// Calcule le sens de la transaction pour le compte consulté
    ///
    /// L'historique d'un compte contient aussi les virements dont il est
    /// le destinataire (relatedAccountId) : ceux-là sont des crédits.
    pub fn direction(&self, viewed_account_id: &str) -> Direction {
        match self.transaction_type {
            TransactionType::Deposit | TransactionType::InterestCredit => Direction::Credit,
            TransactionType::Withdrawal => Direction::Debit,
            TransactionType::Transfer => {
                if self.is_incoming_transfer(viewed_account_id) {
                    Direction::Credit
                } else {
                    Direction::Debit
                }
            }
        }
    }

    /// Retourne la contrepartie si la transaction en a une
    pub fn counterparty(&self, viewed_account_id: &str) -> Option<Counterparty> {
        let related = self.related_account_id.as_deref().filter(|id| !id.is_empty())?;

        if self.is_incoming_transfer(viewed_account_id) {
            Some(Counterparty::From(self.account_id.clone()))
        } else {
            Some(Counterparty::To(related.to_string()))
        }
    }

    fn is_incoming_transfer(&self, viewed_account_id: &str) -> bool {
        self.related_account_id.as_deref() == Some(viewed_account_id)
            && self.account_id != viewed_account_id
    }

    /// Montant formaté sans signe (ex: "€50.00")
    pub fn formatted_amount(&self) -> String {
        format_currency(self.amount, &self.currency)
    }

    /// Date lisible au format en-US (ex: "1/15/2024, 10:30:00 AM")
    ///
    /// CONCEPT RUST : fallback gracieux
    /// - Si le serveur change de format, on affiche la valeur brute
    ///   plutôt que de faire échouer tout l'historique
    pub fn display_timestamp(&self) -> String {
        const DISPLAY_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

        // Secondes absentes quand elles valent zéro ("2024-01-15T10:30")
        for naive_format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
            if let Ok(local) = NaiveDateTime::parse_from_str(&self.timestamp, naive_format) {
                return local.format(DISPLAY_FORMAT).to_string();
            }
        }
        if let Ok(zoned) = DateTime::parse_from_rfc3339(&self.timestamp) {
            return zoned.format(DISPLAY_FORMAT).to_string();
        }
        self.timestamp.clone()
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn transaction(transaction_type: TransactionType, account_id: &str, related: Option<&str>) -> Transaction {
        Transaction {
            transaction_id: "tx-1".to_string(),
            account_id: account_id.to_string(),
            transaction_type,
            amount: dec!(50),
            currency: "EUR".to_string(),
            description: Some("Rent".to_string()),
            timestamp: "2024-01-15T10:30:00.123456".to_string(),
            related_account_id: related.map(str::to_string),
        }
    }

    #[test]
    fn test_transaction_deserialization() {
        let json = r#"{
            "transactionId": "tx-42",
            "accountId": "acc-1",
            "type": "TRANSFER",
            "amount": 25.5,
            "currency": "USD",
            "timestamp": "2024-01-15T10:30:00",
            "description": null,
            "relatedAccountId": "acc-2"
        }"#;

        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.transaction_type, TransactionType::Transfer);
        assert_eq!(tx.amount, dec!(25.5));
        assert_eq!(tx.description(), "");
        assert_eq!(tx.related_account_id.as_deref(), Some("acc-2"));
    }

    #[test]
    fn test_direction() {
        let deposit = transaction(TransactionType::Deposit, "acc-1", None);
        assert_eq!(deposit.direction("acc-1"), Direction::Credit);

        let interest = transaction(TransactionType::InterestCredit, "acc-1", None);
        assert_eq!(interest.direction("acc-1"), Direction::Credit);

        let withdrawal = transaction(TransactionType::Withdrawal, "acc-1", None);
        assert_eq!(withdrawal.direction("acc-1"), Direction::Debit);

        // Même virement vu des deux côtés
        let transfer = transaction(TransactionType::Transfer, "acc-1", Some("acc-2"));
        assert_eq!(transfer.direction("acc-1"), Direction::Debit);
        assert_eq!(transfer.direction("acc-2"), Direction::Credit);
    }

    #[test]
    fn test_counterparty() {
        let transfer = transaction(TransactionType::Transfer, "acc-1", Some("acc-2"));
        assert_eq!(transfer.counterparty("acc-1"), Some(Counterparty::To("acc-2".to_string())));
        assert_eq!(transfer.counterparty("acc-2"), Some(Counterparty::From("acc-1".to_string())));

        let deposit = transaction(TransactionType::Deposit, "acc-1", None);
        assert_eq!(deposit.counterparty("acc-1"), None);

        let empty_related = transaction(TransactionType::Deposit, "acc-1", Some(""));
        assert_eq!(empty_related.counterparty("acc-1"), None);
    }

    #[test]
    fn test_display_timestamp() {
        let tx = transaction(TransactionType::Deposit, "acc-1", None);
        assert_eq!(tx.display_timestamp(), "1/15/2024, 10:30:00 AM");

        let mut afternoon = tx.clone();
        afternoon.timestamp = "2024-12-03T15:04:05Z".to_string();
        assert_eq!(afternoon.display_timestamp(), "12/3/2024, 3:04:05 PM");

        let mut whole_minute = tx.clone();
        whole_minute.timestamp = "2024-01-15T10:30".to_string();
        assert_eq!(whole_minute.display_timestamp(), "1/15/2024, 10:30:00 AM");

        let mut garbage = tx;
        garbage.timestamp = "yesterday".to_string();
        assert_eq!(garbage.display_timestamp(), "yesterday");
    }
}
