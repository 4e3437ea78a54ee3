// ============================================================================
// Corps des requêtes POST envoyées à l'API
// ============================================================================
// CONCEPT RUST : #[serde(with = "rust_decimal::serde::float")]
// - Par défaut Decimal est sérialisé en string ("10.50")
// - L'API attend un nombre JSON (10.5) : on force la sérialisation float
// ============================================================================

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::AccountType;

/// POST /accounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountCreateRequest {
    pub customer_id: String,
    pub account_type: AccountType,
    #[serde(with = "rust_decimal::serde::float")]
    pub initial_balance: Decimal,
    pub currency: String,
}

/// POST /transactions/deposit et /transactions/withdraw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub account_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub currency: String,
    pub description: String,
}

/// POST /transactions/transfer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub from_account_id: String,
    pub to_account_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub currency: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_requests_use_camel_case_and_numbers() {
        let create = AccountCreateRequest {
            customer_id: "CUST-1".to_string(),
            account_type: AccountType::Checking,
            initial_balance: dec!(100.5),
            currency: "EUR".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&create).unwrap(),
            json!({
                "customerId": "CUST-1",
                "accountType": "CHECKING",
                "initialBalance": 100.5,
                "currency": "EUR"
            })
        );

        let transfer = TransferRequest {
            from_account_id: "a".to_string(),
            to_account_id: "b".to_string(),
            amount: dec!(20),
            currency: "USD".to_string(),
            description: "Rent".to_string(),
        };
        let value = serde_json::to_value(&transfer).unwrap();
        assert_eq!(value["fromAccountId"], "a");
        assert_eq!(value["toAccountId"], "b");
        assert_eq!(value["amount"], 20.0);
    }
}
