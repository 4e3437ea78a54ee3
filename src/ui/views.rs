// ============================================================================
// View models
// ============================================================================
// Structures intermédiaires entre les données de l'API et les widgets :
// tout le formatage (montants, ids courts, signes) est fait ici, les
// fonctions de rendu n'ont plus qu'à placer des chaînes.
//
// CONCEPT RUST : ListView<T>
// - Une liste est soit Empty(message), soit Items(non vide)
// - Le rendu ne peut pas afficher un conteneur vide sans message :
//   le type ne le permet pas
// ============================================================================

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::{
    format_account_id, format_currency, Account, Counterparty, Direction, Transaction,
    TransactionType, DEFAULT_CURRENCY,
};

/// Nombre de comptes affichés sur le dashboard
pub const DASHBOARD_CARDS: usize = 6;

pub const NO_ACCOUNTS: &str = "No accounts found. Create your first account to get started.";
pub const NO_TRANSACTIONS: &str = "No transactions found for this account.";

pub fn no_customer_accounts(customer_id: &str) -> String {
    format!("No accounts found for customer {}.", customer_id)
}

/// Liste affichable : un message d'état vide ou des éléments
#[derive(Debug, Clone, PartialEq)]
pub enum ListView<T> {
    Empty(String),
    Items(Vec<T>),
}

impl<T> ListView<T> {
    pub fn from_items(items: Vec<T>, empty_message: impl Into<String>) -> Self {
        if items.is_empty() {
            ListView::Empty(empty_message.into())
        } else {
            ListView::Items(items)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ListView::Empty(_))
    }

    pub fn len(&self) -> usize {
        match self {
            ListView::Empty(_) => 0,
            ListView::Items(items) => items.len(),
        }
    }
}

/// Carte d'un compte
#[derive(Debug, Clone, PartialEq)]
pub struct AccountCard {
    pub account_type: &'static str,
    pub active: bool,
    pub status: &'static str,
    pub balance: String,
    pub short_id: String,
    /// Affiché uniquement dans l'onglet Accounts
    pub customer_id: Option<String>,
}

impl AccountCard {
    pub fn from_account(account: &Account, with_customer: bool) -> Self {
        Self {
            account_type: account.account_type.label(),
            active: account.active,
            status: account.status_label(),
            balance: account.formatted_balance(),
            short_id: account.short_id(),
            customer_id: with_customer.then(|| account.customer_id.clone()),
        }
    }
}

/// Tous les comptes (onglet Accounts)
pub fn account_list(accounts: &[Account]) -> ListView<AccountCard> {
    ListView::from_items(
        accounts.iter().map(|a| AccountCard::from_account(a, true)).collect(),
        NO_ACCOUNTS,
    )
}

/// Résultat d'une recherche par client
pub fn customer_accounts(customer_id: &str, accounts: &[Account]) -> ListView<AccountCard> {
    ListView::from_items(
        accounts.iter().map(|a| AccountCard::from_account(a, false)).collect(),
        no_customer_accounts(customer_id),
    )
}

/// Résumé du dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub total_accounts: usize,
    pub active_accounts: usize,

    /// Un total formaté par devise ("$1,234.50", "€10.00")
    ///
    /// CONCEPT : on n'additionne jamais des devises différentes
    pub total_balances: Vec<String>,

    /// Les premiers comptes de la liste
    pub recent: ListView<AccountCard>,
}

impl DashboardView {
    pub fn build(accounts: &[Account]) -> Self {
        // CONCEPT RUST : BTreeMap
        // - Trie les devises par code : l'affichage est stable d'un
        //   rechargement à l'autre
        // - Clé normalisée comme format_currency : "usd" et "USD" s'additionnent
        let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
        for account in accounts {
            let code = account.currency.trim().to_uppercase();
            *totals.entry(code).or_insert(Decimal::ZERO) += account.balance;
        }

        let total_balances = if totals.is_empty() {
            vec![format_currency(Decimal::ZERO, DEFAULT_CURRENCY)]
        } else {
            totals
                .into_iter()
                .map(|(currency, total)| format_currency(total, &currency))
                .collect()
        };

        let recent = ListView::from_items(
            accounts
                .iter()
                .take(DASHBOARD_CARDS)
                .map(|a| AccountCard::from_account(a, false))
                .collect(),
            NO_ACCOUNTS,
        );

        Self {
            total_accounts: accounts.len(),
            active_accounts: accounts.iter().filter(|a| a.active).count(),
            total_balances,
            recent,
        }
    }
}

/// Ligne de l'historique des transactions
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
    pub icon: &'static str,
    pub type_label: &'static str,
    pub description: String,
    pub date: String,
    /// "To: xxxx-..." / "From: xxxx-..."
    pub counterparty: Option<String>,
    pub direction: Direction,
    /// Montant signé ("+$10.00", "-€5.00")
    pub amount: String,
}

impl TransactionRow {
    pub fn build(transaction: &Transaction, viewed_account_id: &str) -> Self {
        let direction = transaction.direction(viewed_account_id);

        let counterparty = transaction
            .counterparty(viewed_account_id)
            .map(|c| match c {
                Counterparty::To(id) => format!("To: {}", format_account_id(&id)),
                Counterparty::From(id) => format!("From: {}", format_account_id(&id)),
            });

        Self {
            icon: icon_for(transaction.transaction_type),
            type_label: transaction.transaction_type.label(),
            description: transaction.description().to_string(),
            date: transaction.display_timestamp(),
            counterparty,
            direction,
            amount: format!("{}{}", direction.sign(), transaction.formatted_amount()),
        }
    }
}

fn icon_for(transaction_type: TransactionType) -> &'static str {
    match transaction_type {
        TransactionType::Deposit => "↓",
        TransactionType::Withdrawal => "↑",
        TransactionType::Transfer => "⇄",
        TransactionType::InterestCredit => "%",
    }
}

/// Historique d'un compte
pub fn transaction_history(account_id: &str, transactions: &[Transaction]) -> ListView<TransactionRow> {
    ListView::from_items(
        transactions
            .iter()
            .map(|t| TransactionRow::build(t, account_id))
            .collect(),
        NO_TRANSACTIONS,
    )
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AccountType;
    use rust_decimal_macros::dec;

    fn account(id: &str, balance: Decimal, currency: &str, active: bool) -> Account {
        Account {
            account_id: id.to_string(),
            customer_id: "CUST-1".to_string(),
            account_type: AccountType::Savings,
            balance,
            currency: currency.to_string(),
            active,
        }
    }

    #[test]
    fn test_empty_lists_carry_a_message() {
        assert_eq!(account_list(&[]), ListView::Empty(NO_ACCOUNTS.to_string()));
        assert_eq!(
            customer_accounts("CUST-7", &[]),
            ListView::Empty("No accounts found for customer CUST-7.".to_string())
        );
        assert_eq!(
            transaction_history("acc-1", &[]),
            ListView::Empty(NO_TRANSACTIONS.to_string())
        );

        let dashboard = DashboardView::build(&[]);
        assert_eq!(dashboard.recent, ListView::Empty(NO_ACCOUNTS.to_string()));
        assert_eq!(dashboard.total_accounts, 0);
        assert_eq!(dashboard.total_balances, vec!["$0.00".to_string()]);
    }

    #[test]
    fn test_dashboard_totals_per_currency() {
        let accounts = vec![
            account("a", dec!(1000), "USD", true),
            account("b", dec!(234.5), "USD", false),
            account("c", dec!(10), "EUR", true),
        ];

        let dashboard = DashboardView::build(&accounts);
        assert_eq!(dashboard.total_accounts, 3);
        assert_eq!(dashboard.active_accounts, 2);
        assert_eq!(dashboard.total_balances, vec!["€10.00", "$1,234.50"]);
    }

    #[test]
    fn test_dashboard_totals_ignore_currency_case() {
        let accounts = vec![
            account("a", dec!(10), "USD", true),
            account("b", dec!(10), "usd", true),
        ];

        let dashboard = DashboardView::build(&accounts);
        assert_eq!(dashboard.total_balances, vec!["$20.00"]);
    }

    #[test]
    fn test_dashboard_shows_at_most_six_cards() {
        let accounts: Vec<Account> = (0..10)
            .map(|i| account(&format!("acc-{}", i), dec!(1), "USD", true))
            .collect();

        let dashboard = DashboardView::build(&accounts);
        assert_eq!(dashboard.recent.len(), DASHBOARD_CARDS);
        assert_eq!(dashboard.total_accounts, 10);
    }

    #[test]
    fn test_account_card() {
        let card = AccountCard::from_account(&account("0123456789abcdef", dec!(1234.5), "USD", false), true);
        assert_eq!(card.balance, "$1,234.50");
        assert_eq!(card.status, "Inactive");
        assert_eq!(card.short_id, "0123-4567-89ab-cdef");
        assert_eq!(card.customer_id.as_deref(), Some("CUST-1"));
    }

    #[test]
    fn test_transaction_rows() {
        let transfer = Transaction {
            transaction_id: "tx-1".to_string(),
            account_id: "aaaabbbbccccdddd".to_string(),
            transaction_type: TransactionType::Transfer,
            amount: dec!(75),
            currency: "EUR".to_string(),
            description: Some("Rent".to_string()),
            timestamp: "2024-01-15T10:30:00".to_string(),
            related_account_id: Some("eeeeffffgggghhhh".to_string()),
        };

        let outgoing = TransactionRow::build(&transfer, "aaaabbbbccccdddd");
        assert_eq!(outgoing.amount, "-€75.00");
        assert_eq!(outgoing.counterparty.as_deref(), Some("To: eeee-ffff-gggg-hhhh"));

        let incoming = TransactionRow::build(&transfer, "eeeeffffgggghhhh");
        assert_eq!(incoming.amount, "+€75.00");
        assert_eq!(incoming.counterparty.as_deref(), Some("From: aaaa-bbbb-cccc-dddd"));
        assert_eq!(incoming.date, "1/15/2024, 10:30:00 AM");
    }
}
