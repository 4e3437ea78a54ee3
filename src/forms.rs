// ============================================================================
// Formulaires
// ============================================================================
// État des formulaires de l'interface et validation vers les requêtes API
//
// CONCEPTS RUST :
// 1. Enum avec données (FieldKind::Choice porte la liste d'options)
// 2. Result<T, FormError> : une saisie invalide ne part jamais au serveur
// 3. &'static [&'static str] : listes d'options constantes, sans allocation
// ============================================================================

use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{
    AccountCreateRequest, AccountType, TransactionRequest, TransferRequest, CURRENCIES,
};
use crate::store::AccountStore;

/// Longueur maximale d'une description (contrainte côté serveur)
pub const MAX_DESCRIPTION: usize = 255;

/// Les différents formulaires de l'application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    CreateAccount,
    CustomerLookup,
    Deposit,
    Withdraw,
    History,
    Transfer,
}

impl FormKind {
    pub fn all() -> Vec<FormKind> {
        vec![
            FormKind::CreateAccount,
            FormKind::CustomerLookup,
            FormKind::Deposit,
            FormKind::Withdraw,
            FormKind::History,
            FormKind::Transfer,
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            FormKind::CreateAccount => "Create Account",
            FormKind::CustomerLookup => "Customer Accounts",
            FormKind::Deposit => "Deposit",
            FormKind::Withdraw => "Withdraw",
            FormKind::History => "Transaction History",
            FormKind::Transfer => "Transfer Funds",
        }
    }

    /// Libellé du bouton de validation
    pub fn submit_label(&self) -> &'static str {
        match self {
            FormKind::CreateAccount => "Create account",
            FormKind::CustomerLookup => "Search",
            FormKind::Deposit => "Deposit",
            FormKind::Withdraw => "Withdraw",
            FormKind::History => "Show history",
            FormKind::Transfer => "Transfer",
        }
    }

    /// true si la soumission modifie des données côté serveur
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            FormKind::CreateAccount | FormKind::Deposit | FormKind::Withdraw | FormKind::Transfer
        )
    }

    /// true si le formulaire agit pour un compte dont on affiche la devise
    pub fn shows_currency(&self) -> bool {
        matches!(self, FormKind::Deposit | FormKind::Withdraw | FormKind::Transfer)
    }
}

/// Nature d'un champ
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Texte libre
    Text,
    /// Montant décimal
    Amount,
    /// Liste d'options fixes (←/→ pour changer)
    Choice(&'static [&'static str]),
    /// Sélecteur de compte alimenté par le cache (←/→ pour changer)
    Account,
}

/// Un champ de formulaire
#[derive(Debug, Clone)]
pub struct Field {
    pub label: &'static str,
    pub kind: FieldKind,
    pub value: String,
}

impl Field {
    fn text(label: &'static str) -> Self {
        Self { label, kind: FieldKind::Text, value: String::new() }
    }

    fn amount(label: &'static str) -> Self {
        Self { label, kind: FieldKind::Amount, value: String::new() }
    }

    fn choice(label: &'static str, options: &'static [&'static str]) -> Self {
        let value = options.first().map(|o| o.to_string()).unwrap_or_default();
        Self { label, kind: FieldKind::Choice(options), value }
    }

    fn account(label: &'static str) -> Self {
        Self { label, kind: FieldKind::Account, value: String::new() }
    }

    /// Valeur initiale du champ (après reset)
    fn initial_value(&self) -> String {
        match &self.kind {
            FieldKind::Choice(options) => options.first().map(|o| o.to_string()).unwrap_or_default(),
            _ => String::new(),
        }
    }

    /// Passe à l'option suivante/précédente (Choice et Account uniquement)
    pub fn cycle(&mut self, forward: bool, store: &AccountStore) {
        match &self.kind {
            FieldKind::Choice(options) => {
                if options.is_empty() {
                    return;
                }
                let len = options.len();
                let current = options.iter().position(|o| *o == self.value).unwrap_or(0);
                let next = if forward { (current + 1) % len } else { (current + len - 1) % len };
                self.value = options[next].to_string();
            }
            FieldKind::Account => {
                self.value = if forward {
                    store.next_id(&self.value)
                } else {
                    store.previous_id(&self.value)
                };
            }
            FieldKind::Text | FieldKind::Amount => {}
        }
    }
}

/// Erreurs de validation d'un formulaire
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{field} must be a number, got `{value}`")]
    NotANumber { field: &'static str, value: String },

    #[error("{0} must be positive")]
    NotPositive(&'static str),

    #[error("{0} cannot be negative")]
    Negative(&'static str),

    #[error("Description must not exceed 255 characters")]
    DescriptionTooLong,

    #[error("Unknown account type `{0}`")]
    UnknownAccountType(String),

    #[error("Currency must be a 3-letter code, got `{0}`")]
    InvalidCurrency(String),

    #[error("Source and destination accounts must be different")]
    SameAccount,
}

/// Un formulaire : une liste de champs + un bouton de validation
#[derive(Debug, Clone)]
pub struct Form {
    pub kind: FormKind,
    pub fields: Vec<Field>,
}

impl Form {
    /// Crée le formulaire avec ses champs
    ///
    /// CONCEPT : l'ordre des champs est l'ordre de navigation (↑/↓)
    pub fn new(kind: FormKind) -> Self {
        let fields = match kind {
            FormKind::CreateAccount => vec![
                Field::text("Customer ID"),
                Field::choice("Account type", AccountType::LABELS),
                Field::amount("Initial balance"),
                Field::choice("Currency", CURRENCIES),
            ],
            FormKind::CustomerLookup => vec![Field::text("Customer ID")],
            FormKind::Deposit | FormKind::Withdraw => vec![
                Field::account("Account"),
                Field::amount("Amount"),
                Field::text("Description"),
            ],
            FormKind::History => vec![Field::account("Account")],
            FormKind::Transfer => vec![
                Field::account("From account"),
                Field::account("To account"),
                Field::amount("Amount"),
                Field::text("Description"),
            ],
        };
        Self { kind, fields }
    }

    /// Remet tous les champs à leur valeur initiale
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value = field.initial_value();
        }
    }

    /// Nombre de lignes navigables (champs + bouton)
    pub fn rows(&self) -> usize {
        self.fields.len() + 1
    }

    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map(|f| f.value.as_str()).unwrap_or("")
    }

    /// Compte qui agit (premier sélecteur de compte), s'il est choisi
    pub fn acting_account(&self) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.kind == FieldKind::Account)
            .map(|f| f.value.as_str())
            .filter(|v| !v.is_empty())
    }

    /// Après un rechargement du cache : garde la sélection si le compte
    /// existe toujours, sinon revient à "Select account"
    pub fn retain_accounts(&mut self, store: &AccountStore) {
        for field in &mut self.fields {
            if field.kind == FieldKind::Account && !store.contains(&field.value) {
                field.value.clear();
            }
        }
    }

    // ------------------------------------------------------------------
    // Validation -> requêtes API
    // ------------------------------------------------------------------

    /// POST /accounts
    pub fn create_account_request(&self) -> Result<AccountCreateRequest, FormError> {
        let customer_id = required(self.value(0), "Customer ID")?;
        let account_type = AccountType::from_label(self.value(1))
            .ok_or_else(|| FormError::UnknownAccountType(self.value(1).to_string()))?;
        let initial_balance = parse_amount(self.value(2), "Initial balance")?;
        if initial_balance.is_sign_negative() && !initial_balance.is_zero() {
            return Err(FormError::Negative("Initial balance"));
        }
        let currency = currency_code(self.value(3))?;

        Ok(AccountCreateRequest {
            customer_id,
            account_type,
            initial_balance,
            currency,
        })
    }

    /// Id client à rechercher
    pub fn customer_id(&self) -> Result<String, FormError> {
        required(self.value(0), "Customer ID")
    }

    /// Compte dont on veut l'historique
    pub fn history_account(&self) -> Result<String, FormError> {
        required(self.value(0), "Account")
    }

    /// POST /transactions/deposit ou /withdraw
    ///
    /// La devise vient du compte sélectionné dans le cache, pas d'une
    /// valeur codée en dur.
    pub fn transaction_request(&self, store: &AccountStore) -> Result<TransactionRequest, FormError> {
        let account_id = required(self.value(0), "Account")?;
        let amount = positive_amount(self.value(1), "Amount")?;
        let description = description(self.value(2))?;
        let currency = store.currency_for(&account_id).to_string();

        Ok(TransactionRequest {
            account_id,
            amount,
            currency,
            description,
        })
    }

    /// POST /transactions/transfer (devise du compte source)
    pub fn transfer_request(&self, store: &AccountStore) -> Result<TransferRequest, FormError> {
        let from_account_id = required(self.value(0), "From account")?;
        let to_account_id = required(self.value(1), "To account")?;
        if from_account_id == to_account_id {
            return Err(FormError::SameAccount);
        }
        let amount = positive_amount(self.value(2), "Amount")?;
        let description = description(self.value(3))?;
        let currency = store.currency_for(&from_account_id).to_string();

        Ok(TransferRequest {
            from_account_id,
            to_account_id,
            amount,
            currency,
            description,
        })
    }
}

fn required(value: &str, field: &'static str) -> Result<String, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FormError::Missing(field));
    }
    Ok(trimmed.to_string())
}

fn parse_amount(value: &str, field: &'static str) -> Result<Decimal, FormError> {
    let trimmed = required(value, field)?;
    Decimal::from_str(&trimmed).map_err(|_| FormError::NotANumber {
        field,
        value: trimmed,
    })
}

fn positive_amount(value: &str, field: &'static str) -> Result<Decimal, FormError> {
    let amount = parse_amount(value, field)?;
    if amount <= Decimal::ZERO {
        return Err(FormError::NotPositive(field));
    }
    Ok(amount)
}

fn description(value: &str) -> Result<String, FormError> {
    let description = required(value, "Description")?;
    if description.chars().count() > MAX_DESCRIPTION {
        return Err(FormError::DescriptionTooLong);
    }
    Ok(description)
}

fn currency_code(value: &str) -> Result<String, FormError> {
    let code = value.trim().to_uppercase();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(FormError::InvalidCurrency(value.to_string()));
    }
    Ok(code)
}

// ============================================================================
// Structure : Forms
// ============================================================================
// Regroupe un exemplaire de chaque formulaire
// ============================================================================

#[derive(Debug, Clone)]
pub struct Forms {
    forms: Vec<Form>,
}

impl Forms {
    pub fn new() -> Self {
        Self {
            forms: FormKind::all().into_iter().map(Form::new).collect(),
        }
    }

    /// CONCEPT RUST : Invariant de construction
    /// - new() crée un Form pour chaque FormKind, la recherche ne peut
    ///   pas échouer ; on retombe quand même sur le premier par sécurité
    pub fn get(&self, kind: FormKind) -> &Form {
        let index = self.forms.iter().position(|f| f.kind == kind).unwrap_or(0);
        &self.forms[index]
    }

    pub fn get_mut(&mut self, kind: FormKind) -> &mut Form {
        let index = self.forms.iter().position(|f| f.kind == kind).unwrap_or(0);
        &mut self.forms[index]
    }

    pub fn retain_accounts(&mut self, store: &AccountStore) {
        for form in &mut self.forms {
            form.retain_accounts(store);
        }
    }
}

impl Default for Forms {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
