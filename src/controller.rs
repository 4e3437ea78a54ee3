// ============================================================================
// Controller : commandes UI -> appels API -> résultats
// ============================================================================
// CONCEPT RUST : Command pattern avec channels
// - L'event loop envoie des AppCommand au worker thread
// - Le worker exécute la commande via Controller::execute (async)
// - Les AppResult reviennent à l'event loop qui les applique à App
//
// Cycle d'une action qui modifie des données :
//   submit -> POST -> (succès) notification + GET /accounts + GET /accounts
//                  -> (échec)  notification d'erreur, rien d'autre
// ============================================================================

use tracing::{error, info, instrument};

use crate::api::{ApiResult, BankingBackend};
use crate::forms::FormKind;
use crate::models::{
    format_account_id, format_currency, Account, AccountCreateRequest, Transaction,
    TransactionRequest, TransferRequest,
};

/// Commandes envoyées au worker thread
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    /// Recharger la liste des comptes (onglet Accounts + sélecteurs)
    LoadAccounts,

    /// Recharger le résumé du dashboard
    LoadDashboard,

    /// Comptes d'un client
    LookupCustomer { customer_id: String },

    /// Historique d'un compte
    LoadHistory { account_id: String },

    CreateAccount(AccountCreateRequest),
    Deposit(TransactionRequest),
    Withdraw(TransactionRequest),
    Transfer(TransferRequest),
}

impl AppCommand {
    /// Formulaire à l'origine de la commande
    pub fn form(&self) -> Option<FormKind> {
        match self {
            AppCommand::LoadAccounts | AppCommand::LoadDashboard => None,
            AppCommand::LookupCustomer { .. } => Some(FormKind::CustomerLookup),
            AppCommand::LoadHistory { .. } => Some(FormKind::History),
            AppCommand::CreateAccount(_) => Some(FormKind::CreateAccount),
            AppCommand::Deposit(_) => Some(FormKind::Deposit),
            AppCommand::Withdraw(_) => Some(FormKind::Withdraw),
            AppCommand::Transfer(_) => Some(FormKind::Transfer),
        }
    }

    pub fn is_mutating(&self) -> bool {
        self.form().map(|f| f.is_mutating()).unwrap_or(false)
    }

    /// Message affiché pendant l'exécution
    pub fn loading_message(&self) -> String {
        match self {
            AppCommand::LoadAccounts => "Loading accounts...".to_string(),
            AppCommand::LoadDashboard => "Loading dashboard...".to_string(),
            AppCommand::LookupCustomer { customer_id } => {
                format!("Searching accounts of {}...", customer_id)
            }
            AppCommand::LoadHistory { account_id } => {
                format!("Loading history of {}...", format_account_id(account_id))
            }
            AppCommand::CreateAccount(_) => "Creating account...".to_string(),
            AppCommand::Deposit(_) => "Processing deposit...".to_string(),
            AppCommand::Withdraw(_) => "Processing withdrawal...".to_string(),
            AppCommand::Transfer(_) => "Processing transfer...".to_string(),
        }
    }
}

/// Résultats renvoyés par le worker thread
#[derive(Debug, Clone, PartialEq)]
pub enum AppResult {
    /// Liste complète des comptes (remplace le cache)
    AccountsLoaded(Vec<Account>),

    /// Liste pour le dashboard (remplace aussi le cache)
    DashboardLoaded(Vec<Account>),

    CustomerAccountsLoaded {
        customer_id: String,
        accounts: Vec<Account>,
    },

    HistoryLoaded {
        account_id: String,
        transactions: Vec<Transaction>,
    },

    /// Une soumission a réussi : le formulaire doit être vidé
    Submitted { form: FormKind, message: String },

    /// Un appel a échoué : `form` n'est jamais vidé
    Failed {
        form: Option<FormKind>,
        message: String,
    },
}

/// Exécute les commandes contre un backend bancaire
///
/// CONCEPT RUST : Generics avec trait bound
/// - Controller<BankingApi> en production
/// - Controller<FakeBank> dans les tests
pub struct Controller<B> {
    backend: B,
}

impl<B: BankingBackend> Controller<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Exécute une commande et retourne les résultats dans l'ordre
    #[instrument(skip(self, command), fields(form = ?command.form()))]
    pub async fn execute(&self, command: AppCommand) -> Vec<AppResult> {
        info!(message = %command.loading_message(), "Executing command");

        match command {
            AppCommand::LoadAccounts => vec![self.load_accounts().await],
            AppCommand::LoadDashboard => vec![self.load_dashboard().await],

            AppCommand::LookupCustomer { customer_id } => {
                let result = match self.backend.customer_accounts(&customer_id).await {
                    Ok(accounts) => AppResult::CustomerAccountsLoaded { customer_id, accounts },
                    Err(e) => failed(Some(FormKind::CustomerLookup), &e),
                };
                vec![result]
            }

            AppCommand::LoadHistory { account_id } => {
                let result = match self.backend.account_transactions(&account_id).await {
                    Ok(transactions) => AppResult::HistoryLoaded { account_id, transactions },
                    Err(e) => failed(Some(FormKind::History), &e),
                };
                vec![result]
            }

            AppCommand::CreateAccount(request) => {
                let outcome = self.backend.create_account(&request).await;
                self.after_mutation(FormKind::CreateAccount, outcome, |account| {
                    format!(
                        "Account created successfully! Account: {}",
                        account.short_id()
                    )
                })
                .await
            }

            AppCommand::Deposit(request) => {
                let outcome = self.backend.deposit(&request).await;
                self.after_mutation(FormKind::Deposit, outcome, |tx| {
                    format!("Deposit successful! Amount: {}", amount_of(tx))
                })
                .await
            }

            AppCommand::Withdraw(request) => {
                let outcome = self.backend.withdraw(&request).await;
                self.after_mutation(FormKind::Withdraw, outcome, |tx| {
                    format!("Withdrawal successful! Amount: {}", amount_of(tx))
                })
                .await
            }

            AppCommand::Transfer(request) => {
                let outcome = self.backend.transfer(&request).await;
                self.after_mutation(FormKind::Transfer, outcome, |tx| {
                    format!("Transfer successful! Amount: {}", amount_of(tx))
                })
                .await
            }
        }
    }

    /// Suite commune à toutes les mutations
    ///
    /// CONCEPT RUST : FnOnce
    /// - La closure qui construit le message n'est appelée qu'en cas de succès
    async fn after_mutation<T>(
        &self,
        form: FormKind,
        outcome: ApiResult<T>,
        describe: impl FnOnce(&T) -> String,
    ) -> Vec<AppResult> {
        match outcome {
            Ok(value) => {
                let message = describe(&value);
                info!(form = form.title(), message = %message, "Submission succeeded");

                // Deux relectures, dans cet ordre : liste puis dashboard
                let mut results = vec![AppResult::Submitted { form, message }];
                results.push(self.load_accounts().await);
                results.push(self.load_dashboard().await);
                results
            }
            Err(e) => vec![failed(Some(form), &e)],
        }
    }

    async fn load_accounts(&self) -> AppResult {
        match self.backend.list_accounts().await {
            Ok(accounts) => AppResult::AccountsLoaded(accounts),
            Err(e) => failed(None, &e),
        }
    }

    async fn load_dashboard(&self) -> AppResult {
        match self.backend.list_accounts().await {
            Ok(accounts) => AppResult::DashboardLoaded(accounts),
            Err(e) => failed(None, &e),
        }
    }
}

fn failed(form: Option<FormKind>, error: &crate::api::ApiError) -> AppResult {
    error!(error = %error, rejected = error.is_rejection(), "Banking API call failed");
    AppResult::Failed {
        form,
        message: error.to_string(),
    }
}

fn amount_of(tx: &Transaction) -> String {
    format_currency(tx.amount, &tx.currency)
}

// ============================================================================
// Tests unitaires
// ============================================================================
// Faux backend en mémoire : enregistre chaque appel pour vérifier le
// nombre de relectures après une mutation.
// ============================================================================
