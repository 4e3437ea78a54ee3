// ============================================================================
// Structure : App
// ============================================================================
// Gère l'état global de l'application TUI
//
// CONCEPTS RUST :
// 1. State Management : centraliser l'état dans une seule structure
// 2. Mutabilité contrôlée : &mut self pour modifier l'état
// 3. Les données serveur arrivent uniquement par apply(AppResult)
//
// PATTERN : "Application State"
// - Toutes les fonctions de rendu lisent depuis App
// - Les handlers d'événements modifient App et retournent éventuellement
//   une AppCommand pour le worker thread
// ============================================================================

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::controller::{AppCommand, AppResult};
use crate::forms::{FieldKind, FormKind, Forms};
use crate::models::{Account, Transaction};
use crate::store::AccountStore;

/// Durée d'affichage d'une notification
pub const TOAST_DURATION: Duration = Duration::from_secs(5);

// ============================================================================
// Enum : Tab
// ============================================================================

/// Onglets de l'application (un seul actif à la fois)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Dashboard,
    Accounts,
    Transactions,
    Transfer,
}

impl Tab {
    pub fn all() -> [Tab; 4] {
        [Tab::Dashboard, Tab::Accounts, Tab::Transactions, Tab::Transfer]
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Dashboard => 0,
            Tab::Accounts => 1,
            Tab::Transactions => 2,
            Tab::Transfer => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Accounts => "Accounts",
            Tab::Transactions => "Transactions",
            Tab::Transfer => "Transfer",
        }
    }

    /// Onglet suivant (cycle)
    pub fn next(&self) -> Tab {
        let all = Tab::all();
        all[(self.index() + 1) % all.len()]
    }

    /// Onglet précédent (cycle inverse)
    pub fn previous(&self) -> Tab {
        let all = Tab::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }

    /// Touches '1' à '4'
    pub fn from_digit(c: char) -> Option<Tab> {
        let index = c.to_digit(10)?.checked_sub(1)?;
        Tab::all().get(index as usize).copied()
    }

    /// Formulaires affichés dans l'onglet, dans l'ordre de navigation
    pub fn forms(&self) -> &'static [FormKind] {
        match self {
            Tab::Dashboard => &[],
            Tab::Accounts => &[FormKind::CreateAccount, FormKind::CustomerLookup],
            Tab::Transactions => &[FormKind::Deposit, FormKind::Withdraw, FormKind::History],
            Tab::Transfer => &[FormKind::Transfer],
        }
    }
}

// ============================================================================
// Enum : Screen
// ============================================================================
// CONCEPT RUST : Enums pour state machines
// - Browse : navigation entre les champs, touches de raccourci actives
// - Editing : saisie modale (Vim-like), toutes les touches vont au buffer
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Browse,
    Editing,
}

// ============================================================================
// Notifications (toasts)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub created: Instant,
}

impl Toast {
    pub fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind,
            created: Instant::now(),
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created) >= TOAST_DURATION
    }
}

/// Résultat de la dernière recherche par client
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerLookup {
    pub customer_id: String,
    pub accounts: Vec<Account>,
}

/// Historique affiché
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    pub account_id: String,
    pub transactions: Vec<Transaction>,
}

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Two-step quit : première pression de 'q' -> confirmation
    pub confirm_quit: bool,

    pub current_tab: Tab,
    pub current_screen: Screen,

    /// Ligne sélectionnée parmi toutes les lignes des formulaires de l'onglet
    /// (champs + bouton de chaque formulaire, à plat)
    pub focus: usize,

    /// Buffer de saisie pour le mode Editing
    pub input_buffer: String,

    pub forms: Forms,

    /// Cache des comptes
    pub store: AccountStore,

    /// Dernière liste reçue pour le dashboard (None = jamais chargé)
    pub dashboard: Option<Vec<Account>>,

    pub customer_lookup: Option<CustomerLookup>,
    pub history: Option<History>,

    pub toast: Option<Toast>,

    /// Soumission modifiante en cours
    /// CONCEPT : Disable-while-pending
    /// - Some(form) : toute autre soumission modifiante est refusée
    pub pending: Option<FormKind>,

    /// Indicateur de chargement (mis à jour par le worker thread)
    pub is_loading: bool,
    pub loading_message: Option<String>,
}

impl App {
    pub fn new() -> Self {
        Self {
            running: true,
            confirm_quit: false,
            current_tab: Tab::Dashboard,
            current_screen: Screen::Browse,
            focus: 0,
            input_buffer: String::new(),
            forms: Forms::new(),
            store: AccountStore::new(),
            dashboard: None,
            customer_lookup: None,
            history: None,
            toast: None,
            pending: None,
            is_loading: false,
            loading_message: None,
        }
    }

    /// Commandes envoyées au démarrage : la liste, puis le dashboard
    pub fn initial_commands() -> Vec<AppCommand> {
        vec![AppCommand::LoadAccounts, AppCommand::LoadDashboard]
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }

    pub fn start_loading(&mut self, message: Option<String>) {
        self.is_loading = true;
        self.loading_message = message;
    }

    pub fn stop_loading(&mut self) {
        self.is_loading = false;
        self.loading_message = None;
    }

    // ========================================================================
    // Onglets
    // ========================================================================

    /// Active un onglet
    ///
    /// Dashboard et Accounts rechargent leurs données à chaque activation.
    pub fn select_tab(&mut self, tab: Tab) -> Option<AppCommand> {
        debug!(tab = tab.label(), "Tab selected");
        self.current_tab = tab;
        self.focus = 0;
        self.current_screen = Screen::Browse;
        self.input_buffer.clear();

        match tab {
            Tab::Dashboard => Some(AppCommand::LoadDashboard),
            Tab::Accounts => Some(AppCommand::LoadAccounts),
            Tab::Transactions | Tab::Transfer => None,
        }
    }

    pub fn next_tab(&mut self) -> Option<AppCommand> {
        self.select_tab(self.current_tab.next())
    }

    pub fn previous_tab(&mut self) -> Option<AppCommand> {
        self.select_tab(self.current_tab.previous())
    }

    /// Rechargement manuel ('r') des données de l'onglet courant
    pub fn refresh_command(&self) -> AppCommand {
        match self.current_tab {
            Tab::Dashboard => AppCommand::LoadDashboard,
            _ => AppCommand::LoadAccounts,
        }
    }

    // ========================================================================
    // Focus
    // ========================================================================

    fn row_count(&self) -> usize {
        self.current_tab
            .forms()
            .iter()
            .map(|kind| self.forms.get(*kind).rows())
            .sum()
    }

    /// Formulaire et ligne (dans ce formulaire) sélectionnés
    ///
    /// La ligne == nombre de champs désigne le bouton de validation.
    pub fn focused_row(&self) -> Option<(FormKind, usize)> {
        let mut remaining = self.focus;
        for kind in self.current_tab.forms() {
            let rows = self.forms.get(*kind).rows();
            if remaining < rows {
                return Some((*kind, remaining));
            }
            remaining -= rows;
        }
        None
    }

    pub fn focus_up(&mut self) {
        self.focus = self.focus.saturating_sub(1);
    }

    pub fn focus_down(&mut self) {
        let max_index = self.row_count().saturating_sub(1);
        self.focus = (self.focus + 1).min(max_index);
    }

    /// ←/→ sur un champ à options
    pub fn cycle_focused(&mut self, forward: bool) {
        if let Some((kind, row)) = self.focused_row() {
            let store = &self.store;
            if let Some(field) = self.forms.get_mut(kind).fields.get_mut(row) {
                field.cycle(forward, store);
            }
        }
    }

    // ========================================================================
    // Saisie (mode Editing)
    // ========================================================================

    pub fn is_editing(&self) -> bool {
        self.current_screen == Screen::Editing
    }

    /// Entrée sur la ligne sélectionnée
    ///
    /// - champ texte/montant : passe en mode saisie
    /// - champ à options : option suivante
    /// - bouton : soumet le formulaire
    pub fn activate_focused(&mut self) -> Option<AppCommand> {
        let (kind, row) = self.focused_row()?;

        // CONCEPT RUST : Cloner avant de muter
        // - field emprunte self.forms ; on extrait ce qu'il faut puis
        //   l'emprunt se termine avant les appels en &mut self
        let field = self
            .forms
            .get(kind)
            .fields
            .get(row)
            .map(|f| (f.kind.clone(), f.value.clone()));

        match field {
            Some((FieldKind::Text | FieldKind::Amount, value)) => {
                self.input_buffer = value;
                self.current_screen = Screen::Editing;
                None
            }
            Some((FieldKind::Choice(_) | FieldKind::Account, _)) => {
                self.cycle_focused(true);
                None
            }
            None => self.submit_form(kind),
        }
    }

    pub fn cancel_editing(&mut self) {
        self.current_screen = Screen::Browse;
        self.input_buffer.clear();
    }

    /// Valide la saisie : le buffer devient la valeur du champ
    pub fn submit_input(&mut self) {
        if let Some((kind, row)) = self.focused_row() {
            if let Some(field) = self.forms.get_mut(kind).fields.get_mut(row) {
                field.value = std::mem::take(&mut self.input_buffer);
            }
        }
        self.cancel_editing();
    }

    pub fn append_char(&mut self, c: char) {
        self.input_buffer.push(c);
    }

    pub fn backspace(&mut self) {
        self.input_buffer.pop();
    }

    // ========================================================================
    // Soumission
    // ========================================================================

    /// Valide un formulaire et construit la commande correspondante
    ///
    /// CONCEPT RUST : Result::map
    /// - Chaque validation retourne Result<Requête, FormError>
    /// - map() enveloppe la requête dans la bonne AppCommand
    pub fn submit_form(&mut self, kind: FormKind) -> Option<AppCommand> {
        if kind.is_mutating() {
            if let Some(pending) = self.pending {
                info!(form = kind.title(), pending = pending.title(), "Submission refused while another is pending");
                self.notify(
                    ToastKind::Info,
                    format!("Please wait: {} is still being processed", pending.title()),
                );
                return None;
            }
        }

        let form = self.forms.get(kind);
        let command = match kind {
            FormKind::CreateAccount => form.create_account_request().map(AppCommand::CreateAccount),
            FormKind::CustomerLookup => form
                .customer_id()
                .map(|customer_id| AppCommand::LookupCustomer { customer_id }),
            FormKind::Deposit => form.transaction_request(&self.store).map(AppCommand::Deposit),
            FormKind::Withdraw => form.transaction_request(&self.store).map(AppCommand::Withdraw),
            FormKind::History => form
                .history_account()
                .map(|account_id| AppCommand::LoadHistory { account_id }),
            FormKind::Transfer => form.transfer_request(&self.store).map(AppCommand::Transfer),
        };

        match command {
            Ok(command) => {
                if kind.is_mutating() {
                    self.pending = Some(kind);
                }
                Some(command)
            }
            Err(e) => {
                warn!(form = kind.title(), error = %e, "Form validation failed");
                self.notify(ToastKind::Error, format!("Error: {}", e));
                None
            }
        }
    }

    // ========================================================================
    // Résultats du worker
    // ========================================================================

    /// Applique un résultat renvoyé par le worker thread
    pub fn apply(&mut self, result: AppResult) {
        match result {
            AppResult::AccountsLoaded(accounts) => {
                debug!(count = accounts.len(), "Accounts loaded");
                self.store.replace(accounts);
                self.forms.retain_accounts(&self.store);
            }
            AppResult::DashboardLoaded(accounts) => {
                debug!(count = accounts.len(), "Dashboard loaded");
                self.store.replace(accounts.clone());
                self.forms.retain_accounts(&self.store);
                self.dashboard = Some(accounts);
            }
            AppResult::CustomerAccountsLoaded { customer_id, accounts } => {
                self.customer_lookup = Some(CustomerLookup { customer_id, accounts });
            }
            AppResult::HistoryLoaded { account_id, transactions } => {
                self.history = Some(History { account_id, transactions });
            }
            AppResult::Submitted { form, message } => {
                self.forms.get_mut(form).reset();
                self.release_pending(Some(form));
                self.notify(ToastKind::Success, message);
            }
            AppResult::Failed { form, message } => {
                self.release_pending(form);
                self.notify(ToastKind::Error, format!("Error: {}", message));
            }
        }
    }

    fn release_pending(&mut self, form: Option<FormKind>) {
        if form.is_some() && self.pending == form {
            self.pending = None;
        }
    }

    pub fn notify(&mut self, kind: ToastKind, message: impl Into<String>) {
        self.toast = Some(Toast::new(kind, message));
    }

    /// Tick : appelé à chaque itération de la boucle
    pub fn tick(&mut self) {
        self.expire_toast(Instant::now());
    }

    pub fn expire_toast(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|t| t.is_expired(now)) {
            self.toast = None;
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
