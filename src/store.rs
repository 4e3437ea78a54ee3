// ============================================================================
// Structure : AccountStore
// ============================================================================
// Cache en mémoire de la dernière liste de comptes reçue de l'API
//
// Règles :
// - jamais autoritaire (la vérité est côté serveur)
// - jamais persisté
// - remplacé en entier à chaque chargement (pas de fusion partielle)
// ============================================================================

use crate::models::{Account, DEFAULT_CURRENCY};

/// Cache des comptes, possédé par App et passé aux fonctions de rendu
#[derive(Debug, Clone, Default)]
pub struct AccountStore {
    accounts: Vec<Account>,

    /// false tant qu'aucune liste n'a été reçue
    /// (permet d'afficher "Loading..." plutôt que l'état vide)
    loaded: bool,
}

impl AccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remplace tout le contenu du cache
    ///
    /// CONCEPT RUST : Ownership
    /// - Le Vec est "moved" dans le store, pas de copie
    pub fn replace(&mut self, accounts: Vec<Account>) {
        self.accounts = accounts;
        self.loaded = true;
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn find(&self, account_id: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.account_id == account_id)
    }

    pub fn contains(&self, account_id: &str) -> bool {
        self.find(account_id).is_some()
    }

    /// Devise du compte, ou la devise par défaut s'il n'est pas en cache
    pub fn currency_for(&self, account_id: &str) -> &str {
        self.find(account_id)
            .map(|a| a.currency.as_str())
            .unwrap_or(DEFAULT_CURRENCY)
    }

    /// Compte suivant dans un sélecteur
    ///
    /// CONCEPT : Cycle ["" (aucun), compte 1, ..., compte n, "" ...]
    /// - "" représente "Select account"
    /// - Un id absent du cache repart du début
    pub fn next_id(&self, current: &str) -> String {
        let position = self.accounts.iter().position(|a| a.account_id == current);
        let next = match position {
            Some(i) => self.accounts.get(i + 1),
            None => self.accounts.first(),
        };
        next.map(|a| a.account_id.clone()).unwrap_or_default()
    }

    /// Compte précédent dans un sélecteur (cycle inverse)
    pub fn previous_id(&self, current: &str) -> String {
        let position = self.accounts.iter().position(|a| a.account_id == current);
        let previous = match position {
            Some(0) => None,
            Some(i) => self.accounts.get(i - 1),
            None => self.accounts.last(),
        };
        previous.map(|a| a.account_id.clone()).unwrap_or_default()
    }
}
