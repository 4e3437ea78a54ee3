// ============================================================================
// Gestion des événements
// ============================================================================
// Gère les événements clavier et les ticks de l'application
//
// CONCEPTS RUST :
// 1. Enums avec variants : représenter différents types d'événements
// 2. Error handling avec Result
// 3. Prédicats is_*_event : une fonction par intention, pas par touche
// ============================================================================

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Événements de l'application
#[derive(Debug, Clone)]
pub enum Event {
    /// Touche pressée
    Key(KeyEvent),

    /// Tick régulier (expiration des notifications, rafraîchissement)
    Tick,
}

/// Gestionnaire d'événements
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new() -> Self {
        Self {
            tick_rate: Duration::from_millis(250),
        }
    }

    /// Lit le prochain événement (bloquant avec timeout)
    ///
    /// CONCEPT : Non-blocking I/O avec timeout
    /// - poll(tick_rate) attend au maximum 250ms
    /// - Sans événement, retourne Ok(Event::Tick)
    pub fn next(&self) -> Result<Event> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                // Sur certains OS, on reçoit Press ET Release :
                // on ne garde que Press pour éviter les doublons
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Ok(Event::Key(key)),
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Prédicats
// ============================================================================

/// CONCEPT RUST : Pattern matching avec if let
/// - Destructure Event::Key et teste le KeyCode en une ligne
fn key_matches(event: &Event, predicate: impl Fn(&KeyEvent) -> bool) -> bool {
    if let Event::Key(key) = event {
        predicate(key)
    } else {
        false
    }
}

/// 'q' (quitter, avec confirmation)
pub fn is_quit_event(event: &Event) -> bool {
    key_matches(event, |key| matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q')))
}

/// Ctrl-C (quitter immédiatement, même en mode saisie)
pub fn is_force_quit_event(event: &Event) -> bool {
    key_matches(event, |key| {
        key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c'))
    })
}

pub fn is_escape_event(event: &Event) -> bool {
    key_matches(event, |key| matches!(key.code, KeyCode::Esc))
}

pub fn is_enter_event(event: &Event) -> bool {
    key_matches(event, |key| matches!(key.code, KeyCode::Enter))
}

/// Flèche haut ou 'k' (vim)
pub fn is_up_event(event: &Event) -> bool {
    key_matches(event, |key| matches!(key.code, KeyCode::Up | KeyCode::Char('k')))
}

/// Flèche bas ou 'j' (vim)
pub fn is_down_event(event: &Event) -> bool {
    key_matches(event, |key| matches!(key.code, KeyCode::Down | KeyCode::Char('j')))
}

/// Flèche gauche ou 'h' (option précédente)
pub fn is_left_event(event: &Event) -> bool {
    key_matches(event, |key| matches!(key.code, KeyCode::Left | KeyCode::Char('h')))
}

/// Flèche droite ou 'l' (option suivante)
pub fn is_right_event(event: &Event) -> bool {
    key_matches(event, |key| matches!(key.code, KeyCode::Right | KeyCode::Char('l')))
}

pub fn is_next_tab_event(event: &Event) -> bool {
    key_matches(event, |key| matches!(key.code, KeyCode::Tab))
}

/// Shift-Tab (crossterm le rapporte comme BackTab)
pub fn is_previous_tab_event(event: &Event) -> bool {
    key_matches(event, |key| matches!(key.code, KeyCode::BackTab))
}

/// 'r' (recharger l'onglet courant)
pub fn is_refresh_event(event: &Event) -> bool {
    key_matches(event, |key| matches!(key.code, KeyCode::Char('r') | KeyCode::Char('R')))
}

pub fn is_backspace_event(event: &Event) -> bool {
    key_matches(event, |key| matches!(key.code, KeyCode::Backspace))
}

/// Chiffre '1' à '9' (sélection directe d'un onglet)
pub fn get_digit_from_event(event: &Event) -> Option<char> {
    get_char_from_event(event).filter(|c| c.is_ascii_digit())
}

/// Caractère imprimable saisi (mode saisie)
pub fn get_char_from_event(event: &Event) -> Option<char> {
    if let Event::Key(key) = event {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return None;
        }
        if let KeyCode::Char(c) = key.code {
            return Some(c);
        }
    }
    None
}
