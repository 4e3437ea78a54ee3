// ============================================================================
// Gestion des événements -> état
// ============================================================================
// CONCEPT : Event Handler Pattern
// - Modifie l'état de App selon l'événement
// - Retourne éventuellement une AppCommand à envoyer au worker thread
// - Ne fait aucun I/O : testable sans terminal ni réseau
// ============================================================================

use tracing::{debug, info};

use crate::app::{App, Tab};
use crate::controller::AppCommand;
use crate::ui::events::{
    get_char_from_event, get_digit_from_event, is_backspace_event, is_down_event, is_enter_event,
    is_escape_event, is_force_quit_event, is_left_event, is_next_tab_event,
    is_previous_tab_event, is_quit_event, is_refresh_event, is_right_event, is_up_event, Event,
};

/// Traite un événement et met à jour l'état de l'application
///
/// CONCEPT RUST : Pattern matching avec guards
/// - Le mode saisie capture toutes les touches (sauf Ctrl-C)
/// - En navigation, chaque prédicat correspond à une action
pub fn handle_event(app: &mut App, event: Event) -> Option<AppCommand> {
    if let Event::Tick = event {
        return None;
    }

    if is_force_quit_event(&event) {
        info!("User forced quit (Ctrl-C)");
        app.quit();
        return None;
    }

    if app.is_editing() {
        handle_editing(app, &event);
        return None;
    }

    // Two-step quit : deuxième 'q' = quit réel, toute autre touche annule
    if is_quit_event(&event) {
        if app.is_awaiting_quit_confirmation() {
            info!("User confirmed quit");
            app.quit();
        } else {
            info!("User requested quit (awaiting confirmation)");
            app.request_quit();
        }
        return None;
    }
    app.cancel_quit();

    match event {
        _ if is_next_tab_event(&event) => app.next_tab(),
        _ if is_previous_tab_event(&event) => app.previous_tab(),
        _ if get_digit_from_event(&event).is_some() => {
            let tab = get_digit_from_event(&event).and_then(Tab::from_digit)?;
            app.select_tab(tab)
        }
        _ if is_refresh_event(&event) => {
            let command = app.refresh_command();
            debug!(?command, "User requested refresh");
            Some(command)
        }
        _ if is_up_event(&event) => {
            app.focus_up();
            None
        }
        _ if is_down_event(&event) => {
            app.focus_down();
            None
        }
        _ if is_left_event(&event) => {
            app.cycle_focused(false);
            None
        }
        _ if is_right_event(&event) => {
            app.cycle_focused(true);
            None
        }
        _ if is_enter_event(&event) => app.activate_focused(),
        _ => None,
    }
}

/// Mode saisie : Enter valide, Esc annule, le reste va dans le buffer
fn handle_editing(app: &mut App, event: &Event) {
    if is_escape_event(event) {
        app.cancel_editing();
    } else if is_enter_event(event) {
        app.submit_input();
    } else if is_backspace_event(event) {
        app.backspace();
    } else if let Some(c) = get_char_from_event(event) {
        app.append_char(c);
    }
}
