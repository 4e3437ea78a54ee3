// ============================================================================
// Onglet Accounts
// ============================================================================
// Colonne gauche : formulaires (création de compte, recherche par client)
// Colonne droite : tous les comptes, puis le résultat de la recherche
// ============================================================================

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use crate::app::App;
use crate::forms::FormKind;
use crate::ui::views::{account_list, customer_accounts};
use crate::ui::widgets::{form_height, render_cards, render_form, render_message, titled_block};

pub fn render_accounts(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let forms = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(form_height(app.forms.get(FormKind::CreateAccount))),
            Constraint::Length(form_height(app.forms.get(FormKind::CustomerLookup))),
            Constraint::Min(0),
        ])
        .split(columns[0]);

    render_form(frame, app, FormKind::CreateAccount, forms[0]);
    render_form(frame, app, FormKind::CustomerLookup, forms[1]);

    // La zone résultat n'apparaît qu'après une recherche
    let lists = match app.customer_lookup {
        Some(_) => Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(columns[1]),
        None => Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(100)])
            .split(columns[1]),
    };

    if app.store.is_loaded() {
        render_cards(frame, "All Accounts", &account_list(app.store.accounts()), lists[0]);
    } else {
        render_message(frame, titled_block("All Accounts"), "Loading accounts...", lists[0]);
    }

    if let Some(lookup) = &app.customer_lookup {
        let title = format!("Accounts of {}", lookup.customer_id);
        let view = customer_accounts(&lookup.customer_id, &lookup.accounts);
        render_cards(frame, &title, &view, lists[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::AppResult;
    use crate::ui::test_support::{draw, screen_contains};

    #[test]
    fn test_empty_account_list_shows_message() {
        let mut app = App::new();
        app.apply(AppResult::AccountsLoaded(Vec::new()));

        let screen = draw(&app, render_accounts);
        assert!(screen_contains(&screen, "No accounts found. Create your first account to get started."));
        assert!(screen_contains(&screen, "Create Account"));
    }

    #[test]
    fn test_empty_customer_lookup_shows_message() {
        let mut app = App::new();
        app.apply(AppResult::AccountsLoaded(Vec::new()));
        app.apply(AppResult::CustomerAccountsLoaded {
            customer_id: "CUST-404".to_string(),
            accounts: Vec::new(),
        });

        let screen = draw(&app, render_accounts);
        assert!(screen_contains(&screen, "No accounts found for customer CUST-404."));
    }

    #[test]
    fn test_accounts_before_first_load() {
        let app = App::new();
        let screen = draw(&app, render_accounts);
        assert!(screen_contains(&screen, "Loading accounts..."));
    }
}
