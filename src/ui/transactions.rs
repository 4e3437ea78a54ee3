// ============================================================================
// Onglets Transactions et Transfer
// ============================================================================
// Transactions : dépôt, retrait, recherche d'historique + historique affiché
// Transfer : formulaire de virement + liste des comptes pour référence
// ============================================================================

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

use crate::app::App;
use crate::forms::FormKind;
use crate::models::{format_account_id, Direction as Flow};
use crate::ui::views::{account_list, transaction_history, ListView, TransactionRow};
use crate::ui::widgets::{form_height, render_cards, render_form, render_message, titled_block};

/// Colonne de formulaires empilés à gauche, zone libre à droite
fn split_forms(frame: &mut Frame, app: &App, kinds: &[FormKind], area: Rect) -> Rect {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let mut constraints: Vec<Constraint> = kinds
        .iter()
        .map(|kind| Constraint::Length(form_height(app.forms.get(*kind))))
        .collect();
    constraints.push(Constraint::Min(0));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(columns[0]);

    for (kind, row) in kinds.iter().zip(rows.iter()) {
        render_form(frame, app, *kind, *row);
    }

    columns[1]
}

/// Dessine l'onglet Transactions
pub fn render_transactions(frame: &mut Frame, app: &App, area: Rect) {
    let right = split_forms(
        frame,
        app,
        &[FormKind::Deposit, FormKind::Withdraw, FormKind::History],
        area,
    );

    match &app.history {
        None => render_message(
            frame,
            titled_block("Transaction History"),
            "Select an account and press [Show history]",
            right,
        ),
        Some(history) => {
            let title = format!("History of {}", format_account_id(&history.account_id));
            match transaction_history(&history.account_id, &history.transactions) {
                ListView::Empty(message) => {
                    render_message(frame, titled_block(&title), &message, right)
                }
                ListView::Items(rows) => {
                    let items: Vec<ListItem> = rows.iter().map(transaction_item).collect();
                    frame.render_widget(List::new(items).block(titled_block(&title)), right);
                }
            }
        }
    }
}

/// Une transaction sur deux ou trois lignes
fn transaction_item(row: &TransactionRow) -> ListItem<'static> {
    let amount_style = match row.direction {
        Flow::Credit => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        Flow::Debit => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!(" {} ", row.icon), amount_style),
            Span::styled(
                format!("{:<16}", row.type_label),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(row.amount.clone(), amount_style),
        ]),
        Line::from(vec![
            Span::styled(format!("   {}", row.description), Style::default().fg(Color::Gray)),
            Span::styled(format!("  {}", row.date), Style::default().fg(Color::DarkGray)),
        ]),
    ];

    if let Some(counterparty) = &row.counterparty {
        lines.push(Line::from(Span::styled(
            format!("   {}", counterparty),
            Style::default().fg(Color::DarkGray),
        )));
    }

    ListItem::new(lines)
}

/// Dessine l'onglet Transfer
pub fn render_transfer(frame: &mut Frame, app: &App, area: Rect) {
    let right = split_forms(frame, app, &[FormKind::Transfer], area);

    if app.store.is_loaded() {
        render_cards(frame, "Accounts", &account_list(app.store.accounts()), right);
    } else {
        render_message(frame, titled_block("Accounts"), "Loading accounts...", right);
    }
}
