// ============================================================================
// Widgets partagés
// ============================================================================
// Briques de rendu réutilisées par les onglets :
// - formulaire (champs, focus, devise, bouton)
// - liste de cartes de comptes
// - message d'état vide
//
// CONCEPT RATATUI : Widgets "consumed"
// - Chaque fonction construit un widget et le passe à frame.render_widget()
// - Rien n'est conservé entre deux frames
// ============================================================================

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::forms::{FieldKind, Form, FormKind};
use crate::ui::views::{AccountCard, ListView};

pub const ACCENT: Color = Color::Cyan;

/// Style d'une ligne sélectionnée
fn focused_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
        .add_modifier(Modifier::REVERSED)
}

/// Bloc standard avec titre
pub fn titled_block(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(format!(" {} ", title))
}

/// Hauteur nécessaire pour dessiner un formulaire
///
/// champs + ligne devise éventuelle + bouton + bordures
pub fn form_height(form: &Form) -> u16 {
    let currency_line = usize::from(form.kind.shows_currency());
    (form.rows() + currency_line + 2) as u16
}

/// Dessine un formulaire
///
/// CONCEPT : le focus vient de App::focused_row()
/// - Some((kind, row)) avec kind == ce formulaire : la ligne est surlignée
/// - En mode Editing, la ligne surlignée affiche le buffer et un curseur
pub fn render_form(frame: &mut Frame, app: &App, kind: FormKind, area: Rect) {
    let form = app.forms.get(kind);
    let focused_row = app
        .focused_row()
        .filter(|(focused_kind, _)| *focused_kind == kind)
        .map(|(_, row)| row);

    let mut lines: Vec<Line> = Vec::with_capacity(form.rows() + 1);

    for (row, field) in form.fields.iter().enumerate() {
        let is_focused = focused_row == Some(row);

        let value = if is_focused && app.is_editing() {
            format!("{}█", app.input_buffer)
        } else {
            match &field.kind {
                FieldKind::Text | FieldKind::Amount => field.value.clone(),
                FieldKind::Choice(_) => format!("◀ {} ▶", field.value),
                FieldKind::Account => {
                    let label = app
                        .store
                        .find(&field.value)
                        .map(|a| a.picker_label())
                        .unwrap_or_else(|| "Select account".to_string());
                    format!("◀ {} ▶", label)
                }
            }
        };

        let label_style = Style::default().fg(Color::Gray);
        let value_style = if is_focused {
            focused_style()
        } else {
            Style::default().fg(Color::White)
        };

        lines.push(Line::from(vec![
            Span::styled(format!("{:<16}", field.label), label_style),
            Span::styled(value, value_style),
        ]));
    }

    // Devise du compte sélectionné
    if kind.shows_currency() {
        let currency = form
            .acting_account()
            .map(|id| app.store.currency_for(id))
            .unwrap_or("-");
        lines.push(Line::from(vec![
            Span::styled(format!("{:<16}", "Currency"), Style::default().fg(Color::Gray)),
            Span::styled(currency.to_string(), Style::default().fg(ACCENT)),
        ]));
    }

    // Bouton de validation
    let button = if app.pending == Some(kind) {
        "[ Processing... ]".to_string()
    } else {
        format!("[ {} ]", kind.submit_label())
    };
    let button_style = if focused_row == Some(form.fields.len()) {
        focused_style()
    } else {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    };
    lines.push(Line::from(Span::styled(button, button_style)));

    let paragraph = Paragraph::new(lines).block(titled_block(kind.title()));
    frame.render_widget(paragraph, area);
}

/// Message centré affiché à la place d'une liste vide
pub fn render_message(frame: &mut Frame, block: Block, message: &str, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), Style::default().fg(Color::Gray))),
    ];

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

/// Liste de cartes de comptes (ou message d'état vide)
pub fn render_cards(frame: &mut Frame, title: &str, view: &ListView<AccountCard>, area: Rect) {
    let block = titled_block(title);

    let cards = match view {
        ListView::Empty(message) => return render_message(frame, block, message, area),
        ListView::Items(cards) => cards,
    };

    let items: Vec<ListItem> = cards.iter().map(card_item).collect();
    frame.render_widget(List::new(items).block(block), area);
}

/// Une carte sur deux lignes : type/statut/solde puis identifiants
fn card_item(card: &AccountCard) -> ListItem<'static> {
    let status_style = if card.active {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Red)
    };

    let first = Line::from(vec![
        Span::styled(
            format!(" {:<14}", card.account_type),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("{:<10}", card.status), status_style),
        Span::styled(card.balance.clone(), Style::default().fg(ACCENT)),
    ]);

    let mut details = vec![Span::styled(
        format!(" {}", card.short_id),
        Style::default().fg(Color::DarkGray),
    )];
    if let Some(customer_id) = &card.customer_id {
        details.push(Span::styled(
            format!("  Customer: {}", customer_id),
            Style::default().fg(Color::DarkGray),
        ));
    }

    ListItem::new(vec![first, Line::from(details)])
}
