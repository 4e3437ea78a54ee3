// ============================================================================
// Rendu principal
// ============================================================================
// Dessine l'interface TUI : header (onglets), contenu de l'onglet actif,
// footer (notification + raccourcis clavier)
//
// CONCEPTS RATATUI :
// 1. Frame : surface de dessin
// 2. Layout : découpage de l'espace en zones
// 3. Tabs : widget d'onglets avec l'onglet actif surligné
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{block::Title, Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, Tab, ToastKind};
use crate::ui::accounts::render_accounts;
use crate::ui::dashboard::render_dashboard;
use crate::ui::transactions::{render_transactions, render_transfer};
use crate::ui::widgets::ACCENT;

/// Dessine l'interface complète
///
/// CONCEPT RUST : Routing avec match sur enum
/// - Un seul onglet actif, le compilateur force à gérer tous les cas
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = create_layout(frame.size());

    render_header(frame, app, chunks[0]);

    match app.current_tab {
        Tab::Dashboard => render_dashboard(frame, app, chunks[1]),
        Tab::Accounts => render_accounts(frame, app, chunks[1]),
        Tab::Transactions => render_transactions(frame, app, chunks[1]),
        Tab::Transfer => render_transfer(frame, app, chunks[1]),
    }

    render_footer(frame, app, chunks[2]);
}

/// Crée le layout principal (header, content, footer)
fn create_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header : onglets
            Constraint::Min(0),    // Content : tout le reste
            Constraint::Length(4), // Footer : statut + raccourcis
        ])
        .split(area)
        .to_vec()
}

/// Header : titre, onglets, indicateur de chargement
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(" LazyBank ")
        .title_alignment(Alignment::Center);

    if app.is_loading {
        let message = app.loading_message.as_deref().unwrap_or("Loading...");
        block = block.title(
            Title::from(Span::styled(
                format!(" ⏳ {} ", message),
                Style::default().fg(Color::Yellow),
            ))
            .alignment(Alignment::Right),
        );
    }

    let titles: Vec<Line> = Tab::all()
        .iter()
        .map(|tab| Line::from(format!("{} {}", tab.index() + 1, tab.label())))
        .collect();

    let tabs = Tabs::new(titles)
        .block(block)
        .select(app.current_tab.index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

/// Footer : ligne de statut + raccourcis
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if app.is_editing() { Color::Green } else { ACCENT }));

    let paragraph = Paragraph::new(vec![status_line(app), shortcuts_line(app)]).block(block);
    frame.render_widget(paragraph, area);
}

/// Première ligne du footer
///
/// Priorité : confirmation de quit > notification > rien
fn status_line(app: &App) -> Line<'static> {
    if app.is_awaiting_quit_confirmation() {
        return Line::from(vec![
            Span::styled(
                "⚠  Press ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "[q]",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled(
                " again to quit, any other key to cancel ⚠",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ]);
    }

    match &app.toast {
        Some(toast) => {
            let (icon, color) = match toast.kind {
                ToastKind::Success => ("✔", Color::Green),
                ToastKind::Error => ("✘", Color::Red),
                ToastKind::Info => ("ℹ", ACCENT),
            };
            Line::from(Span::styled(
                format!("{} {}", icon, toast.message),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
        }
        None => Line::from(""),
    }
}

fn key(label: &'static str) -> Span<'static> {
    Span::styled(label, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
}

/// Deuxième ligne du footer : raccourcis selon le mode
fn shortcuts_line(app: &App) -> Line<'static> {
    if app.is_editing() {
        return Line::from(vec![
            key("[Enter]"),
            Span::raw(" Confirm  "),
            key("[Esc]"),
            Span::raw(" Cancel"),
        ]);
    }

    let mut spans = vec![
        key("[q]"),
        Span::raw(" Quit  "),
        key("[1-4 / Tab]"),
        Span::raw(" Switch tab  "),
        key("[r]"),
        Span::raw(" Refresh"),
    ];

    if !app.current_tab.forms().is_empty() {
        spans.extend([
            Span::raw("  "),
            key("[↑↓ / j k]"),
            Span::raw(" Move  "),
            key("[←→ / h l]"),
            Span::raw(" Choose  "),
            key("[Enter]"),
            Span::raw(" Edit / Submit"),
        ]);
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::AppResult;
    use crate::ui::test_support::{draw, screen_contains};

    #[test]
    fn test_header_lists_tabs() {
        let app = App::new();
        let screen = draw(&app, |frame, app, _| render(frame, app));
        assert!(screen_contains(&screen, "1 Dashboard"));
        assert!(screen_contains(&screen, "4 Transfer"));
    }

    #[test]
    fn test_toast_in_footer() {
        let mut app = App::new();
        app.apply(AppResult::Failed {
            form: None,
            message: "Account not found".to_string(),
        });

        let screen = draw(&app, |frame, app, _| render(frame, app));
        assert!(screen_contains(&screen, "Error: Account not found"));
    }

    #[test]
    fn test_loading_indicator() {
        let mut app = App::new();
        app.start_loading(Some("Loading accounts...".to_string()));

        let screen = draw(&app, |frame, app, _| render(frame, app));
        assert!(screen_contains(&screen, "Loading accounts..."));
    }

    #[test]
    fn test_quit_confirmation() {
        let mut app = App::new();
        app.request_quit();

        let screen = draw(&app, |frame, app, _| render(frame, app));
        assert!(screen_contains(&screen, "again to quit"));
    }
}
