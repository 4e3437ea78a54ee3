// ============================================================================
// Dashboard - Résumé des comptes
// ============================================================================
// Trois statistiques (nombre de comptes, comptes actifs, soldes par devise)
// puis les premiers comptes sous forme de cartes.
//
// CONCEPTS RATATUI :
// 1. Layout horizontal pour les statistiques
// 2. Layout vertical : statistiques en haut, cartes dessous
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::ui::views::DashboardView;
use crate::ui::widgets::{render_cards, render_message, titled_block, ACCENT};

/// Dessine l'onglet Dashboard
pub fn render_dashboard(frame: &mut Frame, app: &App, area: Rect) {
    // Jamais chargé : pas encore de résumé à afficher
    let Some(accounts) = &app.dashboard else {
        return render_message(frame, titled_block("Dashboard"), "Loading dashboard...", area);
    };

    let view = DashboardView::build(accounts);

    let stats_height = 2 + view.total_balances.len().max(1) as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(stats_height), Constraint::Min(0)])
        .split(area);

    render_stats(frame, &view, chunks[0]);
    render_cards(frame, "Recent Accounts", &view.recent, chunks[1]);
}

/// Les trois statistiques côte à côte
fn render_stats(frame: &mut Frame, view: &DashboardView, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(30),
            Constraint::Percentage(40),
        ])
        .split(area);

    render_stat(frame, "Total Accounts", vec![view.total_accounts.to_string()], columns[0]);
    render_stat(frame, "Active Accounts", vec![view.active_accounts.to_string()], columns[1]);
    render_stat(frame, "Total Balance", view.total_balances.clone(), columns[2]);
}

fn render_stat(frame: &mut Frame, title: &str, values: Vec<String>, area: Rect) {
    let lines: Vec<Line> = values
        .into_iter()
        .map(|value| {
            Line::from(Span::styled(
                value,
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ))
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(titled_block(title).title_style(Style::default().fg(Color::Gray)))
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
