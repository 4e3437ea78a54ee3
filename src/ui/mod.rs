// ============================================================================
// Module : ui
// ============================================================================
// Gère toute l'interface utilisateur (Terminal User Interface)
// ============================================================================

pub mod events;       // Lecture des événements clavier
pub mod handler;      // Événements -> état de App + AppCommand
pub mod views;        // View models (données formatées pour l'affichage)
pub mod widgets;      // Briques de rendu partagées
pub mod render;       // Layout principal, header, footer
pub mod dashboard;    // Onglet Dashboard
pub mod accounts;     // Onglet Accounts
pub mod transactions; // Onglets Transactions et Transfer

// Re-exports pour simplifier les imports
pub use events::{Event, EventHandler};
pub use handler::handle_event;
pub use render::render;
