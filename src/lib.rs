// ============================================================================
// LazyBank - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests d'intégration
// ============================================================================

pub mod api;        // Client de l'API bancaire
pub mod models;     // Structures de données
pub mod store;      // Cache des comptes
pub mod forms;      // Formulaires et validation
pub mod controller; // Commandes -> appels API -> résultats
pub mod app;        // État de l'application
pub mod ui;         // Interface utilisateur
pub mod config;     // Configuration (variables d'environnement)
