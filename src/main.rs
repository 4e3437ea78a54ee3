// ============================================================================
// LazyBank - Client TUI d'une API bancaire REST
// ============================================================================
// Onglets Dashboard / Accounts / Transactions / Transfer
// Les appels HTTP tournent dans un worker thread, l'UI ne bloque jamais
//
// CONCEPTS RUST CLÉS :
// 1. Terminal raw mode : contrôle total du terminal
// 2. Event loop : boucle qui gère résultats, rendering et événements
// 3. Async dans sync : runtime tokio dédié au worker thread
// 4. Arc<Mutex<App>> : état partagé entre l'UI et le worker
// ============================================================================

use std::io;
use std::sync::{mpsc, Arc, Mutex, MutexGuard, PoisonError};

use anyhow::{bail, Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info};

use lazybank::api::BankingApi;
use lazybank::app::App;
use lazybank::config::Config;
use lazybank::controller::{AppCommand, AppResult, Controller};
use lazybank::ui::{handle_event, render, EventHandler};

// ============================================================================
// Initialisation du logging
// ============================================================================
// CONCEPT : Logging dans une app TUI
// - Les println! ne fonctionnent pas une fois le TUI lancé
// - On log vers un fichier à la place, avec rotation quotidienne
// ============================================================================

/// Initialise le système de logging vers fichier
///
/// # Utilisation
/// ```bash
/// # Voir les logs en temps réel
/// tail -f ~/.local/share/lazybank/logs/lazybank.log.*
///
/// # Contrôler le niveau de log
/// RUST_LOG=lazybank=trace cargo run
/// ```
fn init_logging(config: &Config) -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = &config.log_dir;
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "lazybank.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true),
        )
        .with(
            // RUST_LOG prioritaire, sinon debug pour lazybank et info ailleurs
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lazybank=debug,info".into()),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    info!(?log_dir, "Logging initialized");
    Ok(())
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

fn main() -> Result<()> {
    let config = Config::from_env().context("Invalid configuration")?;

    // Sans logs on continue quand même : le TUI reste utilisable
    init_logging(&config).unwrap_or_else(|e| {
        eprintln!("Warning: failed to initialize logging: {:#}", e);
        eprintln!("Continuing without logging...");
    });

    info!(api = %config.api_base_url, timeout = ?config.request_timeout, "LazyBank starting up");

    let api = BankingApi::with_timeout(&config.api_base_url, config.request_timeout)
        .with_context(|| format!("Cannot use API base URL `{}`", config.api_base_url))?;

    // Runtime créé ici pour que l'erreur remonte par main()
    let runtime = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;

    // CONCEPT RUST : Arc<Mutex<>> pour partage entre threads
    let app = Arc::new(Mutex::new(App::new()));

    let (command_tx, command_rx) = mpsc::channel::<AppCommand>();
    let (result_tx, result_rx) = mpsc::channel::<AppResult>();

    info!("Spawning background worker thread");
    spawn_background_worker(runtime, Controller::new(api), command_rx, result_tx, app.clone());

    // Chargement initial : la liste des comptes, puis le dashboard
    for command in App::initial_commands() {
        command_tx.send(command).context("Worker thread unavailable")?;
    }

    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    let events = EventHandler::new();

    info!("Starting event loop");
    let result = run(&mut terminal, app, &events, command_tx, result_rx);

    // Restaure le terminal (même en cas d'erreur)
    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

/// Verrouille App même si un thread a paniqué en le tenant
///
/// CONCEPT RUST : PoisonError
/// - lock() échoue si le Mutex est "empoisonné" (panic pendant un lock)
/// - into_inner() récupère quand même la garde
fn lock_app(app: &Mutex<App>) -> MutexGuard<'_, App> {
    app.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Background Worker Thread
// ============================================================================
// CONCEPT RUST : Background async worker avec channels
// - Reçoit des AppCommand (command_rx), une à la fois, dans l'ordre
// - Exécute chacune avec block_on sur son propre runtime
// - Renvoie les AppResult (result_tx) à l'event loop
// ============================================================================

fn spawn_background_worker(
    runtime: tokio::runtime::Runtime,
    controller: Controller<BankingApi>,
    command_rx: mpsc::Receiver<AppCommand>,
    result_tx: mpsc::Sender<AppResult>,
    app: Arc<Mutex<App>>,
) {
    std::thread::spawn(move || {
        // CONCEPT : l'itérateur s'arrête quand tous les Sender sont droppés
        for command in command_rx {
            info!(?command, "Worker received command");

            lock_app(&app).start_loading(Some(command.loading_message()));

            // block_on bloque le worker, pas l'UI
            let results = runtime.block_on(controller.execute(command));

            for result in results {
                if result_tx.send(result).is_err() {
                    info!("Worker thread exiting (result channel closed)");
                    return;
                }
            }

            lock_app(&app).stop_loading();
        }

        info!("Worker thread exiting (command channel closed)");
    });
}

// ============================================================================
// Event Loop Principal
// ============================================================================
// À chaque itération :
//   0. appliquer les résultats du worker
//   1. dessiner l'interface
//   2. traiter un événement (et envoyer la commande éventuelle)
//   3. tick (expiration des notifications)
// ============================================================================

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: Arc<Mutex<App>>,
    events: &EventHandler,
    command_tx: mpsc::Sender<AppCommand>,
    result_rx: mpsc::Receiver<AppResult>,
) -> Result<()> {
    while lock_app(&app).is_running() {
        // 0. RÉSULTATS (try_recv : ne bloque jamais)
        loop {
            match result_rx.try_recv() {
                Ok(result) => lock_app(&app).apply(result),
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    error!("Worker thread disconnected");
                    bail!("Background worker stopped unexpectedly");
                }
            }
        }

        // 1. RENDER
        terminal.draw(|frame| render(frame, &lock_app(&app)))?;

        // 2. INPUT
        let event = events.next().context("Failed to read terminal event")?;
        let command = handle_event(&mut lock_app(&app), event);
        if let Some(command) = command {
            debug!(?command, "Sending command to worker");
            command_tx.send(command).context("Worker thread unavailable")?;
        }

        // 3. UPDATE
        lock_app(&app).tick();
    }

    Ok(())
}

// ============================================================================
// Setup et restauration du terminal
// ============================================================================

/// Configure le terminal en mode TUI (raw mode + alternate screen)
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).context("Failed to create terminal")
}

/// Restaure le terminal à son état normal
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
