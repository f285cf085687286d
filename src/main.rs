// ============================================================================
// GoFinances - Dashboard TUI
// ============================================================================
// Charge les transactions et le solde depuis l'API GoFinances,
// puis les affiche dans des cartes et un tableau
//
// Déroulement :
// 1. Logging vers fichier (les println! sont invisibles une fois le TUI lancé)
// 2. Configuration (GOFINANCES_API_URL)
// 3. Worker thread pour le fetch, UI dans le thread principal
// 4. Montage de la vue : un seul fetch envoyé au worker
// 5. Event loop : résultats -> rendu -> input
// ============================================================================

use std::io;
use std::sync::mpsc;

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info};

use gofinances::api::ApiClient;
use gofinances::app::App;
use gofinances::config::{Config, DEFAULT_LOG_FILTER};
use gofinances::ui::events::{is_down_event, is_quit_event, is_up_event, Event, EventHandler};
use gofinances::ui::render;
use gofinances::worker::{spawn_background_worker, AppCommand, AppResult};

// ============================================================================
// Initialisation du logging
// ============================================================================

/// Initialise le logging vers un fichier à rotation quotidienne
///
/// # Utilisation
/// ```bash
/// tail -f ~/.local/share/gofinances/logs/gofinances.log.*
/// RUST_LOG=gofinances=trace cargo run
/// ```
fn init_logging(config: &Config) -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    std::fs::create_dir_all(&config.log_dir)
        .context("Échec de la création du répertoire de logs")?;

    let file_appender =
        RollingFileAppender::new(Rotation::DAILY, &config.log_dir, "gofinances.log");

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
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .try_init()
        .context("Échec de l'initialisation du subscriber tracing")?;

    info!(log_dir = ?config.log_dir, "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée
// ============================================================================

fn main() -> Result<()> {
    let config = Config::from_env()?;

    init_logging(&config).unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {e}");
        eprintln!("   Continuing without logging...");
    });

    info!(api_url = %config.api_url, "GoFinances starting up");

    let source = ApiClient::new(&config.api_url).context("Échec de la création du client HTTP")?;

    // Channels avec le worker : commandes vers le worker, résultats vers l'UI
    let (command_tx, command_rx) = mpsc::channel::<AppCommand>();
    let (result_tx, result_rx) = mpsc::channel::<AppResult>();

    info!("Spawning background worker thread");
    let worker = spawn_background_worker(source, command_rx, result_tx);

    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    let mut app = App::new();
    if let Some(command) = app.mount() {
        // Worker mort dès le départ : la vue reste vide, l'erreur est loggée
        if command_tx.send(command).is_err() {
            error!("Worker thread unavailable, dashboard will stay empty");
        }
    }

    let events = EventHandler::new();

    info!("Starting event loop");
    let result = run(&mut terminal, &mut app, &events, &result_rx);

    // Démontage : les résultats tardifs seront ignorés, puis le worker s'arrête
    app.unmount();
    drop(command_tx);
    drop(result_rx);

    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    // Un fetch en cours n'a pas de timeout : on ne bloque pas la sortie dessus
    if worker.is_finished() && worker.join().is_err() {
        error!("Worker thread panicked");
    }

    match &result {
        Ok(()) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

// ============================================================================
// Event Loop Principal
// ============================================================================
// À chaque itération :
//   0. Récupérer les résultats du worker (non bloquant)
//   1. Dessiner l'interface
//   2. Traiter l'input (bloque au plus un tick)
// ============================================================================

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
    result_rx: &mpsc::Receiver<AppResult>,
) -> Result<()> {
    while app.is_running() {
        match result_rx.try_recv() {
            Ok(result) => {
                app.commit(result);
            }
            // Disconnected : le worker s'est arrêté, la vue garde son état
            Err(mpsc::TryRecvError::Empty) | Err(mpsc::TryRecvError::Disconnected) => {}
        }

        terminal.draw(|frame| render(frame, app))?;

        match events.next() {
            Ok(event) => handle_event(app, &event),
            Err(e) => error!(error = ?e, "Failed to read terminal event"),
        }
    }

    Ok(())
}

/// Traite un événement clavier
fn handle_event(app: &mut App, event: &Event) {
    if is_quit_event(event) {
        info!("User requested quit");
        app.quit();
    } else if is_up_event(event) {
        app.navigate_up();
    } else if is_down_event(event) {
        app.navigate_down();
    }
}

// ============================================================================
// Setup et restauration du terminal
// ============================================================================

/// Configure le terminal en mode TUI (raw mode + alternate screen)
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| e.into())
}

/// Restaure le terminal à son état normal, même après une erreur de run()
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
