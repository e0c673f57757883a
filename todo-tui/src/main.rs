//! tui-todo: a keyboard and mouse driven todo list
//!
//! Keys (list): j/k select, space toggle, shift+j/k move, d delete,
//! n new, tab or 1/2/3 filter, shift+c clear completed, t or ctrl+j theme,
//! q quit. Mouse: click the box to toggle, the cross to delete, drag a
//! title onto another row to reorder.

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use todo_core::TodoStore;
use todo_tui::{
    app::TodoUi,
    config::Config,
    event::{process_raw_event, spawn_event_poller, PollerConfig, RawEvent},
    keybindings::Keybindings,
    reducer::reducer,
    state::{AppState, SAMPLE_TODOS},
    store::{LoggingMiddleware, Store},
    theme::ThemeMode,
};

/// Todo list in the terminal
#[derive(Parser, Debug)]
#[command(name = "tui-todo")]
#[command(about = "A todo list for the terminal")]
struct Args {
    /// Color theme (overrides the config file and the terminal's scheme)
    #[arg(long, value_enum)]
    theme: Option<ThemeMode>,

    /// Config file (default: <config dir>/tui-todo/config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs here; without it nothing is logged
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Start with an empty list instead of the sample items
    #[arg(long)]
    empty: bool,
}

fn init_logging(path: &PathBuf) -> io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        if let Err(e) = init_logging(path) {
            eprintln!("Error: cannot open log file {}: {e}", path.display());
            std::process::exit(1);
        }
    }

    let config = match Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let todos = if args.empty {
        TodoStore::new()
    } else {
        TodoStore::with_items(SAMPLE_TODOS)
    };
    let state = AppState::new(todos)
        .with_theme(
            args.theme
                .or(config.theme)
                .or_else(ThemeMode::detect)
                .unwrap_or_default(),
        )
        .with_filter(config.filter.unwrap_or_default());
    let keybindings = config.keybindings();

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, state, keybindings).await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut state: AppState,
    keybindings: Keybindings,
) -> io::Result<()> {
    let size = terminal.size()?;
    state.terminal_size = (size.width, size.height);
    state.todos.subscribe(|event| {
        tracing::info!(revision = event.revision, change = ?event.change, "Todos changed");
    });

    let mut store = Store::with_middleware(state, reducer, LoggingMiddleware::new());
    let mut ui = TodoUi::new(keybindings);

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
    let cancel_token = CancellationToken::new();
    let _poller = spawn_event_poller(event_tx, PollerConfig::default(), cancel_token.clone());

    let mut should_render = true;

    loop {
        if should_render {
            terminal.draw(|frame| {
                let area = frame.area();
                ui.render(frame, area, store.state());
            })?;
            should_render = false;
        }

        // The poller delivers bursts; each event is fully dispatched before
        // the next one is mapped
        let Some(raw) = event_rx.recv().await else {
            break;
        };
        let step = ui.step(&process_raw_event(raw), &mut store);
        if step.quit {
            break;
        }
        should_render |= step.needs_render;
    }

    cancel_token.cancel();
    tracing::info!(
        actions = store.middleware().dispatched(),
        remaining = store.state().todos.len(),
        "Exiting"
    );
    Ok(())
}
