mod app;
mod backend;
mod bus;
mod commands;
mod config;
mod error;
mod logging;
mod menu;
mod notebook;
mod tree;
mod ui;

use crate::app::effects::{Collaborators, Executor};
use crate::app::event::AppEvent;
use crate::app::handler::{self, HandlerContext};
use crate::app::state::AppState;
use crate::backend::{
    LocalBrowser, LocalContents, LocalHelp, LocalNotebook, LocalSessions, LocalToolbar,
};
use crate::bus::EventBus;
use crate::commands::ActionRegistry;
use crate::menu::{MenuBar, MenuOptions};
use crate::notebook::{Contents, Document, KernelSpecCatalog, PresetRegistry};
use crate::tree::{FileList, KernelList};
use anyhow::{Context, Result};
use crossterm::{
    event::EventStream,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::prelude::*;
use std::io;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<()> {
    // Install panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    let mut cfg = config::load_config()?;
    if let Some(path) = std::env::args().nth(1) {
        cfg.server.notebook_path = path;
    }
    let _log_guard = logging::init(&cfg.logging)?;

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, cfg).await;

    // Restore terminal
    restore_terminal()?;

    if let Err(e) = result {
        tracing::error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    cfg: config::AppConfig,
) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();

    // Collaborators
    let notebook = LocalNotebook::open(&cfg.server.notebook_path, event_tx.clone())?;
    let catalog = KernelSpecCatalog::from_specs(cfg.kernelspecs.clone());
    let mut sessions = LocalSessions::new(catalog, event_tx.clone());
    let mut toolbar = LocalToolbar::new(event_tx.clone());
    let mut contents = LocalContents::beside(&cfg.server.notebook_path, event_tx.clone());
    let browser = LocalBrowser::new(&cfg.server.origin, cfg.ui.launch_browser, event_tx.clone());
    let help = LocalHelp::new(event_tx.clone());

    // Views
    let registry = ActionRegistry::with_defaults();
    let mut bus: EventBus<AppState> = EventBus::new();
    let menubar = MenuBar::new(MenuOptions::from_config(&cfg), &registry, &toolbar, &mut bus);
    let kernels = KernelList::new(&mut bus);
    let files = FileList::new(&mut bus);
    let mut state = AppState::new(cfg.clone(), menubar, kernels, files);

    // Everything below arrives through the event loop, after the views
    // have subscribed.
    for preset in &cfg.ui.extra_presets {
        toolbar.register_preset(preset);
    }
    notebook.announce();
    if let Err(e) = contents.list_directory() {
        state.fail(format!("{:#}", e));
    }
    if let Err(e) = sessions.start(notebook.path(), notebook.kernel_name().as_deref()) {
        state.fail(format!("{:#}", e));
    }

    let mut executor = Executor::new(
        Collaborators {
            document: Box::new(notebook),
            sessions: Box::new(sessions),
            presets: Box::new(toolbar),
            contents: Box::new(contents),
            browser: Box::new(browser),
            help: Box::new(help),
        },
        event_tx.clone(),
    );

    // Spawn terminal input task
    let term_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(Ok(event)) = reader.next().await {
            if term_tx.send(AppEvent::Terminal(event)).is_err() {
                break;
            }
        }
    });

    // Spawn tick task (20 FPS = 50ms)
    let tick_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_millis(50));
        loop {
            interval.tick().await;
            if tick_tx.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });

    // Initial render
    terminal.draw(|f| ui::render(f, &state))?;

    // Main event loop
    while let Some(event) = event_rx.recv().await {
        let actions = {
            let ctx = HandlerContext {
                registry: &registry,
                document: executor.document(),
                bus: &bus,
            };
            handler::handle_event(&mut state, event, &ctx)
        };

        if !actions.is_empty() {
            tracing::debug!(count = actions.len(), "executing actions");
            state.dirty = true;
        }
        executor.execute_all(&mut state, actions);

        if state.should_quit {
            break;
        }

        // Conditional render (only if dirty)
        if state.dirty {
            terminal.draw(|f| ui::render(f, &state))?;
            state.dirty = false;
        }
    }

    Ok(())
}
