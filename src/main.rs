mod app;
mod batch;
mod cli;
mod discovery;
mod keymap;
mod loader;
mod model;
mod msg;

use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use app::App;
use cli::Cli;
use discovery::{Aggregator, Buckets};
use loader::{Loaders, ScopeRoots};
use model::config::AppConfig;
use msg::Msg;

/// How long the input thread blocks before re-checking its stop flag.
const INPUT_POLL: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.version {
        println!("{}", cli::version_line());
        return Ok(());
    }

    let config = AppConfig::load(cli.config.as_deref())?;

    // Initialize logging to file (never stdout)
    let log_dir = config.log_dir();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("creating log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "claudectl.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_env_filter(cli.log_filter(&config.general.log_filter))
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "claudectl starting");

    let roots = ScopeRoots::from_env();
    let aggregator = Aggregator::new(Loaders::new(&roots));

    if cli.is_batch() {
        return run_batch(&cli, &aggregator);
    }

    run_interactive(aggregator, &config)
}

fn run_batch(cli: &Cli, aggregator: &Aggregator) -> Result<()> {
    let capabilities = aggregator.collect(&cli.requested_kinds(), cli.scope.scopes());
    tracing::info!(count = capabilities.len(), json = cli.json, "batch listing");

    let output = if cli.json {
        let mut json = batch::render_json(&capabilities)?;
        json.push('\n');
        json
    } else {
        batch::render_table(&capabilities)
    };

    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn run_interactive(aggregator: Aggregator, config: &AppConfig) -> Result<()> {
    let buckets = discover(aggregator, config.startup_timeout())?;
    let app = App::new(buckets, &config.ui);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, app, config.shutdown_timeout());

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        tracing::error!("claudectl error: {err:?}");
    }
    tracing::info!("claudectl exiting");
    result
}

/// Loads every capability on a worker thread, giving up after `timeout`.
fn discover(aggregator: Aggregator, timeout: Duration) -> Result<Buckets> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        // The receiver is gone only if startup already timed out.
        let _ = tx.send(aggregator.load_buckets());
    });

    rx.recv_timeout(timeout).map_err(|err| match err {
        RecvTimeoutError::Timeout => {
            anyhow!("capability discovery did not finish within {}s", timeout.as_secs())
        }
        RecvTimeoutError::Disconnected => anyhow!("capability discovery stopped unexpectedly"),
    })
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
    shutdown_timeout: Duration,
) -> Result<()> {
    let (tx, rx) = mpsc::channel::<Msg>();
    let stop = Arc::new(AtomicBool::new(false));
    let (done_tx, done_rx) = mpsc::channel::<()>();

    // Input thread — reads terminal events and forwards as Msg
    let stop_input = Arc::clone(&stop);
    thread::spawn(move || {
        while !stop_input.load(Ordering::Relaxed) {
            let event = match event::poll(INPUT_POLL) {
                Ok(true) => event::read(),
                Ok(false) => continue,
                Err(err) => Err(err),
            };
            let msg = match event {
                Ok(Event::Key(key)) => Msg::Key(key),
                Ok(Event::Resize(width, height)) => Msg::Resize(width, height),
                Ok(_) => continue,
                Err(err) => {
                    tracing::warn!("terminal input failed: {err}");
                    let _ = tx.send(Msg::Quit);
                    break;
                }
            };
            if tx.send(msg).is_err() {
                break;
            }
        }
        let _ = done_tx.send(());
    });

    let size = terminal.size()?;
    app.update(Msg::Resize(size.width, size.height));

    // ── Main event loop ──
    loop {
        terminal.draw(|f| app.view(f))?;

        // Batch-drain all pending messages
        let first = rx.recv()?;
        app.update(first);

        while let Ok(msg) = rx.try_recv() {
            app.update(msg);
        }

        if app.should_quit {
            break;
        }
    }

    stop.store(true, Ordering::Relaxed);
    match done_rx.recv_timeout(shutdown_timeout) {
        Ok(()) | Err(RecvTimeoutError::Disconnected) => Ok(()),
        Err(RecvTimeoutError::Timeout) => Err(anyhow!(
            "input thread did not stop within {}s",
            shutdown_timeout.as_secs()
        )),
    }
}
