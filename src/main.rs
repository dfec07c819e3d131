// Binary includes library modules - some public API items are only for library consumers
#![allow(unused)]

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};
use tokio::sync::watch;

mod app;
mod data;
mod events;
mod export;
mod source;
mod ui;

use app::App;
use data::MonitorData;
use export::{CouchDbConfig, CouchDbExporter};
use source::FileSource;

#[derive(Parser, Debug)]
#[command(name = "procwatch")]
#[command(about = "Terminal dashboard for watching application process monitors")]
struct Args {
    /// Path to the monitors facts file written by the enumerator
    #[arg(short, long, default_value = "monitors.json")]
    file: PathBuf,

    /// Refresh interval in seconds
    #[arg(short, long, default_value = "3")]
    refresh: u64,

    /// Start with the monitors display disabled
    #[arg(long)]
    disable_monitors: bool,

    /// Configuration file for the CouchDB export sink
    #[arg(long)]
    export_config: Option<PathBuf>,

    /// Export interval in seconds (used with --export-config)
    #[arg(long, default_value = "60", requires = "export_config")]
    export_interval: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    // Export mode: connect the sink up front; a connection failure is
    // fatal and the TUI never starts.
    if let Some(ref config_path) = args.export_config {
        let rt = tokio::runtime::Runtime::new()?;

        let config = CouchDbConfig::load(config_path)
            .with_context(|| format!("loading export config {}", config_path.display()))?;
        let exporter = rt
            .block_on(CouchDbExporter::connect(config))
            .context("connecting to the CouchDB server")?;

        let (tx, rx) = watch::channel(MonitorData::empty());
        let handle = rt.spawn(run_export_task(
            exporter,
            rx,
            Duration::from_secs(args.export_interval),
        ));

        // Run the TUI in the main thread while the runtime exports in the
        // background
        let result = run_tui(&args, Some(tx));

        handle.abort();

        return result;
    }

    run_tui(&args, None)
}

/// Periodically export the latest snapshot.
async fn run_export_task(
    exporter: CouchDbExporter,
    rx: watch::Receiver<MonitorData>,
    interval: Duration,
) {
    let mut ticker = tokio::time::interval(interval);
    loop {
        ticker.tick().await;
        let data = rx.borrow().clone();
        export::export_monitors(&exporter, &data).await;
    }
}

/// Run the TUI with a file-based fact source.
fn run_tui(args: &Args, export_tx: Option<watch::Sender<MonitorData>>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    // Create app and load initial data
    let source = Box::new(FileSource::new(&args.file));
    let mut app = App::new(source);
    app.monitors_disabled = args.disable_monitors;
    let _ = app.refresh();

    // Run the main loop
    let result = run_app(
        &mut terminal,
        &mut app,
        Duration::from_secs(args.refresh),
        export_tx,
    );

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    refresh_interval: Duration,
    export_tx: Option<watch::Sender<MonitorData>>,
) -> Result<()> {
    let mut last_refresh = Instant::now();

    // Publish the initial snapshot for the export task
    if let (Some(tx), Some(data)) = (&export_tx, &app.data) {
        let _ = tx.send(data.clone());
    }

    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 40;
    const MIN_HEIGHT: u16 = 8;

    while app.running {
        // Draw UI
        terminal.draw(|frame| {
            let area = frame.area();

            // Check for minimum terminal size
            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered = ratatui::layout::Rect::new(0, area.height / 2 - 2, area.width, 5);
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Min(5),    // Monitors panel
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            ui::view::render_header(frame, app, chunks[0]);
            ui::view::render_monitors(frame, app, chunks[1]);
            ui::view::render_status_bar(frame, app, chunks[2]);

            // Render help overlay if active
            if app.show_help {
                ui::view::render_help(frame, app, area);
            }
        })?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        // Auto-refresh data periodically
        if last_refresh.elapsed() >= refresh_interval {
            if app.refresh().unwrap_or(false) {
                if let (Some(tx), Some(data)) = (&export_tx, &app.data) {
                    let _ = tx.send(data.clone());
                }
            }
            last_refresh = Instant::now();
        }
    }

    Ok(())
}
