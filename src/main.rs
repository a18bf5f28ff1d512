use anyhow::{anyhow, Context, Result};
use clap::Parser;
use crossterm::{
    event::EventStream,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use reqwest::Url;
use std::{io, time::Duration};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use sith_remote::api::ApiClient;
use sith_remote::app::cli::Args;
use sith_remote::app::config::{AppConfig, UserConfig};
use sith_remote::app::events::AppEvent;
use sith_remote::app::requests;
use sith_remote::app::router::Route;
use sith_remote::app::App;
use sith_remote::events::{bus, EventRelay};
use sith_remote::player::ProgressTimer;
use sith_remote::{logging, ui};

const USER_AGENT: &str = concat!("sith-remote/", env!("CARGO_PKG_VERSION"));

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

#[tokio::main]
async fn main() -> Result<()> {
    human_panic::setup_panic!();
    // Leave the alternate screen before the crash report is printed. Panics
    // inside bus handlers are caught and logged by the bus; the TUI stays up.
    let report = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        if bus::in_handler() {
            return;
        }
        restore_terminal();
        report(info);
    }));

    let args = Args::parse();

    if args.generate_config {
        println!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let (mut config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (UserConfig::default(), Some(e)),
    };
    if let Some(server) = &args.server {
        config.server_url = server.clone();
    }
    if let Some(token) = &args.token {
        config.oauth_token = token.clone();
    }

    let log_dir = args.log_file.clone().unwrap_or_else(AppConfig::get_log_dir);
    let _log_guard = logging::init(&log_dir, &config.log_level)?;
    if let Some(e) = &config_error {
        warn!("{e}; using defaults");
    }

    let start = Route::parse(&args.route).ok_or_else(|| anyhow!("unknown route `{}`", args.route))?;
    let base = Url::parse(&config.server_url)
        .with_context(|| format!("invalid server url `{}`", config.server_url))?;
    info!(server = %base, route = %start, "starting");

    // Commands and lookups give up after the request timeout; the event
    // stream is long-lived and only bounds the connect.
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_millis(config.request_timeout_ms))
        .build()?;
    let stream_client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(Duration::from_millis(config.request_timeout_ms))
        .build()?;

    let api = ApiClient::new(client, base, config.oauth_token.clone());
    let events_url = api.events_url()?;

    let (tx, mut rx) = mpsc::channel::<AppEvent>(256);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let progress_period = Duration::from_millis(config.progress.tick_ms.max(1));
    let reconnect_delay = Duration::from_millis(config.reconnect_delay_ms);

    let mut app = App::new(config, start);
    app.theme = ui::theme::load_current_theme();
    if config_error.is_some() {
        app.show_toast("⚠ config.toml is invalid, using defaults");
    }

    // 1. Input Event Task
    let tx_input = tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(Ok(event)) = reader.next().await {
            if tx_input.send(AppEvent::Input(event)).await.is_err() {
                break;
            }
        }
    });

    // 2. Server push channel
    tokio::spawn(EventRelay::new(stream_client, events_url, reconnect_delay).run(tx.clone()));

    // 3. Progress estimator timer
    let mut progress_timer = ProgressTimer::start(progress_period, tx.clone(), AppEvent::ProgressTick);

    // 4. Animation Tick Task ⚡
    let tx_tick = tx.clone();
    tokio::spawn(async move {
        // ~60 FPS for the toast slide
        let mut interval = tokio::time::interval(Duration::from_millis(16));
        loop {
            interval.tick().await;
            if tx_tick.send(AppEvent::Tick).await.is_err() {
                break;
            }
        }
    });

    for request in app.take_requests() {
        requests::dispatch(request, &api, &tx);
    }

    let result = run(&mut terminal, &mut app, &mut rx, &api, &tx).await;

    progress_timer.cancel();
    restore_terminal();
    terminal.show_cursor()?;

    if let Err(e) = &result {
        error!("exiting with error: {e:#}");
    }
    info!("bye");
    result
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    rx: &mut mpsc::Receiver<AppEvent>,
    api: &ApiClient,
    tx: &mpsc::Sender<AppEvent>,
) -> Result<()> {
    while app.is_running {
        terminal.draw(|f| ui::ui(f, app))?;

        let Some(event) = rx.recv().await else {
            break;
        };
        app.apply(event);

        for request in app.take_requests() {
            requests::dispatch(request, api, tx);
        }
    }
    Ok(())
}
