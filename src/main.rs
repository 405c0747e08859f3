mod app;
mod components;
mod draw;
mod keys;
mod state;
mod ui;

use crate::app::App;
use crate::keys::KeyAction;
use crate::state::app_settings::AppSettings;
use crate::state::messages::{NetworkRequest, NetworkResponse, UiEvent};
use crate::state::navigator::{Command, Message};
use crate::state::network::{LoadingState, NetworkWorker};
use crate::state::refresher::PeriodicRefresher;
use crossterm::event::{self as crossterm_event, Event, KeyEventKind};
use crossterm::{cursor, execute, terminal};
use espn_api::client::EspnApi;
use log::{debug, error, info};
use std::io::Stdout;
use std::time::Duration;
use std::{io, panic};
use tokio::sync::mpsc;
use tui::{Terminal, backend::CrosstermBackend};

const INPUT_POLL: Duration = Duration::from_millis(250);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if handle_cli_args() {
        return Ok(());
    }

    better_panic::install();

    let settings = AppSettings::load();

    tui_logger::init_logger(log::LevelFilter::Trace)?;
    tui_logger::set_default_level(log::LevelFilter::Error);

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal()?;

    let mut client = EspnApi::new().with_timeout(settings.request_timeout);
    if let Some(base) = settings.api_base.as_deref() {
        client = client.with_base_url(base);
    }
    let refresh_interval = settings.refresh_interval;
    let app = App::new(&settings);
    info!("sportsterm {} started", env!("CARGO_PKG_VERSION"));

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (network_req_tx, network_req_rx) = mpsc::channel::<NetworkRequest>(100);
    let (network_resp_tx, network_resp_rx) = mpsc::channel::<NetworkResponse>(100);

    // Input handler thread
    let input_events = ui_event_tx.clone();
    let input_handler = tokio::task::spawn_blocking(move || input_handler_task(input_events));

    // Network thread
    let network_worker = NetworkWorker::new(client, network_req_rx, network_resp_tx);
    let network_task = tokio::spawn(network_worker.run());

    let refresher = PeriodicRefresher::new(ui_event_tx, refresh_interval);

    let result = main_ui_loop(terminal, app, refresher, ui_event_rx, network_req_tx, network_resp_rx).await;

    network_task.abort();
    cleanup_terminal()?;
    // the reader exits on its next poll now that the UI channel is closed
    let _ = input_handler.await;

    result
}

fn handle_cli_args() -> bool {
    let mut args = std::env::args().skip(1);
    let Some(arg) = args.next() else {
        return false;
    };

    match arg.as_str() {
        "-h" | "--help" => {
            println!("{}", usage_text());
            true
        }
        "-v" | "-V" | "--version" => {
            println!("sportsterm {}", env!("CARGO_PKG_VERSION"));
            true
        }
        _ => {
            eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
}

fn usage_text() -> &'static str {
    "sportsterm - live sports scores in your terminal

Usage:
  sportsterm
  sportsterm --help
  sportsterm --version

Keys:
  up/k, down/j        move
  enter/right/l       select
  esc/backspace/left  back
  r                   refresh games
  u                   toggle current/upcoming games
  \"                   toggle log pane
  q, ctrl-c           quit

Environment:
  SPORTSTERM_LOG_LEVEL     off|error|warn|info|debug|trace (default error)
  SPORTSTERM_REFRESH_SECS  live game refresh interval (default 30, min 5)
  SPORTSTERM_TIMEOUT_SECS  request timeout (default 10, min 1)
  SPORTSTERM_API_BASE      data source base URL"
}

/// Owns the app. Every state change happens here, one event at a time.
async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    mut app: App,
    mut refresher: PeriodicRefresher,
    mut ui_events: mpsc::Receiver<UiEvent>,
    network_requests: mpsc::Sender<NetworkRequest>,
    mut network_responses: mpsc::Receiver<NetworkResponse>,
) -> anyhow::Result<()> {
    let mut loading = LoadingState::default();

    let size = terminal.size()?;
    app.nav.update(Message::Resize { height: size.height });
    let startup = app.nav.init();
    if !execute_commands(startup, &mut refresher, &network_requests).await {
        return Ok(());
    }
    draw::draw(&mut terminal, &mut app, loading)?;

    loop {
        let message = tokio::select! {
            Some(ui_event) = ui_events.recv() => match ui_event {
                UiEvent::KeyPressed(key_event) => match keys::key_action(key_event) {
                    Some(KeyAction::Navigate(message)) => Some(message),
                    Some(KeyAction::ToggleLogs) => {
                        app.toggle_logs();
                        None
                    }
                    None => continue,
                },
                UiEvent::Resize { width, height } => {
                    debug!("resized to {width}x{height}");
                    Some(Message::Resize { height })
                }
                UiEvent::LivenessTick => Some(Message::LivenessTick),
            },

            Some(response) = network_responses.recv() => match response {
                NetworkResponse::LoadingStateChanged { loading_state } => {
                    loading = loading_state;
                    None
                }
                NetworkResponse::GamesLoaded { generation, result } => {
                    Some(Message::GamesLoaded { generation, result })
                }
                NetworkResponse::GameDetailLoaded { generation, result } => {
                    Some(Message::GameDetailLoaded { generation, result })
                }
            },

            else => break,
        };

        if let Some(message) = message {
            let commands = app.nav.update(message);
            if !execute_commands(commands, &mut refresher, &network_requests).await {
                break;
            }
        }

        draw::draw(&mut terminal, &mut app, loading)?;
    }

    refresher.shutdown();
    Ok(())
}

/// Carry out navigator commands. Returns `false` once a quit was requested.
async fn execute_commands(
    commands: Vec<Command>,
    refresher: &mut PeriodicRefresher,
    network_requests: &mpsc::Sender<NetworkRequest>,
) -> bool {
    for command in commands {
        match command {
            Command::Fetch(request) => {
                if let Err(e) = network_requests.send(request).await {
                    error!("Failed to queue network request: {e}");
                }
            }
            Command::ScheduleTick => refresher.schedule(),
            Command::Quit => return false,
        }
    }
    true
}

/// Blocking terminal reader. Polls so it notices when the UI loop is gone.
fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    while !ui_events.is_closed() {
        match crossterm_event::poll(INPUT_POLL) {
            Ok(true) => {}
            Ok(false) => continue,
            Err(e) => {
                error!("Failed to poll terminal events: {e}");
                continue;
            }
        }

        let ui_event = match crossterm_event::read() {
            Ok(Event::Key(key_event)) if key_event.kind == KeyEventKind::Press => {
                UiEvent::KeyPressed(key_event)
            }
            Ok(Event::Resize(width, height)) => UiEvent::Resize { width, height },
            Ok(_) => continue,
            Err(e) => {
                error!("Failed to read terminal event: {e}");
                continue;
            }
        };

        if ui_events.blocking_send(ui_event).is_err() {
            break;
        }
    }
}

fn setup_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::Hide)?;
    execute!(stdout, terminal::EnterAlternateScreen)?;
    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
    terminal::enable_raw_mode()
}

fn cleanup_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::MoveTo(0, 0))?;
    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
    execute!(stdout, terminal::LeaveAlternateScreen)?;
    execute!(stdout, cursor::Show)?;
    terminal::disable_raw_mode()
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        let _ = cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}
