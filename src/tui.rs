//! Terminal front end for a Greed session.
//!
//! Board and status text are drawn as the session renders them; this
//! module only stacks them on screen and feeds key presses back in.

use std::io;
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction as LayoutDirection, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};
use tokio::time::Duration;
use tracing::{debug, error, info, instrument};

use crate::{
    Engine, GreedSession, SessionCommand, SessionConfig, SessionView, command_for_key, load_file,
    save_file,
};

const HELP: &str = "keypad 1-9 move  u undo  g new  s save  l load  q quit";

/// Runs an interactive session until the user quits.
///
/// Logs go to the configured log file so they do not tear the screen.
pub async fn run_tui<E: Engine>(engine: E, config: SessionConfig) -> Result<()> {
    let log_file = std::fs::File::create(config.log_file())?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized

    info!("Starting Greed TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut session = GreedSession::start(engine, config);
    let res = run_session(&mut terminal, &mut session).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Session loop error");
    }
    res
}

/// Draw, read a key, dispatch. Expires transient messages every pass.
#[instrument(skip_all)]
async fn run_session<B, E>(terminal: &mut Terminal<B>, session: &mut GreedSession<E>) -> Result<()>
where
    B: Backend,
    <B as Backend>::Error: Send + Sync + 'static,
    E: Engine,
{
    loop {
        if session.tick() {
            debug!("Transient message expired");
        }

        let view = session.view();
        terminal.draw(|f| draw(f, &view))?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
        {
            let Some(command) = command_for_key(key, *session.config().undo_key()) else {
                continue;
            };
            if command == SessionCommand::Quit {
                info!("User quit");
                return Ok(());
            }
            dispatch(session, command).await;
        }
    }
}

/// Forwards a command to the session. Failures are already on the
/// status line, so they are only logged here.
async fn dispatch<E: Engine>(session: &mut GreedSession<E>, command: SessionCommand) {
    let result = match command {
        SessionCommand::Numpad(digit) => session.apply_numpad(digit),
        SessionCommand::Undo => session.undo(),
        SessionCommand::Generate => {
            let config = session.config();
            let (width, height) = (*config.width(), *config.height());
            let seed = config.seed().clone();
            session.generate(width, height, &seed)
        }
        SessionCommand::Save => {
            let dir = session.config().save_dir().clone();
            save_file(session, dir).await.map(|_| ())
        }
        SessionCommand::Load => {
            let path = session
                .config()
                .save_dir()
                .join(session.config().save_file_name());
            load_file(session, path).await
        }
        SessionCommand::Quit => Ok(()),
    };
    if let Err(e) = result {
        debug!(?command, error = %e, "Command did not apply");
    }
}

/// Renders a session snapshot: title, board, status.
pub(crate) fn draw(frame: &mut Frame, view: &SessionView) {
    let board_lines = u16::try_from(view.board().lines().count()).unwrap_or(u16::MAX);
    let board_height = board_lines.saturating_add(2);
    let chunks = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([
            Constraint::Length(1),         // Title
            Constraint::Min(board_height), // Board
            Constraint::Length(3),         // Status
        ])
        .split(frame.area());

    let title = Paragraph::new(format!("Greed  ({})", HELP))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    frame.render_widget(title, chunks[0]);

    let board = Paragraph::new(view.board().as_str())
        .block(Block::default().title("Board").borders(Borders::ALL));
    frame.render_widget(board, chunks[1]);

    let status_style = if *view.stuck() {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };
    let status = Paragraph::new(view.status().as_str())
        .style(status_style)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[2]);
}
