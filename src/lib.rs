//! Greed session controller.
//!
//! Drives a single-player Greed puzzle on behalf of a user interface:
//! generates or loads a game through an external engine, turns keypad
//! digits into moves, forwards undo and save requests, and keeps a status
//! line that shows either the current seed or a short-lived error.
//!
//! # Architecture
//!
//! - **Engine**: [`Engine`] and [`GameHandle`] are the only contact with
//!   puzzle rules. Generation, move legality and the save format live
//!   behind them.
//! - **Session**: [`GreedSession`] owns the one active game and classifies
//!   engine failures. Construction failures empty the session, operation
//!   failures leave it alone.
//! - **Notifier**: [`TransientNotifier`] holds one message at a time and
//!   reverts it after a fixed delay.
//! - **Front end**: [`load_file`], [`save_file`] and [`run_tui`] connect a
//!   session to files and a terminal.
//!
//! # Example
//!
//! ```no_run
//! use greed_session::{Engine, GreedSession, SessionConfig};
//!
//! fn play<E: Engine>(engine: E) {
//!     let mut session = GreedSession::start(engine, SessionConfig::default());
//!     let _ = session.apply_numpad(8);
//!     println!("{}\n{}", session.board_text(), session.status_text());
//! }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod direction;
mod engine;
mod input;
mod notifier;
mod session;
mod storage;
mod tui;

// Crate-level exports - Configuration
pub use config::{ConfigError, LoadFailurePolicy, SessionConfig};

// Crate-level exports - Engine contract
pub use direction::{Direction, NumpadError};
pub use engine::{Engine, EngineError, GameHandle, NO_SEED};

// Crate-level exports - Session control
pub use notifier::TransientNotifier;
pub use session::{
    GreedSession, INVALID_GAME, SaveArtifact, SessionError, SessionState, SessionView, StatusLine,
};

// Crate-level exports - Front end
pub use input::{SessionCommand, command_for_key};
pub use storage::{load_file, save_file};
pub use tui::run_tui;
