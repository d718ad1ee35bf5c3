//! Session controller for a single Greed game.
//!
//! [`GreedSession`] owns at most one live [`GameHandle`] and sequences
//! every user action against it. Construction failures (generate, load)
//! tear the session down to [`SessionState::Empty`]; operation failures
//! (move, undo) leave the running game untouched. Either way the engine's
//! message goes up as a transient status that reverts on its own.

use derive_getters::Getters;
use derive_new::new;
use tracing::{debug, info, instrument, warn};

use crate::{
    Direction, Engine, EngineError, GameHandle, LoadFailurePolicy, NO_SEED, NumpadError,
    SessionConfig, TransientNotifier,
};

/// Board text shown when there is no active game.
pub const INVALID_GAME: &str = "Invalid Game";

/// Whether the session currently holds a game.
#[derive(Debug, Clone)]
pub enum SessionState<H> {
    /// No valid game.
    Empty,
    /// A game is loaded and playable.
    Active(H),
}

impl<H> SessionState<H> {
    /// True while a game is loaded.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    /// The live handle, if any.
    pub fn handle(&self) -> Option<&H> {
        match self {
            Self::Active(handle) => Some(handle),
            Self::Empty => None,
        }
    }
}

/// What the status line shows.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum StatusLine {
    /// Normal status of a playable game.
    #[display("current seed: {}", _0)]
    Seed(String),

    /// Normal status of a game with no legal move left.
    #[display("No possible moves")]
    Stuck,

    /// Temporary override, usually an error.
    #[display("{}", _0)]
    Transient(String),

    /// Normal status while no game is loaded.
    #[display("No active game")]
    NoGame,
}

/// Why a session operation did not go through.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SessionError {
    /// Generating or loading a game failed. The session may now be empty.
    #[display("Error: {}", _0)]
    Construction(EngineError),

    /// The engine rejected a move or undo. The game is unchanged.
    #[display("Error: {}", _0)]
    Operation(EngineError),

    /// Reading or writing a save file failed. The game is unchanged.
    #[display("Error: {}", _0)]
    Storage(String),

    /// The action needs a game and there is none.
    #[display("No active game")]
    NoActiveGame,

    /// A keypad digit without a direction. Filtered before the engine.
    #[display("Ignored key: {}", _0)]
    InvalidKey(NumpadError),
}

impl std::error::Error for SessionError {}

/// Saved game ready to be offered as a download.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct SaveArtifact {
    /// Fixed file name for the download.
    file_name: String,
    /// Fixed content type for the download.
    content_type: String,
    /// Engine-serialized game.
    contents: String,
}

/// Snapshot of everything the presentation layer draws.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct SessionView {
    /// Board text, or [`INVALID_GAME`].
    board: String,
    /// Rendered status line.
    status: String,
    /// Whether the active game has no legal move left.
    stuck: bool,
}

/// Controller owning the single active game of a player session.
pub struct GreedSession<E: Engine> {
    engine: E,
    state: SessionState<E::Handle>,
    notifier: TransientNotifier,
    config: SessionConfig,
}

impl<E> GreedSession<E>
where
    E: Engine,
{
    /// Creates an empty session.
    #[instrument(skip_all)]
    pub fn new(engine: E, config: SessionConfig) -> Self {
        info!(delay_ms = *config.message_delay_ms(), "Creating Greed session");
        Self {
            engine,
            state: SessionState::Empty,
            notifier: TransientNotifier::new(config.message_delay()),
            config,
        }
    }

    /// Creates a session and generates the first game from `config`.
    ///
    /// A failed first generate leaves the session empty with the error on
    /// the status line, the same as any later generate.
    #[instrument(skip_all)]
    pub fn start(engine: E, config: SessionConfig) -> Self {
        let mut session = Self::new(engine, config);
        let (width, height) = (*session.config.width(), *session.config.height());
        let seed = session.config.seed().clone();
        if let Err(e) = session.generate(width, height, &seed) {
            warn!(error = %e, "Initial game could not be generated");
        }
        session
    }

    /// Replaces the current game with a freshly generated one.
    ///
    /// # Errors
    ///
    /// [`SessionError::Construction`] when the engine rejects the
    /// parameters. The session is empty afterwards.
    #[instrument(skip(self))]
    pub fn generate(&mut self, width: i64, height: i64, seed: &str) -> Result<(), SessionError> {
        match self.engine.generate(width, height, seed) {
            Ok(handle) => {
                self.activate(handle);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Generate failed, invalidating session");
                self.state = SessionState::Empty;
                Err(self.raise(SessionError::Construction(err)))
            }
        }
    }

    /// Replaces the current game with one restored from saved text.
    ///
    /// # Errors
    ///
    /// [`SessionError::Construction`] when the text does not load. What
    /// happens to the running game is decided by the configured
    /// [`LoadFailurePolicy`].
    #[instrument(skip_all, fields(len = text.len()))]
    pub fn load_from_text(&mut self, text: &str) -> Result<(), SessionError> {
        match self.engine.load(text) {
            Ok(handle) => {
                self.activate(handle);
                Ok(())
            }
            Err(err) => Err(self.reject_load(err)),
        }
    }

    /// Applies the load failure policy and raises the error.
    fn reject_load(&mut self, err: EngineError) -> SessionError {
        match self.config.load_failure() {
            LoadFailurePolicy::Invalidate => {
                warn!(error = %err, "Load failed, invalidating session");
                self.state = SessionState::Empty;
            }
            LoadFailurePolicy::Preserve => {
                warn!(
                    error = %err,
                    active = self.state.is_active(),
                    "Load failed, keeping current game"
                );
            }
        }
        self.raise(SessionError::Construction(err))
    }

    /// Moves the player in `direction`.
    ///
    /// # Errors
    ///
    /// [`SessionError::NoActiveGame`] without touching the engine, or
    /// [`SessionError::Operation`] when the engine rejects the move. The
    /// game is unchanged in both cases.
    #[instrument(skip(self))]
    pub fn apply_direction(&mut self, direction: Direction) -> Result<(), SessionError> {
        let SessionState::Active(handle) = &mut self.state else {
            debug!("Move ignored, no active game");
            return Err(SessionError::NoActiveGame);
        };
        let result = handle.move_(direction);
        match result {
            Ok(()) => {
                debug!(stuck = handle.is_stuck(), "Move applied");
                self.notifier.clear();
                Ok(())
            }
            Err(err) => {
                debug!(error = %err, "Move rejected");
                Err(self.raise(SessionError::Operation(err)))
            }
        }
    }

    /// Moves the player in the direction a keypad digit points at.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidKey`] for 0, 5 and non-digits; these are
    /// dropped silently and never reach the engine. Otherwise as
    /// [`GreedSession::apply_direction`].
    #[instrument(skip(self))]
    pub fn apply_numpad(&mut self, digit: u8) -> Result<(), SessionError> {
        let direction = Direction::from_numpad(digit).map_err(|e| {
            debug!(error = %e, "Keypad digit filtered");
            SessionError::InvalidKey(e)
        })?;
        self.apply_direction(direction)
    }

    /// Takes back the last move.
    ///
    /// # Errors
    ///
    /// As [`GreedSession::apply_direction`].
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> Result<(), SessionError> {
        let SessionState::Active(handle) = &mut self.state else {
            debug!("Undo ignored, no active game");
            return Err(SessionError::NoActiveGame);
        };
        let result = handle.undo();
        match result {
            Ok(()) => {
                debug!("Move undone");
                self.notifier.clear();
                Ok(())
            }
            Err(err) => {
                debug!(error = %err, "Undo rejected");
                Err(self.raise(SessionError::Operation(err)))
            }
        }
    }

    /// Serializes the current game for download.
    ///
    /// # Errors
    ///
    /// [`SessionError::NoActiveGame`] when there is nothing to save.
    #[instrument(skip(self))]
    pub fn request_save(&self) -> Result<SaveArtifact, SessionError> {
        let handle = self.state.handle().ok_or(SessionError::NoActiveGame)?;
        let contents = handle.save();
        debug!(len = contents.len(), "Serialized current game");
        Ok(SaveArtifact::new(
            self.config.save_file_name().clone(),
            self.config.save_content_type().clone(),
            contents,
        ))
    }

    /// Reports a failure that happened outside the engine, such as a
    /// save file that could not be read or written.
    pub(crate) fn report_storage_failure(&mut self, message: String) -> SessionError {
        self.raise(SessionError::Storage(message))
    }

    /// Seed of the active game. `None` while empty.
    pub fn current_seed(&self) -> Option<String> {
        self.state
            .handle()
            .map(|h| h.seed().unwrap_or_else(|| NO_SEED.to_string()))
    }

    /// Whether the active game has run out of moves. False while empty.
    pub fn is_stuck(&self) -> bool {
        self.state.handle().is_some_and(GameHandle::is_stuck)
    }

    /// Board text of the active game, or [`INVALID_GAME`].
    pub fn board_text(&self) -> String {
        self.state
            .handle()
            .map_or_else(|| INVALID_GAME.to_string(), GameHandle::print)
    }

    /// What the status line shows right now.
    pub fn status(&self) -> StatusLine {
        if let Some(message) = self.notifier.message() {
            return StatusLine::Transient(message.to_string());
        }
        match self.state.handle() {
            None => StatusLine::NoGame,
            Some(handle) if handle.is_stuck() => StatusLine::Stuck,
            Some(handle) => StatusLine::Seed(handle.seed().unwrap_or_else(|| NO_SEED.to_string())),
        }
    }

    /// The status line rendered as text.
    pub fn status_text(&self) -> String {
        self.status().to_string()
    }

    /// Snapshot for the presentation layer.
    pub fn view(&self) -> SessionView {
        SessionView::new(self.board_text(), self.status_text(), self.is_stuck())
    }

    /// Reverts the transient message if its delay has passed.
    ///
    /// Returns whether the status line changed.
    pub fn tick(&mut self) -> bool {
        self.notifier.expire_due().is_some()
    }

    /// Waits for the pending transient message to revert.
    ///
    /// Pends forever while no message is showing.
    pub async fn wait_revert(&mut self) {
        let message = self.notifier.wait_revert().await;
        debug!(message = %message, "Status reverted to normal");
    }

    /// Current session state.
    pub fn state(&self) -> &SessionState<E::Handle> {
        &self.state
    }

    /// The transient message slot.
    pub fn notifier(&self) -> &TransientNotifier {
        &self.notifier
    }

    /// The engine games come from.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Settings this session was built with.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    fn activate(&mut self, handle: E::Handle) {
        let seed = handle.seed();
        info!(seed = seed.as_deref().unwrap_or(NO_SEED), "Game activated");
        self.state = SessionState::Active(handle);
        self.notifier.clear();
    }

    fn raise(&mut self, err: SessionError) -> SessionError {
        self.notifier.show(err.to_string());
        err
    }
}
