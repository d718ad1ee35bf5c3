//! Contract for the puzzle engine a session drives.
//!
//! The session never looks inside a game. Everything it knows about the
//! board comes through [`GameHandle`], and every new game comes from an
//! [`Engine`]. Tests substitute scripted engines through the same traits.

use derive_more::{Display, Error};

use crate::Direction;

/// Seed text shown for games that were not built from a seed.
pub const NO_SEED: &str = "No Seed";

/// Failure reported by the engine. Carries a human-readable message only.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("{}", message)]
pub struct EngineError {
    message: String,
}

impl EngineError {
    /// Creates an engine error from its message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The message as the engine reported it.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A live puzzle instance. Mutated in place by moves and undos.
pub trait GameHandle {
    /// Moves the player one step in `direction`.
    ///
    /// # Errors
    ///
    /// The engine rejects illegal moves. The handle must stay unchanged
    /// when it does.
    fn move_(&mut self, direction: Direction) -> Result<(), EngineError>;

    /// Takes back the last move.
    ///
    /// # Errors
    ///
    /// Fails when there is nothing to undo.
    fn undo(&mut self) -> Result<(), EngineError>;

    /// Whether no legal move is left.
    fn is_stuck(&self) -> bool;

    /// Textual rendering of the board.
    fn print(&self) -> String;

    /// The seed this game was generated from, if any.
    fn seed(&self) -> Option<String>;

    /// Serialized form accepted by [`Engine::load`].
    fn save(&self) -> String;
}

/// Factory for [`GameHandle`]s.
pub trait Engine {
    /// Handle type produced by this engine.
    type Handle: GameHandle;

    /// Generates a new puzzle.
    ///
    /// Sizes are passed through as the user entered them; the engine
    /// decides what is valid. An empty `seed` lets the engine pick one.
    ///
    /// # Errors
    ///
    /// Invalid sizes or a malformed seed.
    fn generate(&self, width: i64, height: i64, seed: &str) -> Result<Self::Handle, EngineError>;

    /// Restores a puzzle from text produced by [`GameHandle::save`].
    ///
    /// # Errors
    ///
    /// Corrupt or malformed input.
    fn load(&self, text: &str) -> Result<Self::Handle, EngineError>;
}
