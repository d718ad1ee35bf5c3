//! Saved-game file interchange.
//!
//! Loading reads the file asynchronously and then hands the whole text to
//! the session in one step, so the session never sees a half-read game.

use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use crate::{Engine, GreedSession, SessionError};

/// Loads a saved game from `path` into `session`.
///
/// # Errors
///
/// [`SessionError::Storage`] if the file cannot be read; the running game
/// is kept. [`SessionError::Construction`] if the contents do not load,
/// subject to the configured load failure policy.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub async fn load_file<E: Engine>(
    session: &mut GreedSession<E>,
    path: impl AsRef<Path>,
) -> Result<(), SessionError> {
    let path = path.as_ref();
    let text = match tokio::fs::read_to_string(path).await {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "Failed to read saved game, keeping current game");
            return Err(session.report_storage_failure(format!(
                "Could not read {}: {}",
                path.display(),
                e
            )));
        }
    };
    session.load_from_text(&text)?;
    info!("Saved game loaded");
    Ok(())
}

/// Writes the current game into `dir` under the configured file name.
///
/// Returns the path written.
///
/// # Errors
///
/// [`SessionError::NoActiveGame`] when there is nothing to save, or
/// [`SessionError::Storage`] when the file cannot be written. The running
/// game is unaffected either way.
#[instrument(skip_all, fields(dir = %dir.as_ref().display()))]
pub async fn save_file<E: Engine>(
    session: &mut GreedSession<E>,
    dir: impl AsRef<Path>,
) -> Result<PathBuf, SessionError> {
    let artifact = session.request_save()?;
    let path = dir.as_ref().join(artifact.file_name());
    if let Err(e) = tokio::fs::write(&path, artifact.contents()).await {
        warn!(error = %e, "Failed to write saved game");
        return Err(session.report_storage_failure(format!(
            "Could not write {}: {}",
            path.display(),
            e
        )));
    }
    info!(
        path = %path.display(),
        content_type = %artifact.content_type(),
        "Game saved"
    );
    Ok(path)
}
