// Time limit for engines that cannot be interrupted from inside

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use log::warn;

use crate::domain::{
    engine_service::{EngineError, Result},
    models::ProgramSolution,
};

/// Runs `solve` on a worker thread and waits at most `limit` for it.
///
/// On expiry the caller gets `ProgramSolution::timed_out` right away. The
/// worker keeps running detached until the engine returns, its answer is
/// dropped.
pub(crate) fn solve_with_deadline<F>(limit: Duration, solve: F) -> Result<ProgramSolution>
where
    F: FnOnce() -> Result<ProgramSolution> + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name("mip-worker".to_string())
        .spawn(move || {
            // the receiver is gone once the deadline passed
            let _ = tx.send(solve());
        })
        .map_err(|e| EngineError::ExecutionFailed(format!("could not spawn engine thread: {}", e)))?;

    match rx.recv_timeout(limit) {
        Ok(answer) => answer,
        Err(RecvTimeoutError::Timeout) => {
            warn!("engine still running after {:?}, abandoning the solve", limit);
            Ok(ProgramSolution::timed_out(Some(limit)))
        }
        Err(RecvTimeoutError::Disconnected) => Err(EngineError::ExecutionFailed(
            "engine thread exited without an answer".to_string(),
        )),
    }
}
