//! Helpers around the `watch::Receiver<bool>` shutdown signal.
//!
//! `true` means shutdown was requested. A closed channel means nobody can
//! request shutdown any more, so it never counts as a request.

use std::future::Future;

use tokio::sync::watch;

use crate::error::{BootstrapError, BootstrapStage};

/// True if shutdown has been requested.
#[must_use]
pub fn is_requested(shutdown: &watch::Receiver<bool>) -> bool {
    *shutdown.borrow()
}

/// Resolve once shutdown is requested. Pends forever if the sender is gone.
pub async fn requested(shutdown: &mut watch::Receiver<bool>) {
    loop {
        if *shutdown.borrow_and_update() {
            return;
        }
        if shutdown.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

/// Let a run that was asked to stop wind down, unless `interrupt` fires
/// first, in which case the run is dropped and reported as cancelled at the
/// stage `stage` reports.
///
/// A run that is already finished wins over a pending interrupt.
pub async fn finish_or_abort<T, R, I, S>(
    run: R,
    interrupt: I,
    stage: S,
) -> Result<T, BootstrapError>
where
    R: Future<Output = Result<T, BootstrapError>>,
    I: Future<Output = ()>,
    S: FnOnce() -> BootstrapStage,
{
    tokio::select! {
        biased;
        result = run => result,
        () = interrupt => Err(BootstrapError::Cancelled { stage: stage() }),
    }
}
