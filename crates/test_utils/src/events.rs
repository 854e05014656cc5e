//! Event channel helpers

use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tokio::sync::broadcast::Receiver;

use domain_claims::RunEvent;

/// Receives events until a terminal one (completion or reset) arrives
///
/// # Panics
///
/// Panics if the receiver lagged, since the test would then miss events.
pub async fn collect_until_terminal(events: &mut Receiver<RunEvent>) -> Vec<RunEvent> {
    let mut collected = Vec::new();
    loop {
        match events.recv().await {
            Ok(event) => {
                let terminal = event.is_terminal();
                collected.push(event);
                if terminal {
                    return collected;
                }
            }
            Err(RecvError::Closed) => return collected,
            Err(RecvError::Lagged(missed)) => panic!("event receiver lagged by {missed}"),
        }
    }
}

/// Receives events until one matches `predicate`, returning it
///
/// # Panics
///
/// Panics if the channel closes or lags first.
pub async fn wait_for_event<F>(events: &mut Receiver<RunEvent>, mut predicate: F) -> RunEvent
where
    F: FnMut(&RunEvent) -> bool,
{
    loop {
        match events.recv().await {
            Ok(event) if predicate(&event) => return event,
            Ok(_) => continue,
            Err(error) => panic!("event channel failed before match: {error}"),
        }
    }
}

/// Takes whatever is already buffered without waiting
pub fn drain_ready(events: &mut Receiver<RunEvent>) -> Vec<RunEvent> {
    let mut drained = Vec::new();
    loop {
        match events.try_recv() {
            Ok(event) => drained.push(event),
            Err(TryRecvError::Lagged(_)) => continue,
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return drained,
        }
    }
}
