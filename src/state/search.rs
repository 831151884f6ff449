// Debounced search-term listener.
//
// Raw keystroke-level search terms arrive on a channel. A term is only
// dispatched to the service once no newer term has arrived for the debounce
// window, and never twice in a row.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::service::UserDataService;

/// Default quiet period before a search term is dispatched.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(100);

/// Spawn a task that feeds debounced, de-duplicated terms from `terms` into
/// `service.update_search_term`.
///
/// Failed searches are logged and the listener keeps going. The task ends
/// once every sender is dropped; a term still waiting out its debounce
/// window at that point is dispatched first.
pub fn spawn_search_listener(
    service: Arc<UserDataService>,
    mut terms: mpsc::Receiver<String>,
    debounce: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut last_dispatched: Option<String> = None;

        while let Some(mut term) = terms.recv().await {
            let mut closed = false;

            // Keep replacing the pending term until the channel goes quiet.
            loop {
                match tokio::time::timeout(debounce, terms.recv()).await {
                    Ok(Some(newer)) => term = newer,
                    Ok(None) => {
                        closed = true;
                        break;
                    }
                    Err(_) => break,
                }
            }

            if last_dispatched.as_deref() == Some(term.as_str()) {
                debug!(term = %term, "Search term unchanged, skipping");
            } else {
                if let Err(e) = service.update_search_term(&term).await {
                    warn!(term = %term, error = %e, "Search failed");
                }
                last_dispatched = Some(term);
            }

            if closed {
                break;
            }
        }

        debug!("Search listener stopped");
    })
}
