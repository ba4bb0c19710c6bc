//! Bounded concurrent GETs.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use staff_api::{AuthenticatedClient, ClientError};
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::{Id, JoinError, JoinSet};

/// Why one fanned-out fetch produced no body.
#[derive(Debug, Error)]
pub enum FetchFailure {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("fetch task failed: {0}")]
    Task(#[from] JoinError),
}

pub type FetchResult = Result<Value, FetchFailure>;

/// Fetch every `(slot, url)` concurrently, at most `limit` in flight.
///
/// Returns one entry per slot in `0..slots`; slots that were not requested
/// are `None`. A task that panicked fills its slot with `FetchFailure::Task`.
pub async fn get_all(
    client: &AuthenticatedClient,
    requests: Vec<(usize, String)>,
    slots: usize,
    limit: usize,
) -> Vec<Option<FetchResult>> {
    let semaphore = Arc::new(Semaphore::new(limit.max(1)));
    let mut set = JoinSet::new();
    let mut slot_of = HashMap::with_capacity(requests.len());

    for (slot, url) in requests {
        let client = client.clone();
        let semaphore = Arc::clone(&semaphore);
        let handle = set.spawn(async move {
            let _permit = semaphore.acquire_owned().await.ok();
            client.get(&url).await.map_err(FetchFailure::from)
        });
        slot_of.insert(handle.id(), slot);
    }

    collect_slots(set, &slot_of, slots).await
}

async fn collect_slots<T: 'static>(
    mut set: JoinSet<Result<T, FetchFailure>>,
    slot_of: &HashMap<Id, usize>,
    slots: usize,
) -> Vec<Option<Result<T, FetchFailure>>> {
    let mut results: Vec<Option<Result<T, FetchFailure>>> =
        std::iter::repeat_with(|| None).take(slots).collect();
    while let Some(joined) = set.join_next_with_id().await {
        let (id, result) = match joined {
            Ok((id, result)) => (id, result),
            Err(e) => {
                tracing::warn!(%e, "fetch task failed");
                (e.id(), Err(FetchFailure::Task(e)))
            }
        };
        if let Some(&slot) = slot_of.get(&id) {
            results[slot] = Some(result);
        }
    }
    results
}
