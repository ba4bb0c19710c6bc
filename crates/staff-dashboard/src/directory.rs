//! Server-paginated, searchable, sortable collections.
//!
//! The controller owns a [`PageState`] and is the only thing that mutates it.
//! Every fetch takes a generation number; a response is applied only if no
//! newer fetch has started since, so a slow page cannot overwrite a newer
//! search or sort.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use staff_api::AuthenticatedClient;
use staff_config::DirectoryConfig;
use staff_core::{Employee, Page, normalize};
use tokio::task::JoinHandle;

use crate::error::DashboardError;
use crate::table::{self, SortDirection};

/// Maps one raw record and its 1-based position in the collection.
pub type Normalizer<T> = fn(&Value, usize) -> T;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageState<T> {
    pub items: Vec<T>,
    pub search_query: String,
    pub sort_field: String,
    pub sort_direction: SortDirection,
    /// 1-based.
    pub current_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
    pub next_cursor: Option<String>,
    pub prev_cursor: Option<String>,
}

impl<T> PageState<T> {
    fn new(sort_field: String, sort_direction: SortDirection) -> Self {
        Self {
            items: Vec::new(),
            search_query: String::new(),
            sort_field,
            sort_direction,
            current_page: 1,
            total_items: 0,
            total_pages: 1,
            next_cursor: None,
            prev_cursor: None,
        }
    }

    /// `ordering` query value: the field, prefixed with `-` when descending.
    #[must_use]
    pub fn ordering(&self) -> String {
        format!("{}{}", self.sort_direction.ordering_prefix(), self.sort_field)
    }
}

pub struct PaginatedListController<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for PaginatedListController<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct Inner<T> {
    client: AuthenticatedClient,
    collection_url: String,
    page_size: u64,
    debounce: Duration,
    normalize: Normalizer<T>,
    state: Mutex<PageState<T>>,
    generation: AtomicU64,
    pending_search: Mutex<Option<JoinHandle<Result<(), DashboardError>>>>,
}

impl PaginatedListController<Employee> {
    /// The employee directory.
    #[must_use]
    pub fn employees(client: AuthenticatedClient, config: &DirectoryConfig) -> Self {
        let url = client.endpoints().employees();
        Self::new(client, &url, config, normalize::employee)
    }
}

impl<T: Clone + Send + 'static> PaginatedListController<T> {
    #[must_use]
    pub fn new(
        client: AuthenticatedClient,
        collection_url: &str,
        config: &DirectoryConfig,
        normalize: Normalizer<T>,
    ) -> Self {
        let direction = if config.sort_descending {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        let collection_url = client.endpoints().resolve(collection_url);
        Self {
            inner: Arc::new(Inner {
                client,
                collection_url,
                page_size: u64::from(config.page_size.max(1)),
                debounce: Duration::from_millis(config.debounce_ms),
                normalize,
                state: Mutex::new(PageState::new(config.sort_field.clone(), direction)),
                generation: AtomicU64::new(0),
                pending_search: Mutex::new(None),
            }),
        }
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> PageState<T> {
        self.lock_state().clone()
    }

    #[must_use]
    pub fn page_size(&self) -> u64 {
        self.inner.page_size
    }

    /// Update the query and schedule a refetch of page 1 after the debounce
    /// interval. A newer call cancels the pending one.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn set_search(&self, text: &str) {
        {
            let mut state = self.lock_state();
            state.search_query = text.to_string();
            state.current_page = 1;
        }
        // Anything in flight now answers an outdated query.
        self.inner.generation.fetch_add(1, Ordering::SeqCst);

        let this = self.clone();
        let debounce = self.inner.debounce;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            let result = this.refetch().await;
            if let Err(e) = &result {
                tracing::warn!(%e, "search refetch failed");
            }
            result
        });

        let previous = self
            .inner
            .pending_search
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(handle);
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    /// Wait for the pending debounced search, if any, and return its outcome.
    ///
    /// # Errors
    ///
    /// The refetch error, if the search fetch failed.
    pub async fn wait_for_search(&self) -> Result<(), DashboardError> {
        let pending = self
            .inner
            .pending_search
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match pending {
            None => Ok(()),
            Some(handle) => match handle.await {
                Ok(result) => result,
                Err(e) if e.is_cancelled() => Ok(()),
                Err(e) => {
                    tracing::warn!(%e, "search task failed");
                    Ok(())
                }
            },
        }
    }

    /// Sort by `field`: the current field flips direction, a new field
    /// starts ascending. Returns to page 1 and refetches.
    ///
    /// # Errors
    ///
    /// See [`Self::refetch`].
    pub async fn set_sort(&self, field: &str) -> Result<(), DashboardError> {
        {
            let mut state = self.lock_state();
            let (field, direction) = table::toggle(&state.sort_field, state.sort_direction, field);
            state.sort_field = field;
            state.sort_direction = direction;
            state.current_page = 1;
        }
        self.refetch().await
    }

    /// Jump to `page` (clamped to at least 1) and refetch.
    ///
    /// # Errors
    ///
    /// `PageOutOfRange` without fetching when the page's offset overflows;
    /// otherwise see [`Self::refetch`].
    pub async fn set_page(&self, page: u64) -> Result<(), DashboardError> {
        let page = page.max(1);
        page_offset(page, self.inner.page_size)?;
        self.lock_state().current_page = page;
        self.refetch().await
    }

    /// Follow the `next` link of the last response. Returns `false` without
    /// fetching when there is none.
    ///
    /// # Errors
    ///
    /// See [`Self::refetch`].
    pub async fn go_next(&self) -> Result<bool, DashboardError> {
        let cursor = self.lock_state().next_cursor.clone();
        self.follow(cursor).await
    }

    /// Follow the `previous` link of the last response. Returns `false`
    /// without fetching when there is none.
    ///
    /// # Errors
    ///
    /// See [`Self::refetch`].
    pub async fn go_previous(&self) -> Result<bool, DashboardError> {
        let cursor = self.lock_state().prev_cursor.clone();
        self.follow(cursor).await
    }

    /// Fetch the current page for the current query and ordering.
    ///
    /// # Errors
    ///
    /// The request's error. Items are cleared; counts and cursors keep their
    /// previous values.
    /// `PageOutOfRange` when the current page's offset overflows.
    pub async fn refetch(&self) -> Result<(), DashboardError> {
        let url = {
            let state = self.lock_state();
            let offset = page_offset(state.current_page, self.inner.page_size)?;
            let mut url = format!(
                "{}?limit={}&offset={offset}",
                self.inner.collection_url, self.inner.page_size
            );
            let search = state.search_query.trim();
            if !search.is_empty() {
                url.push_str(&format!("&search={}", urlencoding::encode(search)));
            }
            url.push_str(&format!(
                "&ordering={}",
                urlencoding::encode(&state.ordering())
            ));
            url
        };
        self.fetch(&url, false).await
    }

    async fn follow(&self, cursor: Option<String>) -> Result<bool, DashboardError> {
        match cursor {
            Some(url) => self.fetch(&url, true).await.map(|()| true),
            None => Ok(false),
        }
    }

    async fn fetch(&self, url: &str, from_cursor: bool) -> Result<(), DashboardError> {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.inner.client.get(url).await;

        let mut state = self.lock_state();
        if self.inner.generation.load(Ordering::SeqCst) != generation {
            tracing::warn!(url, "ignoring superseded page response");
            return Ok(());
        }

        let body = match result {
            Ok(body) => body,
            Err(e) => {
                state.items.clear();
                return Err(e.into());
            }
        };
        let page = Page::from_value(body);
        let page_size = self.inner.page_size;
        if from_cursor {
            state.current_page = page_from_cursor(url, page_size);
        }

        let offset = page_offset(state.current_page, page_size)
            .ok()
            .and_then(|o| usize::try_from(o).ok())
            .unwrap_or(0);
        state.items = page
            .results
            .iter()
            .enumerate()
            .map(|(idx, raw)| (self.inner.normalize)(raw, offset + idx + 1))
            .collect();
        state.total_items = page.count;
        state.total_pages = page.total_pages(page_size);
        state.next_cursor = page.next;
        state.prev_cursor = page.previous;
        tracing::debug!(
            page = state.current_page,
            total_pages = state.total_pages,
            total_items = state.total_items,
            "page loaded"
        );
        Ok(())
    }

    fn lock_state(&self) -> MutexGuard<'_, PageState<T>> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Offset of the first row of `page` (1-based).
fn page_offset(page: u64, page_size: u64) -> Result<u64, DashboardError> {
    page.saturating_sub(1)
        .checked_mul(page_size)
        .ok_or(DashboardError::PageOutOfRange { page })
}

/// Page number a cursor points at, from its `offset` parameter. A cursor
/// without one (the first page) is page 1.
fn page_from_cursor(url: &str, page_size: u64) -> u64 {
    let offset = url
        .split_once('?')
        .and_then(|(_, query)| {
            query
                .split('&')
                .filter_map(|pair| pair.split_once('='))
                .find(|(k, _)| *k == "offset")
                .and_then(|(_, v)| v.parse::<u64>().ok())
        })
        .unwrap_or(0);
    (offset / page_size.max(1)).saturating_add(1)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("http://h/api/employees/employee/?limit=10&offset=20", 3)]
    #[case("http://h/api/employees/employee/?offset=90&limit=10&search=a", 10)]
    #[case("http://h/api/employees/employee/?limit=10", 1)]
    #[case("http://h/api/employees/employee/", 1)]
    #[case("http://h/api/employees/employee/?offset=junk", 1)]
    fn cursor_page_numbers(#[case] url: &str, #[case] expected: u64) {
        assert_eq!(page_from_cursor(url, 10), expected);
    }

    #[test]
    fn page_offsets_overflow_into_an_error() {
        assert_eq!(page_offset(1, 10).ok(), Some(0));
        assert_eq!(page_offset(4, 10).ok(), Some(30));
        assert!(matches!(
            page_offset(u64::MAX, 10),
            Err(DashboardError::PageOutOfRange { page: u64::MAX })
        ));
        assert_eq!(page_from_cursor("http://h/?offset=18446744073709551615", 1), u64::MAX);
    }

    #[test]
    fn ordering_prefixes_descending() {
        let mut state: PageState<()> = PageState::new("name".into(), SortDirection::Asc);
        assert_eq!(state.ordering(), "name");
        state.sort_direction = SortDirection::Desc;
        assert_eq!(state.ordering(), "-name");
    }
}
