//! Build list view.
//!
//! Owns the fetched build collection and the pagination state over it.
//! The collection is filled by a single fetch started at mount time and
//! discarded at unmount. A fetch that completes after unmount is dropped.

use crate::config::ClientConfig;
use crate::error::AppError;
use crate::models::{Build, Pagination, RowsPerPage};
use crate::services::builds_client::BuildsClient;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Mutable state shared between the view and its fetch task.
#[derive(Debug, Default)]
struct ViewState {
    builds: Vec<Build>,
    pagination: Pagination,
}

/// Everything needed to draw the current page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    /// Records inside the current page window, in fetch order.
    pub rows: Vec<Build>,

    /// Zero-based page index.
    pub page: usize,

    pub rows_per_page: RowsPerPage,

    pub page_count: usize,

    /// Size of the whole collection.
    pub total: usize,

    pub is_first_page: bool,

    pub is_last_page: bool,

    /// Visible rows label, e.g. `1-5 of 12`.
    pub label: String,
}

/// Paginated view over the build list.
pub struct BuildListView {
    state: Arc<RwLock<ViewState>>,
    alive: CancellationToken,
    mounted: AtomicBool,
    revision: Arc<watch::Sender<u64>>,
}

impl Default for BuildListView {
    fn default() -> Self {
        Self::new(Pagination::default())
    }
}

impl BuildListView {
    /// Create an unmounted view with the given initial pagination.
    pub fn new(pagination: Pagination) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            state: Arc::new(RwLock::new(ViewState {
                builds: Vec::new(),
                pagination,
            })),
            alive: CancellationToken::new(),
            mounted: AtomicBool::new(false),
            revision: Arc::new(revision),
        }
    }

    /// Create a view using the configured initial page size.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(Pagination::new(config.rows_per_page))
    }

    /// Start the one fetch of this view's lifetime.
    ///
    /// Returns the fetch task's handle. The task never fails: fetch errors
    /// are logged and the collection stays empty.
    pub fn mount(&self, client: BuildsClient) -> Result<JoinHandle<()>, AppError> {
        if self.alive.is_cancelled() {
            return Err(AppError::invalid_input("View has been unmounted"));
        }
        if self.mounted.swap(true, Ordering::SeqCst) {
            return Err(AppError::invalid_input("View is already mounted"));
        }

        let state = Arc::clone(&self.state);
        let alive = self.alive.clone();
        let revision = Arc::clone(&self.revision);

        log::info!("[builds] Fetching {}", client.endpoint());

        Ok(tokio::spawn(async move {
            let result = tokio::select! {
                _ = alive.cancelled() => {
                    log::debug!("[builds] View unmounted before fetch completed");
                    return;
                }
                result = client.list_builds() => result,
            };

            match result {
                Ok(builds) => store_builds(&state, &alive, &revision, builds).await,
                Err(e) => log::error!("[builds] Failed to fetch {}", e),
            }
        }))
    }

    /// Tear the view down: later fetch completions are ignored and the
    /// collection is discarded.
    pub async fn unmount(&self) {
        self.alive.cancel();

        let mut state = self.state.write().await;
        state.builds.clear();
        state.pagination = Pagination::default();
        drop(state);

        self.revision.send_modify(|r| *r += 1);
        log::debug!("[builds] View unmounted");
    }

    /// Whether the view has not been unmounted.
    pub fn is_alive(&self) -> bool {
        !self.alive.is_cancelled()
    }

    /// Receiver that changes whenever the view's state changes.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Go to `page` (zero-based). The pagination control checks bounds.
    pub async fn change_page(&self, page: usize) {
        self.mutate(|state| state.pagination.set_page(page)).await;
    }

    /// Switch the page size; the page index goes back to zero.
    pub async fn change_rows_per_page(&self, rows_per_page: RowsPerPage) {
        self.mutate(|state| state.pagination.set_rows_per_page(rows_per_page))
            .await;
    }

    /// Current pagination state.
    pub async fn pagination(&self) -> Pagination {
        self.state.read().await.pagination
    }

    /// Number of fetched records.
    pub async fn total(&self) -> usize {
        self.state.read().await.builds.len()
    }

    /// The whole collection, in fetch order.
    pub async fn builds(&self) -> Vec<Build> {
        self.state.read().await.builds.clone()
    }

    /// Snapshot of the current page window.
    pub async fn current_page(&self) -> PageView {
        let state = self.state.read().await;
        let total = state.builds.len();
        let pagination = state.pagination;

        PageView {
            rows: pagination.window(&state.builds).to_vec(),
            page: pagination.page(),
            rows_per_page: pagination.rows_per_page(),
            page_count: pagination.page_count(total),
            total,
            is_first_page: pagination.is_first_page(),
            is_last_page: pagination.is_last_page(total),
            label: pagination.displayed_rows_label(total),
        }
    }

    /// Apply `f` unless the view is unmounted. Liveness is checked under
    /// the write lock, same as [`store_builds`].
    async fn mutate(&self, f: impl FnOnce(&mut ViewState)) {
        let mut state = self.state.write().await;
        if self.alive.is_cancelled() {
            log::debug!("[builds] Ignoring change on unmounted view");
            return;
        }
        f(&mut state);
        drop(state);

        self.revision.send_modify(|r| *r += 1);
    }
}

/// Store a completed fetch, unless the view died while it was in flight.
///
/// Liveness is checked under the write lock: `unmount` cancels first and
/// then takes the lock, so nothing can be stored after it clears.
async fn store_builds(
    state: &RwLock<ViewState>,
    alive: &CancellationToken,
    revision: &watch::Sender<u64>,
    builds: Vec<Build>,
) {
    let mut guard = state.write().await;
    if alive.is_cancelled() {
        log::debug!("[builds] Dropping {} builds fetched after unmount", builds.len());
        return;
    }

    log::info!("[builds] Loaded {} builds", builds.len());
    guard.builds = builds;
    drop(guard);

    revision.send_modify(|r| *r += 1);
}
