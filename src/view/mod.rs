//! View controller
//!
//! Owns the dataset, the favorites store and the current [`ViewState`], and
//! keeps the derived list consistent with them. Every setter replaces one
//! field and recomputes the derived list from scratch (filter, then sort);
//! nothing is patched incrementally.
//!
//! # Workflow
//!
//! ```text
//! DatasetLoader ──┐
//!                 ├─ bootstrap() ─→ dataset + favorites
//! FavoritesStore ─┘                      │
//!                                        ↓
//!        setters ──────────────→ query::derive ─→ derived list ─→ grid / map
//!           ↑                                                         │
//!           └──────────── select / toggle favorite / edit filters ────┘
//! ```
//!
//! # Examples
//!
//! ```
//! use explorer::dataset::{DatasetLoader, StaticSource};
//! use explorer::favorites::{FavoritesStore, MemoryBackend};
//! use explorer::models::Destination;
//! use explorer::query::SortKey;
//! use explorer::view::ViewController;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let loader = DatasetLoader::new(StaticSource::new(vec![
//!     Destination::new(1, "Auli", "Chamoli", "Adventure", 4.9),
//!     Destination::new(2, "Almora", "Almora", "Hill Station", 4.5),
//! ]));
//! let mut view = ViewController::new(FavoritesStore::new(MemoryBackend::new()));
//! view.bootstrap(&loader).await;
//!
//! view.set_sort(SortKey::Rating);
//! assert_eq!(view.count(), 2);
//! assert_eq!(view.derived()[0].name, "Auli");
//! # }
//! ```

mod notice;
mod state;

pub use notice::{Notice, NoticeLevel};
pub use state::{PresentationMode, ViewState};

use crate::dataset::{DatasetLoader, LoadError};
use crate::favorites::{FavoriteSet, FavoritesBackend, FavoritesStore, StorageError, Toggle};
use crate::models::{Destination, DestinationId};
use crate::query::{self, CategoryFilter, FilterCriteria, SortKey};
use std::collections::VecDeque;
use tracing::{debug, warn};

/// Notice text raised when the dataset fetch fails
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load destinations data";

/// Notice text raised when a toggle cannot be persisted
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save favorites";

/// Progress of the one-time dataset load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    /// Fetch not finished yet
    #[default]
    Pending,
    /// Dataset replaced by a successful fetch
    Loaded,
    /// Fetch failed; the previous dataset is kept
    Failed,
}

/// Session state owner and derived-list producer
pub struct ViewController<B: FavoritesBackend> {
    dataset: Vec<Destination>,
    favorites: FavoritesStore<B>,
    state: ViewState,
    derived: Vec<Destination>,
    status: LoadStatus,
    notices: VecDeque<Notice>,
}

impl<B: FavoritesBackend> ViewController<B> {
    /// Create a controller with an empty dataset and default state
    ///
    /// The store is used as given; call [`bootstrap`](Self::bootstrap) or
    /// [`load_favorites`](Self::load_favorites) to read persisted favorites.
    #[must_use]
    pub fn new(favorites: FavoritesStore<B>) -> Self {
        Self::with_state(favorites, ViewState::default())
    }

    /// Create a controller starting from a given state
    #[must_use]
    pub fn with_state(favorites: FavoritesStore<B>, state: ViewState) -> Self {
        let mut controller = Self {
            dataset: Vec::new(),
            favorites,
            state,
            derived: Vec::new(),
            status: LoadStatus::Pending,
            notices: VecDeque::new(),
        };
        controller.refresh();
        controller
    }

    /// Startup: fetch the dataset and read favorites concurrently
    ///
    /// Either may finish first; both are applied before returning.
    pub async fn bootstrap(&mut self, loader: &DatasetLoader) {
        let store = &mut self.favorites;
        let (result, ()) = tokio::join!(loader.load(), async {
            store.load();
        });
        self.apply_load(result);
    }

    /// Read persisted favorites and recompute
    pub fn load_favorites(&mut self) {
        self.favorites.load();
        self.refresh();
    }

    /// Apply the outcome of a dataset fetch
    ///
    /// Success replaces the dataset wholesale. Failure keeps the current
    /// dataset and queues an error notice.
    pub fn apply_load(&mut self, result: Result<Vec<Destination>, LoadError>) {
        match result {
            Ok(records) => {
                self.dataset = records;
                self.status = LoadStatus::Loaded;
            }
            Err(e) => {
                warn!(error = %e, "Keeping previous dataset after failed load");
                self.status = LoadStatus::Failed;
                self.notices.push_back(Notice::error(LOAD_FAILED_MESSAGE));
            }
        }
        self.refresh();
    }

    /// Recompute the derived list from the current inputs
    fn refresh(&mut self) {
        self.derived = query::derive(
            &self.dataset,
            &self.state.criteria,
            self.state.sort,
            self.favorites.favorites(),
        );
        debug!(
            count = self.derived.len(),
            search = %self.state.criteria.search,
            category = %self.state.criteria.category,
            favorites_only = self.state.criteria.favorites_only,
            sort = %self.state.sort,
            "Derived list recomputed"
        );
    }

    // ------------------------------------------------------------------
    // Setters
    // ------------------------------------------------------------------

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.state.criteria = FilterCriteria {
            search: text.into(),
            ..self.state.criteria.clone()
        };
        self.refresh();
    }

    pub fn set_category(&mut self, category: impl Into<CategoryFilter>) {
        self.state.criteria = FilterCriteria {
            category: category.into(),
            ..self.state.criteria.clone()
        };
        self.refresh();
    }

    pub fn set_favorites_only(&mut self, enabled: bool) {
        self.state.criteria = FilterCriteria {
            favorites_only: enabled,
            ..self.state.criteria.clone()
        };
        self.refresh();
    }

    pub fn toggle_favorites_only(&mut self) {
        self.set_favorites_only(!self.state.criteria.favorites_only);
    }

    pub fn set_sort(&mut self, key: SortKey) {
        self.state.sort = key;
        self.refresh();
    }

    /// Show a destination in the detail overlay
    pub fn select(&mut self, id: DestinationId) {
        self.state.selection = Some(id);
        self.refresh();
    }

    /// Close the detail overlay
    pub fn clear_selection(&mut self) {
        self.state.selection = None;
        self.refresh();
    }

    pub fn set_mode(&mut self, mode: PresentationMode) {
        self.state.mode = mode;
        self.refresh();
    }

    pub fn toggle_mode(&mut self) {
        self.set_mode(self.state.mode.toggled());
    }

    /// Flip a destination's favorite flag and persist the set
    ///
    /// Queues "Added to favorites" or "Removed from favorites" on success and
    /// an error notice when the set cannot be saved.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if persisting fails; favorites are unchanged then.
    pub fn toggle_favorite(&mut self, id: DestinationId) -> Result<Toggle, StorageError> {
        let result = self.favorites.toggle(id);
        match &result {
            Ok(toggle) => self.notices.push_back(Notice::success(toggle.message())),
            Err(_) => self.notices.push_back(Notice::error(SAVE_FAILED_MESSAGE)),
        }
        self.refresh();
        result
    }

    // ------------------------------------------------------------------
    // Read side
    // ------------------------------------------------------------------

    /// Filtered and sorted destinations for the active presentation
    #[must_use]
    pub fn derived(&self) -> &[Destination] {
        &self.derived
    }

    /// Number of destinations in the derived list
    #[must_use]
    pub fn count(&self) -> usize {
        self.derived.len()
    }

    /// Results counter text, e.g. "Showing 1 destination"
    #[must_use]
    pub fn summary(&self) -> String {
        let count = self.count();
        let plural = if count == 1 { "" } else { "s" };
        format!("Showing {count} destination{plural}")
    }

    /// The selected destination, if it is part of the derived list
    #[must_use]
    pub fn selected(&self) -> Option<&Destination> {
        let id = self.state.selection?;
        self.derived.iter().find(|d| d.id == id)
    }

    /// Look up a destination in the full dataset
    #[must_use]
    pub fn destination(&self, id: DestinationId) -> Option<&Destination> {
        self.dataset.iter().find(|d| d.id == id)
    }

    #[must_use]
    pub fn is_favorite(&self, id: DestinationId) -> bool {
        self.favorites.contains(id)
    }

    #[must_use]
    pub fn favorites(&self) -> &FavoriteSet {
        self.favorites.favorites()
    }

    #[must_use]
    pub fn favorites_count(&self) -> usize {
        self.favorites.len()
    }

    /// Categories available in the dataset, for filter controls
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        query::categories(&self.dataset)
    }

    #[must_use]
    pub const fn state(&self) -> &ViewState {
        &self.state
    }

    #[must_use]
    pub const fn status(&self) -> LoadStatus {
        self.status
    }

    /// Take every queued notice, oldest first
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::StaticSource;
    use crate::favorites::{DEFAULT_STORAGE_KEY, MemoryBackend};
    use crate::testing::{FailingSource, sample_destinations};

    fn controller() -> ViewController<MemoryBackend> {
        let mut view = ViewController::new(FavoritesStore::new(MemoryBackend::new()));
        view.apply_load(Ok(sample_destinations()));
        view
    }

    fn ids(view: &ViewController<MemoryBackend>) -> Vec<u64> {
        view.derived().iter().map(|d| d.id.get()).collect()
    }

    #[test]
    fn test_defaults_show_everything_by_name() {
        let view = controller();
        assert_eq!(ids(&view), vec![2, 3, 1]);
        assert_eq!(view.count(), 3);
        assert_eq!(view.status(), LoadStatus::Loaded);
    }

    #[test]
    fn test_category_and_rating() {
        let mut view = controller();
        view.set_category("Nature");
        view.set_sort(SortKey::Rating);
        assert_eq!(ids(&view), vec![1, 3]);
        assert_eq!(view.summary(), "Showing 2 destinations");
    }

    #[test]
    fn test_favorites_only_scenario() {
        let backend = MemoryBackend::with_slot(DEFAULT_STORAGE_KEY, "[2]");
        let mut view = ViewController::new(FavoritesStore::new(backend));
        view.load_favorites();
        view.apply_load(Ok(sample_destinations()));
        view.set_category("All");
        view.set_favorites_only(true);

        for key in SortKey::ALL {
            view.set_sort(key);
            assert_eq!(ids(&view), vec![2]);
        }
        assert_eq!(view.summary(), "Showing 1 destination");
    }

    #[test]
    fn test_empty_dataset() {
        let mut view = ViewController::new(FavoritesStore::new(MemoryBackend::new()));
        view.apply_load(Ok(Vec::new()));
        view.set_search("lake");
        view.set_favorites_only(true);
        assert!(view.derived().is_empty());
        assert_eq!(view.count(), 0);
        assert_eq!(view.summary(), "Showing 0 destinations");
    }

    #[test]
    fn test_search_recomputes() {
        let mut view = controller();
        view.set_search("LAKE");
        assert_eq!(ids(&view), vec![3]);
        view.set_search("");
        assert_eq!(view.count(), 3);
    }

    #[test]
    fn test_failed_load_keeps_dataset_and_notifies() {
        let mut view = controller();
        view.apply_load(Err(LoadError::Source("offline".into())));

        assert_eq!(view.count(), 3);
        assert_eq!(view.status(), LoadStatus::Failed);
        assert_eq!(view.drain_notices(), vec![Notice::error(LOAD_FAILED_MESSAGE)]);
        assert!(view.drain_notices().is_empty());
    }

    #[test]
    fn test_toggle_favorite_notices_and_recompute() {
        let mut view = controller();
        view.set_favorites_only(true);
        assert_eq!(view.count(), 0);

        let toggle = view.toggle_favorite(DestinationId(3)).unwrap();
        assert!(toggle.was_added);
        assert_eq!(ids(&view), vec![3]);
        assert!(view.is_favorite(DestinationId(3)));
        assert_eq!(view.favorites_count(), 1);

        view.toggle_favorite(DestinationId(3)).unwrap();
        assert_eq!(view.count(), 0);

        let notices = view.drain_notices();
        assert_eq!(
            notices,
            vec![
                Notice::success("Added to favorites"),
                Notice::success("Removed from favorites")
            ]
        );
    }

    #[test]
    fn test_toggle_favorite_failure() {
        let mut view = controller();
        view.favorites.backend().fail_writes(true);

        assert!(view.toggle_favorite(DestinationId(1)).is_err());
        assert!(!view.is_favorite(DestinationId(1)));
        let notices = view.drain_notices();
        assert_eq!(notices.len(), 1);
        assert!(notices[0].is_error());
    }

    #[test]
    fn test_selection_follows_derived_list() {
        let mut view = controller();
        view.select(DestinationId(2));
        assert_eq!(view.selected().map(|d| d.name.as_str()), Some("Kedarnath"));

        view.set_category("Nature");
        assert!(view.selected().is_none());
        assert_eq!(view.state().selection, Some(DestinationId(2)));

        view.set_category("All");
        assert!(view.selected().is_some());

        view.clear_selection();
        assert!(view.selected().is_none());
    }

    #[test]
    fn test_mode_switch_keeps_list() {
        let mut view = controller();
        let before = ids(&view);
        view.toggle_mode();
        assert_eq!(view.state().mode, PresentationMode::Map);
        assert_eq!(ids(&view), before);
    }

    #[test]
    fn test_setters_replace_single_field() {
        let mut view = controller();
        view.set_search("a");
        view.set_category("Nature");
        view.toggle_favorites_only();
        view.set_search("b");

        let criteria = &view.state().criteria;
        assert_eq!(criteria.search, "b");
        assert_eq!(criteria.category, CategoryFilter::Exactly("Nature".into()));
        assert!(criteria.favorites_only);
    }

    #[test]
    fn test_categories() {
        let view = controller();
        assert_eq!(view.categories(), vec!["Nature", "Pilgrimage"]);
    }

    #[tokio::test]
    async fn test_bootstrap_loads_both() {
        let backend = MemoryBackend::with_slot(DEFAULT_STORAGE_KEY, "[1, 42]");
        let mut view = ViewController::new(FavoritesStore::new(backend));
        let loader = DatasetLoader::new(StaticSource::new(sample_destinations()));

        view.bootstrap(&loader).await;

        assert_eq!(view.count(), 3);
        assert_eq!(view.favorites_count(), 2);
        view.set_favorites_only(true);
        assert_eq!(ids(&view), vec![1]);
    }

    #[tokio::test]
    async fn test_bootstrap_failure_still_loads_favorites() {
        let backend = MemoryBackend::with_slot(DEFAULT_STORAGE_KEY, "[2]");
        let mut view = ViewController::new(FavoritesStore::new(backend));

        view.bootstrap(&DatasetLoader::new(FailingSource)).await;

        assert_eq!(view.count(), 0);
        assert_eq!(view.favorites_count(), 1);
        assert_eq!(view.status(), LoadStatus::Failed);
        assert_eq!(view.drain_notices().len(), 1);
    }

    #[test]
    fn test_favorites_before_dataset() {
        let backend = MemoryBackend::with_slot(DEFAULT_STORAGE_KEY, "[3]");
        let mut view = ViewController::new(FavoritesStore::new(backend));
        view.set_favorites_only(true);
        view.load_favorites();
        assert_eq!(view.count(), 0);

        view.apply_load(Ok(sample_destinations()));
        assert_eq!(ids(&view), vec![3]);
    }
}
