//! Integration tests for the explorer
//!
//! These tests drive the view controller end to end with a dataset file on
//! disk and a favorites database in a temporary directory.

use explorer::commands::{self, list};
use explorer::config::{ExplorerConfig, FavoritesConfig, SourceConfig};
use explorer::dataset::{DatasetLoader, FileSource};
use explorer::favorites::{FavoritesStore, SledBackend};
use explorer::models::DestinationId;
use explorer::query::{CategoryFilter, SortKey};
use explorer::view::{LoadStatus, ViewController, ViewState};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const DATASET: &str = r#"[
  {"id": 1, "name": "Valley of Flowers", "district": "Chamoli", "category": "Nature",
   "description": "Alpine meadows in bloom", "rating": 4.8, "latitude": 30.7266, "longitude": 79.6053},
  {"id": 2, "name": "Kedarnath", "district": "Rudraprayag", "category": "Pilgrimage",
   "description": "Himalayan temple town", "rating": 4.9, "latitude": 30.7352, "longitude": 79.0669},
  {"id": 3, "name": "Nainital Lake", "district": "Nainital", "category": "Nature",
   "description": "Boating on the lake", "rating": 4.2},
  {"id": 4, "name": "Jim Corbett", "district": "Nainital", "category": "Wildlife",
   "description": "Tiger reserve", "rating": 4.6, "latitude": 29.5300, "longitude": 78.7747}
]"#;

/// Temporary workspace holding a dataset file and a favorites database
struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("destinations.json"), DATASET).unwrap();
        Self { dir }
    }

    fn dataset_path(&self) -> PathBuf {
        self.dir.path().join("destinations.json")
    }

    fn favorites_path(&self) -> PathBuf {
        self.dir.path().join("favorites")
    }

    fn loader(&self) -> DatasetLoader {
        DatasetLoader::new(FileSource::new(self.dataset_path()))
    }

    fn config(&self) -> ExplorerConfig {
        ExplorerConfig {
            source: SourceConfig {
                file: Some(self.dataset_path()),
                ..SourceConfig::default()
            },
            favorites: FavoritesConfig {
                path: self.favorites_path(),
                ..FavoritesConfig::default()
            },
            ..ExplorerConfig::default()
        }
    }

    async fn open(&self, state: ViewState) -> ViewController<SledBackend> {
        let backend = SledBackend::open(self.favorites_path()).unwrap();
        let mut view = ViewController::with_state(FavoritesStore::new(backend), state);
        view.bootstrap(&self.loader()).await;
        view
    }
}

fn ids(view: &ViewController<SledBackend>) -> Vec<u64> {
    view.derived().iter().map(|d| d.id.0).collect()
}

#[tokio::test]
async fn test_initial_load_sorted_by_name() {
    let fixture = Fixture::new();
    let mut view = fixture.open(ViewState::default()).await;

    assert_eq!(view.status(), LoadStatus::Loaded);
    assert_eq!(ids(&view), vec![4, 2, 3, 1]);
    assert_eq!(view.summary(), "Showing 4 destinations");
    assert!(view.drain_notices().is_empty());
}

#[tokio::test]
async fn test_category_then_rating_sort() {
    let fixture = Fixture::new();
    let mut view = fixture.open(ViewState::default()).await;

    view.set_category("Nature");
    assert_eq!(ids(&view), vec![3, 1]);

    view.set_sort(SortKey::Rating);
    assert_eq!(ids(&view), vec![1, 3]);

    view.set_category(CategoryFilter::All);
    assert_eq!(ids(&view), vec![2, 1, 4, 3]);
}

#[tokio::test]
async fn test_search_matches_district_case_insensitively() {
    let fixture = Fixture::new();
    let mut view = fixture.open(ViewState::default()).await;

    view.set_search("  NAINITAL ");
    assert_eq!(ids(&view), vec![4, 3]);
    assert_eq!(view.summary(), "Showing 2 destinations");

    view.set_search("tiger");
    assert_eq!(ids(&view), vec![4]);
    assert_eq!(view.summary(), "Showing 1 destination");
}

#[tokio::test]
async fn test_favorites_persist_across_reopen() {
    let fixture = Fixture::new();

    {
        let mut view = fixture.open(ViewState::default()).await;
        let toggle = view.toggle_favorite(DestinationId(2)).unwrap();
        assert!(toggle.was_added);
        view.toggle_favorite(DestinationId(3)).unwrap();
        let notices = view.drain_notices();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0].message, "Added to favorites");
    }

    let mut view = fixture.open(ViewState::default()).await;
    assert!(view.is_favorite(DestinationId(2)));
    assert!(view.is_favorite(DestinationId(3)));
    assert_eq!(view.favorites_count(), 2);

    view.set_favorites_only(true);
    assert_eq!(ids(&view), vec![2, 3]);

    view.toggle_favorite(DestinationId(2)).unwrap();
    assert_eq!(ids(&view), vec![3]);
    assert_eq!(view.drain_notices()[0].message, "Removed from favorites");
}

#[tokio::test]
async fn test_failed_load_leaves_empty_dataset() {
    let fixture = Fixture::new();
    fs::write(fixture.dataset_path(), "not json").unwrap();

    let mut view = fixture.open(ViewState::default()).await;

    assert_eq!(view.status(), LoadStatus::Failed);
    assert!(view.derived().is_empty());
    assert_eq!(view.summary(), "Showing 0 destinations");

    let notices = view.drain_notices();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].is_error());
    assert_eq!(notices[0].message, "Failed to load destinations data");
}

#[tokio::test]
async fn test_selection_survives_filtering_only_while_visible() {
    let fixture = Fixture::new();
    let mut view = fixture.open(ViewState::default()).await;

    view.select(DestinationId(1));
    assert_eq!(view.selected().map(|d| d.name.as_str()), Some("Valley of Flowers"));

    view.set_category("Wildlife");
    assert!(view.selected().is_none());

    view.set_category(CategoryFilter::All);
    assert_eq!(view.selected().map(|d| d.id), Some(DestinationId(1)));
}

#[tokio::test]
async fn test_categories_sorted_and_unique() {
    let fixture = Fixture::new();
    let view = fixture.open(ViewState::default()).await;
    assert_eq!(view.categories(), vec!["Nature", "Pilgrimage", "Wildlife"]);
}

#[tokio::test]
async fn test_open_view_from_config() {
    let fixture = Fixture::new();
    let state = ViewState {
        sort: SortKey::District,
        ..ViewState::default()
    };

    let view = commands::open_view(&fixture.config(), state).await.unwrap();
    assert_eq!(ids(&view), vec![1, 3, 4, 2]);
    assert_eq!(
        list::render(&view, true),
        "1\tValley of Flowers\n3\tNainital Lake\n4\tJim Corbett\n2\tKedarnath\n"
    );
}

#[tokio::test]
async fn test_missing_source_file_is_a_config_error() {
    let fixture = Fixture::new();
    let config = fixture
        .config()
        .with_source_file(Path::new("/nonexistent/destinations.json"));

    assert!(commands::open_view(&config, ViewState::default()).await.is_err());
}
