//! Interactive destination browser
//!
//! [`App`] glues the view controller to the terminal: key presses become
//! [`Action`]s, actions become controller calls, and every frame is drawn
//! from the controller's derived list. The dataset arrives from a background
//! task; until then the browser shows a loading state and stays usable.

use super::error::{Result, UiError};
use super::events::{Action, map_key, poll_key};
use super::state::{AppState, Direction, Focus};
use super::theme::Theme;
use super::widgets::{
    CardGrid, DetailsModal, FilterBar, HelpBar, MapView, SearchBar, StatusBar, columns_for,
};
use crate::dataset::{DatasetLoader, LoadError};
use crate::favorites::FavoritesBackend;
use crate::models::{Destination, DestinationId};
use crate::query::{ALL_CATEGORIES, CategoryFilter};
use crate::view::{LoadStatus, PresentationMode, ViewController};
use crossterm::{
    event::KeyEvent,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDirection, Layout},
};
use std::io::{self, IsTerminal, Stdout};
use std::time::Duration;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tracing::{debug, info, warn};

type LoadReceiver = oneshot::Receiver<std::result::Result<Vec<Destination>, LoadError>>;

/// How long to wait for a key before redrawing
const TICK: Duration = Duration::from_millis(100);

/// Browser state: the controller plus terminal-side state
pub struct App<B: FavoritesBackend> {
    view: ViewController<B>,
    state: AppState,
    theme: Theme,
}

impl<B: FavoritesBackend> App<B> {
    /// Wrap a controller; the search input starts from its current criteria
    #[must_use]
    pub fn new(view: ViewController<B>) -> Self {
        let state = AppState::with_query(view.state().criteria.search.clone());
        Self {
            view,
            state,
            theme: Theme::default(),
        }
    }

    #[must_use]
    pub const fn view(&self) -> &ViewController<B> {
        &self.view
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Whether the detail overlay is showing
    #[must_use]
    pub fn details_open(&self) -> bool {
        self.view.selected().is_some()
    }

    /// Destination under the results cursor
    #[must_use]
    pub fn current(&self) -> Option<&Destination> {
        self.view.derived().get(self.state.cursor)
    }

    /// Apply the outcome of the background load
    pub fn on_load(&mut self, result: std::result::Result<Vec<Destination>, LoadError>) {
        self.view.apply_load(result);
        self.after_change();
    }

    /// Handle one key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        if let Some(action) = map_key(key, self.state.focus, self.details_open()) {
            self.apply(action);
        }
    }

    /// Perform an action
    pub fn apply(&mut self, action: Action) {
        debug!(?action, "Browser action");
        match action {
            Action::Quit => self.state.should_quit = true,
            Action::FocusSearch => self.state.focus = Focus::Search,
            Action::FocusResults => self.state.focus = Focus::Results,
            Action::Insert(c) => {
                self.state.insert_char(c);
                self.sync_search();
            }
            Action::Backspace => {
                if self.state.delete_char() {
                    self.sync_search();
                }
            }
            Action::CaretLeft => self.state.caret_left(),
            Action::CaretRight => self.state.caret_right(),
            Action::ClearSearch => {
                self.state.clear_query();
                self.sync_search();
            }
            Action::Move(direction) => self.state.move_cursor(direction, self.view.count()),
            Action::First => self.state.cursor = 0,
            Action::Last => self.state.cursor = self.view.count().saturating_sub(1),
            Action::OpenDetails => {
                if let Some(id) = self.current().map(|d| d.id) {
                    self.view.select(id);
                }
            }
            Action::CloseDetails => self.view.clear_selection(),
            Action::ToggleFavorite => {
                if let Some(id) = self.favorite_target() {
                    // Failures are queued as notices by the controller
                    let _ = self.view.toggle_favorite(id);
                }
            }
            Action::NextCategory => self.cycle_category(true),
            Action::PreviousCategory => self.cycle_category(false),
            Action::CycleSort => self.view.set_sort(self.view.state().sort.next()),
            Action::ToggleFavoritesOnly => self.view.toggle_favorites_only(),
            Action::ToggleMode => self.view.toggle_mode(),
        }
        self.after_change();
    }

    fn favorite_target(&self) -> Option<DestinationId> {
        self.view
            .selected()
            .or_else(|| self.current())
            .map(|d| d.id)
    }

    fn sync_search(&mut self) {
        self.view.set_search(self.state.query.clone());
        self.state.cursor = 0;
    }

    /// Step through "All" followed by the dataset's categories
    fn cycle_category(&mut self, forward: bool) {
        let mut options = vec![ALL_CATEGORIES.to_string()];
        options.extend(self.view.categories());

        let current = self.view.state().criteria.category.as_str();
        let index = options.iter().position(|c| c == current).unwrap_or(0);
        let next = if forward {
            (index + 1) % options.len()
        } else {
            (index + options.len() - 1) % options.len()
        };

        self.view.set_category(CategoryFilter::from(options[next].as_str()));
        self.state.cursor = 0;
    }

    fn after_change(&mut self) {
        self.state.clamp_cursor(self.view.count());
        for notice in self.view.drain_notices() {
            self.state.push_notice(notice);
        }
    }

    /// Draw one frame
    pub fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(3), // Search bar
                Constraint::Length(1), // Filter controls
                Constraint::Min(6),    // Cards or map
                Constraint::Length(3), // Status bar
                Constraint::Length(1), // Help bar
            ])
            .split(frame.area());

        let search = SearchBar::new(&self.state.query, self.state.query_cursor, &self.theme)
            .focused(self.state.focus == Focus::Search);
        frame.render_widget(search, chunks[0]);

        let view_state = self.view.state();
        let filters = FilterBar::new(
            &view_state.criteria.category,
            view_state.sort,
            view_state.criteria.favorites_only,
            view_state.mode,
            &self.theme,
        );
        frame.render_widget(filters, chunks[1]);

        let content = chunks[2];
        self.state.columns = match view_state.mode {
            PresentationMode::Grid => columns_for(content.width.saturating_sub(2)),
            PresentationMode::Map => 1,
        };

        let loading = self.view.status() == LoadStatus::Pending;
        match view_state.mode {
            PresentationMode::Grid => {
                let placeholder = if loading {
                    "Loading destinations…"
                } else {
                    "No destinations match your filters"
                };
                let grid = CardGrid::new(
                    self.view.derived(),
                    self.view.favorites(),
                    self.state.cursor,
                    &self.theme,
                )
                .placeholder(placeholder);
                frame.render_widget(grid, content);
            }
            PresentationMode::Map => {
                let map = MapView::new(
                    self.view.derived(),
                    self.view.favorites(),
                    self.state.cursor,
                    &self.theme,
                );
                frame.render_widget(map, content);
            }
        }

        let summary = self.view.summary();
        let status = StatusBar::new(&summary, self.view.favorites_count(), &self.theme)
            .with_notice(self.state.active_message())
            .loading(loading);
        frame.render_widget(status, chunks[3]);

        let hints = if self.details_open() {
            HelpBar::details_hints()
        } else if self.state.focus == Focus::Search {
            HelpBar::search_hints()
        } else {
            HelpBar::results_hints()
        };
        frame.render_widget(HelpBar::new(&hints, &self.theme), chunks[4]);

        if let Some(dest) = self.view.selected() {
            let modal = DetailsModal::new(dest, self.view.is_favorite(dest.id), &self.theme);
            frame.render_widget(modal, frame.area());
        }
    }

    /// Apply the dataset once the load task reports back
    ///
    /// A task that ends without sending counts as a failed load.
    fn poll_load(&mut self, pending: &mut LoadReceiver) {
        if self.view.status() != LoadStatus::Pending {
            return;
        }
        match pending.try_recv() {
            Ok(result) => self.on_load(result),
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Closed) => {
                warn!("Dataset load task ended without a result");
                self.on_load(Err(LoadError::Source(
                    "load task ended without a result".to_string(),
                )));
            }
        }
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        pending: &mut LoadReceiver,
    ) -> Result<()> {
        loop {
            self.poll_load(pending);

            terminal.draw(|frame| self.render(frame))?;

            if self.state.should_quit {
                return Ok(());
            }

            if let Some(key) = poll_key(TICK)? {
                self.handle_key(key);
            }
            self.state.prune_messages();
        }
    }
}

/// Setup terminal for TUI
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(Into::into)
}

/// Cleanup terminal after TUI
fn cleanup_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Run the browser until the user quits
///
/// Favorites should already be loaded into `view`; the dataset is fetched by
/// `loader` on a background task while the UI runs.
///
/// # Errors
///
/// Returns `UiError` if stdout is not a terminal or the terminal fails.
pub async fn run<B: FavoritesBackend>(view: ViewController<B>, loader: DatasetLoader) -> Result<()> {
    if !io::stdout().is_terminal() {
        return Err(UiError::NotATerminal);
    }

    let (tx, mut rx) = oneshot::channel();
    tokio::spawn(async move {
        if tx.send(loader.load().await).is_err() {
            debug!("Browser closed before the dataset arrived");
        }
    });

    info!("Starting browser");
    let mut app = App::new(view);
    let mut terminal = setup_terminal()?;
    let result = app.event_loop(&mut terminal, &mut rx);
    cleanup_terminal()?;
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::favorites::{DEFAULT_STORAGE_KEY, FavoritesStore, MemoryBackend};
    use crate::query::SortKey;
    use crate::testing::sample_destinations;
    use crate::view::NoticeLevel;
    use ratatui::backend::TestBackend;

    fn app() -> App<MemoryBackend> {
        let mut app = App::new(ViewController::new(FavoritesStore::new(MemoryBackend::new())));
        app.on_load(Ok(sample_destinations()));
        app
    }

    fn names(app: &App<MemoryBackend>) -> Vec<&str> {
        app.view().derived().iter().map(|d| d.name.as_str()).collect()
    }

    fn pending_app() -> App<MemoryBackend> {
        App::new(ViewController::new(FavoritesStore::new(MemoryBackend::new())))
    }

    #[test]
    fn test_dataset_arrives_over_channel() {
        let mut app = pending_app();
        let (tx, mut rx) = oneshot::channel();

        app.poll_load(&mut rx);
        assert_eq!(app.view().status(), LoadStatus::Pending);

        tx.send(Ok(sample_destinations())).unwrap();
        app.poll_load(&mut rx);
        assert_eq!(app.view().status(), LoadStatus::Loaded);
        assert_eq!(app.view().count(), 3);
    }

    #[test]
    fn test_dropped_load_task_fails_the_load() {
        let mut app = pending_app();
        let (tx, mut rx) = oneshot::channel::<std::result::Result<Vec<Destination>, LoadError>>();
        drop(tx);

        app.poll_load(&mut rx);

        assert_eq!(app.view().status(), LoadStatus::Failed);
        let notice = app.state().active_message().unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.message, crate::view::LOAD_FAILED_MESSAGE);
    }

    #[test]
    fn test_typing_filters_results() {
        let mut app = app();
        app.apply(Action::FocusSearch);
        for c in "lake".chars() {
            app.apply(Action::Insert(c));
        }
        assert_eq!(names(&app), vec!["Nainital Lake"]);

        app.apply(Action::ClearSearch);
        assert_eq!(app.view().count(), 3);
    }

    #[test]
    fn test_category_cycle_wraps() {
        let mut app = app();
        app.apply(Action::NextCategory);
        assert_eq!(app.view().state().criteria.category.as_str(), "Nature");
        app.apply(Action::NextCategory);
        assert_eq!(app.view().state().criteria.category.as_str(), "Pilgrimage");
        app.apply(Action::NextCategory);
        assert_eq!(app.view().state().criteria.category, CategoryFilter::All);
        app.apply(Action::PreviousCategory);
        assert_eq!(app.view().state().criteria.category.as_str(), "Pilgrimage");
    }

    #[test]
    fn test_cycle_sort() {
        let mut app = app();
        app.apply(Action::CycleSort);
        assert_eq!(app.view().state().sort, SortKey::Rating);
        assert_eq!(names(&app)[0], "Kedarnath");
    }

    #[test]
    fn test_toggle_favorite_under_cursor() {
        let mut app = app();
        app.apply(Action::Move(Direction::Right));
        assert_eq!(app.current().map(|d| d.name.as_str()), Some("Nainital Lake"));

        app.apply(Action::ToggleFavorite);
        assert!(app.view().is_favorite(DestinationId(3)));
        let notice = app.state().active_message().unwrap();
        assert_eq!(notice.level, NoticeLevel::Success);
        assert_eq!(notice.message, "Added to favorites");
    }

    #[test]
    fn test_details_open_and_close() {
        let mut app = app();
        app.apply(Action::OpenDetails);
        assert!(app.details_open());
        assert_eq!(app.view().selected().map(|d| d.id), Some(DestinationId(2)));

        app.apply(Action::ToggleFavorite);
        assert!(app.view().is_favorite(DestinationId(2)));

        app.apply(Action::CloseDetails);
        assert!(!app.details_open());
    }

    #[test]
    fn test_favorites_only_clamps_cursor() {
        let backend = MemoryBackend::with_slot(DEFAULT_STORAGE_KEY, "[1]");
        let mut view = ViewController::new(FavoritesStore::new(backend));
        view.load_favorites();
        let mut app = App::new(view);
        app.on_load(Ok(sample_destinations()));

        app.apply(Action::Last);
        assert_eq!(app.state().cursor, 2);
        app.apply(Action::ToggleFavoritesOnly);
        assert_eq!(app.state().cursor, 0);
        assert_eq!(names(&app), vec!["Valley of Flowers"]);
    }

    #[test]
    fn test_failed_load_shows_notice() {
        let mut app = App::new(ViewController::new(FavoritesStore::new(MemoryBackend::new())));
        app.on_load(Err(LoadError::Source("offline".into())));
        assert_eq!(
            app.state().active_message().map(|n| n.message.as_str()),
            Some("Failed to load destinations data")
        );
        assert_eq!(app.view().count(), 0);
    }

    #[test]
    fn test_render_grid_and_map() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        terminal.draw(|frame| app.render(frame)).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Kedarnath"));
        assert!(text.contains("Showing 3 destinations"));
        assert_eq!(app.state().columns, 2);

        app.apply(Action::ToggleMode);
        terminal.draw(|frame| app.render(frame)).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("3 markers"));
        assert_eq!(app.state().columns, 1);
    }

    #[test]
    fn test_render_loading_state() {
        let mut app = App::new(ViewController::new(FavoritesStore::new(MemoryBackend::new())));
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Loading destinations"));
    }
}
