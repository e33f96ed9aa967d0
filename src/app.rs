use serde::{Deserialize, Serialize};

use crate::model::Recommendation;
use crate::sort::{self, SortConfig, SortKey};

pub const PROMPT_MESSAGE: &str = "Enter a search term and press Enter to find solutions.";
pub const NO_RESULTS_MESSAGE: &str = "No results found. Try a different search term.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Focus {
    #[default]
    Input,
    Results,
}

/// A search that has been started and is waiting for its response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub id: u64,
    pub query: String,
}

pub struct App {
    pub focus: Focus,
    pub should_quit: bool,

    // Search box
    pub query: String,

    // Results
    pub results: Vec<Recommendation>,
    pub sort: SortConfig,
    pub expanded: Option<usize>, // Position in the displayed order
    pub selected: usize,         // Cursor, also a displayed position

    // Request lifecycle
    pub loading: bool,
    pub error: Option<String>,
    pub search_generation: u64,

    // UI State
    pub status_message: String,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            focus: Focus::Input,
            should_quit: false,

            query: String::new(),

            results: Vec::new(),
            sort: SortConfig::default(),
            expanded: None,
            selected: 0,

            loading: false,
            error: None,
            search_generation: 0,

            status_message: "Ready".to_string(),
        }
    }

    pub fn next_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Input => Focus::Results,
            Focus::Results => Focus::Input,
        };
    }

    /// Whether the search action is enabled.
    pub fn can_search(&self) -> bool {
        !self.loading && !self.query.trim().is_empty()
    }

    /// search-start: clears the previous error, then marks the view loading.
    ///
    /// Returns `None` (and changes nothing) when the action is disabled.
    pub fn begin_search(&mut self) -> Option<SearchRequest> {
        if !self.can_search() {
            return None;
        }

        self.error = None;
        self.loading = true;
        self.search_generation += 1;
        self.status_message = "Searching...".to_string();

        Some(SearchRequest {
            id: self.search_generation,
            query: self.query.clone(),
        })
    }

    /// Responses to anything but the latest request are stale.
    pub fn is_current(&self, id: u64) -> bool {
        id == self.search_generation
    }

    /// search-success: replaces the result set wholesale.
    pub fn complete_search(&mut self, id: u64, results: Vec<Recommendation>) -> bool {
        if !self.is_current(id) {
            log::debug!("Discarding stale search response {id}");
            return false;
        }

        let count = results.len();
        self.results = results;
        self.error = None;
        self.reset_view_position();
        self.loading = false;
        self.status_message = format!("Found {count} results");
        true
    }

    /// search-failure: keeps the query, drops stale results.
    pub fn fail_search(&mut self, id: u64, message: String) -> bool {
        if !self.is_current(id) {
            log::debug!("Discarding stale search failure {id}");
            return false;
        }

        self.results.clear();
        self.error = Some(message);
        self.reset_view_position();
        self.loading = false;
        self.status_message = "Search failed".to_string();
        true
    }

    fn reset_view_position(&mut self) {
        self.expanded = None;
        self.selected = 0;
    }

    /// sort-toggle
    pub fn toggle_sort(&mut self, key: SortKey) {
        self.sort = self.sort.toggled(key);
        self.status_message = format!(
            "Sorted by {} ({:?})",
            key.field_name(),
            self.sort.direction
        );
    }

    /// expand-toggle: at most one row is open at a time.
    pub fn toggle_expand(&mut self, index: usize) {
        if index >= self.results.len() {
            return;
        }

        self.expanded = if self.expanded == Some(index) {
            None
        } else {
            Some(index)
        };
    }

    pub fn toggle_selected(&mut self) {
        self.toggle_expand(self.selected);
    }

    /// Results in display order. Never reorders `self.results`.
    pub fn displayed(&self) -> Vec<&Recommendation> {
        sort::sorted(&self.results, self.sort)
    }

    pub fn displayed_item(&self, index: usize) -> Option<&Recommendation> {
        sort::sorted_indices(&self.results, self.sort)
            .get(index)
            .map(|&original| &self.results[original])
    }

    pub fn expanded_item(&self) -> Option<&Recommendation> {
        self.expanded.and_then(|index| self.displayed_item(index))
    }

    pub fn select_next(&mut self) -> bool {
        if self.selected + 1 < self.results.len() {
            self.selected += 1;
            true
        } else {
            false
        }
    }

    pub fn select_previous(&mut self) -> bool {
        if self.selected > 0 {
            self.selected -= 1;
            true
        } else {
            false
        }
    }

    /// URL the "visit" action opens for the row at `index`, if any.
    pub fn visit_target(&self, index: usize) -> Option<String> {
        self.displayed_item(index)
            .and_then(Recommendation::visit_url)
            .map(str::to_string)
    }

    /// URL of download `number` (1-based) of the expanded row.
    pub fn download_target(&self, number: usize) -> Option<String> {
        let downloads = self.expanded_item()?.visible_downloads()?;
        number
            .checked_sub(1)
            .and_then(|i| downloads.get(i))
            .map(|download| download.url.clone())
    }

    /// Placeholder text shown instead of the table, if any.
    pub fn empty_state_message(&self) -> Option<&'static str> {
        if !self.results.is_empty() || self.loading {
            return None;
        }

        if self.query.trim().is_empty() {
            Some(PROMPT_MESSAGE)
        } else {
            Some(NO_RESULTS_MESSAGE)
        }
    }

    pub fn from_test_config(config: &crate::test_config::TestConfig) -> Self {
        let mut app = Self {
            focus: config.focus,
            should_quit: false,

            query: config.query.clone(),

            results: config.results.clone(),
            sort: config.sort,
            expanded: None,
            selected: 0,

            loading: config.loading,
            error: config.error.clone(),
            search_generation: config.search_generation,

            status_message: config.status_message.clone(),
        };

        if let Some(index) = config.expanded_index {
            if index < app.results.len() {
                app.expanded = Some(index);
            }
        }

        if config.selected_index < app.results.len() {
            app.selected = config.selected_index;
        }

        app
    }
}
