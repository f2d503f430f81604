// TUI application state
//
// Holds the list cursor, the last selection observed from the session, and
// transient UI state (toast, quit flag). The selection itself lives in the
// session task; `selection` here is only a copy used for rendering.

use super::toast::Toast;
use crate::catalog::{Catalog, LocalityRecord};
use crate::config::ExportConfig;
use crate::logging::LogBuffer;
use crate::selection::SelectionState;
use std::sync::Arc;
use std::time::Instant;

/// Main application state for the TUI
pub struct App {
    pub catalog: Arc<Catalog>,

    /// Index of the highlighted row in the list (catalog order)
    pub cursor: usize,

    /// Scroll offset for the list
    pub scroll_offset: usize,

    /// Latest selection published by the session
    pub selection: SelectionState,

    pub log_buffer: LogBuffer,

    pub toast: Option<Toast>,

    pub should_quit: bool,

    /// When the app started (for uptime display)
    pub start_time: Instant,

    /// Where the web view is reachable
    pub web_url: String,

    pub export: ExportConfig,
}

impl App {
    pub fn new(
        catalog: Arc<Catalog>,
        selection: SelectionState,
        log_buffer: LogBuffer,
        web_url: String,
        export: ExportConfig,
    ) -> Self {
        let mut app = Self {
            catalog,
            cursor: 0,
            scroll_offset: 0,
            selection: SelectionState::default(),
            log_buffer,
            toast: None,
            should_quit: false,
            start_time: Instant::now(),
            web_url,
            export,
        };
        app.apply_selection(selection);
        app
    }

    /// Record under the cursor
    pub fn cursor_record(&self) -> Option<&LocalityRecord> {
        self.catalog.records().get(self.cursor)
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.catalog.len() {
            self.cursor += 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.catalog.len().saturating_sub(1);
    }

    /// Take a new selection from the session and move the cursor onto it
    pub fn apply_selection(&mut self, selection: SelectionState) {
        if let Some(idx) = selection
            .selected_id()
            .and_then(|id| self.catalog.position(id))
        {
            self.cursor = idx;
        }
        self.selection = selection;
    }

    pub fn is_selected(&self, record: &LocalityRecord) -> bool {
        self.selection.selected_id() == Some(record.id.as_str())
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    /// Called on every tick
    pub fn on_tick(&mut self) {
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    /// Get uptime as formatted string
    pub fn uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
    }

    /// Get the range of visible rows for a list of `height` rows
    ///
    /// Keeps the cursor on screen and remembers the offset between frames.
    pub fn visible_range(&mut self, height: usize) -> (usize, usize) {
        let total = self.catalog.len();
        if total == 0 || height == 0 {
            return (0, 0);
        }

        if self.cursor >= self.scroll_offset + height {
            self.scroll_offset = self.cursor + 1 - height;
        } else if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        }
        // No blank rows below the last record
        self.scroll_offset = self.scroll_offset.min(total.saturating_sub(height));

        let start = self.scroll_offset;
        let end = (start + height).min(total);
        (start, end)
    }
}
