// TUI application state
//
// Holds the table props and transition state plus the UI-only bits around
// them: column cursor, in-flight fetch flag, toast. Key actions are turned
// into table events here; side effects (fetching, clipboard) are returned to
// the event loop as `Effect`s so this module stays synchronous.

use super::components::Toast;
use super::input::Action;
use super::theme::Theme;
use crate::api::{transform_gamma_data_for_table, ApiError, DealerGammaResponse};
use crate::logging::LogBuffer;
use crate::source::table_title;
use crate::table::{TableEvent, TableProps, TableState, TableView};

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

/// Work the event loop performs on behalf of the app
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Fetch(String),
    Copy(String),
}

pub struct App {
    pub props: TableProps,
    pub state: TableState,
    /// Column under the cursor
    pub selected_column: usize,
    pub symbol: String,
    pub source_label: String,
    /// A fetch is in flight
    pub loading: bool,
    pub toast: Option<Toast>,
    pub log_buffer: LogBuffer,
    pub theme: Theme,
    pub should_quit: bool,
    spinner_frame: usize,
}

impl App {
    pub fn new(
        symbol: impl Into<String>,
        source_label: impl Into<String>,
        props: TableProps,
        state: TableState,
        log_buffer: LogBuffer,
    ) -> Self {
        // Start the cursor on the sorted column if there is one
        let selected_column = state
            .sort
            .as_ref()
            .and_then(|s| props.columns.iter().position(|c| c.key == s.key))
            .unwrap_or(0);

        Self {
            props,
            state,
            selected_column,
            symbol: symbol.into(),
            source_label: source_label.into(),
            loading: false,
            toast: None,
            log_buffer,
            theme: Theme::default(),
            should_quit: false,
            spinner_frame: 0,
        }
    }

    /// Key of the column under the cursor
    pub fn selected_key(&self) -> Option<&str> {
        self.props
            .columns
            .get(self.selected_column)
            .map(|c| c.key.as_str())
    }

    pub fn view(&self) -> TableView {
        TableView::project(&self.props, &self.state)
    }

    /// Apply a key action, returning any work for the event loop
    pub fn handle(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::SelectPreviousColumn => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            Action::SelectNextColumn => {
                let last = self.props.columns.len().saturating_sub(1);
                self.selected_column = (self.selected_column + 1).min(last);
            }
            Action::SortSelected => self.sort_column(self.selected_column),
            Action::SortColumn(index) => {
                if index < self.props.columns.len() {
                    self.selected_column = index;
                    self.sort_column(index);
                }
            }
            Action::NextPage => self.dispatch(TableEvent::NextPage),
            Action::PreviousPage => self.dispatch(TableEvent::PreviousPage),
            Action::FirstPage => self.dispatch(TableEvent::FirstPage),
            Action::LastPage => self.dispatch(TableEvent::LastPage),
            Action::Refresh => return self.begin_fetch(),
            Action::Copy => {
                let view = self.view();
                if view.rows.is_empty() {
                    self.show_toast("Nothing to copy");
                    return None;
                }
                return Some(Effect::Copy(view.to_tsv()));
            }
            Action::Quit => self.should_quit = true,
        }
        None
    }

    fn dispatch(&mut self, event: TableEvent) {
        self.state.update(&event, &self.props);
    }

    fn sort_column(&mut self, index: usize) {
        let Some(column) = self.props.columns.get(index) else {
            return;
        };
        if !column.sortable {
            let message = format!("{} is not sortable", column.header);
            self.show_toast(message);
            return;
        }
        let key = column.key.clone();
        self.dispatch(TableEvent::Sort(key));
    }

    /// Start a fetch unless one is already running
    pub fn begin_fetch(&mut self) -> Option<Effect> {
        if self.loading {
            tracing::debug!("Refresh ignored, fetch already in flight");
            return None;
        }
        self.loading = true;
        Some(Effect::Fetch(self.symbol.clone()))
    }

    /// Install the result of a fetch started by [`App::begin_fetch`]
    ///
    /// Sort and page survive a refresh; the page is clamped if the new curve
    /// is shorter.
    pub fn finish_fetch(&mut self, result: Result<DealerGammaResponse, ApiError>) {
        self.loading = false;
        match result {
            Ok(response) => {
                self.props.data = transform_gamma_data_for_table(&response);
                self.props.title = Some(table_title(&response));
                let page = self.state.current_page;
                self.dispatch(TableEvent::GoToPage(page));
                self.show_toast(format!("Loaded {} rows", self.props.data.len()));
            }
            Err(e) => {
                tracing::error!("Failed to fetch dealer gamma for {}: {}", self.symbol, e);
                match e.status() {
                    Some(status) => self.show_toast(format!("Fetch failed (HTTP {})", status)),
                    None => self.show_toast("Fetch failed"),
                }
            }
        }
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    /// Advance the spinner and expire the toast
    pub fn tick(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER.len();
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    pub fn spinner_char(&self) -> char {
        SPINNER[self.spinner_frame]
    }
}
