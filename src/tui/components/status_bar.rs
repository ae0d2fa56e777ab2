// Status bar component
//
// Left: symbol, data source, sort state, fetch spinner. Right: key hints.
// A warning or error logged in the last few seconds replaces the hints.

use crate::logging::LogLevel;
use crate::tui::app::App;
use chrono::{TimeDelta, Utc};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const HINTS: &str = "←/→ column · enter sort · 1-9 sort # · n/p page · r refresh · y copy · q quit";
const HINTS_COMPACT: &str = "enter sort · n/p page · q quit";

/// How long a warning or error stays in the status bar
const PROBLEM_SECS: i64 = 10;

/// Below this width the hints are shortened
const COMPACT_WIDTH: u16 = 100;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let recent_problem = app.log_buffer.latest_problem().filter(|entry| {
        Utc::now().signed_duration_since(entry.timestamp) < TimeDelta::seconds(PROBLEM_SECS)
    });

    let right_line = match recent_problem {
        Some(entry) => {
            let color = match entry.level {
                LogLevel::Error => theme.error,
                _ => theme.warning,
            };
            Line::from(Span::styled(
                format!("{} {} ", entry.level.as_str(), entry.message),
                Style::default().fg(color),
            ))
        }
        None if area.width < COMPACT_WIDTH => Line::from(HINTS_COMPACT),
        None => Line::from(HINTS),
    };

    let right_width = u16::try_from(right_line.width()).unwrap_or(u16::MAX);
    let [left, right] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(right_width)]).areas(inner);

    f.render_widget(
        Paragraph::new(summary(app)).style(Style::default().fg(theme.status_bar)),
        left,
    );
    f.render_widget(Paragraph::new(right_line), right);
}

/// e.g. " SPY @ demo · sorted by Strike ↑ · / fetching"
pub fn summary(app: &App) -> String {
    let mut parts = vec![format!(" {} @ {}", app.symbol, app.source_label)];

    if let Some(sort) = &app.state.sort {
        let label = app
            .props
            .columns
            .iter()
            .find(|c| c.key == sort.key)
            .map_or(sort.key.as_str(), |c| c.header.as_str());
        parts.push(format!("sorted by {} {}", label, sort.direction.indicator()));
    }

    if app.loading {
        parts.push(format!("{} fetching", app.spinner_char()));
    }

    parts.join(" · ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::demo_gamma;
    use crate::logging::LogBuffer;
    use crate::source::gamma_table;
    use crate::table::{SortDirective, TableState};

    #[test]
    fn summary_mentions_sort_and_fetch() {
        let props = gamma_table(&demo_gamma("SPY"), 10).unwrap();
        let state = TableState {
            sort: Some(SortDirective::descending("zerogex")),
            current_page: 1,
        };
        let mut app = App::new("SPY", "demo", props, state, LogBuffer::new());
        assert_eq!(summary(&app), " SPY @ demo · sorted by Zero GEX ↓");

        app.begin_fetch();
        assert!(summary(&app).ends_with("fetching"));
    }
}
