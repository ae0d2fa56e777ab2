// Frame layout: table panel above a two-line status bar, toast on top

use super::app::App;
use super::components::{status_bar, table_panel};
use ratatui::{
    layout::{Constraint, Layout},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();
    let [table_area, status_area] =
        Layout::vertical([Constraint::Min(5), Constraint::Length(2)]).areas(area);

    table_panel::render(f, table_area, app);
    status_bar::render(f, status_area, app);

    if let Some(toast) = &app.toast {
        toast.render(f, area, &app.theme);
    }
}
