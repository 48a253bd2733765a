mod file_list;
mod help_popup;
mod input_box;
mod layout;
mod menubar;
mod running_list;
mod status_bar;
mod theme;

use crate::app::state::AppState;
use ratatui::prelude::*;

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let app_layout = layout::compute_layout(area);

    menubar::render(frame, app_layout.menubar, state);
    running_list::render(frame, app_layout.running, state);
    file_list::render(frame, app_layout.files, state);
    input_box::render(frame, app_layout.prompt, state);
    status_bar::render(frame, app_layout.status_bar, state);

    // Popups last so they draw over the panels
    menubar::render_dropdown(frame, app_layout.menubar, state);
    help_popup::render(frame, state);
}
