use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub menubar: Rect,
    pub running: Rect,
    pub files: Rect,
    pub prompt: Rect,
    pub status_bar: Rect,
}

pub fn compute_layout(area: Rect) -> AppLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Menubar
            Constraint::Min(5),    // Running sessions | files
            Constraint::Length(3), // Command prompt
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    AppLayout {
        menubar: chunks[0],
        running: body[0],
        files: body[1],
        prompt: chunks[2],
        status_bar: chunks[3],
    }
}

/// Rectangle of at most `width` x `height` anchored at (`x`, `y`), shifted
/// left and up as needed to stay inside `bounds`.
pub fn anchored(bounds: Rect, x: u16, y: u16, width: u16, height: u16) -> Rect {
    let width = width.min(bounds.width);
    let height = height.min(bounds.height.saturating_sub(y.saturating_sub(bounds.y)));
    let x = x.min(bounds.right().saturating_sub(width));
    Rect::new(x, y, width, height)
}
