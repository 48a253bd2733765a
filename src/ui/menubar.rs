use crate::app::state::*;
use crate::menu::{ItemKind, MenuItem};
use crate::ui::layout::anchored;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

/// Horizontal padding around each menu title.
const TITLE_PAD: u16 = 2;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.focus == FocusPanel::Menu;
    let mut spans: Vec<Span> = vec![Span::styled(" ", Theme::menubar())];
    for (i, menu) in state.menubar.tree().menus.iter().enumerate() {
        let style = if focused && i == state.cursor.menu {
            Theme::menu_title_active()
        } else {
            Theme::menubar()
        };
        spans.push(Span::styled(format!(" {} ", menu.title), style));
    }
    let title = format!(" {} ", state.config.server.notebook_path);
    let used: usize = spans.iter().map(|s| s.content.width()).sum();
    let remaining = (area.width as usize).saturating_sub(used + title.width());
    spans.push(Span::styled(" ".repeat(remaining), Theme::menubar()));
    spans.push(Span::styled(title, Theme::menubar().fg(Theme::TEXT_SECONDARY)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draw the open dropdown and every submenu along the cursor path.
pub fn render_dropdown(frame: &mut Frame, menubar_area: Rect, state: &AppState) {
    if !state.cursor.open {
        return;
    }
    let bounds = frame.area();
    let mut x = menubar_area.x + 1 + title_offset(state);
    let mut y = menubar_area.y + 1;

    for depth in 0..state.cursor.path.len().max(1) {
        let items = state.items_at(depth);
        if items.is_empty() {
            break;
        }
        let selected = state.cursor.path.get(depth).copied();
        let width = items.iter().map(item_width).max().unwrap_or(0) as u16 + 4;
        let popup = anchored(bounds, x, y, width, items.len() as u16 + 2);
        render_items(frame, popup, items, selected);

        // The next level opens beside the selected row.
        x = popup.right();
        y = popup.y + selected.unwrap_or(0) as u16;
    }
}

fn render_items(frame: &mut Frame, area: Rect, items: &[MenuItem], selected: Option<usize>) {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(Theme::border_type_focused())
        .border_style(Theme::border_focused())
        .style(Style::default().bg(Theme::BG_SURFACE));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            if item.is_divider() {
                return Line::from(Span::styled(
                    "─".repeat(inner.width as usize),
                    Style::default().fg(Theme::BORDER_DIM),
                ));
            }
            let style = if Some(i) == selected {
                Theme::menu_item_selected()
            } else if item.disabled {
                Theme::menu_item_disabled()
            } else {
                Theme::menu_item()
            };
            let arrow = if item.kind == ItemKind::Submenu { "▸" } else { " " };
            let label_w = (inner.width as usize).saturating_sub(2);
            Line::from(Span::styled(
                format!(" {:<w$}{}", item.label, arrow, w = label_w),
                style,
            ))
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn item_width(item: &MenuItem) -> usize {
    item.label.width() + 2
}

/// Column where the highlighted menu title starts.
fn title_offset(state: &AppState) -> u16 {
    state
        .menubar
        .tree()
        .menus
        .iter()
        .take(state.cursor.menu)
        .map(|m| m.title.width() as u16 + TITLE_PAD)
        .sum()
}
