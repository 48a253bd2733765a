use crate::app::state::*;
use crate::tree::EntryKind;
use crate::ui::running_list::panel_title;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.focus == FocusPanel::Files
        || (state.focus == FocusPanel::Prompt
            && state.prompt_mode == PromptMode::Filter
            && state.filter_panel == FocusPanel::Files);
    let (border_style, border_type, bg) = if focused {
        (
            Theme::border_focused(),
            Theme::border_type_focused(),
            Theme::panel_bg_focused(),
        )
    } else {
        (Theme::border(), Theme::border_type(), Theme::panel_bg())
    };

    let list = state.files.list();
    let visible = list.visible();
    let block = Block::default()
        .title(panel_title(list.element_name(), list.rows().len(), list.filter()))
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style)
        .style(bg);

    let items: Vec<ListItem> = if !state.files.is_loaded() {
        vec![ListItem::new(Span::styled(
            " Loading files...",
            Style::default().fg(Theme::TEXT_MUTED),
        ))]
    } else {
        visible
            .iter()
            .filter_map(|row| row.entry.as_ref().map(|entry| (row, entry)))
            .map(|(row, entry)| {
                let (name, style) = match entry.kind {
                    EntryKind::Directory => (format!(" {}/", entry.name), Theme::kernel_name()),
                    EntryKind::Notebook => (format!(" {}", entry.name), Theme::menu_item()),
                    EntryKind::File => (
                        format!(" {}", entry.name),
                        Style::default().fg(Theme::TEXT_SECONDARY),
                    ),
                };
                let mut spans = vec![Span::styled(name, style)];
                for button in &row.buttons {
                    spans.push(Span::styled(format!(" [{}]", button.label), Theme::button()));
                }
                ListItem::new(Line::from(spans))
            })
            .collect()
    };

    let list_widget = List::new(items)
        .block(block)
        .highlight_style(Theme::menu_item_selected());
    let mut list_state = ListState::default();
    if focused && !visible.is_empty() {
        list_state.select(Some(list.selected()));
    }
    frame.render_stateful_widget(list_widget, area, &mut list_state);
}
