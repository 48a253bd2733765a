use crate::app::state::*;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

const PLACEHOLDER: &str = "There are no notebooks running.";

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.focus == FocusPanel::Running
        || (state.focus == FocusPanel::Prompt
            && state.prompt_mode == PromptMode::Filter
            && state.filter_panel == FocusPanel::Running);
    let (border_style, border_type, bg) = if focused {
        (
            Theme::border_focused(),
            Theme::border_type_focused(),
            Theme::panel_bg_focused(),
        )
    } else {
        (Theme::border(), Theme::border_type(), Theme::panel_bg())
    };

    let list = state.kernels.list();
    let visible = list.visible();

    let mut block = Block::default()
        .title(panel_title(list.element_name(), list.rows().len(), list.filter()))
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style)
        .style(bg);
    let error = state.kernels.error().map(|e| format!(" Cannot list sessions: {} ", e));
    if let Some(text) = &error {
        block = block.title_bottom(Line::from(Span::styled(text.clone(), Theme::status_error())));
    }

    let items: Vec<ListItem> = if !state.kernels.is_ready() {
        vec![ListItem::new(Span::styled(
            " Loading sessions...",
            Style::default().fg(Theme::TEXT_MUTED),
        ))]
    } else if let (Some(text), true) = (&error, list.rows().is_empty()) {
        vec![ListItem::new(Span::styled(
            text.clone(),
            Style::default().fg(Theme::ACCENT_RED),
        ))]
    } else if state.kernels.placeholder_visible() {
        vec![ListItem::new(Span::styled(
            format!(" {}", PLACEHOLDER),
            Style::default().fg(Theme::TEXT_MUTED),
        ))]
    } else {
        let name_w = (area.width as usize).saturating_sub(32).max(12);
        visible
            .iter()
            .map(|row| {
                let name = row.entry.as_ref().map(|e| e.path.as_str()).unwrap_or("");
                let mut spans = vec![Span::styled(
                    format!(" {:<w$}", name, w = name_w),
                    Theme::menu_item(),
                )];
                for label in &row.labels {
                    spans.push(Span::styled(format!(" {:<14}", label), Theme::kernel_name()));
                }
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

/// `" Running (3) "`, with the active filter appended.
pub(super) fn panel_title(element_name: &str, count: usize, filter: &str) -> String {
    let mut chars = element_name.chars();
    let name: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    let mut title = format!(" {} ({}) ", name, count);
    if !filter.is_empty() {
        title.push_str(&format!("filter: {} ", filter));
    }
    title
}
