use crate::app::state::*;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::block::Padding;
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.focus == FocusPanel::Prompt;
    let (border_style, border_type, bg) = if focused {
        (
            Theme::border_focused(),
            Theme::border_type_focused(),
            Theme::panel_bg_focused(),
        )
    } else {
        (Theme::border(), Theme::border_type(), Theme::panel_bg())
    };

    let (title, chevron) = match state.prompt_mode {
        PromptMode::Command => (" Command ", ": "),
        PromptMode::Filter => (" Filter ", "/ "),
    };

    let block = Block::default()
        .title(title)
        .title_style(if focused { Theme::title() } else { Theme::border() })
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style)
        .padding(Padding::horizontal(1))
        .style(bg);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if focused {
        let line = Line::from(vec![
            Span::styled(chevron, Style::default().fg(Theme::ACCENT_TEAL)),
            Span::styled(state.prompt.text.as_str(), Theme::input_text()),
        ]);
        frame.render_widget(Paragraph::new(line), inner);

        let before_cursor = state.prompt.text[..state.prompt.cursor].width() as u16;
        let cursor_x = inner.x + chevron.len() as u16 + before_cursor;
        frame.set_cursor_position((cursor_x.min(inner.right().saturating_sub(1)), inner.y));
    } else {
        let hint = Line::from(vec![
            Span::styled(":", Theme::key_hint()),
            Span::styled(" command  ", Style::default().fg(Theme::TEXT_MUTED)),
            Span::styled("Tab", Theme::key_hint()),
            Span::styled(" switch panel  ", Style::default().fg(Theme::TEXT_MUTED)),
            Span::styled("/", Theme::key_hint()),
            Span::styled(" filter running  ", Style::default().fg(Theme::TEXT_MUTED)),
            Span::styled("q", Theme::key_hint()),
            Span::styled(" quit", Style::default().fg(Theme::TEXT_MUTED)),
        ]);
        frame.render_widget(Paragraph::new(hint), inner);
    }
}
