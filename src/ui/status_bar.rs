use crate::app::state::*;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut parts: Vec<Span> = Vec::new();

    match &state.status {
        Some(status) if status.is_error => {
            parts.push(Span::styled(format!(" {} ", status.text), Theme::status_error()));
        }
        Some(status) => {
            parts.push(Span::styled(format!(" {} ", status.text), Theme::status_bar()));
        }
        None => {
            let running = state.kernels.list().rows().len();
            parts.push(Span::styled(
                format!(" Running: {} ", running),
                Theme::status_bar(),
            ));
        }
    }

    let focus_name = match state.focus {
        FocusPanel::Menu => "MENU",
        FocusPanel::Running => "RUNNING",
        FocusPanel::Files => "FILES",
        FocusPanel::Prompt => "PROMPT",
    };
    // Pad to fill remaining space
    let used: usize = parts.iter().map(|s| s.content.width()).sum();
    let remaining = (area.width as usize).saturating_sub(used + focus_name.len() + 3);
    parts.push(Span::styled(" ".repeat(remaining), Theme::status_bar()));
    parts.push(Span::styled(
        format!(" [{}] ", focus_name),
        Style::default().fg(Theme::ACCENT_TEAL).bg(Theme::BORDER_DIM),
    ));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
