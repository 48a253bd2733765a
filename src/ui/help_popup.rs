use crate::app::event::Overlay;
use crate::app::state::AppState;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

const SHORTCUTS: &[(&str, &str)] = &[
    ("←/→", "Switch menu, or leave/enter a submenu"),
    ("↑/↓", "Move within a menu or the running list"),
    ("Enter", "Open the menu or click the selected entry"),
    ("Esc", "Close the menu or submenu"),
    ("Tab", "Cycle between menubar, running list and files"),
    (":", "Run a notebook command by name, e.g. :register-preset Tags"),
    ("/", "Filter the focused list"),
    ("q / Ctrl+C", "Quit"),
];

const TOUR: &[&str] = &[
    "The menubar sits at the top. Every entry either runs a named command or",
    "performs a notebook action such as saving, trusting or exporting.",
    "",
    "File > Revert to Checkpoint lists the checkpoints taken on each save.",
    "View > Cell Toolbar picks the active toolbar preset.",
    "Help lists reference links for the running kernel's language.",
    "",
    "The Running panel shows every live session with its kernel. Shutdown",
    "asks the server to stop it; the row goes away on the next refresh.",
];

pub fn render(frame: &mut Frame, state: &AppState) {
    let Some(overlay) = &state.overlay else {
        return;
    };
    if let Overlay::ConfirmRestore { label, .. } = overlay {
        render_confirm(frame, label);
        return;
    }

    let area = frame.area();
    let popup_w = (area.width * 60 / 100).max(50).min(area.width.saturating_sub(4));
    let popup_h = (area.height * 60 / 100).max(12).min(area.height.saturating_sub(2));
    let popup_x = (area.width.saturating_sub(popup_w)) / 2;
    let popup_y = (area.height.saturating_sub(popup_h)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_w, popup_h);

    frame.render_widget(Clear, popup_area);

    let (title, lines) = match overlay {
        Overlay::Tour => (" User Interface Tour ", tour_lines()),
        Overlay::KeyboardShortcuts => (" Keyboard Shortcuts ", shortcut_lines()),
        Overlay::About => (" About ", about_lines(state)),
        Overlay::ConfirmRestore { .. } => return,
    };

    let block = Block::default()
        .title(title)
        .title_style(Theme::title())
        .title_bottom(Line::from(Span::styled(" Esc to close ", Theme::key_hint())))
        .borders(Borders::ALL)
        .border_type(Theme::border_type_focused())
        .border_style(Style::default().fg(Theme::ACCENT_LAVENDER))
        .style(Style::default().bg(Theme::BG_SURFACE));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, popup_area);
}

fn render_confirm(frame: &mut Frame, label: &str) {
    let area = frame.area();
    let popup_w = 64u16.min(area.width.saturating_sub(4));
    let popup_h = 7u16.min(area.height);
    let popup_area = Rect::new(
        area.width.saturating_sub(popup_w) / 2,
        area.height.saturating_sub(popup_h) / 2,
        popup_w,
        popup_h,
    );
    frame.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from(" Are you sure you want to revert the notebook to the"),
        Line::from(" checkpoint? This cannot be undone."),
        Line::default(),
        Line::from(vec![
            Span::styled(" Checkpoint taken at: ", Style::default().fg(Theme::TEXT_SECONDARY)),
            Span::styled(label.to_string(), Theme::title()),
        ]),
    ];
    let block = Block::default()
        .title(" Revert notebook to checkpoint ")
        .title_style(Theme::title())
        .title_bottom(Line::from(Span::styled(" y to revert, n to cancel ", Theme::key_hint())))
        .borders(Borders::ALL)
        .border_type(Theme::border_type_focused())
        .border_style(Style::default().fg(Theme::ACCENT_RED))
        .style(Style::default().bg(Theme::BG_SURFACE));
    frame.render_widget(Paragraph::new(lines).block(block), popup_area);
}

fn tour_lines() -> Vec<Line<'static>> {
    TOUR.iter()
        .map(|l| Line::from(Span::styled(format!(" {}", l), Theme::menu_item())))
        .collect()
}

fn shortcut_lines() -> Vec<Line<'static>> {
    SHORTCUTS
        .iter()
        .map(|(keys, what)| {
            Line::from(vec![
                Span::styled(format!(" {:<12}", keys), Theme::key_hint()),
                Span::styled(*what, Style::default().fg(Theme::TEXT_SECONDARY)),
            ])
        })
        .collect()
}

fn about_lines(state: &AppState) -> Vec<Line<'static>> {
    let server = &state.config.server;
    vec![
        Line::from(Span::styled(
            format!(" {} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            Theme::title(),
        )),
        Line::from(Span::styled(
            format!(" {}", env!("CARGO_PKG_DESCRIPTION")),
            Style::default().fg(Theme::TEXT_SECONDARY),
        )),
        Line::default(),
        Line::from(format!(" Server:   {}{}", server.origin, server.base_url)),
        Line::from(format!(" Notebook: {}", server.notebook_path)),
        Line::from(format!(" Running:  {}", state.kernels.list().rows().len())),
        Line::from(format!(" Files:    {}", state.files.list().rows().len())),
    ]
}
