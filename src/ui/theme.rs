use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

pub struct Theme;

impl Theme {
    pub const BG_DARK: Color = Color::Rgb(24, 24, 32);
    pub const BG_SURFACE: Color = Color::Rgb(34, 34, 46);
    pub const BORDER_DIM: Color = Color::Rgb(70, 70, 90);
    pub const TEXT_PRIMARY: Color = Color::Rgb(220, 220, 230);
    pub const TEXT_SECONDARY: Color = Color::Rgb(160, 160, 180);
    pub const TEXT_MUTED: Color = Color::Rgb(110, 110, 130);
    pub const ACCENT_TEAL: Color = Color::Rgb(80, 200, 190);
    pub const ACCENT_AMBER: Color = Color::Rgb(240, 180, 80);
    pub const ACCENT_LAVENDER: Color = Color::Rgb(170, 150, 240);
    pub const ACCENT_RED: Color = Color::Rgb(230, 90, 90);

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER_DIM)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Self::ACCENT_TEAL)
    }

    pub fn border_type() -> BorderType {
        BorderType::Plain
    }

    pub fn border_type_focused() -> BorderType {
        BorderType::Rounded
    }

    pub fn panel_bg() -> Style {
        Style::default().bg(Self::BG_DARK)
    }

    pub fn panel_bg_focused() -> Style {
        Style::default().bg(Self::BG_SURFACE)
    }

    pub fn title() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY).add_modifier(Modifier::BOLD)
    }

    pub fn key_hint() -> Style {
        Style::default().fg(Self::ACCENT_AMBER).add_modifier(Modifier::BOLD)
    }

    pub fn menubar() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY).bg(Self::BG_SURFACE)
    }

    pub fn menu_title_active() -> Style {
        Style::default()
            .fg(Self::BG_DARK)
            .bg(Self::ACCENT_TEAL)
            .add_modifier(Modifier::BOLD)
    }

    pub fn menu_item() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    pub fn menu_item_disabled() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    pub fn menu_item_selected() -> Style {
        Style::default()
            .fg(Self::BG_DARK)
            .bg(Self::ACCENT_LAVENDER)
            .add_modifier(Modifier::BOLD)
    }

    pub fn kernel_name() -> Style {
        Style::default().fg(Self::ACCENT_LAVENDER)
    }

    pub fn button() -> Style {
        Style::default().fg(Self::ACCENT_RED)
    }

    pub fn input_text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY).bg(Self::BORDER_DIM)
    }

    pub fn status_error() -> Style {
        Style::default()
            .fg(Color::White)
            .bg(Self::ACCENT_RED)
            .add_modifier(Modifier::BOLD)
    }
}
