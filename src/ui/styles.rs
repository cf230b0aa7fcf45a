// Allow dead code: Style functions defined for consistent UI
#![allow(dead_code)]

use ratatui::style::{Color, Modifier, Style};

use crate::models::{MediaKind, Platform, PostStatus};

// Color palette
pub const PRIMARY: Color = Color::Rgb(96, 112, 208);
pub const SECONDARY: Color = Color::Rgb(96, 176, 112);
pub const ACCENT: Color = Color::Rgb(208, 160, 64);
pub const ERROR: Color = Color::Rgb(208, 72, 72);
pub const MUTED: Color = Color::Rgb(128, 128, 128);
pub const HIGHLIGHT: Color = Color::Rgb(48, 48, 72);

// Styles
pub fn title_style() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn selected_style() -> Style {
    Style::default()
        .bg(HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

pub fn list_item_style() -> Style {
    Style::default().fg(Color::White)
}

pub fn muted_style() -> Style {
    Style::default().fg(MUTED)
}

pub fn highlight_style() -> Style {
    Style::default().fg(ACCENT)
}

pub fn success_style() -> Style {
    Style::default().fg(SECONDARY)
}

pub fn error_style() -> Style {
    Style::default().fg(ERROR)
}

pub fn tab_style(selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(PRIMARY)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        Style::default().fg(Color::White)
    }
}

pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(PRIMARY)
    } else {
        Style::default().fg(MUTED)
    }
}

pub fn search_style() -> Style {
    Style::default().fg(ACCENT)
}

pub fn status_bar_style() -> Style {
    Style::default().bg(Color::Rgb(32, 32, 44)).fg(Color::White)
}

pub fn help_key_style() -> Style {
    Style::default()
        .fg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

pub fn help_desc_style() -> Style {
    Style::default().fg(Color::White)
}

/// Brand-ish color per platform so rows scan at a glance.
pub fn platform_style(platform: Platform) -> Style {
    let color = match platform {
        Platform::Instagram => Color::Rgb(193, 53, 132),
        Platform::Facebook => Color::Rgb(66, 103, 178),
        Platform::Twitter => Color::Rgb(29, 161, 242),
        Platform::Linkedin => Color::Rgb(10, 102, 194),
        Platform::Tiktok => Color::Rgb(238, 29, 82),
        Platform::Youtube => Color::Rgb(255, 0, 0),
        Platform::Pinterest => Color::Rgb(230, 0, 35),
    };
    Style::default().fg(color)
}

pub fn status_style(status: PostStatus) -> Style {
    match status {
        PostStatus::Published => success_style(),
        PostStatus::Scheduled => Style::default().fg(PRIMARY),
        PostStatus::Publishing | PostStatus::Pending => highlight_style(),
        PostStatus::Failed => error_style(),
        PostStatus::Draft | PostStatus::Cancelled => muted_style(),
    }
}

pub fn media_kind_style(kind: MediaKind) -> Style {
    match kind {
        MediaKind::Image => Style::default().fg(SECONDARY),
        MediaKind::Video => Style::default().fg(PRIMARY),
        MediaKind::Gif => highlight_style(),
        MediaKind::Audio | MediaKind::Document => muted_style(),
    }
}
