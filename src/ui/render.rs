use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, AppState, CalendarView, ComposeFocus, LoginFocus, Tab, MAX_COMPOSE_LENGTH};

use super::styles;
use super::tabs::{accounts, analytics, calendar, dashboard, media};

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Tabs
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_tabs(frame, app, chunks[1]);
    render_main_content(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    // Render overlays
    if matches!(app.state, AppState::ShowingHelp) {
        render_help_overlay(frame, app);
    }

    if matches!(app.state, AppState::LoggingIn) {
        render_login_overlay(frame, app);
    }

    if matches!(app.state, AppState::Composing) {
        render_compose_overlay(frame, app);
    }

    if matches!(app.state, AppState::ConfirmingQuit) {
        render_confirm_overlay(frame, "Quit Flowdeck?");
    }

    if matches!(app.state, AppState::ConfirmingDelete) {
        render_confirm_overlay(frame, "Delete the selected item?");
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = "  Flowdeck";
    let user = app
        .logged_in_user()
        .map(|u| format!("{} ", u.display_name()))
        .unwrap_or_else(|| "not logged in ".to_string());
    let help_hint = "[?] Help";

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(
            area.width
                .saturating_sub((title.len() + user.len() + help_hint.len() + 4) as u16)
                as usize,
        )),
        Span::styled(user, styles::muted_style()),
        Span::styled(help_hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(title_line).block(block), area);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let main_tabs = vec![
        ("[1] Dashboard", app.current_tab == Tab::Dashboard),
        ("[2] Calendar", app.current_tab == Tab::Calendar),
        ("[3] Accounts", app.current_tab == Tab::Accounts),
        ("[4] Analytics", app.current_tab == Tab::Analytics),
        ("[5] Media", app.current_tab == Tab::Media),
    ];

    let mut spans = vec![Span::raw(" ")];
    for (i, (label, selected)) in main_tabs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", styles::muted_style()));
        }
        if *selected {
            spans.push(Span::styled(*label, styles::tab_style(true)));
        } else {
            spans.push(Span::styled(*label, styles::muted_style()));
        }
    }

    // Calendar layout toggle on the right
    if app.current_tab == Tab::Calendar {
        let views = vec![
            ("[m]onth", app.calendar_view == CalendarView::Month),
            ("[w]eek", app.calendar_view == CalendarView::Week),
            ("[l]ist", app.calendar_view == CalendarView::List),
        ];

        let main_width: usize = spans.iter().map(|s| s.content.len()).sum();
        let views_width: usize =
            views.iter().map(|(l, _)| l.len()).sum::<usize>() + (views.len() - 1) * 3;
        let padding = (area.width as usize).saturating_sub(main_width + views_width + 2);

        spans.push(Span::raw(" ".repeat(padding)));

        for (i, (label, selected)) in views.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", styles::muted_style()));
            }
            if *selected {
                spans.push(Span::styled(*label, styles::tab_style(true)));
            } else {
                spans.push(Span::styled(*label, styles::muted_style()));
            }
        }
    }

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.current_tab {
        Tab::Dashboard => dashboard::render(frame, app, area),
        Tab::Calendar => calendar::render(frame, app, area),
        Tab::Accounts => accounts::render(frame, app, area),
        Tab::Analytics => analytics::render(frame, app, area),
        Tab::Media => media::render(frame, app, area),
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let shortcuts = if app.current_tab == Tab::Calendar {
        "[n]ew | [u]pdate | [q]uit"
    } else {
        "[u]pdate | [q]uit"
    };

    let left_text = if matches!(app.state, AppState::Searching) {
        format!(" /{}▌", app.search_query)
    } else if let Some(ref msg) = app.status_message {
        format!(" {} ", msg)
    } else if let Some(ref age) = app.cache_ages.dashboard {
        format!(" Updated {} ", age)
    } else {
        " No cached data ".to_string()
    };

    let refresh_marker = if app.refreshing { "⟳ " } else { "" };
    let right_text = format!(" {}{} ", refresh_marker, shortcuts);

    let width = area.width as usize;
    let padding_len = width
        .saturating_sub(left_text.chars().count())
        .saturating_sub(right_text.chars().count());

    let left_style = if matches!(app.state, AppState::Searching) {
        styles::search_style()
    } else {
        styles::muted_style()
    };

    let status_line = Line::from(vec![
        Span::styled(left_text, left_style),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn render_help_overlay(frame: &mut Frame, _app: &App) {
    let area = centered_rect_fixed(52, 28, frame.area());
    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let help_text = vec![
        Line::from(Span::styled(
            "      ╔═╗╦  ╔═╗╦ ╦╔╦╗╔═╗╔═╗╦╔═",
            styles::title_style(),
        )),
        Line::from(Span::styled(
            "      ╠╣ ║  ║ ║║║║ ║║║╣ ║  ╠╩╗",
            styles::title_style(),
        )),
        Line::from(Span::styled(
            "      ╚  ╩═╝╚═╝╚╩╝═╩╝╚═╝╚═╝╩ ╩",
            styles::title_style(),
        )),
        Line::from(Span::styled(
            format!("            version {}", version),
            styles::muted_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Navigation", styles::highlight_style())),
        Line::from(vec![
            Span::styled("  1-5       ", styles::help_key_style()),
            Span::styled("Switch tabs", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  Tab       ", styles::help_key_style()),
            Span::styled("Next tab", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  ←/→ ↑/↓   ", styles::help_key_style()),
            Span::styled("Move selection / calendar day", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  [/]       ", styles::help_key_style()),
            Span::styled("Previous / next month", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  t         ", styles::help_key_style()),
            Span::styled("Jump to today", styles::help_desc_style()),
        ]),
        Line::from(""),
        Line::from(Span::styled(" Actions", styles::highlight_style())),
        Line::from(vec![
            Span::styled("  n         ", styles::help_key_style()),
            Span::styled("Schedule a new post", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  p/c/y/D   ", styles::help_key_style()),
            Span::styled("Publish/cancel/duplicate/delete post", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  s/x       ", styles::help_key_style()),
            Span::styled("Sync / disconnect account", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  f         ", styles::help_key_style()),
            Span::styled("Filter media by type", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  P/N/F     ", styles::help_key_style()),
            Span::styled("Sort accounts by column", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  d/s/e     ", styles::help_key_style()),
            Span::styled("Sort post list by column", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  /         ", styles::help_key_style()),
            Span::styled("Search", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  u         ", styles::help_key_style()),
            Span::styled("Refresh all data", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  L         ", styles::help_key_style()),
            Span::styled("Log out", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  q         ", styles::help_key_style()),
            Span::styled("Quit", styles::help_desc_style()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("       Press ", styles::muted_style()),
            Span::styled("?", styles::help_key_style()),
            Span::styled(" or ", styles::muted_style()),
            Span::styled("Esc", styles::help_key_style()),
            Span::styled(" to close", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(help_text).block(block), area);
}

fn render_login_overlay(frame: &mut Frame, app: &App) {
    let height = if app.login_error.is_some() { 13 } else { 11 };
    let area = centered_rect_fixed(48, height, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![];

    lines.push(Line::from(Span::styled(
        "        ╔═╗╦  ╔═╗╦ ╦╔╦╗╔═╗╔═╗╦╔═",
        styles::title_style(),
    )));
    lines.push(Line::from(Span::styled(
        "        ╠╣ ║  ║ ║║║║ ║║║╣ ║  ╠╩╗",
        styles::title_style(),
    )));
    lines.push(Line::from(Span::styled(
        "        ╚  ╩═╝╚═╝╚╩╝═╩╝╚═╝╚═╝╩ ╩",
        styles::title_style(),
    )));
    lines.push(Line::from(""));

    let email_focused = app.login_focus == LoginFocus::Email;
    let email_style = if email_focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    let email_display = format!("{:<26}", crate::utils::truncate(&app.login_email, 26));
    let cursor = if email_focused { "▌" } else { "" };
    lines.push(Line::from(vec![
        Span::raw("   "),
        Span::styled("Email:    [", styles::muted_style()),
        Span::styled(format!("{}{}", email_display, cursor), email_style),
        Span::styled("]", styles::muted_style()),
    ]));

    let password_focused = app.login_focus == LoginFocus::Password;
    let password_style = if password_focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    let password_masked: String = "*".repeat(app.login_password.len().min(26));
    let password_display = format!("{:<26}", password_masked);
    let cursor = if password_focused { "▌" } else { "" };
    lines.push(Line::from(vec![
        Span::raw("   "),
        Span::styled("Password: [", styles::muted_style()),
        Span::styled(format!("{}{}", password_display, cursor), password_style),
        Span::styled("]", styles::muted_style()),
    ]));

    let button_focused = app.login_focus == LoginFocus::Button;
    let button_style = if button_focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    lines.push(Line::from(""));
    if button_focused {
        lines.push(Line::from(vec![
            Span::raw("             ["),
            Span::styled(" ▶ Login ◀ ", button_style),
            Span::raw("]"),
        ]));
    } else {
        lines.push(Line::from(vec![
            Span::raw("             ["),
            Span::styled("   Login   ", button_style),
            Span::raw("]"),
        ]));
    }

    if let Some(ref error) = app.login_error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" {}", crate::utils::truncate(error, 44)),
            styles::error_style(),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_compose_overlay(frame: &mut Frame, app: &App) {
    // Tall enough for content, time, and the platform checklist
    let height = 14 + app.compose_platforms.len() as u16;
    let area = centered_rect_fixed(58, height, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![];

    lines.push(Line::from(Span::styled(
        format!(" Schedule for {} ", app.compose_day.format("%a %b %d, %Y")),
        styles::title_style(),
    )));
    lines.push(Line::from(""));

    // Content field with remaining-character counter
    let content_focused = app.compose_focus == ComposeFocus::Content;
    let remaining = MAX_COMPOSE_LENGTH.saturating_sub(app.compose_content.chars().count());
    lines.push(Line::from(vec![
        Span::styled(" Content ", styles::muted_style()),
        Span::styled(
            format!("({} left)", remaining),
            if remaining < 20 {
                styles::error_style()
            } else {
                styles::muted_style()
            },
        ),
    ]));
    let cursor = if content_focused { "▌" } else { "" };
    // Wrap manually at the dialog interior width
    let wrap = area.width.saturating_sub(4) as usize;
    let display = format!("{}{}", app.compose_content, cursor);
    let chars: Vec<char> = display.chars().collect();
    let mut shown = 0;
    for chunk in chars.chunks(wrap.max(1)).take(4) {
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(
                chunk.iter().collect::<String>(),
                if content_focused {
                    styles::selected_style()
                } else {
                    styles::list_item_style()
                },
            ),
        ]));
        shown += 1;
    }
    for _ in shown..2 {
        lines.push(Line::from(""));
    }
    lines.push(Line::from(""));

    // Time field
    let time_focused = app.compose_focus == ComposeFocus::Time;
    let cursor = if time_focused { "▌" } else { "" };
    lines.push(Line::from(vec![
        Span::styled(" Time (UTC): [", styles::muted_style()),
        Span::styled(
            format!("{:<5}{}", app.compose_time, cursor),
            if time_focused {
                styles::selected_style()
            } else {
                styles::list_item_style()
            },
        ),
        Span::styled("]", styles::muted_style()),
    ]));
    lines.push(Line::from(""));

    // Platform checklist
    lines.push(Line::from(Span::styled(" Platforms", styles::muted_style())));
    if app.compose_platforms.is_empty() {
        lines.push(Line::from(Span::styled(
            "  (no connected accounts)",
            styles::error_style(),
        )));
    }
    let platforms_focused = app.compose_focus == ComposeFocus::Platforms;
    for (i, (platform, checked)) in app.compose_platforms.iter().enumerate() {
        let pointed = platforms_focused && i == app.compose_platform_selection;
        let marker = if pointed { "> " } else { "  " };
        let checkbox = if *checked { "[x] " } else { "[ ] " };
        lines.push(Line::from(vec![
            Span::styled(
                marker,
                if pointed {
                    styles::selected_style()
                } else {
                    styles::list_item_style()
                },
            ),
            Span::styled(checkbox, styles::list_item_style()),
            Span::styled(platform.display_name(), styles::platform_style(*platform)),
        ]));
    }
    lines.push(Line::from(""));

    // Schedule button
    let button_focused = app.compose_focus == ComposeFocus::Button;
    if button_focused {
        lines.push(Line::from(vec![
            Span::raw("              ["),
            Span::styled(" ▶ Schedule ◀ ", styles::selected_style()),
            Span::raw("]"),
        ]));
    } else {
        lines.push(Line::from(vec![
            Span::raw("              ["),
            Span::styled("   Schedule   ", styles::list_item_style()),
            Span::raw("]"),
        ]));
    }

    if let Some(ref error) = app.compose_error {
        lines.push(Line::from(Span::styled(
            format!(" {}", crate::utils::truncate(error, 54)),
            styles::error_style(),
        )));
    }

    let block = Block::default()
        .title(" New Post ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_confirm_overlay(frame: &mut Frame, question: &str) {
    let area = centered_rect_fixed(44, 7, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{:^42}", question),
            styles::list_item_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("            "),
            Span::styled("[y]es", styles::help_key_style()),
            Span::raw("      "),
            Span::styled("[n]o", styles::help_key_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}
