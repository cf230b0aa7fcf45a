//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes.

use anyhow::Result;
use chrono::{Datelike, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{
    can_add_compose_char, can_add_email_char, can_add_password_char, App, AppState, CalendarView,
    ComposeFocus, LoginFocus, Tab, PAGE_SCROLL_SIZE,
};
use crate::models::{AccountSortColumn, PostSortColumn};

/// Handle keyboard input. Returns true if the app should quit.
pub async fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Handle login overlay
    if matches!(app.state, AppState::LoggingIn) {
        return handle_login_input(app, key).await;
    }

    // Handle compose overlay
    if matches!(app.state, AppState::Composing) {
        handle_compose_input(app, key).await;
        return Ok(false);
    }

    // Handle help overlay
    if matches!(app.state, AppState::ShowingHelp) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.state = AppState::Normal;
        }
        return Ok(false);
    }

    // Handle quit confirmation
    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                return Ok(true);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return Ok(false);
    }

    // Handle delete confirmation
    if matches!(app.state, AppState::ConfirmingDelete) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Normal;
                match app.current_tab {
                    Tab::Media => app.delete_selected_media().await,
                    Tab::Accounts => app.delete_selected_account().await,
                    _ => app.delete_selected_post().await,
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return Ok(false);
    }

    // Handle search input mode
    if matches!(app.state, AppState::Searching) {
        match key.code {
            KeyCode::Esc => {
                app.search_query.clear();
                app.state = AppState::Normal;
            }
            KeyCode::Enter => {
                app.state = AppState::Normal;
                if app.current_tab == Tab::Dashboard && !app.search_query.is_empty() {
                    app.search_posts().await;
                }
            }
            KeyCode::Backspace => {
                app.search_query.pop();
            }
            KeyCode::Char(c) => {
                app.search_query.push(c);
            }
            _ => {}
        }
        return Ok(false);
    }

    // Normal mode input
    match key.code {
        // Tab switching
        KeyCode::Char('1') => app.current_tab = Tab::Dashboard,
        KeyCode::Char('2') => app.current_tab = Tab::Calendar,
        KeyCode::Char('3') => app.current_tab = Tab::Accounts,
        KeyCode::Char('4') => app.current_tab = Tab::Analytics,
        KeyCode::Char('5') => app.current_tab = Tab::Media,
        KeyCode::Tab => app.current_tab = app.current_tab.next(),
        KeyCode::BackTab => app.current_tab = app.current_tab.prev(),

        // Global actions
        KeyCode::Char('q') => app.state = AppState::ConfirmingQuit,
        KeyCode::Char('?') => app.state = AppState::ShowingHelp,
        KeyCode::Char('u') => app.refresh_all_background(),
        KeyCode::Char('/') => {
            app.search_query.clear();
            app.state = AppState::Searching;
        }
        KeyCode::Char('L') => app.logout().await,
        KeyCode::Esc => {
            app.search_query.clear();
            app.status_message = None;
        }

        _ => {
            handle_tab_input(app, key).await;
        }
    }

    Ok(false)
}

/// Per-tab key bindings (selection movement and actions).
async fn handle_tab_input(app: &mut App, key: KeyEvent) {
    match app.current_tab {
        Tab::Dashboard => handle_dashboard_input(app, key),
        Tab::Calendar => handle_calendar_input(app, key).await,
        Tab::Accounts => handle_accounts_input(app, key).await,
        Tab::Analytics => handle_analytics_input(app, key),
        Tab::Media => handle_media_input(app, key),
    }
}

fn handle_dashboard_input(app: &mut App, key: KeyEvent) {
    let len = app.dashboard.recent_posts.len();
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.dashboard_selection = app.dashboard_selection.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.dashboard_selection + 1 < len {
                app.dashboard_selection += 1;
            }
        }
        _ => {}
    }
}

async fn handle_calendar_input(app: &mut App, key: KeyEvent) {
    // View switching and month paging first
    match key.code {
        KeyCode::Char('m') => {
            app.calendar_view = CalendarView::Month;
            return;
        }
        KeyCode::Char('w') => {
            app.calendar_view = CalendarView::Week;
            return;
        }
        KeyCode::Char('l') => {
            app.calendar_view = CalendarView::List;
            return;
        }
        KeyCode::Char('[') => {
            app.calendar_prev_month();
            return;
        }
        KeyCode::Char(']') => {
            app.calendar_next_month();
            return;
        }
        KeyCode::Char('t') => {
            let today = Utc::now().date_naive();
            let month_changed = today.month() != app.calendar_anchor.month()
                || today.year() != app.calendar_anchor.year();
            app.selected_day = today;
            app.calendar_anchor = today;
            if month_changed {
                app.refresh_scheduled_background();
            }
            return;
        }
        KeyCode::Char('n') => {
            app.start_compose(app.selected_day);
            return;
        }
        _ => {}
    }

    // Post actions on the current selection
    match key.code {
        KeyCode::Char('p') => {
            app.publish_selected_post().await;
            return;
        }
        KeyCode::Char('c') => {
            app.cancel_selected_post().await;
            return;
        }
        KeyCode::Char('y') => {
            app.duplicate_selected_post().await;
            return;
        }
        KeyCode::Char('D') => {
            if app.selected_post_id().is_some() {
                app.state = AppState::ConfirmingDelete;
            }
            return;
        }
        _ => {}
    }

    // Movement depends on the active layout
    match app.calendar_view {
        CalendarView::Month | CalendarView::Week => match key.code {
            KeyCode::Left => app.calendar_move_day(-1),
            KeyCode::Right => app.calendar_move_day(1),
            KeyCode::Up => app.calendar_move_day(-7),
            KeyCode::Down => app.calendar_move_day(7),
            KeyCode::Char('j') => {
                let len = app.posts_on_selected_day().len();
                if app.day_post_selection + 1 < len {
                    app.day_post_selection += 1;
                }
            }
            KeyCode::Char('k') => {
                app.day_post_selection = app.day_post_selection.saturating_sub(1);
            }
            _ => {}
        },
        CalendarView::List => {
            let len = app.filtered_scheduled_posts().len();
            match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    app.list_selection = app.list_selection.saturating_sub(1);
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    if app.list_selection + 1 < len {
                        app.list_selection += 1;
                    }
                }
                KeyCode::PageUp => {
                    app.list_selection = app.list_selection.saturating_sub(PAGE_SCROLL_SIZE);
                }
                KeyCode::PageDown => {
                    app.list_selection = (app.list_selection + PAGE_SCROLL_SIZE)
                        .min(len.saturating_sub(1));
                }
                KeyCode::Char('d') => app.toggle_post_sort(PostSortColumn::ScheduledAt),
                KeyCode::Char('s') => app.toggle_post_sort(PostSortColumn::Status),
                KeyCode::Char('e') => app.toggle_post_sort(PostSortColumn::Engagement),
                _ => {}
            }
        }
    }
}

async fn handle_accounts_input(app: &mut App, key: KeyEvent) {
    let len = app.accounts.len();
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.account_selection = app.account_selection.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.account_selection + 1 < len {
                app.account_selection += 1;
            }
        }
        KeyCode::Char('s') => app.sync_selected_account().await,
        KeyCode::Char('x') => app.disconnect_selected_account().await,
        KeyCode::Char('D') => {
            if app.selected_account().is_some() {
                app.state = AppState::ConfirmingDelete;
            }
        }
        KeyCode::Char('P') => app.toggle_account_sort(AccountSortColumn::Platform),
        KeyCode::Char('N') => app.toggle_account_sort(AccountSortColumn::Name),
        KeyCode::Char('F') => app.toggle_account_sort(AccountSortColumn::Followers),
        _ => {}
    }
}

fn handle_analytics_input(app: &mut App, key: KeyEvent) {
    let len = app.analytics.by_platform.len();
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.analytics_platform_selection = app.analytics_platform_selection.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.analytics_platform_selection + 1 < len {
                app.analytics_platform_selection += 1;
            }
        }
        _ => {}
    }
}

fn handle_media_input(app: &mut App, key: KeyEvent) {
    let len = app.media_items.len();
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.media_selection = app.media_selection.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.media_selection + 1 < len {
                app.media_selection += 1;
            }
        }
        KeyCode::PageUp => {
            app.media_selection = app.media_selection.saturating_sub(PAGE_SCROLL_SIZE);
        }
        KeyCode::PageDown => {
            app.media_selection =
                (app.media_selection + PAGE_SCROLL_SIZE).min(len.saturating_sub(1));
        }
        KeyCode::Char('f') => app.cycle_media_filter(),
        KeyCode::Char('D') => {
            if app.selected_media().is_some() {
                app.state = AppState::ConfirmingDelete;
            }
        }
        _ => {}
    }
}

/// Handle input while the login overlay is open.
async fn handle_login_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            if app.is_authenticated() {
                // Logged in already, just close the overlay
                app.state = AppState::Normal;
            } else {
                // Nothing to go back to
                app.state = AppState::Quitting;
                return Ok(true);
            }
        }
        KeyCode::Tab | KeyCode::Down => {
            app.login_focus = match app.login_focus {
                LoginFocus::Email => LoginFocus::Password,
                LoginFocus::Password => LoginFocus::Button,
                LoginFocus::Button => LoginFocus::Email,
            };
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.login_focus = match app.login_focus {
                LoginFocus::Email => LoginFocus::Button,
                LoginFocus::Password => LoginFocus::Email,
                LoginFocus::Button => LoginFocus::Password,
            };
        }
        KeyCode::Enter => match app.login_focus {
            LoginFocus::Email => app.login_focus = LoginFocus::Password,
            LoginFocus::Password | LoginFocus::Button => {
                // Error is shown in the overlay, keep the app running
                let _ = app.attempt_login().await;
            }
        },
        KeyCode::Backspace => match app.login_focus {
            LoginFocus::Email => {
                app.login_email.pop();
            }
            LoginFocus::Password => {
                app.login_password.pop();
            }
            LoginFocus::Button => {}
        },
        KeyCode::Char(c) => {
            // Ignore control chords except the global Ctrl+C handled upstream
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return Ok(false);
            }
            match app.login_focus {
                LoginFocus::Email => {
                    if can_add_email_char(&app.login_email) {
                        app.login_email.push(c);
                    }
                }
                LoginFocus::Password => {
                    if can_add_password_char(&app.login_password) {
                        app.login_password.push(c);
                    }
                }
                LoginFocus::Button => {}
            }
        }
        _ => {}
    }
    Ok(false)
}

/// Handle input while the compose overlay is open.
async fn handle_compose_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.state = AppState::Normal;
        }
        KeyCode::Tab => {
            app.compose_focus = match app.compose_focus {
                ComposeFocus::Content => ComposeFocus::Time,
                ComposeFocus::Time => ComposeFocus::Platforms,
                ComposeFocus::Platforms => ComposeFocus::Button,
                ComposeFocus::Button => ComposeFocus::Content,
            };
        }
        KeyCode::BackTab => {
            app.compose_focus = match app.compose_focus {
                ComposeFocus::Content => ComposeFocus::Button,
                ComposeFocus::Time => ComposeFocus::Content,
                ComposeFocus::Platforms => ComposeFocus::Time,
                ComposeFocus::Button => ComposeFocus::Platforms,
            };
        }
        KeyCode::Up if app.compose_focus == ComposeFocus::Platforms => {
            app.compose_platform_selection = app.compose_platform_selection.saturating_sub(1);
        }
        KeyCode::Down if app.compose_focus == ComposeFocus::Platforms => {
            if app.compose_platform_selection + 1 < app.compose_platforms.len() {
                app.compose_platform_selection += 1;
            }
        }
        KeyCode::Char(' ') if app.compose_focus == ComposeFocus::Platforms => {
            if let Some(entry) = app
                .compose_platforms
                .get_mut(app.compose_platform_selection)
            {
                entry.1 = !entry.1;
            }
        }
        KeyCode::Enter => match app.compose_focus {
            ComposeFocus::Button => {
                let _ = app.submit_compose().await;
            }
            ComposeFocus::Content => {
                if can_add_compose_char(&app.compose_content) {
                    app.compose_content.push('\n');
                }
            }
            _ => app.compose_focus = ComposeFocus::Button,
        },
        KeyCode::Backspace => match app.compose_focus {
            ComposeFocus::Content => {
                app.compose_content.pop();
            }
            ComposeFocus::Time => {
                app.compose_time.pop();
            }
            _ => {}
        },
        KeyCode::Char(c) => match app.compose_focus {
            ComposeFocus::Content => {
                if can_add_compose_char(&app.compose_content) {
                    app.compose_content.push(c);
                }
            }
            ComposeFocus::Time => {
                // HH:MM only
                if app.compose_time.len() < 5 && (c.is_ascii_digit() || c == ':') {
                    app.compose_time.push(c);
                }
            }
            _ => {}
        },
        _ => {}
    }
}
