use chrono::{Datelike, NaiveDate, Utc};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, CalendarView};
use crate::models::Post;
use crate::ui::styles;
use crate::utils::{truncate, WEEKDAY_LABELS};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    match app.calendar_view {
        CalendarView::Month => render_month(frame, app, area),
        CalendarView::Week => render_week(frame, app, area),
        CalendarView::List => render_list(frame, app, area),
    }
}

// ============================================================================
// Month view
// ============================================================================

fn render_month(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
        .split(area);

    render_month_grid(frame, app, chunks[0]);
    render_day_panel(frame, app, chunks[1]);
}

fn render_month_grid(frame: &mut Frame, app: &App, area: Rect) {
    let title = format!(" {} ", app.calendar_anchor.format("%B %Y"));
    let block = Block::default()
        .title(title)
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Weekday header row, then the week rows
    let days = app.calendar_days();
    let weeks = days.len() / 7;
    let mut constraints = vec![Constraint::Length(1)];
    constraints.extend(std::iter::repeat(Constraint::Ratio(1, weeks as u32)).take(weeks));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let header_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 7); 7])
        .split(rows[0]);
    for (i, label) in WEEKDAY_LABELS.iter().enumerate() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!("{:^width$}", label, width = header_cols[i].width as usize),
                styles::muted_style(),
            ))),
            header_cols[i],
        );
    }

    let by_day = app.posts_by_day();
    let today = Utc::now().date_naive();

    for week in 0..weeks {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 7); 7])
            .split(rows[week + 1]);

        for col in 0..7 {
            let day = days[week * 7 + col];
            render_day_cell(frame, app, cols[col], day, &by_day, today);
        }
    }
}

fn render_day_cell(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    day: NaiveDate,
    by_day: &std::collections::HashMap<NaiveDate, Vec<usize>>,
    today: NaiveDate,
) {
    let in_month = day.month() == app.calendar_anchor.month();
    let selected = day == app.selected_day;

    let day_style = if selected {
        styles::selected_style()
    } else if day == today {
        styles::highlight_style()
    } else if in_month {
        styles::list_item_style()
    } else {
        styles::muted_style()
    };

    let mut lines = vec![Line::from(Span::styled(
        format!("{:>2}", day.day()),
        day_style,
    ))];

    if let Some(indices) = by_day.get(&day) {
        // One line per post, platform tags after the time.
        // Two border rows plus the day-number row are not usable.
        let visible = (area.height.saturating_sub(3) as usize).max(1);
        for &idx in indices.iter().take(visible) {
            let post = &app.scheduled_posts[idx];
            lines.push(Line::from(Span::styled(
                truncate(
                    &format!("{} {}", post.scheduled_time_display(), post.platform_tags().join(",")),
                    area.width.saturating_sub(1) as usize,
                ),
                styles::status_style(post.status),
            )));
        }
        if indices.len() > visible {
            if let Some(last) = lines.last_mut() {
                *last = Line::from(Span::styled(
                    format!("+{} more", indices.len() - visible + 1),
                    styles::muted_style(),
                ));
            }
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(selected));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Side panel listing the posts on the selected day.
fn render_day_panel(frame: &mut Frame, app: &App, area: Rect) {
    let posts = app.posts_on_selected_day();
    let mut lines = vec![];

    for (i, post) in posts.iter().enumerate() {
        let selected = i == app.day_post_selection;
        let marker = if selected { "> " } else { "  " };
        let row_style = if selected {
            styles::selected_style()
        } else {
            styles::list_item_style()
        };
        lines.push(Line::from(vec![
            Span::styled(marker, row_style),
            Span::styled(post.scheduled_time_display(), styles::highlight_style()),
            Span::raw(" "),
            Span::styled(
                truncate(post.summary(), area.width.saturating_sub(10) as usize),
                row_style,
            ),
        ]));
        lines.push(Line::from(vec![
            Span::raw("    "),
            Span::styled(post.platform_tags().join(" "), styles::muted_style()),
            Span::raw("  "),
            Span::styled(post.status.display_name(), styles::status_style(post.status)),
        ]));
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "Nothing scheduled",
            styles::muted_style(),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("n", styles::help_key_style()),
            Span::styled(" to schedule a post", styles::muted_style()),
        ]));
    }

    let title = format!(" {} ", app.selected_day.format("%a %b %d"));
    let block = Block::default()
        .title(title)
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

// ============================================================================
// Week view
// ============================================================================

fn render_week(frame: &mut Frame, app: &App, area: Rect) {
    let range = crate::utils::DateRange::for_week(app.selected_day);
    let start = range.start.date_naive();

    let title = format!(" Week of {} ", start.format("%b %d, %Y"));
    let block = Block::default()
        .title(title)
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 7); 7])
        .split(inner);

    let by_day = app.posts_by_day();

    for col in 0..7 {
        let day = start + chrono::Duration::days(col as i64);
        let selected = day == app.selected_day;

        let mut lines = vec![Line::from(Span::styled(
            format!("{} {}", WEEKDAY_LABELS[col], day.day()),
            if selected {
                styles::selected_style()
            } else {
                styles::list_item_style()
            },
        ))];

        if let Some(indices) = by_day.get(&day) {
            for &idx in indices {
                let post = &app.scheduled_posts[idx];
                lines.push(Line::from(Span::styled(
                    post.scheduled_time_display(),
                    styles::highlight_style(),
                )));
                lines.push(Line::from(Span::styled(
                    truncate(post.summary(), cols[col].width.saturating_sub(2) as usize),
                    styles::status_style(post.status),
                )));
            }
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(styles::border_style(selected));
        frame.render_widget(Paragraph::new(lines).block(block), cols[col]);
    }
}

// ============================================================================
// List view
// ============================================================================

fn list_row<'a>(post: &'a Post, selected: bool, width: usize) -> Line<'a> {
    let marker = if selected { "> " } else { "  " };
    let when = match post.scheduled_at {
        Some(dt) => dt.format("%b %d %H:%M").to_string(),
        None => "unscheduled".to_string(),
    };
    let tags = post.platform_tags().join(",");
    let content_width = width.saturating_sub(40).max(10);

    let row_style = if selected {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };

    Line::from(vec![
        Span::styled(marker, row_style),
        Span::styled(format!("{:<14}", when), styles::highlight_style()),
        Span::styled(
            format!("{:<width$}", truncate(post.summary(), content_width), width = content_width),
            row_style,
        ),
        Span::styled(format!("{:<12}", truncate(&tags, 11)), styles::muted_style()),
        Span::styled(
            post.status.display_name(),
            styles::status_style(post.status),
        ),
    ])
}

fn render_list(frame: &mut Frame, app: &App, area: Rect) {
    let posts = app.filtered_scheduled_posts();
    let width = area.width.saturating_sub(2) as usize;

    // Scroll window around the selection
    let visible = area.height.saturating_sub(2) as usize;
    let offset = app.list_selection.saturating_sub(visible.saturating_sub(1));

    let mut lines = vec![];
    for (i, post) in posts.iter().enumerate().skip(offset).take(visible) {
        lines.push(list_row(post, i == app.list_selection, width));
    }

    if lines.is_empty() {
        let message = if app.search_query.is_empty() {
            "Nothing scheduled this month".to_string()
        } else {
            format!("No posts matching '{}'", app.search_query)
        };
        lines.push(Line::from(Span::styled(message, styles::muted_style())));
    }

    let title = format!(
        " Scheduled - {} ({}) by {}{} ",
        app.calendar_anchor.format("%B %Y"),
        posts.len(),
        app.post_sort_column.label(),
        if app.post_sort_reversed { " desc" } else { "" }
    );
    let block = Block::default()
        .title(title)
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
