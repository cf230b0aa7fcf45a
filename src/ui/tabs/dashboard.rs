use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::models::Post;
use crate::ui::styles;
use crate::utils::{format_count, truncate};
use crate::utils::format::format_rate;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    // Vertical layout:
    // 1. Overview cards (full width)
    // 2. Recent posts | Platform breakdown + best times
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(10)])
        .split(area);

    render_overview(frame, app, main_chunks[0]);

    let bottom_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
        .split(main_chunks[1]);

    render_recent_posts(frame, app, bottom_chunks[0]);

    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(bottom_chunks[1]);

    render_platform_breakdown(frame, app, right_chunks[0]);
    render_best_times(frame, app, right_chunks[1]);
}

fn render_overview(frame: &mut Frame, app: &App, area: Rect) {
    let overview = &app.dashboard.overview;

    let cards: [(&str, String); 6] = [
        ("Posts", format_count(overview.total_posts)),
        ("Scheduled", format_count(overview.scheduled_posts)),
        ("Published", format_count(overview.published_posts)),
        ("Accounts", format_count(overview.connected_accounts)),
        ("Engagement", format_count(overview.total_engagement)),
        ("Avg Rate", format_rate(overview.avg_engagement_rate)),
    ];

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 6); 6])
        .split(area);

    for (i, (label, value)) in cards.iter().enumerate() {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("{:^width$}", value, width = chunks[i].width as usize),
                styles::highlight_style(),
            )),
            Line::from(Span::styled(
                format!("{:^width$}", label, width = chunks[i].width as usize),
                styles::muted_style(),
            )),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(styles::border_style(false));
        frame.render_widget(Paragraph::new(lines).block(block), chunks[i]);
    }
}

fn post_row(post: &Post, selected: bool, width: usize) -> Line<'_> {
    let marker = if selected { "> " } else { "  " };
    let tags = post.platform_tags().join(",");
    let status = post.status.display_name();
    // marker + status(10) + tags(12) + engagement(8) leaves the rest for content
    let content_width = width.saturating_sub(34).max(10);

    let row_style = if selected {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };

    Line::from(vec![
        Span::styled(marker, row_style),
        Span::styled(
            format!("{:<width$}", truncate(post.summary(), content_width), width = content_width),
            row_style,
        ),
        Span::styled(format!("{:<10}", status), styles::status_style(post.status)),
        Span::styled(format!("{:<12}", truncate(&tags, 11)), styles::muted_style()),
        Span::styled(
            format!("{:>8}", format_count(post.analytics.total_engagement)),
            styles::highlight_style(),
        ),
    ])
}

fn render_recent_posts(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![];

    let width = area.width.saturating_sub(2) as usize;
    for (i, post) in app.dashboard.recent_posts.iter().enumerate() {
        lines.push(post_row(post, i == app.dashboard_selection, width));
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "No recent posts",
            styles::muted_style(),
        )));
    }

    let title = if app.search_query.is_empty() {
        " Recent Posts ".to_string()
    } else {
        format!(" Posts matching '{}' ", app.search_query)
    };

    let block = Block::default()
        .title(title)
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_platform_breakdown(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![];

    for entry in &app.dashboard.platform_breakdown {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<12}", entry.platform.display_name()),
                styles::platform_style(entry.platform),
            ),
            Span::styled(
                format!("{:>8} followers", format_count(entry.followers)),
                styles::list_item_style(),
            ),
            Span::styled(
                format!("{:>8} posts", format_count(entry.posts)),
                styles::muted_style(),
            ),
        ]));
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "No connected platforms",
            styles::muted_style(),
        )));
    }

    let block = Block::default()
        .title(" Platforms ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_best_times(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![];

    for slot in app.best_times.iter().take(area.height.saturating_sub(2) as usize) {
        let platform = slot
            .platform
            .map(|p| p.display_name())
            .unwrap_or("All platforms");
        lines.push(Line::from(vec![
            Span::styled(format!("{:<6}", slot.hour_display()), styles::highlight_style()),
            Span::styled(format!("{:<14}", platform), styles::list_item_style()),
            Span::styled(
                format!("{:>8}", format_count(slot.engagement)),
                styles::muted_style(),
            ),
        ]));
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "Not enough data yet",
            styles::muted_style(),
        )));
    }

    let block = Block::default()
        .title(" Best Times to Post ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
