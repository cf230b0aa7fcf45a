use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::styles;
use crate::utils::format_count;
use crate::utils::format::format_rate;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(8)])
        .split(area);

    render_overall(frame, app, main_chunks[0]);

    let bottom_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(main_chunks[1]);

    render_by_platform(frame, app, bottom_chunks[0]);
    render_growth_trend(frame, app, bottom_chunks[1]);
}

fn render_overall(frame: &mut Frame, app: &App, area: Rect) {
    let overall = &app.analytics.overall;

    let growth = if overall.follower_growth >= 0 {
        Span::styled(
            format!("+{}", format_count(overall.follower_growth)),
            styles::success_style(),
        )
    } else {
        Span::styled(format_count(overall.follower_growth), styles::error_style())
    };

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Followers:   ", styles::muted_style()),
            Span::styled(format_count(overall.total_followers), styles::highlight_style()),
            Span::raw("  ("),
            growth,
            Span::raw(" this period)"),
        ]),
        Line::from(vec![
            Span::styled("  Engagement:  ", styles::muted_style()),
            Span::styled(format_count(overall.total_engagement), styles::highlight_style()),
            Span::styled(
                format!("  avg rate {}", format_rate(overall.avg_engagement_rate)),
                styles::muted_style(),
            ),
        ]),
        Line::from(vec![
            Span::styled("  Reach:       ", styles::muted_style()),
            Span::styled(format_count(overall.total_reach), styles::list_item_style()),
        ]),
        Line::from(vec![
            Span::styled("  Impressions: ", styles::muted_style()),
            Span::styled(format_count(overall.total_impressions), styles::list_item_style()),
        ]),
        Line::from(vec![
            Span::styled("  Posts:       ", styles::muted_style()),
            Span::styled(format_count(overall.total_posts), styles::list_item_style()),
        ]),
    ];

    let block = Block::default()
        .title(" Overall ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_by_platform(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![];

    for (i, entry) in app.analytics.by_platform.iter().enumerate() {
        let selected = i == app.analytics_platform_selection;
        let marker = if selected { "> " } else { "  " };
        let row_style = if selected {
            styles::selected_style()
        } else {
            styles::list_item_style()
        };

        let mut spans = vec![
            Span::styled(marker, row_style),
            Span::styled(
                format!("{:<12}", entry.platform.display_name()),
                styles::platform_style(entry.platform),
            ),
        ];
        if let Some(ref summary) = entry.summary {
            spans.push(Span::styled(
                format!("{:>9}", format_count(summary.total_followers)),
                styles::highlight_style(),
            ));
            spans.push(Span::styled(
                format!("{:>9}", format_count(summary.total_engagement)),
                row_style,
            ));
            spans.push(Span::styled(
                format!("{:>8}", format_rate(summary.avg_engagement_rate)),
                styles::muted_style(),
            ));
        } else {
            spans.push(Span::styled("no data", styles::muted_style()));
        }
        lines.push(Line::from(spans));
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "No platform analytics yet",
            styles::muted_style(),
        )));
    } else {
        lines.insert(
            0,
            Line::from(vec![
                Span::raw("  "),
                Span::styled(format!("{:<12}", "Platform"), styles::muted_style()),
                Span::styled(format!("{:>9}", "Follow"), styles::muted_style()),
                Span::styled(format!("{:>9}", "Engage"), styles::muted_style()),
                Span::styled(format!("{:>8}", "Rate"), styles::muted_style()),
            ]),
        );
    }

    let block = Block::default()
        .title(" By Platform ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Follower trend as a sideways bar chart, one row per data point.
fn render_growth_trend(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![];

    let trend = &app.analytics.growth_trend;
    let max = trend.iter().map(|p| p.followers).max().unwrap_or(0);
    let bar_width = area.width.saturating_sub(26) as usize;

    let visible = area.height.saturating_sub(2) as usize;
    let skip = trend.len().saturating_sub(visible);

    for point in trend.iter().skip(skip) {
        let filled = if max > 0 {
            (point.followers as f64 / max as f64 * bar_width as f64) as usize
        } else {
            0
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:<11}", point.date), styles::muted_style()),
            Span::styled("█".repeat(filled), styles::success_style()),
            Span::styled(
                format!(" {}", format_count(point.followers)),
                styles::list_item_style(),
            ),
        ]));
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "Not enough history yet",
            styles::muted_style(),
        )));
    }

    let block = Block::default()
        .title(" Follower Growth ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
