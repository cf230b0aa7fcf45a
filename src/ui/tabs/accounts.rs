use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::models::AccountSortColumn;
use crate::ui::styles;
use crate::utils::{format_count, truncate};
use crate::utils::format::{format_date, format_datetime, format_rate};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    render_account_list(frame, app, chunks[0]);

    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    render_account_detail(frame, app, right_chunks[0]);
    render_platform_totals(frame, app, right_chunks[1]);
}

fn render_account_list(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![];

    // Header row with sort indicators
    let sort_indicator = |col: AccountSortColumn| {
        if app.account_sort_column == col {
            if app.account_sort_reversed { " ▼" } else { " ▲" }
        } else {
            ""
        }
    };

    lines.push(Line::from(vec![
        Span::raw("  "),
        Span::styled(
            format!("{:<12}", format!("Platform{}", sort_indicator(AccountSortColumn::Platform))),
            styles::muted_style(),
        ),
        Span::styled(
            format!("{:<22}", format!("Account{}", sort_indicator(AccountSortColumn::Name))),
            styles::muted_style(),
        ),
        Span::styled(
            format!("{:>10}", format!("Followers{}", sort_indicator(AccountSortColumn::Followers))),
            styles::muted_style(),
        ),
        Span::styled(format!("{:>8}", "Posts"), styles::muted_style()),
        Span::styled("  Status", styles::muted_style()),
    ]));

    for (i, account) in app.accounts.iter().enumerate() {
        let selected = i == app.account_selection;
        let marker = if selected { "> " } else { "  " };
        let row_style = if selected {
            styles::selected_style()
        } else {
            styles::list_item_style()
        };
        let status_style = if account.is_connected {
            styles::success_style()
        } else {
            styles::error_style()
        };

        lines.push(Line::from(vec![
            Span::styled(marker, row_style),
            Span::styled(
                format!("{:<12}", account.platform.display_name()),
                styles::platform_style(account.platform),
            ),
            Span::styled(format!("{:<22}", truncate(&account.handle(), 21)), row_style),
            Span::styled(
                format!("{:>10}", format_count(account.followers_count)),
                styles::highlight_style(),
            ),
            Span::styled(format!("{:>8}", format_count(account.posts_count)), row_style),
            Span::styled(format!("  {}", account.status_display()), status_style),
        ]));
    }

    if app.accounts.is_empty() {
        lines.push(Line::from(Span::styled(
            "No connected accounts. Connect accounts from the web app.",
            styles::muted_style(),
        )));
    }

    let block = Block::default()
        .title(format!(" Accounts ({}) ", app.accounts.len()))
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_account_detail(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![];

    if let Some(account) = app.selected_account() {
        lines.push(Line::from(vec![
            Span::styled("Name:       ", styles::muted_style()),
            Span::styled(account.name.clone(), styles::list_item_style()),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Handle:     ", styles::muted_style()),
            Span::styled(account.handle(), styles::list_item_style()),
        ]));
        if let Some(ref kind) = account.account_type {
            lines.push(Line::from(vec![
                Span::styled("Type:       ", styles::muted_style()),
                Span::styled(kind.clone(), styles::list_item_style()),
            ]));
        }
        lines.push(Line::from(vec![
            Span::styled("Following:  ", styles::muted_style()),
            Span::styled(format_count(account.following_count), styles::list_item_style()),
        ]));
        if let Some(ref synced) = account.last_synced_at {
            lines.push(Line::from(vec![
                Span::styled("Last sync:  ", styles::muted_style()),
                Span::styled(format_datetime(synced), styles::list_item_style()),
            ]));
        }
        if let Some(ref connected) = account.connected_at {
            lines.push(Line::from(vec![
                Span::styled("Connected:  ", styles::muted_style()),
                Span::styled(format_date(connected), styles::list_item_style()),
            ]));
        }
        if let Some(ref analytics) = account.analytics {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled("Engagement: ", styles::muted_style()),
                Span::styled(
                    format_count(analytics.total_engagement),
                    styles::highlight_style(),
                ),
                Span::styled(
                    format!(" ({} avg)", format_rate(analytics.avg_engagement_rate)),
                    styles::muted_style(),
                ),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Reach:      ", styles::muted_style()),
                Span::styled(format_count(analytics.total_reach), styles::list_item_style()),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("s", styles::help_key_style()),
            Span::styled("ync  ", styles::muted_style()),
            Span::styled("x", styles::help_key_style()),
            Span::styled(" disconnect  ", styles::muted_style()),
            Span::styled("D", styles::help_key_style()),
            Span::styled(" remove", styles::muted_style()),
        ]));
    } else {
        lines.push(Line::from(Span::styled(
            "No account selected",
            styles::muted_style(),
        )));
    }

    let block = Block::default()
        .title(" Details ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_platform_totals(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![];

    for stats in &app.platform_stats {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<12}", stats.platform.display_name()),
                styles::platform_style(stats.platform),
            ),
            Span::styled(
                format!("{:>3} acct", stats.count),
                styles::list_item_style(),
            ),
            Span::styled(
                format!("{:>10}", format_count(stats.followers)),
                styles::highlight_style(),
            ),
        ]));
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled("No data", styles::muted_style())));
    }

    let block = Block::default()
        .title(" By Platform ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
