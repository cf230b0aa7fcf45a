use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::styles;
use crate::utils::truncate;
use crate::utils::format::format_date;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(64), Constraint::Percentage(36)])
        .split(area);

    render_media_list(frame, app, chunks[0]);

    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(chunks[1]);

    render_media_detail(frame, app, right_chunks[0]);
    render_folders(frame, app, right_chunks[1]);
}

fn render_media_list(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![];

    lines.push(Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("{:<8}", "Type"), styles::muted_style()),
        Span::styled(format!("{:<30}", "Name"), styles::muted_style()),
        Span::styled(format!("{:>9}", "Size"), styles::muted_style()),
        Span::styled(format!("{:>12}", "Dimensions"), styles::muted_style()),
        Span::styled("  Used", styles::muted_style()),
    ]));

    let visible = area.height.saturating_sub(3) as usize;
    let offset = app.media_selection.saturating_sub(visible.saturating_sub(1));

    for (i, item) in app.media_items.iter().enumerate().skip(offset).take(visible) {
        let selected = i == app.media_selection;
        let marker = if selected { "> " } else { "  " };
        let row_style = if selected {
            styles::selected_style()
        } else {
            styles::list_item_style()
        };

        lines.push(Line::from(vec![
            Span::styled(marker, row_style),
            Span::styled(
                format!("{:<8}", item.kind.display_name()),
                styles::media_kind_style(item.kind),
            ),
            Span::styled(format!("{:<30}", truncate(item.display_name(), 29)), row_style),
            Span::styled(format!("{:>9}", item.size_display()), styles::muted_style()),
            Span::styled(format!("{:>12}", item.dimensions_display()), styles::muted_style()),
            Span::styled(
                if item.is_used { "  yes" } else { "  no" },
                if item.is_used {
                    styles::success_style()
                } else {
                    styles::muted_style()
                },
            ),
        ]));
    }

    if app.media_items.is_empty() {
        lines.push(Line::from(Span::styled(
            "Media library is empty",
            styles::muted_style(),
        )));
    }

    let filter = match app.media_kind_filter {
        Some(kind) => format!(" [{}]", kind.display_name()),
        None => String::new(),
    };
    let block = Block::default()
        .title(format!(" Media ({}){} ", app.media_items.len(), filter))
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_media_detail(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![];

    if let Some(item) = app.selected_media() {
        lines.push(Line::from(vec![
            Span::styled("Name:    ", styles::muted_style()),
            Span::styled(item.display_name().to_string(), styles::list_item_style()),
        ]));
        if let Some(ref mime) = item.mime_type {
            lines.push(Line::from(vec![
                Span::styled("MIME:    ", styles::muted_style()),
                Span::styled(mime.clone(), styles::list_item_style()),
            ]));
        }
        if let Some(ref folder) = item.folder {
            lines.push(Line::from(vec![
                Span::styled("Folder:  ", styles::muted_style()),
                Span::styled(folder.clone(), styles::highlight_style()),
            ]));
        }
        if let Some(ref alt) = item.alt_text {
            lines.push(Line::from(vec![
                Span::styled("Alt:     ", styles::muted_style()),
                Span::styled(
                    truncate(alt, area.width.saturating_sub(12) as usize),
                    styles::list_item_style(),
                ),
            ]));
        }
        if !item.tags.is_empty() {
            lines.push(Line::from(vec![
                Span::styled("Tags:    ", styles::muted_style()),
                Span::styled(item.tags.join(", "), styles::list_item_style()),
            ]));
        }
        if let Some(ref created) = item.created_at {
            lines.push(Line::from(vec![
                Span::styled("Added:   ", styles::muted_style()),
                Span::styled(format_date(created), styles::list_item_style()),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            truncate(&item.url, area.width.saturating_sub(4) as usize),
            styles::muted_style(),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("D", styles::help_key_style()),
            Span::styled(" delete", styles::muted_style()),
        ]));
    } else {
        lines.push(Line::from(Span::styled(
            "No media selected",
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

fn render_folders(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![];

    for folder in &app.media_folders {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<24}", truncate(&folder.name, 23)), styles::list_item_style()),
            Span::styled(format!("{:>5}", folder.count), styles::muted_style()),
        ]));
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled("No folders", styles::muted_style())));
    }

    let block = Block::default()
        .title(" Folders ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
