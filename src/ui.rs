use ratatui::{prelude::*, widgets::*};

use crate::constants::PASSCODE_LEN;
use crate::messages::ActivityView;

/// Sidebar navigation entries and the key that triggers each
pub const SIDEBAR_ITEMS: [(&str, &str); 4] = [
    ("Activity", "r"),
    ("Clear activity", "c"),
    ("Logout", "x"),
    ("Close", "b"),
];

/// Passcode field: typed digits followed by placeholders
pub fn render_passcode<'a>(code: &str, failed: bool, pending: bool) -> Paragraph<'a> {
    let mut spans: Vec<Span> = code
        .chars()
        .map(|c| Span::styled(format!(" {} ", c), Style::default().fg(Color::White).bold()))
        .collect();
    for _ in code.chars().count()..PASSCODE_LEN {
        spans.push(Span::styled(" _ ", Style::default().fg(Color::DarkGray)));
    }

    let border = if failed {
        Style::default().fg(Color::Red)
    } else if pending {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Magenta)
    };

    Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(" Passcode "),
        )
}

/// Collapsible sidebar body
pub fn render_sidebar<'a>() -> List<'a> {
    let items: Vec<ListItem> = SIDEBAR_ITEMS
        .iter()
        .map(|(label, key)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:2}", key), Style::default().fg(Color::Cyan).bold()),
                Span::raw(format!(" {}", label)),
            ]))
        })
        .collect();

    List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Indexed(61)))
            .title(" Menu "),
    )
}

/// Current activity widget; the image is shown as a link
pub fn render_activity(view: &ActivityView) -> Paragraph<'_> {
    let mut lines: Vec<Line> = Vec::new();

    match &view.data {
        Some(activity) => {
            lines.push(Line::from(vec![
                Span::styled(activity.title.as_str(), Style::default().bold()),
                Span::styled(" • ", Style::default().fg(Color::Magenta)),
                Span::raw(activity.author.as_str()),
            ]));
            lines.push(Line::from(""));
            lines.push(link_line("Link     ", &activity.url));
            lines.push(link_line("Thumbnail", &activity.thumbnail_url));
            if let Some(image) = &view.image_url {
                lines.push(link_line("Image    ", image));
            }
        }
        None if view.is_pending => lines.push(Line::from("Loading...")),
        None => lines.push(Line::from(Span::styled(
            "No current activity",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    if let Some(err) = &view.error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("! {}", err),
            Style::default().fg(Color::Red),
        )));
    }

    let mut title = String::from(" Activity ");
    if view.is_pending && view.data.is_some() {
        title.push_str("[...] ");
    }
    if view.is_clearing {
        title.push_str("[clearing] ");
    }

    let updated = view
        .fetched_at
        .map(|t| {
            format!(
                " updated {} ",
                t.with_timezone(&chrono::Local).format("%H:%M:%S")
            )
        })
        .unwrap_or_default();

    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Indexed(61)))
                .title(title)
                .title_bottom(Line::from(updated).right_aligned()),
        )
}

fn link_line<'a>(label: &'a str, url: &'a str) -> Line<'a> {
    let value = if url.is_empty() { "-" } else { url };
    Line::from(vec![
        Span::styled(label, Style::default().fg(Color::DarkGray)),
        Span::raw("  "),
        Span::styled(value, Style::default().fg(Color::Cyan).underlined()),
    ])
}

/// Rect of the given size percentages, centered in `r`
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Fixed-size box centered in `r`, clamped to its bounds
pub fn centered_box(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect::new(
        r.x + (r.width - width) / 2,
        r.y + (r.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_box_clamps() {
        let area = Rect::new(0, 0, 10, 4);
        assert_eq!(centered_box(30, 3, area), Rect::new(0, 0, 10, 3));
        assert_eq!(centered_box(4, 2, area), Rect::new(3, 1, 4, 2));
    }
}
