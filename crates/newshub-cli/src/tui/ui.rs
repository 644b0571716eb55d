//! UI rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::app::{ActivePane, App, InputMode};
use newshub_core::Article;

/// Main UI rendering function
pub fn draw(frame: &mut Frame, app: &App) {
    let outer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let pane_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(outer_chunks[1]);

    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(pane_chunks[1]);

    draw_title_bar(frame, app, outer_chunks[0]);
    draw_feed_pane(frame, app, pane_chunks[0]);
    draw_library_pane(frame, app, right_chunks[0]);
    draw_detail_pane(frame, app, right_chunks[1]);

    match app.input_mode {
        InputMode::Normal => draw_status_bar(frame, app, outer_chunks[2]),
        InputMode::Search => draw_search_input(frame, app, outer_chunks[2]),
    }

    if app.show_help {
        draw_help_overlay(frame);
    }
}

/// App name, current feed, and the bookmark badge
fn draw_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let badge = format!(" ★ {} ", app.badge_count());
    let line = Line::from(vec![
        Span::styled(" NewsHub ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" "),
        Span::raw(app.feed_request.title()),
        Span::styled(
            format!("  [{}]", app.country),
            Style::default().add_modifier(Modifier::DIM),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);

    let badge_width = badge.chars().count() as u16;
    if area.width > badge_width {
        let badge_area = Rect::new(area.x + area.width - badge_width, area.y, badge_width, 1);
        let style = if app.badge_count() > 0 {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        frame.render_widget(Paragraph::new(Span::styled(badge, style)), badge_area);
    }
}

fn pane_styles(is_active: bool) -> (Style, Style) {
    let border_style = if is_active {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let highlight_style = if is_active {
        Style::default()
            .add_modifier(Modifier::BOLD)
            .add_modifier(Modifier::REVERSED)
    } else {
        Style::default().add_modifier(Modifier::REVERSED)
    };
    (border_style, highlight_style)
}

/// Draw the feed pane (left)
fn draw_feed_pane(frame: &mut Frame, app: &App, area: Rect) {
    let (border_style, highlight_style) = pane_styles(app.active_pane == ActivePane::Feed);
    let max_len = area.width.saturating_sub(6) as usize;

    let items: Vec<ListItem> = app
        .feed
        .iter()
        .map(|toggle| {
            let article = toggle.article();
            let (marker, marker_style) = if toggle.is_bookmarked() {
                ("★ ", Style::default().fg(Color::Yellow))
            } else {
                ("☆ ", Style::default().add_modifier(Modifier::DIM))
            };

            let title_line = Line::from(vec![
                Span::styled(marker, marker_style),
                Span::raw(clip(&article.title, max_len)),
            ]);
            let byline = Line::from(vec![Span::styled(
                format!("  {}", clip(&source_line(article), max_len)),
                Style::default().add_modifier(Modifier::DIM),
            )]);

            ListItem::new(vec![title_line, byline])
        })
        .collect();

    let title = if app.is_loading {
        " Feed (loading...) ".to_string()
    } else {
        format!(" Feed ({}) ", app.feed.len())
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style);

    let mut state = ListState::default();
    if !app.feed.is_empty() {
        state.select(Some(app.feed_index));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

/// Draw the offline library pane (top right)
fn draw_library_pane(frame: &mut Frame, app: &App, area: Rect) {
    let (border_style, highlight_style) = pane_styles(app.active_pane == ActivePane::Library);
    let max_len = area.width.saturating_sub(4) as usize;
    let entries = app.library_entries();

    let items: Vec<ListItem> = if entries.is_empty() {
        vec![ListItem::new(Span::styled(
            "Nothing saved yet. Press b on an article.",
            Style::default().add_modifier(Modifier::DIM),
        ))]
    } else {
        entries
            .iter()
            .map(|entry| ListItem::new(clip(&entry.title, max_len)))
            .collect()
    };

    let block = Block::default()
        .title(format!(" Offline Library ({}) ", entries.len()))
        .borders(Borders::ALL)
        .border_style(border_style);

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style);

    let mut state = ListState::default();
    if !entries.is_empty() {
        state.select(Some(app.library_index));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

/// Draw the detail pane (bottom right)
fn draw_detail_pane(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().title(" Detail ").borders(Borders::ALL);

    let selected = match app.active_pane {
        ActivePane::Feed => app.current_article().cloned().map(|a| (a, None)),
        ActivePane::Library => app
            .current_entry()
            .map(|e| (e.to_article(), Some(e.bookmarked_at))),
    };

    let content = match selected {
        Some((article, saved_at)) => {
            let bold = Style::default().add_modifier(Modifier::BOLD);
            let mut lines = vec![
                Line::from(Span::styled(article.title.clone(), bold)),
                Line::from(Span::styled(
                    source_line(&article),
                    Style::default().add_modifier(Modifier::DIM),
                )),
                Line::from(""),
            ];

            if let Some(summary) = &article.ai_summary {
                lines.push(Line::from(vec![
                    Span::styled("Summary: ", bold),
                    Span::raw(summary.clone()),
                ]));
                lines.push(Line::from(""));
            }
            if let Some(desc) = &article.description {
                lines.push(Line::from(desc.clone()));
                lines.push(Line::from(""));
            }
            lines.push(Line::from(vec![
                Span::styled("URL: ", bold),
                Span::raw(article.url.clone()),
            ]));
            if let Some(saved_at) = saved_at {
                lines.push(Line::from(vec![
                    Span::styled("Saved: ", bold),
                    Span::raw(saved_at.format("%Y-%m-%d %H:%M").to_string()),
                ]));
            }
            lines
        }
        None => vec![
            Line::from(""),
            Line::from(Span::styled(
                "Select an article to view details",
                Style::default().add_modifier(Modifier::DIM),
            )),
        ],
    };

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

/// Draw the status bar at the bottom
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let content = if app.is_loading {
        "Loading...".to_string()
    } else if let Some(msg) = &app.status_message {
        msg.clone()
    } else {
        "b:save  d:remove  o:open  [/]:category  s:summaries  t:top  /:search  r:refresh  ?:help  q:quit"
            .to_string()
    };

    let paragraph = Paragraph::new(content).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Draw search input at the bottom
fn draw_search_input(frame: &mut Frame, app: &App, area: Rect) {
    let prefix = "/";
    let line = Line::from(vec![
        Span::styled(prefix, Style::default().fg(Color::Cyan)),
        Span::raw(app.search_input.as_str()),
    ]);

    frame.render_widget(Paragraph::new(line), area);

    let cursor_x = area.x + prefix.len() as u16 + app.search_input.chars().count() as u16;
    frame.set_cursor_position((cursor_x, area.y));
}

/// Draw help overlay
fn draw_help_overlay(frame: &mut Frame) {
    let area = frame.area();

    let popup_width = 50.min(area.width.saturating_sub(4));
    let popup_height = 22.min(area.height.saturating_sub(4));
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from("Navigation:"),
        Line::from("  j/k, ↑/↓    Move up/down"),
        Line::from("  Tab, h/l    Switch between feed and library"),
        Line::from("  o, Enter    Open article in browser"),
        Line::from(""),
        Line::from("Bookmarks:"),
        Line::from("  b           Save / unsave article"),
        Line::from("  d           Remove from library"),
        Line::from("  C C         Clear the whole library"),
        Line::from(""),
        Line::from("Feeds:"),
        Line::from("  [ / ]       Previous / next category"),
        Line::from("  s           Toggle AI summaries"),
        Line::from("  t           Top stories"),
        Line::from("  /           Search"),
        Line::from("  r           Refresh"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().add_modifier(Modifier::BOLD));

    frame.render_widget(Paragraph::new(help_text).block(block), popup_area);
}

fn source_line(article: &Article) -> String {
    let mut parts = Vec::new();
    if let Some(name) = article.source_name() {
        parts.push(name.to_string());
    }
    if let Some(author) = &article.author {
        parts.push(author.clone());
    }
    if let Some(published) = &article.published_at {
        parts.push(published.split('T').next().unwrap_or(published.as_str()).to_string());
    }
    parts.join(" · ")
}

/// Clip to `max` characters with an ellipsis
fn clip(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use newshub_core::{BookmarkRepository, MemoryStore, NotificationBus};
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_clip() {
        assert_eq!(clip("short", 10), "short");
        assert_eq!(clip("a longer title", 6), "a lon…");
    }

    #[test]
    fn test_source_line() {
        let mut article = Article::new("https://news.example/1", "One");
        article.source = Some(newshub_core::Source::named("Wire"));
        article.published_at = Some("2024-03-01T12:00:00Z".to_string());
        assert_eq!(source_line(&article), "Wire · 2024-03-01");
    }

    #[test]
    fn test_badge_renders_count() {
        let repo = Arc::new(BookmarkRepository::new(
            Box::new(MemoryStore::new()),
            NotificationBus::new(),
        ));
        let mut app = App::new(repo.clone(), "us".to_string());
        app.set_feed(vec![Article::new("https://news.example/1", "Rates hold")]);

        assert!(render(&app).contains("★ 0"));

        repo.add(&Article::new("https://news.example/1", "Rates hold"))
            .unwrap();
        let screen = render(&app);
        assert!(screen.contains("★ 1"));
        assert!(screen.contains("Offline Library (1)"));
    }
}
