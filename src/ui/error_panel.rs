//! Error message panel

use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows needed to show `message` wrapped at `width` columns
pub fn height(message: &str, width: u16) -> u16 {
    let inner = usize::from(width.saturating_sub(2)).max(1);
    let lines: usize = message.lines().map(|line| wrapped_rows(line, inner)).sum();
    u16::try_from(lines.max(1)).unwrap_or(u16::MAX).saturating_add(2)
}

/// Rows a word-wrapped line occupies; words wider than a row are split
fn wrapped_rows(line: &str, inner: usize) -> usize {
    let mut rows = 1;
    let mut used = 0;
    for word in line.split_whitespace() {
        let len = word.chars().count();
        if used > 0 && used + 1 + len <= inner {
            used += 1 + len;
            continue;
        }
        if used > 0 {
            rows += 1;
        }
        rows += (len - 1) / inner;
        used = (len - 1) % inner + 1;
    }
    rows
}

/// Renders `message` in a red bordered panel
pub fn render(frame: &mut Frame, message: &str) {
    let block = Block::default()
        .title(Span::styled(
            " Error ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let paragraph = Paragraph::new(message.to_string())
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true })
        .block(block);

    frame.render_widget(paragraph, frame.area());
}
