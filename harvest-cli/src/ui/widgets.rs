use ratatui::{
    layout::Alignment,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
};

/// Bordered controls hint bar: `Key: action` pairs with the keys highlighted.
pub fn controls_bar(controls: &[(&str, &str)]) -> Paragraph<'static> {
    let mut spans = Vec::with_capacity(controls.len() * 2);
    for (i, (key, action)) in controls.iter().enumerate() {
        let separator = if i + 1 < controls.len() { "  " } else { "" };
        spans.push(Span::styled(
            key.to_string(),
            Style::default().fg(Color::Yellow),
        ));
        spans.push(Span::raw(format!(": {}{}", action, separator)));
    }

    Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(Span::styled(
                    " Controls ",
                    Style::default().fg(Color::DarkGray),
                ))
                .padding(Padding::horizontal(1)),
        )
}

pub fn error_line(message: &str) -> Line<'static> {
    Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(Color::Red),
    ))
}
