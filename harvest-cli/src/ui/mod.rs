use crate::types::Step;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph},
    Frame,
};

mod prompt_views;
mod selector_view;
pub(super) mod utils;
pub(super) mod widgets;

pub use prompt_views::{render_confirm_prompt, render_date_prompt, render_text_prompt};
pub use selector_view::render_selector;

/// Split the frame into the steps bar and the body the widget draws into.
fn layout_with_steps(frame: &mut Frame, steps: &[Step]) -> Rect {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(frame.area());

    render_steps_bar(frame, root[0], steps);
    root[1]
}

fn render_steps_bar(frame: &mut Frame, area: Rect, steps: &[Step]) {
    let muted = Style::default().fg(Color::DarkGray);

    let mut spans = vec![Span::styled(
        " Harvest ",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )];
    for step in steps {
        spans.push(Span::styled(" | ", muted));
        spans.push(Span::styled(
            format!("{}: ", step.label),
            Style::default().fg(Color::Cyan),
        ));
        spans.push(Span::styled(
            step.value.clone(),
            Style::default().fg(Color::White),
        ));
    }

    let bar = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::BOTTOM).border_style(muted));
    frame.render_widget(bar, area);
}
