use super::utils::{centered_rect, cursor_text};
use super::widgets::{controls_bar, error_line};
use super::*;
use crate::app::{ConfirmPrompt, DatePrompt, PromptState, TextPrompt};
use crate::time_utils::format_date;

const DIALOG_WIDTH: u16 = 64;

pub fn render_text_prompt(frame: &mut Frame, prompt: &TextPrompt, steps: &[Step]) {
    let body = layout_with_steps(frame, steps);

    let buffer = if prompt.config.password {
        let (before, after) = prompt.state.input.masked_split_at_cursor('•');
        cursor_text(&before, &after, &prompt.config.placeholder)
    } else {
        let (before, after) = prompt.state.input.split_at_cursor();
        cursor_text(before, after, &prompt.config.placeholder)
    };

    let counter = format!("{} left", prompt.remaining_chars());

    render_input_dialog(
        frame,
        body,
        InputDialog {
            title: &prompt.config.title,
            prompt_text: &prompt.config.prompt_text,
            buffer,
            placeholder_shown: prompt.state.input.is_empty(),
            counter: Some(counter),
            state: &prompt.state,
        },
    );
}

pub fn render_date_prompt(frame: &mut Frame, prompt: &DatePrompt, steps: &[Step]) {
    let body = layout_with_steps(frame, steps);

    let (before, after) = prompt.state.input.split_at_cursor();
    let placeholder = format_date(prompt.today());
    let prompt_text = format!("Date (YYYY-MM-DD), empty for today ({}):", placeholder);

    render_input_dialog(
        frame,
        body,
        InputDialog {
            title: &prompt.title,
            prompt_text: &prompt_text,
            buffer: cursor_text(before, after, &placeholder),
            placeholder_shown: prompt.state.input.is_empty(),
            counter: None,
            state: &prompt.state,
        },
    );
}

pub fn render_confirm_prompt(frame: &mut Frame, prompt: &ConfirmPrompt, steps: &[Step]) {
    let body = layout_with_steps(frame, steps);
    let area = centered_rect(DIALOG_WIDTH.min(body.width), 8, body);
    frame.render_widget(Clear, area);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            prompt.message.clone(),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[y] Yes", Style::default().fg(Color::Green)),
            Span::raw("    "),
            Span::styled("[n] No", Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("[Esc] Cancel", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", prompt.title))
                .padding(Padding::horizontal(1)),
        )
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

struct InputDialog<'a> {
    title: &'a str,
    prompt_text: &'a str,
    buffer: String,
    placeholder_shown: bool,
    counter: Option<String>,
    state: &'a PromptState,
}

fn render_input_dialog(frame: &mut Frame, body: Rect, dialog: InputDialog<'_>) {
    let area = centered_rect(DIALOG_WIDTH.min(body.width), 11, body);
    frame.render_widget(Clear, area);

    let outer = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", dialog.title))
        .padding(Padding::horizontal(1));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Prompt text
            Constraint::Length(3), // Input box
            Constraint::Length(1), // Validation error
            Constraint::Min(0),
            Constraint::Length(3), // Controls
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(Span::styled(
            dialog.prompt_text.to_string(),
            Style::default().fg(Color::Cyan),
        )),
        chunks[0],
    );

    let buffer_style = if dialog.placeholder_shown {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };
    let mut input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));
    if let Some(counter) = dialog.counter {
        input_block = input_block.title_bottom(
            Line::from(Span::styled(
                format!(" {} ", counter),
                Style::default().fg(Color::DarkGray),
            ))
            .right_aligned(),
        );
    }
    frame.render_widget(
        Paragraph::new(Span::styled(dialog.buffer, buffer_style)).block(input_block),
        chunks[1],
    );

    if let Some(error) = &dialog.state.validation_error {
        frame.render_widget(Paragraph::new(error_line(error)), chunks[2]);
    }

    frame.render_widget(
        controls_bar(&[("Enter", "Submit"), ("Esc", "Cancel")]),
        chunks[4],
    );
}
