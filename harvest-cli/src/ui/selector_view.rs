use super::widgets::{controls_bar, error_line};
use super::*;
use crate::app::{ReadyState, Selector, SelectorState};
use crate::types::SelectableItem;

pub fn render_selector<T: SelectableItem>(
    frame: &mut Frame,
    selector: &mut Selector<T>,
    steps: &[Step],
) {
    let body = layout_with_steps(frame, steps);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Search input
            Constraint::Min(0),    // Item list
            Constraint::Length(3), // Controls
        ])
        .split(body);

    let title = format!(" {} ", selector.config.title);

    match &selector.state {
        SelectorState::Loading => {
            render_search_box(frame, chunks[0], "", &title);

            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .padding(Padding::uniform(1));
            let inner = block.inner(chunks[1]);
            frame.render_widget(block, chunks[1]);

            let throbber = throbber_widgets_tui::Throbber::default()
                .label(selector.config.loading_message.clone())
                .style(Style::default().fg(Color::White))
                .throbber_style(Style::default().fg(Color::Yellow))
                .throbber_set(throbber_widgets_tui::BRAILLE_SIX)
                .use_type(throbber_widgets_tui::WhichUse::Spin);
            frame.render_stateful_widget(throbber, inner, &mut selector.throbber);

            frame.render_widget(controls_bar(&[("Esc", "Cancel")]), chunks[2]);
        }
        SelectorState::Ready(ready) => {
            render_search_box(frame, chunks[0], ready.filter(), &title);
            render_item_list(frame, chunks[1], ready, &selector.config.empty_message);
            frame.render_widget(
                controls_bar(&[
                    ("Type", "Filter"),
                    ("↑↓", "Navigate"),
                    ("Enter", "Select"),
                    ("Ctrl+X", "Clear"),
                    ("Esc", "Back"),
                    ("Ctrl+Q", "Quit"),
                ]),
                chunks[2],
            );
        }
        SelectorState::Errored(cause) => {
            render_search_box(frame, chunks[0], "", &title);
            let message = Paragraph::new(error_line(cause)).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .padding(Padding::horizontal(1)),
            );
            frame.render_widget(message, chunks[1]);
        }
        SelectorState::Selected(_) | SelectorState::Cancelled => {}
    }
}

fn render_search_box(frame: &mut Frame, area: Rect, filter: &str, title: &str) {
    let text = if filter.is_empty() {
        Span::styled("Type to search...", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(format!("{}█", filter), Style::default().fg(Color::White))
    };

    let search_box = Paragraph::new(Line::from(text))
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(title.to_string())
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(search_box, area);
}

fn render_item_list<T: SelectableItem>(
    frame: &mut Frame,
    area: Rect,
    ready: &ReadyState<T>,
    empty_message: &str,
) {
    // Show count: filtered / total
    let count = if ready.filter().is_empty() {
        format!(" Items ({}) ", ready.items().len())
    } else {
        format!(" Items ({}/{}) ", ready.visible_len(), ready.items().len())
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(count)
        .padding(Padding::horizontal(1));

    if ready.visible_len() == 0 {
        let empty = Paragraph::new(Span::styled(
            empty_message.to_string(),
            Style::default().fg(Color::DarkGray),
        ))
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = ready
        .visible_items()
        .enumerate()
        .map(|(i, item)| {
            let focused = i == ready.highlight();
            let (marker, title_style) = if focused {
                (
                    "> ",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                ("  ", Style::default().fg(Color::White))
            };

            ListItem::new(vec![
                Line::from(Span::styled(format!("{}{}", marker, item.title()), title_style)),
                Line::from(Span::styled(
                    format!("  {}", item.description()),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    let mut list_state = ListState::default().with_selected(Some(ready.highlight()));
    frame.render_stateful_widget(List::new(items).block(block), area, &mut list_state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{SelectorConfig, SelectorEvent};
    use crate::types::fixtures::project;
    use crate::types::ProjectItem;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn renders_loading_message_and_steps() {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let mut selector: Selector<ProjectItem> = Selector::new(
            SelectorConfig::new("Select a Task").loading_message("Loading tasks..."),
        );
        let steps = vec![Step::new("Project", "Website")];

        terminal
            .draw(|frame| render_selector(frame, &mut selector, &steps))
            .unwrap();

        let text = screen(&terminal);
        assert!(text.contains("Loading tasks..."));
        assert!(text.contains("Project: Website"));
    }

    #[test]
    fn renders_visible_items_and_empty_message() {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let mut selector = Selector::new(SelectorConfig::new("Select a Project"));
        selector.handle(SelectorEvent::ItemsLoaded(vec![
            ProjectItem(project(1, "Website", "ABC Corp", &[])),
            ProjectItem(project(2, "Mobile App", "XYZ Inc", &[])),
        ]));

        terminal
            .draw(|frame| render_selector(frame, &mut selector, &[]))
            .unwrap();
        let text = screen(&terminal);
        assert!(text.contains("> Website"));
        assert!(text.contains("Mobile App"));
        assert!(text.contains("Client: XYZ Inc"));

        if let SelectorState::Ready(ready) = &mut selector.state {
            ready.set_filter("nothing matches");
        }
        terminal
            .draw(|frame| render_selector(frame, &mut selector, &[]))
            .unwrap();
        assert!(screen(&terminal).contains("No items found."));
    }
}
