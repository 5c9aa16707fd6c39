use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Helper function to create a centered rectangle
pub fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((r.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((r.height.saturating_sub(height)) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((r.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((r.width.saturating_sub(width)) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Render an edit buffer with a block cursor, or the placeholder when empty.
pub fn cursor_text(before: &str, after: &str, placeholder: &str) -> String {
    if before.is_empty() && after.is_empty() && !placeholder.is_empty() {
        return format!("█{}", placeholder);
    }
    format!("{}█{}", before, after)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_fits_inside() {
        let outer = Rect::new(0, 0, 100, 40);
        let inner = centered_rect(60, 10, outer);
        assert_eq!(inner, Rect::new(20, 15, 60, 10));
    }

    #[test]
    fn cursor_text_shows_placeholder_only_when_empty() {
        assert_eq!(cursor_text("", "", "1h30m"), "█1h30m");
        assert_eq!(cursor_text("1", "h", "1h30m"), "1█h");
    }
}
