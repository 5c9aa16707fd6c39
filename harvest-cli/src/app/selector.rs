use std::mem;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use throbber_widgets_tui::ThrobberState;

use super::{is_interrupt, is_plain_char};
use crate::types::SelectableItem;

const PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct SelectorConfig {
    pub title: String,
    pub empty_message: String,
    pub loading_message: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            title: "Select an Item".to_string(),
            empty_message: "No items found.".to_string(),
            loading_message: "Loading items...".to_string(),
        }
    }
}

impl SelectorConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    pub fn loading_message(mut self, message: impl Into<String>) -> Self {
        self.loading_message = message.into();
        self
    }
}

/// Everything a selector reacts to: the load result and key presses.
#[derive(Debug)]
pub enum SelectorEvent<T> {
    ItemsLoaded(Vec<T>),
    ItemsFailed(String),
    Key(KeyEvent),
}

/// Loaded items plus the filter and highlight the user is working with.
#[derive(Debug, Clone)]
pub struct ReadyState<T> {
    items: Vec<T>,
    filter: String,
    visible: Vec<usize>,
    highlight: usize,
}

impl<T: SelectableItem> ReadyState<T> {
    pub fn new(items: Vec<T>) -> Self {
        let visible = (0..items.len()).collect();
        Self {
            items,
            filter: String::new(),
            visible,
            highlight: 0,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn highlight(&self) -> usize {
        self.highlight
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn visible_items(&self) -> impl Iterator<Item = &T> + '_ {
        self.visible.iter().map(|&i| &self.items[i])
    }

    #[cfg(test)]
    pub fn set_filter(&mut self, filter: &str) {
        self.filter = filter.to_string();
        self.refilter();
    }

    fn push_filter_char(&mut self, c: char) {
        self.filter.push(c);
        self.refilter();
    }

    fn pop_filter_char(&mut self) {
        if self.filter.pop().is_some() {
            self.refilter();
        }
    }

    fn clear_filter(&mut self) {
        if !self.filter.is_empty() {
            self.filter.clear();
            self.refilter();
        }
    }

    fn refilter(&mut self) {
        let needle = self.filter.to_lowercase();
        self.visible = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| matches_filter(*item, &needle))
            .map(|(i, _)| i)
            .collect();
        self.highlight = 0;
    }

    fn last_index(&self) -> usize {
        self.visible.len().saturating_sub(1)
    }

    fn move_up(&mut self, by: usize) {
        self.highlight = self.highlight.saturating_sub(by);
    }

    fn move_down(&mut self, by: usize) {
        self.highlight = (self.highlight + by).min(self.last_index());
    }

    pub fn handle_key(mut self, key: KeyEvent) -> SelectorState<T> {
        if is_quit(&key) {
            return SelectorState::Cancelled;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('x') | KeyCode::Char('X'))
        {
            self.clear_filter();
            return SelectorState::Ready(self);
        }

        if let Some(c) = is_plain_char(&key) {
            self.push_filter_char(c);
            return SelectorState::Ready(self);
        }

        match key.code {
            KeyCode::Enter => {
                if let Some(&i) = self.visible.get(self.highlight) {
                    return SelectorState::Selected(self.items.swap_remove(i));
                }
            }
            KeyCode::Esc if self.filter.is_empty() => return SelectorState::Cancelled,
            KeyCode::Esc => self.clear_filter(),
            KeyCode::Backspace => self.pop_filter_char(),
            KeyCode::Up => self.move_up(1),
            KeyCode::Down => self.move_down(1),
            KeyCode::PageUp => self.move_up(PAGE_SIZE),
            KeyCode::PageDown => self.move_down(PAGE_SIZE),
            KeyCode::Home => self.highlight = 0,
            KeyCode::End => self.highlight = self.last_index(),
            _ => {}
        }
        SelectorState::Ready(self)
    }
}

/// Case-insensitive substring match against title followed by description.
/// `needle` must already be lowercase.
pub fn matches_filter<T: SelectableItem>(item: &T, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    format!("{}{}", item.title(), item.description())
        .to_lowercase()
        .contains(needle)
}

fn is_quit(key: &KeyEvent) -> bool {
    is_interrupt(key)
        || (key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q')))
}

#[derive(Debug, Clone)]
pub enum SelectorState<T> {
    Loading,
    Ready(ReadyState<T>),
    Selected(T),
    Errored(String),
    Cancelled,
}

impl<T: SelectableItem> SelectorState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, SelectorState::Loading)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SelectorState::Selected(_) | SelectorState::Errored(_) | SelectorState::Cancelled
        )
    }

    pub fn handle(&mut self, event: SelectorEvent<T>) {
        let current = mem::replace(self, SelectorState::Cancelled);
        *self = match (current, event) {
            (SelectorState::Loading, SelectorEvent::ItemsLoaded(items)) => {
                SelectorState::Ready(ReadyState::new(items))
            }
            (SelectorState::Loading, SelectorEvent::ItemsFailed(cause)) => {
                SelectorState::Errored(cause)
            }
            (SelectorState::Loading, SelectorEvent::Key(key))
                if key.code == KeyCode::Esc || is_quit(&key) =>
            {
                SelectorState::Cancelled
            }
            (SelectorState::Ready(ready), SelectorEvent::Key(key)) => ready.handle_key(key),
            (state, _) => state,
        };
    }
}

/// A selector widget: its state plus the spinner shown while loading.
pub struct Selector<T> {
    pub config: SelectorConfig,
    pub state: SelectorState<T>,
    pub throbber: ThrobberState,
}

impl<T: SelectableItem> Selector<T> {
    pub fn new(config: SelectorConfig) -> Self {
        Self {
            config,
            state: SelectorState::Loading,
            throbber: ThrobberState::default(),
        }
    }

    pub fn handle(&mut self, event: SelectorEvent<T>) {
        self.state.handle(event);
    }

    pub fn tick(&mut self) {
        if self.state.is_loading() {
            self.throbber.calc_next();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::keys::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Fruit {
        id: u32,
        name: String,
        origin: String,
    }

    impl SelectableItem for Fruit {
        fn identifier(&self) -> String {
            self.id.to_string()
        }

        fn title(&self) -> &str {
            &self.name
        }

        fn description(&self) -> String {
            format!("from {}", self.origin)
        }
    }

    fn fruits() -> Vec<Fruit> {
        [
            (1, "Apple", "Sweden"),
            (2, "Banana", "Ecuador"),
            (3, "Cherry", "Chile"),
            (4, "Date", "Egypt"),
            (5, "Elderberry", "Sweden"),
        ]
        .into_iter()
        .map(|(id, name, origin)| Fruit {
            id,
            name: name.to_string(),
            origin: origin.to_string(),
        })
        .collect()
    }

    fn ready() -> ReadyState<Fruit> {
        ReadyState::new(fruits())
    }

    fn loaded() -> SelectorState<Fruit> {
        let mut state = SelectorState::Loading;
        state.handle(SelectorEvent::ItemsLoaded(fruits()));
        state
    }

    fn press(state: &mut SelectorState<Fruit>, keys: impl IntoIterator<Item = KeyEvent>) {
        for key in keys {
            state.handle(SelectorEvent::Key(key));
        }
    }

    fn visible_ids(state: &SelectorState<Fruit>) -> Vec<u32> {
        match state {
            SelectorState::Ready(ready) => ready.visible_items().map(|f| f.id).collect(),
            _ => panic!("selector is not ready"),
        }
    }

    fn highlight(state: &SelectorState<Fruit>) -> usize {
        match state {
            SelectorState::Ready(ready) => ready.highlight(),
            _ => panic!("selector is not ready"),
        }
    }

    #[test]
    fn visible_subset_matches_filter_case_insensitively() {
        let filters = ["", "a", "SWE", "ry", "from c", "egypt", "zzz", "e"];
        for filter in filters {
            let mut state = ready();
            state.set_filter(filter);

            let expected: Vec<u32> = fruits()
                .into_iter()
                .filter(|f| {
                    format!("{}{}", f.title(), f.description())
                        .to_lowercase()
                        .contains(&filter.to_lowercase())
                })
                .map(|f| f.id)
                .collect();
            let actual: Vec<u32> = state.visible_items().map(|f| f.id).collect();
            assert_eq!(actual, expected, "filter {filter:?}");
        }
    }

    #[test]
    fn filtering_twice_is_idempotent() {
        for filter in ["an", "sweden", "x", ""] {
            let mut state = ready();
            state.set_filter(filter);
            let first: Vec<u32> = state.visible_items().map(|f| f.id).collect();
            state.set_filter(filter);
            let second: Vec<u32> = state.visible_items().map(|f| f.id).collect();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn filter_matches_across_title_and_description_boundary() {
        let mut state = ready();
        state.set_filter("applefrom");
        let ids: Vec<u32> = state.visible_items().map(|f| f.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn typing_filters_and_resets_highlight() {
        let mut state = loaded();
        press(&mut state, [key(KeyCode::Down), key(KeyCode::Down)]);
        assert_eq!(highlight(&state), 2);

        press(&mut state, text("swe"));
        assert_eq!(visible_ids(&state), vec![1, 5]);
        assert_eq!(highlight(&state), 0);
    }

    #[test]
    fn highlight_stays_in_bounds_after_every_key() {
        let mut state = loaded();
        let script = [
            key(KeyCode::End),
            ch('e'),
            key(KeyCode::PageDown),
            ch('r'),
            key(KeyCode::Down),
            key(KeyCode::Down),
            key(KeyCode::Backspace),
            key(KeyCode::PageUp),
            key(KeyCode::Up),
            ch('q'),
            key(KeyCode::End),
            ctrl('x'),
            key(KeyCode::End),
        ];

        for key in script {
            state.handle(SelectorEvent::Key(key));
            let SelectorState::Ready(ready) = &state else {
                panic!("selector left the ready state");
            };
            assert!(
                ready.visible_len() == 0 || ready.highlight() < ready.visible_len(),
                "highlight {} out of {}",
                ready.highlight(),
                ready.visible_len()
            );
        }
    }

    #[test]
    fn navigation_clamps_without_wrapping() {
        let mut state = loaded();
        press(&mut state, [key(KeyCode::Up)]);
        assert_eq!(highlight(&state), 0);

        press(&mut state, [key(KeyCode::PageDown)]);
        assert_eq!(highlight(&state), 4);

        press(&mut state, [key(KeyCode::Down)]);
        assert_eq!(highlight(&state), 4);

        press(&mut state, [key(KeyCode::Home)]);
        assert_eq!(highlight(&state), 0);
    }

    #[test]
    fn enter_selects_highlighted_visible_item() {
        let mut state = loaded();
        press(&mut state, text("swe"));
        press(&mut state, [key(KeyCode::Down), enter()]);

        match state {
            SelectorState::Selected(fruit) => assert_eq!(fruit.name, "Elderberry"),
            other => panic!("expected selection, got {other:?}"),
        }
    }

    #[test]
    fn enter_with_nothing_visible_does_nothing() {
        let mut state = loaded();
        press(&mut state, text("zzz"));
        press(&mut state, [enter()]);
        assert!(visible_ids(&state).is_empty());
    }

    #[test]
    fn escape_clears_filter_before_cancelling() {
        let mut state = loaded();
        press(&mut state, text("che"));
        press(&mut state, [esc()]);
        assert_eq!(visible_ids(&state).len(), 5);

        press(&mut state, [esc()]);
        assert!(matches!(state, SelectorState::Cancelled));
    }

    #[test]
    fn ctrl_x_clears_filter() {
        let mut state = loaded();
        press(&mut state, text("banana"));
        press(&mut state, [ctrl('x')]);
        match &state {
            SelectorState::Ready(ready) => assert_eq!(ready.filter(), ""),
            _ => panic!("selector is not ready"),
        }
    }

    #[test]
    fn quit_keys_cancel_even_with_filter() {
        for quit in [ctrl('c'), ctrl('q')] {
            let mut state = loaded();
            press(&mut state, text("a"));
            press(&mut state, [quit]);
            assert!(matches!(state, SelectorState::Cancelled));
        }
    }

    #[test]
    fn plain_q_is_filter_text() {
        let mut state = loaded();
        press(&mut state, [ch('q')]);
        assert!(visible_ids(&state).is_empty());
    }

    #[test]
    fn load_failure_is_terminal() {
        let mut state: SelectorState<Fruit> = SelectorState::Loading;
        state.handle(SelectorEvent::ItemsFailed("boom".to_string()));
        assert!(matches!(&state, SelectorState::Errored(cause) if cause == "boom"));

        state.handle(SelectorEvent::ItemsLoaded(fruits()));
        assert!(state.is_terminal());
        assert!(matches!(state, SelectorState::Errored(_)));
    }

    #[test]
    fn escape_while_loading_cancels_and_drops_late_result() {
        let mut state: SelectorState<Fruit> = SelectorState::Loading;
        state.handle(SelectorEvent::Key(ch('a')));
        assert!(state.is_loading());

        state.handle(SelectorEvent::Key(esc()));
        assert!(matches!(state, SelectorState::Cancelled));

        state.handle(SelectorEvent::ItemsLoaded(fruits()));
        assert!(matches!(state, SelectorState::Cancelled));
    }

    #[test]
    fn empty_load_is_ready_and_still_quits() {
        let mut state: SelectorState<Fruit> = SelectorState::Loading;
        state.handle(SelectorEvent::ItemsLoaded(Vec::new()));
        assert!(visible_ids(&state).is_empty());

        press(&mut state, [enter()]);
        assert!(!state.is_terminal());

        press(&mut state, [ctrl('q')]);
        assert!(matches!(state, SelectorState::Cancelled));
    }

    #[test]
    fn throbber_only_advances_while_loading() {
        let mut selector: Selector<Fruit> = Selector::new(SelectorConfig::new("Fruit"));
        selector.tick();
        assert!(selector.state.is_loading());

        selector.handle(SelectorEvent::ItemsLoaded(fruits()));
        selector.tick();
        assert!(matches!(selector.state, SelectorState::Ready(_)));
    }

    #[test]
    fn config_defaults() {
        let config = SelectorConfig::default();
        assert_eq!(config.title, "Select an Item");
        assert_eq!(config.empty_message, "No items found.");
        assert_eq!(config.loading_message, "Loading items...");
    }
}
