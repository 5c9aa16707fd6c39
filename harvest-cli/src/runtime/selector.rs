use std::future::Future;
use std::mem;

use tokio::sync::mpsc;

use super::input::{Input, InputSource};
use super::session::Session;
use super::terminal::Surface;
use crate::app::{Selector, SelectorConfig, SelectorEvent, SelectorState};
use crate::types::SelectableItem;
use crate::ui;

#[derive(Debug, thiserror::Error)]
pub enum SelectorError {
    #[error("Failed to load items: {0}")]
    LoadFailed(String),
    #[error("Selection cancelled")]
    Cancelled,
    #[error(transparent)]
    Terminal(#[from] anyhow::Error),
}

/// Run a selector until the user picks an item, cancels, or the load fails.
///
/// `loader` is spawned once; its result arrives on a channel polled alongside key input.
/// If the selector finishes before the load does, the late result is discarded.
pub async fn run_selector<T, F, S, I>(
    session: &mut Session<S, I>,
    config: SelectorConfig,
    loader: F,
) -> Result<T, SelectorError>
where
    T: SelectableItem,
    F: Future<Output = anyhow::Result<Vec<T>>> + Send + 'static,
    S: Surface,
    I: InputSource,
{
    let (tx, mut rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        let event = match loader.await {
            Ok(items) => SelectorEvent::ItemsLoaded(items),
            Err(err) => SelectorEvent::ItemsFailed(format!("{err:#}")),
        };
        let _ = tx.send(event);
    });

    let mut selector = Selector::new(config);

    loop {
        session.draw(|frame, steps| ui::render_selector(frame, &mut selector, steps))?;

        let event = tokio::select! {
            biased;
            event = rx.recv(), if selector.state.is_loading() => match event {
                Some(event) => event,
                None => SelectorEvent::ItemsFailed("loader stopped before returning items".to_string()),
            },
            input = session.next_input() => match input? {
                Input::Key(key) => SelectorEvent::Key(key),
                Input::Tick => {
                    selector.tick();
                    continue;
                }
                Input::Closed => return Err(SelectorError::Cancelled),
            },
        };

        selector.handle(event);

        if selector.state.is_terminal() {
            return match mem::replace(&mut selector.state, SelectorState::Cancelled) {
                SelectorState::Selected(item) => {
                    tracing::debug!(id = %item.identifier(), title = item.title(), "item selected");
                    Ok(item)
                }
                SelectorState::Errored(cause) => Err(SelectorError::LoadFailed(cause)),
                _ => Err(SelectorError::Cancelled),
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::keys::*;
    use crate::runtime::{ScriptedInput, TestSurface};
    use crate::types::fixtures::project;
    use crate::types::ProjectItem;
    use crossterm::event::KeyCode;

    fn items() -> Vec<ProjectItem> {
        vec![
            ProjectItem(project(12, "Website", "ABC Corp", &[])),
            ProjectItem(project(13, "Mobile App", "XYZ Inc", &[])),
            ProjectItem(project(14, "Internal", "ABC Corp", &[])),
        ]
    }

    fn session(
        keys: impl IntoIterator<Item = crossterm::event::KeyEvent>,
    ) -> Session<TestSurface, ScriptedInput> {
        Session::new(TestSurface::default(), ScriptedInput::new(keys))
    }

    #[tokio::test]
    async fn selects_highlighted_item_after_load() {
        let mut session = session([key(KeyCode::Down), enter()]);
        let loaded = items();

        let item = run_selector(&mut session, SelectorConfig::new("Project"), async move {
            Ok(loaded)
        })
        .await
        .unwrap();

        assert_eq!(item.project_id(), 13);
        assert_eq!(session.input().remaining(), 0);
    }

    #[tokio::test]
    async fn filter_narrows_before_selection() {
        let mut keys = text("abc");
        keys.extend([key(KeyCode::Down), enter()]);
        let mut session = session(keys);
        let loaded = items();

        let item = run_selector(&mut session, SelectorConfig::new("Project"), async move {
            Ok(loaded)
        })
        .await
        .unwrap();

        assert_eq!(item.project_id(), 14);
    }

    #[tokio::test]
    async fn load_failure_surfaces_cause() {
        let mut session = session([enter()]);

        let result = run_selector::<ProjectItem, _, _, _>(
            &mut session,
            SelectorConfig::new("Project"),
            async { Err(anyhow::anyhow!("401 Unauthorized")) },
        )
        .await;

        match result {
            Err(SelectorError::LoadFailed(cause)) => assert!(cause.contains("401")),
            other => panic!("expected load failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn escape_while_loading_cancels() {
        let mut session = session([esc()]);

        let result = run_selector::<ProjectItem, _, _, _>(
            &mut session,
            SelectorConfig::new("Project"),
            futures::future::pending(),
        )
        .await;

        assert!(matches!(result, Err(SelectorError::Cancelled)));
    }

    #[tokio::test]
    async fn closed_input_cancels() {
        let mut session = session([]);
        let loaded = items();

        let result = run_selector(&mut session, SelectorConfig::new("Project"), async move {
            Ok(loaded)
        })
        .await;

        assert!(matches!(result, Err(SelectorError::Cancelled)));
    }

    #[tokio::test]
    async fn empty_list_can_still_be_quit() {
        let mut session = session([enter(), ctrl('q')]);

        let result = run_selector::<ProjectItem, _, _, _>(
            &mut session,
            SelectorConfig::new("Project").empty_message("No projects assigned."),
            async { Ok(Vec::new()) },
        )
        .await;

        assert!(matches!(result, Err(SelectorError::Cancelled)));
        assert_eq!(session.input().remaining(), 0);
    }
}
