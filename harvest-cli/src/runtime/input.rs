use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use tokio::time::{self, Interval, MissedTickBehavior};

const TICK_RATE: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Key(KeyEvent),
    /// Nothing happened for a tick; widgets redraw and advance spinners.
    Tick,
    /// The input stream ended. Treated as a cancellation.
    Closed,
}

#[async_trait(?Send)]
pub trait InputSource {
    async fn next_input(&mut self) -> Result<Input>;
}

/// Key presses from the real terminal, interleaved with spinner ticks.
pub struct TerminalInput {
    events: Option<EventStream>,
    ticker: Interval,
}

impl TerminalInput {
    pub fn new() -> Self {
        let mut ticker = time::interval(TICK_RATE);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self {
            events: None,
            ticker,
        }
    }
}

#[async_trait(?Send)]
impl InputSource for TerminalInput {
    async fn next_input(&mut self) -> Result<Input> {
        let events = self.events.get_or_insert_with(EventStream::new);
        loop {
            tokio::select! {
                event = events.next() => match event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        return Ok(Input::Key(key));
                    }
                    Some(Ok(Event::Resize(_, _))) => return Ok(Input::Tick),
                    Some(Ok(_)) => continue,
                    Some(Err(err)) => return Err(err).context("Failed to read terminal input"),
                    None => return Ok(Input::Closed),
                },
                _ = self.ticker.tick() => return Ok(Input::Tick),
            }
        }
    }
}

/// Replays a fixed list of inputs, then reports the stream as closed.
#[cfg(test)]
pub struct ScriptedInput {
    inputs: std::collections::VecDeque<Input>,
}

#[cfg(test)]
impl ScriptedInput {
    pub fn new(keys: impl IntoIterator<Item = KeyEvent>) -> Self {
        Self {
            inputs: keys.into_iter().map(Input::Key).collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }
}

#[cfg(test)]
#[async_trait(?Send)]
impl InputSource for ScriptedInput {
    async fn next_input(&mut self) -> Result<Input> {
        // Let spawned loaders report before the next key is delivered.
        tokio::task::yield_now().await;
        Ok(self.inputs.pop_front().unwrap_or(Input::Closed))
    }
}
