use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::DefaultTerminal;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::events::SessionEvent;
use crate::state::AppState;
use crate::ui;

/// The terminal event loop: one select over key input, controller
/// snapshots, and a 1s tick for the elapsed-time display. All state
/// mutation happens here, between renders.
pub struct App {
    state: AppState,
    events: UnboundedReceiver<SessionEvent>,
}

impl App {
    pub fn new(state: AppState, events: UnboundedReceiver<SessionEvent>) -> Self {
        Self { state, events }
    }

    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let mut input = EventStream::new();
        let mut tick = tokio::time::interval(Duration::from_secs(1));

        loop {
            terminal.draw(|frame| ui::draw(frame, &self.state))?;

            tokio::select! {
                event = input.next() => {
                    match event {
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            self.state.on_key(key);
                        }
                        // Resize and the rest just trigger a redraw.
                        Some(Ok(_)) => {}
                        Some(Err(err)) => return Err(err.into()),
                        None => break,
                    }
                }
                Some(event) = self.events.recv() => {
                    self.state.on_session_event(event);
                }
                _ = tick.tick() => {}
            }

            if self.state.should_quit {
                break;
            }
        }

        self.state.shutdown();
        Ok(())
    }
}
