//! Event handling for the TUI
//!
//! Terminal input and animation ticks are merged into one channel so the
//! application sees a single serialized stream of events.

use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, MouseEvent};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Application events
#[derive(Debug, Clone)]
pub enum Event {
    /// Keyboard input
    Key(KeyEvent),
    /// Mouse input
    Mouse(MouseEvent),
    /// Terminal resized; the next frame recomputes the layout
    Resize,
    /// Terminal tick (for animations)
    Tick,
}

/// Event handler that runs in a separate task
pub struct EventHandler {
    /// Receiver for events
    receiver: mpsc::UnboundedReceiver<Event>,
    /// Reader task
    task: JoinHandle<()>,
}

impl EventHandler {
    /// Spawn the reader task
    pub fn new(tick_rate: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let task = tokio::spawn(read_events(sender, tick_rate));
        Self { receiver, task }
    }

    /// Receive the next event
    pub async fn next(&mut self) -> Option<Event> {
        self.receiver.recv().await
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn read_events(sender: mpsc::UnboundedSender<Event>, tick_rate: Duration) {
    let mut reader = EventStream::new();
    let mut interval = tokio::time::interval(tick_rate);

    loop {
        let event = tokio::select! {
            _ = interval.tick() => Event::Tick,
            next = reader.next() => match next {
                Some(Ok(CrosstermEvent::Key(key))) => Event::Key(key),
                Some(Ok(CrosstermEvent::Mouse(mouse))) => Event::Mouse(mouse),
                Some(Ok(CrosstermEvent::Resize(..))) => Event::Resize,
                Some(Ok(_)) => continue,
                Some(Err(e)) => {
                    tracing::warn!("Terminal event error: {}", e);
                    continue;
                }
                None => break,
            },
        };

        if sender.send(event).is_err() {
            break;
        }
    }

    tracing::debug!("Event reader stopped");
}
