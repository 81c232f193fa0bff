use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;

use crate::lookup::CompanyView;
use crate::models::CompanySummary;

/// Results reported back by background tasks
#[derive(Debug)]
pub enum TuiEvent {
    SuggestionsReady {
        generation: u64,
        result: Result<Vec<CompanySummary>, String>,
    },
    LookupFinished {
        generation: u64,
        symbol: String,
        result: Result<Option<CompanyView>, String>,
    },
}

/// Channel that background tasks report back on
pub struct EventManager {
    event_sender: mpsc::UnboundedSender<TuiEvent>,
    event_receiver: mpsc::UnboundedReceiver<TuiEvent>,
}

impl Default for EventManager {
    fn default() -> Self {
        Self::new()
    }
}

impl EventManager {
    /// Create a new event manager
    pub fn new() -> Self {
        let (event_sender, event_receiver) = mpsc::unbounded_channel::<TuiEvent>();
        Self {
            event_sender,
            event_receiver,
        }
    }

    /// Get a clone of the event sender for use in async tasks
    pub fn sender(&self) -> mpsc::UnboundedSender<TuiEvent> {
        self.event_sender.clone()
    }

    /// Try to receive an event (non-blocking)
    pub fn try_receive(&mut self) -> Option<TuiEvent> {
        self.event_receiver.try_recv().ok()
    }
}

/// Wait up to `timeout` for a key press from the terminal
pub fn poll_key(timeout: Duration) -> Result<Option<KeyEvent>> {
    if crossterm::event::poll(timeout)? {
        if let Event::Key(key) = crossterm::event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(Some(key));
            }
        }
    }
    Ok(None)
}
