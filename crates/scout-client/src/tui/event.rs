use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, KeyEvent, KeyEventKind};

use super::worker::ApiEvent;
use crate::error::{Result, ScoutError};

/// Everything the UI loop reacts to
#[derive(Debug)]
pub enum Event {
    /// Keyboard input
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// Periodic tick for UI updates
    Tick,
    /// A finished API call
    Api(ApiEvent),
}

/// Terminal input on a background thread, plus a sender that API workers use
/// to post their results onto the same queue.
pub struct EventHandler {
    sender: mpsc::Sender<Event>,
    receiver: mpsc::Receiver<Event>,
    #[allow(dead_code)]
    handler: thread::JoinHandle<()>,
}

impl EventHandler {
    /// Create a new event handler with the given tick rate in milliseconds
    pub fn new(tick_rate: u64) -> Self {
        let tick_rate = Duration::from_millis(tick_rate);
        let (sender, receiver) = mpsc::channel();
        let input_sender = sender.clone();

        let handler = thread::spawn(move || loop {
            if event::poll(tick_rate).unwrap_or(false) {
                let sent = match event::read() {
                    // Windows reports releases too
                    Ok(event::Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        input_sender.send(Event::Key(key))
                    }
                    Ok(event::Event::Resize(width, height)) => {
                        input_sender.send(Event::Resize(width, height))
                    }
                    _ => Ok(()),
                };
                if sent.is_err() {
                    break;
                }
            } else if input_sender.send(Event::Tick).is_err() {
                break;
            }
        });

        Self {
            sender,
            receiver,
            handler,
        }
    }

    pub fn sender(&self) -> mpsc::Sender<Event> {
        self.sender.clone()
    }

    /// Get the next event, blocking until one is available
    pub fn next(&self) -> Result<Event> {
        self.receiver
            .recv()
            .map_err(|e| ScoutError::Tui(e.to_string()))
    }
}
