use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    Resize,
}

/// Polls the terminal on a background thread and forwards key presses.
pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
    _tx: mpsc::Sender<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let _tx = tx.clone();

        thread::spawn(move || {
            loop {
                let event = if event::poll(tick_rate).unwrap_or(false) {
                    match event::read() {
                        // releases and repeats would double-type on some terminals
                        Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
                        Ok(Event::Resize(_, _)) => AppEvent::Resize,
                        _ => continue,
                    }
                } else {
                    AppEvent::Tick
                };
                if tx.send(event).is_err() {
                    return;
                }
            }
        });

        Self { rx, _tx }
    }

    pub fn next(&self) -> anyhow::Result<AppEvent> {
        Ok(self.rx.recv()?)
    }
}
