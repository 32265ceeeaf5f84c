//! Input Actor: Dedicated thread for polling terminal events.
//!
//! Polls crossterm with a timeout so the shutdown flag is noticed promptly,
//! and forwards converted events to the UI loop.

use super::messages::{InputEvent, KeyCode, KeyModifiers};
use crossbeam_channel::Sender;
use crossterm::event::{self, Event, KeyEventKind};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Input actor that polls terminal events.
#[derive(Debug)]
pub struct InputActor {
    /// Handle to the input thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

impl InputActor {
    /// Spawn the input actor thread.
    ///
    /// # Arguments
    ///
    /// * `sender` - Channel to send input events to the UI loop.
    /// * `poll_timeout` - How long to wait for events before checking shutdown.
    pub fn spawn(sender: Sender<InputEvent>, poll_timeout: Duration) -> io::Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let handle = thread::Builder::new()
            .name("hexpad-input".to_string())
            .spawn(move || {
                Self::run_loop(&sender, &shutdown_clone, poll_timeout);
            })?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
        })
    }

    /// Signal the input thread to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the input thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    fn run_loop(sender: &Sender<InputEvent>, shutdown: &AtomicBool, poll_timeout: Duration) {
        loop {
            if shutdown.load(Ordering::Relaxed) {
                let _ = sender.send(InputEvent::Shutdown);
                break;
            }

            match event::poll(poll_timeout) {
                Ok(true) => match event::read() {
                    Ok(event) => {
                        if let Some(input_event) = convert_event(event) {
                            if sender.send(input_event).is_err() {
                                // Receiver dropped, exit
                                break;
                            }
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "terminal read failed");
                        let _ = sender.send(InputEvent::Error(e.to_string()));
                    }
                },
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "terminal poll failed");
                    let _ = sender.send(InputEvent::Error(e.to_string()));
                }
            }
        }
    }
}

impl Drop for InputActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Convert a crossterm event to our `InputEvent`.
///
/// Key releases, mouse and focus events are dropped.
pub(crate) fn convert_event(event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(key_event) => {
            if key_event.kind != KeyEventKind::Press {
                return None;
            }
            let code = convert_key_code(key_event.code)?;
            let modifiers = convert_modifiers(key_event.modifiers);
            Some(InputEvent::Key { code, modifiers })
        }
        Event::Resize(width, height) => Some(InputEvent::Resize { width, height }),
        Event::Paste(text) => Some(InputEvent::Paste(text)),
        Event::Mouse(_) | Event::FocusGained | Event::FocusLost => None,
    }
}

fn convert_key_code(code: event::KeyCode) -> Option<KeyCode> {
    Some(match code {
        event::KeyCode::Char(c) => KeyCode::Char(c),
        event::KeyCode::F(n) => KeyCode::F(n),
        event::KeyCode::Backspace => KeyCode::Backspace,
        event::KeyCode::Enter => KeyCode::Enter,
        event::KeyCode::Left => KeyCode::Left,
        event::KeyCode::Right => KeyCode::Right,
        event::KeyCode::Up => KeyCode::Up,
        event::KeyCode::Down => KeyCode::Down,
        event::KeyCode::Home => KeyCode::Home,
        event::KeyCode::End => KeyCode::End,
        event::KeyCode::PageUp => KeyCode::PageUp,
        event::KeyCode::PageDown => KeyCode::PageDown,
        event::KeyCode::Tab => KeyCode::Tab,
        event::KeyCode::Delete => KeyCode::Delete,
        event::KeyCode::Insert => KeyCode::Insert,
        event::KeyCode::Esc => KeyCode::Esc,
        _ => return None,
    })
}

fn convert_modifiers(mods: event::KeyModifiers) -> KeyModifiers {
    KeyModifiers {
        shift: mods.contains(event::KeyModifiers::SHIFT),
        control: mods.contains(event::KeyModifiers::CONTROL),
        alt: mods.contains(event::KeyModifiers::ALT),
    }
}
