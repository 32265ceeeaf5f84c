//! App: The interactive editor loop.
//!
//! Input arrives from the [`InputActor`] over a bounded channel. Every event
//! is applied to the session, then one full frame is drawn. Event handling
//! never touches the terminal, so it can be driven directly in tests.

use crate::actor::{InputActor, InputEvent};
use crate::config::EditorConfig;
use crate::error::{EditError, Result};
use crate::keymap::{self, Action, PromptKind};
use crate::session::{Command, EditSession, Outcome};
use crate::terminal::{OutputBuffer, TerminalGuard};
use crate::view::{self, Footer, Prompt, PromptEvent, Viewport, FOOTER_ROW};
use crossbeam_channel::{bounded, Receiver};
use std::io;

/// Smallest terminal the layout fits in.
const MIN_WIDTH: u16 = 80;

/// Editor state between frames.
#[derive(Debug)]
pub struct App {
    session: EditSession,
    viewport: Viewport,
    prompt: Option<Prompt>,
    message: Option<String>,
    output: OutputBuffer,
    config: EditorConfig,
}

impl App {
    /// Wrap a session for interactive editing.
    pub fn new(session: EditSession, config: EditorConfig) -> Self {
        Self {
            session,
            viewport: Viewport::default(),
            prompt: None,
            message: None,
            output: OutputBuffer::with_capacity(8192),
            config,
        }
    }

    /// The session being edited.
    pub const fn session(&self) -> &EditSession {
        &self.session
    }

    /// Current scroll position.
    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The open prompt, if any.
    pub const fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    /// Message shown on the footer line, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Take over the terminal and edit until the user quits.
    ///
    /// # Errors
    ///
    /// Returns terminal IO errors and fatal editing errors.
    pub fn run(mut self) -> anyhow::Result<EditSession> {
        let _guard = TerminalGuard::enter(self.config.alternate_screen)?;
        let (width, height) = TerminalGuard::size()?;
        if width < MIN_WIDTH || height <= FOOTER_ROW {
            tracing::warn!(width, height, "terminal smaller than the editor layout");
        }

        let (input_tx, input_rx) = bounded::<InputEvent>(64);
        let input = InputActor::spawn(input_tx, self.config.input_poll_timeout)?;
        let result = self.event_loop(&input_rx);
        input.join();
        result?;
        Ok(self.session)
    }

    fn event_loop(&mut self, input_rx: &Receiver<InputEvent>) -> anyhow::Result<()> {
        let mut stdout = io::stdout();
        self.draw(&mut stdout)?;
        while let Ok(event) = input_rx.recv() {
            if !self.handle_event(event)? {
                break;
            }
            // Coalesce queued events into one frame.
            while let Ok(event) = input_rx.try_recv() {
                if !self.handle_event(event)? {
                    return Ok(());
                }
            }
            self.draw(&mut stdout)?;
        }
        Ok(())
    }

    /// Draw the current state into `writer`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn draw<W: io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        let footer = match (&self.prompt, &self.message) {
            (Some(prompt), _) => Footer::Prompt(prompt),
            (None, Some(message)) => Footer::Message(message),
            (None, None) => Footer::Empty,
        };
        view::render_frame(&self.session, &self.viewport, footer, &mut self.output);
        self.output.flush_to(writer)
    }

    /// Apply one input event. Returns `false` when the editor should exit.
    ///
    /// # Errors
    ///
    /// Only fatal editing errors are returned; everything else becomes a
    /// footer message.
    pub fn handle_event(&mut self, event: InputEvent) -> Result<bool> {
        match event {
            InputEvent::Shutdown => return Ok(false),
            InputEvent::Error(error) => {
                self.message = Some(error);
                return Ok(true);
            }
            InputEvent::Resize { .. } => return Ok(true),
            _ => {}
        }

        if let Some(prompt) = self.prompt.as_mut() {
            match prompt.handle_input(&event) {
                PromptEvent::Editing => {}
                PromptEvent::Cancel => self.prompt = None,
                PromptEvent::Submit(text) => {
                    let kind = prompt.kind();
                    self.prompt = None;
                    self.submit(kind, &text)?;
                }
            }
            return Ok(true);
        }

        let InputEvent::Key { code, modifiers } = event else {
            return Ok(true);
        };
        self.message = None;
        let step = self.session.cursor().increment();
        match keymap::action_for(code, modifiers, step) {
            Some(Action::Quit) => return Ok(false),
            Some(Action::Prompt(kind)) => {
                self.prompt = Some(Prompt::new(kind, self.config.prompt_max_len));
            }
            Some(Action::Write(c)) => {
                let result = self.session.write_char(c);
                self.report(result)?;
            }
            Some(Action::Command(command)) => self.execute(command)?,
            None => {}
        }
        Ok(true)
    }

    fn submit(&mut self, kind: PromptKind, text: &str) -> Result<()> {
        match kind.command(text) {
            Ok(command) => self.execute(command),
            Err(err) => self.report(Err(err)),
        }
    }

    fn execute(&mut self, command: Command) -> Result<()> {
        let result = self.session.apply(command);
        self.report(result)
    }

    /// Turn a command result into a footer message, passing fatal errors on.
    fn report(&mut self, result: Result<Outcome>) -> Result<()> {
        self.message = match result {
            Ok(Outcome::NotFound) => Some("Not found".to_string()),
            Ok(Outcome::Saved { bytes }) => Some(format!("Saved {bytes} bytes")),
            Ok(Outcome::Applied | Outcome::Unchanged | Outcome::Found { .. }) => None,
            Err(EditError::Io { path, source }) => {
                Some(format!("FAILED TO SAVE FILE: {}: {source}", path.display()))
            }
            Err(EditError::InvalidInput(message)) => Some(message),
            Err(err @ EditError::Allocation { .. }) => {
                tracing::error!(error = %err, "fatal editing error");
                return Err(err);
            }
        };
        self.viewport.follow(self.session.cursor().index());
        Ok(())
    }
}
