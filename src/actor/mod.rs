//! Input actor: terminal events on a dedicated thread.
//!
//! The editor itself is strictly one command at a time. The only other
//! thread is the input poller, which converts crossterm events and hands
//! them to the UI loop over a bounded crossbeam channel:
//!
//! ```text
//! ┌──────────────┐     InputEvent      ┌──────────────┐
//! │ Input Thread │ ─────────────────▶  │   UI Loop    │ ── Command ──▶ EditSession
//! └──────────────┘                     └──────────────┘
//! ```

mod input;
mod messages;

pub use input::InputActor;
pub use messages::{InputEvent, KeyCode, KeyModifiers};
