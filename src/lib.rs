//! # hexpad
//!
//! A terminal hex editor for the raw bytes of a file.
//!
//! ## Core Concepts
//!
//! - **Block-granular buffer**: capacity grows in whole blocks, moves are overlap-safe
//! - **Nibble cursor**: one index addresses hex digits, ascii mode steps whole bytes
//! - **Commands in, outcomes out**: the session is driven entirely by [`Command`]s
//! - **Actor input**: terminal events are polled on their own thread
//!
//! ## Example
//!
//! ```rust
//! use hexpad::{ByteBuffer, Command, EditSession, Outcome, SearchStrategy};
//!
//! let buffer = ByteBuffer::from_bytes(b"\x10\x20\x30".to_vec(), 1024).unwrap();
//! let mut session = EditSession::new(buffer, "demo.bin", SearchStrategy::default());
//!
//! session.apply(Command::WriteHexDigit('f')).unwrap();
//! assert_eq!(session.buffer().as_bytes(), &[0xF0, 0x20, 0x30]);
//!
//! let found = session.apply(Command::FindHex("30".into())).unwrap();
//! assert_eq!(found, Outcome::Found { offset: 2 });
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod app;
pub mod buffer;
pub mod config;
pub mod cursor;
pub mod error;
pub mod keymap;
pub mod persist;
pub mod search;
pub mod session;
pub mod terminal;
pub mod view;

// Re-exports for convenience
pub use app::App;
pub use buffer::ByteBuffer;
pub use config::EditorConfig;
pub use cursor::{Cursor, EditMode};
pub use error::{EditError, Result};
pub use search::SearchStrategy;
pub use session::{Command, EditSession, Outcome};
