//! View module: Draws the editor screen from session state.
//!
//! The view only reads the session. Each frame is drawn in full into an
//! [`OutputBuffer`] and flushed with one write.
//!
//! ```text
//! row 0      title bar
//! rows 1-16  00000000:  41 42 .. 48  49 .. 50  AB..P
//! rows 17-18 key help
//! row 20     prompt or message
//! ```

mod hex_view;
mod prompt;
mod viewport;

pub use hex_view::{cursor_position, HexView, TitleBar};
pub use prompt::{Prompt, PromptEvent};
pub use viewport::{Viewport, VISIBLE_ROWS};

use crate::session::EditSession;
use crate::terminal::{CursorShape, OutputBuffer, Style};

/// Screen row of the prompt/message line.
pub const FOOTER_ROW: u16 = 20;

const HELP: [&str; 2] = [
    "<F1> Save    <F2> Quit    <F3> Goto    <F4> Find String    <F5> Find Hex",
    "<F6> Append    <TAB> Toggle Mode    <INS> Toggle Insert    <DEL> Delete",
];

/// Something that draws itself into a frame.
pub trait Widget {
    /// Append this widget's output to the frame.
    fn render(&self, out: &mut OutputBuffer);
}

/// What occupies the bottom line.
#[derive(Debug, Clone, Copy)]
pub enum Footer<'a> {
    /// Nothing.
    Empty,
    /// A one-off status message.
    Message(&'a str),
    /// An open text prompt; it owns the terminal cursor.
    Prompt(&'a Prompt),
}

/// Draw a complete frame.
pub fn render_frame(
    session: &EditSession,
    viewport: &Viewport,
    footer: Footer<'_>,
    out: &mut OutputBuffer,
) {
    out.clear();
    out.cursor_hide();
    out.reset_attrs();
    out.clear_screen();

    TitleBar::new(session).render(out);
    HexView::new(session, viewport).render(out);

    #[allow(clippy::cast_possible_truncation)]
    let help_row = 1 + VISIBLE_ROWS as u16;
    for (row, line) in (help_row..).zip(HELP) {
        out.cursor_move(0, row);
        out.write_styled(line, Style::DIM);
    }

    let (x, y) = match footer {
        Footer::Prompt(prompt) => {
            prompt.render(out);
            (prompt.cursor_column(), FOOTER_ROW)
        }
        Footer::Message(message) => {
            out.cursor_move(0, FOOTER_ROW);
            out.write_styled(message, Style::BOLD);
            cursor_position(session, viewport)
        }
        Footer::Empty => cursor_position(session, viewport),
    };

    out.cursor_move(x, y);
    let shape = if session.cursor().is_inserting() {
        CursorShape::Bar
    } else {
        CursorShape::Block
    };
    out.cursor_shape(shape);
    out.cursor_show();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::ByteBuffer;
    use crate::keymap::PromptKind;
    use crate::search::SearchStrategy;

    fn screen(out: &OutputBuffer) -> vt100::Parser {
        let mut parser = vt100::Parser::new(24, 80, 0);
        parser.process(out.as_bytes());
        parser
    }

    fn session(bytes: &[u8]) -> EditSession {
        let buffer = ByteBuffer::from_bytes(bytes.to_vec(), 1024).unwrap();
        EditSession::new(buffer, "/data/sample.bin", SearchStrategy::GreedyReset)
    }

    #[test]
    fn test_frame_layout() {
        let s = session(b"ABCDEFGHIJKLMNOPQ\x00");
        let mut out = OutputBuffer::new();
        render_frame(&s, &Viewport::default(), Footer::Empty, &mut out);
        let parser = screen(&out);
        let contents = parser.screen().contents();
        let lines: Vec<&str> = contents.lines().collect();

        assert!(lines[0].starts_with("sample.bin"));
        assert!(lines[0].contains("18 B (0x12 B)"));
        assert!(lines[0].contains("0x400 B Allocated"));
        assert_eq!(
            lines[1],
            "00000000:  41 42 43 44 45 46 47 48  49 4a 4b 4c 4d 4e 4f 50  ABCDEFGHIJKLMNOP"
        );
        assert!(lines[2].starts_with("00000010:  51 00"));
        assert!(lines[2].ends_with("Q."));
        assert!(lines[17].starts_with("<F1> Save"));
        assert_eq!(parser.screen().cursor_position(), (1, 11));
    }

    #[test]
    fn test_frame_with_prompt_moves_cursor() {
        let s = session(b"\x10\x20");
        let mut prompt = Prompt::new(PromptKind::FindHex, 255);
        prompt.insert_str("2030");
        let mut out = OutputBuffer::new();
        render_frame(&s, &Viewport::default(), Footer::Prompt(&prompt), &mut out);
        let parser = screen(&out);

        let row = parser.screen().contents_between(20, 0, 20, 80);
        assert_eq!(row, "Hex string to find: 2030");
        assert_eq!(parser.screen().cursor_position(), (20, 24));
    }

    #[test]
    fn test_frame_with_message() {
        let s = session(b"\x10");
        let mut out = OutputBuffer::new();
        render_frame(&s, &Viewport::default(), Footer::Message("Not found"), &mut out);
        let parser = screen(&out);
        assert_eq!(parser.screen().contents_between(20, 0, 20, 80), "Not found");
    }
}
