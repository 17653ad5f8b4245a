//! Plain-text rendering of the board.

use guestbook_core::Board;
use std::io::{self, Write};

/// Print the header and every entry.
pub fn print_board(board: &Board, out: &mut impl Write) -> io::Result<()> {
    let schema = board.schema();
    if schema.supports_health() {
        writeln!(out, "{} (backend: {})", schema.title(), board.backend_status())?;
    } else {
        writeln!(out, "{}", schema.title())?;
    }
    writeln!(out)?;

    if board.entries().is_empty() {
        return writeln!(out, "No entries yet.");
    }

    for entry in board.entries() {
        match &entry.author {
            Some(author) => writeln!(
                out,
                "#{}  {}  ({})",
                entry.id,
                author,
                entry.display_created_at()
            )?,
            None => writeln!(out, "#{}  ({})", entry.id, entry.display_created_at())?,
        }
        for line in entry.content.lines() {
            writeln!(out, "    {line}")?;
        }
    }

    Ok(())
}
