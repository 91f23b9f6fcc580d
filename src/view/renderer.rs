//! Translates console state into driver calls.

use super::driver::TerminalDriver;
use crate::state::{ConsoleState, Mode};
use std::io;

/// Status row while browsing.
pub const BROWSING_HINT: &str = "[ESC]quit | [^L]clear | [ENTER]details | [/]command";

/// Status row prefix while showing details.
pub const DETAILS_HINT: &str = "[ESC]back";

/// Draw one full frame.
///
/// Log content occupies rows `0..height`; the status row sits at `height`.
/// The details view always starts at the first detail line and is cut off
/// at the bottom of the content area.
pub fn render<D: TerminalDriver + ?Sized>(driver: &mut D, state: &ConsoleState) -> io::Result<()> {
    let viewport = &state.viewport;
    let height = viewport.height();
    let width = viewport.width();

    driver.clear_screen();

    match state.mode {
        Mode::Details => {
            if let Some(entry) = state.current_entry() {
                for (row, line) in entry.detail_lines(width).iter().take(height).enumerate() {
                    driver.write_line(to_u16(row), 0, line);
                }
            }
        }
        Mode::Browsing | Mode::CommandEntry => {
            let lines = state
                .buffer()
                .lines_in_range(viewport.scroll(), height, width);
            for (row, line) in lines.iter().enumerate() {
                driver.write_line(to_u16(row), 0, line);
            }
        }
    }

    let status_row = to_u16(height);
    match state.mode {
        Mode::CommandEntry => {
            driver.write_line(status_row, 0, &format!("/{}", state.command));
            driver.move_cursor(status_row, to_u16(state.command.len() + 1));
        }
        Mode::Details => {
            let hint = match state.current_entry() {
                Some(entry) => format!(
                    "{DETAILS_HINT} | logged {}",
                    entry.logged_at().format("%H:%M:%S")
                ),
                None => DETAILS_HINT.to_string(),
            };
            driver.write_line(status_row, 0, &hint);
            driver.move_cursor(to_u16(height - 1), 0);
        }
        Mode::Browsing => {
            driver.write_line(status_row, 0, BROWSING_HINT);
            driver.move_cursor(to_u16(viewport.cursor_y()), to_u16(viewport.cursor_x()));
        }
    }

    driver.refresh()
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}
