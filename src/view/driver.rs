//! Terminal driver seam.
//!
//! The console core talks to the terminal only through [`TerminalDriver`]:
//! a curses-like cell grid with explicit refresh. Both implementations draw
//! through a ratatui [`Terminal`], so production ([`CrosstermDriver`]) and
//! tests ([`HeadlessDriver`] on a `TestBackend`) share the same flush path.

use crate::model::Key;
use crossterm::{
    event,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend, TestBackend},
    layout::Position,
    style::Style,
    Terminal,
};
use std::collections::VecDeque;
use std::io::{self, Stdout};
use std::time::Duration;

/// Operations the console needs from a terminal.
pub trait TerminalDriver {
    /// Content dimensions as `(rows, cols)`.
    ///
    /// `rows` excludes the bottom status row, which the renderer draws at
    /// index `rows`.
    fn dimensions(&mut self) -> io::Result<(u16, u16)>;

    /// Read one key without blocking. `Ok(None)` when nothing is pending or
    /// the pending event is not a key the console understands.
    fn read_key(&mut self) -> io::Result<Option<Key>>;

    /// Stage `text` at `(row, col)`. Text past the right edge is clipped and
    /// rows outside the grid are dropped.
    fn write_line(&mut self, row: u16, col: u16, text: &str);

    /// Discard everything staged so far.
    fn clear_screen(&mut self);

    /// Place the hardware cursor on the next refresh.
    fn move_cursor(&mut self, row: u16, col: u16);

    /// Flush the staged grid to the terminal.
    fn refresh(&mut self) -> io::Result<()>;

    /// Enter raw mode. Called once when the console is constructed.
    fn enter_raw_mode(&mut self) -> io::Result<()>;

    /// Restore cooked mode. Must be safe to call more than once.
    fn exit_raw_mode(&mut self) -> io::Result<()>;
}

/// Staged frame contents between `clear_screen` and `refresh`.
#[derive(Debug, Default, Clone)]
struct Canvas {
    writes: Vec<(u16, u16, String)>,
    cursor: Option<(u16, u16)>,
}

impl Canvas {
    fn clear(&mut self) {
        self.writes.clear();
        self.cursor = None;
    }

    fn write(&mut self, row: u16, col: u16, text: &str) {
        self.writes.push((row, col, text.to_string()));
    }

    fn flush<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| {
            let area = frame.area();
            let buf = frame.buffer_mut();
            for (row, col, text) in &self.writes {
                if *row < area.height && *col < area.width {
                    buf.set_string(area.x + col, area.y + row, text, Style::default());
                }
            }

            if let Some((row, col)) = self.cursor {
                let x = col.min(area.width.saturating_sub(1));
                let y = row.min(area.height.saturating_sub(1));
                frame.set_cursor_position(Position::new(area.x + x, area.y + y));
            }
        })?;
        Ok(())
    }
}

fn content_dimensions<B: Backend>(terminal: &Terminal<B>) -> io::Result<(u16, u16)> {
    let size = terminal.size()?;
    // Bottom row is reserved for the status line
    Ok((size.height.saturating_sub(1), size.width))
}

// ===== CrosstermDriver =====

/// Driver for the real terminal on stdout.
pub struct CrosstermDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    canvas: Canvas,
    raw: bool,
}

impl CrosstermDriver {
    /// Attach to stdout. The terminal stays cooked until `enter_raw_mode`.
    pub fn new() -> io::Result<Self> {
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        Ok(Self {
            terminal,
            canvas: Canvas::default(),
            raw: false,
        })
    }
}

impl TerminalDriver for CrosstermDriver {
    fn dimensions(&mut self) -> io::Result<(u16, u16)> {
        content_dimensions(&self.terminal)
    }

    fn read_key(&mut self) -> io::Result<Option<Key>> {
        if event::poll(Duration::ZERO)? {
            Ok(Key::from_event(&event::read()?))
        } else {
            Ok(None)
        }
    }

    fn write_line(&mut self, row: u16, col: u16, text: &str) {
        self.canvas.write(row, col, text);
    }

    fn clear_screen(&mut self) {
        self.canvas.clear();
    }

    fn move_cursor(&mut self, row: u16, col: u16) {
        self.canvas.cursor = Some((row, col));
    }

    fn refresh(&mut self) -> io::Result<()> {
        self.canvas.flush(&mut self.terminal)
    }

    fn enter_raw_mode(&mut self) -> io::Result<()> {
        if self.raw {
            return Ok(());
        }
        enable_raw_mode()?;
        io::stdout().execute(EnterAlternateScreen)?;
        self.terminal.clear()?;
        self.raw = true;
        Ok(())
    }

    fn exit_raw_mode(&mut self) -> io::Result<()> {
        if !self.raw {
            return Ok(());
        }
        self.raw = false;
        disable_raw_mode()?;
        io::stdout().execute(LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for CrosstermDriver {
    fn drop(&mut self) {
        let _ = self.exit_raw_mode();
    }
}

/// Restore the terminal before the default panic message is printed.
///
/// Best effort: a panic anywhere (including the poll thread) would otherwise
/// leave the user's shell in raw mode on the alternate screen.
pub fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = io::stdout().execute(LeaveAlternateScreen);
        previous(info);
    }));
}

// ===== HeadlessDriver =====

/// In-memory driver over ratatui's `TestBackend`.
///
/// Keys are scripted up front with [`push_key`](Self::push_key); the rendered
/// grid can be inspected with [`screen`](Self::screen). Used by the test
/// suite and for running the console without a tty.
pub struct HeadlessDriver {
    terminal: Terminal<TestBackend>,
    canvas: Canvas,
    keys: VecDeque<Key>,
    raw: bool,
    refreshes: usize,
}

impl HeadlessDriver {
    /// Create a `width` x `height` grid (status row included in `height`).
    pub fn new(width: u16, height: u16) -> io::Result<Self> {
        Ok(Self {
            terminal: Terminal::new(TestBackend::new(width, height))?,
            canvas: Canvas::default(),
            keys: VecDeque::new(),
            raw: false,
            refreshes: 0,
        })
    }

    /// Queue a key for a later `read_key`.
    pub fn push_key(&mut self, key: Key) {
        self.keys.push_back(key);
    }

    /// Queue several keys.
    pub fn push_keys(&mut self, keys: impl IntoIterator<Item = Key>) {
        self.keys.extend(keys);
    }

    /// Queue one `Key::Char` per character of `text`.
    pub fn type_text(&mut self, text: &str) {
        self.keys.extend(text.chars().map(Key::Char));
    }

    /// Resize the grid and queue the resize notification.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.terminal.backend_mut().resize(width, height);
        self.keys.push_back(Key::Resize);
    }

    /// Keys not yet consumed.
    pub fn pending_keys(&self) -> usize {
        self.keys.len()
    }

    /// Rows of the last flushed frame, trailing spaces trimmed.
    pub fn screen(&self) -> Vec<String> {
        let buffer = self.terminal.backend().buffer();
        let area = buffer.area;
        (area.top()..area.bottom())
            .map(|y| {
                let row: String = (area.left()..area.right())
                    .map(|x| buffer[(x, y)].symbol())
                    .collect();
                row.trim_end().to_string()
            })
            .collect()
    }

    /// Hardware cursor as `(row, col)` after the last flush.
    pub fn cursor(&mut self) -> io::Result<(u16, u16)> {
        let position = self.terminal.backend_mut().get_cursor_position()?;
        Ok((position.y, position.x))
    }

    /// Whether `enter_raw_mode` is in effect.
    pub fn is_raw(&self) -> bool {
        self.raw
    }

    /// Number of completed `refresh` calls.
    pub fn refresh_count(&self) -> usize {
        self.refreshes
    }
}

impl TerminalDriver for HeadlessDriver {
    fn dimensions(&mut self) -> io::Result<(u16, u16)> {
        content_dimensions(&self.terminal)
    }

    fn read_key(&mut self) -> io::Result<Option<Key>> {
        Ok(self.keys.pop_front())
    }

    fn write_line(&mut self, row: u16, col: u16, text: &str) {
        self.canvas.write(row, col, text);
    }

    fn clear_screen(&mut self) {
        self.canvas.clear();
    }

    fn move_cursor(&mut self, row: u16, col: u16) {
        self.canvas.cursor = Some((row, col));
    }

    fn refresh(&mut self) -> io::Result<()> {
        self.canvas.flush(&mut self.terminal)?;
        self.refreshes += 1;
        Ok(())
    }

    fn enter_raw_mode(&mut self) -> io::Result<()> {
        self.raw = true;
        Ok(())
    }

    fn exit_raw_mode(&mut self) -> io::Result<()> {
        self.raw = false;
        Ok(())
    }
}
