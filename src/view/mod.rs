//! Console controller and terminal management (impure shell).
//!
//! # Threading
//!
//! A [`Console`] owns one background poll thread running a [`ConsoleLoop`].
//! That thread is the only writer of console state and the only user of the
//! terminal driver. [`Console::log`] and [`ConsoleHandle::log`] merely
//! enqueue a command, so logging never blocks on rendering.

pub mod driver;
pub mod renderer;

pub use driver::{install_panic_hook, CrosstermDriver, HeadlessDriver, TerminalDriver};
pub use renderer::{render, BROWSING_HINT, DETAILS_HINT};

use crate::config::KeyBindings;
use crate::model::{ConsoleError, DEFAULT_DETAILS_PLACEHOLDER};
use crate::state::{handle_key, ConsoleState, KeyOutcome, DEFAULT_BUFFER_CAPACITY};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Callback invoked with the text of each submitted `/` command.
pub type CommandHandler = Box<dyn FnMut(&str) + Send>;

/// Tunables for a console instance.
#[derive(Debug, Clone)]
pub struct ConsoleOptions {
    /// Maximum number of retained entries.
    pub buffer_capacity: usize,
    /// Sleep between poll-loop iterations.
    pub poll_interval: Duration,
    /// Detail text for entries logged without details.
    pub details_placeholder: String,
    /// Browsing-mode key bindings.
    pub key_bindings: KeyBindings,
}

impl Default for ConsoleOptions {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            poll_interval: Duration::from_millis(1),
            details_placeholder: DEFAULT_DETAILS_PLACEHOLDER.to_string(),
            key_bindings: KeyBindings::default(),
        }
    }
}

/// Work queued for the poll thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Append an entry.
    Log {
        /// Message shown in the log list.
        message: String,
        /// Detail text; `None` uses the configured placeholder.
        details: Option<String>,
    },
    /// Stop the poll loop and restore the terminal.
    Quit,
}

/// Result of a single poll-loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Nothing happened; no frame drawn.
    Idle,
    /// State changed and a frame was drawn.
    Rendered,
    /// The session ended.
    Quit,
}

// ===== ConsoleLoop =====

/// The single-writer poll loop.
///
/// Each [`tick`](Self::tick) drains queued commands, consumes at most one
/// key, and redraws if anything changed. [`run`](Self::run) repeats that with
/// a fixed sleep until quit. Ticks can be driven by hand, which is how the
/// tests exercise the loop deterministically.
pub struct ConsoleLoop<D: TerminalDriver> {
    driver: D,
    state: ConsoleState,
    bindings: KeyBindings,
    commands: Receiver<ConsoleCommand>,
    on_command: Option<CommandHandler>,
    poll_interval: Duration,
}

impl<D: TerminalDriver> ConsoleLoop<D> {
    /// Build a loop around `driver`, sized from its current dimensions.
    pub fn new(
        mut driver: D,
        options: ConsoleOptions,
        commands: Receiver<ConsoleCommand>,
    ) -> Result<Self, ConsoleError> {
        let (rows, cols) = driver.dimensions()?;
        let state = ConsoleState::new(
            usize::from(rows),
            usize::from(cols),
            options.buffer_capacity,
            &options.details_placeholder,
        );
        Ok(Self {
            driver,
            state,
            bindings: options.key_bindings,
            commands,
            on_command: None,
            poll_interval: options.poll_interval,
        })
    }

    /// Build a loop together with a fresh handle feeding its queue.
    pub fn with_handle(
        driver: D,
        options: ConsoleOptions,
    ) -> Result<(Self, ConsoleHandle), ConsoleError> {
        let (sender, receiver) = mpsc::channel();
        let console_loop = Self::new(driver, options, receiver)?;
        Ok((console_loop, ConsoleHandle { sender }))
    }

    /// Register the callback for submitted commands.
    pub fn set_command_handler(&mut self, handler: CommandHandler) {
        self.on_command = Some(handler);
    }

    /// Current console state.
    pub fn state(&self) -> &ConsoleState {
        &self.state
    }

    /// The terminal driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Mutable access to the terminal driver.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Draw the current state.
    pub fn render(&mut self) -> Result<(), ConsoleError> {
        render(&mut self.driver, &self.state)?;
        Ok(())
    }

    /// Run one poll iteration.
    pub fn tick(&mut self) -> Result<Tick, ConsoleError> {
        let mut dirty = false;

        loop {
            match self.commands.try_recv() {
                Ok(ConsoleCommand::Log { message, details }) => {
                    self.state.log(message, details);
                    dirty = true;
                }
                Ok(ConsoleCommand::Quit) => return Ok(Tick::Quit),
                // All handles dropped: keys still work, nothing more to drain
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        if let Some(key) = self.driver.read_key()? {
            match handle_key(&mut self.state, key, &self.bindings) {
                KeyOutcome::Continue => {}
                KeyOutcome::Quit => return Ok(Tick::Quit),
                KeyOutcome::Resize => self.apply_dimensions()?,
                KeyOutcome::Command(command) => {
                    if let Some(handler) = self.on_command.as_mut() {
                        handler(&command);
                    }
                }
            }
            dirty = true;
        }

        if dirty {
            self.render()?;
            Ok(Tick::Rendered)
        } else {
            Ok(Tick::Idle)
        }
    }

    /// Poll until quit, then restore the terminal.
    ///
    /// Raw mode is left on every exit path; a driver error is returned after
    /// the restore attempt.
    pub fn run(mut self) -> Result<(), ConsoleError> {
        info!("Console poll loop started");
        let result = self.poll_until_quit();
        let restored = self.driver.exit_raw_mode();
        info!(ok = result.is_ok(), "Console poll loop stopped");
        result?;
        restored?;
        Ok(())
    }

    fn poll_until_quit(&mut self) -> Result<(), ConsoleError> {
        self.render()?;
        loop {
            if self.tick()? == Tick::Quit {
                return Ok(());
            }
            thread::sleep(self.poll_interval);
        }
    }

    fn apply_dimensions(&mut self) -> Result<(), ConsoleError> {
        let (rows, cols) = self.driver.dimensions()?;
        debug!(rows, cols, "Terminal resized");
        self.state.resize(usize::from(rows), usize::from(cols));
        Ok(())
    }
}

impl<D: TerminalDriver> Drop for ConsoleLoop<D> {
    fn drop(&mut self) {
        let _ = self.driver.exit_raw_mode();
    }
}

// ===== ConsoleHandle =====

/// Cloneable sender for logging from any thread.
#[derive(Debug, Clone)]
pub struct ConsoleHandle {
    sender: Sender<ConsoleCommand>,
}

impl ConsoleHandle {
    /// Queue a message. `None` details become the configured placeholder.
    pub fn log(&self, message: impl Into<String>, details: Option<String>) {
        self.send(ConsoleCommand::Log {
            message: message.into(),
            details,
        });
    }

    /// Ask the poll loop to stop and restore the terminal.
    pub fn quit(&self) {
        self.send(ConsoleCommand::Quit);
    }

    fn send(&self, command: ConsoleCommand) {
        if self.sender.send(command).is_err() {
            debug!("Console already stopped, dropping command");
        }
    }
}

// ===== Console =====

/// The console controller.
///
/// Construction enters raw mode and draws the first frame; [`run`](Self::run)
/// hands the loop to a background thread and returns immediately.
pub struct Console<D: TerminalDriver + Send + 'static> {
    handle: ConsoleHandle,
    pending: Option<ConsoleLoop<D>>,
    worker: Option<JoinHandle<Result<(), ConsoleError>>>,
}

impl<D: TerminalDriver + Send + 'static> Console<D> {
    /// Enter raw mode on `driver` and draw the initial empty frame.
    ///
    /// The poll thread is not started until [`run`](Self::run). On error the
    /// terminal is already back in cooked mode.
    pub fn new(driver: D, options: ConsoleOptions) -> Result<Self, ConsoleError> {
        // Raw mode only after the loop owns the driver, so its Drop restores
        let (mut console_loop, handle) = ConsoleLoop::with_handle(driver, options)?;
        console_loop.driver_mut().enter_raw_mode()?;
        console_loop.render()?;

        Ok(Self {
            handle,
            pending: Some(console_loop),
            worker: None,
        })
    }

    /// Register the callback for submitted commands. Only effective before `run`.
    pub fn with_command_handler(mut self, handler: impl FnMut(&str) + Send + 'static) -> Self {
        match self.pending.as_mut() {
            Some(console_loop) => console_loop.set_command_handler(Box::new(handler)),
            None => warn!("Command handler registered after run(), ignoring"),
        }
        self
    }

    /// A handle other threads can log through.
    pub fn handle(&self) -> ConsoleHandle {
        self.handle.clone()
    }

    /// Queue a message. Never blocks on rendering.
    pub fn log(&self, message: impl Into<String>, details: Option<String>) {
        self.handle.log(message, details);
    }

    /// Ask the poll thread to stop; pair with [`wait`](Self::wait).
    pub fn quit(&self) {
        self.handle.quit();
    }

    /// Start the poll thread. Non-blocking.
    pub fn run(&mut self) -> Result<(), ConsoleError> {
        let console_loop = self.pending.take().ok_or(ConsoleError::AlreadyRunning)?;
        let worker = thread::Builder::new()
            .name("logcon-poll".to_string())
            .spawn(move || console_loop.run())?;
        self.worker = Some(worker);
        Ok(())
    }

    /// Whether the poll thread has been started and has not finished.
    pub fn is_running(&self) -> bool {
        self.worker.as_ref().is_some_and(|w| !w.is_finished())
    }

    /// Block until the poll thread ends (after a quit) and return its result.
    pub fn wait(&mut self) -> Result<(), ConsoleError> {
        let worker = self.worker.take().ok_or(ConsoleError::NotRunning)?;
        worker.join().map_err(|_| ConsoleError::WorkerPanicked)?
    }
}

impl<D: TerminalDriver + Send + 'static> Drop for Console<D> {
    fn drop(&mut self) {
        if let Some(worker) = self.worker.take() {
            self.handle.quit();
            let _ = worker.join();
        }
    }
}

#[cfg(test)]
#[path = "console_tests.rs"]
mod tests;
