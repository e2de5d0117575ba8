//! I/O boundary between the REPL core and whatever hosts it.
//!
//! The core reads commands and writes results only through [`IoHost`], so the
//! same loop runs against a real terminal or against the scripted
//! [`TestHost`] in tests.

pub mod types;

#[cfg(test)]
pub mod test_host;

pub use types::*;

#[cfg(test)]
pub use test_host::TestHost;

/// Error type for I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("I/O error: {0}")]
    Io(String),
}

/// Host interface for REPL I/O.
pub trait IoHost {
    /// Block until the user has entered a line or sent a signal.
    ///
    /// Afterwards exactly one of `read_signal()` or `read_input()` yields a
    /// value.
    fn wait_for_input(&mut self) -> Result<(), IoError>;

    /// Take the pending input line, if any.
    fn read_input(&mut self) -> Result<Option<InputLine>, IoError>;

    /// Take the pending signal (Ctrl+C, Ctrl+D), if any.
    fn read_signal(&mut self) -> Result<Option<Signal>, IoError>;

    /// Show output to the user.
    fn write_output(&mut self, output: Output) -> Result<(), IoError>;

    /// Record the state the next prompt should reflect.
    fn write_prompt(&mut self, config: PromptConfig) -> Result<(), IoError>;

    /// Flush any buffered output.
    fn flush(&mut self) -> Result<(), IoError> {
        Ok(())
    }
}
