//! Platform-independent REPL core.
//!
//! This module contains the main REPL logic, which interacts only through
//! the `IoHost` trait. The same core runs against the terminal and against
//! the scripted host in tests.

use crate::app_context::AppContext;
use crate::commands::{self, CommandResult};
use crate::io::{ExitReason, IoError, IoHost, Output, PromptConfig, Signal};

/// The platform-independent REPL core.
pub struct ReplCore {
    ctx: AppContext,
}

impl ReplCore {
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx }
    }

    /// Run the REPL loop, reading/writing through the provided I/O host.
    ///
    /// Returns the reason for exiting (user exit or EOF).
    pub fn run(&mut self, io: &mut impl IoHost) -> Result<ExitReason, IoError> {
        self.write_banner(io)?;

        loop {
            self.update_prompt(io)?;
            io.wait_for_input()?;

            if let Some(signal) = io.read_signal()? {
                match signal {
                    Signal::Eof => {
                        io.write_output(Output::info("Goodbye!"))?;
                        io.flush()?;
                        return Ok(ExitReason::Eof);
                    }
                    Signal::Interrupt => {
                        io.write_output(Output::info("^C (use 'exit' to quit)"))?;
                        continue;
                    }
                }
            }

            let input = match io.read_input()? {
                Some(input) => input,
                None => continue,
            };

            match commands::execute(&input.line, &mut self.ctx) {
                CommandResult::Ok { display: None } => {}
                CommandResult::Ok {
                    display: Some(output),
                } => {
                    io.write_output(Output::normal(output))?;
                }
                CommandResult::Error(msg) => {
                    io.write_output(Output::error(msg))?;
                }
                CommandResult::Help => {
                    io.write_output(Output::normal(commands::format_help()))?;
                }
                CommandResult::Exit => {
                    io.write_output(Output::info("Goodbye!"))?;
                    io.flush()?;
                    return Ok(ExitReason::UserExit);
                }
            }

            io.flush()?;
        }
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut AppContext {
        &mut self.ctx
    }

    pub fn into_context(self) -> AppContext {
        self.ctx
    }

    fn write_banner(&self, io: &mut impl IoHost) -> Result<(), IoError> {
        io.write_output(Output::banner(BANNER))?;

        let library = self.ctx.catalog().library();
        if !library.storage_available() {
            io.write_output(Output::info(
                "Storage is unavailable; changes will be lost when you exit.",
            ))?;
        } else if !library.is_empty() {
            io.write_output(Output::info(format!(
                "Loaded {} book(s) from {}.",
                library.len(),
                self.ctx.backend()
            )))?;
        }
        Ok(())
    }

    fn update_prompt(&self, io: &mut impl IoHost) -> Result<(), IoError> {
        let catalog = self.ctx.catalog();
        io.write_prompt(PromptConfig {
            book_count: catalog.library().len(),
            form_open: catalog.form().is_open(),
            storage_available: catalog.library().storage_available(),
        })
    }
}

const BANNER: &str = r#"
 ___            _        _         _  __
| _ ) ___  ___ | |__ ___| |_  ___ | |/ _|
| _ \/ _ \/ _ \| / /(_-<| ' \/ -_)| |  _|
|___/\___/\___/|_\_\/__/|_||_\___||_|_|

Type 'help' for available commands, 'exit' to quit.
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReplConfig;
    use crate::io::TestHost;

    fn core() -> ReplCore {
        ReplCore::new(AppContext::new(&ReplConfig::memory()).unwrap())
    }

    #[test]
    fn exit_command() {
        let mut core = core();
        let mut host = TestHost::with_lines(["exit"]);

        let result = core.run(&mut host);

        assert!(matches!(result, Ok(ExitReason::UserExit)));
        assert!(host.output_text().contains("Goodbye"));
    }

    #[test]
    fn eof_ends_session() {
        let mut core = core();
        let mut host = TestHost::new();

        assert!(matches!(core.run(&mut host), Ok(ExitReason::Eof)));
    }

    #[test]
    fn interrupt_keeps_running() {
        let mut core = core();
        let mut host = TestHost::new();
        host.queue_signal(Signal::Interrupt);
        host.queue_line("exit");

        assert!(matches!(core.run(&mut host), Ok(ExitReason::UserExit)));
        assert!(host.output_text().contains("^C"));
    }

    #[test]
    fn form_session_updates_prompt() {
        let mut core = core();
        let mut host = TestHost::with_lines([
            "new",
            "title LOTR",
            "author Tolkien",
            "pages 442",
            "read no",
            "submit",
            "list",
            "exit",
        ]);

        core.run(&mut host).unwrap();

        assert!(host.errors().is_empty());
        let prompts = host.prompts();
        assert_eq!(prompts[0], PromptConfig {
            book_count: 0,
            form_open: false,
            storage_available: true,
        });
        assert!(prompts[1].form_open);
        let last = prompts.last().unwrap();
        assert_eq!(last.book_count, 1);
        assert!(!last.form_open);

        let text = host.output_text();
        assert!(text.contains("LOTR"));
        assert!(text.contains("Not yet read"));
        assert_eq!(
            core.context().catalog().library().books()[0].author(),
            "Tolkien"
        );
    }

    #[test]
    fn errors_are_reported_and_loop_continues() {
        let mut core = core();
        let mut host = TestHost::with_lines(["toggle 3", "bogus", "exit"]);

        assert!(matches!(core.run(&mut host), Ok(ExitReason::UserExit)));
        let errors = host.errors();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("no row #3"));
        assert!(errors[1].contains("Unknown command"));
    }

    #[test]
    fn unavailable_storage_is_announced() {
        let config = ReplConfig {
            quota: Some(0),
            ..ReplConfig::memory()
        };
        let mut core = ReplCore::new(AppContext::new(&config).unwrap());
        let mut host = TestHost::new();

        core.run(&mut host).unwrap();

        assert!(host.output_text().contains("Storage is unavailable"));
        assert!(!host.prompts()[0].storage_available);
    }

    #[test]
    fn help_is_printed() {
        let mut core = core();
        let mut host = TestHost::with_lines(["help"]);

        core.run(&mut host).unwrap();
        assert!(host.output_text().contains("Bookshelf Commands"));
    }
}
