//! Terminal entry point.
//!
//! Wires a [`TerminalHost`] to a [`ReplCore`] built from the session
//! configuration.

use crate::app_context::{AppContext, ContextError};
use crate::config::ReplConfig;
use crate::core::ReplCore;
use crate::host::TerminalHost;
use crate::io::{ExitReason, IoError};

#[derive(thiserror::Error, Debug)]
pub enum ReplError {
    #[error(transparent)]
    Context(#[from] ContextError),

    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error(transparent)]
    Io(#[from] IoError),
}

/// Open the library described by `config` and run an interactive session.
pub fn run(config: ReplConfig) -> Result<ExitReason, ReplError> {
    let ctx = AppContext::new(&config)?;
    let mut host = TerminalHost::new(config.edit_mode)?;
    let mut core = ReplCore::new(ctx);

    let reason = core.run(&mut host)?;
    log::debug!("session ended: {:?}", reason);
    Ok(reason)
}
