//! # bookshelf-repl
//!
//! An interactive terminal front end for a bookshelf library.
//!
//! The library lives in a key-value storage medium (a directory on disk by
//! default, or process memory with `--memory`) and is shown as a numbered
//! table. Books are added through a small form or from a JSON record.
//!
//! ## Features
//!
//! - Add, list, toggle and remove books; every change is saved immediately
//! - Tab completion for commands
//! - Syntax highlighting for command lines and JSON records
//! - Vi mode support (detected from EDITOR, .inputrc, or BOOKSHELF_EDIT_MODE)
//! - Command history
//!
//! ## Usage
//!
//! ```bash
//! bookshelf
//!
//! # Inside the REPL:
//! > new
//! > title The Lord of the Rings
//! > author J.R.R. Tolkien
//! > pages 1178
//! > read no
//! > submit
//! > list
//! > toggle 1
//! ```

pub mod app_context;
pub mod commands;
pub mod completer;
pub mod config;
pub mod core;
pub mod highlighter;
pub mod host;
pub mod io;
pub mod repl;

pub use app_context::AppContext;
pub use config::{EditModePreference, ReplConfig, StorageBackend};
pub use repl::{run, ReplError};
