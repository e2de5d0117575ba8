use std::path::PathBuf;

use clap::Parser;

use bookshelf_catalog::DEFAULT_STORAGE_KEY;
use bookshelf_repl::{EditModePreference, ReplConfig};

/// Bookshelf - keep track of the books you own and have read
#[derive(Parser, Debug)]
#[command(name = "bookshelf")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding the storage files
    #[arg(long, env = "BOOKSHELF_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Keep the library in memory only (overrides --data-dir)
    #[arg(long)]
    memory: bool,

    /// Storage key the library is saved under
    #[arg(long, default_value = DEFAULT_STORAGE_KEY)]
    key: String,

    /// Size cap in bytes for the storage medium
    #[arg(long)]
    quota: Option<usize>,

    /// Discard a stored library that cannot be decoded instead of failing
    #[arg(long)]
    reset_corrupt: bool,

    /// Force vi editing mode
    #[arg(long, conflicts_with = "emacs")]
    vi: bool,

    /// Force emacs editing mode
    #[arg(long)]
    emacs: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let backend = match ReplConfig::resolve_backend(args.memory, args.data_dir) {
        Ok(backend) => backend,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let edit_mode = if args.vi {
        Some(EditModePreference::Vi)
    } else if args.emacs {
        Some(EditModePreference::Emacs)
    } else {
        None
    };

    let config = ReplConfig {
        backend,
        key: args.key,
        quota: args.quota,
        reset_corrupt: args.reset_corrupt,
        edit_mode,
    };

    if let Err(e) = bookshelf_repl::run(config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
