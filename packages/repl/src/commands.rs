//! REPL command parsing and execution.
//!
//! Commands:
//! - `new` - Open the intake form
//! - `title <text>`, `author <text>`, `pages <text>`, `read <yes|no>` - Fill the form
//! - `form` - Show the form's current values
//! - `submit` - Add the book from the form and reset it
//! - `cancel` - Hide the form
//! - `add <json>` - Add a book from a JSON record
//! - `list` - Show the table
//! - `toggle <row>` - Flip a book's read status
//! - `remove <row>` - Remove a book
//! - `info <row>` - One-line summary of a book
//! - `storage` - Show where the library is kept
//! - `help` - Show help
//! - `exit` - Exit the REPL

use nu_ansi_term::{Color, Style};

use bookshelf_catalog::{Book, BookFields, ReadChoice, RowId};

use crate::app_context::AppContext;

/// Result of executing a command
pub enum CommandResult {
    /// Command succeeded, optionally with output to display
    Ok { display: Option<String> },
    /// Command failed with an error message
    Error(String),
    /// User requested to exit
    Exit,
    /// Show help
    Help,
}

impl CommandResult {
    fn ok_display(display: impl Into<String>) -> Self {
        CommandResult::Ok {
            display: Some(display.into()),
        }
    }

    fn ok_none() -> Self {
        CommandResult::Ok { display: None }
    }
}

/// Names and aliases the REPL understands, for completion and highlighting.
pub const COMMANDS: &[&str] = &[
    "help", "?", "exit", "quit", "q", "new", "open", "title", "author", "pages", "read", "form",
    "submit", "cancel", "add", "list", "ls", "toggle", "t", "remove", "rm", "info", "storage",
];

/// Parse and execute a command
pub fn execute(input: &str, ctx: &mut AppContext) -> CommandResult {
    let input = input.trim();

    if input.is_empty() {
        return CommandResult::ok_none();
    }

    let mut parts = input.splitn(2, char::is_whitespace);
    let command = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    match command.to_lowercase().as_str() {
        "help" | "?" => CommandResult::Help,
        "exit" | "quit" | "q" => CommandResult::Exit,
        "new" | "open" => cmd_new(ctx),
        "title" | "author" | "pages" | "read" => cmd_field(&command.to_lowercase(), args, ctx),
        "form" => cmd_form(ctx),
        "submit" => cmd_submit(ctx),
        "cancel" => cmd_cancel(ctx),
        "add" => cmd_add(args, ctx),
        "list" | "ls" => cmd_list(ctx),
        "toggle" | "t" => cmd_toggle(args, ctx),
        "remove" | "rm" => cmd_remove(args, ctx),
        "info" => cmd_info(args, ctx),
        "storage" => cmd_storage(ctx),
        _ => CommandResult::Error(format!(
            "Unknown command: '{}'. Type 'help' for available commands.",
            command
        )),
    }
}

/// Format help text
pub fn format_help() -> String {
    let cmd_style = Style::new().bold().fg(Color::Cyan);
    let arg_style = Style::new().fg(Color::Yellow);
    let desc_style = Style::new().fg(Color::White);

    let mut help = String::new();
    help.push_str(&format!(
        "{}\n\n",
        Style::new().bold().paint("Bookshelf Commands")
    ));

    let commands = [
        ("list", "", "Show the library table (alias: ls)"),
        ("toggle", "<row>", "Mark a book read or unread (alias: t)"),
        ("remove", "<row>", "Remove a book (alias: rm)"),
        ("info", "<row>", "Summarize a book in one line"),
        ("add", "<json>", "Add a book from a JSON record"),
        ("", "", ""),
        ("new", "", "Open the new-book form (alias: open)"),
        ("title", "<text>", "Set the form's title"),
        ("author", "<text>", "Set the form's author"),
        ("pages", "<text>", "Set the form's page count"),
        ("read", "<yes|no>", "Set the form's read status"),
        ("form", "", "Show the form's current values"),
        ("submit", "", "Add the form's book and clear the form"),
        ("cancel", "", "Close the form"),
        ("", "", ""),
        ("storage", "", "Show where the library is saved"),
        ("help", "", "Show this help message"),
        ("exit", "", "Exit the REPL (alias: quit, q)"),
    ];

    for (cmd, args, desc) in commands {
        if cmd.is_empty() {
            help.push('\n');
        } else {
            help.push_str(&format!(
                "  {:<12} {:<20} {}\n",
                cmd_style.paint(cmd),
                arg_style.paint(args),
                desc_style.paint(desc)
            ));
        }
    }

    help.push_str(&format!("\n{}\n", Style::new().bold().paint("Examples")));
    help.push_str(&format!(
        "  Add through the form:     {}\n",
        arg_style.paint("new, title Dune, author Frank Herbert, pages 412, read no, submit")
    ));
    help.push_str(&format!(
        "  Add in one line:          {}\n",
        arg_style.paint(
            "add {\"title\": \"LOTR\", \"author\": \"Tolkien\", \"pages\": 442, \"read\": false}"
        )
    ));
    help.push_str(&format!(
        "  Toggle row 3:             {}\n",
        arg_style.paint("toggle 3  or  toggle #3")
    ));

    help.push_str(&format!(
        "\n{}",
        Style::new()
            .italic()
            .paint("Rows keep their number until removed; numbers are never reused.")
    ));

    help
}

fn cmd_new(ctx: &mut AppContext) -> CommandResult {
    ctx.catalog_mut().form_mut().open();
    CommandResult::ok_display(format!(
        "{}\n{}",
        Color::Green.paint("form open"),
        Color::DarkGray.paint("fill it with title/author/pages/read, then 'submit'")
    ))
}

fn cmd_field(field: &str, args: &str, ctx: &mut AppContext) -> CommandResult {
    let form = ctx.catalog_mut().form_mut();
    let result = match field {
        "title" => form.set_title(args),
        "author" => form.set_author(args),
        "pages" => form.set_pages(args),
        _ => match args.parse::<ReadChoice>() {
            Ok(choice) => form.set_read(choice),
            Err(e) => return CommandResult::Error(format!("Invalid read status: {}", e)),
        },
    };

    match result {
        Ok(()) => CommandResult::ok_none(),
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

fn cmd_form(ctx: &mut AppContext) -> CommandResult {
    let form = ctx.catalog().form();
    if !form.is_open() {
        return CommandResult::ok_display(format!(
            "{}",
            Color::Yellow.paint("The form is closed. Use 'new' to open it.")
        ));
    }

    let label = Style::new().bold();
    let read = form
        .read()
        .map(|choice| choice.to_string())
        .unwrap_or_default();
    CommandResult::ok_display(format!(
        "  {:<8} {}\n  {:<8} {}\n  {:<8} {}\n  {:<8} {}",
        label.paint("title"),
        form.title(),
        label.paint("author"),
        form.author(),
        label.paint("pages"),
        form.pages(),
        label.paint("read"),
        read
    ))
}

fn cmd_submit(ctx: &mut AppContext) -> CommandResult {
    match ctx.catalog_mut().submit_form() {
        Ok(row) => added(row, ctx),
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

fn cmd_cancel(ctx: &mut AppContext) -> CommandResult {
    ctx.catalog_mut().form_mut().close();
    CommandResult::ok_none()
}

fn cmd_add(args: &str, ctx: &mut AppContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Error(
            "Usage: add <json>\nExample: add {\"title\": \"LOTR\", \"author\": \"Tolkien\", \"pages\": 442, \"read\": false}"
                .to_string(),
        );
    }

    let fields: BookFields = match serde_json::from_str(args) {
        Ok(fields) => fields,
        Err(e) => return CommandResult::Error(format!("Invalid book JSON: {}", e)),
    };

    let row = ctx.catalog_mut().add_book(fields);
    added(row, ctx)
}

fn cmd_list(ctx: &mut AppContext) -> CommandResult {
    match ctx.catalog().view().render() {
        Some(table) => CommandResult::ok_display(style_table(&table)),
        None => CommandResult::ok_display(format!(
            "{}",
            Color::Yellow.paint("The library is empty. Use 'new' or 'add' to add a book.")
        )),
    }
}

fn cmd_toggle(args: &str, ctx: &mut AppContext) -> CommandResult {
    let row = match parse_row(args) {
        Ok(row) => row,
        Err(result) => return result,
    };

    match ctx.catalog_mut().toggle_row(row) {
        Ok(book) => CommandResult::ok_display(format!(
            "{} {} {}",
            Color::Cyan.paint(row.to_string()),
            book.title(),
            status(book)
        )),
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

fn cmd_remove(args: &str, ctx: &mut AppContext) -> CommandResult {
    let row = match parse_row(args) {
        Ok(row) => row,
        Err(result) => return result,
    };

    match ctx.catalog_mut().remove_row(row) {
        Ok(book) => CommandResult::ok_display(format!(
            "{} {} {}",
            Color::Green.paint("removed"),
            Color::Cyan.paint(row.to_string()),
            book.title()
        )),
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

fn cmd_info(args: &str, ctx: &mut AppContext) -> CommandResult {
    let row = match parse_row(args) {
        Ok(row) => row,
        Err(result) => return result,
    };

    match ctx.catalog().book_at(row) {
        Ok(book) => CommandResult::ok_display(book.info()),
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

fn cmd_storage(ctx: &mut AppContext) -> CommandResult {
    let library = ctx.catalog().library();
    let saved = if library.storage_available() {
        Color::Green.paint("yes")
    } else {
        Color::Red.paint("no (storage unavailable, changes last for this session only)")
    };

    CommandResult::ok_display(format!(
        "  backend  {}\n  key      {}\n  books    {}\n  saving   {}",
        ctx.backend(),
        library.storage_key(),
        library.len(),
        saved
    ))
}

fn added(row: RowId, ctx: &AppContext) -> CommandResult {
    let title = ctx
        .catalog()
        .book_at(row)
        .map(|book| book.title().to_string())
        .unwrap_or_default();
    CommandResult::ok_display(format!(
        "{} {} {}",
        Color::Green.paint("added"),
        Color::Cyan.paint(row.to_string()),
        title
    ))
}

fn parse_row(args: &str) -> Result<RowId, CommandResult> {
    if args.is_empty() {
        return Err(CommandResult::Error(
            "Missing row number. Use 'list' to see rows.".to_string(),
        ));
    }
    args.parse::<RowId>()
        .map_err(|_| CommandResult::Error(format!("Invalid row: '{}'", args)))
}

fn status(book: &Book) -> String {
    let style = if book.is_read() {
        Color::Green
    } else {
        Color::Yellow
    };
    style.paint(book.read_display()).to_string()
}

/// Bold the header line of a rendered table and dim its rule.
fn style_table(table: &str) -> String {
    let mut lines = table.lines();
    let mut out = String::new();
    if let Some(header) = lines.next() {
        out.push_str(&Style::new().bold().paint(header).to_string());
    }
    if let Some(rule) = lines.next() {
        out.push('\n');
        out.push_str(&Color::DarkGray.paint(rule).to_string());
    }
    for line in lines {
        out.push('\n');
        out.push_str(line);
    }
    out
}
