use reedline::{Completer, Span, Suggestion};

use crate::commands::COMMANDS;

/// Command completer for the REPL
///
/// Completes command names, and the yes/no argument of `read`.
pub struct ReplCompleter {
    commands: Vec<&'static str>,
}

impl ReplCompleter {
    pub fn new() -> Self {
        Self {
            // Single-letter aliases only clutter the menu.
            commands: COMMANDS.iter().copied().filter(|c| c.len() > 1).collect(),
        }
    }
}

impl Default for ReplCompleter {
    fn default() -> Self {
        Self::new()
    }
}

impl Completer for ReplCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let line_to_pos = &line[..pos];
        let words: Vec<&str> = line_to_pos.split_whitespace().collect();
        let typing_word = !line_to_pos.ends_with(char::is_whitespace);

        let (candidates, prefix): (&[&str], &str) = match (words.as_slice(), typing_word) {
            ([], _) => (self.commands.as_slice(), ""),
            ([word], true) => (self.commands.as_slice(), *word),
            (["read"], false) => (READ_CHOICES, ""),
            (["read", word], true) => (READ_CHOICES, *word),
            _ => return Vec::new(),
        };

        let start = pos - prefix.len();
        candidates
            .iter()
            .filter(|candidate| candidate.starts_with(prefix))
            .map(|candidate| Suggestion {
                value: candidate.to_string(),
                description: description(candidate),
                style: None,
                extra: None,
                span: Span::new(start, pos),
                append_whitespace: true,
                match_indices: None,
            })
            .collect()
    }
}

const READ_CHOICES: &[&str] = &["yes", "no"];

fn description(word: &str) -> Option<String> {
    let text = match word {
        "help" => "Show help",
        "exit" | "quit" => "Exit the REPL",
        "new" | "open" => "Open the new-book form",
        "title" => "Set the form's title",
        "author" => "Set the form's author",
        "pages" => "Set the form's page count",
        "read" => "Set the form's read status",
        "form" => "Show the form",
        "submit" => "Add the form's book",
        "cancel" => "Close the form",
        "add" => "Add a book from JSON",
        "list" | "ls" => "Show the library",
        "toggle" => "Mark a book read or unread",
        "remove" | "rm" => "Remove a book",
        "info" => "Summarize a book",
        "storage" => "Show where the library is saved",
        "yes" => "Already read",
        "no" => "Not yet read",
        _ => return None,
    };
    Some(text.to_string())
}
