use nu_ansi_term::{Color, Style};
use reedline::{Highlighter, StyledText};

use crate::commands::COMMANDS;

/// Syntax highlighter for the REPL
pub struct ReplHighlighter {
    commands: &'static [&'static str],
}

impl ReplHighlighter {
    pub fn new() -> Self {
        Self { commands: COMMANDS }
    }
}

impl Default for ReplHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter for ReplHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut styled = StyledText::new();

        if line.is_empty() {
            return styled;
        }

        let (command, rest) = match line.find(char::is_whitespace) {
            Some(pos) => (&line[..pos], &line[pos..]),
            None => (line, ""),
        };

        let cmd_lower = command.to_lowercase();
        let cmd_style = if self.commands.contains(&cmd_lower.as_str()) {
            Style::new().bold().fg(Color::Cyan)
        } else {
            Style::new().fg(Color::Red)
        };
        styled.push((cmd_style, command.to_string()));

        if rest.is_empty() {
            return styled;
        }

        let arg_style = match cmd_lower.as_str() {
            "add" => {
                if rest.trim_start().starts_with('{') {
                    Style::new().fg(Color::Green)
                } else {
                    Style::new().fg(Color::Red)
                }
            }
            "toggle" | "t" | "remove" | "rm" | "info" => {
                let row = rest.trim().trim_start_matches('#');
                if !row.is_empty() && row.bytes().all(|b| b.is_ascii_digit()) {
                    Style::new().fg(Color::Yellow)
                } else {
                    Style::new().fg(Color::Red)
                }
            }
            "read" => Style::new().fg(Color::Magenta),
            _ => Style::new(),
        };
        styled.push((arg_style, rest.to_string()));

        styled
    }
}
