//! Scripted host for driving the REPL in tests.

use std::collections::VecDeque;

use super::{InputLine, IoError, IoHost, Output, OutputStyle, PromptConfig, Signal};

/// Host with queued input and captured output.
///
/// Each `wait_for_input()` consumes one scripted step. A step is either a
/// line or a signal, so signals can be placed between lines.
#[derive(Debug, Default)]
pub struct TestHost {
    script: VecDeque<Step>,
    pending_input: Option<InputLine>,
    pending_signal: Option<Signal>,
    outputs: Vec<Output>,
    prompts: Vec<PromptConfig>,
}

#[derive(Debug)]
enum Step {
    Line(String),
    Signal(Signal),
}

impl TestHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// A host that will type `lines` in order.
    pub fn with_lines<I, L>(lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        let mut host = Self::new();
        for line in lines {
            host.queue_line(line);
        }
        host
    }

    pub fn queue_line(&mut self, line: impl Into<String>) {
        self.script.push_back(Step::Line(line.into()));
    }

    pub fn queue_signal(&mut self, signal: Signal) {
        self.script.push_back(Step::Signal(signal));
    }

    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    /// All output text, one entry per line.
    pub fn output_text(&self) -> String {
        self.outputs
            .iter()
            .map(|o| o.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn errors(&self) -> Vec<&str> {
        self.outputs
            .iter()
            .filter(|o| o.style == OutputStyle::Error)
            .map(|o| o.text.as_str())
            .collect()
    }

    /// Every prompt state the core asked for, oldest first.
    pub fn prompts(&self) -> &[PromptConfig] {
        &self.prompts
    }
}

impl IoHost for TestHost {
    fn wait_for_input(&mut self) -> Result<(), IoError> {
        match self.script.pop_front() {
            Some(Step::Line(line)) => self.pending_input = Some(InputLine { line }),
            Some(Step::Signal(signal)) => self.pending_signal = Some(signal),
            // An exhausted script behaves like Ctrl+D so loops always end.
            None => self.pending_signal = Some(Signal::Eof),
        }
        Ok(())
    }

    fn read_input(&mut self) -> Result<Option<InputLine>, IoError> {
        Ok(self.pending_input.take())
    }

    fn read_signal(&mut self) -> Result<Option<Signal>, IoError> {
        Ok(self.pending_signal.take())
    }

    fn write_output(&mut self, output: Output) -> Result<(), IoError> {
        self.outputs.push(output);
        Ok(())
    }

    fn write_prompt(&mut self, config: PromptConfig) -> Result<(), IoError> {
        self.prompts.push(config);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_are_consumed_in_order() {
        let mut host = TestHost::with_lines(["list"]);
        host.queue_signal(Signal::Interrupt);

        host.wait_for_input().unwrap();
        assert_eq!(host.read_input().unwrap().unwrap().line, "list");
        assert!(host.read_signal().unwrap().is_none());

        host.wait_for_input().unwrap();
        assert!(host.read_input().unwrap().is_none());
        assert!(matches!(
            host.read_signal().unwrap(),
            Some(Signal::Interrupt)
        ));
    }

    #[test]
    fn exhausted_script_sends_eof() {
        let mut host = TestHost::new();
        host.wait_for_input().unwrap();
        assert!(matches!(host.read_signal().unwrap(), Some(Signal::Eof)));
    }

    #[test]
    fn errors_filters_by_style() {
        let mut host = TestHost::new();
        host.write_output(Output::normal("ok")).unwrap();
        host.write_output(Output::error("no row #4 in the table"))
            .unwrap();

        assert_eq!(host.errors(), vec!["no row #4 in the table"]);
        assert_eq!(host.output_text(), "ok\nno row #4 in the table");
    }

    #[test]
    fn prompts_are_recorded() {
        let mut host = TestHost::new();
        host.write_prompt(PromptConfig {
            book_count: 2,
            form_open: true,
            storage_available: true,
        })
        .unwrap();

        assert_eq!(host.prompts().len(), 1);
        assert_eq!(host.prompts()[0].book_count, 2);
        assert!(host.prompts()[0].form_open);
    }
}
