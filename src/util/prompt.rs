//! Line-oriented user input

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Source of answers for interactive steps
pub trait Prompt: Send + Sync {
    /// Show `question` and read one answer line, without its line
    /// terminator. `None` means the input is closed.
    fn ask(&mut self, question: &str) -> io::Result<Option<String>>;
}

/// How a prompt travels through a pipeline
pub type BoxedPrompt = Box<dyn Prompt>;

/// Reads answers from the terminal
#[derive(Debug, Default)]
pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(question.as_bytes())?;
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(strip_line_ending(line)))
    }
}

/// Answers from a fixed list, for tests and unattended runs
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
    asked: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    /// Questions asked so far
    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        self.asked.push(question.to_string());
        Ok(self.answers.pop_front())
    }
}

fn strip_line_ending(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_answers_in_order() {
        let mut prompt = ScriptedPrompt::new(["Ann", "Bo"]);
        assert_eq!(prompt.ask("Name 1: ").unwrap(), Some("Ann".to_string()));
        assert_eq!(prompt.ask("Name 2: ").unwrap(), Some("Bo".to_string()));
        assert_eq!(prompt.ask("Name 3: ").unwrap(), None);
        assert_eq!(prompt.asked(), ["Name 1: ", "Name 2: ", "Name 3: "]);
    }

    #[test]
    fn test_strip_line_ending() {
        assert_eq!(strip_line_ending("Ann\r\n".to_string()), "Ann");
        assert_eq!(strip_line_ending("Bo\n".to_string()), "Bo");
        assert_eq!(strip_line_ending("Cy".to_string()), "Cy");
    }
}
