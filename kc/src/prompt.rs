use std::io::{self, BufRead, IsTerminal, Write};

use console::Term;
use dialoguer::Input;

use crate::style;

/// Blocking, line-at-a-time console input.
pub trait Prompter {
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;
}

/// Uses dialoguer on a terminal. When stderr is redirected or stdin is
/// piped, falls back to plain line reads from stdin.
pub struct ConsolePrompter;

impl ConsolePrompter {
    fn on_terminal() -> bool {
        Term::stderr().is_term() && io::stdin().is_terminal()
    }

    fn read_line_with(
        &mut self,
        terminal: bool,
        input: &mut impl BufRead,
        output: &mut impl Write,
        prompt: &str,
    ) -> io::Result<String> {
        if terminal {
            return Input::<String>::new()
                .with_prompt(style::prompt(prompt).to_string())
                .allow_empty(true)
                .interact_text();
        }
        read_plain(input, output, prompt)
    }
}

impl Prompter for ConsolePrompter {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        self.read_line_with(
            Self::on_terminal(),
            &mut io::stdin().lock(),
            &mut io::stderr(),
            prompt,
        )
    }
}

/// Prints `prompt: ` and reads one line; end of input is `UnexpectedEof`.
fn read_plain(input: &mut impl BufRead, output: &mut impl Write, prompt: &str) -> io::Result<String> {
    write!(output, "{}", style::prompt(format!("{prompt}: ")))?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no more input"));
    }
    let trimmed = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed);
    Ok(line)
}

/// Replays canned answers; running out behaves like a closed stdin.
#[cfg(test)]
pub struct Scripted {
    answers: std::collections::VecDeque<String>,
    pub prompts: Vec<String>,
}

#[cfg(test)]
impl Scripted {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            prompts: Vec::new(),
        }
    }
}

#[cfg(test)]
impl Prompter for Scripted {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        self.prompts.push(prompt.to_owned());
        self.answers
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more input"))
    }
}
