use crate::domain::ports::Console;
use crate::utils::error::{CollectionError, Result};
use std::collections::VecDeque;
use std::io::{self, BufRead, Stderr, StdinLock, Stdout, Write};

const BOM: char = '\u{FEFF}';

/// Console over arbitrary reader and writers, with a stack of script inputs
/// layered on top of the interactive stream.
pub struct StandardConsole<R, W, E> {
    input: R,
    out: W,
    err: E,
    scripts: Vec<VecDeque<String>>,
    pending: Option<String>,
}

impl StandardConsole<StdinLock<'static>, Stdout, Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout(), io::stderr())
    }
}

impl<R: BufRead, W: Write, E: Write> StandardConsole<R, W, E> {
    pub fn new(input: R, out: W, err: E) -> Self {
        Self {
            input,
            out,
            err,
            scripts: Vec::new(),
            pending: None,
        }
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn errors(&self) -> &E {
        &self.err
    }

    fn fill_pending(&mut self) -> Result<bool> {
        if self.pending.is_some() {
            return Ok(true);
        }
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(false);
        }
        self.pending = Some(clean_line(buf));
        Ok(true)
    }
}

fn clean_line(mut line: String) -> String {
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    match line.strip_prefix(BOM) {
        Some(rest) => rest.to_string(),
        None => line,
    }
}

impl<R: BufRead, W: Write, E: Write> Console for StandardConsole<R, W, E> {
    fn print(&mut self, text: &str) {
        let _ = write!(self.out, "{}", text);
        let _ = self.out.flush();
    }

    fn println(&mut self, text: &str) {
        let _ = writeln!(self.out, "{}", text);
        let _ = self.out.flush();
    }

    fn print_error(&mut self, text: &str) {
        let _ = writeln!(self.err, "Error: {}", text);
        let _ = self.err.flush();
    }

    fn read_line(&mut self) -> Result<String> {
        match self.scripts.last_mut() {
            Some(script) => script
                .pop_front()
                .map(clean_line)
                .ok_or(CollectionError::EndOfInput),
            None => self.read_interactive_line(),
        }
    }

    fn read_interactive_line(&mut self) -> Result<String> {
        if self.fill_pending()? {
            if let Some(line) = self.pending.take() {
                return Ok(line);
            }
        }
        Err(CollectionError::EndOfInput)
    }

    fn has_next_line(&mut self) -> bool {
        match self.scripts.last() {
            Some(script) => !script.is_empty(),
            None => self.fill_pending().unwrap_or(false),
        }
    }

    fn push_script(&mut self, lines: VecDeque<String>) {
        self.scripts.push(lines);
    }

    fn pop_script(&mut self) {
        self.scripts.pop();
    }

    fn in_script(&self) -> bool {
        !self.scripts.is_empty()
    }
}
