use crate::core::collection::CollectionManager;
use crate::core::command::{split_command, CommandRegistry, Context, ExecutionResponse};
use crate::domain::ports::Console;
use crate::utils::error::CollectionError;
use std::collections::VecDeque;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const EXECUTE_SCRIPT: &str = "execute_script";

/// Hard cap on nested scripts, whatever the configured recursion depth.
pub const MAX_SCRIPT_DEPTH: usize = 500;

#[derive(Debug, Clone)]
pub struct RunnerOptions {
    pub prompt: String,
    /// Extra re-entries allowed for a script already running, on top of the
    /// first nested call. Asked interactively the first time recursion is
    /// seen when `None`.
    pub max_recursion_depth: Option<usize>,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self {
            prompt: "$ ".to_string(),
            max_recursion_depth: None,
        }
    }
}

/// Drives commands from the console, either interactively or from scripts.
pub struct Runner<C: Console> {
    console: C,
    collection: CollectionManager,
    registry: CommandRegistry,
    prompt: String,
    recursion_limit: Option<usize>,
    script_stack: Vec<PathBuf>,
}

impl<C: Console> Runner<C> {
    pub fn new(
        console: C,
        collection: CollectionManager,
        registry: CommandRegistry,
        options: RunnerOptions,
    ) -> Self {
        Self {
            console,
            collection,
            registry,
            prompt: options.prompt,
            recursion_limit: options.max_recursion_depth,
            script_stack: Vec::new(),
        }
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn collection(&self) -> &CollectionManager {
        &self.collection
    }

    /// Reads and runs commands until `exit` or end of input.
    pub fn interactive_mode(&mut self) {
        loop {
            let prompt = self.prompt.clone();
            self.console.print(&prompt);

            let line = match self.console.read_line() {
                Ok(line) => line,
                Err(CollectionError::EndOfInput) => {
                    self.console
                        .print_error(&CollectionError::EndOfInput.user_friendly_message());
                    break;
                }
                Err(e) => {
                    tracing::error!("Failed to read user input: {}", e);
                    self.console.print_error(&format!("Unexpected error: {}", e));
                    break;
                }
            };

            let response = self.run_line(&line);
            if response.exit {
                // a script ending in `exit` still shows what it did
                if !response.message.is_empty() {
                    self.console.println(&response.message);
                }
                tracing::info!("Exit requested");
                break;
            }
            self.console.println(&response.message);
        }
    }

    /// Runs one command line.
    pub fn run_line(&mut self, line: &str) -> ExecutionResponse {
        let (keyword, args) = split_command(line);
        self.launch(keyword, args)
    }

    fn launch(&mut self, keyword: &str, args: &str) -> ExecutionResponse {
        if keyword.is_empty() {
            return ExecutionResponse::ok("");
        }

        let Some(command) = self.registry.get(keyword) else {
            return ExecutionResponse::fail(format!(
                "Command '{}' not found. Type 'help' for help",
                keyword
            ));
        };

        tracing::debug!("Running command '{}' with args '{}'", keyword, args);
        let mut ctx = Context {
            console: &mut self.console,
            collection: &mut self.collection,
            registry: &self.registry,
        };
        let response = command.apply(args, &mut ctx);

        if keyword != EXECUTE_SCRIPT || !response.success {
            return response;
        }

        let script = self.script_mode(args);
        ExecutionResponse {
            success: script.success,
            message: format!("{}\n{}", response.message, script.message.trim()),
            exit: script.exit,
        }
    }

    fn script_mode(&mut self, argument: &str) -> ExecutionResponse {
        let path = Path::new(argument);
        if !path.exists() {
            return ExecutionResponse::fail("Script file does not exist!");
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                return ExecutionResponse::fail("No permission to read the script file!");
            }
            Err(e) => {
                tracing::warn!("Failed to read script '{}': {}", argument, e);
                return ExecutionResponse::fail(format!("Cannot read the script file: {}", e));
            }
        };

        let lines: VecDeque<String> = content.lines().map(str::to_string).collect();
        if lines.iter().all(|line| line.trim().is_empty()) {
            return ExecutionResponse::fail("Script file is empty!");
        }

        tracing::info!("Executing script '{}'", argument);
        self.script_stack.push(script_key(path));
        self.console.push_script(lines);

        let outcome = self.run_script_lines();

        self.console.pop_script();
        self.script_stack.pop();
        outcome
    }

    fn run_script_lines(&mut self) -> ExecutionResponse {
        let mut output = String::new();
        let mut last = ExecutionResponse::ok("");
        let mut last_was_nested_script = false;

        while let Some(line) = self.next_script_line() {
            let (keyword, args) = split_command(&line);
            output.push_str(&format!("{}{}\n", self.prompt, join_command(keyword, args)));

            last_was_nested_script = keyword == EXECUTE_SCRIPT && !args.is_empty();
            last = if keyword == EXECUTE_SCRIPT && !self.recursion_allowed(args) {
                tracing::warn!("Recursion limit reached for script '{}'", args);
                ExecutionResponse::ok("Maximum recursion depth exceeded")
            } else {
                self.launch(keyword, args)
            };

            output.push_str(&last.message);
            output.push('\n');

            if !last.success || last.exit {
                break;
            }
        }

        if !last.success && !last_was_nested_script {
            output.push_str("Check the script for correctness!\n");
        }

        ExecutionResponse {
            success: last.success,
            message: output,
            exit: last.exit,
        }
    }

    /// Next non-blank line of the running script.
    fn next_script_line(&mut self) -> Option<String> {
        while self.console.has_next_line() {
            match self.console.read_line() {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => return Some(line),
                Err(_) => return None,
            }
        }
        None
    }

    fn recursion_allowed(&mut self, argument: &str) -> bool {
        if self.script_stack.len() >= MAX_SCRIPT_DEPTH {
            return false;
        }

        let key = script_key(Path::new(argument));
        let occurrences = self.script_stack.iter().filter(|s| **s == key).count();
        if occurrences == 0 {
            return true;
        }

        let limit = match self.recursion_limit {
            Some(limit) => limit,
            None => {
                let limit = self.ask_recursion_limit();
                self.recursion_limit = Some(limit);
                limit
            }
        };
        // the limit counts re-entries beyond the first nested call
        occurrences - 1 <= limit
    }

    fn ask_recursion_limit(&mut self) -> usize {
        self.console.println(&format!(
            "Recursion detected! Enter the maximum recursion depth (0..{})",
            MAX_SCRIPT_DEPTH
        ));
        loop {
            self.console.print("> ");
            let line = match self.console.read_interactive_line() {
                Ok(line) => line,
                Err(e) => {
                    tracing::warn!("No recursion depth given ({}), refusing recursion", e);
                    return 0;
                }
            };
            match line.trim().parse::<usize>() {
                Ok(limit) if limit <= MAX_SCRIPT_DEPTH => return limit,
                _ => self.console.println("Depth not recognized"),
            }
        }
    }
}

fn script_key(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

fn join_command(keyword: &str, args: &str) -> String {
    if args.is_empty() {
        keyword.to_string()
    } else {
        format!("{} {}", keyword, args)
    }
}
