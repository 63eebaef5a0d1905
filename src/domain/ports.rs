use crate::utils::error::Result;
use std::collections::VecDeque;
use std::path::Path;

/// Byte-level access to the collection file.
pub trait Storage: Send + Sync {
    fn read_file(&self, path: &Path) -> Result<Vec<u8>>;
    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()>;
}

/// Text console the commands talk to.
///
/// Input comes from the innermost running script when there is one, and
/// from the interactive stream otherwise.
pub trait Console {
    fn print(&mut self, text: &str);
    fn println(&mut self, text: &str);
    fn print_error(&mut self, text: &str);

    /// Next line from the current input source, without the line terminator.
    fn read_line(&mut self) -> Result<String>;

    /// Next line from the interactive stream, even while a script runs.
    fn read_interactive_line(&mut self) -> Result<String>;

    fn has_next_line(&mut self) -> bool;

    fn push_script(&mut self, lines: VecDeque<String>);
    fn pop_script(&mut self);
    fn in_script(&self) -> bool;
}
