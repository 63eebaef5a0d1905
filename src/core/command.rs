use crate::core::collection::CollectionManager;
use crate::domain::ports::Console;
use crate::utils::error::CollectionError;
use indexmap::IndexMap;

/// Outcome of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResponse {
    pub success: bool,
    pub message: String,
    pub exit: bool,
}

impl ExecutionResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            exit: false,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            exit: false,
        }
    }

    pub fn exit() -> Self {
        Self {
            success: true,
            message: String::new(),
            exit: true,
        }
    }
}

impl From<CollectionError> for ExecutionResponse {
    fn from(error: CollectionError) -> Self {
        Self::fail(error.user_friendly_message())
    }
}

/// What a command gets to work with while it runs.
pub struct Context<'a> {
    pub console: &'a mut dyn Console,
    pub collection: &'a mut CollectionManager,
    pub registry: &'a CommandRegistry,
}

pub trait Command {
    /// Usage line, e.g. `update id {element}`.
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    /// `args` is the trimmed rest of the line after the keyword.
    fn apply(&self, args: &str, ctx: &mut Context<'_>) -> ExecutionResponse;

    fn usage_error(&self) -> ExecutionResponse {
        ExecutionResponse::fail(format!(
            "Wrong number of arguments!\nUsage: '{}'",
            self.name()
        ))
    }
}

/// Commands by keyword, in registration order.
#[derive(Default)]
pub struct CommandRegistry {
    commands: IndexMap<String, Box<dyn Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, keyword: impl Into<String>, command: impl Command + 'static) {
        self.commands.insert(keyword.into(), Box::new(command));
    }

    pub fn get(&self, keyword: &str) -> Option<&dyn Command> {
        self.commands.get(keyword).map(|command| command.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn Command)> {
        self.commands
            .iter()
            .map(|(keyword, command)| (keyword.as_str(), command.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Splits a raw line into keyword and trimmed arguments.
pub fn split_command(line: &str) -> (&str, &str) {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some((keyword, args)) => (keyword, args.trim()),
        None => (line, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl Command for Echo {
        fn name(&self) -> &str {
            "echo text"
        }

        fn description(&self) -> &str {
            "repeat the text"
        }

        fn apply(&self, args: &str, _ctx: &mut Context<'_>) -> ExecutionResponse {
            ExecutionResponse::ok(args)
        }
    }

    #[test]
    fn test_split_command() {
        assert_eq!(split_command("  update   5  "), ("update", "5"));
        assert_eq!(split_command("show"), ("show", ""));
        assert_eq!(split_command("exec\ta b "), ("exec", "a b"));
        assert_eq!(split_command("   "), ("", ""));
    }

    #[test]
    fn test_registry_keeps_registration_order() {
        let mut registry = CommandRegistry::new();
        registry.register("zeta", Echo);
        registry.register("alpha", Echo);

        let keywords: Vec<&str> = registry.iter().map(|(keyword, _)| keyword).collect();
        assert_eq!(keywords, vec!["zeta", "alpha"]);
        assert!(registry.get("alpha").is_some());
        assert!(registry.get("beta").is_none());
        assert_eq!(registry.get("zeta").unwrap().usage_error().message,
            "Wrong number of arguments!\nUsage: 'echo text'");
    }

    #[test]
    fn test_error_converts_to_failed_response() {
        let response: ExecutionResponse = CollectionError::Cancelled.into();
        assert!(!response.success);
        assert_eq!(response.message, "Cancelled...");
    }
}
