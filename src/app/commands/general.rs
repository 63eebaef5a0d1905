use crate::core::command::{Command, Context, ExecutionResponse};
use chrono::{DateTime, Local};

pub struct Help;

impl Command for Help {
    fn name(&self) -> &str {
        "help"
    }

    fn description(&self) -> &str {
        "show help for the available commands"
    }

    fn apply(&self, args: &str, ctx: &mut Context<'_>) -> ExecutionResponse {
        if !args.is_empty() {
            return self.usage_error();
        }
        let text = ctx
            .registry
            .iter()
            .map(|(_, command)| format!(" {:<45} {}", command.name(), command.description()))
            .collect::<Vec<_>>()
            .join("\n");
        ExecutionResponse::ok(text)
    }
}

pub struct Info;

fn format_time(time: Option<DateTime<Local>>, missing: &str) -> String {
    time.map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| missing.to_string())
}

impl Command for Info {
    fn name(&self) -> &str {
        "info"
    }

    fn description(&self) -> &str {
        "show information about the collection"
    }

    fn apply(&self, args: &str, ctx: &mut Context<'_>) -> ExecutionResponse {
        if !args.is_empty() {
            return self.usage_error();
        }
        let collection = &*ctx.collection;
        let text = [
            "Collection details:".to_string(),
            " Type: Vec<Movie>".to_string(),
            format!(" File: {}", collection.dump().file_path().display()),
            format!(
                " Initialization time: {}",
                format_time(collection.last_init_time(), "not loaded in this session")
            ),
            format!(
                " Last save time: {}",
                format_time(collection.last_save_time(), "not saved in this session")
            ),
            format!(" Number of elements: {}", collection.len()),
        ]
        .join("\n");
        ExecutionResponse::ok(text)
    }
}

pub struct Save;

impl Command for Save {
    fn name(&self) -> &str {
        "save"
    }

    fn description(&self) -> &str {
        "save the collection to the file"
    }

    fn apply(&self, args: &str, ctx: &mut Context<'_>) -> ExecutionResponse {
        if !args.is_empty() {
            return self.usage_error();
        }
        match ctx.collection.save_collection() {
            Ok(()) => ExecutionResponse::ok("Collection saved!"),
            Err(e) => {
                tracing::error!("Saving the collection failed: {}", e);
                ExecutionResponse::fail(format!(
                    "{}\n{}",
                    e.user_friendly_message(),
                    e.recovery_suggestion()
                ))
            }
        }
    }
}

/// Only checks the argument; the runner executes the script itself.
pub struct ExecuteScript;

impl Command for ExecuteScript {
    fn name(&self) -> &str {
        "execute_script file_name"
    }

    fn description(&self) -> &str {
        "read and execute a script from the given file"
    }

    fn apply(&self, args: &str, _ctx: &mut Context<'_>) -> ExecutionResponse {
        if args.is_empty() {
            return ExecutionResponse::fail(
                "No file name given!\nUsage: 'execute_script file_name'",
            );
        }
        ExecutionResponse::ok(format!("Executing script '{}'", args))
    }
}

pub struct Exit;

impl Command for Exit {
    fn name(&self) -> &str {
        "exit"
    }

    fn description(&self) -> &str {
        "quit the program (without saving)"
    }

    fn apply(&self, args: &str, _ctx: &mut Context<'_>) -> ExecutionResponse {
        if !args.is_empty() {
            return self.usage_error();
        }
        ExecutionResponse::exit()
    }
}
