pub mod general;
pub mod modify;
pub mod view;

use crate::core::ask;
use crate::core::command::{CommandRegistry, Context, ExecutionResponse};
use crate::domain::model::Movie;
use crate::utils::validation::Validate;

/// Registry holding the full command set.
pub fn default_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();

    registry.register("help", general::Help);
    registry.register("info", general::Info);
    registry.register("show", view::Show);
    registry.register("add", modify::Add);
    registry.register("update", modify::Update);
    registry.register("remove_by_id", modify::RemoveById);
    registry.register("clear", modify::Clear);
    registry.register("save", general::Save);
    registry.register("execute_script", general::ExecuteScript);
    registry.register("exit", general::Exit);
    registry.register("add_if_max", modify::AddIfMax);
    registry.register("add_if_min", modify::AddIfMin);
    registry.register("remove_lower", modify::RemoveLower);
    registry.register(
        "filter_less_than_screenwriter",
        view::FilterLessThanScreenwriter,
    );
    registry.register("print_descending", view::PrintDescending);
    registry.register("sum_of_oscar_count", view::SumOfOscarCount);

    registry
}

/// Asks for a movie with the given id and checks it.
fn ask_valid_movie(
    ctx: &mut Context<'_>,
    title: &str,
    id: i64,
) -> Result<Movie, ExecutionResponse> {
    if !ctx.console.in_script() {
        ctx.console.println(&format!("******** {} ********", title));
    }
    let movie = ask::ask_movie(ctx.console, id)?;
    let violations = movie.violations();
    if violations.is_empty() {
        Ok(movie)
    } else {
        Err(ExecutionResponse::fail(violations.join("\n")))
    }
}

fn parse_id(args: &str, usage: &str) -> Result<i64, ExecutionResponse> {
    if args.is_empty() {
        return Err(ExecutionResponse::fail(format!(
            "No id given!\nUsage: '{}'",
            usage
        )));
    }
    args.parse::<i64>()
        .map_err(|_| ExecutionResponse::fail("id must be a number!"))
}

fn listing<'a>(movies: impl IntoIterator<Item = &'a Movie>) -> Option<String> {
    let text = movies
        .into_iter()
        .map(Movie::to_string)
        .collect::<Vec<_>>()
        .join("\n\n");
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
