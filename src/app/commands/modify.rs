use super::{ask_valid_movie, parse_id};
use crate::core::command::{Command, Context, ExecutionResponse};
use std::cmp::Ordering;

pub struct Add;

impl Command for Add {
    fn name(&self) -> &str {
        "add {element}"
    }

    fn description(&self) -> &str {
        "add a new element to the collection"
    }

    fn apply(&self, args: &str, ctx: &mut Context<'_>) -> ExecutionResponse {
        if !args.is_empty() {
            return self.usage_error();
        }
        let id = ctx.collection.free_id();
        let movie = match ask_valid_movie(ctx, "New movie", id) {
            Ok(movie) => movie,
            Err(response) => return response,
        };
        if ctx.collection.add(movie) {
            ExecutionResponse::ok("Movie added!")
        } else {
            ExecutionResponse::fail(format!("Element with id={} already exists!", id))
        }
    }
}

pub struct Update;

impl Command for Update {
    fn name(&self) -> &str {
        "update id {element}"
    }

    fn description(&self) -> &str {
        "replace the element with the given id"
    }

    fn apply(&self, args: &str, ctx: &mut Context<'_>) -> ExecutionResponse {
        let id = match parse_id(args, self.name()) {
            Ok(id) => id,
            Err(response) => return response,
        };
        let Some(creation_date) = ctx.collection.get_by_id(id).map(|m| m.creation_date) else {
            return ExecutionResponse::fail(format!("Element with id={} not found!", id));
        };

        let title = format!("Updating movie id={}", id);
        let mut movie = match ask_valid_movie(ctx, &title, id) {
            Ok(movie) => movie,
            Err(response) => return response,
        };
        movie.creation_date = creation_date;

        ctx.collection.remove(id);
        ctx.collection.add(movie);
        ExecutionResponse::ok("Element updated!")
    }
}

pub struct RemoveById;

impl Command for RemoveById {
    fn name(&self) -> &str {
        "remove_by_id id"
    }

    fn description(&self) -> &str {
        "remove the element with the given id"
    }

    fn apply(&self, args: &str, ctx: &mut Context<'_>) -> ExecutionResponse {
        let id = match parse_id(args, self.name()) {
            Ok(id) => id,
            Err(response) => return response,
        };
        if ctx.collection.remove(id) {
            ExecutionResponse::ok(format!("Element with id={} removed!", id))
        } else {
            ExecutionResponse::fail(format!("Element with id={} not found!", id))
        }
    }
}

pub struct Clear;

impl Command for Clear {
    fn name(&self) -> &str {
        "clear"
    }

    fn description(&self) -> &str {
        "remove every element from the collection"
    }

    fn apply(&self, args: &str, ctx: &mut Context<'_>) -> ExecutionResponse {
        if !args.is_empty() {
            return self.usage_error();
        }
        ctx.collection.clear();
        ExecutionResponse::ok("Collection cleared!")
    }
}

/// Adds the element only when it sorts strictly beyond the current extreme
/// on the `wanted` side. An empty collection always accepts it.
fn add_if_extreme(ctx: &mut Context<'_>, wanted: Ordering, refusal: &str) -> ExecutionResponse {
    let id = ctx.collection.free_id();
    let movie = match ask_valid_movie(ctx, "New element", id) {
        Ok(movie) => movie,
        Err(response) => return response,
    };

    let extreme = match wanted {
        Ordering::Greater => ctx.collection.max(),
        _ => ctx.collection.min(),
    };
    let accepted = extreme.map_or(true, |current| movie.natural_cmp(current) == wanted);

    if accepted {
        ctx.collection.add(movie);
        ExecutionResponse::ok("Element added!")
    } else {
        ExecutionResponse::fail(refusal)
    }
}

pub struct AddIfMax;

impl Command for AddIfMax {
    fn name(&self) -> &str {
        "add_if_max {element}"
    }

    fn description(&self) -> &str {
        "add a new element if it is greater than the largest element"
    }

    fn apply(&self, args: &str, ctx: &mut Context<'_>) -> ExecutionResponse {
        if !args.is_empty() {
            return self.usage_error();
        }
        add_if_extreme(
            ctx,
            Ordering::Greater,
            "Element is not greater than the largest element!",
        )
    }
}

pub struct AddIfMin;

impl Command for AddIfMin {
    fn name(&self) -> &str {
        "add_if_min {element}"
    }

    fn description(&self) -> &str {
        "add a new element if it is less than the smallest element"
    }

    fn apply(&self, args: &str, ctx: &mut Context<'_>) -> ExecutionResponse {
        if !args.is_empty() {
            return self.usage_error();
        }
        add_if_extreme(
            ctx,
            Ordering::Less,
            "Element is not less than the smallest element!",
        )
    }
}

pub struct RemoveLower;

impl Command for RemoveLower {
    fn name(&self) -> &str {
        "remove_lower {element}"
    }

    fn description(&self) -> &str {
        "remove every element less than the given one"
    }

    fn apply(&self, args: &str, ctx: &mut Context<'_>) -> ExecutionResponse {
        if !args.is_empty() {
            return self.usage_error();
        }
        let id = ctx.collection.free_id();
        let reference = match ask_valid_movie(ctx, "Element to compare with", id) {
            Ok(movie) => movie,
            Err(response) => return response,
        };
        let removed = ctx
            .collection
            .remove_where(|movie| movie.natural_cmp(&reference) == Ordering::Less);
        ExecutionResponse::ok(format!("Elements removed: {}", removed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryStorage;
    use crate::app::commands::default_registry;
    use crate::core::collection::CollectionManager;
    use crate::core::dump::DumpManager;
    use crate::domain::model::tests::sample_movie;
    use crate::utils::console::StandardConsole;
    use std::io::Cursor;

    fn movie_input(name: &str, oscars: i64) -> String {
        format!("{}\n{}\n1\n2\ncomedy\nG\nWriter\n170\nred\n0.5\n1\n2\nCity\n", name, oscars)
    }

    fn run(command: &dyn Command, args: &str, input: &str, collection: &mut CollectionManager) -> ExecutionResponse {
        let mut console = StandardConsole::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), Vec::new());
        let registry = default_registry();
        let mut ctx = Context {
            console: &mut console,
            collection,
            registry: &registry,
        };
        command.apply(args, &mut ctx)
    }

    fn collection_with(movies: &[(i64, &str, i64)]) -> CollectionManager {
        let mut collection = CollectionManager::new(DumpManager::new(MemoryStorage::new(), "m.json"));
        for (id, name, oscars) in movies {
            collection.add(sample_movie(*id, name, *oscars));
        }
        collection
    }

    #[test]
    fn test_add_uses_free_id() {
        let mut collection = collection_with(&[(1, "Old", 1)]);
        let response = run(&Add, "", &movie_input("New", 2), &mut collection);

        assert!(response.success, "{}", response.message);
        assert_eq!(collection.get_by_id(2).unwrap().name, "New");
    }

    #[test]
    fn test_add_rejects_arguments() {
        let mut collection = collection_with(&[]);
        let response = run(&Add, "5", "", &mut collection);
        assert!(!response.success);
        assert!(response.message.contains("Usage: 'add {element}'"));
    }

    #[test]
    fn test_update_keeps_id_and_creation_date() {
        let mut collection = collection_with(&[(4, "Old", 1)]);
        let original_date = collection.get_by_id(4).unwrap().creation_date;

        let response = run(&Update, "4", &movie_input("Renamed", 9), &mut collection);

        assert!(response.success, "{}", response.message);
        let updated = collection.get_by_id(4).unwrap();
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.oscars_count, 9);
        assert_eq!(updated.creation_date, original_date);
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_update_and_remove_report_bad_ids() {
        let mut collection = collection_with(&[(1, "A", 1)]);

        assert_eq!(run(&Update, "", "", &mut collection).message, "No id given!\nUsage: 'update id {element}'");
        assert_eq!(run(&Update, "abc", "", &mut collection).message, "id must be a number!");
        assert_eq!(run(&Update, "9", "", &mut collection).message, "Element with id=9 not found!");
        assert!(!run(&RemoveById, "9", "", &mut collection).success);
        assert!(run(&RemoveById, "1", "", &mut collection).success);
        assert!(collection.is_empty());
    }

    #[test]
    fn test_add_if_max_and_min() {
        let mut collection = collection_with(&[(1, "Mid", 5)]);

        assert!(!run(&AddIfMax, "", &movie_input("Low", 1), &mut collection).success);
        assert!(run(&AddIfMax, "", &movie_input("High", 9), &mut collection).success);
        assert!(!run(&AddIfMin, "", &movie_input("Huge", 20), &mut collection).success);
        assert!(run(&AddIfMin, "", &movie_input("Tiny", 1), &mut collection).success);

        assert_eq!(collection.len(), 3);
        assert_eq!(collection.max().unwrap().name, "High");
        assert_eq!(collection.min().unwrap().name, "Tiny");
    }

    #[test]
    fn test_add_if_max_accepts_into_empty_collection() {
        let mut collection = collection_with(&[]);
        assert!(run(&AddIfMax, "", &movie_input("First", 1), &mut collection).success);
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_remove_lower_counts_removed() {
        let mut collection = collection_with(&[(1, "A", 1), (2, "B", 2), (3, "C", 7)]);
        let response = run(&RemoveLower, "", &movie_input("Ref", 5), &mut collection);

        assert_eq!(response.message, "Elements removed: 2");
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_clear_empties_collection() {
        let mut collection = collection_with(&[(1, "A", 1), (2, "B", 2)]);
        assert!(run(&Clear, "", "", &mut collection).success);
        assert!(collection.is_empty());
    }

    #[test]
    fn test_cancelled_input_leaves_collection_untouched() {
        let mut collection = collection_with(&[(1, "A", 1)]);
        let response = run(&Add, "", "Name\nexit\n", &mut collection);
        assert_eq!(response.message, "Cancelled...");
        assert_eq!(collection.len(), 1);
    }
}
