use super::listing;
use crate::core::ask;
use crate::core::command::{Command, Context, ExecutionResponse};
use std::cmp::Ordering;

pub struct Show;

impl Command for Show {
    fn name(&self) -> &str {
        "show"
    }

    fn description(&self) -> &str {
        "print every element of the collection"
    }

    fn apply(&self, args: &str, ctx: &mut Context<'_>) -> ExecutionResponse {
        if !args.is_empty() {
            return self.usage_error();
        }
        ExecutionResponse::ok(ctx.collection.to_string())
    }
}

pub struct PrintDescending;

impl Command for PrintDescending {
    fn name(&self) -> &str {
        "print_descending"
    }

    fn description(&self) -> &str {
        "print the elements in descending id order"
    }

    fn apply(&self, args: &str, ctx: &mut Context<'_>) -> ExecutionResponse {
        if !args.is_empty() {
            return self.usage_error();
        }
        let mut movies: Vec<_> = ctx.collection.movies().iter().collect();
        movies.sort_by(|a, b| b.id.cmp(&a.id));
        ExecutionResponse::ok(listing(movies).unwrap_or_else(|| "Collection is empty!".to_string()))
    }
}

pub struct SumOfOscarCount;

impl Command for SumOfOscarCount {
    fn name(&self) -> &str {
        "sum_of_oscar_count"
    }

    fn description(&self) -> &str {
        "print the sum of oscarsCount over all elements"
    }

    fn apply(&self, args: &str, ctx: &mut Context<'_>) -> ExecutionResponse {
        if !args.is_empty() {
            return self.usage_error();
        }
        ExecutionResponse::ok(format!(
            "Sum of oscarsCount: {}",
            ctx.collection.sum_of_oscars()
        ))
    }
}

pub struct FilterLessThanScreenwriter;

impl Command for FilterLessThanScreenwriter {
    fn name(&self) -> &str {
        "filter_less_than_screenwriter screenwriter"
    }

    fn description(&self) -> &str {
        "print the elements whose screenwriter is less than the given one"
    }

    fn apply(&self, args: &str, ctx: &mut Context<'_>) -> ExecutionResponse {
        if !args.is_empty() {
            return self.usage_error();
        }
        if !ctx.console.in_script() {
            ctx.console
                .println("******** Screenwriter to compare with ********");
        }
        let reference = match ask::ask_person(ctx.console) {
            Ok(person) => person,
            Err(e) => return e.into(),
        };

        let matching = ctx.collection.movies().iter().filter(|movie| {
            movie
                .screenwriter
                .as_ref()
                .is_some_and(|writer| writer.natural_cmp(&reference) == Ordering::Less)
        });
        ExecutionResponse::ok(listing(matching).unwrap_or_else(|| "No matching elements.".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryStorage;
    use crate::app::commands::default_registry;
    use crate::core::collection::CollectionManager;
    use crate::core::dump::DumpManager;
    use crate::domain::model::tests::{sample_movie, sample_person};
    use crate::utils::console::StandardConsole;
    use std::io::Cursor;

    #[test]
    fn test_filter_keeps_smaller_screenwriters_only() {
        let mut collection = CollectionManager::new(DumpManager::new(MemoryStorage::new(), "m.json"));
        let mut short = sample_movie(1, "Short", 1);
        short.screenwriter = Some(sample_person("Ann", 150.0));
        let mut tall = sample_movie(2, "Tall", 1);
        tall.screenwriter = Some(sample_person("Bob", 200.0));
        let mut nobody = sample_movie(3, "Nobody", 1);
        nobody.screenwriter = None;
        for movie in [short, tall, nobody] {
            collection.add(movie);
        }

        // reference person: height 180, eye color BLUE
        let input = "Carl\n180\nblue\n0\n0\n0\nHere\n";
        let mut console = StandardConsole::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), Vec::new());
        let registry = default_registry();
        let mut ctx = Context {
            console: &mut console,
            collection: &mut collection,
            registry: &registry,
        };

        let response = FilterLessThanScreenwriter.apply("", &mut ctx);

        assert!(response.success);
        assert!(response.message.contains("name='Short'"));
        assert!(!response.message.contains("name='Tall'"));
        assert!(!response.message.contains("name='Nobody'"));
    }
}
