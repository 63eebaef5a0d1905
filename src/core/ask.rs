//! Field-by-field input of collection elements.
//!
//! Every prompt re-asks until it gets an acceptable value. Typing `exit`
//! cancels the whole element with [`CollectionError::Cancelled`].

use crate::domain::model::{
    Choice, Color, Coordinates, Location, Movie, MovieGenre, MpaaRating, Person, MAX_COORDINATE_X,
};
use crate::domain::ports::Console;
use crate::utils::error::{CollectionError, Result};
use std::fmt::Display;
use std::str::FromStr;

pub const CANCEL_WORD: &str = "exit";

pub fn ask_movie(console: &mut dyn Console, id: i64) -> Result<Movie> {
    section(console, "=== New movie ===");
    let name = ask_string(console, "Movie name")?;
    let oscars_count = ask_number(console, "Oscars count", 1, i64::MAX)?;
    let coordinates = ask_coordinates(console)?;
    let genre = ask_choice::<MovieGenre>(console, "Genre")?;
    let mpaa_rating = ask_choice::<MpaaRating>(console, "MPAA rating")?;
    let screenwriter = ask_person(console)?;

    Ok(Movie::new(
        id,
        name,
        coordinates,
        oscars_count,
        genre,
        mpaa_rating,
        Some(screenwriter),
    ))
}

pub fn ask_person(console: &mut dyn Console) -> Result<Person> {
    section(console, "--- Screenwriter ---");
    let name = ask_string(console, "Screenwriter name")?;
    let height = ask_parsed(console, "Screenwriter height", |input| {
        match input.parse::<f32>() {
            Ok(value) if value.is_finite() && value > 0.0 => Ok(value),
            Ok(_) => Err("Height must be a finite number greater than 0".to_string()),
            Err(_) => Err("Enter a valid number".to_string()),
        }
    })?;
    let eye_color = ask_choice::<Color>(console, "Screenwriter eye color")?;
    let location = ask_location(console)?;

    Ok(Person {
        name,
        height,
        eye_color,
        location,
    })
}

fn ask_location(console: &mut dyn Console) -> Result<Location> {
    section(console, "--- Location ---");
    let x = ask_number(console, "Location X", f64::MIN, f64::MAX)?;
    let y = ask_number(console, "Location Y", i64::MIN, i64::MAX)?;
    let z = ask_number(console, "Location Z", i64::MIN, i64::MAX)?;
    let name = ask_string(console, "Location name")?;
    Ok(Location { x, y, z, name })
}

fn ask_coordinates(console: &mut dyn Console) -> Result<Coordinates> {
    section(console, "--- Coordinates ---");
    let x = ask_number(console, "Coordinate X", i32::MIN, MAX_COORDINATE_X)?;
    let y = ask_number(console, "Coordinate Y", i32::MIN, i32::MAX)?;
    Ok(Coordinates { x, y })
}

fn section(console: &mut dyn Console, title: &str) {
    if !console.in_script() {
        console.println(title);
    }
}

fn ask_string(console: &mut dyn Console, prompt: &str) -> Result<String> {
    ask_parsed(console, prompt, |input| Ok(input.to_string()))
}

fn ask_number<T>(console: &mut dyn Console, prompt: &str, min: T, max: T) -> Result<T>
where
    T: FromStr + PartialOrd + Display + Copy,
{
    ask_parsed(console, prompt, |input| {
        let value: T = input
            .parse()
            .map_err(|_| "Enter a valid number".to_string())?;
        if value >= min && value <= max {
            Ok(value)
        } else {
            Err(format!("Value must be in range [{}, {}]", min, max))
        }
    })
}

fn ask_choice<T>(console: &mut dyn Console, prompt: &str) -> Result<T>
where
    T: Choice + FromStr<Err = CollectionError>,
{
    let prompt = format!("{} ({})", prompt, T::names());
    ask_parsed(console, &prompt, |input| {
        input.parse::<T>().map_err(|e| e.user_friendly_message())
    })
}

/// Core prompt loop: blank input and values rejected by `parse` are
/// reported and asked again.
fn ask_parsed<T, F>(console: &mut dyn Console, prompt: &str, mut parse: F) -> Result<T>
where
    F: FnMut(&str) -> std::result::Result<T, String>,
{
    loop {
        if !console.in_script() {
            console.print(&format!("{}: ", prompt));
        }
        let line = console.read_line()?;
        let input = line.trim();

        if input == CANCEL_WORD {
            return Err(CollectionError::Cancelled);
        }
        if input.is_empty() {
            console.print_error("Enter a non-empty value");
            continue;
        }
        match parse(input) {
            Ok(value) => return Ok(value),
            Err(message) => console.print_error(&message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::console::StandardConsole;
    use std::io::Cursor;

    fn console(input: &str) -> StandardConsole<Cursor<Vec<u8>>, Vec<u8>, Vec<u8>> {
        StandardConsole::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), Vec::new())
    }

    const MOVIE_INPUT: &str = "Heat\n3\n10\n20\naction\nR\nMann\n182.5\nblue\n1.5\n2\n3\nLA\n";

    #[test]
    fn test_ask_movie_reads_every_field() {
        let mut console = console(MOVIE_INPUT);
        let movie = ask_movie(&mut console, 42).unwrap();

        assert_eq!(movie.id, 42);
        assert_eq!(movie.name, "Heat");
        assert_eq!(movie.oscars_count, 3);
        assert_eq!(movie.coordinates, Coordinates { x: 10, y: 20 });
        assert_eq!(movie.genre, MovieGenre::Action);
        assert_eq!(movie.mpaa_rating, MpaaRating::R);
        let writer = movie.screenwriter.unwrap();
        assert_eq!(writer.eye_color, Color::Blue);
        assert_eq!(writer.location.name, "LA");
    }

    #[test]
    fn test_invalid_values_are_asked_again() {
        // empty name, zero oscars, x above the limit, bad genre, negative height
        let input = "\nHeat\n0\n3\n517\n10\n20\nDRAMA\naction\nR\nMann\n-1\n182.5\nblue\n1.5\n2\n3\nLA\n";
        let mut console = console(input);
        let movie = ask_movie(&mut console, 1).unwrap();

        assert_eq!(movie.oscars_count, 3);
        assert_eq!(movie.coordinates.x, 10);
        let errors = String::from_utf8_lossy(console.errors()).to_string();
        assert_eq!(errors.lines().count(), 5);
        assert!(errors.contains("Enter a non-empty value"));
        assert!(errors.contains("[1, 9223372036854775807]"));
        assert!(errors.contains("Invalid value 'DRAMA' for 'MovieGenre'"));
    }

    #[test]
    fn test_exit_cancels_input() {
        let mut console = console("Heat\nexit\n");
        assert!(matches!(
            ask_movie(&mut console, 1),
            Err(CollectionError::Cancelled)
        ));
    }

    #[test]
    fn test_end_of_input_aborts() {
        let mut console = console("Heat\n3\n");
        assert!(matches!(
            ask_movie(&mut console, 1),
            Err(CollectionError::EndOfInput)
        ));
    }
}
