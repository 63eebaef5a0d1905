use crate::utils::error::{CollectionError, Result};
use crate::utils::validation::{
    collect_violations, validate_at_most, validate_non_empty_string, validate_positive, Validate,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Largest allowed `Coordinates::x`.
pub const MAX_COORDINATE_X: i32 = 516;

/// Fixed set of named values that can be listed to the user and parsed back
/// case-insensitively.
pub trait Choice: Sized + Copy + 'static {
    const ALL: &'static [Self];

    fn name(&self) -> &'static str;

    fn names() -> String {
        Self::ALL
            .iter()
            .map(|choice| choice.name())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn parse_name(input: &str) -> Option<Self> {
        let wanted = input.trim().to_uppercase();
        Self::ALL.iter().copied().find(|choice| choice.name() == wanted)
    }
}

macro_rules! choice_enum {
    ($(#[$meta:meta])* $vis:vis enum $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        $vis enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl Choice for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $name {
            type Err = CollectionError;

            fn from_str(s: &str) -> Result<Self> {
                Self::parse_name(s).ok_or_else(|| CollectionError::InvalidValueError {
                    field: stringify!($name).to_string(),
                    value: s.to_string(),
                    reason: format!("Allowed values: {}", Self::names()),
                })
            }
        }
    };
}

choice_enum! {
    /// Eye color of a screenwriter. Declaration order is the sort order.
    pub enum Color {
        Green => "GREEN",
        Red => "RED",
        Blue => "BLUE",
        Orange => "ORANGE",
    }
}

choice_enum! {
    pub enum MovieGenre {
        Action => "ACTION",
        Western => "WESTERN",
        Comedy => "COMEDY",
        Thriller => "THRILLER",
        Fantasy => "FANTASY",
    }
}

choice_enum! {
    pub enum MpaaRating {
        G => "G",
        Pg13 => "PG_13",
        R => "R",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: i32,
    pub y: i32,
}

impl Validate for Coordinates {
    fn violations(&self) -> Vec<String> {
        collect_violations([validate_at_most("Coordinates.x", self.x, MAX_COORDINATE_X)])
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coordinates{{x={}, y={}}}", self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub x: f64,
    pub y: i64,
    pub z: i64,
    pub name: String,
}

impl Validate for Location {
    fn violations(&self) -> Vec<String> {
        let mut violations = collect_violations([validate_non_empty_string(
            "Location.name",
            &self.name,
        )]);
        if !self.x.is_finite() {
            violations.push("Location.x must be a finite number".to_string());
        }
        violations
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Location{{x={}, y={}, z={}, name='{}'}}",
            self.x, self.y, self.z, self.name
        )
    }
}

/// Screenwriter of a movie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub name: String,
    pub height: f32,
    pub eye_color: Color,
    pub location: Location,
}

impl Person {
    /// Orders by height, then name, then eye color.
    pub fn natural_cmp(&self, other: &Person) -> Ordering {
        self.height
            .total_cmp(&other.height)
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.eye_color.cmp(&other.eye_color))
    }
}

impl Validate for Person {
    fn violations(&self) -> Vec<String> {
        let mut violations = collect_violations([
            validate_non_empty_string("Person.name", &self.name),
            validate_positive("Person.height", self.height),
        ]);
        violations.extend(self.location.violations());
        violations
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Person{{name='{}', height={}, eyeColor={}, location={}}}",
            self.name, self.height, self.eye_color, self.location
        )
    }
}

/// One element of the collection.
///
/// The JSON layout (camelCase keys, ISO dates, `null` for a missing
/// screenwriter) is the on-disk format of the collection file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: i64,
    pub name: String,
    pub coordinates: Coordinates,
    pub creation_date: NaiveDate,
    pub oscars_count: i64,
    pub genre: MovieGenre,
    pub mpaa_rating: MpaaRating,
    pub screenwriter: Option<Person>,
}

impl Movie {
    /// Creates a movie dated today.
    pub fn new(
        id: i64,
        name: String,
        coordinates: Coordinates,
        oscars_count: i64,
        genre: MovieGenre,
        mpaa_rating: MpaaRating,
        screenwriter: Option<Person>,
    ) -> Self {
        Self {
            id,
            name,
            coordinates,
            creation_date: Local::now().date_naive(),
            oscars_count,
            genre,
            mpaa_rating,
            screenwriter,
        }
    }

    /// Orders by oscars count, then name, then id.
    pub fn natural_cmp(&self, other: &Movie) -> Ordering {
        self.oscars_count
            .cmp(&other.oscars_count)
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl Validate for Movie {
    fn violations(&self) -> Vec<String> {
        let mut violations = collect_violations([
            validate_positive("Movie.id", self.id),
            validate_non_empty_string("Movie.name", &self.name),
            validate_positive("Movie.oscarsCount", self.oscars_count),
        ]);
        violations.extend(self.coordinates.violations());
        if let Some(screenwriter) = &self.screenwriter {
            violations.extend(screenwriter.violations());
        }
        violations
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Movie{{id={}, name='{}', coordinates={}, creationDate={}, oscarsCount={}, genre={}, mpaaRating={}, screenwriter=",
            self.id,
            self.name,
            self.coordinates,
            self.creation_date.format("%Y-%m-%d"),
            self.oscars_count,
            self.genre,
            self.mpaa_rating,
        )?;
        match &self.screenwriter {
            Some(person) => write!(f, "{}}}", person),
            None => f.write_str("null}"),
        }
    }
}
