pub mod ask;
pub mod collection;
pub mod command;
pub mod dump;
pub mod runner;

pub use crate::domain::model::Movie;
pub use crate::domain::ports::{Console, Storage};
pub use crate::utils::error::Result;
