mod error;
pub use error::{AppError, ErrorKind};

mod env;
pub use env::{APP_ENV, AppEnv, OutputFormat};

pub mod similarity;

/// A single user-item rating. `0` means "unrated".
pub type Rating = u32;

/// Sentinel for an item the user has not rated.
pub const UNRATED: Rating = 0;
