pub mod color;
pub mod dates;
pub mod error;
pub mod types;
