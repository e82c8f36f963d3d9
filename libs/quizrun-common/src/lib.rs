pub mod config;
pub mod error;
pub mod questions;
pub mod types;

pub use error::{GradeError, Result};
