//! Application services layer.

pub mod error;
pub mod recipe;
pub mod render;
