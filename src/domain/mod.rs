//! Domain layer types and invariants.

pub mod blocks;
pub mod recipe;
pub mod seed;
pub mod slug;
