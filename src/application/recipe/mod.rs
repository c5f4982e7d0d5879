//! Recipe validation and deterministic fallback.
//!
//! A supplied recipe is never trusted: it either passes [`validate_recipe`]
//! or is replaced by [`generate_fallback_recipe`].

mod fallback;
mod validate;

pub use fallback::generate_fallback_recipe;
pub use validate::{
    RecipeIssue, RecipeValidationError, extract_json_object, validate_recipe, validate_recipe_str,
};
