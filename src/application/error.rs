use std::error::Error as StdError;

use thiserror::Error;

use crate::{
    application::{recipe::RecipeValidationError, render::RenderError},
    infra::error::InfraError,
};

/// Flattened error chain, outermost message first.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub source: &'static str,
    pub messages: Vec<String>,
}

impl ErrorReport {
    pub fn from_error(source: &'static str, error: &dyn StdError) -> Self {
        let mut messages = vec![error.to_string()];
        let mut current = error.source();
        while let Some(inner) = current {
            messages.push(inner.to_string());
            current = inner.source();
        }
        Self { source, messages }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error(transparent)]
    InvalidRecipe(#[from] RecipeValidationError),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }

    /// Caller mistakes, as opposed to environment or internal failures.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            AppError::Render(RenderError::EmptyContent)
                | AppError::InvalidRecipe(_)
                | AppError::Validation(_)
        )
    }

    pub fn report(&self) -> ErrorReport {
        ErrorReport::from_error("application::error::AppError", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_walks_the_source_chain() {
        let io = std::io::Error::other("disk full");
        let error = AppError::from(InfraError::write(std::path::Path::new("out.html"), io));
        let report = error.report();
        assert_eq!(report.messages.len(), 2);
        assert_eq!(report.messages[0], "failed to write `out.html`: disk full");
        assert_eq!(report.messages[1], "disk full");
    }

    #[test]
    fn blank_content_is_a_caller_error() {
        assert!(AppError::from(RenderError::empty_content()).is_caller_error());
        assert!(!AppError::unexpected("boom").is_caller_error());
    }
}
