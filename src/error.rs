use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    NotInitialized,
    RecipeNotFound,
    UserNotFound,
    NoCurrentUser,
    NotAuthor,
    ValidationError,
    StorageError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotInitialized => "NOT_INITIALIZED",
            Self::RecipeNotFound => "RECIPE_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::NoCurrentUser => "NO_CURRENT_USER",
            Self::NotAuthor => "NOT_AUTHOR",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::StorageError => "STORAGE_ERROR",
        }
    }
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct RecipeboxError {
    pub code: ErrorCode,
    pub message: String,
}

impl RecipeboxError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn not_initialized() -> Self {
        Self::new(
            ErrorCode::NotInitialized,
            "recipebox is not initialized. Run `recipebox init` first.",
        )
    }

    pub fn recipe_not_found(id: &str) -> Self {
        Self::new(ErrorCode::RecipeNotFound, format!("Recipe not found: {id}"))
    }

    pub fn user_not_found(id: &str) -> Self {
        Self::new(ErrorCode::UserNotFound, format!("User not found: {id}"))
    }

    pub fn no_current_user() -> Self {
        Self::new(
            ErrorCode::NoCurrentUser,
            "No current user. Create one with `recipebox user add <name>`.",
        )
    }

    pub fn not_author(recipe_name: &str) -> Self {
        Self::new(
            ErrorCode::NotAuthor,
            format!("Only the author can change '{recipe_name}'"),
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }
}

impl From<rusqlite::Error> for RecipeboxError {
    fn from(e: rusqlite::Error) -> Self {
        Self::storage(e.to_string())
    }
}

impl From<serde_json::Error> for RecipeboxError {
    fn from(e: serde_json::Error) -> Self {
        Self::storage(format!("Failed to encode value: {e}"))
    }
}
