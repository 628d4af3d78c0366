//! Error types for Ermine
//!
//! This module provides unified error handling across the engine,
//! covering user-input validation, lookups of absent entities, import
//! parsing, and persistence failures.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for Ermine
#[derive(Debug, Error)]
pub enum EditorError {
    // ========================================================================
    // User Input Errors
    // ========================================================================
    /// General validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Table validation failed
    #[error("Table validation failed for '{table}': {message}")]
    TableValidation { table: String, message: String },

    /// Relationship validation failed (e.g. missing endpoint selection)
    #[error("Relationship validation failed: {0}")]
    RelationshipValidation(String),

    // ========================================================================
    // Not Found Errors
    // ========================================================================
    /// Table not found
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// Column not found within a table
    #[error("Column '{column}' not found in table '{table}'")]
    ColumnNotFound { table: String, column: String },

    /// Relationship not found
    #[error("Relationship not found: {0}")]
    RelationshipNotFound(String),

    // ========================================================================
    // Import Errors
    // ========================================================================
    /// Text import could not be parsed; nothing was committed
    #[error("Import parse error: {0}")]
    ImportParse(String),

    /// Project file is not in the expected format
    #[error("Invalid project file format: {0}")]
    InvalidProjectFormat(String),

    // ========================================================================
    // IO Errors
    // ========================================================================
    /// File IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// File write error
    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    // ========================================================================
    // Serialization Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EditorError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        EditorError::Validation(msg.into())
    }

    /// Create a table validation error
    pub fn table_validation(table: impl Into<String>, msg: impl Into<String>) -> Self {
        EditorError::TableValidation {
            table: table.into(),
            message: msg.into(),
        }
    }

    /// Create a relationship validation error
    pub fn relationship_validation(msg: impl Into<String>) -> Self {
        EditorError::RelationshipValidation(msg.into())
    }

    /// Create an import parse error
    pub fn import_parse(msg: impl Into<String>) -> Self {
        EditorError::ImportParse(msg.into())
    }

    /// Create a column-not-found error
    pub fn column_not_found(table: impl Into<String>, column: impl Into<String>) -> Self {
        EditorError::ColumnNotFound {
            table: table.into(),
            column: column.into(),
        }
    }

    /// Check if this error is a user input (validation) error
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            EditorError::Validation(_)
                | EditorError::TableValidation { .. }
                | EditorError::RelationshipValidation(_)
        )
    }

    /// Check if this error is a not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            EditorError::TableNotFound(_)
                | EditorError::ColumnNotFound { .. }
                | EditorError::RelationshipNotFound(_)
        )
    }

    /// Check if this error is an import parse error
    pub fn is_parse(&self) -> bool {
        matches!(
            self,
            EditorError::ImportParse(_) | EditorError::InvalidProjectFormat(_)
        )
    }

    /// Check if this error is an IO error
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            EditorError::Io(_) | EditorError::FileRead { .. } | EditorError::FileWrite { .. }
        )
    }
}

/// Result type alias using EditorError
pub type EditorResult<T> = Result<T, EditorError>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = EditorError::validation("Name is required");
        assert!(err.is_user_input());
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "Validation error: Name is required");
    }

    #[test]
    fn test_table_validation_error() {
        let err = EditorError::table_validation("users", "Table must have at least one column");
        assert!(err.is_user_input());
        assert_eq!(
            err.to_string(),
            "Table validation failed for 'users': Table must have at least one column"
        );
    }

    #[test]
    fn test_relationship_validation_error() {
        let err = EditorError::relationship_validation("No source column selected");
        assert!(err.is_user_input());
        assert!(!err.is_parse());
    }

    #[test]
    fn test_not_found_errors() {
        let err = EditorError::TableNotFound("users".to_string());
        assert!(err.is_not_found());
        assert!(!err.is_user_input());
        assert_eq!(err.to_string(), "Table not found: users");

        let err = EditorError::column_not_found("users", "email");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Column 'email' not found in table 'users'");
    }

    #[test]
    fn test_import_parse_error() {
        let err = EditorError::import_parse("no entity definitions found");
        assert!(err.is_parse());
        assert_eq!(
            err.to_string(),
            "Import parse error: no entity definitions found"
        );
    }

    #[test]
    fn test_io_error_classification() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: EditorError = io_err.into();
        assert!(err.is_io());
    }
}
