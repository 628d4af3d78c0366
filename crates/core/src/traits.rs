//! Core traits for Ermine
//!
//! This module defines the traits that components throughout the engine
//! implement for validation and persistence, plus the capability interface
//! through which the routing engine queries the rendering surface.

use crate::error::EditorResult;
use crate::types::{Rect, TableId};
use serde::{Serialize, de::DeserializeOwned};

// ============================================================================
// Validatable Trait
// ============================================================================

/// Trait for types that can be validated
///
/// Types implementing this trait can check their internal consistency
/// and return validation errors if the state is invalid.
pub trait Validatable {
    /// Validate the current state of the object
    ///
    /// Returns `Ok(())` if valid, or an `EditorError` describing the problem.
    fn validate(&self) -> EditorResult<()>;

    /// Check if the object is valid without returning error details
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Get all validation errors (for types that can have multiple errors)
    fn validation_errors(&self) -> Vec<String> {
        match self.validate() {
            Ok(()) => vec![],
            Err(e) => vec![e.to_string()],
        }
    }
}

// ============================================================================
// Persistable Trait
// ============================================================================

/// Trait for types that can be serialized to and deserialized from files
///
/// Types implementing this trait can be saved to and loaded from
/// project files (JSON format).
pub trait Persistable: Serialize + DeserializeOwned + Sized {
    /// Get the file extension for this type (without the dot)
    fn file_extension() -> &'static str;

    /// Save to a JSON string
    fn to_json(&self) -> EditorResult<String> {
        serde_json::to_string_pretty(self).map_err(Into::into)
    }

    /// Load from a JSON string
    fn from_json(json: &str) -> EditorResult<Self> {
        serde_json::from_str(json).map_err(Into::into)
    }

    /// Save to a file
    fn save_to_file(&self, path: &std::path::Path) -> EditorResult<()> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|e| crate::error::EditorError::FileWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load from a file
    fn load_from_file(path: &std::path::Path) -> EditorResult<Self> {
        let json =
            std::fs::read_to_string(path).map_err(|e| crate::error::EditorError::FileRead {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Self::from_json(&json)
    }
}

// ============================================================================
// NodeGeometryProvider Trait
// ============================================================================

/// Capability interface through which the routing engine reads rendered
/// node geometry
///
/// Exact column row extents depend on rendered layout and font metrics,
/// not purely on the data model, so the rendering surface — whatever
/// widget toolkit is embedding the engine — supplies them through this
/// query contract. Rectangles are in screen space; the routing engine
/// inverse-transforms them through the viewport.
pub trait NodeGeometryProvider {
    /// Screen-space rectangle of the rendered row for `column` on `table`,
    /// or `None` when the row is not currently rendered
    fn column_rect(&self, table: TableId, column: &str) -> Option<Rect>;
}

// ============================================================================
// Tests
// ============================================================================
