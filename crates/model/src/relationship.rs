//! Relationship definitions between tables
//!
//! This module contains the `Relationship` struct: a directed, typed link
//! between a specific column of one table and a specific column of
//! another.

use ermine_core::{EditorError, EditorResult, RelationKind, RelationshipId, TableId, Validatable};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Relationship
// ============================================================================

/// A directed, typed link between two table columns
///
/// Endpoints reference the owning table by id and the column by name;
/// column identity is its name within the table, so renaming a column
/// orphans relationships that referenced the old name. Orphaned links are
/// skipped by the routing engine rather than pruned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    /// Unique identifier for this relationship
    pub id: RelationshipId,

    /// ID of the source table
    pub from_table: TableId,

    /// Column name on the source table
    pub from_column: String,

    /// ID of the target table
    pub to_table: TableId,

    /// Column name on the target table
    pub to_column: String,

    /// Cardinality; descriptive only, never constrains routing
    pub kind: RelationKind,
}

impl Relationship {
    /// Create a new relationship between two columns
    pub fn new(
        from_table: TableId,
        from_column: impl Into<String>,
        to_table: TableId,
        to_column: impl Into<String>,
        kind: RelationKind,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            from_table,
            from_column: from_column.into(),
            to_table,
            to_column: to_column.into(),
            kind,
        }
    }

    // ========================================================================
    // Query methods
    // ========================================================================

    /// Check if a given table is part of this relationship
    pub fn involves_table(&self, table_id: TableId) -> bool {
        self.from_table == table_id || self.to_table == table_id
    }

    /// Get the other table in the relationship
    pub fn other_table(&self, table_id: TableId) -> Option<TableId> {
        if self.from_table == table_id {
            Some(self.to_table)
        } else if self.to_table == table_id {
            Some(self.from_table)
        } else {
            None
        }
    }

    /// Check if a specific column endpoint participates in this
    /// relationship
    pub fn references_column(&self, table_id: TableId, column: &str) -> bool {
        (self.from_table == table_id && self.from_column == column)
            || (self.to_table == table_id && self.to_column == column)
    }

    /// Short cardinality label (`1:1`, `1:N`, `N:1`)
    pub fn label(&self) -> &'static str {
        self.kind.label()
    }
}

impl Validatable for Relationship {
    fn validate(&self) -> EditorResult<()> {
        if self.from_column.is_empty() {
            return Err(EditorError::relationship_validation(
                "Source column must be selected",
            ));
        }
        if self.to_column.is_empty() {
            return Err(EditorError::relationship_validation(
                "Target column must be selected",
            ));
        }
        Ok(())
    }
}

impl PartialEq for Relationship {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Relationship {}

// ============================================================================
// Tests
// ============================================================================
