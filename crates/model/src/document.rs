//! The schema document: the entity store for one editor session
//!
//! `SchemaDocument` owns every table and relationship in the diagram and
//! enforces the store invariants: cascade pruning of relationships when a
//! table is deleted, referential checks on relationship creation, and
//! patch-based table updates that never touch relationship endpoints
//! (renaming a column deliberately leaves links referencing the old name
//! in place).

use crate::history::Snapshot;
use crate::relationship::Relationship;
use crate::table::{Column, Table};
use chrono::{DateTime, Utc};
use ermine_core::{
    EditorError, EditorResult, GroupId, Rect, RelationshipId, TableId, Validatable,
};
use serde::{Deserialize, Serialize};

// ============================================================================
// Document Metadata
// ============================================================================

/// In-memory metadata about the open document; never serialized into the
/// project file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMeta {
    /// Document display name
    pub name: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub modified_at: DateTime<Utc>,
}

impl DocumentMeta {
    /// Create metadata with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            created_at: Utc::now(),
            modified_at: Utc::now(),
        }
    }
}

impl Default for DocumentMeta {
    fn default() -> Self {
        Self::new("Untitled Schema")
    }
}

// ============================================================================
// Table Patch
// ============================================================================

/// Partial update applied to an existing table
///
/// Fields left as `None` are unchanged. Color and columns replace
/// wholesale; position is owned by the drag controller and layout
/// placement, not by patches.
#[derive(Debug, Clone, Default)]
pub struct TablePatch {
    pub name: Option<String>,
    pub columns: Option<Vec<Column>>,
    pub color: Option<String>,
}

impl TablePatch {
    /// Create an empty patch
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the new name
    pub fn rename(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replace the column list
    pub fn columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = Some(columns);
        self
    }

    /// Set the new color
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Check that the patch itself is acceptable (rejects empty name or
    /// empty column list before anything is mutated)
    pub fn validate(&self) -> EditorResult<()> {
        if let Some(name) = &self.name {
            if name.is_empty() {
                return Err(EditorError::validation("Table name cannot be empty"));
            }
        }
        if let Some(columns) = &self.columns {
            if columns.is_empty() {
                return Err(EditorError::validation(
                    "Table must have at least one column",
                ));
            }
            if columns.iter().any(|c| c.name.is_empty()) {
                return Err(EditorError::validation("Column name cannot be empty"));
            }
        }
        Ok(())
    }
}

// ============================================================================
// SchemaDocument
// ============================================================================

/// Container for all tables and relationships in one editing session
///
/// Tables and relationships are kept in insertion order so that exports
/// and batch placement are deterministic.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SchemaDocument {
    /// Document metadata
    pub meta: DocumentMeta,

    /// All tables, in insertion order
    tables: Vec<Table>,

    /// All relationships, in insertion order
    relationships: Vec<Relationship>,
}

impl SchemaDocument {
    /// Create a new empty document
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            meta: DocumentMeta::new(name),
            tables: Vec::new(),
            relationships: Vec::new(),
        }
    }

    // ========================================================================
    // Table Management
    // ========================================================================

    /// Insert a table, validating it first
    pub fn insert_table(&mut self, table: Table) -> EditorResult<TableId> {
        table.validate()?;
        let id = table.id;
        self.tables.push(table);
        self.touch();
        Ok(id)
    }

    /// Remove a table by ID, cascading to every relationship where it is
    /// source or target
    pub fn remove_table(&mut self, id: TableId) -> Option<Table> {
        let index = self.tables.iter().position(|t| t.id == id)?;
        self.relationships.retain(|r| !r.involves_table(id));
        self.touch();
        Some(self.tables.remove(index))
    }

    /// Apply a partial update to a table
    pub fn update_table(&mut self, id: TableId, patch: TablePatch) -> EditorResult<()> {
        patch.validate()?;
        let table = self
            .table_mut(id)
            .ok_or_else(|| EditorError::TableNotFound(id.to_string()))?;

        if let Some(name) = patch.name {
            table.name = name;
        }
        if let Some(columns) = patch.columns {
            // Relationships referencing renamed/removed columns stay put
            table.columns = columns;
        }
        if let Some(color) = patch.color {
            table.color = color;
        }
        table.touch();
        self.touch();
        Ok(())
    }

    /// Get a table by ID
    pub fn table(&self, id: TableId) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == id)
    }

    /// Get a mutable table by ID
    pub fn table_mut(&mut self, id: TableId) -> Option<&mut Table> {
        self.tables.iter_mut().find(|t| t.id == id)
    }

    /// Get a table by name
    pub fn table_by_name(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Iterate over all tables in insertion order
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.iter()
    }

    /// Number of tables
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    // ========================================================================
    // Relationship Management
    // ========================================================================

    /// Check that a relationship's endpoints resolve against the current
    /// tables without inserting anything
    pub fn check_relationship(&self, relationship: &Relationship) -> EditorResult<()> {
        relationship.validate()?;

        let from = self
            .table(relationship.from_table)
            .ok_or_else(|| EditorError::TableNotFound(relationship.from_table.to_string()))?;
        let to = self
            .table(relationship.to_table)
            .ok_or_else(|| EditorError::TableNotFound(relationship.to_table.to_string()))?;

        if !from.has_column(&relationship.from_column) {
            return Err(EditorError::column_not_found(
                &from.name,
                &relationship.from_column,
            ));
        }
        if !to.has_column(&relationship.to_column) {
            return Err(EditorError::column_not_found(
                &to.name,
                &relationship.to_column,
            ));
        }
        Ok(())
    }

    /// Insert a relationship after checking its endpoints
    pub fn insert_relationship(
        &mut self,
        relationship: Relationship,
    ) -> EditorResult<RelationshipId> {
        self.check_relationship(&relationship)?;
        let id = relationship.id;
        self.relationships.push(relationship);
        self.touch();
        Ok(id)
    }

    /// Remove a relationship by ID
    pub fn remove_relationship(&mut self, id: RelationshipId) -> Option<Relationship> {
        let index = self.relationships.iter().position(|r| r.id == id)?;
        self.touch();
        Some(self.relationships.remove(index))
    }

    /// Get a relationship by ID
    pub fn relationship(&self, id: RelationshipId) -> Option<&Relationship> {
        self.relationships.iter().find(|r| r.id == id)
    }

    /// Get all relationships involving a table
    pub fn relationships_for_table(&self, table_id: TableId) -> Vec<&Relationship> {
        self.relationships
            .iter()
            .filter(|r| r.involves_table(table_id))
            .collect()
    }

    /// Iterate over all relationships in insertion order
    pub fn relationships(&self) -> impl Iterator<Item = &Relationship> {
        self.relationships.iter()
    }

    /// Number of relationships
    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    // ========================================================================
    // Group Queries
    // ========================================================================

    /// Group a table belongs to, if any
    pub fn group_of(&self, table_id: TableId) -> Option<GroupId> {
        self.table(table_id).and_then(|t| t.group_id)
    }

    /// IDs of all tables sharing a group
    pub fn tables_in_group(&self, group_id: GroupId) -> Vec<TableId> {
        self.tables
            .iter()
            .filter(|t| t.group_id == Some(group_id))
            .map(|t| t.id)
            .collect()
    }

    // ========================================================================
    // Bulk Operations
    // ========================================================================

    /// Insert a batch of tables and relationships (already validated and
    /// remapped by the caller); used by imports
    pub fn extend(&mut self, tables: Vec<Table>, relationships: Vec<Relationship>) {
        self.tables.extend(tables);
        self.relationships.extend(relationships);
        self.touch();
    }

    /// World-space bounding box of all table nodes
    pub fn bounding_box(&self) -> Option<Rect> {
        let mut iter = self.tables.iter();
        let first = iter.next()?.bounds();
        Some(iter.fold(first, |acc, t| acc.union(&t.bounds())))
    }

    /// Check if the document has no content
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty() && self.relationships.is_empty()
    }

    // ========================================================================
    // History Support
    // ========================================================================

    /// Deep copy of the undoable state
    pub fn capture(&self) -> Snapshot {
        Snapshot::new(self.tables.clone(), self.relationships.clone())
    }

    /// Replace the live state wholesale from a snapshot
    pub fn restore(&mut self, snapshot: Snapshot) {
        let (tables, relationships) = snapshot.into_parts();
        self.tables = tables;
        self.relationships = relationships;
        self.touch();
    }

    // ========================================================================
    // Utility Methods
    // ========================================================================

    /// Update the modification timestamp
    pub fn touch(&mut self) {
        self.meta.modified_at = Utc::now();
    }
}

// ============================================================================
// Tests
// ============================================================================
