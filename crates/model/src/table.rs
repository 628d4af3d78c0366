//! Table definitions for schema diagrams
//!
//! This module contains the `Table` struct and its `Column` rows, the
//! entity nodes placed on the canvas.

use chrono::{DateTime, Utc};
use ermine_core::{EditorError, EditorResult, GroupId, Position, Rect, Size, TableId, Validatable};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Node Card Geometry
// ============================================================================

/// Rendered width of a table node in world units
pub const NODE_WIDTH: f32 = 200.0;

/// Height of the node header strip
pub const HEADER_HEIGHT: f32 = 37.0;

/// Height of one column row
pub const ROW_HEIGHT: f32 = 29.0;

/// Vertical padding below the last row
pub const BODY_PADDING: f32 = 8.0;

/// Default header color for manually created tables
pub const DEFAULT_COLOR: &str = "#2563eb";

// ============================================================================
// Column
// ============================================================================

/// A single typed column row within a table
///
/// The type tag is free-form; the editing surface constrains it to a
/// small set but the core does not validate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name; identity of the column within its table
    pub name: String,

    /// Free-form type tag (e.g. "string", "int", "id")
    #[serde(rename = "type")]
    pub type_tag: String,
}

impl Column {
    /// Create a new column
    pub fn new(name: impl Into<String>, type_tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_tag: type_tag.into(),
        }
    }
}

// ============================================================================
// Table
// ============================================================================

/// A schema entity node with a name and an ordered list of typed columns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    /// Unique identifier, generated at creation, immutable
    pub id: TableId,

    /// Table name
    pub name: String,

    /// World-space coordinates of the node's top-left corner
    #[serde(flatten)]
    pub position: Position,

    /// Ordered column rows
    pub columns: Vec<Column>,

    /// Display hex color; purely cosmetic, never affects routing.
    /// Empty after deserializing a record that carried none; callers
    /// loading project files fill it with their batch color.
    #[serde(default)]
    pub color: String,

    /// Batch-import group this table belongs to; `None` for manually
    /// created tables
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<GroupId>,

    /// Creation timestamp
    #[serde(skip, default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    #[serde(skip, default = "Utc::now")]
    pub modified_at: DateTime<Utc>,
}

impl Table {
    /// Create a new table with the given name and no columns
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            position: Position::zero(),
            columns: Vec::new(),
            color: DEFAULT_COLOR.to_string(),
            group_id: None,
            created_at: Utc::now(),
            modified_at: Utc::now(),
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Set the position using x, y coordinates
    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.position = Position::new(x, y);
        self
    }

    /// Set the position
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Set the display color
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Assign this table to a batch group
    pub fn with_group(mut self, group_id: GroupId) -> Self {
        self.group_id = Some(group_id);
        self
    }

    /// Add a column
    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Replace all columns
    pub fn with_columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = columns;
        self
    }

    // ========================================================================
    // Column queries
    // ========================================================================

    /// Get a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Check if the table has a column with the given name
    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Index of a column by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// The first column, if any (used by batch-import relationships)
    pub fn first_column(&self) -> Option<&Column> {
        self.columns.first()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    // ========================================================================
    // Canvas geometry
    // ========================================================================

    /// Estimated node height from the card metrics
    pub fn estimated_height(&self) -> f32 {
        HEADER_HEIGHT + self.columns.len() as f32 * ROW_HEIGHT + BODY_PADDING
    }

    /// Node size from the card metrics
    pub fn size(&self) -> Size {
        Size::new(NODE_WIDTH, self.estimated_height())
    }

    /// World-space bounding rectangle
    pub fn bounds(&self) -> Rect {
        Rect::new(self.position, self.size())
    }

    /// World-space rectangle of a column row, computed from stored state
    ///
    /// This is the stored-geometry counterpart of the rendering surface's
    /// live row measurements.
    pub fn column_row_bounds(&self, name: &str) -> Option<Rect> {
        let index = self.column_index(name)?;
        Some(Rect::from_xywh(
            self.position.x,
            self.position.y + HEADER_HEIGHT + index as f32 * ROW_HEIGHT,
            NODE_WIDTH,
            ROW_HEIGHT,
        ))
    }

    /// Move the table by a delta
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.position = self.position.offset(dx, dy);
        self.touch();
    }

    /// Set the position
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
        self.touch();
    }

    // ========================================================================
    // Utility methods
    // ========================================================================

    /// Update the modification timestamp
    pub fn touch(&mut self) {
        self.modified_at = Utc::now();
    }
}

impl Validatable for Table {
    fn validate(&self) -> EditorResult<()> {
        if self.name.is_empty() {
            return Err(EditorError::table_validation(
                &self.name,
                "Table name cannot be empty",
            ));
        }

        if self.columns.is_empty() {
            return Err(EditorError::table_validation(
                &self.name,
                "Table must have at least one column",
            ));
        }

        for column in &self.columns {
            if column.name.is_empty() {
                return Err(EditorError::table_validation(
                    &self.name,
                    "Column name cannot be empty",
                ));
            }
        }

        Ok(())
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Table {}

// ============================================================================
// Tests
// ============================================================================
