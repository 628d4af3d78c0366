//! # Ermine Model
//!
//! The schema model for Ermine: all the data structures needed to
//! represent an entity-relationship diagram, plus the undo history and
//! project file persistence.
//!
//! ## Core Concepts
//!
//! - **Table**: a schema entity node with a name and ordered typed columns
//! - **Relationship**: a directed, typed link between two table columns
//! - **SchemaDocument**: the entity store owning all tables and
//!   relationships of one session
//! - **History**: the bounded undo stack of deep document snapshots
//! - **ProjectFile**: the two-field JSON persistence format with id
//!   remapping on load
//!

pub mod document;
pub mod history;
pub mod relationship;
pub mod serialization;
pub mod table;

// Re-export commonly used types at crate root
pub use document::{DocumentMeta, SchemaDocument, TablePatch};
pub use history::{History, MAX_HISTORY, Snapshot};
pub use relationship::Relationship;
pub use serialization::{ProjectFile, RemappedProject, remap_ids};
pub use table::{
    BODY_PADDING, Column, DEFAULT_COLOR, HEADER_HEIGHT, NODE_WIDTH, ROW_HEIGHT, Table,
};

// Re-export core types that are commonly used with the model
pub use ermine_core::{
    EditorError, EditorResult, GroupId, Position, Rect, RelationKind, RelationshipId, Size,
    TableId,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
