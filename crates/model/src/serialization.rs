//! Project file serialization
//!
//! A project file is a JSON document with exactly two top-level fields —
//! `tables` and `relationships`. Loading never reuses the ids stored in
//! the file: every table id is remapped to a freshly generated one so a
//! load can merge into a session that already has content, relationship
//! endpoints are rewritten through the remap, and relationships whose
//! endpoints did not survive the load are dropped.

use crate::document::SchemaDocument;
use crate::relationship::Relationship;
use crate::table::Table;
use ermine_core::{EditorError, EditorResult, Persistable, TableId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

// ============================================================================
// Project File
// ============================================================================

/// On-disk representation of a schema project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectFile {
    /// All table records
    pub tables: Vec<Table>,

    /// All relationship records
    pub relationships: Vec<Relationship>,
}

impl ProjectFile {
    /// Capture the current document content
    pub fn from_document(document: &SchemaDocument) -> Self {
        Self {
            tables: document.tables().cloned().collect(),
            relationships: document.relationships().cloned().collect(),
        }
    }

    /// Parse a project file, mapping malformed input to an
    /// import-format error so nothing downstream commits partial state
    pub fn parse(json: &str) -> EditorResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| EditorError::InvalidProjectFormat(e.to_string()))
    }
}

impl Persistable for ProjectFile {
    fn file_extension() -> &'static str {
        "json"
    }
}

// ============================================================================
// Id Remapping
// ============================================================================

/// Result of remapping a loaded project's ids
#[derive(Debug, Clone)]
pub struct RemappedProject {
    /// Tables carrying fresh ids
    pub tables: Vec<Table>,

    /// Relationships rewritten through the id remap
    pub relationships: Vec<Relationship>,

    /// Number of relationships dropped because an endpoint id did not
    /// appear in the loaded table set
    pub dropped_relationships: usize,
}

/// Remap every table id to a freshly generated one and rewrite
/// relationship endpoints through the remap
///
/// Relationships referencing a table id absent from the loaded set are
/// dropped rather than failing the load (best-effort policy).
pub fn remap_ids(
    mut tables: Vec<Table>,
    relationships: Vec<Relationship>,
) -> RemappedProject {
    let mut id_map: HashMap<TableId, TableId> = HashMap::with_capacity(tables.len());

    for table in &mut tables {
        let fresh = Uuid::new_v4();
        id_map.insert(table.id, fresh);
        table.id = fresh;
    }

    let total = relationships.len();
    let relationships: Vec<Relationship> = relationships
        .into_iter()
        .filter_map(|mut rel| {
            let from = *id_map.get(&rel.from_table)?;
            let to = *id_map.get(&rel.to_table)?;
            rel.id = Uuid::new_v4();
            rel.from_table = from;
            rel.to_table = to;
            Some(rel)
        })
        .collect();

    RemappedProject {
        dropped_relationships: total - relationships.len(),
        tables,
        relationships,
    }
}

// ============================================================================
// Tests
// ============================================================================
