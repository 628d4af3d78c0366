//! The editor session: the explicit context object owning all mutable
//! editor state
//!
//! One `EditorSession` exists per open editor. It owns the schema
//! document, the undo history, the viewport, the drag controller, and the
//! import batch counter, and every component operates on it rather than
//! on ambient globals. All mutating operations validate first (rejected
//! input mutates nothing and takes no snapshot), then snapshot, then
//! apply.

use crate::drag::DragController;
use crate::import::{parse_column_lines, parse_er_diagram};
use crate::layout::{grid_position, shift_to_origin, smart_coordinates};
use crate::palette::batch_color;
use crate::routing::{self, RoutedEdge};
use crate::viewport::Viewport;
use crate::{export, snapshot};
use ermine_core::{
    EditorError, EditorResult, GroupId, NodeGeometryProvider, Persistable, Position,
    RelationKind, RelationshipId, TableId, Validatable,
};
use ermine_model::{
    Column, History, ProjectFile, Relationship, SchemaDocument, Snapshot, Table, TablePatch,
    remap_ids,
};
use std::collections::HashMap;
use tracing::{debug, info};
use uuid::Uuid;

/// Fallback name for tables produced by the column-list importer
pub const IMPORTED_TABLE_NAME: &str = "Imported";

// ============================================================================
// Import Report
// ============================================================================

/// Outcome of one batch import (text parse or project load)
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    /// Group shared by everything the batch produced
    pub group_id: Option<GroupId>,

    /// Palette color assigned to the batch
    pub color: Option<String>,

    /// Ids of the created tables
    pub tables: Vec<TableId>,

    /// Ids of the created relationships
    pub relationships: Vec<RelationshipId>,

    /// Relationship lines dropped because an endpoint was unknown
    pub skipped_links: usize,

    /// Entity blocks dropped because they had no usable columns
    pub skipped_entities: usize,
}

// ============================================================================
// Editor Session
// ============================================================================

/// All state of one editor session
#[derive(Debug, Default)]
pub struct EditorSession {
    document: SchemaDocument,
    history: History,
    viewport: Viewport,
    drag: DragController,
    pending_drag_snapshot: Option<Snapshot>,
    import_batches: u32,
}

impl EditorSession {
    /// Create a session over an empty document
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            document: SchemaDocument::new(name),
            ..Self::default()
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The live document
    pub fn document(&self) -> &SchemaDocument {
        &self.document
    }

    /// The current viewport
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Number of undo steps available
    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    /// Check if a drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    // ========================================================================
    // Viewport Operations
    // ========================================================================

    /// Zoom around a focal screen point
    pub fn zoom_at(&mut self, focal: Position, delta: f32) {
        self.viewport.zoom_at(focal, delta);
    }

    /// Pan by a screen-space delta
    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        self.viewport.pan_by(dx, dy);
    }

    /// Reset the viewport to the identity transform
    pub fn reset_view(&mut self) {
        self.viewport.reset();
    }

    // ========================================================================
    // Table Operations
    // ========================================================================

    /// Create a table
    ///
    /// Missing position is filled by smart placement; missing color gets
    /// the manual default. Rejected input takes no snapshot.
    pub fn create_table(
        &mut self,
        name: impl Into<String>,
        columns: Vec<Column>,
        color: Option<String>,
        position: Option<Position>,
    ) -> EditorResult<TableId> {
        let position = position.unwrap_or_else(|| smart_coordinates(&self.document));
        let mut table = Table::new(name)
            .with_columns(columns)
            .with_position(position);
        if let Some(color) = color {
            table.color = color;
        }
        table.validate()?;

        self.snapshot();
        self.document.insert_table(table)
    }

    /// Apply a partial update to a table
    pub fn update_table(&mut self, id: TableId, patch: TablePatch) -> EditorResult<()> {
        if self.document.table(id).is_none() {
            return Err(EditorError::TableNotFound(id.to_string()));
        }
        patch.validate()?;

        self.snapshot();
        self.document.update_table(id, patch)
    }

    /// Delete a table, cascading to its relationships
    pub fn delete_table(&mut self, id: TableId) -> EditorResult<Table> {
        if self.document.table(id).is_none() {
            return Err(EditorError::TableNotFound(id.to_string()));
        }

        self.snapshot();
        self.document
            .remove_table(id)
            .ok_or_else(|| EditorError::TableNotFound(id.to_string()))
    }

    // ========================================================================
    // Relationship Operations
    // ========================================================================

    /// Create a relationship between two columns
    ///
    /// Empty or unresolved endpoint selections are rejected with no
    /// mutation and no snapshot.
    pub fn create_relationship(
        &mut self,
        from_table: TableId,
        from_column: impl Into<String>,
        to_table: TableId,
        to_column: impl Into<String>,
        kind: RelationKind,
    ) -> EditorResult<RelationshipId> {
        let relationship =
            Relationship::new(from_table, from_column, to_table, to_column, kind);
        self.document.check_relationship(&relationship)?;

        self.snapshot();
        self.document.insert_relationship(relationship)
    }

    /// Delete a relationship
    pub fn delete_relationship(&mut self, id: RelationshipId) -> EditorResult<Relationship> {
        if self.document.relationship(id).is_none() {
            return Err(EditorError::RelationshipNotFound(id.to_string()));
        }

        self.snapshot();
        self.document
            .remove_relationship(id)
            .ok_or_else(|| EditorError::RelationshipNotFound(id.to_string()))
    }

    // ========================================================================
    // Undo
    // ========================================================================

    /// Undo the most recent action, replacing the live document wholesale
    ///
    /// A no-op returning `false` when the history is empty, and refused
    /// while a drag is active so the drag working set can never reference
    /// a restored-away table.
    pub fn undo(&mut self) -> bool {
        if self.drag.is_active() {
            debug!("undo refused during active drag");
            return false;
        }
        match self.history.pop() {
            Some(snapshot) => {
                self.document.restore(snapshot);
                true
            }
            None => false,
        }
    }

    // ========================================================================
    // Drag Operations
    // ========================================================================

    /// Pointer-down on a node header
    ///
    /// Starts a group drag when the group modifier is held and the node
    /// belongs to a group; otherwise a single-node drag.
    pub fn begin_drag(
        &mut self,
        table_id: TableId,
        pointer_screen: Position,
        group_modifier: bool,
    ) -> EditorResult<()> {
        let captured = self.document.capture();

        match (group_modifier, self.document.group_of(table_id)) {
            (true, Some(group_id)) => {
                self.drag
                    .begin_group(&self.document, group_id, pointer_screen, &self.viewport)?
            }
            _ => self
                .drag
                .begin_single(&self.document, table_id, pointer_screen, &self.viewport)?,
        }

        self.pending_drag_snapshot = Some(captured);
        Ok(())
    }

    /// Pointer-down on a group's dedicated drag handle; always a group
    /// drag regardless of modifier keys
    pub fn begin_group_drag(
        &mut self,
        group_id: GroupId,
        pointer_screen: Position,
    ) -> EditorResult<()> {
        let captured = self.document.capture();
        self.drag
            .begin_group(&self.document, group_id, pointer_screen, &self.viewport)?;
        self.pending_drag_snapshot = Some(captured);
        Ok(())
    }

    /// Pointer-move during a drag; returns `true` when positions changed
    /// and edge paths should be recomputed
    pub fn drag_to(&mut self, pointer_screen: Position) -> bool {
        self.drag
            .update(&mut self.document, pointer_screen, &self.viewport)
    }

    /// Pointer-up: commit the drag
    ///
    /// Exactly one history snapshot — of the pre-drag state — is pushed
    /// here, and only when something actually moved, so a long free-form
    /// drag is a single undo step.
    pub fn end_drag(&mut self) -> bool {
        let moved = self.drag.finish();
        if let Some(captured) = self.pending_drag_snapshot.take() {
            if moved {
                self.history.push(captured);
            }
        }
        moved
    }

    // ========================================================================
    // Routing
    // ========================================================================

    /// Recompute every relationship path against the given geometry
    pub fn route(&self, provider: &dyn NodeGeometryProvider) -> Vec<RoutedEdge> {
        routing::route_all(&self.document, provider, &self.viewport)
    }

    /// Relationship whose path lies under a screen point, if any
    pub fn relationship_at(
        &self,
        provider: &dyn NodeGeometryProvider,
        point_screen: Position,
        tolerance: f32,
    ) -> Option<RelationshipId> {
        routing::relationship_at(&self.document, provider, &self.viewport, point_screen, tolerance)
    }

    // ========================================================================
    // Text Imports
    // ========================================================================

    /// Import a whitespace-delimited `type name` column list as one table
    pub fn import_column_list(
        &mut self,
        table_name: &str,
        text: &str,
    ) -> EditorResult<TableId> {
        let columns = parse_column_lines(text);
        if columns.is_empty() {
            return Err(EditorError::import_parse("no column definitions found"));
        }

        let name = if table_name.is_empty() {
            IMPORTED_TABLE_NAME
        } else {
            table_name
        };
        let (group_id, color) = self.next_batch();

        self.snapshot();
        let table = Table::new(name)
            .with_columns(columns)
            .with_position(smart_coordinates(&self.document))
            .with_color(color)
            .with_group(group_id);
        let id = self.document.insert_table(table)?;
        info!(table = %id, "imported column list");
        Ok(id)
    }

    /// Import entity-relationship mini-language text as one batch
    ///
    /// The text is parsed completely before the store is touched, so a
    /// failing import never partially populates the document. Everything
    /// the batch produces shares one fresh group id and one palette
    /// color; tables pack into the batch grid; each relationship joins
    /// the first column of its endpoint tables. Unknown endpoints are
    /// dropped silently.
    pub fn import_er_diagram(&mut self, text: &str) -> EditorResult<ImportReport> {
        let parsed = parse_er_diagram(text)?;

        let (usable, skipped_entities): (Vec<_>, Vec<_>) = parsed
            .entities
            .into_iter()
            .partition(|e| !e.columns.is_empty());
        if usable.is_empty() {
            return Err(EditorError::import_parse(
                "no entity definitions with columns found",
            ));
        }

        let (group_id, color) = self.next_batch();
        let origin = smart_coordinates(&self.document);

        let mut endpoints: HashMap<String, (TableId, String)> = HashMap::new();
        let mut tables = Vec::with_capacity(usable.len());
        for (index, entity) in usable.into_iter().enumerate() {
            let first_column = entity.columns[0].name.clone();
            let table = Table::new(&entity.name)
                .with_columns(entity.columns)
                .with_position(grid_position(origin, index))
                .with_color(&color)
                .with_group(group_id);
            endpoints.insert(entity.name, (table.id, first_column));
            tables.push(table);
        }

        let mut relationships = Vec::new();
        let mut skipped_links = 0;
        for link in &parsed.links {
            match (endpoints.get(&link.from), endpoints.get(&link.to)) {
                (Some((from_id, from_col)), Some((to_id, to_col))) => {
                    relationships.push(Relationship::new(
                        *from_id, from_col, *to_id, to_col, link.kind,
                    ));
                }
                _ => {
                    debug!(from = %link.from, to = %link.to, "dropping link to unknown entity");
                    skipped_links += 1;
                }
            }
        }

        self.snapshot();
        let report = ImportReport {
            group_id: Some(group_id),
            color: Some(color),
            tables: tables.iter().map(|t| t.id).collect(),
            relationships: relationships.iter().map(|r| r.id).collect(),
            skipped_links,
            skipped_entities: skipped_entities.len(),
        };
        self.document.extend(tables, relationships);

        info!(
            tables = report.tables.len(),
            relationships = report.relationships.len(),
            "imported diagram text"
        );
        Ok(report)
    }

    // ========================================================================
    // Project Save / Load
    // ========================================================================

    /// Serialize the document to the two-field project JSON
    pub fn save_project(&self) -> EditorResult<String> {
        ProjectFile::from_document(&self.document).to_json()
    }

    /// Merge a project file into the session as one batch import
    ///
    /// The file is parsed fully before anything commits. Every table id
    /// is remapped to a fresh id, relationship endpoints follow the
    /// remap, dangling relationships are dropped, the loaded set gets one
    /// new group id, saved positions are translated as a block to the
    /// batch origin, and stored colors are kept (records without one get
    /// the batch color). The whole load is a single undo step.
    pub fn load_project(&mut self, json: &str) -> EditorResult<ImportReport> {
        let file = ProjectFile::parse(json)?;
        if file.tables.is_empty() {
            return Ok(ImportReport::default());
        }

        let mut remapped = remap_ids(file.tables, file.relationships);
        let (group_id, color) = self.next_batch();
        let origin = smart_coordinates(&self.document);

        shift_to_origin(&mut remapped.tables, origin);
        for table in &mut remapped.tables {
            table.group_id = Some(group_id);
            if table.color.is_empty() {
                table.color = color.clone();
            }
        }

        self.snapshot();
        let report = ImportReport {
            group_id: Some(group_id),
            color: Some(color),
            tables: remapped.tables.iter().map(|t| t.id).collect(),
            relationships: remapped.relationships.iter().map(|r| r.id).collect(),
            skipped_links: remapped.dropped_relationships,
            skipped_entities: 0,
        };
        self.document.extend(remapped.tables, remapped.relationships);

        info!(
            tables = report.tables.len(),
            dropped = report.skipped_links,
            "loaded project file"
        );
        Ok(report)
    }

    // ========================================================================
    // Exports
    // ========================================================================

    /// Render the document as diagram-language text
    pub fn export_er_diagram(&self) -> String {
        export::to_er_diagram(&self.document)
    }

    /// Render the document as a standalone HTML snapshot
    pub fn export_snapshot(&self) -> EditorResult<String> {
        snapshot::to_html(&self.document)
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Push a deep copy of the current state onto the undo stack
    fn snapshot(&mut self) {
        self.history.push(self.document.capture());
    }

    /// Allocate the next batch group id and palette color
    fn next_batch(&mut self) -> (GroupId, String) {
        let color = batch_color(self.import_batches).to_string();
        self.import_batches += 1;
        (Uuid::new_v4(), color)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::StoredGeometry;
    use ermine_model::{DEFAULT_COLOR, MAX_HISTORY, NODE_WIDTH};

    fn cols(names: &[&str]) -> Vec<Column> {
        names.iter().map(|n| Column::new(*n, "string")).collect()
    }

    fn session_with_tables(n: usize) -> (EditorSession, Vec<TableId>) {
        let mut session = EditorSession::new("test");
        let ids = (0..n)
            .map(|i| {
                session
                    .create_table(format!("t{i}"), cols(&["id"]), None, None)
                    .unwrap()
            })
            .collect();
        (session, ids)
    }

    #[test]
    fn test_create_table_defaults() {
        let mut session = EditorSession::new("test");
        let id = session
            .create_table("users", cols(&["id", "email"]), None, None)
            .unwrap();

        let table = session.document().table(id).unwrap();
        assert_eq!(table.position, crate::layout::DEFAULT_ORIGIN);
        assert_eq!(table.color, DEFAULT_COLOR);
        assert!(table.group_id.is_none());
        assert_eq!(session.undo_depth(), 1);
    }

    #[test]
    fn test_second_table_placed_right_of_first() {
        let (session, ids) = session_with_tables(2);
        let first = session.document().table(ids[0]).unwrap().position;
        let second = session.document().table(ids[1]).unwrap().position;
        assert!(second.x >= first.x + NODE_WIDTH);
    }

    #[test]
    fn test_rejected_input_takes_no_snapshot() {
        let mut session = EditorSession::new("test");
        assert!(session.create_table("", cols(&["id"]), None, None).is_err());
        assert!(session.create_table("users", vec![], None, None).is_err());
        assert_eq!(session.undo_depth(), 0);
        assert_eq!(session.document().table_count(), 0);

        let (mut session, ids) = session_with_tables(2);
        let depth = session.undo_depth();
        assert!(
            session
                .create_relationship(ids[0], "", ids[1], "id", RelationKind::OneToOne)
                .is_err()
        );
        assert!(
            session
                .create_relationship(ids[0], "id", Uuid::new_v4(), "id", RelationKind::OneToOne)
                .is_err()
        );
        assert_eq!(session.undo_depth(), depth);
    }

    #[test]
    fn test_undo_chain_restores_prior_states() {
        let (mut session, ids) = session_with_tables(3);
        assert_eq!(session.document().table_count(), 3);

        assert!(session.undo());
        assert_eq!(session.document().table_count(), 2);
        assert!(session.document().table(ids[2]).is_none());

        assert!(session.undo());
        assert!(session.undo());
        assert_eq!(session.document().table_count(), 0);

        // Empty history: no-op
        assert!(!session.undo());
    }

    #[test]
    fn test_history_bound() {
        let (mut session, _) = session_with_tables(MAX_HISTORY + 5);

        for _ in 0..MAX_HISTORY {
            assert!(session.undo());
        }
        // The 21st undo is a no-op; 20 steps reached back 20 actions
        assert!(!session.undo());
        assert_eq!(session.document().table_count(), 5);
    }

    #[test]
    fn test_delete_table_is_one_undo_step() {
        let (mut session, ids) = session_with_tables(2);
        session
            .create_relationship(ids[0], "id", ids[1], "id", RelationKind::OneToMany)
            .unwrap();

        session.delete_table(ids[0]).unwrap();
        assert_eq!(session.document().relationship_count(), 0);

        assert!(session.undo());
        assert_eq!(session.document().table_count(), 2);
        assert_eq!(session.document().relationship_count(), 1);
    }

    #[test]
    fn test_drag_commits_single_snapshot_of_pre_drag_state() {
        let (mut session, ids) = session_with_tables(1);
        let before = session.document().table(ids[0]).unwrap().position;
        let depth = session.undo_depth();

        session
            .begin_drag(ids[0], Position::new(0.0, 0.0), false)
            .unwrap();
        session.drag_to(Position::new(40.0, 0.0));
        session.drag_to(Position::new(90.0, 30.0));
        assert!(session.end_drag());

        // One action, one snapshot
        assert_eq!(session.undo_depth(), depth + 1);
        let after = session.document().table(ids[0]).unwrap().position;
        assert_eq!(after, before.offset(90.0, 30.0));

        // Undo returns to the pre-drag position in one step
        assert!(session.undo());
        assert_eq!(session.document().table(ids[0]).unwrap().position, before);
    }

    #[test]
    fn test_motionless_drag_takes_no_snapshot() {
        let (mut session, ids) = session_with_tables(1);
        let depth = session.undo_depth();

        session
            .begin_drag(ids[0], Position::new(10.0, 10.0), false)
            .unwrap();
        assert!(!session.end_drag());
        assert_eq!(session.undo_depth(), depth);
    }

    #[test]
    fn test_undo_refused_while_dragging() {
        let (mut session, ids) = session_with_tables(1);

        session
            .begin_drag(ids[0], Position::zero(), false)
            .unwrap();
        assert!(session.is_dragging());
        assert!(!session.undo());

        session.end_drag();
        assert!(session.undo());
    }

    #[test]
    fn test_modifier_drag_moves_group() {
        let mut session = EditorSession::new("test");
        let report = session
            .import_er_diagram("erDiagram\nA { int id }\nB { int id }")
            .unwrap();
        let (a, b) = (report.tables[0], report.tables[1]);
        let before_b = session.document().table(b).unwrap().position;

        session.begin_drag(a, Position::zero(), true).unwrap();
        session.drag_to(Position::new(30.0, 40.0));
        session.end_drag();

        // Both group members moved by the same delta
        let after_b = session.document().table(b).unwrap().position;
        assert_eq!(after_b, before_b.offset(30.0, 40.0));

        // Without the modifier only the grabbed node moves
        session.begin_drag(a, Position::zero(), false).unwrap();
        session.drag_to(Position::new(10.0, 0.0));
        session.end_drag();
        assert_eq!(session.document().table(b).unwrap().position, after_b);
    }

    #[test]
    fn test_group_handle_drag_ignores_modifier() {
        let mut session = EditorSession::new("test");
        let report = session
            .import_er_diagram("erDiagram\nA { int id }\nB { int id }")
            .unwrap();
        let group = report.group_id.unwrap();
        let a = report.tables[0];
        let before = session.document().table(a).unwrap().position;

        session.begin_group_drag(group, Position::zero()).unwrap();
        session.drag_to(Position::new(5.0, 5.0));
        session.end_drag();

        assert_eq!(
            session.document().table(a).unwrap().position,
            before.offset(5.0, 5.0)
        );
    }

    #[test]
    fn test_import_er_diagram_batch() {
        let mut session = EditorSession::new("test");
        let input = "erDiagram\n USER {\n int id\n string name\n }\n POST {\n int id\n}\n USER ||--o{ POST";
        let report = session.import_er_diagram(input).unwrap();

        assert_eq!(report.tables.len(), 2);
        assert_eq!(report.relationships.len(), 1);

        let doc = session.document();
        let user = doc.table_by_name("USER").unwrap();
        let post = doc.table_by_name("POST").unwrap();
        assert_eq!(user.column_count(), 2);
        assert_eq!(post.column_count(), 1);

        // One shared group and color for the whole batch
        assert_eq!(user.group_id, report.group_id);
        assert_eq!(post.group_id, report.group_id);
        assert_eq!(user.color, post.color);

        // First-column endpoints, 1:N from the crow's foot
        let rel = doc.relationship(report.relationships[0]).unwrap();
        assert_eq!(rel.from_table, user.id);
        assert_eq!(rel.from_column, "id");
        assert_eq!(rel.to_table, post.id);
        assert_eq!(rel.to_column, "id");
        assert_eq!(rel.kind, RelationKind::OneToMany);

        // Grid packing from the batch origin
        assert_eq!(post.position.x - user.position.x, 250.0);
        assert_eq!(post.position.y, user.position.y);

        // Whole import is one undo step
        assert!(session.undo());
        assert!(session.document().is_empty());
    }

    #[test]
    fn test_import_unknown_link_endpoint_dropped() {
        let mut session = EditorSession::new("test");
        let report = session
            .import_er_diagram("erDiagram\nUSER { int id }\nUSER ||--o{ GHOST")
            .unwrap();

        assert_eq!(report.tables.len(), 1);
        assert!(report.relationships.is_empty());
        assert_eq!(report.skipped_links, 1);
    }

    #[test]
    fn test_import_batches_cycle_palette_colors() {
        let mut session = EditorSession::new("test");
        let first = session.import_er_diagram("erDiagram\nA { int id }").unwrap();
        let second = session.import_er_diagram("erDiagram\nB { int id }").unwrap();

        assert_ne!(first.color, second.color);
        assert_ne!(first.group_id, second.group_id);
        assert_eq!(first.color.as_deref(), Some(batch_color(0)));
        assert_eq!(second.color.as_deref(), Some(batch_color(1)));
    }

    #[test]
    fn test_import_parse_failure_mutates_nothing() {
        let mut session = EditorSession::new("test");
        assert!(session.import_er_diagram("nothing here").is_err());
        assert!(session.import_column_list("Imported", "oops").is_err());
        assert!(session.document().is_empty());
        assert_eq!(session.undo_depth(), 0);
    }

    #[test]
    fn test_import_column_list() {
        let mut session = EditorSession::new("test");
        let id = session
            .import_column_list("", "int id\nstring title\nbroken\n")
            .unwrap();

        let table = session.document().table(id).unwrap();
        assert_eq!(table.name, IMPORTED_TABLE_NAME);
        assert_eq!(table.column_count(), 2);
        assert!(table.group_id.is_some());
    }

    #[test]
    fn test_save_load_remaps_ids() {
        let (mut source, ids) = session_with_tables(2);
        source
            .create_relationship(ids[0], "id", ids[1], "id", RelationKind::OneToMany)
            .unwrap();
        let saved = source.save_project().unwrap();

        // Loading back into the same session: the ids in the file are
        // already open, so everything must be remapped
        let report = source.load_project(&saved).unwrap();
        assert_eq!(source.document().table_count(), 4);
        assert_eq!(source.document().relationship_count(), 2);

        for id in &report.tables {
            assert!(!ids.contains(id));
        }
        for rel_id in &report.relationships {
            let rel = source.document().relationship(*rel_id).unwrap();
            assert!(source.document().table(rel.from_table).is_some());
            assert!(source.document().table(rel.to_table).is_some());
        }

        // Loaded set forms one group and undoes as one unit
        assert!(report.group_id.is_some());
        assert!(source.undo());
        assert_eq!(source.document().table_count(), 2);
    }

    #[test]
    fn test_load_preserves_relative_layout() {
        let mut source = EditorSession::new("source");
        source
            .create_table("a", cols(&["id"]), None, Some(Position::new(0.0, 0.0)))
            .unwrap();
        source
            .create_table("b", cols(&["id"]), None, Some(Position::new(120.0, 90.0)))
            .unwrap();
        let saved = source.save_project().unwrap();

        let mut target = EditorSession::new("target");
        let report = target.load_project(&saved).unwrap();
        let a = target.document().table(report.tables[0]).unwrap().position;
        let b = target.document().table(report.tables[1]).unwrap().position;

        assert_eq!(b.x - a.x, 120.0);
        assert_eq!(b.y - a.y, 90.0);
    }

    #[test]
    fn test_load_malformed_project_aborts_atomically() {
        let (mut session, _) = session_with_tables(1);
        let depth = session.undo_depth();

        let err = session.load_project("{\"tables\": \"bad\"}").unwrap_err();
        assert!(err.is_parse());
        assert_eq!(session.document().table_count(), 1);
        assert_eq!(session.undo_depth(), depth);
    }

    #[test]
    fn test_session_routing_and_hit_test() {
        let mut session = EditorSession::new("test");
        let a = session
            .create_table("a", cols(&["id"]), None, Some(Position::new(0.0, 0.0)))
            .unwrap();
        let b = session
            .create_table("b", cols(&["id"]), None, Some(Position::new(400.0, 0.0)))
            .unwrap();
        session
            .create_relationship(a, "id", b, "id", RelationKind::OneToOne)
            .unwrap();

        let document = session.document().clone();
        let provider = StoredGeometry::new(&document, session.viewport());
        let routed = session.route(&provider);
        assert_eq!(routed.len(), 1);

        let mid = routed[0].path.point_at(0.5);
        let hit = session.relationship_at(&provider, mid, 8.0);
        assert_eq!(hit, Some(routed[0].relationship));
    }

    #[test]
    fn test_viewport_operations() {
        let mut session = EditorSession::new("test");
        session.pan_by(10.0, 20.0);
        session.zoom_at(Position::zero(), 0.5);
        assert_ne!(session.viewport(), Viewport::default());

        session.reset_view();
        assert_eq!(session.viewport(), Viewport::default());
    }
}
