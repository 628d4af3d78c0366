//! Interactive repositioning of single nodes and batch groups
//!
//! The drag controller holds a transient, non-owning working set of the
//! tables being moved: each member's id and its position at drag start.
//! Every pointer move applies one shared world-space delta to all
//! members — never an independent reprojection per member — so relative
//! offsets within a group are exactly preserved.

use crate::viewport::Viewport;
use ermine_core::{EditorError, EditorResult, GroupId, Position, TableId};
use ermine_model::SchemaDocument;

// ============================================================================
// Drag Mode
// ============================================================================

/// What the active drag is moving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    /// A single table node
    Single(TableId),
    /// Every table sharing a group
    Group(GroupId),
}

// ============================================================================
// Drag Controller
// ============================================================================

/// State machine for pointer-driven node repositioning
///
/// Idle until `begin_*`; active until `finish`. Releasing the pointer
/// anywhere commits the current position — there is no drop-to-cancel
/// gesture.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    mode: Option<DragMode>,
    start_pointer_world: Position,
    members: Vec<(TableId, Position)>,
    moved: bool,
}

impl DragController {
    /// Create an idle controller
    pub fn new() -> Self {
        Self::default()
    }

    /// Start dragging a single table
    pub fn begin_single(
        &mut self,
        document: &SchemaDocument,
        table_id: TableId,
        pointer_screen: Position,
        viewport: &Viewport,
    ) -> EditorResult<()> {
        let table = document
            .table(table_id)
            .ok_or_else(|| EditorError::TableNotFound(table_id.to_string()))?;

        self.mode = Some(DragMode::Single(table_id));
        self.start_pointer_world = viewport.screen_to_world(pointer_screen);
        self.members = vec![(table_id, table.position)];
        self.moved = false;
        Ok(())
    }

    /// Start dragging every table in a group
    pub fn begin_group(
        &mut self,
        document: &SchemaDocument,
        group_id: GroupId,
        pointer_screen: Position,
        viewport: &Viewport,
    ) -> EditorResult<()> {
        let members: Vec<(TableId, Position)> = document
            .tables_in_group(group_id)
            .into_iter()
            .filter_map(|id| document.table(id).map(|t| (id, t.position)))
            .collect();

        if members.is_empty() {
            return Err(EditorError::TableNotFound(group_id.to_string()));
        }

        self.mode = Some(DragMode::Group(group_id));
        self.start_pointer_world = viewport.screen_to_world(pointer_screen);
        self.members = members;
        self.moved = false;
        Ok(())
    }

    /// Apply the pointer's world-space delta from drag start to every
    /// member; returns `true` when positions changed (callers reroute
    /// edges for live feedback)
    pub fn update(
        &mut self,
        document: &mut SchemaDocument,
        pointer_screen: Position,
        viewport: &Viewport,
    ) -> bool {
        if self.mode.is_none() {
            return false;
        }

        let pointer_world = viewport.screen_to_world(pointer_screen);
        let delta = pointer_world - self.start_pointer_world;

        for (id, start) in &self.members {
            if let Some(table) = document.table_mut(*id) {
                table.set_position(*start + delta);
            }
        }

        if delta.x != 0.0 || delta.y != 0.0 {
            self.moved = true;
        }
        true
    }

    /// End the drag, returning `true` when anything actually moved
    pub fn finish(&mut self) -> bool {
        let moved = self.mode.is_some() && self.moved;
        self.mode = None;
        self.members.clear();
        self.moved = false;
        moved
    }

    /// Check if a drag is in progress
    pub fn is_active(&self) -> bool {
        self.mode.is_some()
    }

    /// The active drag mode, if any
    pub fn mode(&self) -> Option<DragMode> {
        self.mode
    }
}

// ============================================================================
// Tests
// ============================================================================
