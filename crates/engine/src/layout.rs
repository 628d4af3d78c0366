//! Deterministic placement of new and imported tables
//!
//! New content always lands to the right of existing content; batch
//! imports pack into a fixed grid from a shared batch origin; loaded
//! projects that already carry coordinates are translated as a block so
//! their saved relative layout survives.

use ermine_core::Position;
use ermine_model::{SchemaDocument, Table};

// ============================================================================
// Constants
// ============================================================================

/// Default position for the first table in an empty document
pub const DEFAULT_ORIGIN: Position = Position { x: 100.0, y: 100.0 };

/// Horizontal gap between existing content and newly placed content
pub const PLACEMENT_BUFFER: f32 = 80.0;

/// Number of grid columns used when packing a batch import
pub const GRID_COLUMNS: usize = 3;

/// Horizontal grid cell pitch in world units
pub const GRID_PITCH_X: f32 = 250.0;

/// Vertical grid cell pitch in world units
pub const GRID_PITCH_Y: f32 = 350.0;

// ============================================================================
// Placement
// ============================================================================

/// Default position for new content
///
/// An empty document gets the fixed origin; otherwise new content is
/// placed just past the rightmost node edge, level with the topmost node.
pub fn smart_coordinates(document: &SchemaDocument) -> Position {
    let mut rightmost: Option<f32> = None;
    let mut topmost: Option<f32> = None;

    for table in document.tables() {
        let bounds = table.bounds();
        rightmost = Some(rightmost.map_or(bounds.right(), |r| r.max(bounds.right())));
        topmost = Some(topmost.map_or(bounds.top(), |t| t.min(bounds.top())));
    }

    match (rightmost, topmost) {
        (Some(right), Some(top)) => Position::new(right + PLACEMENT_BUFFER, top),
        _ => DEFAULT_ORIGIN,
    }
}

/// Grid cell position for the `index`-th table of a batch
pub fn grid_position(origin: Position, index: usize) -> Position {
    let col = index % GRID_COLUMNS;
    let row = index / GRID_COLUMNS;
    Position::new(
        origin.x + col as f32 * GRID_PITCH_X,
        origin.y + row as f32 * GRID_PITCH_Y,
    )
}

/// Translate coordinate-carrying tables as one block so that their
/// bounding corner lands on `origin`, preserving the saved relative
/// layout instead of re-gridding
pub fn shift_to_origin(tables: &mut [Table], origin: Position) {
    let (mut min_x, mut min_y) = (f32::INFINITY, f32::INFINITY);
    for table in tables.iter() {
        min_x = min_x.min(table.position.x);
        min_y = min_y.min(table.position.y);
    }
    if !min_x.is_finite() || !min_y.is_finite() {
        return;
    }

    let dx = origin.x - min_x;
    let dy = origin.y - min_y;
    for table in tables.iter_mut() {
        table.translate(dx, dy);
    }
}

// ============================================================================
// Tests
// ============================================================================
