//! Automatic edge routing between table nodes
//!
//! For every relationship the engine picks an attachment face on each
//! endpoint node and emits a cubic bezier path between the two face
//! anchors, in world space so paths pan and zoom consistently with the
//! nodes. Row geometry comes from a `NodeGeometryProvider` — the live
//! rendering surface, or `StoredGeometry` when routing headlessly from
//! stored positions.

use crate::viewport::Viewport;
use ermine_core::{
    Face, NodeGeometryProvider, Position, Rect, RelationshipId, TableId,
};
use ermine_model::{Relationship, SchemaDocument};
use tracing::debug;

// ============================================================================
// Constants
// ============================================================================

/// Horizontal band, in world units, within which endpoints are considered
/// near-vertically aligned and routed out of the same face
pub const FACE_BAND: f32 = 50.0;

/// Minimum horizontal offset of a bezier control point from its endpoint
pub const MIN_CONTROL_DISTANCE: f32 = 50.0;

/// Control point offset as a fraction of the horizontal span
pub const CONTROL_OFFSET_RATIO: f32 = 0.5;

// ============================================================================
// Edge Path
// ============================================================================

/// A routed cubic bezier path between two node faces, in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgePath {
    pub start: Position,
    pub end: Position,
    pub control1: Position,
    pub control2: Position,
    pub from_face: Face,
    pub to_face: Face,
}

impl EdgePath {
    /// SVG path data for this curve
    pub fn to_path_data(&self) -> String {
        format!(
            "M {},{} C {},{} {},{} {},{}",
            self.start.x,
            self.start.y,
            self.control1.x,
            self.control1.y,
            self.control2.x,
            self.control2.y,
            self.end.x,
            self.end.y
        )
    }

    /// Point on the curve at parameter `t` in `[0, 1]`
    pub fn point_at(&self, t: f32) -> Position {
        let t2 = t * t;
        let t3 = t2 * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let mt3 = mt2 * mt;

        Position {
            x: mt3 * self.start.x
                + 3.0 * mt2 * t * self.control1.x
                + 3.0 * mt * t2 * self.control2.x
                + t3 * self.end.x,
            y: mt3 * self.start.y
                + 3.0 * mt2 * t * self.control1.y
                + 3.0 * mt * t2 * self.control2.y
                + t3 * self.end.y,
        }
    }

    /// Check if a point lies within `tolerance` of the curve, by sampling
    pub fn is_near(&self, point: Position, tolerance: f32) -> bool {
        const SAMPLES: usize = 20;

        (0..=SAMPLES).any(|i| {
            let t = i as f32 / SAMPLES as f32;
            self.point_at(t).distance_to(&point) <= tolerance
        })
    }
}

/// A relationship together with its routed path
#[derive(Debug, Clone)]
pub struct RoutedEdge {
    pub relationship: RelationshipId,
    pub path: EdgePath,
}

// ============================================================================
// Face Selection
// ============================================================================

/// Pick attachment faces for source and target row rectangles
///
/// Comparing the world-space x-centers `sx` and `ex`: a target clearly to
/// the right gets a natural left-to-right link, a target clearly to the
/// left gets the mirrored link, and endpoints within the band fall back
/// to same-side faces so the path does not cross the node bodies.
pub fn choose_faces(source: &Rect, target: &Rect) -> (Face, Face) {
    let sx = source.center().x;
    let ex = target.center().x;

    if ex > sx + FACE_BAND {
        (Face::Right, Face::Left)
    } else if ex < sx - FACE_BAND {
        (Face::Left, Face::Right)
    } else {
        (Face::Right, Face::Right)
    }
}

/// Route between two world-space column row rectangles
///
/// Control points are offset horizontally outward from each endpoint's
/// face by `max(MIN_CONTROL_DISTANCE, |Δx| * CONTROL_OFFSET_RATIO)`,
/// producing a smooth S-curve for forward links and a wide loopback for
/// side-by-side or reversed nodes.
pub fn route_between(source_row: Rect, target_row: Rect) -> EdgePath {
    let (from_face, to_face) = choose_faces(&source_row, &target_row);

    let start = from_face.anchor(&source_row);
    let end = to_face.anchor(&target_row);

    let span = (end.x - start.x).abs();
    let dist = (span * CONTROL_OFFSET_RATIO).max(MIN_CONTROL_DISTANCE);

    EdgePath {
        start,
        end,
        control1: Position::new(start.x + from_face.outward_sign() * dist, start.y),
        control2: Position::new(end.x + to_face.outward_sign() * dist, end.y),
        from_face,
        to_face,
    }
}

// ============================================================================
// Relationship Routing
// ============================================================================

/// Route a single relationship from provider geometry
///
/// Returns `None` when either endpoint row is unavailable (deleted table,
/// renamed column, not-yet-rendered row) — a silent skip, never an error.
pub fn route_relationship(
    relationship: &Relationship,
    provider: &dyn NodeGeometryProvider,
    viewport: &Viewport,
) -> Option<EdgePath> {
    let source = provider.column_rect(relationship.from_table, &relationship.from_column);
    let target = provider.column_rect(relationship.to_table, &relationship.to_column);

    let (source, target) = match (source, target) {
        (Some(s), Some(t)) => (s, t),
        _ => {
            debug!(
                relationship = %relationship.id,
                "skipping relationship with unresolved endpoint geometry"
            );
            return None;
        }
    };

    Some(route_between(
        viewport.rect_to_world(source),
        viewport.rect_to_world(target),
    ))
}

/// Recompute the full set of relationship paths
///
/// Called whenever the diagram is invalidated (a node moved, content was
/// added or removed, rendered geometry changed). O(number of
/// relationships) with O(1) geometry lookups.
pub fn route_all(
    document: &SchemaDocument,
    provider: &dyn NodeGeometryProvider,
    viewport: &Viewport,
) -> Vec<RoutedEdge> {
    document
        .relationships()
        .filter_map(|rel| {
            route_relationship(rel, provider, viewport).map(|path| RoutedEdge {
                relationship: rel.id,
                path,
            })
        })
        .collect()
}

/// Find the relationship whose rendered path is nearest to a screen
/// point, within `tolerance` screen units
///
/// Supports the click-a-path affordance; confirming and deleting is the
/// caller's part.
pub fn relationship_at(
    document: &SchemaDocument,
    provider: &dyn NodeGeometryProvider,
    viewport: &Viewport,
    point_screen: Position,
    tolerance: f32,
) -> Option<RelationshipId> {
    let point_world = viewport.screen_to_world(point_screen);
    let tolerance_world = tolerance / viewport.scale;

    document.relationships().find_map(|rel| {
        let path = route_relationship(rel, provider, viewport)?;
        path.is_near(point_world, tolerance_world).then_some(rel.id)
    })
}

// ============================================================================
// Stored Geometry Provider
// ============================================================================

/// Geometry provider computing row rectangles from stored node positions
/// and the card metrics, instead of live rendered measurements
///
/// Used for headless routing: tests, the CLI, and the snapshot exporter
/// all see exactly the face-to-face geometry the live engine would emit
/// for the same positions.
pub struct StoredGeometry<'a> {
    document: &'a SchemaDocument,
    viewport: Viewport,
}

impl<'a> StoredGeometry<'a> {
    /// Create a provider over a document viewed through `viewport`
    pub fn new(document: &'a SchemaDocument, viewport: Viewport) -> Self {
        Self { document, viewport }
    }
}

impl NodeGeometryProvider for StoredGeometry<'_> {
    fn column_rect(&self, table: TableId, column: &str) -> Option<Rect> {
        let world = self.document.table(table)?.column_row_bounds(column)?;
        Some(self.viewport.rect_to_screen(world))
    }
}

// ============================================================================
// Tests
// ============================================================================
