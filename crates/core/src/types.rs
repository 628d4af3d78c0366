//! Core types used throughout Ermine
//!
//! This module contains the fundamental types shared by the schema model
//! and the diagram engine: geometric primitives, identifier aliases, and
//! the relationship cardinality vocabulary.

use serde::{Deserialize, Serialize};

// ============================================================================
// Unique Identifiers
// ============================================================================

/// Type alias for table node unique identifiers
pub type TableId = uuid::Uuid;

/// Type alias for relationship unique identifiers
pub type RelationshipId = uuid::Uuid;

/// Type alias for import batch group identifiers
pub type GroupId = uuid::Uuid;

// ============================================================================
// Geometry Types
// ============================================================================

/// A point in world or screen space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    /// Create a new position
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Create a position at the origin (0, 0)
    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Calculate the Euclidean distance to another position
    pub fn distance_to(&self, other: &Position) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Add an offset to this position
    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

/// Size of a node on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Create a zero size
    pub fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::zero()
    }
}

/// Axis-aligned bounding rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub position: Position,
    pub size: Size,
}

impl Rect {
    /// Create a new rectangle
    pub fn new(position: Position, size: Size) -> Self {
        Self { position, size }
    }

    /// Create a rectangle from coordinates and dimensions
    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            position: Position::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Left edge x coordinate
    pub fn left(&self) -> f32 {
        self.position.x
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.position.x + self.size.width
    }

    /// Top edge y coordinate
    pub fn top(&self) -> f32 {
        self.position.y
    }

    /// Bottom edge y coordinate
    pub fn bottom(&self) -> f32 {
        self.position.y + self.size.height
    }

    /// Check if a point is contained within this rectangle
    pub fn contains(&self, point: Position) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    /// Check if this rectangle intersects with another
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Get the center point of the rectangle
    pub fn center(&self) -> Position {
        Position {
            x: self.position.x + self.size.width / 2.0,
            y: self.position.y + self.size.height / 2.0,
        }
    }

    /// Get the union of two rectangles (bounding box containing both)
    pub fn union(&self, other: &Rect) -> Self {
        let min_x = self.left().min(other.left());
        let min_y = self.top().min(other.top());
        let max_x = self.right().max(other.right());
        let max_y = self.bottom().max(other.bottom());

        Self {
            position: Position::new(min_x, min_y),
            size: Size::new(max_x - min_x, max_y - min_y),
        }
    }

    /// Expand the rectangle by a uniform amount
    pub fn expand(&self, amount: f32) -> Self {
        Self {
            position: Position::new(self.position.x - amount, self.position.y - amount),
            size: Size::new(
                self.size.width + amount * 2.0,
                self.size.height + amount * 2.0,
            ),
        }
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self {
            position: Position::default(),
            size: Size::default(),
        }
    }
}

// ============================================================================
// Relationship Kinds
// ============================================================================

/// Cardinality of a relationship between two columns
///
/// The kind is descriptive only: it drives export labeling and never
/// constrains routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    /// One record relates to exactly one other record
    OneToOne,
    /// One record relates to many others (e.g., User has many Posts)
    OneToMany,
    /// Many records relate to one (inverse of OneToMany)
    ManyToOne,
}

impl RelationKind {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            RelationKind::OneToOne => "One to One",
            RelationKind::OneToMany => "One to Many",
            RelationKind::ManyToOne => "Many to One",
        }
    }

    /// Short label used in listings and exports
    pub fn label(&self) -> &'static str {
        match self {
            RelationKind::OneToOne => "1:1",
            RelationKind::OneToMany => "1:N",
            RelationKind::ManyToOne => "N:1",
        }
    }

    /// Crow's-foot symbol for the diagram-language export
    ///
    /// Many-cardinality in either direction is written with the crow's
    /// foot on the right; callers emitting `ManyToOne` reverse their
    /// endpoints so the foot lands on the many side.
    pub fn crows_foot(&self) -> &'static str {
        match self {
            RelationKind::OneToOne => "||--||",
            RelationKind::OneToMany | RelationKind::ManyToOne => "||--o{",
        }
    }

    /// Check if either side of the relationship is a many-side
    pub fn is_many(&self) -> bool {
        !matches!(self, RelationKind::OneToOne)
    }

    /// Parse a short label (`1:1`, `1:N`, `N:1`)
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "1:1" => Some(RelationKind::OneToOne),
            "1:N" => Some(RelationKind::OneToMany),
            "N:1" => Some(RelationKind::ManyToOne),
            _ => None,
        }
    }

    /// Get all relationship kinds
    pub fn all() -> &'static [RelationKind] {
        &[
            RelationKind::OneToOne,
            RelationKind::OneToMany,
            RelationKind::ManyToOne,
        ]
    }
}

impl Default for RelationKind {
    fn default() -> Self {
        RelationKind::OneToOne
    }
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// Node Faces
// ============================================================================

/// One of a node's two horizontal attachment sides used as a routing
/// endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Face {
    Left,
    Right,
}

impl Face {
    /// The opposite face
    pub fn opposite(&self) -> Self {
        match self {
            Face::Left => Face::Right,
            Face::Right => Face::Left,
        }
    }

    /// Horizontal sign of the outward direction of this face
    pub fn outward_sign(&self) -> f32 {
        match self {
            Face::Left => -1.0,
            Face::Right => 1.0,
        }
    }

    /// Anchor point of this face on a node rectangle, at the vertical
    /// midpoint
    pub fn anchor(&self, rect: &Rect) -> Position {
        let y = rect.center().y;
        match self {
            Face::Left => Position::new(rect.left(), y),
            Face::Right => Position::new(rect.right(), y),
        }
    }
}

impl std::fmt::Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Face::Left => write!(f, "left"),
            Face::Right => write!(f, "right"),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // Position tests
    #[test]
    fn test_position_new() {
        let pos = Position::new(10.0, 20.0);
        assert_eq!(pos.x, 10.0);
        assert_eq!(pos.y, 20.0);
    }

    #[test]
    fn test_position_distance() {
        let p1 = Position::new(0.0, 0.0);
        let p2 = Position::new(3.0, 4.0);
        assert!((p1.distance_to(&p2) - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_position_offset() {
        let pos = Position::new(10.0, 20.0);
        let new_pos = pos.offset(5.0, -10.0);
        assert_eq!(new_pos.x, 15.0);
        assert_eq!(new_pos.y, 10.0);
    }

    #[test]
    fn test_position_add_sub() {
        let p1 = Position::new(10.0, 20.0);
        let p2 = Position::new(5.0, 5.0);
        let sum = p1 + p2;
        let diff = p1 - p2;
        assert_eq!(sum.x, 15.0);
        assert_eq!(sum.y, 25.0);
        assert_eq!(diff.x, 5.0);
        assert_eq!(diff.y, 15.0);
    }

    // Rect tests
    #[test]
    fn test_rect_contains() {
        let rect = Rect::from_xywh(10.0, 10.0, 100.0, 50.0);
        assert!(rect.contains(Position::new(50.0, 30.0)));
        assert!(!rect.contains(Position::new(5.0, 30.0)));
        assert!(!rect.contains(Position::new(150.0, 30.0)));
    }

    #[test]
    fn test_rect_edges() {
        let rect = Rect::from_xywh(10.0, 20.0, 100.0, 50.0);
        assert_eq!(rect.left(), 10.0);
        assert_eq!(rect.right(), 110.0);
        assert_eq!(rect.top(), 20.0);
        assert_eq!(rect.bottom(), 70.0);
    }

    #[test]
    fn test_rect_center() {
        let rect = Rect::from_xywh(0.0, 0.0, 100.0, 50.0);
        let center = rect.center();
        assert_eq!(center.x, 50.0);
        assert_eq!(center.y, 25.0);
    }

    #[test]
    fn test_rect_intersects() {
        let r1 = Rect::from_xywh(0.0, 0.0, 50.0, 50.0);
        let r2 = Rect::from_xywh(25.0, 25.0, 50.0, 50.0);
        let r3 = Rect::from_xywh(100.0, 100.0, 50.0, 50.0);
        assert!(r1.intersects(&r2));
        assert!(!r1.intersects(&r3));
    }

    #[test]
    fn test_rect_union() {
        let r1 = Rect::from_xywh(0.0, 0.0, 50.0, 50.0);
        let r2 = Rect::from_xywh(25.0, 25.0, 50.0, 50.0);
        let union = r1.union(&r2);
        assert_eq!(union.position.x, 0.0);
        assert_eq!(union.position.y, 0.0);
        assert_eq!(union.size.width, 75.0);
        assert_eq!(union.size.height, 75.0);
    }

    // RelationKind tests
    #[test]
    fn test_relation_kind_labels() {
        assert_eq!(RelationKind::OneToOne.label(), "1:1");
        assert_eq!(RelationKind::OneToMany.label(), "1:N");
        assert_eq!(RelationKind::ManyToOne.label(), "N:1");
    }

    #[test]
    fn test_relation_kind_crows_foot() {
        assert_eq!(RelationKind::OneToOne.crows_foot(), "||--||");
        assert_eq!(RelationKind::OneToMany.crows_foot(), "||--o{");
        assert_eq!(RelationKind::ManyToOne.crows_foot(), "||--o{");
    }

    #[test]
    fn test_relation_kind_from_label() {
        assert_eq!(
            RelationKind::from_label("1:N"),
            Some(RelationKind::OneToMany)
        );
        assert_eq!(RelationKind::from_label("2:3"), None);
    }

    // Face tests
    #[test]
    fn test_face_opposite() {
        assert_eq!(Face::Left.opposite(), Face::Right);
        assert_eq!(Face::Right.opposite(), Face::Left);
    }

    #[test]
    fn test_face_anchor() {
        let rect = Rect::from_xywh(100.0, 100.0, 200.0, 30.0);

        let left = Face::Left.anchor(&rect);
        assert_eq!(left.x, 100.0);
        assert_eq!(left.y, 115.0);

        let right = Face::Right.anchor(&rect);
        assert_eq!(right.x, 300.0);
        assert_eq!(right.y, 115.0);
    }

    #[test]
    fn test_face_outward_sign() {
        assert_eq!(Face::Right.outward_sign(), 1.0);
        assert_eq!(Face::Left.outward_sign(), -1.0);
    }
}
