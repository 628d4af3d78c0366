//! # Ermine Engine
//!
//! The diagram engine for Ermine: everything between the schema model
//! and the rendering surface.
//!
//! ## Components
//!
//! - **Viewport**: pan/zoom state and the world/screen affine transform
//! - **Routing**: face-to-face bezier paths for every relationship,
//!   computed from a `NodeGeometryProvider`
//! - **Drag**: single-node and group-node interactive repositioning
//! - **Layout**: smart placement of new tables and batch grid packing
//! - **Import**: the column-list and entity-relationship text parsers
//! - **Export**: diagram-language text and standalone HTML snapshots
//! - **Session**: the context object owning document, history, viewport,
//!   and drag state for one open editor
//!

pub mod drag;
pub mod export;
pub mod import;
pub mod layout;
pub mod palette;
pub mod routing;
pub mod session;
pub mod snapshot;
pub mod viewport;

// Re-export commonly used types at crate root
pub use drag::{DragController, DragMode};
pub use export::to_er_diagram;
pub use import::{ErImport, ParsedEntity, ParsedLink, parse_column_lines, parse_er_diagram};
pub use layout::{grid_position, shift_to_origin, smart_coordinates};
pub use palette::{PALETTE, batch_color};
pub use routing::{
    EdgePath, RoutedEdge, StoredGeometry, choose_faces, relationship_at, route_all,
    route_between, route_relationship,
};
pub use session::{EditorSession, ImportReport};
pub use snapshot::to_html;
pub use viewport::{MAX_SCALE, MIN_SCALE, SCALE_STEP, Viewport};

// Re-export core types that are commonly used with the engine
pub use ermine_core::{
    EditorError, EditorResult, Face, NodeGeometryProvider, Position, Rect, RelationKind,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
