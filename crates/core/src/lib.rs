//! # Ermine Core
//!
//! Core types, traits, and error handling for Ermine.
//!
//! This crate provides the foundational building blocks used throughout
//! the Ermine workspace, including:
//!
//! - **Types**: Geometric primitives (Position, Size, Rect), id aliases,
//!   relationship kinds, and node faces
//! - **Traits**: Common behaviors like `Validatable` and `Persistable`,
//!   plus the `NodeGeometryProvider` capability interface
//! - **Errors**: Unified error handling with `EditorError` and `EditorResult`
//!

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{EditorError, EditorResult};
pub use traits::{NodeGeometryProvider, Persistable, Validatable};
pub use types::{Face, GroupId, Position, Rect, RelationKind, RelationshipId, Size, TableId};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
