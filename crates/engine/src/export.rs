//! Diagram-language export
//!
//! Emits the document as entity-relationship mini-language text: one
//! entity block per table listing `type name` per column, then one
//! crow's-foot line per relationship. Names are sanitized to an
//! identifier-safe charset so the output parses back.

use ermine_core::RelationKind;
use ermine_model::SchemaDocument;
use std::fmt::Write;
use tracing::debug;

// ============================================================================
// Identifier Sanitization
// ============================================================================

/// Replace everything outside `[A-Za-z0-9_]` with underscores and keep
/// the first character alphabetic
pub fn sanitize_identifier(name: &str) -> String {
    let mut out: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    if out.is_empty() {
        out.push('_');
    }
    if out.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

// ============================================================================
// Export
// ============================================================================

/// Render the document as mini-language text
pub fn to_er_diagram(document: &SchemaDocument) -> String {
    let mut out = String::from("erDiagram\n");

    for table in document.tables() {
        let name = sanitize_identifier(&table.name);
        let _ = writeln!(out, "    {name} {{");
        for column in &table.columns {
            let _ = writeln!(
                out,
                "        {} {}",
                sanitize_identifier(&column.type_tag),
                sanitize_identifier(&column.name)
            );
        }
        let _ = writeln!(out, "    }}");
    }

    for rel in document.relationships() {
        let (from, to) = match (document.table(rel.from_table), document.table(rel.to_table)) {
            (Some(f), Some(t)) => (f, t),
            _ => {
                debug!(relationship = %rel.id, "skipping relationship with missing endpoint table");
                continue;
            }
        };

        // The crow's foot always lands on the many side, so a many-to-one
        // link is written with its endpoints reversed
        let (first, second) = match rel.kind {
            RelationKind::ManyToOne => (to, from),
            _ => (from, to),
        };

        let _ = writeln!(
            out,
            "    {} {} {}",
            sanitize_identifier(&first.name),
            rel.kind.crows_foot(),
            sanitize_identifier(&second.name)
        );
    }

    out
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::parse_er_diagram;
    use ermine_model::{Column, Relationship, Table};

    fn sample() -> SchemaDocument {
        let mut doc = SchemaDocument::new("test");
        let users = Table::new("users")
            .with_column(Column::new("id", "id"))
            .with_column(Column::new("name", "string"));
        let posts = Table::new("posts").with_column(Column::new("user_id", "int"));
        let users_id = users.id;
        let posts_id = posts.id;
        doc.insert_table(users).unwrap();
        doc.insert_table(posts).unwrap();
        doc.insert_relationship(Relationship::new(
            users_id,
            "id",
            posts_id,
            "user_id",
            RelationKind::OneToMany,
        ))
        .unwrap();
        doc
    }

    #[test]
    fn test_sanitize_identifier() {
        assert_eq!(sanitize_identifier("users"), "users");
        assert_eq!(sanitize_identifier("user table"), "user_table");
        assert_eq!(sanitize_identifier("2fa_codes"), "_2fa_codes");
        assert_eq!(sanitize_identifier("naïve!"), "na_ve_");
        assert_eq!(sanitize_identifier(""), "_");
    }

    #[test]
    fn test_export_shape() {
        let text = to_er_diagram(&sample());

        assert!(text.starts_with("erDiagram\n"));
        assert!(text.contains("users {"));
        assert!(text.contains("id id"));
        assert!(text.contains("string name"));
        assert!(text.contains("posts {"));
        assert!(text.contains("users ||--o{ posts"));
    }

    #[test]
    fn test_export_one_to_one_symbol() {
        let mut doc = SchemaDocument::new("test");
        let a = Table::new("a").with_column(Column::new("id", "id"));
        let b = Table::new("b").with_column(Column::new("id", "id"));
        let (a_id, b_id) = (a.id, b.id);
        doc.insert_table(a).unwrap();
        doc.insert_table(b).unwrap();
        doc.insert_relationship(Relationship::new(a_id, "id", b_id, "id", RelationKind::OneToOne))
            .unwrap();

        assert!(to_er_diagram(&doc).contains("a ||--|| b"));
    }

    #[test]
    fn test_export_many_to_one_reverses_endpoints() {
        let mut doc = SchemaDocument::new("test");
        let posts = Table::new("posts").with_column(Column::new("user_id", "int"));
        let users = Table::new("users").with_column(Column::new("id", "id"));
        let (posts_id, users_id) = (posts.id, users.id);
        doc.insert_table(posts).unwrap();
        doc.insert_table(users).unwrap();
        doc.insert_relationship(Relationship::new(
            posts_id,
            "user_id",
            users_id,
            "id",
            RelationKind::ManyToOne,
        ))
        .unwrap();

        // The one side comes first so the foot sits on the many side
        assert!(to_er_diagram(&doc).contains("users ||--o{ posts"));
    }

    #[test]
    fn test_export_round_trips_through_parser() {
        let text = to_er_diagram(&sample());
        let parsed = parse_er_diagram(&text).unwrap();

        assert_eq!(parsed.entities.len(), 2);
        assert_eq!(parsed.links.len(), 1);
        assert_eq!(parsed.links[0].kind, RelationKind::OneToMany);
    }
}
