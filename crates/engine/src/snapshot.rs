//! Static HTML snapshot export
//!
//! Renders the document into a single self-contained HTML file: node
//! cards at absolute coordinates, relationship curves precomputed from
//! stored geometry, and a minimal embedded pan/zoom viewer. Paths are
//! produced by the same face-selection and control-point math as the
//! live routing engine, so the snapshot reproduces the on-canvas
//! geometry exactly.

use crate::routing::route_between;
use ermine_core::{EditorError, EditorResult, Position};
use ermine_model::SchemaDocument;
use std::fmt::Write;
use tracing::debug;

/// Padding around the diagram's bounding box, in world units
pub const SNAPSHOT_PADDING: f32 = 50.0;

// ============================================================================
// Rendering
// ============================================================================

/// Render the document as a standalone HTML document
///
/// Fails with a user-input error when there is nothing to export.
pub fn to_html(document: &SchemaDocument) -> EditorResult<String> {
    let bounds = document
        .bounding_box()
        .ok_or_else(|| EditorError::validation("Nothing to export"))?;

    let shift = Position::new(
        SNAPSHOT_PADDING - bounds.left(),
        SNAPSHOT_PADDING - bounds.top(),
    );
    let width = bounds.size.width + SNAPSHOT_PADDING * 2.0;
    let height = bounds.size.height + SNAPSHOT_PADDING * 2.0;

    let mut paths = String::new();
    for rel in document.relationships() {
        let source = document
            .table(rel.from_table)
            .and_then(|t| t.column_row_bounds(&rel.from_column));
        let target = document
            .table(rel.to_table)
            .and_then(|t| t.column_row_bounds(&rel.to_column));

        let (mut source, mut target) = match (source, target) {
            (Some(s), Some(t)) => (s, t),
            _ => {
                debug!(relationship = %rel.id, "snapshot skipping unresolved relationship");
                continue;
            }
        };
        source.position = source.position + shift;
        target.position = target.position + shift;

        let path = route_between(source, target);
        let _ = writeln!(
            paths,
            r##"        <path d="{}" stroke="#2b2b2b" stroke-width="1.2" fill="none" marker-end="url(#arrow)" />"##,
            path.to_path_data()
        );
    }

    let mut nodes = String::new();
    for table in document.tables() {
        let pos = table.position + shift;
        let mut rows = String::new();
        for column in &table.columns {
            let _ = write!(
                rows,
                r#"<div class="row"><span>{}</span><span class="type">{}</span></div>"#,
                escape(&column.name),
                escape(&column.type_tag)
            );
        }
        let _ = writeln!(
            nodes,
            r#"        <div class="table" style="left: {}px; top: {}px;"><div class="header" style="background: {};">{}</div><div class="body">{}</div></div>"#,
            pos.x,
            pos.y,
            escape(&table.color),
            escape(&table.name),
            rows
        );
    }

    Ok(render_page(
        &document.meta.name,
        width,
        height,
        &paths,
        &nodes,
    ))
}

fn render_page(title: &str, width: f32, height: f32, paths: &str, nodes: &str) -> String {
    format!(
        r##"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
    body {{ margin: 0; padding: 0; background: #ffffff; font-family: system-ui, sans-serif; overflow: hidden; }}
    #viewer {{ position: relative; width: 100vw; height: 100vh; overflow: hidden; cursor: grab; }}
    #world {{ position: absolute; width: {width}px; height: {height}px; background-color: #f8f9fa; background-image: radial-gradient(#cbd5e1 1px, transparent 1px); background-size: 20px 20px; transform-origin: 0 0; }}
    svg {{ position: absolute; top: 0; left: 0; width: 100%; height: 100%; pointer-events: none; }}
    .table {{ position: absolute; width: 200px; background: white; border: 1px solid #cbd5e1; border-radius: 6px; box-shadow: 0 4px 6px -1px rgba(0,0,0,0.1); }}
    .header {{ color: white; padding: 8px 12px; font-size: 13px; font-weight: 600; border-radius: 6px 6px 0 0; }}
    .body {{ padding: 4px 0; }}
    .row {{ display: flex; justify-content: space-between; padding: 6px 12px; font-size: 12px; color: #1e293b; }}
    .type {{ color: #64748b; font-size: 11px; }}
</style>
</head>
<body>
    <div id="viewer">
    <div id="world">
        <svg><defs><marker id="arrow" markerWidth="12" markerHeight="12" refX="10" refY="6" orient="auto"><path d="M0,2 L10,6 L0,10" fill="none" stroke="#2b2b2b" stroke-width="1.2" /></marker></defs>
{paths}        </svg>
{nodes}    </div>
    </div>
<script>
(function () {{
    var view = {{ x: 0, y: 0, scale: 1 }};
    var viewer = document.getElementById('viewer');
    var world = document.getElementById('world');
    var dragging = false;
    var start = {{ x: 0, y: 0 }};
    function apply() {{
        world.style.transform = 'translate(' + view.x + 'px,' + view.y + 'px) scale(' + view.scale + ')';
    }}
    viewer.addEventListener('wheel', function (e) {{
        e.preventDefault();
        var delta = e.deltaY > 0 ? -0.05 : 0.05;
        var next = Math.min(Math.max(0.1, view.scale + delta), 4);
        var wx = (e.clientX - view.x) / view.scale;
        var wy = (e.clientY - view.y) / view.scale;
        view.scale = next;
        view.x = e.clientX - wx * next;
        view.y = e.clientY - wy * next;
        apply();
    }}, {{ passive: false }});
    viewer.addEventListener('mousedown', function (e) {{
        dragging = true;
        start = {{ x: e.clientX - view.x, y: e.clientY - view.y }};
        viewer.style.cursor = 'grabbing';
    }});
    window.addEventListener('mousemove', function (e) {{
        if (!dragging) return;
        view.x = e.clientX - start.x;
        view.y = e.clientY - start.y;
        apply();
    }});
    window.addEventListener('mouseup', function () {{
        dragging = false;
        viewer.style.cursor = 'grab';
    }});
    apply();
}})();
</script>
</body>
</html>
"##,
        title = escape(title),
        width = width,
        height = height,
        paths = paths,
        nodes = nodes
    )
}

/// Minimal HTML text escaping
fn escape(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            other => other.to_string(),
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{StoredGeometry, route_all};
    use crate::viewport::Viewport;
    use ermine_core::RelationKind;
    use ermine_model::{Column, Relationship, Table};

    fn sample() -> SchemaDocument {
        let mut doc = SchemaDocument::new("Blog Schema");
        let users = Table::new("users")
            .with_column(Column::new("id", "id"))
            .at(0.0, 0.0);
        let posts = Table::new("posts")
            .with_column(Column::new("user_id", "int"))
            .at(400.0, 120.0);
        let (users_id, posts_id) = (users.id, posts.id);
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
    fn test_empty_document_rejected() {
        let err = to_html(&SchemaDocument::new("empty")).unwrap_err();
        assert!(err.is_user_input());
    }

    #[test]
    fn test_snapshot_is_self_contained() {
        let html = to_html(&sample()).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Blog Schema</title>"));
        assert!(html.contains("users"));
        assert!(html.contains("posts"));
        assert!(html.contains("<path d=\"M "));
        assert!(html.contains("addEventListener('wheel'"));
        // No external resources
        assert!(!html.contains("http://"));
        assert!(!html.contains("https://"));
    }

    #[test]
    fn test_snapshot_paths_match_live_routing() {
        let doc = sample();
        let viewport = Viewport::new();
        let provider = StoredGeometry::new(&doc, viewport);
        let live = route_all(&doc, &provider, &viewport);

        // The snapshot shifts everything by padding minus the bounding
        // corner; face choice and curve shape are identical
        let html = to_html(&doc).unwrap();
        let path = &live[0].path;
        let dx = SNAPSHOT_PADDING - 0.0;
        let dy = SNAPSHOT_PADDING - 0.0;
        let expected = format!("M {},{}", path.start.x + dx, path.start.y + dy);
        assert!(html.contains(&expected), "snapshot missing {expected}");
    }

    #[test]
    fn test_snapshot_escapes_markup() {
        let mut doc = SchemaDocument::new("test");
        doc.insert_table(
            Table::new("<script>alert(1)</script>").with_column(Column::new("id", "id")),
        )
        .unwrap();

        let html = to_html(&doc).unwrap();
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_snapshot_applies_node_colors() {
        let mut doc = SchemaDocument::new("test");
        doc.insert_table(
            Table::new("users")
                .with_column(Column::new("id", "id"))
                .with_color("#16a34a"),
        )
        .unwrap();

        let html = to_html(&doc).unwrap();
        assert!(html.contains("background: #16a34a"));
    }
}
