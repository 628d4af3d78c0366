//! Text import parsers
//!
//! Two parsers feed the entity store: a line-per-column list (`type name`
//! per line) producing a single table, and an entity-relationship
//! mini-language extracting entity blocks and crow's-foot relationship
//! lines via pattern matching. Both parse completely before anything is
//! committed, so a failed import never partially populates the store.

use ermine_core::{EditorError, EditorResult, RelationKind};
use ermine_model::Column;
use once_cell::sync::Lazy;
use regex::Regex;

// ============================================================================
// Patterns
// ============================================================================

/// Entity block: an identifier followed by a brace-delimited body. The
/// identifier must open its line so the `{` of a crow's-foot symbol can
/// never start a block.
static ENTITY_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*([A-Za-z_][A-Za-z0-9_]*)\s*\{([^}]*)\}").expect("entity block pattern")
});

/// Relationship line: `identifier symbol identifier`, the symbol built
/// from crow's-foot tokens joined by `--` or `..`
static RELATIONSHIP_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([A-Za-z_][A-Za-z0-9_]*)\s+([|o{}]+(?:--|\.\.)[|o{}]+)\s+([A-Za-z_][A-Za-z0-9_]*)")
        .expect("relationship pattern")
});

/// Line comment marker of the mini-language
const COMMENT_MARKER: &str = "%%";

/// Leading keyword marker of the mini-language
const KEYWORD: &str = "erDiagram";

// ============================================================================
// Parsed Output
// ============================================================================

/// One entity block extracted from the mini-language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEntity {
    pub name: String,
    pub columns: Vec<Column>,
}

/// One relationship line extracted from the mini-language; endpoints are
/// entity names, resolved against the parsed entities by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLink {
    pub from: String,
    pub to: String,
    pub kind: RelationKind,
}

/// Complete result of one mini-language parse invocation
#[derive(Debug, Clone, Default)]
pub struct ErImport {
    pub entities: Vec<ParsedEntity>,
    pub links: Vec<ParsedLink>,
}

// ============================================================================
// Column-List Parser
// ============================================================================

/// Parse a whitespace-delimited `type name` column list
///
/// Each non-empty line is split on whitespace; the first token is the
/// column type, the second the column name. Lines with fewer than two
/// tokens are silently skipped.
pub fn parse_column_lines(text: &str) -> Vec<Column> {
    text.lines().filter_map(parse_column_line).collect()
}

fn parse_column_line(line: &str) -> Option<Column> {
    let mut tokens = line.split_whitespace();
    let type_tag = tokens.next()?;
    let name = tokens.next()?;
    Some(Column::new(name, type_tag))
}

// ============================================================================
// Mini-Language Parser
// ============================================================================

/// Parse a subset of the entity-relationship mini-language
///
/// Strips the leading `erDiagram` keyword and `%%` line comments, then
/// matches entity blocks and, separately, relationship lines. A symbol
/// containing a crow's-foot brace token infers `1:N`, otherwise `1:1`.
/// Input with no entity blocks at all is a parse error; everything else
/// unrecognized is skipped.
pub fn parse_er_diagram(text: &str) -> EditorResult<ErImport> {
    let stripped = strip_comments(text);
    let body = stripped
        .trim_start()
        .strip_prefix(KEYWORD)
        .unwrap_or(&stripped);

    let entities: Vec<ParsedEntity> = ENTITY_BLOCK
        .captures_iter(body)
        .map(|caps| ParsedEntity {
            name: caps[1].to_string(),
            columns: parse_column_lines(&caps[2]),
        })
        .collect();

    if entities.is_empty() {
        return Err(EditorError::import_parse(
            "no entity definitions found in input",
        ));
    }

    // Relationship lines are matched against the input with entity bodies
    // removed, so a row inside a block can never read as a link
    let without_blocks = ENTITY_BLOCK.replace_all(body, " ");
    let links = RELATIONSHIP_LINE
        .captures_iter(&without_blocks)
        .map(|caps| ParsedLink {
            from: caps[1].to_string(),
            to: caps[3].to_string(),
            kind: link_kind(&caps[2]),
        })
        .collect();

    Ok(ErImport { entities, links })
}

fn strip_comments(text: &str) -> String {
    text.lines()
        .map(|line| match line.find(COMMENT_MARKER) {
            Some(index) => &line[..index],
            None => line,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn link_kind(symbol: &str) -> RelationKind {
    if symbol.contains('{') || symbol.contains('}') {
        RelationKind::OneToMany
    } else {
        RelationKind::OneToOne
    }
}

// ============================================================================
// Tests
// ============================================================================
