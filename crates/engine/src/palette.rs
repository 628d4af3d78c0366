//! Batch import color palette
//!
//! Each import batch gets one header color drawn round-robin from a fixed
//! palette indexed by the session's incrementing batch counter, so
//! successive imports are visibly distinct until the palette wraps.

/// The fixed batch palette, 50 entries
pub const PALETTE: [&str; 50] = [
    // blues
    "#2563eb", "#1d4ed8", "#3b82f6", "#0ea5e9", "#0284c7",
    // indigos / violets
    "#6366f1", "#4f46e5", "#8b5cf6", "#7c3aed", "#a855f7",
    // pinks / roses
    "#d946ef", "#c026d3", "#ec4899", "#db2777", "#f43f5e",
    // reds / oranges
    "#e11d48", "#ef4444", "#dc2626", "#f97316", "#ea580c",
    // ambers / yellows
    "#f59e0b", "#d97706", "#eab308", "#ca8a04", "#facc15",
    // limes / greens
    "#84cc16", "#65a30d", "#22c55e", "#16a34a", "#15803d",
    // emeralds / teals
    "#10b981", "#059669", "#14b8a6", "#0d9488", "#0f766e",
    // cyans
    "#06b6d4", "#0891b2", "#155e75", "#38bdf8", "#7dd3fc",
    // slates / neutrals
    "#64748b", "#475569", "#334155", "#6b7280", "#4b5563",
    // deep accents
    "#1e40af", "#5b21b6", "#9f1239", "#9a3412", "#14532d",
];

/// Color for the `batch`-th import, cycling through the palette
pub fn batch_color(batch: u32) -> &'static str {
    PALETTE[batch as usize % PALETTE.len()]
}

// ============================================================================
// Tests
// ============================================================================
