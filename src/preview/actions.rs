//! Semantic action IDs for preview-screen click targets.

// ── Template tabs ────────────────────────────────────────────
pub const TAB_BASE: u16 = 1; // +template index 0..2

// ── Buttons ──────────────────────────────────────────────────
pub const BTN_EDIT: u16 = 10;
pub const BTN_SAVE: u16 = 11;
pub const BTN_EXPORT: u16 = 12;
