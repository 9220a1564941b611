//! Semantic action IDs for builder-screen click targets.

// ── Footer ───────────────────────────────────────────────────
pub const PREV: u16 = 1;
pub const NEXT: u16 = 2;

// ── Progress dots ────────────────────────────────────────────
pub const DOT_BASE: u16 = 10; // +index 0..12

// ── Typeahead popup / chips / proficiency rows ───────────────
// Each range must hold every index its widget can register: the
// suggestion window covers the longest reference list (50 programs).
pub const SUGGEST_BASE: u16 = 40; // +suggestion index
pub const CHIP_BASE: u16 = 100; // +chip index
pub const PROF_BASE: u16 = 160; // +language index
