//! Reusable clickable UI components for the builder and preview screens.
//!
//! Each component co-locates rendering and click-target registration so a
//! tap always matches what was drawn:
//!
//! - [`ProgressDots`] — one dot per step, clickable for direct jumps.
//! - [`SuggestionList`] — typeahead dropdown with a keyboard highlight.
//! - [`TemplateTabs`] — template selector on the preview screen.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

// ── ProgressDots ───────────────────────────────────────────────

/// Step progress dots: filled for completed steps, bright for the current
/// one. Every dot is a click target for `jump_to`.
pub struct ProgressDots {
    current: usize,
    total: usize,
    /// Action ID of dot 0; dot `i` registers `base + i`.
    base_action: u16,
}

/// Columns each dot occupies ("● " / "○ ").
const DOT_WIDTH: u16 = 2;

impl ProgressDots {
    pub fn new(current: usize, total: usize, base_action: u16) -> Self {
        Self {
            current,
            total,
            base_action,
        }
    }

    fn line(&self) -> Line<'static> {
        let mut spans = Vec::with_capacity(self.total);
        for i in 0..self.total {
            let (symbol, style) = if i == self.current {
                ("● ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            } else if i < self.current {
                ("● ", Style::default().fg(Color::Green))
            } else {
                ("○ ", Style::default().fg(Color::DarkGray))
            };
            spans.push(Span::styled(symbol, style));
        }
        Line::from(spans)
    }

    /// Render the dots at the top-left of `area` and register one click
    /// target per dot.
    pub fn render(&self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        f.render_widget(Paragraph::new(self.line()), area);
        for i in 0..self.total {
            let x = area.x + i as u16 * DOT_WIDTH;
            if x + DOT_WIDTH > area.x + area.width {
                break;
            }
            cs.add_click_target(
                Rect::new(x, area.y, DOT_WIDTH, 1),
                self.base_action + i as u16,
            );
        }
    }
}

// ── SuggestionList ─────────────────────────────────────────────

/// The typeahead dropdown: suggestion rows under the input, with the
/// keyboard-highlighted row inverted and every row clickable.
pub struct SuggestionList {
    rows: Vec<String>,
    highlight: Option<usize>,
    /// Action ID of row 0; row `i` registers `base + i`.
    base_action: u16,
}

impl SuggestionList {
    pub fn new(rows: Vec<String>, highlight: Option<usize>, base_action: u16) -> Self {
        Self {
            rows,
            highlight,
            base_action,
        }
    }

    fn lines(&self) -> Vec<Line<'_>> {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let style = if self.highlight == Some(i) {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                Line::from(Span::styled(format!(" {row}"), style))
            })
            .collect()
    }

    /// Render inside a bordered block and register per-row click targets,
    /// clipped to the visible content rows.
    pub fn render(&self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner_height = area.height.saturating_sub(2) as usize;

        f.render_widget(Paragraph::new(self.lines()).block(block), area);

        for i in 0..self.rows.len().min(inner_height) {
            cs.add_row_target(area, area.y + 1 + i as u16, self.base_action + i as u16);
        }
    }

    /// Rows that fit a given area height (border rows excluded).
    pub fn visible_rows(area_height: u16) -> usize {
        area_height.saturating_sub(2) as usize
    }
}

// ── TemplateTabs ───────────────────────────────────────────────

/// Horizontal tab selector for the preview templates.
///
/// Labels are padded to `" {label} "`; tab `i` registers `base + i` over
/// its padded label (separators stay dead space).
pub struct TemplateTabs<'a> {
    labels: &'a [&'a str],
    selected: usize,
    base_action: u16,
}

const TAB_SEPARATOR: &str = "│";

impl<'a> TemplateTabs<'a> {
    pub fn new(labels: &'a [&'a str], selected: usize, base_action: u16) -> Self {
        Self {
            labels,
            selected,
            base_action,
        }
    }

    fn line(&self) -> Line<'_> {
        let mut spans = Vec::new();
        for (i, label) in self.labels.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(
                    TAB_SEPARATOR,
                    Style::default().fg(Color::DarkGray),
                ));
            }
            let style = if i == self.selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(format!(" {label} "), style));
        }
        Line::from(spans)
    }

    pub fn render(&self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        f.render_widget(Paragraph::new(self.line()), area);

        let mut x = area.x;
        for (i, label) in self.labels.iter().enumerate() {
            if i > 0 {
                x += TAB_SEPARATOR.chars().count() as u16;
            }
            let width = label.chars().count() as u16 + 2;
            if x + width > area.x + area.width {
                break;
            }
            cs.add_click_target(
                Rect::new(x, area.y, width, area.height.max(1)),
                self.base_action + i as u16,
            );
            x += width;
        }
    }
}
