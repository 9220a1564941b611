//! Resume builder rendering (read-only from state).

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::typeahead::Typeahead;
use crate::widgets::{ProgressDots, SuggestionList};

use super::actions::*;
use super::logic::validation_error;
use super::state::{
    step_info, FormState, Step, StepKind, SubmitStatus, PROFICIENCY_LEVELS, STEPS,
};

pub fn render(
    state: &FormState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let is_narrow = is_narrow_layout(area.width);
    let borders = if is_narrow {
        Borders::TOP | Borders::BOTTOM
    } else {
        Borders::ALL
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Progress dots
            Constraint::Min(10),   // Field
            Constraint::Length(2), // Status line
            Constraint::Length(3), // Footer buttons
        ])
        .split(area);

    let mut cs = click_state.borrow_mut();

    ProgressDots::new(state.cursor, STEPS.len(), DOT_BASE).render(f, chunks[0], &mut cs);

    match step_info(state.step()).kind {
        StepKind::Text => render_text_field(state, f, chunks[1], borders),
        StepKind::Multiline => render_multiline_field(state, f, chunks[1], borders),
        StepKind::Tags => render_tags_field(state, f, chunks[1], borders, &mut cs),
        StepKind::Lookup => render_lookup_field(state, f, chunks[1], borders, &mut cs),
        StepKind::Proficiency => render_proficiency_field(state, f, chunks[1], borders, &mut cs),
    }

    render_status(state, f, chunks[2]);
    render_footer(state, f, chunks[3], borders, &mut cs);
}

fn field_block(state: &FormState, borders: Borders) -> Block<'static> {
    let info = step_info(state.step());
    let title = format!(" {} ({}/{}) ", info.title, state.cursor + 1, STEPS.len());
    Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            title,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
}

/// The single-line input row: typed text with a block cursor, or the dimmed
/// hint while empty.
fn input_line(text: &str, hint: &str) -> Line<'static> {
    if text.is_empty() {
        Line::from(vec![
            Span::styled(" █ ", Style::default().fg(Color::White)),
            Span::styled(hint.to_string(), Style::default().fg(Color::DarkGray)),
        ])
    } else {
        Line::from(vec![
            Span::styled(
                format!(" {text}"),
                Style::default().fg(Color::White),
            ),
            Span::styled("█", Style::default().fg(Color::White)),
        ])
    }
}

// ── Plain text / multiline steps ───────────────────────────────

fn render_text_field(state: &FormState, f: &mut Frame, area: Rect, borders: Borders) {
    let step = state.step();
    let info = step_info(step);
    let value = match step {
        Step::FullName => &state.draft.full_name,
        Step::Email => &state.draft.email,
        Step::Phone => &state.draft.phone,
        Step::City => &state.draft.city,
        _ => return,
    };

    let lines = vec![Line::from(""), input_line(value, info.hint)];
    f.render_widget(
        Paragraph::new(lines).block(field_block(state, borders)),
        area,
    );
}

fn render_multiline_field(state: &FormState, f: &mut Frame, area: Rect, borders: Borders) {
    let step = state.step();
    let info = step_info(step);
    let value = match step {
        Step::Experience => &state.draft.experience,
        Step::Projects => &state.draft.projects,
        Step::Certifications => &state.draft.certifications,
        _ => return,
    };

    let mut lines: Vec<Line> = Vec::new();
    if value.is_empty() {
        lines.push(input_line("", info.hint));
    } else {
        let mut rows: Vec<&str> = value.split('\n').collect();
        let last = rows.pop().unwrap_or("");
        for row in rows {
            lines.push(Line::from(Span::styled(
                format!(" {row}"),
                Style::default().fg(Color::White),
            )));
        }
        lines.push(Line::from(vec![
            Span::styled(format!(" {last}"), Style::default().fg(Color::White)),
            Span::styled("█", Style::default().fg(Color::White)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Enter adds a line, Tab moves on",
        Style::default().fg(Color::DarkGray),
    )));

    f.render_widget(
        Paragraph::new(lines)
            .block(field_block(state, borders))
            .wrap(Wrap { trim: false }),
        area,
    );
}

// ── Typeahead steps ────────────────────────────────────────────

/// Hard cap on popup rows: row `i` registers `SUGGEST_BASE + i`, which must
/// stay below `CHIP_BASE` or a tap on it would dispatch as a chip removal.
const MAX_POPUP_ROWS: u16 = CHIP_BASE - SUGGEST_BASE;

/// Popup rows the current area can fit.
fn popup_height(field: &Typeahead, area: Rect) -> u16 {
    if field.suggestions().is_empty() {
        return 0;
    }
    let available = area.height.saturating_sub(4);
    let rows = (field.suggestions().len() as u16).min(MAX_POPUP_ROWS);
    (rows + 2).min(available)
}

fn render_suggestions(
    field: &Typeahead,
    f: &mut Frame,
    area: Rect,
    cs: &mut ClickState,
) {
    let height = popup_height(field, area);
    if height == 0 {
        return;
    }
    let popup = Rect::new(area.x + 1, area.y, area.width.saturating_sub(2), height);
    let rows = field
        .suggestions()
        .iter()
        .take(MAX_POPUP_ROWS as usize)
        .map(|e| e.label.to_string())
        .collect();
    SuggestionList::new(rows, field.highlight(), SUGGEST_BASE).render(f, popup, cs);
}

fn render_tags_field(
    state: &FormState,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    cs: &mut ClickState,
) {
    let step = state.step();
    let info = step_info(step);
    let (field, chips): (&Typeahead, Vec<String>) = match step {
        Step::Skills => (&state.skills, state.draft.skills.clone()),
        Step::Languages => (
            &state.languages,
            state
                .draft
                .languages
                .iter()
                .map(|l| l.name.clone())
                .collect(),
        ),
        _ => return,
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Chips + input
            Constraint::Min(0),    // Suggestion popup
        ])
        .split(area);

    let chip_row = chunks[0].y + 1;
    let mut chip_spans = vec![Span::raw(" ")];
    let mut x = chunks[0].x + 1;
    for (i, chip) in chips.iter().enumerate() {
        let label = format!("[{chip} ×]");
        let width = label.chars().count() as u16;
        let id = CHIP_BASE + i as u16;
        if id < PROF_BASE && x + width < chunks[0].x + chunks[0].width {
            cs.add_click_target(Rect::new(x, chip_row, width, 1), id);
        }
        x += width + 1;
        chip_spans.push(Span::styled(
            label,
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ));
        chip_spans.push(Span::raw(" "));
    }

    let lines = vec![
        Line::from(chip_spans),
        input_line(field.input(), info.hint),
    ];
    f.render_widget(
        Paragraph::new(lines).block(field_block(state, borders)),
        chunks[0],
    );

    render_suggestions(field, f, chunks[1], cs);
}

fn render_lookup_field(
    state: &FormState,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    cs: &mut ClickState,
) {
    let step = state.step();
    let info = step_info(step);
    let field = match step {
        Step::Country => &state.country,
        Step::Program => &state.program,
        Step::School => &state.school,
        _ => return,
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Input
            Constraint::Min(0),    // Suggestion popup
        ])
        .split(area);

    let lines = vec![input_line(field.input(), info.hint)];
    f.render_widget(
        Paragraph::new(lines).block(field_block(state, borders)),
        chunks[0],
    );

    render_suggestions(field, f, chunks[1], cs);
}

// ── Proficiency step ───────────────────────────────────────────

fn render_proficiency_field(
    state: &FormState,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    cs: &mut ClickState,
) {
    let mut lines = Vec::new();
    if state.draft.languages.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            " No languages yet. Go back and add some first.",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        for (i, lang) in state.draft.languages.iter().enumerate() {
            let selected = i == state.prof_cursor;
            let marker = if selected { " > " } else { "   " };
            let name_style = if selected {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let mut spans = vec![
                Span::styled(marker, Style::default().fg(Color::Cyan)),
                Span::styled(format!("{:<12}", lang.name), name_style),
            ];
            for level in PROFICIENCY_LEVELS {
                let style = if level == lang.proficiency {
                    Style::default().fg(Color::Black).bg(Color::Green)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                spans.push(Span::styled(format!(" {} ", level.label()), style));
            }
            lines.push(Line::from(spans));
            cs.add_row_target(area, area.y + 1 + i as u16, PROF_BASE + i as u16);
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            " Up/Down selects, Enter cycles the level",
            Style::default().fg(Color::DarkGray),
        )));
    }

    f.render_widget(
        Paragraph::new(lines).block(field_block(state, borders)),
        area,
    );
}

// ── Status + footer ────────────────────────────────────────────

fn render_status(state: &FormState, f: &mut Frame, area: Rect) {
    // One line wins: submit failure > in-flight > validation > notice.
    let line = if let SubmitStatus::Failed(msg) = &state.submit {
        Line::from(Span::styled(
            format!(" {msg} (press Submit to retry)"),
            Style::default().fg(Color::Red),
        ))
    } else if state.in_flight() {
        Line::from(Span::styled(
            " Summarizing your skills...",
            Style::default().fg(Color::Yellow),
        ))
    } else if let Some(error) = validation_error(state) {
        Line::from(Span::styled(
            format!(" {error}"),
            Style::default().fg(Color::Red),
        ))
    } else if let Some(notice) = &state.notice {
        Line::from(Span::styled(
            format!(" {notice}"),
            Style::default().fg(Color::Yellow),
        ))
    } else {
        Line::from("")
    };

    f.render_widget(Paragraph::new(vec![line]), area);
}

/// Footer label of the advance button for the current state.
pub fn next_label(state: &FormState) -> &'static str {
    if !state.is_last_step() {
        "Next"
    } else if matches!(state.submit, SubmitStatus::Failed(_)) {
        "Retry"
    } else {
        "Submit"
    }
}

fn render_footer(
    state: &FormState,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    cs: &mut ClickState,
) {
    let prev_label = " [Prev] ";
    let advance = format!(" [{}] ", next_label(state));

    let prev_style = if state.cursor == 0 {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    };
    let next_style = if state.in_flight() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    };

    let line = Line::from(vec![
        Span::styled(prev_label, prev_style),
        Span::raw("  "),
        Span::styled(advance.clone(), next_style),
    ]);

    let row = area.y + 1;
    let prev_width = prev_label.chars().count() as u16;
    cs.add_click_target(Rect::new(area.x + 1, row, prev_width, 1), PREV);
    cs.add_click_target(
        Rect::new(
            area.x + 1 + prev_width + 2,
            row,
            advance.chars().count() as u16,
            1,
        ),
        NEXT,
    );

    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::DarkGray));
    f.render_widget(Paragraph::new(vec![line]).block(block), area);
}
