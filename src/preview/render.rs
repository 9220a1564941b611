//! Preview rendering (read-only from state).

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::TemplateTabs;

use super::actions::*;
use super::logic::sections;
use super::state::{ExportStatus, PreviewState, SaveStatus, Template, TEMPLATES};

pub fn render(
    state: &PreviewState,
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
            Constraint::Length(1), // Template tabs
            Constraint::Min(10),   // Resume body
            Constraint::Length(2), // Status line
            Constraint::Length(3), // Buttons
        ])
        .split(area);

    let mut cs = click_state.borrow_mut();

    let labels: Vec<&str> = TEMPLATES.iter().map(|t| t.label()).collect();
    TemplateTabs::new(&labels, state.template.index(), TAB_BASE).render(f, chunks[0], &mut cs);

    render_resume(state, f, chunks[1], borders);
    render_status(state, f, chunks[2]);
    render_buttons(state, f, chunks[3], borders, &mut cs);
}

/// Heading decoration per template.
fn heading_line(template: Template, heading: &str, width: u16) -> Line<'static> {
    match template {
        Template::Modern => {
            let text = format!(" {} ", heading.to_uppercase());
            let fill = (width as usize).saturating_sub(text.chars().count() + 2);
            Line::from(vec![
                Span::styled("──", Style::default().fg(Color::Cyan)),
                Span::styled(
                    text,
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("─".repeat(fill), Style::default().fg(Color::Cyan)),
            ])
        }
        Template::Classic => Line::from(Span::styled(
            format!(" {heading}"),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )),
        Template::Minimal => Line::from(Span::styled(
            format!(" {heading}"),
            Style::default().fg(Color::Gray),
        )),
    }
}

fn render_resume(state: &PreviewState, f: &mut Frame, area: Rect, borders: Borders) {
    let mut lines: Vec<Line> = Vec::new();

    // Name banner.
    let name = if state.draft.full_name.is_empty() {
        "Unnamed"
    } else {
        &state.draft.full_name
    };
    let name_style = match state.template {
        Template::Modern => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        Template::Classic => Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
        Template::Minimal => Style::default().fg(Color::White),
    };
    lines.push(Line::from(Span::styled(format!(" {name}"), name_style)));
    lines.push(Line::from(""));

    let inner_width = area.width.saturating_sub(2);
    for section in sections(&state.draft) {
        lines.push(heading_line(state.template, section.heading, inner_width));
        for row in &section.rows {
            lines.push(Line::from(Span::styled(
                format!("   {row}"),
                Style::default().fg(Color::White),
            )));
        }
        lines.push(Line::from(""));
    }

    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            " Resume Preview ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn render_status(state: &PreviewState, f: &mut Frame, area: Rect) {
    let line = match (&state.save, &state.export) {
        (SaveStatus::InFlight, _) => Line::from(Span::styled(
            " Saving...",
            Style::default().fg(Color::Yellow),
        )),
        (_, ExportStatus::Verifying) => Line::from(Span::styled(
            " Checking payment...",
            Style::default().fg(Color::Yellow),
        )),
        (_, ExportStatus::Unlocked) => Line::from(Span::styled(
            " Payment confirmed. Your PDF download is ready.",
            Style::default().fg(Color::Green),
        )),
        (_, ExportStatus::Failed(msg)) => Line::from(Span::styled(
            format!(" {msg}"),
            Style::default().fg(Color::Red),
        )),
        (SaveStatus::Failed(msg), _) => Line::from(Span::styled(
            format!(" {msg}"),
            Style::default().fg(Color::Red),
        )),
        (SaveStatus::Saved(_), _) => Line::from(Span::styled(
            " Resume saved.",
            Style::default().fg(Color::Green),
        )),
        _ => match &state.notice {
            Some(notice) => Line::from(Span::styled(
                format!(" {notice}"),
                Style::default().fg(Color::Yellow),
            )),
            None => Line::from(""),
        },
    };
    f.render_widget(Paragraph::new(vec![line]), area);
}

/// Label of the export button for the current gate state.
pub fn export_label(state: &PreviewState) -> &'static str {
    match state.export {
        ExportStatus::Locked | ExportStatus::Failed(_) => "Export PDF 🔒",
        ExportStatus::Verifying => "Checking...",
        ExportStatus::Unlocked => "Download PDF",
    }
}

fn render_buttons(
    state: &PreviewState,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    cs: &mut ClickState,
) {
    let buttons = [
        ("Edit", BTN_EDIT, Color::Yellow),
        ("Save", BTN_SAVE, Color::Yellow),
        (export_label(state), BTN_EXPORT, Color::Green),
    ];

    let mut spans = Vec::new();
    let mut x = area.x + 1;
    let row = area.y + 1;
    for (i, (label, action, color)) in buttons.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
            x += 2;
        }
        let text = format!(" [{label}] ");
        let width = text.chars().count() as u16;
        cs.add_click_target(Rect::new(x, row, width, 1), *action);
        x += width;
        spans.push(Span::styled(
            text,
            Style::default().fg(*color).add_modifier(Modifier::BOLD),
        ));
    }

    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::DarkGray));
    f.render_widget(Paragraph::new(vec![Line::from(spans)]).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::state::ResumeDraft;

    #[test]
    fn export_label_tracks_gate_state() {
        let mut state = PreviewState::new(ResumeDraft::default());
        assert_eq!(export_label(&state), "Export PDF 🔒");
        state.export = ExportStatus::Verifying;
        assert_eq!(export_label(&state), "Checking...");
        state.export = ExportStatus::Unlocked;
        assert_eq!(export_label(&state), "Download PDF");
        state.export = ExportStatus::Failed("nope".into());
        assert_eq!(export_label(&state), "Export PDF 🔒");
    }

    #[test]
    fn modern_heading_fills_width() {
        let line = heading_line(Template::Modern, "Skills", 30);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.starts_with("── SKILLS "));
        assert_eq!(text.chars().count(), 30);
    }

    #[test]
    fn minimal_heading_is_undecorated() {
        let line = heading_line(Template::Minimal, "Skills", 30);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, " Skills");
    }
}
