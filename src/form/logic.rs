//! Step transitions, validation, and the submission state machine.
//!
//! Everything here is synchronous and runs on the UI event loop. The
//! summarization call is split into `begin`/`finish` halves so the fetch
//! glue stays in `main.rs` and the machine itself is testable natively.

use crate::api::SummarizeRequest;
use crate::input::Key;
use crate::typeahead::{Backspace, Typeahead};

use super::state::{FormState, Step, StepKind, SubmitStatus, step_info};

/// `local@domain` shape: non-empty local part, domain with a dot that is
/// neither leading nor trailing.
pub fn is_valid_email(s: &str) -> bool {
    let mut parts = s.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let Some(domain) = parts.next() else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.split_once('.') {
        Some((host, rest)) => !host.is_empty() && !rest.is_empty() && !rest.ends_with('.'),
        None => false,
    }
}

/// 7–15 digits; spaces, dashes, parentheses and a leading `+` are tolerated
/// as separators but only digits count.
pub fn is_valid_phone(s: &str) -> bool {
    if !s.chars().all(|c| c.is_ascii_digit() || " -()+".contains(c)) {
        return false;
    }
    let digits = s.chars().filter(char::is_ascii_digit).count();
    (7..=15).contains(&digits)
}

/// Inline validation message for the current step, recomputed per keystroke.
/// Only email and phone carry validators; everything else is free-form.
pub fn validation_error(form: &FormState) -> Option<&'static str> {
    match form.step() {
        Step::Email if !is_valid_email(&form.draft.email) => {
            Some("Enter a valid email address (name@example.com)")
        }
        Step::Phone if !is_valid_phone(&form.draft.phone) => {
            Some("Phone number must contain 7-15 digits")
        }
        _ => None,
    }
}

/// Advance to the next step, or trigger submission on the last one.
///
/// Pending typeahead text is committed first so a half-typed tag is not
/// silently lost. Returns the summarize request when the terminal
/// transition fires; the caller runs the fetch and reports back through
/// [`finish_submit`].
pub fn next(form: &mut FormState) -> Option<SummarizeRequest> {
    if form.in_flight() {
        return None;
    }

    commit_pending(form);

    if validation_error(form).is_some() {
        return None;
    }

    if form.is_last_step() {
        form.submit = SubmitStatus::InFlight;
        return Some(SummarizeRequest {
            skills: form.draft.joined_skills(),
        });
    }

    form.cursor += 1;
    None
}

/// Retreat one step. Unconditional, even with invalid fields behind us.
pub fn prev(form: &mut FormState) {
    if form.cursor > 0 {
        form.cursor -= 1;
    }
}

/// Jump directly to step `index`.
///
/// Backward jumps always succeed. A forward jump is accepted only when every
/// required step from the cursor up to (excluding) the target already has a
/// non-empty primary value; otherwise a transient warning is raised and the
/// cursor stays put.
pub fn jump_to(form: &mut FormState, index: usize, now_ms: f64) -> bool {
    if index >= super::state::STEPS.len() {
        return false;
    }
    if index <= form.cursor {
        form.cursor = index;
        return true;
    }

    let incomplete = (form.cursor..index).any(|i| {
        let step = super::state::STEPS[i];
        match form.primary_value(step) {
            Some(value) => value.is_empty(),
            None => false, // optional step, never gates
        }
    });

    if incomplete {
        form.show_notice("Fill in the steps in between before skipping ahead", now_ms);
        return false;
    }

    form.cursor = index;
    true
}

/// Merge the summarization outcome back into the machine.
///
/// Success completes the terminal transition: the summary lands in the
/// draft and the finished record is exposed for hand-off. Failure keeps the
/// user on the last step with a retryable error.
pub fn finish_submit(form: &mut FormState, result: Result<String, String>) {
    match result {
        Ok(summary) => {
            form.draft.summary = Some(summary);
            form.submit = SubmitStatus::Idle;
            form.finished = Some(form.draft.clone());
        }
        Err(message) => {
            form.submit = SubmitStatus::Failed(message);
        }
    }
}

/// Per-frame upkeep: expire the transient notice and let the active
/// typeahead's debounce fire. Returns true when visible state changed.
pub fn tick(form: &mut FormState, now_ms: f64) -> bool {
    let mut changed = false;

    if form.notice_timer.poll(now_ms) {
        form.notice = None;
        changed = true;
    }

    let exclude = match form.step() {
        Step::Skills => form.draft.skills.clone(),
        Step::Languages => form
            .draft
            .languages
            .iter()
            .map(|l| l.name.clone())
            .collect(),
        _ => Vec::new(),
    };
    if let Some(field) = active_typeahead(form) {
        if field.tick(now_ms, &exclude) {
            changed = true;
        }
    }

    changed
}

/// Route a key press to the current step's field.
///
/// Returns the summarize request when the key triggered the terminal
/// transition (Enter or Tab on the last step).
pub fn handle_key(form: &mut FormState, key: Key, now_ms: f64) -> Option<SummarizeRequest> {
    // Global navigation first.
    match key {
        Key::Tab => return next(form),
        Key::BackTab => {
            prev(form);
            return None;
        }
        _ => {}
    }

    let step = form.step();
    match step_info(step).kind {
        StepKind::Text => handle_text_key(form, step, key),
        StepKind::Multiline => handle_multiline_key(form, step, key),
        StepKind::Tags => return handle_tags_key(form, step, key, now_ms),
        StepKind::Lookup => return handle_lookup_key(form, step, key, now_ms),
        StepKind::Proficiency => handle_proficiency_key(form, key),
    }
    None
}

fn text_field_mut(form: &mut FormState, step: Step) -> &mut String {
    match step {
        Step::FullName => &mut form.draft.full_name,
        Step::Email => &mut form.draft.email,
        Step::Phone => &mut form.draft.phone,
        Step::City => &mut form.draft.city,
        Step::Experience => &mut form.draft.experience,
        Step::Projects => &mut form.draft.projects,
        Step::Certifications => &mut form.draft.certifications,
        _ => unreachable!("step {step:?} has no plain text field"),
    }
}

fn handle_text_key(form: &mut FormState, step: Step, key: Key) {
    match key {
        Key::Char(c) => text_field_mut(form, step).push(c),
        Key::Backspace => {
            text_field_mut(form, step).pop();
        }
        Key::Enter => {
            let _ = next(form);
        }
        Key::Left if text_field_mut(form, step).is_empty() => prev(form),
        _ => {}
    }
}

fn handle_multiline_key(form: &mut FormState, step: Step, key: Key) {
    match key {
        Key::Char(c) => text_field_mut(form, step).push(c),
        // Enter inserts a line break here; advancing is Tab or the Next
        // button.
        Key::Enter => text_field_mut(form, step).push('\n'),
        Key::Backspace => {
            text_field_mut(form, step).pop();
        }
        Key::Left if text_field_mut(form, step).is_empty() => prev(form),
        _ => {}
    }
}

fn active_typeahead(form: &mut FormState) -> Option<&mut Typeahead> {
    match form.step() {
        Step::Country => Some(&mut form.country),
        Step::Skills => Some(&mut form.skills),
        Step::Languages => Some(&mut form.languages),
        Step::Program => Some(&mut form.program),
        Step::School => Some(&mut form.school),
        _ => None,
    }
}

/// Append a committed chip to the right collection. Duplicates are a silent
/// no-op (the field was already cleared by the commit).
fn add_chip(form: &mut FormState, step: Step, value: String) {
    match step {
        Step::Skills => {
            form.draft.add_skill(value);
        }
        Step::Languages => {
            form.draft.add_language(value);
        }
        _ => unreachable!("step {step:?} has no chip collection"),
    }
}

fn handle_tags_key(
    form: &mut FormState,
    step: Step,
    key: Key,
    now_ms: f64,
) -> Option<SummarizeRequest> {
    match key {
        Key::Char(c) => {
            if let Some(field) = active_typeahead(form) {
                field.type_char(c, now_ms);
            }
        }
        Key::Up => active_typeahead(form).map(Typeahead::move_up).unwrap_or(()),
        Key::Down => active_typeahead(form)
            .map(Typeahead::move_down)
            .unwrap_or(()),
        Key::Enter => {
            let committed = active_typeahead(form).and_then(Typeahead::commit);
            match committed {
                Some(value) => add_chip(form, step, value),
                // Nothing pending: Enter advances like any other step.
                None => return next(form),
            }
        }
        Key::Backspace => {
            let outcome = active_typeahead(form).map(|f| f.backspace(now_ms));
            if outcome == Some(Backspace::RemoveLastEntry) {
                match step {
                    Step::Skills => form.draft.remove_last_skill(),
                    Step::Languages => form.draft.remove_last_language(),
                    _ => {}
                }
            }
        }
        Key::Esc => active_typeahead(form).map(Typeahead::dismiss).unwrap_or(()),
        Key::Left => {
            let empty = active_typeahead(form).is_some_and(|f| f.input().is_empty());
            if empty {
                prev(form);
            }
        }
        _ => {}
    }
    None
}

fn lookup_field_mut(form: &mut FormState, step: Step) -> &mut String {
    match step {
        Step::Country => &mut form.draft.country,
        Step::Program => &mut form.draft.program,
        Step::School => &mut form.draft.school,
        _ => unreachable!("step {step:?} is not a lookup field"),
    }
}

fn handle_lookup_key(
    form: &mut FormState,
    step: Step,
    key: Key,
    now_ms: f64,
) -> Option<SummarizeRequest> {
    match key {
        Key::Char(c) => {
            if let Some(field) = active_typeahead(form) {
                field.type_char(c, now_ms);
                let text = field.input().to_string();
                *lookup_field_mut(form, step) = text;
            }
        }
        Key::Backspace => {
            if let Some(field) = active_typeahead(form) {
                field.backspace(now_ms);
                let text = field.input().to_string();
                *lookup_field_mut(form, step) = text;
            }
        }
        Key::Up => active_typeahead(form).map(Typeahead::move_up).unwrap_or(()),
        Key::Down => active_typeahead(form)
            .map(Typeahead::move_down)
            .unwrap_or(()),
        Key::Enter => {
            let committed = active_typeahead(form).and_then(Typeahead::commit);
            match committed {
                Some(value) => select_lookup(form, step, &value),
                None => return next(form),
            }
        }
        Key::Esc => active_typeahead(form).map(Typeahead::dismiss).unwrap_or(()),
        Key::Left => {
            let empty = active_typeahead(form).is_some_and(|f| f.input().is_empty());
            if empty {
                prev(form);
            }
        }
        _ => {}
    }
    None
}

/// Store a committed lookup value and keep it visible in the input.
pub(super) fn select_lookup(form: &mut FormState, step: Step, value: &str) {
    *lookup_field_mut(form, step) = value.to_string();
    if let Some(field) = active_typeahead(form) {
        field.set_text(value);
    }
}

fn handle_proficiency_key(form: &mut FormState, key: Key) {
    let count = form.draft.languages.len();
    if count == 0 {
        return;
    }
    form.prof_cursor = form.prof_cursor.min(count - 1);
    match key {
        Key::Up => {
            form.prof_cursor = if form.prof_cursor == 0 {
                count - 1
            } else {
                form.prof_cursor - 1
            };
        }
        Key::Down => {
            form.prof_cursor = (form.prof_cursor + 1) % count;
        }
        Key::Enter | Key::Right | Key::Left => {
            form.draft.cycle_proficiency(form.prof_cursor);
        }
        _ => {}
    }
}

/// Commit any half-typed typeahead text before a navigation transition.
fn commit_pending(form: &mut FormState) {
    let step = form.step();
    match step_info(step).kind {
        StepKind::Tags => {
            if let Some(value) = active_typeahead(form).and_then(Typeahead::commit) {
                add_chip(form, step, value);
            }
        }
        // Lookup text is already mirrored into the draft on every keystroke;
        // just drop the popup.
        StepKind::Lookup => {
            if let Some(field) = active_typeahead(form) {
                field.dismiss();
            }
        }
        _ => {}
    }
}
