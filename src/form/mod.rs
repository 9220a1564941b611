//! The multi-step resume builder screen.

pub mod actions;
pub mod logic;
pub mod render;
pub mod save;
pub mod state;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::api::SummarizeRequest;
use crate::input::{ClickState, InputEvent};

use actions::*;
use state::{step_info, FormState, ResumeDraft, Step, StepKind, STEPS};

pub struct FormScreen {
    pub state: FormState,
}

impl FormScreen {
    pub fn new() -> Self {
        Self {
            state: FormState::new(),
        }
    }

    /// Resume editing a previously persisted draft.
    pub fn from_draft(draft: ResumeDraft) -> Self {
        Self {
            state: FormState::from_draft(draft),
        }
    }

    /// Route an input event. Returns the summarize request when the event
    /// triggered the terminal transition; the caller owns the fetch and
    /// reports back through [`logic::finish_submit`].
    pub fn handle_input(&mut self, event: &InputEvent, now_ms: f64) -> Option<SummarizeRequest> {
        match event {
            InputEvent::Key(key) => logic::handle_key(&mut self.state, *key, now_ms),
            InputEvent::Click(id) => self.handle_click(*id, now_ms),
        }
    }

    fn handle_click(&mut self, action_id: u16, now_ms: f64) -> Option<SummarizeRequest> {
        let step = self.state.step();
        match action_id {
            PREV => logic::prev(&mut self.state),
            NEXT => return logic::next(&mut self.state),
            id if (DOT_BASE..DOT_BASE + STEPS.len() as u16).contains(&id) => {
                logic::jump_to(&mut self.state, (id - DOT_BASE) as usize, now_ms);
            }
            id if (SUGGEST_BASE..CHIP_BASE).contains(&id) => {
                self.click_suggestion(step, (id - SUGGEST_BASE) as usize);
            }
            id if (CHIP_BASE..PROF_BASE).contains(&id) => {
                let index = (id - CHIP_BASE) as usize;
                match step {
                    Step::Skills => self.state.draft.remove_skill(index),
                    Step::Languages => self.state.draft.remove_language(index),
                    _ => {}
                }
            }
            id if id >= PROF_BASE && step == Step::Proficiency => {
                let index = (id - PROF_BASE) as usize;
                if index < self.state.draft.languages.len() {
                    self.state.prof_cursor = index;
                    self.state.draft.cycle_proficiency(index);
                }
            }
            _ => {}
        }
        None
    }

    /// A tap on a popup row commits that suggestion, same as highlighting it
    /// and pressing Enter.
    fn click_suggestion(&mut self, step: Step, index: usize) {
        let field = match step {
            Step::Country => &mut self.state.country,
            Step::Skills => &mut self.state.skills,
            Step::Languages => &mut self.state.languages,
            Step::Program => &mut self.state.program,
            Step::School => &mut self.state.school,
            _ => return,
        };
        let Some(value) = field.select(index) else {
            return;
        };
        match step_info(step).kind {
            StepKind::Tags => match step {
                Step::Skills => {
                    self.state.draft.add_skill(value);
                }
                Step::Languages => {
                    self.state.draft.add_language(value);
                }
                _ => {}
            },
            StepKind::Lookup => logic::select_lookup(&mut self.state, step, &value),
            _ => {}
        }
    }

    /// Per-frame upkeep. Returns true when visible state changed.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        logic::tick(&mut self.state, now_ms)
    }

    pub fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(&self.state, f, area, click_state);
    }
}

impl Default for FormScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;
    use crate::typeahead::DEBOUNCE_MS;

    fn type_text(screen: &mut FormScreen, text: &str) {
        for c in text.chars() {
            screen.handle_input(&InputEvent::Key(Key::Char(c)), 0.0);
        }
    }

    fn goto(screen: &mut FormScreen, step: Step) {
        screen.state.cursor = STEPS.iter().position(|&s| s == step).unwrap();
    }

    /// Type into the active typeahead and let the debounce settle.
    fn settle(screen: &mut FormScreen, text: &str) {
        let mut now = 0.0;
        for c in text.chars() {
            screen.handle_input(&InputEvent::Key(Key::Char(c)), now);
            now += 50.0;
        }
        screen.tick(now + DEBOUNCE_MS);
    }

    #[test]
    fn click_footer_buttons_navigate() {
        let mut screen = FormScreen::new();
        assert!(screen
            .handle_input(&InputEvent::Click(NEXT), 0.0)
            .is_none());
        assert_eq!(screen.state.cursor, 1);
        screen.handle_input(&InputEvent::Click(PREV), 0.0);
        assert_eq!(screen.state.cursor, 0);
    }

    #[test]
    fn click_dot_jumps_backward() {
        let mut screen = FormScreen::new();
        screen.state.cursor = 4;
        screen.handle_input(&InputEvent::Click(DOT_BASE + 1), 0.0);
        assert_eq!(screen.state.cursor, 1);
    }

    #[test]
    fn click_dot_forward_blocked_by_empty_required_step() {
        let mut screen = FormScreen::new();
        screen.handle_input(&InputEvent::Click(DOT_BASE + 3), 0.0);
        assert_eq!(screen.state.cursor, 0);
        assert!(screen.state.notice.is_some());
    }

    #[test]
    fn click_suggestion_adds_skill_chip() {
        let mut screen = FormScreen::new();
        goto(&mut screen, Step::Skills);
        settle(&mut screen, "py");
        assert!(!screen.state.skills.suggestions().is_empty());

        screen.handle_input(&InputEvent::Click(SUGGEST_BASE), 0.0);
        assert_eq!(screen.state.draft.skills, vec!["Python"]);
        assert_eq!(screen.state.skills.input(), "");
    }

    #[test]
    fn click_suggestion_fills_lookup_field() {
        let mut screen = FormScreen::new();
        goto(&mut screen, Step::Country);
        settle(&mut screen, "gh");
        let first = screen.state.country.suggestions()[0].label.to_string();

        screen.handle_input(&InputEvent::Click(SUGGEST_BASE), 0.0);
        assert_eq!(screen.state.draft.country, first);
        assert_eq!(screen.state.country.input(), first);
    }

    #[test]
    fn suggestion_id_window_covers_every_reference_list() {
        use crate::suggest::{COUNTRIES, LANGUAGES, PROGRAMS, SKILLS, UNIVERSITIES};
        for list in [SKILLS, LANGUAGES, COUNTRIES, PROGRAMS, UNIVERSITIES] {
            assert!(list.len() as u16 <= CHIP_BASE - SUGGEST_BASE);
        }
    }

    #[test]
    fn click_high_suggestion_row_selects_instead_of_removing_a_chip() {
        let mut screen = FormScreen::new();
        goto(&mut screen, Step::Program);
        settle(&mut screen, "b");
        assert!(screen.state.program.suggestions().len() > 30);

        // Row 30's ID must still fall inside the suggestion window.
        screen.handle_input(&InputEvent::Click(SUGGEST_BASE + 30), 0.0);
        assert_eq!(screen.state.draft.program, "BSc Public Health");
    }

    #[test]
    fn click_out_of_range_suggestion_is_noop() {
        let mut screen = FormScreen::new();
        goto(&mut screen, Step::Skills);
        settle(&mut screen, "py");
        screen.handle_input(&InputEvent::Click(SUGGEST_BASE + 25), 0.0);
        assert!(screen.state.draft.skills.is_empty());
    }

    #[test]
    fn click_chip_removes_that_entry() {
        let mut screen = FormScreen::new();
        goto(&mut screen, Step::Skills);
        for skill in ["Python", "Go", "Rust"] {
            type_text(&mut screen, skill);
            screen.handle_input(&InputEvent::Key(Key::Enter), 0.0);
        }
        screen.handle_input(&InputEvent::Click(CHIP_BASE + 1), 0.0);
        assert_eq!(screen.state.draft.skills, vec!["Python", "Rust"]);
    }

    #[test]
    fn click_proficiency_row_selects_and_cycles() {
        let mut screen = FormScreen::new();
        screen.state.draft.add_language("English".into());
        screen.state.draft.add_language("French".into());
        goto(&mut screen, Step::Proficiency);

        screen.handle_input(&InputEvent::Click(PROF_BASE + 1), 0.0);
        assert_eq!(screen.state.prof_cursor, 1);
        assert_eq!(
            screen.state.draft.languages[1].proficiency,
            state::Proficiency::Intermediate
        );
        assert_eq!(
            screen.state.draft.languages[0].proficiency,
            state::Proficiency::Fluent
        );
    }

    #[test]
    fn click_next_on_last_step_emits_request() {
        let mut screen = FormScreen::new();
        screen.state.draft.add_skill("Go".into());
        goto(&mut screen, Step::Certifications);
        let request = screen
            .handle_input(&InputEvent::Click(NEXT), 0.0)
            .expect("terminal transition");
        assert_eq!(request.skills, "Go");
        assert!(screen.state.in_flight());
    }

    #[test]
    fn unknown_action_id_ignored() {
        let mut screen = FormScreen::new();
        screen.handle_input(&InputEvent::Click(9999), 0.0);
        assert_eq!(screen.state.cursor, 0);
    }
}
