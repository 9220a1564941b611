//! The templated resume preview with save and payment-gated export.

pub mod actions;
pub mod logic;
pub mod render;
pub mod state;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::api::VerifyPaymentRequest;
use crate::form::state::ResumeDraft;
use crate::input::{ClickState, InputEvent, Key};

use actions::*;
use state::{PreviewState, TEMPLATES};

/// What an input event asked the app shell to do.
#[derive(Debug, PartialEq)]
pub enum PreviewRequest {
    /// Go back to the builder with the current draft.
    Edit,
    /// Send the resume to the backend.
    Save,
    /// Verify the payment reference before unlocking export.
    VerifyPayment(VerifyPaymentRequest),
}

pub struct PreviewScreen {
    pub state: PreviewState,
}

impl PreviewScreen {
    pub fn new(draft: ResumeDraft) -> Self {
        Self {
            state: PreviewState::new(draft),
        }
    }

    pub fn handle_input(&mut self, event: &InputEvent) -> Option<PreviewRequest> {
        match event {
            InputEvent::Key(key) => self.handle_key(*key),
            InputEvent::Click(id) => self.handle_click(*id),
        }
    }

    fn handle_key(&mut self, key: Key) -> Option<PreviewRequest> {
        match key {
            Key::Left => {
                self.state.template = self.state.template.prev();
                None
            }
            Key::Right | Key::Tab => {
                self.state.template = self.state.template.next();
                None
            }
            Key::Char(c @ '1'..='3') => {
                let index = c as usize - '1' as usize;
                self.state.template = TEMPLATES[index];
                None
            }
            Key::Char('e') | Key::Esc => Some(PreviewRequest::Edit),
            Key::Char('s') => self.begin_save(),
            Key::Char('x') => self.begin_export(),
            _ => None,
        }
    }

    fn handle_click(&mut self, action_id: u16) -> Option<PreviewRequest> {
        match action_id {
            id if (TAB_BASE..TAB_BASE + TEMPLATES.len() as u16).contains(&id) => {
                self.state.template = TEMPLATES[(id - TAB_BASE) as usize];
                None
            }
            BTN_EDIT => Some(PreviewRequest::Edit),
            BTN_SAVE => self.begin_save(),
            BTN_EXPORT => self.begin_export(),
            _ => None,
        }
    }

    fn begin_save(&mut self) -> Option<PreviewRequest> {
        logic::begin_save(&mut self.state).then_some(PreviewRequest::Save)
    }

    fn begin_export(&mut self) -> Option<PreviewRequest> {
        logic::begin_export(&mut self.state).map(PreviewRequest::VerifyPayment)
    }

    pub fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(&self.state, f, area, click_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::state::{ExportStatus, SaveStatus, Template};
    use crate::api::SaveResumeResponse;

    fn screen() -> PreviewScreen {
        let mut draft = ResumeDraft::default();
        draft.full_name = "Ama Mensah".into();
        draft.add_skill("Go".into());
        PreviewScreen::new(draft)
    }

    #[test]
    fn tab_clicks_switch_templates() {
        let mut s = screen();
        s.handle_input(&InputEvent::Click(TAB_BASE + 2));
        assert_eq!(s.state.template, Template::Minimal);
        s.handle_input(&InputEvent::Click(TAB_BASE + 1));
        assert_eq!(s.state.template, Template::Classic);
    }

    #[test]
    fn number_keys_and_arrows_switch_templates() {
        let mut s = screen();
        s.handle_input(&InputEvent::Key(Key::Char('3')));
        assert_eq!(s.state.template, Template::Minimal);
        s.handle_input(&InputEvent::Key(Key::Right));
        assert_eq!(s.state.template, Template::Modern);
        s.handle_input(&InputEvent::Key(Key::Left));
        assert_eq!(s.state.template, Template::Minimal);
    }

    #[test]
    fn edit_button_requests_return_to_builder() {
        let mut s = screen();
        assert_eq!(
            s.handle_input(&InputEvent::Click(BTN_EDIT)),
            Some(PreviewRequest::Edit)
        );
        assert_eq!(
            s.handle_input(&InputEvent::Key(Key::Esc)),
            Some(PreviewRequest::Edit)
        );
    }

    #[test]
    fn save_button_emits_one_request_at_a_time() {
        let mut s = screen();
        assert_eq!(
            s.handle_input(&InputEvent::Click(BTN_SAVE)),
            Some(PreviewRequest::Save)
        );
        assert_eq!(s.handle_input(&InputEvent::Click(BTN_SAVE)), None);
        logic::finish_save(&mut s.state, Ok(SaveResumeResponse { id: "r1".into() }));
        assert_eq!(s.state.save, SaveStatus::Saved("r1".into()));
    }

    #[test]
    fn export_before_save_raises_notice_only() {
        let mut s = screen();
        assert_eq!(s.handle_input(&InputEvent::Click(BTN_EXPORT)), None);
        assert!(s.state.notice.is_some());
        assert_eq!(s.state.export, ExportStatus::Locked);
    }

    #[test]
    fn export_after_save_carries_the_resume_id() {
        let mut s = screen();
        s.handle_input(&InputEvent::Click(BTN_SAVE));
        logic::finish_save(&mut s.state, Ok(SaveResumeResponse { id: "r1".into() }));

        let request = s.handle_input(&InputEvent::Click(BTN_EXPORT));
        match request {
            Some(PreviewRequest::VerifyPayment(req)) => assert_eq!(req.reference, "r1"),
            other => panic!("expected verification request, got {other:?}"),
        }

        logic::finish_export(&mut s.state, Ok(true));
        assert_eq!(s.state.export, ExportStatus::Unlocked);
    }
}
