//! Top-level application state: which screen is active, draft persistence,
//! and the hand-off between the builder and the preview.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::api::{SaveResumeResponse, SummarizeRequest, VerifyPaymentRequest};
use crate::form::save::{self, DraftStore};
use crate::form::state::ResumeDraft;
use crate::form::{logic as form_logic, FormScreen};
use crate::input::{ClickState, InputEvent};
use crate::preview::{PreviewRequest, PreviewScreen};

/// Which screen is active.
pub enum Screen {
    Builder(FormScreen),
    Preview(PreviewScreen),
}

/// An async call the shell must run on behalf of the active screen. The
/// outcome comes back through the matching `finish_*` method.
#[derive(Debug, PartialEq)]
pub enum AppRequest {
    Summarize(SummarizeRequest),
    SaveResume,
    VerifyPayment(VerifyPaymentRequest),
}

pub struct App<S: DraftStore> {
    store: S,
    pub screen: Screen,
}

impl<S: DraftStore> App<S> {
    /// Boot the builder, resuming a persisted draft when one exists.
    pub fn new(store: S) -> Self {
        let screen = match save::restore(&store) {
            Some(draft) => Screen::Builder(FormScreen::from_draft(draft)),
            None => Screen::Builder(FormScreen::new()),
        };
        Self { store, screen }
    }

    pub fn handle_input(&mut self, event: &InputEvent, now_ms: f64) -> Option<AppRequest> {
        match &mut self.screen {
            Screen::Builder(form) => {
                let request = form.handle_input(event, now_ms);
                // Mirror every mutation; a reload must never lose progress.
                save::persist(&self.store, &form.state.draft);
                request.map(AppRequest::Summarize)
            }
            Screen::Preview(preview) => match preview.handle_input(event)? {
                PreviewRequest::Edit => {
                    let draft = preview.state.draft.clone();
                    save::persist(&self.store, &draft);
                    self.screen = Screen::Builder(FormScreen::from_draft(draft));
                    None
                }
                PreviewRequest::Save => Some(AppRequest::SaveResume),
                PreviewRequest::VerifyPayment(req) => Some(AppRequest::VerifyPayment(req)),
            },
        }
    }

    /// Per-frame upkeep. Returns true when visible state changed.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        match &mut self.screen {
            Screen::Builder(form) => form.tick(now_ms),
            Screen::Preview(_) => false,
        }
    }

    /// Merge the summarization outcome. On success the draft leaves durable
    /// storage and the preview takes over.
    pub fn finish_summarize(&mut self, result: Result<String, String>) {
        let Screen::Builder(form) = &mut self.screen else {
            return;
        };
        form_logic::finish_submit(&mut form.state, result);
        if let Some(finished) = form.state.finished.take() {
            save::clear(&self.store);
            self.screen = Screen::Preview(PreviewScreen::new(finished));
        }
    }

    pub fn finish_save(&mut self, result: Result<SaveResumeResponse, String>) {
        if let Screen::Preview(preview) = &mut self.screen {
            crate::preview::logic::finish_save(&mut preview.state, result);
        }
    }

    pub fn finish_export(&mut self, result: Result<bool, String>) {
        if let Screen::Preview(preview) = &mut self.screen {
            crate::preview::logic::finish_export(&mut preview.state, result);
        }
    }

    /// The finished draft shown in the preview, if that screen is active.
    /// This is the body of the backend save call.
    pub fn preview_draft(&self) -> Option<&ResumeDraft> {
        match &self.screen {
            Screen::Preview(preview) => Some(&preview.state.draft),
            Screen::Builder(_) => None,
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        match &self.screen {
            Screen::Builder(form) => form.render(f, area, click_state),
            Screen::Preview(preview) => preview.render(f, area, click_state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::save::{MemoryStore, DRAFT_KEY};
    use crate::input::Key;

    fn type_text(app: &mut App<MemoryStore>, text: &str) {
        for c in text.chars() {
            app.handle_input(&InputEvent::Key(Key::Char(c)), 0.0);
        }
    }

    #[test]
    fn typing_persists_the_draft() {
        let mut app = App::new(MemoryStore::new());
        type_text(&mut app, "Ama");
        assert!(app.store.get(DRAFT_KEY).is_some());

        // A fresh app over the same store resumes where we left off.
        let store = MemoryStore::new();
        store.set(DRAFT_KEY, &app.store.get(DRAFT_KEY).unwrap());
        let resumed = App::new(store);
        match &resumed.screen {
            Screen::Builder(form) => assert_eq!(form.state.draft.full_name, "Ama"),
            Screen::Preview(_) => panic!("expected builder"),
        }
    }

    #[test]
    fn corrupt_persisted_draft_falls_back_to_blank() {
        let store = MemoryStore::new();
        store.set(DRAFT_KEY, "{broken");
        let app = App::new(store);
        match &app.screen {
            Screen::Builder(form) => assert!(form.state.draft.full_name.is_empty()),
            Screen::Preview(_) => panic!("expected builder"),
        }
    }

    fn app_ready_to_submit() -> App<MemoryStore> {
        let mut app = App::new(MemoryStore::new());
        let Screen::Builder(form) = &mut app.screen else {
            unreachable!()
        };
        form.state.draft.add_skill("Python".into());
        form.state.draft.add_skill("Go".into());
        form.state.cursor = crate::form::state::STEPS.len() - 1;
        app
    }

    #[test]
    fn successful_submit_clears_storage_and_opens_preview() {
        let mut app = app_ready_to_submit();
        let request = app.handle_input(&InputEvent::Key(Key::Tab), 0.0);
        assert_eq!(
            request,
            Some(AppRequest::Summarize(SummarizeRequest {
                skills: "Python, Go".into()
            }))
        );

        app.finish_summarize(Ok("Skilled in Python, Go.".into()));
        assert!(app.store.get(DRAFT_KEY).is_none());
        let draft = app.preview_draft().expect("preview active");
        assert_eq!(draft.summary.as_deref(), Some("Skilled in Python, Go."));
    }

    #[test]
    fn failed_submit_keeps_builder_and_storage() {
        let mut app = app_ready_to_submit();
        app.handle_input(&InputEvent::Key(Key::Tab), 0.0);
        app.finish_summarize(Err("network error".into()));

        assert!(app.store.get(DRAFT_KEY).is_some());
        match &app.screen {
            Screen::Builder(form) => assert!(!form.state.in_flight()),
            Screen::Preview(_) => panic!("expected builder after failure"),
        }
    }

    #[test]
    fn edit_from_preview_restores_builder_and_storage() {
        let mut app = app_ready_to_submit();
        app.handle_input(&InputEvent::Key(Key::Tab), 0.0);
        app.finish_summarize(Ok("Summary.".into()));
        assert!(app.preview_draft().is_some());

        app.handle_input(&InputEvent::Key(Key::Esc), 0.0);
        match &app.screen {
            Screen::Builder(form) => {
                assert_eq!(form.state.draft.skills, vec!["Python", "Go"]);
                assert_eq!(form.state.cursor, 0);
            }
            Screen::Preview(_) => panic!("expected builder after edit"),
        }
        // The draft is durable again while editing.
        assert!(app.store.get(DRAFT_KEY).is_some());
    }

    #[test]
    fn preview_requests_route_to_preview_state() {
        let mut app = app_ready_to_submit();
        app.handle_input(&InputEvent::Key(Key::Tab), 0.0);
        app.finish_summarize(Ok("Summary.".into()));

        assert_eq!(
            app.handle_input(&InputEvent::Key(Key::Char('s')), 0.0),
            Some(AppRequest::SaveResume)
        );
        app.finish_save(Ok(SaveResumeResponse { id: "r1".into() }));

        let request = app.handle_input(&InputEvent::Key(Key::Char('x')), 0.0);
        assert_eq!(
            request,
            Some(AppRequest::VerifyPayment(VerifyPaymentRequest {
                reference: "r1".into()
            }))
        );
        app.finish_export(Ok(true));
        match &app.screen {
            Screen::Preview(preview) => assert_eq!(
                preview.state.export,
                crate::preview::state::ExportStatus::Unlocked
            ),
            Screen::Builder(_) => panic!("expected preview"),
        }
    }
}
