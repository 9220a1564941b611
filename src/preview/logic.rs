//! Resume projection and the save / export request machines.

use crate::api::{SaveResumeResponse, VerifyPaymentRequest};
use crate::form::state::ResumeDraft;

use super::state::{ExportStatus, PreviewState, SaveStatus};

/// A projected resume section: a heading and its content rows. Templates
/// only differ in decoration; the section content is shared.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub heading: &'static str,
    pub rows: Vec<String>,
}

/// Project the draft into ordered sections, omitting everything empty.
pub fn sections(draft: &ResumeDraft) -> Vec<Section> {
    let mut out = Vec::new();

    let mut contact = Vec::new();
    if !draft.email.is_empty() || !draft.phone.is_empty() {
        contact.push(
            [draft.email.as_str(), draft.phone.as_str()]
                .iter()
                .filter(|s| !s.is_empty())
                .copied()
                .collect::<Vec<_>>()
                .join(" | "),
        );
    }
    let location: Vec<&str> = [draft.city.as_str(), draft.country.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
    if !location.is_empty() {
        contact.push(location.join(", "));
    }
    if !contact.is_empty() {
        out.push(Section {
            heading: "Contact",
            rows: contact,
        });
    }

    if let Some(summary) = draft.summary.as_deref().filter(|s| !s.is_empty()) {
        out.push(Section {
            heading: "Summary",
            rows: vec![summary.to_string()],
        });
    }

    if !draft.skills.is_empty() {
        out.push(Section {
            heading: "Skills",
            rows: vec![draft.joined_skills()],
        });
    }

    if !draft.languages.is_empty() {
        out.push(Section {
            heading: "Languages",
            rows: draft
                .languages
                .iter()
                .map(|l| format!("{} ({})", l.name, l.proficiency.label()))
                .collect(),
        });
    }

    let education: Vec<String> = [draft.program.as_str(), draft.school.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if !education.is_empty() {
        out.push(Section {
            heading: "Education",
            rows: education,
        });
    }

    for (heading, text) in [
        ("Experience", &draft.experience),
        ("Projects", &draft.projects),
        ("Certifications", &draft.certifications),
    ] {
        let rows: Vec<String> = text
            .split('\n')
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect();
        if !rows.is_empty() {
            out.push(Section { heading, rows });
        }
    }

    out
}

/// Start the backend save. Returns true when a request should be sent;
/// a second press while one is outstanding is ignored.
pub fn begin_save(state: &mut PreviewState) -> bool {
    if state.save == SaveStatus::InFlight {
        return false;
    }
    state.save = SaveStatus::InFlight;
    state.notice = None;
    true
}

pub fn finish_save(state: &mut PreviewState, result: Result<SaveResumeResponse, String>) {
    state.save = match result {
        Ok(resp) => SaveStatus::Saved(resp.id),
        Err(message) => SaveStatus::Failed(message),
    };
}

/// Start payment verification for the export gate.
///
/// The saved resume id doubles as the payment reference, so the resume must
/// be saved first; pressing export before that raises a notice instead.
pub fn begin_export(state: &mut PreviewState) -> Option<VerifyPaymentRequest> {
    match state.export {
        ExportStatus::Verifying | ExportStatus::Unlocked => return None,
        ExportStatus::Locked | ExportStatus::Failed(_) => {}
    }
    let Some(id) = state.saved_id() else {
        state.notice = Some("Save your resume before exporting".to_string());
        return None;
    };
    let reference = id.to_string();
    state.export = ExportStatus::Verifying;
    state.notice = None;
    Some(VerifyPaymentRequest { reference })
}

pub fn finish_export(state: &mut PreviewState, result: Result<bool, String>) {
    state.export = match result {
        Ok(true) => ExportStatus::Unlocked,
        Ok(false) => ExportStatus::Failed("Payment not completed".to_string()),
        Err(message) => ExportStatus::Failed(message),
    };
}
