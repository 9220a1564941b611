//! Preview screen state: the finished resume, the chosen template, and the
//! save / export request statuses.

use crate::form::state::ResumeDraft;

/// Visual style the resume is projected through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Template {
    Modern,
    Classic,
    Minimal,
}

pub const TEMPLATES: [Template; 3] = [Template::Modern, Template::Classic, Template::Minimal];

impl Template {
    pub fn label(self) -> &'static str {
        match self {
            Template::Modern => "Modern",
            Template::Classic => "Classic",
            Template::Minimal => "Minimal",
        }
    }

    pub fn index(self) -> usize {
        TEMPLATES.iter().position(|&t| t == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        TEMPLATES[(self.index() + 1) % TEMPLATES.len()]
    }

    pub fn prev(self) -> Self {
        TEMPLATES[(self.index() + TEMPLATES.len() - 1) % TEMPLATES.len()]
    }
}

/// State of the backend save call.
#[derive(Clone, Debug, PartialEq)]
pub enum SaveStatus {
    Idle,
    InFlight,
    /// Saved; the backend id doubles as the payment reference.
    Saved(String),
    Failed(String),
}

/// State of the payment-gated PDF export.
#[derive(Clone, Debug, PartialEq)]
pub enum ExportStatus {
    /// Default: export stays behind the payment check.
    Locked,
    /// Verification request outstanding.
    Verifying,
    /// Payment confirmed; the download is available.
    Unlocked,
    Failed(String),
}

pub struct PreviewState {
    pub draft: ResumeDraft,
    pub template: Template,
    pub save: SaveStatus,
    pub export: ExportStatus,
    /// One-line guidance ("Save your resume first"), replaced on each event.
    pub notice: Option<String>,
}

impl PreviewState {
    pub fn new(draft: ResumeDraft) -> Self {
        Self {
            draft,
            template: Template::Modern,
            save: SaveStatus::Idle,
            export: ExportStatus::Locked,
            notice: None,
        }
    }

    /// The backend id from a successful save, if any.
    pub fn saved_id(&self) -> Option<&str> {
        match &self.save {
            SaveStatus::Saved(id) => Some(id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_cycle_covers_all() {
        let mut t = Template::Modern;
        t = t.next();
        assert_eq!(t, Template::Classic);
        t = t.next();
        assert_eq!(t, Template::Minimal);
        t = t.next();
        assert_eq!(t, Template::Modern);
        assert_eq!(t.prev(), Template::Minimal);
    }

    #[test]
    fn new_preview_starts_locked_on_modern() {
        let state = PreviewState::new(ResumeDraft::default());
        assert_eq!(state.template, Template::Modern);
        assert_eq!(state.save, SaveStatus::Idle);
        assert_eq!(state.export, ExportStatus::Locked);
        assert!(state.saved_id().is_none());
    }
}
