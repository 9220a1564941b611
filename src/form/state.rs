//! Resume builder state: the draft record, the step table, and the
//! per-field typing state.

use serde::{Deserialize, Serialize};

use crate::suggest::{self, MatchMode};
use crate::timer::Countdown;
use crate::typeahead::Typeahead;

/// Language proficiency levels, in display/cycle order.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Proficiency {
    Native,
    Fluent,
    Intermediate,
    Beginner,
}

pub const PROFICIENCY_LEVELS: [Proficiency; 4] = [
    Proficiency::Native,
    Proficiency::Fluent,
    Proficiency::Intermediate,
    Proficiency::Beginner,
];

impl Proficiency {
    pub fn label(self) -> &'static str {
        match self {
            Proficiency::Native => "Native",
            Proficiency::Fluent => "Fluent",
            Proficiency::Intermediate => "Intermediate",
            Proficiency::Beginner => "Beginner",
        }
    }

    /// Cycle to the next level, wrapping around.
    pub fn cycled(self) -> Self {
        let i = PROFICIENCY_LEVELS.iter().position(|&p| p == self).unwrap_or(0);
        PROFICIENCY_LEVELS[(i + 1) % PROFICIENCY_LEVELS.len()]
    }
}

/// A spoken language and its proficiency. Unique by name within a draft.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Language {
    pub name: String,
    pub proficiency: Proficiency,
}

/// The in-progress resume record.
///
/// `summary` stays `None` until the summarization call on the final step
/// succeeds.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(default)]
pub struct ResumeDraft {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub city: String,
    pub skills: Vec<String>,
    pub languages: Vec<Language>,
    pub program: String,
    pub school: String,
    pub experience: String,
    pub projects: String,
    pub certifications: String,
    pub summary: Option<String>,
}

impl ResumeDraft {
    /// Append a skill unless it is already present (exact, case-sensitive
    /// match). Returns whether the skill was added.
    pub fn add_skill(&mut self, skill: String) -> bool {
        if self.skills.contains(&skill) {
            return false;
        }
        self.skills.push(skill);
        true
    }

    pub fn remove_last_skill(&mut self) {
        self.skills.pop();
    }

    pub fn remove_skill(&mut self, index: usize) {
        if index < self.skills.len() {
            self.skills.remove(index);
        }
    }

    /// Add a language with the default proficiency unless one with the same
    /// name already exists. Returns whether it was added.
    pub fn add_language(&mut self, name: String) -> bool {
        if self.languages.iter().any(|l| l.name == name) {
            return false;
        }
        self.languages.push(Language {
            name,
            proficiency: Proficiency::Fluent,
        });
        true
    }

    pub fn remove_last_language(&mut self) {
        self.languages.pop();
    }

    pub fn remove_language(&mut self, index: usize) {
        if index < self.languages.len() {
            self.languages.remove(index);
        }
    }

    pub fn cycle_proficiency(&mut self, index: usize) {
        if let Some(lang) = self.languages.get_mut(index) {
            lang.proficiency = lang.proficiency.cycled();
        }
    }

    /// The input handed to the summarization service.
    pub fn joined_skills(&self) -> String {
        self.skills.join(", ")
    }
}

/// The ordered form steps. The terminal "submitted" state is reached by
/// triggering `next` on the last step and is represented by
/// [`FormState::finished`], not by a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    FullName,
    Email,
    Phone,
    Country,
    City,
    Skills,
    Languages,
    Proficiency,
    Program,
    School,
    Experience,
    Projects,
    Certifications,
}

pub const STEPS: [Step; 13] = [
    Step::FullName,
    Step::Email,
    Step::Phone,
    Step::Country,
    Step::City,
    Step::Skills,
    Step::Languages,
    Step::Proficiency,
    Step::Program,
    Step::School,
    Step::Experience,
    Step::Projects,
    Step::Certifications,
];

/// How a step's field is edited and rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepKind {
    /// Plain single-line text.
    Text,
    /// Typeahead committing chips into a collection.
    Tags,
    /// Typeahead mirroring its raw text into a single draft field.
    Lookup,
    /// Per-language proficiency adjustment list.
    Proficiency,
    /// Free-form multi-line text.
    Multiline,
}

/// Static info about a step.
pub struct StepInfo {
    pub title: &'static str,
    pub hint: &'static str,
    pub kind: StepKind,
    /// Required steps block skip-ahead jumps while their primary field is
    /// empty. Optional steps never gate navigation.
    pub required: bool,
}

pub fn step_info(step: Step) -> StepInfo {
    match step {
        Step::FullName => StepInfo {
            title: "Full Name",
            hint: "Type your full name",
            kind: StepKind::Text,
            required: true,
        },
        Step::Email => StepInfo {
            title: "Email",
            hint: "you@example.com",
            kind: StepKind::Text,
            required: true,
        },
        Step::Phone => StepInfo {
            title: "Phone Number",
            hint: "7-15 digits",
            kind: StepKind::Text,
            required: true,
        },
        Step::Country => StepInfo {
            title: "Country",
            hint: "Start typing a country...",
            kind: StepKind::Lookup,
            required: true,
        },
        Step::City => StepInfo {
            title: "City",
            hint: "Type your city",
            kind: StepKind::Text,
            required: true,
        },
        Step::Skills => StepInfo {
            title: "List your skills",
            hint: "Type a skill, Enter to add",
            kind: StepKind::Tags,
            required: true,
        },
        Step::Languages => StepInfo {
            title: "Languages",
            hint: "Type a language, Enter to add",
            kind: StepKind::Tags,
            required: true,
        },
        Step::Proficiency => StepInfo {
            title: "Set Proficiency Levels",
            hint: "Enter cycles the selected language's level",
            kind: StepKind::Proficiency,
            required: false,
        },
        Step::Program => StepInfo {
            title: "Program",
            hint: "e.g., BSc Computer Science",
            kind: StepKind::Lookup,
            required: true,
        },
        Step::School => StepInfo {
            title: "School / University Name",
            hint: "Type your school/university...",
            kind: StepKind::Lookup,
            required: true,
        },
        Step::Experience => StepInfo {
            title: "Work Experience",
            hint: "One entry per line",
            kind: StepKind::Multiline,
            required: false,
        },
        Step::Projects => StepInfo {
            title: "Projects",
            hint: "One entry per line",
            kind: StepKind::Multiline,
            required: false,
        },
        Step::Certifications => StepInfo {
            title: "Certifications",
            hint: "One entry per line",
            kind: StepKind::Multiline,
            required: false,
        },
    }
}

/// State of the one-at-a-time summarization request.
#[derive(Clone, Debug, PartialEq)]
pub enum SubmitStatus {
    Idle,
    /// A request is outstanding; `next` is disabled.
    InFlight,
    /// The last attempt failed; pressing next retries.
    Failed(String),
}

/// How long the skip-ahead warning stays on screen.
pub const NOTICE_MS: f64 = 3000.0;

/// The whole builder-screen state: draft, cursor, per-field typing state,
/// transient notice, and submission status.
pub struct FormState {
    pub draft: ResumeDraft,
    /// Index into [`STEPS`].
    pub cursor: usize,
    pub country: Typeahead,
    pub skills: Typeahead,
    pub languages: Typeahead,
    pub program: Typeahead,
    pub school: Typeahead,
    /// Selected row on the proficiency step.
    pub prof_cursor: usize,
    /// Transient warning (skip-ahead guard), auto-cleared by `notice_timer`.
    pub notice: Option<String>,
    pub notice_timer: Countdown,
    pub submit: SubmitStatus,
    /// Set once the terminal transition completes; the finished draft handed
    /// to the preview.
    pub finished: Option<ResumeDraft>,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            draft: ResumeDraft::default(),
            cursor: 0,
            country: Typeahead::new(suggest::COUNTRIES, MatchMode::Prefix),
            skills: Typeahead::new(suggest::SKILLS, MatchMode::Substring),
            languages: Typeahead::new(suggest::LANGUAGES, MatchMode::Substring),
            program: Typeahead::new(suggest::PROGRAMS, MatchMode::Substring),
            school: Typeahead::new(suggest::UNIVERSITIES, MatchMode::Substring),
            prof_cursor: 0,
            notice: None,
            notice_timer: Countdown::new(NOTICE_MS),
            submit: SubmitStatus::Idle,
            finished: None,
        }
    }

    /// Rebuild the builder around a previously persisted draft, restoring the
    /// raw display text of the lookup fields.
    pub fn from_draft(draft: ResumeDraft) -> Self {
        let mut form = Self::new();
        form.country.set_text(&draft.country);
        form.program.set_text(&draft.program);
        form.school.set_text(&draft.school);
        form.draft = draft;
        form
    }

    pub fn step(&self) -> Step {
        STEPS[self.cursor]
    }

    pub fn is_last_step(&self) -> bool {
        self.cursor == STEPS.len() - 1
    }

    pub fn in_flight(&self) -> bool {
        self.submit == SubmitStatus::InFlight
    }

    /// The primary value backing a step, used by the skip-ahead guard.
    pub fn primary_value(&self, step: Step) -> Option<String> {
        let text = match step {
            Step::FullName => self.draft.full_name.clone(),
            Step::Email => self.draft.email.clone(),
            Step::Phone => self.draft.phone.clone(),
            Step::Country => self.draft.country.clone(),
            Step::City => self.draft.city.clone(),
            Step::Skills => self.draft.skills.join(","),
            Step::Languages => self
                .draft
                .languages
                .iter()
                .map(|l| l.name.as_str())
                .collect::<Vec<_>>()
                .join(","),
            Step::Program => self.draft.program.clone(),
            Step::School => self.draft.school.clone(),
            // Optional steps have no gating primary field.
            Step::Proficiency | Step::Experience | Step::Projects | Step::Certifications => {
                return None
            }
        };
        Some(text)
    }

    pub fn show_notice(&mut self, text: &str, now_ms: f64) {
        self.notice = Some(text.to_string());
        self.notice_timer.start(now_ms);
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skills_deduplicate_on_insert() {
        let mut d = ResumeDraft::default();
        assert!(d.add_skill("Python".into()));
        assert!(!d.add_skill("Python".into()));
        // Case-sensitive exact match: a different casing is a new entry.
        assert!(d.add_skill("python".into()));
        assert_eq!(d.skills, vec!["Python", "python"]);
    }

    #[test]
    fn languages_unique_by_name_with_default_level() {
        let mut d = ResumeDraft::default();
        assert!(d.add_language("English".into()));
        assert!(!d.add_language("English".into()));
        assert_eq!(d.languages.len(), 1);
        assert_eq!(d.languages[0].proficiency, Proficiency::Fluent);
    }

    #[test]
    fn readding_language_keeps_adjusted_proficiency() {
        let mut d = ResumeDraft::default();
        d.add_language("French".into());
        d.cycle_proficiency(0); // Fluent → Intermediate
        assert_eq!(d.languages[0].proficiency, Proficiency::Intermediate);
        // A duplicate add is a no-op, not a re-insertion with the default.
        d.add_language("French".into());
        assert_eq!(d.languages.len(), 1);
        assert_eq!(d.languages[0].proficiency, Proficiency::Intermediate);
    }

    #[test]
    fn proficiency_cycles_through_all_levels() {
        let mut p = Proficiency::Native;
        for expected in [
            Proficiency::Fluent,
            Proficiency::Intermediate,
            Proficiency::Beginner,
            Proficiency::Native,
        ] {
            p = p.cycled();
            assert_eq!(p, expected);
        }
    }

    #[test]
    fn joined_skills_format() {
        let mut d = ResumeDraft::default();
        d.add_skill("Python".into());
        d.add_skill("Go".into());
        assert_eq!(d.joined_skills(), "Python, Go");
    }

    #[test]
    fn remove_skill_bounds_checked() {
        let mut d = ResumeDraft::default();
        d.add_skill("Go".into());
        d.remove_skill(5); // out of range: no panic, no change
        assert_eq!(d.skills.len(), 1);
        d.remove_skill(0);
        assert!(d.skills.is_empty());
        d.remove_last_skill(); // empty: no panic
    }

    #[test]
    fn step_table_covers_all_steps() {
        for &step in &STEPS {
            let info = step_info(step);
            assert!(!info.title.is_empty());
            assert!(!info.hint.is_empty());
        }
    }

    #[test]
    fn optional_steps_have_no_primary_value() {
        let form = FormState::new();
        assert!(form.primary_value(Step::Proficiency).is_none());
        assert!(form.primary_value(Step::Experience).is_none());
        assert!(form.primary_value(Step::Projects).is_none());
        assert!(form.primary_value(Step::Certifications).is_none());
        assert_eq!(form.primary_value(Step::FullName), Some(String::new()));
    }

    #[test]
    fn from_draft_restores_lookup_display_text() {
        let mut draft = ResumeDraft::default();
        draft.program = "BSc Computer Science".into();
        draft.school = "Ashesi University".into();
        draft.country = "Ghana".into();
        let form = FormState::from_draft(draft);
        assert_eq!(form.program.input(), "BSc Computer Science");
        assert_eq!(form.school.input(), "Ashesi University");
        assert_eq!(form.country.input(), "Ghana");
        assert_eq!(form.cursor, 0);
    }

    #[test]
    fn summary_absent_on_new_draft() {
        assert!(ResumeDraft::default().summary.is_none());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// No sequence of add_skill calls can produce duplicates.
            #[test]
            fn skills_never_duplicate(adds in proptest::collection::vec("[a-zA-Z+#]{1,8}", 0..40)) {
                let mut d = ResumeDraft::default();
                for s in adds {
                    d.add_skill(s);
                }
                let mut sorted = d.skills.clone();
                sorted.sort();
                sorted.dedup();
                prop_assert_eq!(sorted.len(), d.skills.len());
            }

            /// Repeated add_language calls keep exactly one entry per name.
            #[test]
            fn languages_unique_by_name(adds in proptest::collection::vec("[a-z]{1,6}", 0..40)) {
                let mut d = ResumeDraft::default();
                for name in adds {
                    d.add_language(name);
                }
                let mut names: Vec<_> = d.languages.iter().map(|l| l.name.clone()).collect();
                names.sort();
                let unique = names.len();
                names.dedup();
                prop_assert_eq!(names.len(), unique);
            }

            /// The draft serializes and restores field-for-field.
            #[test]
            fn draft_json_roundtrip(
                name in ".{0,20}",
                email in "[a-z]{0,10}",
                skills in proptest::collection::vec("[a-zA-Z]{1,8}", 0..10),
            ) {
                let mut d = ResumeDraft::default();
                d.full_name = name;
                d.email = email;
                for s in skills {
                    d.add_skill(s);
                }
                d.add_language("English".into());
                d.summary = Some("done".into());
                let json = serde_json::to_string(&d).unwrap();
                let back: ResumeDraft = serde_json::from_str(&json).unwrap();
                prop_assert_eq!(back, d);
            }
        }
    }
}
