//! Detail collection.
//!
//! Fills the three slots of a [`UserInfo`] in a fixed order:
//! visa type, then work type, then occupation status. A missing slot is
//! either defaulted on the spot or, when prompting is enabled, suspends the
//! sequence until the user answers.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

use super::values::{
    normalize_visa_type, normalize_work_type, UserInfo, DEFAULT_OCCUPATION_STATUS,
    DEFAULT_VISA_TYPE, DEFAULT_WORK_TYPE,
};

/// One slot-filling step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailStep {
    VisaType,
    WorkType,
    OccupationStatus,
}

impl DetailStep {
    /// All steps in the order they run.
    pub const ORDER: [DetailStep; 3] = [
        DetailStep::VisaType,
        DetailStep::WorkType,
        DetailStep::OccupationStatus,
    ];

    /// The step every collection starts at.
    pub fn first() -> Self {
        Self::VisaType
    }

    /// The step after this one, or `None` after the last.
    pub fn next(&self) -> Option<Self> {
        self.valid_transitions().into_iter().next()
    }

    /// Value substituted when the slot is missing and prompting is off.
    pub fn default_value(&self) -> &'static str {
        match self {
            Self::VisaType => DEFAULT_VISA_TYPE,
            Self::WorkType => DEFAULT_WORK_TYPE,
            Self::OccupationStatus => DEFAULT_OCCUPATION_STATUS,
        }
    }

    /// Question sent to the user when the slot is missing and prompting is on.
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::VisaType => "What type of visa do you currently hold? (for example F1)",
            Self::WorkType => {
                "What kind of work authorization are you asking about? (on campus, CPT or OPT)"
            }
            Self::OccupationStatus => {
                "What is your current occupation status? (for example student)"
            }
        }
    }

    fn slot<'a>(&self, info: &'a mut UserInfo) -> &'a mut Option<String> {
        match self {
            Self::VisaType => &mut info.visa_type,
            Self::WorkType => &mut info.work_type,
            Self::OccupationStatus => &mut info.occupation_status,
        }
    }

    fn normalize(&self, raw: &str) -> Option<String> {
        match self {
            Self::VisaType => normalize_visa_type(raw),
            Self::WorkType | Self::OccupationStatus => normalize_work_type(raw),
        }
    }
}

impl StateMachine for DetailStep {
    fn can_transition_to(&self, target: &Self) -> bool {
        use DetailStep::*;
        matches!(
            (self, target),
            (VisaType, WorkType) | (WorkType, OccupationStatus)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use DetailStep::*;
        match self {
            VisaType => vec![WorkType],
            WorkType => vec![OccupationStatus],
            OccupationStatus => vec![],
        }
    }
}

/// Where a collection run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailProgress {
    /// Waiting for the user to answer `step`.
    Prompt { step: DetailStep, text: &'static str },
    /// All three slots are filled.
    Complete,
}

/// Runs the detail-collection steps over a shared [`UserInfo`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetailCollector {
    prompt_for_missing: bool,
}

impl DetailCollector {
    /// Creates a collector. With `prompt_for_missing` off every gap is
    /// defaulted and [`begin`](Self::begin) always completes.
    pub fn new(prompt_for_missing: bool) -> Self {
        Self { prompt_for_missing }
    }

    /// Collector that never asks the user anything.
    pub fn silent() -> Self {
        Self::new(false)
    }

    /// Collector that asks for each missing slot.
    pub fn interactive() -> Self {
        Self::new(true)
    }

    pub fn prompts_for_missing(&self) -> bool {
        self.prompt_for_missing
    }

    /// Starts collection at the first step.
    pub fn begin(&self, info: &mut UserInfo) -> DetailProgress {
        self.run_from(DetailStep::first(), info)
    }

    /// Resumes a run that suspended on `step`, taking `answer` as its value.
    ///
    /// A blank answer takes the step's default.
    pub fn resume(&self, step: DetailStep, info: &mut UserInfo, answer: &str) -> DetailProgress {
        let value = step
            .normalize(answer)
            .unwrap_or_else(|| step.default_value().to_string());
        *step.slot(info) = Some(value);

        match step.next() {
            Some(next) => self.run_from(next, info),
            None => DetailProgress::Complete,
        }
    }

    fn run_from(&self, start: DetailStep, info: &mut UserInfo) -> DetailProgress {
        let mut current = Some(start);
        while let Some(step) = current {
            let slot = step.slot(info);
            if slot.is_none() {
                if self.prompt_for_missing {
                    return DetailProgress::Prompt {
                        step,
                        text: step.prompt(),
                    };
                }
                *slot = Some(step.default_value().to_string());
            }
            current = step.next();
        }
        DetailProgress::Complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::visa::InquiryKind;
    use proptest::prelude::*;

    fn filled(visa: &str, work: &str, occupation: &str) -> UserInfo {
        UserInfo {
            kind: Some(InquiryKind::Eligibility),
            visa_type: Some(visa.to_string()),
            work_type: Some(work.to_string()),
            occupation_status: Some(occupation.to_string()),
        }
    }

    mod steps {
        use super::*;

        #[test]
        fn order_is_visa_then_work_then_occupation() {
            assert_eq!(DetailStep::first(), DetailStep::VisaType);
            assert_eq!(DetailStep::VisaType.next(), Some(DetailStep::WorkType));
            assert_eq!(DetailStep::WorkType.next(), Some(DetailStep::OccupationStatus));
            assert_eq!(DetailStep::OccupationStatus.next(), None);
        }

        #[test]
        fn only_the_last_step_is_terminal() {
            assert!(!DetailStep::VisaType.is_terminal());
            assert!(!DetailStep::WorkType.is_terminal());
            assert!(DetailStep::OccupationStatus.is_terminal());
        }

        #[test]
        fn steps_cannot_be_skipped() {
            assert!(DetailStep::VisaType
                .transition_to(DetailStep::OccupationStatus)
                .is_err());
            assert!(DetailStep::WorkType.transition_to(DetailStep::VisaType).is_err());
        }

        #[test]
        fn order_constant_follows_transitions() {
            let mut walked = vec![DetailStep::first()];
            while let Some(next) = walked.last().and_then(DetailStep::next) {
                walked.push(next);
            }
            assert_eq!(walked, DetailStep::ORDER.to_vec());
        }
    }

    mod silent_collection {
        use super::*;

        #[test]
        fn empty_record_gets_all_defaults() {
            let mut info = UserInfo::new();
            let progress = DetailCollector::silent().begin(&mut info);

            assert_eq!(progress, DetailProgress::Complete);
            assert_eq!(info.visa_type.as_deref(), Some("f1"));
            assert_eq!(info.work_type.as_deref(), Some("opt"));
            assert_eq!(info.occupation_status.as_deref(), Some("student"));
        }

        #[test]
        fn extracted_values_are_kept() {
            let mut info =
                UserInfo::for_inquiry(InquiryKind::Eligibility, Some("f1"), Some("cpt"), None);
            DetailCollector::silent().begin(&mut info);

            assert_eq!(info.visa_type.as_deref(), Some("f1"));
            assert_eq!(info.work_type.as_deref(), Some("cpt"));
            assert_eq!(info.occupation_status.as_deref(), Some("student"));
        }

        #[test]
        fn full_record_is_untouched() {
            let mut info = filled("h1b", "on campus", "employee");
            let before = info.clone();
            DetailCollector::silent().begin(&mut info);
            assert_eq!(info, before);
        }
    }

    mod interactive_collection {
        use super::*;

        #[test]
        fn prompts_for_first_missing_slot() {
            let mut info =
                UserInfo::for_inquiry(InquiryKind::ProcedureAuth, Some("f1"), None, None);
            let progress = DetailCollector::interactive().begin(&mut info);

            assert_eq!(
                progress,
                DetailProgress::Prompt {
                    step: DetailStep::WorkType,
                    text: DetailStep::WorkType.prompt(),
                }
            );
            assert_eq!(info.work_type, None);
        }

        #[test]
        fn answers_fill_slots_in_order() {
            let collector = DetailCollector::interactive();
            let mut info = UserInfo::new();

            assert!(matches!(
                collector.begin(&mut info),
                DetailProgress::Prompt { step: DetailStep::VisaType, .. }
            ));
            assert!(matches!(
                collector.resume(DetailStep::VisaType, &mut info, "F-1"),
                DetailProgress::Prompt { step: DetailStep::WorkType, .. }
            ));
            assert!(matches!(
                collector.resume(DetailStep::WorkType, &mut info, "On Campus"),
                DetailProgress::Prompt { step: DetailStep::OccupationStatus, .. }
            ));
            assert_eq!(
                collector.resume(DetailStep::OccupationStatus, &mut info, "Student"),
                DetailProgress::Complete
            );

            assert_eq!(info.visa_type.as_deref(), Some("f1"));
            assert_eq!(info.work_type.as_deref(), Some("on campus"));
            assert_eq!(info.occupation_status.as_deref(), Some("student"));
        }

        #[test]
        fn blank_answer_takes_default() {
            let collector = DetailCollector::interactive();
            let mut info = UserInfo::new();
            collector.begin(&mut info);
            collector.resume(DetailStep::VisaType, &mut info, "   ");
            assert_eq!(info.visa_type.as_deref(), Some("f1"));
        }

        #[test]
        fn complete_record_never_prompts() {
            let mut info = filled("f1", "cpt", "student");
            assert_eq!(
                DetailCollector::interactive().begin(&mut info),
                DetailProgress::Complete
            );
        }
    }

    fn optional_value() -> impl Strategy<Value = Option<String>> {
        prop::option::of("[a-zA-Z0-9 -]{0,12}")
    }

    proptest! {
        #[test]
        fn silent_collection_always_completes_every_slot(
            visa in optional_value(),
            work in optional_value(),
            occupation in optional_value(),
        ) {
            let mut info = UserInfo::for_inquiry(
                InquiryKind::VisaInformation,
                visa.as_deref(),
                work.as_deref(),
                occupation.as_deref(),
            );
            let progress = DetailCollector::silent().begin(&mut info);

            prop_assert_eq!(progress, DetailProgress::Complete);
            prop_assert!(info.is_complete());
        }

        #[test]
        fn silent_collection_is_idempotent(
            visa in optional_value(),
            work in optional_value(),
            occupation in optional_value(),
        ) {
            let collector = DetailCollector::silent();
            let mut info = UserInfo::for_inquiry(
                InquiryKind::Eligibility,
                visa.as_deref(),
                work.as_deref(),
                occupation.as_deref(),
            );
            collector.begin(&mut info);
            let once = info.clone();
            collector.begin(&mut info);

            prop_assert_eq!(info, once);
        }
    }
}
