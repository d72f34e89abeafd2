//! Value types for a single visa inquiry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Visa type assumed when the user never names one.
pub const DEFAULT_VISA_TYPE: &str = "f1";

/// Work authorization assumed when the user never names one.
pub const DEFAULT_WORK_TYPE: &str = "opt";

/// Occupation status assumed when the user never names one.
pub const DEFAULT_OCCUPATION_STATUS: &str = "student";

/// What the user is asking about, taken from the classifier's top intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InquiryKind {
    /// "Am I allowed to work ...?"
    Eligibility,
    /// General questions about a visa category.
    VisaInformation,
    /// How to obtain a work authorization.
    ProcedureAuth,
}

impl InquiryKind {
    /// Maps a classifier intent label onto an inquiry kind.
    ///
    /// Returns `None` for labels this bot has no flow for.
    pub fn from_intent(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "eligibility" => Some(Self::Eligibility),
            "visa_information" => Some(Self::VisaInformation),
            "procedure_auth" => Some(Self::ProcedureAuth),
            _ => None,
        }
    }

    /// The intent label as the classifier reports it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eligibility => "eligibility",
            Self::VisaInformation => "visa_information",
            Self::ProcedureAuth => "procedure_auth",
        }
    }
}

impl fmt::Display for InquiryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The accumulator filled in over one conversation turn.
///
/// Every field starts out empty. Classifier entities fill what they can,
/// then detail collection supplies the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub kind: Option<InquiryKind>,
    pub visa_type: Option<String>,
    pub work_type: Option<String>,
    pub occupation_status: Option<String>,
}

impl UserInfo {
    /// An empty record, used when no classification happened.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the canonical record for a classified inquiry.
    ///
    /// Blank values are treated as absent so that defaulting still applies.
    pub fn for_inquiry(
        kind: InquiryKind,
        visa_type: Option<&str>,
        work_type: Option<&str>,
        occupation_status: Option<&str>,
    ) -> Self {
        Self {
            kind: Some(kind),
            visa_type: visa_type.and_then(normalize_visa_type),
            work_type: work_type.and_then(normalize_work_type),
            occupation_status: occupation_status.and_then(normalize_work_type),
        }
    }

    /// True once all three slots are filled.
    pub fn is_complete(&self) -> bool {
        self.visa_type.is_some() && self.work_type.is_some() && self.occupation_status.is_some()
    }
}

/// Canonical form of a visa type: lowercase, with whitespace, hyphens and
/// underscores removed.
///
/// `"F-1"`, `"f 1"` and `"F_1"` all become `"f1"`. Returns `None` for blank input.
pub fn normalize_visa_type(raw: &str) -> Option<String> {
    let value: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect();
    (!value.is_empty()).then_some(value)
}

/// Canonical form of a work type or occupation status.
///
/// Lowercased, `-`/`_` become spaces and runs of whitespace collapse, so
/// `"On-Campus"` becomes `"on campus"`. Returns `None` for blank input.
pub fn normalize_work_type(raw: &str) -> Option<String> {
    let spaced = raw.to_lowercase().replace(['-', '_'], " ");
    let value = spaced.split_whitespace().collect::<Vec<_>>().join(" ");
    (!value.is_empty()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    mod inquiry_kind {
        use super::*;

        #[test]
        fn maps_known_intents() {
            assert_eq!(InquiryKind::from_intent("eligibility"), Some(InquiryKind::Eligibility));
            assert_eq!(
                InquiryKind::from_intent("visa_information"),
                Some(InquiryKind::VisaInformation)
            );
            assert_eq!(
                InquiryKind::from_intent("procedure_auth"),
                Some(InquiryKind::ProcedureAuth)
            );
        }

        #[test]
        fn intent_matching_ignores_case_and_padding() {
            assert_eq!(InquiryKind::from_intent(" Eligibility "), Some(InquiryKind::Eligibility));
        }

        #[test]
        fn unknown_intents_have_no_kind() {
            assert_eq!(InquiryKind::from_intent("GetWeather"), None);
            assert_eq!(InquiryKind::from_intent("None"), None);
            assert_eq!(InquiryKind::from_intent(""), None);
        }

        #[test]
        fn serializes_to_snake_case() {
            let json = serde_json::to_string(&InquiryKind::VisaInformation).unwrap();
            assert_eq!(json, "\"visa_information\"");
        }

        #[test]
        fn as_str_round_trips_through_from_intent() {
            for kind in [
                InquiryKind::Eligibility,
                InquiryKind::VisaInformation,
                InquiryKind::ProcedureAuth,
            ] {
                assert_eq!(InquiryKind::from_intent(kind.as_str()), Some(kind));
            }
        }
    }

    mod user_info {
        use super::*;

        #[test]
        fn new_record_is_empty() {
            let info = UserInfo::new();
            assert_eq!(info.kind, None);
            assert!(!info.is_complete());
        }

        #[test]
        fn for_inquiry_normalizes_entities() {
            let info = UserInfo::for_inquiry(
                InquiryKind::Eligibility,
                Some("F-1"),
                Some("On-Campus"),
                None,
            );
            assert_eq!(info.kind, Some(InquiryKind::Eligibility));
            assert_eq!(info.visa_type.as_deref(), Some("f1"));
            assert_eq!(info.work_type.as_deref(), Some("on campus"));
            assert_eq!(info.occupation_status, None);
        }

        #[test]
        fn visa_type_drops_separators() {
            assert_eq!(normalize_visa_type("F_1").as_deref(), Some("f1"));
            assert_eq!(normalize_visa_type(" H-1 b ").as_deref(), Some("h1b"));
            assert_eq!(normalize_visa_type(" - _ "), None);
        }

        #[test]
        fn blank_entities_count_as_missing() {
            let info = UserInfo::for_inquiry(InquiryKind::ProcedureAuth, Some("  "), Some(""), None);
            assert_eq!(info.visa_type, None);
            assert_eq!(info.work_type, None);
        }
    }

    mod normalization {
        use super::*;

        #[test]
        fn visa_type_variants_collapse() {
            assert_eq!(normalize_visa_type("F1").as_deref(), Some("f1"));
            assert_eq!(normalize_visa_type("f-1").as_deref(), Some("f1"));
            assert_eq!(normalize_visa_type(" H1B ").as_deref(), Some("h1b"));
        }

        #[test]
        fn work_type_keeps_inner_spaces() {
            assert_eq!(normalize_work_type("on   campus").as_deref(), Some("on campus"));
            assert_eq!(normalize_work_type("ON_CAMPUS").as_deref(), Some("on campus"));
            assert_eq!(normalize_work_type("CPT").as_deref(), Some("cpt"));
        }

        #[test]
        fn blank_input_is_none() {
            assert_eq!(normalize_visa_type(" - "), None);
            assert_eq!(normalize_work_type("   "), None);
        }
    }
}
