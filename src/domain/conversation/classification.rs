//! What the language understanding service reports about an utterance.

use serde::{Deserialize, Serialize};

use crate::domain::visa::{InquiryKind, UserInfo};

/// Entity values extracted from an utterance, already flattened to text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierEntities {
    pub visa_type: Option<String>,
    pub work_type: Option<String>,
    pub occupation_status: Option<String>,
    /// Flight-booking entities. The language model still emits them but no
    /// dialog consumes them.
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub travel_date: Option<String>,
}

impl ClassifierEntities {
    pub fn with_visa_type(mut self, value: impl Into<String>) -> Self {
        self.visa_type = Some(value.into());
        self
    }

    pub fn with_work_type(mut self, value: impl Into<String>) -> Self {
        self.work_type = Some(value.into());
        self
    }

    pub fn with_occupation_status(mut self, value: impl Into<String>) -> Self {
        self.occupation_status = Some(value.into());
        self
    }

    /// True if any of the flight-booking entities came back.
    pub fn has_travel_details(&self) -> bool {
        self.origin.is_some() || self.destination.is_some() || self.travel_date.is_some()
    }
}

/// Classification of one utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierResult {
    /// Highest scoring intent label.
    pub top_intent: String,
    /// Confidence of the top intent, when the service reports one.
    pub score: Option<f64>,
    #[serde(default)]
    pub entities: ClassifierEntities,
}

impl ClassifierResult {
    pub fn new(top_intent: impl Into<String>) -> Self {
        Self {
            top_intent: top_intent.into(),
            score: None,
            entities: ClassifierEntities::default(),
        }
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    pub fn with_entities(mut self, entities: ClassifierEntities) -> Self {
        self.entities = entities;
        self
    }

    /// The inquiry this intent starts, if the bot has a flow for it.
    pub fn inquiry_kind(&self) -> Option<InquiryKind> {
        InquiryKind::from_intent(&self.top_intent)
    }

    /// Canonical record for the detail collection, or `None` for an
    /// intent without a flow.
    pub fn user_info(&self) -> Option<UserInfo> {
        let kind = self.inquiry_kind()?;
        Some(UserInfo::for_inquiry(
            kind,
            self.entities.visa_type.as_deref(),
            self.entities.work_type.as_deref(),
            self.entities.occupation_status.as_deref(),
        ))
    }
}
