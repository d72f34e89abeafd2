//! Orchestrator - top-level dialog flow.
//!
//! Drives a [`DialogSession`] through greeting, classification, detail
//! collection and resolution. Pure domain logic: the caller performs the
//! classifier call when asked to via [`TurnPlan::Classify`] and feeds the
//! outcome back in.

use crate::domain::visa::{select_response, DetailCollector, DetailProgress, UserInfo};

use super::classification::ClassifierResult;
use super::errors::ConversationError;
use super::messages;
use super::phase::DialogPhase;
use super::session::DialogSession;

/// What the caller has to do to finish an inbound turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnPlan {
    /// Send these replies; the turn is done.
    Reply(Vec<String>),
    /// Classify the utterance, then call
    /// [`Orchestrator::apply_classification`] or
    /// [`Orchestrator::classification_failed`].
    Classify { utterance: String },
}

/// Manages the top-level conversation sequence.
#[derive(Debug, Clone, Copy)]
pub struct Orchestrator {
    collector: DetailCollector,
    classifier_configured: bool,
}

impl Orchestrator {
    pub fn new(collector: DetailCollector, classifier_configured: bool) -> Self {
        Self {
            collector,
            classifier_configured,
        }
    }

    pub fn classifier_configured(&self) -> bool {
        self.classifier_configured
    }

    pub fn collector(&self) -> &DetailCollector {
        &self.collector
    }

    /// Replies for a newly opened conversation.
    pub fn welcome(&self) -> Vec<String> {
        vec![messages::WELCOME.to_string()]
    }

    /// Handles one inbound message.
    pub fn receive(
        &self,
        session: &mut DialogSession,
        text: &str,
    ) -> Result<TurnPlan, ConversationError> {
        session.record_turn();

        match session.phase() {
            DialogPhase::Idle => {
                session.transition(DialogPhase::Greeting)?;
                if self.classifier_configured {
                    // The opening message only wakes the bot up.
                    Ok(TurnPlan::Reply(vec![messages::INTRO_PROMPT.to_string()]))
                } else {
                    self.start_details(session, UserInfo::new()).map(TurnPlan::Reply)
                }
            }
            DialogPhase::Greeting => {
                if self.classifier_configured {
                    session.transition(DialogPhase::Classification)?;
                    Ok(TurnPlan::Classify {
                        utterance: text.to_string(),
                    })
                } else {
                    self.start_details(session, UserInfo::new()).map(TurnPlan::Reply)
                }
            }
            DialogPhase::DetailCollection => {
                let pending = session
                    .take_pending()
                    .ok_or(ConversationError::NothingPending)?;
                let mut info = pending.info;
                let progress = self.collector.resume(pending.step, &mut info, text);
                self.advance_details(session, info, progress)
                    .map(TurnPlan::Reply)
            }
            phase @ (DialogPhase::Classification | DialogPhase::Resolution) => {
                Err(ConversationError::TurnInProgress(phase))
            }
        }
    }

    /// Dispatches on the classifier's top intent.
    pub fn apply_classification(
        &self,
        session: &mut DialogSession,
        result: &ClassifierResult,
    ) -> Result<Vec<String>, ConversationError> {
        self.expect_classification(session)?;

        match result.user_info() {
            Some(info) => self.start_details(session, info),
            None => {
                session.transition(DialogPhase::Greeting)?;
                Ok(vec![
                    messages::didnt_understand(&result.top_intent),
                    messages::RESTART_PROMPT.to_string(),
                ])
            }
        }
    }

    /// Restarts at the greeting after the classifier could not be reached.
    pub fn classification_failed(
        &self,
        session: &mut DialogSession,
    ) -> Result<Vec<String>, ConversationError> {
        self.expect_classification(session)?;
        session.transition(DialogPhase::Greeting)?;
        Ok(vec![
            messages::CLASSIFIER_UNAVAILABLE.to_string(),
            messages::RESTART_PROMPT.to_string(),
        ])
    }

    fn expect_classification(&self, session: &DialogSession) -> Result<(), ConversationError> {
        match session.phase() {
            DialogPhase::Classification => Ok(()),
            other => Err(ConversationError::NotClassifying(other)),
        }
    }

    fn start_details(
        &self,
        session: &mut DialogSession,
        mut info: UserInfo,
    ) -> Result<Vec<String>, ConversationError> {
        session.transition(DialogPhase::DetailCollection)?;
        let progress = self.collector.begin(&mut info);
        self.advance_details(session, info, progress)
    }

    fn advance_details(
        &self,
        session: &mut DialogSession,
        info: UserInfo,
        progress: DetailProgress,
    ) -> Result<Vec<String>, ConversationError> {
        match progress {
            DetailProgress::Prompt { step, text } => {
                session.suspend(step, info);
                Ok(vec![text.to_string()])
            }
            DetailProgress::Complete => self.resolve(session, info),
        }
    }

    fn resolve(
        &self,
        session: &mut DialogSession,
        info: UserInfo,
    ) -> Result<Vec<String>, ConversationError> {
        session.transition(DialogPhase::Resolution)?;

        let visa_type = info
            .visa_type
            .as_deref()
            .ok_or(ConversationError::IncompleteDetails("visa_type"))?;
        let work_type = info
            .work_type
            .as_deref()
            .ok_or(ConversationError::IncompleteDetails("work_type"))?;
        let guidance = select_response(visa_type, work_type);

        session.transition(DialogPhase::Greeting)?;

        let mut replies = vec![guidance.to_string()];
        if self.classifier_configured {
            replies.push(messages::RESTART_PROMPT.to_string());
        }
        Ok(replies)
    }
}
