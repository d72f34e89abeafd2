//! ConversationService - the conversation handlers wired to shared collaborators.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::conversation::Orchestrator;
use crate::domain::visa::DetailCollector;
use crate::ports::{IntentClassifier, SessionStore};

use super::handlers::conversation::{
    ConversationView, EndConversationCommand, EndConversationError, EndConversationHandler,
    GetConversationError, GetConversationHandler, GetConversationQuery, SendMessageCommand,
    SendMessageError, SendMessageHandler, SendMessageResult, StartConversationCommand,
    StartConversationError, StartConversationHandler, StartConversationResult,
};
use super::turn_locks::TurnLocks;

/// Errors raised while wiring the service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("Missing collaborator: {0}")]
    MissingCollaborator(&'static str),
}

/// Entry point for every conversation operation.
#[derive(Clone)]
pub struct ConversationService {
    store: Arc<dyn SessionStore>,
    classifier: Arc<dyn IntentClassifier>,
    orchestrator: Orchestrator,
    turn_locks: TurnLocks,
}

impl ConversationService {
    pub fn builder() -> ConversationServiceBuilder {
        ConversationServiceBuilder::new()
    }

    /// Whether inbound messages go through the intent classifier.
    pub fn classifier_configured(&self) -> bool {
        self.orchestrator.classifier_configured()
    }

    pub fn classifier(&self) -> &Arc<dyn IntentClassifier> {
        &self.classifier
    }

    pub fn start_handler(&self) -> StartConversationHandler {
        StartConversationHandler::new(self.store.clone(), self.orchestrator)
    }

    pub fn send_message_handler(&self) -> SendMessageHandler {
        SendMessageHandler::new(
            self.store.clone(),
            self.classifier.clone(),
            self.orchestrator,
            self.turn_locks.clone(),
        )
    }

    pub fn get_handler(&self) -> GetConversationHandler {
        GetConversationHandler::new(self.store.clone())
    }

    pub fn end_handler(&self) -> EndConversationHandler {
        EndConversationHandler::new(self.store.clone())
    }

    pub async fn start(
        &self,
        cmd: StartConversationCommand,
    ) -> Result<StartConversationResult, StartConversationError> {
        self.start_handler().handle(cmd).await
    }

    pub async fn send_message(
        &self,
        cmd: SendMessageCommand,
    ) -> Result<SendMessageResult, SendMessageError> {
        self.send_message_handler().handle(cmd).await
    }

    pub async fn get(
        &self,
        query: GetConversationQuery,
    ) -> Result<ConversationView, GetConversationError> {
        self.get_handler().handle(query).await
    }

    pub async fn end(&self, cmd: EndConversationCommand) -> Result<(), EndConversationError> {
        self.end_handler().handle(cmd).await
    }
}

/// Builder for [`ConversationService`]. Every collaborator is required.
#[derive(Default)]
pub struct ConversationServiceBuilder {
    store: Option<Arc<dyn SessionStore>>,
    classifier: Option<Arc<dyn IntentClassifier>>,
    collector: Option<DetailCollector>,
}

impl ConversationServiceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn classifier(mut self, classifier: Arc<dyn IntentClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn detail_collector(mut self, collector: DetailCollector) -> Self {
        self.collector = Some(collector);
        self
    }

    pub fn build(self) -> Result<ConversationService, SetupError> {
        let classifier = self
            .classifier
            .ok_or(SetupError::MissingCollaborator("intent classifier"))?;
        let collector = self
            .collector
            .ok_or(SetupError::MissingCollaborator("detail collector"))?;
        let store = self
            .store
            .ok_or(SetupError::MissingCollaborator("session store"))?;

        let configured = classifier.is_configured();
        if !configured {
            tracing::warn!("intent classifier is not configured; requests resolve with defaults");
        }

        Ok(ConversationService {
            store,
            classifier,
            orchestrator: Orchestrator::new(collector, configured),
            turn_locks: TurnLocks::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::classifier::MockClassifier;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::domain::conversation::DialogPhase;

    fn full_builder() -> ConversationServiceBuilder {
        ConversationService::builder()
            .session_store(Arc::new(InMemorySessionStore::new()))
            .classifier(Arc::new(MockClassifier::new()))
            .detail_collector(DetailCollector::silent())
    }

    #[test]
    fn builds_with_all_collaborators() {
        let service = full_builder().build().unwrap();
        assert!(service.classifier_configured());
    }

    #[test]
    fn missing_classifier_fails() {
        let result = ConversationService::builder()
            .session_store(Arc::new(InMemorySessionStore::new()))
            .detail_collector(DetailCollector::silent())
            .build();

        assert_eq!(
            result.err(),
            Some(SetupError::MissingCollaborator("intent classifier"))
        );
    }

    #[test]
    fn missing_detail_collector_fails() {
        let result = ConversationService::builder()
            .session_store(Arc::new(InMemorySessionStore::new()))
            .classifier(Arc::new(MockClassifier::new()))
            .build();

        assert_eq!(
            result.err(),
            Some(SetupError::MissingCollaborator("detail collector"))
        );
    }

    #[test]
    fn missing_store_fails() {
        let result = ConversationService::builder()
            .classifier(Arc::new(MockClassifier::new()))
            .detail_collector(DetailCollector::silent())
            .build();

        assert_eq!(
            result.err(),
            Some(SetupError::MissingCollaborator("session store"))
        );
    }

    #[test]
    fn unconfigured_classifier_is_reported() {
        let service = full_builder()
            .classifier(Arc::new(MockClassifier::unconfigured()))
            .build()
            .unwrap();
        assert!(!service.classifier_configured());
    }

    #[tokio::test]
    async fn full_round_trip() {
        let service = full_builder().build().unwrap();

        let started = service.start(StartConversationCommand::new()).await.unwrap();
        let sent = service
            .send_message(SendMessageCommand::new(started.session_id, "hi"))
            .await
            .unwrap();
        assert_eq!(sent.phase, DialogPhase::Greeting);

        let view = service
            .get(GetConversationQuery {
                session_id: started.session_id,
            })
            .await
            .unwrap();
        assert_eq!(view.turn_count, 1);

        service
            .end(EndConversationCommand {
                session_id: started.session_id,
            })
            .await
            .unwrap();
        assert!(service
            .get(GetConversationQuery {
                session_id: started.session_id
            })
            .await
            .is_err());
    }
}
