//! Integration tests for the conversation flow.
//!
//! These tests drive the public conversation service end to end:
//! 1. Unconfigured classifier answers with default visa details
//! 2. Classified requests keep extracted details and default the rest
//! 3. Unknown intents are reported back and the dialog restarts
//! 4. Visa types without guidance fall back to a "coming soon" message
//! 5. Messages racing on one conversation are handled one after another

use std::sync::Arc;
use std::time::Duration;

use visa_guide::adapters::{InMemorySessionStore, MockClassifier};
use visa_guide::application::{
    ConversationService, EndConversationCommand, GetConversationError, GetConversationQuery,
    SendMessageCommand, SendMessageError, StartConversationCommand,
};
use visa_guide::domain::conversation::{messages, Awaiting, DialogPhase};
use visa_guide::domain::foundation::SessionId;
use visa_guide::domain::visa::{select_response, DetailCollector, DetailStep};
use visa_guide::ports::{ClassifierEntities, ClassifierError, ClassifierResult};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn service(classifier: MockClassifier, collector: DetailCollector) -> ConversationService {
    ConversationService::builder()
        .session_store(Arc::new(InMemorySessionStore::new()))
        .classifier(Arc::new(classifier))
        .detail_collector(collector)
        .build()
        .expect("all collaborators supplied")
}

async fn open(service: &ConversationService) -> SessionId {
    service
        .start(StartConversationCommand::new())
        .await
        .expect("conversation starts")
        .session_id
}

async fn say(service: &ConversationService, id: SessionId, text: &str) -> Vec<String> {
    service
        .send_message(SendMessageCommand::new(id, text))
        .await
        .expect("message handled")
        .replies
}

fn guidance(visa: &str, work: &str) -> String {
    select_response(visa, work).to_string()
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn unconfigured_classifier_uses_default_details() {
    let classifier = MockClassifier::unconfigured();
    let service = service(classifier.clone(), DetailCollector::silent());
    let id = open(&service).await;

    let replies = say(&service, id, "Hi there").await;

    assert_eq!(replies, vec![guidance("f1", "opt")]);
    assert_eq!(classifier.call_count(), 0);

    // Every later message is answered the same way.
    let replies = say(&service, id, "anything else").await;
    assert_eq!(replies, vec![guidance("f1", "opt")]);
}

#[tokio::test]
async fn eligibility_with_extracted_details() {
    let classifier = MockClassifier::new().with_result(
        ClassifierResult::new("eligibility")
            .with_score(0.93)
            .with_entities(
                ClassifierEntities::default()
                    .with_visa_type("f1")
                    .with_work_type("cpt"),
            ),
    );
    let service = service(classifier, DetailCollector::silent());
    let id = open(&service).await;

    assert_eq!(
        say(&service, id, "hello").await,
        vec![messages::INTRO_PROMPT.to_string()]
    );
    let replies = say(&service, id, "Am I eligible for CPT on an F1?").await;

    assert_eq!(
        replies,
        vec![guidance("f1", "cpt"), messages::RESTART_PROMPT.to_string()]
    );
}

#[tokio::test]
async fn unknown_intent_is_reported_and_restarts() {
    let classifier = MockClassifier::new()
        .with_intent("GetWeather")
        .with_intent("visa_information");
    let service = service(classifier, DetailCollector::silent());
    let id = open(&service).await;
    say(&service, id, "hello").await;

    let replies = say(&service, id, "what's the weather like?").await;

    assert_eq!(replies.len(), 2);
    assert!(replies[0].contains("didn't get that"));
    assert!(replies[0].contains("GetWeather"));
    assert_eq!(replies[1], messages::RESTART_PROMPT);

    // The dialog keeps going after the miss.
    let replies = say(&service, id, "tell me about visas").await;
    assert_eq!(replies[0], guidance("f1", "opt"));
}

#[tokio::test]
async fn other_visa_types_get_coming_soon() {
    let classifier = MockClassifier::new().with_result(
        ClassifierResult::new("procedure_auth")
            .with_entities(ClassifierEntities::default().with_visa_type("F-2")),
    );
    let service = service(classifier, DetailCollector::silent());
    let id = open(&service).await;
    say(&service, id, "hello").await;

    let replies = say(&service, id, "how do I get work authorization on F-2?").await;

    assert!(replies[0].contains("f2"));
    assert_eq!(replies[0], guidance("f2", "opt"));
}

#[tokio::test]
async fn classifier_outage_is_survivable() {
    let classifier = MockClassifier::new()
        .with_error(ClassifierError::Timeout { timeout_secs: 10 })
        .with_intent("eligibility");
    let service = service(classifier, DetailCollector::silent());
    let id = open(&service).await;
    say(&service, id, "hello").await;

    let replies = say(&service, id, "can I work?").await;
    assert_eq!(replies[0], messages::CLASSIFIER_UNAVAILABLE);

    let replies = say(&service, id, "can I work?").await;
    assert_eq!(replies[0], guidance("f1", "opt"));
}

#[tokio::test]
async fn interactive_mode_asks_for_missing_details() {
    let classifier = MockClassifier::new().with_result(
        ClassifierResult::new("eligibility")
            .with_entities(ClassifierEntities::default().with_visa_type("f1")),
    );
    let service = service(classifier, DetailCollector::interactive());
    let id = open(&service).await;
    say(&service, id, "hello").await;

    let replies = say(&service, id, "can I work?").await;
    assert_eq!(replies, vec![DetailStep::WorkType.prompt().to_string()]);

    let view = service
        .get(GetConversationQuery { session_id: id })
        .await
        .expect("conversation exists");
    assert_eq!(view.phase, DialogPhase::DetailCollection);
    assert_eq!(view.awaiting, Awaiting::Detail(DetailStep::WorkType));

    let replies = say(&service, id, "On-Campus").await;
    assert_eq!(
        replies,
        vec![DetailStep::OccupationStatus.prompt().to_string()]
    );

    let replies = say(&service, id, "student").await;
    assert_eq!(
        replies,
        vec![
            guidance("f1", "on campus"),
            messages::RESTART_PROMPT.to_string()
        ]
    );
}

#[tokio::test]
async fn empty_message_is_rejected_without_a_turn() {
    let service = service(MockClassifier::new(), DetailCollector::silent());
    let id = open(&service).await;

    let result = service
        .send_message(SendMessageCommand::new(id, "   "))
        .await;
    assert!(result.is_err());

    let view = service
        .get(GetConversationQuery { session_id: id })
        .await
        .expect("conversation exists");
    assert_eq!(view.turn_count, 0);
    assert_eq!(view.awaiting, Awaiting::Start);
}

#[tokio::test]
async fn concurrent_messages_on_one_conversation_take_turns() {
    let classifier = MockClassifier::new()
        .with_intent("GetWeather")
        .with_intent("GetWeather")
        .with_delay(Duration::from_millis(100));
    let service = service(classifier.clone(), DetailCollector::silent());
    let id = open(&service).await;
    say(&service, id, "hi").await;

    let (first, second) = tokio::join!(
        service.send_message(SendMessageCommand::new(id, "first question")),
        service.send_message(SendMessageCommand::new(id, "second question")),
    );

    assert!(first.is_ok());
    assert!(second.is_ok());
    assert_eq!(classifier.call_count(), 2);

    let view = service
        .get(GetConversationQuery { session_id: id })
        .await
        .expect("conversation exists");
    assert_eq!(view.turn_count, 3);
    assert_eq!(view.phase, DialogPhase::Greeting);
}

#[tokio::test]
async fn concurrent_answers_fill_consecutive_details() {
    let classifier = MockClassifier::unconfigured();
    let service = service(classifier, DetailCollector::interactive());
    let id = open(&service).await;
    assert_eq!(
        say(&service, id, "hello").await,
        vec![DetailStep::VisaType.prompt().to_string()]
    );

    let (first, second) = tokio::join!(
        service.send_message(SendMessageCommand::new(id, "f1")),
        service.send_message(SendMessageCommand::new(id, "cpt")),
    );
    assert!(first.is_ok());
    assert!(second.is_ok());

    let view = service
        .get(GetConversationQuery { session_id: id })
        .await
        .expect("conversation exists");
    assert_eq!(view.turn_count, 3);
    assert_eq!(view.awaiting, Awaiting::Detail(DetailStep::OccupationStatus));
}

#[tokio::test]
async fn ending_during_a_turn_keeps_the_conversation_ended() {
    let classifier = MockClassifier::new()
        .with_intent("eligibility")
        .with_delay(Duration::from_millis(100));
    let service = service(classifier, DetailCollector::silent());
    let id = open(&service).await;
    say(&service, id, "hello").await;

    let in_flight = tokio::spawn({
        let service = service.clone();
        async move {
            service
                .send_message(SendMessageCommand::new(id, "can I work?"))
                .await
        }
    });
    tokio::time::sleep(Duration::from_millis(20)).await;
    service
        .end(EndConversationCommand { session_id: id })
        .await
        .expect("conversation ends");

    let result = in_flight.await.expect("turn task completes");
    assert!(matches!(result, Err(SendMessageError::SessionNotFound(missing)) if missing == id));
    assert!(matches!(
        service.get(GetConversationQuery { session_id: id }).await,
        Err(GetConversationError::NotFound(_))
    ));
}
