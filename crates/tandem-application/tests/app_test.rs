use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::sync::{Arc, Mutex};
use tandem_application::{ScheduleRequest, TandemApp};
use tandem_core::config::AppConfig;
use tandem_core::conversation::{ConversationRepository, ConversationSnapshot};
use tandem_core::error::Result;
use tandem_core::seed::SeedData;
use tandem_core::session::{NewSession, SessionRepository, SessionSnapshot};

// Mock SessionRepository for testing
#[derive(Default)]
struct MockSessionRepository {
    snapshot: Mutex<Option<SessionSnapshot>>,
}

#[async_trait]
impl SessionRepository for MockSessionRepository {
    async fn load(&self) -> Result<Option<SessionSnapshot>> {
        Ok(self.snapshot.lock().unwrap().clone())
    }

    async fn save(&self, snapshot: &SessionSnapshot) -> Result<()> {
        *self.snapshot.lock().unwrap() = Some(snapshot.clone());
        Ok(())
    }
}

// Mock ConversationRepository for testing
#[derive(Default)]
struct MockConversationRepository {
    snapshot: Mutex<Option<ConversationSnapshot>>,
}

#[async_trait]
impl ConversationRepository for MockConversationRepository {
    async fn load(&self) -> Result<Option<ConversationSnapshot>> {
        Ok(self.snapshot.lock().unwrap().clone())
    }

    async fn save(&self, snapshot: &ConversationSnapshot) -> Result<()> {
        *self.snapshot.lock().unwrap() = Some(snapshot.clone());
        Ok(())
    }
}

fn seeded_app() -> TandemApp {
    TandemApp::from_seed(SeedData::demo().unwrap(), &AppConfig::default()).unwrap()
}

#[test]
fn test_add_session_scenario() {
    let mut app = seeded_app();

    let stored = app.sessions_mut().add_session(NewSession {
        partner_name: "Test".to_string(),
        scheduled_at: Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap(),
        duration_minutes: 30,
        language: "English".to_string(),
        topic: "Intro".to_string(),
        notes: None,
    });

    assert_eq!(app.sessions().upcoming().first(), Some(&stored));
    assert!(app.sessions().past().iter().all(|s| s.id != stored.id));
}

#[test]
fn test_send_to_unknown_conversation_touches_no_store() {
    let mut app = seeded_app();
    let sessions_before = app.sessions().snapshot();
    let conversations_before = app.conversations().snapshot();
    let mut session_events = app.sessions().subscribe();
    let mut conversation_events = app.conversations().subscribe();

    let err = app.conversations_mut().send_message("999", "Hola!").unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(app.sessions().snapshot(), sessions_before);
    assert_eq!(app.conversations().snapshot(), conversations_before);
    assert!(session_events.try_recv().is_err());
    assert!(conversation_events.try_recv().is_err());
}

#[test]
fn test_send_blank_text_touches_no_store() {
    let mut app = seeded_app();
    let sessions_before = app.sessions().snapshot();
    let conversations_before = app.conversations().snapshot();

    let err = app.conversations_mut().send_message("1", "  \t ").unwrap_err();

    assert!(err.is_invalid_input());
    assert_eq!(app.sessions().snapshot(), sessions_before);
    assert_eq!(app.conversations().snapshot(), conversations_before);
}

#[test]
fn test_in_memory_app_is_not_persistent() {
    assert!(!seeded_app().is_persistent());
}

#[test]
fn test_schedule_session_uses_partner_language() {
    let mut app = seeded_app();

    let outcome = app
        .schedule_session(ScheduleRequest {
            partner_id: "4".to_string(),
            scheduled_at: Some(Utc::now() + chrono::Duration::days(1)),
            duration_minutes: Some(60),
            ..Default::default()
        })
        .unwrap();

    assert_eq!(outcome.session.language, "Mandarin");
    assert_eq!(outcome.session.topic, "Mandarin practice session");
    assert_eq!(app.sessions().upcoming()[0].id, outcome.session.id);
}

#[tokio::test]
async fn test_load_without_saved_state_uses_seed() {
    let app = TandemApp::load(
        SeedData::demo().unwrap(),
        &AppConfig::default(),
        Arc::new(MockSessionRepository::default()),
        Arc::new(MockConversationRepository::default()),
    )
    .await
    .unwrap();

    assert!(app.is_persistent());
    assert_eq!(app.sessions().upcoming().len(), 2);
    assert_eq!(app.conversations().conversations().len(), 4);
    assert_eq!(app.partners().all().len(), 4);
}

#[tokio::test]
async fn test_saved_state_survives_reload() {
    let session_repository = Arc::new(MockSessionRepository::default());
    let conversation_repository = Arc::new(MockConversationRepository::default());

    let mut app = TandemApp::load(
        SeedData::demo().unwrap(),
        &AppConfig::default(),
        session_repository.clone(),
        conversation_repository.clone(),
    )
    .await
    .unwrap();
    app.conversations_mut().set_active_conversation("3").unwrap();
    app.conversations_mut()
        .send_message("3", "Merci pour la ressource!")
        .unwrap();
    app.save().await.unwrap();

    let reloaded = TandemApp::load(
        SeedData::demo().unwrap(),
        &AppConfig::default(),
        session_repository,
        conversation_repository,
    )
    .await
    .unwrap();

    let thread = reloaded.conversations().thread("3").unwrap();
    assert_eq!(thread.messages.len(), 4);
    assert_eq!(thread.messages[3].text, "Merci pour la ressource!");
    assert_eq!(reloaded.conversations().active_conversation_id(), Some("3"));
}
