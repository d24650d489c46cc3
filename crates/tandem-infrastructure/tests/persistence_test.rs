use chrono::{TimeZone, Utc};
use std::sync::Arc;
use tandem_application::TandemApp;
use tandem_core::config::AppConfig;
use tandem_core::seed::SeedData;
use tandem_core::session::NewSession;
use tandem_infrastructure::{TomlConversationRepository, TomlSessionRepository};
use tempfile::TempDir;

async fn open(data_dir: &std::path::Path) -> TandemApp {
    TandemApp::load(
        SeedData::demo().unwrap(),
        &AppConfig::default(),
        Arc::new(TomlSessionRepository::new(data_dir)),
        Arc::new(TomlConversationRepository::new(data_dir)),
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn test_state_survives_restart() {
    let temp_dir = TempDir::new().unwrap();

    let mut app = open(temp_dir.path()).await;
    let stored = app.sessions_mut().add_session(NewSession {
        partner_name: "Li Wei".to_string(),
        scheduled_at: Utc.with_ymd_and_hms(2030, 5, 1, 9, 0, 0).unwrap(),
        duration_minutes: 45,
        language: "Mandarin".to_string(),
        topic: "Tones".to_string(),
        notes: Some("Bring flashcards".to_string()),
    });
    app.conversations_mut().set_active_conversation("2").unwrap();
    let sent = app
        .conversations_mut()
        .send_message("2", "ありがとうございます!")
        .unwrap();
    app.save().await.unwrap();

    assert!(temp_dir.path().join("sessions.toml").exists());
    assert!(temp_dir.path().join("conversations.toml").exists());

    let reopened = open(temp_dir.path()).await;
    assert_eq!(reopened.sessions().upcoming()[0], stored);
    assert_eq!(reopened.sessions().past().len(), 2);
    assert_eq!(reopened.conversations().active_conversation_id(), Some("2"));

    let thread = reopened.conversations().thread("2").unwrap();
    assert_eq!(thread.messages.last(), Some(&sent));
    let summary = reopened.conversations().summary("2").unwrap();
    assert_eq!(
        summary.last_message.as_ref().map(|m| m.text.as_str()),
        Some("ありがとうございます!")
    );
}

#[tokio::test]
async fn test_fresh_directory_starts_from_seed() {
    let temp_dir = TempDir::new().unwrap();

    let app = open(temp_dir.path()).await;

    assert_eq!(app.sessions().upcoming().len(), 2);
    assert_eq!(app.conversations().conversations().len(), 4);
    assert!(!temp_dir.path().join("sessions.toml").exists());
}
