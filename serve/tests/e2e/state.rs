use config::{ImageProvider, LlmProvider, Settings};
use serve::AppState;

#[test]
fn state_from_settings_opens_journal_file() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("journal.db");
    let settings = Settings {
        llm_provider: LlmProvider::Mock,
        image_provider: ImageProvider::None,
        journal_db: db.to_string_lossy().into_owned(),
        ..Settings::default()
    };
    let state = AppState::from_settings(&settings).unwrap();
    assert_eq!(state.analyzer.text_model(), "mock");
    assert!(state.analyzer.image_provider().is_none());
    assert_eq!(state.cors_origins, settings.cors_origins);
    assert!(db.exists());
}

#[test]
fn state_from_settings_without_key_or_fallback_fails() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings {
        llm_provider: LlmProvider::Gemini,
        gemini_api_key: None,
        offline_fallback: false,
        journal_db: dir.path().join("journal.db").to_string_lossy().into_owned(),
        ..Settings::default()
    };
    assert!(AppState::from_settings(&settings).is_err());
}
