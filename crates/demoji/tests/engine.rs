use demoji::coordinator::{Mode, SharedDocument};
use demoji::dom::Document;
use demoji::domain::config::AppConfig;
use demoji::{Engine, is_enabled};

fn config_in(dir: &tempfile::TempDir) -> AppConfig {
    let mut config = AppConfig::default();
    config.storage.settings_path = dir.path().join("settings.json");
    config
}

#[test]
fn html_feature_is_on_by_default() {
    assert!(is_enabled("html"));
    assert!(!is_enabled("server"));
}

#[tokio::test]
async fn zero_relay_capacity_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let mut config = config_in(&tmp);
    config.relay.capacity = 0;
    assert!(Engine::open(config).await.is_err());
}

#[tokio::test]
async fn fresh_profile_is_idle_until_defaults_are_installed() {
    let tmp = tempfile::tempdir().unwrap();
    let engine = Engine::open(config_in(&tmp)).await.unwrap();

    let mut doc = Document::parse_html("<p>ok 👍</p>");
    let (mut session, _inbox) = engine.attach("tab-1");
    assert_eq!(session.start(&mut doc).await, Mode::Idle);

    engine.editor().install().await.unwrap();

    let mut doc = Document::parse_html("<p>ok 👍</p>");
    let (mut session, _inbox) = engine.attach("tab-2");
    assert_eq!(session.start(&mut doc).await, Mode::Active);
    assert_eq!(doc.text_content(doc.body().unwrap()), "ok ");
}

#[tokio::test]
async fn editor_changes_reach_attached_sessions() {
    let tmp = tempfile::tempdir().unwrap();
    let engine = Engine::open(config_in(&tmp)).await.unwrap();
    engine.editor().install().await.unwrap();

    let mut doc = Document::parse_html("<p>ok 👍</p>");
    let (mut session, inbox) = engine.attach("tab-1");
    session.start(&mut doc).await;

    assert_eq!(engine.editor().save_lists("👍", "").await.unwrap(), 1);
    let _ = engine.relay().shutdown();

    let doc = SharedDocument::new(doc);
    assert_eq!(session.run(&doc, inbox).await, Mode::Active);
    assert_eq!(doc.read(|d| d.text_content(d.body().unwrap())), "ok 👍");
}
