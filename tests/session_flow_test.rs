use anyhow::Result;
use mecharek::app::session::{GREETING, REMEMBER_ACK};
use mecharek::{
    AppConfig, Catalog, LocalStorage, RecommendEngine, ResponseStyle, Session, SwitchFeel, Turn,
    UseCase,
};
use tempfile::TempDir;

#[test]
fn test_remembered_preferences_apply_to_later_queries() {
    let engine = RecommendEngine::new(Catalog::builtin()).with_top_n(3);
    let mut session = Session::new(&engine, ResponseStyle::Santai);

    let turn = session.handle("ingat ya, aku suka tactile buat ngoding");
    assert_eq!(turn.reply(), REMEMBER_ACK);

    // 新的輸入只帶預算，switch 與用途沿用記住的偏好
    let turn = session.handle("budget 500rb");
    let Turn::Recommended { recommendation, reply } = turn else {
        panic!("expected a recommendation");
    };

    let prefs = &recommendation.preferences;
    assert_eq!(prefs.switch, Some(SwitchFeel::Tactile));
    assert_eq!(prefs.use_case, UseCase::Coding);
    assert_eq!(prefs.budget, Some(500_000));
    assert_eq!(recommendation.picks[0].entry.name, "Ajazz AK33");
    assert!(reply.contains("**Ajazz AK33**"));
    assert!(reply.contains("Rp 450.000"));
}

#[test]
fn test_queries_are_independent_without_remember() {
    let engine = RecommendEngine::new(Catalog::builtin());
    let mut session = Session::new(&engine, ResponseStyle::Formal);

    session.handle("linear 60% gaming");
    let turn = session.handle("500rb");
    let Turn::Recommended { recommendation, .. } = turn else {
        panic!("expected a recommendation");
    };

    assert_eq!(recommendation.preferences.switch, None);
    assert_eq!(recommendation.preferences.layout, None);
    assert_eq!(session.memory().history.len(), 2);
    assert_eq!(
        session.memory().last.as_ref().and_then(|p| p.budget),
        Some(500_000)
    );
}

#[test]
fn test_formal_reply_wording() {
    let engine = RecommendEngine::new(Catalog::builtin()).with_top_n(1);
    let mut session = Session::new(&engine, ResponseStyle::Formal);

    let turn = session.handle("tkl tactile 2 juta kantor");
    assert!(turn
        .reply()
        .starts_with("Berikut rekomendasi yang cocok untukmu:"));
    assert!(turn.reply().contains("**Ducky One 2 (TKL)**"));
    assert!(turn.reply().contains("Rp 2.000.000"));
}

#[test]
fn test_zero_top_n_yields_no_match_message() {
    let engine = RecommendEngine::new(Catalog::builtin()).with_top_n(0);
    let mut session = Session::new(&engine, ResponseStyle::Santai);

    let turn = session.handle("linear");
    assert!(turn.reply().starts_with("Maaf, aku belum menemukan keyboard"));
}

#[test]
fn test_export_transcript() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = LocalStorage::new(temp_dir.path());

    let engine = RecommendEngine::new(Catalog::builtin());
    let mut session = Session::new(&engine, ResponseStyle::Santai);
    session.handle("simpan: aku prefer clicky");
    session.export(&storage, "mecharek_conversation.txt")?;

    let text = std::fs::read_to_string(temp_dir.path().join("mecharek_conversation.txt"))?;
    let blocks: Vec<&str> = text.split("\n\n").collect();
    assert_eq!(
        blocks,
        vec![
            format!("ASSISTANT: {}", GREETING).as_str(),
            "USER: simpan: aku prefer clicky",
            format!("ASSISTANT: {}", REMEMBER_ACK).as_str(),
        ]
    );
    Ok(())
}

#[test]
fn test_session_built_from_config() -> Result<()> {
    let config = AppConfig::from_toml_str(
        r#"
[recommend]
top_n = 2
style = "formal"

[session]
remember_keywords = ["remember"]

[keywords.use_case]
gaming = ["fps"]
"#,
    )?;

    let engine = RecommendEngine::new(Catalog::builtin())
        .with_extractor(config.build_extractor()?)
        .with_top_n(config.top_n());
    let mut session = Session::new(&engine, config.style())
        .with_remember_keywords(config.remember_keywords().unwrap_or_default().to_vec());

    // 「suka」不再觸發記憶
    let turn = session.handle("aku suka main fps");
    let Turn::Recommended { recommendation, .. } = turn else {
        panic!("expected a recommendation");
    };
    assert_eq!(recommendation.preferences.use_case, UseCase::Gaming);
    assert_eq!(recommendation.picks.len(), 2);

    assert!(matches!(
        session.handle("please remember 60%"),
        Turn::Remembered { .. }
    ));
    Ok(())
}
