use crate::app::formatter;
use crate::core::engine::{RecommendEngine, Recommendation};
use crate::domain::model::{PreferenceRecord, ResponseStyle, UseCase};
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_REMEMBER_KEYWORDS: &[&str] = &["ingat", "simpan", "prefer", "suka", "favorit"];

pub const GREETING: &str = "Halo! Aku MechaRek — kamu sedang cari mechanical keyboard? Coba beri preferensimu: budget, switch (linear/tactile/clicky), layout (60%/75%/TKL), dan penggunaan (ngoding/gaming).";

pub const REMEMBER_ACK: &str = "Baik, aku akan ingat preferensimu untuk sesi ini.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => f.write_str("USER"),
            Role::Assistant => f.write_str("ASSISTANT"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub query: String,
    pub time: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionMemory {
    /// 使用者明確要求記住的偏好
    pub saved: Option<PreferenceRecord>,
    /// 最近一次推薦所用的偏好
    pub last: Option<PreferenceRecord>,
    pub history: Vec<HistoryEntry>,
}

/// 一輪對話的結果
#[derive(Debug)]
pub enum Turn<'e> {
    Remembered {
        reply: String,
        saved: PreferenceRecord,
    },
    Recommended {
        reply: String,
        recommendation: Recommendation<'e>,
    },
}

impl Turn<'_> {
    pub fn reply(&self) -> &str {
        match self {
            Turn::Remembered { reply, .. } | Turn::Recommended { reply, .. } => reply,
        }
    }
}

/// 逐欄覆寫：較新的已設定欄位取代舊值。用途預設為 general，視同未設定。
pub fn merge_preferences(older: &PreferenceRecord, newer: &PreferenceRecord) -> PreferenceRecord {
    PreferenceRecord {
        switch: newer.switch.or(older.switch),
        layout: newer.layout.or(older.layout),
        use_case: if newer.use_case == UseCase::General {
            older.use_case
        } else {
            newer.use_case
        },
        budget: newer.budget.or(older.budget),
        raw_text: newer.raw_text.clone(),
    }
}

/// 單一使用者的對話狀態。記憶只存在於此物件，不會落地。
pub struct Session<'e> {
    engine: &'e RecommendEngine,
    style: ResponseStyle,
    remember_keywords: Vec<String>,
    messages: Vec<Message>,
    memory: SessionMemory,
}

impl<'e> Session<'e> {
    pub fn new(engine: &'e RecommendEngine, style: ResponseStyle) -> Self {
        Self {
            engine,
            style,
            remember_keywords: DEFAULT_REMEMBER_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            messages: vec![Self::greeting()],
            memory: SessionMemory::default(),
        }
    }

    pub fn with_remember_keywords(mut self, keywords: Vec<String>) -> Self {
        self.remember_keywords = keywords
            .into_iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        self
    }

    fn greeting() -> Message {
        Message {
            role: Role::Assistant,
            content: GREETING.to_string(),
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn memory(&self) -> &SessionMemory {
        &self.memory
    }

    pub fn style(&self) -> ResponseStyle {
        self.style
    }

    pub fn set_style(&mut self, style: ResponseStyle) {
        self.style = style;
    }

    pub fn wants_to_remember(&self, input: &str) -> bool {
        let input = input.to_lowercase();
        self.remember_keywords
            .iter()
            .any(|k| input.contains(k.as_str()))
    }

    pub fn handle(&mut self, input: &str) -> Turn<'e> {
        self.messages.push(Message {
            role: Role::User,
            content: input.to_string(),
        });

        let engine = self.engine;
        let fresh = engine.extract(input);

        let turn = if self.wants_to_remember(input) {
            let saved = match &self.memory.saved {
                Some(saved) => merge_preferences(saved, &fresh),
                None => fresh,
            };
            tracing::info!("💾 Saved preferences for this session");
            self.memory.saved = Some(saved.clone());
            Turn::Remembered {
                reply: REMEMBER_ACK.to_string(),
                saved,
            }
        } else {
            let effective = match &self.memory.saved {
                Some(saved) => merge_preferences(saved, &fresh),
                None => fresh,
            };
            let recommendation = engine.recommend_for(effective.clone());
            let reply = formatter::format_recommendation(&recommendation.entries(), self.style);

            self.memory.last = Some(effective);
            self.memory.history.push(HistoryEntry {
                query: input.to_string(),
                time: Utc::now(),
            });

            Turn::Recommended {
                reply,
                recommendation,
            }
        };

        self.messages.push(Message {
            role: Role::Assistant,
            content: turn.reply().to_string(),
        });

        turn
    }

    pub fn reset(&mut self) {
        self.messages = vec![Self::greeting()];
        self.memory = SessionMemory::default();
        tracing::info!("🧹 Conversation and memory reset");
    }

    /// `ROLE: content` 區塊，以空行分隔
    pub fn transcript(&self) -> String {
        self.messages
            .iter()
            .map(|m| format!("{}: {}", m.role, m.content))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn export<S: Storage>(&self, storage: &S, path: &str) -> Result<()> {
        storage.write_file(path, self.transcript().as_bytes())?;
        tracing::info!("📁 Conversation exported to {}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::Catalog;
    use crate::domain::model::SwitchFeel;

    #[test]
    fn test_merge_keeps_older_fields_when_newer_unset() {
        let older = PreferenceRecord {
            switch: Some(SwitchFeel::Tactile),
            use_case: UseCase::Coding,
            budget: Some(1_000_000),
            ..PreferenceRecord::default()
        };
        let newer = PreferenceRecord {
            budget: Some(500_000),
            raw_text: "500rb aja".to_string(),
            ..PreferenceRecord::default()
        };

        let merged = merge_preferences(&older, &newer);
        assert_eq!(merged.switch, Some(SwitchFeel::Tactile));
        assert_eq!(merged.use_case, UseCase::Coding);
        assert_eq!(merged.budget, Some(500_000));
        assert_eq!(merged.raw_text, "500rb aja");
    }

    #[test]
    fn test_remember_trigger_does_not_recommend() {
        let engine = RecommendEngine::new(Catalog::builtin());
        let mut session = Session::new(&engine, ResponseStyle::Santai);

        let turn = session.handle("tolong ingat aku suka tactile");
        assert!(matches!(turn, Turn::Remembered { .. }));
        assert_eq!(turn.reply(), REMEMBER_ACK);
        assert!(session.memory().history.is_empty());
        assert_eq!(
            session.memory().saved.as_ref().and_then(|p| p.switch),
            Some(SwitchFeel::Tactile)
        );
    }

    #[test]
    fn test_reset_restores_greeting_only() {
        let engine = RecommendEngine::new(Catalog::builtin());
        let mut session = Session::new(&engine, ResponseStyle::Formal);
        session.handle("keyboard 60% buat gaming");
        assert_eq!(session.messages().len(), 3);

        session.reset();
        assert_eq!(session.messages().len(), 1);
        assert!(session.memory().last.is_none());
        assert_eq!(session.transcript(), format!("ASSISTANT: {}", GREETING));
    }

    #[test]
    fn test_custom_remember_keywords() {
        let engine = RecommendEngine::new(Catalog::builtin());
        let session = Session::new(&engine, ResponseStyle::Santai)
            .with_remember_keywords(vec!["Remember".to_string()]);
        assert!(session.wants_to_remember("please remember this"));
        assert!(!session.wants_to_remember("aku suka linear"));
    }
}
