use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// 軸體手感 (與品牌無關)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwitchFeel {
    Linear,
    Tactile,
    Clicky,
}

impl SwitchFeel {
    /// 用來比對目錄中軸體描述的關鍵字
    pub fn keyword(&self) -> &'static str {
        match self {
            SwitchFeel::Linear => "linear",
            SwitchFeel::Tactile => "tactile",
            SwitchFeel::Clicky => "clicky",
        }
    }
}

impl fmt::Display for SwitchFeel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for SwitchFeel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "linear" => Ok(SwitchFeel::Linear),
            "tactile" => Ok(SwitchFeel::Tactile),
            "clicky" => Ok(SwitchFeel::Clicky),
            other => Err(format!("unknown switch feel '{}'", other)),
        }
    }
}

/// 鍵盤配列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layout {
    #[serde(rename = "60%")]
    Sixty,
    #[serde(rename = "65%")]
    SixtyFive,
    #[serde(rename = "75%")]
    SeventyFive,
    #[serde(rename = "80% (TKL)", alias = "80%", alias = "tkl", alias = "TKL")]
    Tenkeyless,
    #[serde(rename = "full", alias = "fullsize", alias = "100%")]
    Full,
}

impl Layout {
    pub fn label(&self) -> &'static str {
        match self {
            Layout::Sixty => "60%",
            Layout::SixtyFive => "65%",
            Layout::SeventyFive => "75%",
            Layout::Tenkeyless => "80% (TKL)",
            Layout::Full => "full",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "60%" | "60" => Ok(Layout::Sixty),
            "65%" | "65" => Ok(Layout::SixtyFive),
            "75%" | "75" => Ok(Layout::SeventyFive),
            "80% (tkl)" | "80%" | "80" | "tkl" => Ok(Layout::Tenkeyless),
            "full" | "fullsize" | "100%" => Ok(Layout::Full),
            other => Err(format!("unknown layout '{}'", other)),
        }
    }
}

/// 主要用途。`Productivity` 只出現在目錄標籤，抽取器不會產生它。
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum UseCase {
    #[serde(alias = "ngoding")]
    Coding,
    Gaming,
    #[default]
    #[serde(alias = "umum")]
    General,
    #[serde(alias = "office")]
    Professional,
    Productivity,
}

impl UseCase {
    pub fn as_str(&self) -> &'static str {
        match self {
            UseCase::Coding => "coding",
            UseCase::Gaming => "gaming",
            UseCase::General => "general",
            UseCase::Professional => "professional",
            UseCase::Productivity => "productivity",
        }
    }
}

impl fmt::Display for UseCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UseCase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "coding" | "ngoding" => Ok(UseCase::Coding),
            "gaming" => Ok(UseCase::Gaming),
            "general" | "umum" => Ok(UseCase::General),
            "professional" | "office" => Ok(UseCase::Professional),
            "productivity" => Ok(UseCase::Productivity),
            other => Err(format!("unknown use case '{}'", other)),
        }
    }
}

/// 目錄中的一把鍵盤。載入後不可變。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub layout: Layout,
    #[serde(rename = "switch", alias = "switch_description")]
    pub switch_description: String,
    /// 價格，以最小貨幣單位計 (IDR 沒有小數，即盧比)
    #[serde(alias = "price_idr")]
    pub price: u64,
    #[serde(alias = "use_case")]
    pub use_cases: BTreeSet<UseCase>,
    #[serde(default, alias = "desc")]
    pub description: String,
}

impl CatalogEntry {
    pub fn new(
        name: impl Into<String>,
        layout: Layout,
        switch_description: impl Into<String>,
        price: u64,
        use_cases: impl IntoIterator<Item = UseCase>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            layout,
            switch_description: switch_description.into(),
            price,
            use_cases: use_cases.into_iter().collect(),
            description: description.into(),
        }
    }

    pub fn supports(&self, use_case: UseCase) -> bool {
        self.use_cases.contains(&use_case)
    }
}

/// 從一段使用者輸入抽取出的偏好。未命中的欄位保持 `None`。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceRecord {
    pub switch: Option<SwitchFeel>,
    pub layout: Option<Layout>,
    pub use_case: UseCase,
    pub budget: Option<u64>,
    /// 原始輸入，只用於稽核與日誌
    pub raw_text: String,
}

impl PreferenceRecord {
    pub fn has_constraints(&self) -> bool {
        self.switch.is_some()
            || self.layout.is_some()
            || self.budget.is_some()
            || self.use_case != UseCase::General
    }
}

/// 排名過程中的暫存結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredEntry<'a> {
    pub entry: &'a CatalogEntry,
    pub score: i64,
}

/// 回覆的語氣
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStyle {
    #[default]
    #[serde(alias = "casual")]
    Santai,
    Formal,
}

impl FromStr for ResponseStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "santai" | "casual" => Ok(ResponseStyle::Santai),
            "formal" => Ok(ResponseStyle::Formal),
            other => Err(format!("unknown response style '{}'", other)),
        }
    }
}
