use crate::domain::model::{Layout, PreferenceRecord, SwitchFeel, UseCase};
use regex::Regex;
use std::sync::LazyLock;

/// 數字加上可選的單位後綴。整段文字只取第一個命中。
static BUDGET_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9]+[.,]?[0-9]*)\s*(k|rb|ribu|juta|jt|m|miliar)?")
        .expect("budget pattern is a valid regex")
});

static DEFAULT_EXTRACTOR: LazyLock<PreferenceExtractor> =
    LazyLock::new(PreferenceExtractor::default);

const SWITCH_KEYWORDS: &[(SwitchFeel, &[&str])] = &[
    (
        SwitchFeel::Linear,
        &["linear", "linearnya", "red", "gateron red", "outemu red"],
    ),
    (SwitchFeel::Tactile, &["tactile", "brown", "tactil"]),
    (SwitchFeel::Clicky, &["clicky", "blue", "click"]),
];

const LAYOUT_KEYWORDS: &[(Layout, &[&str])] = &[
    (Layout::Sixty, &["60%", "60 persen"]),
    (Layout::SixtyFive, &["65%", "65 persen"]),
    (Layout::SeventyFive, &["75%", "75 persen"]),
    (Layout::Tenkeyless, &["tkl", "80%"]),
    (Layout::Full, &["full", "fullsize"]),
];

const USE_CASE_KEYWORDS: &[(UseCase, &[&str])] = &[
    (UseCase::Coding, &["ngoding", "programming", "coding"]),
    (UseCase::Gaming, &["gaming", "game"]),
    (UseCase::Professional, &["kantor", "office", "professional"]),
];

/// 一條規則：任一關鍵字出現在 (已轉小寫的) 文字中即命中
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordRule<T> {
    pub value: T,
    pub keywords: Vec<String>,
}

impl<T> KeywordRule<T> {
    pub fn matches(&self, text_lower: &str) -> bool {
        self.keywords.iter().any(|k| text_lower.contains(k.as_str()))
    }
}

/// 依優先順序排列的規則表，第一條命中的規則勝出
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet<T> {
    rules: Vec<KeywordRule<T>>,
}

impl<T: Copy + PartialEq> RuleSet<T> {
    pub fn from_table(table: &[(T, &[&str])]) -> Self {
        let rules = table
            .iter()
            .map(|(value, keywords)| KeywordRule {
                value: *value,
                keywords: keywords.iter().map(|k| k.to_string()).collect(),
            })
            .collect();
        Self { rules }
    }

    pub fn first_match(&self, text_lower: &str) -> Option<T> {
        self.rules
            .iter()
            .find(|rule| rule.matches(text_lower))
            .map(|rule| rule.value)
    }

    /// 在既有規則後追加關鍵字 (不改變優先順序)；沒有該值的規則時新增一條最低優先的規則
    pub fn extend<I, S>(&mut self, value: T, keywords: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty());

        match self.rules.iter_mut().find(|rule| rule.value == value) {
            Some(rule) => {
                for keyword in keywords {
                    if !rule.keywords.contains(&keyword) {
                        rule.keywords.push(keyword);
                    }
                }
            }
            None => self.rules.push(KeywordRule {
                value,
                keywords: keywords.collect(),
            }),
        }
    }

    pub fn rules(&self) -> &[KeywordRule<T>] {
        &self.rules
    }
}

/// 把自由文字轉成 [`PreferenceRecord`]。對任何輸入都不會失敗。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceExtractor {
    switch_rules: RuleSet<SwitchFeel>,
    layout_rules: RuleSet<Layout>,
    use_case_rules: RuleSet<UseCase>,
}

impl Default for PreferenceExtractor {
    fn default() -> Self {
        Self {
            switch_rules: RuleSet::from_table(SWITCH_KEYWORDS),
            layout_rules: RuleSet::from_table(LAYOUT_KEYWORDS),
            use_case_rules: RuleSet::from_table(USE_CASE_KEYWORDS),
        }
    }
}

impl PreferenceExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn switch_rules(&self) -> &RuleSet<SwitchFeel> {
        &self.switch_rules
    }

    pub fn layout_rules(&self) -> &RuleSet<Layout> {
        &self.layout_rules
    }

    pub fn use_case_rules(&self) -> &RuleSet<UseCase> {
        &self.use_case_rules
    }

    pub fn add_switch_keywords<I, S>(&mut self, feel: SwitchFeel, keywords: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.switch_rules.extend(feel, keywords);
    }

    pub fn add_layout_keywords<I, S>(&mut self, layout: Layout, keywords: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.layout_rules.extend(layout, keywords);
    }

    pub fn add_use_case_keywords<I, S>(&mut self, use_case: UseCase, keywords: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.use_case_rules.extend(use_case, keywords);
    }

    pub fn extract(&self, text: &str) -> PreferenceRecord {
        let text_lower = text.to_lowercase();

        let record = PreferenceRecord {
            switch: self.switch_rules.first_match(&text_lower),
            layout: self.layout_rules.first_match(&text_lower),
            use_case: self
                .use_case_rules
                .first_match(&text_lower)
                .unwrap_or_default(),
            budget: parse_budget(&text_lower),
            raw_text: text.to_string(),
        };

        tracing::debug!(
            switch = ?record.switch,
            layout = ?record.layout,
            use_case = %record.use_case,
            budget = ?record.budget,
            "Extracted preferences"
        );

        record
    }
}

/// 使用預設規則表抽取偏好
pub fn extract(text: &str) -> PreferenceRecord {
    DEFAULT_EXTRACTOR.extract(text)
}

/// 預算解析：`500rb`、`500 ribu`、`1.2 juta`、`1,5jt`、`1200000`。
/// 沒有後綴時直接使用數字本身，不做任何換算。
pub fn parse_budget(text: &str) -> Option<u64> {
    let caps = BUDGET_PATTERN.captures(text)?;
    let number = caps.get(1)?.as_str().replace(',', ".");
    let unit = caps.get(2).map(|m| m.as_str().to_lowercase());

    let exponent = match unit.as_deref() {
        Some("k" | "rb" | "ribu") => 3,
        Some("juta" | "jt") => 6,
        Some("m" | "miliar") => 9,
        _ => 0,
    };

    let budget = scale_decimal(&number, exponent);
    if budget.is_none() {
        tracing::warn!("Ignoring budget token '{}': value out of range", number);
    }
    budget
}

/// 以整數運算計算 `number × 10^exponent` 並捨去小數
fn scale_decimal(number: &str, exponent: u32) -> Option<u64> {
    let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));

    let multiplier = 10u64.pow(exponent);
    let mut value = whole.parse::<u64>().ok()?.checked_mul(multiplier)?;

    // 小數部分只有前 exponent 位會留下
    let kept: String = fraction
        .chars()
        .chain(std::iter::repeat('0'))
        .take(exponent as usize)
        .collect();
    if !kept.is_empty() {
        value = value.checked_add(kept.parse::<u64>().ok()?)?;
    }

    Some(value)
}
