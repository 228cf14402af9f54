use crate::domain::model::{CatalogEntry, PreferenceRecord, ScoredEntry};

pub const DEFAULT_TOP_N: usize = 5;

pub const SWITCH_POINTS: i64 = 30;
pub const LAYOUT_POINTS: i64 = 20;
pub const USE_CASE_POINTS: i64 = 25;
pub const WITHIN_BUDGET_POINTS: i64 = 25;
pub const MAX_OVER_BUDGET_PENALTY: i64 = 25;
/// 超出預算時，每超過這麼多最小貨幣單位扣 1 分
pub const PENALTY_UNIT: u64 = 100_000;
pub const BASE_POINTS: i64 = 5;

/// 單筆目錄項目的加總分數，可能為負
pub fn score(prefs: &PreferenceRecord, entry: &CatalogEntry) -> i64 {
    let mut score = 0;

    if let Some(feel) = prefs.switch {
        if entry
            .switch_description
            .to_lowercase()
            .contains(feel.keyword())
        {
            score += SWITCH_POINTS;
        }
    }

    if let Some(layout) = prefs.layout {
        let token = layout.label().split_whitespace().next().unwrap_or_default();
        if entry.layout.label().contains(token) {
            score += LAYOUT_POINTS;
        }
    }

    if entry.supports(prefs.use_case) {
        score += USE_CASE_POINTS;
    }

    if let Some(budget) = prefs.budget {
        if entry.price <= budget {
            score += WITHIN_BUDGET_POINTS;
        } else {
            let penalty_units = (entry.price - budget) / PENALTY_UNIT;
            score -= i64::try_from(penalty_units)
                .unwrap_or(i64::MAX)
                .min(MAX_OVER_BUDGET_PENALTY);
        }
    }

    score + BASE_POINTS
}

/// 對整份目錄評分並依分數遞減排序；同分時保留目錄原本的順序
pub fn score_all<'a>(prefs: &PreferenceRecord, catalog: &'a [CatalogEntry]) -> Vec<ScoredEntry<'a>> {
    let mut scored: Vec<ScoredEntry<'a>> = catalog
        .iter()
        .map(|entry| ScoredEntry {
            entry,
            score: score(prefs, entry),
        })
        .collect();

    // sort_by 是穩定排序
    scored.sort_by(|a, b| b.score.cmp(&a.score));

    for scored_entry in &scored {
        tracing::trace!(
            name = %scored_entry.entry.name,
            score = scored_entry.score,
            "Scored catalog entry"
        );
    }

    scored
}

pub fn rank_scored<'a>(
    prefs: &PreferenceRecord,
    catalog: &'a [CatalogEntry],
    top_n: usize,
) -> Vec<ScoredEntry<'a>> {
    let mut scored = score_all(prefs, catalog);
    scored.truncate(top_n);
    scored
}

/// 回傳最多 `top_n` 筆最符合偏好的項目。不設門檻，分數再低也會回傳。
pub fn rank<'a>(
    prefs: &PreferenceRecord,
    catalog: &'a [CatalogEntry],
    top_n: usize,
) -> Vec<&'a CatalogEntry> {
    rank_scored(prefs, catalog, top_n)
        .into_iter()
        .map(|scored| scored.entry)
        .collect()
}
