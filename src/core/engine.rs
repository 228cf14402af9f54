use crate::core::extractor::PreferenceExtractor;
use crate::core::ranker::{self, DEFAULT_TOP_N};
use crate::domain::catalog::Catalog;
use crate::domain::model::{CatalogEntry, PreferenceRecord, ScoredEntry};

/// 一次推薦的結果：抽出的偏好與排序後的候選
#[derive(Debug, Clone)]
pub struct Recommendation<'a> {
    pub preferences: PreferenceRecord,
    pub picks: Vec<ScoredEntry<'a>>,
}

impl<'a> Recommendation<'a> {
    pub fn entries(&self) -> Vec<&'a CatalogEntry> {
        self.picks.iter().map(|scored| scored.entry).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }
}

/// 抽取 → 排名。本身不持有任何跨請求的可變狀態。
#[derive(Debug, Clone)]
pub struct RecommendEngine {
    extractor: PreferenceExtractor,
    catalog: Catalog,
    top_n: usize,
}

impl RecommendEngine {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            extractor: PreferenceExtractor::default(),
            catalog,
            top_n: DEFAULT_TOP_N,
        }
    }

    pub fn with_extractor(mut self, extractor: PreferenceExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    pub fn extract(&self, text: &str) -> PreferenceRecord {
        self.extractor.extract(text)
    }

    pub fn recommend(&self, text: &str) -> Recommendation<'_> {
        let preferences = self.extract(text);
        self.recommend_for(preferences)
    }

    pub fn recommend_for(&self, preferences: PreferenceRecord) -> Recommendation<'_> {
        if !preferences.has_constraints() {
            tracing::debug!("No constraints recognised, ranking by curation order and use case only");
        }

        let picks = ranker::rank_scored(&preferences, self.catalog.entries(), self.top_n);

        tracing::info!(
            "🔎 Ranked {} keyboards, returning top {}",
            self.catalog.len(),
            picks.len()
        );
        if let Some(best) = picks.first() {
            tracing::debug!("Best match: {} (score {})", best.entry.name, best.score);
        }

        Recommendation { preferences, picks }
    }
}
