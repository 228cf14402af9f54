use crate::domain::model::{CatalogEntry, Layout, UseCase};
use crate::utils::error::{MatchError, Result};
use std::collections::HashSet;

fn invalid(message: String) -> MatchError {
    MatchError::CatalogError {
        source_name: "catalog".to_string(),
        message,
    }
}

/// 唯讀的鍵盤目錄。建立後不提供任何修改方法，順序即策展排序。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// 驗證後建立目錄：至少一筆、名稱非空且唯一、價格大於 0
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(invalid("catalog must contain at least one keyboard".to_string()));
        }

        let mut seen = HashSet::new();
        for (index, entry) in entries.iter().enumerate() {
            if entry.name.trim().is_empty() {
                return Err(invalid(format!("keyboard #{} has an empty name", index + 1)));
            }
            if entry.price == 0 {
                return Err(invalid(format!(
                    "'{}' has price 0, price must be greater than 0",
                    entry.name
                )));
            }
            // 名稱比對不分大小寫
            if !seen.insert(entry.name.trim().to_lowercase()) {
                return Err(invalid(format!("duplicate keyboard name '{}'", entry.name)));
            }
        }

        Ok(Self { entries })
    }

    /// 內建的六把範例鍵盤
    pub fn builtin() -> Self {
        use UseCase::*;

        let entries = vec![
            CatalogEntry::new(
                "Monka K75",
                Layout::SeventyFive,
                "Star Vector (linear)",
                549_000,
                [Coding, General],
                "75% compact, build solid, linear feel. Budget friendly.",
            ),
            CatalogEntry::new(
                "RK61",
                Layout::Sixty,
                "Outemu Red (linear)",
                550_000,
                [Gaming, Coding],
                "60% compact, great for small desk and portability.",
            ),
            CatalogEntry::new(
                "Keychron K6",
                Layout::SixtyFive,
                "Gateron Red (linear) / Brown (tactile) options",
                1_200_000,
                [Coding, Productivity],
                "Wireless option, hot-swap, versatile for work and play.",
            ),
            CatalogEntry::new(
                "Ajazz AK33",
                Layout::SeventyFive,
                "Brown (tactile)",
                450_000,
                [Coding, General],
                "Compact 75% with tactile switches and reasonable price.",
            ),
            CatalogEntry::new(
                "Redragon K617",
                Layout::Sixty,
                "Red (linear)",
                650_000,
                [Gaming, General],
                "Budget gaming 60% with RGB features.",
            ),
            CatalogEntry::new(
                "Ducky One 2 (TKL)",
                Layout::Tenkeyless,
                "Cherry MX Brown (tactile)",
                2_000_000,
                [Coding, Professional],
                "High quality switches and stabilizers, premium typing feel.",
            ),
        ];

        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name.trim()))
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_passes_validation() {
        let builtin = Catalog::builtin();
        assert_eq!(builtin.len(), 6);
        let revalidated = Catalog::new(builtin.entries().to_vec()).unwrap();
        assert_eq!(revalidated, builtin);
    }

    #[test]
    fn test_rejects_zero_price() {
        let entry = CatalogEntry::new("Free", Layout::Full, "Blue (clicky)", 0, [UseCase::General], "");
        let err = Catalog::new(vec![entry]).unwrap_err();
        assert!(matches!(err, MatchError::CatalogError { .. }));
        assert!(err.to_string().contains("'Free' has price 0"));
    }

    #[test]
    fn test_rejects_duplicate_names_and_empty_catalog() {
        let a = CatalogEntry::new("RK61", Layout::Sixty, "Red (linear)", 1, [UseCase::General], "");
        let b = CatalogEntry::new("rk61", Layout::Sixty, "Blue (clicky)", 2, [UseCase::General], "");
        let err = Catalog::new(vec![a, b]).unwrap_err();
        assert!(err.to_string().contains("duplicate keyboard name 'rk61'"));
        assert!(matches!(
            Catalog::new(Vec::new()),
            Err(MatchError::CatalogError { .. })
        ));
    }

    #[test]
    fn test_rejects_blank_name() {
        let entry = CatalogEntry::new("  ", Layout::Sixty, "Red (linear)", 1, [UseCase::General], "");
        let err = Catalog::new(vec![entry]).unwrap_err();
        assert_eq!(err.category(), crate::utils::error::ErrorCategory::Catalog);
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.find("rk61").map(|e| e.price), Some(550_000));
        assert!(catalog.find("Model M").is_none());
    }
}
