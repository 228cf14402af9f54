use crate::domain::model::{CatalogEntry, ResponseStyle};

/// `549000` → `Rp 549.000`
pub fn format_idr(price: u64) -> String {
    let digits = price.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    format!("Rp {}", grouped)
}

pub fn format_no_match(style: ResponseStyle) -> String {
    let base = "Maaf, aku belum menemukan keyboard yang cocok dengan preferensimu.";
    match style {
        ResponseStyle::Formal => format!("{} Cobalah ubah rentang harga atau tipe switch.", base),
        ResponseStyle::Santai => format!("{} Coba longgarkan budget atau ganti tipe switch, ya.", base),
    }
}

/// 把排名結果排成聊天回覆；區塊之間以空行分隔
pub fn format_recommendation(entries: &[&CatalogEntry], style: ResponseStyle) -> String {
    if entries.is_empty() {
        return format_no_match(style);
    }

    let mut blocks = Vec::with_capacity(entries.len() * 2 + 2);
    blocks.push(
        match style {
            ResponseStyle::Formal => "Berikut rekomendasi yang cocok untukmu:",
            ResponseStyle::Santai => "Ini dia rekomendasi yang cocok nih:",
        }
        .to_string(),
    );

    for entry in entries {
        blocks.push(format!(
            "• **{}** — {} — {} — {}",
            entry.name,
            entry.layout,
            entry.switch_description,
            format_idr(entry.price)
        ));
        blocks.push(format!("  _{}_", entry.description));
    }

    blocks.push(
        match style {
            ResponseStyle::Formal => "\nJika Anda ingin, saya dapat mencari review atau link pembelian untuk salah satu pilihan di atas.",
            ResponseStyle::Santai => "\nMau aku carikan link beli atau review buat salah satu pilihan di atas?",
        }
        .to_string(),
    );

    blocks.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::Catalog;

    #[test]
    fn test_format_idr_groups_thousands_with_dots() {
        assert_eq!(format_idr(549_000), "Rp 549.000");
        assert_eq!(format_idr(1_200_000), "Rp 1.200.000");
        assert_eq!(format_idr(999), "Rp 999");
        assert_eq!(format_idr(0), "Rp 0");
    }

    #[test]
    fn test_empty_result_uses_style_specific_apology() {
        assert!(format_recommendation(&[], ResponseStyle::Formal).ends_with("tipe switch."));
        assert!(format_recommendation(&[], ResponseStyle::Santai).ends_with("switch, ya."));
    }

    #[test]
    fn test_recommendation_lists_each_entry() {
        let catalog = Catalog::builtin();
        let picks: Vec<&CatalogEntry> = catalog.entries().iter().take(2).collect();
        let text = format_recommendation(&picks, ResponseStyle::Santai);

        assert!(text.starts_with("Ini dia rekomendasi yang cocok nih:\n\n"));
        assert!(text.contains("• **Monka K75** — 75% — Star Vector (linear) — Rp 549.000"));
        assert!(text.contains("  _60% compact, great for small desk and portability._"));
        assert!(text.ends_with("salah satu pilihan di atas?"));
    }
}
