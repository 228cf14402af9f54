use mecharek::core::extractor::parse_budget;
use mecharek::{extract, Layout, PreferenceRecord, SwitchFeel, UseCase};

/// 「找 linear、50 萬印尼盾、寫程式用」
#[test]
fn test_linear_500rb_for_coding() {
    let record = extract("cari keyboard linear 500rb untuk ngoding");

    assert_eq!(record.switch, Some(SwitchFeel::Linear));
    assert_eq!(record.budget, Some(500_000));
    assert_eq!(record.use_case, UseCase::Coding);
    assert_eq!(record.layout, None);
}

#[test]
fn test_tactile_for_office_with_decimal_juta() {
    let record = extract("butuh yang tactile buat kantor, budget 1.2 juta");

    assert_eq!(record.switch, Some(SwitchFeel::Tactile));
    assert_eq!(record.budget, Some(1_200_000));
    assert_eq!(record.use_case, UseCase::Professional);
}

#[test]
fn test_empty_and_whitespace_input() {
    for text in ["", "   ", "\n\t"] {
        let record = extract(text);
        assert_eq!(record.switch, None);
        assert_eq!(record.layout, None);
        assert_eq!(record.budget, None);
        assert_eq!(record.use_case, UseCase::General);
        assert_eq!(record.raw_text, text);
    }
}

#[test]
fn test_text_without_keywords_leaves_fields_unset() {
    let record = extract("halo, apa kabar?");
    assert_eq!(
        record,
        PreferenceRecord {
            raw_text: "halo, apa kabar?".to_string(),
            ..PreferenceRecord::default()
        }
    );
}

#[test]
fn test_matching_is_case_insensitive() {
    let record = extract("LINEAR TKL buat GAMING 750RB");
    assert_eq!(record.switch, Some(SwitchFeel::Linear));
    assert_eq!(record.layout, Some(Layout::Tenkeyless));
    assert_eq!(record.use_case, UseCase::Gaming);
    assert_eq!(record.budget, Some(750_000));
    assert_eq!(record.raw_text, "LINEAR TKL buat GAMING 750RB");
}

#[test]
fn test_first_number_wins_even_when_later_one_is_larger() {
    assert_eq!(extract("300k, maksimal 2000000").budget, Some(300_000));
    assert_eq!(extract("500 ribu atau 2 juta").budget, Some(500_000));
}

#[test]
fn test_layout_percentage_is_also_the_first_number() {
    // 數字只看第一個命中，配列的百分比也算
    let record = extract("60% linear 500rb");
    assert_eq!(record.layout, Some(Layout::Sixty));
    assert_eq!(record.budget, Some(60));
}

#[test]
fn test_comma_decimal_separator() {
    assert_eq!(parse_budget("1,5 juta"), Some(1_500_000));
    assert_eq!(parse_budget("2,25jt"), Some(2_250_000));
}

#[test]
fn test_unsuffixed_number_is_literal() {
    assert_eq!(extract("budget 500").budget, Some(500));
    assert_eq!(extract("budget 1500000").budget, Some(1_500_000));
}

#[test]
fn test_brand_aliases_resolve_switch_feel() {
    assert_eq!(extract("gateron red").switch, Some(SwitchFeel::Linear));
    assert_eq!(extract("cherry mx brown").switch, Some(SwitchFeel::Tactile));
    assert_eq!(extract("kailh blue").switch, Some(SwitchFeel::Clicky));
}
