//! FormPane のユニットテスト

use super::*;

#[test]
fn pane_with_name_is_valid() {
    let pane = FormPane::new(RuleRecord::new("skip-empty"));

    assert!(pane.is_valid());
}

#[test]
fn pane_with_blank_name_is_invalid() {
    let mut pane = FormPane::new(RuleRecord::new("skip-empty"));
    pane.set_name("   ");

    assert!(!pane.is_valid());
}

#[test]
fn save_data_reflects_edits() {
    let mut pane = FormPane::new(RuleRecord::new("skip-empty"));
    pane.set_name("renamed");
    pane.set_active(false);
    pane.set_actions(vec![serde_yaml::from_str("type: set_value").unwrap()]);

    let data = pane.save_data();

    assert_eq!(data.get("name").and_then(Value::as_str), Some("renamed"));
    assert_eq!(data.get("active").and_then(Value::as_bool), Some(false));
    assert_eq!(
        data.get("actions").and_then(Value::as_sequence).map(Vec::len),
        Some(1)
    );
}
