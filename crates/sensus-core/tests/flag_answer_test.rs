//! Yes/no answers that keep their stored text.

use sensus_core::types::FlagAnswer;

#[test]
fn free_text_is_kept_but_not_set() {
    let answer = FlagAnswer::from_text("Warung kelontong");
    assert_eq!(answer.as_str(), "Warung kelontong");
    assert!(!answer.is_set());
}

#[test]
fn truthy_words_are_set() {
    for raw in ["1", "Ya", " yes ", "TRUE"] {
        assert!(FlagAnswer::from_text(raw).is_set(), "{raw:?}");
    }
    assert!(!FlagAnswer::default().is_set());
    assert_eq!(FlagAnswer::default().as_str(), "0");
    assert_eq!(FlagAnswer::from(true), FlagAnswer::yes());
}

#[test]
fn serializes_as_plain_text() {
    let json = serde_json::to_string(&FlagAnswer::from_text("Ya")).unwrap();
    assert_eq!(json, r#""Ya""#);
}
