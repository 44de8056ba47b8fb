use chrono::NaiveDate;
use stencil_core::config::SkeletonConfig;
use stencil_core::errors::StencilErrorCode;
use stencil_core::models::{Message, Placeholder};
use stencil_core::traits::ISkeletonizer;
use stencil_skeleton::patterns::rule_specs;
use stencil_skeleton::{annotate, annotate_all, detect_language, Language, SkeletonExtractor};

fn message(id: &str, text: &str) -> Message {
    let at = NaiveDate::from_ymd_opt(2024, 1, 15)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    Message::new(id, "SAB", at, text)
}

#[test]
fn extractor_exposes_rules_in_order() {
    let extractor = SkeletonExtractor::standard().unwrap();
    let names: Vec<&str> = extractor.rules().map(|(name, _)| name).collect();
    let specs: Vec<&str> = rule_specs(&SkeletonConfig::default())
        .iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, specs);

    let placeholders: Vec<Placeholder> = extractor.rules().map(|(_, p)| p).collect();
    let code_at = placeholders.iter().position(|p| *p == Placeholder::Code).unwrap();
    let num_at = placeholders.iter().position(|p| *p == Placeholder::Num).unwrap();
    assert!(code_at < num_at);
}

#[test]
fn extractor_is_usable_as_trait_object() {
    let extractor = SkeletonExtractor::new(&SkeletonConfig::default()).unwrap();
    let dynamic: &dyn ISkeletonizer = &extractor;
    assert_eq!(dynamic.skeletonize("your otp is 482913"), "your otp is <CODE>");
}

#[test]
fn unbalanced_currency_code_is_escaped_not_an_error() {
    let config = SkeletonConfig {
        currency_codes: vec!["(sar".into()],
        ..Default::default()
    };
    let extractor = SkeletonExtractor::new(&config);
    assert!(extractor.is_ok());
}

#[test]
fn configured_iban_country() {
    let config = SkeletonConfig {
        iban_countries: vec!["AE".into()],
        ..Default::default()
    };
    let extractor = SkeletonExtractor::new(&config).unwrap();
    assert_eq!(
        extractor.skeletonize("to ae07****************12345678"),
        "to <IBAN>"
    );
    // The default country is no longer recognized.
    assert_ne!(
        extractor.skeletonize("to sa03****************12345678"),
        "to <IBAN>"
    );
}

#[test]
fn annotate_attaches_norm_and_skeleton() {
    let extractor = SkeletonExtractor::standard().unwrap();
    let annotated = annotate(message("msg_000001", "Your OTP is ٤٨٢٩١٣"), extractor);
    assert_eq!(annotated.id(), "msg_000001");
    assert_eq!(annotated.text_raw(), "Your OTP is ٤٨٢٩١٣");
    assert_eq!(annotated.text_norm, "your otp is 482913");
    assert_eq!(annotated.text_skeleton, "your otp is <CODE>");
}

#[test]
fn annotate_all_preserves_order_and_count() {
    let extractor = SkeletonExtractor::standard().unwrap();
    let messages = vec![
        message("msg_000001", "b"),
        message("msg_000002", "a"),
        message("msg_000003", ""),
    ];
    let annotated = annotate_all(messages, extractor);
    let ids: Vec<&str> = annotated.iter().map(|m| m.id()).collect();
    assert_eq!(ids, vec!["msg_000001", "msg_000002", "msg_000003"]);
    assert_eq!(annotated[2].text_skeleton, "");
}

#[test]
fn language_of_skeletons() {
    assert_eq!(
        detect_language("your card was used for a purchase of <AMOUNT>"),
        Language::English
    );
    assert_eq!(detect_language("تم خصم مبلغ من حسابك البنكي"), Language::Arabic);
    assert_eq!(Language::Mixed.code(), "mixed");
    assert_eq!(Language::Arabic.to_string(), "ar");
}

#[test]
fn standard_extractor_error_code_is_stable() {
    // The standard table always compiles; the error path only exists for
    // custom vocabularies.
    assert!(SkeletonExtractor::standard().is_ok());
    let err = stencil_core::StencilError::Pattern {
        rule: "iban".into(),
        reason: "bad".into(),
    };
    assert_eq!(err.error_code(), "PATTERN_ERROR");
}

#[test]
fn masked_account_needs_a_boundary_after_four_digits() {
    let extractor = SkeletonExtractor::standard().unwrap();
    assert_eq!(extractor.skeletonize("card ****1234 used"), "card <ACCT> used");
    assert_eq!(extractor.skeletonize("card ****12345 used"), "card ****<NUM> used");
}

#[test]
fn masked_iban_is_one_placeholder() {
    let extractor = SkeletonExtractor::standard().unwrap();
    assert_eq!(
        extractor.skeletonize("to sa03****************12345678 done"),
        "to <IBAN> done"
    );
}

#[test]
fn collapsed_amounts_keep_the_following_space() {
    let extractor = SkeletonExtractor::standard().unwrap();
    assert_eq!(
        extractor.skeletonize("sar 10.00 sar 20.00 to x"),
        "<AMOUNT> to x"
    );
}
