use proptest::prelude::*;
use stencil_skeleton::{normalize, skeletonize};

fn has_arabic_indic_digit(text: &str) -> bool {
    text.chars().any(|c| ('\u{0660}'..='\u{0669}').contains(&c))
}

// ── Normalization is idempotent ───────────────────────────────────────────

proptest! {
    #[test]
    fn normalize_is_idempotent(text in "\\PC{0,80}") {
        let once = normalize(&text);
        let twice = normalize(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn normalize_is_idempotent_on_mixed_script(
        words in prop::collection::vec("[A-Za-z]{1,6}|[\u{0621}-\u{064A}\u{064B}-\u{065F}\u{0640}]{1,6}|[\u{0660}-\u{0669}]{1,4}", 0..8),
        sep in "[ \t\r]{1,3}"
    ) {
        let text = words.join(&sep);
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once.clone());
        prop_assert!(!once.contains("  "));
        prop_assert!(!once.contains('\t'));
        prop_assert!(!has_arabic_indic_digit(&once), "arabic-indic digits left in {:?}", once);
        prop_assert!(!once.chars().any(|c| c.is_ascii_uppercase()), "uppercase left in {:?}", once);
    }

    #[test]
    fn arabic_indic_digits_map_positionally(n in 0u64..10_000_000) {
        let ascii = n.to_string();
        let arabic: String = ascii
            .chars()
            .map(|c| char::from_u32(0x0660 + c.to_digit(10).unwrap()).unwrap())
            .collect();
        prop_assert_eq!(normalize(&arabic), ascii);
    }
}

// ── Skeleton extraction ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn skeleton_is_deterministic(text in "[a-z0-9 .,:*/-]{0,60}") {
        let norm = normalize(&text);
        prop_assert_eq!(skeletonize(&norm), skeletonize(&norm));
    }

    #[test]
    fn six_digit_codes_always_become_code(code in "[0-9]{6}", word in "[a-z]{2,8}") {
        // A currency word in front would make this an amount.
        prop_assume!(word != "sar");
        let skeleton = skeletonize(&format!("{word} {code}"));
        prop_assert_eq!(skeleton, format!("{word} <CODE>"));
    }

    #[test]
    fn masked_accounts_always_become_acct(stars in 3usize..8, digits in "[0-9]{4}") {
        let text = format!("card {}{} used", "*".repeat(stars), digits);
        prop_assert_eq!(skeletonize(&text), "card <ACCT> used");
    }

    #[test]
    fn prefixed_amounts_always_become_amount(whole in 0u32..1_000_000, cents in 0u32..100) {
        let text = format!("paid sar {whole}.{cents:02} today");
        prop_assert_eq!(skeletonize(&text), "paid <AMOUNT> today");
    }

    #[test]
    fn no_ascii_digit_run_of_four_or_more_survives(
        parts in prop::collection::vec("[0-9]{4,12}|[a-z]{1,8}", 1..6)
    ) {
        let text = parts.join(" ");
        let skeleton = skeletonize(&text);
        let longest_run = skeleton
            .split(|c: char| !c.is_ascii_digit())
            .map(str::len)
            .max()
            .unwrap_or(0);
        prop_assert!(longest_run < 4, "digits survived in {}", skeleton);
    }
}
