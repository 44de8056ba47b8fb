//! Field detection from skeletons: which values a parser for the template
//! would have to extract.

use stencil_core::models::Placeholder;

const BALANCE_AR: [&str; 2] = ["الرصيد", "رصيد"];
const MERCHANT_AR: &str = "لدى";
const FEE_AR: &str = "الرسوم";

fn mentions_balance(skeleton: &str, lower: &str) -> bool {
    lower.contains("balance") || BALANCE_AR.iter().any(|k| skeleton.contains(k))
}

fn mentions_merchant(skeleton: &str, lower: &str) -> bool {
    skeleton.contains(MERCHANT_AR) || lower.contains("merchant")
}

fn has(skeleton: &str, kinds: &[Placeholder]) -> bool {
    kinds.iter().any(|p| skeleton.contains(p.token()))
}

/// Field names listed in the Markdown report, in a fixed order.
pub fn report_fields(skeleton: &str) -> Vec<&'static str> {
    let lower = skeleton.to_lowercase();
    let checks: [(&'static str, bool); 10] = [
        ("amount", has(skeleton, &[Placeholder::Amount])),
        ("date", has(skeleton, &[Placeholder::Date, Placeholder::DateTime])),
        ("time", has(skeleton, &[Placeholder::Time, Placeholder::DateTime])),
        ("account", has(skeleton, &[Placeholder::Acct])),
        ("iban", has(skeleton, &[Placeholder::Iban])),
        ("code/otp", has(skeleton, &[Placeholder::Code])),
        ("reference", has(skeleton, &[Placeholder::Ref])),
        ("numeric_id", has(skeleton, &[Placeholder::Num])),
        ("balance", mentions_balance(skeleton, &lower)),
        ("merchant", mentions_merchant(skeleton, &lower)),
    ];
    checks
        .into_iter()
        .filter_map(|(name, present)| present.then_some(name))
        .collect()
}

/// Required and optional fields of a template stub.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateFields {
    pub required: Vec<String>,
    pub optional: Vec<String>,
}

/// Placeholders become required fields; keyword hints become optional ones.
/// `<NUM>` carries no field of its own.
pub fn template_fields(skeleton: &str) -> TemplateFields {
    let lower = skeleton.to_lowercase();
    let required: [(&str, bool); 7] = [
        ("amount", has(skeleton, &[Placeholder::Amount])),
        ("date", has(skeleton, &[Placeholder::Date, Placeholder::DateTime])),
        ("time", has(skeleton, &[Placeholder::Time, Placeholder::DateTime])),
        ("account_masked", has(skeleton, &[Placeholder::Acct])),
        ("iban", has(skeleton, &[Placeholder::Iban])),
        ("otp_code", has(skeleton, &[Placeholder::Code])),
        ("reference_number", has(skeleton, &[Placeholder::Ref])),
    ];
    let optional: [(&str, bool); 3] = [
        ("balance", mentions_balance(skeleton, &lower)),
        ("merchant_name", mentions_merchant(skeleton, &lower)),
        ("fee", skeleton.contains(FEE_AR) || lower.contains("fee")),
    ];

    let pick = |list: &[(&str, bool)]| -> Vec<String> {
        list.iter()
            .filter(|(_, present)| *present)
            .map(|(name, _)| name.to_string())
            .collect()
    };
    TemplateFields {
        required: pick(&required),
        optional: pick(&optional),
    }
}

/// Hints for whoever writes the parser, joined with `" | "`.
pub fn parse_notes(skeleton: &str) -> String {
    let lower = skeleton.to_lowercase();
    let mut notes: Vec<&str> = Vec::new();

    if skeleton.contains("شراء") || lower.contains("purchase") {
        notes.push("Transaction type: Purchase (POS or online)");
    }
    if skeleton.contains("حوالة") || lower.contains("transfer") {
        notes.push("Transaction type: Transfer");
    }
    if skeleton.contains("سحب") || lower.contains("withdrawal") {
        notes.push("Transaction type: Withdrawal");
    }
    if lower.contains("logged in") || lower.contains("login") {
        notes.push("Message type: Login notification");
    }
    if lower.contains("otp") || skeleton.contains("كلمة مرور") {
        notes.push("Message type: OTP/Authentication code");
    }

    if has(skeleton, &[Placeholder::Amount]) {
        notes.push("Extract amount value and currency");
    }
    if has(skeleton, &[Placeholder::Acct]) {
        notes.push("Extract masked account/card number");
    }
    if has(skeleton, &[Placeholder::DateTime, Placeholder::Date]) {
        notes.push("Parse transaction timestamp");
    }
    if skeleton.contains(MERCHANT_AR) {
        notes.push("Extract merchant name (after 'لدى' keyword)");
    }
    if has(skeleton, &[Placeholder::Ref]) {
        notes.push("Extract reference/transaction ID");
    }

    if notes.is_empty() {
        "Review skeleton for extractable patterns".to_string()
    } else {
        notes.join(" | ")
    }
}
