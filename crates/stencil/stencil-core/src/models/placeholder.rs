use std::fmt;

use serde::{Deserialize, Serialize};

/// Typed token standing in for a variable value inside a skeleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placeholder {
    Amount,
    DateTime,
    Date,
    Time,
    Ref,
    Acct,
    Iban,
    Num,
    Code,
}

impl Placeholder {
    /// All placeholder kinds in skeleton-rule precedence order.
    pub const ALL: [Placeholder; 9] = [
        Placeholder::Amount,
        Placeholder::DateTime,
        Placeholder::Date,
        Placeholder::Time,
        Placeholder::Ref,
        Placeholder::Acct,
        Placeholder::Iban,
        Placeholder::Code,
        Placeholder::Num,
    ];

    /// The literal token written into skeletons.
    pub fn token(self) -> &'static str {
        match self {
            Self::Amount => "<AMOUNT>",
            Self::DateTime => "<DATETIME>",
            Self::Date => "<DATE>",
            Self::Time => "<TIME>",
            Self::Ref => "<REF>",
            Self::Acct => "<ACCT>",
            Self::Iban => "<IBAN>",
            Self::Num => "<NUM>",
            Self::Code => "<CODE>",
        }
    }

    /// Field name used in reports for values of this kind.
    pub fn field_name(self) -> &'static str {
        match self {
            Self::Amount => "amount",
            Self::DateTime | Self::Date => "date",
            Self::Time => "time",
            Self::Ref => "reference",
            Self::Acct => "account",
            Self::Iban => "iban",
            Self::Num => "numeric_id",
            Self::Code => "code/otp",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.token() == token)
    }

    /// Placeholder kinds present in a skeleton, in `ALL` order.
    pub fn present_in(skeleton: &str) -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|p| skeleton.contains(p.token()))
            .collect()
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
