//! Enumerations shared by both record shapes.

use serde::{Deserialize, Serialize};

/// Account label used when none is given.
pub const DEFAULT_ACCOUNT_TYPE: &str = "Cash";

/// Category reference used when none is given. Must exist in the store.
pub const DEFAULT_CATEGORY_ID: i64 = 1;

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Money coming in.
    Income,
    /// Money going out.
    Expense,
}

impl TransactionKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 2] = [Self::Income, Self::Expense];

    /// Wire label of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction kind: {s}")),
        }
    }
}

/// Cadence of a recurring transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    /// Every day.
    Daily,
    /// Every week.
    Weekly,
    /// Every month.
    Monthly,
    /// Every year.
    Yearly,
}

impl Frequency {
    /// Every frequency, shortest cadence first.
    pub const ALL: [Self; 4] = [Self::Daily, Self::Weekly, Self::Monthly, Self::Yearly];

    /// Wire label of the frequency.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
            Self::Yearly => "Yearly",
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            _ => Err(format!("Unknown frequency: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[test]
    fn test_kind_wire_format() {
        assert_eq!(
            serde_json::to_string(&TransactionKind::Income).unwrap(),
            "\"Income\""
        );
        assert_eq!(
            serde_json::from_str::<TransactionKind>("\"Expense\"").unwrap(),
            TransactionKind::Expense
        );
    }

    #[rstest]
    #[case("Daily", Frequency::Daily)]
    #[case("weekly", Frequency::Weekly)]
    #[case("MONTHLY", Frequency::Monthly)]
    #[case("Yearly", Frequency::Yearly)]
    fn test_frequency_from_str(#[case] input: &str, #[case] expected: Frequency) {
        assert_eq!(Frequency::from_str(input).unwrap(), expected);
    }

    #[test]
    fn test_unknown_labels_are_rejected() {
        assert!(Frequency::from_str("Never").is_err());
        assert!(TransactionKind::from_str("Transfer").is_err());
    }

    #[test]
    fn test_display_matches_wire_label() {
        for frequency in Frequency::ALL {
            let wire = serde_json::to_string(&frequency).unwrap();
            assert_eq!(wire, format!("\"{frequency}\""));
        }
        for kind in TransactionKind::ALL {
            let wire = serde_json::to_string(&kind).unwrap();
            assert_eq!(wire, format!("\"{kind}\""));
        }
    }
}
