use serde::{Deserialize, Serialize};

/// Calendar field a [`TimeAmount`] is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    Year,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
}

/// How the magnitude of a [`TimeAmount`] is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountNote {
    /// Plain calendar arithmetic.
    #[default]
    None,
    /// Count only business days (the unit is always days).
    BusinessDays,
}

/// One `n unit` term of a `date ± n unit` chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeAmount {
    pub unit: TimeUnit,
    pub magnitude: i64,
    #[serde(default)]
    pub note: AmountNote,
}

impl TimeAmount {
    pub const fn new(unit: TimeUnit, magnitude: i64) -> Self {
        Self {
            unit,
            magnitude,
            note: AmountNote::None,
        }
    }

    pub const fn business_days(magnitude: i64) -> Self {
        Self {
            unit: TimeUnit::Day,
            magnitude,
            note: AmountNote::BusinessDays,
        }
    }
}
