use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

// Weekday masks use bit 0 = Monday .. bit 6 = Sunday.
const MON: u8 = 1 << 0;
const TUE: u8 = 1 << 1;
const WED: u8 = 1 << 2;
const THU: u8 = 1 << 3;
const FRI: u8 = 1 << 4;
const SAT: u8 = 1 << 5;
const SUN: u8 = 1 << 6;

/// Which weekdays count as business days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessDaysPolicy {
    #[default]
    MondayToFriday,
    MondayToSaturday,
    SundayToThursday,
    SundayToFriday,
}

impl BusinessDaysPolicy {
    pub const ALL: [BusinessDaysPolicy; 4] = [
        BusinessDaysPolicy::MondayToFriday,
        BusinessDaysPolicy::MondayToSaturday,
        BusinessDaysPolicy::SundayToThursday,
        BusinessDaysPolicy::SundayToFriday,
    ];

    const fn working_mask(self) -> u8 {
        match self {
            BusinessDaysPolicy::MondayToFriday => MON | TUE | WED | THU | FRI,
            BusinessDaysPolicy::MondayToSaturday => MON | TUE | WED | THU | FRI | SAT,
            BusinessDaysPolicy::SundayToThursday => SUN | MON | TUE | WED | THU,
            BusinessDaysPolicy::SundayToFriday => SUN | MON | TUE | WED | THU | FRI,
        }
    }

    pub fn is_business_day(self, date: NaiveDate) -> bool {
        let bit = 1u8 << date.weekday().num_days_from_monday();
        self.working_mask() & bit != 0
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            BusinessDaysPolicy::MondayToFriday => "monday_to_friday",
            BusinessDaysPolicy::MondayToSaturday => "monday_to_saturday",
            BusinessDaysPolicy::SundayToThursday => "sunday_to_thursday",
            BusinessDaysPolicy::SundayToFriday => "sunday_to_friday",
        }
    }
}

impl fmt::Display for BusinessDaysPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown business days policy: {0}")]
pub struct UnknownPolicy(pub String);

impl FromStr for BusinessDaysPolicy {
    type Err = UnknownPolicy;

    /// Accepts `monday_to_friday`, `MONDAY_TO_FRIDAY` and `monday-to-friday` spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == normalized)
            .ok_or_else(|| UnknownPolicy(s.to_string()))
    }
}
