use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::RunnerError;

/// `m<YYYYMMDD>_<HHMMSS>_<description>`, the name every migration module
/// carries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MigrationId {
    timestamp: String,
    description: String,
}

impl MigrationId {
    /// `YYYYMMDDHHMMSS`
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl FromStr for MigrationId {
    type Err = RunnerError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| RunnerError::InvalidIdentifier {
            name: name.to_owned(),
            reason,
        };

        let rest = name.strip_prefix('m').ok_or_else(|| invalid("missing `m` prefix"))?;
        let mut parts = rest.splitn(3, '_');
        let date = parts.next().unwrap_or_default();
        let time = parts.next().ok_or_else(|| invalid("missing time component"))?;
        let description = parts
            .next()
            .ok_or_else(|| invalid("missing description"))?;

        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if date.len() != 8 || !all_digits(date) {
            return Err(invalid("date must be 8 digits"));
        }
        if time.len() != 6 || !all_digits(time) {
            return Err(invalid("time must be 6 digits"));
        }
        if description.is_empty() {
            return Err(invalid("missing description"));
        }

        let field = |s: &str, range: std::ops::Range<usize>| -> u32 {
            s[range].parse().unwrap_or_default()
        };
        let (year, month, day) = (field(date, 0..4), field(date, 4..6), field(date, 6..8));
        if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
            return Err(invalid("date is not a calendar date"));
        }
        let (hour, minute, second) = (field(time, 0..2), field(time, 2..4), field(time, 4..6));
        if hour > 23 || minute > 59 || second > 59 {
            return Err(invalid("time is not a time of day"));
        }

        Ok(MigrationId {
            timestamp: format!("{date}{time}"),
            description: description.to_owned(),
        })
    }
}

fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        2 if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

impl fmt::Display for MigrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (date, time) = self.timestamp.split_at(8);
        write!(f, "m{date}_{time}_{}", self.description)
    }
}

impl Ord for MigrationId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.timestamp
            .cmp(&other.timestamp)
            .then_with(|| self.description.cmp(&other.description))
    }
}

impl PartialOrd for MigrationId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
