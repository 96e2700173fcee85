use chrono::{Datelike, Local, NaiveDate};

/// A caller passed month text that is not a valid `YYYY-MM` key.
///
/// Surfaced instead of silently substituting the current month, so a caller
/// bug can't masquerade as "no expenses this month".
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InvalidMonthKey(String);

impl std::fmt::Display for InvalidMonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid month '{}': expected YYYY-MM", self.0)
    }
}

impl std::error::Error for InvalidMonthKey {}

/// A calendar month, canonically written `"YYYY-MM"`.
///
/// Bucketing rule: an expense belongs to the month whose half-open interval
/// `[first day, first day of next month)` contains its date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Parse a strict `YYYY-MM` key: 4-digit year, zero-padded month 01-12.
    pub(crate) fn parse(s: &str) -> Result<Self, InvalidMonthKey> {
        let err = || InvalidMonthKey(s.to_string());
        let (y, m) = s.split_once('-').ok_or_else(err)?;
        if y.len() != 4 || m.len() != 2 || !y.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }
        let year: i32 = y.parse().map_err(|_| err())?;
        let month: u32 = m.parse().map_err(|_| err())?;
        if !(1..=12).contains(&month) {
            return Err(err());
        }
        Ok(Self { year, month })
    }

    pub(crate) fn of_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The month containing today, in the local time zone. The wall clock is
    /// read here and nowhere else; everything downstream works on the key.
    pub(crate) fn current() -> Self {
        Self::of_date(Local::now().date_naive())
    }

    pub(crate) fn year(&self) -> i32 {
        self.year
    }

    pub(crate) fn first_day(&self) -> NaiveDate {
        // month is always in 1..=12
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// Half-open interval `[start, end)`: a date equal to `end` belongs to
    /// the following month, never both.
    pub(crate) fn bounds(&self) -> (NaiveDate, NaiveDate) {
        (self.first_day(), self.next().first_day())
    }

    pub(crate) fn contains(&self, date: NaiveDate) -> bool {
        let (start, end) = self.bounds();
        date >= start && date < end
    }

    pub(crate) fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub(crate) fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Full label for headings, e.g. `"December 2025"`.
    pub(crate) fn label(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }

    /// Three-letter label for chart axes, e.g. `"Dec"`.
    pub(crate) fn short_label(&self) -> String {
        self.first_day().format("%b").to_string()
    }
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
