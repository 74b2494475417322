use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::consts::{
    DATE_SEPARATOR, EXPANDED_YEAR_DIGITS, FALLBACK_DATE_FORMATS, INVALID_DATE_TEXT, JANUARY,
    MIN_DAY, MONTH_FIRST_SEPARATOR, OFFSET_FORMAT, TIME_FORMATS, TIME_SEPARATOR,
};
use crate::types::{Day, Month, Weekday, Year};
use crate::ParseError;

/// A concrete calendar date together with its day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    year: Year,
    month: Month,
    day: Day,
    weekday: Weekday,
}

impl CalendarDate {
    /// Creates a date from validated components and derives its weekday.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidDay` if the components do not name a real day.
    pub fn new(year: Year, month: Month, day: Day) -> Result<Self, ParseError> {
        let naive = NaiveDate::from_ymd_opt(year.get(), month.get().into(), day.get().into())
            .ok_or(ParseError::InvalidDay {
                month: month.get(),
                day: day.get(),
                year: year.get(),
            })?;

        Ok(Self {
            year,
            month,
            day,
            weekday: naive.weekday().into(),
        })
    }

    /// Creates a date from raw numbers (1-based month and day).
    ///
    /// # Errors
    /// Returns the `ParseError` of the first component that is out of range.
    pub fn from_ymd(year: i32, month: u8, day: u8) -> Result<Self, ParseError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        let day = Day::new(day, year, month)?;
        Self::new(year, month, day)
    }

    /// Converts a `chrono` date.
    ///
    /// # Errors
    /// Never fails for dates `chrono` can represent; the `Result` mirrors [`CalendarDate::from_ymd`].
    pub fn from_naive(date: NaiveDate) -> Result<Self, ParseError> {
        // month() and day() are at most 12 and 31
        Self::from_ymd(date.year(), date.month() as u8, date.day() as u8)
    }

    pub const fn year(&self) -> Year {
        self.year
    }

    pub const fn month(&self) -> Month {
        self.month
    }

    pub const fn day(&self) -> Day {
        self.day
    }

    pub const fn weekday(&self) -> Weekday {
        self.weekday
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year = self.year.get();
        // Years outside 0..=9999 use the signed ISO 8601 expanded form
        if (0..=9999).contains(&year) {
            write!(f, "{year:04}")?;
        } else {
            write!(f, "{year:+07}")?;
        }
        write!(f, "-{:02}-{:02}", self.month.get(), self.day.get())
    }
}

impl FromStr for CalendarDate {
    type Err = ParseError;

    /// Tries the ISO 8601 and month-first forms first, then the textual forms
    /// in [`FALLBACK_DATE_FORMATS`] and RFC 2822 / RFC 3339 timestamps.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        match Self::parse_numeric(trimmed) {
            Err(ParseError::InvalidFormat(reason)) => Self::parse_textual(trimmed)
                .ok_or(ParseError::InvalidFormat(reason)),
            result => result,
        }
    }
}

impl CalendarDate {
    /// Helper to parse an unsigned number with better error messages
    fn parse_number<T: FromStr>(s: &str) -> Result<T, ParseError> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidFormat(s.to_owned()));
        }
        s.parse::<T>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }

    /// `YYYY[-MM[-DD]]` (optionally with an expanded `±YYYYYY` year and a time of day),
    /// `MM/YYYY` and `MM/DD/YYYY`
    fn parse_numeric(s: &str) -> Result<Self, ParseError> {
        let date_part = match s.split_once([TIME_SEPARATOR, ' ']) {
            Some((date, time)) => {
                Self::check_time(time.trim())?;
                date.trim_end()
            }
            None => s,
        };

        // Strictly enforce delimiters: DATE_SEPARATOR for ISO, MONTH_FIRST_SEPARATOR for month-first
        if date_part.contains(MONTH_FIRST_SEPARATOR) {
            if date_part.contains(DATE_SEPARATOR) {
                return Err(ParseError::InvalidFormat(format!(
                    "Mixed delimiters ({DATE_SEPARATOR} and {MONTH_FIRST_SEPARATOR})"
                )));
            }
            let parts: Vec<&str> = date_part.split(MONTH_FIRST_SEPARATOR).map(str::trim).collect();
            return match parts.as_slice() {
                &[month, year] => Self::from_parts(Self::parse_number(year)?, Some(month), None),
                &[month, day, year] => {
                    Self::from_parts(Self::parse_number(year)?, Some(month), Some(day))
                }
                _ => Err(ParseError::InvalidFormat(format!(
                    "Unexpected number of date components: {s}"
                ))),
            };
        }

        let (year, rest) = Self::split_year(date_part)?;
        let parts: Vec<&str> = rest.map_or_else(Vec::new, |rest| rest.split(DATE_SEPARATOR).collect());
        match parts.as_slice() {
            &[] => Self::from_parts(year, None, None),
            &[month] => Self::from_parts(year, Some(month), None),
            &[month, day] => Self::from_parts(year, Some(month), Some(day)),
            _ => Err(ParseError::InvalidFormat(format!(
                "Unexpected number of date components: {s}"
            ))),
        }
    }

    /// Splits off the ISO year, which may carry a sign (`+002024`, `-000001`)
    fn split_year(date_part: &str) -> Result<(i32, Option<&str>), ParseError> {
        let (sign, unsigned) = match date_part.strip_prefix('-') {
            Some(rest) => (-1, rest),
            None => (1, date_part.strip_prefix('+').unwrap_or(date_part)),
        };
        let (digits, rest) = match unsigned.split_once(DATE_SEPARATOR) {
            Some((digits, rest)) => (digits, Some(rest)),
            None => (unsigned, None),
        };

        if unsigned.len() != date_part.len() && digits.len() != EXPANDED_YEAR_DIGITS {
            return Err(ParseError::InvalidFormat(format!(
                "Signed years need {EXPANDED_YEAR_DIGITS} digits: {date_part}"
            )));
        }
        Ok((sign * Self::parse_number::<i32>(digits)?, rest))
    }

    /// Missing month or day fall back to the first one, like `new Date("1991")`
    fn from_parts(year: i32, month: Option<&str>, day: Option<&str>) -> Result<Self, ParseError> {
        let month = month.map_or(Ok(JANUARY), Self::parse_number)?;
        let day = day.map_or(Ok(MIN_DAY), Self::parse_number)?;
        Self::from_ymd(year, month, day)
    }

    /// The time of day never shows on the icon, but an impossible one makes the date invalid
    fn check_time(time: &str) -> Result<(), ParseError> {
        let invalid = || ParseError::InvalidFormat(format!("Invalid time of day: {time}"));

        let clock = match time.strip_suffix('Z') {
            Some(clock) => clock,
            None => match time.rfind(['+', '-']) {
                Some(pos) => {
                    NaiveTime::parse_from_str(&time[pos + 1..], OFFSET_FORMAT).map_err(|_| invalid())?;
                    &time[..pos]
                }
                None => time,
            },
        };

        TIME_FORMATS
            .iter()
            .any(|format| NaiveTime::parse_from_str(clock, format).is_ok())
            .then_some(())
            .ok_or_else(invalid)
    }

    /// Textual dates (`April 7, 1975`) and full timestamps (`Mon, 07 Apr 1975 00:00:00 GMT`).
    /// A timestamp keeps the calendar date written in it, whatever its offset.
    fn parse_textual(s: &str) -> Option<Self> {
        let naive = DateTime::parse_from_rfc2822(s)
            .or_else(|_| DateTime::parse_from_rfc3339(s))
            .map(|dt| dt.date_naive())
            .ok()
            .or_else(|| {
                FALLBACK_DATE_FORMATS
                    .iter()
                    .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
            })?;
        Self::from_naive(naive).ok()
    }
}

impl Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// The date shown by the icon.
///
/// An unparsable date string does not raise an error when applied to the
/// icon. It becomes `Invalid`, and every field derived from it renders as
/// `NaN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconDate {
    Valid(CalendarDate),
    Invalid,
}

impl IconDate {
    /// Today's date on the local clock.
    pub fn today() -> Self {
        CalendarDate::from_naive(chrono::Local::now().date_naive())
            .map_or(Self::Invalid, Self::Valid)
    }

    /// Parses like [`FromStr`], but maps any failure to `Invalid`.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or(Self::Invalid)
    }

    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    pub const fn as_calendar_date(&self) -> Option<&CalendarDate> {
        match self {
            Self::Valid(date) => Some(date),
            Self::Invalid => None,
        }
    }
}

impl From<CalendarDate> for IconDate {
    fn from(date: CalendarDate) -> Self {
        Self::Valid(date)
    }
}

impl FromStr for IconDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self::Valid)
    }
}

impl fmt::Display for IconDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid(date) => write!(f, "{date}"),
            Self::Invalid => f.write_str(INVALID_DATE_TEXT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;

    #[test]
    fn test_parse_iso_full_date() {
        let parsed = "1975-04-07".parse::<CalendarDate>().unwrap();
        assert_eq!(parsed.year().get(), 1975);
        assert_eq!(parsed.month().get(), 4);
        assert_eq!(parsed.day().get(), 7);
        assert_eq!(parsed.weekday().index(), 1, "1975-04-07 was a Monday");
    }

    #[test]
    fn test_parse_accepted_forms() {
        struct TestCase {
            input: &'static str,
            expected: (i32, u8, u8),
        }

        let cases = [
            TestCase {
                input: "1991",
                expected: (1991, 1, 1),
            },
            TestCase {
                input: "1991-08",
                expected: (1991, 8, 1),
            },
            TestCase {
                input: " 1991-08-15 ",
                expected: (1991, 8, 15),
            },
            TestCase {
                input: "1991-08-15T10:30:00Z",
                expected: (1991, 8, 15),
            },
            TestCase {
                input: "1991-08-15T23:59:59.999+02:00",
                expected: (1991, 8, 15),
            },
            TestCase {
                input: "1991-08-15 10:30",
                expected: (1991, 8, 15),
            },
            TestCase {
                input: "08/15/1991",
                expected: (1991, 8, 15),
            },
            TestCase {
                input: "08/1991",
                expected: (1991, 8, 1),
            },
            TestCase {
                input: "0000-01-01",
                expected: (0, 1, 1),
            },
            TestCase {
                input: "-000001-01-01",
                expected: (-1, 1, 1),
            },
            TestCase {
                input: "+010000-06-30",
                expected: (10_000, 6, 30),
            },
            TestCase {
                input: "1975/04/07",
                expected: (1975, 4, 7),
            },
            TestCase {
                input: "April 7, 1975",
                expected: (1975, 4, 7),
            },
            TestCase {
                input: "Apr 7, 1975",
                expected: (1975, 4, 7),
            },
            TestCase {
                input: "7 April 1975",
                expected: (1975, 4, 7),
            },
            TestCase {
                input: "Mon Apr 07 1975",
                expected: (1975, 4, 7),
            },
            TestCase {
                input: "Mon, 07 Apr 1975 00:00:00 GMT",
                expected: (1975, 4, 7),
            },
            TestCase {
                input: "Mon, 07 Apr 1975 23:30:00 -0500",
                expected: (1975, 4, 7),
            },
        ];

        for case in &cases {
            let parsed = case
                .input
                .parse::<CalendarDate>()
                .unwrap_or_else(|e| panic!("{:?} should parse: {e}", case.input));
            let (y, m, d) = case.expected;
            assert_eq!(parsed, date(y, m, d), "input {:?}", case.input);
        }
    }

    #[test]
    fn test_parse_rejected_forms() {
        assert!(matches!("".parse::<CalendarDate>(), Err(ParseError::EmptyInput)));
        assert!(matches!("   ".parse::<CalendarDate>(), Err(ParseError::EmptyInput)));
        assert!(matches!(
            "not a date".parse::<CalendarDate>(),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "1991-08/15".parse::<CalendarDate>(),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "1991-08-15-01".parse::<CalendarDate>(),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "1991-13-01".parse::<CalendarDate>(),
            Err(ParseError::InvalidMonth(13))
        ));
        assert!(matches!(
            "2023-02-29".parse::<CalendarDate>(),
            Err(ParseError::InvalidDay { .. })
        ));
        assert!(matches!(
            "+2024-01-01".parse::<CalendarDate>(),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "1975/04/31".parse::<CalendarDate>(),
            Err(ParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_parse_rejects_impossible_times() {
        for input in [
            "1991-08-15Tnoon",
            "1975-04-07T99:99:99",
            "1975-04-07T24:61",
            "1975-04-07T1-2-3",
            "1975-04-07T10:30+25:00",
            "1975-04-07T10:30Z+01:00",
            "1975-04-07T",
        ] {
            assert!(
                matches!(input.parse::<CalendarDate>(), Err(ParseError::InvalidFormat(_))),
                "{input:?} should be rejected"
            );
            assert_eq!(IconDate::parse_lenient(input), IconDate::Invalid);
        }
    }

    #[test]
    fn test_weekdays() {
        assert_eq!(date(2000, 1, 1).weekday(), Weekday::SATURDAY);
        assert_eq!(date(0, 1, 1).weekday(), Weekday::SATURDAY);
        assert_eq!(date(-1, 1, 1).weekday().index(), 5, "Friday");
        assert_eq!(date(2024, 2, 29).weekday().index(), 4, "Thursday");
        assert_eq!(date(1970, 1, 4).weekday(), Weekday::SUNDAY);
    }

    #[test]
    fn test_from_naive() {
        let naive = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        assert_eq!(CalendarDate::from_naive(naive).unwrap(), date(2026, 10, 17));

        let before_common_era = NaiveDate::from_ymd_opt(-44, 3, 15).unwrap();
        assert_eq!(CalendarDate::from_naive(before_common_era).unwrap(), date(-44, 3, 15));
    }

    #[test]
    fn test_display() {
        assert_eq!(date(5, 3, 9).to_string(), "0005-03-09");
        assert_eq!(date(0, 1, 1).to_string(), "0000-01-01");
        assert_eq!(date(-1, 12, 31).to_string(), "-000001-12-31");
        assert_eq!(date(10_000, 1, 1).to_string(), "+010000-01-01");
        assert_eq!(IconDate::Valid(date(1975, 4, 7)).to_string(), "1975-04-07");
        assert_eq!(IconDate::Invalid.to_string(), "Invalid Date");
    }

    #[test]
    fn test_parse_lenient() {
        assert_eq!(
            IconDate::parse_lenient("1975-04-07"),
            IconDate::Valid(date(1975, 4, 7))
        );
        assert_eq!(IconDate::parse_lenient("tomorrow"), IconDate::Invalid);
        assert!(!IconDate::Invalid.is_valid());
        assert!(IconDate::Invalid.as_calendar_date().is_none());
    }

    #[test]
    fn test_today_is_valid() {
        assert!(IconDate::today().is_valid());
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&date(1975, 4, 7)).unwrap();
        assert_eq!(json, "\"1975-04-07\"");

        let parsed: CalendarDate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, date(1975, 4, 7));
        assert!(serde_json::from_str::<CalendarDate>("\"1975-02-30\"").is_err());
    }
}
