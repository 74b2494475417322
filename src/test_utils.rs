//! Fixtures shared by the unit tests.

use chrono::NaiveDate;

use crate::date::{CalendarDate, IconDate};
use crate::types::{Month, Year};

pub fn year(value: i32) -> Year {
    Year::new(value).unwrap()
}

pub fn month(value: u8) -> Month {
    Month::new(value).unwrap()
}

pub fn date(y: i32, m: u8, d: u8) -> CalendarDate {
    CalendarDate::from_ymd(y, m, d).unwrap()
}

pub fn icon_date(s: &str) -> IconDate {
    s.parse().unwrap()
}

pub fn next_day(date: CalendarDate) -> CalendarDate {
    let naive = NaiveDate::from_ymd_opt(
        date.year().get(),
        u32::from(date.month().get()),
        u32::from(date.day().get()),
    )
    .and_then(|d| d.succ_opt())
    .unwrap();
    CalendarDate::from_naive(naive).unwrap()
}
