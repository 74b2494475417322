mod consts;
mod date;
mod icon;
mod lang;
mod prelude;
mod registry;
mod render;
mod style;
mod types;

#[cfg(test)]
mod test_utils;

pub use consts::*;
pub use date::{CalendarDate, IconDate};
pub use icon::{DateIcon, DateIconConfig, DateIconState, OBSERVED_ATTRIBUTES, RenderObserver};
pub use lang::{Language, LanguageError};
pub use registry::{
    AttributeError, Element, ElementConstructor, ElementDefinition, Registry, RegistryError,
    create_element, is_valid_tag_name, register, with_global,
};
pub use render::{Labels, escape, render_svg};
pub use style::{IconStyle, ResolvedStyle, StyleError};
pub use types::{Day, Month, Weekday, Year, days_in_month, is_leap_year};

use crate::prelude::*;

/// Error type for date strings and date components.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {_0} (outside the supported calendar)")]
    InvalidYear(i32),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { month: u8, day: u8, year: i32 },
    #[display(fmt = "Invalid weekday: {} (must be 0-{})", "_0", "DAYS_IN_WEEK - 1")]
    InvalidWeekday(u8),
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}
