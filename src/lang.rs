use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::prelude::*;
use crate::types::{Month, Weekday};

/// Languages the icon can label dates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    #[display(fmt = "de")]
    De,
    #[display(fmt = "en")]
    En,
    #[display(fmt = "fr")]
    Fr,
}

/// Error type for language selection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LanguageError {
    /// No name tables exist for this code.
    #[error("Unsupported language: {0:?} (expected one of de, en, fr)")]
    Unsupported(String),
}

/// Full weekday names, Sunday first.
static WEEKDAY_NAMES: [[&str; 7]; 3] = [
    [
        "Sonntag",
        "Montag",
        "Dienstag",
        "Mittwoch",
        "Donnerstag",
        "Freitag",
        "Samstag",
    ],
    [
        "Sunday",
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
    ],
    [
        "Dimanche", "Lundi", "Mardi", "Mercredi", "Jeudi", "Vendredi", "Samedi",
    ],
];

/// Month abbreviations, January first.
static MONTH_NAMES: [[&str; 12]; 3] = [
    [
        "Jan", "Feb", "M\u{e4}r", "Apr", "Mai", "Jun", "Jul", "Aug", "Sep", "Okt", "Nov", "Dez",
    ],
    [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ],
    [
        "Jan", "F\u{e9}v", "Mar", "Avr", "Mai", "Juin", "Juil", "Ao\u{fb}t", "Sep", "Oct", "Nov",
        "Dec",
    ],
];

impl Language {
    pub const ALL: [Self; 3] = [Self::De, Self::En, Self::Fr];

    /// The attribute value selecting this language
    pub const fn code(self) -> &'static str {
        match self {
            Self::De => "de",
            Self::En => "en",
            Self::Fr => "fr",
        }
    }

    const fn table_index(self) -> usize {
        match self {
            Self::De => 0,
            Self::En => 1,
            Self::Fr => 2,
        }
    }

    pub fn weekday_names(self) -> &'static [&'static str; 7] {
        &WEEKDAY_NAMES[self.table_index()]
    }

    pub fn month_names(self) -> &'static [&'static str; 12] {
        &MONTH_NAMES[self.table_index()]
    }

    pub fn weekday_name(self, weekday: Weekday) -> &'static str {
        self.weekday_names()[weekday.index()]
    }

    pub fn month_name(self, month: Month) -> &'static str {
        self.month_names()[month.index()]
    }
}

impl FromStr for Language {
    type Err = LanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.code() == s)
            .ok_or_else(|| LanguageError::Unsupported(s.to_owned()))
    }
}
