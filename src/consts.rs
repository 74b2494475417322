/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used when a date string omits the day
pub const MIN_DAY: u8 = 1;

/// Month number for January, used when a date string omits the month
pub const JANUARY: u8 = 1;
/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Days in a week
pub const DAYS_IN_WEEK: u8 = 7;

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
/// Separates the date from the time of day (ISO 8601 format)
pub const TIME_SEPARATOR: char = 'T';
/// Month-first format separator (legacy US format)
pub const MONTH_FIRST_SEPARATOR: char = '/';
/// Width of a signed ISO 8601 expanded year, e.g. `-000001`
pub const EXPANDED_YEAR_DIGITS: usize = 6;

/// `chrono` formats tried after the ISO forms, e.g. `1975/04/07`,
/// `April 7, 1975`, `7 Apr 1975`, `Mon Apr 07 1975`
pub const FALLBACK_DATE_FORMATS: [&str; 5] =
    ["%Y/%m/%d", "%B %d, %Y", "%B %d %Y", "%d %B %Y", "%a %B %d %Y"];
/// `chrono` formats of the time of day in ISO strings
pub const TIME_FORMATS: [&str; 2] = ["%H:%M:%S%.f", "%H:%M"];
/// `chrono` format of a UTC offset in ISO strings
pub const OFFSET_FORMAT: &str = "%H:%M";

/// Text rendered in place of any field of an unparsable date
pub const NAN_TEXT: &str = "NaN";
/// `Display` text of an unparsable date
pub const INVALID_DATE_TEXT: &str = "Invalid Date";

/// Tag name the icon is registered under
pub const TAG_NAME: &str = "kaskadi-date-icon";

/// Attribute holding the displayed date
pub const ATTR_DATE: &str = "date";
/// Attribute selecting the label language
pub const ATTR_LANG: &str = "lang";
/// Attribute holding inline custom property overrides
pub const ATTR_STYLE: &str = "style";

// Style override points and their defaults.
pub const PROP_ICON_SIZE: &str = "--icon-size";
pub const PROP_BACKGROUND_COLOR: &str = "--background-color";
pub const PROP_OUTLINE_COLOR: &str = "--outline-color";
pub const PROP_HEAD_COLOR: &str = "--head-color";
pub const PROP_DAY_COLOR: &str = "--day-color";
pub const PROP_MONTH_COLOR: &str = "--month-color";
pub const PROP_NAME_COLOR: &str = "--name-color";

pub const DEFAULT_ICON_SIZE: &str = "48px";
pub const DEFAULT_BACKGROUND_COLOR: &str = "white";
pub const DEFAULT_OUTLINE_COLOR: &str = "#333";
pub const DEFAULT_HEAD_COLOR: &str = "royalblue";
pub const DEFAULT_MONTH_COLOR: &str = "white";

/// SVG coordinate system, the card is drawn on a 100x100 canvas
pub const VIEW_BOX: &str = "0 0 100 100";
/// Outline of the header tab: rounded top corners, flat bottom edge at y=35
pub const HEAD_PATH: &str = "M5 35v -15a 15,15 0 0 1 15 -15h60a15 15 0 0 1 15 15v15z";
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
