use std::fmt;

use crate::consts::{HEAD_PATH, NAN_TEXT, SVG_NAMESPACE, VIEW_BOX};
use crate::date::IconDate;
use crate::lang::Language;
use crate::style::{IconStyle, ResolvedStyle};

/// The three texts printed on the icon.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Labels {
    /// Month abbreviation and year of the century, e.g. `"Apr 75"`
    pub month: String,
    /// Day of the month without leading zero
    pub day: String,
    /// Full weekday name
    pub weekday: String,
}

impl Labels {
    pub fn new(date: &IconDate, lang: Language) -> Self {
        match date {
            IconDate::Valid(date) => Self {
                month: format!(
                    "{} {}",
                    lang.month_name(date.month()),
                    date.year().two_digit()
                ),
                day: date.day().to_string(),
                weekday: lang.weekday_name(date.weekday()).to_owned(),
            },
            IconDate::Invalid => Self {
                month: format!("{NAN_TEXT} {NAN_TEXT}"),
                day: NAN_TEXT.to_owned(),
                weekday: NAN_TEXT.to_owned(),
            },
        }
    }
}

/// Escapes text for use in SVG character data and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Renders the icon as a standalone SVG document fragment.
///
/// The output depends only on the arguments, so equal inputs always render
/// byte-identical markup.
pub fn render_svg(date: &IconDate, lang: Language, style: &IconStyle) -> String {
    Svg {
        labels: Labels::new(date, lang),
        style: style.resolve(),
    }
    .to_string()
}

struct Svg {
    labels: Labels,
    style: ResolvedStyle,
}

impl fmt::Display for Svg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { labels, style } = self;
        let size = escape(&style.icon_size);

        writeln!(
            f,
            r#"<svg xmlns="{SVG_NAMESPACE}" viewBox="{VIEW_BOX}" width="{size}" height="{size}">"#
        )?;
        writeln!(
            f,
            r#"  <rect id="bg" x="5" y="5" width="90" height="90" rx="15" fill="{}"/>"#,
            escape(&style.background_color)
        )?;
        writeln!(
            f,
            r#"  <path id="head" d="{HEAD_PATH}" fill="{}"/>"#,
            escape(&style.head_color)
        )?;
        writeln!(
            f,
            r#"  <rect id="outline" x="5" y="5" width="90" height="90" rx="15" fill="none" stroke="{}" stroke-width="5"/>"#,
            escape(&style.outline_color)
        )?;
        writeln!(
            f,
            r#"  <g text-anchor="middle" dominant-baseline="middle" font-weight="bold">"#
        )?;
        writeln!(
            f,
            r#"    <text id="monat" x="50" y="22.5" font-size="18" fill="{}">{}</text>"#,
            escape(&style.month_color),
            escape(&labels.month)
        )?;
        writeln!(
            f,
            r#"    <text id="day" x="50" y="58" font-size="35" fill="{}">{}</text>"#,
            escape(&style.day_color),
            escape(&labels.day)
        )?;
        writeln!(
            f,
            r#"    <text id="name" x="50" y="82" font-size="14px" font-weight="200" fill="{}">{}</text>"#,
            escape(&style.name_color),
            escape(&labels.weekday)
        )?;
        f.write_str("  </g>\n</svg>\n")
    }
}
