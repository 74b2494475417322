//! Externally settable visual parameters of the icon.
//!
//! Every override point is named after the CSS custom property that controls
//! it (`--head-color`, ...) and falls back to a built-in default when unset.
//! The day and weekday-name colors first fall back to `--outline-color`.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_BACKGROUND_COLOR, DEFAULT_HEAD_COLOR, DEFAULT_ICON_SIZE, DEFAULT_MONTH_COLOR,
    DEFAULT_OUTLINE_COLOR, PROP_BACKGROUND_COLOR, PROP_DAY_COLOR, PROP_HEAD_COLOR, PROP_ICON_SIZE,
    PROP_MONTH_COLOR, PROP_NAME_COLOR, PROP_OUTLINE_COLOR,
};

/// Error type for style overrides.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StyleError {
    /// Not one of the icon's custom properties.
    #[error("Unknown style property: {0}")]
    UnknownProperty(String),
}

/// Style overrides; `None` means "use the default".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconStyle {
    #[serde(rename = "--icon-size", skip_serializing_if = "Option::is_none")]
    pub icon_size: Option<String>,
    #[serde(rename = "--background-color", skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(rename = "--outline-color", skip_serializing_if = "Option::is_none")]
    pub outline_color: Option<String>,
    #[serde(rename = "--head-color", skip_serializing_if = "Option::is_none")]
    pub head_color: Option<String>,
    #[serde(rename = "--day-color", skip_serializing_if = "Option::is_none")]
    pub day_color: Option<String>,
    #[serde(rename = "--month-color", skip_serializing_if = "Option::is_none")]
    pub month_color: Option<String>,
    #[serde(rename = "--name-color", skip_serializing_if = "Option::is_none")]
    pub name_color: Option<String>,
}

/// Concrete values after applying every fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStyle {
    pub icon_size: String,
    pub background_color: String,
    pub outline_color: String,
    pub head_color: String,
    pub day_color: String,
    pub month_color: String,
    pub name_color: String,
}

impl IconStyle {
    /// Names of all override points, in declaration order.
    pub const PROPERTIES: [&'static str; 7] = [
        PROP_ICON_SIZE,
        PROP_BACKGROUND_COLOR,
        PROP_OUTLINE_COLOR,
        PROP_HEAD_COLOR,
        PROP_DAY_COLOR,
        PROP_MONTH_COLOR,
        PROP_NAME_COLOR,
    ];

    fn slot(&self, property: &str) -> Option<&Option<String>> {
        Some(match property {
            PROP_ICON_SIZE => &self.icon_size,
            PROP_BACKGROUND_COLOR => &self.background_color,
            PROP_OUTLINE_COLOR => &self.outline_color,
            PROP_HEAD_COLOR => &self.head_color,
            PROP_DAY_COLOR => &self.day_color,
            PROP_MONTH_COLOR => &self.month_color,
            PROP_NAME_COLOR => &self.name_color,
            _ => return None,
        })
    }

    fn slot_mut(&mut self, property: &str) -> Option<&mut Option<String>> {
        Some(match property {
            PROP_ICON_SIZE => &mut self.icon_size,
            PROP_BACKGROUND_COLOR => &mut self.background_color,
            PROP_OUTLINE_COLOR => &mut self.outline_color,
            PROP_HEAD_COLOR => &mut self.head_color,
            PROP_DAY_COLOR => &mut self.day_color,
            PROP_MONTH_COLOR => &mut self.month_color,
            PROP_NAME_COLOR => &mut self.name_color,
            _ => return None,
        })
    }

    /// Returns the override for `property`, if one is set.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.slot(property)?.as_deref()
    }

    /// Sets or clears (`None`) the override for `property`.
    ///
    /// # Errors
    /// Returns `StyleError::UnknownProperty` if `property` is not an override point.
    pub fn set(&mut self, property: &str, value: Option<&str>) -> Result<(), StyleError> {
        let slot = self
            .slot_mut(property)
            .ok_or_else(|| StyleError::UnknownProperty(property.to_owned()))?;
        *slot = value.map(str::to_owned);
        Ok(())
    }

    pub fn resolve(&self) -> ResolvedStyle {
        let or_default =
            |value: &Option<String>, default: &str| value.as_deref().unwrap_or(default).to_owned();
        let outline_color = or_default(&self.outline_color, DEFAULT_OUTLINE_COLOR);

        ResolvedStyle {
            icon_size: or_default(&self.icon_size, DEFAULT_ICON_SIZE),
            background_color: or_default(&self.background_color, DEFAULT_BACKGROUND_COLOR),
            head_color: or_default(&self.head_color, DEFAULT_HEAD_COLOR),
            day_color: or_default(&self.day_color, &outline_color),
            month_color: or_default(&self.month_color, DEFAULT_MONTH_COLOR),
            name_color: or_default(&self.name_color, &outline_color),
            outline_color,
        }
    }

    /// Stylesheet for hosts that apply the custom properties through CSS.
    ///
    /// Overrides set on this value become the innermost fallback of each
    /// `var()` chain, so a property set by the host document still wins.
    pub fn to_css(&self) -> String {
        let resolved = self.resolve();
        let outline = format!("var({PROP_OUTLINE_COLOR}, {})", resolved.outline_color);
        let size = format!("var({PROP_ICON_SIZE}, {})", resolved.icon_size);

        let mut css = String::new();
        css.push_str(&format!(
            ":host, svg {{ width: {size}; height: {size}; display: inline-block; }}\n"
        ));
        css.push_str(&format!(
            "#bg {{ fill: var({PROP_BACKGROUND_COLOR}, {}); }}\n",
            resolved.background_color
        ));
        css.push_str(&format!("#outline {{ stroke: {outline}; }}\n"));
        css.push_str(&format!(
            "#head {{ fill: var({PROP_HEAD_COLOR}, {}); }}\n",
            resolved.head_color
        ));
        css.push_str(&format!(
            "#day {{ fill: var({PROP_DAY_COLOR}, {}); }}\n",
            self.day_color.as_deref().unwrap_or(&outline)
        ));
        css.push_str(&format!(
            "#monat {{ fill: var({PROP_MONTH_COLOR}, {}); }}\n",
            resolved.month_color
        ));
        css.push_str(&format!(
            "#name {{ fill: var({PROP_NAME_COLOR}, {}); }}\n",
            self.name_color.as_deref().unwrap_or(&outline)
        ));
        css
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Parses an inline declaration list such as `"--icon-size: 16px; --head-color: red"`.
    ///
    /// Like a browser reading a `style` attribute, declarations without a
    /// `name: value` shape and properties that are not override points are
    /// skipped; the rest still apply.
    pub fn parse_inline(s: &str) -> Self {
        let mut style = Self::default();

        for declaration in s.split(';').map(str::trim).filter(|d| !d.is_empty()) {
            let Some((name, value)) = declaration
                .split_once(':')
                .map(|(name, value)| (name.trim(), value.trim()))
                .filter(|(name, value)| !name.is_empty() && !value.is_empty())
            else {
                tracing::debug!("Skipped malformed style declaration {:?}", declaration);
                continue;
            };

            if let Err(e) = style.set(name, Some(value)) {
                tracing::debug!("Skipped style declaration: {}", e);
            }
        }

        style
    }
}

impl FromStr for IconStyle {
    type Err = Infallible;

    /// Same as [`IconStyle::parse_inline`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse_inline(s))
    }
}

impl fmt::Display for IconStyle {
    /// Writes the overrides back as an inline declaration list.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for property in Self::PROPERTIES {
            if let Some(value) = self.get(property) {
                if !first {
                    f.write_str(" ")?;
                }
                write!(f, "{property}: {value};")?;
                first = false;
            }
        }
        Ok(())
    }
}
