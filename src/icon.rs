use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{ATTR_DATE, ATTR_LANG, ATTR_STYLE, TAG_NAME};
use crate::date::IconDate;
use crate::lang::{Language, LanguageError};
use crate::registry::{AttributeError, Element, ElementDefinition};
use crate::render::{render_svg, Labels};
use crate::style::IconStyle;

/// Attributes the icon reacts to.
pub const OBSERVED_ATTRIBUTES: &[&str] = &[ATTR_DATE, ATTR_LANG, ATTR_STYLE];

/// Callback invoked with the new markup after every re-render.
pub type RenderObserver = Box<dyn FnMut(&str) + Send>;

/// Everything the rendered markup depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateIconState {
    pub date: IconDate,
    pub lang: Language,
    pub style: IconStyle,
    /// The `date` attribute as last applied, kept for read-back
    date_attr: Option<String>,
}

impl Default for DateIconState {
    fn default() -> Self {
        Self {
            date: IconDate::today(),
            lang: Language::default(),
            style: IconStyle::default(),
            date_attr: None,
        }
    }
}

/// Serializable description of an icon, e.g. from a config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateIconConfig {
    pub date: Option<String>,
    pub lang: Option<String>,
    pub style: IconStyle,
}

/// A calendar-style date icon.
///
/// Holds the current date, language and style overrides and keeps the
/// rendered SVG in sync: every setter that changes the state re-renders and
/// hands the new markup to the registered observers.
pub struct DateIcon {
    state: DateIconState,
    markup: String,
    observers: Vec<RenderObserver>,
}

impl DateIcon {
    /// An icon showing today's date in the default language.
    pub fn new() -> Self {
        Self::with_state(DateIconState::default())
    }

    pub fn with_state(state: DateIconState) -> Self {
        let markup = render_svg(&state.date, state.lang, &state.style);
        Self {
            state,
            markup,
            observers: Vec::new(),
        }
    }

    /// An icon showing `date`, with the same leniency as [`DateIcon::set_date`].
    pub fn with_date(date: &str) -> Self {
        let mut icon = Self::new();
        icon.set_date(Some(date));
        icon
    }

    /// Builds an icon from a deserialized config.
    ///
    /// # Errors
    /// Returns `LanguageError::Unsupported` if the configured language has no name tables.
    pub fn from_config(config: DateIconConfig) -> Result<Self, LanguageError> {
        let lang = config
            .lang
            .as_deref()
            .map_or(Ok(Language::default()), str::parse)?;

        let mut icon = Self::with_state(DateIconState {
            lang,
            style: config.style,
            ..DateIconState::default()
        });
        icon.set_date(config.date.as_deref());
        Ok(icon)
    }

    pub const fn state(&self) -> &DateIconState {
        &self.state
    }

    pub const fn date(&self) -> IconDate {
        self.state.date
    }

    pub const fn lang(&self) -> Language {
        self.state.lang
    }

    pub const fn style(&self) -> &IconStyle {
        &self.state.style
    }

    /// The `date` attribute as last applied, `None` while showing the construction-time date.
    pub fn date_attr(&self) -> Option<&str> {
        self.state.date_attr.as_deref()
    }

    /// Applies a new `date` attribute.
    ///
    /// An absent or empty value keeps the date currently shown. Any other
    /// value that does not parse, whitespace included, is kept as
    /// [`IconDate::Invalid`] and renders as `NaN`.
    pub fn set_date(&mut self, date: Option<&str>) {
        let Some(raw) = date.filter(|d| !d.is_empty()) else {
            return;
        };
        if self.state.date_attr.as_deref() == Some(raw) {
            return;
        }

        let parsed = raw.parse::<IconDate>().unwrap_or_else(|e| {
            tracing::warn!("Unparsable date {:?}: {}", raw, e);
            IconDate::Invalid
        });
        self.state.date_attr = Some(raw.to_owned());
        self.update(|state| state.date = parsed);
    }

    /// Applies a new `lang` attribute.
    ///
    /// # Errors
    /// Returns `LanguageError::Unsupported` for codes without name tables;
    /// the icon keeps its current language in that case.
    pub fn set_lang(&mut self, lang: &str) -> Result<(), LanguageError> {
        let lang = lang.parse::<Language>().inspect_err(|e| {
            tracing::warn!("Rejected language: {}", e);
        })?;
        self.set_language(lang);
        Ok(())
    }

    pub fn set_language(&mut self, lang: Language) {
        self.update(|state| state.lang = lang);
    }

    pub fn set_style(&mut self, style: IconStyle) {
        self.update(|state| state.style = style);
    }

    /// Registers a callback that receives the markup after each re-render.
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&str) + Send + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    pub fn labels(&self) -> Labels {
        Labels::new(&self.state.date, self.state.lang)
    }

    /// The markup of the last render.
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Renders the current state without touching the cached markup.
    pub fn render(&self) -> String {
        render_svg(&self.state.date, self.state.lang, &self.state.style)
    }

    /// Descriptor used to register the icon under its tag name.
    pub fn definition() -> ElementDefinition {
        ElementDefinition::new(TAG_NAME, OBSERVED_ATTRIBUTES, || Box::new(Self::new()))
    }

    fn update(&mut self, mutate: impl FnOnce(&mut DateIconState)) {
        let before = self.state.clone();
        mutate(&mut self.state);
        if self.state == before {
            return;
        }

        self.markup = self.render();
        tracing::debug!(
            "Re-rendered {} for {} ({})",
            TAG_NAME,
            self.state.date,
            self.state.lang
        );
        for observer in &mut self.observers {
            observer(&self.markup);
        }
    }
}

impl Default for DateIcon {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DateIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateIcon")
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl Element for DateIcon {
    fn tag_name(&self) -> &'static str {
        TAG_NAME
    }

    fn observed_attributes(&self) -> &'static [&'static str] {
        OBSERVED_ATTRIBUTES
    }

    fn attribute(&self, name: &str) -> Option<String> {
        match name {
            ATTR_DATE => self.state.date_attr.clone(),
            ATTR_LANG => Some(self.state.lang.to_string()),
            ATTR_STYLE => (!self.state.style.is_empty()).then(|| self.state.style.to_string()),
            _ => None,
        }
    }

    fn set_attribute(&mut self, name: &str, value: Option<&str>) -> Result<(), AttributeError> {
        match name {
            ATTR_DATE => self.set_date(value),
            // Removing the attribute falls back to the default language
            ATTR_LANG => match value {
                Some(code) => self.set_lang(code)?,
                None => self.set_language(Language::default()),
            },
            ATTR_STYLE => self.set_style(IconStyle::parse_inline(value.unwrap_or_default())),
            _ => return Err(AttributeError::Unknown(name.to_owned())),
        }
        Ok(())
    }

    fn markup(&self) -> &str {
        &self.markup
    }
}
