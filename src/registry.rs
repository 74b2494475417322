//! Tag-name registry for declaratively instantiated elements.
//!
//! A [`Registry`] maps tag names to constructors. The process-wide instance
//! is filled by an explicit [`register`] call at application start instead of
//! as a side effect of loading the crate.

use std::collections::HashMap;
use std::fmt;
use std::sync::{LazyLock, Mutex, MutexGuard, OnceLock, PoisonError};

use crate::icon::DateIcon;
use crate::lang::LanguageError;

/// The attribute get/set surface a host document drives an element through.
pub trait Element: Send {
    fn tag_name(&self) -> &'static str;

    /// Attributes whose changes re-render the element.
    fn observed_attributes(&self) -> &'static [&'static str];

    fn attribute(&self, name: &str) -> Option<String>;

    /// Sets (`Some`) or removes (`None`) an attribute.
    ///
    /// # Errors
    /// Returns `AttributeError` if the attribute is unknown or its value is rejected.
    fn set_attribute(&mut self, name: &str, value: Option<&str>) -> Result<(), AttributeError>;

    /// Markup of the last render.
    fn markup(&self) -> &str;
}

/// Error type for attribute updates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttributeError {
    #[error("Unknown attribute: {0}")]
    Unknown(String),

    #[error(transparent)]
    Language(#[from] LanguageError),
}

/// Error type for registry operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Tag names must start with a lowercase ASCII letter and contain a hyphen.
    #[error("Invalid tag name: {0:?}")]
    InvalidName(String),

    #[error("Tag already defined: {0}")]
    AlreadyDefined(String),

    #[error("Tag not defined: {0}")]
    NotDefined(String),
}

pub type ElementConstructor = fn() -> Box<dyn Element>;

/// How to build the element registered under a tag name.
#[derive(Clone, Copy)]
pub struct ElementDefinition {
    tag_name: &'static str,
    observed_attributes: &'static [&'static str],
    construct: ElementConstructor,
}

impl ElementDefinition {
    pub const fn new(
        tag_name: &'static str,
        observed_attributes: &'static [&'static str],
        construct: ElementConstructor,
    ) -> Self {
        Self {
            tag_name,
            observed_attributes,
            construct,
        }
    }

    pub const fn tag_name(&self) -> &'static str {
        self.tag_name
    }

    pub const fn observed_attributes(&self) -> &'static [&'static str] {
        self.observed_attributes
    }

    pub fn construct(&self) -> Box<dyn Element> {
        (self.construct)()
    }
}

impl fmt::Debug for ElementDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementDefinition")
            .field("tag_name", &self.tag_name)
            .field("observed_attributes", &self.observed_attributes)
            .finish_non_exhaustive()
    }
}

/// Checks the shape of a custom element name, e.g. `kaskadi-date-icon`.
pub fn is_valid_tag_name(name: &str) -> bool {
    name.starts_with(|c: char| c.is_ascii_lowercase())
        && name.contains('-')
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '.' | '_'))
}

#[derive(Debug, Default)]
pub struct Registry {
    definitions: HashMap<&'static str, ElementDefinition>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a definition; each tag name can be defined once.
    ///
    /// # Errors
    /// Returns `RegistryError::InvalidName` for malformed tag names and
    /// `RegistryError::AlreadyDefined` if the tag is taken.
    pub fn define(&mut self, definition: ElementDefinition) -> Result<(), RegistryError> {
        let tag = definition.tag_name();
        if !is_valid_tag_name(tag) {
            return Err(RegistryError::InvalidName(tag.to_owned()));
        }
        if self.definitions.contains_key(tag) {
            return Err(RegistryError::AlreadyDefined(tag.to_owned()));
        }

        self.definitions.insert(tag, definition);
        tracing::debug!("Defined element <{}>", tag);
        Ok(())
    }

    pub fn get(&self, tag: &str) -> Option<&ElementDefinition> {
        self.definitions.get(tag)
    }

    pub fn is_defined(&self, tag: &str) -> bool {
        self.definitions.contains_key(tag)
    }

    /// Instantiates the element registered under `tag`.
    ///
    /// # Errors
    /// Returns `RegistryError::NotDefined` if nothing is registered under `tag`.
    pub fn create(&self, tag: &str) -> Result<Box<dyn Element>, RegistryError> {
        self.get(tag)
            .map(ElementDefinition::construct)
            .ok_or_else(|| RegistryError::NotDefined(tag.to_owned()))
    }
}

static GLOBAL: LazyLock<Mutex<Registry>> = LazyLock::new(|| Mutex::new(Registry::new()));
static REGISTERED: OnceLock<()> = OnceLock::new();

fn lock_global() -> MutexGuard<'static, Registry> {
    // The registry is never left half-updated, so a poisoned lock is still usable
    GLOBAL.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Runs `f` with the process-wide registry.
///
/// The lock is held only for the duration of `f`; calling [`register`] or
/// [`create_element`] from inside `f` deadlocks.
pub fn with_global<R>(f: impl FnOnce(&mut Registry) -> R) -> R {
    f(&mut lock_global())
}

/// Registers [`DateIcon`] in the process-wide registry.
///
/// Only the first call defines the tag; later calls are no-ops.
///
/// # Errors
/// Returns `RegistryError::AlreadyDefined` if another definition claimed the
/// tag name before the first call.
pub fn register() -> Result<(), RegistryError> {
    if REGISTERED.get().is_some() {
        return Ok(());
    }

    let mut registry = lock_global();
    // Re-checked under the lock so concurrent first calls define once
    if REGISTERED.get().is_none() {
        registry.define(DateIcon::definition())?;
        let _ = REGISTERED.set(());
    }
    Ok(())
}

/// Instantiates `tag` from the process-wide registry.
///
/// # Errors
/// Returns `RegistryError::NotDefined` if nothing is registered under `tag`.
pub fn create_element(tag: &str) -> Result<Box<dyn Element>, RegistryError> {
    lock_global().create(tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TAG_NAME;

    #[test]
    fn test_tag_names() {
        assert!(is_valid_tag_name("kaskadi-date-icon"));
        assert!(is_valid_tag_name("date-icon"));
        assert!(is_valid_tag_name("x-1"));
        assert!(!is_valid_tag_name("dateicon"), "needs a hyphen");
        assert!(!is_valid_tag_name("-date-icon"), "must start with a letter");
        assert!(!is_valid_tag_name("Date-Icon"), "must be lowercase");
        assert!(!is_valid_tag_name("date icon-x"));
        assert!(!is_valid_tag_name(""));
    }

    #[test]
    fn test_define_and_create() {
        let mut registry = Registry::new();
        assert!(!registry.is_defined(TAG_NAME));

        registry.define(DateIcon::definition()).unwrap();
        assert!(registry.is_defined(TAG_NAME));
        assert_eq!(
            registry.get(TAG_NAME).unwrap().observed_attributes(),
            ["date", "lang", "style"]
        );

        let mut element = registry.create(TAG_NAME).unwrap();
        assert_eq!(element.tag_name(), TAG_NAME);
        element.set_attribute("date", Some("1975-04-07")).unwrap();
        element.set_attribute("lang", Some("en")).unwrap();
        assert!(element.markup().contains(">Apr 75</text>"));
    }

    #[test]
    fn test_define_twice_fails() {
        let mut registry = Registry::new();
        registry.define(DateIcon::definition()).unwrap();
        assert_eq!(
            registry.define(DateIcon::definition()),
            Err(RegistryError::AlreadyDefined(TAG_NAME.to_owned()))
        );
    }

    #[test]
    fn test_define_invalid_name() {
        let mut registry = Registry::new();
        let definition = ElementDefinition::new("icon", &[], || Box::new(DateIcon::new()));
        assert_eq!(
            registry.define(definition),
            Err(RegistryError::InvalidName("icon".to_owned()))
        );
    }

    #[test]
    fn test_create_undefined() {
        let registry = Registry::new();
        assert!(matches!(
            registry.create("calendar-icon"),
            Err(RegistryError::NotDefined(tag)) if tag == "calendar-icon"
        ));
    }

    #[test]
    fn test_register_is_idempotent() {
        register().unwrap();
        register().unwrap();
        assert!(with_global(|registry| registry.is_defined(TAG_NAME)));

        let element = create_element(TAG_NAME).unwrap();
        assert_eq!(element.attribute("lang").as_deref(), Some("de"));
        assert!(matches!(
            create_element("no-such-tag"),
            Err(RegistryError::NotDefined(_))
        ));
    }

    #[test]
    fn test_registry_is_released_after_access() {
        with_global(|registry| registry.get(TAG_NAME).map(ElementDefinition::tag_name));
        // Would deadlock if the lock outlived the closure
        register().unwrap();
        assert!(with_global(|registry| registry.is_defined(TAG_NAME)));

        let element = create_element(TAG_NAME).unwrap();
        assert_eq!(element.tag_name(), "kaskadi-date-icon");
    }
}
