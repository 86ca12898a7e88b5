//! Mode registration
//!
//! Hosts expose a [`ModeRegistrar`] capability; a mode package registers
//! itself through one adapter call ([`register_mode`]). [`ModeRegistry`]
//! is the reference host-side registrar.

use crate::config::ModePreferences;
use crate::logging::codes;
use crate::mode::{DependentttMode, Mode, ModeError, MODE_NAME};
use std::collections::BTreeMap;

/// Builds a fresh mode instance per editing session
pub type ModeFactory = Box<dyn Fn() -> Box<dyn Mode> + Send + Sync>;

/// Host capability to associate a mode name with a factory
pub trait ModeRegistrar {
    fn define_mode(&mut self, name: &str, factory: ModeFactory) -> Result<(), ModeError>;
}

/// Register the dependenttt mode using the environment's preferences
pub fn register_mode(registrar: &mut dyn ModeRegistrar) -> Result<(), ModeError> {
    register_mode_with(registrar, ModePreferences::default())
}

/// Register the dependenttt mode with explicit preferences
pub fn register_mode_with(
    registrar: &mut dyn ModeRegistrar,
    preferences: ModePreferences,
) -> Result<(), ModeError> {
    registrar.define_mode(
        MODE_NAME,
        Box::new(move || -> Box<dyn Mode> {
            Box::new(DependentttMode::with_preferences(&preferences))
        }),
    )
}

/// Name-indexed store of mode factories
#[derive(Default)]
pub struct ModeRegistry {
    factories: BTreeMap<String, ModeFactory>,
}

impl ModeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every mode this crate ships
    pub fn with_builtin_modes() -> Result<Self, ModeError> {
        let mut registry = Self::new();
        register_mode(&mut registry)?;
        Ok(registry)
    }

    /// Construct a fresh instance of the named mode
    pub fn get_mode(&self, name: &str) -> Result<Box<dyn Mode>, ModeError> {
        match self.factories.get(name) {
            Some(factory) => Ok(factory()),
            None => {
                log_error!(codes::mode::UNKNOWN_MODE, "Mode lookup failed", "mode" => name);
                Err(ModeError::UnknownMode {
                    name: name.to_string(),
                })
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names in sorted order
    pub fn mode_names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl ModeRegistrar for ModeRegistry {
    fn define_mode(&mut self, name: &str, factory: ModeFactory) -> Result<(), ModeError> {
        if self.factories.contains_key(name) {
            log_error!(codes::mode::DUPLICATE_MODE, "Duplicate mode registration", "mode" => name);
            return Err(ModeError::DuplicateMode {
                name: name.to_string(),
            });
        }

        self.factories.insert(name.to_string(), factory);
        log_success!(codes::success::MODE_REGISTERED, "Mode registered", "mode" => name);
        Ok(())
    }
}

impl std::fmt::Debug for ModeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModeRegistry")
            .field("modes", &self.mode_names())
            .finish()
    }
}
